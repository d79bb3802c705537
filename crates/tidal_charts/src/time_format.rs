const MS_PER_DAY: i64 = 86_400_000;

/// Format seconds as `HH:MM:SS`.
pub fn format_hms(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "--:--:--".to_string();
    }
    let total = seconds.floor() as i64;
    let sec = total.rem_euclid(60);
    let min_total = total.div_euclid(60);
    let min = min_total.rem_euclid(60);
    let hour = min_total.div_euclid(60);
    format!("{hour:02}:{min:02}:{sec:02}")
}

/// Wall-clock time of day (UTC) for a millisecond timestamp.
pub fn format_clock_ms(ms: f64) -> String {
    if !ms.is_finite() {
        return format_hms(ms);
    }
    let of_day = (ms.floor() as i64).rem_euclid(MS_PER_DAY);
    format_hms(of_day as f64 / 1_000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hms_formats_expected() {
        assert_eq!(format_hms(3661.0), "01:01:01");
        assert_eq!(format_hms(f64::NAN), "--:--:--");
    }

    #[test]
    fn clock_wraps_at_midnight() {
        // 2024-01-01T00:00:05Z
        assert_eq!(format_clock_ms(1_704_067_205_000.0), "00:00:05");
        assert_eq!(format_clock_ms(MS_PER_DAY as f64 - 1.0), "23:59:59");
    }
}
