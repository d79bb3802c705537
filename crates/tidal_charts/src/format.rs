pub fn format_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "NaN".to_string()
        } else if value.is_sign_positive() {
            "Inf".to_string()
        } else {
            "-Inf".to_string()
        };
    }
    let s = format!("{value:.decimals$}");
    // "-0" reads badly on an axis.
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        return s[1..].to_string();
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_rounds_to_decimals() {
        assert_eq!(format_fixed(31.6, 0), "32");
        assert_eq!(format_fixed(std::f64::consts::PI, 2), "3.14");
    }

    #[test]
    fn fixed_drops_negative_zero() {
        assert_eq!(format_fixed(-0.2, 0), "0");
        assert_eq!(format_fixed(-0.004, 2), "0.00");
        assert_eq!(format_fixed(-1.0, 0), "-1");
    }

    #[test]
    fn fixed_names_non_finite() {
        assert_eq!(format_fixed(f64::NAN, 1), "NaN");
        assert_eq!(format_fixed(f64::NEG_INFINITY, 1), "-Inf");
    }
}
