//! Pulse oscillator
//!
//! A periodic, smooth 0 -> 1 -> 0 wave used to breathe a marker's opacity and
//! scale. The state at any instant is a pure function of `now`; the oscillator
//! only remembers when its current cycle started.

use std::f64::consts::PI;

/// Pulse shape parameters. Times are in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PulseConfig {
    pub period: f64,
    pub min_opacity: f32,
    pub max_opacity: f32,
    pub min_scale: f32,
    pub max_scale: f32,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            period: 2000.0,
            min_opacity: 0.3,
            max_opacity: 0.8,
            min_scale: 1.0,
            max_scale: 1.5,
        }
    }
}

impl PulseConfig {
    /// The slower, wider pulse used for a live chart's latest point.
    pub fn endpoint() -> Self {
        Self {
            period: 2500.0,
            min_opacity: 0.4,
            max_opacity: 0.9,
            min_scale: 1.0,
            max_scale: 1.8,
        }
    }
}

/// Opacity/scale pair at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PulseState {
    pub opacity: f32,
    pub scale: f32,
    /// Position on the wave, 0 at the start of a cycle and 1 at its middle.
    pub progress: f32,
}

/// Evaluate the pulse wave.
///
/// `progress = ((now - start) mod period) / period` and the wave is
/// `(sin(progress * 2pi - pi/2) + 1) / 2`, which is 0 at the start of every
/// cycle. A non-positive or non-finite period yields the minimum state.
pub fn pulse_state(
    now: f64,
    start: f64,
    period: f64,
    opacity_range: (f32, f32),
    scale_range: (f32, f32),
) -> PulseState {
    let wave = if period.is_finite() && period > 0.0 && (now - start).is_finite() {
        let progress = (now - start).rem_euclid(period) / period;
        ((progress * 2.0 * PI - PI / 2.0).sin() + 1.0) / 2.0
    } else {
        0.0
    };
    let wave = wave as f32;
    PulseState {
        opacity: opacity_range.0 + (opacity_range.1 - opacity_range.0) * wave,
        scale: scale_range.0 + (scale_range.1 - scale_range.0) * wave,
        progress: wave,
    }
}

/// Pulse generator anchored at a start time.
#[derive(Clone, Debug)]
pub struct PulseOscillator {
    config: PulseConfig,
    start_time: f64,
}

impl PulseOscillator {
    pub fn new(config: PulseConfig, now: f64) -> Self {
        Self {
            config,
            start_time: now,
        }
    }

    pub fn config(&self) -> &PulseConfig {
        &self.config
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn state(&self, now: f64) -> PulseState {
        pulse_state(
            now,
            self.start_time,
            self.config.period,
            (self.config.min_opacity, self.config.max_opacity),
            (self.config.min_scale, self.config.max_scale),
        )
    }

    /// Restart the cycle at `now`.
    pub fn reset(&mut self, now: f64) {
        self.start_time = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn cycle_starts_at_minimum() {
        let osc = PulseOscillator::new(PulseConfig::default(), 1_000.0);
        let s = osc.state(1_000.0);
        assert!(close(s.progress, 0.0));
        assert!(close(s.opacity, 0.3));
        assert!(close(s.scale, 1.0));
    }

    #[test]
    fn mid_cycle_hits_maximum() {
        let osc = PulseOscillator::new(PulseConfig::default(), 0.0);
        let s = osc.state(1_000.0);
        assert!(close(s.progress, 1.0));
        assert!(close(s.opacity, 0.8));
        assert!(close(s.scale, 1.5));
    }

    #[test]
    fn state_is_periodic() {
        let osc = PulseOscillator::new(PulseConfig::endpoint(), 250.0);
        for t in [0.0, 137.0, 999.5, 2_400.0, 10_001.0] {
            let a = osc.state(t);
            let b = osc.state(t + 2_500.0);
            assert!(close(a.opacity, b.opacity), "t={t}");
            assert!(close(a.scale, b.scale), "t={t}");
        }
    }

    #[test]
    fn reset_rebases_cycle() {
        let mut osc = PulseOscillator::new(PulseConfig::default(), 0.0);
        osc.reset(700.0);
        assert_eq!(osc.start_time(), 700.0);
        assert!(close(osc.state(700.0).progress, 0.0));
    }

    #[test]
    fn degenerate_period_yields_minimum() {
        let s = pulse_state(500.0, 0.0, 0.0, (0.2, 0.9), (1.0, 2.0));
        assert_eq!(s.opacity, 0.2);
        assert_eq!(s.scale, 1.0);
    }

    #[test]
    fn before_start_is_still_periodic() {
        let a = pulse_state(-300.0, 0.0, 1_000.0, (0.0, 1.0), (1.0, 2.0));
        let b = pulse_state(700.0, 0.0, 1_000.0, (0.0, 1.0), (1.0, 2.0));
        assert!(close(a.progress, b.progress));
    }
}
