//! Easing functions for animations

use std::f32::consts::PI;

/// Easing function type
#[derive(Clone, Copy, Debug, Default)]
pub enum Easing {
    Linear,
    EaseInQuad,
    #[default]
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInOutSine,
    /// Caller-supplied shaping function.
    Custom(fn(f32) -> f32),
}

impl Easing {
    /// The six named curves every chart configuration can refer to.
    pub const NAMED: [Easing; 6] = [
        Easing::Linear,
        Easing::EaseInQuad,
        Easing::EaseOutQuad,
        Easing::EaseInOutQuad,
        Easing::EaseOutCubic,
        Easing::EaseInOutSine,
    ];

    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => t * (2.0 - t),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => {
                let u = t - 1.0;
                u * u * u + 1.0
            }
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,
            Easing::Custom(f) => f(t),
        }
    }

    /// Look up an easing by name.
    ///
    /// Accepts `easeOutCubic`, `ease_out_cubic` and `ease-out-cubic` spellings.
    /// Unknown names resolve to the default curve.
    pub fn from_name(name: &str) -> Self {
        let key: String = name
            .chars()
            .filter(|c| *c != '_' && *c != '-' && !c.is_whitespace())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "linear" => Easing::Linear,
            "easeinquad" => Easing::EaseInQuad,
            "easeoutquad" => Easing::EaseOutQuad,
            "easeinoutquad" => Easing::EaseInOutQuad,
            "easeincubic" => Easing::EaseInCubic,
            "easeoutcubic" => Easing::EaseOutCubic,
            "easeinoutcubic" => Easing::EaseInOutCubic,
            "easeinoutsine" => Easing::EaseInOutSine,
            _ => {
                let fallback = Easing::default();
                tracing::warn!(
                    "unknown easing {:?}, falling back to {}",
                    name,
                    fallback.name()
                );
                fallback
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseInQuad => "easeInQuad",
            Easing::EaseOutQuad => "easeOutQuad",
            Easing::EaseInOutQuad => "easeInOutQuad",
            Easing::EaseInCubic => "easeInCubic",
            Easing::EaseOutCubic => "easeOutCubic",
            Easing::EaseInOutCubic => "easeInOutCubic",
            Easing::EaseInOutSine => "easeInOutSine",
            Easing::Custom(_) => "custom",
        }
    }
}
