use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChartError {
    #[error("sample ({time}, {value}) is not finite")]
    NonFiniteSample { time: f64, value: f64 },

    #[error(transparent)]
    Tween(#[from] tidal_animation::TweenError),
}
