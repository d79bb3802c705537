//! Tidal Animation System
//!
//! Frame-driven interpolation for real-time charts.
//!
//! # Features
//!
//! - **Easing**: Pure `[0, 1] -> [0, 1]` shaping functions
//! - **Tweens**: Timed interpolations of scalars, vectors and records with
//!   delay, duration, easing and update/completion callbacks
//! - **Scheduler**: [`TweenEngine`] advances every active tween once per frame;
//!   the host owns the frame loop and passes `now` in
//! - **Pulse**: Periodic opacity/scale pairs for highlighted markers

pub mod easing;
pub mod pulse;
pub mod scheduler;
pub mod tween;
pub mod value;

pub use easing::Easing;
pub use pulse::{pulse_state, PulseConfig, PulseOscillator, PulseState};
pub use scheduler::{FrameStats, TweenEngine, TweenQueue};
pub use tween::{Tween, TweenBuilder, TweenError};
pub use value::TweenValue;
