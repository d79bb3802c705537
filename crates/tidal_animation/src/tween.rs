//! Timed interpolations
//!
//! A [`Tween`] is built (and validated) once through [`TweenBuilder`] and then
//! only mutated by the [`TweenEngine`](crate::TweenEngine) that owns it.

use std::fmt;

use thiserror::Error;

use crate::easing::Easing;
use crate::value::TweenValue;

/// Default tween duration in milliseconds.
pub const DEFAULT_DURATION_MS: f64 = 1000.0;

pub type UpdateFn = Box<dyn FnMut(&TweenValue, f32) + Send>;
pub type CompleteFn = Box<dyn FnOnce() + Send>;

/// Tween configuration errors, raised when the tween is built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TweenError {
    #[error("cannot tween a {from} into a {to}")]
    ShapeMismatch {
        from: &'static str,
        to: &'static str,
    },
    #[error("vector length mismatch: {from} vs {to}")]
    LengthMismatch { from: usize, to: usize },
    #[error("record key `{key}` is missing on one side")]
    KeyMismatch { key: String },
    #[error("duration must be a positive number of milliseconds, got {0}")]
    InvalidDuration(f64),
    #[error("delay must be a non-negative number of milliseconds, got {0}")]
    InvalidDelay(f64),
}

/// Where a tween is in its lifetime at a given instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TweenPhase {
    /// Still inside its delay.
    Pending,
    /// Running with raw (un-eased) progress in `[0, 1)`.
    Running(f32),
    /// Progress reached 1.
    Finished,
}

/// A timed interpolation between two values.
pub struct Tween {
    pub(crate) start_time: f64,
    pub(crate) delay: f64,
    pub(crate) duration: f64,
    pub(crate) from: TweenValue,
    pub(crate) to: TweenValue,
    pub(crate) easing: Easing,
    pub(crate) on_update: Option<UpdateFn>,
    pub(crate) on_complete: Option<CompleteFn>,
}

impl Tween {
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn delay(&self) -> f64 {
        self.delay
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn from_value(&self) -> &TweenValue {
        &self.from
    }

    pub fn to_value(&self) -> &TweenValue {
        &self.to
    }

    /// Raw progress at `now`; `None` while the delay has not elapsed.
    pub fn progress_at(&self, now: f64) -> Option<f32> {
        let elapsed = now - self.start_time - self.delay;
        if elapsed < 0.0 {
            return None;
        }
        Some((elapsed / self.duration).clamp(0.0, 1.0) as f32)
    }

    pub fn phase_at(&self, now: f64) -> TweenPhase {
        match self.progress_at(now) {
            None => TweenPhase::Pending,
            Some(p) if p >= 1.0 => TweenPhase::Finished,
            Some(p) => TweenPhase::Running(p),
        }
    }

    /// Interpolated value at `now` without invoking callbacks.
    pub fn value_at(&self, now: f64) -> TweenValue {
        match self.progress_at(now) {
            None => self.from.clone(),
            Some(p) => TweenValue::lerp(&self.from, &self.to, self.easing.apply(p)),
        }
    }
}

impl fmt::Debug for Tween {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tween")
            .field("start_time", &self.start_time)
            .field("delay", &self.delay)
            .field("duration", &self.duration)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("easing", &self.easing.name())
            .field("on_update", &self.on_update.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// Builder for [`Tween`].
pub struct TweenBuilder {
    from: TweenValue,
    to: TweenValue,
    duration: f64,
    delay: f64,
    easing: Easing,
    on_update: Option<UpdateFn>,
    on_complete: Option<CompleteFn>,
}

impl TweenBuilder {
    pub fn new(from: impl Into<TweenValue>, to: impl Into<TweenValue>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            duration: DEFAULT_DURATION_MS,
            delay: 0.0,
            easing: Easing::default(),
            on_update: None,
            on_complete: None,
        }
    }

    pub fn duration(mut self, ms: f64) -> Self {
        self.duration = ms;
        self
    }

    pub fn delay(mut self, ms: f64) -> Self {
        self.delay = ms;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Called every frame the tween runs with `(value, raw_progress)`.
    pub fn on_update(mut self, f: impl FnMut(&TweenValue, f32) + Send + 'static) -> Self {
        self.on_update = Some(Box::new(f));
        self
    }

    /// Called once, after the frame in which progress reached 1.
    pub fn on_complete(mut self, f: impl FnOnce() + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    /// Validate and stamp the tween with its start time.
    pub fn build(self, now: f64) -> Result<Tween, TweenError> {
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(TweenError::InvalidDuration(self.duration));
        }
        if !(self.delay.is_finite() && self.delay >= 0.0) {
            return Err(TweenError::InvalidDelay(self.delay));
        }
        TweenValue::check_compatible(&self.from, &self.to)?;
        Ok(Tween {
            start_time: now,
            delay: self.delay,
            duration: self.duration,
            from: self.from,
            to: self.to,
            easing: self.easing,
            on_update: self.on_update,
            on_complete: self.on_complete,
        })
    }
}
