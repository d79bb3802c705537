//! Tweenable values
//!
//! The value shape is picked once when a tween is created and validated
//! against the target shape there; per-frame interpolation never re-checks.

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::tween::TweenError;

/// A value a tween can interpolate.
#[derive(Clone, Debug, PartialEq)]
pub enum TweenValue {
    Scalar(f32),
    /// Fixed-length sequence, blended element-wise.
    Vector(SmallVec<[f32; 4]>),
    /// Flat field-name -> scalar record, blended per key.
    Record(IndexMap<String, f32>),
    /// Non-interpolable value, passed through unchanged.
    Constant(String),
}

impl TweenValue {
    pub fn vector(values: impl IntoIterator<Item = f32>) -> Self {
        TweenValue::Vector(values.into_iter().collect())
    }

    pub fn record<K: Into<String>>(fields: impl IntoIterator<Item = (K, f32)>) -> Self {
        TweenValue::Record(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn shape_name(&self) -> &'static str {
        match self {
            TweenValue::Scalar(_) => "scalar",
            TweenValue::Vector(_) => "vector",
            TweenValue::Record(_) => "record",
            TweenValue::Constant(_) => "constant",
        }
    }

    pub fn as_scalar(&self) -> Option<f32> {
        match self {
            TweenValue::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_slice(&self) -> Option<&[f32]> {
        match self {
            TweenValue::Vector(v) => Some(v),
            _ => None,
        }
    }

    /// Field of a record value.
    pub fn field(&self, key: &str) -> Option<f32> {
        match self {
            TweenValue::Record(fields) => fields.get(key).copied(),
            _ => None,
        }
    }

    /// Check that `from` and `to` can be blended into each other.
    pub fn check_compatible(from: &TweenValue, to: &TweenValue) -> Result<(), TweenError> {
        match (from, to) {
            (TweenValue::Scalar(_), TweenValue::Scalar(_)) => Ok(()),
            (TweenValue::Vector(a), TweenValue::Vector(b)) => {
                if a.len() == b.len() {
                    Ok(())
                } else {
                    Err(TweenError::LengthMismatch {
                        from: a.len(),
                        to: b.len(),
                    })
                }
            }
            (TweenValue::Record(a), TweenValue::Record(b)) => {
                if let Some(key) = a.keys().find(|k| !b.contains_key(*k)) {
                    return Err(TweenError::KeyMismatch { key: key.clone() });
                }
                if let Some(key) = b.keys().find(|k| !a.contains_key(*k)) {
                    return Err(TweenError::KeyMismatch { key: key.clone() });
                }
                Ok(())
            }
            (TweenValue::Constant(_), TweenValue::Constant(_)) => Ok(()),
            _ => Err(TweenError::ShapeMismatch {
                from: from.shape_name(),
                to: to.shape_name(),
            }),
        }
    }

    /// Blend `from` toward `to` by `t`.
    ///
    /// Shapes must already have passed [`TweenValue::check_compatible`];
    /// for incompatible pairs `from` is returned unchanged.
    pub fn lerp(from: &TweenValue, to: &TweenValue, t: f32) -> TweenValue {
        match (from, to) {
            (TweenValue::Scalar(a), TweenValue::Scalar(b)) => {
                TweenValue::Scalar(lerp_f32(*a, *b, t))
            }
            (TweenValue::Vector(a), TweenValue::Vector(b)) => TweenValue::Vector(
                a.iter()
                    .zip(b.iter())
                    .map(|(a, b)| lerp_f32(*a, *b, t))
                    .collect(),
            ),
            (TweenValue::Record(a), TweenValue::Record(b)) => TweenValue::Record(
                a.iter()
                    .map(|(k, va)| {
                        let vb = b.get(k).copied().unwrap_or(*va);
                        (k.clone(), lerp_f32(*va, vb, t))
                    })
                    .collect(),
            ),
            _ => from.clone(),
        }
    }
}

impl From<f32> for TweenValue {
    fn from(v: f32) -> Self {
        TweenValue::Scalar(v)
    }
}

impl From<&[f32]> for TweenValue {
    fn from(v: &[f32]) -> Self {
        TweenValue::Vector(SmallVec::from_slice(v))
    }
}

impl<const N: usize> From<[f32; N]> for TweenValue {
    fn from(v: [f32; N]) -> Self {
        TweenValue::Vector(v.iter().copied().collect())
    }
}

// Unclamped: overshooting easings are allowed to overshoot.
fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
