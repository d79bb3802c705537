//! Tidal Paint API
//!
//! A small 2D drawing API in the spirit of HTML Canvas. Drawing calls are
//! recorded as [`PaintCommand`]s which a backend (GPU or headless) replays.
//!
//! # Features
//!
//! - Geometry primitives (point, size, rect, circle, rounded rect)
//! - Polyline and closed polygon paths
//! - Fills and strokes with colors
//! - Text runs
//! - Clipping

pub mod color;
pub mod context;
pub mod path;
pub mod primitives;

pub use color::Color;
pub use context::{
    CommandCounts, LineCap, LineJoin, PaintCommand, PaintContext, StrokeStyle, TextAnchor,
};
pub use path::{Path, PathCommand, Point};
pub use primitives::*;
