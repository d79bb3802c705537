//! Paint context - the main drawing API

use crate::color::Color;
use crate::path::{Path, Point};
use crate::primitives::*;

/// Stroke style
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f32,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
}

impl StrokeStyle {
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            ..Default::default()
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Horizontal/vertical anchor of a text run relative to its position,
/// expressed as fractions of the measured text box (0.0 = left/top).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextAnchor {
    pub x: f32,
    pub y: f32,
}

impl TextAnchor {
    pub const TOP_LEFT: TextAnchor = TextAnchor { x: 0.0, y: 0.0 };
    pub const TOP_CENTER: TextAnchor = TextAnchor { x: 0.5, y: 0.0 };
    pub const CENTER_RIGHT: TextAnchor = TextAnchor { x: 1.0, y: 0.5 };
}

impl Default for TextAnchor {
    fn default() -> Self {
        Self::TOP_LEFT
    }
}

/// A paint command for the renderer
#[derive(Clone, Debug, PartialEq)]
pub enum PaintCommand {
    FillRect {
        rect: Rect,
        color: Color,
    },
    FillRoundedRect {
        rect: RoundedRect,
        color: Color,
    },
    FillCircle {
        circle: Circle,
        color: Color,
    },
    FillPath {
        path: Path,
        color: Color,
    },
    StrokePath {
        path: Path,
        style: StrokeStyle,
    },
    DrawText {
        text: String,
        position: Point,
        size: f32,
        color: Color,
        anchor: TextAnchor,
    },
    PushClip {
        rect: Rect,
    },
    PopClip,
}

/// Per-kind tally of recorded commands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CommandCounts {
    pub rects: usize,
    pub rounded_rects: usize,
    pub circles: usize,
    pub fills: usize,
    pub strokes: usize,
    pub texts: usize,
    pub clips: usize,
}

impl CommandCounts {
    pub fn total(&self) -> usize {
        self.rects
            + self.rounded_rects
            + self.circles
            + self.fills
            + self.strokes
            + self.texts
            + self.clips
    }
}

/// The paint context used for custom drawing.
///
/// Commands are recorded in call order; nothing is rasterized here.
pub struct PaintContext {
    commands: Vec<PaintCommand>,
    clip_stack: Vec<Rect>,
}

impl PaintContext {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            clip_stack: Vec::new(),
        }
    }

    /// Get all recorded commands
    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }

    /// Drop recorded commands and any open clips (start of a new frame).
    pub fn clear(&mut self) {
        self.commands.clear();
        self.clip_stack.clear();
    }

    pub fn counts(&self) -> CommandCounts {
        let mut counts = CommandCounts::default();
        for cmd in &self.commands {
            match cmd {
                PaintCommand::FillRect { .. } => counts.rects += 1,
                PaintCommand::FillRoundedRect { .. } => counts.rounded_rects += 1,
                PaintCommand::FillCircle { .. } => counts.circles += 1,
                PaintCommand::FillPath { .. } => counts.fills += 1,
                PaintCommand::StrokePath { .. } => counts.strokes += 1,
                PaintCommand::DrawText { .. } => counts.texts += 1,
                PaintCommand::PushClip { .. } | PaintCommand::PopClip => counts.clips += 1,
            }
        }
        counts
    }

    // === Shape drawing ===

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(PaintCommand::FillRect { rect, color });
    }

    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: impl Into<CornerRadius>, color: Color) {
        self.commands.push(PaintCommand::FillRoundedRect {
            rect: RoundedRect {
                rect,
                corner_radius: radius.into(),
            },
            color,
        });
    }

    pub fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        if radius <= 0.0 || !radius.is_finite() {
            return;
        }
        self.commands.push(PaintCommand::FillCircle {
            circle: Circle::new(center, radius),
            color,
        });
    }

    // === Path drawing ===

    pub fn fill_path(&mut self, path: Path, color: Color) {
        if path.is_empty() {
            return;
        }
        self.commands.push(PaintCommand::FillPath { path, color });
    }

    pub fn stroke_path(&mut self, path: Path, style: StrokeStyle) {
        if path.is_empty() {
            return;
        }
        self.commands.push(PaintCommand::StrokePath { path, style });
    }

    /// Stroke an open polyline. Fewer than two points draws nothing.
    pub fn stroke_polyline(&mut self, points: &[Point], style: StrokeStyle) {
        if points.len() < 2 {
            return;
        }
        self.stroke_path(Path::polyline(points), style);
    }

    /// Straight line segment from `a` to `b`.
    pub fn line(&mut self, a: Point, b: Point, style: StrokeStyle) {
        self.stroke_polyline(&[a, b], style);
    }

    // === Text ===

    pub fn draw_text(
        &mut self,
        text: impl Into<String>,
        position: Point,
        size: f32,
        color: Color,
        anchor: TextAnchor,
    ) {
        self.commands.push(PaintCommand::DrawText {
            text: text.into(),
            position,
            size,
            color,
            anchor,
        });
    }

    // === Clipping ===

    pub fn push_clip(&mut self, rect: Rect) {
        self.clip_stack.push(rect);
        self.commands.push(PaintCommand::PushClip { rect });
    }

    pub fn pop_clip(&mut self) {
        if self.clip_stack.pop().is_none() {
            tracing::warn!("pop_clip without a matching push_clip");
            return;
        }
        self.commands.push(PaintCommand::PopClip);
    }

    pub fn clip_depth(&self) -> usize {
        self.clip_stack.len()
    }
}

impl Default for PaintContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polyline_needs_two_points() {
        let mut ctx = PaintContext::new();
        ctx.stroke_polyline(&[Point::new(0.0, 0.0)], StrokeStyle::default());
        assert!(ctx.commands().is_empty());
        ctx.stroke_polyline(
            &[Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
            StrokeStyle::default(),
        );
        assert_eq!(ctx.counts().strokes, 1);
    }

    #[test]
    fn unbalanced_pop_clip_is_ignored() {
        let mut ctx = PaintContext::new();
        ctx.pop_clip();
        assert!(ctx.commands().is_empty());
        ctx.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(ctx.clip_depth(), 1);
        ctx.pop_clip();
        assert_eq!(ctx.clip_depth(), 0);
        assert_eq!(ctx.counts().clips, 2);
    }

    #[test]
    fn degenerate_circles_are_skipped() {
        let mut ctx = PaintContext::new();
        ctx.fill_circle(Point::default(), 0.0, Color::WHITE);
        ctx.fill_circle(Point::default(), f32::NAN, Color::WHITE);
        assert_eq!(ctx.counts().total(), 0);
    }

    #[test]
    fn clear_resets_frame() {
        let mut ctx = PaintContext::new();
        ctx.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE);
        ctx.push_clip(Rect::new(0.0, 0.0, 1.0, 1.0));
        ctx.clear();
        assert!(ctx.commands().is_empty());
        assert_eq!(ctx.clip_depth(), 0);
    }
}
