use tidal_paint::{Color, PaintContext, Point, Rect, TextAnchor};

use crate::scale::LinearScale;
use crate::view::{TimeWindow, ValueRange};

#[derive(Clone, Debug, PartialEq)]
pub struct AxisTick {
    pub value: f64,
    pub px: f32,
    pub label: String,
}

/// Time ticks along the bottom edge of `plot`, oldest on the left.
pub fn build_bottom_ticks<F>(
    window: TimeWindow,
    plot: Rect,
    tick_count: usize,
    formatter: F,
) -> Vec<AxisTick>
where
    F: Fn(f64) -> String,
{
    if tick_count == 0 || !window.is_valid() || plot.width <= 0.0 {
        return Vec::new();
    }
    let s = LinearScale::new(window.start, window.end, plot.x, plot.right());
    s.ticks(tick_count)
        .into_iter()
        .map(|v| AxisTick {
            value: v,
            px: s.map(v),
            label: formatter(v),
        })
        .collect()
}

/// Value ticks along the left edge of `plot`, largest at the top.
pub fn build_left_ticks<F>(
    range: ValueRange,
    plot: Rect,
    tick_count: usize,
    formatter: F,
) -> Vec<AxisTick>
where
    F: Fn(f64) -> String,
{
    if tick_count == 0 || !range.is_valid() || plot.height <= 0.0 {
        return Vec::new();
    }
    // Invert so larger values are visually higher.
    let s = LinearScale::new(range.min, range.max, plot.bottom(), plot.y);
    s.ticks(tick_count)
        .into_iter()
        .rev()
        .map(|v| AxisTick {
            value: v,
            px: s.map(v),
            label: formatter(v),
        })
        .collect()
}

pub fn draw_bottom_axis(
    ctx: &mut PaintContext,
    ticks: &[AxisTick],
    plot: Rect,
    text_color: Color,
    font_size: f32,
) {
    if plot.width <= 0.0 {
        return;
    }
    for t in ticks {
        ctx.draw_text(
            t.label.clone(),
            Point::new(t.px, plot.bottom() + 10.0),
            font_size,
            text_color,
            TextAnchor::TOP_CENTER,
        );
    }
}

pub fn draw_left_axis(
    ctx: &mut PaintContext,
    ticks: &[AxisTick],
    plot: Rect,
    text_color: Color,
    font_size: f32,
) {
    if plot.height <= 0.0 {
        return;
    }
    for t in ticks {
        ctx.draw_text(
            t.label.clone(),
            Point::new(plot.x - 10.0, t.px),
            font_size,
            text_color,
            TextAnchor::CENTER_RIGHT,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_ticks_run_top_to_bottom() {
        let plot = Rect::new(60.0, 20.0, 720.0, 320.0);
        let ticks = build_left_ticks(ValueRange::new(0.0, 100.0), plot, 6, |v| format!("{v:.0}"));
        assert_eq!(ticks.len(), 6);
        assert_eq!(ticks[0].label, "100");
        assert_eq!(ticks[0].px, 20.0);
        assert_eq!(ticks[5].label, "0");
        assert_eq!(ticks[5].px, 340.0);
    }

    #[test]
    fn tick_builders_reject_degenerate_input() {
        let plot = Rect::new(0.0, 0.0, 100.0, 100.0);
        let flat = ValueRange::new(1.0, 1.0);
        assert!(build_left_ticks(flat, plot, 6, |v| v.to_string()).is_empty());
        let window = TimeWindow::new(0.0, 10.0);
        assert!(build_bottom_ticks(window, plot, 0, |v| v.to_string()).is_empty());
    }

    #[test]
    fn axes_emit_one_label_per_tick() {
        let plot = Rect::new(60.0, 20.0, 720.0, 320.0);
        let ticks = build_bottom_ticks(TimeWindow::new(0.0, 5_000.0), plot, 6, |v| {
            format!("{v:.0}")
        });
        let mut ctx = PaintContext::new();
        draw_bottom_axis(&mut ctx, &ticks, plot, Color::WHITE, 10.0);
        assert_eq!(ctx.counts().texts, 6);
    }
}
