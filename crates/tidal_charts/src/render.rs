//! Chart painting
//!
//! Turns a [`ChartFrame`] into paint commands, back to front: background,
//! plot backdrop, grid, axis labels, the shaded area under the line, the line
//! itself and finally the pulsing endpoint.

use tidal_paint::{LineCap, LineJoin, PaintContext, Path, Point, Rect, StrokeStyle};

use crate::axis::{build_bottom_ticks, build_left_ticks, draw_bottom_axis, draw_left_axis};
use crate::format::format_fixed;
use crate::realtime::ChartFrame;
use crate::smooth::smooth_points;
use crate::style::RealtimeChartStyle;
use crate::time_format::format_clock_ms;

pub fn render_frame(ctx: &mut PaintContext, frame: &ChartFrame, style: &RealtimeChartStyle) {
    ctx.fill_rect(
        Rect::new(0.0, 0.0, frame.size.width, frame.size.height),
        style.bg,
    );

    let plot = frame.plot_rect;
    if plot.is_empty() {
        return;
    }

    ctx.fill_rounded_rect(
        plot.outset(style.backdrop_outset),
        style.backdrop_radius,
        style.backdrop,
    );
    draw_grid(ctx, plot, style);

    let y_ticks = build_left_ticks(frame.value_range, plot, style.y_ticks, |v| {
        format_fixed(v, style.y_decimals)
    });
    draw_left_axis(ctx, &y_ticks, plot, style.text, style.font_size);
    let x_ticks = build_bottom_ticks(frame.time_window, plot, style.x_ticks, format_clock_ms);
    draw_bottom_axis(ctx, &x_ticks, plot, style.text, style.font_size);

    if frame.points.len() < 2 {
        return;
    }

    let vertices: Vec<Point> = frame.points.iter().map(|p| p.position).collect();
    let line = if style.smooth {
        smooth_points(&vertices, style.smooth_segments)
    } else {
        vertices
    };

    ctx.push_clip(plot);
    draw_shadow(ctx, &line, plot, style);
    ctx.stroke_polyline(
        &line,
        StrokeStyle {
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..StrokeStyle::new(style.line, style.line_width)
        },
    );
    draw_endpoint(ctx, frame, style);
    ctx.pop_clip();
}

fn draw_grid(ctx: &mut PaintContext, plot: Rect, style: &RealtimeChartStyle) {
    let n = style.grid_lines.max(1);
    let stroke = StrokeStyle::new(style.grid, 1.0);
    for i in 0..=n {
        let t = i as f32 / n as f32;
        let x = plot.x + t * plot.width;
        let y = plot.y + t * plot.height;
        ctx.line(Point::new(x, plot.y), Point::new(x, plot.bottom()), stroke);
        ctx.line(Point::new(plot.x, y), Point::new(plot.right(), y), stroke);
    }
}

fn draw_shadow(ctx: &mut PaintContext, line: &[Point], plot: Rect, style: &RealtimeChartStyle) {
    let (Some(first), Some(last)) = (line.first(), line.last()) else {
        return;
    };
    let mut outline = Vec::with_capacity(line.len() + 2);
    outline.extend_from_slice(line);
    outline.push(Point::new(last.x, plot.bottom()));
    outline.push(Point::new(first.x, plot.bottom()));
    ctx.fill_path(
        Path::polygon(&outline),
        style.line.with_alpha(style.shadow_alpha),
    );
}

fn draw_endpoint(ctx: &mut PaintContext, frame: &ChartFrame, style: &RealtimeChartStyle) {
    let (Some(pulse), Some(last)) = (frame.pulse, frame.last_point()) else {
        return;
    };
    // The marker fades in with its point.
    ctx.fill_circle(
        last.position,
        style.pulse_radius * pulse.scale,
        style
            .pulse
            .fade(pulse.opacity * style.pulse_halo_alpha * last.opacity),
    );
    ctx.fill_circle(
        last.position,
        style.core_radius,
        style.pulse.fade(style.core_alpha * last.opacity),
    );
}
