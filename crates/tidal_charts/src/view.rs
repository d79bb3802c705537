use serde::{Deserialize, Serialize};
use tidal_paint::{Point, Rect};

use crate::sample::{Sample, Timed};

/// Padding applied to a zero-span range.
pub const DEFAULT_RANGE_PAD: f64 = 5.0;
/// Visible time span in milliseconds.
pub const DEFAULT_WINDOW_MS: f64 = 60_000.0;
/// Fraction of the window that lies left of the latest sample.
pub const DEFAULT_ANCHOR: f64 = 0.75;
/// How many trailing samples to show when the window holds fewer than two.
pub const VISIBLE_FALLBACK: usize = 10;

/// How auto-fit treats the padded range.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum RangePolicy {
    /// Follow the data wherever it goes.
    #[default]
    Unbounded,
    /// Keep the range inside `[lo, hi]`.
    Clamped { lo: f64, hi: f64 },
}

impl RangePolicy {
    pub const PERCENT: RangePolicy = RangePolicy::Clamped { lo: 0.0, hi: 100.0 };
}

/// Vertical data domain (min..max).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// A range can be mapped only if it is finite and strictly increasing.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.max > self.min
    }

    /// Fit a padded range around `values`.
    ///
    /// The pad is a tenth of the data span, or `default_pad` when every value
    /// is equal. `None` for an empty input.
    pub fn auto_fit(
        values: impl IntoIterator<Item = f64>,
        policy: RangePolicy,
        default_pad: f64,
    ) -> Option<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values.into_iter().filter(|v| v.is_finite()) {
            min = min.min(v);
            max = max.max(v);
        }
        if min > max {
            return None;
        }
        let span = max - min;
        let pad = if span > 0.0 { span * 0.1 } else { default_pad };
        let mut range = Self::new(min - pad, max + pad);
        if let RangePolicy::Clamped { lo, hi } = policy {
            range.min = range.min.max(lo);
            range.max = range.max.min(hi);
        }
        Some(range)
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::new(0.0, 100.0)
    }
}

/// Horizontal (time) domain, in wall-clock milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TimeWindow {
    pub start: f64,
    pub end: f64,
}

impl TimeWindow {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Window of `duration` ms that places `latest` at `anchor` (0..1) across it.
    pub fn anchored(latest: f64, duration: f64, anchor: f64) -> Self {
        let anchor = anchor.clamp(0.0, 1.0);
        Self {
            start: latest - duration * anchor,
            end: latest + duration * (1.0 - anchor),
        }
    }

    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    pub fn is_valid(&self) -> bool {
        self.start.is_finite() && self.end.is_finite() && self.end > self.start
    }

    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time <= self.end
    }
}

/// Padding around the plot area (pixels).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 20.0,
            bottom: 60.0,
            left: 60.0,
        }
    }
}

/// Surface size plus padding; yields the plot rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotLayout {
    pub width: f32,
    pub height: f32,
    pub padding: Padding,
}

impl PlotLayout {
    pub fn new(width: f32, height: f32, padding: Padding) -> Self {
        Self {
            width,
            height,
            padding,
        }
    }

    pub fn plot_rect(&self) -> Rect {
        let p = &self.padding;
        let w = (self.width - p.left - p.right).max(0.0);
        let h = (self.height - p.top - p.bottom).max(0.0);
        Rect::new(p.left, p.top, w, h)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }
}

impl Default for PlotLayout {
    fn default() -> Self {
        Self::new(800.0, 400.0, Padding::default())
    }
}

/// Map a sample into the plot rectangle.
///
/// `None` when either domain is degenerate or the result is not finite;
/// callers skip such points rather than draw them.
pub fn to_pixel(
    sample: &Sample,
    plot: Rect,
    range: ValueRange,
    window: TimeWindow,
) -> Option<Point> {
    if !range.is_valid() || !window.is_valid() || !sample.is_finite() {
        return None;
    }
    let tx = (sample.time - window.start) / window.span();
    let ty = (sample.value - range.min) / range.span();
    // y increases downward in screen coords.
    let p = Point::new(
        plot.x + (tx * plot.width as f64) as f32,
        plot.y + plot.height - (ty * plot.height as f64) as f32,
    );
    p.is_finite().then_some(p)
}

/// Samples inside `window`, oldest first.
///
/// When fewer than two fall inside, the last `fallback` samples are used so
/// the line never collapses to a single point. Samples sharing a timestamp
/// keep their input order.
pub fn visible_samples<T: Timed + Copy>(
    samples: &[T],
    window: TimeWindow,
    fallback: usize,
) -> Vec<T> {
    let mut out: Vec<T> = samples
        .iter()
        .filter(|s| window.contains(s.time()))
        .copied()
        .collect();
    if out.len() < 2 {
        let skip = samples.len().saturating_sub(fallback);
        out = samples[skip..].to_vec();
    }
    out.sort_by(|a, b| a.time().total_cmp(&b.time()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn auto_fit_pads_by_a_tenth() {
        let r = ValueRange::auto_fit([10.0, 20.0, 30.0], RangePolicy::Unbounded, 5.0).unwrap();
        assert!(close(r.min, 8.0));
        assert!(close(r.max, 32.0));
    }

    #[test]
    fn auto_fit_uses_default_pad_for_flat_data() {
        let r = ValueRange::auto_fit([42.0, 42.0], RangePolicy::Unbounded, 5.0).unwrap();
        assert_eq!(r, ValueRange::new(37.0, 47.0));
    }

    #[test]
    fn clamped_policy_limits_both_ends() {
        let r = ValueRange::auto_fit([2.0, 98.0], RangePolicy::PERCENT, 5.0).unwrap();
        assert_eq!(r, ValueRange::new(0.0, 100.0));
        let r = ValueRange::auto_fit([2.0, 98.0], RangePolicy::Unbounded, 5.0).unwrap();
        assert!(r.min < 0.0 && r.max > 100.0);
    }

    #[test]
    fn clamped_policy_can_collapse_out_of_band_data() {
        let r = ValueRange::auto_fit([150.0], RangePolicy::PERCENT, 5.0).unwrap();
        assert!(!r.is_valid());
    }

    #[test]
    fn auto_fit_of_nothing_is_none() {
        assert!(ValueRange::auto_fit([], RangePolicy::Unbounded, 5.0).is_none());
        assert!(ValueRange::auto_fit([f64::NAN], RangePolicy::Unbounded, 5.0).is_none());
    }

    #[test]
    fn anchored_window_places_latest() {
        let w = TimeWindow::anchored(10_000.0, 4_000.0, 0.75);
        assert_eq!(w, TimeWindow::new(7_000.0, 11_000.0));
        let w = TimeWindow::anchored(10_000.0, 4_000.0, 1.0);
        assert_eq!(w, TimeWindow::new(6_000.0, 10_000.0));
    }

    #[test]
    fn range_extremes_hit_plot_edges() {
        let plot = Rect::new(60.0, 20.0, 720.0, 320.0);
        let range = ValueRange::new(8.0, 32.0);
        let window = TimeWindow::new(0.0, 1_000.0);
        let low = to_pixel(&Sample::new(500.0, 8.0), plot, range, window).unwrap();
        let high = to_pixel(&Sample::new(500.0, 32.0), plot, range, window).unwrap();
        assert_eq!(low.y, plot.y + plot.height);
        assert_eq!(high.y, plot.y);
        assert_eq!(low.x, 60.0 + 360.0);
    }

    #[test]
    fn degenerate_domains_are_skipped() {
        let plot = Rect::new(0.0, 0.0, 100.0, 100.0);
        let s = Sample::new(5.0, 5.0);
        let w = TimeWindow::new(0.0, 10.0);
        assert!(to_pixel(&s, plot, ValueRange::new(5.0, 5.0), w).is_none());
        let flat = TimeWindow::new(3.0, 3.0);
        assert!(to_pixel(&s, plot, ValueRange::new(0.0, 10.0), flat).is_none());
    }

    #[test]
    fn visible_falls_back_to_recent_samples() {
        let samples: Vec<Sample> = (0..20)
            .map(|i| Sample::new(i as f64 * 1_000.0, 0.0))
            .collect();
        let w = TimeWindow::new(18_500.0, 30_000.0);
        let vis = visible_samples(&samples, w, VISIBLE_FALLBACK);
        assert_eq!(vis.len(), 10);
        assert_eq!(vis[0].time, 10_000.0);
        assert_eq!(vis[9].time, 19_000.0);
    }

    #[test]
    fn visible_filters_and_sorts() {
        let samples = vec![
            Sample::new(3_000.0, 1.0),
            Sample::new(1_000.0, 1.0),
            Sample::new(2_000.0, 1.0),
            Sample::new(9_000.0, 1.0),
        ];
        let vis = visible_samples(&samples, TimeWindow::new(0.0, 5_000.0), VISIBLE_FALLBACK);
        let times: Vec<f64> = vis.iter().map(|s| s.time).collect();
        assert_eq!(times, vec![1_000.0, 2_000.0, 3_000.0]);
    }

    #[test]
    fn equal_timestamps_keep_push_order() {
        let samples = vec![
            Sample::new(1_000.0, 1.0),
            Sample::new(2_000.0, 2.0),
            Sample::new(2_000.0, 3.0),
        ];
        let vis = visible_samples(&samples, TimeWindow::new(0.0, 5_000.0), VISIBLE_FALLBACK);
        let values: Vec<f64> = vis.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn plot_rect_never_goes_negative() {
        let layout = PlotLayout::new(50.0, 50.0, Padding::default());
        let r = layout.plot_rect();
        assert_eq!((r.width, r.height), (0.0, 0.0));
    }
}
