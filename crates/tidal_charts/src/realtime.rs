//! Realtime line chart model
//!
//! Holds the bounded sample history and everything derived from it: the
//! auto-fitted value range, the scrolling time window, per-sample entry
//! animations and the endpoint pulse. The host pushes samples as they arrive
//! and asks for a [`ChartFrame`] once per display frame.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rustc_hash::FxHashMap;
use tidal_animation::{
    Easing, FrameStats, PulseConfig, PulseOscillator, PulseState, TweenBuilder, TweenEngine,
    TweenValue,
};
use tidal_paint::{Point, Rect, Size};

use crate::error::ChartError;
use crate::sample::{BufferedSample, Sample, SampleBuffer, DEFAULT_MAX_DATA_POINTS};
use crate::style::RealtimeChartStyle;
use crate::view::{
    to_pixel, visible_samples, PlotLayout, RangePolicy, TimeWindow, ValueRange, DEFAULT_ANCHOR,
    DEFAULT_RANGE_PAD, DEFAULT_WINDOW_MS, VISIBLE_FALLBACK,
};

/// How a freshly pushed sample rises into place.
#[derive(Clone, Copy, Debug)]
pub struct EntryAnimation {
    pub duration: f64,
    pub delay: f64,
    pub easing: Easing,
}

impl Default for EntryAnimation {
    fn default() -> Self {
        Self {
            duration: 500.0,
            delay: 0.0,
            easing: Easing::EaseOutCubic,
        }
    }
}

/// Behavioural knobs of a [`RealtimeChartModel`].
#[derive(Clone, Copy, Debug)]
pub struct RealtimeChartOptions {
    pub max_data_points: usize,
    /// Visible time span in milliseconds.
    pub window_ms: f64,
    /// Where the latest sample sits across the window (1.0 = right edge).
    pub anchor: f64,
    pub range_policy: RangePolicy,
    /// Range padding used when every sample has the same value.
    pub default_pad: f64,
    pub entry: EntryAnimation,
    pub pulse: PulseConfig,
}

impl Default for RealtimeChartOptions {
    fn default() -> Self {
        Self {
            max_data_points: DEFAULT_MAX_DATA_POINTS,
            window_ms: DEFAULT_WINDOW_MS,
            anchor: DEFAULT_ANCHOR,
            range_policy: RangePolicy::default(),
            default_pad: DEFAULT_RANGE_PAD,
            entry: EntryAnimation::default(),
            pulse: PulseConfig::endpoint(),
        }
    }
}

/// Entry animation progress of one sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntryState {
    /// 0 = resting on the plot bottom, 1 = at its mapped height.
    pub rise: f32,
    pub opacity: f32,
}

impl EntryState {
    pub const HIDDEN: EntryState = EntryState {
        rise: 0.0,
        opacity: 0.0,
    };
    pub const SHOWN: EntryState = EntryState {
        rise: 1.0,
        opacity: 1.0,
    };
}

type EntryMap = Arc<Mutex<FxHashMap<String, EntryState>>>;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Tween id of the entry animation for the sample pushed as number `seq`.
pub fn entry_id(seq: u64) -> String {
    format!("point_{seq}")
}

/// A visible sample, mapped and animated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FramePoint {
    pub position: Point,
    pub opacity: f32,
    pub sample: Sample,
    /// Push order of the sample, see [`BufferedSample`].
    pub seq: u64,
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartFrame {
    pub size: Size,
    pub plot_rect: Rect,
    pub value_range: ValueRange,
    pub time_window: TimeWindow,
    /// Oldest first.
    pub points: Vec<FramePoint>,
    /// Endpoint pulse, present whenever there is a last point.
    pub pulse: Option<PulseState>,
    pub tweens: FrameStats,
}

impl ChartFrame {
    pub fn last_point(&self) -> Option<&FramePoint> {
        self.points.last()
    }
}

/// Mutable model for a realtime line chart.
///
/// Store this behind an `Arc<Mutex<_>>` (see [`RealtimeChartHandle`]) when
/// samples arrive from somewhere other than the frame loop.
pub struct RealtimeChartModel {
    pub style: RealtimeChartStyle,
    layout: PlotLayout,
    options: RealtimeChartOptions,
    samples: SampleBuffer,
    value_range: ValueRange,
    time_window: TimeWindow,
    engine: TweenEngine,
    entries: EntryMap,
    pulse: PulseOscillator,
}

impl RealtimeChartModel {
    pub fn new(layout: PlotLayout, options: RealtimeChartOptions, now: f64) -> Self {
        Self {
            style: RealtimeChartStyle::default(),
            layout,
            samples: SampleBuffer::new(options.max_data_points),
            value_range: ValueRange::default(),
            time_window: TimeWindow::anchored(now, options.window_ms, options.anchor),
            engine: TweenEngine::new(),
            entries: Arc::default(),
            pulse: PulseOscillator::new(options.pulse, now),
            options,
        }
    }

    pub fn with_style(mut self, style: RealtimeChartStyle) -> Self {
        self.style = style;
        self
    }

    /// Append a sample and start its entry animation.
    ///
    /// Non-finite samples are rejected and leave the chart untouched. When the
    /// history is full the oldest sample is evicted and its animation dropped.
    pub fn push_sample(&mut self, sample: Sample, now: f64) -> Result<(), ChartError> {
        if !sample.is_finite() {
            tracing::warn!(time = sample.time, value = sample.value, "rejected sample");
            return Err(ChartError::NonFiniteSample {
                time: sample.time,
                value: sample.value,
            });
        }

        let id = entry_id(self.samples.next_seq());
        let tween = self.entry_tween(&id, now)?;

        if let Some(evicted) = self.samples.push(sample) {
            self.forget(&evicted);
        }
        lock(&self.entries).insert(id.clone(), EntryState::HIDDEN);
        self.engine.add(id, tween);

        self.refit();
        Ok(())
    }

    fn entry_tween(&self, id: &str, now: f64) -> Result<tidal_animation::Tween, ChartError> {
        let entry = self.options.entry;
        let updates = self.entries.clone();
        let update_key = id.to_string();
        let completions = self.entries.clone();
        let complete_key = id.to_string();

        let tween = TweenBuilder::new(
            TweenValue::record([("rise", 0.0), ("opacity", 0.0)]),
            TweenValue::record([("rise", 1.0), ("opacity", 1.0)]),
        )
        .duration(entry.duration)
        .delay(entry.delay)
        .easing(entry.easing)
        .on_update(move |value, _| {
            if let Some(state) = lock(&updates).get_mut(&update_key) {
                state.rise = value.field("rise").unwrap_or(1.0);
                state.opacity = value.field("opacity").unwrap_or(1.0);
            }
        })
        .on_complete(move || {
            // A finished sample is simply drawn in place.
            lock(&completions).remove(&complete_key);
        })
        .build(now)?;
        Ok(tween)
    }

    /// Drop all animation state tied to a sample that left the history.
    fn forget(&mut self, evicted: &BufferedSample) {
        let id = entry_id(evicted.seq);
        self.engine.remove(&id);
        lock(&self.entries).remove(&id);
        tracing::debug!(
            seq = evicted.seq,
            time = evicted.sample.time,
            "evicted sample"
        );
    }

    fn refit(&mut self) {
        if let Some(range) = ValueRange::auto_fit(
            self.samples.values(),
            self.options.range_policy,
            self.options.default_pad,
        ) {
            self.value_range = range;
        }
        if let Some(latest) = self.samples.latest() {
            self.time_window =
                TimeWindow::anchored(latest.time, self.options.window_ms, self.options.anchor);
        }
    }

    /// Advance animations to `now` and map the visible samples.
    pub fn frame(&mut self, now: f64) -> ChartFrame {
        let tweens = self.engine.advance(now);
        let plot = self.layout.plot_rect();
        let range = self.value_range;
        let window = self.time_window;

        let mut points = Vec::new();
        if !plot.is_empty() {
            let history = self.samples.entries();
            let entries = lock(&self.entries);
            let bottom = plot.bottom();
            let visible = visible_samples(&history, window, VISIBLE_FALLBACK);
            for BufferedSample { seq, sample } in visible {
                let Some(p) = to_pixel(&sample, plot, range, window) else {
                    continue;
                };
                let entry = entries
                    .get(&entry_id(seq))
                    .copied()
                    .unwrap_or(EntryState::SHOWN);
                points.push(FramePoint {
                    position: Point::new(p.x, bottom + (p.y - bottom) * entry.rise),
                    opacity: entry.opacity,
                    sample,
                    seq,
                });
            }
        }

        let pulse = (!points.is_empty()).then(|| self.pulse.state(now));
        tracing::trace!(points = points.len(), "chart frame");
        ChartFrame {
            size: Size::new(self.layout.width, self.layout.height),
            plot_rect: plot,
            value_range: range,
            time_window: window,
            points,
            pulse,
            tweens,
        }
    }

    /// Change the surface size. Samples and running animations are kept.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.layout.resize(width, height);
        tracing::debug!(width, height, "chart resized");
    }

    /// Whether the host should keep delivering frames.
    pub fn needs_frame(&self) -> bool {
        self.engine.is_running() || !self.samples.is_empty()
    }

    pub fn is_animating(&self) -> bool {
        self.engine.is_running()
    }

    pub fn active_tweens(&self) -> usize {
        self.engine.len()
    }

    pub fn reset_pulse(&mut self, now: f64) {
        self.pulse.reset(now);
    }

    pub fn pulse_state(&self, now: f64) -> PulseState {
        self.pulse.state(now)
    }

    /// Drop every sample and cancel every animation.
    pub fn clear(&mut self) {
        self.samples.clear();
        self.engine.clear();
        lock(&self.entries).clear();
        self.value_range = ValueRange::default();
    }

    /// Change the history capacity, evicting the oldest samples that no longer fit.
    pub fn set_max_data_points(&mut self, max: usize) {
        for evicted in self.samples.set_capacity(max) {
            self.forget(&evicted);
        }
        self.options.max_data_points = self.samples.capacity();
        self.refit();
    }

    pub fn set_range_policy(&mut self, policy: RangePolicy) {
        self.options.range_policy = policy;
        self.refit();
    }

    pub fn samples(&self) -> &SampleBuffer {
        &self.samples
    }

    pub fn value_range(&self) -> ValueRange {
        self.value_range
    }

    pub fn time_window(&self) -> TimeWindow {
        self.time_window
    }

    pub fn layout(&self) -> &PlotLayout {
        &self.layout
    }

    pub fn options(&self) -> &RealtimeChartOptions {
        &self.options
    }

    /// Entry animation progress of the sample pushed as number `seq`.
    ///
    /// `None` once the animation has finished or the sample was evicted.
    pub fn entry_state(&self, seq: u64) -> Option<EntryState> {
        lock(&self.entries).get(&entry_id(seq)).copied()
    }
}

/// Shared handle for a realtime chart model.
#[derive(Clone)]
pub struct RealtimeChartHandle(pub Arc<Mutex<RealtimeChartModel>>);

impl RealtimeChartHandle {
    pub fn new(model: RealtimeChartModel) -> Self {
        Self(Arc::new(Mutex::new(model)))
    }

    pub fn push_sample(&self, sample: Sample, now: f64) -> Result<(), ChartError> {
        lock(&self.0).push_sample(sample, now)
    }

    pub fn frame(&self, now: f64) -> ChartFrame {
        lock(&self.0).frame(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(max: usize) -> RealtimeChartModel {
        let options = RealtimeChartOptions {
            max_data_points: max,
            ..Default::default()
        };
        RealtimeChartModel::new(PlotLayout::default(), options, 0.0)
    }

    #[test]
    fn history_keeps_the_latest_samples() {
        let mut chart = model(2);
        chart.push_sample(Sample::new(0.0, 50.0), 0.0).unwrap();
        chart
            .push_sample(Sample::new(1_000.0, 80.0), 1_000.0)
            .unwrap();
        chart
            .push_sample(Sample::new(2_000.0, 20.0), 2_000.0)
            .unwrap();
        assert_eq!(
            chart.samples().to_vec(),
            vec![Sample::new(1_000.0, 80.0), Sample::new(2_000.0, 20.0)]
        );
        // The evicted sample's animation went with it.
        assert!(chart.entry_state(0).is_none());
        assert_eq!(chart.active_tweens(), 2);
    }

    #[test]
    fn non_finite_samples_are_rejected() {
        let mut chart = model(5);
        let err = chart
            .push_sample(Sample::new(0.0, f64::NAN), 0.0)
            .unwrap_err();
        assert!(matches!(err, ChartError::NonFiniteSample { .. }));
        assert!(chart.samples().is_empty());
        assert!(!chart.is_animating());
    }

    #[test]
    fn range_and_window_follow_pushes() {
        let mut chart = model(10);
        for (i, v) in [10.0, 20.0, 30.0].into_iter().enumerate() {
            let t = i as f64 * 1_000.0;
            chart.push_sample(Sample::new(t, v), t).unwrap();
        }
        let r = chart.value_range();
        assert!((r.min - 8.0).abs() < 1e-9 && (r.max - 32.0).abs() < 1e-9);
        assert_eq!(
            chart.time_window(),
            TimeWindow::anchored(2_000.0, DEFAULT_WINDOW_MS, DEFAULT_ANCHOR)
        );
    }

    #[test]
    fn new_points_rise_from_the_bottom() {
        let mut chart = model(10);
        chart.push_sample(Sample::new(0.0, 10.0), 0.0).unwrap();
        chart.push_sample(Sample::new(1_000.0, 30.0), 0.0).unwrap();
        let bottom = chart.layout().plot_rect().bottom();

        let frame = chart.frame(0.0);
        assert_eq!(frame.points.len(), 2);
        assert!(frame.points.iter().all(|p| p.position.y == bottom));
        assert!(frame.points.iter().all(|p| p.opacity == 0.0));

        let frame = chart.frame(500.0);
        assert!(frame.points[1].position.y < bottom);
        assert_eq!(frame.points[1].opacity, 1.0);
        assert!(chart.entry_state(1).is_none());
        assert!(!chart.is_animating());
    }

    #[test]
    fn pulse_follows_the_last_point() {
        let mut chart = model(10);
        assert!(chart.frame(0.0).pulse.is_none());
        chart.push_sample(Sample::new(0.0, 1.0), 0.0).unwrap();
        chart.push_sample(Sample::new(1.0, 2.0), 0.0).unwrap();
        let pulse = chart.frame(0.0).pulse.unwrap();
        assert_eq!(pulse.progress, 0.0);
        assert_eq!(pulse.opacity, 0.4);
    }

    #[test]
    fn resize_keeps_samples_and_tweens() {
        let mut chart = model(10);
        chart.push_sample(Sample::new(0.0, 1.0), 0.0).unwrap();
        chart.push_sample(Sample::new(1.0, 2.0), 0.0).unwrap();
        chart.resize(1_200.0, 600.0);
        assert_eq!(chart.samples().len(), 2);
        assert_eq!(chart.active_tweens(), 2);
        let frame = chart.frame(100.0);
        assert_eq!(frame.plot_rect, Rect::new(60.0, 20.0, 1_120.0, 520.0));
        assert_eq!(frame.size, Size::new(1_200.0, 600.0));
    }

    #[test]
    fn clear_drops_everything() {
        let mut chart = model(10);
        chart.push_sample(Sample::new(0.0, 1.0), 0.0).unwrap();
        assert!(chart.needs_frame());
        chart.clear();
        assert!(!chart.needs_frame());
        assert!(chart.frame(10.0).points.is_empty());
    }

    #[test]
    fn shrinking_history_cancels_evicted_animations() {
        let mut chart = model(10);
        for i in 0..4 {
            let sample = Sample::new(i as f64, i as f64);
            chart.push_sample(sample, 0.0).unwrap();
        }
        chart.set_max_data_points(1);
        assert_eq!(chart.samples().len(), 1);
        assert_eq!(chart.active_tweens(), 1);
        assert!(chart.entry_state(3).is_some());
    }

    #[test]
    fn equal_timestamps_animate_independently() {
        let mut chart = model(2);
        chart.push_sample(Sample::new(0.0, 10.0), 0.0).unwrap();
        chart.push_sample(Sample::new(0.0, 20.0), 0.0).unwrap();
        chart.push_sample(Sample::new(1_000.0, 30.0), 0.0).unwrap();

        // Evicting the first sample leaves its twin mid-animation.
        assert!(chart.entry_state(0).is_none());
        assert_eq!(chart.entry_state(1), Some(EntryState::HIDDEN));
        assert_eq!(chart.active_tweens(), 2);

        let frame = chart.frame(50.0);
        let twin = frame.points.iter().find(|p| p.seq == 1).unwrap();
        assert_eq!(twin.sample, Sample::new(0.0, 20.0));
        assert!(twin.opacity > 0.0 && twin.opacity < 1.0);
        assert_eq!(chart.active_tweens(), 2);
    }

    #[test]
    fn invalid_entry_duration_is_a_tween_error() {
        let options = RealtimeChartOptions {
            entry: EntryAnimation {
                duration: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut chart = RealtimeChartModel::new(PlotLayout::default(), options, 0.0);
        let err = chart.push_sample(Sample::new(0.0, 1.0), 0.0).unwrap_err();
        assert!(matches!(err, ChartError::Tween(_)));
        assert!(chart.samples().is_empty());
    }
}
