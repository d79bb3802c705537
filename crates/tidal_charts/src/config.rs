//! Chart configuration
//!
//! Every field has a default, so an empty document is a valid configuration.

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use tidal_animation::{Easing, PulseConfig};

use crate::realtime::{EntryAnimation, RealtimeChartModel, RealtimeChartOptions};
use crate::sample::DEFAULT_MAX_DATA_POINTS;
use crate::source::{GenerationMode, WaveformGenerator, WaveformParams};
use crate::style::RealtimeChartStyle;
use crate::view::{
    Padding, PlotLayout, RangePolicy, DEFAULT_ANCHOR, DEFAULT_RANGE_PAD, DEFAULT_WINDOW_MS,
};

/// Shortest accepted gap between generated samples, in milliseconds.
pub const MIN_INTERVAL_MS: f64 = 1.0;

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub chart: ChartSection,
    #[serde(default)]
    pub animation: AnimationSection,
    #[serde(default)]
    pub pulse: PulseSection,
    #[serde(default)]
    pub source: SourceSection,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RangePolicyKind {
    #[default]
    Unbounded,
    Clamped,
}

/// Surface, history and axis behaviour
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ChartSection {
    #[serde(default = "default_max_data_points")]
    pub max_data_points: usize,
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
    #[serde(default)]
    pub padding: Padding,
    /// Position of the latest sample across the window (1.0 = right edge)
    #[serde(default = "default_anchor")]
    pub anchor: f64,
    #[serde(default)]
    pub range_policy: RangePolicyKind,
    #[serde(default)]
    pub clamp_min: f64,
    #[serde(default = "default_clamp_max")]
    pub clamp_max: f64,
    /// Range padding for flat data
    #[serde(default = "default_pad")]
    pub default_pad: f64,
    /// Draw the line as bezier curves
    #[serde(default)]
    pub smooth: bool,
    #[serde(default)]
    pub time_range: TimeRangeSection,
}

fn default_max_data_points() -> usize {
    DEFAULT_MAX_DATA_POINTS
}

fn default_width() -> f32 {
    800.0
}

fn default_height() -> f32 {
    400.0
}

fn default_anchor() -> f64 {
    DEFAULT_ANCHOR
}

fn default_clamp_max() -> f64 {
    100.0
}

fn default_pad() -> f64 {
    DEFAULT_RANGE_PAD
}

impl Default for ChartSection {
    fn default() -> Self {
        Self {
            max_data_points: default_max_data_points(),
            width: default_width(),
            height: default_height(),
            padding: Padding::default(),
            anchor: default_anchor(),
            range_policy: RangePolicyKind::default(),
            clamp_min: 0.0,
            clamp_max: default_clamp_max(),
            default_pad: default_pad(),
            smooth: false,
            time_range: TimeRangeSection::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TimeRangeSection {
    /// Visible span in milliseconds
    #[serde(default = "default_duration")]
    pub duration: f64,
}

fn default_duration() -> f64 {
    DEFAULT_WINDOW_MS
}

impl Default for TimeRangeSection {
    fn default() -> Self {
        Self {
            duration: default_duration(),
        }
    }
}

/// Entry animation of new points
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AnimationSection {
    #[serde(default = "default_entry_duration")]
    pub duration: f64,
    #[serde(default)]
    pub delay: f64,
    #[serde(default = "default_easing")]
    pub easing: String,
}

fn default_entry_duration() -> f64 {
    500.0
}

fn default_easing() -> String {
    "easeOutCubic".to_string()
}

impl Default for AnimationSection {
    fn default() -> Self {
        Self {
            duration: default_entry_duration(),
            delay: 0.0,
            easing: default_easing(),
        }
    }
}

/// Endpoint pulse
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PulseSection {
    pub period: f64,
    pub min_opacity: f32,
    pub max_opacity: f32,
    pub min_scale: f32,
    pub max_scale: f32,
}

impl Default for PulseSection {
    fn default() -> Self {
        let p = PulseConfig::endpoint();
        Self {
            period: p.period,
            min_opacity: p.min_opacity,
            max_opacity: p.max_opacity,
            min_scale: p.min_scale,
            max_scale: p.max_scale,
        }
    }
}

/// Synthetic data source
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SourceSection {
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(flatten)]
    pub params: WaveformParams,
    /// Milliseconds between generated samples
    #[serde(default = "default_interval")]
    pub interval_ms: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_mode() -> String {
    "sine".to_string()
}

fn default_interval() -> f64 {
    1000.0
}

impl Default for SourceSection {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            params: WaveformParams::default(),
            interval_ms: default_interval(),
            seed: None,
        }
    }
}

impl ChartConfig {
    /// Parse a TOML document. Missing sections and fields take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ChartConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Reject values no chart can work with.
    pub fn validate(&self) -> Result<()> {
        let c = &self.chart;
        ensure!(
            c.max_data_points > 0,
            "chart.max_data_points must be at least 1"
        );
        ensure!(
            c.width.is_finite() && c.height.is_finite() && c.width >= 0.0 && c.height >= 0.0,
            "chart size must be finite and non-negative, got {}x{}",
            c.width,
            c.height
        );
        ensure!(
            c.time_range.duration.is_finite() && c.time_range.duration > 0.0,
            "chart.time_range.duration must be positive, got {}",
            c.time_range.duration
        );
        ensure!(
            (0.0..=1.0).contains(&c.anchor),
            "chart.anchor must lie in [0, 1], got {}",
            c.anchor
        );
        if c.range_policy == RangePolicyKind::Clamped {
            ensure!(
                c.clamp_max > c.clamp_min,
                "chart.clamp_max ({}) must exceed chart.clamp_min ({})",
                c.clamp_max,
                c.clamp_min
            );
        }
        ensure!(
            self.animation.duration.is_finite() && self.animation.duration > 0.0,
            "animation.duration must be positive, got {}",
            self.animation.duration
        );
        ensure!(
            self.animation.delay.is_finite() && self.animation.delay >= 0.0,
            "animation.delay must not be negative, got {}",
            self.animation.delay
        );
        ensure!(
            self.pulse.period.is_finite() && self.pulse.period > 0.0,
            "pulse.period must be positive, got {}",
            self.pulse.period
        );
        ensure!(
            self.source.interval_ms.is_finite() && self.source.interval_ms >= MIN_INTERVAL_MS,
            "source.interval_ms must be at least {}, got {}",
            MIN_INTERVAL_MS,
            self.source.interval_ms
        );
        Ok(())
    }

    pub fn range_policy(&self) -> RangePolicy {
        match self.chart.range_policy {
            RangePolicyKind::Unbounded => RangePolicy::Unbounded,
            RangePolicyKind::Clamped => RangePolicy::Clamped {
                lo: self.chart.clamp_min,
                hi: self.chart.clamp_max,
            },
        }
    }

    pub fn layout(&self) -> PlotLayout {
        PlotLayout::new(self.chart.width, self.chart.height, self.chart.padding)
    }

    pub fn pulse_config(&self) -> PulseConfig {
        let p = &self.pulse;
        PulseConfig {
            period: p.period,
            min_opacity: p.min_opacity,
            max_opacity: p.max_opacity,
            min_scale: p.min_scale,
            max_scale: p.max_scale,
        }
    }

    pub fn options(&self) -> RealtimeChartOptions {
        RealtimeChartOptions {
            max_data_points: self.chart.max_data_points,
            window_ms: self.chart.time_range.duration,
            anchor: self.chart.anchor,
            range_policy: self.range_policy(),
            default_pad: self.chart.default_pad,
            entry: EntryAnimation {
                duration: self.animation.duration,
                delay: self.animation.delay,
                easing: Easing::from_name(&self.animation.easing),
            },
            pulse: self.pulse_config(),
        }
    }

    pub fn style(&self) -> RealtimeChartStyle {
        RealtimeChartStyle {
            smooth: self.chart.smooth,
            ..Default::default()
        }
    }

    /// Validate and build a chart whose clocks start at `now`.
    pub fn build_chart(&self, now: f64) -> Result<RealtimeChartModel> {
        self.validate()?;
        let chart = RealtimeChartModel::new(self.layout(), self.options(), now);
        Ok(chart.with_style(self.style()))
    }

    /// Build the configured generator. `seed` overrides the configured seed.
    pub fn build_generator(&self, seed: Option<u64>) -> WaveformGenerator {
        let mode = GenerationMode::from_name(&self.source.mode);
        match seed.or(self.source.seed) {
            Some(seed) => WaveformGenerator::seeded(self.source.params, mode, seed),
            None => WaveformGenerator::new(self.source.params, mode),
        }
    }
}
