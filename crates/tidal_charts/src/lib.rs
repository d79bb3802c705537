//! tidal_charts
//!
//! A scrolling, auto-ranging line chart for live data streams.
//!
//! Samples are pushed into a [`RealtimeChartModel`]; once per frame the host
//! asks it for a [`ChartFrame`] (mapped points, entry animations and the
//! endpoint pulse) and paints that with [`render_frame`].

mod axis;
mod format;
mod scale;
mod smooth;
mod time_format;

pub mod config;
pub mod error;
pub mod realtime;
pub mod render;
pub mod sample;
pub mod source;
pub mod style;
pub mod view;

pub use axis::{build_bottom_ticks, build_left_ticks, AxisTick};
pub use config::ChartConfig;
pub use error::ChartError;
pub use format::format_fixed;
pub use realtime::{
    ChartFrame, EntryAnimation, EntryState, FramePoint, RealtimeChartHandle, RealtimeChartModel,
    RealtimeChartOptions,
};
pub use render::render_frame;
pub use sample::{BufferedSample, Sample, SampleBuffer};
pub use scale::LinearScale;
pub use smooth::{cubic_bezier, smooth_points};
pub use source::{GenerationMode, SubscriptionId, WaveformGenerator, WaveformParams};
pub use style::RealtimeChartStyle;
pub use time_format::{format_clock_ms, format_hms};
pub use view::{PlotLayout, RangePolicy, TimeWindow, ValueRange};

/// Common imports for chart users.
pub mod prelude {
    pub use crate::config::ChartConfig;
    pub use crate::realtime::{ChartFrame, RealtimeChartHandle, RealtimeChartModel};
    pub use crate::render::render_frame;
    pub use crate::sample::Sample;
    pub use crate::source::{GenerationMode, WaveformGenerator};
    pub use crate::style::RealtimeChartStyle;
    pub use crate::view::{PlotLayout, RangePolicy};
}
