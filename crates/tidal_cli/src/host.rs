//! Headless host
//!
//! Plays the part of a display: a simulated clock ticks at a fixed frame
//! rate, the configured generator emits samples on its own interval, and
//! every frame is painted into a recording [`PaintContext`].

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{ensure, Result};
use serde::Serialize;
use tidal_charts::{render_frame, TimeWindow, ValueRange};
use tidal_paint::{CommandCounts, PaintContext};

use crate::config::TidalConfig;

/// Per-run overrides of the configuration.
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    pub frames: Option<u32>,
    pub fps: Option<f64>,
    pub seed: Option<u64>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    /// Resize the surface before this frame.
    pub resize_at: Option<u32>,
    pub resize_to: Option<(f32, f32)>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PaintSummary {
    pub rects: usize,
    pub rounded_rects: usize,
    pub circles: usize,
    pub fills: usize,
    pub strokes: usize,
    pub texts: usize,
    pub clips: usize,
    pub total: usize,
}

impl From<CommandCounts> for PaintSummary {
    fn from(c: CommandCounts) -> Self {
        Self {
            rects: c.rects,
            rounded_rects: c.rounded_rects,
            circles: c.circles,
            fills: c.fills,
            strokes: c.strokes,
            texts: c.texts,
            clips: c.clips,
            total: c.total(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PulseSummary {
    pub opacity: f32,
    pub scale: f32,
    pub progress: f32,
}

/// What a run did, printed as JSON.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunSummary {
    pub frames: u32,
    pub samples_emitted: usize,
    pub samples_rejected: usize,
    pub buffer_len: usize,
    pub width: f32,
    pub height: f32,
    pub value_range: ValueRange,
    pub time_window: TimeWindow,
    pub points_drawn: usize,
    pub active_tweens: usize,
    pub last_frame: PaintSummary,
    pub total_commands: usize,
    pub pulse: Option<PulseSummary>,
}

pub fn run(config: &TidalConfig, options: &RunOptions) -> Result<RunSummary> {
    let frames = options.frames.unwrap_or(config.run.frames);
    let fps = options.fps.unwrap_or(config.run.fps);
    ensure!(
        fps.is_finite() && fps > 0.0,
        "fps must be positive, got {fps}"
    );

    let mut chart_config = config.chart.clone();
    if let Some(width) = options.width {
        chart_config.chart.width = width;
    }
    if let Some(height) = options.height {
        chart_config.chart.height = height;
    }

    let epoch = config.run.epoch_ms;
    ensure!(
        epoch.is_finite(),
        "run.epoch_ms must be finite, got {epoch}"
    );
    let frame_ms = 1_000.0 / fps;
    let interval = chart_config.source.interval_ms;

    let mut chart = chart_config.build_chart(epoch)?;
    let mut source = chart_config.build_generator(options.seed);
    let emitted = Arc::new(AtomicUsize::new(0));
    let counter = emitted.clone();
    source.subscribe(move |_| {
        counter.fetch_add(1, Ordering::Relaxed);
    });

    tracing::info!(frames, fps, mode = ?source.mode(), "starting headless run");

    let mut ctx = PaintContext::new();
    // Emission k is due at `epoch + k * interval`.
    let mut due_index: u64 = 0;
    let mut rejected = 0;
    let mut total_commands = 0;
    let mut last = None;

    for index in 0..frames {
        let now = epoch + index as f64 * frame_ms;

        if options.resize_at == Some(index) {
            let fallback = (
                chart_config.chart.width * 1.5,
                chart_config.chart.height * 1.5,
            );
            let (w, h) = options.resize_to.unwrap_or(fallback);
            chart.resize(w, h);
        }

        loop {
            let due = epoch + due_index as f64 * interval;
            if due > now {
                break;
            }
            let sample = source.next_sample(due);
            if let Err(err) = chart.push_sample(sample, now) {
                tracing::warn!("dropping sample: {err}");
                rejected += 1;
            }
            due_index += 1;
        }

        let frame = chart.frame(now);
        ctx.clear();
        render_frame(&mut ctx, &frame, &chart.style);
        total_commands += ctx.commands().len();
        last = Some((frame, ctx.counts()));
    }

    let (points_drawn, last_frame, pulse) = match last {
        Some((frame, counts)) => (
            frame.points.len(),
            PaintSummary::from(counts),
            frame.pulse.map(|p| PulseSummary {
                opacity: p.opacity,
                scale: p.scale,
                progress: p.progress,
            }),
        ),
        None => (0, PaintSummary::default(), None),
    };

    let layout = chart.layout();
    let summary = RunSummary {
        frames,
        samples_emitted: emitted.load(Ordering::Relaxed),
        samples_rejected: rejected,
        buffer_len: chart.samples().len(),
        width: layout.width,
        height: layout.height,
        value_range: chart.value_range(),
        time_window: chart.time_window(),
        points_drawn,
        active_tweens: chart.active_tweens(),
        last_frame,
        total_commands,
        pulse,
    };
    tracing::info!(
        samples = summary.samples_emitted,
        commands = summary.total_commands,
        "run finished"
    );
    Ok(summary)
}
