//! Synthetic sample source
//!
//! A demo waveform generator: base value plus a periodic wave plus uniform
//! noise. Every generated sample is also pushed to subscribers.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

use crate::sample::Sample;

new_key_type! {
    pub struct SubscriptionId;
}

/// Shape of the underlying wave.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    #[default]
    Sine,
    Square,
    Sawtooth,
    /// Noise accumulates instead of resetting every step.
    RandomWalk,
}

impl GenerationMode {
    /// Unknown names resolve to [`GenerationMode::Sine`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "sine" => GenerationMode::Sine,
            "square" => GenerationMode::Square,
            "sawtooth" | "saw" => GenerationMode::Sawtooth,
            "random_walk" | "randomwalk" | "walk" => GenerationMode::RandomWalk,
            _ => {
                tracing::warn!("unknown generation mode {:?}, using sine", name);
                GenerationMode::Sine
            }
        }
    }

    /// Unit wave in `[-1, 1]` at `phase` radians.
    fn wave(&self, phase: f64) -> f64 {
        match self {
            GenerationMode::Sine | GenerationMode::RandomWalk => phase.sin(),
            GenerationMode::Square => {
                if phase.sin() >= 0.0 {
                    1.0
                } else {
                    -1.0
                }
            }
            GenerationMode::Sawtooth => {
                let cycle = phase / std::f64::consts::TAU;
                2.0 * (cycle - (cycle + 0.5).floor())
            }
        }
    }
}

/// Waveform parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveformParams {
    pub base_value: f64,
    pub amplitude: f64,
    /// Radians advanced per generated sample.
    pub frequency: f64,
    /// Peak-to-peak width of the uniform noise.
    pub noise_level: f64,
}

impl Default for WaveformParams {
    fn default() -> Self {
        Self {
            base_value: 50.0,
            amplitude: 30.0,
            frequency: 0.03,
            noise_level: 5.0,
        }
    }
}

type Subscriber = Box<dyn FnMut(&Sample) + Send>;

pub struct WaveformGenerator {
    params: WaveformParams,
    mode: GenerationMode,
    step: u64,
    drift: f64,
    rng: StdRng,
    subscribers: SlotMap<SubscriptionId, Subscriber>,
}

impl WaveformGenerator {
    pub fn new(params: WaveformParams, mode: GenerationMode) -> Self {
        Self::with_rng(params, mode, StdRng::from_entropy())
    }

    /// Reproducible generator: the same seed yields the same noise.
    pub fn seeded(params: WaveformParams, mode: GenerationMode, seed: u64) -> Self {
        Self::with_rng(params, mode, StdRng::seed_from_u64(seed))
    }

    fn with_rng(params: WaveformParams, mode: GenerationMode, rng: StdRng) -> Self {
        Self {
            params,
            mode,
            step: 0,
            drift: 0.0,
            rng,
            subscribers: SlotMap::with_key(),
        }
    }

    pub fn params(&self) -> &WaveformParams {
        &self.params
    }

    pub fn mode(&self) -> GenerationMode {
        self.mode
    }

    /// Samples generated since creation or the last reset.
    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn subscribe(&mut self, f: impl FnMut(&Sample) + Send + 'static) -> SubscriptionId {
        self.subscribers.insert(Box::new(f))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Produce the next sample stamped with `now` and notify subscribers.
    pub fn next_sample(&mut self, now: f64) -> Sample {
        let p = &self.params;
        let noise = (self.rng.gen::<f64>() - 0.5) * p.noise_level;
        let wave = self.mode.wave(self.step as f64 * p.frequency) * p.amplitude;
        let value = match self.mode {
            GenerationMode::RandomWalk => {
                self.drift += noise;
                p.base_value + wave + self.drift
            }
            _ => p.base_value + wave + noise,
        };
        self.step += 1;

        let sample = Sample::new(now, value);
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&sample);
        }
        sample
    }

    /// Rewind the wave to its first step.
    pub fn reset(&mut self) {
        self.step = 0;
        self.drift = 0.0;
    }
}
