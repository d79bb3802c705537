//! Tidal configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tidal_charts::ChartConfig;

/// File name looked up inside a directory.
pub const CONFIG_FILE: &str = "tidal.toml";

/// Top-level Tidal configuration (tidal.toml)
#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct TidalConfig {
    #[serde(default)]
    pub run: RunConfig,
    #[serde(flatten)]
    pub chart: ChartConfig,
}

/// Headless run defaults, overridable from the command line
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct RunConfig {
    /// Frames to simulate
    #[serde(default = "default_frames")]
    pub frames: u32,
    /// Simulated display refresh rate
    #[serde(default = "default_fps")]
    pub fps: f64,
    /// Wall-clock time of the first frame, in ms since the Unix epoch
    #[serde(default = "default_epoch")]
    pub epoch_ms: f64,
}

fn default_frames() -> u32 {
    600
}

fn default_fps() -> f64 {
    60.0
}

fn default_epoch() -> f64 {
    // 2024-01-01T00:00:00Z
    1_704_067_200_000.0
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frames: default_frames(),
            fps: default_fps(),
            epoch_ms: default_epoch(),
        }
    }
}

fn resolve(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(CONFIG_FILE)
    } else {
        path.to_path_buf()
    }
}

impl TidalConfig {
    /// Load configuration from a file or a directory containing tidal.toml
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = resolve(path);

        if !config_path.exists() {
            anyhow::bail!(
                "No {} found at {}. Run `tidal init` to create one.",
                CONFIG_FILE,
                config_path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: TidalConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        config
            .chart
            .validate()
            .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;

        Ok(config)
    }

    /// Like [`TidalConfig::load`], but a missing tidal.toml in `dir` yields the defaults
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        let config_path = resolve(dir);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            tracing::info!("no {} in {}, using defaults", CONFIG_FILE, dir.display());
            Ok(Self::default())
        }
    }

    /// Write a default tidal.toml into `dir`, refusing to overwrite one
    pub fn init(dir: &Path) -> Result<PathBuf> {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            anyhow::bail!("{} already exists", config_path.display());
        }
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        fs::write(&config_path, Self::default().to_toml()?)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        Ok(config_path)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
