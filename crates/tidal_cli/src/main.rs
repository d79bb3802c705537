//! Tidal CLI
//!
//! Scaffolds a chart configuration and drives a realtime chart headlessly,
//! reporting what was painted as JSON.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tidal_cli::{run, RunOptions, TidalConfig};
use tracing_subscriber::EnvFilter;

/// Tidal - realtime line chart runner
#[derive(Parser)]
#[command(name = "tidal")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default tidal.toml
    Init {
        /// Directory to create the file in
        #[arg(default_value = ".")]
        dir: PathBuf,
    },

    /// Simulate a display and render the chart frame by frame
    Run {
        /// Config file or directory containing tidal.toml
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of frames to render
        #[arg(long)]
        frames: Option<u32>,

        /// Simulated refresh rate
        #[arg(long)]
        fps: Option<f64>,

        /// Seed for the waveform noise
        #[arg(long)]
        seed: Option<u64>,

        /// Surface width override
        #[arg(long)]
        width: Option<f32>,

        /// Surface height override
        #[arg(long)]
        height: Option<f32>,

        /// Resize the surface before this frame
        #[arg(long)]
        resize_at: Option<u32>,

        /// Size to resize to, as WIDTHxHEIGHT
        #[arg(long, value_parser = parse_size)]
        resize_to: Option<(f32, f32)>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_size(s: &str) -> Result<(f32, f32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got `{s}`"))?;
    let w: f32 = w.trim().parse().map_err(|e| format!("bad width: {e}"))?;
    let h: f32 = h.trim().parse().map_err(|e| format!("bad height: {e}"))?;
    Ok((w, h))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { dir } => {
            let path = TidalConfig::init(&dir)?;
            tracing::info!("created {}", path.display());
        }
        Commands::Run {
            config,
            frames,
            fps,
            seed,
            width,
            height,
            resize_at,
            resize_to,
            output,
        } => {
            let config = match config {
                Some(path) => TidalConfig::load(&path)?,
                None => TidalConfig::load_or_default(&std::env::current_dir()?)?,
            };
            let options = RunOptions {
                frames,
                fps,
                seed,
                width,
                height,
                resize_at,
                resize_to,
            };
            let summary = run(&config, &options)?;
            let json = serde_json::to_string_pretty(&summary)?;
            match output {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    tracing::info!("summary written to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
    }

    Ok(())
}
