//! Flick CLI
//!
//! Replays gesture scenarios through a touch scroller driving a headless
//! surface, printing the claim decision, phase, position and overscroll after
//! every step. Useful for tuning kinetic configs without a device.

mod replay;
mod scenario;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flick_scroll::{ResolvedAxes, ScrollConfig};
use tracing_subscriber::EnvFilter;

use crate::replay::Replay;
use crate::scenario::Scenario;

#[derive(Parser)]
#[command(name = "flick")]
#[command(version, about = "Replay touch scroll gestures against a headless surface", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSON gesture scenario
    Replay {
        /// Scenario file
        scenario: PathBuf,
        /// Scroll config (TOML), overrides the scenario's inline config
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Animation frame rate
        #[arg(long, default_value = "60")]
        fps: u32,
    },
    /// Validate a scroll config file and print the resolved configuration
    CheckConfig {
        /// Config file (TOML)
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Replay {
            scenario,
            config,
            fps,
        } => cmd_replay(scenario, config, fps),
        Commands::CheckConfig { path } => cmd_check_config(path),
    }
}

fn cmd_replay(path: PathBuf, config: Option<PathBuf>, fps: u32) -> Result<()> {
    let scenario = Scenario::from_path(&path)?;
    let config = match config {
        Some(config_path) => ScrollConfig::load(&config_path)
            .with_context(|| format!("Invalid config {}", config_path.display()))?,
        None => scenario.config.unwrap_or_default(),
    };

    tracing::info!(
        scenario = %path.display(),
        steps = scenario.steps.len(),
        fps,
        "replaying"
    );

    let mut replay = Replay::new(&scenario, config, fps);
    let axes = replay.scroller().axes();
    println!(
        "viewport {}x{}, content {}x{}, axes {}",
        scenario.viewport.width,
        scenario.viewport.height,
        scenario.content.width,
        scenario.content.height,
        describe_axes(axes),
    );

    for (index, step) in scenario.steps.iter().enumerate() {
        let report = replay.step(index, step)?;
        println!("{report}");
    }

    let bounds = replay.scroller().scroll_bounds();
    println!(
        "final: left={} top={} max=({}, {})",
        bounds.left, bounds.top, bounds.max_left, bounds.max_top
    );
    Ok(())
}

fn cmd_check_config(path: PathBuf) -> Result<()> {
    let config = ScrollConfig::load(&path)
        .with_context(|| format!("Invalid config {}", path.display()))?;

    println!("{} is valid", path.display());
    println!();
    print!("{}", config.to_toml().context("Failed to serialize config")?);
    Ok(())
}

fn describe_axes(axes: ResolvedAxes) -> &'static str {
    match (axes.horizontal, axes.vertical) {
        (true, true) => "both",
        (true, false) => "horizontal",
        (false, true) => "vertical",
        (false, false) => "none",
    }
}
