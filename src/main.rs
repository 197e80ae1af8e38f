//! Headless simulator (default binary).
//!
//! Plays one game with the greedy planner and prints a summary. Configured through
//! `TETROMINO_*` environment variables; see [`SimConfig::from_env`].

use anyhow::{Context, Result};
use tracing_subscriber::prelude::*;

use tetromino::sim::{self, SimConfig};

fn main() -> Result<()> {
    let config = SimConfig::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(tracing_subscriber::filter::LevelFilter::from_level(config.log_level))
        .init();

    let summary = sim::run(&config);

    if config.json {
        let line = serde_json::to_string(&summary).context("failed to serialize summary")?;
        println!("{line}");
    } else {
        println!(
            "seed={} kicks={:?} pieces={} lines={} score={} level={} game_over={}",
            summary.seed,
            summary.kicks,
            summary.pieces_locked,
            summary.lines,
            summary.score,
            summary.level,
            summary.game_over
        );
    }

    Ok(())
}
