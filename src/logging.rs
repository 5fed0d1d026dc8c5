//! Log file setup
//!
//! Structured events go to the configured log file only; the console gets
//! the colored per-repository lines from [`crate::git::Logger`]. `RUST_LOG`
//! overrides the configured level.

use crate::config::Config;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init(config: &Config) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("Failed to open log file '{}'", config.log_file))?;

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(config.log_level.to_tracing()).into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}
