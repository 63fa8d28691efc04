mod app;
mod cli;
mod commands;
mod config;
mod effects;
mod render;

use std::path::Path;

use anyhow::Context;
use board_logging::{board_warn, LevelFilter, LogDestination};
use clap::Parser;

use crate::cli::Cli;
use crate::config::BoardConfig;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => BoardConfig::load(path)?,
        None => BoardConfig::default(),
    };
    let settings = config
        .with_overrides(&cli)
        .resolve()
        .context("invalid configuration")?;

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    init_logging(&settings.log_file, level)?;

    app::run_app(settings)
}

/// Logs to `log_file`, or to the terminal when the file cannot be created.
fn init_logging(log_file: &Path, level: LevelFilter) -> anyhow::Result<()> {
    if board_logging::initialize(LogDestination::File(log_file), level) {
        return Ok(());
    }
    if board_logging::initialize(LogDestination::Terminal, level) {
        board_warn!("Logging to the terminal, {} is not writable", log_file.display());
        return Ok(());
    }
    anyhow::bail!("could not initialize logging to {}", log_file.display())
}
