//! cli
//!
//! Command-line interface layer for roledep.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments
//! - Load configuration and layer CLI flags over it
//! - Delegate to the command handlers and map the outcome to an exit code
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to the
//! [`crate::engine`] for the actual validation.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::process::ExitCode;

use anyhow::{Context as _, Result};

use crate::core::config::Config;
use crate::engine;
use crate::ui::output;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`. Returns the exit
/// code for a completed run; any `Err` is fatal and maps to exit code 1.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse_args();

    if let Some(shell) = cli.completions {
        commands::completion(shell)?;
        return Ok(ExitCode::SUCCESS);
    }

    let cwd = std::env::current_dir().context("failed to determine working directory")?;
    let loaded = Config::load(&cwd, cli.config.as_deref()).context("failed to load config")?;
    for warning in &loaded.warnings {
        output::warn(&warning.message);
    }
    let config = loaded.config;

    // CLI flags take precedence over config.
    let ctx = engine::Context {
        cwd,
        verbose: cli.verbose || config.verbose(),
        format: cli.format.unwrap_or_else(|| config.format()),
    };

    commands::dispatch(&cli, &config, &ctx)
}
