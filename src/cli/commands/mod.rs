//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each handler:
//! 1. Validates its arguments
//! 2. Calls the engine
//! 3. Formats and displays output
//!
//! Handlers never touch the roles directory themselves.

mod check;
mod completion;

// Re-export command functions for testing and direct invocation
pub use check::{build_request, check, render_report};
pub use completion::completion;

use std::process::ExitCode;

use anyhow::Result;

use crate::cli::args::Cli;
use crate::core::config::Config;
use crate::engine::Context;

/// Dispatch the parsed command line to its handler.
pub fn dispatch(cli: &Cli, config: &Config, ctx: &Context) -> Result<ExitCode> {
    let request = build_request(cli.playbook_path(), cli.roles.as_deref(), config, ctx)?;
    let report = check(ctx, config, &request)?;

    Ok(if report.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
