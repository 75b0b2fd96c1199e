//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output respects the verbose flag. In the default mode only the result is
//! printed, one missing role per line, so that the output can be piped.
//! When `--format json` is selected stdout carries nothing but the JSON
//! report and any trace goes to stderr.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::core::diag::Diagnostics;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Result only
    Normal,
    /// Result plus diagnostic trace and a summary
    Verbose,
}

impl Verbosity {
    /// Create verbosity from the flag.
    pub fn from_flag(verbose: bool) -> Self {
        if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

/// Report output format.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text
    #[default]
    Text,
    /// Machine-readable JSON report
    Json,
}

/// Where trace lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Stdout,
    Stderr,
}

impl Channel {
    /// Trace shares stdout with text output but must stay off it for JSON.
    pub fn for_format(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => Channel::Stdout,
            OutputFormat::Json => Channel::Stderr,
        }
    }

    fn write(self, message: impl Display) {
        match self {
            Channel::Stdout => println!("{}", message),
            Channel::Stderr => eprintln!("{}", message),
        }
    }
}

/// Print a message (always shown).
pub fn print(message: impl Display) {
    println!("{}", message);
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (always shown, on stderr).
pub fn warn(message: impl Display) {
    eprintln!("warning: {}", message);
}

/// Format a list of items.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Diagnostics written to the terminal.
///
/// Nothing is printed unless verbose. Warnings are part of the trace and
/// carry a `Warning:` prefix.
#[derive(Debug, Clone, Copy)]
pub struct TerminalDiagnostics {
    verbosity: Verbosity,
    channel: Channel,
}

impl TerminalDiagnostics {
    /// Create a sink for the given verbosity and channel.
    pub fn new(verbosity: Verbosity, channel: Channel) -> Self {
        Self { verbosity, channel }
    }

    /// Whether this sink prints anything.
    pub fn is_enabled(&self) -> bool {
        self.verbosity == Verbosity::Verbose
    }
}

impl Diagnostics for TerminalDiagnostics {
    fn trace(&self, message: &str) {
        if self.is_enabled() {
            self.channel.write(message);
        }
    }

    fn warn(&self, message: &str) {
        if self.is_enabled() {
            self.channel.write(format_args!("Warning: {}", message));
        }
    }
}
