//! engine
//!
//! Orchestrates one validation run: Extract -> Discover -> Resolve -> Detect.
//!
//! # Architecture
//!
//! ```text
//! playbook ──extract──> seeds ──resolve──> required ─┐
//!                                                    ├─detect──> missing
//! roles dir ─discover─────────────────────> available┘
//! ```
//!
//! The engine owns the order of the steps and the fatal/non-fatal split:
//! a playbook or roles-directory failure aborts the run with an
//! [`EngineError`], while per-role problems are reported through the
//! diagnostic sink and the run continues.
//!
//! # Invariants
//!
//! - A run never mutates the filesystem
//! - The same inputs produce the same [`ValidationReport`]
//! - Nothing is shared between runs

pub mod validate;

pub use validate::{validate, ValidationReport, ValidationRequest};

use std::path::PathBuf;

use crate::core::discovery::DiscoveryError;
use crate::core::playbook::PlaybookError;
use crate::ui::output::OutputFormat;

/// Execution context for a run.
///
/// Contains global settings derived from CLI flags and config.
#[derive(Debug, Clone)]
pub struct Context {
    /// Working directory relative paths are resolved against.
    pub cwd: PathBuf,
    /// Verbose trace and summary.
    pub verbose: bool,
    /// Report output format.
    pub format: OutputFormat,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            cwd: PathBuf::from("."),
            verbose: false,
            format: OutputFormat::Text,
        }
    }
}

/// Errors that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The playbook could not be read or decoded.
    #[error("error reading playbook: {0}")]
    Playbook(#[from] PlaybookError),

    /// The roles directory could not be scanned.
    #[error("error getting all roles: {0}")]
    Discovery(#[from] DiscoveryError),
}
