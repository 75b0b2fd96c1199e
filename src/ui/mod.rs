//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Output formatting, verbosity, and the terminal diagnostic sink
//!
//! # Design
//!
//! All terminal output goes through this module so that the machine-readable
//! modes (plain missing-role list, JSON report) stay clean.

pub mod output;
