//! core
//!
//! Core domain types, decoding, and algorithms for roledep.
//!
//! # Modules
//!
//! - [`types`] - Strong types: RoleName
//! - [`playbook`] - Playbook decoding and top-level role extraction
//! - [`metadata`] - Role metadata schema and lookup
//! - [`resolve`] - Transitive dependency closure
//! - [`discovery`] - Roles-directory scanning and symlink classification
//! - [`missing`] - Required-minus-available
//! - [`diag`] - Diagnostic sink
//! - [`config`] - Configuration schema and loading
//! - [`paths`] - Centralized path routing for the roles directory
//!
//! # Design Principles
//!
//! - No global state: diagnostics are written to an injected sink
//! - Per-role problems degrade, never abort
//! - Every externally visible listing is sorted

pub mod config;
pub mod diag;
pub mod discovery;
pub mod metadata;
pub mod missing;
pub mod paths;
pub mod playbook;
pub mod resolve;
pub mod types;
