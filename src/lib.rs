//! roledep - Check that every role a playbook needs exists
//!
//! roledep reads a playbook, follows the `dependencies` declared in each
//! role's metadata to compute the full set of roles the playbook needs, and
//! reports the ones that are not present in the roles directory.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Runs one validation: Extract → Discover → Resolve → Detect
//! - [`core`] - Domain types, decoding, discovery, resolution, configuration
//! - [`ui`] - Terminal output
//!
//! # Correctness Invariants
//!
//! 1. Dependency resolution terminates on cyclic graphs and looks up each
//!    role at most once
//! 2. A symlinked role counts only if its target is an existing directory,
//!    and it counts under the symlink's own name
//! 3. Missing roles are always listed in ascending order
//! 4. One role's unreadable metadata never fails the run

pub mod cli;
pub mod core;
pub mod engine;
pub mod ui;
