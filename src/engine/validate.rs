//! engine::validate
//!
//! The validation pipeline for one playbook against one roles directory.

use std::path::PathBuf;

use serde::Serialize;

use super::EngineError;
use crate::core::diag::Diagnostics;
use crate::core::discovery::discover;
use crate::core::metadata::{FsMetadataSource, MetadataSource};
use crate::core::missing::{detect, partition_ignored};
use crate::core::paths::RolePaths;
use crate::core::playbook::{extract_roles, load_playbook, unique_in_order};
use crate::core::resolve::resolve;
use crate::core::types::RoleName;

/// Inputs of a run.
#[derive(Debug, Clone)]
pub struct ValidationRequest {
    /// Playbook to read.
    pub playbook: PathBuf,
    /// Roles directory and metadata locations.
    pub paths: RolePaths,
    /// Roles never reported as missing.
    pub ignore: Vec<RoleName>,
}

impl ValidationRequest {
    /// A request with default metadata locations and no ignores.
    pub fn new(playbook: impl Into<PathBuf>, roles_dir: impl Into<PathBuf>) -> Self {
        Self {
            playbook: playbook.into(),
            paths: RolePaths::new(roles_dir.into()),
            ignore: Vec::new(),
        }
    }
}

/// Outcome of a run. Every list except `seeds` is sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Playbook that was read.
    pub playbook: PathBuf,
    /// Absolute roles directory that was scanned.
    pub roles_dir: PathBuf,
    /// Roles named directly by the playbook, first-seen order, deduplicated.
    pub seeds: Vec<RoleName>,
    /// Dependency closure of the seeds.
    pub required: Vec<RoleName>,
    /// Roles present in the roles directory.
    pub available: Vec<RoleName>,
    /// Required but not available, minus ignored roles.
    pub missing: Vec<RoleName>,
    /// Required, not available, and suppressed by config.
    pub ignored: Vec<RoleName>,
}

impl ValidationReport {
    /// Whether every required role is present.
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Run the pipeline, reading role metadata from the roles directory.
///
/// # Errors
///
/// Fails only on the fatal conditions: the playbook cannot be read or
/// decoded, or the roles directory cannot be scanned.
pub fn validate(
    request: &ValidationRequest,
    diag: &dyn Diagnostics,
) -> Result<ValidationReport, EngineError> {
    validate_with(request, None, diag)
}

/// Run the pipeline with an explicit metadata source.
///
/// When `source` is `None`, metadata is read from the scanned roles
/// directory through [`FsMetadataSource`].
pub fn validate_with(
    request: &ValidationRequest,
    source: Option<&dyn MetadataSource>,
    diag: &dyn Diagnostics,
) -> Result<ValidationReport, EngineError> {
    // 1. Extract
    let plays = load_playbook(&request.playbook, diag)?;
    let seeds = extract_roles(&plays, diag);

    // 2. Discover
    let discovery = discover(&request.paths.roles_dir, diag)?;

    // 3. Resolve
    let required = match source {
        Some(source) => resolve(&seeds, source, diag),
        None => {
            let fs_source = FsMetadataSource::new(RolePaths {
                roles_dir: discovery.roles_dir.clone(),
                metadata_files: request.paths.metadata_files.clone(),
            });
            resolve(&seeds, &fs_source, diag)
        }
    };

    // 4. Detect
    let missing = detect(&required, discovery.available());
    for role in &missing {
        diag.trace(&format!(
            "Role '{}' is missing (not found in roles directory)",
            role
        ));
    }
    let (missing, ignored) = partition_ignored(missing, &request.ignore);
    for role in &ignored {
        diag.trace(&format!("Role '{}' is missing but ignored by config", role));
    }

    Ok(ValidationReport {
        playbook: request.playbook.clone(),
        roles_dir: discovery.roles_dir.clone(),
        seeds: unique_in_order(&seeds),
        required: required.sorted(),
        available: discovery.sorted(),
        missing,
        ignored,
    })
}
