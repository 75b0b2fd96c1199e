//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$ROLEDEP_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/roledep/config.toml`
//! 3. `~/.roledep/config.toml`
//!
//! # Project Config
//!
//! `roledep.toml` (or `.roledep.toml`) in the working directory, or the
//! file named by `--config`.
//!
//! # Validation
//!
//! Project values are validated after parsing so that a bad value fails the
//! run up front instead of surfacing as a confusing lookup result. Global
//! values are fully checked by their types.

use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::RoleName;
use crate::ui::output::OutputFormat;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// verbose = false
/// format = "json"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Verbose output by default
    pub verbose: Option<bool>,

    /// Default output format
    pub format: Option<OutputFormat>,
}

/// Project configuration.
///
/// # Example
///
/// ```toml
/// roles_path = "ansible/roles"
/// metadata_files = ["meta/main.yml"]
/// ignore = ["geerlingguy.docker"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Roles directory, relative to the config file's directory
    pub roles_path: Option<String>,

    /// Metadata file locations relative to each role directory, in lookup order
    pub metadata_files: Option<Vec<String>>,

    /// Roles never reported as missing (e.g. installed from a collection)
    pub ignore: Option<Vec<String>>,
}

impl ProjectConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(roles_path) = &self.roles_path {
            if roles_path.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "roles_path cannot be empty".into(),
                ));
            }
        }

        if let Some(files) = &self.metadata_files {
            if files.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "metadata_files must list at least one path".into(),
                ));
            }
            for file in files {
                validate_metadata_file(file)?;
            }
        }

        if let Some(ignore) = &self.ignore {
            for name in ignore {
                RoleName::new(name.as_str()).map_err(|e| {
                    ConfigError::InvalidValue(format!("invalid ignore entry: {}", e))
                })?;
            }
        }

        Ok(())
    }
}

/// A metadata file must stay inside the role directory.
fn validate_metadata_file(file: &str) -> Result<(), ConfigError> {
    let path = Path::new(file);
    if file.is_empty() || path.is_absolute() {
        return Err(ConfigError::InvalidValue(format!(
            "metadata file '{}' must be a relative path",
            file
        )));
    }
    if path
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)))
    {
        return Err(ConfigError::InvalidValue(format!(
            "metadata file '{}' cannot leave the role directory",
            file
        )));
    }
    Ok(())
}
