//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! roledep has two configuration scopes:
//! - **Global**: User-level output preferences
//! - **Project**: Where the roles live and which roles to ignore
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Project config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$ROLEDEP_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/roledep/config.toml`
//! 3. `~/.roledep/config.toml`
//!
//! # Project Config Locations
//!
//! The file given with `--config` if any (it must exist), otherwise searched
//! in order in the working directory:
//! 1. `roledep.toml`
//! 2. `.roledep.toml`
//!
//! # Example
//!
//! ```no_run
//! use roledep::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Path::new("/srv/ansible"), None).unwrap();
//! let config = result.config;
//!
//! if let Some(roles) = config.roles_path() {
//!     println!("Roles directory: {}", roles.display());
//! }
//! println!("Format: {:?}", config.format());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, ProjectConfig};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::paths::DEFAULT_METADATA_FILES;
use crate::core::types::RoleName;
use crate::ui::output::OutputFormat;

/// Canonical project config file name.
pub const PROJECT_CONFIG_FILE: &str = "roledep.toml";

/// Hidden alternative project config file name.
pub const HIDDEN_PROJECT_CONFIG_FILE: &str = ".roledep.toml";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
///
/// Accessors apply defaults; CLI flags are layered on top by the caller.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Project configuration (if found)
    pub project: Option<ProjectConfig>,
    /// Path to the global config file (if loaded)
    pub(crate) global_path: Option<PathBuf>,
    /// Path to the project config file (if loaded)
    pub(crate) project_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// `cwd` is searched for a project config unless `explicit` names one.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed,
    /// or validated, or if `explicit` does not exist. Missing config files
    /// are otherwise not an error (defaults are used).
    pub fn load(cwd: &Path, explicit: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let (global, global_path) = Self::load_global()?;
        let (project, project_path) = match explicit {
            Some(path) => {
                let path = if path.is_absolute() {
                    path.to_path_buf()
                } else {
                    cwd.join(path)
                };
                let config = Self::read_project_config(&path)?;
                (Some(config), Some(path))
            }
            None => Self::load_project(cwd, &mut warnings)?,
        };

        if let Some(ref p) = project {
            p.validate()?;
        }

        Ok(ConfigLoadResult {
            config: Config {
                global,
                project,
                global_path,
                project_path,
            },
            warnings,
        })
    }

    /// Load global configuration from standard locations.
    fn load_global() -> Result<(GlobalConfig, Option<PathBuf>), ConfigError> {
        for path in Self::global_config_candidates() {
            if path.exists() {
                let config = Self::read_global_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        Ok((GlobalConfig::default(), None))
    }

    /// Global config locations, in search order.
    pub fn global_config_candidates() -> Vec<PathBuf> {
        let mut candidates = Vec::new();

        if let Ok(path) = std::env::var("ROLEDEP_CONFIG") {
            candidates.push(PathBuf::from(path));
        }
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            candidates.push(PathBuf::from(xdg_home).join("roledep/config.toml"));
        }
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(".roledep/config.toml"));
        }

        candidates
    }

    /// Load project configuration from the working directory.
    fn load_project(
        cwd: &Path,
        warnings: &mut Vec<ConfigWarning>,
    ) -> Result<(Option<ProjectConfig>, Option<PathBuf>), ConfigError> {
        let canonical = cwd.join(PROJECT_CONFIG_FILE);
        let hidden = cwd.join(HIDDEN_PROJECT_CONFIG_FILE);

        if canonical.exists() {
            if hidden.exists() {
                warnings.push(ConfigWarning {
                    message: format!(
                        "Ignoring '{}' because '{}' takes precedence",
                        hidden.display(),
                        canonical.display()
                    ),
                    path: hidden,
                });
            }
            let config = Self::read_project_config(&canonical)?;
            return Ok((Some(config), Some(canonical)));
        }

        if hidden.exists() {
            let config = Self::read_project_config(&hidden)?;
            return Ok((Some(config), Some(hidden)));
        }

        Ok((None, None))
    }

    /// Read and parse a global config file.
    pub fn read_global_config(path: &Path) -> Result<GlobalConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Read and parse a project config file.
    pub fn read_project_config(path: &Path) -> Result<ProjectConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Check if verbose output is enabled by default.
    ///
    /// Defaults to `false` if not configured.
    pub fn verbose(&self) -> bool {
        self.global.verbose.unwrap_or(false)
    }

    /// Get the default output format.
    ///
    /// Defaults to text if not configured.
    pub fn format(&self) -> OutputFormat {
        self.global.format.unwrap_or_default()
    }

    /// Get the configured roles directory.
    ///
    /// A relative path is taken relative to the directory holding the
    /// project config file. Returns `None` if not configured.
    pub fn roles_path(&self) -> Option<PathBuf> {
        let configured = self.project.as_ref()?.roles_path.as_deref()?;
        let path = PathBuf::from(configured);
        if path.is_absolute() {
            return Some(path);
        }
        match self.project_path.as_deref().and_then(Path::parent) {
            Some(base) => Some(base.join(path)),
            None => Some(path),
        }
    }

    /// Get the metadata file locations, in lookup order.
    ///
    /// Defaults to `meta/main.yml` then `meta/main.yaml`.
    pub fn metadata_files(&self) -> Vec<PathBuf> {
        match self.project.as_ref().and_then(|p| p.metadata_files.as_ref()) {
            Some(files) => files.iter().map(PathBuf::from).collect(),
            None => DEFAULT_METADATA_FILES.iter().map(PathBuf::from).collect(),
        }
    }

    /// Get the roles never reported as missing.
    ///
    /// Entries are validated on load, so none are dropped here in practice.
    pub fn ignore(&self) -> Vec<RoleName> {
        self.project
            .as_ref()
            .and_then(|p| p.ignore.as_ref())
            .map(|names| {
                names
                    .iter()
                    .filter_map(|n| RoleName::new(n.as_str()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded project config file.
    pub fn project_config_loaded_from(&self) -> Option<&Path> {
        self.project_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_without_project_config() {
        let config = Config::default();

        assert!(!config.verbose());
        assert_eq!(config.format(), OutputFormat::Text);
        assert!(config.roles_path().is_none());
        assert_eq!(
            config.metadata_files(),
            vec![PathBuf::from("meta/main.yml"), PathBuf::from("meta/main.yaml")]
        );
        assert!(config.ignore().is_empty());
    }

    #[test]
    fn read_global_config_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "verbose = true\nformat = \"json\"\n").unwrap();

        let global = Config::read_global_config(&path).unwrap();
        let config = Config {
            global,
            ..Default::default()
        };

        assert!(config.verbose());
        assert_eq!(config.format(), OutputFormat::Json);
    }

    #[test]
    fn load_project_config() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(PROJECT_CONFIG_FILE),
            r#"
            roles_path = "ansible/roles"
            ignore = ["vendor.role"]
            "#,
        )
        .unwrap();

        let result = Config::load(temp.path(), None).unwrap();
        let config = result.config;

        assert_eq!(config.roles_path(), Some(temp.path().join("ansible/roles")));
        assert_eq!(config.ignore(), vec![RoleName::new("vendor.role").unwrap()]);
        assert_eq!(
            config.project_config_loaded_from(),
            Some(temp.path().join(PROJECT_CONFIG_FILE).as_path())
        );
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn hidden_project_config_used_alone() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(HIDDEN_PROJECT_CONFIG_FILE),
            "roles_path = \"/abs/roles\"\n",
        )
        .unwrap();

        let result = Config::load(temp.path(), None).unwrap();

        assert_eq!(result.config.roles_path(), Some(PathBuf::from("/abs/roles")));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn both_project_configs_warns() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROJECT_CONFIG_FILE), "roles_path = \"a\"\n").unwrap();
        fs::write(temp.path().join(HIDDEN_PROJECT_CONFIG_FILE), "roles_path = \"b\"\n").unwrap();

        let result = Config::load(temp.path(), None).unwrap();

        assert_eq!(result.config.roles_path(), Some(temp.path().join("a")));
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].message.contains("takes precedence"));
    }

    #[test]
    fn explicit_config_must_exist() {
        let temp = TempDir::new().unwrap();
        let result = Config::load(temp.path(), Some(Path::new("missing.toml")));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn explicit_config_overrides_search() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROJECT_CONFIG_FILE), "roles_path = \"a\"\n").unwrap();
        fs::create_dir(temp.path().join("ci")).unwrap();
        fs::write(temp.path().join("ci/roledep.toml"), "roles_path = \"../b\"\n").unwrap();

        let result = Config::load(temp.path(), Some(Path::new("ci/roledep.toml"))).unwrap();

        assert_eq!(result.config.roles_path(), Some(temp.path().join("ci/../b")));
    }

    #[test]
    fn unknown_fields_rejected() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(PROJECT_CONFIG_FILE),
            r#"
            roles_path = "roles"
            unknown_field = true
            "#,
        )
        .unwrap();

        let result = Config::load(temp.path(), None);
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn invalid_value_rejected() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(PROJECT_CONFIG_FILE),
            "metadata_files = [\"../escape.yml\"]\n",
        )
        .unwrap();

        let result = Config::load(temp.path(), None);
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn custom_metadata_files() {
        let config = Config {
            project: Some(ProjectConfig {
                metadata_files: Some(vec!["meta/deps.yml".into()]),
                ..Default::default()
            }),
            ..Default::default()
        };

        assert_eq!(config.metadata_files(), vec![PathBuf::from("meta/deps.yml")]);
    }
}
