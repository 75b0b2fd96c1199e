//! core::paths
//!
//! Centralized path routing for the roles repository.
//!
//! # Layout
//!
//! ```text
//! <roles_dir>/
//!   <role>/               one entry per role (directory or symlink to one)
//!     meta/main.yml       dependency declaration (optional)
//! ```
//!
//! No code outside this module joins a role name onto the roles directory.
//!
//! # Example
//!
//! ```
//! use roledep::core::paths::RolePaths;
//! use roledep::core::types::RoleName;
//! use std::path::PathBuf;
//!
//! let paths = RolePaths::new(PathBuf::from("/srv/ansible/roles"));
//! let role = RoleName::new("nginx").unwrap();
//!
//! assert_eq!(
//!     paths.metadata_candidates(&role)[0],
//!     PathBuf::from("/srv/ansible/roles/nginx/meta/main.yml")
//! );
//! ```

use std::io;
use std::path::{Path, PathBuf};

use super::types::RoleName;

/// Roles directory used when neither the CLI nor config names one.
pub const DEFAULT_ROLES_DIR: &str = "roles";

/// Metadata locations tried, in order, under each role directory.
pub const DEFAULT_METADATA_FILES: [&str; 2] = ["meta/main.yml", "meta/main.yaml"];

/// Path routing for one roles directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePaths {
    /// The roles directory.
    pub roles_dir: PathBuf,

    /// Metadata file locations relative to a role directory, in lookup order.
    pub metadata_files: Vec<PathBuf>,
}

impl RolePaths {
    /// Create paths for `roles_dir` with the default metadata locations.
    pub fn new(roles_dir: PathBuf) -> Self {
        Self {
            roles_dir,
            metadata_files: DEFAULT_METADATA_FILES.iter().map(PathBuf::from).collect(),
        }
    }

    /// Replace the metadata locations.
    pub fn with_metadata_files(mut self, metadata_files: Vec<PathBuf>) -> Self {
        self.metadata_files = metadata_files;
        self
    }

    /// Directory (or symlink) for a role: `<roles_dir>/<role>`.
    pub fn role_dir(&self, role: &RoleName) -> PathBuf {
        self.roles_dir.join(role.as_str())
    }

    /// Candidate metadata files for a role, in lookup order.
    pub fn metadata_candidates(&self, role: &RoleName) -> Vec<PathBuf> {
        let dir = self.role_dir(role);
        self.metadata_files.iter().map(|f| dir.join(f)).collect()
    }
}

/// Make `path` absolute against the process working directory.
///
/// The path is not canonicalized: symlinks and `..` components are kept,
/// so an error message names the path the user actually gave.
pub fn absolutize(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Resolve a symlink target read from `link`.
///
/// Relative targets are relative to the directory containing the link,
/// never to the process working directory.
pub fn resolve_link_target(link: &Path, target: &Path) -> PathBuf {
    if target.is_absolute() {
        target.to_path_buf()
    } else {
        link.parent()
            .map(|dir| dir.join(target))
            .unwrap_or_else(|| target.to_path_buf())
    }
}
