//! core::discovery
//!
//! Role discovery in the roles directory.
//!
//! # Classification
//!
//! Every entry is inspected without following symlinks:
//!
//! | entry                                | kind               | role? |
//! |--------------------------------------|--------------------|-------|
//! | directory                            | `Directory`        | yes   |
//! | symlink, target is a directory       | `Symlink`          | yes   |
//! | symlink, target cannot be stat'ed    | `BrokenSymlink`    | no    |
//! | symlink, target is not a directory   | `InvalidSymlink`   | no    |
//! | anything else                        | `Other`            | no    |
//! | lstat failed                         | `Unreadable`       | no    |
//!
//! A symlinked role is listed under the symlink's own name, never under
//! the name of whatever it points at. Relative link targets are resolved
//! against the roles directory, not the process working directory.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::diag::Diagnostics;
use super::paths::{absolutize, resolve_link_target};
use super::types::RoleName;

/// Errors from scanning the roles directory. All of them are fatal.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("failed to resolve roles path '{path}': {source}")]
    ResolvePath {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to access roles directory '{path}': {source}")]
    Access {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("roles path '{path}' is not a directory")]
    NotADirectory { path: PathBuf },

    #[error("failed to read roles directory '{path}': {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// What a roles-directory entry turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    Symlink { target: PathBuf },
    BrokenSymlink { target: Option<PathBuf> },
    InvalidSymlink { target: PathBuf },
    Other,
    Unreadable { error: String },
}

impl EntryKind {
    /// Whether an entry of this kind counts as an available role.
    pub fn is_role(&self) -> bool {
        matches!(self, EntryKind::Directory | EntryKind::Symlink { .. })
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::Directory => write!(f, "directory"),
            EntryKind::Symlink { target } => write!(f, "symlink -> {}", target.display()),
            EntryKind::BrokenSymlink { target: Some(target) } => {
                write!(f, "broken symlink -> {}", target.display())
            }
            EntryKind::BrokenSymlink { target: None } => write!(f, "broken symlink"),
            EntryKind::InvalidSymlink { target } => {
                write!(f, "symlink -> {} (not a directory)", target.display())
            }
            EntryKind::Other => write!(f, "not a directory"),
            EntryKind::Unreadable { error } => write!(f, "error reading info: {}", error),
        }
    }
}

/// A classified entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub kind: EntryKind,
}

/// Result of scanning a roles directory.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    /// Absolute path that was scanned.
    pub roles_dir: PathBuf,
    /// Every entry with its classification, sorted by name.
    pub entries: Vec<Entry>,
    available: HashSet<RoleName>,
}

impl Discovery {
    /// Whether `role` is available.
    pub fn contains(&self, role: &RoleName) -> bool {
        self.available.contains(role)
    }

    /// The available role set.
    pub fn available(&self) -> &HashSet<RoleName> {
        &self.available
    }

    /// Available roles in ascending order.
    pub fn sorted(&self) -> Vec<RoleName> {
        let mut roles: Vec<RoleName> = self.available.iter().cloned().collect();
        roles.sort();
        roles
    }
}

/// Scan `roles_dir` and classify its entries.
///
/// # Errors
///
/// Fails only when the directory itself is missing, is not a directory,
/// or cannot be listed. Problems with individual entries just exclude them.
pub fn discover(roles_dir: &Path, diag: &dyn Diagnostics) -> Result<Discovery, DiscoveryError> {
    let abs_path = absolutize(roles_dir).map_err(|e| DiscoveryError::ResolvePath {
        path: roles_dir.to_path_buf(),
        source: e,
    })?;
    diag.trace(&format!("Scanning roles directory: {}", abs_path.display()));

    let meta = fs::metadata(&abs_path).map_err(|e| DiscoveryError::Access {
        path: abs_path.clone(),
        source: e,
    })?;
    if !meta.is_dir() {
        return Err(DiscoveryError::NotADirectory { path: abs_path });
    }

    let read_dir_error = |e| DiscoveryError::ReadDir {
        path: abs_path.clone(),
        source: e,
    };
    // Classify through the entry's own path; the lossy name is for display.
    let mut listed = Vec::new();
    for dir_entry in fs::read_dir(&abs_path).map_err(read_dir_error)? {
        let dir_entry = dir_entry.map_err(read_dir_error)?;
        let name = dir_entry.file_name().to_string_lossy().into_owned();
        listed.push((name, dir_entry.path()));
    }
    listed.sort();
    diag.trace(&format!("Found {} entries in roles directory", listed.len()));

    let mut entries = Vec::with_capacity(listed.len());
    let mut available = HashSet::new();
    for (name, path) in listed {
        let kind = classify(&path);
        match &kind {
            EntryKind::Directory => diag.trace(&format!("Found role (directory): {}", name)),
            EntryKind::Symlink { target } => diag.trace(&format!(
                "Found role (symlink): {} -> {}",
                name,
                target.display()
            )),
            EntryKind::BrokenSymlink { .. } => {
                diag.trace(&format!("Found broken symlink: {}", name))
            }
            EntryKind::InvalidSymlink { target } => diag.trace(&format!(
                "Symlink {} points to {} which is not a directory",
                name,
                target.display()
            )),
            EntryKind::Other => {}
            EntryKind::Unreadable { error } => {
                diag.warn(&format!("error reading entry {}: {}", name, error))
            }
        }

        if kind.is_role() {
            if let Ok(role) = RoleName::new(name.as_str()) {
                available.insert(role);
            }
        }
        entries.push(Entry { name, kind });
    }

    if available.is_empty() {
        diag.warn(&format!("no roles found in directory {}", abs_path.display()));
        diag.trace("Directory contents:");
        for entry in &entries {
            diag.trace(&format!("- {} ({})", entry.name, entry.kind));
        }
    }

    diag.trace(&format!("Found {} roles in directory", available.len()));
    Ok(Discovery {
        roles_dir: abs_path,
        entries,
        available,
    })
}

/// Classify one entry without following it if it is a symlink.
pub fn classify(path: &Path) -> EntryKind {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) => {
            return EntryKind::Unreadable {
                error: e.to_string(),
            }
        }
    };

    let file_type = meta.file_type();
    if file_type.is_dir() {
        return EntryKind::Directory;
    }
    if !file_type.is_symlink() {
        return EntryKind::Other;
    }

    let target = match fs::read_link(path) {
        Ok(target) => resolve_link_target(path, &target),
        Err(_) => return EntryKind::BrokenSymlink { target: None },
    };
    match fs::metadata(&target) {
        Ok(meta) if meta.is_dir() => EntryKind::Symlink { target },
        Ok(_) => EntryKind::InvalidSymlink { target },
        Err(_) => EntryKind::BrokenSymlink {
            target: Some(target),
        },
    }
}
