//! core::playbook
//!
//! Playbook decoding and top-level role extraction.
//!
//! # Shapes
//!
//! A playbook is a YAML sequence of plays. Each play may carry a `roles`
//! list whose items are either a bare role name or a mapping with a `role`
//! key:
//!
//! ```yaml
//! - hosts: web
//!   roles:
//!     - common
//!     - role: nginx
//!       vars:
//!         port: 8080
//! ```
//!
//! Item shapes are modelled by [`RoleRef`]. An item that is neither shape,
//! or a mapping without a usable `role` value, is reported and skipped; it
//! never fails the run.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use serde_yaml::{Mapping, Value};
use thiserror::Error;

use super::diag::Diagnostics;
use super::paths::absolutize;
use super::types::{format_roles, RoleName};

/// Errors from reading a playbook. All of them are fatal for a run.
#[derive(Debug, Error)]
pub enum PlaybookError {
    #[error("failed to resolve playbook path '{path}': {source}")]
    ResolvePath {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to access playbook file '{path}': {source}")]
    Access {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("playbook path '{path}' is a directory, not a file")]
    IsDirectory { path: PathBuf },

    #[error("failed to read playbook file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse playbook YAML '{path}': {message}")]
    Parse { path: PathBuf, message: String },
}

/// A reference to a role as written in a playbook or a metadata file.
///
/// Entries are decoded as plain YAML values and then classified, so tags
/// such as `!vault` anywhere inside an entry never fail decoding. A tag on
/// the entry itself is dropped before classifying.
#[derive(Debug, Clone, PartialEq)]
pub enum RoleRef {
    /// `- common`
    Plain(String),
    /// `- role: nginx` plus any other keys, which are ignored.
    Structured(Mapping),
    /// Anything else (numbers, nested lists, ...).
    Unrecognized(Value),
}

impl RoleRef {
    /// Classify a decoded entry.
    pub fn from_value(value: Value) -> Self {
        match untag(value) {
            Value::String(name) => RoleRef::Plain(name),
            Value::Mapping(fields) => RoleRef::Structured(fields),
            other => RoleRef::Unrecognized(other),
        }
    }

    /// The referenced role, if this entry names one.
    ///
    /// A structured entry names a role only when its `role` value is a
    /// non-empty string.
    pub fn name(&self) -> Option<RoleName> {
        let raw = match self {
            RoleRef::Plain(name) => name.as_str(),
            RoleRef::Structured(fields) => untag_ref(fields.get("role")?).as_str()?,
            RoleRef::Unrecognized(_) => return None,
        };
        RoleName::new(raw).ok()
    }

    /// Short description of the entry's shape for diagnostics.
    pub fn shape(&self) -> &'static str {
        match self {
            RoleRef::Plain(_) => "string",
            RoleRef::Structured(_) => "map",
            RoleRef::Unrecognized(value) => value_kind(value),
        }
    }
}

impl<'de> Deserialize<'de> for RoleRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(RoleRef::from_value)
    }
}

/// The `roles` value of a play.
#[derive(Debug, Clone, PartialEq)]
pub enum RolesSection {
    List(Vec<RoleRef>),
    /// Present but not a list.
    Other(Value),
}

impl<'de> Deserialize<'de> for RolesSection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match untag(Value::deserialize(deserializer)?) {
            Value::Sequence(items) => {
                RolesSection::List(items.into_iter().map(RoleRef::from_value).collect())
            }
            other => RolesSection::Other(other),
        })
    }
}

/// A single play. Keys other than `roles` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Play {
    #[serde(default)]
    pub roles: Option<RolesSection>,
}

/// Decode playbook text into plays.
///
/// An empty document decodes to zero plays.
pub fn parse_playbook(contents: &str) -> Result<Vec<Play>, serde_yaml::Error> {
    let plays: Option<Vec<Play>> = serde_yaml::from_str(contents)?;
    Ok(plays.unwrap_or_default())
}

/// Read and decode the playbook at `path`.
///
/// # Errors
///
/// Fails if the path cannot be resolved or accessed, is a directory,
/// cannot be read, or does not decode as a list of plays.
pub fn load_playbook(path: &Path, diag: &dyn Diagnostics) -> Result<Vec<Play>, PlaybookError> {
    let abs_path = absolutize(path).map_err(|e| PlaybookError::ResolvePath {
        path: path.to_path_buf(),
        source: e,
    })?;
    diag.trace(&format!("Reading playbook: {}", abs_path.display()));

    let meta = fs::metadata(&abs_path).map_err(|e| PlaybookError::Access {
        path: abs_path.clone(),
        source: e,
    })?;
    if meta.is_dir() {
        return Err(PlaybookError::IsDirectory { path: abs_path });
    }

    let contents = fs::read_to_string(&abs_path).map_err(|e| PlaybookError::Read {
        path: abs_path.clone(),
        source: e,
    })?;

    let plays = parse_playbook(&contents).map_err(|e| PlaybookError::Parse {
        path: abs_path.clone(),
        message: e.to_string(),
    })?;
    diag.trace(&format!("Found {} plays in playbook", plays.len()));

    Ok(plays)
}

/// Extract the top-level role references from `plays`, in order.
///
/// Duplicates are kept; the resolver collapses them.
pub fn extract_roles(plays: &[Play], diag: &dyn Diagnostics) -> Vec<RoleName> {
    let mut roles = Vec::new();

    for (i, play) in plays.iter().enumerate() {
        let number = i + 1;
        diag.trace(&format!("Processing play {}", number));

        let entries = match &play.roles {
            None => continue,
            Some(RolesSection::List(entries)) => entries,
            Some(RolesSection::Other(_)) => {
                diag.warn(&format!(
                    "roles section has unexpected format in play {}",
                    number
                ));
                continue;
            }
        };

        for entry in entries {
            match entry.name() {
                Some(name) => {
                    diag.trace(&format!("Found role ({}): {}", entry.shape(), name));
                    roles.push(name);
                }
                None => diag.warn(&format!(
                    "unknown role format in play {}: {}",
                    number,
                    entry.shape()
                )),
            }
        }
    }

    diag.trace(&format!(
        "Extracted {} roles from playbook: {}",
        roles.len(),
        format_roles(&roles)
    ));
    roles
}

/// Deduplicate `roles`, keeping the first occurrence of each.
pub fn unique_in_order(roles: &[RoleName]) -> Vec<RoleName> {
    let mut seen = std::collections::HashSet::new();
    roles
        .iter()
        .filter(|r| seen.insert(r.as_str()))
        .cloned()
        .collect()
}

fn untag(value: Value) -> Value {
    match value {
        Value::Tagged(tagged) => untag(tagged.value),
        other => other,
    }
}

fn untag_ref(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untag_ref(&tagged.value),
        other => other,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "map",
        Value::Tagged(_) => "tagged value",
    }
}
