//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`RoleName`] - Identifier of a role (its directory name in the roles repository)
//!
//! # Validation
//!
//! A role name is otherwise opaque: the only rule enforced at construction
//! is that it is not empty. Anything else (dots for collection-style names,
//! dashes, underscores) is passed through untouched so that a name read from
//! a playbook compares equal to the directory entry it refers to.
//!
//! # Examples
//!
//! ```
//! use roledep::core::types::RoleName;
//!
//! let role = RoleName::new("geerlingguy.java").unwrap();
//! assert_eq!(role.as_str(), "geerlingguy.java");
//!
//! assert!(RoleName::new("").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid role name: {0}")]
    InvalidRoleName(String),
}

/// A role identifier.
///
/// Ordering is lexical on the underlying string, which is what every
/// externally visible listing is sorted by.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoleName(String);

impl RoleName {
    /// Create a new role name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidRoleName` if the name is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        if name.is_empty() {
            return Err(TypeError::InvalidRoleName(
                "role name cannot be empty".into(),
            ));
        }
        Ok(Self(name))
    }

    /// Get the role name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RoleName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<RoleName> for String {
    fn from(name: RoleName) -> Self {
        name.0
    }
}

impl AsRef<str> for RoleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for RoleName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Format a list of role names as `[a, b, c]` for trace output.
pub fn format_roles<'a>(roles: impl IntoIterator<Item = &'a RoleName>) -> String {
    let names: Vec<&str> = roles.into_iter().map(RoleName::as_str).collect();
    format!("[{}]", names.join(", "))
}
