//! core::metadata::schema
//!
//! Decoded role metadata.
//!
//! Only the `dependencies` key matters here. Everything else in a role's
//! metadata (`galaxy_info`, `allow_duplicates`, ...) is ignored:
//!
//! ```yaml
//! galaxy_info:
//!   author: ops
//! dependencies:
//!   - role: common
//!   - role: firewall
//!     vars:
//!       open_ports: [80, 443]
//! ```

use serde::{Deserialize, Deserializer};

use crate::core::playbook::RoleRef;

/// Direct dependencies declared by one role, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RoleMetadata {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dependencies: Vec<RoleRef>,
}

impl RoleMetadata {
    /// Metadata with the given dependency entries.
    pub fn new(dependencies: Vec<RoleRef>) -> Self {
        Self { dependencies }
    }

    /// Metadata whose dependencies are the plain role names given.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            names
                .into_iter()
                .map(|name| RoleRef::Plain(name.into()))
                .collect(),
        )
    }
}

/// Decode metadata text.
///
/// An empty document, a `null` document, or a missing/null `dependencies`
/// key all mean zero dependencies.
pub fn parse_metadata(contents: &str) -> Result<RoleMetadata, serde_yaml::Error> {
    let meta: Option<RoleMetadata> = serde_yaml::from_str(contents)?;
    Ok(meta.unwrap_or_default())
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<RoleRef>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<RoleRef>>::deserialize(deserializer)?.unwrap_or_default())
}
