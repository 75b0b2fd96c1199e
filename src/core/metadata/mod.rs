//! core::metadata
//!
//! Role metadata schema and lookup.
//!
//! # Modules
//!
//! - [`schema`] - Decoded form of a role's `meta/main.yml`
//! - [`store`] - Filesystem-backed lookup
//!
//! # Lookup Contract
//!
//! A [`MetadataSource`] answers "what does this role depend on?":
//!
//! - `Ok(Some(meta))` - the metadata resource exists and decoded
//! - `Ok(None)` - the role has no metadata resource (zero dependencies)
//! - `Err(_)` - the resource exists but could not be read or decoded
//!
//! The resolver treats the error case as zero dependencies for that role
//! only and keeps going.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use roledep::core::metadata::{parse_metadata, MetadataSource};
//! use roledep::core::types::RoleName;
//!
//! let app = RoleName::new("app").unwrap();
//! let mut source = HashMap::new();
//! source.insert(app.clone(), parse_metadata("dependencies:\n  - role: common\n").unwrap());
//!
//! assert!(source.lookup(&app).unwrap().is_some());
//! assert!(source.lookup(&RoleName::new("common").unwrap()).unwrap().is_none());
//! ```

pub mod schema;
pub mod store;

pub use schema::{parse_metadata, RoleMetadata};
pub use store::FsMetadataSource;

use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;

use super::types::RoleName;

/// Errors from reading a role's metadata resource.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("failed to read metadata file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse metadata file '{path}': {message}")]
    Parse { path: PathBuf, message: String },
}

/// Lookup of a role's declared dependencies.
pub trait MetadataSource {
    /// Look up the metadata for `role`. `Ok(None)` means the role has none.
    fn lookup(&self, role: &RoleName) -> Result<Option<RoleMetadata>, MetadataError>;
}

impl MetadataSource for HashMap<RoleName, RoleMetadata> {
    fn lookup(&self, role: &RoleName) -> Result<Option<RoleMetadata>, MetadataError> {
        Ok(self.get(role).cloned())
    }
}

impl<T: MetadataSource + ?Sized> MetadataSource for &T {
    fn lookup(&self, role: &RoleName) -> Result<Option<RoleMetadata>, MetadataError> {
        (**self).lookup(role)
    }
}
