//! core::metadata::store
//!
//! Filesystem-backed metadata lookup.
//!
//! Each role's metadata lives at one of the configured candidate paths under
//! its directory (see [`RolePaths::metadata_candidates`]). The first
//! candidate that exists wins. If none exists the role simply has no
//! metadata. Any other I/O failure, such as a candidate that is a directory
//! or is unreadable, is an error.

use std::fs;
use std::io::ErrorKind;

use super::schema::{parse_metadata, RoleMetadata};
use super::{MetadataError, MetadataSource};
use crate::core::paths::RolePaths;
use crate::core::types::RoleName;

/// Reads role metadata from the roles directory.
#[derive(Debug, Clone)]
pub struct FsMetadataSource {
    paths: RolePaths,
}

impl FsMetadataSource {
    /// Create a source reading under `paths`.
    pub fn new(paths: RolePaths) -> Self {
        Self { paths }
    }
}

impl MetadataSource for FsMetadataSource {
    fn lookup(&self, role: &RoleName) -> Result<Option<RoleMetadata>, MetadataError> {
        for path in self.paths.metadata_candidates(role) {
            let contents = match fs::read_to_string(&path) {
                Ok(contents) => contents,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(MetadataError::Read { path, source: e }),
            };

            let meta = parse_metadata(&contents).map_err(|e| MetadataError::Parse {
                path: path.clone(),
                message: e.to_string(),
            })?;
            return Ok(Some(meta));
        }

        Ok(None)
    }
}
