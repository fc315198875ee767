//! File-backed persistence for the active mapping table.
//!
//! The repository is a small key-value store: one JSON document per key in a
//! base directory. The mapping lives under the fixed key
//! [`MAPPING_KEY`], i.e. `<base_dir>/division_mapping.json`.
//!
//! # Storage Format
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "saved_at": "2026-01-01T00:00:00+00:00",
//!   "mapping": { "North": ["A", "B"] }
//! }
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tally_model::MappingTable;

use crate::error::{MapError, Result};

/// Key the mapping document is stored under.
pub const MAPPING_KEY: &str = "division_mapping";

/// A mapping table together with repository metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMapping {
    #[serde(default = "default_version")]
    pub version: String,
    pub saved_at: Option<String>,
    pub mapping: MappingTable,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl StoredMapping {
    pub fn new(mapping: MappingTable) -> Self {
        Self {
            version: default_version(),
            saved_at: Some(chrono::Utc::now().to_rfc3339()),
            mapping,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MappingRepository {
    base_dir: PathBuf,
}

impl MappingRepository {
    /// Opens a repository rooted at `base_dir`, creating the directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).map_err(|source| MapError::Io {
            operation: "create directory",
            path: base_dir.clone(),
            source,
        })?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of the stored mapping document.
    pub fn mapping_path(&self) -> PathBuf {
        self.base_dir.join(format!("{MAPPING_KEY}.json"))
    }

    /// Writes `mapping`, replacing any stored document.
    ///
    /// Writes to a temp file and renames it into place.
    pub fn save(&self, mapping: &MappingTable) -> Result<PathBuf> {
        let stored = StoredMapping::new(mapping.clone());
        let json = serde_json::to_string_pretty(&stored).map_err(MapError::Serialize)?;
        let path = self.mapping_path();
        let temp_path = path.with_extension("json.tmp");

        let mut file = File::create(&temp_path).map_err(|source| MapError::Io {
            operation: "create",
            path: temp_path.clone(),
            source,
        })?;
        let written = file
            .write_all(json.as_bytes())
            .map_err(|source| (source, "write"))
            .and_then(|()| file.sync_all().map_err(|source| (source, "sync")));
        drop(file);
        if let Err((source, operation)) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(MapError::Io {
                operation,
                path: temp_path,
                source,
            });
        }

        fs::rename(&temp_path, &path).map_err(|source| {
            let _ = fs::remove_file(&temp_path);
            MapError::AtomicWriteFailed {
                temp_path: temp_path.clone(),
                target_path: path.clone(),
                source,
            }
        })?;

        tracing::info!(
            path = %path.display(),
            divisions = mapping.len(),
            "saved division mapping"
        );
        Ok(path)
    }

    /// Loads the stored document. Returns `None` if nothing was saved yet.
    pub fn load(&self) -> Result<Option<StoredMapping>> {
        let path = self.mapping_path();
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path).map_err(|source| MapError::Io {
            operation: "read",
            path: path.clone(),
            source,
        })?;
        let stored: StoredMapping = serde_json::from_str(&contents)
            .map_err(|err| MapError::invalid(format!("{}: {err}", path.display())))?;
        Ok(Some(stored))
    }

    /// Removes the stored document. Missing documents are not an error.
    pub fn clear(&self) -> Result<bool> {
        let path = self.mapping_path();
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).map_err(|source| MapError::Io {
            operation: "remove",
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "removed stored division mapping");
        Ok(true)
    }
}
