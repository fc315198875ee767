//! The active mapping table and its replacement lifecycle.

use std::sync::Arc;

use tally_model::MappingTable;
use tracing::{info, warn};

use crate::error::Result;
use crate::parse::{default_mapping, parse_mapping_text};
use crate::repository::MappingRepository;

/// Where the active table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingSource {
    Default,
    Stored,
    User,
}

/// Holds the active mapping table.
///
/// Replacement is all-or-nothing: new text is parsed completely before the
/// active table is swapped, so a rejected update leaves the previous table
/// in place. Readers take a [`snapshot`](Self::snapshot) before a run and are
/// unaffected by later replacements.
#[derive(Debug, Clone)]
pub struct MappingStore {
    active: Arc<MappingTable>,
    source: MappingSource,
    repository: Option<MappingRepository>,
}

impl MappingStore {
    /// In-memory store starting from `table`.
    pub fn new(table: MappingTable) -> Self {
        Self {
            active: Arc::new(table),
            source: MappingSource::User,
            repository: None,
        }
    }

    /// In-memory store starting from the bundled default table.
    pub fn with_default() -> Self {
        Self {
            active: Arc::new(default_mapping()),
            source: MappingSource::Default,
            repository: None,
        }
    }

    /// Store backed by `repository`.
    ///
    /// Starts from the persisted table when one exists. A persisted document
    /// that cannot be read is reported and the default table is used instead.
    pub fn open(repository: MappingRepository) -> Self {
        let (active, source) = match repository.load() {
            Ok(Some(stored)) => (stored.mapping, MappingSource::Stored),
            Ok(None) => (default_mapping(), MappingSource::Default),
            Err(error) => {
                warn!(%error, "ignoring unreadable stored mapping, using default");
                (default_mapping(), MappingSource::Default)
            }
        };
        info!(
            divisions = active.len(),
            source = ?source,
            "loaded division mapping"
        );
        Self {
            active: Arc::new(active),
            source,
            repository: Some(repository),
        }
    }

    pub fn active(&self) -> &MappingTable {
        &self.active
    }

    /// Cheap handle to the current table, immune to later replacement.
    pub fn snapshot(&self) -> Arc<MappingTable> {
        Arc::clone(&self.active)
    }

    pub fn source(&self) -> MappingSource {
        self.source
    }

    pub fn repository(&self) -> Option<&MappingRepository> {
        self.repository.as_ref()
    }

    /// Parses `text` and, if valid, makes it the active table.
    pub fn replace_from_text(&mut self, text: &str) -> Result<()> {
        let table = parse_mapping_text(text)?;
        self.replace(table)
    }

    /// Makes `table` the active table, persisting it when backed by a
    /// repository.
    pub fn replace(&mut self, table: MappingTable) -> Result<()> {
        if let Some(repository) = &self.repository {
            repository.save(&table)?;
        }
        info!(divisions = table.len(), "replaced division mapping");
        self.active = Arc::new(table);
        self.source = MappingSource::User;
        Ok(())
    }

    /// Restores the bundled default and forgets any persisted table.
    pub fn reset(&mut self) -> Result<()> {
        if let Some(repository) = &self.repository {
            repository.clear()?;
        }
        self.active = Arc::new(default_mapping());
        self.source = MappingSource::Default;
        Ok(())
    }
}

impl Default for MappingStore {
    fn default() -> Self {
        Self::with_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_text_keeps_previous_table() {
        let mut store = MappingStore::new(
            MappingTable::from_pairs([("North", vec!["A"])]).unwrap(),
        );
        let before = store.snapshot();
        let err = store.replace_from_text("[1, 2, 3]").unwrap_err();
        assert!(err.is_invalid_format());
        assert_eq!(store.active(), before.as_ref());
    }

    #[test]
    fn snapshot_survives_replacement() {
        let mut store = MappingStore::with_default();
        assert_eq!(store.source(), MappingSource::Default);
        let snapshot = store.snapshot();
        store.replace_from_text(r#"{"Solo": ["X"]}"#).unwrap();
        assert_eq!(store.source(), MappingSource::User);
        assert_eq!(store.active().len(), 1);
        assert_eq!(snapshot.as_ref(), &default_mapping());
    }

    #[test]
    fn repository_backed_store_persists_and_resets() {
        let dir = tempfile::tempdir().unwrap();
        let repository = MappingRepository::new(dir.path()).unwrap();

        let mut store = MappingStore::open(repository.clone());
        assert_eq!(store.source(), MappingSource::Default);
        store.replace_from_text(r#"{"Solo": ["X"]}"#).unwrap();

        let reopened = MappingStore::open(repository.clone());
        assert_eq!(reopened.source(), MappingSource::Stored);
        assert_eq!(reopened.active().get("Solo"), Some(&["X".to_string()][..]));

        store.reset().unwrap();
        assert!(repository.load().unwrap().is_none());
        assert_eq!(store.active(), &default_mapping());
    }

    #[test]
    fn unreadable_stored_mapping_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let repository = MappingRepository::new(dir.path()).unwrap();
        std::fs::write(repository.mapping_path(), "garbage").unwrap();
        let store = MappingStore::open(repository);
        assert_eq!(store.source(), MappingSource::Default);
        assert_eq!(store.active(), &default_mapping());
    }
}
