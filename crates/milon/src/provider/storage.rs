//! Partitioned word-collection stores.
//!
//! A partition is a named, isolated namespace; operations on one partition
//! never affect another. Loading a partition that was never saved (or was
//! cleared) yields an empty collection.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::{MilonError, Result};
use crate::word::WordCollection;

/// Trait for word-collection persistence providers.
pub trait WordStore: Send + Sync {
    /// Persist a collection under a partition, replacing what was there.
    fn save(&self, partition: &str, collection: &WordCollection) -> Result<()>;

    /// Load the collection stored under a partition; empty if absent.
    fn load(&self, partition: &str) -> Result<WordCollection>;

    /// Remove a partition's stored collection.
    fn clear(&self, partition: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// File-backed store
// ---------------------------------------------------------------------------

/// File-backed store: one `<partition>.json` per partition under a root.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn partition_path(&self, partition: &str) -> Result<PathBuf> {
        // Partition names become file names; path separators would escape
        // the root.
        if partition.is_empty() || partition.contains(['/', '\\']) {
            return Err(MilonError::Validation(format!(
                "invalid partition name '{}'",
                partition
            )));
        }
        Ok(self.root.join(format!("{}.json", partition)))
    }
}

impl WordStore for FileStore {
    fn save(&self, partition: &str, collection: &WordCollection) -> Result<()> {
        collection.save(self.partition_path(partition)?)
    }

    fn load(&self, partition: &str) -> Result<WordCollection> {
        let path = self.partition_path(partition)?;
        if !path.exists() {
            return Ok(WordCollection::new());
        }
        WordCollection::load(path)
    }

    fn clear(&self, partition: &str) -> Result<()> {
        let path = self.partition_path(partition)?;
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                MilonError::Persistence(format!(
                    "Failed to clear partition '{}': {}",
                    partition, e
                ))
            })?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    partitions: Mutex<HashMap<String, WordCollection>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WordStore for MemoryStore {
    fn save(&self, partition: &str, collection: &WordCollection) -> Result<()> {
        self.partitions
            .lock()
            .expect("store lock poisoned")
            .insert(partition.to_string(), collection.clone());
        Ok(())
    }

    fn load(&self, partition: &str) -> Result<WordCollection> {
        Ok(self
            .partitions
            .lock()
            .expect("store lock poisoned")
            .get(partition)
            .cloned()
            .unwrap_or_default())
    }

    fn clear(&self, partition: &str) -> Result<()> {
        self.partitions
            .lock()
            .expect("store lock poisoned")
            .remove(partition);
        Ok(())
    }
}
