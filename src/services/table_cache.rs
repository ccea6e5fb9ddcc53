use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::SystemTime;

use crate::error::LoadError;
use crate::services::radiation_table::RadiationTable;

/// What a cached table was built from. A source whose length or modification time
/// changed no longer matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSignature {
    pub len: u64,
    pub modified: Option<SystemTime>,
}

impl SourceSignature {
    pub fn of(path: &Path) -> Result<Self, LoadError> {
        let meta = fs::metadata(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound { path: path.to_path_buf() },
            _ => LoadError::Unreadable { path: path.to_path_buf(), source: e },
        })?;
        Ok(Self {
            len: meta.len(),
            modified: meta.modified().ok(),
        })
    }
}

#[derive(Debug)]
struct CacheEntry {
    signature: SourceSignature,
    table: Arc<RadiationTable>,
}

/// Whether [`TableCache::get_or_load`] had to read the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    Hit,
    Loaded,
}

/// Loaded radiation tables keyed by source path. Tables are shared read-only
/// through `Arc`; the lock only guards the map.
#[derive(Debug, Default)]
pub struct TableCache {
    entries: RwLock<HashMap<PathBuf, CacheEntry>>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(path: &Path) -> PathBuf {
        std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
    }

    pub fn get_or_load(&self, path: impl AsRef<Path>) -> Result<Arc<RadiationTable>, LoadError> {
        self.get_or_load_with_outcome(path).map(|(table, _)| table)
    }

    /// Returns the cached table when the source signature is unchanged, otherwise
    /// reloads it and replaces the entry. A failed load evicts any stale entry.
    pub fn get_or_load_with_outcome(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<(Arc<RadiationTable>, CacheOutcome), LoadError> {
        let path = path.as_ref();
        let key = Self::key(path);

        let signature = match SourceSignature::of(path) {
            Ok(sig) => sig,
            Err(e) => {
                self.invalidate(path);
                return Err(e);
            }
        };

        if let Ok(map) = self.entries.read() {
            if let Some(entry) = map.get(&key) {
                if entry.signature == signature {
                    return Ok((Arc::clone(&entry.table), CacheOutcome::Hit));
                }
            }
        }

        let table = match RadiationTable::load(path) {
            Ok(t) => Arc::new(t),
            Err(e) => {
                self.invalidate(path);
                return Err(e);
            }
        };

        if let Ok(mut map) = self.entries.write() {
            map.insert(key, CacheEntry { signature, table: Arc::clone(&table) });
        }
        Ok((table, CacheOutcome::Loaded))
    }

    /// Drops the entry for `path`. Returns whether one existed.
    pub fn invalidate(&self, path: impl AsRef<Path>) -> bool {
        let key = Self::key(path.as_ref());
        match self.entries.write() {
            Ok(mut map) => map.remove(&key).is_some(),
            Err(_) => false,
        }
    }

    pub fn clear(&self) {
        if let Ok(mut map) = self.entries.write() {
            map.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
