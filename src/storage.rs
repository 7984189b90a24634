use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::types::PlantRecord;

/// Durable store for the user's plant collection, kept as a single JSON
/// array that is rewritten in full on every change.
///
/// Clones share one write guard, so read-modify-write cycles issued through
/// any clone never interleave.
#[derive(Clone, Debug)]
pub struct PlantStore {
    storage_path: PathBuf,
    guard: Arc<Mutex<()>>,
}

impl PlantStore {
    pub fn new(config: &StoreConfig) -> Self {
        Self::with_path(config.plants_path())
    }

    pub fn with_path(storage_path: impl Into<PathBuf>) -> Self {
        Self {
            storage_path: storage_path.into(),
            guard: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    /// All stored plants. A missing or unreadable document reads as an
    /// empty collection.
    pub fn load_all(&self) -> Vec<PlantRecord> {
        let _lock = self.lock();
        match read_document(&self.storage_path) {
            Ok(plants) => plants.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(path = %self.storage_path.display(), error = %e, "plant document unreadable, treating as empty");
                Vec::new()
            }
        }
    }

    /// Like [`load_all`](Self::load_all) but reports a malformed document
    /// instead of hiding it. A missing file is still an empty collection.
    pub fn try_load_all(&self) -> StoreResult<Vec<PlantRecord>> {
        let _lock = self.lock();
        Ok(read_document(&self.storage_path)?.unwrap_or_default())
    }

    pub fn get(&self, id: &str) -> Option<PlantRecord> {
        self.load_all().into_iter().find(|p| p.id == id)
    }

    /// Plants whose name contains `query`, ignoring case. An empty query
    /// matches everything.
    pub fn search(&self, query: &str) -> Vec<PlantRecord> {
        let plants = self.load_all();
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return plants;
        }
        plants
            .into_iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Replaces the plant with the same id, or appends it.
    pub fn save(&self, record: &PlantRecord) -> StoreResult<()> {
        let _lock = self.lock();
        let mut plants = self.read_for_update()?;
        match plants.iter_mut().find(|p| p.id == record.id) {
            Some(existing) => {
                *existing = record.clone();
                tracing::debug!(id = %record.id, "replacing plant");
            }
            None => {
                plants.push(record.clone());
                tracing::debug!(id = %record.id, "adding plant");
            }
        }
        write_document(&self.storage_path, &plants)
    }

    /// Removes the plant with the same id. Absent plants are ignored.
    pub fn delete(&self, record: &PlantRecord) -> StoreResult<()> {
        let _lock = self.lock();
        let mut plants = self.read_for_update()?;
        let before = plants.len();
        plants.retain(|p| p.id != record.id);
        if plants.len() == before {
            tracing::debug!(id = %record.id, "delete of unknown plant ignored");
            return Ok(());
        }
        write_document(&self.storage_path, &plants)
    }

    pub fn mark_watered(&self, id: &str, at: DateTime<Utc>) -> StoreResult<PlantRecord> {
        let _lock = self.lock();
        let mut plants = self.read_for_update()?;
        let updated = {
            let plant = plants
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or(StoreError::NotFound(id.to_string()))?;
            plant.last_watered_date = Some(at);
            plant.clone()
        };
        write_document(&self.storage_path, &plants)?;
        Ok(updated)
    }

    /// Runs [`save`](Self::save) on the blocking pool.
    pub async fn save_async(&self, record: PlantRecord) -> StoreResult<()> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.save(&record))
            .await
            .map_err(|e| StoreError::Background(e.to_string()))?
    }

    /// Runs [`delete`](Self::delete) on the blocking pool.
    pub async fn delete_async(&self, record: PlantRecord) -> StoreResult<()> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.delete(&record))
            .await
            .map_err(|e| StoreError::Background(e.to_string()))?
    }

    // A malformed document is treated as empty, as in `load_all`, and gets
    // replaced by the next write.
    fn read_for_update(&self) -> StoreResult<Vec<PlantRecord>> {
        match read_document(&self.storage_path) {
            Ok(plants) => Ok(plants.unwrap_or_default()),
            Err(StoreError::Decode { path, source }) => {
                tracing::warn!(path = %path.display(), error = %source, "overwriting malformed plant document");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.guard.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Reads a JSON document. `Ok(None)` means the file does not exist or is
/// empty.
pub(crate) fn read_document<T: DeserializeOwned>(path: &Path) -> StoreResult<Option<T>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    if contents.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|source| StoreError::Decode {
            path: path.to_path_buf(),
            source,
        })
}

/// Persist a document using a temporary file and an atomic rename to avoid
/// partial writes.
pub(crate) fn write_document<T: Serialize + ?Sized>(path: &Path, data: &T) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp = path.with_extension("tmp");
    let mut f = File::create(&temp)?;
    let content = serde_json::to_string_pretty(data)?;
    f.write_all(content.as_bytes())?;
    f.sync_all()?;
    fs::rename(temp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::FlowerKind;
    use crate::types::FlowerTemplate;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn test_store() -> (PlantStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = PlantStore::new(&StoreConfig::new(temp_dir.path()));
        (store, temp_dir)
    }

    fn plant(name: &str) -> PlantRecord {
        let planted = Utc.with_ymd_and_hms(2026, 4, 12, 8, 30, 0).unwrap();
        PlantRecord::new(
            name,
            FlowerTemplate::new(1, "Greenhouse A", Some(FlowerKind::Rose)),
            planted,
            "30 cm",
            Some("terracotta".to_string()),
        )
    }

    #[test]
    fn test_load_missing_document() {
        let (store, _temp) = test_store();
        assert!(store.load_all().is_empty());
        assert!(store.try_load_all().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let (store, _temp) = test_store();
        let rose = plant("Rosie");
        store.save(&rose).unwrap();

        let loaded = store.load_all();
        assert_eq!(loaded, vec![rose]);
    }

    #[test]
    fn test_save_replaces_same_id() {
        let (store, _temp) = test_store();
        let mut rose = plant("Rosie");
        store.save(&rose).unwrap();
        rose.size = "45 cm".to_string();
        store.save(&rose).unwrap();

        let loaded = store.load_all();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].size, "45 cm");
    }

    #[test]
    fn test_delete_twice_is_noop() {
        let (store, _temp) = test_store();
        let rose = plant("Rosie");
        let tulip = plant("Tulip");
        store.save(&rose).unwrap();
        store.save(&tulip).unwrap();

        store.delete(&rose).unwrap();
        let once = store.load_all();
        store.delete(&rose).unwrap();
        assert_eq!(store.load_all(), once);
        assert_eq!(once, vec![tulip]);
    }

    #[test]
    fn test_malformed_document() {
        let (store, _temp) = test_store();
        fs::write(store.path(), "{ not json").unwrap();

        assert!(store.load_all().is_empty());
        assert!(matches!(store.try_load_all(), Err(StoreError::Decode { .. })));
    }

    #[test]
    fn test_search_ignores_case() {
        let (store, _temp) = test_store();
        store.save(&plant("Big Sunflower")).unwrap();
        store.save(&plant("Basil")).unwrap();

        let found = store.search("SUN");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Big Sunflower");
        assert_eq!(store.search("").len(), 2);
    }

    #[test]
    fn test_mark_watered() {
        let (store, _temp) = test_store();
        let rose = plant("Rosie");
        store.save(&rose).unwrap();

        let at = Utc.with_ymd_and_hms(2026, 5, 1, 7, 0, 0).unwrap();
        let updated = store.mark_watered(&rose.id, at).unwrap();
        assert_eq!(updated.last_watered_date, Some(at));
        assert_eq!(store.get(&rose.id).unwrap().last_watered(), at);

        assert!(matches!(
            store.mark_watered("missing", at),
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_async_save_and_delete() {
        let (store, _temp) = test_store();
        let rose = plant("Rosie");
        store.save_async(rose.clone()).await.unwrap();
        assert_eq!(store.load_all().len(), 1);

        store.delete_async(rose).await.unwrap();
        assert!(store.load_all().is_empty());
    }
}
