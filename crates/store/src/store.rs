use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stitchtrack_core::record::ProductionRecord;
use stitchtrack_core::types::RecordId;

use crate::error::StoreError;
use crate::user::UserMap;

const RECORDS_FILE: &str = "records.json";
const WORKERS_FILE: &str = "workers.json";
const USERS_FILE: &str = "users.json";

/// Default worker roster seeded into a fresh installation.
const DEFAULT_WORKERS: [&str; 4] = [
    "João Silva",
    "Maria Santos",
    "Pedro Oliveira",
    "Ana Costa",
];

/// The on-disk records document: the collection plus the id counter.
///
/// The counter is persisted with the collection so ids stay monotonic across
/// restarts and are never reused after a deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordsFile {
    pub next_id: RecordId,
    pub records: Vec<ProductionRecord>,
}

impl Default for RecordsFile {
    fn default() -> Self {
        Self {
            next_id: 1,
            records: Vec::new(),
        }
    }
}

impl RecordsFile {
    /// Take the next record id, advancing the counter.
    pub fn allocate_id(&mut self) -> RecordId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// File-backed store for the three stitchtrack collections.
pub struct JsonStore {
    data_dir: PathBuf,
}

impl JsonStore {
    /// Open a store rooted at `data_dir`, creating the directory if needed.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Whether the data directory is present and readable.
    pub fn is_healthy(&self) -> bool {
        self.data_dir.is_dir()
    }

    // -- records ------------------------------------------------------------

    /// Load the records document. A missing file yields the empty default.
    ///
    /// Files written by the legacy system are a bare JSON array without the
    /// id counter; those load too, with `next_id` recovered as one past the
    /// highest id present.
    pub fn load_records(&self) -> Result<RecordsFile, StoreError> {
        let Some(value) = self.read_value(RECORDS_FILE)? else {
            return Ok(RecordsFile::default());
        };

        if value.is_array() {
            let records: Vec<ProductionRecord> = serde_json::from_value(value)?;
            let next_id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
            tracing::info!(
                count = records.len(),
                next_id,
                "Migrated legacy records array"
            );
            return Ok(RecordsFile { next_id, records });
        }

        Ok(serde_json::from_value(value)?)
    }

    pub fn save_records(&self, records: &RecordsFile) -> Result<(), StoreError> {
        self.write_atomic(RECORDS_FILE, records)
    }

    // -- workers ------------------------------------------------------------

    /// Load the worker registry; a missing file yields the default roster.
    pub fn load_workers(&self) -> Result<Vec<String>, StoreError> {
        match self.read_value(WORKERS_FILE)? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(DEFAULT_WORKERS.iter().map(|w| w.to_string()).collect()),
        }
    }

    pub fn save_workers(&self, workers: &[String]) -> Result<(), StoreError> {
        self.write_atomic(WORKERS_FILE, &workers)
    }

    // -- users --------------------------------------------------------------

    /// Load the user directory; a missing file yields an empty map.
    ///
    /// Seeding the default accounts requires password hashing, so it is the
    /// API layer's job at startup, not this crate's.
    pub fn load_users(&self) -> Result<UserMap, StoreError> {
        match self.read_value(USERS_FILE)? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(UserMap::new()),
        }
    }

    pub fn save_users(&self, users: &UserMap) -> Result<(), StoreError> {
        self.write_atomic(USERS_FILE, users)
    }

    // -- plumbing -----------------------------------------------------------

    /// Read a file into a JSON value, or `None` when the file is absent.
    fn read_value(&self, file: &str) -> Result<Option<serde_json::Value>, StoreError> {
        let path = self.data_dir.join(file);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&text)?))
    }

    /// Serialize `value` to a `.tmp` sibling, then rename over the target.
    fn write_atomic<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> Result<(), StoreError> {
        let path = self.data_dir.join(file);
        let tmp = self.data_dir.join(format!("{file}.tmp"));

        let text = serde_json::to_string_pretty(value)?;
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &path)?;

        tracing::debug!(file, "Collection saved");
        Ok(())
    }

    /// Typed read helper kept for symmetry with `write_atomic`; currently
    /// used only by tests.
    #[cfg(test)]
    fn read_typed<T: serde::de::DeserializeOwned>(
        &self,
        file: &str,
    ) -> Result<Option<T>, StoreError> {
        match self.read_value(file)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }
}
