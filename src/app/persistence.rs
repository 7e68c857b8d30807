// Device Authorization Portal - app/persistence.rs
//
// Persistence adapters for the request collection.
//
// The whole collection lives in one named slot as a single JSON array.
// There is no schema version: a payload that does not decode is treated
// as absent by the store.
//
// - `JsonFileStore` writes atomically (write temp, rename to final) so a
//   crash during save never corrupts the previous good file. The data
//   directory is created on first save.
// - `MemoryStore` keeps the serialised text in memory. Clones share the
//   slot, so a test can hand one clone to the store and inspect the other.

use crate::core::model::DeviceRequest;
use crate::util::error::PersistenceError;
use std::cell::RefCell;
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Durable storage for the ordered request collection.
pub trait RequestPersistence: fmt::Debug {
    /// Load the stored collection.
    ///
    /// `Ok(None)` means nothing has been stored yet. `Err` means the slot
    /// exists but could not be read or decoded.
    fn load(&self) -> Result<Option<Vec<DeviceRequest>>, PersistenceError>;

    /// Replace the stored collection with `requests`, preserving order.
    fn save(&self, requests: &[DeviceRequest]) -> Result<(), PersistenceError>;
}

/// Serialise a collection to the slot text format.
pub fn encode(requests: &[DeviceRequest], slot: &str) -> Result<String, PersistenceError> {
    serde_json::to_string(requests).map_err(|e| PersistenceError::Json {
        slot: slot.to_string(),
        source: e,
    })
}

/// Decode slot text back into a collection.
pub fn decode(text: &str, slot: &str) -> Result<Vec<DeviceRequest>, PersistenceError> {
    serde_json::from_str(text).map_err(|e| PersistenceError::Json {
        slot: slot.to_string(),
        source: e,
    })
}

// =============================================================================
// File-backed slot
// =============================================================================

/// Stores the collection as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn slot(&self) -> String {
        self.path.display().to_string()
    }

    fn io_error(&self, operation: &'static str, source: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            slot: self.slot(),
            operation,
            source,
        }
    }
}

impl RequestPersistence for JsonFileStore {
    fn load(&self) -> Result<Option<Vec<DeviceRequest>>, PersistenceError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            // First run: nothing saved yet.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error("read", e)),
        };

        let requests = decode(&content, &self.slot())?;
        tracing::debug!(
            path = %self.path.display(),
            count = requests.len(),
            "Request file loaded"
        );
        Ok(Some(requests))
    }

    fn save(&self, requests: &[DeviceRequest]) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| self.io_error("create directory", e))?;
            }
        }

        let json = encode(requests, &self.slot())?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json.as_bytes()).map_err(|e| self.io_error("write", e))?;

        std::fs::rename(&tmp, &self.path).map_err(|e| {
            // Clean up the temp file on failure; ignore any secondary error.
            let _ = std::fs::remove_file(&tmp);
            self.io_error("rename", e)
        })?;

        tracing::debug!(
            path = %self.path.display(),
            count = requests.len(),
            "Request file saved"
        );
        Ok(())
    }
}

// =============================================================================
// In-memory slot
// =============================================================================

#[derive(Debug, Default)]
struct MemorySlot {
    text: Option<String>,
    fail_saves: bool,
    saves: usize,
}

/// In-memory slot holding the same text blob a file would.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    name: String,
    slot: Rc<RefCell<MemorySlot>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Empty slot.
    pub fn new() -> Self {
        Self {
            name: crate::util::constants::STORAGE_SLOT_NAME.to_string(),
            slot: Rc::new(RefCell::new(MemorySlot::default())),
        }
    }

    /// Slot pre-filled with raw text (which need not be valid JSON).
    pub fn with_text(text: impl Into<String>) -> Self {
        let store = Self::new();
        store.slot.borrow_mut().text = Some(text.into());
        store
    }

    /// Current slot contents.
    pub fn text(&self) -> Option<String> {
        self.slot.borrow().text.clone()
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.slot.borrow().saves
    }

    /// Make subsequent saves fail (or succeed again).
    pub fn set_fail_saves(&self, fail: bool) {
        self.slot.borrow_mut().fail_saves = fail;
    }
}

impl RequestPersistence for MemoryStore {
    fn load(&self) -> Result<Option<Vec<DeviceRequest>>, PersistenceError> {
        match self.slot.borrow().text.as_deref() {
            None => Ok(None),
            Some(text) => decode(text, &self.name).map(Some),
        }
    }

    fn save(&self, requests: &[DeviceRequest]) -> Result<(), PersistenceError> {
        if self.slot.borrow().fail_saves {
            return Err(PersistenceError::Unavailable {
                slot: self.name.clone(),
            });
        }
        let text = encode(requests, &self.name)?;
        let mut slot = self.slot.borrow_mut();
        slot.text = Some(text);
        slot.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{DeviceType, RequestStatus, Urgency};
    use chrono::{NaiveDate, TimeZone, Utc};
    use tempfile::TempDir;
    use uuid::Uuid;

    fn make_request(name: &str, status: RequestStatus) -> DeviceRequest {
        DeviceRequest {
            id: Uuid::new_v4(),
            created_at: Utc.with_ymd_and_hms(2025, 1, 5, 9, 30, 0).unwrap(),
            status,
            admin_note: "checked".to_string(),
            requester_name: name.to_string(),
            email: "someone@co.com".to_string(),
            department: "Finance".to_string(),
            device_type: DeviceType::Desktop,
            justification: "Spreadsheet models need more memory".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 9, 30).unwrap(),
            cost: 2100.75,
            urgency: Urgency::Low,
            manager_email: "cfo@co.com".to_string(),
            requires_admin_access: true,
            needs_accessories: true,
            acknowledge_policy: true,
        }
    }

    fn sample() -> Vec<DeviceRequest> {
        vec![
            make_request("Robin", RequestStatus::Pending),
            make_request("Sam", RequestStatus::Rejected),
        ]
    }

    #[test]
    fn test_file_save_load_round_trip_preserves_order() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("requests.json"));
        let original = sample();

        store.save(&original).expect("save should succeed");
        let loaded = store.load().unwrap().expect("slot should be present");
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_file_load_missing_returns_none() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_load_malformed_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("requests.json");
        std::fs::write(&path, b"not valid json {{{{").unwrap();
        let result = JsonFileStore::new(&path).load();
        assert!(matches!(result, Err(PersistenceError::Json { .. })));
    }

    #[test]
    fn test_file_save_overwrites_leftover_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("requests.json");
        let store = JsonFileStore::new(&path);
        assert_eq!(store.path(), path.as_path());
        store.save(&sample()).unwrap();

        std::fs::write(path.with_extension("json.tmp"), b"garbage").unwrap();

        let one = vec![make_request("Kim", RequestStatus::Approved)];
        store.save(&one).unwrap();
        assert_eq!(store.load().unwrap().unwrap(), one);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_memory_store_clones_share_slot() {
        let store = MemoryStore::new();
        let observer = store.clone();
        assert!(observer.load().unwrap().is_none());

        let data = sample();
        store.save(&data).unwrap();
        assert_eq!(observer.save_count(), 1);
        assert_eq!(observer.load().unwrap().unwrap(), data);
    }

    #[test]
    fn test_memory_store_malformed_text_is_error() {
        let store = MemoryStore::with_text("[{\"id\": 7}]");
        assert!(store.load().is_err());
    }

    #[test]
    fn test_memory_store_failing_saves() {
        let store = MemoryStore::new();
        store.set_fail_saves(true);
        assert!(matches!(
            store.save(&sample()),
            Err(PersistenceError::Unavailable { .. })
        ));
        assert!(store.text().is_none());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_encoded_slot_is_json_array_of_records() {
        let text = encode(&sample(), "slot").unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array[0]["requesterName"], "Robin");
        assert_eq!(array[1]["status"], "rejected");
    }
}
