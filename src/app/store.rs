// Device Authorization Portal - app/store.rs
//
// The request store: the single owner of the request collection.
//
// - Loads once at construction; an absent or unreadable slot starts empty.
// - Saves the full collection after every mutating call. Save failures are
//   logged and otherwise ignored; the in-memory collection stays the
//   source of truth for the session.
// - Operations on unknown ids are silent no-ops.

use crate::app::persistence::RequestPersistence;
use crate::core::model::{DeviceRequest, NewRequest, RequestStatus};
use chrono::Utc;
use std::collections::HashSet;
use uuid::Uuid;

/// Ordered request collection, newest first.
#[derive(Debug)]
pub struct RequestStore {
    requests: Vec<DeviceRequest>,
    persistence: Box<dyn RequestPersistence>,
}

impl RequestStore {
    /// Open the store, loading any previously saved collection.
    pub fn open(persistence: Box<dyn RequestPersistence>) -> Self {
        let requests = match persistence.load() {
            Ok(Some(requests)) => dedupe_ids(requests),
            Ok(None) => {
                tracing::debug!("No saved requests; starting empty");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load saved requests; starting empty");
                Vec::new()
            }
        };

        tracing::info!(count = requests.len(), "Request store opened");
        Self {
            requests,
            persistence,
        }
    }

    /// All requests, newest first.
    pub fn requests(&self) -> &[DeviceRequest] {
        &self.requests
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&DeviceRequest> {
        self.requests.iter().find(|r| r.id == id)
    }

    /// Create a pending request from a validated payload and put it first.
    pub fn create(&mut self, new: NewRequest) -> &DeviceRequest {
        let mut id = Uuid::new_v4();
        while self.get(id).is_some() {
            id = Uuid::new_v4();
        }

        let request = DeviceRequest::from_new(new, id, Utc::now());
        tracing::info!(id = %request.id, "Request created");
        self.requests.insert(0, request);
        self.persist();
        &self.requests[0]
    }

    /// Mark a request approved with the reviewer's note.
    pub fn approve(&mut self, id: Uuid, note: &str) {
        self.decide(id, RequestStatus::Approved, note);
    }

    /// Mark a request rejected with the reviewer's note.
    pub fn reject(&mut self, id: Uuid, note: &str) {
        self.decide(id, RequestStatus::Rejected, note);
    }

    /// Remove a request.
    pub fn delete(&mut self, id: Uuid) {
        let before = self.requests.len();
        self.requests.retain(|r| r.id != id);
        if self.requests.len() < before {
            tracing::info!(id = %id, "Request deleted");
        } else {
            tracing::debug!(id = %id, "Delete of unknown request ignored");
        }
        self.persist();
    }

    /// Remove every request. Callers are expected to have confirmed.
    pub fn clear_all(&mut self) {
        let removed = self.requests.len();
        self.requests.clear();
        tracing::info!(removed, "All requests cleared");
        self.persist();
    }

    fn decide(&mut self, id: Uuid, status: RequestStatus, note: &str) {
        match self.requests.iter_mut().find(|r| r.id == id) {
            Some(request) => {
                request.status = status;
                request.admin_note = note.to_string();
                tracing::info!(id = %id, status = status.label(), "Request reviewed");
            }
            None => {
                tracing::debug!(id = %id, status = status.label(), "Review of unknown request ignored");
            }
        }
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = self.persistence.save(&self.requests) {
            tracing::warn!(error = %e, "Failed to save requests; keeping in-memory state");
        }
    }
}

/// Keep the first record for each id, in order.
fn dedupe_ids(requests: Vec<DeviceRequest>) -> Vec<DeviceRequest> {
    let total = requests.len();
    let mut seen = HashSet::with_capacity(total);
    let unique: Vec<_> = requests.into_iter().filter(|r| seen.insert(r.id)).collect();
    if unique.len() < total {
        tracing::warn!(
            dropped = total - unique.len(),
            "Saved requests contained duplicate ids; kept the first of each"
        );
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::persistence::MemoryStore;
    use crate::core::model::{DeviceType, Urgency};
    use chrono::NaiveDate;

    fn payload(name: &str) -> NewRequest {
        NewRequest {
            requester_name: name.to_string(),
            email: "alex@co.com".to_string(),
            department: "Eng".to_string(),
            device_type: DeviceType::Laptop,
            justification: "Need laptop for new project work".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 2, 10).unwrap(),
            cost: 0.0,
            urgency: Urgency::Normal,
            manager_email: "mgr@co.com".to_string(),
            requires_admin_access: false,
            needs_accessories: false,
            acknowledge_policy: true,
        }
    }

    fn open_empty() -> (RequestStore, MemoryStore) {
        let slot = MemoryStore::new();
        (RequestStore::open(Box::new(slot.clone())), slot)
    }

    #[test]
    fn test_create_prepends_pending_request() {
        let (mut store, _) = open_empty();
        let first = store.create(payload("First")).id;
        let created = store.create(payload("Second")).clone();

        assert_eq!(created.status, RequestStatus::Pending);
        assert_eq!(created.admin_note, "");
        assert_ne!(created.id, first);
        let names: Vec<_> = store
            .requests()
            .iter()
            .map(|r| r.requester_name.as_str())
            .collect();
        assert_eq!(names, vec!["Second", "First"]);
    }

    #[test]
    fn test_approve_sets_status_and_note_only() {
        let (mut store, _) = open_empty();
        let before = store.create(payload("Alex")).clone();

        store.approve(before.id, "ok");
        store.approve(before.id, "Approved by IT");

        let after = store.get(before.id).unwrap();
        assert_eq!(after.status, RequestStatus::Approved);
        assert_eq!(after.admin_note, "Approved by IT");
        let mut expected = before.clone();
        expected.status = RequestStatus::Approved;
        expected.admin_note = "Approved by IT".to_string();
        assert_eq!(*after, expected);
    }

    #[test]
    fn test_reject_sets_status_and_note() {
        let (mut store, _) = open_empty();
        let id = store.create(payload("Alex")).id;
        store.reject(id, "Budget freeze");
        let request = store.get(id).unwrap();
        assert_eq!(request.status, RequestStatus::Rejected);
        assert_eq!(request.admin_note, "Budget freeze");
    }

    #[test]
    fn test_review_of_unknown_id_is_noop() {
        let (mut store, _) = open_empty();
        store.create(payload("Alex"));
        let snapshot = store.requests().to_vec();

        store.approve(Uuid::new_v4(), "note");
        store.reject(Uuid::new_v4(), "note");
        assert_eq!(store.requests(), snapshot.as_slice());
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let (mut store, _) = open_empty();
        let keep = store.create(payload("Keep")).id;
        let gone = store.create(payload("Gone")).id;

        store.delete(gone);
        assert_eq!(store.len(), 1);
        assert!(store.get(gone).is_none());
        assert!(store.get(keep).is_some());

        store.delete(Uuid::new_v4());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clear_all_empties_collection() {
        let (mut store, slot) = open_empty();
        for name in ["A", "B", "C"] {
            store.create(payload(name));
        }
        store.clear_all();
        assert!(store.is_empty());
        assert_eq!(slot.text().as_deref(), Some("[]"));
    }

    #[test]
    fn test_every_mutation_is_saved() {
        let (mut store, slot) = open_empty();
        let id = store.create(payload("Alex")).id;
        store.approve(id, "fine");
        store.delete(id);
        store.clear_all();
        assert_eq!(slot.save_count(), 4);
    }

    #[test]
    fn test_reopen_restores_saved_collection() {
        let (mut store, slot) = open_empty();
        let a = store.create(payload("A")).id;
        store.create(payload("B"));
        store.reject(a, "no");

        let reopened = RequestStore::open(Box::new(slot.clone()));
        assert_eq!(reopened.requests(), store.requests());
    }

    #[test]
    fn test_malformed_slot_starts_empty() {
        let slot = MemoryStore::with_text("{ definitely not a list");
        let store = RequestStore::open(Box::new(slot));
        assert!(store.is_empty());
    }

    #[test]
    fn test_save_failure_keeps_memory_state() {
        let (mut store, slot) = open_empty();
        slot.set_fail_saves(true);
        let id = store.create(payload("Alex")).id;
        store.approve(id, "ok");

        assert_eq!(store.get(id).unwrap().status, RequestStatus::Approved);
        assert!(slot.text().is_none());
    }

    #[test]
    fn test_duplicate_ids_in_slot_keep_first() {
        let (mut store, _) = open_empty();
        let id = store.create(payload("Original")).id;
        let mut copy = store.get(id).unwrap().clone();
        copy.requester_name = "Duplicate".to_string();
        let doubled = vec![store.get(id).unwrap().clone(), copy];
        let text = crate::app::persistence::encode(&doubled, "slot").unwrap();

        let reopened = RequestStore::open(Box::new(MemoryStore::with_text(text)));
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.requests()[0].requester_name, "Original");
    }
}
