// Device Authorization Portal - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Device Request (the persisted record)
// =============================================================================

/// A single device-authorization submission and its review state.
///
/// Serialised with camelCase keys so the on-disk blob keeps the same shape
/// as exported JSON. Unknown keys in a stored record are ignored; the
/// optional-by-history fields (`adminNote`, `cost`, the flags) default when
/// missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRequest {
    /// Unique identifier assigned at creation. Never changes.
    pub id: Uuid,

    /// Creation timestamp in UTC. Never changes.
    pub created_at: DateTime<Utc>,

    /// Review status. Starts as `Pending`.
    pub status: RequestStatus,

    /// Free-text rationale recorded by the reviewer on approve/reject.
    #[serde(default)]
    pub admin_note: String,

    pub requester_name: String,
    pub email: String,
    pub department: String,
    pub device_type: DeviceType,
    pub justification: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    /// Estimated cost in USD. Never negative for records created through
    /// the validator.
    #[serde(default)]
    pub cost: f64,

    pub urgency: Urgency,
    pub manager_email: String,

    #[serde(default)]
    pub requires_admin_access: bool,

    #[serde(default)]
    pub needs_accessories: bool,

    #[serde(default)]
    pub acknowledge_policy: bool,
}

impl DeviceRequest {
    /// Build a fresh pending request from a validated payload.
    pub fn from_new(new: NewRequest, id: Uuid, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            created_at,
            status: RequestStatus::Pending,
            admin_note: String::new(),
            requester_name: new.requester_name,
            email: new.email,
            department: new.department,
            device_type: new.device_type,
            justification: new.justification,
            start_date: new.start_date,
            end_date: new.end_date,
            cost: new.cost,
            urgency: new.urgency,
            manager_email: new.manager_email,
            requires_admin_access: new.requires_admin_access,
            needs_accessories: new.needs_accessories,
            acknowledge_policy: new.acknowledge_policy,
        }
    }

    /// Lower-cased text searched by the free-text query filter:
    /// name, email, department, device type and justification, space-joined.
    pub fn search_text(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.requester_name,
            self.email,
            self.department,
            self.device_type.label(),
            self.justification
        )
        .to_lowercase()
    }
}

// =============================================================================
// Request status
// =============================================================================

/// Review status of a request.
///
/// `Pending` is only ever the initial state; once decided, a request moves
/// between `Approved` and `Rejected` but never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    /// Lowercase label, as stored and exported.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

// =============================================================================
// Device type
// =============================================================================

/// Kind of device being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DeviceType {
    #[default]
    Laptop,
    Desktop,
    Tablet,
    Phone,
    Peripheral,
    Other,
}

impl DeviceType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Laptop => "Laptop",
            Self::Desktop => "Desktop",
            Self::Tablet => "Tablet",
            Self::Phone => "Phone",
            Self::Peripheral => "Peripheral",
            Self::Other => "Other",
        }
    }

    /// All device types in the order offered by the request form.
    pub fn all() -> &'static [DeviceType] {
        &[
            Self::Laptop,
            Self::Desktop,
            Self::Tablet,
            Self::Phone,
            Self::Peripheral,
            Self::Other,
        ]
    }
}

// =============================================================================
// Urgency
// =============================================================================

/// Requester-declared urgency, used by reviewers for prioritisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Urgency {
    Low,
    #[default]
    Normal,
    High,
    Critical,
}

impl Urgency {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Normal => "Normal",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    pub fn all() -> &'static [Urgency] {
        &[Self::Low, Self::Normal, Self::High, Self::Critical]
    }
}

// =============================================================================
// Draft (raw form state) and NewRequest (validated payload)
// =============================================================================

/// Unvalidated form state as typed by the requester.
///
/// Text fields hold raw input, including the date and cost fields, so the
/// validator can report exactly what is wrong with them. Defaults match an
/// empty form: Laptop, Normal urgency, every flag unchecked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestDraft {
    pub requester_name: String,
    pub email: String,
    pub department: String,
    pub device_type: DeviceType,
    pub justification: String,
    /// `YYYY-MM-DD`, empty when not entered.
    pub start_date: String,
    /// `YYYY-MM-DD`, empty when not entered.
    pub end_date: String,
    /// Decimal amount, empty (or whitespace) means 0.
    pub cost: String,
    pub urgency: Urgency,
    pub manager_email: String,
    pub requires_admin_access: bool,
    pub needs_accessories: bool,
    pub acknowledge_policy: bool,
}

/// A draft that passed validation, with dates and cost parsed.
///
/// Only produced by `core::validate::prepare`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRequest {
    pub requester_name: String,
    pub email: String,
    pub department: String,
    pub device_type: DeviceType,
    pub justification: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub cost: f64,
    pub urgency: Urgency,
    pub manager_email: String,
    pub requires_admin_access: bool,
    pub needs_accessories: bool,
    pub acknowledge_policy: bool,
}

// =============================================================================
// Status counts
// =============================================================================

/// Per-status totals over the whole collection (query text ignored).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub all: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> DeviceRequest {
        DeviceRequest {
            id: Uuid::nil(),
            created_at: Utc.with_ymd_and_hms(2025, 1, 5, 9, 30, 0).unwrap(),
            status: RequestStatus::Pending,
            admin_note: String::new(),
            requester_name: "Alex Doe".to_string(),
            email: "alex@co.com".to_string(),
            department: "Eng".to_string(),
            device_type: DeviceType::Tablet,
            justification: "Field testing of the mobile app".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 2, 10).unwrap(),
            cost: 450.0,
            urgency: Urgency::High,
            manager_email: "mgr@co.com".to_string(),
            requires_admin_access: false,
            needs_accessories: true,
            acknowledge_policy: true,
        }
    }

    #[test]
    fn test_search_text_joins_fields_in_order() {
        assert_eq!(
            sample().search_text(),
            "alex doe alex@co.com eng tablet field testing of the mobile app"
        );
    }

    #[test]
    fn test_serialises_with_camel_case_keys_and_labels() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["requesterName"], "Alex Doe");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["deviceType"], "Tablet");
        assert_eq!(json["urgency"], "High");
        assert_eq!(json["startDate"], "2025-01-10");
        assert_eq!(json["needsAccessories"], true);
    }

    #[test]
    fn test_deserialise_tolerates_missing_optional_fields_and_unknown_keys() {
        let raw = r#"{
            "id": "00000000-0000-0000-0000-000000000000",
            "createdAt": "2025-01-05T09:30:00.000Z",
            "status": "approved",
            "requesterName": "Alex Doe",
            "email": "alex@co.com",
            "department": "Eng",
            "deviceType": "Tablet",
            "justification": "Field testing of the mobile app",
            "startDate": "2025-01-10",
            "endDate": "2025-02-10",
            "urgency": "High",
            "managerEmail": "mgr@co.com",
            "favouriteColour": "orange"
        }"#;
        let req: DeviceRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(req.status, RequestStatus::Approved);
        assert_eq!(req.admin_note, "");
        assert_eq!(req.cost, 0.0);
        assert!(!req.acknowledge_policy);
    }

    #[test]
    fn test_draft_defaults_match_empty_form() {
        let draft = RequestDraft::default();
        assert_eq!(draft.device_type, DeviceType::Laptop);
        assert_eq!(draft.urgency, Urgency::Normal);
        assert!(!draft.acknowledge_policy);
    }
}
