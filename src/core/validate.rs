// Device Authorization Portal - core/validate.rs
//
// Request form validation.
// Every rule runs independently (no short-circuit) so the form can show
// all problems at once. Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::{NewRequest, RequestDraft};
use chrono::NaiveDate;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Loose email shape: `local@domain.tld`, no whitespace, exactly one `@`.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Calendar date format accepted by the date fields.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Minimum trimmed length of the business justification.
pub const MIN_JUSTIFICATION_CHARS: usize = 10;

/// Form fields that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    RequesterName,
    Email,
    Department,
    Justification,
    StartDate,
    EndDate,
    Cost,
    ManagerEmail,
    AcknowledgePolicy,
}

impl Field {
    /// Field name as used in the stored and exported records.
    pub fn key(&self) -> &'static str {
        match self {
            Self::RequesterName => "requesterName",
            Self::Email => "email",
            Self::Department => "department",
            Self::Justification => "justification",
            Self::StartDate => "startDate",
            Self::EndDate => "endDate",
            Self::Cost => "cost",
            Self::ManagerEmail => "managerEmail",
            Self::AcknowledgePolicy => "acknowledgePolicy",
        }
    }
}

/// Per-field error messages. Empty means the draft may be submitted.
///
/// At most one message per field; a later rule for the same field replaces
/// an earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, &'static str>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Error message for `field`, if any.
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    /// Fields with errors, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    fn set(&mut self, field: Field, message: &'static str) {
        self.0.insert(field, message);
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("EMAIL_PATTERN: invalid regex"))
}

/// Returns true if `value` has the loose `local@domain.tld` shape.
pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value)
}

/// Outcome of reading one optional date field.
enum DateInput {
    Absent,
    Invalid,
    Date(NaiveDate),
}

fn read_date(raw: &str) -> DateInput {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return DateInput::Absent;
    }
    match NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        Ok(date) => DateInput::Date(date),
        Err(_) => DateInput::Invalid,
    }
}

/// Parse the cost field. Blank or whitespace-only is 0.
fn read_cost(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Validate a draft, returning every field error found.
pub fn validate(draft: &RequestDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if draft.requester_name.trim().is_empty() {
        errors.set(Field::RequesterName, "Full name is required");
    }

    if !is_valid_email(&draft.email) {
        errors.set(Field::Email, "Valid email is required");
    }

    if draft.department.trim().is_empty() {
        errors.set(Field::Department, "Department is required");
    }

    let justification = draft.justification.trim();
    // Counted in Unicode scalar values.
    if justification.is_empty() || justification.chars().count() < MIN_JUSTIFICATION_CHARS {
        errors.set(Field::Justification, "Provide at least 10 characters");
    }

    let start = read_date(&draft.start_date);
    match start {
        DateInput::Absent => errors.set(Field::StartDate, "Start date is required"),
        DateInput::Invalid => errors.set(Field::StartDate, "Enter a date as YYYY-MM-DD"),
        DateInput::Date(_) => {}
    }

    let end = read_date(&draft.end_date);
    match end {
        DateInput::Absent => errors.set(Field::EndDate, "End date is required"),
        DateInput::Invalid => errors.set(Field::EndDate, "Enter a date as YYYY-MM-DD"),
        DateInput::Date(_) => {}
    }
    if let (DateInput::Date(start), DateInput::Date(end)) = (&start, &end) {
        if end < start {
            errors.set(Field::EndDate, "End date must be after start date");
        }
    }

    match read_cost(&draft.cost) {
        Some(cost) if cost < 0.0 => errors.set(Field::Cost, "Cost cannot be negative"),
        Some(_) => {}
        None => errors.set(Field::Cost, "Cost must be a number"),
    }

    if !is_valid_email(&draft.manager_email) {
        errors.set(Field::ManagerEmail, "Valid manager email required");
    }

    if !draft.acknowledge_policy {
        errors.set(Field::AcknowledgePolicy, "Please acknowledge the policy");
    }

    errors
}

/// Validate `draft` and, if it passes, build the typed creation payload.
///
/// Text fields are carried over as typed; dates and cost are parsed.
pub fn prepare(draft: &RequestDraft) -> Result<NewRequest, ValidationErrors> {
    let errors = validate(draft);
    if !errors.is_empty() {
        return Err(errors);
    }

    // validate() guarantees both dates parse and the cost is a number.
    let (DateInput::Date(start_date), DateInput::Date(end_date)) =
        (read_date(&draft.start_date), read_date(&draft.end_date))
    else {
        return Err(errors);
    };
    let Some(cost) = read_cost(&draft.cost) else {
        return Err(errors);
    };

    Ok(NewRequest {
        requester_name: draft.requester_name.clone(),
        email: draft.email.clone(),
        department: draft.department.clone(),
        device_type: draft.device_type,
        justification: draft.justification.clone(),
        start_date,
        end_date,
        cost,
        urgency: draft.urgency,
        manager_email: draft.manager_email.clone(),
        requires_admin_access: draft.requires_admin_access,
        needs_accessories: draft.needs_accessories,
        acknowledge_policy: draft.acknowledge_policy,
    })
}
