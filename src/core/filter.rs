// Device Authorization Portal - core/filter.rs
//
// Filter engine for the admin dashboard.
// Status filter and free-text query are AND-combined.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::{DeviceRequest, RequestStatus, StatusCounts};

/// Status category selected in the dashboard tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Approved,
    Rejected,
}

impl StatusFilter {
    /// Returns true if a request with `status` passes this filter.
    pub fn matches(&self, status: RequestStatus) -> bool {
        match self {
            Self::All => true,
            Self::Pending => status == RequestStatus::Pending,
            Self::Approved => status == RequestStatus::Approved,
            Self::Rejected => status == RequestStatus::Rejected,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// All filters in tab order.
    pub fn all() -> &'static [StatusFilter] {
        &[Self::All, Self::Pending, Self::Approved, Self::Rejected]
    }

    /// Number of requests this tab would show with an empty query.
    pub fn count(&self, counts: &StatusCounts) -> usize {
        match self {
            Self::All => counts.all,
            Self::Pending => counts.pending,
            Self::Approved => counts.approved,
            Self::Rejected => counts.rejected,
        }
    }
}

/// Complete filter state. Both fields are AND-combined when applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    /// Status tab. `All` = no status filter.
    pub status: StatusFilter,

    /// Free-text query as typed. Trimmed and lower-cased when applied.
    pub query: String,
}

impl FilterState {
    /// Returns true if no filters are active.
    pub fn is_empty(&self) -> bool {
        self.status == StatusFilter::All && self.query.trim().is_empty()
    }
}

/// Apply filters to a slice of requests, returning indices of matches.
///
/// Indices point into the original slice and preserve its order, so the
/// dashboard can address rows in the store without cloning them.
pub fn apply_filters(requests: &[DeviceRequest], filter: &FilterState) -> Vec<usize> {
    if filter.is_empty() {
        return (0..requests.len()).collect();
    }

    let query = filter.query.trim().to_lowercase();

    requests
        .iter()
        .enumerate()
        .filter(|(_, request)| matches_all(request, filter.status, &query))
        .map(|(idx, _)| idx)
        .collect()
}

/// Visible subset of `requests` for a status filter and query text,
/// in store order (newest first).
pub fn visible<'a>(
    requests: &'a [DeviceRequest],
    status: StatusFilter,
    query: &str,
) -> Vec<&'a DeviceRequest> {
    let filter = FilterState {
        status,
        query: query.to_string(),
    };
    apply_filters(requests, &filter)
        .into_iter()
        .map(|idx| &requests[idx])
        .collect()
}

/// Per-status totals over the full, unfiltered collection.
pub fn status_counts(requests: &[DeviceRequest]) -> StatusCounts {
    let mut counts = StatusCounts {
        all: requests.len(),
        ..Default::default()
    };
    for request in requests {
        match request.status {
            RequestStatus::Pending => counts.pending += 1,
            RequestStatus::Approved => counts.approved += 1,
            RequestStatus::Rejected => counts.rejected += 1,
        }
    }
    counts
}

/// Check if a single request passes the status filter and the
/// (already trimmed and lower-cased) query.
fn matches_all(request: &DeviceRequest, status: StatusFilter, query_lower: &str) -> bool {
    if !status.matches(request.status) {
        return false;
    }

    if !query_lower.is_empty() && !request.search_text().contains(query_lower) {
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{DeviceType, Urgency};
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn make_request(name: &str, status: RequestStatus, device: DeviceType) -> DeviceRequest {
        DeviceRequest {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            status,
            admin_note: String::new(),
            requester_name: name.to_string(),
            email: format!("{}@co.com", name.to_lowercase()),
            department: "Engineering".to_string(),
            device_type: device,
            justification: "Replacement for broken hardware".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            cost: 0.0,
            urgency: Urgency::Normal,
            manager_email: "boss@co.com".to_string(),
            requires_admin_access: false,
            needs_accessories: false,
            acknowledge_policy: true,
        }
    }

    fn sample() -> Vec<DeviceRequest> {
        vec![
            make_request("Casey", RequestStatus::Rejected, DeviceType::Phone),
            make_request("Blair", RequestStatus::Pending, DeviceType::Desktop),
            make_request("Avery", RequestStatus::Approved, DeviceType::Laptop),
            make_request("Drew", RequestStatus::Pending, DeviceType::Laptop),
        ]
    }

    #[test]
    fn test_empty_filter_returns_all_in_order() {
        let requests = sample();
        let result = visible(&requests, StatusFilter::All, "");
        let names: Vec<_> = result.iter().map(|r| r.requester_name.as_str()).collect();
        assert_eq!(names, vec!["Casey", "Blair", "Avery", "Drew"]);
    }

    #[test]
    fn test_status_filter_returns_exact_subset() {
        let requests = sample();
        let result = apply_filters(
            &requests,
            &FilterState {
                status: StatusFilter::Pending,
                ..Default::default()
            },
        );
        assert_eq!(result, vec![1, 3]);
    }

    #[test]
    fn test_query_is_trimmed_and_case_insensitive() {
        let requests = sample();
        let result = visible(&requests, StatusFilter::All, "  LAPTOP ");
        let names: Vec<_> = result.iter().map(|r| r.requester_name.as_str()).collect();
        assert_eq!(names, vec!["Avery", "Drew"]);
    }

    #[test]
    fn test_query_matches_email() {
        let requests = sample();
        let result = visible(&requests, StatusFilter::All, "blair@co");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].requester_name, "Blair");
    }

    #[test]
    fn test_status_and_query_are_and_combined() {
        let requests = sample();
        let result = visible(&requests, StatusFilter::Pending, "laptop");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].requester_name, "Drew");
    }

    #[test]
    fn test_query_matching_nothing_yields_empty() {
        let requests = sample();
        assert!(visible(&requests, StatusFilter::All, "zeppelin").is_empty());
    }

    #[test]
    fn test_whitespace_query_matches_everything() {
        let requests = sample();
        assert_eq!(visible(&requests, StatusFilter::All, "   ").len(), 4);
    }

    #[test]
    fn test_query_does_not_search_admin_note() {
        let mut requests = sample();
        requests[0].admin_note = "budget exhausted".to_string();
        assert!(visible(&requests, StatusFilter::All, "budget").is_empty());
    }

    #[test]
    fn test_counts_ignore_query_and_cover_whole_collection() {
        let requests = sample();
        let counts = status_counts(&requests);
        assert_eq!(
            counts,
            StatusCounts {
                all: 4,
                pending: 2,
                approved: 1,
                rejected: 1,
            }
        );
        assert_eq!(StatusFilter::Pending.count(&counts), 2);
        assert_eq!(StatusFilter::All.count(&counts), requests.len());
    }

    #[test]
    fn test_counts_on_empty_collection() {
        assert_eq!(status_counts(&[]), StatusCounts::default());
    }
}
