// Device Authorization Portal - core/export.rs
//
// CSV and JSON export of the filtered request list.
// Core layer: writes to any Write trait object.

use crate::core::model::DeviceRequest;
use crate::util::error::ExportError;
use chrono::SecondsFormat;
use std::io::Write;
use std::path::Path;

/// Fixed CSV header, one column per request field.
pub const CSV_HEADER: [&str; 17] = [
    "id",
    "createdAt",
    "status",
    "requesterName",
    "email",
    "department",
    "deviceType",
    "justification",
    "startDate",
    "endDate",
    "cost",
    "urgency",
    "managerEmail",
    "requiresAdminAccess",
    "needsAccessories",
    "acknowledgePolicy",
    "adminNote",
];

/// Render one request as CSV cells, in `CSV_HEADER` order.
fn csv_row(request: &DeviceRequest) -> [String; 17] {
    [
        request.id.to_string(),
        request
            .created_at
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        request.status.label().to_string(),
        request.requester_name.clone(),
        request.email.clone(),
        request.department.clone(),
        request.device_type.label().to_string(),
        request.justification.clone(),
        request.start_date.to_string(),
        request.end_date.to_string(),
        // Plain decimal at every magnitude, never exponent notation.
        request.cost.to_string(),
        request.urgency.label().to_string(),
        request.manager_email.clone(),
        request.requires_admin_access.to_string(),
        request.needs_accessories.to_string(),
        request.acknowledge_policy.to_string(),
        request.admin_note.clone(),
    ]
}

/// Export requests to CSV. Every cell, header included, is quoted.
///
/// `export_path` is only used for error context.
pub fn export_csv<W: Write>(
    requests: &[DeviceRequest],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer
        .write_record(CSV_HEADER)
        .map_err(|e| ExportError::Csv {
            path: export_path.to_path_buf(),
            source: e,
        })?;

    let mut count = 0;
    for request in requests {
        csv_writer
            .write_record(csv_row(request))
            .map_err(|e| ExportError::Csv {
                path: export_path.to_path_buf(),
                source: e,
            })?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(rows = count, path = %export_path.display(), "CSV export written");
    Ok(count)
}

/// Export requests to JSON (pretty-printed array, same shape as storage).
pub fn export_json<W: Write>(
    requests: &[DeviceRequest],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, requests).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(requests.len())
}
