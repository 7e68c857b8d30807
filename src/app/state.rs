// Device Authorization Portal - app/state.rs
//
// Application state management. Holds the request store, the dashboard
// filter, the request form draft and its errors, and UI flags.
// Owned by the eframe::App implementation.

use crate::app::store::RequestStore;
use crate::core::export;
use crate::core::filter::{self, FilterState, StatusFilter};
use crate::core::model::{DeviceRequest, RequestDraft, StatusCounts};
use crate::core::validate::{self, ValidationErrors};
use crate::util::error::ExportError;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;
use uuid::Uuid;

/// Export file formats offered by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// The request collection and its persistence.
    pub store: RequestStore,

    /// Current dashboard filter.
    pub filter_state: FilterState,

    /// Indices into `store.requests()` matching the current filter.
    pub filtered_indices: Vec<usize>,

    /// Per-status totals over the whole collection.
    pub counts: StatusCounts,

    /// Request form contents.
    pub draft: RequestDraft,

    /// Errors from the last submit attempt, shown next to each field.
    pub form_errors: ValidationErrors,

    /// When the last successful submit happened (drives the banner).
    pub submitted_at: Option<Instant>,

    /// Note applied by the next approve/reject click.
    pub admin_note: String,

    /// Status message for the status bar.
    pub status_message: String,

    /// Whether the clear-all confirmation dialog is open.
    pub show_clear_confirm: bool,

    /// Export requested by a panel; handled by the app loop (file dialog).
    pub pending_export: Option<ExportFormat>,

    /// File name offered by the CSV export dialog.
    pub csv_file_name: String,

    /// Dark (true) or light (false) visuals.
    pub dark_mode: bool,

    /// Body font size in points.
    pub ui_font_size: f32,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,
}

impl AppState {
    /// Create initial state around an opened store.
    pub fn new(store: RequestStore, debug_mode: bool) -> Self {
        let mut state = Self {
            store,
            filter_state: FilterState::default(),
            filtered_indices: Vec::new(),
            counts: StatusCounts::default(),
            draft: RequestDraft::default(),
            form_errors: ValidationErrors::default(),
            submitted_at: None,
            admin_note: String::new(),
            status_message: "Ready.".to_string(),
            show_clear_confirm: false,
            pending_export: None,
            csv_file_name: crate::util::constants::DEFAULT_CSV_EXPORT_NAME.to_string(),
            dark_mode: true,
            ui_font_size: crate::util::constants::DEFAULT_FONT_SIZE,
            debug_mode,
        };
        state.apply_filters();
        state
    }

    /// Recompute filtered indices and counts from the store and filter.
    pub fn apply_filters(&mut self) {
        let requests = self.store.requests();
        self.filtered_indices = filter::apply_filters(requests, &self.filter_state);
        self.counts = filter::status_counts(requests);
    }

    /// Switch the status tab.
    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.filter_state.status = status;
        self.apply_filters();
    }

    /// Replace the search query.
    pub fn set_query(&mut self, query: &str) {
        self.filter_state.query = query.to_string();
        self.apply_filters();
    }

    /// Requests matching the current filter, newest first.
    pub fn visible_requests(&self) -> Vec<&DeviceRequest> {
        let requests = self.store.requests();
        self.filtered_indices
            .iter()
            .filter_map(|&i| requests.get(i))
            .collect()
    }

    /// Validate the draft and, if it passes, create the request.
    ///
    /// On success the form is reset and the new id returned. On failure the
    /// field errors are kept in `form_errors` and nothing is created.
    pub fn submit_draft(&mut self) -> Option<Uuid> {
        match validate::prepare(&self.draft) {
            Ok(new) => {
                let id = self.store.create(new).id;
                self.draft = RequestDraft::default();
                self.form_errors = ValidationErrors::default();
                self.submitted_at = Some(Instant::now());
                self.status_message = "Request submitted.".to_string();
                self.apply_filters();
                Some(id)
            }
            Err(errors) => {
                let fields: Vec<&str> = errors.fields().map(|f| f.key()).collect();
                tracing::debug!(fields = ?fields, "Request form has errors");
                self.form_errors = errors;
                self.submitted_at = None;
                None
            }
        }
    }

    /// Approve a request using the current admin note.
    pub fn approve(&mut self, id: Uuid) {
        self.store.approve(id, &self.admin_note);
        self.status_message = "Request approved.".to_string();
        self.apply_filters();
    }

    /// Reject a request using the current admin note.
    pub fn reject(&mut self, id: Uuid) {
        self.store.reject(id, &self.admin_note);
        self.status_message = "Request rejected.".to_string();
        self.apply_filters();
    }

    pub fn delete(&mut self, id: Uuid) {
        self.store.delete(id);
        self.status_message = "Request deleted.".to_string();
        self.apply_filters();
    }

    /// Delete everything. Called once the user has confirmed.
    pub fn clear_all(&mut self) {
        self.store.clear_all();
        self.show_clear_confirm = false;
        self.status_message = "All requests cleared.".to_string();
        self.apply_filters();
    }

    /// Write the visible requests to `dest` in the given format.
    pub fn export_visible(&self, format: ExportFormat, dest: &Path) -> Result<usize, ExportError> {
        let file = std::fs::File::create(dest).map_err(|e| ExportError::Io {
            path: dest.to_path_buf(),
            source: e,
        })?;
        let mut writer = BufWriter::new(file);

        let requests: Vec<DeviceRequest> =
            self.visible_requests().into_iter().cloned().collect();
        let count = match format {
            ExportFormat::Csv => export::export_csv(&requests, &mut writer, dest)?,
            ExportFormat::Json => export::export_json(&requests, &mut writer, dest)?,
        };
        writer.flush().map_err(|e| ExportError::Io {
            path: dest.to_path_buf(),
            source: e,
        })?;

        tracing::info!(count, format = ?format, path = %dest.display(), "Requests exported");
        Ok(count)
    }
}
