// Device Authorization Portal - ui/panels/admin.rs
//
// Admin dashboard (central panel): status tabs with counts, search,
// review note, export/clear actions, and the request table.

use crate::app::state::{AppState, ExportFormat};
use crate::core::filter::StatusFilter;
use crate::core::model::DeviceRequest;
use crate::ui::theme;
use uuid::Uuid;

/// Longest admin note shown in the table before it is cut with an ellipsis.
const NOTE_PREVIEW_CHARS: usize = 40;

const COLUMNS: [&str; 9] = [
    "Requester",
    "Department",
    "Device",
    "Dates",
    "Cost",
    "Urgency",
    "Status",
    "Submitted",
    "Actions",
];

/// A row button click, applied after the table has been drawn.
enum RowAction {
    Approve(Uuid),
    Reject(Uuid),
    Delete(Uuid),
}

/// Render the admin dashboard.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Admin dashboard");
    ui.add_space(4.0);

    // Status tabs, search, actions
    ui.horizontal(|ui| {
        for status in StatusFilter::all() {
            let label = format!("{} ({})", status.label(), status.count(&state.counts));
            if ui
                .selectable_label(state.filter_state.status == *status, label)
                .clicked()
            {
                state.set_status_filter(*status);
            }
        }

        ui.separator();

        let mut query = state.filter_state.query.clone();
        let response = ui.add(
            egui::TextEdit::singleline(&mut query)
                .hint_text("Search requests...")
                .desired_width(200.0),
        );
        if response.changed() {
            state.set_query(&query);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Clear all").clicked() {
                state.show_clear_confirm = true;
            }
            if ui.button("Export JSON").clicked() {
                state.pending_export = Some(ExportFormat::Json);
            }
            if ui.button("Export CSV").clicked() {
                state.pending_export = Some(ExportFormat::Csv);
            }
        });
    });

    ui.horizontal(|ui| {
        ui.label("Review note:");
        ui.add(
            egui::TextEdit::singleline(&mut state.admin_note)
                .hint_text("Optional note applied to the next approve/reject")
                .desired_width(f32::INFINITY),
        );
    });

    ui.separator();

    let mut action = None;

    egui::ScrollArea::both()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            if state.filtered_indices.is_empty() {
                ui.add_space(20.0);
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new("No requests found. Submit a request to get started.")
                            .weak(),
                    );
                });
                return;
            }

            egui::Grid::new("request_table")
                .num_columns(COLUMNS.len())
                .striped(true)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    for column in COLUMNS {
                        ui.strong(column);
                    }
                    ui.end_row();

                    for request in state.visible_requests() {
                        if let Some(clicked) = request_row(ui, request) {
                            action = Some(clicked);
                        }
                        ui.end_row();
                    }
                });
        });

    match action {
        Some(RowAction::Approve(id)) => state.approve(id),
        Some(RowAction::Reject(id)) => state.reject(id),
        Some(RowAction::Delete(id)) => state.delete(id),
        None => {}
    }
}

/// Draw one table row; returns the button clicked, if any.
fn request_row(ui: &mut egui::Ui, request: &DeviceRequest) -> Option<RowAction> {
    ui.vertical(|ui| {
        ui.label(&request.requester_name);
        ui.label(egui::RichText::new(&request.email).small().weak());
    });

    ui.label(&request.department);

    ui.vertical(|ui| {
        ui.label(request.device_type.label());
        let mut extras = Vec::new();
        if request.requires_admin_access {
            extras.push("admin access");
        }
        if request.needs_accessories {
            extras.push("accessories");
        }
        if !extras.is_empty() {
            ui.label(egui::RichText::new(extras.join(", ")).small().weak());
        }
    });

    ui.label(format!("{} to {}", request.start_date, request.end_date));
    ui.label(format!("${:.2}", request.cost));

    let urgency = egui::RichText::new(request.urgency.label());
    ui.label(match theme::urgency_colour(request.urgency) {
        Some(colour) => urgency.color(colour),
        None => urgency,
    });

    ui.vertical(|ui| {
        ui.label(
            egui::RichText::new(format!(" {} ", request.status.label()))
                .strong()
                .color(theme::status_colour(request.status))
                .background_color(theme::status_bg_colour(request.status)),
        );
        if !request.admin_note.is_empty() {
            ui.set_max_width(theme::NOTE_COLUMN_WIDTH);
            ui.label(egui::RichText::new(note_preview(&request.admin_note)).small().italics())
                .on_hover_text(&request.admin_note);
        }
    });

    ui.label(
        request
            .created_at
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
    );

    ui.horizontal(|ui| {
        let mut clicked = None;
        if ui.small_button("Approve").clicked() {
            clicked = Some(RowAction::Approve(request.id));
        }
        if ui.small_button("Reject").clicked() {
            clicked = Some(RowAction::Reject(request.id));
        }
        if ui.small_button("Delete").clicked() {
            clicked = Some(RowAction::Delete(request.id));
        }
        clicked
    })
    .inner
}

fn note_preview(note: &str) -> String {
    if note.chars().count() <= NOTE_PREVIEW_CHARS {
        return note.to_string();
    }
    let cut: String = note.chars().take(NOTE_PREVIEW_CHARS).collect();
    format!("{}\u{2026}", cut.trim_end())
}
