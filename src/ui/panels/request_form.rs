// Device Authorization Portal - ui/panels/request_form.rs
//
// Request submission form (left side panel).
// Validation errors from the last submit are shown under each field.

use crate::app::state::AppState;
use crate::core::model::{DeviceType, Urgency};
use crate::core::validate::Field;
use crate::ui::theme;
use crate::util::constants::SUBMIT_BANNER_SECS;
use std::time::Duration;

/// Render the request form.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Submit a device request");
    ui.separator();

    let errors = state.form_errors.clone();
    let draft = &mut state.draft;

    egui::Grid::new("request_form_grid")
        .num_columns(2)
        .spacing([8.0, 6.0])
        .show(ui, |ui| {
            text_row(ui, "Full name", &mut draft.requester_name, "Alex Doe");
            error_row(ui, errors.get(Field::RequesterName));

            text_row(ui, "Work email", &mut draft.email, "alex@company.com");
            error_row(ui, errors.get(Field::Email));

            text_row(ui, "Department", &mut draft.department, "Engineering");
            error_row(ui, errors.get(Field::Department));

            ui.label("Device type");
            egui::ComboBox::from_id_salt("device_type")
                .selected_text(draft.device_type.label())
                .show_ui(ui, |ui| {
                    for device in DeviceType::all() {
                        ui.selectable_value(&mut draft.device_type, *device, device.label());
                    }
                });
            ui.end_row();

            ui.label("Business justification");
            ui.add(
                egui::TextEdit::multiline(&mut draft.justification)
                    .desired_rows(4)
                    .desired_width(theme::FORM_FIELD_WIDTH)
                    .hint_text("Explain why this device is required and the impact if not approved."),
            );
            ui.end_row();
            error_row(ui, errors.get(Field::Justification));

            text_row(ui, "Start date", &mut draft.start_date, "YYYY-MM-DD");
            error_row(ui, errors.get(Field::StartDate));

            text_row(ui, "End date", &mut draft.end_date, "YYYY-MM-DD");
            error_row(ui, errors.get(Field::EndDate));

            text_row(ui, "Estimated cost (USD)", &mut draft.cost, "0.00");
            error_row(ui, errors.get(Field::Cost));

            ui.label("Urgency");
            egui::ComboBox::from_id_salt("urgency")
                .selected_text(draft.urgency.label())
                .show_ui(ui, |ui| {
                    for urgency in Urgency::all() {
                        ui.selectable_value(&mut draft.urgency, *urgency, urgency.label());
                    }
                });
            ui.end_row();

            text_row(ui, "Manager email", &mut draft.manager_email, "manager@company.com");
            error_row(ui, errors.get(Field::ManagerEmail));
        });

    ui.add_space(6.0);
    ui.checkbox(&mut draft.requires_admin_access, "Requires admin access");
    ui.checkbox(
        &mut draft.needs_accessories,
        "Include accessories (dock, monitor, etc.)",
    );
    ui.checkbox(
        &mut draft.acknowledge_policy,
        "I acknowledge the device policy and usage guidelines",
    );
    if let Some(message) = errors.get(Field::AcknowledgePolicy) {
        ui.label(egui::RichText::new(message).small().color(theme::ERROR_TEXT));
    }

    ui.add_space(8.0);
    let submit = egui::Button::new(egui::RichText::new("Submit request").color(egui::Color32::WHITE))
        .fill(theme::ACCENT);
    if ui.add(submit).clicked() {
        state.submit_draft();
    }

    // Success banner, hidden again after a few seconds.
    if let Some(at) = state.submitted_at {
        let shown_for = Duration::from_secs(SUBMIT_BANNER_SECS);
        if at.elapsed() < shown_for {
            ui.colored_label(
                theme::SUCCESS_TEXT,
                "Request submitted successfully. You can track it in the Admin dashboard.",
            );
            ui.ctx().request_repaint_after(shown_for.saturating_sub(at.elapsed()));
        } else {
            state.submitted_at = None;
        }
    }

    ui.add_space(12.0);
    ui.collapsing("Guidelines", |ui| {
        ui.label("\u{2022} Provide a clear business justification.");
        ui.label("\u{2022} Choose realistic dates and budgets.");
        ui.label("\u{2022} Manager email is required for notifications.");
        ui.label("\u{2022} Mark urgency accurately to help prioritisation.");
    });
    ui.collapsing("Review timeline", |ui| {
        ui.label(
            "Most requests are reviewed within 2 business days. \
             Critical requests may be expedited.",
        );
    });
}

/// Label + single-line text edit, as one grid row.
fn text_row(ui: &mut egui::Ui, label: &str, value: &mut String, hint: &str) {
    ui.label(label);
    ui.add(
        egui::TextEdit::singleline(value)
            .hint_text(hint)
            .desired_width(theme::FORM_FIELD_WIDTH),
    );
    ui.end_row();
}

/// Inline error under the previous row, if any.
fn error_row(ui: &mut egui::Ui, message: Option<&str>) {
    if let Some(message) = message {
        ui.label("");
        ui.label(egui::RichText::new(message).small().color(theme::ERROR_TEXT));
        ui.end_row();
    }
}
