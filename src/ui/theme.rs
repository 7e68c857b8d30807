// Device Authorization Portal - ui/theme.rs
//
// Colour scheme, status/urgency colour mapping, and layout constants.
// No dependencies on app state or business logic.

use crate::core::model::{RequestStatus, Urgency};
use egui::Color32;

/// Badge colour for a request status.
pub fn status_colour(status: RequestStatus) -> Color32 {
    match status {
        RequestStatus::Pending => Color32::from_rgb(234, 179, 8), // Yellow 500
        RequestStatus::Approved => Color32::from_rgb(34, 197, 94), // Green 500
        RequestStatus::Rejected => Color32::from_rgb(239, 68, 68), // Red 500
    }
}

/// Subtle badge background for a request status.
pub fn status_bg_colour(status: RequestStatus) -> Color32 {
    match status {
        RequestStatus::Pending => Color32::from_rgba_premultiplied(234, 179, 8, 30),
        RequestStatus::Approved => Color32::from_rgba_premultiplied(34, 197, 94, 30),
        RequestStatus::Rejected => Color32::from_rgba_premultiplied(239, 68, 68, 30),
    }
}

/// Text colour for urgency; `None` uses the default text colour.
pub fn urgency_colour(urgency: Urgency) -> Option<Color32> {
    match urgency {
        Urgency::Critical => Some(Color32::from_rgb(220, 38, 38)), // Red 600
        Urgency::High => Some(Color32::from_rgb(217, 119, 6)),    // Amber 600
        _ => None,
    }
}

/// Inline validation error text.
pub const ERROR_TEXT: Color32 = Color32::from_rgb(248, 113, 113); // Red 400

/// Success banner text.
pub const SUCCESS_TEXT: Color32 = Color32::from_rgb(74, 222, 128); // Green 400

/// Accent for the primary submit button.
pub const ACCENT: Color32 = Color32::from_rgb(249, 115, 22); // Orange 500

/// Apply theme and font size to the egui context.
pub fn apply(ctx: &egui::Context, dark_mode: bool, font_size: f32) {
    ctx.set_visuals(if dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    });

    ctx.style_mut(|style| {
        let scale = font_size / crate::util::constants::DEFAULT_FONT_SIZE;
        for (text_style, font_id) in style.text_styles.iter_mut() {
            let base = match text_style {
                egui::TextStyle::Small => 10.0,
                egui::TextStyle::Heading => 20.0,
                _ => crate::util::constants::DEFAULT_FONT_SIZE,
            };
            font_id.size = base * scale;
        }
    });
}

/// Layout constants.
pub const FORM_PANEL_WIDTH: f32 = 420.0;
pub const FORM_FIELD_WIDTH: f32 = 260.0;
pub const NOTE_COLUMN_WIDTH: f32 = 180.0;
