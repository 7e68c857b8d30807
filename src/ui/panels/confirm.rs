// Device Authorization Portal - ui/panels/confirm.rs
//
// Clear-all confirmation dialog. Nothing is deleted until the user
// clicks "Delete all".

use crate::app::state::AppState;

/// Render the confirmation dialog (if `state.show_clear_confirm` is true).
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_clear_confirm {
        return;
    }

    let mut open = true;
    let mut confirmed = false;
    let mut cancelled = false;

    egui::Window::new("Clear all requests")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label("This will permanently delete all requests. Continue?");
            ui.label(
                egui::RichText::new(format!("{} request(s) will be removed.", state.store.len()))
                    .weak(),
            );
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui
                    .button(egui::RichText::new("Delete all").color(crate::ui::theme::ERROR_TEXT))
                    .clicked()
                {
                    confirmed = true;
                }
                if ui.button("Cancel").clicked() {
                    cancelled = true;
                }
            });
        });

    if confirmed {
        state.clear_all();
    } else if cancelled || !open {
        state.show_clear_confirm = false;
    }
}
