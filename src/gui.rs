// Device Authorization Portal - gui.rs
//
// Top-level eframe::App implementation.
// Wires together the form, dashboard, and dialogs, and runs the export
// file dialogs requested by panels.

use crate::app::state::{AppState, ExportFormat};
use crate::ui;
use crate::util::constants::DEFAULT_JSON_EXPORT_NAME;

/// The Device Authorization Portal application.
pub struct DeviceAuthApp {
    pub state: AppState,
}

impl DeviceAuthApp {
    /// Create a new application instance with the given state.
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Ask for a destination and export the visible requests there.
    fn run_export(&mut self, format: ExportFormat) {
        let (filter_name, extension, default_name) = match format {
            ExportFormat::Csv => ("CSV", "csv", self.state.csv_file_name.clone()),
            ExportFormat::Json => ("JSON", "json", DEFAULT_JSON_EXPORT_NAME.to_string()),
        };

        let Some(dest) = rfd::FileDialog::new()
            .add_filter(filter_name, &[extension])
            .set_file_name(default_name)
            .save_file()
        else {
            return;
        };

        match self.state.export_visible(format, &dest) {
            Ok(n) => {
                self.state.status_message = format!("Exported {n} requests to {filter_name}.");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Export failed");
                self.state.status_message = format!("{filter_name} export failed: {e}");
            }
        }
    }
}

impl eframe::App for DeviceAuthApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Export requested by the dashboard buttons or the menu.
        if let Some(format) = self.state.pending_export.take() {
            self.run_export(format);
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Export CSV\u{2026}").clicked() {
                        self.state.pending_export = Some(ExportFormat::Csv);
                        ui.close_menu();
                    }
                    if ui.button("Export JSON\u{2026}").clicked() {
                        self.state.pending_export = Some(ExportFormat::Json);
                        ui.close_menu();
                    }
                    ui.separator();
                    let has_requests = !self.state.store.is_empty();
                    ui.add_enabled_ui(has_requests, |ui| {
                        if ui.button("Clear All Requests\u{2026}").clicked() {
                            self.state.show_clear_confirm = true;
                            ui.close_menu();
                        }
                    });
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    let label = if self.state.dark_mode {
                        "Light Theme"
                    } else {
                        "Dark Theme"
                    };
                    if ui.button(label).clicked() {
                        self.state.dark_mode = !self.state.dark_mode;
                        ui::theme::apply(ctx, self.state.dark_mode, self.state.ui_font_size);
                        ui.close_menu();
                    }
                });
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.state.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let total = self.state.store.len();
                    let visible = self.state.filtered_indices.len();
                    ui.label(format!("{visible}/{total} requests"));
                    if self.state.debug_mode {
                        ui.label(egui::RichText::new("DEBUG").small().weak());
                    }
                });
            });
        });

        // Left side: request form
        egui::SidePanel::left("request_form")
            .default_width(ui::theme::FORM_PANEL_WIDTH)
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("request_form_scroll")
                    .auto_shrink([false; 2])
                    .show(ui, |ui| {
                        ui::panels::request_form::render(ui, &mut self.state);
                    });
            });

        // Central panel: admin dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            ui::panels::admin::render(ui, &mut self.state);
        });

        ui::panels::confirm::render(ctx, &mut self.state);

        // Exports requested this frame run at the start of the next one.
        if self.state.pending_export.is_some() {
            ctx.request_repaint();
        }
    }
}
