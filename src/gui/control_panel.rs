//! Control Panel Widget
//! Top bar with the data source, load status and export action.

use egui::{Color32, RichText};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPanelAction {
    None,
    ExportHtml,
}

/// Status bar shown above the page.
pub struct ControlPanel {
    pub status: String,
    pub is_error: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            status: "Ready".to_string(),
            is_error: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
        self.is_error = false;
    }

    pub fn set_error(&mut self, error: &str) {
        self.status = error.to_string();
        self.is_error = true;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, source_url: &str, can_export: bool) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.label(
                RichText::new("📊 Lira Rates")
                    .size(16.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.separator();
            ui.label(RichText::new("📁 Source:").strong());
            ui.label(RichText::new(source_url).size(11.0).color(Color32::GRAY));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add_enabled(can_export, egui::Button::new("💾 Export HTML"))
                    .clicked()
                {
                    action = ControlPanelAction::ExportHtml;
                }

                let color = if self.is_error {
                    Color32::from_rgb(220, 53, 69)
                } else {
                    Color32::from_rgb(40, 167, 69)
                };
                ui.label(RichText::new(&self.status).color(color));
            });
        });
        ui.add_space(4.0);

        action
    }
}
