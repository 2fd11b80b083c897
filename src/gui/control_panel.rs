//! Control Panel Widget
//! Left side panel with the period preset selector and manual date override.

use crate::daterange::{DateRange, Preset};
use chrono::NaiveDate;
use egui::{Color32, ComboBox, RichText};

/// Left side control panel driving the date filter.
pub struct ControlPanel {
    pub preset: Preset,
    pub start_input: String,
    pub end_input: String,
    pub status: String,
    pub refresh_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            preset: Preset::default(),
            start_input: String::new(),
            end_input: String::new(),
            status: "Loading data...".to_string(),
            refresh_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the manual inputs from a resolved range.
    pub fn set_range_inputs(&mut self, range: &DateRange) {
        self.start_input = range.start.format("%Y-%m-%d").to_string();
        self.end_input = range.end.format("%Y-%m-%d").to_string();
    }

    /// Parse the manual inputs. `None` when either date is invalid.
    pub fn manual_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = NaiveDate::parse_from_str(self.start_input.trim(), "%Y-%m-%d").ok()?;
        let end = NaiveDate::parse_from_str(self.end_input.trim(), "%Y-%m-%d").ok()?;
        Some((start, end))
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📈 Creative Practice")
                    .size(20.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(RichText::new("Dashboard").size(12.0).color(Color32::GRAY));
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Date Filter Section =====
        ui.label(RichText::new("📅 Date Filter").size(14.0).strong());
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.add_sized([60.0, 20.0], egui::Label::new("Period:"));
            ComboBox::from_id_salt("preset")
                .width(160.0)
                .selected_text(self.preset.label())
                .show_ui(ui, |ui| {
                    for preset in Preset::ALL {
                        if ui
                            .selectable_label(self.preset == preset, preset.label())
                            .clicked()
                        {
                            self.preset = preset;
                            action = ControlPanelAction::PresetChanged;
                        }
                    }
                });
        });

        ui.add_space(10.0);
        ui.label("Or pick manually:");
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([60.0, 20.0], egui::Label::new("Start:"));
            ui.add(
                egui::TextEdit::singleline(&mut self.start_input)
                    .desired_width(120.0)
                    .hint_text("YYYY-MM-DD"),
            );
        });
        ui.add_space(5.0);
        ui.horizontal(|ui| {
            ui.add_sized([60.0, 20.0], egui::Label::new("End:"));
            ui.add(
                egui::TextEdit::singleline(&mut self.end_input)
                    .desired_width(120.0)
                    .hint_text("YYYY-MM-DD"),
            );
        });

        ui.add_space(8.0);
        if ui.button("Apply range").clicked() {
            action = ControlPanelAction::ApplyManual;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Data Section =====
        ui.label(RichText::new("🔄 Data").size(14.0).strong());
        ui.add_space(5.0);

        ui.add_enabled_ui(self.refresh_enabled, |ui| {
            if ui.button("Reload sources").clicked() {
                action = ControlPanelAction::Refresh;
            }
        });

        ui.add_space(10.0);

        let status_color = if self.status.contains("Error") || self.status.contains("Invalid") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Ready") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPanelAction {
    None,
    PresetChanged,
    ApplyManual,
    Refresh,
}
