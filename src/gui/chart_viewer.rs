//! Chart Viewer Widget
//! Scrollable panel with one chart card per dataset. Each card renders its
//! own state, so one broken source never blanks the rest of the view.

use crate::charts::ChartPlotter;
use crate::pipeline::DatasetChart;
use egui::{Color32, RichText, ScrollArea};

const CARD_SPACING: f32 = 15.0;

/// Render state of a single dataset section.
#[derive(Debug, Clone)]
pub enum ChartState {
    Loading,
    Ready(DatasetChart),
    Failed(String),
}

struct Section {
    key: String,
    title: String,
    state: ChartState,
}

/// Scrollable chart display area, one card per configured dataset.
pub struct ChartViewer {
    sections: Vec<Section>,
}

impl ChartViewer {
    /// Sections appear in dataset order, all loading initially.
    pub fn new(datasets: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            sections: datasets
                .into_iter()
                .map(|(key, title)| Section {
                    key,
                    title,
                    state: ChartState::Loading,
                })
                .collect(),
        }
    }

    pub fn set_state(&mut self, key: &str, state: ChartState) {
        if let Some(section) = self.sections.iter_mut().find(|s| s.key == key) {
            section.state = state;
        }
    }

    /// Draw all dataset cards.
    pub fn show(&mut self, ui: &mut egui::Ui) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for section in &self.sections {
                    Self::draw_card(ui, section);
                    ui.add_space(CARD_SPACING);
                }
            });
    }

    fn draw_card(ui: &mut egui::Ui, section: &Section) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());

                ui.horizontal(|ui| {
                    ui.label(RichText::new(&section.title).size(18.0).strong());
                    if let ChartState::Ready(chart) = &section.state {
                        if let Some(median) = chart.median {
                            ui.label(
                                RichText::new(format!("Median: {}", median as i64))
                                    .size(13.0)
                                    .color(crate::charts::MEDIAN_COLOR),
                            );
                        }
                    }
                });
                ui.add_space(8.0);

                match &section.state {
                    ChartState::Loading => {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label(RichText::new("Loading...").color(Color32::GRAY));
                        });
                    }
                    ChartState::Failed(error) => {
                        ui.label(
                            RichText::new(format!("No data: {error}"))
                                .color(Color32::from_rgb(220, 53, 69)),
                        );
                    }
                    ChartState::Ready(chart) => {
                        if chart.series.iter().all(|s| s.points.is_empty()) {
                            ui.label(
                                RichText::new("No data in the selected period")
                                    .color(Color32::GRAY),
                            );
                        } else {
                            ChartPlotter::draw_line_chart(ui, chart);
                        }
                    }
                }
            });
    }
}
