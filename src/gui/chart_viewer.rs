//! Chart Viewer Widget
//! Central scrollable page: title, description, load banner and the four figures.

use crate::charts::{ChartPlotter, ChartState};
use crate::config::DashboardConfig;
use crate::presenter::{Page, PageState};
use egui::{Color32, RichText, ScrollArea};

const SECTION_SPACING: f32 = 20.0;
const PAGE_WIDTH: f32 = 1000.0;

const SUCCESS_COLOR: Color32 = Color32::from_rgb(40, 167, 69);
const ERROR_COLOR: Color32 = Color32::from_rgb(220, 53, 69);

/// Draws the page and keeps each chart's interaction state.
#[derive(Default)]
pub struct ChartViewer {
    states: Vec<ChartState>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset interaction state for a freshly built page.
    pub fn set_page(&mut self, page: &Page) {
        self.states = page
            .sections
            .iter()
            .map(|s| ChartState::for_spec(&s.chart))
            .collect();
    }

    pub fn show(&mut self, ui: &mut egui::Ui, config: &DashboardConfig, state: &PageState) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.set_max_width(PAGE_WIDTH);

                ui.heading(RichText::new(&config.title).size(24.0).strong());
                ui.add_space(6.0);
                ui.label(&config.description);
                ui.add_space(10.0);

                match state {
                    PageState::Loading => {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label("Loading data...");
                        });
                    }
                    PageState::Failed(error) => {
                        Self::banner(ui, error, ERROR_COLOR);
                    }
                    PageState::Ready(page) => {
                        Self::banner(ui, &page.status, SUCCESS_COLOR);
                        self.draw_sections(ui, page, config);
                    }
                }
            });
    }

    fn draw_sections(&mut self, ui: &mut egui::Ui, page: &Page, config: &DashboardConfig) {
        if self.states.len() != page.sections.len() {
            self.set_page(page);
        }

        for (idx, (section, chart_state)) in
            page.sections.iter().zip(self.states.iter_mut()).enumerate()
        {
            ui.add_space(SECTION_SPACING);
            ui.label(RichText::new(&section.header).size(18.0).strong());
            ui.add_space(6.0);
            ChartPlotter::draw_chart(
                ui,
                &format!("figure_{}", idx + 1),
                &section.chart,
                chart_state,
                config.frame_interval,
            );
        }
        ui.add_space(SECTION_SPACING);
    }

    fn banner(ui: &mut egui::Ui, text: &str, color: Color32) {
        egui::Frame::none()
            .rounding(5.0)
            .stroke(egui::Stroke::new(1.5, color))
            .fill(color.gamma_multiply(0.15))
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(text).color(color));
            });
    }
}
