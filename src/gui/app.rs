//! Dashboard Main Application
//! Main window with status bar and the scrolling page of charts.

use crate::config::DashboardConfig;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::presenter::{self, Page, PageError, PageState};
use crate::report::HtmlReport;
use egui::TopBottomPanel;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

const LOADING_REPAINT: Duration = Duration::from_millis(100);

/// Main application window.
pub struct DashboardApp {
    config: DashboardConfig,
    state: PageState,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Background fetch
    load_rx: Option<Receiver<Result<Page, PageError>>>,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let mut app = Self {
            config,
            state: PageState::Loading,
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            load_rx: None,
        };
        app.start_loading();
        app
    }

    /// Fetch and build the page off the UI thread.
    fn start_loading(&mut self) {
        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        self.control_panel.set_status("Loading data...");

        let config = self.config.clone();
        thread::spawn(move || {
            let _ = tx.send(presenter::load_page(&config));
        });
    }

    /// Check for the loading result
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(result) => self.finish_loading(PageState::from_result(result)),
            Err(TryRecvError::Empty) => self.load_rx = Some(rx),
            Err(TryRecvError::Disconnected) => self.finish_loading(PageState::Failed(
                "Error loading data: loader stopped unexpectedly".to_string(),
            )),
        }
    }

    fn finish_loading(&mut self, state: PageState) {
        match &state {
            PageState::Ready(page) => {
                self.control_panel.set_status(&page.status);
                self.chart_viewer.set_page(page);
            }
            PageState::Failed(error) => self.control_panel.set_error(error),
            PageState::Loading => {}
        }
        self.state = state;
    }

    /// Write the page as HTML and open it in the browser.
    fn handle_export_html(&mut self) {
        let path = self.config.export_path.clone();
        let result = match &self.state {
            PageState::Ready(page) => HtmlReport::write(page, &path),
            PageState::Failed(error) => HtmlReport::write_failure(
                &self.config.title,
                &self.config.description,
                error,
                &path,
            ),
            PageState::Loading => {
                self.control_panel.set_status("Nothing to export yet");
                return;
            }
        };

        match result {
            Ok(()) => {
                self.control_panel
                    .set_status(&format!("Exported {}", path.display()));
                if let Err(e) = open::that(&path) {
                    log::warn!("Could not open {}: {e}", path.display());
                }
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                self.control_panel.set_error(&format!("Export failed: {e:#}"));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        if self.state.is_loading() {
            ctx.request_repaint_after(LOADING_REPAINT);
        }

        TopBottomPanel::top("control_panel").show(ctx, |ui| {
            let action = self
                .control_panel
                .show(ui, &self.config.source_url, !self.state.is_loading());

            match action {
                ControlPanelAction::ExportHtml => self.handle_export_html(),
                ControlPanelAction::None => {}
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui, &self.config, &self.state);
        });
    }
}
