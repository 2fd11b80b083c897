//! Dashboard Main Application
//! Main window wiring the date filter to per-dataset chart pipelines.
//! Sources are fetched on a background thread; every filter interaction
//! recomputes all charts from the cached raw tables.

use crate::config::{DashboardConfig, DatasetConfig};
use crate::data::{read_csv_bytes, CsvFetcher, SourceCache};
use crate::daterange::{self, DateRange};
use crate::gui::{ChartState, ChartViewer, ControlPanel, ControlPanelAction};
use crate::pipeline::{self, PipelineError};
use chrono::{Local, NaiveDate};
use egui::SidePanel;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;

/// Fetch result from background thread
enum FetchResult {
    Loaded { key: String },
    Failed { key: String, error: String },
    Done,
}

/// Main application window.
pub struct DashboardApp {
    datasets: Vec<DatasetConfig>,
    cache: Arc<SourceCache>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    today: NaiveDate,
    range: DateRange,

    // Async source fetching
    fetch_rx: Option<Receiver<FetchResult>>,
    is_fetching: bool,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let today = Local::now().date_naive();
        let mut control_panel = ControlPanel::new();
        let range = daterange::resolve_preset(control_panel.preset, today);
        control_panel.set_range_inputs(&range);

        let chart_viewer = ChartViewer::new(
            config
                .datasets
                .iter()
                .map(|d| (d.key.clone(), d.title.clone())),
        );

        let mut app = Self {
            datasets: config.datasets,
            cache: Arc::new(SourceCache::new()),
            control_panel,
            chart_viewer,
            today,
            range,
            fetch_rx: None,
            is_fetching: false,
        };
        app.start_fetch(false);
        app
    }

    /// Kick off a background download of every dataset's CSV. With `force`
    /// set, already-cached sources are fetched again.
    fn start_fetch(&mut self, force: bool) {
        if self.is_fetching {
            return;
        }

        let (tx, rx) = channel();
        self.fetch_rx = Some(rx);
        self.is_fetching = true;
        self.control_panel.refresh_enabled = false;
        self.control_panel.set_status("Loading data...");

        let datasets = self.datasets.clone();
        let cache = Arc::clone(&self.cache);

        thread::spawn(move || {
            Self::run_fetch(tx, cache, datasets, force);
        });
    }

    /// Fetch all sources (called from background thread). Each dataset is
    /// fetched and parsed independently so one dead source cannot take the
    /// other charts down.
    fn run_fetch(
        tx: Sender<FetchResult>,
        cache: Arc<SourceCache>,
        datasets: Vec<DatasetConfig>,
        force: bool,
    ) {
        let fetcher = match CsvFetcher::new() {
            Ok(fetcher) => fetcher,
            Err(error) => {
                for dataset in &datasets {
                    let _ = tx.send(FetchResult::Failed {
                        key: dataset.key.clone(),
                        error: error.to_string(),
                    });
                }
                let _ = tx.send(FetchResult::Done);
                return;
            }
        };

        for dataset in &datasets {
            if !force && cache.contains(&dataset.key) {
                let _ = tx.send(FetchResult::Loaded {
                    key: dataset.key.clone(),
                });
                continue;
            }

            let loaded = fetcher
                .fetch(&dataset.file_id)
                .map_err(|e| e.to_string())
                .and_then(|bytes| read_csv_bytes(bytes).map_err(|e| e.to_string()));

            match loaded {
                Ok(df) => {
                    cache.put(&dataset.key, df);
                    let _ = tx.send(FetchResult::Loaded {
                        key: dataset.key.clone(),
                    });
                }
                Err(error) => {
                    tracing::warn!(key = %dataset.key, %error, "dataset fetch failed");
                    let _ = tx.send(FetchResult::Failed {
                        key: dataset.key.clone(),
                        error,
                    });
                }
            }
        }

        let _ = tx.send(FetchResult::Done);
    }

    /// Check for fetch results from the background thread
    fn check_fetch_results(&mut self) {
        let rx = self.fetch_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    FetchResult::Loaded { key } => {
                        self.rebuild_chart(&key);
                    }
                    FetchResult::Failed { key, error } => {
                        self.chart_viewer
                            .set_state(&key, ChartState::Failed(error));
                    }
                    FetchResult::Done => {
                        self.is_fetching = false;
                        self.control_panel.refresh_enabled = true;
                        self.control_panel.set_status("Ready");
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.fetch_rx = Some(rx);
            }
        }
    }

    /// Recompute one dataset's chart from its cached raw table.
    fn rebuild_chart(&mut self, key: &str) {
        let Some(dataset) = self.datasets.iter().find(|d| d.key == key) else {
            return;
        };
        match pipeline::build_chart(&self.cache, dataset, &self.range) {
            Ok(chart) => self.chart_viewer.set_state(key, ChartState::Ready(chart)),
            Err(PipelineError::NotLoaded) => {}
            Err(error) => self
                .chart_viewer
                .set_state(key, ChartState::Failed(error.to_string())),
        }
    }

    /// Recompute every loaded dataset's chart for the current range.
    fn rebuild_all_charts(&mut self) {
        let results = pipeline::build_charts(&self.cache, &self.datasets, &self.range);
        for (key, result) in results {
            match result {
                Ok(chart) => self.chart_viewer.set_state(&key, ChartState::Ready(chart)),
                // Not fetched yet: the card keeps its loading/failed state.
                Err(PipelineError::NotLoaded) => {}
                Err(error) => self
                    .chart_viewer
                    .set_state(&key, ChartState::Failed(error.to_string())),
            }
        }
    }

    /// Apply a preset selection: resolve, pre-populate the pickers, refilter.
    fn handle_preset_changed(&mut self) {
        self.range = daterange::resolve_preset(self.control_panel.preset, self.today);
        self.control_panel.set_range_inputs(&self.range);
        self.rebuild_all_charts();
    }

    /// Apply the manual override: swap if inverted, clamp to the two-year
    /// window, write the resolved pair back into the inputs.
    fn handle_apply_manual(&mut self) {
        match self.control_panel.manual_range() {
            Some(manual) => {
                self.range =
                    daterange::resolve(self.control_panel.preset, self.today, Some(manual));
                self.control_panel.set_range_inputs(&self.range);
                if !self.is_fetching {
                    self.control_panel.set_status("Ready");
                }
                self.rebuild_all_charts();
            }
            None => {
                self.control_panel
                    .set_status("Invalid date, expected YYYY-MM-DD");
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_fetch_results();

        if self.is_fetching {
            ctx.request_repaint();
        }

        // Left panel - date filter
        SidePanel::left("control_panel")
            .min_width(240.0)
            .max_width(280.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::PresetChanged => self.handle_preset_changed(),
                        ControlPanelAction::ApplyManual => self.handle_apply_manual(),
                        ControlPanelAction::Refresh => self.start_fetch(true),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - charts
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
