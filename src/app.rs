use eframe::egui;

use sa3_radar::config::DashboardConfig;
use sa3_radar::data::loader;
use sa3_radar::state::{AppState, StatusMessage};
use sa3_radar::view;

use crate::ui::{self, panels, Action};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RadarApp {
    /// Session state, or the reason the data could not be loaded.
    state: Result<AppState<'static>, LoadFailure>,
    /// Region search box contents.
    search: String,
}

pub struct LoadFailure {
    pub title: String,
    pub message: String,
}

impl RadarApp {
    /// Load the region table (memoized) and start a fresh session.
    pub fn load(config: &DashboardConfig) -> Self {
        match loader::load(&config.source_path, &config.sheet, config.out_of_range) {
            Ok(table) => Self {
                state: Ok(AppState::new(table).with_title(config.title.clone())),
                search: String::new(),
            },
            Err(e) => {
                log::error!("Failed to load {}: {e}", config.source_path.display());
                Self::failed(
                    &config.title,
                    format!("Could not load {}: {e}", config.source_path.display()),
                )
            }
        }
    }

    pub fn failed(title: &str, message: String) -> Self {
        Self {
            state: Err(LoadFailure {
                title: title.to_string(),
                message,
            }),
            search: String::new(),
        }
    }

    pub fn title(&self) -> &str {
        match &self.state {
            Ok(state) => &state.title,
            Err(failure) => &failure.title,
        }
    }
}

impl eframe::App for RadarApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let state = match &mut self.state {
            Ok(state) => state,
            Err(failure) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    panels::load_failure(ui, &failure.title, &failure.message);
                });
                return;
            }
        };

        let mut actions: Vec<Action> = Vec::new();
        let mut downloads = Vec::new();
        {
            let view = view::render(state);

            // ---- Top panel: status bar ----
            egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
                panels::top_bar(ui, &view, &mut actions);
            });

            // ---- Left side panel: score ranges ----
            egui::SidePanel::left("filter_panel")
                .default_width(250.0)
                .resizable(true)
                .show(ctx, |ui| {
                    panels::side_panel(ui, &view, &mut actions);
                });

            // ---- Central panel: selection, chart, downloads ----
            egui::CentralPanel::default().show(ctx, |ui| {
                panels::main_panel(ui, &view, &mut self.search, &mut actions);
            });

            // Encode while the view is still borrowed; saving happens below.
            for action in &actions {
                if let Action::Save(kind) = action {
                    let bytes = match kind {
                        ui::Download::Csv => view.csv_bytes(),
                        ui::Download::Pdf => view.pdf_bytes(),
                    };
                    if let Some(bytes) = bytes {
                        downloads.push((*kind, bytes));
                    }
                }
            }
        }

        for action in actions {
            match action {
                Action::SetRange(column, range) => state.set_range(column, range),
                Action::ResetFilters => state.reset_filters(),
                Action::Toggle(id) => state.toggle_selection(&id),
                Action::ClearSelection => state.clear_selection(),
                Action::Save(_) => {}
            }
        }

        for (kind, bytes) in downloads {
            state.status_message = match ui::save_download(kind, bytes) {
                Ok(Some(path)) => {
                    log::info!("Saved {}", path.display());
                    Some(StatusMessage::Info(format!("Saved {}", path.display())))
                }
                Ok(None) => None,
                Err(e) => {
                    log::error!("Download failed: {e:#}");
                    Some(StatusMessage::Error(format!("Error: {e:#}")))
                }
            };
        }
    }
}
