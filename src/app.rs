use eframe::egui;

use crate::config::PreviewConfig;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DataPreviewApp {
    pub state: AppState,
}

impl DataPreviewApp {
    pub fn new(config: PreviewConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for DataPreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: file selection, actions, window ----
        egui::SidePanel::left("control_panel")
            .default_width(320.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // Series are computed once per frame from the controls above.
        let series = self.state.current_series();

        // ---- Bottom panel: window statistics ----
        egui::TopBottomPanel::bottom("stats_panel")
            .resizable(true)
            .show(ctx, |ui| {
                panels::stats_table(ui, series.as_ref());
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::window_plot(ui, &self.state, series.as_ref());
        });
    }
}
