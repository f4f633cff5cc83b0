use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::color::series_color;
use crate::data::error::Result;
use crate::data::model::{PlotSeries, ViewMode};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Windowed line plot (central panel)
// ---------------------------------------------------------------------------

/// Render the current window. `series` is `None` when no plot is requested.
pub fn window_plot(ui: &mut Ui, state: &AppState, series: Option<&Result<Vec<PlotSeries>>>) {
    let (Some(mode), Some(series)) = (state.view_mode(), series) else {
        ui.centered_and_justified(|ui: &mut Ui| {
            let hint = if state.processor.is_loaded() {
                "Press “Plot Normalized” or “Plot Original”"
            } else {
                "Select a signal and background file, then press “Load Data”"
            };
            ui.heading(hint);
        });
        return;
    };

    ui.heading(mode.title());

    let series = match series {
        Ok(series) => series,
        Err(e) => {
            ui.label(RichText::new(e.to_string()).color(Color32::RED));
            return;
        }
    };

    Plot::new("window_plot")
        .legend(Legend::default())
        .x_axis_label("Sample index")
        .y_axis_label(match mode {
            ViewMode::Normalized => "Normalized value",
            ViewMode::Original(_) => "Value",
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for s in series {
                let points: PlotPoints = s
                    .values
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| [(s.offset + i) as f64, v])
                    .collect();

                let line = Line::new(points)
                    .name(s.label())
                    .color(series_color(s.channel, s.kind))
                    .width(1.5);

                plot_ui.line(line);
            }
        });
}
