use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::series_color;
use crate::data::error::Result;
use crate::data::model::{DataType, PlotSeries, SeriesKind};
use crate::state::{AppState, Status};

// ---------------------------------------------------------------------------
// Left side panel – file selection, actions, window controls
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Select signal and background files");
            ui.label(
                RichText::new(state.config.base_dir.display().to_string())
                    .small()
                    .weak(),
            );
            ui.separator();

            file_pickers(ui, state);
            ui.separator();

            action_buttons(ui, state);
            ui.separator();

            // ---- Data type selection ----
            ui.strong("Data Type Selection");
            ui.horizontal(|ui: &mut Ui| {
                for dt in DataType::ALL {
                    ui.radio_value(&mut state.data_type, dt, dt.label());
                }
            });
            ui.separator();

            // ---- Plot type selection (original-data view) ----
            ui.strong("Plot Type Selection");
            ui.horizontal(|ui: &mut Ui| {
                for kind in SeriesKind::RAW {
                    let mut checked = state.series_selection.contains(&kind);
                    if ui.checkbox(&mut checked, kind.short_label()).changed() {
                        if checked {
                            state.series_selection.insert(kind);
                        } else {
                            state.series_selection.remove(&kind);
                        }
                    }
                }
            });
            ui.separator();

            window_controls(ui, state);
        });
}

fn file_pickers(ui: &mut Ui, state: &mut AppState) {
    egui::Grid::new("file_pickers")
        .num_columns(2)
        .show(ui, |ui: &mut Ui| {
            ui.label("Signal file:");
            file_combo(ui, "signal_file", &state.candidates.signals, &mut state.signal_file);
            ui.end_row();

            ui.label("Background file:");
            file_combo(
                ui,
                "background_file",
                &state.candidates.backgrounds,
                &mut state.background_file,
            );
            ui.end_row();
        });
}

fn file_combo(ui: &mut Ui, id: &str, names: &[String], selected: &mut Option<String>) {
    let text = selected.clone().unwrap_or_else(|| "—".to_string());
    egui::ComboBox::from_id_salt(id)
        .selected_text(text)
        .width(220.0)
        .show_ui(ui, |ui: &mut Ui| {
            if names.is_empty() {
                ui.label("No matching files");
            }
            for name in names {
                let is_selected = selected.as_deref() == Some(name.as_str());
                if ui.selectable_label(is_selected, name).clicked() {
                    *selected = Some(name.clone());
                }
            }
        });
}

fn action_buttons(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        if ui.button("Load Data").clicked() {
            state.load_selected();
        }
        if ui.button("Plot Normalized").clicked() {
            state.show_normalized();
        }
        if ui.button("Plot Original").clicked() {
            state.show_original();
        }
        if ui.button("Save Norm Data").clicked() {
            state.export_normalized();
        }
        if ui.button("Save Data Segments").clicked() {
            state.export_segment();
        }
        if ui.button("Clear").clicked() {
            state.clear_plot();
        }
    });
}

/// Typed values may lie outside the slider ranges; the processor clamps them.
fn window_controls(ui: &mut Ui, state: &mut AppState) {
    let (max_start, max_window) = state.slider_bounds();
    let loaded = state.processor.is_loaded();

    ui.strong("Window");
    egui::Grid::new("window_controls")
        .num_columns(3)
        .show(ui, |ui: &mut Ui| {
            ui.label("Start Index:");
            ui.add(egui::DragValue::new(&mut state.start).speed(1.0));
            if loaded {
                ui.add(
                    egui::Slider::new(&mut state.start, 0..=max_start)
                        .clamping(egui::SliderClamping::Never)
                        .show_value(false),
                );
            }
            ui.end_row();

            ui.label("Window Size:");
            ui.add(egui::DragValue::new(&mut state.window_len).range(1..=usize::MAX).speed(1.0));
            if loaded {
                ui.add(
                    egui::Slider::new(&mut state.window_len, 1..=max_window)
                        .clamping(egui::SliderClamping::Never)
                        .show_value(false),
                );
            }
            ui.end_row();
        });

    if loaded {
        let window = state.window();
        ui.label(format!(
            "Showing [{}, {}) of {} samples",
            window.start,
            window.end,
            state.processor.len()
        ));
    }
}

// ---------------------------------------------------------------------------
// Bottom panel – window statistics
// ---------------------------------------------------------------------------

/// Per-series mean/std over the current window.
pub fn stats_table(ui: &mut Ui, series: Option<&Result<Vec<PlotSeries>>>) {
    let Some(Ok(series)) = series else {
        ui.label(RichText::new("No window statistics").weak());
        return;
    };

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(180.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Series");
            });
            header.col(|ui| {
                ui.strong("Mean");
            });
            header.col(|ui| {
                ui.strong("Std");
            });
            header.col(|ui| {
                ui.strong("Samples");
            });
        })
        .body(|mut body| {
            for s in series {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        let name = format!("{} {}", s.channel.label(), s.kind.legend_name());
                        ui.label(RichText::new(name).color(series_color(s.channel, s.kind)));
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.3}", s.stats.mean));
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.3}", s.stats.std));
                    });
                    row.col(|ui| {
                        ui.label(s.values.len().to_string());
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Choose base directory…").clicked() {
                choose_base_dir(state);
                ui.close_menu();
            }
            if ui.button("Rescan").clicked() {
                state.refresh_candidates();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Exit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();

        if let Some(data) = state.processor.data() {
            let name = data
                .signal_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ui.label(format!("{name}: {} samples", data.len()));
            ui.separator();
        }

        match &state.status {
            Some(Status::Error(msg)) => {
                ui.label(RichText::new(msg).color(Color32::RED));
            }
            Some(Status::Info(msg)) => {
                ui.label(msg);
            }
            None => {}
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn choose_base_dir(state: &mut AppState) {
    let dir = rfd::FileDialog::new()
        .set_title("Choose data directory")
        .set_directory(&state.config.base_dir)
        .pick_folder();

    if let Some(dir) = dir {
        state.set_base_dir(dir);
    }
}
