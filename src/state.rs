use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::config::PreviewConfig;
use crate::data::discovery::{Candidates, list_candidates};
use crate::data::error::{ProcessorError, Result};
use crate::data::model::{
    ChannelSet, DataType, PlotSeries, SeriesKind, ViewMode, ViewWindow, select_channels,
};
use crate::data::processor::SignalProcessor;

// ---------------------------------------------------------------------------
// Status line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Info(String),
    Error(String),
}

/// Which plot button was pressed last. Turned into a [`ViewMode`] each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotKind {
    Normalized,
    Original,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: PreviewConfig,

    /// Loaded data and the operations over it.
    pub processor: SignalProcessor,

    /// File names offered by the two pickers.
    pub candidates: Candidates,
    pub signal_file: Option<String>,
    pub background_file: Option<String>,

    pub data_type: DataType,
    /// Ticked plot types of the original-data view.
    pub series_selection: BTreeSet<SeriesKind>,

    pub start: usize,
    pub window_len: usize,

    /// Plot on screen, `None` when cleared.
    pub plot_kind: Option<PlotKind>,

    /// Status / error message shown in the UI.
    pub status: Option<Status>,
}

impl AppState {
    pub fn new(config: PreviewConfig) -> Self {
        let mut state = Self {
            processor: SignalProcessor::new(),
            candidates: Candidates::default(),
            signal_file: None,
            background_file: None,
            data_type: config.default_data_type,
            series_selection: BTreeSet::new(),
            start: config.default_start,
            window_len: config.default_window,
            plot_kind: None,
            status: None,
            config,
        };
        state.refresh_candidates();
        state
    }

    fn set_error(&mut self, message: String) {
        log::error!("{message}");
        self.status = Some(Status::Error(message));
    }

    fn set_info(&mut self, message: String) {
        log::info!("{message}");
        self.status = Some(Status::Info(message));
    }

    fn report(&mut self, context: &str, err: ProcessorError) {
        self.set_error(format!("{context}: {:#}", anyhow::Error::new(err)));
    }

    /// Re-scan the base directory for signal/background files.
    pub fn refresh_candidates(&mut self) {
        let config = &self.config;
        match list_candidates(&config.base_dir, &config.file_prefix, &config.background_suffix) {
            Ok(candidates) => {
                log::debug!(
                    "Found {} signal and {} background files",
                    candidates.signals.len(),
                    candidates.backgrounds.len()
                );
                if let Some(name) = &self.signal_file {
                    if !candidates.signals.contains(name) {
                        self.signal_file = None;
                    }
                }
                if let Some(name) = &self.background_file {
                    if !candidates.backgrounds.contains(name) {
                        self.background_file = None;
                    }
                }
                self.candidates = candidates;
            }
            Err(e) => {
                self.candidates = Candidates::default();
                self.signal_file = None;
                self.background_file = None;
                self.set_error(format!("Error listing files: {e:#}"));
            }
        }
    }

    /// Switch to another base directory and re-scan it.
    pub fn set_base_dir(&mut self, dir: PathBuf) {
        log::info!("Base directory set to {}", dir.display());
        self.config.base_dir = dir;
        self.signal_file = None;
        self.background_file = None;
        self.status = None;
        self.refresh_candidates();
    }

    /// Load the currently selected pair. Prior data survives a failure.
    pub fn load_selected(&mut self) {
        let (signal, background) = match (self.signal_file.clone(), self.background_file.clone()) {
            (Some(signal), Some(background)) => (
                self.config.base_dir.join(signal),
                self.config.base_dir.join(background),
            ),
            _ => {
                self.set_error("Select a signal file and a background file first".to_string());
                return;
            }
        };

        match self.processor.load(&signal, &background) {
            Ok(summary) => {
                self.set_info(format!("Data loaded successfully ({} samples)", summary.samples));
            }
            Err(e) => self.report("Error loading data", e),
        }
    }

    pub fn channels(&self) -> ChannelSet {
        select_channels(self.data_type)
    }

    /// Current start/length clamped to the loaded data.
    pub fn window(&self) -> ViewWindow {
        self.processor.window(self.start, self.window_len)
    }

    /// Upper bounds for the start and window-size sliders.
    pub fn slider_bounds(&self) -> (usize, usize) {
        let n = self.processor.len();
        let max_start = n.saturating_sub(self.window_len);
        let max_window = n.saturating_sub(self.start).max(1);
        (max_start, max_window)
    }

    /// The request handed to the processor for the plot on screen.
    pub fn view_mode(&self) -> Option<ViewMode> {
        self.plot_kind.map(|kind| match kind {
            PlotKind::Normalized => ViewMode::Normalized,
            PlotKind::Original => ViewMode::Original(self.series_selection.clone()),
        })
    }

    /// Series for the plot on screen; `None` when nothing is plotted.
    pub fn current_series(&self) -> Option<Result<Vec<PlotSeries>>> {
        let mode = self.view_mode()?;
        Some(self.processor.series(&mode, &self.channels(), self.window()))
    }

    pub fn show_normalized(&mut self) {
        if !self.processor.is_loaded() {
            self.set_error("Please load data first!".to_string());
            return;
        }
        self.plot_kind = Some(PlotKind::Normalized);
    }

    /// Switch to the original-data view. Refused when no plot type is
    /// ticked, leaving the current plot in place.
    pub fn show_original(&mut self) {
        if !self.processor.is_loaded() {
            self.set_error("Please load data first!".to_string());
            return;
        }
        if self.series_selection.is_empty() {
            self.report("Please select at least one plot type", ProcessorError::NoChannelSelected);
            return;
        }
        self.plot_kind = Some(PlotKind::Original);
    }

    pub fn clear_plot(&mut self) {
        self.plot_kind = None;
    }

    pub fn export_normalized(&mut self) {
        let dir = self.config.normalized_export_dir();
        match self.processor.export_normalized(&dir, &self.channels()) {
            Ok(paths) => self.set_info(format!(
                "Normalized data saved successfully ({} files in {})",
                paths.len(),
                dir.display()
            )),
            Err(e) => self.report("Error saving normalized data", e),
        }
    }

    pub fn export_segment(&mut self) {
        let dir = self.config.segment_export_dir();
        let window = self.window();
        match self.processor.export_segment(&dir, window, &self.channels()) {
            Ok(paths) => self.set_info(format!(
                "Data segments [{}, {}) saved successfully ({} files in {})",
                window.start,
                window.end,
                paths.len(),
                dir.display()
            )),
            Err(e) => self.report("Error saving data segments", e),
        }
    }
}
