use std::path::{Path, PathBuf};

use anyhow::anyhow;

use super::error::{ProcessorError, Result};
use super::export;
use super::loader::read_pair_file;
use super::model::{
    Channel, ChannelPair, ChannelSet, LoadSummary, LoadedData, PlotSeries, SeriesKind,
    ViewMode, ViewWindow, WindowStats,
};

// ---------------------------------------------------------------------------
// Pure array operations
// ---------------------------------------------------------------------------

/// Min-max scale `values` into `[0, 1]`.
///
/// Returns `None` for a constant (or empty) sequence, where the scale is
/// undefined.
pub fn normalize(values: &[f64]) -> Option<Vec<f64>> {
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    // Also rejects NaN/inf ranges.
    if !(range > 0.0 && range.is_finite()) {
        return None;
    }
    Some(values.iter().map(|&v| (v - min) / range).collect())
}

/// Clamp a caller-supplied `start`/`length` to `data_len`.
///
/// Saturates instead of failing: a start past the end yields an empty
/// window at `data_len`.
pub fn compute_window(start: usize, length: usize, data_len: usize) -> ViewWindow {
    let start = start.min(data_len);
    let end = start.saturating_add(length).min(data_len);
    ViewWindow { start, end }
}

/// Mean and population standard deviation of `values[window]`.
pub fn channel_stats(values: &[f64], window: ViewWindow) -> Result<WindowStats> {
    let window = compute_window(window.start, window.len(), values.len());
    if window.is_empty() {
        return Err(ProcessorError::EmptyWindow {
            start: window.start,
            end: window.end,
        });
    }
    let slice = window.slice(values);
    let n = slice.len() as f64;
    let mean = slice.iter().sum::<f64>() / n;
    let variance = slice.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    Ok(WindowStats {
        mean,
        std: variance.sqrt(),
    })
}

fn subtract(signal: &[f64], background: &[f64]) -> Vec<f64> {
    signal
        .iter()
        .zip(background)
        .map(|(s, b)| s - b)
        .collect()
}

// ---------------------------------------------------------------------------
// SignalProcessor
// ---------------------------------------------------------------------------

/// Owns the loaded signal/background pair and everything derived from it.
#[derive(Debug, Default)]
pub struct SignalProcessor {
    data: Option<LoadedData>,
}

impl SignalProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently loaded data, if any load has succeeded.
    pub fn data(&self) -> Option<&LoadedData> {
        self.data.as_ref()
    }

    /// Samples per channel, `0` before the first load.
    pub fn len(&self) -> usize {
        self.data.as_ref().map_or(0, LoadedData::len)
    }

    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    /// Load a signal/background pair and derive the subtracted and
    /// normalized sequences.
    ///
    /// Either everything is replaced or, on error, nothing is.
    pub fn load(&mut self, signal_path: &Path, background_path: &Path) -> Result<LoadSummary> {
        let data = build_loaded_data(signal_path, background_path)?;
        let summary = LoadSummary {
            samples: data.len(),
            signal_path: data.signal_path.clone(),
            background_path: data.background_path.clone(),
        };
        log::info!(
            "Loaded {} samples from {} (background {})",
            summary.samples,
            signal_path.display(),
            background_path.display()
        );
        self.data = Some(data);
        Ok(summary)
    }

    fn loaded(&self) -> Result<&LoadedData> {
        self.data.as_ref().ok_or(ProcessorError::NoData)
    }

    /// Clamp `start`/`length` against the loaded data.
    pub fn window(&self, start: usize, length: usize) -> ViewWindow {
        compute_window(start, length, self.len())
    }

    /// Windowed lines for a plot request.
    ///
    /// Original-data series are ordered by kind, then channel.
    pub fn series(
        &self,
        mode: &ViewMode,
        channels: &ChannelSet,
        window: ViewWindow,
    ) -> Result<Vec<PlotSeries>> {
        let data = self.loaded()?;
        if channels.is_empty() {
            return Err(ProcessorError::NoChannelSelected);
        }

        let kinds: Vec<SeriesKind> = match mode {
            ViewMode::Normalized => vec![SeriesKind::Normalized],
            ViewMode::Original(kinds) if kinds.is_empty() => {
                return Err(ProcessorError::NoChannelSelected);
            }
            ViewMode::Original(kinds) => kinds.iter().copied().collect(),
        };

        let window = compute_window(window.start, window.len(), data.len());
        let mut out = Vec::with_capacity(kinds.len() * channels.len());
        for kind in kinds {
            for &channel in channels {
                let values = data.values(channel, kind);
                let stats = channel_stats(values, window)?;
                out.push(PlotSeries {
                    channel,
                    kind,
                    offset: window.start,
                    values: window.slice(values).to_vec(),
                    stats,
                });
            }
        }
        Ok(out)
    }

    /// Write each selected channel's full normalized sequence to
    /// `<out_dir>/<channel>_norm.txt`.
    pub fn export_normalized(&self, out_dir: &Path, channels: &ChannelSet) -> Result<Vec<PathBuf>> {
        let data = self.loaded()?;
        let full = ViewWindow {
            start: 0,
            end: data.len(),
        };
        export::write_channels(out_dir, &data.normalized, full, channels, export::NORMALIZED_SUFFIX)
    }

    /// Write the windowed slice of each selected normalized channel to
    /// `<out_dir>/<channel>_norm_seg.txt`.
    pub fn export_segment(
        &self,
        out_dir: &Path,
        window: ViewWindow,
        channels: &ChannelSet,
    ) -> Result<Vec<PathBuf>> {
        let data = self.loaded()?;
        export::write_channels(out_dir, &data.normalized, window, channels, export::SEGMENT_SUFFIX)
    }
}

fn build_loaded_data(signal_path: &Path, background_path: &Path) -> Result<LoadedData> {
    let raw = read_pair_file(signal_path)
        .map_err(|e| ProcessorError::data_load(signal_path, e))?;
    let background = read_pair_file(background_path)
        .map_err(|e| ProcessorError::data_load(background_path, e))?;

    if raw.len() != background.len() {
        return Err(ProcessorError::data_load(
            background_path,
            anyhow!(
                "signal has {} rows but background has {}",
                raw.len(),
                background.len()
            ),
        ));
    }

    let derived = ChannelPair {
        a: subtract(&raw.a, &background.a),
        b: subtract(&raw.b, &background.b),
    };

    let normalize_channel = |channel: Channel| {
        normalize(derived.channel(channel)).ok_or(ProcessorError::DegenerateChannel { channel })
    };
    let normalized = ChannelPair {
        a: normalize_channel(Channel::A)?,
        b: normalize_channel(Channel::B)?,
    };

    Ok(LoadedData {
        signal_path: signal_path.to_path_buf(),
        background_path: background_path.to_path_buf(),
        raw,
        background,
        derived,
        normalized,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;

    use super::*;
    use crate::data::model::select_channels;
    use crate::data::model::DataType;

    const EPS: f64 = 1e-12;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < EPS, "{actual:?} vs {expected:?}");
        }
    }

    fn write_pair(dir: &Path, name: &str, rows: &[(f64, f64)]) -> PathBuf {
        let mut text = String::from("header 1\nheader 2\n");
        for (a, b) in rows {
            text.push_str(&format!("{a},{b}\n"));
        }
        let path = dir.join(name);
        fs::write(&path, text).unwrap();
        path
    }

    fn loaded_example() -> (tempfile::TempDir, SignalProcessor) {
        let dir = tempfile::tempdir().unwrap();
        let sig = write_pair(dir.path(), "PIBPIF_1.dat", &[(10.0, 20.0), (12.0, 22.0), (14.0, 24.0)]);
        let bg = write_pair(dir.path(), "PIBPIF_1_background.dat", &[(2.0, 2.0); 3]);
        let mut processor = SignalProcessor::new();
        processor.load(&sig, &bg).unwrap();
        (dir, processor)
    }

    #[test]
    fn normalize_maps_into_unit_interval() {
        let values = [3.0, -1.0, 7.5, 0.25, 2.0];
        let norm = normalize(&values).unwrap();
        assert!(norm.iter().all(|v| (0.0..=1.0).contains(v)));
        assert_eq!(norm[1], 0.0);
        assert_eq!(norm[2], 1.0);
    }

    #[test]
    fn normalize_is_affine_invariant() {
        let values = [3.0, -1.0, 7.5, 0.25, 2.0];
        let shifted: Vec<f64> = values.iter().map(|v| v * 4.5 + 100.0).collect();
        assert_close(&normalize(&shifted).unwrap(), &normalize(&values).unwrap());
    }

    #[test]
    fn normalize_rejects_constant_and_empty() {
        assert!(normalize(&[2.0, 2.0, 2.0]).is_none());
        assert!(normalize(&[]).is_none());
    }

    #[test]
    fn compute_window_saturates() {
        assert_eq!(compute_window(5, 1000, 100), ViewWindow { start: 5, end: 100 });
        assert_eq!(compute_window(10, 5, 100), ViewWindow { start: 10, end: 15 });
        assert_eq!(compute_window(150, 5, 100), ViewWindow { start: 100, end: 100 });
        assert_eq!(compute_window(3, usize::MAX, 10), ViewWindow { start: 3, end: 10 });
        assert!(compute_window(4, 0, 10).is_empty());
    }

    #[test]
    fn compute_window_is_always_ordered() {
        for n in [0, 1, 7, 100] {
            for start in [0, 1, 6, 7, 8, 99, 100, 1000] {
                for length in [0, 1, 3, 50, 1000] {
                    let w = compute_window(start, length, n);
                    assert!(w.start <= w.end && w.end <= n, "{start} {length} {n} -> {w:?}");
                }
            }
        }
    }

    #[test]
    fn channel_stats_uses_window_and_population_std() {
        let stats = channel_stats(&[1.0, 2.0, 3.0, 4.0], ViewWindow { start: 1, end: 3 }).unwrap();
        assert!((stats.mean - 2.5).abs() < EPS);
        assert!((stats.std - 0.5).abs() < EPS);
    }

    #[test]
    fn channel_stats_rejects_empty_window() {
        let err = channel_stats(&[1.0, 2.0], ViewWindow { start: 2, end: 2 }).unwrap_err();
        assert!(matches!(err, ProcessorError::EmptyWindow { start: 2, end: 2 }));

        // A window past the data is clamped before it is checked.
        let err = channel_stats(&[1.0, 2.0], ViewWindow { start: 5, end: 9 }).unwrap_err();
        assert!(matches!(err, ProcessorError::EmptyWindow { .. }));
    }

    #[test]
    fn load_subtracts_background_and_normalizes() {
        let (_dir, processor) = loaded_example();
        let data = processor.data().unwrap();
        assert_eq!(processor.len(), 3);
        assert_close(&data.derived.a, &[8.0, 10.0, 12.0]);
        assert_close(&data.derived.b, &[18.0, 20.0, 22.0]);
        assert_close(&data.normalized.a, &[0.0, 0.5, 1.0]);
        assert_close(&data.normalized.b, &[0.0, 0.5, 1.0]);
    }

    #[test]
    fn normalization_is_per_channel() {
        let dir = tempfile::tempdir().unwrap();
        let sig = write_pair(dir.path(), "s.dat", &[(0.0, 100.0), (1.0, 300.0), (2.0, 200.0)]);
        let bg = write_pair(dir.path(), "b.dat", &[(0.0, 0.0); 3]);
        let mut processor = SignalProcessor::new();
        processor.load(&sig, &bg).unwrap();
        let data = processor.data().unwrap();
        assert_close(&data.normalized.a, &[0.0, 0.5, 1.0]);
        assert_close(&data.normalized.b, &[0.0, 1.0, 0.5]);
    }

    #[test]
    fn length_mismatch_keeps_previous_data() {
        let (dir, mut processor) = loaded_example();
        let before = processor.data().unwrap().clone();

        let sig = write_pair(dir.path(), "other.dat", &[(1.0, 1.0), (5.0, 9.0)]);
        let bg = write_pair(dir.path(), "other_background.dat", &[(0.0, 0.0); 3]);
        let err = processor.load(&sig, &bg).unwrap_err();

        match &err {
            ProcessorError::DataLoad { path, source } => {
                assert_eq!(path, &bg);
                assert!(source.to_string().contains("2 rows"), "{source}");
            }
            other => panic!("unexpected error {other:?}"),
        }
        let after = processor.data().unwrap();
        assert_eq!(after.signal_path, before.signal_path);
        assert_eq!(after.normalized, before.normalized);
    }

    #[test]
    fn missing_file_is_data_load_error() {
        let (dir, mut processor) = loaded_example();
        let missing = dir.path().join("missing.dat");
        let err = processor.load(&missing, &missing).unwrap_err();
        assert!(matches!(err, ProcessorError::DataLoad { .. }));
        assert_eq!(processor.len(), 3);
    }

    #[test]
    fn non_finite_value_is_data_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let sig = dir.path().join("s.dat");
        fs::write(&sig, "h1\nh2\nnan,2\n3,4\ninf,1\n").unwrap();
        let bg = write_pair(dir.path(), "b.dat", &[(0.0, 0.0); 3]);
        let mut processor = SignalProcessor::new();
        let err = processor.load(&sig, &bg).unwrap_err();
        assert!(matches!(err, ProcessorError::DataLoad { ref path, .. } if path == &sig));
        assert!(!processor.is_loaded());
    }

    #[test]
    fn constant_channel_is_degenerate() {
        let dir = tempfile::tempdir().unwrap();
        let sig = write_pair(dir.path(), "s.dat", &[(1.0, 5.0), (2.0, 5.0)]);
        let bg = write_pair(dir.path(), "b.dat", &[(0.0, 1.0); 2]);
        let mut processor = SignalProcessor::new();
        let err = processor.load(&sig, &bg).unwrap_err();
        assert!(matches!(err, ProcessorError::DegenerateChannel { channel: Channel::B }));
        assert!(!processor.is_loaded());
    }

    #[test]
    fn series_for_normalized_view() {
        let (_dir, processor) = loaded_example();
        let window = processor.window(1, 5);
        let series = processor
            .series(&ViewMode::Normalized, &select_channels(DataType::Both), window)
            .unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].channel, Channel::A);
        assert_eq!(series[0].offset, 1);
        assert_close(&series[0].values, &[0.5, 1.0]);
        assert!((series[0].stats.mean - 0.75).abs() < EPS);
        assert_eq!(series[1].label(), "PIF Normalized (mean=0.750, std=0.250)");
    }

    #[test]
    fn series_for_original_view_orders_by_kind_then_channel() {
        let (_dir, processor) = loaded_example();
        let kinds = BTreeSet::from([SeriesKind::Subtracted, SeriesKind::Background]);
        let series = processor
            .series(
                &ViewMode::Original(kinds),
                &select_channels(DataType::Both),
                processor.window(0, 3),
            )
            .unwrap();
        let order: Vec<_> = series.iter().map(|s| (s.kind, s.channel)).collect();
        assert_eq!(
            order,
            vec![
                (SeriesKind::Background, Channel::A),
                (SeriesKind::Background, Channel::B),
                (SeriesKind::Subtracted, Channel::A),
                (SeriesKind::Subtracted, Channel::B),
            ]
        );
        assert_close(&series[3].values, &[18.0, 20.0, 22.0]);
    }

    #[test]
    fn series_requires_a_selection() {
        let (_dir, processor) = loaded_example();
        let window = processor.window(0, 3);
        let err = processor
            .series(&ViewMode::Original(BTreeSet::new()), &select_channels(DataType::Both), window)
            .unwrap_err();
        assert!(matches!(err, ProcessorError::NoChannelSelected));

        let err = processor
            .series(&ViewMode::Normalized, &ChannelSet::new(), window)
            .unwrap_err();
        assert!(matches!(err, ProcessorError::NoChannelSelected));
    }

    #[test]
    fn series_over_empty_window_fails() {
        let (_dir, processor) = loaded_example();
        let err = processor
            .series(&ViewMode::Normalized, &select_channels(DataType::ChannelA), processor.window(3, 10))
            .unwrap_err();
        assert!(matches!(err, ProcessorError::EmptyWindow { .. }));
    }

    #[test]
    fn requests_before_load_fail_with_no_data() {
        let processor = SignalProcessor::new();
        let dir = tempfile::tempdir().unwrap();
        let channels = select_channels(DataType::Both);
        assert!(matches!(
            processor.series(&ViewMode::Normalized, &channels, ViewWindow::default()),
            Err(ProcessorError::NoData)
        ));
        assert!(matches!(
            processor.export_normalized(dir.path(), &channels),
            Err(ProcessorError::NoData)
        ));
    }
}
