use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Channel – one of the two measured quantities per row
// ---------------------------------------------------------------------------

/// The two columns of a paired file. `A` is the first column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Channel {
    A,
    B,
}

impl Channel {
    /// Name used in legends and export file names.
    pub fn label(self) -> &'static str {
        match self {
            Channel::A => "PIB",
            Channel::B => "PIF",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered set of channels; iteration always yields `A` before `B`.
pub type ChannelSet = BTreeSet<Channel>;

// ---------------------------------------------------------------------------
// DataType – the channel selector shown as radio buttons
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DataType {
    #[default]
    #[serde(rename = "PIB/PIF")]
    Both,
    #[serde(rename = "PIB")]
    ChannelA,
    #[serde(rename = "PIF")]
    ChannelB,
}

impl DataType {
    pub const ALL: [DataType; 3] = [DataType::Both, DataType::ChannelA, DataType::ChannelB];

    pub fn label(self) -> &'static str {
        match self {
            DataType::Both => "PIB/PIF",
            DataType::ChannelA => "PIB",
            DataType::ChannelB => "PIF",
        }
    }
}

/// Resolve a data-type selector into the channels it covers.
pub fn select_channels(data_type: DataType) -> ChannelSet {
    match data_type {
        DataType::Both => ChannelSet::from([Channel::A, Channel::B]),
        DataType::ChannelA => ChannelSet::from([Channel::A]),
        DataType::ChannelB => ChannelSet::from([Channel::B]),
    }
}

// ---------------------------------------------------------------------------
// ChannelPair / LoadedData
// ---------------------------------------------------------------------------

/// Two equally long sequences, one per channel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelPair {
    pub a: Vec<f64>,
    pub b: Vec<f64>,
}

impl ChannelPair {
    pub fn channel(&self, channel: Channel) -> &[f64] {
        match channel {
            Channel::A => &self.a,
            Channel::B => &self.b,
        }
    }

    pub fn len(&self) -> usize {
        self.a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }
}

/// Everything produced by one successful load. Replaced wholesale by the next.
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub signal_path: PathBuf,
    pub background_path: PathBuf,
    /// Signal file as read.
    pub raw: ChannelPair,
    /// Background file as read.
    pub background: ChannelPair,
    /// `raw - background`, per channel.
    pub derived: ChannelPair,
    /// `derived`, min-max scaled per channel.
    pub normalized: ChannelPair,
}

impl LoadedData {
    /// Number of samples per channel.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// The full-length sequence backing a plot series.
    pub fn values(&self, channel: Channel, kind: SeriesKind) -> &[f64] {
        let pair = match kind {
            SeriesKind::Background => &self.background,
            SeriesKind::Original => &self.raw,
            SeriesKind::Subtracted => &self.derived,
            SeriesKind::Normalized => &self.normalized,
        };
        pair.channel(channel)
    }
}

/// Returned by a successful load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadSummary {
    pub samples: usize,
    pub signal_path: PathBuf,
    pub background_path: PathBuf,
}

// ---------------------------------------------------------------------------
// ViewWindow / WindowStats
// ---------------------------------------------------------------------------

/// Half-open index range `[start, end)` into the loaded sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewWindow {
    pub start: usize,
    pub end: usize,
}

impl ViewWindow {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Slice `values` to this window. The window must lie inside `values`.
    pub fn slice<'a>(&self, values: &'a [f64]) -> &'a [f64] {
        &values[self.start..self.end]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStats {
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
}

// ---------------------------------------------------------------------------
// Plot requests
// ---------------------------------------------------------------------------

/// Which derived sequence a plot line shows.
///
/// Declaration order is the drawing order of the original-data view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SeriesKind {
    Background,
    Original,
    Subtracted,
    Normalized,
}

impl SeriesKind {
    /// Kinds offered as checkboxes in the original-data view.
    pub const RAW: [SeriesKind; 3] = [
        SeriesKind::Background,
        SeriesKind::Original,
        SeriesKind::Subtracted,
    ];

    /// Checkbox label.
    pub fn short_label(self) -> &'static str {
        match self {
            SeriesKind::Background => "Bg",
            SeriesKind::Original => "Orig",
            SeriesKind::Subtracted => "Orig-Bg",
            SeriesKind::Normalized => "Norm",
        }
    }

    /// Legend wording, e.g. `PIB Background`.
    pub fn legend_name(self) -> &'static str {
        match self {
            SeriesKind::Background => "Background",
            SeriesKind::Original => "Original",
            SeriesKind::Subtracted => "(Orig-Bg)",
            SeriesKind::Normalized => "Normalized",
        }
    }
}

/// What the caller wants drawn. Passed on every redraw; never stored by the
/// processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMode {
    Normalized,
    /// Original-data view with the ticked series kinds.
    Original(BTreeSet<SeriesKind>),
}

impl ViewMode {
    pub fn title(&self) -> &'static str {
        match self {
            ViewMode::Normalized => "Normalized Data Plot",
            ViewMode::Original(_) => "Original Data Plot",
        }
    }
}

/// One windowed line ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    pub channel: Channel,
    pub kind: SeriesKind,
    /// Absolute index of `values[0]`.
    pub offset: usize,
    pub values: Vec<f64>,
    pub stats: WindowStats,
}

impl PlotSeries {
    pub fn label(&self) -> String {
        format!(
            "{} {} (mean={:.3}, std={:.3})",
            self.channel.label(),
            self.kind.legend_name(),
            self.stats.mean,
            self.stats.std
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_channels_maps_each_selector() {
        assert_eq!(
            select_channels(DataType::Both).into_iter().collect::<Vec<_>>(),
            vec![Channel::A, Channel::B]
        );
        assert_eq!(select_channels(DataType::ChannelA), ChannelSet::from([Channel::A]));
        assert_eq!(select_channels(DataType::ChannelB), ChannelSet::from([Channel::B]));
    }

    #[test]
    fn data_type_serializes_as_selector_label() {
        for dt in DataType::ALL {
            let json = serde_json::to_string(&dt).unwrap();
            assert_eq!(json, format!("\"{}\"", dt.label()));
            let back: DataType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, dt);
        }
    }

    #[test]
    fn plot_series_label_formats_stats() {
        let series = PlotSeries {
            channel: Channel::B,
            kind: SeriesKind::Subtracted,
            offset: 0,
            values: vec![],
            stats: WindowStats {
                mean: 0.12345,
                std: 2.0,
            },
        };
        assert_eq!(series.label(), "PIF (Orig-Bg) (mean=0.123, std=2.000)");
    }
}
