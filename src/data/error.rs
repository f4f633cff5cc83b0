use std::path::PathBuf;

use thiserror::Error;

use super::model::Channel;

/// Result alias for processor operations.
pub type Result<T> = std::result::Result<T, ProcessorError>;

/// Failures reported by the data pipeline.
///
/// Every variant leaves the processor's previously loaded data untouched.
#[derive(Error, Debug)]
pub enum ProcessorError {
    /// A paired file is missing, unreadable or malformed, or the signal and
    /// background files have different row counts.
    #[error("failed to load {}", path.display())]
    DataLoad {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// Statistics requested over a zero-length window.
    #[error("window [{start}, {end}) contains no samples")]
    EmptyWindow { start: usize, end: usize },

    /// Min-max normalization of a constant channel.
    #[error("channel {channel} is constant, min-max normalization is undefined")]
    DegenerateChannel { channel: Channel },

    /// A plot or export was requested with nothing selected.
    #[error("no channel or plot type selected")]
    NoChannelSelected,

    #[error("no data loaded")]
    NoData,

    /// Creating the output directory or writing a file failed.
    #[error("failed to write {}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

impl ProcessorError {
    pub fn data_load(path: impl Into<PathBuf>, source: anyhow::Error) -> Self {
        Self::DataLoad {
            path: path.into(),
            source,
        }
    }

    pub fn export(path: impl Into<PathBuf>, source: anyhow::Error) -> Self {
        Self::Export {
            path: path.into(),
            source,
        }
    }
}
