use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use super::error::{ProcessorError, Result};
use super::model::{ChannelPair, ChannelSet, ViewWindow};
use super::processor::compute_window;

/// File name suffix of full-length normalized exports.
pub const NORMALIZED_SUFFIX: &str = "_norm.txt";
/// File name suffix of windowed exports.
pub const SEGMENT_SUFFIX: &str = "_norm_seg.txt";

/// Write `pair[window]` for every channel in `channels` to
/// `<out_dir>/<label><suffix>`, one value per line.
///
/// `window` is clamped to the pair's length. Creates `out_dir` when missing.
/// Returns the written paths in channel order.
pub(super) fn write_channels(
    out_dir: &Path,
    pair: &ChannelPair,
    window: ViewWindow,
    channels: &ChannelSet,
    suffix: &str,
) -> Result<Vec<PathBuf>> {
    if channels.is_empty() {
        return Err(ProcessorError::NoChannelSelected);
    }
    let window = compute_window(window.start, window.len(), pair.len());

    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating directory {}", out_dir.display()))
        .map_err(|e| ProcessorError::export(out_dir, e))?;

    let mut written = Vec::with_capacity(channels.len());
    for &channel in channels {
        let path = out_dir.join(format!("{}{suffix}", channel.label()));
        write_column(&path, window.slice(pair.channel(channel)))
            .map_err(|e| ProcessorError::export(&path, e))?;
        log::info!("Wrote {} values to {}", window.len(), path.display());
        written.push(path);
    }
    Ok(written)
}

/// One float per line, shortest representation that parses back exactly.
fn write_column(path: &Path, values: &[f64]) -> anyhow::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .context("creating output file")?;
    for value in values {
        writer.serialize(value).context("writing value")?;
    }
    writer.flush().context("flushing output file")?;
    Ok(())
}
