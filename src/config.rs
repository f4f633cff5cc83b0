use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::model::DataType;

/// Configuration file looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "data_preview.json";

/// Startup configuration. Missing fields fall back to the defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Directory scanned for data files; exports are written below it.
    pub base_dir: PathBuf,
    /// Every signal and background file name starts with this.
    pub file_prefix: String,
    /// Background file names end with this.
    pub background_suffix: String,
    /// Sub-directory of `base_dir` for full normalized exports.
    pub normalized_dir: String,
    /// Sub-directory of `base_dir` for windowed exports.
    pub segment_dir: String,
    pub default_start: usize,
    pub default_window: usize,
    pub default_data_type: DataType,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            file_prefix: "PIBPIF".to_string(),
            background_suffix: "background.dat".to_string(),
            normalized_dir: "Data_norm".to_string(),
            segment_dir: "Data_seg".to_string(),
            default_start: 5,
            default_window: 1000,
            default_data_type: DataType::Both,
        }
    }
}

impl PreviewConfig {
    pub fn normalized_export_dir(&self) -> PathBuf {
        self.base_dir.join(&self.normalized_dir)
    }

    pub fn segment_export_dir(&self) -> PathBuf {
        self.base_dir.join(&self.segment_dir)
    }
}

fn read_config(path: &Path) -> Result<PreviewConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn write_default(path: &Path, config: &PreviewConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config).context("serializing default config")?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}

/// Load the configuration at `path`.
///
/// A missing or unparsable file yields the defaults, which are written back
/// to `path` when no file exists yet.
pub fn load_config(path: &Path) -> PreviewConfig {
    match read_config(path) {
        Ok(config) => {
            log::info!("Loaded configuration from {}", path.display());
            config
        }
        Err(e) => {
            log::warn!("Using default configuration: {e:#}");
            let config = PreviewConfig::default();
            if !path.exists() {
                match write_default(path, &config) {
                    Ok(()) => log::info!("Created default configuration at {}", path.display()),
                    Err(e) => log::warn!("{e:#}"),
                }
            }
            config
        }
    }
}
