/// Data layer: paired-file loading, background subtraction, windowing, export.
///
/// Architecture:
/// ```text
///  signal.dat     background.dat
///        │              │
///        ▼              ▼
///   ┌──────────────────────┐
///   │        loader        │  skip header, parse 2 columns → ChannelPair
///   └──────────────────────┘
///              │
///              ▼
///   ┌──────────────────────┐
///   │   SignalProcessor    │  raw − background → derived → min-max normalized
///   └──────────────────────┘
///        │            │
///        ▼            ▼
///   series(mode,   ┌────────┐
///   window) → plot │ export │  <channel>_norm.txt / <channel>_norm_seg.txt
///                  └────────┘
/// ```
///
/// `discovery` lists the candidate files offered by the UI pickers.

pub mod discovery;
pub mod error;
pub mod export;
pub mod loader;
pub mod model;
pub mod processor;
