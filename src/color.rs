use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::{Channel, SeriesKind};

// ---------------------------------------------------------------------------
// Series colours
// ---------------------------------------------------------------------------

/// Base hue per channel: A blue, B green.
fn channel_hue(channel: Channel) -> f32 {
    match channel {
        Channel::A => 225.0,
        Channel::B => 120.0,
    }
}

/// Background lines are pale, subtracted lines dark.
fn kind_lightness(kind: SeriesKind) -> f32 {
    match kind {
        SeriesKind::Background => 0.78,
        SeriesKind::Original | SeriesKind::Normalized => 0.50,
        SeriesKind::Subtracted => 0.27,
    }
}

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

/// Line colour for one channel/kind combination.
pub fn series_color(channel: Channel, kind: SeriesKind) -> Color32 {
    hsl_to_color32(Hsl::new(channel_hue(channel), 0.85, kind_lightness(kind)))
}
