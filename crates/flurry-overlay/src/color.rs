//! Flake colours.

use ratatui::style::Color;

/// Colour of a flake: lighter when sharp, dimmer the more it is blurred.
///
/// Without a tint flakes are shades of grey; with one they take that hue.
pub fn flake_color(blur: f64, tint: Option<f32>) -> Color {
    let lightness = (0.95 - blur.max(0.0) as f32 * 0.15).clamp(0.35, 0.95);
    match tint {
        Some(hue) => hsl_to_rgb(hue.rem_euclid(360.0), 0.6, lightness),
        None => hsl_to_rgb(0.0, 0.0, lightness),
    }
}

/// Convert a hue in degrees plus saturation and lightness in `0.0..=1.0`
/// to an RGB colour.
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> Color {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let sector = hue.rem_euclid(360.0) / 60.0;
    let secondary = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match sector as u8 {
        0 => (chroma, secondary, 0.0),
        1 => (secondary, chroma, 0.0),
        2 => (0.0, chroma, secondary),
        3 => (0.0, secondary, chroma),
        4 => (secondary, 0.0, chroma),
        _ => (chroma, 0.0, secondary),
    };
    let offset = lightness - chroma / 2.0;
    let channel = |v: f32| ((v + offset) * 255.0).round().clamp(0.0, 255.0) as u8;
    Color::Rgb(channel(r), channel(g), channel(b))
}
