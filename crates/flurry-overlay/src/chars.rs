//! Flake glyphs.

/// Glyphs from sharpest to softest.
pub const FLAKE_CHARS: &[char] = &['❄', '❅', '*', '•', '·'];

/// Glyph for a flake with the given blur.
pub fn flake_char(blur: f64) -> char {
    let index = blur.max(0.0).round() as usize;
    FLAKE_CHARS[index.min(FLAKE_CHARS.len() - 1)]
}
