//! Glyph advance widths for measuring text without a font rasterizer.

use glam::DVec2;

use super::canvas::TextMetrics;
use crate::style::Font;

/// Proportional advance widths for printable ASCII, in hundredths of an em
/// scaled so a digit is 91.
#[rustfmt::skip]
pub const AW_CHAR: [u8; 95] = [
    45,  55,  62, 115,  90, 132, 125,  40,
    55,  55,  71, 115,  45,  48,  45,  50,
    91,  91,  91,  91,  91,  91,  91,  91,
    91,  91,  50,  50, 120, 120, 120,  78,
   142, 102, 105, 110, 115, 105,  98, 105,
   125,  58,  58, 107,  95, 145, 125, 115,
    95, 115, 107,  95,  97, 118, 102, 150,
   100,  93, 100,  58,  50,  58, 119,  72,
    72,  86,  92,  80,  92,  85,  52,  92,
    92,  47,  47,  88,  48, 135,  92,  86,
    92,  92,  69,  75,  58,  92,  80, 121,
    81,  80,  76,  91,  49,  91, 118,
];

/// Width of anything outside printable ASCII
const AW_OTHER: u32 = 100;

/// AW units per em
const AW_PER_EM: f64 = 165.0;

/// Advance of one typewriter cell, in ems
const MONO_ADVANCE: f64 = 0.525;

/// Ink height of a line of text, in ems
const LINE_INK: f64 = 0.75;

/// Proportional text length in AW units
pub fn text_length(text: &str) -> u32 {
    text.chars()
        .map(|c| {
            if (' '..='~').contains(&c) {
                AW_CHAR[(c as usize) - 0x20] as u32
            } else {
                AW_OTHER
            }
        })
        .sum()
}

/// Table-driven metrics shared by every canvas in this crate
#[derive(Debug, Clone, Copy, Default)]
pub struct GlyphMetrics;

impl TextMetrics for GlyphMetrics {
    fn text_extent(&self, text: &str, font: &Font) -> DVec2 {
        let size = font.size as f64;
        let w = if font.family.is_monospace() {
            text.chars().count() as f64 * MONO_ADVANCE * size
        } else {
            text_length(text) as f64 * size / AW_PER_EM
        };
        let h = if text.is_empty() { 0.0 } else { LINE_INK * size };
        DVec2::new(w.round(), h.round())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{FontFamily, FontStyle};

    fn font(family: FontFamily, size: u32) -> Font {
        Font::new(family, size, FontStyle::Regular, None)
    }

    #[test]
    fn digits_share_a_width() {
        assert_eq!(text_length("0123456789"), 910);
        assert_eq!(text_length("_"), 72);
        assert_eq!(text_length("π"), 100);
    }

    #[test]
    fn typewriter_cells_are_uniform() {
        let m = GlyphMetrics;
        let f = font(FontFamily::Typewriter, 60);
        assert_eq!(m.text_extent("i", &f).x, m.text_extent("W", &f).x);
        assert_eq!(m.text_extent("10", &f), DVec2::new(63.0, 45.0));
    }

    #[test]
    fn proportional_text_scales_with_size() {
        let m = GlyphMetrics;
        let small = m.text_extent("1.5", &font(FontFamily::Bright, 30)).x;
        let large = m.text_extent("1.5", &font(FontFamily::Bright, 60)).x;
        assert!((large - 2.0 * small).abs() <= 1.0);
        assert_eq!(m.text_extent("", &font(FontFamily::Bright, 60)), DVec2::ZERO);
    }
}
