//! Colors, fonts and per-scale style overrides.

use std::collections::BTreeMap;

pub use facet_svg::Color;

/// Named colors used by the rule presets
pub mod palette {
    use super::Color;

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const GREY: Color = Color::rgb(128, 128, 128);

    /// Marks a cut line
    pub const CUT: Color = BLUE;
    pub const CUTOFF: Color = Color::rgb(230, 230, 230);
    pub const CUTOFF2: Color = Color::rgb(234, 36, 98);
    /// Green as conventionally printed on slide rule symbols
    pub const SYM_GREEN: Color = Color::rgb(34, 139, 30);
    pub const FC_LIGHT_BLUE_BG: Color = Color::rgb(194, 235, 247);
    pub const FC_LIGHT_GREEN_BG: Color = Color::rgb(203, 243, 225);
    pub const PICKETT_EYE_SAVER_YELLOW: Color = Color::rgb(253, 253, 150);
    pub const LIGHT_BLUE: Color = Color::rgb(173, 216, 230);
}

/// Nominal font sizes in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSize {
    Title,
    Subtitle,
    ScaleLabel,
    NumXl,
    NumLg,
    NumMd,
    NumSm,
    NumXs,
}

impl FontSize {
    pub const fn px(self) -> u32 {
        match self {
            FontSize::Title => 140,
            FontSize::Subtitle => 120,
            FontSize::ScaleLabel => 90,
            FontSize::NumXl => 75,
            FontSize::NumLg => 60,
            FontSize::NumMd => 55,
            FontSize::NumSm => 45,
            FontSize::NumXs => 35,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Regular,
    Italic,
    Bold,
    BoldItalic,
}

impl FontStyle {
    pub fn is_italic(self) -> bool {
        matches!(self, FontStyle::Italic | FontStyle::BoldItalic)
    }

    pub fn is_bold(self) -> bool {
        matches!(self, FontStyle::Bold | FontStyle::BoldItalic)
    }
}

/// Computer Modern Unicode families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontFamily {
    #[default]
    Typewriter,
    SansSerif,
    Concrete,
    Bright,
}

impl FontFamily {
    pub fn css_name(self) -> &'static str {
        match self {
            FontFamily::Typewriter => "CMU Typewriter Text, monospace",
            FontFamily::SansSerif => "CMU Sans Serif, sans-serif",
            FontFamily::Concrete => "CMU Concrete, serif",
            FontFamily::Bright => "CMU Bright, sans-serif",
        }
    }

    pub fn is_monospace(self) -> bool {
        matches!(self, FontFamily::Typewriter)
    }
}

/// A concrete font: family, pixel size and style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Font {
    pub family: FontFamily,
    pub size: u32,
    pub style: FontStyle,
}

impl Font {
    /// Size in pixels, rescaled by a scale-height ratio when one applies
    pub fn new(family: FontFamily, size: u32, style: FontStyle, h_ratio: Option<f64>) -> Self {
        let size = match h_ratio {
            Some(r) if r != 1.0 => (size as f64 * r).round() as u32,
            _ => size,
        };
        Self { family, size, style }
    }
}

/// Per-scale overrides keyed by scale key
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScaleOverride {
    pub color: Option<Color>,
    pub hide: bool,
}

/// How a model colors and letters its scales
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    /// Foreground for scales whose values decrease left to right
    pub decreasing_color: Color,
    /// Foreground for sub-decimal numerals
    pub decimal_color: Color,
    pub bg_colors: BTreeMap<String, Color>,
    pub font_family: FontFamily,
    pub overrides: BTreeMap<String, ScaleOverride>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fg: palette::BLACK,
            bg: palette::WHITE,
            decreasing_color: palette::RED,
            decimal_color: palette::BLACK,
            bg_colors: BTreeMap::new(),
            font_family: FontFamily::Typewriter,
            overrides: BTreeMap::new(),
        }
    }
}

impl Style {
    pub fn pickett_eye_saver() -> Self {
        Self {
            font_family: FontFamily::Bright,
            bg: palette::PICKETT_EYE_SAVER_YELLOW,
            ..Self::default()
        }
    }

    pub fn graphoplex() -> Self {
        Self {
            font_family: FontFamily::Bright,
            decimal_color: palette::LIGHT_BLUE,
            ..Self::default()
        }
    }

    pub fn with_family(mut self, family: FontFamily) -> Self {
        self.font_family = family;
        self
    }

    pub fn with_decreasing_color(mut self, color: Color) -> Self {
        self.decreasing_color = color;
        self
    }

    pub fn with_bg_color(mut self, key: &str, color: Color) -> Self {
        self.bg_colors.insert(key.to_string(), color);
        self
    }

    pub fn with_color_override(mut self, key: &str, color: Color) -> Self {
        self.overrides.entry(key.to_string()).or_default().color = Some(color);
        self
    }

    pub fn with_hidden(mut self, key: &str) -> Self {
        self.overrides.entry(key.to_string()).or_default().hide = true;
        self
    }

    /// Foreground for a scale, honoring color overrides
    pub fn fg_col(&self, key: &str, is_increasing: bool) -> Color {
        self.overrides
            .get(key)
            .and_then(|o| o.color)
            .unwrap_or(if is_increasing {
                self.fg
            } else {
                self.decreasing_color
            })
    }

    pub fn bg_col(&self, key: &str) -> Option<Color> {
        self.bg_colors.get(key).copied()
    }

    pub fn is_hidden(&self, key: &str) -> bool {
        self.overrides.get(key).is_some_and(|o| o.hide)
    }

    pub fn font(&self, size: u32, style: FontStyle, h_ratio: Option<f64>) -> Font {
        Font::new(self.font_family, size, style, h_ratio)
    }

    pub fn font_for(&self, size: FontSize, h_ratio: Option<f64>) -> Font {
        self.font(size.px(), FontStyle::Regular, h_ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decreasing_scales_use_second_color() {
        let s = Style::default();
        assert_eq!(s.fg_col("CI", false), palette::RED);
        assert_eq!(s.fg_col("C", true), palette::BLACK);
    }

    #[test]
    fn color_override_wins_over_direction() {
        let s = Style::default()
            .with_decreasing_color(palette::SYM_GREEN)
            .with_color_override("T1", palette::RED);
        assert_eq!(s.fg_col("T1", true), palette::RED);
        assert_eq!(s.fg_col("P1", false), palette::SYM_GREEN);
    }

    #[test]
    fn hidden_flag_is_per_key() {
        let s = Style::default().with_hidden("K");
        assert!(s.is_hidden("K"));
        assert!(!s.is_hidden("A"));
    }

    #[test]
    fn font_size_follows_height_ratio() {
        let f = Font::new(FontFamily::Bright, 60, FontStyle::Regular, Some(0.5));
        assert_eq!(f.size, 30);
        let f = Font::new(FontFamily::Bright, 60, FontStyle::Regular, Some(1.0));
        assert_eq!(f.size, 60);
        let f = Font::new(FontFamily::Bright, 45, FontStyle::Regular, Some(0.75));
        assert_eq!(f.size, 34);
    }
}
