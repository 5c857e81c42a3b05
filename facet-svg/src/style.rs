//! Paint values for presentation attributes.

use std::fmt;

/// An opaque RGB paint as written in `fill` and `stroke` attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `rgb(r,g,b)`, `#rrggbb`, `#rgb` or a handful of named colors.
    pub fn parse(s: &str) -> Result<Self, ColorParseError> {
        let s = s.trim();

        if let Some(inner) = s.strip_prefix("rgb(").and_then(|s| s.strip_suffix(')')) {
            let parts: Vec<&str> = inner.split(',').collect();
            if let [r, g, b] = parts.as_slice() {
                if let (Ok(r), Ok(g), Ok(b)) = (
                    r.trim().parse::<u8>(),
                    g.trim().parse::<u8>(),
                    b.trim().parse::<u8>(),
                ) {
                    return Ok(Color { r, g, b });
                }
            }
            return Err(ColorParseError(s.to_string()));
        }

        if let Some(hex) = s.strip_prefix('#').filter(|h| h.is_ascii()) {
            let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16);
            return match hex.len() {
                6 => match (channel(0..2), channel(2..4), channel(4..6)) {
                    (Ok(r), Ok(g), Ok(b)) => Ok(Color { r, g, b }),
                    _ => Err(ColorParseError(s.to_string())),
                },
                // #abc -> #aabbcc
                3 => match (channel(0..1), channel(1..2), channel(2..3)) {
                    (Ok(r), Ok(g), Ok(b)) => Ok(Color {
                        r: r * 17,
                        g: g * 17,
                        b: b * 17,
                    }),
                    _ => Err(ColorParseError(s.to_string())),
                },
                _ => Err(ColorParseError(s.to_string())),
            };
        }

        match s.to_lowercase().as_str() {
            "black" => Ok(Color::rgb(0, 0, 0)),
            "white" => Ok(Color::rgb(255, 255, 255)),
            "red" => Ok(Color::rgb(255, 0, 0)),
            "green" => Ok(Color::rgb(0, 128, 0)),
            "blue" => Ok(Color::rgb(0, 0, 255)),
            _ => Err(ColorParseError(s.to_string())),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// Error returned when a paint string is not understood
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError(pub String);

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized color: {:?}", self.0)
    }
}

impl std::error::Error for ColorParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgb_function() {
        assert_eq!(Color::parse("rgb(34, 139, 30)"), Ok(Color::rgb(34, 139, 30)));
    }

    #[test]
    fn parses_hex_forms() {
        assert_eq!(Color::parse("#fdfd96"), Ok(Color::rgb(253, 253, 150)));
        assert_eq!(Color::parse("#fff"), Ok(Color::rgb(255, 255, 255)));
    }

    #[test]
    fn rejects_garbage() {
        assert!(Color::parse("rgb(1,2)").is_err());
        assert!(Color::parse("#12345").is_err());
        assert!(Color::parse("chartreuse-ish").is_err());
    }

    #[test]
    fn display_round_trips() {
        let c = Color::rgb(230, 230, 230);
        assert_eq!(c.to_string(), "rgb(230,230,230)");
        assert_eq!(Color::parse(&c.to_string()), Ok(c));
    }
}
