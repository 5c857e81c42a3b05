//! Drawing surface abstraction.
//!
//! Everything the renderer draws goes through [`Canvas`], in pixel
//! coordinates with the origin at the top left of the print.

use glam::DVec2;

use super::metrics::GlyphMetrics;
use crate::style::{Color, Font};

/// Measures text the way the canvas will lay it out
pub trait TextMetrics {
    /// Bounding box `(width, height)` of `text` set in `font`
    fn text_extent(&self, text: &str, font: &Font) -> DVec2;

    fn text_width(&self, text: &str, font: &Font) -> f64 {
        self.text_extent(text, font).x
    }
}

pub trait Canvas: TextMetrics {
    fn line(&mut self, from: DVec2, to: DVec2, width: f64, color: Color);

    /// Solid axis-aligned rectangle; `size` may be negative on either axis
    fn fill_rect(&mut self, origin: DVec2, size: DVec2, color: Color);

    /// Circle outline
    fn circle(&mut self, center: DVec2, r: f64, color: Color);

    /// Text whose bounding box starts at `top_left`
    fn text(&mut self, top_left: DVec2, text: &str, font: &Font, color: Color);
}

/// One primitive as a [`RecordingCanvas`] saw it
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Line {
        from: DVec2,
        to: DVec2,
        width: f64,
        color: Color,
    },
    Rect {
        origin: DVec2,
        size: DVec2,
        color: Color,
    },
    Circle {
        center: DVec2,
        r: f64,
        color: Color,
    },
    Text {
        top_left: DVec2,
        text: String,
        font: Font,
        color: Color,
    },
}

/// Canvas that keeps every primitive in order, for inspection in tests
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, DVec2, Color)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text {
                text, top_left, color, ..
            } => Some((text.as_str(), *top_left, *color)),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = (DVec2, DVec2, Color)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Rect { origin, size, color } => Some((*origin, *size, *color)),
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = (DVec2, f64)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Circle { center, r, .. } => Some((*center, *r)),
            _ => None,
        })
    }
}

impl TextMetrics for RecordingCanvas {
    fn text_extent(&self, text: &str, font: &Font) -> DVec2 {
        GlyphMetrics.text_extent(text, font)
    }
}

impl Canvas for RecordingCanvas {
    fn line(&mut self, from: DVec2, to: DVec2, width: f64, color: Color) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn fill_rect(&mut self, origin: DVec2, size: DVec2, color: Color) {
        self.ops.push(DrawOp::Rect { origin, size, color });
    }

    fn circle(&mut self, center: DVec2, r: f64, color: Color) {
        self.ops.push(DrawOp::Circle { center, r, color });
    }

    fn text(&mut self, top_left: DVec2, text: &str, font: &Font, color: Color) {
        self.ops.push(DrawOp::Text {
            top_left,
            text: text.to_string(),
            font: *font,
            color,
        });
    }
}
