//! Rendering slide rules to SVG
//!
//! This module is organized into submodules:
//! - `canvas`: the drawing surface trait and a recording canvas for tests
//! - `metrics`: glyph widths for measuring text
//! - `svg`: the SVG canvas
//! - `scale`: one scale or ruler within its band
//! - `sheet`: whole instruments and diagnostic sheets

pub mod canvas;
pub mod metrics;
pub mod scale;
pub mod sheet;
pub mod svg;

pub use canvas::{Canvas, DrawOp, RecordingCanvas, TextMetrics};
pub use metrics::GlyphMetrics;
pub use scale::Painter;
pub use sheet::DiagnosticSheet;
pub use svg::SvgCanvas;

use crate::log::debug;
use crate::model::Model;

/// What kind of sheet to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Front and rear faces of the instrument
    #[default]
    SlideRule,
    /// Each scale on its own row
    Diagnostic,
}

/// Options for rendering
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub mode: Mode,
    /// Outline the metal end brackets
    pub cutoffs: bool,
    /// Outline symbol boxes and scale bands
    pub debug: bool,
}

/// Render a model's slide rule sheet to SVG
pub fn render(model: &Model) -> Result<String, miette::Report> {
    render_with_options(model, &RenderOptions::default())
}

/// Render a model to SVG with options
pub fn render_with_options(model: &Model, options: &RenderOptions) -> Result<String, miette::Report> {
    sheet::validate(&model.geometry)?;
    let size = sheet::print_size(model, options.mode);
    debug!(model = %model.name, ?options, width = size.x, height = size.y, "rendering");
    let mut canvas = SvgCanvas::new(size, model.style.bg);
    draw(&mut canvas, model, options);
    Ok(canvas.finish()?)
}

/// Draw a sheet onto any canvas
pub fn draw<C: Canvas>(canvas: &mut C, model: &Model, options: &RenderOptions) {
    match options.mode {
        Mode::SlideRule => sheet::draw_slide_rule(canvas, model, options),
        Mode::Diagnostic => DiagnosticSheet::new(model).draw(canvas, model, options),
    }
}
