//! Error types with rich diagnostics using miette
//!
//! Layout errors carry source spans so a bad key is pointed at in context.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (model name or "<layout>")
    pub name: String,
    /// The full source text
    pub source: String,
}

impl SourceContext {
    /// Create a new source context
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }
}

// ============================================================================
// Layout Errors
// ============================================================================

/// Errors raised while building a layout, before anything is drawn
#[derive(Error, Diagnostic, Debug)]
pub enum LayoutError {
    #[error("unknown scale: {key}")]
    #[diagnostic(code(sliderule::layout::unknown_scale))]
    UnknownScale {
        key: String,
        /// Catalog the key was looked up in
        catalog: &'static str,
        #[source_code]
        src: NamedSource<String>,
        #[label("not in the {catalog} catalog")]
        span: SourceSpan,
        #[help]
        suggestion: Option<String>,
    },

    #[error("invalid layout: {message}")]
    #[diagnostic(
        code(sliderule::layout::syntax),
        help("parts are split as `top/slide/bottom` or `top [slide] bottom`")
    )]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },
}

// ============================================================================
// Render Errors
// ============================================================================

/// Errors that occur during rendering
#[derive(Error, Diagnostic, Debug)]
pub enum RenderError {
    #[error("invalid geometry: {message}")]
    #[diagnostic(code(sliderule::render::invalid_geometry))]
    InvalidGeometry { message: String },

    #[error("unknown model: {name}")]
    #[diagnostic(code(sliderule::render::unknown_model))]
    UnknownModel {
        name: String,
        #[help]
        suggestion: Option<String>,
    },

    #[error("failed to serialize SVG: {message}")]
    #[diagnostic(code(sliderule::render::serialize))]
    Serialize { message: String },
}
