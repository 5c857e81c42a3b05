//! Slide rule scale generation.
//!
//! Scales map a mathematical domain onto a fixed pixel span through a
//! [`transform::TransformKind`]; the [`graduation`] engine picks the finest
//! legible tick subdivision for each stretch of a scale, and [`recipe`]s
//! override it for the scales with established conventions. A [`layout`]
//! line such as `"A/B C/D"` places scales on the stators and slide, and
//! [`render`] draws whole instruments to SVG.
//!
//! ```no_run
//! let svg = sliderule::render_model("Demo", &sliderule::RenderOptions::default())?;
//! # Ok::<(), miette::Report>(())
//! ```

use pest_derive::Parser;

pub mod catalog;
pub mod errors;
pub mod geometry;
pub mod graduation;
pub mod label;
pub mod layout;
pub mod log;
pub mod marks;
pub mod model;
pub mod recipe;
pub mod render;
pub mod ruler;
pub mod scale;
pub mod style;
pub mod transform;
pub mod types;

pub use catalog::Catalog;
pub use errors::{LayoutError, RenderError};
pub use geometry::Geometry;
pub use layout::Layout;
pub use model::{MODEL_NAMES, Model};
pub use render::{Mode, RenderOptions};
pub use style::Style;

#[derive(Parser)]
#[grammar = "layout.pest"]
pub struct LayoutParser;

/// Render one of the built-in models to SVG.
pub fn render_model(name: &str, options: &RenderOptions) -> Result<String, miette::Report> {
    let model = Model::named(name)?;
    render::render_with_options(&model, options)
}

/// Render an arbitrary layout on a plain rule sized to fit it.
///
/// Unknown keys are reported against the layout source.
pub fn render_layout(source: &str, options: &RenderOptions) -> Result<String, miette::Report> {
    let layout = Layout::parse(source, Catalog::standard())?;
    let mut model = Model::new(("", "", "Custom"), Geometry::default(), layout, Style::default());

    let slide_h = model.geometry.slide_h.max(model.auto_slide_h());
    let stator_h = model.geometry.stator_h().max(model.auto_stock_h());
    model.geometry.slide_h = slide_h;
    model.geometry.side_h = slide_h + 2.0 * stator_h;

    render::render_with_options(&model, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pest::Parser;

    #[test]
    fn parse_slashed_line() {
        let result = LayoutParser::parse(Rule::layout, "A/B C/D");
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_bracketed_line() {
        let result = LayoutParser::parse(Rule::layout, "K A [B CI C] D L");
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_framed_two_sides() {
        let result = LayoutParser::parse(Rule::layout, "|K A/B C/D L|\n|[S ST T]|");
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_comma_separated_keys() {
        let result = LayoutParser::parse(Rule::layout, "A,B C, D");
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn unknown_key_is_reported() {
        let err = render_layout("A/B Q/D", &RenderOptions::default()).unwrap_err();
        assert!(err.to_string().contains("unknown scale: Q"), "{err}");
    }

    #[test]
    fn custom_layout_grows_to_fit() {
        let svg = render_layout("K A B/CF CIF CI C/D DF L S", &RenderOptions::default()).unwrap();
        assert!(svg.contains("<svg"), "{svg}");
    }
}
