//! SVG canvas
//!
//! Primitives are collected as `facet-svg` nodes and only serialized by
//! [`SvgCanvas::finish`], so a failed render never leaves half a document.

use facet_svg::facet_xml::SerializeOptions;
use facet_svg::{Circle, Line, Rect, Svg, SvgNode, Text, facet_xml};
use glam::DVec2;

use super::canvas::{Canvas, TextMetrics};
use super::metrics::GlyphMetrics;
use crate::errors::RenderError;
use crate::style::{Color, Font};

#[derive(Debug)]
pub struct SvgCanvas {
    size: DVec2,
    children: Vec<SvgNode>,
}

impl SvgCanvas {
    /// An empty print of `size` pixels painted with `background`
    pub fn new(size: DVec2, background: Color) -> Self {
        let backdrop = SvgNode::Rect(Rect {
            x: Some(0.0),
            y: Some(0.0),
            width: Some(size.x),
            height: Some(size.y),
            fill: Some(background.to_string()),
            ..Default::default()
        });
        Self {
            size,
            children: vec![backdrop],
        }
    }

    pub fn size(&self) -> DVec2 {
        self.size
    }

    /// Serialize the finished drawing
    pub fn finish(self) -> Result<String, RenderError> {
        let svg = Svg {
            xmlns: Some(facet_svg::SVG_NS.to_string()),
            width: Some(fmt_num(self.size.x)),
            height: Some(fmt_num(self.size.y)),
            view_box: Some(format!("0 0 {} {}", fmt_num(self.size.x), fmt_num(self.size.y))),
            children: self.children,
        };

        fn format_float(value: f64, writer: &mut dyn std::io::Write) -> Result<(), std::io::Error> {
            write!(writer, "{}", fmt_num(value))
        }

        let options = SerializeOptions {
            float_formatter: Some(format_float),
            ..Default::default()
        };
        facet_xml::to_string_with_options(&svg, &options).map_err(|e| RenderError::Serialize {
            message: e.to_string(),
        })
    }
}

impl TextMetrics for SvgCanvas {
    fn text_extent(&self, text: &str, font: &Font) -> DVec2 {
        GlyphMetrics.text_extent(text, font)
    }
}

impl Canvas for SvgCanvas {
    fn line(&mut self, from: DVec2, to: DVec2, width: f64, color: Color) {
        self.children.push(SvgNode::Line(Line {
            x1: Some(from.x),
            y1: Some(from.y),
            x2: Some(to.x),
            y2: Some(to.y),
            stroke: Some(color.to_string()),
            stroke_width: Some(fmt_num(width)),
            ..Default::default()
        }));
    }

    fn fill_rect(&mut self, origin: DVec2, size: DVec2, color: Color) {
        // SVG rejects negative extents
        let min = origin.min(origin + size);
        let size = size.abs();
        self.children.push(SvgNode::Rect(Rect {
            x: Some(min.x),
            y: Some(min.y),
            width: Some(size.x),
            height: Some(size.y),
            fill: Some(color.to_string()),
            ..Default::default()
        }));
    }

    fn circle(&mut self, center: DVec2, r: f64, color: Color) {
        self.children.push(SvgNode::Circle(Circle {
            cx: Some(center.x),
            cy: Some(center.y),
            r: Some(r),
            fill: Some("none".to_string()),
            stroke: Some(color.to_string()),
            stroke_width: Some("1".to_string()),
        }));
    }

    fn text(&mut self, top_left: DVec2, text: &str, font: &Font, color: Color) {
        self.children.push(SvgNode::Text(Text {
            x: Some(top_left.x),
            y: Some(top_left.y),
            fill: Some(color.to_string()),
            font_family: Some(font.family.css_name().to_string()),
            font_size: Some(font.size as f64),
            font_style: font.style.is_italic().then(|| "italic".to_string()),
            font_weight: font.style.is_bold().then(|| "bold".to_string()),
            dominant_baseline: Some("text-before-edge".to_string()),
            content: text.to_string(),
            ..Default::default()
        }));
    }
}

/// Format a number with 6 significant figures, trailing zeros trimmed
pub(crate) fn fmt_num(value: f64) -> String {
    fmt_num_precision(value, 6)
}

fn fmt_num_precision(value: f64, sig_figs: i32) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".to_string();
    }

    let abs_val = value.abs();
    let magnitude = abs_val.log10().floor() as i32;
    let scale = 10_f64.powi(sig_figs - 1 - magnitude);
    let rounded = (value * scale).round() / scale;

    let decimals = (sig_figs - 1 - magnitude).max(0) as usize;
    let s = format!("{:.prec$}", rounded, prec = decimals);
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{FontFamily, FontStyle, palette};

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(fmt_num(0.0), "0");
        assert_eq!(fmt_num(8200.0), "8200");
        assert_eq!(fmt_num(1.5), "1.5");
        assert_eq!(fmt_num(2.0 / 3.0), "0.666667");
        assert_eq!(fmt_num(-12.25), "-12.25");
    }

    #[test]
    fn negative_rects_are_normalized() {
        let mut c = SvgCanvas::new(DVec2::new(100.0, 50.0), palette::WHITE);
        c.fill_rect(DVec2::new(10.0, 20.0), DVec2::new(-4.0, -6.0), palette::BLACK);
        let Some(SvgNode::Rect(r)) = c.children.last() else {
            panic!("expected a rect");
        };
        assert_eq!((r.x, r.y, r.width, r.height), (Some(6.0), Some(14.0), Some(4.0), Some(6.0)));
    }

    #[test]
    fn serialized_document_parses_back() {
        let mut c = SvgCanvas::new(DVec2::new(200.0, 100.0), palette::WHITE);
        c.fill_rect(DVec2::new(10.0, 0.0), DVec2::new(3.0, 70.0), palette::BLACK);
        c.line(DVec2::new(0.0, 50.0), DVec2::new(200.0, 50.0), 1.0, palette::RED);
        c.circle(DVec2::new(50.0, 50.0), 5.0, palette::CUT);
        let font = Font::new(FontFamily::Bright, 60, FontStyle::Italic, None);
        c.text(DVec2::new(20.0, 10.0), "π", &font, palette::BLACK);
        let xml = match c.finish() {
            Ok(xml) => xml,
            Err(e) => panic!("{e}"),
        };
        let svg: Svg = match facet_xml::from_str(&xml) {
            Ok(svg) => svg,
            Err(e) => panic!("{e}\n{xml}"),
        };
        assert_eq!(svg.view_box.as_deref(), Some("0 0 200 100"));
        assert_eq!(svg.children.len(), 5);
        let texts: Vec<&Text> = svg
            .children
            .iter()
            .filter_map(|n| match n {
                SvgNode::Text(t) => Some(t),
                _ => None,
            })
            .collect();
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].content, "π");
        assert_eq!(texts[0].font_style.as_deref(), Some("italic"));
    }
}
