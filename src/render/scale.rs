//! Drawing one scale or ruler into its band.
//!
//! Every x handed to the painter is measured from the left index; y offsets
//! are absolute and name the top of the band.

use glam::DVec2;

use super::canvas::Canvas;
use crate::catalog::Catalog;
use crate::geometry::Geometry;
use crate::graduation::{Graduation, GraduationEngine, Ink, OVERHANG, OVERHANG_WIDE};
use crate::label::{Label, is_prime, script_digit};
use crate::log::trace;
use crate::recipe::{self, Recipe, ScaleFonts};
use crate::ruler::Ruler;
use crate::scale::Scale;
use crate::style::{Color, Font, FontSize, FontStyle, Style, palette};
use crate::types::{Align, Side};

/// Extra height measured around every symbol
const SYMBOL_PAD: f64 = 20.0;

const RADICALS: [char; 3] = ['√', '∛', '∜'];

/// Legend under the ST scale's right label
const ST_SINE_LEGEND: &str = "∡sin 0.01x°";

/// Draws scales onto a canvas for one geometry and style
pub struct Painter<'a, C: Canvas> {
    pub canvas: &'a mut C,
    pub geometry: &'a Geometry,
    pub style: &'a Style,
    /// Where mirror partners are looked up
    pub catalog: &'a Catalog,
    /// Outline symbols and scale bands
    pub debug: bool,
}

impl<C: Canvas> Painter<'_, C> {
    fn sym_dims(&self, symbol: &str, font: &Font) -> DVec2 {
        self.canvas.text_extent(symbol, font) + DVec2::new(0.0, SYMBOL_PAD)
    }

    fn fill_rect(&mut self, x0: f64, y0: f64, dx: f64, dy: f64, color: Color) {
        self.canvas.fill_rect(DVec2::new(x0, y0), DVec2::new(dx, dy), color);
    }

    /// Outline of a box, one pixel wide
    pub fn draw_box(&mut self, x0: f64, y0: f64, dx: f64, dy: f64, color: Color) {
        let corners = [
            DVec2::new(x0, y0),
            DVec2::new(x0 + dx, y0),
            DVec2::new(x0 + dx, y0 + dy),
            DVec2::new(x0, y0 + dy),
        ];
        for i in 0..4 {
            self.canvas.line(corners[i], corners[(i + 1) % 4], 1.0, color);
        }
    }

    /// One tick hanging from the aligned edge of a band `scale_h` tall
    pub fn draw_tick(&mut self, y_off: f64, x: f64, height: f64, color: Color, scale_h: f64, al: Align) {
        let g = self.geometry;
        let x0 = x + g.li() - g.tick_mid_offset();
        let y0 = match al {
            Align::Upper => y_off,
            Align::Lower => y_off + scale_h - height,
        };
        self.fill_rect(x0, y0, g.stt, height, color);
    }

    /// Text with its top left at `(x_left, y_top)`, stripped of the glyphs
    /// no font draws and with an overbar over any radical
    pub fn draw_symbol(&mut self, symbol: &str, color: Color, x_left: f64, y_top: f64, font: &Font) {
        let symbol: String = symbol.chars().filter(|&c| c != '∡' && c != '⅓').collect();
        if symbol.is_empty() {
            return;
        }
        if self.debug {
            let d = self.sym_dims(&symbol, font);
            self.draw_box(x_left, y_top, d.x, d.y, palette::GREY);
        }
        self.canvas.text(DVec2::new(x_left, y_top), &symbol, font, color);

        let Some(n_ch) = symbol.chars().position(|c| RADICALS.contains(&c)) else {
            return;
        };
        let d = self.sym_dims(&symbol, font);
        let rad = self.sym_dims("√", font);
        let h_num = self.sym_dims("1", font).y;
        let line_w = (rad.y / 14.0).floor();
        let y_bar = y_top + (d.y - h_num - 2.0 * line_w).round().max(10.0);
        let x_start = x_left + rad.x * (n_ch + 1) as f64 - (rad.x / 10.0).floor();
        self.canvas.line(
            DVec2::new(x_start, y_bar),
            DVec2::new(x_left + d.x, y_bar),
            line_w,
            color,
        );
    }

    /// A label centered on `x`, `y` pixels from the aligned edge of a band
    /// `al_h` tall, with any exponent and subscript set small to its right
    #[allow(clippy::too_many_arguments)]
    pub fn draw_sym_al(
        &mut self,
        symbol: &str,
        y_off: f64,
        color: Color,
        al_h: f64,
        x: f64,
        y: f64,
        font: &Font,
        al: Align,
    ) {
        if symbol.is_empty() {
            return;
        }
        let g = self.geometry;
        let label = Label::parse(symbol);
        let d = self.sym_dims(label.base, font);
        let y_top = match al {
            Align::Upper => y_off + y,
            Align::Lower => y_off + al_h - 1.0 - y - d.y * 1.2,
        };
        let x_left = x + g.li() - d.x / 2.0 + g.stt / 2.0;
        self.draw_symbol(label.base, color, x_left.round(), y_top, font);

        if label.exponent.is_none() && label.subscript.is_none() {
            return;
        }
        let sub_px = if font.size == FontSize::ScaleLabel.px() {
            FontSize::NumLg.px()
        } else {
            font.size
        };
        let sub_font = self.style.font(sub_px, FontStyle::Regular, Some(0.75));
        let x_right = (x_left + d.x).round();
        if let Some(exp) = &label.exponent {
            let raise = if is_prime(exp) { 0.0 } else { d.y / 2.0 };
            let exp = single_script_digit(exp);
            self.draw_symbol(&exp, color, x_right, y_top - raise, &sub_font);
        }
        if let Some(sub) = &label.subscript {
            self.draw_symbol(sub, color, x_right, y_top + d.y / 2.0, &sub_font);
        }
    }

    /// Ticks and numerals of a graduation in the given inks
    pub fn draw_graduation(&mut self, grad: &Graduation, y_off: f64, scale_h: f64, al: Align, inks: Inks) {
        for t in &grad.ticks {
            self.draw_tick(y_off, t.x, t.height, inks.symbol, scale_h, al);
        }
        for n in &grad.numerals {
            let color = match n.ink {
                Ink::Symbol => inks.symbol,
                Ink::Decimal => inks.decimal,
                Ink::Mirror => inks.mirror,
            };
            let al = n.align.unwrap_or(al);
            self.draw_sym_al(&n.text, y_off, color, scale_h, n.x, n.lift, &n.font, al);
        }
    }

    /// A complete scale: background band, end labels, partner legends and
    /// graduation
    pub fn gen_scale(&mut self, y_off: f64, sc: &Scale, al: Align, side: Option<Side>) {
        let g = self.geometry;
        let style = self.style;
        if style.is_hidden(&sc.key) {
            return;
        }
        let overhang = if sc.can_spiral() || sc.can_overhang() {
            OVERHANG_WIDE
        } else {
            OVERHANG
        };
        let scale_h = g.scale_h(&sc.key, side);
        let h_ratio = g.scale_h_ratio(&sc.key, side);
        let fonts = ScaleFonts::new(style, scale_h, h_ratio);
        let li = g.li();
        let scale_w = g.sl;
        trace!(scale = %sc.key, y_off, scale_h, ?al, "drawing scale");

        if self.debug {
            self.draw_box(li, y_off, scale_w, scale_h, palette::GREY);
        }

        let sym_col = style.fg_col(&sc.key, sc.is_increasing);
        if let Some(bg) = style.bg_col(&sc.key) {
            let (start, end) = sc.band_range(None, None);
            let start_pos = sc.pos_of(start, g);
            self.fill_rect(li + start_pos, y_off, sc.pos_of(end, g) - start_pos, scale_h, bg);
        }

        // Right
        let f_lbl_r = if sc.right_sym.chars().count() > 6 || sc.right_sym.contains('^') {
            fonts.label_small
        } else {
            fonts.label
        };
        let d2 = self.sym_dims(Label::parse(&sc.right_sym).base, &f_lbl_r);
        let y2 = (g.sh - d2.y) / 2.0;
        let x_right = (1.0 + overhang) * scale_w + d2.x / 2.0;
        self.draw_sym_al(&sc.right_sym, y_off, sym_col, scale_h, x_right, y2, &f_lbl_r, al);

        // Left
        let d1 = self.sym_dims(Label::parse(&sc.left_sym).base, &fonts.label);
        let y1 = (g.sh - d1.y) / 2.0;
        let x_left = -overhang * scale_w - d1.x / 2.0;
        self.draw_sym_al(&sc.left_sym, y_off, sym_col, scale_h, x_left, y1, &fonts.label, al);

        let alt = sc.mirror_key.as_deref().and_then(|k| self.catalog.scale(k));
        let mirror_col = match alt {
            Some(alt) => {
                let alt_col = style.fg_col(&alt.key, !alt.is_increasing);
                let gap = self.canvas.text_width("__", &fonts.label);
                self.draw_sym_al(&alt.left_sym, y_off, alt_col, scale_h, x_left - gap, y2, &fonts.label, al);
                self.draw_sym_al(
                    &alt.right_sym,
                    y_off,
                    alt_col,
                    scale_h,
                    x_right,
                    y2 - d2.y * 0.8,
                    &f_lbl_r,
                    al,
                );
                alt_col
            }
            None => {
                if sc.key == "ST" {
                    self.draw_sym_al(
                        ST_SINE_LEGEND,
                        y_off,
                        sym_col,
                        scale_h,
                        x_right,
                        y2 - d2.y * 0.8,
                        &f_lbl_r,
                        al,
                    );
                }
                style.fg_col(&sc.key, !sc.is_increasing)
            }
        };

        let grad = {
            let engine = GraduationEngine {
                geometry: g,
                style,
                metrics: &*self.canvas,
                h_ratio,
            };
            let mut grad = Graduation::default();
            if self.debug && Recipe::for_scale(sc) == Recipe::Percent {
                grad.extend(engine.graduate_default(sc));
            }
            grad.extend(recipe::graduate(sc, &engine, &fonts));
            grad
        };
        let inks = Inks {
            symbol: sym_col,
            decimal: if sc.is_increasing { style.decimal_color } else { sym_col },
            mirror: mirror_col,
        };
        self.draw_graduation(&grad, y_off, scale_h, al, inks);
    }

    /// A ruler's ticks and whole-unit numerals
    pub fn gen_ruler(&mut self, y_off: f64, ruler: &Ruler, al: Align, side: Option<Side>) {
        if self.style.is_hidden(ruler.key) {
            return;
        }
        let scale_h = self.geometry.scale_h(ruler.key, side);
        let col = self.style.fg_col(ruler.key, true);
        let grad = ruler.graduate(self.geometry, self.style);
        let inks = Inks {
            symbol: col,
            decimal: self.style.decimal_color,
            mirror: col,
        };
        self.draw_graduation(&grad, y_off, scale_h, al, inks);
    }
}

/// Resolved colors for each [`Ink`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inks {
    pub symbol: Color,
    pub decimal: Color,
    pub mirror: Color,
}

/// A lone superscript digit drawn as its ASCII form
fn single_script_digit(exp: &str) -> String {
    let mut chars = exp.chars();
    match (chars.next().and_then(script_digit), chars.next()) {
        (Some(d), None) => d.to_string(),
        _ => exp.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawOp, RecordingCanvas};
    use crate::style::FontFamily;

    fn scale(key: &str) -> &'static Scale {
        match Catalog::standard().scale(key) {
            Some(sc) => sc,
            None => panic!("no scale {key}"),
        }
    }

    fn paint(f: impl FnOnce(&mut Painter<'_, RecordingCanvas>)) -> RecordingCanvas {
        let g = Geometry::default();
        let style = Style::default();
        let mut canvas = RecordingCanvas::new();
        let mut p = Painter {
            canvas: &mut canvas,
            geometry: &g,
            style: &style,
            catalog: Catalog::standard(),
            debug: false,
        };
        f(&mut p);
        canvas
    }

    #[test]
    fn ticks_hang_from_their_edge() {
        let c = paint(|p| {
            p.draw_tick(100.0, 0.0, 70.0, palette::BLACK, 160.0, Align::Upper);
            p.draw_tick(100.0, 0.0, 70.0, palette::BLACK, 160.0, Align::Lower);
        });
        let rects: Vec<_> = c.rects().collect();
        // li = (8200 - 5600) / 2 = 1300, minus the 2px mid offset
        assert_eq!(rects[0].0, DVec2::new(1298.0, 100.0));
        assert_eq!(rects[1].0, DVec2::new(1298.0, 190.0));
        assert_eq!(rects[0].1, DVec2::new(3.0, 70.0));
    }

    #[test]
    fn labels_split_into_base_and_scripts() {
        let font = Style::default().font_for(FontSize::ScaleLabel, None);
        let c = paint(|p| p.draw_sym_al("x²", 0.0, palette::BLACK, 160.0, 0.0, 0.0, &font, Align::Upper));
        let texts: Vec<_> = c
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, top_left, font, .. } => Some((text.as_str(), *top_left, font.size)),
                _ => None,
            })
            .collect();
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[0].0, "x");
        assert_eq!(texts[0].2, 90);
        // exponent at 0.75 of the numeral size, raised by half the base height
        assert_eq!(texts[1].0, "2");
        assert_eq!(texts[1].2, 45);
        assert!(texts[1].1.y < texts[0].1.y);
        assert!(texts[1].1.x > texts[0].1.x);
    }

    #[test]
    fn primes_are_not_raised() {
        let font = Style::default().font_for(FontSize::NumLg, None);
        let c = paint(|p| p.draw_sym_al("W'₁", 0.0, palette::BLACK, 160.0, 0.0, 10.0, &font, Align::Upper));
        let ys: Vec<f64> = c.texts().map(|(_, at, _)| at.y).collect();
        assert_eq!(c.texts().map(|(t, _, _)| t).collect::<Vec<_>>(), ["W", "'", "1"]);
        assert_eq!(ys[0], ys[1]);
        assert!(ys[2] > ys[0]);
    }

    #[test]
    fn stripped_glyphs_and_radical_overbar() {
        let font = Font::new(FontFamily::Bright, 90, FontStyle::Regular, None);
        let c = paint(|p| p.draw_symbol("∡√x", palette::BLACK, 10.0, 20.0, &font));
        assert_eq!(c.texts().map(|(t, _, _)| t).collect::<Vec<_>>(), ["√x"]);
        let bars: Vec<_> = c
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Line { from, to, width, .. } => Some((*from, *to, *width)),
                _ => None,
            })
            .collect();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].0.y, bars[0].1.y);
        assert!(bars[0].0.x > 10.0 && bars[0].1.x > bars[0].0.x);
        assert!(bars[0].2 >= 1.0);
    }

    #[test]
    fn trig_scale_draws_mirror_legends_and_complements() {
        let c = paint(|p| p.gen_scale(0.0, scale("T"), Align::Lower, None));
        let red: Vec<&str> = c.texts().filter(|(_, _, col)| *col == palette::RED).map(|(t, _, _)| t).collect();
        // CoT reads right to left on the same ticks
        assert!(red.contains(&"CoT"));
        assert!(red.contains(&"cot x°"));
        assert!(red.contains(&"80"));
        assert!(c.texts().any(|(t, _, col)| t == "10" && col == palette::BLACK));
    }

    #[test]
    fn hidden_scales_draw_nothing() {
        let g = Geometry::default();
        let style = Style::default().with_hidden("C");
        let mut canvas = RecordingCanvas::new();
        let mut p = Painter {
            canvas: &mut canvas,
            geometry: &g,
            style: &style,
            catalog: Catalog::standard(),
            debug: false,
        };
        p.gen_scale(0.0, scale("C"), Align::Upper, None);
        assert!(canvas.ops.is_empty());
    }

    #[test]
    fn background_band_spans_the_scale() {
        let g = Geometry::default();
        let style = Style::default().with_bg_color("C", palette::FC_LIGHT_GREEN_BG);
        let mut canvas = RecordingCanvas::new();
        let mut p = Painter {
            canvas: &mut canvas,
            geometry: &g,
            style: &style,
            catalog: Catalog::standard(),
            debug: false,
        };
        p.gen_scale(50.0, scale("C"), Align::Upper, None);
        let Some((origin, size, _)) = canvas.rects().find(|(_, _, col)| *col == palette::FC_LIGHT_GREEN_BG) else {
            panic!("no band");
        };
        assert_eq!(origin, DVec2::new(1300.0, 50.0));
        assert_eq!(size, DVec2::new(5600.0, 160.0));
    }

    #[test]
    fn rulers_number_whole_units() {
        let c = paint(|p| p.gen_ruler(0.0, &Ruler::CM, Align::Upper, None));
        let numerals: Vec<&str> = c.texts().map(|(t, _, _)| t).collect();
        assert_eq!(numerals.first(), Some(&"0"));
        assert!(numerals.contains(&"28"));
    }
}
