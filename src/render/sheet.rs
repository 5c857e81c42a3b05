//! Whole sheets: both faces of an instrument, or one scale per row.

use glam::DVec2;

use super::canvas::Canvas;
use super::scale::Painter;
use super::{Mode, RenderOptions};
use crate::errors::RenderError;
use crate::geometry::{Geometry, SCREW_HOLE_R};
use crate::layout::{Placeable, Placed};
use crate::log::{debug, warn};
use crate::model::Model;
use crate::style::{FontSize, palette};
use crate::types::{Align, RulePart, Side};

/// Gap between the top of a side and the titling row
const TITLE_Y: f64 = 25.0;

/// Reject geometry no sheet can be drawn on
pub fn validate(g: &Geometry) -> Result<(), RenderError> {
    let invalid = |message: String| Err(RenderError::InvalidGeometry { message });
    let positive = [
        ("side width", g.side_w),
        ("side height", g.side_h),
        ("scale length", g.sl),
        ("scale height", g.sh),
        ("tick width", g.stt),
        ("tick height", g.sth),
    ];
    if let Some((name, v)) = positive.iter().find(|(_, v)| !(v.is_finite() && *v > 0.0)) {
        return invalid(format!("{name} must be positive, got {v}"));
    }
    if g.o_x < 0.0 || g.o_y < 0.0 {
        return invalid(format!("margins must not be negative, got {}×{}", g.o_x, g.o_y));
    }
    if !(0.0..g.side_h).contains(&g.slide_h) {
        return invalid(format!("slide height {} does not fit a side {} tall", g.slide_h, g.side_h));
    }
    if g.sl > g.total_w() {
        return invalid(format!("scale length {} exceeds the print width {}", g.sl, g.total_w()));
    }
    Ok(())
}

/// Pixel size of the print for a mode
pub fn print_size(model: &Model, mode: Mode) -> DVec2 {
    match mode {
        Mode::SlideRule => {
            let g = &model.geometry;
            DVec2::new(g.total_w(), g.print_height())
        }
        Mode::Diagnostic => {
            let d = DiagnosticSheet::new(model);
            DVec2::new(d.geometry.total_w(), d.geometry.side_h)
        }
    }
}

fn painter<'a, C: Canvas>(
    canvas: &'a mut C,
    geometry: &'a Geometry,
    model: &'a Model,
    options: &RenderOptions,
) -> Painter<'a, C> {
    Painter {
        canvas,
        geometry,
        style: &model.style,
        catalog: model.catalog,
        debug: options.debug,
    }
}

/// Frame lines at the stator edges, the side's ends and the stator cut-outs
pub fn draw_borders<C: Canvas>(canvas: &mut C, g: &Geometry, y0: f64, side: Side) {
    let color = palette::BLACK;
    let stator_h = g.stator_h();
    for y in [0.0, stator_h - 1.0, g.side_h - stator_h - 1.0, g.side_h - 2.0] {
        canvas.fill_rect(DVec2::new(g.o_x, y0 + y), DVec2::new(g.side_w, 1.0), color);
    }
    for x in [g.o_x, g.total_w() - g.o_x] {
        canvas.fill_rect(DVec2::new(x, y0), DVec2::new(1.0, g.side_h), color);
    }

    let y_start = match side {
        Side::Front => y0,
        Side::Rear => y0 + g.side_h - stator_h,
    };
    let half_stock = (stator_h / 2.0).floor();
    for x in [half_stock + g.o_x, g.total_w() - half_stock - g.o_x] {
        canvas.fill_rect(DVec2::new(x, y_start), DVec2::new(1.0, stator_h), color);
    }
}

/// Outlines of the metal end brackets, mirrored to the right end and, on
/// the rear, upside down
pub fn draw_metal_cutoffs<C: Canvas>(canvas: &mut C, g: &Geometry, y_off: f64, side: Side) {
    let verticals = [g.cutoff_w() + g.o_x, g.total_w() - g.cutoff_w() - g.o_x];
    for (i, x) in verticals.into_iter().enumerate() {
        canvas.fill_rect(DVec2::new(x - 1.0, y_off), DVec2::new(2.0, i as f64), palette::CUTOFF);
    }

    let left = g.cutoff_outline(y_off);
    let right = left.iter().map(|&(a, b)| {
        let (x1, x2) = g.mirror_h(a.x, b.x);
        (DVec2::new(x1, a.y), DVec2::new(x2, b.y))
    });
    let mut segments: Vec<(DVec2, DVec2)> = left.iter().copied().chain(right).collect();
    if side == Side::Rear {
        let mid_y = 2.0 * y_off + g.side_h;
        for (a, b) in &mut segments {
            let (y1, y2) = Geometry::mirror_v(mid_y, a.y, b.y);
            (a.y, b.y) = (y1, y2);
        }
    }
    for (a, b) in segments {
        let min = a.min(b) - DVec2::ONE;
        let max = a.max(b) + DVec2::ONE;
        canvas.fill_rect(min, max - min, palette::CUTOFF2);
    }

    let w = g.total_w();
    for hole in g.screw_holes(y_off) {
        for mut c in [hole, DVec2::new(w - hole.x, hole.y)] {
            if side == Side::Rear {
                c.y = 2.0 * y_off + g.side_h - c.y;
            }
            canvas.circle(c, SCREW_HOLE_R, palette::CUT);
        }
    }
}

/// Both faces of an instrument, front above rear
pub fn draw_slide_rule<C: Canvas>(canvas: &mut C, model: &Model, options: &RenderOptions) {
    let g = &model.geometry;
    let layout = &model.layout;
    let y_front_start = g.o_y;
    let y_rear_start = y_front_start + g.side_h + g.o_y;

    for side in Side::ALL {
        let y0 = match side {
            Side::Front => y_front_start,
            Side::Rear => y_rear_start,
        };
        draw_borders(canvas, g, y0, side);
        if options.cutoffs {
            draw_metal_cutoffs(canvas, g, y0, side);
        }
    }

    let mut p = painter(canvas, g, model, options);
    let mut y_side_start = y_front_start;
    let mut y_off = y_front_start;
    if model.is_demo() {
        let f_lbl = model.style.font_for(FontSize::ScaleLabel, None);
        let side_w_q = (g.side_w / 4.0).floor();
        let li = g.li();
        let y_title = TITLE_Y + y_off;
        let titles = [
            (&model.name, side_w_q - li),
            (&model.subtitle, side_w_q * 2.0 - li + g.o_x),
            (&model.brand, side_w_q * 3.0 - li),
        ];
        for (text, x) in titles {
            p.draw_sym_al(text, y_title, palette::RED, 0.0, x, 0.0, &f_lbl, Align::Upper);
        }
        y_off = y_title + f_lbl.size as f64;
    }

    for side in Side::ALL {
        for part in RulePart::ALL {
            let placed = layout.scales_at(side, part);
            let last = placed.len().saturating_sub(1);
            for (i, sc) in placed.iter().enumerate() {
                let key = sc.key();
                let scale_h = g.scale_h(key, Some(side));
                let al = layout.scale_al(key, side, part);
                y_off = if i == 0 && al == Align::Upper {
                    y_side_start + g.edge_h(part, true)
                } else if i == last && al == Align::Lower {
                    y_side_start + g.edge_h(part, false) - scale_h
                } else {
                    y_off + g.scale_margin(key, Some(side))
                };
                debug!(%side, %part, key, y_off, ?al, "placing scale");
                draw_placed(&mut p, y_off, sc, al, Some(side));
                y_off += scale_h;
            }
        }
        y_side_start = y_rear_start;
        y_off = y_rear_start + g.top_margin;
    }
}

fn draw_placed<C: Canvas>(p: &mut Painter<'_, C>, y_off: f64, placed: &Placed, al: Align, side: Option<Side>) {
    match placed {
        Placed::Scale(sc) => p.gen_scale(y_off, sc, al, side),
        Placed::Ruler(r) => p.gen_ruler(y_off, r, al, side),
    }
}

/// Every scale on its own row under a title, for checking graduations
#[derive(Debug, Clone)]
pub struct DiagnosticSheet {
    pub geometry: Geometry,
    /// Keys in row order
    pub names: Vec<String>,
    /// Row pitch: scale height plus spacing
    pub row_h: f64,
}

impl DiagnosticSheet {
    /// Scales every sheet starts with, in order
    pub const LEADING: [&'static str; 16] = [
        "A", "B", "C", "D", "K", "R1", "R2", "CI", "DI", "CF", "DF", "CIF", "L", "S", "T", "ST",
    ];
    const SCALE_H: f64 = Geometry::DEFAULT_SCALE_H;
    /// Title block height above the first row
    const HEADER_H: f64 = 120.0 + Self::SCALE_H;

    /// The demo model shows its own layout; every other model shows its
    /// whole catalog
    pub fn new(model: &Model) -> Self {
        let is_demo = model.is_demo();
        let candidates: Vec<&str> = if is_demo {
            model.layout.keys_in_order().collect()
        } else {
            model.catalog.keys().collect()
        };
        let mut names: Vec<String> = Vec::new();
        for key in Self::LEADING.into_iter().chain(candidates) {
            if names.iter().any(|n| n == key) {
                continue;
            }
            if !model.catalog.contains(key) {
                warn!(key, catalog = model.catalog.name, "no such scale for the diagnostic sheet");
                continue;
            }
            names.push(key.to_string());
        }

        let row_h = Self::SCALE_H + if is_demo { 40.0 } else { 10.0 };
        let total_h = Self::HEADER_H + (names.len() + 1) as f64 * row_h + Self::SCALE_H;
        let geometry = Geometry::new(
            (6500.0, total_h),
            (250.0, 250.0),
            (Geometry::default().sl, Self::SCALE_H),
            Geometry::default_tick(),
            480.0,
        );
        Self { geometry, names, row_h }
    }

    pub fn row_y(&self, n: usize) -> f64 {
        Self::HEADER_H + (n + 1) as f64 * self.row_h
    }

    pub fn draw<C: Canvas>(&self, canvas: &mut C, model: &Model, options: &RenderOptions) {
        let g = &self.geometry;
        let style = &model.style;
        let mut p = painter(canvas, g, model, options);
        let title_x = g.midpoint_x() - g.li();
        p.draw_sym_al(
            "Diagnostic Test Print of Available Scales",
            50.0,
            style.fg,
            0.0,
            title_x,
            0.0,
            &style.font_for(FontSize::Title, None),
            Align::Upper,
        );
        p.draw_sym_al(
            &self.names.join(" "),
            200.0,
            style.fg,
            0.0,
            title_x,
            0.0,
            &style.font_for(FontSize::Subtitle, None),
            Align::Upper,
        );

        for (n, key) in self.names.iter().enumerate() {
            let al = if model.is_demo() {
                Align::Lower
            } else {
                model.layout.scale_al(key, Side::Front, RulePart::Slide)
            };
            let y_off = self.row_y(n);
            if let Some(sc) = model.catalog.scale(key) {
                p.gen_scale(y_off, sc, al, None);
            } else if let Some(r) = model.catalog.ruler(key) {
                p.gen_ruler(y_off, r, al, None);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingCanvas;

    fn model(name: &str) -> Model {
        match Model::named(name) {
            Ok(m) => m,
            Err(e) => panic!("{name}: {e:?}"),
        }
    }

    #[test]
    fn default_geometry_is_valid() {
        assert!(validate(&Geometry::default()).is_ok());
    }

    #[test]
    fn oversized_slide_is_rejected() {
        let g = Geometry {
            slide_h: 1700.0,
            ..Geometry::default()
        };
        let Err(RenderError::InvalidGeometry { message }) = validate(&g) else {
            panic!("slide taller than the side should be rejected");
        };
        assert!(message.contains("slide height"));
    }

    #[test]
    fn borders_frame_both_stators() {
        let g = Geometry::default();
        let mut c = RecordingCanvas::new();
        draw_borders(&mut c, &g, 100.0, Side::Front);
        let ys: Vec<f64> = c.rects().filter(|(_, size, _)| size.y == 1.0).map(|(o, _, _)| o.y).collect();
        // stator_h = (1600 - 640) / 2 = 480
        assert_eq!(ys, [100.0, 579.0, 1219.0, 1698.0]);
        // two frame edges and two cut-outs
        assert_eq!(c.rects().filter(|(_, size, _)| size.x == 1.0).count(), 4);
    }

    #[test]
    fn rear_cutoffs_are_flipped() {
        let g = Geometry::default();
        let outline_ys = |side: Side| -> Vec<f64> {
            let mut c = RecordingCanvas::new();
            draw_metal_cutoffs(&mut c, &g, 0.0, side);
            c.rects()
                .filter(|(_, _, col)| *col == palette::CUTOFF2)
                .map(|(o, _, _)| o.y)
                .collect()
        };
        // the foot's top edge sits 30px above the slide's bottom: 1150 on the
        // front, 1600 - 1150 on the rear
        assert!(outline_ys(Side::Front).contains(&1149.0));
        assert!(outline_ys(Side::Rear).contains(&449.0));
        assert!(!outline_ys(Side::Rear).contains(&1149.0));
    }

    #[test]
    fn cutoffs_mark_mirrored_screw_holes() {
        let g = Geometry::default();
        let holes = |side: Side| -> Vec<DVec2> {
            let mut c = RecordingCanvas::new();
            draw_metal_cutoffs(&mut c, &g, 0.0, side);
            assert!(c.circles().all(|(_, r)| r == SCREW_HOLE_R));
            c.circles().map(|(center, _)| center).collect()
        };
        let front = holes(Side::Front);
        assert_eq!(front.len(), 4);
        assert_eq!(front[0].x + front[1].x, g.total_w());
        // the upright sits over the upper stator on the front, the lower on the rear
        let [upright, _] = g.screw_holes(0.0);
        assert_eq!(front[0], upright);
        assert_eq!(holes(Side::Rear)[0].y, g.side_h - upright.y);
    }

    #[test]
    fn first_upper_scale_snaps_to_its_part_top() {
        let m = model("MannheimOriginal");
        let mut c = RecordingCanvas::new();
        draw_slide_rule(&mut c, &m, &RenderOptions::default());
        // the B scale opens the slide aligned up: its left label sits just
        // under the upper stator edge
        let g = &m.geometry;
        let slide_top = g.o_y + g.stator_h();
        assert!(c.texts().any(|(t, at, _)| t == "B" && at.y >= slide_top && at.y < slide_top + g.sh));
    }

    #[test]
    fn demo_titles_in_red() {
        let m = model("Demo");
        let mut c = RecordingCanvas::new();
        draw_slide_rule(&mut c, &m, &RenderOptions::default());
        let red: Vec<&str> = c.texts().filter(|(_, _, col)| *col == palette::RED).map(|(t, _, _)| t).collect();
        assert!(red.contains(&"BOGELEX 1000"));
        assert!(red.contains(&"KWENA & TOOR CO."));
    }

    #[test]
    fn diagnostic_rows_follow_the_leading_list() {
        let demo = DiagnosticSheet::new(&model("Demo"));
        assert_eq!(&demo.names[..4], ["A", "B", "C", "D"]);
        assert_eq!(demo.row_h, 200.0);
        assert_eq!(demo.row_y(0), 480.0);
        // demo layout keys not in the leading list come after it, once
        assert_eq!(demo.names.iter().filter(|n| n.as_str() == "D").count(), 1);

        let aristo = DiagnosticSheet::new(&model("Aristo965"));
        assert!(!aristo.names.iter().any(|n| n == "R1"));
        assert!(aristo.names.iter().any(|n| n == "Pct"));
        assert_eq!(aristo.geometry.li(), ((6500.0 + 500.0 - 5600.0) / 2.0f64).floor());
    }

    #[test]
    fn diagnostic_sheet_draws_every_row() {
        let m = model("Demo");
        let sheet = DiagnosticSheet::new(&m);
        let mut c = RecordingCanvas::new();
        sheet.draw(&mut c, &m, &RenderOptions::default());
        let texts: Vec<&str> = c.texts().map(|(t, _, _)| t).collect();
        assert!(texts.contains(&"Diagnostic Test Print of Available Scales"));
        assert!(texts.contains(&"CIF"));
    }
}
