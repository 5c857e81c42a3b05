//! Physical layout of a slide rule in pixels.
//!
//! One side is `side_w × side_h`: an upper stator, the slide, and a lower
//! stator stacked top to bottom. Both sides are printed one above the other
//! with `o_y` gaps. Scales run `scale_w` pixels starting at the left index
//! [`Geometry::li`].

use std::collections::BTreeMap;

use glam::DVec2;

use crate::types::{PerSide, RulePart, Side};

/// Cutoff outline inset, in pixels
const CUTOFF_INSET: f64 = 30.0;

/// Bracket screw holes are 2.5 mm across
pub const SCREW_HOLE_R: f64 = 34.0;

pub const PIXELS_PER_CM: f64 = 1600.0 / 6.0;
pub const PIXELS_PER_IN: f64 = PIXELS_PER_CM * 2.54;

/// Multipliers over the standard tick height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HMod(pub f64);

impl HMod {
    pub const DOT: HMod = HMod(0.25);
    pub const XS: HMod = HMod(0.5);
    pub const SM: HMod = HMod(0.85);
    pub const MED: HMod = HMod(1.0);
    pub const LG: HMod = HMod(1.15);
    pub const LG2: HMod = HMod(1.2);
    pub const XL: HMod = HMod(1.3);
}

/// Tick stroke width and standard height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSize {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub side_w: f64,
    pub side_h: f64,
    /// Horizontal margin around each side
    pub o_x: f64,
    /// Vertical margin around each side
    pub o_y: f64,
    /// Scale length
    pub sl: f64,
    /// Default scale height
    pub sh: f64,
    /// Tick stroke width
    pub stt: f64,
    /// Standard tick height
    pub sth: f64,
    pub slide_h: f64,
    pub top_margin: f64,
    pub scale_h_overrides: PerSide<BTreeMap<String, f64>>,
    pub margin_overrides: PerSide<BTreeMap<String, f64>>,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            side_w: 8000.0,
            side_h: 1600.0,
            o_x: 100.0,
            o_y: 100.0,
            sl: 5600.0,
            sh: 160.0,
            stt: 3.0,
            sth: 70.0,
            slide_h: 640.0,
            top_margin: 110.0,
            scale_h_overrides: PerSide::default(),
            margin_overrides: PerSide::default(),
        }
    }
}

impl Geometry {
    pub const DEFAULT_SCALE_H: f64 = 160.0;

    pub fn new(side_wh: (f64, f64), margins: (f64, f64), scale_wh: (f64, f64), tick: TickSize, slide_h: f64) -> Self {
        Self {
            side_w: side_wh.0,
            side_h: side_wh.1,
            o_x: margins.0,
            o_y: margins.1,
            sl: scale_wh.0,
            sh: scale_wh.1,
            stt: tick.width,
            sth: tick.height,
            slide_h,
            ..Self::default()
        }
    }

    pub fn with_top_margin(mut self, top_margin: f64) -> Self {
        self.top_margin = top_margin;
        self
    }

    pub fn with_scale_h(mut self, side: Side, keys: &[&str], h: f64) -> Self {
        let map = self.scale_h_overrides.get_mut(side);
        for key in keys {
            map.insert((*key).to_string(), h);
        }
        self
    }

    pub fn with_margin(mut self, side: Side, key: &str, margin: f64) -> Self {
        self.margin_overrides.get_mut(side).insert(key.to_string(), margin);
        self
    }

    pub fn default_tick() -> TickSize {
        TickSize { width: 3.0, height: 70.0 }
    }

    pub fn total_w(&self) -> f64 {
        self.side_w + 2.0 * self.o_x
    }

    pub fn print_height(&self) -> f64 {
        2.0 * self.side_h + 3.0 * self.o_y
    }

    pub fn midpoint_x(&self) -> f64 {
        self.total_w() / 2.0
    }

    pub fn stator_h(&self) -> f64 {
        ((self.side_h - self.slide_h) / 2.0).floor()
    }

    /// Width of the metal cutoff blocks at each stator end
    pub fn cutoff_w(&self) -> f64 {
        self.stator_h()
    }

    /// Left index: x of a scale's position `0`
    pub fn li(&self) -> f64 {
        ((self.total_w() - self.sl) / 2.0).floor()
    }

    pub fn tick_mid_offset(&self) -> f64 {
        (self.stt / 2.0).floor() + 1.0
    }

    /// Minimum legible distance between two stroked ticks
    pub fn min_tick_offset(&self) -> f64 {
        3.0 * self.stt
    }

    pub fn tick_h(&self, hmod: HMod, h_ratio: Option<f64>) -> f64 {
        (self.sth * hmod.0 * h_ratio.unwrap_or(1.0)).round()
    }

    /// Y offset of a part's top or bottom edge within one side
    pub fn edge_h(&self, part: RulePart, top: bool) -> f64 {
        match (part, top) {
            (RulePart::StatorTop, true) => 0.0,
            (RulePart::StatorTop, false) => self.stator_h(),
            (RulePart::Slide, true) => self.stator_h(),
            (RulePart::Slide, false) => self.stator_h() + self.slide_h,
            (RulePart::StatorBottom, true) => self.stator_h() + self.slide_h,
            (RulePart::StatorBottom, false) => self.side_h,
        }
    }

    /// Height of a scale's band; without a side, front overrides win over rear
    pub fn scale_h(&self, key: &str, side: Option<Side>) -> f64 {
        lookup(&self.scale_h_overrides, key, side).unwrap_or(self.sh)
    }

    pub fn scale_margin(&self, key: &str, side: Option<Side>) -> f64 {
        lookup(&self.margin_overrides, key, side).unwrap_or(0.0)
    }

    /// Font and tick rescale factor for scales shorter or taller than standard
    pub fn scale_h_ratio(&self, key: &str, side: Option<Side>) -> Option<f64> {
        let h = self.scale_h(key, side);
        (h != Self::DEFAULT_SCALE_H).then_some(h / Self::DEFAULT_SCALE_H)
    }

    /// Horizontal mirror of an x span across the side
    pub fn mirror_h(&self, x1: f64, x2: f64) -> (f64, f64) {
        let w = self.total_w();
        (w - x2, w - x1)
    }

    /// Vertical mirror of a y span about `mid`
    pub fn mirror_v(mid: f64, y1: f64, y2: f64) -> (f64, f64) {
        (mid - y2, mid - y1)
    }

    /// Outline of the left metal cutoff at vertical offset `y_off`.
    ///
    /// A narrow upright over the upper stator joined to a full-width foot
    /// under the slide and lower stator.
    pub fn cutoff_outline(&self, y_off: f64) -> Vec<(DVec2, DVec2)> {
        let b = CUTOFF_INSET;
        let x_left = b + self.o_x;
        let x_mid = x_left + (self.cutoff_w() / 2.0).floor();
        let x_right = self.cutoff_w() - b + self.o_x;
        let y_top = b + y_off;
        let y_mid = y_top + self.side_h - self.stator_h();
        let y_bottom = self.side_h - b + y_off;
        let p = DVec2::new;
        vec![
            (p(x_mid, y_top), p(x_right, y_top)),
            (p(x_left, y_mid), p(x_mid, y_mid)),
            (p(x_left, y_bottom), p(x_right, y_bottom)),
            (p(x_mid, y_top), p(x_mid, y_mid)),
            (p(x_left, y_mid), p(x_left, y_bottom)),
            (p(x_right, y_top), p(x_right, y_bottom)),
        ]
    }

    /// Screw hole centers of the left metal cutoff, upright then foot
    pub fn screw_holes(&self, y_off: f64) -> [DVec2; 2] {
        let b = CUTOFF_INSET;
        let x_left = b + self.o_x;
        let x_mid = x_left + (self.cutoff_w() / 2.0).floor();
        let x_right = self.cutoff_w() - b + self.o_x;
        let half = (self.stator_h() / 2.0).floor();
        [
            DVec2::new(((x_mid + x_right) / 2.0).floor(), y_off + half),
            DVec2::new(((x_left + x_right) / 2.0).floor(), y_off + self.side_h - half),
        ]
    }
}

fn lookup(overrides: &PerSide<BTreeMap<String, f64>>, key: &str, side: Option<Side>) -> Option<f64> {
    match side {
        Some(side) => overrides.get(side).get(key).copied(),
        None => Side::ALL
            .iter()
            .find_map(|s| overrides.get(*s).get(key).copied()),
    }
}
