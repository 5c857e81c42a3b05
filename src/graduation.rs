//! Tick placement and automatic graduation density.
//!
//! A graduation is laid out on an integer index grid: values are multiplied
//! by a scale factor `sf` so that every tick sits on an exact integer and
//! divisibility decides which level of tick it is. Four step sizes, coarsest
//! first, come from a [`TickFactors`] triple:
//!
//! ```text
//! step1 ──┬──────────────┬──  level 1: numbered, tallest
//! step2   ├──────┬───────┤    level 2
//! step3   ├──┬───┼───┬───┤    level 3
//! step4   ├┬┬┼┬┬┬┼┬┬┬┼┬┬┬┤    level 4: dots
//! ```

use crate::geometry::{Geometry, HMod};
use crate::label::{format_numeral, sig_digit};
use crate::log::{debug, trace};
use crate::render::TextMetrics;
use crate::scale::{Scale, Segment};
use crate::style::{Font, FontSize, Style};
use crate::types::Align;

/// Successive divisors from one level to the next
pub type TickFactors = [i64; 3];

/// Subdivision patterns keyed by their total division count, finest first
pub const TF_BY_MIN: [(i64, TickFactors); 10] = [
    (500, [10, 10, 5]),
    (250, [10, 5, 5]),
    (100, [10, 2, 5]),
    (50, [2, 5, 5]),
    (25, [1, 5, 5]),
    (20, [2, 5, 2]),
    (10, [2, 5, 1]),
    (5, [1, 5, 1]),
    (2, [1, 2, 1]),
    (1, [1, 1, 1]),
];

/// Halves, quarters and so on, for inch rulers
pub const TF_BIN: TickFactors = [4, 4, 4];

/// Factors for a division count from [`TF_BY_MIN`]
pub const fn tf(min: i64) -> TickFactors {
    let mut i = 0;
    while i < TF_BY_MIN.len() {
        if TF_BY_MIN[i].0 == min {
            return TF_BY_MIN[i].1;
        }
        i += 1;
    }
    [1, 1, 1]
}

/// Four step sizes by iterative integer division
pub fn subdivide(step1: i64, f: TickFactors) -> [i64; 4] {
    let step2 = step1 / f[0];
    let step3 = step2 / f[1];
    let step4 = step3 / f[2];
    [step1, step2, step3, step4]
}

/// Keep index grids within exact f64 integer range
const MAX_DIGITS: i32 = 15;

/// Label room past each end of the scale, as a fraction of its length
pub const OVERHANG: f64 = 0.02;
pub const OVERHANG_WIDE: f64 = 0.07;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Pixels right of the left index
    pub x: f64,
    pub height: f64,
}

/// Which style color a piece of text takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ink {
    /// The scale's own foreground
    Symbol,
    /// The decimal color on increasing scales, else the foreground
    Decimal,
    /// The mirror scale's color, for complementary values
    Mirror,
}

/// Text hung from a tick: a numeral or a short legend such as `1°`
#[derive(Debug, Clone, PartialEq)]
pub struct Numeral {
    /// Center, in pixels right of the left index
    pub x: f64,
    pub text: String,
    /// Distance from the aligned edge
    pub lift: f64,
    pub font: Font,
    pub ink: Ink,
    /// Forces an edge regardless of the scale's alignment
    pub align: Option<Align>,
}

/// Ticks and numerals for one scale, independent of where it is drawn
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graduation {
    pub ticks: Vec<Tick>,
    pub numerals: Vec<Numeral>,
}

impl Graduation {
    pub fn tick(&mut self, x: f64, height: f64) {
        self.ticks.push(Tick { x, height });
    }

    pub fn numeral(&mut self, x: f64, text: impl Into<String>, lift: f64, font: Font, ink: Ink) {
        self.numerals.push(Numeral {
            x,
            text: text.into(),
            lift,
            font,
            ink,
            align: None,
        });
    }

    pub fn extend(&mut self, other: Graduation) {
        self.ticks.extend(other.ticks);
        self.numerals.extend(other.numerals);
    }

    /// Drop everything positioned outside `[lo, hi]`
    pub fn retain_within(&mut self, lo: f64, hi: f64) {
        let span = lo..=hi;
        self.ticks.retain(|t| span.contains(&t.x));
        self.numerals.retain(|n| span.contains(&n.x));
    }
}

/// A fully specified run of ticks over `[i_start, i_end)` on an index grid
#[derive(Debug, Clone, PartialEq)]
pub struct TickRun {
    pub i_start: i64,
    pub i_end: i64,
    /// Index units per value unit
    pub sf: i64,
    pub steps: [i64; 4],
    pub heights: [f64; 4],
    /// Numeral font per level, none for unnumbered levels
    pub fonts: [Option<Font>; 3],
    /// Per level, whether numerals shrink to one significant digit
    pub digit1: [bool; 3],
}

impl TickRun {
    pub fn emit(&self, sc: &Scale, width: f64, out: &mut Graduation) {
        let [step1, step2, step3, step4] = self.steps;
        if step4 <= 0 {
            return;
        }
        let mut i = self.i_start;
        while i < self.i_end {
            let n = i as f64 / self.sf as f64;
            let x = sc.position_for(n, width, 0.0);
            let level = if i % step1 == 0 {
                0
            } else if i % step2 == 0 {
                1
            } else if i % step3 == 0 {
                2
            } else {
                3
            };
            if level < 3 {
                if let Some(font) = self.fonts[level] {
                    let text = if self.digit1[level] {
                        sig_digit(n)
                    } else {
                        format_numeral(n)
                    };
                    let ink = if level == 2 { Ink::Decimal } else { Ink::Symbol };
                    out.numeral(x, text, self.heights[level], font, ink);
                }
            }
            out.tick(x, self.heights[level]);
            i += step4;
        }
    }
}

/// Pick the finest subdivision whose third-level ticks stay legible.
///
/// The gap is measured at `step3` because fourth-level ticks may shrink to
/// dots at the compressed end.
///
/// Entries with more divisions than `step1` are skipped. The realized gap is
/// measured at both ends of the range; when nothing qualifies the coarsest
/// entry comes back.
pub fn select_factors(
    sc: &Scale,
    start: f64,
    end: f64,
    step1: i64,
    sf: i64,
    width: f64,
    min_gap: f64,
) -> (i64, TickFactors) {
    let coarsest = TF_BY_MIN[TF_BY_MIN.len() - 1];
    TF_BY_MIN
        .iter()
        .copied()
        .filter(|&(key, _)| key <= step1)
        .find(|&(_, factors)| {
            let step3 = subdivide(step1, factors)[2];
            let gap = sc.min_offset_for_delta(start, end, step3 as f64 / sf as f64, width);
            gap >= min_gap
        })
        .unwrap_or(coarsest)
}

/// Inputs for generic graduation of one scale on one rule
pub struct GraduationEngine<'a> {
    pub geometry: &'a Geometry,
    pub style: &'a Style,
    pub metrics: &'a dyn TextMetrics,
    pub h_ratio: Option<f64>,
}

impl GraduationEngine<'_> {
    fn th(&self, m: HMod) -> f64 {
        self.geometry.tick_h(m, self.h_ratio)
    }

    fn font(&self, size: FontSize) -> Font {
        self.style.font_for(size, self.h_ratio)
    }

    /// Plan the densest legible run over a segment, or nothing for an empty one
    pub fn plan_auto(&self, sc: &Scale, seg: Segment) -> Option<TickRun> {
        let (start, end) = if seg.start > seg.end {
            (seg.end, seg.start)
        } else {
            (seg.start, seg.end)
        };
        let delta = end - start;
        let top = start.max(end);
        if delta <= 0.0 || top == 0.0 || !delta.is_finite() {
            return None;
        }
        let g = self.geometry;
        let width = g.sl;

        let log_diff = (delta / top).abs().log10().abs();
        let digits = (log_diff.ceil() as i32 + 3).min(MAX_DIGITS);
        let sf = 10i64.pow(digits as u32);
        let frac_w = sc.offset_between(start, end, 1.0);
        let exp = ((delta.log10() - 0.5 * frac_w).trunc() as i32 + digits).clamp(0, MAX_DIGITS);
        let step1 = 10i64.pow(exp as u32);

        let (key, factors) = select_factors(sc, start, end, step1, sf, width, g.min_tick_offset());
        let steps = subdivide(step1, factors);
        let [_, step2, step3, step4] = steps;
        trace!(scale = %sc.key, start, end, sf, step1, key, "auto graduation");

        let mut i_start = (start * sf as f64).trunc() as i64;
        let offset = i_start.rem_euclid(step4);
        if offset > 0 {
            i_start += step4 - offset;
        }
        let i_end = (end * sf as f64 + if seg.include_last { 1.0 } else { 0.0 }).trunc() as i64;

        let mut num_font = self.font(FontSize::NumLg);
        let numeral_gap = sc.min_offset_for_delta(start, end, step1 as f64 / sf as f64, width);
        let max_chars = (numeral_gap / self.metrics.text_width("_", &num_font)).floor();
        if max_chars < 2.0 {
            num_font = self.font(FontSize::NumSm);
        }
        let sub_num = step4 < step3 && step3 < step1 && max_chars > 8.0;

        let dot = self.th(HMod::DOT);
        let heights = [
            self.th(HMod::MED),
            self.th(if step3 == step1 / 2 && step4 < step3 {
                HMod::XL
            } else {
                HMod::XS
            }),
            if step4 < step3 { self.th(HMod::XS) } else { dot },
            dot,
        ];
        let fonts = [
            Some(num_font),
            ((sub_num && step2 == step1 / 10) || step2 == step1 / 2).then(|| self.font(FontSize::NumSm)),
            (sub_num && step3 == step1 / 10).then(|| self.font(FontSize::NumXs)),
        ];

        Some(TickRun {
            i_start,
            i_end,
            sf,
            steps,
            heights,
            fonts,
            digit1: [max_chars < 3.0, max_chars < 16.0, max_chars < 128.0],
        })
    }

    /// Generic graduation across all of a scale's default segments
    pub fn graduate_default(&self, sc: &Scale) -> Graduation {
        let mut out = Graduation::default();
        for seg in sc.default_segments() {
            match self.plan_auto(sc, seg) {
                Some(run) => run.emit(sc, self.geometry.sl, &mut out),
                None => debug!(scale = %sc.key, ?seg, "skipping empty segment"),
            }
        }
        out
    }
}
