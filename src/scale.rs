//! Scale descriptors: a transform plus the metadata needed to label it.

use std::ops::Range;

use crate::geometry::Geometry;
use crate::marks::GaugeMark;
use crate::transform::TransformKind;

/// Stand-in for `log10(0)` when a range touches zero
const LOG_ZERO: f64 = f64::NEG_INFINITY;

/// A scale is "overhanging" when extended values reach this far past an end
const MIN_OVERHANG_FRAC: f64 = 0.02;

/// A value range to graduate, end inclusive only when `include_last` is set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub include_last: bool,
}

/// Labelling and layout for one transform.
///
/// Two scales are the same scale when their keys match.
#[derive(Debug, Clone)]
pub struct Scale {
    pub left_sym: String,
    pub right_sym: String,
    pub kind: TransformKind,
    /// Offset from the left index, as a fraction of scale width
    pub shift: f64,
    pub is_increasing: bool,
    pub key: String,
    pub on_slide: bool,
    /// Scale this one faces across a stator/slide edge
    pub opp_key: Option<String>,
    /// Scale whose values run the other way on the same ticks
    pub mirror_key: Option<String>,
    pub ex_start_value: Option<f64>,
    pub ex_end_value: Option<f64>,
    pub dividers: Vec<f64>,
    pub marks: Vec<GaugeMark>,
    pub numerals: Vec<f64>,
}

impl PartialEq for Scale {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Scale {}

impl Scale {
    /// A scale keyed by its left symbol
    pub fn new(left_sym: &str, right_sym: &str, kind: TransformKind) -> Self {
        Self {
            left_sym: left_sym.to_string(),
            right_sym: right_sym.to_string(),
            kind,
            shift: 0.0,
            is_increasing: kind.is_increasing(),
            key: left_sym.to_string(),
            on_slide: false,
            opp_key: None,
            mirror_key: None,
            ex_start_value: None,
            ex_end_value: None,
            dividers: Vec::new(),
            marks: Vec::new(),
            numerals: Vec::new(),
        }
    }

    pub fn key(mut self, key: &str) -> Self {
        self.key = key.to_string();
        self
    }

    pub fn left(mut self, sym: &str) -> Self {
        self.left_sym = sym.to_string();
        self
    }

    pub fn right(mut self, sym: &str) -> Self {
        self.right_sym = sym.to_string();
        self
    }

    pub fn shift(mut self, shift: f64) -> Self {
        self.shift = shift;
        self
    }

    pub fn increasing(mut self, is_increasing: bool) -> Self {
        self.is_increasing = is_increasing;
        self
    }

    pub fn on_slide(mut self) -> Self {
        self.on_slide = true;
        self
    }

    pub fn on_stator(mut self) -> Self {
        self.on_slide = false;
        self
    }

    pub fn opposite(mut self, key: &str) -> Self {
        self.opp_key = Some(key.to_string());
        self
    }

    pub fn mirror(mut self, key: &str) -> Self {
        self.mirror_key = Some(key.to_string());
        self
    }

    pub fn extended(mut self, start: Option<f64>, end: Option<f64>) -> Self {
        self.ex_start_value = start;
        self.ex_end_value = end;
        self
    }

    pub fn dividers(mut self, dividers: &[f64]) -> Self {
        self.dividers = dividers.to_vec();
        self
    }

    pub fn marks(mut self, marks: &[GaugeMark]) -> Self {
        self.marks = marks.to_vec();
        self
    }

    pub fn numerals(mut self, numerals: &[f64]) -> Self {
        self.numerals = numerals.to_vec();
        self
    }

    /// Decade-periodic scales, read the same in every decade
    pub fn displays_cyclic(&self) -> bool {
        matches!(
            self.kind,
            TransformKind::Base | TransformKind::Inverse | TransformKind::Square | TransformKind::Cube
        )
    }

    /// Log-log scales continue from one to the next
    pub fn can_spiral(&self) -> bool {
        matches!(self.kind, TransformKind::LogLog | TransformKind::LogLogNeg)
    }

    pub fn can_overhang(&self) -> bool {
        self.ex_end_value
            .is_some_and(|v| self.frac_pos_of(v, 0.0) > 1.0 + MIN_OVERHANG_FRAC)
            || self
                .ex_start_value
                .is_some_and(|v| self.frac_pos_of(v, 0.0) < -MIN_OVERHANG_FRAC)
    }

    /// Fractional position of a value, `0..1` spanning the scale
    pub fn frac_pos_of(&self, x: f64, shift_adj: f64) -> f64 {
        self.shift + shift_adj + self.kind.position_of(x)
    }

    pub fn value_at_frac_pos(&self, frac_pos: f64, shift_adj: f64) -> f64 {
        self.kind.value_at(frac_pos - self.shift - shift_adj)
    }

    pub fn value_at_start(&self) -> f64 {
        self.value_at_frac_pos(0.0, 0.0)
    }

    pub fn value_at_end(&self) -> f64 {
        self.value_at_frac_pos(1.0, 0.0)
    }

    pub fn value_range(&self) -> (f64, f64) {
        (self.value_at_start(), self.value_at_end())
    }

    /// Exponents `n` such that `10^n` falls inside the displayed range
    pub fn powers_of_ten_in_range(&self) -> Option<Range<i32>> {
        let (start, end) = self.value_range();
        let log = |v: f64| if v > 0.0 { v.log10() } else { LOG_ZERO };
        let (a, b) = (log(start), log(end));
        let (low, high) = (a.min(b), a.max(b));
        if !(high - low).is_finite() {
            return None;
        }
        Some(low.ceil() as i32..high.ceil() as i32)
    }

    /// Pixels from the left index for a value, over a scale `width` wide
    pub fn position_for(&self, x: f64, width: f64, shift_adj: f64) -> f64 {
        let p = self.frac_pos_of(x, shift_adj);
        debug_assert!(p.is_finite(), "{}: non-finite position for {x}", self.key);
        (width * p).round()
    }

    pub fn pos_of(&self, x: f64, geom: &Geometry) -> f64 {
        self.position_for(x, geom.sl, 0.0)
    }

    /// Absolute pixel span between two values, each clamped into the domain
    pub fn offset_between(&self, x_start: f64, x_end: f64, width: f64) -> f64 {
        let a = self.frac_pos_of(self.kind.clamp_input(x_start), 0.0);
        let b = self.frac_pos_of(self.kind.clamp_input(x_end), 0.0);
        (b - a).abs() * width
    }

    /// The narrower of the spans `delta` covers at either end of a range
    pub fn min_offset_for_delta(&self, x_start: f64, x_end: f64, x_delta: f64, width: f64) -> f64 {
        self.offset_between(x_start, x_start + x_delta, width)
            .min(self.offset_between(x_end - x_delta, x_end, width))
    }

    /// Segments for generic graduation, split at dividers or powers of ten
    pub fn default_segments(&self) -> Vec<Segment> {
        let start = self.ex_start_value.unwrap_or_else(|| self.value_at_start());
        let end = self.ex_end_value.unwrap_or_else(|| self.value_at_end());
        let dividers: Vec<f64> = if self.dividers.is_empty() {
            self.powers_of_ten_in_range()
                .map(|r| r.map(|n| 10f64.powi(n)).collect())
                .unwrap_or_default()
        } else {
            self.dividers.clone()
        };
        let Some(&first) = dividers.first() else {
            return vec![Segment { start, end, include_last: true }];
        };
        let mut segments = vec![Segment { start, end: first, include_last: false }];
        for (i, &d) in dividers.iter().enumerate() {
            let next = dividers.get(i + 1).copied();
            segments.push(Segment {
                start: d,
                end: next.unwrap_or(end),
                include_last: next.is_none(),
            });
        }
        segments
    }

    /// Values bounding the background band, defaulting to the scale's ends
    pub fn band_range(&self, start: Option<f64>, end: Option<f64>) -> (f64, f64) {
        (
            start.unwrap_or_else(|| self.value_at_start()),
            end.unwrap_or_else(|| self.value_at_end()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marks;

    fn c_scale() -> Scale {
        Scale::new("C", "x_y", TransformKind::Base).on_slide().opposite("D")
    }

    #[test]
    fn identity_is_the_key() {
        let a = c_scale();
        let b = Scale::new("C", "other", TransformKind::Inverse);
        assert_eq!(a, b);
        assert_ne!(a, a.clone().key("C2"));
    }

    #[test]
    fn direction_defaults_from_transform() {
        assert!(!Scale::new("CI", "1/x", TransformKind::Inverse).is_increasing);
        assert!(
            Scale::new("CoT", "cot", TransformKind::CoTan)
                .increasing(true)
                .is_increasing
        );
    }

    #[test]
    fn pixel_positions() {
        let sc = c_scale();
        assert_eq!(sc.position_for(1.0, 5600.0, 0.0), 0.0);
        assert_eq!(sc.position_for(10.0, 5600.0, 0.0), 5600.0);
        assert_eq!(sc.position_for(2.0, 5600.0, 0.0), 1686.0);
        assert_eq!(sc.position_for(1.0, 5600.0, 0.5), 2800.0);
    }

    #[test]
    fn offsets_clamp_out_of_domain_values() {
        let sc = c_scale();
        assert!((sc.offset_between(1.0, 10.0, 1.0) - 1.0).abs() < 1e-12);
        assert!(sc.offset_between(-5.0, 1.0, 1.0).is_finite());
        let narrow = sc.min_offset_for_delta(1.0, 10.0, 1.0, 5600.0);
        // the step from 9 to 10 is narrower than from 1 to 2
        assert!((narrow - 5600.0 * (10f64 / 9.0).log10()).abs() < 1e-9);
    }

    #[test]
    fn powers_of_ten_span_the_range() {
        let k = Scale::new("K", "x³", TransformKind::Cube);
        assert_eq!(k.powers_of_ten_in_range(), Some(0..3));
        let linear = Scale::new("L", "log x", TransformKind::Log10);
        assert_eq!(linear.powers_of_ten_in_range(), None);
    }

    #[test]
    fn segments_from_dividers() {
        let ll2 = Scale::new("LL₂", "e^0.1x", TransformKind::LogLog)
            .key("LL2")
            .shift(1.0)
            .dividers(&[1.2, 2.0])
            .extended(Some(1.1), Some(3.0));
        let segs = ll2.default_segments();
        assert_eq!(
            segs,
            vec![
                Segment { start: 1.1, end: 1.2, include_last: false },
                Segment { start: 1.2, end: 2.0, include_last: false },
                Segment { start: 2.0, end: 3.0, include_last: true },
            ]
        );
    }

    #[test]
    fn segments_without_dividers_cover_the_range() {
        let l = Scale::new("L", "log x", TransformKind::Log10);
        let segs = l.default_segments();
        assert_eq!(segs.len(), 1);
        assert!(segs[0].include_last);
        assert_eq!((segs[0].start, segs[0].end), (0.0, 10.0));
    }

    #[test]
    fn overhang_and_spiral() {
        let ll3 = Scale::new("LL₃", "e^x", TransformKind::LogLog)
            .extended(Some(2.5), Some(1e5))
            .marks(&[marks::E_MARK]);
        assert!(ll3.can_spiral());
        assert!(ll3.can_overhang());
        assert!(!c_scale().can_overhang());
        assert!(c_scale().displays_cyclic());
    }
}
