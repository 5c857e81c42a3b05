//! Pixel-linear rulers along the rule's edges.
//!
//! Unlike scales, rulers measure physical distance from the side's left
//! edge, so tick positions come straight from pixels per unit.

use crate::geometry::{Geometry, HMod, PIXELS_PER_CM, PIXELS_PER_IN};
use crate::graduation::{Graduation, Ink, TF_BIN, TickFactors, subdivide, tf};
use crate::label::format_numeral;
use crate::style::{FontSize, Style};

#[derive(Debug, Clone, PartialEq)]
pub struct Ruler {
    pub key: &'static str,
    pub tick_pattern: TickFactors,
    /// Margin from the left side, in units
    pub left_offset: f64,
    /// Units to show, further limited by the side width
    pub num_units: i64,
    pub pixels_per_unit: f64,
}

impl Ruler {
    pub const PT: Ruler = Ruler {
        key: "PT",
        tick_pattern: tf(10),
        left_offset: 0.0,
        num_units: 25 * 72,
        pixels_per_unit: (PIXELS_PER_IN / 72.0) as i64 as f64,
    };
    pub const CM: Ruler = Ruler {
        key: "CM",
        tick_pattern: tf(20),
        left_offset: 1.5,
        num_units: 30,
        pixels_per_unit: PIXELS_PER_CM,
    };
    pub const IN_DEC: Ruler = Ruler {
        key: "IN_DEC",
        tick_pattern: tf(50),
        left_offset: 0.5,
        num_units: 12,
        pixels_per_unit: PIXELS_PER_IN,
    };
    pub const IN_BIN: Ruler = Ruler {
        key: "IN_BIN",
        tick_pattern: TF_BIN,
        left_offset: 0.5,
        num_units: 12,
        pixels_per_unit: PIXELS_PER_IN,
    };
    pub const IN: Ruler = Ruler {
        key: "IN",
        ..Ruler::IN_DEC
    };

    pub const ALL: [Ruler; 5] = [Ruler::PT, Ruler::CM, Ruler::IN_DEC, Ruler::IN_BIN, Ruler::IN];

    /// Pixels from the side's left edge
    pub fn pos_of(&self, units: f64) -> f64 {
        (self.left_offset + units) * self.pixels_per_unit
    }

    pub fn value_at(&self, x: f64) -> f64 {
        x / self.pixels_per_unit - self.left_offset
    }

    /// Ticks and whole-unit numerals, positioned relative to the left index
    pub fn graduate(&self, geom: &Geometry, style: &Style) -> Graduation {
        let [f1, f2, f3] = self.tick_pattern;
        let i_sf = f1 * f2 * f3;
        let [step1, step2, step3, _] = subdivide(i_sf, self.tick_pattern);
        let heights = [
            geom.tick_h(HMod::LG, None),
            geom.tick_h(HMod::MED, None),
            geom.tick_h(HMod::XS, None),
            geom.tick_h(HMod::DOT, None),
        ];
        let font = style.font_for(FontSize::NumLg, None);
        let fit = (geom.side_w / self.pixels_per_unit - self.left_offset).trunc() as i64;
        let num_units = self.num_units.min(fit);
        let li = geom.li();

        let mut out = Graduation::default();
        for i in 0..=num_units * i_sf {
            let num = i as f64 / i_sf as f64;
            let x = self.pos_of(num) - li;
            let level = if i % step1 == 0 {
                0
            } else if i % step2 == 0 {
                1
            } else if i % step3 == 0 {
                2
            } else {
                3
            };
            if level == 0 {
                out.numeral(x, format_numeral(num), heights[0], font, Ink::Symbol);
            }
            out.tick(x, heights[level]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_invert() {
        for r in Ruler::ALL {
            let x = r.pos_of(3.25);
            assert!((r.value_at(x) - 3.25).abs() < 1e-9, "{}", r.key);
        }
        assert!((Ruler::CM.pos_of(0.0) - 400.0).abs() < 1e-9);
    }

    #[test]
    fn points_round_down_to_whole_pixels() {
        assert_eq!(Ruler::PT.pixels_per_unit, 9.0);
        assert_eq!(Ruler::PT.tick_pattern, [2, 5, 1]);
    }

    #[test]
    fn cm_ruler_numbers_every_centimeter() {
        let g = Geometry::default();
        let grad = Ruler::CM.graduate(&g, &Style::default());
        // 8000 px fits 30 - 1.5 → 28 whole units
        assert_eq!(grad.ticks.len(), 28 * 20 + 1);
        assert_eq!(grad.numerals.len(), 29);
        assert_eq!(grad.numerals[0].text, "0");
        assert_eq!(grad.numerals[0].x, Ruler::CM.pos_of(0.0) - g.li());
        assert_eq!(grad.ticks[10].height, g.tick_h(HMod::MED, None));
        assert_eq!(grad.ticks[2].height, g.tick_h(HMod::XS, None));
        assert_eq!(grad.ticks[1].height, g.tick_h(HMod::DOT, None));
    }

    #[test]
    fn binary_inch_ticks() {
        let g = Geometry::default();
        let grad = Ruler::IN_BIN.graduate(&g, &Style::default());
        let inches = (g.side_w / PIXELS_PER_IN - 0.5).trunc() as usize;
        assert_eq!(grad.ticks.len(), inches * 64 + 1);
        assert_eq!(grad.ticks[32].height, g.tick_h(HMod::MED, None));
        assert_eq!(grad.ticks[8].height, g.tick_h(HMod::XS, None));
        assert_eq!(grad.ticks[1].height, g.tick_h(HMod::DOT, None));
    }
}
