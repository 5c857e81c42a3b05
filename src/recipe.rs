//! Hand-tuned graduations for scales with established conventions.
//!
//! Each recipe is a table of [`Run`]s on a fixed index grid of [`SF`] steps
//! per unit, plus a few literal numerals. Scales without a recipe fall back
//! to [`GraduationEngine::graduate_default`]. Either way, [`graduate`] then
//! overlays the scale's gauge marks and forced numerals.

use crate::geometry::{Geometry, HMod};
use crate::graduation::{
    Graduation, GraduationEngine, Ink, Numeral, OVERHANG_WIDE, TickFactors, TickRun, subdivide, tf,
};
use crate::label::{format_numeral, last_digit};
use crate::log::trace;
use crate::scale::Scale;
use crate::style::{Font, FontSize, FontStyle, Style};
use crate::transform::TransformKind;
use crate::types::Align;

/// Index units per value unit in every recipe table
pub const SF: i64 = 1000;

/// Which of a scale's fonts number each level of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunFonts {
    None,
    Label,
    LabelMedium,
    Xl,
}

/// One literal stretch of ticks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Run {
    pub from: i64,
    pub to: i64,
    pub inclusive: bool,
    pub step: i64,
    pub factors: TickFactors,
    pub heights: [HMod; 4],
    pub fonts: RunFonts,
    /// Level-one numerals as a single significant digit
    pub digit1: bool,
}

const fn run(
    from: i64,
    to: i64,
    step: i64,
    factors: TickFactors,
    heights: [HMod; 4],
    fonts: RunFonts,
    digit1: bool,
) -> Run {
    Run {
        from,
        to,
        inclusive: false,
        step,
        factors,
        heights,
        fonts,
        digit1,
    }
}

impl Run {
    const fn inclusive(mut self) -> Self {
        self.inclusive = true;
        self
    }

    /// The same run one or more decades up
    fn scaled(self, factor: i64) -> Self {
        Run {
            from: self.from * factor,
            to: self.to * factor,
            step: self.step * factor,
            ..self
        }
    }

    fn end_index(&self) -> i64 {
        self.to + i64::from(self.inclusive)
    }
}

const THS1: [HMod; 4] = [HMod::MED, HMod::XL, HMod::SM, HMod::XS];
const THS2: [HMod; 4] = [HMod::MED, HMod::XL, HMod::XS, HMod::XS];
const THS3: [HMod; 4] = [HMod::MED, HMod::SM, HMod::SM, HMod::XS];
const THS4: [HMod; 4] = [HMod::MED, HMod::XL, HMod::SM, HMod::DOT];
const THS_Z: [HMod; 4] = [HMod::XL, HMod::SM, HMod::XS, HMod::XS];
const THS_LEAD: [HMod; 4] = [HMod::XL, HMod::XL, HMod::SM, HMod::XS];

pub const DECADE: [Run; 3] = [
    run(1000, 2000, SF, tf(100), THS3, RunFonts::LabelMedium, true),
    run(2000, 4000, SF, tf(50), THS1, RunFonts::Label, false),
    run(4000, 10000, SF, tf(20), THS1, RunFonts::Label, true).inclusive(),
];

/// One decade of a squared scale, repeated over two decades
pub const SQUARE: [Run; 3] = [
    run(1000, 2000, SF, tf(50), THS1, RunFonts::Label, true),
    run(2000, 5000, SF, tf(20), THS1, RunFonts::Label, true),
    run(5000, 10000, SF, tf(10), THS2, RunFonts::Label, true).inclusive(),
];

/// One decade of a cubed scale, repeated over three decades
pub const CUBE: [Run; 3] = [
    run(1000, 3000, SF, tf(20), THS1, RunFonts::Xl, true),
    run(3000, 6000, SF, tf(10), THS2, RunFonts::Xl, true),
    run(6000, 10000, SF, tf(5), THS2, RunFonts::Xl, true).inclusive(),
];

pub const ROOT_LOW: [Run; 2] = [
    run(1000, 2000, SF / 10, tf(20), THS1, RunFonts::None, true),
    run(2000, 3170, SF, tf(100), [HMod::MED, HMod::MED, HMod::SM, HMod::XS], RunFonts::LabelMedium, true)
        .inclusive(),
];

pub const ROOT_HIGH: [Run; 2] = [
    run(3160, 5000, SF, tf(100), THS3, RunFonts::LabelMedium, true),
    run(5000, 10000, SF, tf(50), THS1, RunFonts::Label, true).inclusive(),
];

const fn pi_folded(first: i64, last: i64) -> [Run; 4] {
    [
        run(first, 400, SF / 10, tf(50), THS1, RunFonts::Label, true),
        run(400, 1000, SF / 10, tf(20), THS1, RunFonts::Label, true),
        run(1000, 2000, SF, tf(100), THS3, RunFonts::LabelMedium, true),
        run(2000, last, SF, tf(50), THS1, RunFonts::Label, true).inclusive(),
    ]
}

pub const PI_FOLDED: [Run; 4] = pi_folded(314, 3140);
pub const PI_FOLDED_INVERSE: [Run; 4] = pi_folded(310, 3200);

pub const LOG: [Run; 1] = [run(
    0,
    10_000,
    SF,
    tf(50),
    [HMod::LG, HMod::XL, HMod::MED, HMod::XS],
    RunFonts::None,
    true,
)
.inclusive()];

pub const SINE: [Run; 5] = [
    run(5700, 20_000, SF, tf(10), THS_Z, RunFonts::None, true),
    run(20_000, 30_000, SF * 5, [5, 5, 1], THS_Z, RunFonts::None, true),
    run(30_000, 60_000, SF * 10, tf(20), THS_LEAD, RunFonts::None, true),
    run(60_000, 80_000, SF * 10, tf(10), THS_Z, RunFonts::None, true),
    run(80_000, 90_000, SF * 10, [2, 1, 1], [HMod::MED, HMod::SM, HMod::XS, HMod::XS], RunFonts::None, true)
        .inclusive(),
];

/// The sine table read from the other end, up to the complement of 5.7°
pub const COSINE: [Run; 5] = [
    run(0, 10_000, SF * 10, [2, 1, 1], [HMod::MED, HMod::SM, HMod::XS, HMod::XS], RunFonts::None, true),
    run(10_000, 30_000, SF * 10, tf(10), THS_Z, RunFonts::None, true),
    run(30_000, 60_000, SF * 10, tf(20), THS_LEAD, RunFonts::None, true),
    run(60_000, 70_000, SF * 5, [5, 5, 1], THS_Z, RunFonts::None, true),
    run(70_000, 84_300, SF, tf(10), THS_Z, RunFonts::None, true).inclusive(),
];

pub const TANGENT: [Run; 3] = [
    run(5700, 10_000, SF, tf(20), THS_LEAD, RunFonts::None, true),
    run(10_000, 25_000, SF, tf(10), THS_Z, RunFonts::None, true),
    run(25_000, 45_000, SF * 5, [5, 5, 1], [HMod::XL, HMod::MED, HMod::XS, HMod::XS], RunFonts::None, true)
        .inclusive(),
];

/// Tangent above 45°, up to the complement of 5.7°
pub const TANGENT_HIGH: [Run; 2] = [
    run(45_000, 75_000, SF * 5, [5, 2, 5], THS4, RunFonts::Xl, false),
    run(75_000, 84_300, SF * 5, [5, 2, 10], THS4, RunFonts::Xl, false),
];

pub const SIN_TAN: [Run; 4] = [
    run(570, 1000, SF, [20, 5, 2], THS1, RunFonts::None, true),
    run(1000, 2000, SF / 10, [1, 2, 5], THS1, RunFonts::None, true),
    run(2000, 4000, SF / 2, tf(25), THS1, RunFonts::None, true),
    run(4000, 5800, SF, [1, 10, 2], THS1, RunFonts::None, true).inclusive(),
];

/// Scale families with a hand-tuned graduation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipe {
    /// C, D, CI, DI
    Decade,
    /// A, B, BI
    Square,
    /// K
    Cube,
    /// R₁
    RootLow,
    /// R₂
    RootHigh,
    /// CF, DF, CIF
    PiFolded { inverse: bool },
    /// L
    Log,
    /// S, T, T₁, CoT
    Trig { tan: bool },
    /// CoS
    CoSine,
    /// T₂
    TanHigh,
    /// ST
    SinTan,
    /// Aristo p%
    Percent,
    Generic,
}

impl Recipe {
    pub fn for_scale(sc: &Scale) -> Recipe {
        use TransformKind as K;
        let folded = (sc.shift - crate::catalog::pi_fold_shift()).abs() < 1e-12;
        match (sc.kind, sc.key.as_str()) {
            (K::Base | K::Inverse, _) if sc.shift == 0.0 => Recipe::Decade,
            (K::Square, _) | (K::InverseSquare, "BI") => Recipe::Square,
            (K::Cube, "K") => Recipe::Cube,
            (K::SquareRoot, "R1") => Recipe::RootLow,
            (K::SquareRoot, "R2") => Recipe::RootHigh,
            (K::Base, _) if folded => Recipe::PiFolded { inverse: false },
            (K::Inverse, "CIF") => Recipe::PiFolded { inverse: true },
            (K::Log10, "L") => Recipe::Log,
            (K::Sin, _) => Recipe::Trig { tan: false },
            (K::CoSin, _) => Recipe::CoSine,
            (K::Tan, "T2") => Recipe::TanHigh,
            (K::Tan | K::CoTan, _) => Recipe::Trig { tan: true },
            (K::SinTan, "ST") => Recipe::SinTan,
            (K::Percentage, _) => Recipe::Percent,
            _ => Recipe::Generic,
        }
    }

    /// The recipe's tick table, expanded across decades
    pub fn runs(self) -> Vec<Run> {
        let per_decade = |runs: &[Run], decades: u32| -> Vec<Run> {
            (0..decades)
                .flat_map(|n| runs.iter().map(move |r| r.scaled(10i64.pow(n))))
                .collect()
        };
        match self {
            Recipe::Decade => DECADE.to_vec(),
            Recipe::Square => per_decade(&SQUARE, 2),
            Recipe::Cube => per_decade(&CUBE, 3),
            Recipe::RootLow => ROOT_LOW.to_vec(),
            Recipe::RootHigh => ROOT_HIGH.to_vec(),
            Recipe::PiFolded { inverse: false } => PI_FOLDED.to_vec(),
            Recipe::PiFolded { inverse: true } => PI_FOLDED_INVERSE.to_vec(),
            Recipe::Log => LOG.to_vec(),
            Recipe::Trig { tan: false } => SINE.to_vec(),
            Recipe::Trig { tan: true } => TANGENT.to_vec(),
            Recipe::CoSine => COSINE.to_vec(),
            Recipe::TanHigh => TANGENT_HIGH.to_vec(),
            Recipe::SinTan => SIN_TAN.to_vec(),
            Recipe::Percent | Recipe::Generic => Vec::new(),
        }
    }
}

/// Every font a scale draws with, sized to its band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFonts {
    pub label: Font,
    /// For long right-hand legends
    pub label_small: Font,
    pub xl: Font,
    pub lg: Font,
    pub md: Font,
    pub sm: Font,
    pub md_italic: Font,
    pub md2: Font,
    pub md2_italic: Font,
}

/// Size between N_MD and N_SM used for small degree numerals
const MD2_PX: u32 = 50;

impl ScaleFonts {
    pub fn new(style: &Style, scale_h: f64, h_ratio: Option<f64>) -> Self {
        let half = (scale_h / 2.0).floor() as u32;
        let label_px = if scale_h > FontSize::ScaleLabel.px() as f64 * 1.5 {
            FontSize::ScaleLabel.px()
        } else {
            half
        };
        let label_small_px = if scale_h > FontSize::NumXl.px() as f64 * 2.0 {
            FontSize::NumXl.px()
        } else {
            half
        };
        let italic = FontStyle::Italic;
        ScaleFonts {
            label: style.font(label_px, FontStyle::Regular, None),
            label_small: style.font(label_small_px, FontStyle::Regular, None),
            xl: style.font_for(FontSize::NumXl, h_ratio),
            lg: style.font_for(FontSize::NumLg, h_ratio),
            md: style.font_for(FontSize::NumMd, h_ratio),
            sm: style.font_for(FontSize::NumSm, h_ratio),
            md_italic: style.font(FontSize::NumMd.px(), italic, h_ratio),
            md2: style.font(MD2_PX, FontStyle::Regular, h_ratio),
            md2_italic: style.font(MD2_PX, italic, h_ratio),
        }
    }

    fn for_run(&self, fonts: RunFonts) -> [Option<Font>; 3] {
        match fonts {
            RunFonts::None => [None, None, None],
            RunFonts::Label => [Some(self.label), None, None],
            RunFonts::LabelMedium => [Some(self.label), Some(self.md), None],
            RunFonts::Xl => [Some(self.xl), None, None],
        }
    }

    /// Gauge marks on the decade scales read at label size
    pub fn mark(&self, kind: TransformKind) -> Font {
        match kind {
            TransformKind::Base | TransformKind::Inverse | TransformKind::Square => self.label,
            _ => self.lg,
        }
    }
}

/// Ticks and numerals for one scale: recipe or generic, then marks and
/// forced numerals
pub fn graduate(sc: &Scale, engine: &GraduationEngine<'_>, fonts: &ScaleFonts) -> Graduation {
    let g = engine.geometry;
    let recipe = Recipe::for_scale(sc);
    trace!(scale = %sc.key, ?recipe, "graduating");

    let mut out = match recipe {
        Recipe::Generic => engine.graduate_default(sc),
        _ => {
            let mut out = Graduation::default();
            for r in recipe.runs() {
                tick_run(&r, g, fonts).emit(sc, g.sl, &mut out);
            }
            out.numerals.extend(literal_numerals(recipe, sc, g, fonts, engine.metrics));
            out
        }
    };

    let th_mark = g.tick_h(HMod::MED, engine.h_ratio);
    let mark_font = fonts.mark(sc.kind);
    for mark in &sc.marks {
        let x = sc.pos_of(mark.value, g);
        out.tick(x, th_mark);
        out.numeral(x, mark.sym, th_mark, mark_font, Ink::Symbol);
    }
    let th_med = g.tick_h(HMod::MED, None);
    for &n in &sc.numerals {
        out.numeral(sc.pos_of(n, g), format_numeral(n), th_med, fonts.sm, Ink::Symbol);
    }
    out.retain_within(-OVERHANG_WIDE * g.sl, (1.0 + OVERHANG_WIDE) * g.sl);
    out
}

fn tick_run(r: &Run, g: &Geometry, fonts: &ScaleFonts) -> TickRun {
    TickRun {
        i_start: r.from,
        i_end: r.end_index(),
        sf: SF,
        steps: subdivide(r.step, r.factors),
        heights: r.heights.map(|m| g.tick_h(m, None)),
        fonts: fonts.for_run(r.fonts),
        digit1: [r.digit1, false, false],
    }
}

/// Numerals a recipe places by hand rather than by divisibility
fn literal_numerals(
    recipe: Recipe,
    sc: &Scale,
    g: &Geometry,
    fonts: &ScaleFonts,
    metrics: &dyn crate::render::TextMetrics,
) -> Vec<Numeral> {
    let th_med = g.tick_h(HMod::MED, None);
    let at = |value: f64, text: String, lift: f64, font: Font, ink: Ink| Numeral {
        x: sc.pos_of(value, g),
        text,
        lift,
        font,
        ink,
        align: None,
    };
    match recipe {
        Recipe::RootLow => {
            let mut out = vec![at(1.0, "1".into(), th_med, fonts.label, Ink::Symbol)];
            for i in 11..20 {
                let x = i as f64 / 10.0;
                out.push(at(x, last_digit(x), th_med, fonts.lg, Ink::Symbol));
            }
            out
        }
        Recipe::Log => (0..=10)
            .map(|i| Numeral {
                x: sc.pos_of(i as f64, g),
                text: format_numeral(i as f64 / 10.0),
                lift: th_med,
                font: fonts.label,
                ink: Ink::Symbol,
                align: None,
            })
            .collect(),
        Recipe::Trig { tan } => degree_numerals(tan, false, sc, g, fonts, metrics),
        Recipe::CoSine => degree_numerals(false, true, sc, g, fonts, metrics),
        Recipe::SinTan => {
            let mut out = vec![at(1.0, "1°".into(), th_med, fonts.label, Ink::Symbol)];
            let values = [0.6, 0.7, 0.8, 0.9, 1.5, 2.5, 3.5, 2.0, 3.0, 4.0, 5.0];
            out.extend(
                values
                    .iter()
                    .map(|&x| at(x, format_numeral(x), th_med, fonts.label, Ink::Symbol)),
            );
            out
        }
        Recipe::Percent => {
            let lower = |value: f64, text: String| Numeral {
                align: Some(Align::Lower),
                ..at(value, text, 0.0, fonts.lg, Ink::Symbol)
            };
            let mut out = Vec::new();
            for pct in [0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 40.0] {
                out.push(lower(pct, format_numeral(pct)));
                out.push(lower(-pct, format_numeral(pct)));
            }
            let specials = [
                ("-50%", -50.0),
                ("50%", 50.0),
                ("-33⅓", -100.0 / 3.0),
                ("33⅓", 100.0 / 3.0),
                ("+100%", 100.0),
            ];
            out.extend(specials.iter().map(|&(sym, v)| lower(v, sym.to_string())));
            out
        }
        _ => Vec::new(),
    }
}

/// Degree numerals to the right of their tick, complements to the left in
/// the mirror scale's ink. A cosine scale reads the same ticks as their
/// complements, so the two texts trade places.
fn degree_numerals(
    tan: bool,
    co: bool,
    sc: &Scale,
    g: &Geometry,
    fonts: &ScaleFonts,
    metrics: &dyn crate::render::TextMetrics,
) -> Vec<Numeral> {
    let lift = if tan { g.sth * 1.1 } else { g.tick_h(HMod::MED, None) };
    let small = 6..16;
    let unpaired = 16..21;
    let tens: &[i32] = if tan { &[] } else { &[50, 60, 70] };
    let degrees = small
        .clone()
        .chain(unpaired.clone())
        .chain((25..41).step_by(5))
        .chain(tens.iter().copied());

    let mut out = Vec::new();
    for deg in degrees {
        let (f_l, f_r) = if small.contains(&deg) {
            (fonts.md2_italic, fonts.md2)
        } else {
            (fonts.md_italic, fonts.md)
        };
        let (value, complement) = if co { (90 - deg, deg) } else { (deg, 90 - deg) };
        let pos = sc.pos_of(value as f64, g);
        let text = value.to_string();
        out.push(Numeral {
            x: pos + 0.6 * metrics.text_width(&text, &f_l),
            text,
            lift,
            font: f_r,
            ink: Ink::Symbol,
            align: None,
        });
        if !unpaired.contains(&deg) {
            let text = complement.to_string();
            out.push(Numeral {
                x: pos - 0.7 * metrics.text_width(&text, &f_l),
                text,
                lift,
                font: f_l,
                ink: Ink::Mirror,
                align: None,
            });
        }
    }
    out.push(Numeral {
        x: g.sl,
        text: match (tan, co) {
            (true, _) => "45",
            (false, true) => "0",
            (false, false) => "90",
        }
        .to_string(),
        lift,
        font: fonts.lg,
        ink: Ink::Symbol,
        align: None,
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::render::GlyphMetrics;

    fn std_scale(key: &str) -> &'static Scale {
        match Catalog::standard().scale(key) {
            Some(sc) => sc,
            None => panic!("no scale {key}"),
        }
    }

    fn graduate_default_style(sc: &Scale) -> Graduation {
        let g = Geometry::default();
        let style = Style::default();
        let engine = GraduationEngine {
            geometry: &g,
            style: &style,
            metrics: &GlyphMetrics,
            h_ratio: None,
        };
        let fonts = ScaleFonts::new(&style, Geometry::DEFAULT_SCALE_H, None);
        graduate(sc, &engine, &fonts)
    }

    #[test]
    fn dispatch_by_family() {
        let cases = [
            ("C", Recipe::Decade),
            ("DI", Recipe::Decade),
            ("A", Recipe::Square),
            ("BI", Recipe::Square),
            ("K", Recipe::Cube),
            ("R1", Recipe::RootLow),
            ("R2", Recipe::RootHigh),
            ("CF", Recipe::PiFolded { inverse: false }),
            ("CIF", Recipe::PiFolded { inverse: true }),
            ("L", Recipe::Log),
            ("S", Recipe::Trig { tan: false }),
            ("CoS", Recipe::CoSine),
            ("T1", Recipe::Trig { tan: true }),
            ("CoT", Recipe::Trig { tan: true }),
            ("T2", Recipe::TanHigh),
            ("ST", Recipe::SinTan),
            ("LL3", Recipe::Generic),
            ("W1", Recipe::Generic),
            ("L_r", Recipe::Generic),
        ];
        for (key, recipe) in cases {
            assert_eq!(Recipe::for_scale(std_scale(key)), recipe, "{key}");
        }
    }

    #[test]
    fn aristo_lookalikes_dispatch_by_transform() {
        let cat = Catalog::aristo_commerz();
        let recipe = |key: &str| cat.scale(key).map(Recipe::for_scale);
        assert_eq!(recipe("T1"), Some(Recipe::Decade));
        assert_eq!(recipe("T2"), Some(Recipe::Generic));
        assert_eq!(recipe("Pct"), Some(Recipe::Percent));
        assert_eq!(recipe("Libra"), Some(Recipe::Generic));
    }

    #[test]
    fn tables_are_contiguous_and_divisible() {
        let all = [
            Recipe::Decade,
            Recipe::Square,
            Recipe::Cube,
            Recipe::RootLow,
            Recipe::RootHigh,
            Recipe::PiFolded { inverse: false },
            Recipe::PiFolded { inverse: true },
            Recipe::Log,
            Recipe::Trig { tan: false },
            Recipe::Trig { tan: true },
            Recipe::CoSine,
            Recipe::TanHigh,
            Recipe::SinTan,
        ];
        for recipe in all {
            let runs = recipe.runs();
            assert!(!runs.is_empty(), "{recipe:?}");
            for pair in runs.windows(2) {
                assert!(pair[0].from < pair[0].to, "{recipe:?}");
                if pair[0].to != pair[1].from {
                    // squared and cubed decades restart at the next power of ten
                    assert!(pair[0].inclusive, "{recipe:?} gap at {}", pair[0].to);
                }
            }
            for r in &runs {
                let [s1, s2, s3, s4] = subdivide(r.step, r.factors);
                assert!(s4 > 0 && s4 <= s3 && s3 <= s2 && s2 <= s1, "{recipe:?}: {r:?}");
            }
        }
    }

    #[test]
    fn decade_scale_ticks_and_numerals() {
        let grad = graduate_default_style(std_scale("D"));
        let marks = std_scale("D").marks.len();
        assert_eq!(grad.ticks.len(), 100 + 100 + 121 + marks);
        let texts: Vec<&str> = grad.numerals.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(texts[..3], ["1", "1.1", "1.2"]);
        assert!(texts.contains(&"π"));
        assert_eq!(texts.iter().filter(|t| **t == "1").count(), 2);
    }

    #[test]
    fn trig_numerals_pair_with_complements() {
        let grad = graduate_default_style(std_scale("S"));
        let mirror: Vec<&str> = grad
            .numerals
            .iter()
            .filter(|n| n.ink == Ink::Mirror)
            .map(|n| n.text.as_str())
            .collect();
        assert!(mirror.contains(&"84"));
        assert!(!mirror.contains(&"72"));
        assert!(mirror.contains(&"20"));
        let Some(last) = grad.numerals.last() else {
            panic!("no numerals");
        };
        assert_eq!((last.text.as_str(), last.x), ("90", Geometry::default().sl));

        let tan = graduate_default_style(std_scale("T"));
        assert!(tan.numerals.iter().any(|n| n.text == "45" && (n.lift - 77.0).abs() < 1e-9));
        assert!(!tan.numerals.iter().any(|n| n.text == "50" && n.ink == Ink::Symbol));
    }

    #[test]
    fn cosine_reads_from_the_right_index() {
        let sc = std_scale("CoS");
        let g = Geometry::default();
        let style = Style::default();
        let fonts = ScaleFonts::new(&style, Geometry::DEFAULT_SCALE_H, None);
        let span = -OVERHANG_WIDE * g.sl..=(1.0 + OVERHANG_WIDE) * g.sl;

        let mut table = Graduation::default();
        for r in Recipe::CoSine.runs() {
            tick_run(&r, &g, &fonts).emit(sc, g.sl, &mut table);
        }
        assert!(table.ticks.iter().all(|t| span.contains(&t.x)));

        let grad = graduate_default_style(sc);
        assert!(grad.ticks.len() > 100);
        assert!(grad.ticks.iter().all(|t| span.contains(&t.x)));
        assert!(grad.numerals.iter().all(|n| span.contains(&n.x)), "{:?}", grad.numerals);
        let Some(last) = grad.numerals.last() else {
            panic!("no numerals");
        };
        assert_eq!((last.text.as_str(), last.x), ("0", g.sl));
        let eighty = grad.numerals.iter().find(|n| n.text == "80" && n.ink == Ink::Symbol);
        assert!(eighty.is_some_and(|n| n.x < sc.pos_of(60.0, &g)));
    }

    #[test]
    fn graduation_is_clipped_to_the_overhang() {
        let fonts = ScaleFonts::new(&Style::default(), Geometry::DEFAULT_SCALE_H, None);
        let mut grad = Graduation::default();
        grad.tick(-10.0, 1.0);
        grad.tick(50.0, 1.0);
        grad.numeral(120.0, "9", 1.0, fonts.md, Ink::Symbol);
        grad.retain_within(0.0, 100.0);
        assert_eq!(grad.ticks.len(), 1);
        assert!(grad.numerals.is_empty());
    }

    #[test]
    fn complements_sit_left_of_their_tick() {
        let sc = std_scale("S");
        let g = Geometry::default();
        let grad = graduate_default_style(sc);
        let pos = sc.pos_of(10.0, &g);
        let right = grad.numerals.iter().find(|n| n.text == "10");
        let left = grad.numerals.iter().find(|n| n.text == "80" && n.ink == Ink::Mirror);
        assert!(right.is_some_and(|n| n.x > pos));
        assert!(left.is_some_and(|n| n.x < pos));
    }

    #[test]
    fn log_scale_labels_tenths() {
        let grad = graduate_default_style(std_scale("L"));
        let texts: Vec<&str> = grad.numerals.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, ["0", ".1", ".2", ".3", ".4", ".5", ".6", ".7", ".8", ".9", "1"]);
        assert_eq!(grad.ticks.len(), 501);
    }

    #[test]
    fn percentages_hang_low() {
        let Some(pct) = Catalog::aristo_commerz().scale("Pct") else {
            panic!("no Pct");
        };
        let grad = graduate_default_style(pct);
        assert!(grad.ticks.is_empty());
        assert!(grad.numerals.iter().all(|n| n.align == Some(Align::Lower) && n.lift == 0.0));
        assert!(grad.numerals.iter().any(|n| n.text == "+100%"));
    }

    #[test]
    fn forced_numerals_overlay_generic_graduation() {
        let grad = graduate_default_style(std_scale("H1"));
        assert!(grad.numerals.iter().any(|n| n.text == "1.005"));
    }

    #[test]
    fn label_fonts_follow_band_height() {
        let style = Style::default();
        let tall = ScaleFonts::new(&style, 160.0, None);
        assert_eq!((tall.label.size, tall.label_small.size), (90, 75));
        let short = ScaleFonts::new(&style, 101.0, Some(101.0 / 160.0));
        assert_eq!((short.label.size, short.label_small.size), (50, 50));
        assert_eq!(short.lg.size, 38);
    }
}
