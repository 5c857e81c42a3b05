//! Named scale registries.
//!
//! A catalog is built once: every descriptor is constructed first, then
//! partner keys are checked against the finished set and dangling ones are
//! dropped.

use std::f64::consts::{PI, TAU};
use std::sync::LazyLock;

use crate::log::warn;
use crate::marks::{self, GaugeMark};
use crate::ruler::Ruler;
use crate::scale::Scale;
use crate::transform::TransformKind;

/// Shift that folds a decade scale at π
pub fn pi_fold_shift() -> f64 {
    1.0 - PI.log10()
}

/// Shift that folds a decade scale at 3.6, for 360-day interest
pub fn shift_360() -> f64 {
    1.0 - 3.6f64.log10()
}

fn pi_tenth() -> GaugeMark {
    marks::PI_MARK.at(PI / 10.0)
}

#[derive(Debug)]
pub struct Catalog {
    pub name: &'static str,
    scales: Vec<Scale>,
    rulers: Vec<Ruler>,
}

static STANDARD: LazyLock<Catalog> = LazyLock::new(|| Catalog::new("standard", standard_scales()));
static ARISTO_COMMERZ: LazyLock<Catalog> =
    LazyLock::new(|| Catalog::new("aristo_commerz", aristo_commerz_scales()));

impl Catalog {
    /// Registry over `scales` plus every ruler, with partners resolved
    pub fn new(name: &'static str, mut scales: Vec<Scale>) -> Self {
        let keys: Vec<String> = scales.iter().map(|s| s.key.clone()).collect();
        let known = |k: &str| keys.iter().any(|key| key == k);
        for sc in &mut scales {
            if let Some(opp) = sc.opp_key.take_if(|k| !known(k.as_str())) {
                warn!(catalog = name, scale = %sc.key, partner = %opp, "dropping unknown opposite scale");
            }
            if let Some(mirror) = sc.mirror_key.take_if(|k| !known(k.as_str())) {
                warn!(catalog = name, scale = %sc.key, partner = %mirror, "dropping unknown mirror scale");
            }
        }
        Self {
            name,
            scales,
            rulers: Ruler::ALL.to_vec(),
        }
    }

    pub fn standard() -> &'static Catalog {
        &STANDARD
    }

    /// Scales of the Aristo 965 Commerz II
    pub fn aristo_commerz() -> &'static Catalog {
        &ARISTO_COMMERZ
    }

    pub fn scale(&self, key: &str) -> Option<&Scale> {
        self.scales.iter().find(|s| s.key == key)
    }

    pub fn ruler(&self, key: &str) -> Option<&Ruler> {
        self.rulers.iter().find(|r| r.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.scale(key).is_some() || self.ruler(key).is_some()
    }

    /// Scales in definition order
    pub fn scales(&self) -> &[Scale] {
        &self.scales
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.scales
            .iter()
            .map(|s| s.key.as_str())
            .chain(self.rulers.iter().map(|r| r.key))
    }
}

fn standard_scales() -> Vec<Scale> {
    use TransformKind as K;

    let pi_marks = [marks::PI_MARK];
    let c_marks = [marks::PI_MARK, marks::DEG_PER_RAD, marks::TAU_MARK];
    let cf_marks = [marks::PI_MARK, pi_tenth()];
    let root_marks = [marks::SQRT_TEN];

    let t = Scale::new("T", "∡tan x°", K::Tan).mirror("CoT");
    let w1 = Scale::new("W₁", "√x", K::SquareRoot)
        .key("W1")
        .opposite("W1Prime")
        .dividers(&[1.0, 2.0])
        .extended(Some(0.95), Some(3.38))
        .marks(&root_marks);
    let w2 = Scale::new("W₂", "√10x", K::SquareRoot)
        .key("W2")
        .shift(-1.0)
        .opposite("W2Prime")
        .dividers(&[5.0])
        .extended(Some(3.0), Some(10.66))
        .marks(&root_marks);

    vec![
        Scale::new("A", "x²", K::Square).opposite("B").marks(&pi_marks),
        Scale::new("B", "x²_y", K::Square).on_slide().opposite("A").marks(&pi_marks),
        Scale::new("BI", "1/x²_y", K::InverseSquare).on_slide(),
        Scale::new("C", "x_y", K::Base).on_slide().opposite("D").marks(&c_marks),
        Scale::new("CF", "πx_y", K::Base)
            .shift(pi_fold_shift())
            .on_slide()
            .opposite("DF")
            .marks(&cf_marks),
        Scale::new("DF", "πx", K::Base)
            .shift(pi_fold_shift())
            .opposite("CF")
            .marks(&cf_marks),
        Scale::new("CI", "1/x_y", K::Inverse).on_slide().opposite("DI").marks(&cf_marks),
        Scale::new("CIF", "1/πx_y", K::Inverse)
            .shift(pi_fold_shift() - 1.0)
            .on_slide()
            .marks(&c_marks),
        Scale::new("D", "x", K::Base).opposite("C").marks(&c_marks),
        Scale::new("DI", "1/x", K::Inverse).opposite("CI").marks(&c_marks),
        Scale::new("K", "x³", K::Cube),
        Scale::new("L", "log x", K::Log10),
        Scale::new("Ln", "ln x", K::Ln),
        Scale::new("LL₀", "e^0.001x", K::LogLog)
            .key("LL0")
            .shift(3.0)
            .dividers(&[1.002, 1.004, 1.010])
            .extended(Some(1.00095), Some(1.0105)),
        Scale::new("LL₁", "e^0.01x", K::LogLog)
            .key("LL1")
            .shift(2.0)
            .dividers(&[1.02, 1.05, 1.10])
            .extended(Some(1.0095), Some(1.11)),
        Scale::new("LL₂", "e^0.1x", K::LogLog)
            .key("LL2")
            .shift(1.0)
            .dividers(&[1.2, 2.0])
            .extended(Some(1.1), Some(3.0))
            .marks(&[marks::E_MARK]),
        Scale::new("LL₃", "e^x", K::LogLog)
            .key("LL3")
            .dividers(&[3.0, 6.0, 10.0, 50.0, 100.0, 1000.0, 10000.0])
            .extended(Some(2.5), Some(1e5))
            .marks(&[marks::E_MARK]),
        Scale::new("LL₀₀", "e^-0.001x", K::LogLogNeg)
            .key("LL00")
            .shift(3.0)
            .dividers(&[0.998])
            .extended(Some(0.989), Some(0.9991)),
        Scale::new("LL₀₁", "e^-0.01x", K::LogLogNeg)
            .key("LL01")
            .shift(2.0)
            .dividers(&[0.95, 0.98])
            .extended(Some(0.9), Some(0.9906)),
        Scale::new("LL₀₂", "e^-0.1x", K::LogLogNeg)
            .key("LL02")
            .shift(1.0)
            .dividers(&[0.8, 0.9])
            .extended(Some(0.35), Some(0.91))
            .marks(&[marks::INV_E]),
        Scale::new("LL₀₃", "e^-x", K::LogLogNeg)
            .key("LL03")
            .dividers(&[5e-4, 1e-3, 1e-2, 0.1])
            .extended(Some(1e-4), Some(0.39))
            .marks(&[marks::INV_E]),
        Scale::new("P", "√1-(0.1x)²", K::Pythagorean)
            .dividers(&[0.3, 0.6, 0.8, 0.9, 0.98, 0.99])
            .extended(Some(0.1), Some(0.995)),
        Scale::new("R₁", "√x", K::SquareRoot).key("R1").marks(&root_marks),
        Scale::new("R₂", "√10x", K::SquareRoot)
            .key("R2")
            .shift(-1.0)
            .marks(&root_marks),
        Scale::new("S", "∡sin x°", K::Sin).mirror("CoS"),
        Scale::new("C", "∡cos x°", K::CoSin).key("CoS").mirror("S"),
        Scale::new("ST", "∡tan 0.01x°", K::SinTan),
        t.clone(),
        Scale::new("CoT", "∡cot x°", K::CoTan)
            .increasing(true)
            .mirror("T")
            .shift(-1.0),
        t.clone().left("T₁").key("T1"),
        t.left("T₂")
            .right("∡tan 0.1x°")
            .key("T2")
            .shift(-1.0)
            .mirror("CoT2"),
        w1.clone(),
        w1.left("W'₁").key("W1Prime").opposite("W1"),
        w2.clone(),
        w2.left("W'₂").key("W2Prime").opposite("W2"),
        Scale::new("H₁", "√1+0.1x²", K::Hyperbolic)
            .key("H1")
            .shift(1.0)
            .dividers(&[1.03, 1.1])
            .numerals(&[1.005]),
        Scale::new("H₂", "√1+x²", K::Hyperbolic).key("H2").dividers(&[4.0]),
        Scale::new("Sh₁", "sinh x", K::SinH)
            .key("Sh1")
            .shift(1.0)
            .dividers(&[0.2, 0.4]),
        Scale::new("Sh₂", "sinh x", K::SinH).key("Sh2"),
        Scale::new("Ch", "cosh x", K::CosH)
            .key("Ch1")
            .dividers(&[1.0, 2.0])
            .extended(Some(0.01), None),
        Scale::new("Th", "tanh x", K::TanH)
            .shift(1.0)
            .dividers(&[0.2, 0.4, 1.0, 2.0])
            .extended(None, Some(3.0)),
        Scale::new("χ", "", K::Chi).key("Chi").marks(&[marks::PI_HALF]),
        Scale::new("θ", "°", K::Theta).key("Theta"),
        Scale::new("f_x", "x/2π", K::Base)
            .shift(TAU.log10())
            .dividers(&[0.2, 0.5, 1.0]),
        Scale::new("L_r", "1/(2πx)²", K::InverseSquare)
            .shift((1.0 / TAU).log10())
            .dividers(&[0.05, 0.1, 0.2, 0.5, 1.0, 2.0])
            .extended(Some(0.025), Some(2.55)),
    ]
}

fn aristo_commerz_scales() -> Vec<Scale> {
    let base = Catalog::standard();
    let from = |key: &str| {
        base.scale(key)
            .cloned()
            .unwrap_or_else(|| Scale::new(key, "", TransformKind::Base))
    };

    let z = from("D").left("Z").key("Z").right("").opposite("T1").dividers(&[2.0, 4.0]);
    let kz = from("CF")
        .left("KZ")
        .key("KZ")
        .right("")
        .shift(shift_360())
        .extended(Some(0.3), Some(4.0))
        .dividers(&[0.4, 1.0, 2.0]);

    vec![
        z.clone(),
        z.left("T₁").key("T1").opposite("Z").on_slide(),
        from("CI")
            .left("P₁")
            .key("P1")
            .right("")
            .on_slide()
            .dividers(&[2.0, 4.0]),
        kz.clone(),
        kz.left("T₂").key("T2").on_slide(),
        from("CIF")
            .left("P₂")
            .key("P2")
            .right("")
            .shift(shift_360() - 1.0)
            .on_slide()
            .extended(Some(0.25), Some(3.3))
            .dividers(&[0.4, 1.0, 2.0]),
        Scale::new("p%", "", TransformKind::Percentage)
            .key("Pct")
            .on_slide()
            .shift(shift_360())
            .dividers(&[0.0])
            .extended(Some(-50.0), Some(100.0)),
        from("L").left("£").key("Libra").right(""),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_unique() {
        for cat in [Catalog::standard(), Catalog::aristo_commerz()] {
            let mut keys: Vec<&str> = cat.keys().collect();
            let n = keys.len();
            keys.sort();
            keys.dedup();
            assert_eq!(keys.len(), n, "{}", cat.name);
        }
    }

    #[test]
    fn partners_resolve_or_drop() {
        let cat = Catalog::standard();
        assert_eq!(cat.scale("T2").and_then(|s| s.mirror_key.as_deref()), None);
        assert_eq!(cat.scale("T").and_then(|s| s.mirror_key.as_deref()), Some("CoT"));
        assert_eq!(cat.scale("C").and_then(|s| s.opp_key.as_deref()), Some("D"));
        for sc in cat.scales() {
            for partner in [&sc.opp_key, &sc.mirror_key].into_iter().flatten() {
                assert!(cat.scale(partner).is_some(), "{} -> {partner}", sc.key);
            }
        }
    }

    #[test]
    fn aristo_scales_derive_from_standard() {
        let cat = Catalog::aristo_commerz();
        let Some(kz) = cat.scale("KZ") else {
            panic!("KZ missing");
        };
        assert_eq!(kz.kind, TransformKind::Base);
        assert_eq!(kz.opp_key, None);
        assert!((kz.shift - shift_360()).abs() < 1e-12);
        assert_eq!(cat.scale("T1").and_then(|s| s.opp_key.as_deref()), Some("Z"));
        assert!(cat.scale("Pct").is_some_and(|s| s.on_slide && s.left_sym == "p%"));
        assert!(cat.scale("D").is_none());
        assert!(cat.contains("CM"));
    }

    #[test]
    fn cotangent_reads_increasing() {
        let cat = Catalog::standard();
        assert!(cat.scale("CoT").is_some_and(|s| s.is_increasing));
        assert!(cat.scale("CI").is_some_and(|s| !s.is_increasing));
    }

    #[test]
    fn rulers_are_registered() {
        let cat = Catalog::standard();
        for key in ["PT", "CM", "IN", "IN_DEC", "IN_BIN"] {
            assert!(cat.ruler(key).is_some(), "{key}");
        }
    }
}
