//! Gauge marks: labelled reference points drawn over a scale's graduation.

use std::f64::consts::{E, LN_10, PI, TAU};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeMark {
    pub sym: &'static str,
    pub value: f64,
    pub comment: &'static str,
}

impl GaugeMark {
    pub const fn new(sym: &'static str, value: f64, comment: &'static str) -> Self {
        Self { sym, value, comment }
    }

    /// Same symbol at another value, as when a constant recurs a decade lower
    pub const fn at(self, value: f64) -> Self {
        Self { value, ..self }
    }
}

const DEG_FULL: f64 = 360.0;

pub const E_MARK: GaugeMark = GaugeMark::new("e", E, "base of natural logarithms");
pub const INV_E: GaugeMark = GaugeMark::new("1/e", 1.0 / E, "reciprocal of e");
pub const TAU_MARK: GaugeMark = GaugeMark::new("τ", TAU, "ratio of circumference to radius");
pub const PI_MARK: GaugeMark = GaugeMark::new("π", PI, "ratio of circumference to diameter");
pub const PI_HALF: GaugeMark = GaugeMark::new("π/2", PI / 2.0, "quarter arc over radius");
pub const INV_PI: GaugeMark = GaugeMark::new("M", 1.0 / PI, "reciprocal of π");
pub const DEG_PER_RAD: GaugeMark = GaugeMark::new("r", DEG_FULL / TAU / 10.0, "degrees per radian");
pub const RAD_PER_DEG: GaugeMark = GaugeMark::new("ρ", TAU / DEG_FULL, "radians per degree");
pub const RAD_PER_MIN: GaugeMark = GaugeMark::new("ρ′", TAU / DEG_FULL * 60.0, "radians per minute");
pub const RAD_PER_SEC: GaugeMark =
    GaugeMark::new("ρ″", TAU / DEG_FULL * 3600.0, "radians per second");
pub const LN_OVER_LOG10: GaugeMark = GaugeMark::new("L", LN_10, "natural over common log");
pub const SQRT_TEN: GaugeMark = GaugeMark::new("√10", 3.1622776601683795, "square root of 10");
pub const CUBE_ROOT_TEN: GaugeMark = GaugeMark::new("c", 2.154434690031884, "cube root of 10");

/// Unit conversion factors
pub mod conversion {
    use super::GaugeMark;

    const CM_PER_IN: f64 = 2.54;
    const FT_PER_M: f64 = 100.0 / (CM_PER_IN * 12.0);
    const QT_PER_L: f64 = 0.9463525;

    pub const CM_PER_IN_MARK: GaugeMark = GaugeMark::new("in", CM_PER_IN, "cm per in");
    pub const SQ_CM_PER_IN: GaugeMark = GaugeMark::new("sq in", CM_PER_IN * CM_PER_IN, "cm² per in²");
    pub const CU_CM_PER_IN: GaugeMark =
        GaugeMark::new("cu in", CM_PER_IN * CM_PER_IN * CM_PER_IN, "cm³ per in³");
    pub const FT_PER_M_MARK: GaugeMark = GaugeMark::new("ft", FT_PER_M, "ft per m");
    pub const YD_PER_M: GaugeMark = GaugeMark::new("yd", 3.0 / FT_PER_M, "yd per m");
    pub const KM_PER_MI: GaugeMark = GaugeMark::new("mi", CM_PER_IN * 12.0 * 5280.0 / 1000.0, "mi per km");
    pub const QT_PER_L_MARK: GaugeMark = GaugeMark::new("qt", QT_PER_L, "US qt per l");
    pub const GAL_PER_L: GaugeMark = GaugeMark::new("gal", QT_PER_L * 4.0, "US gal per l");
    pub const LB_PER_KG: GaugeMark = GaugeMark::new("lb", 2.2046, "lbs per kg");
    pub const HP_PER_KW: GaugeMark = GaugeMark::new("N", 1.341022, "mechanical horsepower per kW");
    pub const G: GaugeMark = GaugeMark::new("g", 9.80665, "standard gravity in m/s²");

    pub const ALL: [GaugeMark; 11] = [
        CM_PER_IN_MARK,
        SQ_CM_PER_IN,
        CU_CM_PER_IN,
        FT_PER_M_MARK,
        YD_PER_M,
        KM_PER_MI,
        QT_PER_L_MARK,
        GAL_PER_L,
        LB_PER_KG,
        HP_PER_KW,
        G,
    ];
}
