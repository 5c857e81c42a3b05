//! Value ↔ position transforms.
//!
//! A transform maps a real-world value onto a fractional position in unit
//! output space (`0.0` is the left index, `1.0` the right index) and back.
//! Positions are deliberately unbounded so scales can overhang their ends.
//!
//! | Kind               | Position of `x`                       | Domain            |
//! |--------------------|---------------------------------------|-------------------|
//! | `Unit`             | `x`                                   | (-∞, +∞)          |
//! | `Base`             | `log10 x`                             | (0, +∞)           |
//! | `Square`           | `log10 x / 2`                         | (0, +∞)           |
//! | `Inverse`          | `1 - log10 x`                         | (0, +∞)           |
//! | `Sin`              | `log10(10 sin x°)`                    | (0°, 90°]         |
//! | `LogLog`           | `log10(ln x)`                         | (1, +∞)           |
//! | `LogLogNeg`        | `log10(-ln x)`                        | (0, 1)            |
//! | `Pythagorean`      | `log10 √(1 - x²) + 1`                 | [0, 1)            |
//!
//! and so on for the rest of [`TransformKind`].

use std::f64::consts::{FRAC_PI_2, LN_10};

/// Smallest positive value fed to logarithmic transforms.
pub const EPSILON: f64 = 1e-20;

const DEG_RIGHT: f64 = 90.0;

/// Margin kept away from trigonometric singularities, in degrees.
const DEG_MARGIN: f64 = 1e-9;

/// Every mathematical scale shape the catalog knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    /// Linear identity
    Unit,
    /// Linear °F → °C conversion
    FahrenheitToCelsius,
    /// Linear decibel → neper conversion
    NeperToDecibel,
    /// Decade logarithm, the C/D scale
    Base,
    /// Half-decade logarithm, the A/B scales
    Square,
    /// Third-decade logarithm, the K scale
    Cube,
    /// Reversed decade logarithm, the CI scale
    Inverse,
    /// Reversed half-decade logarithm, the BI scale
    InverseSquare,
    /// Double-decade logarithm, the R/W scales
    SquareRoot,
    /// Triple-decade logarithm
    CubeRoot,
    /// Linear mantissa, the L scale
    Log10,
    /// Linear natural log mantissa, the Ln scale
    Ln,
    /// `log10(10 sin x°)`
    Sin,
    /// `log10(10 cos x°)`
    CoSin,
    /// `log10(10 tan x°)`
    Tan,
    /// Small-angle sine/tangent average in degrees, the ST scale
    SinTan,
    /// Small-angle sine/tangent average in radians
    SinTanRadians,
    /// `log10(10 cot x°)`
    CoTan,
    /// `log10 sinh x`
    SinH,
    /// `log10 cosh x`
    CosH,
    /// `log10 tanh x`
    TanH,
    /// `log10 √(1 - x²) + 1`, the P scale
    Pythagorean,
    /// Linear quarter-turn in radians
    Chi,
    /// Linear quarter-turn in degrees
    Theta,
    /// `log10 ln x`, the LL scales
    LogLog,
    /// `log10(-ln x)`, the LL0n scales
    LogLogNeg,
    /// `log10 √(x² - 1)`, the H scales
    Hyperbolic,
    /// `log10((x + 100) / 100)`, percentage change
    Percentage,
}

impl TransformKind {
    pub const ALL: [TransformKind; 28] = [
        TransformKind::Unit,
        TransformKind::FahrenheitToCelsius,
        TransformKind::NeperToDecibel,
        TransformKind::Base,
        TransformKind::Square,
        TransformKind::Cube,
        TransformKind::Inverse,
        TransformKind::InverseSquare,
        TransformKind::SquareRoot,
        TransformKind::CubeRoot,
        TransformKind::Log10,
        TransformKind::Ln,
        TransformKind::Sin,
        TransformKind::CoSin,
        TransformKind::Tan,
        TransformKind::SinTan,
        TransformKind::SinTanRadians,
        TransformKind::CoTan,
        TransformKind::SinH,
        TransformKind::CosH,
        TransformKind::TanH,
        TransformKind::Pythagorean,
        TransformKind::Chi,
        TransformKind::Theta,
        TransformKind::LogLog,
        TransformKind::LogLogNeg,
        TransformKind::Hyperbolic,
        TransformKind::Percentage,
    ];

    /// Short lowercase name, used in logs and diagnostics
    pub fn name(self) -> &'static str {
        match self {
            TransformKind::Unit => "unit",
            TransformKind::FahrenheitToCelsius => "f_to_c",
            TransformKind::NeperToDecibel => "neper_to_db",
            TransformKind::Base => "base",
            TransformKind::Square => "square",
            TransformKind::Cube => "cube",
            TransformKind::Inverse => "inverse",
            TransformKind::InverseSquare => "inverse_square",
            TransformKind::SquareRoot => "square_root",
            TransformKind::CubeRoot => "cube_root",
            TransformKind::Log10 => "log10",
            TransformKind::Ln => "ln",
            TransformKind::Sin => "sin",
            TransformKind::CoSin => "cosin",
            TransformKind::Tan => "tan",
            TransformKind::SinTan => "sin_tan",
            TransformKind::SinTanRadians => "sin_tan_radians",
            TransformKind::CoTan => "cotan",
            TransformKind::SinH => "sinh",
            TransformKind::CosH => "cosh",
            TransformKind::TanH => "tanh",
            TransformKind::Pythagorean => "pythagorean",
            TransformKind::Chi => "chi",
            TransformKind::Theta => "theta",
            TransformKind::LogLog => "loglog",
            TransformKind::LogLogNeg => "loglog_neg",
            TransformKind::Hyperbolic => "hyperbolic",
            TransformKind::Percentage => "percentage",
        }
    }

    /// Whether positions grow with values over the domain
    pub fn is_increasing(self) -> bool {
        !matches!(
            self,
            TransformKind::Inverse
                | TransformKind::InverseSquare
                | TransformKind::CoSin
                | TransformKind::CoTan
                | TransformKind::Pythagorean
                | TransformKind::LogLogNeg
        )
    }

    /// Inclusive `(min_x, max_x)` bounds excluding singularities
    pub fn domain(self) -> (f64, f64) {
        match self {
            TransformKind::Unit
            | TransformKind::FahrenheitToCelsius
            | TransformKind::NeperToDecibel
            | TransformKind::Chi
            | TransformKind::Theta => (f64::NEG_INFINITY, f64::INFINITY),
            TransformKind::Base
            | TransformKind::Square
            | TransformKind::Cube
            | TransformKind::Inverse
            | TransformKind::InverseSquare
            | TransformKind::SquareRoot
            | TransformKind::CubeRoot
            | TransformKind::Log10
            | TransformKind::Ln
            | TransformKind::SinH
            | TransformKind::CosH
            | TransformKind::TanH => (EPSILON, f64::INFINITY),
            TransformKind::Sin => (EPSILON, DEG_RIGHT),
            TransformKind::CoSin => (0.0, DEG_RIGHT - DEG_MARGIN),
            TransformKind::Tan | TransformKind::SinTan | TransformKind::CoTan => {
                (EPSILON, DEG_RIGHT - DEG_MARGIN)
            }
            TransformKind::SinTanRadians => (1e-5, FRAC_PI_2 - DEG_MARGIN.to_radians()),
            TransformKind::Pythagorean => (0.0, 1.0 - 1e-16),
            TransformKind::LogLog | TransformKind::Hyperbolic => (1.0 + 1e-15, f64::INFINITY),
            TransformKind::LogLogNeg => (EPSILON, 1.0 - 1e-16),
            TransformKind::Percentage => (EPSILON - 100.0, f64::INFINITY),
        }
    }

    /// Restrict a value into the domain before evaluating it
    pub fn clamp_input(self, x: f64) -> f64 {
        let (lo, hi) = self.domain();
        x.clamp(lo, hi)
    }

    /// Fractional position of a value, unbounded
    pub fn position_of(self, x: f64) -> f64 {
        match self {
            TransformKind::Unit => x,
            TransformKind::FahrenheitToCelsius => (x - 32.0) * 5.0 / 9.0,
            TransformKind::NeperToDecibel => x / (20.0 / LN_10),
            TransformKind::Base => x.log10(),
            TransformKind::Square => x.log10() / 2.0,
            TransformKind::Cube => x.log10() / 3.0,
            TransformKind::Inverse => 1.0 - x.log10(),
            TransformKind::InverseSquare => 1.0 - x.log10() / 2.0,
            TransformKind::SquareRoot => x.log10() * 2.0,
            TransformKind::CubeRoot => x.log10() * 3.0,
            TransformKind::Log10 => x / 10.0,
            TransformKind::Ln => x / LN_10,
            TransformKind::Sin => (10.0 * x.to_radians().sin()).log10(),
            TransformKind::CoSin => (10.0 * x.to_radians().cos()).log10(),
            TransformKind::Tan => (10.0 * x.to_radians().tan()).log10(),
            TransformKind::SinTan => sin_tan_radians(x.to_radians()),
            TransformKind::SinTanRadians => sin_tan_radians(x),
            TransformKind::CoTan => (10.0 * (DEG_RIGHT - x).to_radians().tan()).log10(),
            TransformKind::SinH => x.sinh().log10(),
            TransformKind::CosH => x.cosh().log10(),
            TransformKind::TanH => x.tanh().log10(),
            TransformKind::Pythagorean => (1.0 - x * x).sqrt().log10() + 1.0,
            TransformKind::Chi => x / FRAC_PI_2,
            TransformKind::Theta => x / DEG_RIGHT,
            TransformKind::LogLog => x.ln().log10(),
            TransformKind::LogLogNeg => (-x.ln()).log10(),
            TransformKind::Hyperbolic => (x * x - 1.0).sqrt().log10(),
            TransformKind::Percentage => ((x + 100.0) / 100.0).log10(),
        }
    }

    /// Value displayed at a fractional position; exact inverse of [`Self::position_of`]
    pub fn value_at(self, p: f64) -> f64 {
        let exp10 = |p: f64| 10f64.powf(p);
        match self {
            TransformKind::Unit => p,
            TransformKind::FahrenheitToCelsius => p * 9.0 / 5.0 + 32.0,
            TransformKind::NeperToDecibel => p * 20.0 / LN_10,
            TransformKind::Base => exp10(p),
            TransformKind::Square => exp10(p * 2.0),
            TransformKind::Cube => exp10(p * 3.0),
            TransformKind::Inverse => exp10(1.0 - p),
            TransformKind::InverseSquare => exp10((1.0 - p) * 2.0),
            TransformKind::SquareRoot => exp10(p / 2.0),
            TransformKind::CubeRoot => exp10(p / 3.0),
            TransformKind::Log10 => p * 10.0,
            TransformKind::Ln => p * LN_10,
            TransformKind::Sin => (exp10(p) / 10.0).clamp(-1.0, 1.0).asin().to_degrees(),
            TransformKind::CoSin => (exp10(p) / 10.0).clamp(-1.0, 1.0).acos().to_degrees(),
            TransformKind::Tan => (exp10(p) / 10.0).atan().to_degrees(),
            TransformKind::CoTan => DEG_RIGHT - (exp10(p) / 10.0).atan().to_degrees(),
            TransformKind::SinTan | TransformKind::SinTanRadians => self.bisect(p),
            TransformKind::SinH => exp10(p).asinh(),
            TransformKind::CosH => exp10(p).acosh(),
            TransformKind::TanH => exp10(p).atanh(),
            TransformKind::Pythagorean => {
                let r = exp10(p - 1.0);
                (1.0 - r * r).max(0.0).sqrt()
            }
            TransformKind::Chi => p * FRAC_PI_2,
            TransformKind::Theta => p * DEG_RIGHT,
            TransformKind::LogLog => exp10(p).exp(),
            TransformKind::LogLogNeg => (-exp10(p)).exp(),
            TransformKind::Hyperbolic => 1f64.hypot(exp10(p)),
            TransformKind::Percentage => exp10(p) * 100.0 - 100.0,
        }
    }

    /// Numeric inverse for transforms without a closed form.
    ///
    /// Requires a monotonic forward function over the domain; positions
    /// beyond the domain's image saturate at the nearest bound.
    fn bisect(self, p: f64) -> f64 {
        let (mut lo, mut hi) = self.domain();
        let increasing = self.is_increasing();
        for _ in 0..200 {
            let mid = lo + (hi - lo) / 2.0;
            if mid <= lo || mid >= hi {
                break;
            }
            let below = self.position_of(mid) < p;
            if below == increasing {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        lo + (hi - lo) / 2.0
    }
}

fn sin_tan_radians(x: f64) -> f64 {
    (100.0 * (x.sin() + x.tan()) / 2.0).log10()
}
