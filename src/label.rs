//! Scale label grammar and numeral formatting.
//!
//! A label is a base with an optional exponent and subscript:
//!
//! - `x^2`, `x²`, `W'` carry exponents (primes are drawn without a raise)
//! - `x_y`, `LL₀₁` carry subscripts
//!
//! The subscript is split off first, then the exponent from what remains,
//! so `x²_y` is `("x", "2", "y")`.

/// Glyphs treated as a prime exponent when trailing a longer label
pub const PRIMES: &str = "'ʹʺ′″‴";

const SUPERSCRIPTS: &str = "⁻⁰¹²³⁴⁵⁶⁷⁸⁹";
const SUBSCRIPTS: &str = "₀₁₂₃";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label<'a> {
    pub base: &'a str,
    pub exponent: Option<String>,
    pub subscript: Option<String>,
}

impl<'a> Label<'a> {
    pub fn parse(symbol: &'a str) -> Self {
        let (rest, subscript) = split_subscript(symbol);
        let (base, exponent) = split_exponent(rest);
        Label {
            base,
            exponent,
            subscript,
        }
    }
}

/// Whether a prime exponent should sit level with the base
pub fn is_prime(s: &str) -> bool {
    let mut chars = s.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if PRIMES.contains(c))
}

fn split_subscript(symbol: &str) -> (&str, Option<String>) {
    split_by(symbol, '_', SUBSCRIPTS)
}

fn split_exponent(symbol: &str) -> (&str, Option<String>) {
    let mut chars = symbol.chars();
    if let Some(last) = chars.next_back() {
        if chars.next().is_some() && PRIMES.contains(last) {
            let cut = symbol.len() - last.len_utf8();
            return (&symbol[..cut], Some(last.to_string()));
        }
    }
    split_by(symbol, '^', SUPERSCRIPTS)
}

/// Split at the last ASCII marker with a well-formed tail, else at a
/// trailing run of Unicode script digits
fn split_by<'a>(symbol: &'a str, marker: char, script: &str) -> (&'a str, Option<String>) {
    if let Some(i) = symbol.rfind(marker) {
        let (base, tail) = (&symbol[..i], &symbol[i + marker.len_utf8()..]);
        let well_formed = tail
            .chars()
            .all(|c| c == '-' || c == '.' || c.is_ascii_alphanumeric());
        if !base.is_empty() && !tail.is_empty() && well_formed {
            return (base, Some(tail.to_string()));
        }
    }

    let tail_start = symbol
        .char_indices()
        .rev()
        .take_while(|(_, c)| script.contains(*c))
        .last()
        .map(|(i, _)| i);
    match tail_start {
        Some(i) if i > 0 && !symbol[..i].chars().any(|c| script.contains(c)) => {
            let converted = symbol[i..].chars().filter_map(script_digit).collect();
            (&symbol[..i], Some(converted))
        }
        _ => (symbol, None),
    }
}

/// ASCII equivalent of a superscript or subscript digit
pub fn script_digit(c: char) -> Option<char> {
    match c {
        '⁻' => Some('-'),
        '⁰' | '₀' => Some('0'),
        '¹' | '₁' => Some('1'),
        '²' | '₂' => Some('2'),
        '³' | '₃' => Some('3'),
        '⁴' => Some('4'),
        '⁵' => Some('5'),
        '⁶' => Some('6'),
        '⁷' => Some('7'),
        '⁸' => Some('8'),
        '⁹' => Some('9'),
        _ => None,
    }
}

/// Shortest round-tripping decimal form
fn repr(x: f64) -> String {
    format!("{x}")
}

fn power_of_ten(x: f64) -> Option<i32> {
    let e = x.log10();
    (e.is_finite() && e.fract() == 0.0).then_some(e as i32)
}

/// Numeral text for a tick value.
///
/// Integers print plainly, fractions drop their leading zero, and exact
/// powers of ten beyond two decades print as `10^n`.
pub fn format_numeral(num: f64) -> String {
    if num.fract() != 0.0 {
        let s = repr(num);
        match s.strip_prefix('0') {
            Some(frac) if frac.starts_with('.') => match power_of_ten(num) {
                Some(e) if e.abs() > 2 => format!("10^{e}"),
                _ => frac.to_string(),
            },
            _ => s,
        }
    } else if num == 0.0 {
        "0".to_string()
    } else {
        match power_of_ten(num) {
            Some(e) if e.abs() > 2 => format!("10^{e}"),
            _ => format!("{}", num as i64),
        }
    }
}

pub fn first_digit(x: f64) -> String {
    repr(x).chars().take(1).collect()
}

pub fn last_digit(x: f64) -> String {
    repr(x)
        .chars()
        .next_back()
        .map(String::from)
        .unwrap_or_default()
}

/// The one character to show when a numeral has room for a single digit.
///
/// Powers of ten and multiples of ten show their leading digit, values
/// below one their last digit; anything else keeps its full numeral.
pub fn sig_digit(num: f64) -> String {
    if num > 0.0 && power_of_ten(num).is_some() {
        first_digit(num)
    } else if num % 10.0 == 0.0 {
        first_digit(num)
    } else if num < 1.0 {
        last_digit(num)
    } else {
        format_numeral(num)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(s: &str) -> (&str, Option<String>, Option<String>) {
        let l = Label::parse(s);
        (l.base, l.exponent, l.subscript)
    }

    fn own<'a>(base: &'a str, exp: Option<&str>, sub: Option<&str>) -> (&'a str, Option<String>, Option<String>) {
        (base, exp.map(String::from), sub.map(String::from))
    }

    #[test]
    fn caret_exponent() {
        assert_eq!(parts("x^2"), own("x", Some("2"), None));
        assert_eq!(parts("e^-0.001x"), own("e", Some("-0.001x"), None));
    }

    #[test]
    fn underscore_subscript() {
        assert_eq!(parts("x_y"), own("x", None, Some("y")));
        assert_eq!(parts("f_x"), own("f", None, Some("x")));
    }

    #[test]
    fn trailing_prime() {
        assert_eq!(parts("W′"), own("W", Some("′"), None));
        assert!(is_prime("′"));
        // a lone prime is its own base
        assert_eq!(parts("'"), own("'", None, None));
    }

    #[test]
    fn unicode_scripts_become_ascii() {
        assert_eq!(parts("x²"), own("x", Some("2"), None));
        assert_eq!(parts("LL₀₁"), own("LL", None, Some("01")));
        assert_eq!(parts("x²_y"), own("x", Some("2"), Some("y")));
        assert_eq!(parts("W'₁"), own("W", Some("'"), Some("1")));
        assert_eq!(parts("√1-(0.1x)²"), own("√1-(0.1x)", Some("2"), None));
    }

    #[test]
    fn malformed_markers_stay_in_base() {
        assert_eq!(parts("a_"), own("a_", None, None));
        assert_eq!(parts("_a"), own("_a", None, None));
        assert_eq!(parts("∡sin x°"), own("∡sin x°", None, None));
    }

    #[test]
    fn numerals() {
        assert_eq!(format_numeral(2.0), "2");
        assert_eq!(format_numeral(0.5), ".5");
        assert_eq!(format_numeral(0.0), "0");
        assert_eq!(format_numeral(1.5), "1.5");
        assert_eq!(format_numeral(100.0), "100");
        assert_eq!(format_numeral(1000.0), "10^3");
        assert_eq!(format_numeral(0.001), "10^-3");
        assert_eq!(format_numeral(0.01), ".01");
    }

    #[test]
    fn single_digits() {
        assert_eq!(sig_digit(1.0), "1");
        assert_eq!(sig_digit(10.0), "1");
        assert_eq!(sig_digit(20.0), "2");
        assert_eq!(sig_digit(0.5), "5");
        assert_eq!(sig_digit(0.25), "5");
        assert_eq!(sig_digit(3.0), "3");
        assert_eq!(sig_digit(1.5), "1.5");
        assert_eq!(last_digit(1.9), "9");
        assert_eq!(last_digit(20.0), "0");
    }
}
