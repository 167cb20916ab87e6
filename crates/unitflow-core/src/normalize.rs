//! Text normalization and number extraction
//!
//! Turns raw input into something the token matcher can work with:
//! lowercases, rewrites square/cubic markup (`ft^2`, `ft**2`, `ft2`, `ft²`)
//! into word-character markers, substitutes multi-word unit phrases with
//! their canonical names, then finds the first numeric literal and splits
//! the surrounding text into words.
//!
//! The markup rewrite must run before number extraction, otherwise the `2`
//! in `ft2` would be picked up as the quantity.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::catalog::{CUBIC_MARKER, SQUARE_MARKER, UnitRegistry};

// The rust regex engine has no look-behind, so "digit glued to a letter" is
// expressed with a capture group that gets re-emitted in the replacement.
static SQUARE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" *\*\* *2| *\^ *2|([a-z])2|²").unwrap());
static CUBIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" *\*\* *3| *\^ *3|([a-z])3|³").unwrap());

/// Lowercase, rewrite exponent markup, substitute multi-word aliases.
pub fn normalize(registry: &UnitRegistry, source: &str) -> String {
    let text = source.trim().to_lowercase();

    let square_rep = format!("${{1}}{SQUARE_MARKER}");
    let text = SQUARE_RE.replace_all(&text, square_rep.as_str());
    let cubic_rep = format!("${{1}}{CUBIC_MARKER}");
    let mut text = CUBIC_RE.replace_all(&text, cubic_rep.as_str()).into_owned();

    // longest phrases first so "cubic centimeters" is never clipped by
    // "cubic cm" or similar
    for &(phrase, canonical) in registry.multiword_aliases() {
        if text.contains(phrase) {
            text = text.replace(phrase, canonical);
        }
    }
    text
}

/// A numeric literal located in normalized text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberMatch {
    pub value: f64,
    /// Byte offsets of the literal within the text.
    pub start: usize,
    pub end: usize,
}

/// Find the first decimal literal: digits around a `.` or `,` separator,
/// optionally followed by an `e`/`E` exponent. A match must begin at a digit
/// or at a separator immediately followed by one; a bare separator is not a
/// number.
pub fn find_number(text: &str) -> Option<NumberMatch> {
    let b = text.as_bytes();
    let n = b.len();

    let mut i = 0;
    while i < n {
        let starts_number = b[i].is_ascii_digit()
            || ((b[i] == b'.' || b[i] == b',') && i + 1 < n && b[i + 1].is_ascii_digit());
        if !starts_number {
            i += 1;
            continue;
        }

        let start = i;
        let mut j = i;
        while j < n && b[j].is_ascii_digit() {
            j += 1;
        }
        let int_digits = &text[start..j];

        let mut frac_digits = "";
        if j < n && (b[j] == b'.' || b[j] == b',') {
            let frac_start = j + 1;
            let mut k = frac_start;
            while k < n && b[k].is_ascii_digit() {
                k += 1;
            }
            frac_digits = &text[frac_start..k];
            j = k;
        }

        let mut exponent: i32 = 0;
        if j < n && (b[j] == b'e' || b[j] == b'E') {
            let mut k = j + 1;
            let mut sign = 1;
            if k < n && (b[k] == b'+' || b[k] == b'-') {
                if b[k] == b'-' {
                    sign = -1;
                }
                k += 1;
            }
            let digits_start = k;
            while k < n && b[k].is_ascii_digit() {
                k += 1;
            }
            if k > digits_start {
                // saturate absurd exponents instead of failing the match
                exponent = text[digits_start..k]
                    .parse::<i32>()
                    .map(|e| sign * e)
                    .unwrap_or(sign * i32::MAX);
                j = k;
            }
        }

        let mut value: f64 = if int_digits.is_empty() {
            0.0
        } else {
            int_digits.parse().unwrap_or(0.0)
        };
        if !frac_digits.is_empty() {
            let frac: f64 = frac_digits.parse().unwrap_or(0.0);
            value += frac / 10f64.powi(frac_digits.len() as i32);
        }
        if exponent != 0 {
            value *= 10f64.powi(exponent);
        }

        return Some(NumberMatch { value, start, end: j });
    }
    None
}

/// Render a value the way a person would write it: whole numbers get no
/// decimal point ("1", not "1.0").
pub fn render_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Split on anything that is not a word character (Unicode letters, digits,
/// underscore), dropping empty pieces.
pub fn split_words(text: &str) -> Vec<&str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|part| !part.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::registry;

    #[test]
    fn test_square_markup_forms() {
        let reg = registry();
        assert_eq!(normalize(reg, "10 ft2"), "10 ft_squared");
        assert_eq!(normalize(reg, "10 ft^2"), "10 ft_squared");
        assert_eq!(normalize(reg, "10 ft ** 2"), "10 ft_squared");
        assert_eq!(normalize(reg, "10 ft²"), "10 ft_squared");
    }

    #[test]
    fn test_cubic_markup_forms() {
        let reg = registry();
        assert_eq!(normalize(reg, "2 m3"), "2 m_cubed");
        assert_eq!(normalize(reg, "2 m ^ 3"), "2 m_cubed");
        assert_eq!(normalize(reg, "2 m³"), "2 m_cubed");
    }

    #[test]
    fn test_normalize_is_idempotent_on_clean_text() {
        let reg = registry();
        let once = normalize(reg, "10 ft^2 in square_meter");
        let twice = normalize(reg, &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_multiword_substitution() {
        let reg = registry();
        assert_eq!(normalize(reg, "3 sq m to sq ft"), "3 square_meter to square_foot");
        // longer phrase wins over its embedded shorter one
        assert_eq!(normalize(reg, "3 cubic centimeters"), "3 cubic_centimeter");
    }

    #[test]
    fn test_lowercase_and_trim() {
        let reg = registry();
        assert_eq!(normalize(reg, "  45 Meters In Feet "), "45 meters in feet");
    }

    #[test]
    fn test_find_number_integer() {
        let m = find_number("20 inches in ft").unwrap();
        assert_eq!(m.value, 20.0);
        assert_eq!((m.start, m.end), (0, 2));
    }

    #[test]
    fn test_find_number_decimal_forms() {
        assert_eq!(find_number("1.5 km").unwrap().value, 1.5);
        assert_eq!(find_number("1,5 km").unwrap().value, 1.5);
        assert_eq!(find_number(".5 km").unwrap().value, 0.5);
        // trailing separator is consumed but adds nothing
        let m = find_number("5. km").unwrap();
        assert_eq!(m.value, 5.0);
        assert_eq!((m.start, m.end), (0, 2));
    }

    #[test]
    fn test_find_number_exponent() {
        assert_eq!(find_number("2e3 m").unwrap().value, 2000.0);
        assert_eq!(find_number("2E-2 m").unwrap().value, 0.02);
        assert_eq!(find_number("1.5e1 m").unwrap().value, 15.0);
        // an "e" with no digits is not an exponent
        let m = find_number("12e").unwrap();
        assert_eq!(m.value, 12.0);
        assert_eq!(m.end, 2);
    }

    #[test]
    fn test_find_number_skips_bare_separators() {
        assert_eq!(find_number("meters in inches"), None);
        assert_eq!(find_number("a . b , c"), None);
        // digit after the separator makes it a number
        let m = find_number("a ,25 b").unwrap();
        assert_eq!(m.value, 0.25);
        assert_eq!((m.start, m.end), (2, 5));
    }

    #[test]
    fn test_find_number_first_match_wins() {
        let m = find_number("take 3 of the 7").unwrap();
        assert_eq!(m.value, 3.0);
        assert_eq!((m.start, m.end), (5, 6));
    }

    #[test]
    fn test_render_number() {
        assert_eq!(render_number(1.0), "1");
        assert_eq!(render_number(20.0), "20");
        assert_eq!(render_number(2.5), "2.5");
        assert_eq!(render_number(0.0625), "0.0625");
    }

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("°c in fahrenheit"), vec!["c", "in", "fahrenheit"]);
        assert_eq!(split_words("ft_squared to acres"), vec!["ft_squared", "to", "acres"]);
        assert!(split_words(" ,. ").is_empty());
    }
}
