//! The conversion pipeline: text → tokens → unit pair → quantity → sentence
//!
//! Every stage can bail out, and every bailout means the same thing to the
//! caller: `None`, we have nothing to say. Ambiguity, unknown units, missing
//! numbers, and even a defensive engine refusal all land there; the trace
//! log tells the stages apart.

use crate::catalog::{UnitEntry, UnitRegistry};
use crate::facts;
use crate::normalize::{find_number, normalize, render_number, split_words};
use crate::quantity::Quantity;

/// Parse `source` and convert the quantity found in it, against the given
/// registry. Returns the rendered sentence, or `None` when the text does
/// not pin down exactly one conversion.
pub fn convert(registry: &UnitRegistry, source: &str) -> Option<String> {
    tracing::debug!("input: {source:?}");
    let text = normalize(registry, source);
    tracing::debug!("normalized: {text:?}");

    let Some(number) = find_number(&text) else {
        tracing::debug!("no number found");
        return None;
    };
    tracing::debug!("number: {} (span {}..{})", number.value, number.start, number.end);

    let before = split_words(&text[..number.start]);
    let after = split_words(&text[number.end..]);
    let (mut tokens, mut found_before) = registry.collect_tokens(&before, &after);
    tracing::debug!("tokens found: {tokens:?} (before the number: {found_before})");

    if tokens.is_empty() {
        // a bare number gets commentary; a number among unknown words gets
        // nothing rather than a guess
        if number.end - number.start == text.len() {
            let info = facts::lookup(number.value);
            tracing::debug!("number facts: {info:?}");
            return info;
        }
        tracing::debug!("number surrounded by non-unit words");
        return None;
    }

    if tokens.len() == 1 {
        let Some(suggested) = registry.suggest(tokens[0]) else {
            tracing::debug!("no suggested destination for {:?}", tokens[0]);
            return None;
        };
        tracing::debug!("suggesting destination: {suggested:?}");
        tokens.push(suggested);
        // the synthetic destination always reads as coming after the number
        found_before = false;
    }

    if tokens.len() > 2 {
        let mut reduced = false;
        for connector in registry.connectors() {
            if let Some(pos) = tokens.iter().position(|t| t == connector) {
                tokens.remove(pos);
                if tokens.len() == 2 {
                    reduced = true;
                    break;
                }
            }
        }
        if !reduced {
            tracing::debug!("still {} tokens after connector removal", tokens.len());
            return None;
        }
    }
    tracing::debug!("tokens filtered: {tokens:?}");

    // a unit mentioned before the number is the destination: "<unit> N <unit>"
    let (token_from, token_to) = if found_before {
        (tokens[1], tokens[0])
    } else {
        (tokens[0], tokens[1])
    };
    let (from, to) = match registry.pair_units(token_from, token_to) {
        Ok(pair) => pair,
        Err(err) => {
            tracing::debug!("cannot pair {token_from:?} with {token_to:?}: {err}");
            return None;
        }
    };

    let mut quantity = Quantity::new(number.value, from.unit);
    if let Some(mult) = from.mult {
        quantity = quantity * mult;
    }
    let mut converted = match quantity.to(to.unit) {
        // pairing already checked dimensionality, but the engine has the
        // final word
        Ok(q) => q,
        Err(err) => {
            tracing::debug!("engine refused conversion: {err}");
            return None;
        }
    };
    if let Some(mult) = to.mult {
        converted = converted / mult;
    }
    tracing::debug!("converted magnitude: {}", converted.magnitude());

    Some(render_sentence(number.value, from, converted.magnitude(), to))
}

/// Compose `"<source> = <destination>"` with the human templates: rounded
/// to 4 decimals, trailing zeros trimmed, singular template when a side is
/// exactly 1.
fn render_sentence(original: f64, from: &UnitEntry, magnitude: f64, to: &UnitEntry) -> String {
    let rounded = (magnitude * 10_000.0).round() / 10_000.0;
    let (result_text, to_template) = if rounded.fract() == 0.0 {
        let template = if rounded == 1.0 { to.singular } else { to.plural };
        (render_number(rounded), template)
    } else {
        let mut fixed = format!("{rounded:.4}");
        while fixed.ends_with('0') {
            fixed.pop();
        }
        (fixed, to.plural)
    };

    let from_template = if original == 1.0 { from.singular } else { from.plural };
    let source_text = render_number(original);

    format!(
        "{} = {}",
        from_template.replace("{}", &source_text),
        to_template.replace("{}", &result_text)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::registry;

    fn conv(text: &str) -> Option<String> {
        convert(registry(), text)
    }

    // --- full conversions ---

    #[test]
    fn test_temperature() {
        assert_eq!(conv("45°C in fahrenheit").unwrap(), "45°C = 113°F");
    }

    #[test]
    fn test_length_with_symbol_destination() {
        assert_eq!(conv("20 inches in ft").unwrap(), "20 inches = 1.6667 feet");
    }

    #[test]
    fn test_suggested_destination() {
        assert_eq!(conv("100 hectare").unwrap(), "100 hectares = 0.3861 square miles");
        assert_eq!(conv("5 minutes").unwrap(), "5 minutes = 300 seconds");
    }

    #[test]
    fn test_suggested_destination_ignores_token_position() {
        // the lone unit sits before the number, yet it stays the source
        assert_eq!(conv("hectare 100").unwrap(), "100 hectares = 0.3861 square miles");
    }

    #[test]
    fn test_unit_before_number_is_destination() {
        assert_eq!(conv("meters in 20 feet").unwrap(), "20 feet = 6.096 meters");
    }

    #[test]
    fn test_singular_source_template() {
        assert_eq!(conv("1 tablespoons in a cup").unwrap(), "1 US tablespoon = 0.0625 US cups");
    }

    #[test]
    fn test_singular_destination_template() {
        assert_eq!(conv("1000 grams in kg").unwrap(), "1000 grams = 1 kilogram");
    }

    #[test]
    fn test_square_markup_end_to_end() {
        assert_eq!(
            conv("10 ft2 in square meters").unwrap(),
            "10 square feet = 0.929 square meters"
        );
    }

    #[test]
    fn test_scale_multipliers_both_sides() {
        assert_eq!(conv("2500 mg in grams").unwrap(), "2500 milligrams = 2.5 grams");
        assert_eq!(conv("1 litre in ml").unwrap(), "1 litre = 1000 millilitres");
    }

    #[test]
    fn test_decimal_input_rendering() {
        assert_eq!(conv("2.5 km in miles").unwrap(), "2.5 kilometers = 1.5534 miles");
    }

    // --- refusals ---

    #[test]
    fn test_no_number() {
        assert_eq!(conv("meters in inches"), None);
        assert_eq!(conv(""), None);
    }

    #[test]
    fn test_ambiguous_pairing() {
        // yard/meter and year/month both dimensionally valid
        assert_eq!(conv("1y in m"), None);
    }

    #[test]
    fn test_incompatible_units() {
        assert_eq!(conv("5 grams in meters"), None);
    }

    #[test]
    fn test_number_with_unknown_words() {
        assert_eq!(conv("100 bananas"), None);
    }

    #[test]
    fn test_no_suggestion_available() {
        // kelvin is in the catalog but has no suggested destination
        assert_eq!(conv("300 kelvin"), None);
    }

    #[test]
    fn test_too_many_tokens() {
        assert_eq!(conv("5 m km ft"), None);
    }

    #[test]
    fn test_trailing_connector_fails_soft() {
        // "to" survives as the second token; it names no unit, so pairing
        // finds nothing instead of blowing up
        assert_eq!(conv("12 kg to"), None);
    }

    #[test]
    fn test_bare_number_gets_commentary() {
        let text = conv("100").unwrap();
        assert!(text.starts_with("100 "), "got {text:?}");
        assert!(text.contains(" is "), "got {text:?}");
    }

    #[test]
    fn test_negative_bare_number() {
        assert_eq!(conv("-100"), None);
    }

    // --- formatting details ---

    #[test]
    fn test_whole_results_have_no_decimal_point() {
        let text = conv("3 feet in inches").unwrap();
        assert_eq!(text, "3 feet = 36 inches");
    }

    #[test]
    fn test_trailing_zeros_trimmed() {
        // 6.096 renders from the fixed 4-decimal form "6.0960"
        assert_eq!(conv("20 feet in meters").unwrap(), "20 feet = 6.096 meters");
    }
}
