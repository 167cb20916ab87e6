//! Token matching, dimensional pairing, and destination suggestion
//!
//! An input token may denote several canonical units ("m" is meter or
//! month). Nothing here picks a winner by priority: pairing enumerates the
//! cross-product of both tokens' candidate sets and keeps only combinations
//! whose dimensionality agrees. Exactly one survivor is a conversion;
//! anything else is a refusal.

use crate::catalog::{UnitEntry, UnitRegistry};

/// Why a token pair could not be resolved to a single conversion.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PairingError {
    /// More than one candidate pairing shares a dimensionality, e.g.
    /// "1y in m" (yard/meter and year/month both fit).
    #[error("{0} dimensionally valid pairings, need exactly one")]
    Ambiguous(usize),
    /// No candidate pairing shares a dimensionality, or a token names no
    /// unit at all.
    #[error("no dimensionally valid pairing")]
    Incompatible,
}

impl UnitRegistry {
    /// Match a raw word against the known tokens, longest first.
    pub fn match_token(&self, word: &str) -> Option<&str> {
        self.useful_tokens()
            .iter()
            .find(|token| token.as_str() == word)
            .map(String::as_str)
    }

    /// Collect unit tokens from the word lists on each side of the number,
    /// preserving order. The flag reports whether anything matched on the
    /// before side, which later decides source/destination assignment.
    pub fn collect_tokens<'a>(
        &'a self,
        before: &[&str],
        after: &[&str],
    ) -> (Vec<&'a str>, bool) {
        let mut tokens = Vec::new();
        let mut found_before = false;
        for word in before {
            if let Some(token) = self.match_token(word) {
                found_before = true;
                tokens.push(token);
            }
        }
        for word in after {
            if let Some(token) = self.match_token(word) {
                tokens.push(token);
            }
        }
        (tokens, found_before)
    }

    /// Resolve a from/to token pair down to one unit pair by dimensional
    /// compatibility.
    pub fn pair_units(
        &self,
        token_from: &str,
        token_to: &str,
    ) -> Result<(&UnitEntry, &UnitEntry), PairingError> {
        let mut matches = Vec::new();
        for &from_name in self.candidates(token_from) {
            for &to_name in self.candidates(token_to) {
                let from = self.entry(from_name).ok_or(PairingError::Incompatible)?;
                let to = self.entry(to_name).ok_or(PairingError::Incompatible)?;
                if from.unit.dimensionality() == to.unit.dimensionality() {
                    matches.push((from, to));
                }
            }
        }
        match matches.len() {
            1 => Ok(matches.remove(0)),
            0 => Err(PairingError::Incompatible),
            n => Err(PairingError::Ambiguous(n)),
        }
    }

    /// Suggest a destination for a lone unit token: the first candidate
    /// with a suggestion-table entry wins.
    pub fn suggest(&self, token: &str) -> Option<&'static str> {
        self.candidates(token)
            .iter()
            .find_map(|&canonical| self.suggested_second_unit(canonical))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::registry;

    #[test]
    fn test_match_token() {
        let reg = registry();
        assert_eq!(reg.match_token("inches"), Some("inches"));
        assert_eq!(reg.match_token("in"), Some("in"));
        assert_eq!(reg.match_token("hello"), None);
        assert_eq!(reg.match_token(""), None);
    }

    #[test]
    fn test_collect_tokens_both_sides() {
        let reg = registry();
        let (tokens, found_before) = reg.collect_tokens(&[], &["inches", "in", "ft"]);
        assert_eq!(tokens, vec!["inches", "in", "ft"]);
        assert!(!found_before);

        let (tokens, found_before) = reg.collect_tokens(&["meters", "in"], &["feet"]);
        assert_eq!(tokens, vec!["meters", "in", "feet"]);
        assert!(found_before);
    }

    #[test]
    fn test_collect_tokens_skips_unknown_words() {
        let reg = registry();
        let (tokens, found_before) = reg.collect_tokens(&["about"], &["very", "cups"]);
        assert_eq!(tokens, vec!["cups"]);
        assert!(!found_before);
    }

    #[test]
    fn test_pair_unique() {
        let reg = registry();
        // "c" is celsius or cup; fahrenheit filters it to celsius
        let (from, to) = reg.pair_units("c", "fahrenheit").unwrap();
        assert_eq!(from.plural, "{}°C");
        assert_eq!(to.plural, "{}°F");
    }

    #[test]
    fn test_pair_ambiguous() {
        let reg = registry();
        // yard/meter and year/month both line up
        assert_eq!(reg.pair_units("y", "m"), Err(PairingError::Ambiguous(2)));
    }

    #[test]
    fn test_pair_incompatible() {
        let reg = registry();
        assert_eq!(reg.pair_units("gram", "meter"), Err(PairingError::Incompatible));
        // connectors carry no candidates
        assert_eq!(reg.pair_units("to", "meter"), Err(PairingError::Incompatible));
    }

    #[test]
    fn test_suggest_first_candidate_with_entry() {
        let reg = registry();
        // "c" -> celsius (has an entry) before cup
        assert_eq!(reg.suggest("c"), Some("fahrenheit"));
        assert_eq!(reg.suggest("hectares"), Some("square_mile"));
        // kelvin is a unit but has no suggestion
        assert_eq!(reg.suggest("k"), None);
        assert_eq!(reg.suggest("nonsense"), None);
    }
}
