//! Playful commentary for bare numbers
//!
//! When the input is just a number, we compare it against a curated list of
//! reference facts and answer with something like "100 meters is close to
//! the height of X". Matches are ranked by log-scale distance, and the reply
//! is drawn at random from the top few so repeated queries don't always get
//! the same fact.

use rand::Rng;

use crate::catalog::FACTS_UNCERTAINTY;
use crate::normalize::render_number;

/// A reference fact: labels are display-only free text.
#[derive(Debug, Clone, Copy)]
pub struct NumberFact {
    pub value: f64,
    pub unit: &'static str,
    pub dimension: &'static str,
    pub target: &'static str,
}

pub const FACTS: &[NumberFact] = &[
    NumberFact { value: 3.2, unit: "meters", dimension: "wingspan", target: "a large andean condor" },
    NumberFact { value: 5.5, unit: "meters", dimension: "length", target: "a white whale" },
    NumberFact { value: 41.0, unit: "centimeters", dimension: "height", target: "a blue penguin" },
    NumberFact { value: 146.0, unit: "meters", dimension: "height", target: "the Great Pyramid of Giza" },
    NumberFact { value: 113.0, unit: "km/h", dimension: "top speed", target: "a cheetah" },
    NumberFact { value: 3475.0, unit: "kilometers", dimension: "diameter", target: "the Moon" },
    NumberFact { value: 1600.0, unit: "kilograms", dimension: "weight", target: "a white whale" },
    NumberFact { value: 8850.0, unit: "meters", dimension: "height", target: "Mount Everest" },
    NumberFact { value: 5500.0, unit: "°C", dimension: "temperature", target: "the surface of the Sun" },
    NumberFact { value: 12756.0, unit: "kilometers", dimension: "diameter", target: "the Earth" },
    NumberFact { value: 6430.0, unit: "kilometers", dimension: "length", target: "the Great Wall of China" },
    NumberFact { value: 100.0, unit: "°C", dimension: "temperature", target: "boiling water" },
];

/// Look up commentary for a bare number, drawing from the built-in facts.
pub fn lookup(number: f64) -> Option<String> {
    lookup_with(FACTS, number, FACTS_UNCERTAINTY, |n| {
        rand::thread_rng().gen_range(0..n)
    })
}

/// Same as [`lookup`] with the fact table, selection breadth, and random
/// pick injectable. `pick` receives the candidate count and returns an index
/// into the distance-sorted candidates.
pub fn lookup_with(
    facts: &[NumberFact],
    number: f64,
    uncertainty: usize,
    pick: impl FnOnce(usize) -> usize,
) -> Option<String> {
    // no fact can ratio-match a non-positive number, and log10 needs n > 0
    if number <= 0.0 || uncertainty == 0 {
        return None;
    }

    let rendered = render_number(number);
    let mut results: Vec<(f64, String)> = Vec::new();
    for fact in facts {
        let text = if fact.value * 0.4 <= number && number <= fact.value * 0.6 {
            Some(format!(
                "{} {} is about half of the {} of {}",
                rendered, fact.unit, fact.dimension, fact.target
            ))
        } else if fact.value * 0.9 <= number && number <= fact.value * 1.1 {
            Some(format!(
                "{} {} is close to the {} of {}",
                rendered, fact.unit, fact.dimension, fact.target
            ))
        } else if fact.value * 1.7 <= number && number <= fact.value * 100.0 {
            let times = (number / fact.value).round() as i64;
            Some(format!(
                "{} {} is around {} times the {} of {}",
                rendered, fact.unit, times, fact.dimension, fact.target
            ))
        } else {
            None
        };

        if let Some(text) = text {
            let distance = (number.log10() - fact.value.log10()).abs();
            results.push((distance, text));
        }
    }

    if results.is_empty() {
        return None;
    }
    results.sort_by(|a, b| a.0.total_cmp(&b.0));
    let shortlist = results.len().min(uncertainty);
    let index = pick(shortlist).min(shortlist - 1);
    Some(results.swap_remove(index).1)
}
