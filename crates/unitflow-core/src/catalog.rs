//! Curated unit tables and the registry built from them
//!
//! Everything here is static data: the canonical units with their engine
//! handles, input-facing symbols and synonyms, human-readable output
//! templates, connector words, and the per-unit suggested destination.
//! `UnitRegistry::new` folds the tables into lookup structures once and
//! validates their cross-references; the process-wide instance lives behind
//! a `Lazy` and is shared read-only by every conversion.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::quantity::EngineUnit;

/// Marker appended to a linear symbol by the normalizer when the input had
/// square markup (`ft^2`, `ft**2`, `ft2`, `ft²`). Must consist of word
/// characters only so tokenization keeps `ft_squared` as one token.
pub const SQUARE_MARKER: &str = "_squared";
/// Cubic counterpart of [`SQUARE_MARKER`].
pub const CUBIC_MARKER: &str = "_cubed";

/// Filler words allowed between the source and destination unit mentions.
pub const CONNECTORS: &[&str] = &["to", "in"];

/// How many of the best-ranked number facts to choose among at random.
pub const FACTS_UNCERTAINTY: usize = 3;

/// Canonical units: name, optional scale multiplier, engine handle.
/// The multiplier covers units the engine does not model directly
/// (hectare = 100 ares, milligram = 0.001 grams, millilitre = 0.001 litres).
fn supported_units() -> Vec<(&'static str, Option<f64>, EngineUnit)> {
    use crate::quantity::units::*;
    vec![
        ("are", None, are()),
        ("celsius", None, celsius()),
        ("centimeter", None, centimeter()),
        ("cubic_centimeter", None, centimeter().powi(3)),
        ("cubic_foot", None, foot().powi(3)),
        ("cubic_inch", None, inch().powi(3)),
        ("cubic_kilometer", None, kilometer().powi(3)),
        ("cubic_meter", None, meter().powi(3)),
        ("cubic_mile", None, mile().powi(3)),
        ("cubic_yard", None, yard().powi(3)),
        ("cup", None, cup()),
        ("day", None, day()),
        ("fahrenheit", None, fahrenheit()),
        ("fluid_ounce", None, fluid_ounce()),
        ("foot", None, foot()),
        ("gallon", None, gallon()),
        ("gram", None, gram()),
        ("hectare", Some(100.0), are()),
        ("hour", None, hour()),
        ("inch", None, inch()),
        ("kelvin", None, kelvin()),
        ("kilogram", None, kilogram()),
        ("kilometer", None, kilometer()),
        ("litre", None, litre()),
        ("meter", None, meter()),
        ("metric_ton", None, metric_ton()),
        ("mile", None, mile()),
        ("milligram", Some(0.001), gram()),
        ("millilitre", Some(0.001), litre()),
        ("minute", None, minute()),
        ("month", None, month()),
        ("ounce", None, ounce()),
        ("pint", None, pint()),
        ("pound", None, pound()),
        ("quart", None, quart()),
        ("second", None, second()),
        ("short_ton", None, short_ton()),
        ("square_centimeter", None, centimeter().powi(2)),
        ("square_foot", None, foot().powi(2)),
        ("square_inch", None, inch().powi(2)),
        ("square_kilometer", None, kilometer().powi(2)),
        ("square_meter", None, meter().powi(2)),
        ("square_mile", None, mile().powi(2)),
        ("square_yard", None, yard().powi(2)),
        ("tablespoon", None, tablespoon()),
        ("teaspoon", None, teaspoon()),
        ("week", None, week()),
        ("yard", None, yard()),
        ("year", None, year()),
    ]
}

/// Unit symbols: (symbol, canonical unit, linear). Some symbols deliberately
/// denote several units of different dimensionality ("m" is meter or month,
/// "y" is yard or year); the resolver sorts that out by dimensional
/// compatibility. Linear symbols also get synthesized `<symbol>_squared` and
/// `<symbol>_cubed` tokens pointing at the square_/cubic_ units.
const UNIT_SYMBOLS: &[(&str, &str, bool)] = &[
    ("c", "celsius", false),
    ("c", "cup", false),
    ("cc", "cubic_centimeter", false),
    ("cm", "centimeter", true),
    ("d", "day", false),
    ("f", "fahrenheit", false),
    ("f", "foot", true),
    ("ft", "foot", true),
    ("g", "gram", false),
    ("h", "hour", false),
    ("in", "inch", true),
    ("k", "kelvin", false),
    ("kg", "kilogram", false),
    ("km", "kilometer", true),
    ("l", "litre", false),
    ("m", "meter", true),
    ("m", "month", false),
    ("mg", "milligram", false),
    ("mi", "mile", true),
    ("ml", "millilitre", false),
    ("s", "second", false),
    ("t", "metric_ton", false),
    ("w", "week", false),
    ("y", "yard", true),
    ("y", "year", false),
    ("°c", "celsius", false),
    ("°f", "fahrenheit", false),
];

/// Synonyms, plurals, abbreviations, and multi-word phrases.
const EXTRA_ALIASES: &[(&str, &str)] = &[
    ("ares", "are"),
    ("centimeters", "centimeter"),
    ("cubic centimeter", "cubic_centimeter"),
    ("cubic centimeters", "cubic_centimeter"),
    ("cubic cm", "cubic_centimeter"),
    ("cubic feet", "cubic_foot"),
    ("cubic foot", "cubic_foot"),
    ("cubic ft", "cubic_foot"),
    ("cubic in", "cubic_inch"),
    ("cubic inch", "cubic_inch"),
    ("cubic inches", "cubic_inch"),
    ("cubic kilometer", "cubic_kilometer"),
    ("cubic kilometers", "cubic_kilometer"),
    ("cubic km", "cubic_kilometer"),
    ("cubic m", "cubic_meter"),
    ("cubic meter", "cubic_meter"),
    ("cubic meters", "cubic_meter"),
    ("cubic mi", "cubic_mile"),
    ("cubic mile", "cubic_mile"),
    ("cubic miles", "cubic_mile"),
    ("cubic y", "cubic_yard"),
    ("cubic yard", "cubic_yard"),
    ("cubic yards", "cubic_yard"),
    ("cups", "cup"),
    ("days", "day"),
    ("feet", "foot"),
    ("floz", "fluid_ounce"),
    ("flozs", "fluid_ounce"),
    ("fluid ounce", "fluid_ounce"),
    ("fluid ounces", "fluid_ounce"),
    ("gal", "gallon"),
    ("gallons", "gallon"),
    ("grams", "gram"),
    ("hectares", "hectare"),
    ("hours", "hour"),
    ("inches", "inch"),
    ("kilograms", "kilogram"),
    ("kilometers", "kilometer"),
    ("lb", "pound"),
    ("lbs", "pound"),
    ("liter", "litre"),
    ("liters", "litre"),
    ("litres", "litre"),
    ("meters", "meter"),
    ("metric ton", "metric_ton"),
    ("metric tons", "metric_ton"),
    ("miles", "mile"),
    ("milligrams", "milligram"),
    ("milliliter", "millilitre"),
    ("milliliters", "millilitre"),
    ("millilitres", "millilitre"),
    ("min", "minute"),
    ("minutes", "minute"),
    ("months", "month"),
    ("ounce", "fluid_ounce"),
    ("ounces", "fluid_ounce"),
    ("ounces", "ounce"),
    ("oz", "fluid_ounce"),
    ("oz", "ounce"),
    ("ozs", "fluid_ounce"),
    ("ozs", "ounce"),
    ("pints", "pint"),
    ("pounds", "pound"),
    ("qt", "quart"),
    ("qts", "quart"),
    ("quarts", "quart"),
    ("sec", "second"),
    ("seconds", "second"),
    ("short ton", "short_ton"),
    ("short tons", "short_ton"),
    ("sq centimeter", "square_centimeter"),
    ("sq centimeters", "square_centimeter"),
    ("sq cm", "square_centimeter"),
    ("sq feet", "square_foot"),
    ("sq foot", "square_foot"),
    ("sq ft", "square_foot"),
    ("sq in", "square_inch"),
    ("sq inch", "square_inch"),
    ("sq inches", "square_inch"),
    ("sq kilometer", "square_kilometer"),
    ("sq kilometers", "square_kilometer"),
    ("sq km", "square_kilometer"),
    ("sq m", "square_meter"),
    ("sq meter", "square_meter"),
    ("sq meters", "square_meter"),
    ("sq mi", "square_mile"),
    ("sq mile", "square_mile"),
    ("sq miles", "square_mile"),
    ("sq y", "square_yard"),
    ("sq yard", "square_yard"),
    ("sq yards", "square_yard"),
    ("square centimeter", "square_centimeter"),
    ("square centimeters", "square_centimeter"),
    ("square cm", "square_centimeter"),
    ("square feet", "square_foot"),
    ("square foot", "square_foot"),
    ("square ft", "square_foot"),
    ("square in", "square_inch"),
    ("square inch", "square_inch"),
    ("square inches", "square_inch"),
    ("square kilometer", "square_kilometer"),
    ("square kilometers", "square_kilometer"),
    ("square km", "square_kilometer"),
    ("square m", "square_meter"),
    ("square meter", "square_meter"),
    ("square meters", "square_meter"),
    ("square mi", "square_mile"),
    ("square mile", "square_mile"),
    ("square miles", "square_mile"),
    ("square y", "square_yard"),
    ("square yard", "square_yard"),
    ("square yards", "square_yard"),
    ("tablespoons", "tablespoon"),
    ("tbs", "tablespoon"),
    ("tbsp", "tablespoon"),
    ("teaspoons", "teaspoon"),
    ("ton", "short_ton"),
    ("tonne", "metric_ton"),
    ("ts", "teaspoon"),
    ("tsp", "teaspoon"),
    ("weeks", "week"),
    ("yards", "yard"),
    ("years", "year"),
];

/// Output templates: (canonical unit, singular, plural). `{}` is filled with
/// the rendered magnitude.
const UNIT_OUTPUT: &[(&str, &str, &str)] = &[
    ("are", "{} are", "{} ares"),
    ("celsius", "{}°C", "{}°C"),
    ("centimeter", "{} centimeter", "{} centimeters"),
    ("cubic_centimeter", "{} cubic centimeter", "{} cubic centimeters"),
    ("cubic_foot", "{} cubic foot", "{} cubic feet"),
    ("cubic_inch", "{} cubic inch", "{} cubic inches"),
    ("cubic_kilometer", "{} cubic kilometer", "{} cubic kilometers"),
    ("cubic_meter", "{} cubic meter", "{} cubic meters"),
    ("cubic_mile", "{} cubic mile", "{} cubic miles"),
    ("cubic_yard", "{} cubic yard", "{} cubic yards"),
    ("cup", "{} US cup", "{} US cups"),
    ("day", "{} day", "{} days"),
    ("fahrenheit", "{}°F", "{}°F"),
    ("fluid_ounce", "{} US fluid ounce", "{} US fluid ounces"),
    ("foot", "{} foot", "{} feet"),
    ("gallon", "{} US gallon", "{} US gallons"),
    ("gram", "{} gram", "{} grams"),
    ("hectare", "{} hectare", "{} hectares"),
    ("hour", "{} hour", "{} hours"),
    ("inch", "{} inch", "{} inches"),
    ("kelvin", "{}K", "{}K"),
    ("kilogram", "{} kilogram", "{} kilograms"),
    ("kilometer", "{} kilometer", "{} kilometers"),
    ("litre", "{} litre", "{} litres"),
    ("meter", "{} meter", "{} meters"),
    ("metric_ton", "{} metric ton", "{} metric tons"),
    ("mile", "{} mile", "{} miles"),
    ("milligram", "{} milligram", "{} milligrams"),
    ("millilitre", "{} millilitre", "{} millilitres"),
    ("minute", "{} minute", "{} minutes"),
    ("month", "{} month", "{} months"),
    ("ounce", "{} ounce", "{} ounces"),
    ("pint", "{} US pint", "{} US pints"),
    ("pound", "{} pound", "{} pounds"),
    ("quart", "{} quart", "{} quarts"),
    ("second", "{} second", "{} seconds"),
    ("short_ton", "{} short ton", "{} short tons"),
    ("square_centimeter", "{} square centimeter", "{} square centimeters"),
    ("square_foot", "{} square foot", "{} square feet"),
    ("square_inch", "{} square inch", "{} square inches"),
    ("square_kilometer", "{} square kilometer", "{} square kilometers"),
    ("square_meter", "{} square meter", "{} square meters"),
    ("square_mile", "{} square mile", "{} square miles"),
    ("square_yard", "{} square yard", "{} square yards"),
    ("tablespoon", "{} US tablespoon", "{} US tablespoons"),
    ("teaspoon", "{} US teaspoon", "{} US teaspoons"),
    ("week", "{} week", "{} weeks"),
    ("yard", "{} yard", "{} yards"),
    ("year", "{} year", "{} years"),
];

/// Default destination when the input names a single unit. Temperature goes
/// celsius<->fahrenheit, time goes to a smaller unit a couple of steps down,
/// the rest crosses imperial<->metric at a similar scale.
const SUGGESTED_SECOND_UNIT: &[(&str, &str)] = &[
    ("are", "square_yard"),
    ("celsius", "fahrenheit"),
    ("centimeter", "inch"),
    ("cubic_centimeter", "fluid_ounce"),
    ("cubic_foot", "litre"),
    ("cubic_inch", "millilitre"),
    ("cubic_kilometer", "cubic_mile"),
    ("cubic_meter", "cubic_yard"),
    ("cubic_mile", "cubic_kilometer"),
    ("cubic_yard", "cubic_meter"),
    ("cup", "millilitre"),
    ("day", "hour"),
    ("fahrenheit", "celsius"),
    ("fluid_ounce", "millilitre"),
    ("foot", "meter"),
    ("gallon", "litre"),
    ("gram", "ounce"),
    ("hectare", "square_mile"),
    ("hour", "second"),
    ("inch", "centimeter"),
    ("kilogram", "pound"),
    ("kilometer", "mile"),
    ("litre", "gallon"),
    ("meter", "yard"),
    ("mile", "kilometer"),
    ("minute", "second"),
    ("month", "day"),
    ("ounce", "gram"),
    ("pint", "litre"),
    ("pound", "kilogram"),
    ("quart", "litre"),
    ("square_centimeter", "square_inch"),
    ("square_foot", "square_meter"),
    ("square_inch", "square_centimeter"),
    ("square_kilometer", "square_mile"),
    ("square_meter", "square_foot"),
    ("square_mile", "square_kilometer"),
    ("square_yard", "square_meter"),
    ("tablespoon", "millilitre"),
    ("teaspoon", "millilitre"),
    ("week", "hour"),
    ("yard", "meter"),
    ("year", "day"),
];

/// One canonical unit, ready for conversion and rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitEntry {
    pub mult: Option<f64>,
    pub unit: EngineUnit,
    pub singular: &'static str,
    pub plural: &'static str,
}

/// All lookup structures derived from the static tables. Built once,
/// never mutated.
pub struct UnitRegistry {
    units: HashMap<&'static str, UnitEntry>,
    candidates: HashMap<String, Vec<&'static str>>,
    useful_tokens: Vec<String>,
    multiword: Vec<(&'static str, &'static str)>,
    suggestions: HashMap<&'static str, &'static str>,
}

impl UnitRegistry {
    /// Build and validate the registry. Panics on an inconsistent table,
    /// which is a bug in the curated data, not a runtime condition.
    pub fn new() -> Self {
        let supported = supported_units();
        let templates: HashMap<&str, (&'static str, &'static str)> = UNIT_OUTPUT
            .iter()
            .map(|&(name, singular, plural)| (name, (singular, plural)))
            .collect();
        assert_eq!(
            supported.len(),
            templates.len(),
            "unit catalog and output templates must cover the same units"
        );

        let mut units = HashMap::new();
        for (name, mult, unit) in supported {
            let &(singular, plural) = templates
                .get(name)
                .unwrap_or_else(|| panic!("unit {name:?} has no output template"));
            units.insert(name, UnitEntry { mult, unit, singular, plural });
        }

        // token -> ordered canonical candidates; canonical names map to
        // themselves
        let mut candidates: HashMap<String, Vec<&'static str>> = HashMap::new();
        for &name in units.keys() {
            candidates.insert(name.to_string(), vec![name]);
        }
        for &(alias, canonical) in EXTRA_ALIASES {
            assert!(units.contains_key(canonical), "alias {alias:?} targets unknown unit {canonical:?}");
            candidates.entry(alias.to_string()).or_default().push(canonical);
        }
        for &(symbol, canonical, linear) in UNIT_SYMBOLS {
            assert!(units.contains_key(canonical), "symbol {symbol:?} targets unknown unit {canonical:?}");
            candidates.entry(symbol.to_string()).or_default().push(canonical);
            if linear {
                for (marker, prefix) in [(SQUARE_MARKER, "square_"), (CUBIC_MARKER, "cubic_")] {
                    let derived = format!("{prefix}{canonical}");
                    let targets = candidates
                        .get(derived.as_str())
                        .unwrap_or_else(|| panic!("linear symbol {symbol:?} needs {derived:?} in the catalog"))
                        .clone();
                    candidates.insert(format!("{symbol}{marker}"), targets);
                }
            }
        }

        for &(key, value) in SUGGESTED_SECOND_UNIT {
            assert!(units.contains_key(key), "suggestion key {key:?} is not a catalog unit");
            assert!(units.contains_key(value), "suggestion value {value:?} is not a catalog unit");
        }
        let suggestions = SUGGESTED_SECOND_UNIT.iter().copied().collect();

        // longest-first scan order; ties broken alphabetically so matching
        // is deterministic
        let mut useful_tokens: Vec<String> = candidates
            .keys()
            .cloned()
            .chain(CONNECTORS.iter().map(|c| c.to_string()))
            .collect();
        useful_tokens.sort();
        useful_tokens.dedup();
        useful_tokens.sort_by_key(|t| std::cmp::Reverse(t.len()));

        // multi-word phrases, longest first so "square meters" wins over a
        // shorter phrase contained in it
        let mut multiword: Vec<(&'static str, &'static str)> = EXTRA_ALIASES
            .iter()
            .copied()
            .filter(|(alias, _)| alias.contains(' '))
            .collect();
        multiword.sort_by_key(|&(alias, _)| std::cmp::Reverse(alias.len()));

        Self { units, candidates, useful_tokens, multiword, suggestions }
    }

    pub fn entry(&self, canonical: &str) -> Option<&UnitEntry> {
        self.units.get(canonical)
    }

    /// Canonical units a token may denote, in table order. Empty for
    /// unknown tokens and bare connectors.
    pub fn candidates(&self, token: &str) -> &[&'static str] {
        self.candidates.get(token).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every known token (units, aliases, symbols, connectors), longest
    /// first.
    pub fn useful_tokens(&self) -> &[String] {
        &self.useful_tokens
    }

    /// Multi-word alias phrases with their canonical replacement, longest
    /// first.
    pub fn multiword_aliases(&self) -> &[(&'static str, &'static str)] {
        &self.multiword
    }

    pub fn connectors(&self) -> &'static [&'static str] {
        CONNECTORS
    }

    pub fn suggested_second_unit(&self, canonical: &str) -> Option<&'static str> {
        self.suggestions.get(canonical).copied()
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static REGISTRY: Lazy<UnitRegistry> = Lazy::new(UnitRegistry::new);

/// The shared process-wide registry.
pub fn registry() -> &'static UnitRegistry {
    &REGISTRY
}
