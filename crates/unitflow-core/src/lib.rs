//! UnitFlow Core - natural-language unit conversion
//!
//! This library provides the core functionality for:
//! - Normalizing a free-form phrase (exponent markup, multi-word units)
//! - Extracting the numeric literal and candidate unit tokens
//! - Resolving ambiguous tokens by dimensional compatibility
//! - Converting through a small runtime quantity engine
//! - Rendering a human-readable sentence, or playful commentary for a
//!   bare number

pub mod catalog;
pub mod facts;
pub mod normalize;
pub mod pipeline;
pub mod quantity;
pub mod resolver;

pub use catalog::{registry, UnitRegistry};
pub use resolver::PairingError;

/// Convert the quantity found in a free-form phrase.
///
/// This is the main entry point for the library; it runs against the shared
/// process-wide registry. Returns `None` when the text does not pin down
/// exactly one conversion.
pub fn convert(text: &str) -> Option<String> {
    pipeline::convert(catalog::registry(), text)
}
