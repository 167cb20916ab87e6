//! Minimal dimensional-quantity engine
//!
//! Units are runtime values: a dimension vector plus an affine mapping to a
//! base unit (meters, kilograms, seconds, kelvin). Keeping dimensionality a
//! runtime property is what lets the resolver enumerate candidate units for
//! an ambiguous token and filter them by compatibility.

use std::ops::{Div, Mul};

/// Exponents over the base dimensions. Two units are convertible exactly
/// when their dimension vectors are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimension {
    pub length: i8,
    pub mass: i8,
    pub time: i8,
    pub temperature: i8,
}

impl Dimension {
    pub const LENGTH: Dimension = Dimension::new(1, 0, 0, 0);
    pub const MASS: Dimension = Dimension::new(0, 1, 0, 0);
    pub const TIME: Dimension = Dimension::new(0, 0, 1, 0);
    pub const TEMPERATURE: Dimension = Dimension::new(0, 0, 0, 1);

    pub const fn new(length: i8, mass: i8, time: i8, temperature: i8) -> Self {
        Self { length, mass, time, temperature }
    }

    const fn powi(self, n: i8) -> Self {
        Self::new(self.length * n, self.mass * n, self.time * n, self.temperature * n)
    }
}

/// A handle to a concrete unit: its dimensionality and the affine map
/// `base = magnitude * factor + offset`. The offset is only ever non-zero
/// for thermometric units, which are never raised to a power.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineUnit {
    dimension: Dimension,
    factor: f64,
    offset: f64,
}

impl EngineUnit {
    pub const fn linear(dimension: Dimension, factor: f64) -> Self {
        Self { dimension, factor, offset: 0.0 }
    }

    pub const fn affine(dimension: Dimension, factor: f64, offset: f64) -> Self {
        Self { dimension, factor, offset }
    }

    /// Raise a linear unit to a small integer power (`meter().powi(2)` is a
    /// square meter).
    pub fn powi(self, n: i8) -> Self {
        debug_assert_eq!(self.offset, 0.0, "cannot raise an affine unit to a power");
        Self::linear(self.dimension.powi(n), self.factor.powi(n as i32))
    }

    pub fn dimensionality(&self) -> Dimension {
        self.dimension
    }
}

#[derive(Debug, thiserror::Error)]
#[error("cannot convert {from:?} to {to:?}")]
pub struct DimensionalityError {
    pub from: Dimension,
    pub to: Dimension,
}

/// A magnitude bound to a unit.
#[derive(Debug, Clone, Copy)]
pub struct Quantity {
    magnitude: f64,
    unit: EngineUnit,
}

impl Quantity {
    pub fn new(magnitude: f64, unit: EngineUnit) -> Self {
        Self { magnitude, unit }
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Convert to another unit of the same dimensionality.
    pub fn to(&self, target: EngineUnit) -> Result<Quantity, DimensionalityError> {
        if self.unit.dimension != target.dimension {
            return Err(DimensionalityError {
                from: self.unit.dimension,
                to: target.dimension,
            });
        }
        let base = self.magnitude * self.unit.factor + self.unit.offset;
        let magnitude = (base - target.offset) / target.factor;
        Ok(Quantity { magnitude, unit: target })
    }
}

impl Mul<f64> for Quantity {
    type Output = Quantity;

    fn mul(self, scalar: f64) -> Quantity {
        Quantity { magnitude: self.magnitude * scalar, unit: self.unit }
    }
}

impl Div<f64> for Quantity {
    type Output = Quantity;

    fn div(self, scalar: f64) -> Quantity {
        Quantity { magnitude: self.magnitude / scalar, unit: self.unit }
    }
}

/// Base unit constructors, one per supported physical unit. Factors are the
/// exact legal definitions (international yard and pound, US liquid measures,
/// Julian year).
pub mod units {
    use super::{Dimension, EngineUnit};

    // lengths, in meters
    pub fn meter() -> EngineUnit {
        EngineUnit::linear(Dimension::LENGTH, 1.0)
    }
    pub fn centimeter() -> EngineUnit {
        EngineUnit::linear(Dimension::LENGTH, 0.01)
    }
    pub fn kilometer() -> EngineUnit {
        EngineUnit::linear(Dimension::LENGTH, 1000.0)
    }
    pub fn inch() -> EngineUnit {
        EngineUnit::linear(Dimension::LENGTH, 0.0254)
    }
    pub fn foot() -> EngineUnit {
        EngineUnit::linear(Dimension::LENGTH, 0.3048)
    }
    pub fn yard() -> EngineUnit {
        EngineUnit::linear(Dimension::LENGTH, 0.9144)
    }
    pub fn mile() -> EngineUnit {
        EngineUnit::linear(Dimension::LENGTH, 1609.344)
    }

    // area, in square meters
    pub fn are() -> EngineUnit {
        EngineUnit::linear(Dimension::LENGTH.powi(2), 100.0)
    }

    // volumes, in cubic meters
    pub fn litre() -> EngineUnit {
        EngineUnit::linear(Dimension::LENGTH.powi(3), 1e-3)
    }
    pub fn gallon() -> EngineUnit {
        EngineUnit::linear(Dimension::LENGTH.powi(3), 3.785_411_784e-3)
    }
    pub fn quart() -> EngineUnit {
        EngineUnit::linear(Dimension::LENGTH.powi(3), 0.946_352_946e-3)
    }
    pub fn pint() -> EngineUnit {
        EngineUnit::linear(Dimension::LENGTH.powi(3), 0.473_176_473e-3)
    }
    pub fn cup() -> EngineUnit {
        EngineUnit::linear(Dimension::LENGTH.powi(3), 0.236_588_236_5e-3)
    }
    pub fn fluid_ounce() -> EngineUnit {
        EngineUnit::linear(Dimension::LENGTH.powi(3), 29.573_529_562_5e-6)
    }
    pub fn tablespoon() -> EngineUnit {
        EngineUnit::linear(Dimension::LENGTH.powi(3), 14.786_764_781_25e-6)
    }
    pub fn teaspoon() -> EngineUnit {
        EngineUnit::linear(Dimension::LENGTH.powi(3), 4.928_921_593_75e-6)
    }

    // masses, in kilograms
    pub fn gram() -> EngineUnit {
        EngineUnit::linear(Dimension::MASS, 1e-3)
    }
    pub fn kilogram() -> EngineUnit {
        EngineUnit::linear(Dimension::MASS, 1.0)
    }
    pub fn metric_ton() -> EngineUnit {
        EngineUnit::linear(Dimension::MASS, 1000.0)
    }
    pub fn ounce() -> EngineUnit {
        EngineUnit::linear(Dimension::MASS, 0.028_349_523_125)
    }
    pub fn pound() -> EngineUnit {
        EngineUnit::linear(Dimension::MASS, 0.453_592_37)
    }
    pub fn short_ton() -> EngineUnit {
        EngineUnit::linear(Dimension::MASS, 907.184_74)
    }

    // times, in seconds
    pub fn second() -> EngineUnit {
        EngineUnit::linear(Dimension::TIME, 1.0)
    }
    pub fn minute() -> EngineUnit {
        EngineUnit::linear(Dimension::TIME, 60.0)
    }
    pub fn hour() -> EngineUnit {
        EngineUnit::linear(Dimension::TIME, 3600.0)
    }
    pub fn day() -> EngineUnit {
        EngineUnit::linear(Dimension::TIME, 86_400.0)
    }
    pub fn week() -> EngineUnit {
        EngineUnit::linear(Dimension::TIME, 604_800.0)
    }
    pub fn month() -> EngineUnit {
        // one twelfth of a Julian year
        EngineUnit::linear(Dimension::TIME, 2_629_800.0)
    }
    pub fn year() -> EngineUnit {
        EngineUnit::linear(Dimension::TIME, 31_557_600.0)
    }

    // temperatures, in kelvin
    pub fn kelvin() -> EngineUnit {
        EngineUnit::linear(Dimension::TEMPERATURE, 1.0)
    }
    pub fn celsius() -> EngineUnit {
        EngineUnit::affine(Dimension::TEMPERATURE, 1.0, 273.15)
    }
    pub fn fahrenheit() -> EngineUnit {
        EngineUnit::affine(Dimension::TEMPERATURE, 5.0 / 9.0, 459.67 * 5.0 / 9.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_powi() {
        let area = Dimension::LENGTH.powi(2);
        assert_eq!(area, Dimension::new(2, 0, 0, 0));
        assert_ne!(area, Dimension::LENGTH);
    }

    #[test]
    fn test_linear_conversion() {
        let q = Quantity::new(20.0, units::inch());
        let feet = q.to(units::foot()).unwrap();
        assert!((feet.magnitude() - 1.666_666_666).abs() < 1e-6);
    }

    #[test]
    fn test_square_conversion() {
        let q = Quantity::new(1.0, units::meter().powi(2));
        let sq_cm = q.to(units::centimeter().powi(2)).unwrap();
        assert!((sq_cm.magnitude() - 10_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_affine_temperature() {
        let q = Quantity::new(45.0, units::celsius());
        let f = q.to(units::fahrenheit()).unwrap();
        assert!((f.magnitude() - 113.0).abs() < 1e-9);

        let freezing = Quantity::new(32.0, units::fahrenheit());
        let c = freezing.to(units::celsius()).unwrap();
        assert!(c.magnitude().abs() < 1e-9);

        let k = Quantity::new(0.0, units::celsius()).to(units::kelvin()).unwrap();
        assert!((k.magnitude() - 273.15).abs() < 1e-9);
    }

    #[test]
    fn test_dimensionality_mismatch() {
        let q = Quantity::new(1.0, units::meter());
        assert!(q.to(units::second()).is_err());
        assert!(q.to(units::meter().powi(2)).is_err());
    }

    #[test]
    fn test_scalar_ops() {
        let q = Quantity::new(100.0, units::are()) * 100.0;
        let sq_mile = q.to(units::mile().powi(2)).unwrap();
        assert!((sq_mile.magnitude() - 0.386_102_158).abs() < 1e-6);

        let halved = Quantity::new(10.0, units::gram()) / 2.0;
        assert!((halved.magnitude() - 5.0).abs() < 1e-12);
    }
}
