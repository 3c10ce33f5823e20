//! Measured quantities for type-safe unit handling
//!
//! A [`Quantity`] is an `f64` magnitude tagged with a [`Unit`] of one kind
//! (length, weight, volume or density). The kind is a type parameter, so adding
//! a length to a weight does not compile, while lengths in inches and
//! centimeters add, compare and convert freely.
//!
//! # Design Philosophy
//! - One generic quantity type indexed by an uninhabited kind marker
//! - Units are resolved by name through the process-wide unit table
//!   (see [`crate::core_types::unit_table`]) and carry their factor to the
//!   canonical unit of their kind: centimeter, gram, milliliter, gram per milliliter
//! - Arithmetic happens in the unit of the left operand
//! - Equality and ordering compare canonical values
//! - `f64::INFINITY` is the "unbounded" sentinel and survives every conversion
//!
//! # Usage
//! ```
//! use physical_core::core_types::units::{Length, Weight};
//!
//! let a = Length::inches(1.0);
//! let b = Length::centimeters(2.54);
//! assert_eq!(a, b);
//!
//! let w = Weight::new(1.0, "lb").unwrap();
//! assert!((w.convert_to("g").unwrap().value() - 453.59237).abs() < 1e-9);
//! ```

use crate::core_types::unit_table;
use crate::error::Result;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};

// ============================================================================
// HELPER FUNCTIONS FOR TOTAL ORDERING
// ============================================================================

/// Compare f64 values with total ordering using Rust's built-in `total_cmp`
#[inline]
pub(crate) fn f64_total_cmp(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

// ============================================================================
// KINDS
// ============================================================================

/// Runtime tag for the kind of a quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Length,
    Weight,
    Volume,
    Density,
}

impl Dimension {
    /// All kinds, in table order.
    pub const ALL: [Dimension; 4] = [
        Dimension::Length,
        Dimension::Weight,
        Dimension::Volume,
        Dimension::Density,
    ];

    /// Lower-case name used in messages and configuration files.
    pub const fn name(self) -> &'static str {
        match self {
            Dimension::Length => "length",
            Dimension::Weight => "weight",
            Dimension::Volume => "volume",
            Dimension::Density => "density",
        }
    }

    /// Name of the unit every other unit of this kind converts through.
    pub const fn canonical_unit(self) -> &'static str {
        match self {
            Dimension::Length => "cm",
            Dimension::Weight => "g",
            Dimension::Volume => "ml",
            Dimension::Density => "g_ml",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Compile-time kind of a quantity. Implemented only by the markers in [`kind`].
pub trait Kind: sealed::Sealed + Copy + fmt::Debug + 'static {
    const DIMENSION: Dimension;
}

/// Uninhabited kind markers used as the type parameter of [`Quantity`].
pub mod kind {
    use super::{sealed, Dimension, Kind};

    macro_rules! kinds {
        ($($(#[$doc:meta])* $name:ident),* $(,)?) => {
            $(
                $(#[$doc])*
                #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
                pub enum $name {}

                impl sealed::Sealed for $name {}

                impl Kind for $name {
                    const DIMENSION: Dimension = Dimension::$name;
                }
            )*
        };
    }

    kinds! {
        /// Linear extent, canonical unit centimeter.
        Length,
        /// Mass, canonical unit gram.
        Weight,
        /// Capacity, canonical unit milliliter.
        Volume,
        /// Mass per volume, canonical unit gram per milliliter.
        Density,
    }
}

/// Distance along one axis.
pub type Length = Quantity<kind::Length>;
/// Mass of an object.
pub type Weight = Quantity<kind::Weight>;
/// Space occupied or enclosed by an object.
pub type Volume = Quantity<kind::Volume>;
/// Mass per unit of volume.
pub type Density = Quantity<kind::Density>;

// ============================================================================
// UNITS
// ============================================================================

/// A resolved unit of kind `K`: its primary name and its factor to the
/// canonical unit of `K`.
#[derive(Debug, Clone, Copy)]
pub struct Unit<K: Kind> {
    name: &'static str,
    factor: f64,
    kind: PhantomData<K>,
}

impl<K: Kind> Unit<K> {
    const fn builtin(name: &'static str, factor: f64) -> Self {
        Unit {
            name,
            factor,
            kind: PhantomData,
        }
    }

    pub(crate) const fn from_parts(name: &'static str, factor: f64) -> Self {
        Self::builtin(name, factor)
    }

    /// Look a unit name or alias up in the installed unit table.
    ///
    /// Fails with `UnknownUnit` if the name is not registered and with
    /// `IncompatibleKind` if it is registered for another kind.
    pub fn parse(name: &str) -> Result<Self> {
        let entry = unit_table::resolve(name, K::DIMENSION)?;
        Ok(Self::from_parts(entry.name, entry.factor))
    }

    /// The canonical unit of `K`.
    pub fn canonical() -> Self {
        Self::builtin(K::DIMENSION.canonical_unit(), 1.0)
    }

    /// Primary name of the unit.
    #[inline]
    pub fn name(self) -> &'static str {
        self.name
    }

    /// How many canonical units one of this unit is.
    #[inline]
    pub fn factor(self) -> f64 {
        self.factor
    }

    #[inline]
    pub fn is_canonical(self) -> bool {
        self.name == K::DIMENSION.canonical_unit()
    }
}

impl<K: Kind> PartialEq for Unit<K> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.factor == other.factor
    }
}

impl<K: Kind> fmt::Display for Unit<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl<K: Kind> Serialize for Unit<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}

impl<'de, K: Kind> Deserialize<'de> for Unit<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Unit::parse(&name).map_err(serde::de::Error::custom)
    }
}

// The unit constants below back the constant constructors on `Quantity`
// (`Length::inches` and friends). Their factors are fixed: the unit table
// refuses to redefine any of these names with a different factor.

impl Unit<kind::Length> {
    pub const MILLIMETER: Self = Self::builtin("mm", 0.1);
    pub const CENTIMETER: Self = Self::builtin("cm", 1.0);
    pub const METER: Self = Self::builtin("m", 100.0);
    pub const INCH: Self = Self::builtin("in", 2.54);
    pub const FOOT: Self = Self::builtin("ft", 30.48);
}

impl Unit<kind::Weight> {
    pub const GRAM: Self = Self::builtin("g", 1.0);
    pub const KILOGRAM: Self = Self::builtin("kg", 1000.0);
    pub const OUNCE: Self = Self::builtin("oz", 28.349523125);
    pub const POUND: Self = Self::builtin("lb", 453.59237);
}

impl Unit<kind::Volume> {
    pub const MILLILITER: Self = Self::builtin("ml", 1.0);
    pub const LITER: Self = Self::builtin("l", 1000.0);
    pub const CUBIC_FOOT: Self = Self::builtin("ft3", 28316.846592);
}

impl Unit<kind::Density> {
    pub const GRAM_PER_MILLILITER: Self = Self::builtin("g_ml", 1.0);
    pub const KILOGRAM_PER_CUBIC_METER: Self = Self::builtin("kg_m3", 0.001);
    pub const POUND_PER_CUBIC_FOOT: Self = Self::builtin("lb_ft3", 0.0160184897305);
}

const fn fixed<K: Kind>(unit: Unit<K>) -> (&'static str, Dimension, f64) {
    (unit.name, K::DIMENSION, unit.factor)
}

/// Name, kind and factor of every unit constant.
pub(crate) const FIXED_UNITS: &[(&str, Dimension, f64)] = &[
    fixed(Unit::<kind::Length>::MILLIMETER),
    fixed(Unit::<kind::Length>::CENTIMETER),
    fixed(Unit::<kind::Length>::METER),
    fixed(Unit::<kind::Length>::INCH),
    fixed(Unit::<kind::Length>::FOOT),
    fixed(Unit::<kind::Weight>::GRAM),
    fixed(Unit::<kind::Weight>::KILOGRAM),
    fixed(Unit::<kind::Weight>::OUNCE),
    fixed(Unit::<kind::Weight>::POUND),
    fixed(Unit::<kind::Volume>::MILLILITER),
    fixed(Unit::<kind::Volume>::LITER),
    fixed(Unit::<kind::Volume>::CUBIC_FOOT),
    fixed(Unit::<kind::Density>::GRAM_PER_MILLILITER),
    fixed(Unit::<kind::Density>::KILOGRAM_PER_CUBIC_METER),
    fixed(Unit::<kind::Density>::POUND_PER_CUBIC_FOOT),
];

// ============================================================================
// QUANTITY
// ============================================================================

/// A magnitude measured in a unit of kind `K`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(bound = "K: Kind")]
pub struct Quantity<K: Kind> {
    value: f64,
    unit: Unit<K>,
}

impl<K: Kind> Quantity<K> {
    /// Create a quantity from a unit name or alias.
    pub fn new(value: f64, unit: &str) -> Result<Self> {
        Ok(Self::with_unit(value, Unit::parse(unit)?))
    }

    /// Create a quantity from an already resolved unit.
    #[inline]
    pub const fn with_unit(value: f64, unit: Unit<K>) -> Self {
        Quantity { value, unit }
    }

    /// Create a quantity in the canonical unit of `K`.
    #[inline]
    pub fn canonical(value: f64) -> Self {
        Self::with_unit(value, Unit::canonical())
    }

    #[inline]
    pub fn zero() -> Self {
        Self::canonical(0.0)
    }

    /// Positive infinity in the canonical unit: the unbounded sentinel.
    #[inline]
    pub fn infinite() -> Self {
        Self::canonical(f64::INFINITY)
    }

    /// Magnitude in this quantity's own unit.
    #[inline]
    pub fn value(self) -> f64 {
        self.value
    }

    #[inline]
    pub fn unit(self) -> Unit<K> {
        self.unit
    }

    /// Magnitude expressed in the canonical unit of `K`.
    #[inline]
    pub fn canonical_value(self) -> f64 {
        if self.unit.factor == 1.0 {
            self.value
        } else {
            self.value * self.unit.factor
        }
    }

    /// Convert to the named unit.
    pub fn convert_to(self, unit: &str) -> Result<Self> {
        Ok(self.convert_to_unit(Unit::parse(unit)?))
    }

    /// Convert to a resolved unit. Zero and infinity are preserved exactly.
    pub fn convert_to_unit(self, unit: Unit<K>) -> Self {
        if self.unit == unit {
            return self;
        }
        let value = if unit.factor == 1.0 {
            self.canonical_value()
        } else {
            self.canonical_value() / unit.factor
        };
        Self::with_unit(value, unit)
    }

    /// Convert to the canonical unit of `K`.
    #[inline]
    pub fn to_canonical(self) -> Self {
        self.convert_to_unit(Unit::canonical())
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.value == 0.0
    }

    #[inline]
    pub fn is_infinite(self) -> bool {
        self.value.is_infinite()
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.value.is_finite()
    }

    /// Total ordering on canonical values (NaN sorts above everything).
    #[inline]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.canonical_value(), other.canonical_value())
    }

    /// Larger of two quantities, in the unit of the winner.
    pub fn max(self, other: Self) -> Self {
        if self.total_cmp(&other) == Ordering::Less {
            other
        } else {
            self
        }
    }

    /// Smaller of two quantities, in the unit of the winner.
    pub fn min(self, other: Self) -> Self {
        if self.total_cmp(&other) == Ordering::Greater {
            other
        } else {
            self
        }
    }
}

impl<K: Kind> Default for Quantity<K> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<K: Kind> PartialEq for Quantity<K> {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_value() == other.canonical_value()
    }
}

impl<K: Kind> PartialOrd for Quantity<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.canonical_value().partial_cmp(&other.canonical_value())
    }
}

impl<K: Kind> Add for Quantity<K> {
    type Output = Quantity<K>;
    fn add(self, rhs: Quantity<K>) -> Quantity<K> {
        let rhs = rhs.convert_to_unit(self.unit);
        Quantity::with_unit(self.value + rhs.value, self.unit)
    }
}

impl<K: Kind> Sub for Quantity<K> {
    type Output = Quantity<K>;
    fn sub(self, rhs: Quantity<K>) -> Quantity<K> {
        let rhs = rhs.convert_to_unit(self.unit);
        Quantity::with_unit(self.value - rhs.value, self.unit)
    }
}

impl<K: Kind> AddAssign for Quantity<K> {
    fn add_assign(&mut self, rhs: Quantity<K>) {
        *self = *self + rhs;
    }
}

impl<K: Kind> SubAssign for Quantity<K> {
    fn sub_assign(&mut self, rhs: Quantity<K>) {
        *self = *self - rhs;
    }
}

impl<K: Kind> Mul<f64> for Quantity<K> {
    type Output = Quantity<K>;
    fn mul(self, rhs: f64) -> Quantity<K> {
        Quantity::with_unit(self.value * rhs, self.unit)
    }
}

impl<K: Kind> Mul<Quantity<K>> for f64 {
    type Output = Quantity<K>;
    fn mul(self, rhs: Quantity<K>) -> Quantity<K> {
        rhs * self
    }
}

impl<K: Kind> Div<f64> for Quantity<K> {
    type Output = Quantity<K>;
    fn div(self, rhs: f64) -> Quantity<K> {
        Quantity::with_unit(self.value / rhs, self.unit)
    }
}

impl<K: Kind> Sum for Quantity<K> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, q| acc + q)
    }
}

impl<'a, K: Kind> Sum<&'a Quantity<K>> for Quantity<K> {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, q| acc + *q)
    }
}

impl<K: Kind> fmt::Display for Quantity<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

// ============================================================================
// PER-KIND CONSTRUCTORS
// ============================================================================

impl Quantity<kind::Length> {
    #[inline]
    pub const fn millimeters(value: f64) -> Self {
        Self::with_unit(value, Unit::<kind::Length>::MILLIMETER)
    }

    #[inline]
    pub const fn centimeters(value: f64) -> Self {
        Self::with_unit(value, Unit::<kind::Length>::CENTIMETER)
    }

    #[inline]
    pub const fn meters(value: f64) -> Self {
        Self::with_unit(value, Unit::<kind::Length>::METER)
    }

    #[inline]
    pub const fn inches(value: f64) -> Self {
        Self::with_unit(value, Unit::<kind::Length>::INCH)
    }

    #[inline]
    pub const fn feet(value: f64) -> Self {
        Self::with_unit(value, Unit::<kind::Length>::FOOT)
    }
}

impl Quantity<kind::Weight> {
    #[inline]
    pub const fn grams(value: f64) -> Self {
        Self::with_unit(value, Unit::<kind::Weight>::GRAM)
    }

    #[inline]
    pub const fn kilograms(value: f64) -> Self {
        Self::with_unit(value, Unit::<kind::Weight>::KILOGRAM)
    }

    #[inline]
    pub const fn ounces(value: f64) -> Self {
        Self::with_unit(value, Unit::<kind::Weight>::OUNCE)
    }

    #[inline]
    pub const fn pounds(value: f64) -> Self {
        Self::with_unit(value, Unit::<kind::Weight>::POUND)
    }
}

impl Quantity<kind::Volume> {
    #[inline]
    pub const fn milliliters(value: f64) -> Self {
        Self::with_unit(value, Unit::<kind::Volume>::MILLILITER)
    }

    #[inline]
    pub const fn liters(value: f64) -> Self {
        Self::with_unit(value, Unit::<kind::Volume>::LITER)
    }

    #[inline]
    pub const fn cubic_feet(value: f64) -> Self {
        Self::with_unit(value, Unit::<kind::Volume>::CUBIC_FOOT)
    }
}

impl Quantity<kind::Density> {
    #[inline]
    pub const fn grams_per_milliliter(value: f64) -> Self {
        Self::with_unit(value, Unit::<kind::Density>::GRAM_PER_MILLILITER)
    }

    #[inline]
    pub const fn kilograms_per_cubic_meter(value: f64) -> Self {
        Self::with_unit(value, Unit::<kind::Density>::KILOGRAM_PER_CUBIC_METER)
    }

    #[inline]
    pub const fn pounds_per_cubic_foot(value: f64) -> Self {
        Self::with_unit(value, Unit::<kind::Density>::POUND_PER_CUBIC_FOOT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use approx::assert_relative_eq;

    #[test]
    fn test_inches_to_centimeters() {
        let l = Length::inches(2.0).convert_to("cm").unwrap();
        assert_eq!(l.unit().name(), "cm");
        assert_relative_eq!(l.value(), 5.08, epsilon = 1e-12);
    }

    #[test]
    fn test_pound_to_grams() {
        let w = Weight::pounds(1.0).convert_to("g").unwrap();
        assert_eq!(w.value(), 453.59237);
        assert_eq!(Weight::pounds(1.0), Weight::grams(453.59237));
    }

    #[test]
    fn test_alias_resolves_to_primary_name() {
        let w = Weight::new(2.0, "pounds").unwrap();
        assert_eq!(w.unit().name(), "lb");
        let l = Length::new(1.0, "centimetre").unwrap();
        assert_eq!(l.unit(), Unit::<kind::Length>::CENTIMETER);
    }

    #[test]
    fn test_unknown_unit_is_rejected() {
        let err = Length::new(1.0, "furlongs_per_fortnight").unwrap_err();
        assert_eq!(err, Error::UnknownUnit("furlongs_per_fortnight".into()));
    }

    #[test]
    fn test_unit_of_other_kind_is_rejected() {
        let err = Length::centimeters(1.0).convert_to("g").unwrap_err();
        assert!(matches!(
            err,
            Error::IncompatibleKind {
                expected: "length",
                found: "weight",
                ..
            }
        ));
        assert!(Density::new(1.0, "ml").is_err());
    }

    #[test]
    fn test_addition_keeps_left_unit() {
        let sum = Length::centimeters(2.54) + Length::inches(1.0);
        assert_eq!(sum.unit().name(), "cm");
        assert_relative_eq!(sum.value(), 5.08, epsilon = 1e-12);

        let diff = Length::inches(2.0) - Length::centimeters(2.54);
        assert_eq!(diff.unit().name(), "in");
        assert_relative_eq!(diff.value(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_comparison_uses_canonical_value() {
        assert!(Length::meters(1.0) > Length::centimeters(99.0));
        assert!(Weight::kilograms(1.0) < Weight::pounds(3.0));
        assert_eq!(Length::millimeters(10.0), Length::centimeters(1.0));
    }

    #[test]
    fn test_infinity_and_zero_survive_conversion() {
        let inf = Length::infinite().convert_to("in").unwrap();
        assert!(inf.is_infinite());
        assert!(inf.convert_to("mm").unwrap().is_infinite());

        let zero = Weight::zero().convert_to("lb").unwrap();
        assert!(zero.is_zero());
        assert_eq!(zero.convert_to("g").unwrap().value(), 0.0);
    }

    #[test]
    fn test_density_conversions() {
        let d = Density::kilograms_per_cubic_meter(1.0);
        assert_relative_eq!(d.convert_to("g_ml").unwrap().value(), 0.001);
        assert_relative_eq!(d.convert_to("g_l").unwrap().value(), 1.0);
        assert_relative_eq!(
            d.convert_to("lbs_ft3").unwrap().value(),
            0.062427857858281754,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_sum_and_scalar_ops() {
        let total: Weight = [Weight::grams(1.0), Weight::kilograms(0.5), Weight::grams(2.0)]
            .into_iter()
            .sum();
        assert_relative_eq!(total.canonical_value(), 503.0);
        assert_relative_eq!((Volume::liters(2.0) * 1.5).value(), 3.0);
        assert_relative_eq!((Volume::liters(2.0) / 4.0).value(), 0.5);
    }

    #[test]
    fn test_min_max_by_canonical_value() {
        let a = Length::inches(1.0);
        let b = Length::centimeters(2.0);
        assert_eq!(a.max(b).unit().name(), "in");
        assert_eq!(a.min(b).unit().name(), "cm");
    }

    #[test]
    fn test_serde_round_trip_by_unit_name() {
        let w = Weight::pounds(2.5);
        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(json, r#"{"value":2.5,"unit":"lb"}"#);
        let back: Weight = serde_json::from_str(&json).unwrap();
        assert_eq!(back.unit().name(), "lb");
        assert_eq!(back.value(), 2.5);

        let bad: std::result::Result<Weight, _> =
            serde_json::from_str(r#"{"value":1.0,"unit":"cm"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Length::centimeters(2.5)), "2.5 cm");
        assert_eq!(format!("{}", Dimension::Density), "density");
    }
}
