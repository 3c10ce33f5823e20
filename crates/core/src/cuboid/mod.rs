//! Box-shaped physical objects
//!
//! Every object in the model is a [`Cuboid`] at heart: an identity, exactly
//! three dimensions, an own weight and a property bag. Volume and density are
//! derived, never stored.
//!
//! # Zero and infinity
//!
//! Unspecified container dimensions are infinite (unbounded) and unspecified
//! item dimensions are zero. The derivation rules keep both sentinels out of
//! `0 * inf` territory:
//!
//! - any zero dimension gives a zero volume, even next to an infinite one
//! - otherwise any infinite dimension gives an infinite volume
//! - zero volume has infinite density, infinite volume has zero density

pub mod container;
pub mod item;

pub use container::{Box, BoxBuilder, Container, Pallet, PalletBuilder};
pub use item::{Item, ItemBuilder};

use crate::core_types::properties::Properties;
use crate::core_types::units::{f64_total_cmp, Density, Length, Volume, Weight};
use crate::core_types::Cost;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fresh random identity for objects created without one.
pub(crate) fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Pad supplied dimensions to exactly three, using `default` for missing slots.
///
/// ```
/// use physical_core::cuboid::fill_dimensions;
/// use physical_core::core_types::Length;
///
/// let dims = fill_dimensions(&[Length::centimeters(2.0)], Length::centimeters(0.0)).unwrap();
/// assert_eq!(dims[0], Length::centimeters(2.0));
/// assert!(dims[1].is_zero() && dims[2].is_zero());
/// ```
pub fn fill_dimensions(supplied: &[Length], default: Length) -> Result<[Length; 3]> {
    fill_dimensions_from(supplied, &[default; 3])
}

/// Pad supplied dimensions per axis from `defaults`.
pub fn fill_dimensions_from(supplied: &[Length], defaults: &[Length; 3]) -> Result<[Length; 3]> {
    if supplied.len() > 3 {
        return Err(Error::MalformedDimensions(supplied.len()));
    }
    Ok(std::array::from_fn(|axis| {
        supplied.get(axis).copied().unwrap_or(defaults[axis])
    }))
}

/// Volume enclosed by three dimensions, in milliliters.
pub fn volume_of(dimensions: &[Length; 3]) -> Volume {
    let cm = dimensions.map(Length::canonical_value);
    if cm.iter().any(|d| *d == 0.0) {
        return Volume::milliliters(0.0);
    }
    Volume::milliliters(cm.iter().product())
}

/// Density of `weight` spread over `volume`, in grams per milliliter.
pub fn density_of(weight: Weight, volume: Volume) -> Density {
    if volume.is_zero() {
        return Density::grams_per_milliliter(f64::INFINITY);
    }
    if volume.is_infinite() {
        return Density::grams_per_milliliter(0.0);
    }
    Density::grams_per_milliliter(weight.canonical_value() / volume.canonical_value())
}

/// Dimensions ordered smallest to largest by canonical value.
pub(crate) fn sorted_axes(dimensions: &[Length; 3]) -> [f64; 3] {
    let mut axes = dimensions.map(Length::canonical_value);
    axes.sort_by(|a, b| f64_total_cmp(*a, *b));
    axes
}

/// Shared cuboid state: identity, dimensions, own weight and properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cuboid {
    id: String,
    dimensions: [Length; 3],
    weight: Weight,
    #[serde(default)]
    properties: Properties,
}

impl Cuboid {
    /// Build a cuboid, padding missing dimensions with `default_length`.
    pub fn new(
        id: Option<String>,
        dimensions: &[Length],
        default_length: Length,
        weight: Weight,
        properties: Properties,
    ) -> Result<Self> {
        Ok(Cuboid {
            id: id.unwrap_or_else(generate_id),
            dimensions: fill_dimensions(dimensions, default_length)?,
            weight,
            properties,
        })
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn dimensions(&self) -> &[Length; 3] {
        &self.dimensions
    }

    #[inline]
    pub fn weight(&self) -> Weight {
        self.weight
    }

    #[inline]
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn volume(&self) -> Volume {
        volume_of(&self.dimensions)
    }

    pub fn density(&self) -> Density {
        density_of(self.weight, self.volume())
    }
}

/// Read access to the cuboid behind an item, box or pallet.
pub trait Solid {
    fn cuboid(&self) -> &Cuboid;

    fn id(&self) -> &str {
        self.cuboid().id()
    }

    fn dimensions(&self) -> &[Length; 3] {
        self.cuboid().dimensions()
    }

    fn length(&self) -> Length {
        self.dimensions()[0]
    }

    fn width(&self) -> Length {
        self.dimensions()[1]
    }

    fn height(&self) -> Length {
        self.dimensions()[2]
    }

    /// Weight of the object itself, excluding anything inside it.
    fn weight(&self) -> Weight {
        self.cuboid().weight()
    }

    fn volume(&self) -> Volume {
        self.cuboid().volume()
    }

    fn density(&self) -> Density {
        self.cuboid().density()
    }
}

/// Anything that can be placed in a container and counted in its contents.
pub trait Payload {
    fn payload_id(&self) -> &str;

    /// Outer dimensions checked against the container's inner space.
    fn outer_dimensions(&self) -> &[Length; 3];

    /// Total weight including whatever the payload itself holds.
    fn gross_weight(&self) -> Weight;

    /// Volume the payload occupies.
    fn occupied_volume(&self) -> Volume;

    /// Declared value, if any.
    fn declared_value(&self) -> Option<Cost>;
}
