//! Containers: boxes hold items, pallets hold packages
//!
//! A container has an inner usable space and a maximum load. Unspecified
//! dimensions and an unspecified load are unbounded.
//!
//! # Fit check
//!
//! A candidate fits when its weight does not exceed the maximum load and,
//! after sorting both sets of dimensions smallest to largest, every candidate
//! axis is strictly shorter than the container axis at the same rank. The
//! candidate may be rotated freely, and an axis exactly as long as the space
//! does not fit.

use super::{fill_dimensions_from, sorted_axes, volume_of, Cuboid, Item, Payload, Solid};
use crate::aggregate::Package;
use crate::core_types::properties::{Properties, PropertyReaders};
use crate::core_types::units::{Length, Volume, Weight};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Whether `candidate` fits in `inner` space with at most `max_weight` load.
pub fn fits_within<P: Payload + ?Sized>(inner: &[Length; 3], max_weight: Weight, candidate: &P) -> bool {
    if candidate.gross_weight() > max_weight {
        return false;
    }
    let space = sorted_axes(inner);
    let axes = sorted_axes(candidate.outer_dimensions());
    axes.iter().zip(space.iter()).all(|(axis, limit)| axis < limit)
}

/// A cuboid with inner space and a load limit.
pub trait Container: Solid {
    fn inner_dimensions(&self) -> &[Length; 3];

    fn max_weight(&self) -> Weight;

    fn inner_length(&self) -> Length {
        self.inner_dimensions()[0]
    }

    fn inner_width(&self) -> Length {
        self.inner_dimensions()[1]
    }

    fn inner_height(&self) -> Length {
        self.inner_dimensions()[2]
    }

    fn inner_volume(&self) -> Volume {
        volume_of(self.inner_dimensions())
    }

    /// Geometric and load check, see the module docs.
    fn fits<P: Payload + ?Sized>(&self, candidate: &P) -> bool {
        fits_within(self.inner_dimensions(), self.max_weight(), candidate)
    }
}

macro_rules! identity_eq {
    ($ty:ty) => {
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.cuboid.id() == other.cuboid.id()
            }
        }

        impl Eq for $ty {}

        impl Hash for $ty {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.cuboid.id().hash(state);
            }
        }

        impl PropertyReaders for $ty {
            fn properties(&self) -> &Properties {
                self.cuboid.properties()
            }
        }

        impl Solid for $ty {
            fn cuboid(&self) -> &Cuboid {
                &self.cuboid
            }
        }
    };
}

// ============================================================================
// BOX
// ============================================================================

/// A box that items are packed into.
///
/// Inner dimensions default per axis to the outer dimension on that axis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Box {
    #[serde(flatten)]
    cuboid: Cuboid,
    inner_dimensions: [Length; 3],
    max_weight: Weight,
}

impl Box {
    pub const DEFAULT_LENGTH: Length = Length::centimeters(f64::INFINITY);
    pub const DEFAULT_MAX_WEIGHT: Weight = Weight::grams(f64::INFINITY);

    pub fn builder() -> BoxBuilder {
        BoxBuilder::default()
    }

    /// Whether `item` can be packed in this box.
    pub fn item_fits(&self, item: &Item) -> bool {
        self.fits(item)
    }
}

impl Default for Box {
    /// Unbounded box with no weight.
    fn default() -> Self {
        Box {
            cuboid: Cuboid {
                id: super::generate_id(),
                dimensions: [Self::DEFAULT_LENGTH; 3],
                weight: Weight::zero(),
                properties: Properties::new(),
            },
            inner_dimensions: [Self::DEFAULT_LENGTH; 3],
            max_weight: Self::DEFAULT_MAX_WEIGHT,
        }
    }
}

impl Container for Box {
    fn inner_dimensions(&self) -> &[Length; 3] {
        &self.inner_dimensions
    }

    fn max_weight(&self) -> Weight {
        self.max_weight
    }
}

identity_eq!(Box);

/// Builder for [`Box`].
#[derive(Debug, Clone, Default)]
pub struct BoxBuilder {
    id: Option<String>,
    dimensions: Vec<Length>,
    inner_dimensions: Vec<Length>,
    weight: Weight,
    max_weight: Option<Weight>,
    properties: Properties,
}

impl BoxBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Up to three outer dimensions.
    pub fn dimensions(mut self, dimensions: impl IntoIterator<Item = Length>) -> Self {
        self.dimensions = dimensions.into_iter().collect();
        self
    }

    /// Up to three inner dimensions; missing axes follow the outer ones.
    pub fn inner_dimensions(mut self, dimensions: impl IntoIterator<Item = Length>) -> Self {
        self.inner_dimensions = dimensions.into_iter().collect();
        self
    }

    pub fn weight(mut self, weight: Weight) -> Self {
        self.weight = weight;
        self
    }

    pub fn max_weight(mut self, max_weight: Weight) -> Self {
        self.max_weight = Some(max_weight);
        self
    }

    pub fn properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    pub fn build(self) -> Result<Box> {
        let cuboid = Cuboid::new(
            self.id,
            &self.dimensions,
            Box::DEFAULT_LENGTH,
            self.weight,
            self.properties,
        )?;
        let inner_dimensions = fill_dimensions_from(&self.inner_dimensions, cuboid.dimensions())?;
        Ok(Box {
            cuboid,
            inner_dimensions,
            max_weight: self.max_weight.unwrap_or(Box::DEFAULT_MAX_WEIGHT),
        })
    }
}

// ============================================================================
// PALLET
// ============================================================================

/// A pallet that packages are stacked on. Its inner space is its outer space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pallet {
    #[serde(flatten)]
    cuboid: Cuboid,
    max_weight: Weight,
}

impl Pallet {
    pub const DEFAULT_LENGTH: Length = Length::centimeters(f64::INFINITY);
    pub const DEFAULT_MAX_WEIGHT: Weight = Weight::grams(f64::INFINITY);

    pub fn builder() -> PalletBuilder {
        PalletBuilder::default()
    }

    /// Whether `package` can be loaded onto this pallet.
    pub fn package_fits(&self, package: &Package) -> bool {
        self.fits(package)
    }
}

impl Container for Pallet {
    fn inner_dimensions(&self) -> &[Length; 3] {
        self.cuboid.dimensions()
    }

    fn max_weight(&self) -> Weight {
        self.max_weight
    }
}

identity_eq!(Pallet);

/// Builder for [`Pallet`].
#[derive(Debug, Clone, Default)]
pub struct PalletBuilder {
    id: Option<String>,
    dimensions: Vec<Length>,
    weight: Weight,
    max_weight: Option<Weight>,
    properties: Properties,
}

impl PalletBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn dimensions(mut self, dimensions: impl IntoIterator<Item = Length>) -> Self {
        self.dimensions = dimensions.into_iter().collect();
        self
    }

    pub fn weight(mut self, weight: Weight) -> Self {
        self.weight = weight;
        self
    }

    pub fn max_weight(mut self, max_weight: Weight) -> Self {
        self.max_weight = Some(max_weight);
        self
    }

    pub fn properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    pub fn build(self) -> Result<Pallet> {
        Ok(Pallet {
            cuboid: Cuboid::new(
                self.id,
                &self.dimensions,
                Pallet::DEFAULT_LENGTH,
                self.weight,
                self.properties,
            )?,
            max_weight: self.max_weight.unwrap_or(Pallet::DEFAULT_MAX_WEIGHT),
        })
    }
}
