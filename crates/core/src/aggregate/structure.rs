//! Structures: a pallet (or skid) loaded with packages

use super::{Contents, Package};
use crate::core_types::properties::{Properties, PropertyReaders};
use crate::core_types::units::{Density, Length, Volume, Weight};
use crate::core_types::Cost;
use crate::cuboid::{density_of, generate_id, Container, Pallet, Solid};
use crate::error::Result;
use serde::Serialize;
use std::hash::{Hash, Hasher};
use tracing::debug;

/// A pallet with packages on it.
///
/// Packages are owned by the structure, so their weights cannot change behind
/// its running totals.
#[derive(Debug, Clone, Serialize)]
pub struct Structure {
    id: String,
    container: Pallet,
    packages: Contents<Package>,
    void_fill_density: Density,
}

impl Structure {
    pub fn builder() -> StructureBuilder {
        StructureBuilder::default()
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn container(&self) -> &Pallet {
        &self.container
    }

    #[inline]
    pub fn packages(&self) -> &Contents<Package> {
        &self.packages
    }

    #[inline]
    pub fn void_fill_density(&self) -> Density {
        self.void_fill_density
    }

    /// Combined gross weight of the packages, in grams.
    #[inline]
    pub fn packages_weight(&self) -> Weight {
        self.packages.weight()
    }

    /// Combined outer volume of the packages, in milliliters.
    #[inline]
    pub fn used_volume(&self) -> Volume {
        self.packages.volume()
    }

    pub fn dimensions(&self) -> &[Length; 3] {
        self.container.dimensions()
    }

    pub fn length(&self) -> Length {
        self.container.length()
    }

    pub fn width(&self) -> Length {
        self.container.width()
    }

    pub fn height(&self) -> Length {
        self.container.height()
    }

    pub fn volume(&self) -> Volume {
        self.container.volume()
    }

    /// Load `package`. Returns `false` if a package with the same id is already on.
    pub fn add(&mut self, package: Package) -> bool {
        let package_id = package.id().to_owned();
        let inserted = self.packages.insert(package);
        if inserted {
            debug!(
                "Structure {}: added package {}, packages weight {}, used volume {}",
                self.id,
                package_id,
                self.packages.weight(),
                self.packages.volume()
            );
        } else {
            debug!("Structure {}: package {} already loaded", self.id, package_id);
        }
        inserted
    }

    /// Unload the package with id `package_id`, if loaded.
    pub fn remove(&mut self, package_id: &str) -> Option<Package> {
        let removed = self.packages.remove(package_id);
        if removed.is_some() {
            debug!(
                "Structure {}: removed package {}, packages weight {}, used volume {}",
                self.id,
                package_id,
                self.packages.weight(),
                self.packages.volume()
            );
        }
        removed
    }

    /// Pallet weight plus packages weight plus void fill weight.
    pub fn weight(&self) -> Weight {
        self.container.weight() + self.packages.weight() + self.void_fill_weight()
    }

    /// Pallet volume not taken by packages. Not clamped, and undefined (NaN)
    /// when both the pallet and a package are unbounded.
    pub fn remaining_volume(&self) -> Volume {
        self.container.inner_volume() - self.packages.volume()
    }

    pub fn void_fill_weight(&self) -> Weight {
        if self.container.volume().is_infinite() || self.void_fill_density.is_zero() {
            return Weight::zero();
        }
        let grams = self.void_fill_density.canonical_value() * self.remaining_volume().canonical_value();
        Weight::grams(grams)
    }

    pub fn density(&self) -> Density {
        density_of(self.weight(), self.container.volume())
    }

    /// Sum of every package's items value, only when every package has one.
    pub fn packages_value(&self) -> Option<Cost> {
        self.packages.value()
    }
}

impl PropertyReaders for Structure {
    fn properties(&self) -> &Properties {
        PropertyReaders::properties(&self.container)
    }
}

impl PartialEq for Structure {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Structure {}

impl Hash for Structure {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Builder for [`Structure`].
///
/// Without an explicit container a pallet is created from `dimensions`,
/// `weight` and `properties`.
#[derive(Debug, Clone, Default)]
pub struct StructureBuilder {
    id: Option<String>,
    container: Option<Pallet>,
    packages: Vec<Package>,
    void_fill_density: Option<Density>,
    dimensions: Vec<Length>,
    weight: Weight,
    properties: Properties,
}

impl StructureBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn container(mut self, container: Pallet) -> Self {
        self.container = Some(container);
        self
    }

    pub fn packages(mut self, packages: impl IntoIterator<Item = Package>) -> Self {
        self.packages.extend(packages);
        self
    }

    pub fn void_fill_density(mut self, density: Density) -> Self {
        self.void_fill_density = Some(density);
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

    pub fn properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    pub fn build(self) -> Result<Structure> {
        let container = match self.container {
            Some(container) => container,
            None => Pallet::builder()
                .dimensions(self.dimensions)
                .weight(self.weight)
                .properties(self.properties)
                .build()?,
        };
        Ok(Structure {
            id: self.id.unwrap_or_else(generate_id),
            container,
            packages: Contents::from_entries(self.packages),
            void_fill_density: self
                .void_fill_density
                .unwrap_or(Density::grams_per_milliliter(0.0)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cuboid::{Box, Item};
    use approx::assert_relative_eq;
    use serde_json::json;

    fn package(id: &str, lb: f64, cost: Option<i64>) -> Package {
        let mut item = Item::builder().weight(Weight::pounds(lb));
        if let Some(cost) = cost {
            item = item.cost(Cost::new(cost));
        }
        Package::builder()
            .id(id)
            .dimensions([Length::centimeters(10.0); 3])
            .items([item.build().unwrap()])
            .build()
            .unwrap()
    }

    #[test]
    fn test_default_structure() {
        let structure = Structure::builder().build().unwrap();
        assert!(structure.container().inner_volume().is_infinite());
        assert!(structure.weight().is_zero());
        assert!(structure.density().is_zero());
        assert!(structure.packages_value().is_none());
    }

    #[test]
    fn test_weight_is_pallet_plus_packages() {
        let structure = Structure::builder()
            .weight(Weight::pounds(50.0))
            .packages([package("a", 10.0, None), package("b", 5.0, None)])
            .build()
            .unwrap();
        assert_relative_eq!(structure.packages_weight().canonical_value(), 15.0 * 453.59237, max_relative = 1e-12);
        assert_relative_eq!(
            structure.weight().convert_to("lb").unwrap().value(),
            65.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_used_volume_counts_package_boxes() {
        let mut structure = Structure::builder()
            .dimensions([Length::centimeters(100.0); 3])
            .build()
            .unwrap();
        structure.add(package("a", 1.0, None));
        assert_eq!(structure.used_volume(), Volume::milliliters(1000.0));
        assert_eq!(structure.remaining_volume(), Volume::milliliters(999_000.0));
        assert!(!structure.add(package("a", 1.0, None)));
        assert_eq!(structure.packages().len(), 1);

        assert!(structure.remove("a").is_some());
        assert!(structure.used_volume().is_zero());
        assert!(structure.packages_weight().is_zero());
    }

    #[test]
    fn test_packages_value_all_or_nothing() {
        let structure = Structure::builder()
            .packages([package("a", 1.0, Some(100)), package("b", 1.0, Some(50))])
            .build()
            .unwrap();
        assert_eq!(structure.packages_value(), Some(Cost::new(150)));

        let structure = Structure::builder()
            .packages([package("a", 1.0, Some(100)), package("b", 1.0, None)])
            .build()
            .unwrap();
        assert_eq!(structure.packages_value(), None);
    }

    #[test]
    fn test_properties_land_on_created_pallet() {
        let structure = Structure::builder()
            .properties(Properties::new().with("stackable", true))
            .build()
            .unwrap();
        assert_eq!(structure.get_property("stackable?").unwrap(), &json!(true));
        assert!(structure.container().has_property("stackable"));
    }

    #[test]
    fn test_structure_identity_is_by_id() {
        let loaded = Structure::builder()
            .id("s-1")
            .packages([package("a", 1.0, None)])
            .build()
            .unwrap();
        let empty = Structure::builder().id("s-1").build().unwrap();
        let other = Structure::builder().id("s-2").build().unwrap();
        assert_eq!(loaded, empty);
        assert_ne!(loaded, other);

        let set: rustc_hash::FxHashSet<_> = [loaded, empty, other].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_pallet_fits_package() {
        let pallet = Pallet::builder()
            .dimensions([Length::centimeters(50.0); 3])
            .max_weight(Weight::pounds(20.0))
            .build()
            .unwrap();
        assert!(pallet.package_fits(&package("a", 10.0, None)));
        assert!(!pallet.package_fits(&package("b", 25.0, None)));

        let unbounded = Package::builder().container(Box::builder().build().unwrap()).build().unwrap();
        assert!(!pallet.package_fits(&unbounded));
    }

    #[test]
    fn test_void_fill_on_bounded_pallet() {
        let structure = Structure::builder()
            .dimensions([Length::centimeters(100.0); 3])
            .void_fill_density(Density::grams_per_milliliter(0.001))
            .packages([package("a", 0.0, None)])
            .build()
            .unwrap();
        assert_relative_eq!(structure.void_fill_weight().value(), 999.0, epsilon = 1e-9);
    }
}
