//! Packages: a box and the items packed in it

use super::Contents;
use crate::core_types::properties::{Properties, PropertyReaders};
use crate::core_types::units::{Density, Length, Volume, Weight};
use crate::core_types::Cost;
use crate::cuboid::{density_of, generate_id, Box, Container, Item, Payload, Solid};
use crate::error::Result;
use serde::Serialize;
use std::hash::{Hash, Hasher};
use tracing::debug;

/// A box with items and optional void fill.
///
/// The package's dimensions, properties and volume are its container's. Its
/// weight is the container's weight plus everything inside.
#[derive(Debug, Clone, Serialize)]
pub struct Package {
    id: String,
    container: Box,
    items: Contents<Item>,
    void_fill_density: Density,
    description: Option<String>,
}

impl Package {
    pub fn builder() -> PackageBuilder {
        PackageBuilder::default()
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn container(&self) -> &Box {
        &self.container
    }

    #[inline]
    pub fn items(&self) -> &Contents<Item> {
        &self.items
    }

    #[inline]
    pub fn void_fill_density(&self) -> Density {
        self.void_fill_density
    }

    #[inline]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Combined weight of the items, in grams.
    #[inline]
    pub fn items_weight(&self) -> Weight {
        self.items.weight()
    }

    /// Combined volume of the items, in milliliters.
    #[inline]
    pub fn used_volume(&self) -> Volume {
        self.items.volume()
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

    /// Outer volume of the container.
    pub fn volume(&self) -> Volume {
        self.container.volume()
    }

    /// Pack `item`. Returns `false` if an item with the same id is already in.
    pub fn add(&mut self, item: Item) -> bool {
        let item_id = item.id().to_owned();
        let inserted = self.items.insert(item);
        if inserted {
            debug!(
                "Package {}: added item {}, items weight {}, used volume {}",
                self.id,
                item_id,
                self.items.weight(),
                self.items.volume()
            );
        } else {
            debug!("Package {}: item {} already packed", self.id, item_id);
        }
        inserted
    }

    /// Unpack the item with id `item_id`, if packed.
    pub fn remove(&mut self, item_id: &str) -> Option<Item> {
        let removed = self.items.remove(item_id);
        if removed.is_some() {
            debug!(
                "Package {}: removed item {}, items weight {}, used volume {}",
                self.id,
                item_id,
                self.items.weight(),
                self.items.volume()
            );
        }
        removed
    }

    /// Container weight plus items weight plus void fill weight.
    pub fn weight(&self) -> Weight {
        self.container.weight() + self.items.weight() + self.void_fill_weight()
    }

    /// Inner volume not taken by items. May be negative when overpacked.
    pub fn remaining_volume(&self) -> Volume {
        self.container.inner_volume() - self.items.volume()
    }

    /// Weight of the filler occupying the remaining volume.
    pub fn void_fill_weight(&self) -> Weight {
        if self.container.volume().is_infinite() || self.void_fill_density.is_zero() {
            return Weight::zero();
        }
        let grams = self.void_fill_density.canonical_value() * self.remaining_volume().canonical_value();
        Weight::grams(grams)
    }

    /// Gross weight over the container's outer volume.
    pub fn density(&self) -> Density {
        density_of(self.weight(), self.container.volume())
    }

    /// Sum of item costs, only when every item has one and the total fits
    /// in a [`Cost`].
    pub fn items_value(&self) -> Option<Cost> {
        self.items.value()
    }
}

impl PropertyReaders for Package {
    fn properties(&self) -> &Properties {
        PropertyReaders::properties(&self.container)
    }
}

impl Payload for Package {
    fn payload_id(&self) -> &str {
        &self.id
    }

    fn outer_dimensions(&self) -> &[Length; 3] {
        self.container.dimensions()
    }

    fn gross_weight(&self) -> Weight {
        self.weight()
    }

    fn occupied_volume(&self) -> Volume {
        self.container.volume()
    }

    fn declared_value(&self) -> Option<Cost> {
        self.items_value()
    }
}

impl PartialEq for Package {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Package {}

impl Hash for Package {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Builder for [`Package`].
///
/// Without an explicit container a box is created from `dimensions`, `weight`
/// and `properties`.
#[derive(Debug, Clone, Default)]
pub struct PackageBuilder {
    id: Option<String>,
    container: Option<Box>,
    items: Vec<Item>,
    void_fill_density: Option<Density>,
    dimensions: Vec<Length>,
    weight: Weight,
    properties: Properties,
    description: Option<String>,
}

impl PackageBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn container(mut self, container: Box) -> Self {
        self.container = Some(container);
        self
    }

    pub fn items(mut self, items: impl IntoIterator<Item = Item>) -> Self {
        self.items.extend(items);
        self
    }

    pub fn void_fill_density(mut self, density: Density) -> Self {
        self.void_fill_density = Some(density);
        self
    }

    /// Outer dimensions of the created box.
    pub fn dimensions(mut self, dimensions: impl IntoIterator<Item = Length>) -> Self {
        self.dimensions = dimensions.into_iter().collect();
        self
    }

    /// Weight of the created box.
    pub fn weight(mut self, weight: Weight) -> Self {
        self.weight = weight;
        self
    }

    /// Properties of the created box.
    pub fn properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn build(self) -> Result<Package> {
        let container = match self.container {
            Some(container) => container,
            None => Box::builder()
                .dimensions(self.dimensions)
                .weight(self.weight)
                .properties(self.properties)
                .build()?,
        };
        Ok(Package {
            id: self.id.unwrap_or_else(generate_id),
            container,
            items: Contents::from_entries(self.items),
            void_fill_density: self
                .void_fill_density
                .unwrap_or(Density::grams_per_milliliter(0.0)),
            description: self.description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    fn cm(values: [f64; 3]) -> [Length; 3] {
        values.map(Length::centimeters)
    }

    fn item(id: &str, dims: [f64; 3], grams: f64) -> Item {
        Item::builder()
            .id(id)
            .dimensions(cm(dims))
            .weight(Weight::grams(grams))
            .build()
            .unwrap()
    }

    #[test]
    fn test_default_package() {
        let package = Package::builder().build().unwrap();
        assert!(package.container().inner_volume().is_infinite());
        assert!(package.weight().is_zero());
        assert!(package.void_fill_weight().is_zero());
        assert!(package.density().is_zero());
        assert!(package.items().is_empty());
        assert!(package.items_value().is_none());
    }

    #[test]
    fn test_remaining_volume() {
        let container = Box::builder()
            .inner_dimensions(cm([2.0, 1.0, 3.0]))
            .build()
            .unwrap();
        let package = Package::builder()
            .container(container)
            .items([item("a", [1.0, 1.0, 1.0], 0.0)])
            .build()
            .unwrap();
        assert_eq!(package.remaining_volume(), Volume::milliliters(5.0));
    }

    #[test]
    fn test_weight_includes_container_items_and_void_fill() {
        let package = Package::builder()
            .dimensions(cm([10.0, 10.0, 10.0]))
            .weight(Weight::grams(100.0))
            .void_fill_density(Density::grams_per_milliliter(0.01))
            .items([item("a", [5.0, 5.0, 4.0], 250.0)])
            .build()
            .unwrap();
        assert_eq!(package.items_weight(), Weight::grams(250.0));
        assert_eq!(package.used_volume(), Volume::milliliters(100.0));
        assert_relative_eq!(package.void_fill_weight().value(), 9.0, epsilon = 1e-9);
        assert_relative_eq!(package.weight().canonical_value(), 359.0, epsilon = 1e-9);
        assert_relative_eq!(package.density().value(), 0.359, epsilon = 1e-12);
    }

    #[test]
    fn test_add_is_idempotent_and_remove_restores() {
        let mut package = Package::builder()
            .dimensions(cm([10.0, 10.0, 10.0]))
            .build()
            .unwrap();
        assert!(package.add(item("a", [1.0, 2.0, 3.0], 5.0)));
        assert!(!package.add(item("a", [1.0, 2.0, 3.0], 5.0)));
        assert_eq!(package.items().len(), 1);
        assert_eq!(package.items_weight(), Weight::grams(5.0));

        let removed = package.remove("a").unwrap();
        assert_eq!(removed.id(), "a");
        assert!(package.items_weight().is_zero());
        assert!(package.used_volume().is_zero());
        assert!(package.remove("a").is_none());
    }

    #[test]
    fn test_duplicate_items_at_construction() {
        let package = Package::builder()
            .items([item("a", [1.0, 1.0, 1.0], 1.0), item("a", [1.0, 1.0, 1.0], 1.0)])
            .build()
            .unwrap();
        assert_eq!(package.items().len(), 1);
        assert_eq!(package.items_weight(), Weight::grams(1.0));
    }

    #[test]
    fn test_items_value_all_or_nothing() {
        let priced = |id: &str| Item::builder().id(id).cost(Cost::new(12_345)).build().unwrap();
        let mut package = Package::builder()
            .items([priced("a"), priced("b")])
            .build()
            .unwrap();
        assert_eq!(package.items_value(), Some(Cost::new(24_690)));

        package.add(Item::builder().id("c").build().unwrap());
        assert_eq!(package.items_value(), None);
    }

    #[test]
    fn test_items_value_overflow_is_undefined() {
        let priced = |id: &str, cost: i64| Item::builder().id(id).cost(Cost::new(cost)).build().unwrap();
        let mut package = Package::builder().items([priced("a", i64::MAX)]).build().unwrap();
        assert_eq!(package.items_value(), Some(Cost::new(i64::MAX)));

        package.add(priced("b", 1));
        assert_eq!(package.items_value(), None);
    }

    #[test]
    fn test_delegates_to_container() {
        let package = Package::builder()
            .dimensions(cm([1.0, 2.0, 3.0]))
            .properties(Properties::new().with("already_packaged", true))
            .description("gift")
            .build()
            .unwrap();
        assert_eq!(package.length(), Length::centimeters(1.0));
        assert_eq!(package.width(), Length::centimeters(2.0));
        assert_eq!(package.height(), Length::centimeters(3.0));
        assert_eq!(package.volume(), Volume::milliliters(6.0));
        assert_eq!(package.get_property("already_packaged?").unwrap(), &json!(true));
        assert_eq!(package.description(), Some("gift"));
    }

    #[test]
    fn test_zero_volume_container_is_infinitely_dense() {
        let package = Package::builder()
            .dimensions(cm([0.0, 2.0, 3.0]))
            .weight(Weight::grams(1.0))
            .build()
            .unwrap();
        assert!(package.density().is_infinite());
    }
}
