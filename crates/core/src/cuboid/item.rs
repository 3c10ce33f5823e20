//! Items: the things that get packed

use super::{Cuboid, Payload, Solid};
use crate::core_types::properties::{Properties, PropertyReaders};
use crate::core_types::units::{Length, Volume, Weight};
use crate::core_types::Cost;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A packable object. Unspecified dimensions are zero.
///
/// Items compare and hash by identity only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    #[serde(flatten)]
    cuboid: Cuboid,
    cost: Option<Cost>,
    sku: Option<String>,
    description: Option<String>,
}

impl Item {
    /// Dimension used for unspecified axes.
    pub const DEFAULT_LENGTH: Length = Length::centimeters(0.0);

    pub fn builder() -> ItemBuilder {
        ItemBuilder::default()
    }

    #[inline]
    pub fn cost(&self) -> Option<Cost> {
        self.cost
    }

    #[inline]
    pub fn sku(&self) -> Option<&str> {
        self.sku.as_deref()
    }

    #[inline]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl Solid for Item {
    fn cuboid(&self) -> &Cuboid {
        &self.cuboid
    }
}

impl PropertyReaders for Item {
    fn properties(&self) -> &Properties {
        self.cuboid.properties()
    }
}

impl Payload for Item {
    fn payload_id(&self) -> &str {
        self.cuboid.id()
    }

    fn outer_dimensions(&self) -> &[Length; 3] {
        self.cuboid.dimensions()
    }

    fn gross_weight(&self) -> Weight {
        self.cuboid.weight()
    }

    fn occupied_volume(&self) -> Volume {
        self.cuboid.volume()
    }

    fn declared_value(&self) -> Option<Cost> {
        self.cost
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.cuboid.id() == other.cuboid.id()
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cuboid.id().hash(state);
    }
}

/// Builder for [`Item`].
#[derive(Debug, Clone, Default)]
pub struct ItemBuilder {
    id: Option<String>,
    dimensions: Vec<Length>,
    weight: Weight,
    properties: Properties,
    cost: Option<Cost>,
    sku: Option<String>,
    description: Option<String>,
}

impl ItemBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Up to three dimensions, in length-width-height order.
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

    pub fn cost(mut self, cost: Cost) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn build(self) -> Result<Item> {
        Ok(Item {
            cuboid: Cuboid::new(
                self.id,
                &self.dimensions,
                Item::DEFAULT_LENGTH,
                self.weight,
                self.properties,
            )?,
            cost: self.cost,
            sku: self.sku,
            description: self.description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_item_is_empty() {
        let item = Item::builder().build().unwrap();
        assert!(item.dimensions().iter().all(|d| d.is_zero()));
        assert!(item.weight().is_zero());
        assert!(item.volume().is_zero());
        assert!(item.density().is_infinite());
        assert!(item.cost().is_none());
        assert!(item.sku().is_none());
    }

    #[test]
    fn test_item_with_partial_dimensions() {
        let item = Item::builder()
            .dimensions([Length::centimeters(1.0), Length::centimeters(2.0)])
            .build()
            .unwrap();
        assert_eq!(item.length(), Length::centimeters(1.0));
        assert_eq!(item.width(), Length::centimeters(2.0));
        assert!(item.height().is_zero());
        assert!(item.volume().is_zero());
    }

    #[test]
    fn test_item_density_in_inches_and_pounds() {
        let item = Item::builder()
            .dimensions([Length::inches(1.1), Length::inches(2.1), Length::inches(3.2)])
            .weight(Weight::pounds(1.0))
            .build()
            .unwrap();
        assert_eq!(item.density().unit().name(), "g_ml");
        assert_relative_eq!(item.density().value(), 3.7445758536530196, max_relative = 1e-12);
    }

    #[test]
    fn test_item_attributes() {
        let item = Item::builder()
            .id("widget-1")
            .cost(Cost::new(12_345))
            .sku("W-1")
            .description("A widget")
            .properties(Properties::new().with("fragile", true))
            .build()
            .unwrap();
        assert_eq!(item.id(), "widget-1");
        assert_eq!(item.cost(), Some(Cost::new(12_345)));
        assert_eq!(item.sku(), Some("W-1"));
        assert_eq!(item.description(), Some("A widget"));
        assert!(item.has_property("fragile?"));
    }

    #[test]
    fn test_items_compare_by_id() {
        let a = Item::builder().id("same").weight(Weight::grams(1.0)).build().unwrap();
        let b = Item::builder().id("same").weight(Weight::grams(2.0)).build().unwrap();
        let c = Item::builder().id("other").weight(Weight::grams(1.0)).build().unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_too_many_dimensions() {
        let err = Item::builder()
            .dimensions([Length::centimeters(1.0); 4])
            .build()
            .unwrap_err();
        assert_eq!(err, Error::MalformedDimensions(4));
    }
}
