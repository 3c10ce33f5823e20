//! Physical Shipping Model Core Library
//!
//! Dimensioned physical objects for logistics calculations: items, boxes,
//! pallets, packages, structures and shipments, with unit-aware volume, weight
//! and density, void-fill estimation and a geometric + load fit check.
//!
//! ## Layers
//!
//! - Measured quantities (length, weight, volume, density) that carry their
//!   unit and convert through a process-wide, configurable unit table
//! - Cuboids with normalized dimensions and derived volume and density
//! - Containers (boxes, pallets) with inner space and a maximum load
//! - Aggregates (packages, structures) that keep running totals of their
//!   contents
//!
//! ```
//! use physical_core::{Box, Item, Length, Package, Weight};
//!
//! let item = Item::builder()
//!     .dimensions([Length::centimeters(2.0); 3])
//!     .weight(Weight::grams(3.0))
//!     .build()?;
//! let container = Box::builder()
//!     .dimensions([Length::centimeters(15.0), Length::centimeters(10.0), Length::centimeters(5.0)])
//!     .max_weight(Weight::grams(5.0))
//!     .build()?;
//! assert!(container.item_fits(&item));
//!
//! let mut package = Package::builder().container(container).build()?;
//! package.add(item);
//! assert_eq!(package.weight(), Weight::grams(3.0));
//! # Ok::<(), physical_core::Error>(())
//! ```

// Core types and utilities
pub mod core_types;
pub mod error;

// Physical objects
pub mod aggregate;
pub mod cuboid;
pub mod shipment;

// Re-export core types
pub use core_types::{Density, Dimension, Length, Quantity, Unit, Volume, Weight};
pub use core_types::{AddressType, Cost, Location, Properties, PropertyReaders};
pub use core_types::{UnitDefinition, UnitTable};
pub use error::{Error, Result};

// Re-export physical objects
pub use aggregate::{Contents, Package, PackageBuilder, Structure, StructureBuilder};
pub use cuboid::{Box, BoxBuilder, Container, Cuboid, Item, ItemBuilder, Pallet, PalletBuilder};
pub use cuboid::{Payload, Solid};
pub use shipment::{Shipment, ShipmentBuilder};
