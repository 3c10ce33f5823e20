//! Core types and utilities

pub mod cost;
pub mod location;
pub mod properties;
pub mod unit_table;
pub mod units;

pub use cost::Cost;
pub use location::{AddressType, Location};
pub use properties::{Properties, PropertyReaders};
pub use unit_table::{UnitDefinition, UnitTable};
pub use units::*;
