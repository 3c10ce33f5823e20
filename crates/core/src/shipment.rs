//! Shipments: what travels together from an origin to a destination

use crate::aggregate::{Package, Structure};
use crate::core_types::Location;
use crate::cuboid::{generate_id, Pallet};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

/// A flat grouping of structures and loose packages.
#[derive(Debug, Clone, Serialize)]
pub struct Shipment {
    id: String,
    origin: Option<Location>,
    destination: Option<Location>,
    service_code: Option<String>,
    structures: Vec<Structure>,
    packages: Vec<Package>,
    options: Map<String, Value>,
    pallets: Vec<Pallet>,
}

impl Shipment {
    pub fn builder() -> ShipmentBuilder {
        ShipmentBuilder::default()
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn origin(&self) -> Option<&Location> {
        self.origin.as_ref()
    }

    pub fn destination(&self) -> Option<&Location> {
        self.destination.as_ref()
    }

    /// Carrier service code, e.g. `usps_priority_mail`.
    pub fn service_code(&self) -> Option<&str> {
        self.service_code.as_deref()
    }

    pub fn structures(&self) -> &[Structure] {
        &self.structures
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// Free-form carrier options.
    pub fn options(&self) -> &Map<String, Value> {
        &self.options
    }

    #[deprecated(note = "use `structures` instead")]
    pub fn pallets(&self) -> &[Pallet] {
        &self.pallets
    }
}

/// Builder for [`Shipment`].
#[derive(Debug, Clone, Default)]
pub struct ShipmentBuilder {
    id: Option<String>,
    origin: Option<Location>,
    destination: Option<Location>,
    service_code: Option<String>,
    structures: Vec<Structure>,
    packages: Vec<Package>,
    options: Map<String, Value>,
    pallets: Vec<Pallet>,
}

impl ShipmentBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn origin(mut self, origin: Location) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn destination(mut self, destination: Location) -> Self {
        self.destination = Some(destination);
        self
    }

    pub fn service_code(mut self, service_code: impl Into<String>) -> Self {
        self.service_code = Some(service_code.into());
        self
    }

    pub fn structures(mut self, structures: impl IntoIterator<Item = Structure>) -> Self {
        self.structures.extend(structures);
        self
    }

    pub fn packages(mut self, packages: impl IntoIterator<Item = Package>) -> Self {
        self.packages.extend(packages);
        self
    }

    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    #[deprecated(note = "use `structures` instead")]
    pub fn pallets(mut self, pallets: impl IntoIterator<Item = Pallet>) -> Self {
        self.pallets.extend(pallets);
        self
    }

    pub fn build(self) -> Shipment {
        if !self.pallets.is_empty() {
            warn!("Shipment `pallets` is deprecated, use `structures` instead");
        }
        Shipment {
            id: self.id.unwrap_or_else(generate_id),
            origin: self.origin,
            destination: self.destination,
            service_code: self.service_code,
            structures: self.structures,
            packages: self.packages,
            options: self.options,
            pallets: self.pallets,
        }
    }
}
