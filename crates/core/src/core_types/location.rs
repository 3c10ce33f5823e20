//! Postal locations used as shipment origins and destinations
//!
//! A location is plain address data. Country and region are kept as the
//! upper-cased codes they were given with; nothing is validated against a
//! country database.

use super::properties::{Properties, PropertyReaders};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// Kind of address a location refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressType {
    Residential,
    Commercial,
    PoBox,
}

impl AddressType {
    pub const fn as_str(self) -> &'static str {
        match self {
            AddressType::Residential => "residential",
            AddressType::Commercial => "commercial",
            AddressType::PoBox => "po_box",
        }
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A physical address.
///
/// Two locations are equal when their [`Location::to_hash`] representations
/// match; coordinates and properties do not take part.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Location {
    pub name: Option<String>,
    pub company_name: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub address3: Option<String>,
    pub city: Option<String>,
    /// State or province code
    pub region: Option<String>,
    /// Postal code
    pub zip: Option<String>,
    /// Country code
    pub country: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub email: Option<String>,
    pub address_type: Option<AddressType>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub properties: Properties,
}

impl Location {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the country code (stored upper-cased).
    pub fn with_country(mut self, code: &str) -> Self {
        self.country = Some(code.to_uppercase());
        self
    }

    /// Set the region code (stored upper-cased).
    pub fn with_region(mut self, code: &str) -> Self {
        self.region = Some(code.to_uppercase());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_company_name(mut self, company_name: impl Into<String>) -> Self {
        self.company_name = Some(company_name.into());
        self
    }

    /// Set the street lines; `None` leaves a line empty.
    pub fn with_address_lines(
        mut self,
        address1: Option<&str>,
        address2: Option<&str>,
        address3: Option<&str>,
    ) -> Self {
        self.address1 = address1.map(str::to_owned);
        self.address2 = address2.map(str::to_owned);
        self.address3 = address3.map(str::to_owned);
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_zip(mut self, zip: impl Into<String>) -> Self {
        self.zip = Some(zip.into());
        self
    }

    pub fn with_contact(
        mut self,
        phone: Option<&str>,
        fax: Option<&str>,
        email: Option<&str>,
    ) -> Self {
        self.phone = phone.map(str::to_owned);
        self.fax = fax.map(str::to_owned);
        self.email = email.map(str::to_owned);
        self
    }

    pub fn with_address_type(mut self, address_type: AddressType) -> Self {
        self.address_type = Some(address_type);
        self
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    #[inline]
    pub fn is_residential(&self) -> bool {
        self.address_type == Some(AddressType::Residential)
    }

    #[inline]
    pub fn is_commercial(&self) -> bool {
        self.address_type == Some(AddressType::Commercial)
    }

    #[inline]
    pub fn is_po_box(&self) -> bool {
        self.address_type == Some(AddressType::PoBox)
    }

    /// Address fields as a JSON object. Missing fields are `null`.
    pub fn to_hash(&self) -> Value {
        json!({
            "country": self.country.as_deref().map(str::to_uppercase),
            "postal_code": self.zip,
            "region": self.region.as_deref().map(str::to_uppercase),
            "city": self.city,
            "name": self.name,
            "address1": self.address1,
            "address2": self.address2,
            "address3": self.address3,
            "phone": self.phone,
            "fax": self.fax,
            "email": self.email,
            "address_type": self.address_type.map(AddressType::as_str),
            "company_name": self.company_name,
        })
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.to_hash() == other.to_hash()
    }
}

impl PropertyReaders for Location {
    fn properties(&self) -> &Properties {
        &self.properties
    }
}
