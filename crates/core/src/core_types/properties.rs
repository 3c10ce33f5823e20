//! Free-form properties attached to physical objects
//!
//! Properties are an ordered string-keyed map of JSON values. Every key can be
//! read by its bare name or by its predicate form (`name?`), which returns the
//! identical stored value. Looking up a missing key is an error, never a
//! default.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordered mapping from property name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties(Map<String, Value>);

/// Strip the predicate marker from an accessor name.
#[inline]
fn normalize(name: &str) -> &str {
    name.strip_suffix('?').unwrap_or(name)
}

impl Properties {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Look up `name` or its predicate form `name?`.
    pub fn get(&self, name: &str) -> Result<&Value> {
        self.0
            .get(normalize(name))
            .ok_or_else(|| Error::UnknownProperty(name.to_owned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(normalize(name))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.0.iter()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Properties {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<'a> IntoIterator for &'a Properties {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Accessor-style reads over an object's [`Properties`].
pub trait PropertyReaders {
    fn properties(&self) -> &Properties;

    /// Value stored under `name` (a trailing `?` is ignored).
    fn get_property(&self, name: &str) -> Result<&Value> {
        self.properties().get(name)
    }

    fn has_property(&self, name: &str) -> bool {
        self.properties().contains(name)
    }
}
