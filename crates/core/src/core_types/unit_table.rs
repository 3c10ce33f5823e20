//! Unit conversion table
//!
//! Every unit name and alias maps to a kind and a factor to that kind's
//! canonical unit. The built-in table covers metric and imperial lengths,
//! weights and volumes plus the common shipping densities (including the
//! pound-per-cubic-foot unit used for freight classes). A table can be
//! extended at runtime with [`register`], replaced wholesale with
//! [`UnitTable::install`], and read from or written to JSON.
//!
//! The installed table is process-wide. Built-ins are installed lazily the
//! first time any unit is resolved.

use crate::core_types::units::{Dimension, FIXED_UNITS};
use crate::error::{Error, Result};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use std::sync::{LazyLock, Mutex, PoisonError, RwLock};
use tracing::{debug, info};

type BuiltinUnit = (&'static str, Dimension, f64, &'static [&'static str]);

const BUILTIN_UNITS: &[BuiltinUnit] = &[
    // Length, canonical cm
    ("mm", Dimension::Length, 0.1, &["millimeter", "millimetre", "millimeters", "millimetres"]),
    ("cm", Dimension::Length, 1.0, &["centimeter", "centimetre", "centimeters", "centimetres"]),
    ("m", Dimension::Length, 100.0, &["meter", "metre", "meters", "metres"]),
    ("km", Dimension::Length, 100_000.0, &["kilometer", "kilometre", "kilometers", "kilometres"]),
    ("in", Dimension::Length, 2.54, &["inch", "inches"]),
    ("ft", Dimension::Length, 30.48, &["foot", "feet"]),
    ("yd", Dimension::Length, 91.44, &["yard", "yards"]),
    ("mi", Dimension::Length, 160_934.4, &["mile", "miles"]),
    // Weight, canonical g
    ("mg", Dimension::Weight, 0.001, &["milligram", "milligrams", "milligramme", "milligrammes"]),
    ("g", Dimension::Weight, 1.0, &["gram", "grams", "gramme", "grammes"]),
    ("kg", Dimension::Weight, 1000.0, &["kilogram", "kilograms", "kilogramme", "kilogrammes"]),
    ("t", Dimension::Weight, 1_000_000.0, &["metric_ton", "metric_tons", "tonne", "tonnes"]),
    ("oz", Dimension::Weight, 28.349523125, &["ounce", "ounces"]),
    ("lb", Dimension::Weight, 453.59237, &["lbs", "pound", "pounds"]),
    // Volume, canonical ml
    (
        "ml",
        Dimension::Volume,
        1.0,
        &[
            "milliliter",
            "millilitre",
            "milliliters",
            "millilitres",
            "cm3",
            "cubic_centimeter",
            "cubic_centimetre",
        ],
    ),
    ("l", Dimension::Volume, 1000.0, &["liter", "litre", "liters", "litres"]),
    ("m3", Dimension::Volume, 1_000_000.0, &["cubic_meter", "cubic_metre", "cubic_meters", "cubic_metres"]),
    ("in3", Dimension::Volume, 16.387064, &["cubic_inch", "cubic_inches"]),
    ("ft3", Dimension::Volume, 28_316.846592, &["cubic_foot", "cubic_feet"]),
    ("floz", Dimension::Volume, 29.5735295625, &["fluid_ounce", "fluid_ounces"]),
    ("gal", Dimension::Volume, 3785.411784, &["gallon", "gallons"]),
    // Density, canonical g_ml
    (
        "g_ml",
        Dimension::Density,
        1.0,
        &["gram_per_milliliter", "gram_per_millilitre", "grams_per_milliliter", "grams_per_millilitre"],
    ),
    (
        "kg_m3",
        Dimension::Density,
        0.001,
        &[
            "kilogram_per_cubic_meter",
            "kilogram_per_cubic_metre",
            "kilograms_per_cubic_meter",
            "kilograms_per_cubic_metre",
        ],
    ),
    ("g_l", Dimension::Density, 0.001, &["gram_per_liter", "gram_per_litre", "grams_per_liter", "grams_per_litre"]),
    (
        "kg_l",
        Dimension::Density,
        1.0,
        &["kilogram_per_liter", "kilogram_per_litre", "kilograms_per_liter", "kilograms_per_litre"],
    ),
    (
        "lb_ft3",
        Dimension::Density,
        0.0160184897305,
        &[
            "lbs_ft3",
            "pound_per_cubic_foot",
            "pound_per_cubic_feet",
            "pounds_per_cubic_foot",
            "pounds_per_cubic_feet",
        ],
    ),
];

/// One unit as it appears in a configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitDefinition {
    pub name: Cow<'static, str>,
    pub kind: Dimension,
    /// How many canonical units of `kind` one of this unit is.
    pub factor: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<Cow<'static, str>>,
}

impl UnitDefinition {
    pub fn new(name: impl Into<Cow<'static, str>>, kind: Dimension, factor: f64) -> Self {
        Self {
            name: name.into(),
            kind,
            factor,
            aliases: Vec::new(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<Cow<'static, str>>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    fn names(&self) -> impl Iterator<Item = &Cow<'static, str>> {
        std::iter::once(&self.name).chain(self.aliases.iter())
    }
}

/// A complete unit conversion table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitTable {
    units: Vec<UnitDefinition>,
}

impl Default for UnitTable {
    fn default() -> Self {
        let units = BUILTIN_UNITS
            .iter()
            .map(|&(name, kind, factor, aliases)| UnitDefinition {
                name: Cow::Borrowed(name),
                kind,
                factor,
                aliases: aliases.iter().map(|a| Cow::Borrowed(*a)).collect(),
            })
            .collect();
        Self { units }
    }
}

impl UnitTable {
    /// A table with no units at all. Only useful as a base for `with_unit`;
    /// installing it fails because the canonical units are missing.
    pub fn empty() -> Self {
        Self { units: Vec::new() }
    }

    pub fn with_unit(mut self, unit: UnitDefinition) -> Self {
        self.units.push(unit);
        self
    }

    pub fn units(&self) -> &[UnitDefinition] {
        &self.units
    }

    /// Parse a table from JSON (`{"units": [{"name": .., "kind": .., "factor": ..}]}`).
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::UnitTable(format!("parse failed: {e}")))
    }

    /// Load a table from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::UnitTable(format!("failed to read {}: {e}", path.as_ref().display()))
        })?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::UnitTable(format!("serialize failed: {e}")))
    }

    /// Save the table as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = self.to_json_string()?;
        fs::write(path.as_ref(), contents).map_err(|e| {
            Error::UnitTable(format!("failed to write {}: {e}", path.as_ref().display()))
        })
    }

    /// Check the table without installing it.
    pub fn validate(&self) -> Result<()> {
        Registry::from_table(self).map(|_| ())
    }

    /// Replace the process-wide table with this one.
    pub fn install(&self) -> Result<()> {
        let registry = Registry::from_table(self)?;
        let count = registry.lookup.len();
        *REGISTRY.write().unwrap_or_else(PoisonError::into_inner) = registry;
        info!("Installed unit table: {} units, {} names", self.units.len(), count);
        Ok(())
    }
}

/// Add one unit (and its aliases) to the installed table.
///
/// Redefining a name within the same kind replaces its factor, except for
/// the canonical units and the units behind the constant constructors, whose
/// factors are fixed. Claiming a name that belongs to another kind fails with
/// `IncompatibleKind`.
pub fn register(unit: &UnitDefinition) -> Result<()> {
    let mut registry = REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    registry.insert(unit)?;
    debug!("Registered {} unit {} (factor {})", unit.kind, unit.name, unit.factor);
    Ok(())
}

/// Names (primary and aliases) currently registered for `kind`, sorted.
pub fn registered_names(kind: Dimension) -> Vec<&'static str> {
    let registry = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    let mut names: Vec<_> = registry
        .lookup
        .iter()
        .filter(|(_, entry)| entry.kind == kind)
        .map(|(name, _)| *name)
        .collect();
    names.sort_unstable();
    names
}

/// A resolved table row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Entry {
    pub(crate) name: &'static str,
    pub(crate) kind: Dimension,
    pub(crate) factor: f64,
}

/// Resolve `name` to a unit of the `expected` kind.
pub(crate) fn resolve(name: &str, expected: Dimension) -> Result<Entry> {
    let registry = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    match registry.lookup.get(name) {
        None => Err(Error::UnknownUnit(name.to_owned())),
        Some(entry) if entry.kind != expected => Err(Error::IncompatibleKind {
            unit: name.to_owned(),
            expected: expected.name(),
            found: entry.kind.name(),
        }),
        Some(entry) => Ok(*entry),
    }
}

static REGISTRY: LazyLock<RwLock<Registry>> = LazyLock::new(|| RwLock::new(Registry::builtin()));

/// Names of runtime-defined units, leaked once and reused across installs.
static INTERNED: LazyLock<Mutex<FxHashSet<&'static str>>> =
    LazyLock::new(|| Mutex::new(FxHashSet::default()));

fn intern(name: &Cow<'static, str>) -> &'static str {
    match name {
        Cow::Borrowed(s) => *s,
        Cow::Owned(s) => {
            let mut interned = INTERNED.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(existing) = interned.get(s.as_str()) {
                return *existing;
            }
            let leaked: &'static str = Box::leak(s.clone().into_boxed_str());
            interned.insert(leaked);
            leaked
        }
    }
}

#[derive(Debug, Default)]
struct Registry {
    lookup: FxHashMap<&'static str, Entry>,
}

impl Registry {
    fn builtin() -> Self {
        let mut registry = Registry::default();
        for &(name, kind, factor, aliases) in BUILTIN_UNITS {
            let entry = Entry { name, kind, factor };
            registry.lookup.insert(name, entry);
            for alias in aliases {
                registry.lookup.insert(*alias, entry);
            }
        }
        registry
    }

    fn from_table(table: &UnitTable) -> Result<Self> {
        let mut registry = Registry::default();
        for unit in &table.units {
            registry.insert(unit)?;
        }
        for kind in Dimension::ALL {
            let canonical = kind.canonical_unit();
            match registry.lookup.get(canonical) {
                Some(entry) if entry.kind == kind && entry.factor == 1.0 => {}
                _ => {
                    return Err(Error::UnitTable(format!(
                        "canonical {kind} unit `{canonical}` must be defined with factor 1"
                    )))
                }
            }
        }
        Ok(registry)
    }

    fn insert(&mut self, unit: &UnitDefinition) -> Result<()> {
        if !(unit.factor.is_finite() && unit.factor > 0.0) {
            return Err(Error::UnitTable(format!(
                "unit `{}` needs a finite positive factor, got {}",
                unit.name, unit.factor
            )));
        }
        for name in unit.names() {
            if let Some(existing) = self.lookup.get(&**name) {
                if existing.kind != unit.kind {
                    return Err(Error::IncompatibleKind {
                        unit: name.to_string(),
                        expected: unit.kind.name(),
                        found: existing.kind.name(),
                    });
                }
            }
            let pinned = FIXED_UNITS
                .iter()
                .find(|&&(fixed, kind, _)| fixed == &**name && kind == unit.kind);
            if let Some(&(fixed, kind, factor)) = pinned {
                if unit.factor != factor {
                    return Err(Error::UnitTable(format!(
                        "{kind} unit `{fixed}` is fixed at factor {factor}, got {}",
                        unit.factor
                    )));
                }
            }
        }
        let entry = Entry {
            name: intern(&unit.name),
            kind: unit.kind,
            factor: unit.factor,
        };
        for name in unit.names() {
            self.lookup.insert(intern(name), entry);
        }
        Ok(())
    }
}
