//! Aggregate holders: a container plus the things inside it
//!
//! [`Package`] is a box of items and [`Structure`] is a pallet of packages.
//! Both keep their contents in a [`Contents`] set that tracks the running
//! weight and used volume, so reading the totals never walks the contents.
//!
//! # Consistency
//!
//! Adding folds the new entry into the totals. Removing refolds the totals
//! from the remaining entries in insertion order, which reproduces exactly
//! the values a fresh sequence of adds would give. After every mutation the
//! totals equal a from-scratch recomputation (checked in debug builds).

pub mod package;
pub mod structure;

pub use package::{Package, PackageBuilder};
pub use structure::{Structure, StructureBuilder};

use crate::core_types::units::{Volume, Weight};
use crate::core_types::Cost;
use crate::cuboid::Payload;
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::cmp::Ordering;

/// Identity-keyed set of payloads with running weight and volume totals.
#[derive(Debug, Clone, Serialize)]
pub struct Contents<T> {
    entries: Vec<T>,
    #[serde(skip)]
    ids: FxHashSet<String>,
    weight: Weight,
    volume: Volume,
}

impl<T: Payload> Default for Contents<T> {
    fn default() -> Self {
        Contents {
            entries: Vec::new(),
            ids: FxHashSet::default(),
            weight: Weight::zero(),
            volume: Volume::zero(),
        }
    }
}

impl<T: Payload> Contents<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect entries, keeping the first of any duplicate identities.
    pub fn from_entries(entries: impl IntoIterator<Item = T>) -> Self {
        let mut contents = Self::new();
        for entry in entries {
            contents.insert(entry);
        }
        contents
    }

    /// Insert `entry` unless one with the same identity is present.
    ///
    /// Returns whether the entry was inserted.
    pub fn insert(&mut self, entry: T) -> bool {
        if !self.ids.insert(entry.payload_id().to_owned()) {
            return false;
        }
        self.weight += entry.gross_weight();
        self.volume += entry.occupied_volume();
        self.entries.push(entry);
        debug_assert!(self.recompute_and_compare());
        true
    }

    /// Remove the entry with identity `id`, if present.
    pub fn remove(&mut self, id: &str) -> Option<T> {
        if !self.ids.remove(id) {
            return None;
        }
        let index = self.entries.iter().position(|e| e.payload_id() == id)?;
        let removed = self.entries.remove(index);
        (self.weight, self.volume) = self.fold_totals();
        debug_assert!(self.recompute_and_compare());
        Some(removed)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.entries.iter().find(|e| e.payload_id() == id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }

    /// Total weight of the entries, in grams.
    #[inline]
    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// Total volume of the entries, in milliliters.
    #[inline]
    pub fn volume(&self) -> Volume {
        self.volume
    }

    /// Sum of declared values, only when every entry declares one.
    pub fn value(&self) -> Option<Cost> {
        Cost::sum_all(self.entries.iter().map(Payload::declared_value))
    }

    /// Whether the running totals equal a recomputation from the entries.
    pub fn recompute_and_compare(&self) -> bool {
        let (weight, volume) = self.fold_totals();
        self.ids.len() == self.entries.len()
            && weight.total_cmp(&self.weight) == Ordering::Equal
            && volume.total_cmp(&self.volume) == Ordering::Equal
    }

    fn fold_totals(&self) -> (Weight, Volume) {
        self.entries.iter().fold(
            (Weight::zero(), Volume::zero()),
            |(weight, volume), entry| {
                (weight + entry.gross_weight(), volume + entry.occupied_volume())
            },
        )
    }
}

impl<'a, T> IntoIterator for &'a Contents<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
