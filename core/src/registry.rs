//! Registered boundaries, keyed by caller-chosen identifiers.
//!
//! The registry is deliberately permissive: registering an existing key
//! replaces the entry wholesale, and removing an unknown key succeeds.

use std::collections::HashMap;

use serde_json::Value;

use tidemark_types::{Axis, BoundaryKey, Dimensions};

/// One watched threshold and the side of it last observed.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryEntry {
    boundary: u32,
    axis: Axis,
    past_boundary: bool,
    data: Vec<Value>,
}

impl BoundaryEntry {
    /// Build an entry whose side is taken from `current`, not assumed.
    #[must_use]
    pub fn seeded(boundary: u32, axis: Axis, data: Vec<Value>, current: Dimensions) -> Self {
        Self {
            boundary,
            axis,
            past_boundary: current.along(axis) > boundary,
            data,
        }
    }

    #[must_use]
    pub fn boundary(&self) -> u32 {
        self.boundary
    }

    #[must_use]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    #[must_use]
    pub fn past_boundary(&self) -> bool {
        self.past_boundary
    }

    #[must_use]
    pub fn data(&self) -> &[Value] {
        &self.data
    }

    /// Commit a crossing. Returns the new side.
    pub(crate) fn flip(&mut self) -> bool {
        self.past_boundary = !self.past_boundary;
        self.past_boundary
    }
}

#[derive(Debug, Default)]
pub struct BoundaryRegistry {
    entries: HashMap<BoundaryKey, BoundaryEntry>,
}

impl BoundaryRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry at `key`. Always returns `true`.
    pub fn register(
        &mut self,
        key: BoundaryKey,
        boundary: u32,
        axis: Axis,
        data: Vec<Value>,
        current: Dimensions,
    ) -> bool {
        let entry = BoundaryEntry::seeded(boundary, axis, data, current);
        tracing::debug!(
            key = %key,
            boundary,
            axis = axis.as_str(),
            past_boundary = entry.past_boundary,
            "Boundary registered"
        );
        self.entries.insert(key, entry);
        true
    }

    /// Drop the entry at `key` if present. Always returns `true`.
    pub fn remove(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            tracing::debug!(key, "Boundary removed");
        }
        true
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&BoundaryEntry> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&BoundaryKey, &BoundaryEntry)> {
        self.entries.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&BoundaryKey, &mut BoundaryEntry)> {
        self.entries.iter_mut()
    }
}
