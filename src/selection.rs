//! Tool selection - the user's current working set.
//!
//! Holds up to [`MAX_SELECTION`] distinct tool ids in insertion order. Adding
//! to a full selection evicts the earliest-inserted id.

use std::collections::VecDeque;

use log::debug;

use crate::catalog::{Catalog, ToolDescriptor};
use crate::error::{MatrixError, Result};

/// Maximum number of tools compared at once
pub const MAX_SELECTION: usize = 4;

/// Minimum number of tools needed before comparing
pub const MIN_COMPARE: usize = 2;

/// Ordered, capped set of selected tool ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: VecDeque<String>,
}

impl Selection {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection by inserting ids in order.
    ///
    /// Duplicates are ignored and anything past the cap evicts the oldest.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selection = Self::new();
        for id in ids {
            selection.insert(id);
        }
        selection
    }

    /// Remove the id if present, otherwise add it.
    ///
    /// Returns the id evicted to make room, if any.
    pub fn toggle(&mut self, id: impl Into<String>) -> Option<String> {
        let id = id.into();
        if self.remove(&id) {
            return None;
        }
        self.push(id)
    }

    /// Add the id if absent. Returns the id evicted to make room, if any.
    pub fn insert(&mut self, id: impl Into<String>) -> Option<String> {
        let id = id.into();
        if self.contains(&id) {
            return None;
        }
        self.push(id)
    }

    fn push(&mut self, id: String) -> Option<String> {
        let evicted = if self.ids.len() >= MAX_SELECTION {
            self.ids.pop_front()
        } else {
            None
        };
        if let Some(old) = &evicted {
            debug!("Selection full, evicting '{}' for '{}'", old, id);
        }
        self.ids.push_back(id);
        evicted
    }

    /// Remove an id. Returns whether it was present.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.ids.iter().position(|s| s == id) {
            Some(pos) => {
                self.ids.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Drop every selected id
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Check if an id is selected
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    /// Selected ids, oldest first
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Whether enough tools are selected to compare
    pub fn can_compare(&self) -> bool {
        self.ids.len() >= MIN_COMPARE
    }

    /// Resolve the selected ids against the catalog, in selection order
    pub fn resolve<'a>(&self, catalog: &'a Catalog) -> Result<Vec<&'a ToolDescriptor>> {
        self.ids
            .iter()
            .map(|id| catalog.get(id).ok_or_else(|| MatrixError::UnknownTool(id.clone())))
            .collect()
    }

    /// Resolve for comparison, requiring at least [`MIN_COMPARE`] tools
    pub fn resolve_for_compare<'a>(&self, catalog: &'a Catalog) -> Result<Vec<&'a ToolDescriptor>> {
        if !self.can_compare() {
            return Err(MatrixError::NotEnoughTools { selected: self.len() });
        }
        self.resolve(catalog)
    }
}
