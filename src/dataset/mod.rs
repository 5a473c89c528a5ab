pub mod events;
pub mod sample;

pub use events::{EventBook, EventRecord};

use compact_str::CompactString;

use crate::error::{Error, Result};
use crate::layout::{self, LayoutConfig, Tile, WeightedItem};

/// Label → value table feeding the treemap, kept in insertion order.
///
/// Inserting an existing label replaces its value without moving it.
#[derive(Debug, Clone, Default)]
pub struct WeightedItems {
    items: Vec<WeightedItem>,
}

impl WeightedItems {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: impl IntoIterator<Item = WeightedItem>) -> Result<Self> {
        let mut table = Self::new();
        for item in items {
            table.insert(item.label, item.value)?;
        }
        Ok(table)
    }

    /// Insert or replace. Returns the previous value for `label`.
    pub fn insert(&mut self, label: impl Into<CompactString>, value: f64) -> Result<Option<f64>> {
        let label = label.into();
        let existing = self.items.iter().position(|item| item.label == label);
        if !value.is_finite() || value < 0.0 {
            return Err(Error::InvalidWeight {
                index: existing.unwrap_or(self.items.len()),
                value,
            });
        }
        match existing {
            Some(index) => Ok(Some(std::mem::replace(&mut self.items[index].value, value))),
            None => {
                self.items.push(WeightedItem { label, value });
                Ok(None)
            }
        }
    }

    pub fn remove(&mut self, label: &str) -> Option<f64> {
        let pos = self.items.iter().position(|item| item.label == label)?;
        Some(self.items.remove(pos).value)
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.items
            .iter()
            .find(|item| item.label == label)
            .map(|item| item.value)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WeightedItem> {
        self.items.iter()
    }

    /// Items by value descending; equal values keep insertion order.
    pub fn sorted(&self) -> Vec<&WeightedItem> {
        let mut sorted: Vec<&WeightedItem> = self.items.iter().collect();
        sorted.sort_by(|a, b| b.value.total_cmp(&a.value));
        sorted
    }

    /// Values of [`sorted`](Self::sorted) divided by their total.
    pub fn normalized_weights(&self) -> Result<Vec<f64>> {
        let sorted = self.sorted();
        if sorted.is_empty() {
            return Ok(Vec::new());
        }
        let total: f64 = sorted.iter().map(|item| item.value).sum();
        if total <= 0.0 {
            return Err(Error::ZeroTotalWeight);
        }
        Ok(sorted.iter().map(|item| item.value / total).collect())
    }

    pub fn tiles(&self, config: &LayoutConfig) -> Result<Vec<Tile>> {
        layout::layout_items(&self.items, config)
    }
}
