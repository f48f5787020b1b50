//! # Selection
//!
//! The bundle itself: which products are selected, and how many of each.
//!
//! ## Invariants
//! - Entries are unique by `product_id` (adding again increases quantity)
//! - Quantity is always ≥ 1; setting a quantity of 0 removes the entry
//! - Iteration order is insertion order (the order rows appear in the
//!   selected-items list). Pricing never depends on it.
//!
//! Entries live in a `Vec` and are found by linear scan. A bundle holds a
//! handful of catalog products, so this beats hashing and keeps order for
//! free.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::ProductId;

/// One selected product and its quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SelectionEntry {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Insertion-ordered map of product id → quantity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    entries: Vec<SelectionEntry>,
}

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Selection {
            entries: Vec::new(),
        }
    }

    /// Current quantity, `None` when the product is not selected.
    pub fn quantity(&self, product_id: ProductId) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.product_id == product_id)
            .map(|e| e.quantity)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.quantity(product_id).is_some()
    }

    /// Sets the quantity for a product.
    ///
    /// ## Behavior
    /// - Quantity 0: removes the entry
    /// - Product already selected: overwrites in place (keeps its position)
    /// - Otherwise: appends a new entry
    pub fn set(&mut self, product_id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id);
            return;
        }

        if let Some(entry) = self.entries.iter_mut().find(|e| e.product_id == product_id) {
            entry.quantity = quantity;
            return;
        }

        self.entries.push(SelectionEntry {
            product_id,
            quantity,
        });
    }

    /// Removes a product. Returns whether it was selected.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let initial_len = self.entries.len();
        self.entries.retain(|e| e.product_id != product_id);
        self.entries.len() != initial_len
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, SelectionEntry> {
        self.entries.iter()
    }

    /// Number of distinct products selected.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all quantities. 0 for an empty selection.
    pub fn total_items(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.quantity)).sum()
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = &'a SelectionEntry;
    type IntoIter = std::slice::Iter<'a, SelectionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
