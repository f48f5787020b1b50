//! # Snapshots
//!
//! Owned, serializable views of the engine state for the presentation layer.
//!
//! ## What the Presentation Layer Renders
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BundleSnapshot field            Rendered as                            │
//! │  ─────────────────────           ─────────────────────────────────      │
//! │  lines[]                    ──►  selected-items list rows               │
//! │  lines[].product_id         ──►  "Added to Bundle" card highlight       │
//! │  total_items / progress     ──►  progress meter ("2 / 3")               │
//! │  subtotal, discount, total  ──►  price summary                          │
//! │  discount_applied           ──►  discount row visible                   │
//! │  checkout_eligible          ──►  checkout button enabled                │
//! │  remaining_for_checkout     ──►  "Add N Items to Proceed"               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All types serialize in camelCase and export TypeScript definitions, so a
//! browser-side renderer can consume them as JSON.

use serde::Serialize;
use ts_rs::TS;

use crate::money::Money;
use crate::selection::SelectionEntry;
use crate::types::{DiscountRate, Product, ProductId};

/// A selected product joined with its catalog entry.
///
/// Borrowed from the engine; see [`LineSnapshot`] for the owned form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundleLine<'a> {
    pub product: &'a Product,
    pub quantity: u32,
}

impl BundleLine<'_> {
    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.product.price().multiply_quantity(self.quantity)
    }
}

/// One row of the selected-items list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineSnapshot {
    pub product_id: ProductId,
    pub name: String,
    pub image: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub line_total: Money,
}

impl From<BundleLine<'_>> for LineSnapshot {
    fn from(line: BundleLine<'_>) -> Self {
        LineSnapshot {
            product_id: line.product.id,
            name: line.product.name.clone(),
            image: line.product.image.clone(),
            unit_price: line.product.price(),
            quantity: line.quantity,
            line_total: line.line_total(),
        }
    }
}

/// Everything the presentation layer needs after a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BundleSnapshot {
    pub lines: Vec<LineSnapshot>,
    pub total_items: u64,
    pub minimum_items: u32,
    pub progress_percent: u8,
    pub subtotal: Money,
    pub discount_applied: bool,
    pub discount_rate: DiscountRate,
    pub discount: Money,
    pub total: Money,
    pub checkout_eligible: bool,
    pub remaining_for_checkout: u64,
}

impl BundleSnapshot {
    /// Whether a product shows as "Added to Bundle".
    pub fn is_selected(&self, product_id: ProductId) -> bool {
        self.lines.iter().any(|l| l.product_id == product_id)
    }

    /// Quantity of a product, 0 when not selected.
    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.lines
            .iter()
            .find(|l| l.product_id == product_id)
            .map_or(0, |l| l.quantity)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Handed out when checkout is allowed. Carries the bundle being checked
/// out; no payment or order protocol is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutSummary {
    pub items: Vec<SelectionEntry>,
    pub total_items: u64,
    pub subtotal: Money,
    pub discount: Money,
    pub total: Money,
}
