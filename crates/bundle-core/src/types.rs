//! # Domain Types
//!
//! Core domain types used throughout the bundle builder.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │ BundleSettings  │   │  DiscountRate   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u32 > 0)   │   │  minimum_items  │   │  bps (u32)      │       │
//! │  │  name           │   │  discount_      │   │  3000 = 30%     │       │
//! │  │  price_cents    │   │    threshold    │   └─────────────────┘       │
//! │  │  image          │   │  discount_rate  │                             │
//! │  │  preselected    │   └─────────────────┘                             │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products and settings are immutable once the engine is built.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::BundleResult;
use crate::money::Money;
use crate::validation::{validate_discount_percentage, validate_threshold};

// =============================================================================
// Product Id
// =============================================================================

/// Catalog identifier of a product. Valid ids are positive.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct ProductId(u32);

impl ProductId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        ProductId(id)
    }

    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        ProductId(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01%, so 3000 bps = 30%. Whole-percent settings map
/// onto it exactly and the money math stays in integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a rate from a whole percentage (30 → 30%).
    #[inline]
    pub const fn from_percent(percent: u32) -> Self {
        DiscountRate(percent.saturating_mul(100))
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percent(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product offered in the bundle catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique catalog identifier.
    pub id: ProductId,

    /// Display name shown on the card and in the selected-items list.
    pub name: String,

    /// Unit price in cents.
    pub price_cents: i64,

    /// Opaque reference to the product image. Never interpreted here.
    pub image: String,

    /// Selected with quantity 1 when the engine is initialized.
    #[serde(default)]
    pub preselected: bool,
}

impl Product {
    /// Creates a product that is not preselected.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        price: Money,
        image: impl Into<String>,
    ) -> Self {
        Product {
            id: ProductId::new(id),
            name: name.into(),
            price_cents: price.cents(),
            image: image.into(),
            preselected: false,
        }
    }

    /// Marks the product as part of the default selection.
    pub fn preselected(mut self) -> Self {
        self.preselected = true;
        self
    }

    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Bundle Settings
// =============================================================================

/// Checkout and discount thresholds for a bundle.
///
/// `minimum_items` gates checkout and `discount_threshold` gates the
/// discount. They are commonly configured to the same value but are
/// evaluated independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BundleSettings {
    minimum_items: u32,
    discount_threshold: u32,
    discount_rate: DiscountRate,
}

impl BundleSettings {
    /// Creates validated settings.
    ///
    /// ## Rules
    /// - `minimum_items` ≥ 1
    /// - `discount_threshold` ≥ 1
    /// - `discount_percentage` in 0..=100
    ///
    /// ```rust
    /// use bundle_core::BundleSettings;
    ///
    /// let settings = BundleSettings::new(3, 3, 30).unwrap();
    /// assert_eq!(settings.discount_rate().bps(), 3000);
    ///
    /// assert!(BundleSettings::new(0, 3, 30).is_err());
    /// assert!(BundleSettings::new(3, 3, 101).is_err());
    /// ```
    pub fn new(
        minimum_items: u32,
        discount_threshold: u32,
        discount_percentage: u32,
    ) -> BundleResult<Self> {
        validate_threshold("minimum_items", minimum_items)?;
        validate_threshold("discount_threshold", discount_threshold)?;
        validate_discount_percentage(discount_percentage)?;

        Ok(BundleSettings {
            minimum_items,
            discount_threshold,
            discount_rate: DiscountRate::from_percent(discount_percentage),
        })
    }

    #[inline]
    pub const fn minimum_items(&self) -> u32 {
        self.minimum_items
    }

    #[inline]
    pub const fn discount_threshold(&self) -> u32 {
        self.discount_threshold
    }

    #[inline]
    pub const fn discount_rate(&self) -> DiscountRate {
        self.discount_rate
    }
}

impl Default for BundleSettings {
    /// Three items unlock both checkout and a 30% discount.
    fn default() -> Self {
        BundleSettings {
            minimum_items: crate::DEFAULT_MINIMUM_ITEMS,
            discount_threshold: crate::DEFAULT_DISCOUNT_THRESHOLD,
            discount_rate: DiscountRate::from_percent(crate::DEFAULT_DISCOUNT_PERCENTAGE),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
