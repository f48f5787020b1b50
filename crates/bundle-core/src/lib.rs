//! # bundle-core: Bundle State & Pricing Engine
//!
//! This crate holds the selection bookkeeping and pricing rules of the
//! bundle builder as pure, deterministic code with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Bundle Builder Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Presentation Adapter                           │   │
//! │  │   catalog cards ─► selected list ─► progress ─► summary/button  │   │
//! │  └──────────────┬───────────────────────────────▲──────────────────┘   │
//! │     toggle/add/remove/change_quantity           │ BundleSnapshot        │
//! │  ┌──────────────▼───────────────────────────────┴──────────────────┐   │
//! │  │               ★ bundle-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌───────────┐  ┌──────────────┐  │   │
//! │  │   │  types   │  │  money   │  │ selection │  │    engine    │  │   │
//! │  │   │ Product  │  │  Money   │  │ Selection │  │ BundleEngine │  │   │
//! │  │   │ Settings │  │ % share  │  │  entries  │  │  observers   │  │   │
//! │  │   └──────────┘  └──────────┘  └───────────┘  └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBALS • PURE QUERIES                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, ProductId, DiscountRate, BundleSettings
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - Ordered, validated product catalog
//! - [`selection`] - Insertion-ordered product → quantity map
//! - [`engine`] - BundleEngine mutations, queries and observers
//! - [`snapshot`] - Serializable views for the presentation layer
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use bundle_core::{BundleEngine, BundleSettings, Catalog, Money, Product, ProductId};
//!
//! let catalog = Catalog::new(vec![
//!     Product::new(1, "Tie-Dye Lounge Set", Money::from_cents(15000), "product1.svg"),
//!     Product::new(2, "Sunburst Tracksuit", Money::from_cents(15000), "product2.png"),
//! ])
//! .unwrap();
//!
//! let mut engine = BundleEngine::new(catalog, BundleSettings::default());
//! engine.initialize();
//! engine.toggle(ProductId::new(1)).unwrap();
//! engine.change_quantity(ProductId::new(2), 1).unwrap();
//!
//! assert_eq!(engine.total_items(), 2);
//! assert_eq!(engine.remaining_for_checkout(), 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod engine;
pub mod error;
pub mod money;
pub mod selection;
pub mod snapshot;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use engine::{BundleEngine, BundleObserver};
pub use error::{BundleError, BundleResult, ValidationError};
pub use money::Money;
pub use selection::{Selection, SelectionEntry};
pub use snapshot::{BundleLine, BundleSnapshot, CheckoutSummary, LineSnapshot};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Items required before checkout unlocks, unless configured otherwise.
pub const DEFAULT_MINIMUM_ITEMS: u32 = 3;

/// Item count at which the bundle discount starts, unless configured otherwise.
pub const DEFAULT_DISCOUNT_THRESHOLD: u32 = 3;

/// Bundle discount in whole percent, unless configured otherwise.
pub const DEFAULT_DISCOUNT_PERCENTAGE: u32 = 30;
