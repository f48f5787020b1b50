//! # Bundle Engine
//!
//! Owns the catalog, the settings and the current selection, and answers
//! every pricing and eligibility question about the bundle.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Bundle Engine Operations                             │
//! │                                                                         │
//! │  User Action              Engine Call               Selection Change    │
//! │  ───────────              ───────────               ────────────────    │
//! │                                                                         │
//! │  Click "Add to Bundle" ──► toggle(id) ────────────► add 1 / remove      │
//! │                                                                         │
//! │  Click "+" / "−" ────────► change_quantity(id, ±1) ► qty ± 1 (0 ⇒ gone) │
//! │                                                                         │
//! │  Click "×" ──────────────► remove(id) ─────────────► entry deleted      │
//! │                                                                         │
//! │  Every successful mutation ──► observers get a fresh BundleSnapshot     │
//! │                                                                         │
//! │  Queries (pure): total_items, subtotal, discount_amount, total,         │
//! │                  is_checkout_eligible, remaining_for_checkout           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! One engine is built at startup and owned by whoever drives the UI loop.
//! Mutation goes through `&mut self`; there is no shared or global state
//! and no locking.
//!
//! ## Example
//! ```rust
//! use bundle_core::{BundleEngine, BundleSettings, Catalog, Money, Product, ProductId};
//!
//! let catalog = Catalog::new(
//!     (1..=3)
//!         .map(|id| Product::new(id, format!("Item {id}"), Money::from_cents(15000), "item.svg"))
//!         .collect(),
//! )
//! .unwrap();
//! let mut engine = BundleEngine::new(catalog, BundleSettings::new(3, 3, 30).unwrap());
//!
//! for id in 1..=3 {
//!     engine.toggle(ProductId::new(id)).unwrap();
//! }
//!
//! assert_eq!(engine.subtotal().to_string(), "$450.00");
//! assert_eq!(engine.discount_amount().to_string(), "$135.00");
//! assert_eq!(engine.total().to_string(), "$315.00");
//! assert!(engine.is_checkout_eligible());
//! ```

use std::fmt;

use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::error::{BundleError, BundleResult};
use crate::money::Money;
use crate::selection::Selection;
use crate::snapshot::{BundleLine, BundleSnapshot, CheckoutSummary, LineSnapshot};
use crate::types::{BundleSettings, ProductId};
use crate::validation::{validate_quantity, validate_quantity_limit};

// =============================================================================
// Observer
// =============================================================================

/// Receives a fresh snapshot after every successful mutating call.
///
/// Notification is synchronous: the mutating call returns only after every
/// observer has run, so a renderer is always current before the next user
/// interaction is handled.
pub trait BundleObserver {
    fn bundle_changed(&mut self, snapshot: &BundleSnapshot);
}

impl<F> BundleObserver for F
where
    F: FnMut(&BundleSnapshot),
{
    fn bundle_changed(&mut self, snapshot: &BundleSnapshot) {
        self(snapshot)
    }
}

// =============================================================================
// Engine
// =============================================================================

/// The bundle state and pricing engine.
pub struct BundleEngine {
    catalog: Catalog,
    settings: BundleSettings,
    selection: Selection,
    observers: Vec<Box<dyn BundleObserver>>,
}

impl BundleEngine {
    /// Creates an engine with an empty selection.
    ///
    /// Catalog and settings are validated by their own constructors and are
    /// never mutated afterwards.
    pub fn new(catalog: Catalog, settings: BundleSettings) -> Self {
        BundleEngine {
            catalog,
            settings,
            selection: Selection::new(),
            observers: Vec::new(),
        }
    }

    /// Registers an observer. Observers are notified in registration order.
    pub fn subscribe(&mut self, observer: impl BundleObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Seeds the selection with quantity 1 for every preselected product.
    ///
    /// Meant to run once at startup. Running it again resets preselected
    /// products to quantity 1 and leaves everything else alone.
    pub fn initialize(&mut self) {
        for product in self.catalog.preselected() {
            self.selection.set(product.id, 1);
        }

        debug!(selected = self.selection.len(), "bundle initialized");
        self.notify();
    }

    /// Adds `quantity` of a product, accumulating onto any existing entry.
    ///
    /// ## Errors
    /// - `InvalidProduct` if the id is not in the catalog
    /// - `Validation` if `quantity` is 0, or the sum would pass
    ///   [`MAX_QUANTITY`](crate::validation::MAX_QUANTITY). The selection is
    ///   unchanged in that case.
    ///
    /// ## Returns
    /// The product's quantity after the call.
    pub fn add(&mut self, product_id: ProductId, quantity: u32) -> BundleResult<u32> {
        self.ensure_in_catalog(product_id)?;
        validate_quantity(quantity)?;

        let current = i64::from(self.quantity_of(product_id));
        let new_quantity = validate_quantity_limit(current + i64::from(quantity))?;
        self.selection.set(product_id, new_quantity);
        debug!(product_id = %product_id, quantity, new_quantity, "add to bundle");

        self.notify();
        Ok(new_quantity)
    }

    /// Removes a product from the bundle. Removing an unselected product is
    /// a no-op.
    ///
    /// ## Returns
    /// Whether the product was selected before the call.
    pub fn remove(&mut self, product_id: ProductId) -> BundleResult<bool> {
        self.ensure_in_catalog(product_id)?;

        let removed = self.selection.remove(product_id);
        debug!(product_id = %product_id, removed, "remove from bundle");

        self.notify();
        Ok(removed)
    }

    /// Removes the product if selected, otherwise adds one.
    ///
    /// This is what the "Add to Bundle" card button does.
    ///
    /// ## Returns
    /// Whether the product is selected after the call.
    pub fn toggle(&mut self, product_id: ProductId) -> BundleResult<bool> {
        if self.selection.contains(product_id) {
            self.remove(product_id)?;
            Ok(false)
        } else {
            self.add(product_id, 1)?;
            Ok(true)
        }
    }

    /// Shifts a product's quantity by `delta`, clamping at zero.
    ///
    /// ## Behavior
    /// ```text
    /// current = selected quantity, or 0 if not selected
    /// new     = max(0, current + delta)
    ///
    /// new == 0  ──► entry removed (never stored as 0)
    /// new  > 0  ──► entry set to new (created if absent)
    /// ```
    ///
    /// ## Errors
    /// - `InvalidProduct` if the id is not in the catalog
    /// - `Validation` if `new` would pass
    ///   [`MAX_QUANTITY`](crate::validation::MAX_QUANTITY)
    ///
    /// ## Returns
    /// The new quantity (0 when the entry was removed).
    pub fn change_quantity(&mut self, product_id: ProductId, delta: i64) -> BundleResult<u32> {
        self.ensure_in_catalog(product_id)?;

        let current = i64::from(self.quantity_of(product_id));
        let new_quantity = validate_quantity_limit(current.saturating_add(delta).max(0))?;

        // set() with 0 removes the entry
        self.selection.set(product_id, new_quantity);
        debug!(product_id = %product_id, delta, new_quantity, "change quantity");

        self.notify();
        Ok(new_quantity)
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Sum of all selected quantities.
    pub fn total_items(&self) -> u64 {
        self.selection.total_items()
    }

    /// Σ price × quantity over the selection, before discount.
    ///
    /// An entry whose id no longer resolves in the catalog is skipped.
    pub fn subtotal(&self) -> Money {
        self.selection
            .iter()
            .filter_map(|entry| match self.catalog.get(entry.product_id) {
                Some(product) => Some(product.price().multiply_quantity(entry.quantity)),
                None => {
                    warn!(product_id = %entry.product_id, "skipping selection entry missing from catalog");
                    None
                }
            })
            .sum()
    }

    /// Discount applies at and above the threshold (inclusive).
    pub fn is_discount_eligible(&self) -> bool {
        self.total_items() >= u64::from(self.settings.discount_threshold())
    }

    /// Discount percentage of the subtotal, or zero below the threshold.
    pub fn discount_amount(&self) -> Money {
        if self.is_discount_eligible() {
            self.subtotal().percentage(self.settings.discount_rate())
        } else {
            Money::zero()
        }
    }

    /// Subtotal minus discount, floored at zero.
    pub fn total(&self) -> Money {
        self.subtotal().saturating_sub_floor(self.discount_amount())
    }

    /// Checkout unlocks at `minimum_items` (inclusive).
    pub fn is_checkout_eligible(&self) -> bool {
        self.total_items() >= u64::from(self.settings.minimum_items())
    }

    /// Items still needed before checkout unlocks. 0 exactly when eligible.
    pub fn remaining_for_checkout(&self) -> u64 {
        u64::from(self.settings.minimum_items()).saturating_sub(self.total_items())
    }

    /// Progress toward `minimum_items`, capped at 100.
    pub fn progress_percent(&self) -> u8 {
        let minimum = u64::from(self.settings.minimum_items());
        let percent = self.total_items().saturating_mul(100) / minimum;
        percent.min(100) as u8
    }

    /// Whether the product has an entry in the bundle.
    pub fn is_selected(&self, product_id: ProductId) -> bool {
        self.selection.contains(product_id)
    }

    /// Selected quantity, 0 when not selected.
    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.selection.quantity(product_id).unwrap_or(0)
    }

    /// Selected products in insertion order, joined with the catalog.
    pub fn lines(&self) -> impl Iterator<Item = BundleLine<'_>> {
        self.selection.iter().filter_map(move |entry| {
            self.catalog.get(entry.product_id).map(|product| BundleLine {
                product,
                quantity: entry.quantity,
            })
        })
    }

    /// The catalog the engine was built with.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Thresholds and discount rate.
    pub fn settings(&self) -> &BundleSettings {
        &self.settings
    }

    /// Raw selection entries, insertion-ordered.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Captures every outbound value in one owned struct.
    pub fn snapshot(&self) -> BundleSnapshot {
        let subtotal = self.subtotal();
        let discount_applied = self.is_discount_eligible();
        let discount = if discount_applied {
            subtotal.percentage(self.settings.discount_rate())
        } else {
            Money::zero()
        };

        BundleSnapshot {
            lines: self.lines().map(LineSnapshot::from).collect(),
            total_items: self.total_items(),
            minimum_items: self.settings.minimum_items(),
            progress_percent: self.progress_percent(),
            subtotal,
            discount_applied,
            discount_rate: self.settings.discount_rate(),
            discount,
            total: subtotal.saturating_sub_floor(discount),
            checkout_eligible: self.is_checkout_eligible(),
            remaining_for_checkout: self.remaining_for_checkout(),
        }
    }

    /// Returns the bundle to check out when eligible, `None` otherwise.
    ///
    /// Does not change the selection.
    pub fn checkout(&self) -> Option<CheckoutSummary> {
        if !self.is_checkout_eligible() {
            debug!(remaining = self.remaining_for_checkout(), "checkout not yet allowed");
            return None;
        }

        let summary = CheckoutSummary {
            items: self.selection.iter().copied().collect(),
            total_items: self.total_items(),
            subtotal: self.subtotal(),
            discount: self.discount_amount(),
            total: self.total(),
        };
        info!(total_items = summary.total_items, total = %summary.total, "checkout ready");
        Some(summary)
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn ensure_in_catalog(&self, product_id: ProductId) -> BundleResult<()> {
        if self.catalog.contains(product_id) {
            Ok(())
        } else {
            warn!(product_id = %product_id, "operation on product outside the catalog");
            Err(BundleError::InvalidProduct(product_id))
        }
    }

    fn notify(&mut self) {
        if self.observers.is_empty() {
            return;
        }

        let snapshot = self.snapshot();
        for observer in self.observers.iter_mut() {
            observer.bundle_changed(&snapshot);
        }
    }
}

impl fmt::Debug for BundleEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BundleEngine")
            .field("catalog", &self.catalog)
            .field("settings", &self.settings)
            .field("selection", &self.selection)
            .field("observers", &self.observers.len())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::types::Product;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn id(n: u32) -> ProductId {
        ProductId::new(n)
    }

    fn test_catalog(prices: &[i64]) -> Catalog {
        let products = prices
            .iter()
            .enumerate()
            .map(|(i, &cents)| {
                let n = i as u32 + 1;
                Product::new(n, format!("Product {}", n), Money::from_cents(cents), "p.svg")
            })
            .collect();
        Catalog::new(products).unwrap()
    }

    fn test_engine() -> BundleEngine {
        BundleEngine::new(test_catalog(&[15000; 6]), BundleSettings::new(3, 3, 30).unwrap())
    }

    #[test]
    fn test_new_engine_is_empty() {
        let engine = test_engine();
        assert_eq!(engine.total_items(), 0);
        assert_eq!(engine.subtotal(), Money::zero());
        assert_eq!(engine.total(), Money::zero());
        assert!(!engine.is_checkout_eligible());
        assert_eq!(engine.remaining_for_checkout(), 3);
        assert_eq!(engine.progress_percent(), 0);
    }

    #[test]
    fn test_initialize_seeds_preselected() {
        let catalog = Catalog::new(vec![
            Product::new(1, "A", Money::from_cents(100), "a.svg").preselected(),
            Product::new(2, "B", Money::from_cents(100), "b.svg"),
            Product::new(3, "C", Money::from_cents(100), "c.svg").preselected(),
        ])
        .unwrap();
        let mut engine = BundleEngine::new(catalog, BundleSettings::default());

        engine.initialize();
        assert_eq!(engine.quantity_of(id(1)), 1);
        assert!(!engine.is_selected(id(2)));
        assert_eq!(engine.quantity_of(id(3)), 1);

        // Idempotent
        engine.initialize();
        assert_eq!(engine.total_items(), 2);
    }

    #[test]
    fn test_add_accumulates() {
        let mut engine = test_engine();
        assert_eq!(engine.add(id(1), 1).unwrap(), 1);
        assert_eq!(engine.add(id(1), 4).unwrap(), 5);
        assert_eq!(engine.total_items(), 5);
        assert_eq!(engine.selection().len(), 1);
    }

    #[test]
    fn test_add_rejects_unknown_product() {
        let mut engine = test_engine();
        assert_eq!(engine.add(id(99), 1), Err(BundleError::InvalidProduct(id(99))));
        assert!(engine.selection().is_empty());
    }

    #[test]
    fn test_add_rejects_zero_quantity() {
        let mut engine = test_engine();
        assert!(matches!(
            engine.add(id(1), 0),
            Err(BundleError::Validation(ValidationError::MustBePositive { .. }))
        ));
        assert!(!engine.is_selected(id(1)));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut engine = test_engine();
        engine.add(id(1), 1).unwrap();

        assert_eq!(engine.remove(id(2)), Ok(false));
        assert_eq!(engine.remove(id(1)), Ok(true));
        assert!(engine.selection().is_empty());
    }

    #[test]
    fn test_remove_unknown_product_fails() {
        let mut engine = test_engine();
        assert_eq!(engine.remove(id(42)), Err(BundleError::InvalidProduct(id(42))));
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut engine = test_engine();
        engine.add(id(2), 1).unwrap();
        let before = engine.selection().clone();

        assert_eq!(engine.toggle(id(1)), Ok(true));
        assert_eq!(engine.toggle(id(1)), Ok(false));
        assert_eq!(engine.selection(), &before);

        assert_eq!(engine.toggle(id(2)), Ok(false));
        assert_eq!(engine.toggle(id(2)), Ok(true));
        assert_eq!(engine.quantity_of(id(2)), 1);
    }

    #[test]
    fn test_toggle_removes_whole_quantity() {
        let mut engine = test_engine();
        engine.add(id(1), 5).unwrap();
        assert_eq!(engine.toggle(id(1)), Ok(false));
        assert_eq!(engine.total_items(), 0);
    }

    #[test]
    fn test_change_quantity_to_zero_removes() {
        let mut engine = test_engine();
        engine.add(id(1), 1).unwrap();

        assert_eq!(engine.change_quantity(id(1), -1), Ok(0));
        assert!(!engine.is_selected(id(1)));
        assert!(engine.selection().iter().all(|e| e.quantity >= 1));
    }

    #[test]
    fn test_change_quantity_clamps_at_zero() {
        let mut engine = test_engine();
        engine.add(id(1), 2).unwrap();

        assert_eq!(engine.change_quantity(id(1), -10), Ok(0));
        assert_eq!(engine.change_quantity(id(1), -1), Ok(0)); // absent stays absent
        assert!(engine.selection().is_empty());
    }

    #[test]
    fn test_change_quantity_creates_entry() {
        let mut engine = test_engine();
        assert_eq!(engine.change_quantity(id(3), 2), Ok(2));
        assert_eq!(engine.quantity_of(id(3)), 2);
    }

    #[test]
    fn test_change_quantity_past_limit_is_rejected() {
        let mut engine = test_engine();
        engine.add(id(1), 1).unwrap();

        assert!(matches!(
            engine.change_quantity(id(1), i64::MAX),
            Err(BundleError::Validation(ValidationError::OutOfRange { .. }))
        ));
        assert_eq!(engine.quantity_of(id(1)), 1);

        assert_eq!(engine.change_quantity(id(1), i64::from(u32::MAX) - 1), Ok(u32::MAX));
        assert_eq!(engine.change_quantity(id(1), i64::MIN), Ok(0));
    }

    #[test]
    fn test_add_past_limit_keeps_quantity_and_does_not_notify() {
        let mut engine = test_engine();
        assert_eq!(engine.add(id(1), u32::MAX), Ok(u32::MAX));

        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        engine.subscribe(move |_: &BundleSnapshot| *sink.borrow_mut() += 1);

        assert_eq!(
            engine.add(id(1), 5),
            Err(BundleError::Validation(ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 0,
                max: i64::from(u32::MAX),
            }))
        );
        assert_eq!(engine.quantity_of(id(1)), u32::MAX);
        assert_eq!(engine.total_items(), u64::from(u32::MAX));
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_change_quantity_unknown_product_fails() {
        let mut engine = test_engine();
        assert_eq!(
            engine.change_quantity(id(7), 1),
            Err(BundleError::InvalidProduct(id(7)))
        );
    }

    #[test]
    fn test_discount_boundary_is_inclusive() {
        let mut engine = test_engine();
        engine.add(id(1), 2).unwrap();
        assert!(!engine.is_discount_eligible());
        assert_eq!(engine.discount_amount(), Money::zero());

        engine.add(id(2), 1).unwrap();
        assert!(engine.is_discount_eligible());
        assert_eq!(engine.discount_amount().cents(), 13500);
    }

    #[test]
    fn test_thresholds_are_independent() {
        let catalog = test_catalog(&[1000, 2000]);
        let mut engine = BundleEngine::new(catalog, BundleSettings::new(4, 2, 10).unwrap());

        engine.add(id(1), 1).unwrap();
        engine.add(id(2), 1).unwrap();

        // Discount at 2, checkout only at 4
        assert!(engine.is_discount_eligible());
        assert_eq!(engine.discount_amount().cents(), 300);
        assert!(!engine.is_checkout_eligible());
        assert_eq!(engine.remaining_for_checkout(), 2);
        assert_eq!(engine.progress_percent(), 50);
    }

    #[test]
    fn test_full_discount_total_is_zero() {
        let catalog = test_catalog(&[999]);
        let mut engine = BundleEngine::new(catalog, BundleSettings::new(1, 1, 100).unwrap());
        engine.add(id(1), 3).unwrap();

        assert_eq!(engine.discount_amount(), engine.subtotal());
        assert_eq!(engine.total(), Money::zero());
    }

    #[test]
    fn test_progress_is_capped() {
        let mut engine = test_engine();
        engine.add(id(1), 1).unwrap();
        assert_eq!(engine.progress_percent(), 33);
        engine.add(id(1), 10).unwrap();
        assert_eq!(engine.progress_percent(), 100);
    }

    #[test]
    fn test_lines_follow_insertion_order() {
        let catalog = test_catalog(&[100, 200, 300]);
        let mut engine = BundleEngine::new(catalog, BundleSettings::default());
        engine.toggle(id(3)).unwrap();
        engine.toggle(id(1)).unwrap();
        engine.change_quantity(id(3), 1).unwrap();

        let lines: Vec<(u32, u32, i64)> = engine
            .lines()
            .map(|l| (l.product.id.get(), l.quantity, l.line_total().cents()))
            .collect();
        assert_eq!(lines, vec![(3, 2, 600), (1, 1, 100)]);
    }

    #[test]
    fn test_checkout_gate() {
        let mut engine = test_engine();
        engine.add(id(1), 2).unwrap();
        assert!(engine.checkout().is_none());

        engine.add(id(2), 1).unwrap();
        let summary = engine.checkout().unwrap();
        assert_eq!(summary.total_items, 3);
        assert_eq!(summary.total.cents(), 31500);
        assert_eq!(summary.items.len(), 2);

        // Checkout leaves the bundle intact
        assert_eq!(engine.total_items(), 3);
    }

    #[test]
    fn test_observers_notified_after_each_mutation() {
        let mut engine = test_engine();
        let seen: Rc<RefCell<Vec<u64>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        engine.subscribe(move |snapshot: &BundleSnapshot| {
            sink.borrow_mut().push(snapshot.total_items);
        });

        engine.toggle(id(1)).unwrap();
        engine.change_quantity(id(1), 1).unwrap();
        engine.remove(id(5)).unwrap();
        engine.toggle(id(1)).unwrap();

        assert_eq!(*seen.borrow(), vec![1, 2, 2, 0]);
    }

    #[test]
    fn test_failed_mutation_does_not_notify() {
        let mut engine = test_engine();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        engine.subscribe(move |_: &BundleSnapshot| *sink.borrow_mut() += 1);

        assert!(engine.add(id(100), 1).is_err());
        assert!(engine.add(id(1), 0).is_err());
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_snapshot_matches_queries() {
        let mut engine = test_engine();
        engine.add(id(1), 2).unwrap();
        engine.add(id(4), 1).unwrap();

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.total_items, engine.total_items());
        assert_eq!(snapshot.subtotal, engine.subtotal());
        assert_eq!(snapshot.discount, engine.discount_amount());
        assert_eq!(snapshot.total, engine.total());
        assert_eq!(snapshot.checkout_eligible, engine.is_checkout_eligible());
        assert_eq!(snapshot.remaining_for_checkout, 0);
        assert!(snapshot.is_selected(id(4)));
        assert_eq!(snapshot.quantity_of(id(1)), 2);
        assert_eq!(snapshot.quantity_of(id(2)), 0);
    }
}
