//! Invariants that must hold after any sequence of engine operations.

use bundle_core::{BundleEngine, BundleError, BundleSettings, Catalog, Money, Product, ProductId};
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::test_runner::{Config, TestCaseError};

#[derive(Debug, Clone, Copy)]
enum Op {
    Add(u32, u32),
    Remove(u32),
    Toggle(u32),
    Change(u32, i64),
}

/// Six products with awkward prices; #3 starts preselected.
fn catalog() -> Catalog {
    let prices = [15000, 999, 0, 12345, 1, 50000];
    Catalog::new(
        prices
            .iter()
            .enumerate()
            .map(|(i, &cents)| {
                let n = i as u32 + 1;
                let product =
                    Product::new(n, format!("Product {}", n), Money::from_cents(cents), "p.svg");
                if n == 3 {
                    product.preselected()
                } else {
                    product
                }
            })
            .collect(),
    )
    .unwrap()
}

fn product_strategy() -> impl Strategy<Value = u32> {
    1u32..=6
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (product_strategy(), 1u32..=3).prop_map(|(p, q)| Op::Add(p, q)),
        product_strategy().prop_map(Op::Remove),
        product_strategy().prop_map(Op::Toggle),
        (product_strategy(), -3i64..=3).prop_map(|(p, d)| Op::Change(p, d)),
    ]
}

fn settings_strategy() -> impl Strategy<Value = BundleSettings> {
    (1u32..=6, 1u32..=6, 0u32..=100).prop_map(|(minimum, threshold, percent)| {
        BundleSettings::new(minimum, threshold, percent).unwrap()
    })
}

fn apply(engine: &mut BundleEngine, op: Op) -> Result<(), TestCaseError> {
    let result = match op {
        Op::Add(p, q) => engine.add(ProductId::new(p), q).map(|_| ()),
        Op::Remove(p) => engine.remove(ProductId::new(p)).map(|_| ()),
        Op::Toggle(p) => engine.toggle(ProductId::new(p)).map(|_| ()),
        Op::Change(p, d) => engine.change_quantity(ProductId::new(p), d).map(|_| ()),
    };
    prop_assert!(result.is_ok(), "{:?} failed: {:?}", op, result);
    Ok(())
}

fn check_invariants(engine: &BundleEngine) -> Result<(), TestCaseError> {
    let settings = engine.settings();

    // Quantities are always ≥ 1 and every key is in the catalog
    for entry in engine.selection() {
        prop_assert!(entry.quantity >= 1);
        prop_assert!(engine.catalog().contains(entry.product_id));
    }

    // Total items is the sum of quantities
    let sum: u64 = engine.selection().iter().map(|e| u64::from(e.quantity)).sum();
    prop_assert_eq!(engine.total_items(), sum);

    // Money relations
    prop_assert!(!engine.subtotal().is_negative());
    prop_assert!(!engine.total().is_negative());
    prop_assert_eq!(engine.total(), engine.subtotal() - engine.discount_amount());

    // Discount gate (inclusive)
    let discount_due = engine.total_items() >= u64::from(settings.discount_threshold());
    prop_assert_eq!(engine.is_discount_eligible(), discount_due);
    if !discount_due {
        prop_assert!(engine.discount_amount().is_zero());
    }

    // Checkout gate
    let eligible = engine.total_items() >= u64::from(settings.minimum_items());
    prop_assert_eq!(engine.is_checkout_eligible(), eligible);
    prop_assert_eq!(engine.remaining_for_checkout() == 0, eligible);
    prop_assert_eq!(engine.checkout().is_some(), eligible);
    prop_assert!(engine.progress_percent() <= 100);

    // Snapshot agrees with the queries
    let snapshot = engine.snapshot();
    prop_assert_eq!(snapshot.total_items, engine.total_items());
    prop_assert_eq!(snapshot.total, engine.total());
    prop_assert_eq!(snapshot.lines.len(), engine.selection().len());

    Ok(())
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn invariants_hold_after_every_operation(
        settings in settings_strategy(),
        ops in vec(op_strategy(), 0..200)
    ) {
        let mut engine = BundleEngine::new(catalog(), settings);
        engine.initialize();
        check_invariants(&engine)?;

        for op in ops {
            apply(&mut engine, op)?;
            check_invariants(&engine)?;
        }
    }

    #[test]
    fn toggle_pair_restores_selection(
        ops in vec(op_strategy(), 0..100),
        product in product_strategy()
    ) {
        let mut engine = BundleEngine::new(catalog(), BundleSettings::default());
        for op in ops {
            apply(&mut engine, op)?;
        }

        let product = ProductId::new(product);
        let was_selected = engine.is_selected(product);
        let quantity = engine.quantity_of(product);

        engine.toggle(product).unwrap();
        engine.toggle(product).unwrap();

        prop_assert_eq!(engine.is_selected(product), was_selected);
        if was_selected {
            // Toggling off drops the whole quantity; toggling on adds one
            prop_assert_eq!(engine.quantity_of(product), 1);
        } else {
            prop_assert_eq!(quantity, 0);
            prop_assert_eq!(engine.quantity_of(product), 0);
        }
    }

    #[test]
    fn add_past_limit_never_changes_quantity(
        start in 1u32..=u32::MAX,
        extra in 1u32..=u32::MAX
    ) {
        let mut engine = BundleEngine::new(catalog(), BundleSettings::default());
        let product = ProductId::new(1);
        engine.add(product, start).unwrap();

        let result = engine.add(product, extra);
        match start.checked_add(extra) {
            Some(sum) => prop_assert_eq!(result, Ok(sum)),
            None => {
                prop_assert!(matches!(result, Err(BundleError::Validation(_))));
                prop_assert_eq!(engine.quantity_of(product), start);
            }
        }
    }
}

#[test]
fn test_unknown_products_never_enter_the_selection() {
    let mut engine = BundleEngine::new(catalog(), BundleSettings::default());
    let stranger = ProductId::new(77);

    assert_eq!(engine.add(stranger, 1), Err(BundleError::InvalidProduct(stranger)));
    assert_eq!(engine.toggle(stranger), Err(BundleError::InvalidProduct(stranger)));
    assert_eq!(
        engine.change_quantity(stranger, 3),
        Err(BundleError::InvalidProduct(stranger))
    );
    assert_eq!(engine.remove(stranger), Err(BundleError::InvalidProduct(stranger)));
    assert!(engine.selection().is_empty());
}
