//! Integration tests for the cart's mutation contract and derived totals.
//!
//! Covers the storefront invariants end to end: idempotent re-adds, absolute
//! quantity updates, removal via zero quantity, the free-shipping boundary,
//! and drawer behaviour across `clear`.

use std::{cell::RefCell, rc::Rc};

use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use longbox::{
    cart::Cart,
    items::{ItemDetails, ItemKind, LineItem},
    pricing::ShippingPolicy,
    store::{CartObserver, CartStore, MemorySlot},
};

fn details(id: &str, price_minor: i64) -> ItemDetails<'static> {
    ItemDetails {
        id: id.to_string(),
        name: format!("Item {id}"),
        description: format!("Description for {id}"),
        price: Money::from_minor(price_minor, USD),
        original_price: None,
        image: format!("/covers/{id}.jpg"),
        kind: ItemKind::Comic,
    }
}

#[test]
fn re_add_merges_into_one_line_with_first_write_wins_fields() -> TestResult {
    let mut cart = Cart::new(USD);

    cart.add_item(details("inkspill-001", 499))?;

    let mut second = details("inkspill-001", 999);
    second.name = "A different name".to_string();
    second.kind = ItemKind::Book;

    cart.add_item(second)?;

    assert_eq!(cart.len(), 1);

    let line = cart.get("inkspill-001").ok_or("expected merged line")?;

    assert_eq!(line.quantity(), 2);
    assert_eq!(line.details().name, "Item inkspill-001");
    assert_eq!(line.details().kind, ItemKind::Comic);
    assert_eq!(line.unit_price(), &Money::from_minor(499, USD));

    Ok(())
}

#[test]
fn totals_match_sum_over_lines_after_many_mutations() -> TestResult {
    let mut cart = Cart::new(USD);

    cart.add_item(details("inkspill-001", 499))?;
    cart.add_item(details("gazette-tote", 1299))?;
    cart.add_item(details("inkspill-001", 499))?;
    assert!(cart.update_quantity("gazette-tote", 4));
    cart.add_item(details("nightpress-omnibus", 2999))?;
    assert!(cart.remove_item("inkspill-001"));
    assert!(cart.update_quantity("nightpress-omnibus", 2));

    let expected_subtotal: i64 = cart
        .iter()
        .map(|line| line.unit_price().to_minor_units() * line.quantity())
        .sum();
    let expected_count: i64 = cart.iter().map(LineItem::quantity).sum();

    assert_eq!(cart.subtotal_minor(), expected_subtotal);
    assert_eq!(cart.total_item_count(), expected_count);
    assert_eq!(cart.subtotal(), Money::from_minor(expected_subtotal, USD));

    Ok(())
}

#[test]
fn shipping_is_charged_below_the_threshold_and_waived_at_it() -> TestResult {
    // Storefront defaults: flat 9.99, free at 100.00.
    let mut just_below = Cart::new(USD);
    just_below.add_item(details("almost", 9_999))?;

    assert_eq!(just_below.shipping_cost(), Money::from_minor(999, USD));
    assert_eq!(just_below.grand_total(), Money::from_minor(10_998, USD));

    let mut at_threshold = Cart::new(USD);
    at_threshold.add_item(details("exact", 10_000))?;

    assert_eq!(at_threshold.shipping_cost(), Money::from_minor(0, USD));
    assert_eq!(at_threshold.grand_total(), Money::from_minor(10_000, USD));

    let empty = Cart::new(USD);

    assert_eq!(empty.shipping_cost(), Money::from_minor(0, USD));
    assert_eq!(empty.grand_total(), Money::from_minor(0, USD));

    Ok(())
}

#[test]
fn zero_quantity_removes_and_later_updates_stay_noops() -> TestResult {
    let mut cart = Cart::new(USD);

    cart.add_item(details("inkspill-001", 499))?;

    assert!(cart.update_quantity("inkspill-001", 0));
    assert!(cart.is_empty());

    // Only add_item creates lines; a positive update on the removed id does
    // nothing.
    assert!(!cart.update_quantity("inkspill-001", 5));
    assert!(cart.is_empty());
    assert_eq!(cart.total_item_count(), 0);

    Ok(())
}

#[test]
fn clear_zeroes_totals_and_leaves_the_drawer_alone() -> TestResult {
    let mut cart = Cart::new(USD);

    cart.add_item(details("inkspill-001", 499))?;
    assert!(cart.drawer_open());

    cart.clear();

    assert_eq!(cart.total_item_count(), 0);
    assert_eq!(cart.subtotal(), Money::from_minor(0, USD));
    assert!(cart.drawer_open());

    // And with the drawer closed beforehand it stays closed.
    let mut closed = Cart::new(USD);
    closed.add_item(details("inkspill-001", 499))?;
    closed.close_drawer();

    closed.clear();

    assert!(!closed.drawer_open());

    Ok(())
}

#[test]
fn custom_shipping_policy_flows_through_the_store() -> TestResult {
    let policy = ShippingPolicy {
        flat_rate_minor: 500,
        free_threshold_minor: 2_000,
    };

    let mut store = CartStore::hydrate(MemorySlot::new(), USD, policy);

    store.add_item(details("inkspill-001", 1_000))?;

    assert_eq!(store.cart().shipping_cost(), Money::from_minor(500, USD));
    assert_eq!(store.cart().grand_total(), Money::from_minor(1_500, USD));

    store.add_item(details("gazette-tote", 1_000))?;

    assert_eq!(store.cart().shipping_cost(), Money::from_minor(0, USD));
    assert_eq!(store.cart().grand_total(), Money::from_minor(2_000, USD));

    Ok(())
}

/// Observer that snapshots the grand total at each notification.
struct TotalsProbe {
    totals_minor: Rc<RefCell<Vec<i64>>>,
}

impl CartObserver for TotalsProbe {
    fn on_cart_changed(&mut self, cart: &Cart<'_>) {
        self.totals_minor
            .borrow_mut()
            .push(cart.grand_total().to_minor_units());
    }
}

#[test]
fn every_surface_reads_the_same_derived_totals() -> TestResult {
    // The presentation layer never computes totals itself; observers see the
    // same derived values the accessors return.
    let totals_minor = Rc::new(RefCell::new(Vec::new()));

    let mut store = CartStore::hydrate(MemorySlot::new(), USD, ShippingPolicy::default());

    store.subscribe(Box::new(TotalsProbe {
        totals_minor: Rc::clone(&totals_minor),
    }));

    store.add_item(details("inkspill-001", 499))?;
    store.update_quantity("inkspill-001", 3);

    // 499 + 999 shipping, then 1497 + 999 shipping.
    assert_eq!(*totals_minor.borrow(), vec![1_498, 2_496]);
    assert_eq!(store.cart().grand_total(), Money::from_minor(2_496, USD));

    Ok(())
}
