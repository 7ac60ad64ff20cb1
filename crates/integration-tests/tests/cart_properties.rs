//! Property-based tests for cart invariants.
//!
//! Random operation sequences are applied to a `CartManager` over an
//! unlimited `MemoryStore`, checking after every step that:
//! - ids are unique and quantities positive
//! - the count and total agree with the entries
//! - the stored snapshot reloads to the same cart, whatever the prices

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;

use proptest::prelude::*;

use las_torres_core::{Cart, PriceInput, ProductId, ProductInput};
use las_torres_storefront::{CartManager, MemoryStore};
use rust_decimal::Decimal;

// =============================================================================
// Proptest strategies
// =============================================================================

const PRODUCTS: [&str; 5] = ["croissant", "napolitana", "tarta", "pan", "roscon"];

#[derive(Debug, Clone)]
enum Op {
    Add(usize),
    AddPriced(usize, PriceInput),
    Remove(usize),
    Set(usize, u32),
    Decrement(usize),
    Clear,
}

/// Price in cents for a product slot, fixed so repeated adds agree.
fn cents(slot: usize) -> i64 {
    [150, 180, 1250, 95, 2200][slot]
}

fn input(slot: usize) -> ProductInput {
    let id = PRODUCTS[slot];
    ProductInput::new(id, id.to_uppercase(), Decimal::new(cents(slot), 2))
}

/// Prices as a product source may hand them over: any decimal amount,
/// including negative and long-fraction ones, or a display label.
fn arb_price() -> impl Strategy<Value = PriceInput> {
    prop_oneof![
        (any::<i64>(), 0u32..=20).prop_map(|(m, s)| PriceInput::from(Decimal::new(m, s))),
        "[0-9]{1,12}[,.][0-9]{1,22}(€| €)?".prop_map(PriceInput::from),
    ]
}

fn arb_op() -> impl Strategy<Value = Op> {
    let slot = 0..PRODUCTS.len();
    prop_oneof![
        3 => slot.clone().prop_map(Op::Add),
        2 => (slot.clone(), arb_price()).prop_map(|(s, p)| Op::AddPriced(s, p)),
        1 => slot.clone().prop_map(Op::Remove),
        1 => (slot.clone(), 0u32..5).prop_map(|(s, q)| Op::Set(s, q)),
        1 => slot.prop_map(Op::Decrement),
        1 => Just(Op::Clear),
    ]
}

fn apply(manager: &mut CartManager<MemoryStore>, op: &Op) {
    match *op {
        Op::Add(slot) => {
            manager.add(input(slot));
        }
        Op::AddPriced(slot, ref price) => {
            let id = PRODUCTS[slot];
            manager.add(ProductInput::new(id, id, price.clone()));
        }
        Op::Remove(slot) => {
            manager.remove(&ProductId::new(PRODUCTS[slot]));
        }
        Op::Set(slot, quantity) => {
            manager.set_quantity(&ProductId::new(PRODUCTS[slot]), quantity);
        }
        Op::Decrement(slot) => {
            manager.decrement(&ProductId::new(PRODUCTS[slot]));
        }
        Op::Clear => manager.clear(),
    }
}

fn assert_invariants(cart: &Cart) {
    let ids: HashSet<_> = cart.items().iter().map(|item| &item.id).collect();
    assert_eq!(ids.len(), cart.len(), "duplicate ids in {cart:?}");
    assert!(cart.items().iter().all(|item| item.quantity >= 1));

    let count: u32 = cart.items().iter().map(|item| item.quantity).sum();
    assert_eq!(cart.item_count(), count);

    let total: Decimal = cart
        .items()
        .iter()
        .map(|item| item.price * Decimal::from(item.quantity))
        .sum();
    assert_eq!(cart.total(), total);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_invariants_hold_after_every_op(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut manager = CartManager::new(MemoryStore::new());
        manager.load();
        for op in &ops {
            apply(&mut manager, op);
            assert_invariants(manager.cart());
        }
    }

    #[test]
    fn prop_snapshot_reloads_identically(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut manager = CartManager::new(MemoryStore::new());
        manager.load();
        for op in &ops {
            apply(&mut manager, op);
        }
        let expected = manager.cart().clone();

        let mut reloaded = CartManager::new(manager.into_store());
        reloaded.load();
        prop_assert_eq!(reloaded.cart(), &expected);
    }

    #[test]
    fn prop_adds_count_per_product(slots in prop::collection::vec(0..PRODUCTS.len(), 1..30)) {
        let mut manager = CartManager::new(MemoryStore::new());
        for &slot in &slots {
            manager.add(input(slot));
        }

        for (slot, id) in PRODUCTS.iter().enumerate() {
            let expected = u32::try_from(slots.iter().filter(|&&s| s == slot).count()).unwrap();
            let actual = manager.cart().get(&ProductId::new(*id)).map_or(0, |item| item.quantity);
            prop_assert_eq!(actual, expected);
        }
        prop_assert_eq!(manager.item_count(), u32::try_from(slots.len()).unwrap());
    }

    #[test]
    fn prop_removing_absent_id_changes_nothing(ops in prop::collection::vec(arb_op(), 0..20)) {
        let mut manager = CartManager::new(MemoryStore::new());
        for op in &ops {
            apply(&mut manager, op);
        }
        let before = manager.cart().clone();

        prop_assert!(manager.remove(&ProductId::new("no-existe")).is_none());
        prop_assert_eq!(manager.cart(), &before);
    }

    #[test]
    fn prop_text_prices_never_negative(text in "\\PC{0,12}") {
        let mut manager = CartManager::new(MemoryStore::new());
        manager.add(ProductInput::new("x", "X", text.as_str()));
        prop_assert!(manager.total() >= Decimal::ZERO);
    }
}
