//! Cart contents and the arithmetic derived from them.
//!
//! [`Cart`] is pure data: an ordered list of [`CartItem`]s keyed by
//! [`ProductId`]. It upholds two invariants through every operation:
//!
//! - no two entries share an id (adding an existing id bumps its quantity)
//! - every entry has `quantity >= 1` (reaching zero removes the entry)
//!
//! Persistence and change notification live in the storefront's cart
//! manager; this type only knows how to mutate itself and how it looks as a
//! JSON snapshot.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::price::{normalize_price, serde_number};
use super::product::ProductId;

/// One distinct product in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    /// Unit price in euros.
    #[serde(with = "serde_number")]
    pub price: Decimal,
    /// Units of this product, always at least one.
    #[serde(alias = "qty")]
    pub quantity: u32,
}

impl CartItem {
    /// Price of all units of this entry, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// Ordered, id-unique collection of cart entries.
///
/// Serializes as a bare JSON array, which is the snapshot format kept in
/// storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from raw entries, restoring the invariants.
    ///
    /// Zero-quantity entries are dropped. Repeated ids are merged into the
    /// first occurrence, keeping its title and price and summing quantities.
    /// Prices are normalised as on [`add`](Self::add).
    #[must_use]
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let mut cart = Self::new();
        for mut item in items {
            if item.quantity == 0 {
                continue;
            }
            item.price = normalize_price(item.price);
            match cart.position(&item.id) {
                Some(index) => {
                    if let Some(existing) = cart.items.get_mut(index) {
                        existing.quantity = existing.quantity.saturating_add(item.quantity);
                    }
                }
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up an entry by product id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    /// Add one unit of a product and return its new quantity.
    ///
    /// An existing entry keeps its title and price; only the quantity moves.
    /// New prices are clamped to `0..=MAX_PRICE` and rounded to what the
    /// JSON snapshot can hold.
    pub fn add(&mut self, id: ProductId, title: String, price: Decimal) -> u32 {
        if let Some(existing) = self.items.iter_mut().find(|item| item.id == id) {
            existing.quantity = existing.quantity.saturating_add(1);
            return existing.quantity;
        }

        self.items.push(CartItem {
            id,
            title,
            price: normalize_price(price),
            quantity: 1,
        });
        1
    }

    /// Remove an entry. Unknown ids leave the cart untouched.
    pub fn remove(&mut self, id: &ProductId) -> Option<CartItem> {
        self.position(id).map(|index| self.items.remove(index))
    }

    /// Set an entry's quantity, removing it when `quantity` is zero.
    ///
    /// Returns `false` if no entry has this id.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: u32) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };

        if quantity == 0 {
            self.items.remove(index);
        } else if let Some(item) = self.items.get_mut(index) {
            item.quantity = quantity;
        }
        true
    }

    /// Take one unit off an entry, removing it when none remain.
    ///
    /// Returns the remaining quantity, or `None` if no entry has this id.
    pub fn decrement(&mut self, id: &ProductId) -> Option<u32> {
        let remaining = self.get(id)?.quantity.saturating_sub(1);
        self.set_quantity(id, remaining);
        Some(remaining)
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of `price * quantity` over all entries, saturating at
    /// `Decimal::MAX`.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |total, item| total.saturating_add(item.line_total()))
    }

    /// Total units across all entries (not distinct products).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |count, item| count.saturating_add(item.quantity))
    }
}

impl From<Vec<CartItem>> for Cart {
    fn from(items: Vec<CartItem>) -> Self {
        Self::from_items(items)
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
