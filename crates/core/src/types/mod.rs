//! Core types for the Las Torres storefront.
//!
//! This module provides type-safe wrappers for the shop's domain concepts.

pub mod cart;
pub mod email;
pub mod price;
pub mod product;

pub use cart::{Cart, CartItem};
pub use email::{Email, EmailError};
pub use price::{
    CurrencyCode, MAX_PRICE, Price, PriceInput, format_eur, normalize_price, parse_price_text,
    serde_number,
};
pub use product::{ProductId, ProductInput};
