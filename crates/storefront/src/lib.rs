//! Las Torres Storefront - page logic for the bakery site.
//!
//! # Architecture
//!
//! - [`cart::CartManager`] owns the cart, persists it through a
//!   [`storage::KeyValueStore`] and notifies subscribers after each change
//! - [`render`] turns cart changes into Askama-rendered drawer fragments
//! - [`catalog`] loads products from YAML and applies category filters
//! - [`checkout`] composes WhatsApp order messages; there is no order backend
//! - [`navigation`] decides which section the scroll spy highlights
//! - [`contact`] validates the contact form and simulates sending it
//!
//! Everything runs synchronously on the caller's thread except the simulated
//! contact send, which awaits a Tokio timer.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod contact;
pub mod error;
pub mod navigation;
pub mod render;
pub mod state;
pub mod storage;

pub use cart::{CART_KEY, CartChange, CartEvent, CartManager};
pub use config::StorefrontConfig;
pub use error::{Result, StorefrontError};
pub use state::AppState;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
