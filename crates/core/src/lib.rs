//! Las Torres Core - Shared types library.
//!
//! This crate provides the domain types used across the Las Torres bakery
//! components:
//! - `storefront` - Cart manager, catalog, checkout messages and page logic
//! - `cli` - Command-line driver over a file-backed store
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no storage,
//! no clocks. Cart arithmetic lives here so it can be tested in isolation.
//!
//! # Modules
//!
//! - [`types`] - Prices, product identifiers, cart contents and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
