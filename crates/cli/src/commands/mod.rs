//! CLI command implementations.

use thiserror::Error;

use las_torres_storefront::StorefrontError;

pub mod cart;
pub mod catalog;
pub mod contact;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Neither a catalog id nor a title was given.
    #[error("Give a catalog product id, or --title (and optionally --price)")]
    MissingProduct,

    /// The cart has no entry with this id.
    #[error("Product not in cart: {0}")]
    NotInCart(String),

    /// A storefront operation failed.
    #[error(transparent)]
    Storefront(#[from] StorefrontError),
}

impl CommandError {
    /// Convert any storefront-level error.
    pub fn storefront(err: impl Into<StorefrontError>) -> Self {
        Self::Storefront(err.into())
    }
}
