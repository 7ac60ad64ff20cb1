//! Unified error handling.
//!
//! Each concern defines its own error enum; `StorefrontError` rolls them up
//! for callers such as the CLI that drive several of them. Cart storage
//! failures never appear here: the cart manager absorbs them.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::contact::ContactError;
use crate::render::RenderError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The storage backend could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The product catalog could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Checkout was not possible.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Contact form rejected.
    #[error("Contact error: {0}")]
    Contact(#[from] ContactError),

    /// Display fragments could not be rendered.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// A referenced product does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl StorefrontError {
    /// Message suitable for showing to a customer, hiding internals.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Checkout(err) => err.to_string(),
            Self::Contact(ContactError::InvalidEmail(_)) => {
                "Introduce un email válido.".to_string()
            }
            Self::Contact(ContactError::MissingField(_)) => {
                "Nombre y mensaje son obligatorios.".to_string()
            }
            Self::NotFound(_) => "Producto no encontrado.".to_string(),
            Self::Config(_) | Self::Storage(_) | Self::Catalog(_) | Self::Render(_) => {
                "Algo ha fallado, inténtalo de nuevo.".to_string()
            }
        }
    }
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
