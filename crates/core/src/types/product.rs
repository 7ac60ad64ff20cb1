//! Product identifiers and the add-to-cart input tuple.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::price::PriceInput;

/// Fallback identifier for products whose title yields no usable characters.
const UNNAMED_PRODUCT: &str = "producto";

/// Stable identifier for a catalog product.
///
/// Identifiers come from the catalog. When a product arrives without one,
/// [`ProductId::resolve`] derives a slug from its title instead of inventing
/// a random value, so the same product maps to the same cart entry across
/// page loads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Wrap an identifier as-is.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Use `id` when it has content, otherwise derive one from `title`.
    ///
    /// ```
    /// use las_torres_core::ProductId;
    ///
    /// assert_eq!(ProductId::resolve(Some("pan-1"), "Pan").as_str(), "pan-1");
    /// assert_eq!(ProductId::resolve(None, "Tarta de Queso").as_str(), "tarta-de-queso");
    /// assert_eq!(ProductId::resolve(Some("  "), "Ensaïmada").as_str(), "ensaimada");
    /// ```
    #[must_use]
    pub fn resolve(id: Option<&str>, title: &str) -> Self {
        match id.map(str::trim) {
            Some(id) if !id.is_empty() => Self(id.to_owned()),
            _ => Self::from_title(title),
        }
    }

    /// Derive a lowercase, hyphenated slug from a product title.
    #[must_use]
    pub fn from_title(title: &str) -> Self {
        let mut slug = String::with_capacity(title.len());
        for ch in title.chars().flat_map(char::to_lowercase) {
            let ch = fold_accent(ch);
            if ch.is_ascii_alphanumeric() {
                slug.push(ch);
            } else if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        }
        while slug.ends_with('-') {
            slug.pop();
        }

        if slug.is_empty() {
            Self(UNNAMED_PRODUCT.to_owned())
        } else {
            Self(slug)
        }
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Map accented Latin letters seen in Spanish and Catalan product names to
/// their base letter.
const fn fold_accent(ch: char) -> char {
    match ch {
        'á' | 'à' | 'â' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        other => other,
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The `{id, title, price}` tuple a product source hands to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInput {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub price: PriceInput,
}

impl ProductInput {
    /// Build an input from any price representation.
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        price: impl Into<PriceInput>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price: price.into(),
        }
    }
}
