//! Product catalog, category filtering and the product detail view.
//!
//! The catalog is a YAML file listing the products shown on the page:
//!
//! ```yaml
//! products:
//!   - id: croissant
//!     title: Croissant
//!     description: Mantequilla, hojaldre de tres días.
//!     price: 1.50
//!     category: bolleria
//!     image: img/croissant.jpg
//!   - title: Tarta de Santiago
//!     price: "12,50€"
//!     category: tartas
//! ```
//!
//! Products without an `id` get one derived from their title. Identifiers
//! must be unique; a catalog that repeats one is rejected at load.

use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use las_torres_core::{PriceInput, ProductId, ProductInput, format_eur};

use crate::checkout::{WhatsApp, product_inquiry};

/// Title used when a catalog entry has none.
const DEFAULT_TITLE: &str = "Producto";

/// Shop name appended to image alt text.
const SHOP_NAME: &str = "Panadería Las Torres";

/// Errors raised while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("duplicate product id in catalog: {0}")]
    DuplicateId(ProductId),
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    products: Vec<ProductRecord>,
}

#[derive(Debug, Deserialize)]
struct ProductRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    price: PriceInput,
    #[serde(default)]
    category: String,
    #[serde(default)]
    image: Option<String>,
}

/// A product as shown on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub image: Option<String>,
}

impl Product {
    /// The `{id, title, price}` tuple handed to the cart.
    #[must_use]
    pub fn to_cart_input(&self) -> ProductInput {
        ProductInput::new(self.id.clone(), self.title.clone(), self.price)
    }
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        let title = record
            .title
            .map(|t| t.trim().to_owned())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_owned());

        Self {
            id: ProductId::resolve(record.id.as_deref(), &title),
            title,
            description: record.description.trim().to_owned(),
            price: record.price.resolve(),
            category: record.category.trim().to_owned(),
            image: record.image,
        }
    }
}

/// Which products the grid shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogFilter {
    #[default]
    All,
    Category(String),
}

impl CatalogFilter {
    /// Value carried by the filter button (`all` or the category name).
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Category(category) => category,
        }
    }

    /// Whether `product` passes the filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => &product.category == category,
        }
    }
}

impl FromStr for CatalogFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(if s.is_empty() || s == "all" {
            Self::All
        } else {
            Self::Category(s.to_owned())
        })
    }
}

/// A filter button and whether it is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTab {
    pub value: String,
    pub selected: bool,
}

/// The product list.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Parse a catalog from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or two products share an id.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        Self::from_products(file.products.into_iter().map(Product::from).collect())
    }

    /// Read and parse a catalog file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_yaml(&content)?;
        tracing::info!(path = %path.display(), products = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Build a catalog from products, rejecting repeated ids.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] on the first repeated id.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(&product.id) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }
        Ok(Self { products })
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Distinct categories in catalog order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for product in &self.products {
            let category = product.category.as_str();
            if !category.is_empty() && !categories.contains(&category) {
                categories.push(category);
            }
        }
        categories
    }

    /// Products passing `filter`, in catalog order.
    #[must_use]
    pub fn filter(&self, filter: &CatalogFilter) -> Vec<&Product> {
        self.products.iter().filter(|p| filter.matches(p)).collect()
    }

    /// The filter buttons, `all` first, with the active one selected.
    #[must_use]
    pub fn filter_tabs(&self, active: &CatalogFilter) -> Vec<FilterTab> {
        std::iter::once("all")
            .chain(self.categories())
            .map(|value| FilterTab {
                value: value.to_owned(),
                selected: value == active.value(),
            })
            .collect()
    }
}

/// Everything the product overlay displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetail {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: String,
    pub image: Option<String>,
    pub image_alt: String,
    /// WhatsApp link asking whether the product is available.
    pub inquiry_link: String,
}

impl ProductDetail {
    #[must_use]
    pub fn new(product: &Product, whatsapp: &WhatsApp) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            description: product.description.clone(),
            price: format_eur(product.price),
            image: product.image.clone(),
            image_alt: format!("{} - {SHOP_NAME}", product.title),
            inquiry_link: whatsapp.link(&product_inquiry(&product.title, product.price)),
        }
    }
}
