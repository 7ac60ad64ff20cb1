//! Page state: everything the storefront wires together at load.

use std::io::ErrorKind;

use las_torres_core::ProductId;

use crate::cart::CartManager;
use crate::catalog::{Catalog, CatalogError, CatalogFilter, Product, ProductDetail};
use crate::checkout::{CUSTOM_ORDER_MESSAGE, WhatsApp, quick_order};
use crate::config::StorefrontConfig;
use crate::contact::{ContactForm, ContactService, Delivery};
use crate::error::{Result, StorefrontError};
use crate::storage::{FileStore, KeyValueStore};

/// Storefront state for one page session.
///
/// Owns the catalog and the cart manager; the cart is restored from storage
/// when the state is created.
#[derive(Debug)]
pub struct AppState<S = FileStore> {
    config: StorefrontConfig,
    catalog: Catalog,
    cart: CartManager<S>,
    whatsapp: WhatsApp,
    contact: ContactService,
}

impl AppState<FileStore> {
    /// Open the configured storage file and catalog.
    ///
    /// A missing catalog file yields an empty catalog; the cart still works
    /// with products added by id, title and price.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage file cannot be read or the catalog
    /// exists but is invalid.
    pub fn open(config: StorefrontConfig) -> Result<Self> {
        let store = FileStore::open(&config.storage_path)?.with_quota(config.storage_quota);

        let catalog = match Catalog::load(&config.catalog_path) {
            Ok(catalog) => catalog,
            Err(CatalogError::Io { path, source }) if source.kind() == ErrorKind::NotFound => {
                tracing::warn!(path = %path, "Catalog file not found, starting with no products");
                Catalog::default()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self::new(config, catalog, store))
    }
}

impl<S: KeyValueStore> AppState<S> {
    /// Assemble state from parts and restore the cart.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog, store: S) -> Self {
        let whatsapp = WhatsApp::new(config.whatsapp_number.clone());
        let contact = ContactService::new(config.contact_action.clone(), config.contact_delay);
        let mut cart = CartManager::new(store);
        cart.load();

        Self {
            config,
            catalog,
            cart,
            whatsapp,
            contact,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &CartManager<S> {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartManager<S> {
        &mut self.cart
    }

    #[must_use]
    pub const fn whatsapp(&self) -> &WhatsApp {
        &self.whatsapp
    }

    fn product(&self, id: &ProductId) -> Result<&Product> {
        self.catalog
            .get(id)
            .ok_or_else(|| StorefrontError::NotFound(id.to_string()))
    }

    /// Add a catalog product to the cart by id. Returns its new quantity.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::NotFound`] if the catalog has no such id.
    pub fn add_product(&mut self, id: &ProductId) -> Result<u32> {
        let input = self.product(id)?.to_cart_input();
        Ok(self.cart.add(input))
    }

    /// Products shown for a filter.
    #[must_use]
    pub fn visible_products(&self, filter: &CatalogFilter) -> Vec<&Product> {
        self.catalog.filter(filter)
    }

    /// Detail view for a product.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::NotFound`] if the catalog has no such id.
    pub fn product_detail(&self, id: &ProductId) -> Result<ProductDetail> {
        Ok(ProductDetail::new(self.product(id)?, &self.whatsapp))
    }

    /// WhatsApp link carrying the cart as an order.
    ///
    /// # Errors
    ///
    /// Returns a checkout error if the cart is empty.
    pub fn checkout_link(&self) -> Result<String> {
        Ok(self.whatsapp.order_link(self.cart.cart())?)
    }

    /// WhatsApp link ordering a single product by name.
    #[must_use]
    pub fn quick_order_link(&self, product: &str) -> String {
        self.whatsapp.link(&quick_order(product))
    }

    /// WhatsApp link for a custom order request.
    #[must_use]
    pub fn custom_order_link(&self) -> String {
        self.whatsapp.link(CUSTOM_ORDER_MESSAGE)
    }

    /// Submit the contact form.
    ///
    /// # Errors
    ///
    /// Returns a contact error if the form is invalid.
    pub async fn submit_contact(&self, form: &ContactForm) -> Result<Delivery> {
        Ok(self.contact.submit(form).await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use rust_decimal::Decimal;

    use super::*;
    use crate::cart::CART_KEY;
    use crate::storage::MemoryStore;

    const CATALOG: &str = "products:\n  - id: croissant\n    title: Croissant\n    price: 1.50\n    category: bolleria\n  - id: tarta\n    title: Tarta\n    price: \"12,50€\"\n    category: tartas\n";

    fn state(store: MemoryStore) -> AppState<MemoryStore> {
        let config = StorefrontConfig {
            whatsapp_number: "34600111222".to_string(),
            contact_delay: Duration::ZERO,
            ..StorefrontConfig::default()
        };
        AppState::new(config, Catalog::from_yaml(CATALOG).unwrap(), store)
    }

    #[test]
    fn test_new_restores_cart() {
        let store = MemoryStore::new().with_entry(
            CART_KEY,
            r#"[{"id":"tarta","title":"Tarta","price":12.5,"quantity":2}]"#,
        );
        let state = state(store);
        assert_eq!(state.cart().item_count(), 2);
        assert_eq!(state.cart().total(), Decimal::new(2500, 2));
    }

    #[test]
    fn test_add_product_by_id() {
        let mut state = state(MemoryStore::new());
        assert_eq!(state.add_product(&"tarta".into()).unwrap(), 1);
        assert_eq!(state.add_product(&"tarta".into()).unwrap(), 2);
        assert_eq!(state.cart().total(), Decimal::new(2500, 2));

        let err = state.add_product(&"pan".into()).unwrap_err();
        assert!(matches!(err, StorefrontError::NotFound(id) if id == "pan"));
    }

    #[test]
    fn test_checkout_link() {
        let mut state = state(MemoryStore::new());
        assert!(matches!(
            state.checkout_link(),
            Err(StorefrontError::Checkout(_))
        ));

        state.add_product(&"croissant".into()).unwrap();
        let link = state.checkout_link().unwrap();
        assert!(link.starts_with("https://wa.me/34600111222?text="));
        assert!(link.contains("1x%20Croissant"));
    }

    #[test]
    fn test_visible_products_and_detail() {
        let state = state(MemoryStore::new());
        let visible = state.visible_products(&"tartas".parse().unwrap());
        assert_eq!(visible.len(), 1);

        let detail = state.product_detail(&"tarta".into()).unwrap();
        assert_eq!(detail.price, "12,50\u{a0}€");
    }

    #[test]
    fn test_order_links() {
        let state = state(MemoryStore::new());
        assert_eq!(
            state.custom_order_link(),
            "https://wa.me/34600111222?text=Hola%2C%20quiero%20hacer%20un%20encargo."
        );
        assert!(state.quick_order_link("Roscón").contains("Rosc%C3%B3n"));
    }

    #[tokio::test]
    async fn test_submit_contact() {
        let state = state(MemoryStore::new());
        let form = ContactForm {
            name: "Pedro".to_string(),
            email: "pedro@correo.es".to_string(),
            message: "Hola".to_string(),
        };
        assert!(matches!(
            state.submit_contact(&form).await.unwrap(),
            Delivery::Simulated(_)
        ));
    }
}
