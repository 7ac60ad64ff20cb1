//! Catalog commands.

use tracing::info;

use las_torres_core::{ProductId, format_eur};
use las_torres_storefront::AppState;
use las_torres_storefront::catalog::CatalogFilter;

use super::CommandError;

/// List products passing a category filter.
pub fn list(state: &AppState, category: &str) {
    let filter: CatalogFilter = category.parse().unwrap_or_default();

    let tabs = state.catalog().filter_tabs(&filter);
    let tabs: Vec<String> = tabs
        .iter()
        .map(|tab| {
            if tab.selected {
                format!("[{}]", tab.value)
            } else {
                tab.value.clone()
            }
        })
        .collect();
    info!("Categories: {}", tabs.join(" "));

    let products = state.visible_products(&filter);
    if products.is_empty() {
        info!("No products in this category");
        return;
    }
    for product in products {
        info!(
            "  {:<24} {:<32} {}",
            product.id,
            product.title,
            format_eur(product.price)
        );
    }
}

/// Show a product's detail view.
///
/// # Errors
///
/// Returns an error if the catalog has no such product.
pub fn show(state: &AppState, id: &str) -> Result<(), CommandError> {
    let detail = state.product_detail(&ProductId::new(id))?;
    info!("{}", detail.title);
    if !detail.description.is_empty() {
        info!("{}", detail.description);
    }
    info!("Precio: {}", detail.price);
    if let Some(image) = &detail.image {
        info!("Imagen: {image} ({})", detail.image_alt);
    }
    info!("Preguntar por WhatsApp: {}", detail.inquiry_link);
    Ok(())
}
