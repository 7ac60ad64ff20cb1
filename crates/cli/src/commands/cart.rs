//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! lt-cli cart add croissant
//! lt-cli cart add --title "Tarta de Santiago" --price "12,50€"
//! lt-cli cart set croissant 3
//! lt-cli cart remove croissant
//! lt-cli cart checkout
//! ```

use tracing::info;

use las_torres_core::{PriceInput, ProductId, ProductInput, format_eur};
use las_torres_storefront::AppState;
use las_torres_storefront::render::{CartView, render_cart};

use super::CommandError;

/// Log cart contents and totals.
pub fn show(state: &AppState) {
    let cart = state.cart();
    if cart.is_empty() {
        info!("Tu carrito está vacío");
        return;
    }

    for item in cart.cart() {
        info!(
            "  {}x {} ({}) = {}",
            item.quantity,
            item.title,
            format_eur(item.price),
            format_eur(item.line_total())
        );
    }
    info!("Items: {}", cart.item_count());
    info!("Total: {}", format_eur(cart.total()));
}

/// Add one unit of a product.
///
/// With a title the product is added as given, its id resolved from `id` or
/// the title. Without one, `id` must name a catalog product.
///
/// # Errors
///
/// Returns an error if no product is identified or the id is not in the
/// catalog.
pub fn add(
    state: &mut AppState,
    id: Option<&str>,
    title: Option<&str>,
    price: Option<&str>,
) -> Result<(), CommandError> {
    let quantity = match (id, title) {
        (id, Some(title)) => {
            let input = ProductInput {
                id: ProductId::resolve(id, title),
                title: title.to_owned(),
                price: price.map_or_else(PriceInput::default, PriceInput::from),
            };
            state.cart_mut().add(input)
        }
        (Some(id), None) => state.add_product(&ProductId::new(id))?,
        (None, None) => return Err(CommandError::MissingProduct),
    };

    info!(quantity, "Added to cart");
    show(state);
    Ok(())
}

/// Remove a product. Unknown ids are reported but not an error.
pub fn remove(state: &mut AppState, id: &str) {
    match state.cart_mut().remove(&ProductId::new(id)) {
        Some(item) => info!("Removed {} from cart", item.title),
        None => info!("{id} was not in the cart"),
    }
    show(state);
}

/// Set a product's quantity.
///
/// # Errors
///
/// Returns an error if the cart has no entry with this id.
pub fn set(state: &mut AppState, id: &str, quantity: u32) -> Result<(), CommandError> {
    if !state.cart_mut().set_quantity(&ProductId::new(id), quantity) {
        return Err(CommandError::NotInCart(id.to_owned()));
    }
    show(state);
    Ok(())
}

/// Empty the cart.
pub fn clear(state: &mut AppState) {
    state.cart_mut().clear();
    info!("Cart cleared");
}

/// Log the cart drawer fragments.
///
/// # Errors
///
/// Returns an error if rendering fails.
pub fn render(state: &AppState) -> Result<(), CommandError> {
    let rendered =
        render_cart(CartView::from(state.cart().cart()), false).map_err(CommandError::storefront)?;
    info!("{}", rendered.items_html);
    info!("{}", rendered.count_html);
    Ok(())
}

/// Log the WhatsApp order link.
///
/// # Errors
///
/// Returns an error if the cart is empty.
pub fn checkout(state: &AppState) -> Result<(), CommandError> {
    let link = state.checkout_link()?;
    info!("Open this link to send your order:");
    info!("{link}");
    Ok(())
}
