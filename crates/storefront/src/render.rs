//! Cart display.
//!
//! Builds the read-only [`CartView`] from cart state and renders the cart
//! drawer fragments with Askama. [`renderer`] wraps this as a cart
//! subscriber so the display refreshes after every change.

use askama::Template;
use rust_decimal::Decimal;
use thiserror::Error;

use las_torres_core::{Cart, CartItem, format_eur};

use crate::cart::CartChange;

/// Errors raised while rendering a fragment.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template rendering failed: {0}")]
    Template(#[from] askama::Error),
}

/// Cart row display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: String,
    pub title: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u32,
}

impl CartView {
    /// An empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: format_eur(Decimal::ZERO),
            item_count: 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id.to_string(),
            title: item.title.clone(),
            quantity: item.quantity,
            price: format_eur(item.price),
            line_price: format_eur(item.line_total()),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            total: format_eur(cart.total()),
            item_count: cart.item_count(),
        }
    }
}

/// Cart drawer list fragment.
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate<'a> {
    pub cart: &'a CartView,
}

/// Cart count badge fragment.
#[derive(Template)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
    /// Adds the `pulse` class acknowledging a fresh add.
    pub pulse: bool,
}

/// Rendered cart fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCart {
    pub view: CartView,
    pub items_html: String,
    pub count_html: String,
}

/// Render both cart fragments.
///
/// # Errors
///
/// Returns an error if a template fails to render.
pub fn render_cart(view: CartView, pulse: bool) -> Result<RenderedCart, RenderError> {
    let items_html = CartItemsTemplate { cart: &view }.render()?;
    let count_html = CartCountTemplate {
        count: view.item_count,
        pulse,
    }
    .render()?;

    Ok(RenderedCart {
        view,
        items_html,
        count_html,
    })
}

/// Render the fragments for a cart change.
///
/// # Errors
///
/// Returns an error if a template fails to render.
pub fn render_change(change: &CartChange<'_>) -> Result<RenderedCart, RenderError> {
    render_cart(CartView::from(change.cart), change.event.acknowledge())
}

/// A cart subscriber that renders every change and hands the result to
/// `sink`. Render failures are logged and skipped.
pub fn renderer(mut sink: impl FnMut(RenderedCart)) -> impl FnMut(&CartChange<'_>) {
    move |change| match render_change(change) {
        Ok(rendered) => sink(rendered),
        Err(e) => tracing::error!(error = %e, "Failed to render cart"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use las_torres_core::ProductInput;

    use super::*;
    use crate::cart::CartManager;
    use crate::storage::MemoryStore;

    fn cart_with(items: &[(&str, &str, i64, u32)]) -> Cart {
        let mut cart = Cart::new();
        for (id, title, cents, quantity) in items {
            for _ in 0..*quantity {
                cart.add((*id).into(), (*title).to_string(), Decimal::new(*cents, 2));
            }
        }
        cart
    }

    #[test]
    fn test_cart_view_from_cart() {
        let view = CartView::from(&cart_with(&[("croissant", "Croissant", 150, 2)]));
        assert_eq!(view.item_count, 2);
        assert_eq!(view.total, "3,00\u{a0}€");
        assert_eq!(view.items[0].price, "1,50\u{a0}€");
        assert_eq!(view.items[0].line_price, "3,00\u{a0}€");
    }

    #[test]
    fn test_empty_cart_message() {
        let rendered = render_cart(CartView::empty(), false).unwrap();
        assert!(rendered.items_html.contains("Tu carrito está vacío"));
        assert!(!rendered.items_html.contains("cart-remove"));
        assert!(rendered.count_html.contains(">0</span>"));
        assert!(!rendered.count_html.contains("pulse"));
    }

    #[test]
    fn test_rows_render_with_remove_buttons() {
        let view = CartView::from(&cart_with(&[
            ("croissant", "Croissant", 150, 2),
            ("tarta", "Tarta", 1250, 1),
        ]));
        let rendered = render_cart(view, true).unwrap();

        assert!(rendered.items_html.contains("x2 · 1,50\u{a0}€"));
        assert!(rendered.items_html.contains(r#"data-id="tarta""#));
        assert!(rendered.items_html.contains("15,50\u{a0}€"));
        assert!(!rendered.items_html.contains("Tu carrito está vacío"));
        assert!(rendered.count_html.contains("pulse"));
        assert!(rendered.count_html.contains(">3</span>"));
    }

    #[test]
    fn test_titles_are_escaped() {
        let view = CartView::from(&cart_with(&[("x", "<b>Pan</b>", 100, 1)]));
        let rendered = render_cart(view, false).unwrap();
        assert!(!rendered.items_html.contains("<b>Pan</b>"));
        assert!(rendered.items_html.contains("&lt;b&gt;Pan&lt;/b&gt;"));
    }

    #[test]
    fn test_renderer_refreshes_on_every_change() {
        let frames = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&frames);

        let mut manager = CartManager::new(MemoryStore::new());
        manager.subscribe(renderer(move |rendered| sink.borrow_mut().push(rendered)));
        manager.load();
        manager.add(ProductInput::new("croissant", "Croissant", Decimal::new(150, 2)));
        manager.clear();

        let frames = frames.borrow();
        assert_eq!(frames.len(), 3);
        assert!(frames[0].view.is_empty());
        assert_eq!(frames[1].view.item_count, 1);
        assert!(frames[1].count_html.contains("pulse"));
        assert!(frames[2].items_html.contains("Tu carrito está vacío"));
    }
}
