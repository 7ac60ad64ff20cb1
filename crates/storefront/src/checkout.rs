//! Order hand-off over WhatsApp.
//!
//! There is no order backend. Checkout turns the cart into a readable
//! message and a `wa.me` link the customer opens to send it to the shop.
//! Nothing here mutates the cart.

use rust_decimal::Decimal;
use thiserror::Error;

use las_torres_core::{Cart, format_eur};

/// Base URL of WhatsApp click-to-chat links.
const WHATSAPP_BASE_URL: &str = "https://wa.me";

/// Message for a custom order request (cakes, trays for events).
pub const CUSTOM_ORDER_MESSAGE: &str = "Hola, quiero hacer un encargo.";

/// Errors raised when composing an order.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutError {
    /// Checkout was attempted with nothing in the cart.
    #[error("Tu carrito está vacío.")]
    EmptyCart,
}

/// A composed order, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderMessage {
    /// One `"{qty}x {title} ({unit price})"` line per cart entry.
    pub lines: Vec<String>,
    /// Formatted grand total.
    pub total: String,
}

impl OrderMessage {
    /// Full message text.
    #[must_use]
    pub fn text(&self) -> String {
        format!(
            "Hola! Quiero pedir:\n{}\n\nTotal: {}",
            self.lines.join("\n"),
            self.total
        )
    }
}

/// Summarise the cart as an order.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] if the cart has no entries.
pub fn compose_order(cart: &Cart) -> Result<OrderMessage, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let lines = cart
        .items()
        .iter()
        .map(|item| {
            format!(
                "{}x {} ({})",
                item.quantity,
                item.title,
                format_eur(item.price)
            )
        })
        .collect();

    Ok(OrderMessage {
        lines,
        total: format_eur(cart.total()),
    })
}

/// Message asking about a single product from its detail view.
#[must_use]
pub fn product_inquiry(title: &str, price: Decimal) -> String {
    format!(
        "Hola! Me gustaría pedir: *{title}* - Precio: {}. ¿Está disponible?",
        format_eur(price)
    )
}

/// Message for the quick-order link on a product card.
#[must_use]
pub fn quick_order(product: &str) -> String {
    format!("Hola! Quiero pedir: *{product}*")
}

/// Builds click-to-chat links for the shop's WhatsApp number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhatsApp {
    number: String,
}

impl WhatsApp {
    /// `number` is the full international number, digits only (e.g.
    /// `34600111222`).
    #[must_use]
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
        }
    }

    /// Link that opens a chat with `text` pre-filled.
    #[must_use]
    pub fn link(&self, text: &str) -> String {
        format!(
            "{WHATSAPP_BASE_URL}/{}?text={}",
            self.number,
            urlencoding::encode(text)
        )
    }

    /// Link carrying the whole cart as an order.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if the cart has no entries.
    pub fn order_link(&self, cart: &Cart) -> Result<String, CheckoutError> {
        let order = compose_order(cart)?;
        tracing::info!(
            lines = order.lines.len(),
            total = %order.total,
            "Composed WhatsApp order"
        );
        Ok(self.link(&order.text()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use las_torres_core::ProductId;

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        let croissant = ProductId::new("croissant");
        cart.add(croissant.clone(), "Croissant".to_string(), Decimal::new(150, 2));
        cart.add(croissant, "Croissant".to_string(), Decimal::new(150, 2));
        cart.add("tarta".into(), "Tarta de Santiago".to_string(), Decimal::new(1250, 2));
        cart
    }

    #[test]
    fn test_compose_order_lines_and_total() {
        let order = compose_order(&sample_cart()).unwrap();
        assert_eq!(
            order.lines,
            [
                "2x Croissant (1,50\u{a0}€)",
                "1x Tarta de Santiago (12,50\u{a0}€)"
            ]
        );
        assert_eq!(order.total, "15,50\u{a0}€");
        assert_eq!(
            order.text(),
            "Hola! Quiero pedir:\n2x Croissant (1,50\u{a0}€)\n1x Tarta de Santiago (12,50\u{a0}€)\n\nTotal: 15,50\u{a0}€"
        );
    }

    #[test]
    fn test_compose_order_empty_cart() {
        let err = compose_order(&Cart::new()).unwrap_err();
        assert_eq!(err, CheckoutError::EmptyCart);
        assert_eq!(err.to_string(), "Tu carrito está vacío.");
    }

    #[test]
    fn test_link_encodes_text() {
        let wa = WhatsApp::new("34600111222");
        assert_eq!(
            wa.link(CUSTOM_ORDER_MESSAGE),
            "https://wa.me/34600111222?text=Hola%2C%20quiero%20hacer%20un%20encargo."
        );
    }

    #[test]
    fn test_order_link_encodes_newlines_once() {
        let link = WhatsApp::new("34").order_link(&sample_cart()).unwrap();
        assert!(
            link.starts_with("https://wa.me/34?text=Hola%21%20Quiero%20pedir%3A%0A2x%20Croissant")
        );
        assert!(!link.contains("%250A"));
    }

    #[test]
    fn test_order_link_empty_cart() {
        assert_eq!(
            WhatsApp::new("34").order_link(&Cart::new()),
            Err(CheckoutError::EmptyCart)
        );
    }

    #[test]
    fn test_product_messages() {
        assert_eq!(
            product_inquiry("Ensaimada", Decimal::new(280, 2)),
            "Hola! Me gustaría pedir: *Ensaimada* - Precio: 2,80\u{a0}€. ¿Está disponible?"
        );
        assert_eq!(quick_order("Roscón"), "Hola! Quiero pedir: *Roscón*");
    }
}
