//! Contact commands.

use tracing::info;

use las_torres_storefront::AppState;
use las_torres_storefront::contact::{ContactForm, Delivery};

use super::CommandError;

/// Submit the contact form.
///
/// # Errors
///
/// Returns an error if the form fails validation.
pub async fn send(
    state: &AppState,
    name: String,
    email: String,
    message: String,
) -> Result<(), CommandError> {
    let form = ContactForm {
        name,
        email,
        message,
    };

    info!("Enviando…");
    match state.submit_contact(&form).await? {
        Delivery::Formspree { endpoint, message } => {
            info!(email = %message.email, "Post this message to {endpoint}");
        }
        Delivery::Simulated(receipt) => {
            info!(submitted_at = %receipt.submitted_at, "{}", receipt.note);
        }
    }
    Ok(())
}

/// Log the WhatsApp link for a custom order.
pub fn custom_order(state: &AppState) {
    info!("{}", state.custom_order_link());
}
