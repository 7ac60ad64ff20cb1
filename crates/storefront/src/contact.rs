//! Contact form handling.
//!
//! Messages are either handed to a configured Formspree endpoint (the host
//! posts the form there) or, when none is configured, accepted through a
//! simulated send so the page still gives feedback.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;
use url::Url;

use las_torres_core::{Email, EmailError};

/// Delay of the simulated send.
pub const DEFAULT_SIMULATED_DELAY: Duration = Duration::from_millis(900);

/// Form id left in the page template until a real endpoint is configured.
const PLACEHOLDER_FORM_ID: &str = "your-form-id";

/// Note shown after a simulated send.
pub const SIMULATED_NOTE: &str = "Mensaje enviado (simulación). Si quieres envío real, configura Formspree y coloca tu action en el form.";

/// Contact form validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
}

/// Raw contact form fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

/// A contact message that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: Email,
    pub message: String,
}

impl ContactForm {
    /// Trim and validate the fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or message is blank or the email is
    /// invalid.
    pub fn validate(&self) -> Result<ContactMessage, ContactError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ContactError::MissingField("name"));
        }
        let message = self.message.trim();
        if message.is_empty() {
            return Err(ContactError::MissingField("message"));
        }

        Ok(ContactMessage {
            name: name.to_owned(),
            email: Email::parse(&self.email)?,
            message: message.to_owned(),
        })
    }
}

/// Where the form's `action` attribute sends submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    /// A configured Formspree endpoint.
    Formspree(Url),
    /// No usable endpoint; submissions are simulated.
    Simulated,
}

impl FormAction {
    /// Classify a form action. Only a parsable `formspree.io` URL that no
    /// longer carries the template placeholder counts as configured.
    #[must_use]
    pub fn from_action(action: Option<&str>) -> Self {
        let Some(url) = action.and_then(|a| Url::parse(a.trim()).ok()) else {
            return Self::Simulated;
        };

        let is_formspree = url
            .host_str()
            .is_some_and(|host| host == "formspree.io" || host.ends_with(".formspree.io"));
        if is_formspree && !url.path().contains(PLACEHOLDER_FORM_ID) {
            Self::Formspree(url)
        } else {
            Self::Simulated
        }
    }
}

/// Acknowledgement of a simulated send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactReceipt {
    pub submitted_at: DateTime<Utc>,
    pub note: String,
}

/// Outcome of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// The host should post the validated message to this endpoint.
    Formspree { endpoint: Url, message: ContactMessage },
    /// The message was accepted by the simulated send.
    Simulated(ContactReceipt),
}

/// Handles contact form submissions.
#[derive(Debug, Clone)]
pub struct ContactService {
    action: FormAction,
    delay: Duration,
}

impl ContactService {
    #[must_use]
    pub const fn new(action: FormAction, delay: Duration) -> Self {
        Self { action, delay }
    }

    #[must_use]
    pub const fn action(&self) -> &FormAction {
        &self.action
    }

    /// Validate and deliver a submission.
    ///
    /// # Errors
    ///
    /// Returns an error if the form fails validation; nothing is sent then.
    #[instrument(skip_all)]
    pub async fn submit(&self, form: &ContactForm) -> Result<Delivery, ContactError> {
        let message = form.validate()?;

        match &self.action {
            FormAction::Formspree(endpoint) => {
                tracing::info!(endpoint = %endpoint, "Contact message routed to Formspree");
                Ok(Delivery::Formspree {
                    endpoint: endpoint.clone(),
                    message,
                })
            }
            FormAction::Simulated => {
                tokio::time::sleep(self.delay).await;
                tracing::info!(email = %message.email, "Contact message accepted (simulated)");
                Ok(Delivery::Simulated(ContactReceipt {
                    submitted_at: Utc::now(),
                    note: SIMULATED_NOTE.to_owned(),
                }))
            }
        }
    }
}
