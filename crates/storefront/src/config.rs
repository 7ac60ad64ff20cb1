//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `LAS_TORRES_STORAGE_PATH` - Storage file for the cart (default: .las-torres/storage.json)
//! - `LAS_TORRES_STORAGE_QUOTA_BYTES` - Storage quota, 0 disables it (default: 5242880)
//! - `LAS_TORRES_CATALOG_PATH` - Product catalog YAML (default: catalog.yaml)
//! - `LAS_TORRES_WHATSAPP_NUMBER` - Shop number with country code, digits only (default: 34)
//! - `LAS_TORRES_CONTACT_ACTION` - Contact form action URL (Formspree endpoint)
//! - `LAS_TORRES_CONTACT_DELAY_MS` - Simulated contact send delay (default: 900)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::contact::FormAction;
use crate::storage::DEFAULT_QUOTA_BYTES;

const DEFAULT_STORAGE_PATH: &str = ".las-torres/storage.json";
const DEFAULT_CATALOG_PATH: &str = "catalog.yaml";
const DEFAULT_WHATSAPP_NUMBER: &str = "34";
const DEFAULT_CONTACT_DELAY_MS: u64 = 900;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// File backing the key-value store
    pub storage_path: PathBuf,
    /// Byte quota for the store, `None` for unlimited
    pub storage_quota: Option<usize>,
    /// Product catalog file
    pub catalog_path: PathBuf,
    /// WhatsApp number orders are sent to
    pub whatsapp_number: String,
    /// Where contact form submissions go
    pub contact_action: FormAction,
    /// Delay of the simulated contact send
    pub contact_delay: Duration,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            storage_quota: Some(DEFAULT_QUOTA_BYTES),
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            whatsapp_number: DEFAULT_WHATSAPP_NUMBER.to_owned(),
            contact_action: FormAction::Simulated,
            contact_delay: Duration::from_millis(DEFAULT_CONTACT_DELAY_MS),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns a variable's value
    /// if it is set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let storage_path = get("LAS_TORRES_STORAGE_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH), PathBuf::from);

        let storage_quota = match get("LAS_TORRES_STORAGE_QUOTA_BYTES") {
            Some(raw) => match parse_var::<usize>("LAS_TORRES_STORAGE_QUOTA_BYTES", &raw)? {
                0 => None,
                bytes => Some(bytes),
            },
            None => Some(DEFAULT_QUOTA_BYTES),
        };

        let catalog_path = get("LAS_TORRES_CATALOG_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH), PathBuf::from);

        let whatsapp_number = get("LAS_TORRES_WHATSAPP_NUMBER")
            .unwrap_or_else(|| DEFAULT_WHATSAPP_NUMBER.to_owned());
        validate_phone_number(&whatsapp_number, "LAS_TORRES_WHATSAPP_NUMBER")?;

        let contact_action = FormAction::from_action(get("LAS_TORRES_CONTACT_ACTION").as_deref());

        let contact_delay = match get("LAS_TORRES_CONTACT_DELAY_MS") {
            Some(raw) => Duration::from_millis(parse_var("LAS_TORRES_CONTACT_DELAY_MS", &raw)?),
            None => Duration::from_millis(DEFAULT_CONTACT_DELAY_MS),
        };

        Ok(Self {
            storage_path,
            storage_quota,
            catalog_path,
            whatsapp_number,
            contact_action,
            contact_delay,
        })
    }
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// WhatsApp links take the international number as bare digits.
fn validate_phone_number(number: &str, var_name: &str) -> Result<(), ConfigError> {
    if number.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("must contain digits only, without + or spaces (got '{number}')"),
        ))
    }
}
