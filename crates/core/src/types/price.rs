//! Money handling for catalog prices and cart totals.
//!
//! Prices are kept as [`Decimal`] so that totals never pick up floating point
//! drift. Two edges of the system deal in less tidy values:
//!
//! - Product markup hands over prices either as numbers or as display text
//!   such as `"12,50€"`. [`PriceInput`] models both and [`PriceInput::resolve`]
//!   turns either into a non-negative amount, defaulting to zero.
//! - The persisted cart snapshot stores prices as plain JSON numbers. The
//!   [`serde_number`] module bridges `Decimal` to that representation.
//!
//! Display follows the Spanish locale used on the site: `1,50 €`.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// First numeric run in a display string, with `.` or `,` as separator.
static NUMERIC_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]*[.,]?[0-9]+").expect("Invalid regex"));

/// Highest unit price a product can carry. Larger inputs are capped so cart
/// arithmetic stays far from `Decimal`'s range.
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (euros, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// A price in euros, the only currency the shop sells in.
    #[must_use]
    pub const fn eur(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::EUR)
    }

    /// Format for display using Spanish conventions (e.g., `12,50 €`).
    #[must_use]
    pub fn display(&self) -> String {
        format!(
            "{}\u{a0}{}",
            format_decimal_es(self.amount),
            self.currency_code.symbol()
        )
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    EUR,
    USD,
    GBP,
}

impl CurrencyCode {
    /// Currency symbol as printed after the amount.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::EUR => "€",
            Self::USD => "US$",
            Self::GBP => "GBP",
        }
    }
}

/// Format an amount in euros, e.g. `3` becomes `3,00 €`.
#[must_use]
pub fn format_eur(amount: Decimal) -> String {
    Price::eur(amount).display()
}

/// Format a decimal with two fraction digits, a `,` decimal separator and `.`
/// grouping. Spanish grouping only kicks in from five integer digits, so
/// `1234,50` stays ungrouped while `12.345,00` does not.
fn format_decimal_es(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    if int_part.len() >= 5 {
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }
    } else {
        grouped.push_str(int_part);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped},{frac_part}")
}

/// Extract a price from display text.
///
/// Takes the first numeric run in the text, accepting `.` or `,` as the
/// decimal separator. Text without digits yields zero.
///
/// ```
/// use las_torres_core::parse_price_text;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_price_text("12,50€"), Decimal::new(1250, 2));
/// assert_eq!(parse_price_text("Precio: 3.20 €"), Decimal::new(320, 2));
/// assert_eq!(parse_price_text("consultar"), Decimal::ZERO);
/// ```
#[must_use]
pub fn parse_price_text(text: &str) -> Decimal {
    NUMERIC_RUN
        .find(text)
        .and_then(|m| Decimal::from_str(&m.as_str().replace(',', ".")).ok())
        .unwrap_or(Decimal::ZERO)
}

/// Parse the textual form of a JSON number into a non-negative decimal.
///
/// Numbers `Decimal` cannot hold are clamped: too large becomes
/// [`MAX_PRICE`], too small to represent becomes zero.
fn decimal_from_number_text(text: &str) -> Decimal {
    if let Ok(value) = Decimal::from_str(text).or_else(|_| Decimal::from_scientific(text)) {
        return value.max(Decimal::ZERO);
    }

    let clamped = match text.parse::<f64>() {
        Ok(value) if value > 1.0 => MAX_PRICE,
        _ => Decimal::ZERO,
    };
    tracing::warn!(price = text, clamped = %clamped, "Price out of range, clamped");
    clamped
}

/// Correctly rounded `f64` for an amount, going through its exact text.
fn to_f64_exact(amount: Decimal) -> Option<f64> {
    f64::from_str(&amount.to_string())
        .ok()
        .filter(|value| value.is_finite())
}

/// Bring an amount into the range and precision a cart stores.
///
/// Negative amounts become zero and amounts above [`MAX_PRICE`] are capped.
/// The result is then rounded to the nearest value a JSON number holds, so a
/// cart written to storage reads back with identical prices.
///
/// ```
/// use las_torres_core::normalize_price;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(normalize_price(Decimal::new(1250, 2)), Decimal::new(1250, 2));
/// assert_eq!(normalize_price(Decimal::new(-3, 0)), Decimal::ZERO);
///
/// let long = normalize_price(Decimal::from_str("0.12345678901234567891").unwrap());
/// assert_eq!(normalize_price(long), long);
/// ```
#[must_use]
pub fn normalize_price(amount: Decimal) -> Decimal {
    let clamped = amount.clamp(Decimal::ZERO, MAX_PRICE);
    if amount > MAX_PRICE {
        tracing::warn!(price = %amount, "Price above maximum, capped");
    }

    to_f64_exact(clamped)
        .and_then(serde_json::Number::from_f64)
        .map_or(clamped, |number| decimal_from_number_text(&number.to_string()))
}

/// A price as supplied by the product source.
///
/// Markup may carry a pre-parsed number (`data-price="1.5"`) or only the
/// visible label (`"12,50€"`). Both are accepted; nothing else is validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceInput {
    /// A numeric amount.
    Amount(Decimal),
    /// Display text that still needs extracting.
    Text(String),
}

impl PriceInput {
    /// Resolve into a storable amount (see [`normalize_price`]).
    /// Unparsable text and negative amounts become zero.
    #[must_use]
    pub fn resolve(&self) -> Decimal {
        match self {
            Self::Amount(amount) => normalize_price(*amount),
            Self::Text(text) => normalize_price(parse_price_text(text)),
        }
    }
}

impl Default for PriceInput {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<Decimal> for PriceInput {
    fn from(amount: Decimal) -> Self {
        Self::Amount(amount)
    }
}

impl From<&str> for PriceInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for PriceInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl Serialize for PriceInput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Amount(amount) => serde_number::serialize(amount, serializer),
            Self::Text(text) => serializer.serialize_str(text),
        }
    }
}

impl<'de> Deserialize<'de> for PriceInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::Number(number) => {
                Self::Amount(decimal_from_number_text(&number.to_string()))
            }
            serde_json::Value::String(text) => Self::Text(text),
            // null, booleans and structures carry no usable price
            _ => Self::default(),
        })
    }
}

/// Serialize a [`Decimal`] as a JSON number and read it back leniently.
///
/// Use with `#[serde(with = "las_torres_core::serde_number")]`. Reading also
/// accepts display text, so snapshots written by older pages that stored the
/// label still load.
pub mod serde_number {
    use super::{Decimal, Deserialize, Deserializer, PriceInput, Serializer, to_f64_exact};

    /// Write the amount as a floating point number.
    ///
    /// Amounts passed through [`normalize_price`](super::normalize_price)
    /// read back unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount does not fit in an `f64`.
    pub fn serialize<S: Serializer>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        let value = to_f64_exact(*amount).ok_or_else(|| {
            <S::Error as serde::ser::Error>::custom(format!("price {amount} out of range"))
        })?;
        serializer.serialize_f64(value)
    }

    /// Read a number or price label into a non-negative amount.
    ///
    /// # Errors
    ///
    /// Returns an error only if the underlying deserializer fails.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        PriceInput::deserialize(deserializer).map(|input| input.resolve())
    }
}
