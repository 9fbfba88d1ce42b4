//! Cart Records
//!
//! Wire contract for the durable slot: a JSON list of camelCase records with
//! prices as plain decimal numbers. There is no version field; a payload that
//! does not match the expected shape is treated as absent data, never as a
//! fatal parse error.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::items::{ItemDetails, ItemKind, LineItem};

/// Errors raised when converting a stored record back into a cart line.
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    /// A stored price could not be represented in minor units (id).
    #[error("record {0} has an unrepresentable price")]
    UnrepresentablePrice(String),
}

/// One stored line item record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    /// Catalog id.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Display description.
    pub description: String,

    /// Unit price in major units.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Optional struck-through price in major units.
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub original_price: Option<Decimal>,

    /// Opaque image reference.
    pub image: String,

    /// Line quantity.
    pub quantity: i64,

    /// Category tag.
    #[serde(rename = "type")]
    pub kind: ItemKind,
}

impl ItemRecord {
    /// Builds a record from a cart line.
    #[must_use]
    pub fn from_line(line: &LineItem<'_>) -> Self {
        let details = line.details();

        Self {
            id: details.id.clone(),
            name: details.name.clone(),
            description: details.description.clone(),
            price: Decimal::new(details.price.to_minor_units(), 2),
            original_price: details
                .original_price
                .as_ref()
                .map(|price| Decimal::new(price.to_minor_units(), 2)),
            image: details.image.clone(),
            quantity: line.quantity(),
            kind: details.kind,
        }
    }

    /// Converts the record back into a cart line priced in `currency`.
    ///
    /// The slot contract carries bare numbers with no currency field, so the
    /// hydrating caller supplies the currency.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] if a stored price cannot be represented in
    /// minor units.
    pub fn into_line(self, currency: &'static Currency) -> Result<LineItem<'static>, RecordError> {
        let price_minor = minor_units(self.price)
            .ok_or_else(|| RecordError::UnrepresentablePrice(self.id.clone()))?;

        let original_minor = match self.original_price {
            Some(value) => Some(
                minor_units(value)
                    .ok_or_else(|| RecordError::UnrepresentablePrice(self.id.clone()))?,
            ),
            None => None,
        };

        let details = ItemDetails {
            id: self.id,
            name: self.name,
            description: self.description,
            price: Money::from_minor(price_minor, currency),
            original_price: original_minor.map(|minor| Money::from_minor(minor, currency)),
            image: self.image,
            kind: self.kind,
        };

        Ok(LineItem::with_quantity(details, self.quantity))
    }
}

/// Decodes a slot payload into records.
///
/// Any payload that fails to parse as a record list yields an empty list:
/// malformed storage means an empty cart, not an error.
#[must_use]
pub fn decode(payload: &str) -> Vec<ItemRecord> {
    match serde_json::from_str(payload) {
        Ok(records) => records,
        Err(error) => {
            tracing::warn!(%error, "discarding unreadable cart slot payload");
            Vec::new()
        }
    }
}

/// Encodes cart lines into a slot payload.
///
/// # Errors
///
/// Returns a [`serde_json::Error`] if serialization fails.
pub fn encode(lines: &[LineItem<'_>]) -> Result<String, serde_json::Error> {
    let records: Vec<ItemRecord> = lines.iter().map(ItemRecord::from_line).collect();

    serde_json::to_string(&records)
}

/// Converts a major-unit decimal into minor units (two decimal places).
fn minor_units(amount: Decimal) -> Option<i64> {
    amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
}
