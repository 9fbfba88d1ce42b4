//! Catalog Fixtures

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    catalog::{Catalog, Product},
    items::ItemKind,
};

/// Errors raised while loading catalog fixtures.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The YAML document could not be parsed.
    #[error(transparent)]
    Parse(#[from] serde_norway::Error),

    /// A price string was not in "AMOUNT CURRENCY" form, or the amount was
    /// unparseable.
    #[error("invalid price: {0}")]
    InvalidPrice(String),

    /// A price used a currency the storefront does not sell in.
    #[error("unknown currency: {0}")]
    UnknownCurrency(String),

    /// Two prices in one fixture used different currencies (expected, found).
    #[error("currency mismatch in catalog fixture: expected {0}, found {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// The fixture contained no products.
    #[error("no products found in fixture")]
    Empty,
}

/// Wrapper for products in YAML.
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Map of sku -> product fixture.
    pub products: FxHashMap<String, ProductFixture>,
}

/// One product entry in a catalog fixture.
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name.
    pub name: String,

    /// Product description.
    #[serde(default)]
    pub description: String,

    /// Product price (e.g., "4.99 USD").
    pub price: String,

    /// Optional pre-sale price in the same format.
    #[serde(default)]
    pub original_price: Option<String>,

    /// Cover or product image reference.
    #[serde(default)]
    pub image: String,

    /// Category tag.
    pub kind: ItemKind,
}

/// Parse a price string (e.g., "4.99 USD") into minor units and currency.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the string is not in "AMOUNT CURRENCY" form,
/// if the amount cannot be parsed as a decimal, or if the currency code is
/// not one the storefront sells in.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let Some((amount_str, currency_code)) = s.trim().split_once(' ') else {
        return Err(FixtureError::InvalidPrice(format!(
            "expected 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount_str
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match currency_code {
        "USD" => USD,
        "EUR" => EUR,
        "GBP" => GBP,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}

/// Loads a YAML catalog fixture into a [`Catalog`].
///
/// Every price in the fixture must agree on one currency, which becomes the
/// catalog (and therefore cart) currency.
///
/// # Errors
///
/// Returns a [`FixtureError`] when parsing fails, a price is invalid,
/// currencies disagree, or the fixture holds no products.
pub fn load_catalog(yaml: &str) -> Result<Catalog<'static>, FixtureError> {
    let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

    let mut currency: Option<&'static Currency> = None;
    let mut entries: Vec<Product<'static>> = Vec::with_capacity(fixture.products.len());

    for (sku, product) in fixture.products {
        let (price_minor, parsed_currency) = parse_price(&product.price)?;

        if let Some(existing) = currency
            && existing != parsed_currency
        {
            return Err(FixtureError::CurrencyMismatch(
                existing.iso_alpha_code,
                parsed_currency.iso_alpha_code,
            ));
        }

        currency = Some(parsed_currency);

        let original_price = match &product.original_price {
            Some(raw) => {
                let (original_minor, original_currency) = parse_price(raw)?;

                if original_currency != parsed_currency {
                    return Err(FixtureError::CurrencyMismatch(
                        parsed_currency.iso_alpha_code,
                        original_currency.iso_alpha_code,
                    ));
                }

                Some(Money::from_minor(original_minor, original_currency))
            }
            None => None,
        };

        entries.push(Product {
            sku,
            name: product.name,
            description: product.description,
            price: Money::from_minor(price_minor, parsed_currency),
            original_price,
            image: product.image,
            kind: product.kind,
        });
    }

    let currency = currency.ok_or(FixtureError::Empty)?;

    let mut catalog = Catalog::new(currency);

    for product in entries {
        catalog.insert(product);
    }

    Ok(catalog)
}
