//! Cart

use std::collections::HashSet;

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    items::{ItemDetails, LineItem},
    pricing::ShippingPolicy,
};

/// Errors raised when cart input violates the caller contract.
///
/// Well-formed callers never hit these; they exist to fail fast at the
/// boundary rather than let a bad line drift into the totals.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// An item was submitted with an empty id.
    #[error("item id must not be empty")]
    EmptyId,

    /// An item carried a negative price (id).
    #[error("item {0} has a negative price")]
    NegativePrice(String),

    /// An item's currency differs from the cart currency (id, item currency, cart currency).
    #[error("item {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(String, &'static str, &'static str),

    /// A restored line carried a quantity below 1 (id, quantity).
    #[error("item {0} has non-positive quantity {1}")]
    NonPositiveQuantity(String, i64),

    /// Two restored lines shared one id.
    #[error("duplicate item id {0}")]
    DuplicateId(String),
}

/// Derived totals for a cart, recomputed from the line list on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct CartTotals<'a> {
    /// Sum of all line quantities.
    pub item_count: i64,

    /// Sum of unit price x quantity over all lines.
    pub subtotal: Money<'a, Currency>,

    /// Shipping cost under the cart's policy.
    pub shipping: Money<'a, Currency>,

    /// Subtotal plus shipping.
    pub grand_total: Money<'a, Currency>,
}

/// Shopping cart: an ordered, exclusively-owned list of line items.
///
/// Insertion order is display order; the cart is never re-sorted. All derived
/// values are recomputed from the line list on every read, so they cannot
/// drift from the lines that produce them. External callers pass value
/// snapshots in and receive read-only views back; nothing outside the cart
/// holds a mutable reference to its lines.
#[derive(Debug, Clone)]
pub struct Cart<'a> {
    lines: Vec<LineItem<'a>>,
    currency: &'static Currency,
    policy: ShippingPolicy,
    drawer_open: bool,
}

impl<'a> Cart<'a> {
    /// Creates an empty cart with the default shipping policy.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self::with_policy(currency, ShippingPolicy::default())
    }

    /// Creates an empty cart with the given shipping policy.
    #[must_use]
    pub fn with_policy(currency: &'static Currency, policy: ShippingPolicy) -> Self {
        Cart {
            lines: Vec::new(),
            currency,
            policy,
            drawer_open: false,
        }
    }

    /// Creates a cart from restored lines, e.g. when hydrating from storage.
    ///
    /// The drawer starts closed regardless of how the previous session ended.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if any line has an empty id, a negative price,
    /// a currency other than the cart's, a quantity below 1, or an id already
    /// used by an earlier line.
    pub fn with_lines(
        lines: impl Into<Vec<LineItem<'a>>>,
        currency: &'static Currency,
        policy: ShippingPolicy,
    ) -> Result<Self, CartError> {
        let lines = lines.into();

        let mut seen: HashSet<&str> = HashSet::with_capacity(lines.len());

        for line in &lines {
            validate_details(line.details(), currency)?;

            if line.quantity() < 1 {
                return Err(CartError::NonPositiveQuantity(
                    line.id().to_string(),
                    line.quantity(),
                ));
            }

            if !seen.insert(line.id()) {
                return Err(CartError::DuplicateId(line.id().to_string()));
            }
        }

        drop(seen);

        Ok(Cart {
            lines,
            currency,
            policy,
            drawer_open: false,
        })
    }

    /// Adds one unit of the item and opens the drawer.
    ///
    /// If a line with the same id already exists its quantity increases by 1
    /// and every descriptive field keeps its original value (first write
    /// wins); otherwise a new line is appended with quantity 1.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] when the details violate the caller contract;
    /// the cart is left unchanged.
    pub fn add_item(&mut self, details: ItemDetails<'a>) -> Result<(), CartError> {
        validate_details(&details, self.currency)?;

        if let Some(line) = self.lines.iter_mut().find(|line| line.id() == details.id) {
            line.increment();
        } else {
            self.lines.push(LineItem::new(details));
        }

        self.drawer_open = true;

        Ok(())
    }

    /// Removes the line with the given id.
    ///
    /// Returns whether a line was removed; an absent id is a no-op, not an
    /// error.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let before = self.lines.len();

        self.lines.retain(|line| line.id() != id);

        self.lines.len() != before
    }

    /// Sets an absolute quantity for the line with the given id.
    ///
    /// A quantity of 0 or below behaves exactly like [`Cart::remove_item`].
    /// An absent id with a positive quantity is a no-op: only
    /// [`Cart::add_item`] creates lines. Returns whether the cart changed.
    pub fn update_quantity(&mut self, id: &str, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(id);
        }

        match self.lines.iter_mut().find(|line| line.id() == id) {
            Some(line) => {
                line.set_quantity(quantity);
                true
            }
            None => false,
        }
    }

    /// Empties the cart. The drawer flag keeps whatever value it had.
    ///
    /// Returns whether any lines were removed.
    pub fn clear(&mut self) -> bool {
        let had_lines = !self.lines.is_empty();

        self.lines.clear();

        had_lines
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_item_count(&self) -> i64 {
        self.lines.iter().map(LineItem::quantity).sum()
    }

    /// Subtotal over all lines in minor units.
    #[must_use]
    pub fn subtotal_minor(&self) -> i64 {
        self.lines.iter().map(LineItem::line_total_minor).sum()
    }

    /// Subtotal over all lines.
    pub fn subtotal(&self) -> Money<'a, Currency> {
        Money::from_minor(self.subtotal_minor(), self.currency)
    }

    /// Shipping cost for the current subtotal under the cart's policy.
    pub fn shipping_cost(&self) -> Money<'a, Currency> {
        Money::from_minor(
            self.policy.shipping_minor(self.subtotal_minor()),
            self.currency,
        )
    }

    /// Subtotal plus shipping.
    pub fn grand_total(&self) -> Money<'a, Currency> {
        let subtotal_minor = self.subtotal_minor();
        let shipping_minor = self.policy.shipping_minor(subtotal_minor);

        Money::from_minor(subtotal_minor + shipping_minor, self.currency)
    }

    /// Snapshot of all derived totals.
    #[must_use]
    pub fn totals(&self) -> CartTotals<'a> {
        CartTotals {
            item_count: self.total_item_count(),
            subtotal: self.subtotal(),
            shipping: self.shipping_cost(),
            grand_total: self.grand_total(),
        }
    }

    /// Looks up a line by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&LineItem<'a>> {
        self.lines.iter().find(|line| line.id() == id)
    }

    /// Iterates over the lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem<'a>> {
        self.lines.iter()
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[LineItem<'a>] {
        &self.lines
    }

    /// Number of distinct lines (not units) in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The cart's currency.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// The cart's shipping policy.
    #[must_use]
    pub fn policy(&self) -> ShippingPolicy {
        self.policy
    }

    /// Whether the cart drawer is currently shown.
    #[must_use]
    pub fn drawer_open(&self) -> bool {
        self.drawer_open
    }

    /// Shows the cart drawer.
    pub fn open_drawer(&mut self) {
        self.drawer_open = true;
    }

    /// Hides the cart drawer.
    pub fn close_drawer(&mut self) {
        self.drawer_open = false;
    }
}

fn validate_details(details: &ItemDetails<'_>, currency: &'static Currency) -> Result<(), CartError> {
    if details.id.is_empty() {
        return Err(CartError::EmptyId);
    }

    if details.price.to_minor_units() < 0 {
        return Err(CartError::NegativePrice(details.id.clone()));
    }

    let item_currency = details.price.currency();

    if item_currency != currency {
        return Err(CartError::CurrencyMismatch(
            details.id.clone(),
            item_currency.iso_alpha_code,
            currency.iso_alpha_code,
        ));
    }

    if let Some(original) = &details.original_price {
        if original.to_minor_units() < 0 {
            return Err(CartError::NegativePrice(details.id.clone()));
        }

        let original_currency = original.currency();

        if original_currency != currency {
            return Err(CartError::CurrencyMismatch(
                details.id.clone(),
                original_currency.iso_alpha_code,
                currency.iso_alpha_code,
            ));
        }
    }

    Ok(())
}
