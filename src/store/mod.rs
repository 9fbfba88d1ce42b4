//! Cart Store
//!
//! Owns the cart, its durable slot and its observers. The slot is read once
//! at construction to hydrate the cart; after that every successful mutation
//! writes the full line list through to the slot and notifies observers.
//! There is no pre-hydration state visible to callers: a store always exposes
//! a cart, empty in the worst case.

use std::fmt;

use rusty_money::iso::Currency;

use crate::{
    cart::{Cart, CartError},
    items::ItemDetails,
    pricing::ShippingPolicy,
};

pub mod observer;
pub mod records;
pub mod slot;

pub use observer::{CartObserver, NoopObserver};
pub use slot::{FileSlot, MemorySlot, SlotError, StorageSlot};

/// Write-through cart store bound to one durable slot.
pub struct CartStore<'a, S: StorageSlot> {
    cart: Cart<'a>,
    slot: S,
    observers: Vec<Box<dyn CartObserver>>,
}

impl<'a, S: StorageSlot> CartStore<'a, S> {
    /// Hydrates a store from the slot's current payload.
    ///
    /// The slot is read exactly once, before any mutation is accepted. A
    /// missing, unreadable or invalid payload yields an empty cart; hydration
    /// itself never fails and never surfaces an error to the caller.
    #[must_use]
    pub fn hydrate(slot: S, currency: &'static Currency, policy: ShippingPolicy) -> Self {
        let cart = match slot.read() {
            Some(payload) => restore_cart(&payload, currency, policy),
            None => Cart::with_policy(currency, policy),
        };

        Self {
            cart,
            slot,
            observers: Vec::new(),
        }
    }

    /// Returns a read-only view of the cart.
    #[must_use]
    pub fn cart(&self) -> &Cart<'a> {
        &self.cart
    }

    /// Registers an observer notified after every successful mutation.
    pub fn subscribe(&mut self, observer: Box<dyn CartObserver>) {
        self.observers.push(observer);
    }

    /// Adds one unit of the item, merging with an existing line by id, then
    /// persists and notifies observers. Opens the cart drawer.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] when the details violate the caller contract
    /// (empty id, negative price, currency mismatch); the cart is unchanged
    /// and nothing is persisted or notified.
    pub fn add_item(&mut self, details: ItemDetails<'a>) -> Result<(), CartError> {
        self.cart.add_item(details)?;
        self.after_mutation();

        Ok(())
    }

    /// Removes the line with the given id; an absent id is a no-op.
    pub fn remove_item(&mut self, id: &str) {
        if self.cart.remove_item(id) {
            self.after_mutation();
        }
    }

    /// Sets an absolute quantity for a line. Zero or below removes the line;
    /// an absent id is a no-op (only [`CartStore::add_item`] creates lines).
    pub fn update_quantity(&mut self, id: &str, quantity: i64) {
        if self.cart.update_quantity(id, quantity) {
            self.after_mutation();
        }
    }

    /// Empties the cart; the drawer flag is untouched.
    pub fn clear(&mut self) {
        if self.cart.clear() {
            self.after_mutation();
        }
    }

    /// Shows the cart drawer and notifies observers. Nothing is persisted:
    /// the slot holds line items only.
    pub fn open_drawer(&mut self) {
        if !self.cart.drawer_open() {
            self.cart.open_drawer();
            self.notify();
        }
    }

    /// Hides the cart drawer and notifies observers.
    pub fn close_drawer(&mut self) {
        if self.cart.drawer_open() {
            self.cart.close_drawer();
            self.notify();
        }
    }

    fn after_mutation(&mut self) {
        self.persist();
        self.notify();
    }

    /// Writes the full line list through to the slot.
    ///
    /// A failed write is logged and swallowed: the in-memory cart stays
    /// authoritative for the session and the next mutation writes again.
    fn persist(&mut self) {
        match records::encode(self.cart.lines()) {
            Ok(payload) => {
                if let Err(error) = self.slot.write(&payload) {
                    tracing::warn!(%error, "cart slot write failed; keeping in-memory state");
                }
            }
            Err(error) => {
                tracing::warn!(%error, "cart state not serializable; keeping in-memory state");
            }
        }
    }

    fn notify(&mut self) {
        for observer in &mut self.observers {
            observer.on_cart_changed(&self.cart);
        }
    }
}

impl<S: StorageSlot + fmt::Debug> fmt::Debug for CartStore<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("slot", &self.slot)
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Rebuilds a cart from a slot payload, falling back to an empty cart on any
/// malformed content.
fn restore_cart(
    payload: &str,
    currency: &'static Currency,
    policy: ShippingPolicy,
) -> Cart<'static> {
    let records = records::decode(payload);

    let mut lines = Vec::with_capacity(records.len());

    for record in records {
        match record.into_line(currency) {
            Ok(line) => lines.push(line),
            Err(error) => {
                tracing::warn!(%error, "discarding cart slot with unrepresentable record");
                return Cart::with_policy(currency, policy);
            }
        }
    }

    match Cart::with_lines(lines, currency, policy) {
        Ok(cart) => cart,
        Err(error) => {
            tracing::warn!(%error, "discarding cart slot that violates cart invariants");
            Cart::with_policy(currency, policy)
        }
    }
}
