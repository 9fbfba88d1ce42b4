//! Cart Observers

use crate::cart::Cart;

/// Observer notified after every successful cart mutation.
///
/// The store stays the single owner of cart state: observers passively
/// receive a read-only view after each change, in registration order, on the
/// mutating thread. There is no cross-tab or cross-process notification; a
/// concurrent writer to the same slot is only observed on the next hydrate.
pub trait CartObserver {
    /// Called after a mutation has been applied (and, for line mutations,
    /// written through to the slot).
    fn on_cart_changed(&mut self, cart: &Cart<'_>);
}

/// No-op observer for unobserved stores.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl CartObserver for NoopObserver {
    fn on_cart_changed(&mut self, _cart: &Cart<'_>) {}
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;

    use super::*;

    #[test]
    fn noop_observer_accepts_any_cart() {
        let mut observer = NoopObserver;
        let cart = Cart::new(USD);

        let dynamic: &mut dyn CartObserver = &mut observer;
        dynamic.on_cart_changed(&cart);
    }
}
