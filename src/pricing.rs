//! Shipping Pricing

use serde::Deserialize;

/// Flat-rate shipping with a free-shipping threshold, in minor units.
///
/// The cart owns exactly one policy and applies it for every derived read;
/// there is no second shipping computation anywhere in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShippingPolicy {
    /// Flat rate charged when the subtotal is below the threshold.
    pub flat_rate_minor: i64,

    /// Subtotal at which shipping becomes free.
    pub free_threshold_minor: i64,
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            flat_rate_minor: 999,
            free_threshold_minor: 10_000,
        }
    }
}

impl ShippingPolicy {
    /// Shipping cost in minor units for the given subtotal.
    ///
    /// An empty cart ships nothing, and shipping is free at or above the
    /// threshold.
    #[must_use]
    pub fn shipping_minor(&self, subtotal_minor: i64) -> i64 {
        if subtotal_minor == 0 || subtotal_minor >= self.free_threshold_minor {
            0
        } else {
            self.flat_rate_minor
        }
    }
}
