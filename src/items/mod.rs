//! Line Items

use std::fmt;

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

/// Category tag for a purchasable item.
///
/// Used for display and grouping only; pricing and shipping never branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A physical comic issue.
    Comic,

    /// Apparel, prints and other merchandise.
    Merchandise,

    /// A digital or collected book.
    Book,
}

impl ItemKind {
    /// Returns the lowercase wire/display label for this kind.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ItemKind::Comic => "comic",
            ItemKind::Merchandise => "merchandise",
            ItemKind::Book => "book",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The descriptive snapshot a caller hands to the cart when adding an item.
///
/// Prices are fixed at insertion time; later catalog changes do not reprice
/// lines already in a cart. `original_price` is display-only (strikethrough)
/// and never participates in totals.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDetails<'a> {
    /// Opaque identifier assigned by the catalog, unique within a cart.
    pub id: String,

    /// Display name, already localized by the caller.
    pub name: String,

    /// Display description.
    pub description: String,

    /// Unit price.
    pub price: Money<'a, Currency>,

    /// Optional pre-sale price shown struck through.
    pub original_price: Option<Money<'a, Currency>>,

    /// Opaque image reference (URL or path).
    pub image: String,

    /// Category tag.
    pub kind: ItemKind,
}

/// One cart line: item details plus a quantity of at least 1.
///
/// A quantity driven to 0 or below removes the line from the cart entirely;
/// lines are never retained at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem<'a> {
    details: ItemDetails<'a>,
    quantity: i64,
}

impl<'a> LineItem<'a> {
    /// Creates a line with quantity 1.
    #[must_use]
    pub fn new(details: ItemDetails<'a>) -> Self {
        Self {
            details,
            quantity: 1,
        }
    }

    /// Creates a line with an explicit quantity.
    ///
    /// Callers are responsible for the `quantity >= 1` invariant; the cart
    /// validates it on every path that restores lines.
    pub(crate) fn with_quantity(details: ItemDetails<'a>, quantity: i64) -> Self {
        Self { details, quantity }
    }

    /// Returns the item details for this line.
    pub fn details(&self) -> &ItemDetails<'a> {
        &self.details
    }

    /// Returns the catalog id for this line.
    pub fn id(&self) -> &str {
        &self.details.id
    }

    /// Returns the quantity on this line.
    #[must_use]
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Returns the unit price for this line.
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.details.price
    }

    /// Returns the line total (unit price x quantity) in minor units.
    #[must_use]
    pub fn line_total_minor(&self) -> i64 {
        self.details.price.to_minor_units() * self.quantity
    }

    /// Returns the line total as money.
    pub fn line_total(&self) -> Money<'a, Currency> {
        Money::from_minor(self.line_total_minor(), self.details.price.currency())
    }

    pub(crate) fn increment(&mut self) {
        self.quantity += 1;
    }

    pub(crate) fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;

    use super::*;

    fn test_details(id: &str, price_minor: i64) -> ItemDetails<'static> {
        ItemDetails {
            id: id.to_string(),
            name: format!("Item {id}"),
            description: String::new(),
            price: Money::from_minor(price_minor, USD),
            original_price: None,
            image: String::new(),
            kind: ItemKind::Comic,
        }
    }

    #[test]
    fn new_line_starts_at_quantity_one() {
        let line = LineItem::new(test_details("issue-1", 499));

        assert_eq!(line.quantity(), 1);
        assert_eq!(line.id(), "issue-1");
    }

    #[test]
    fn line_total_scales_with_quantity() {
        let mut line = LineItem::new(test_details("issue-1", 499));

        line.set_quantity(3);

        assert_eq!(line.line_total_minor(), 1497);
        assert_eq!(line.line_total(), Money::from_minor(1497, USD));
    }

    #[test]
    fn increment_adds_one_unit() {
        let mut line = LineItem::new(test_details("issue-1", 499));

        line.increment();
        line.increment();

        assert_eq!(line.quantity(), 3);
    }

    #[test]
    fn kind_labels_match_wire_values() {
        assert_eq!(ItemKind::Comic.label(), "comic");
        assert_eq!(ItemKind::Merchandise.label(), "merchandise");
        assert_eq!(ItemKind::Book.label(), "book");
    }

    #[test]
    fn kind_display_uses_label() {
        assert_eq!(ItemKind::Book.to_string(), "book");
    }
}
