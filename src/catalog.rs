//! Catalog

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use slotmap::{SlotMap, new_key_type};

use crate::items::{ItemDetails, ItemKind};

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// One catalog entry.
#[derive(Debug, Clone)]
pub struct Product<'a> {
    /// Stable storefront sku; becomes the cart line id.
    pub sku: String,

    /// Product name.
    pub name: String,

    /// Product description.
    pub description: String,

    /// Current price.
    pub price: Money<'a, Currency>,

    /// Optional pre-sale price shown struck through.
    pub original_price: Option<Money<'a, Currency>>,

    /// Cover or product image reference.
    pub image: String,

    /// Category tag.
    pub kind: ItemKind,
}

impl<'a> Product<'a> {
    /// Returns the value snapshot the cart stores for this product.
    ///
    /// Prices are copied at call time; later catalog changes do not reprice
    /// lines already in a cart.
    #[must_use]
    pub fn details(&self) -> ItemDetails<'a> {
        ItemDetails {
            id: self.sku.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            original_price: self.original_price,
            image: self.image.clone(),
            kind: self.kind,
        }
    }
}

/// Product catalog keyed by [`ProductKey`], with a sku lookup index.
///
/// All products share one currency; the catalog is the authority that assigns
/// cart line ids (the skus).
#[derive(Debug)]
pub struct Catalog<'a> {
    products: SlotMap<ProductKey, Product<'a>>,
    key_by_sku: FxHashMap<String, ProductKey>,
    currency: &'static Currency,
}

impl<'a> Catalog<'a> {
    /// Creates an empty catalog in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            products: SlotMap::with_key(),
            key_by_sku: FxHashMap::default(),
            currency,
        }
    }

    /// Inserts a product, indexing it by sku. A repeated sku replaces the
    /// index entry but keeps the earlier product reachable by key.
    pub fn insert(&mut self, product: Product<'a>) -> ProductKey {
        let sku = product.sku.clone();
        let key = self.products.insert(product);

        self.key_by_sku.insert(sku, key);

        key
    }

    /// Looks up a product by key.
    #[must_use]
    pub fn get(&self, key: ProductKey) -> Option<&Product<'a>> {
        self.products.get(key)
    }

    /// Looks up a product by sku.
    #[must_use]
    pub fn by_sku(&self, sku: &str) -> Option<&Product<'a>> {
        self.key_by_sku
            .get(sku)
            .and_then(|key| self.products.get(*key))
    }

    /// Iterates over the products in the catalog.
    pub fn iter(&self) -> impl Iterator<Item = (ProductKey, &Product<'a>)> {
        self.products.iter()
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// The catalog's currency.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
