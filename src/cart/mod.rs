//! Cart
//!
//! The buyer's selected-for-purchase items: an ordered collection of
//! (product snapshot, quantity) pairs, unique by product id, with every
//! quantity capped at the product's available stock.
//!
//! Capping is silent. Mutations never error when a request exceeds stock;
//! they store the capped value and return the quantity that was actually
//! applied, so callers that want to warn the user can compare the result
//! against what they asked for.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::products::{Product, ProductId};

pub mod store;

/// A product snapshot with the selected quantity.
///
/// Invariant: `0 < quantity <= product.stock`, where `product.stock` is the
/// value captured when the product was added. The snapshot is never refreshed
/// when catalog stock changes elsewhere; reconciling a sold-out product is
/// checkout's responsibility, not the cart's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product as it was when added; its `stock` is this entry's ceiling.
    pub product: Product,

    /// Selected quantity.
    pub quantity: u32,
}

/// The shopping cart.
///
/// The visibility flag is transient UI state and is excluded from any
/// persisted snapshot (see [`store::PersistedCart`]).
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CartItem>,
    is_open: bool,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cart from a restored item snapshot. Items are taken verbatim;
    /// restored quantities were valid when saved.
    #[must_use]
    pub fn with_items(items: impl Into<Vec<CartItem>>) -> Self {
        Self {
            items: items.into(),
            is_open: false,
        }
    }

    /// Add `quantity` units of a product, merging with any existing entry for
    /// the same product and capping at the product's stock.
    ///
    /// Returns the quantity now stored for the product. A result smaller than
    /// the sum requested means the request was capped; zero means nothing was
    /// stored (a product with no stock never enters the cart).
    pub fn add_item(&mut self, product: Product, quantity: u32) -> u32 {
        if let Some(index) = self
            .items
            .iter()
            .position(|item| item.product.id == product.id)
        {
            let Some(item) = self.items.get_mut(index) else {
                return 0;
            };

            // The merge caps against the stock of the product passed in. A
            // cap of zero destroys the entry: no stored quantity may be zero.
            let merged = item.quantity.saturating_add(quantity).min(product.stock);

            if merged == 0 {
                self.items.remove(index);
                return 0;
            }

            item.quantity = merged;
            return merged;
        }

        let applied = quantity.min(product.stock);

        if applied > 0 {
            self.items.push(CartItem {
                product,
                quantity: applied,
            });
        }

        applied
    }

    /// Remove the entry for a product. A missing entry is a no-op, not an
    /// error.
    pub fn remove_item(&mut self, product_id: ProductId) {
        self.items.retain(|item| item.product.id != product_id);
    }

    /// Set the quantity for a product already in the cart.
    ///
    /// A zero or negative quantity removes the entry. Positive quantities are
    /// capped against the stock captured in the stored snapshot (not
    /// re-fetched). Returns the quantity now stored, zero after removal or
    /// when the product is not in the cart.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> u32 {
        if quantity <= 0 {
            self.remove_item(product_id);
            return 0;
        }

        let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.product.id == product_id)
        else {
            return 0;
        };

        let requested = u32::try_from(quantity).unwrap_or(u32::MAX);
        item.quantity = requested.min(item.product.stock);
        item.quantity
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Toggle the cart sidebar visibility flag.
    pub fn toggle_open(&mut self) {
        self.is_open = !self.is_open;
    }

    /// Show the cart sidebar.
    pub fn open(&mut self) {
        self.is_open = true;
    }

    /// Hide the cart sidebar.
    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Whether the cart sidebar is visible.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Total number of units across all entries; zero for an empty cart.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity))
            .sum()
    }

    /// Sum of `price * quantity` over all entries; zero for an empty cart.
    ///
    /// Exact decimal arithmetic throughout; rounding is display-only.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.items
            .iter()
            .map(|item| item.product.price * Decimal::from(item.quantity))
            .sum()
    }

    /// Stored quantity for a product, or zero when absent.
    #[must_use]
    pub fn item_quantity(&self, product_id: ProductId) -> u32 {
        self.items
            .iter()
            .find(|item| item.product.id == product_id)
            .map_or(0, |item| item.quantity)
    }

    /// The entries, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Iterate over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartItem> {
        self.items.iter()
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
