//! Products
//!
//! Catalog entities as returned by the remote product service. Products are
//! read-only to this crate: the cart snapshots them, the workflow never
//! touches them.

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a product in the remote catalog.
pub type ProductId = Uuid;

/// Identifier of the vendor owning a product.
pub type VendorId = Uuid;

/// Approval status of a product in the marketplace.
///
/// The status vocabulary is owned by the server and may grow independently of
/// client deployments, so any unrecognised value decodes to [`Unknown`] rather
/// than failing deserialization.
///
/// [`Unknown`]: ProductStatus::Unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    /// Awaiting admin approval; not visible in the public catalog.
    Pending,

    /// Approved and purchasable.
    Approved,

    /// Rejected by an admin.
    Rejected,

    /// Approved but currently without stock.
    OutOfStock,

    /// A status value this client does not recognise.
    #[serde(other)]
    Unknown,
}

/// A catalog product.
///
/// `stock` is the quantity ceiling the cart enforces; it is a snapshot from
/// the moment the product was fetched and is never refreshed by this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,

    /// Owning vendor.
    pub vendor_id: VendorId,

    /// Display name.
    pub name: String,

    /// Long-form description.
    #[serde(default)]
    pub description: String,

    /// Catalog category.
    pub category: String,

    /// Unit price. Non-negative; exact decimal, rounded only at display time.
    pub price: Decimal,

    /// Units available for purchase. Non-negative.
    pub stock: u32,

    /// Image URLs.
    #[serde(default)]
    pub images: Vec<String>,

    /// Marketplace approval status.
    pub status: ProductStatus,

    /// Creation instant, when the server provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,

    /// Last-update instant, when the server provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_decodes_wire_names() {
        let status: ProductStatus =
            serde_json::from_str("\"OUT_OF_STOCK\"").expect("known status should decode");

        assert_eq!(status, ProductStatus::OutOfStock);
    }

    #[test]
    fn unrecognised_status_decodes_to_unknown() {
        let status: ProductStatus =
            serde_json::from_str("\"DISCONTINUED\"").expect("unknown status should still decode");

        assert_eq!(status, ProductStatus::Unknown);
    }
}
