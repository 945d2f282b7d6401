//! Orders
//!
//! Order entities as returned by the remote order service. Orders are
//! immutable on the client except for `status` (and its associated note and
//! estimated delivery date), which changes only through the status-update
//! interface (see [`workflow`]).

use jiff::{Timestamp, civil::Date};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::products::{ProductId, VendorId};

pub mod status;
pub mod workflow;

pub use status::{OrderStatus, StatusDescription};

/// Identifier of an order.
pub type OrderId = Uuid;

/// Identifier of the buyer who placed an order.
pub type BuyerId = Uuid;

/// One line of an order: a product snapshot taken at purchase time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    /// Product purchased.
    pub product_id: ProductId,

    /// Product name at purchase time.
    pub product_name: String,

    /// Product image at purchase time, when one was set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_image: Option<String>,

    /// Vendor fulfilling this line.
    pub vendor_id: VendorId,

    /// Units purchased.
    pub quantity: u32,

    /// Unit price at purchase time.
    pub unit_price: Decimal,

    /// `unit_price * quantity`, computed server-side.
    pub subtotal: Decimal,
}

/// Shipping address captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    /// Recipient name.
    pub full_name: String,

    /// Street address.
    pub address_line1: String,

    /// Additional address detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,

    /// City.
    pub city: String,

    /// State or region.
    pub state: String,

    /// Postal code.
    pub postal_code: String,

    /// Country.
    pub country: String,

    /// Contact phone number.
    pub phone_number: String,
}

/// An order as returned by the remote order service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order identifier.
    pub id: OrderId,

    /// Buyer who placed the order.
    pub user_id: BuyerId,

    /// Purchased lines.
    pub items: Vec<OrderLine>,

    /// Total amount charged.
    pub total_amount: Decimal,

    /// Current lifecycle status. Legacy wire values are normalized to their
    /// canonical variants during deserialization.
    pub status: OrderStatus,

    /// Shipping address snapshot.
    pub shipping_address: ShippingAddress,

    /// Free-text reason recorded when the order was cancelled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,

    /// Free-text note attached to the latest status update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_note: Option<String>,

    /// Committed delivery date, set when the order was scheduled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_delivery_date: Option<Date>,

    /// When the order was placed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,

    /// When the order was confirmed, if it has been.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed_at: Option<Timestamp>,

    /// When the order was shipped, if it has been.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipped_at: Option<Timestamp>,

    /// When the order was delivered, if it has been.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<Timestamp>,

    /// When the order was cancelled, if it has been.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<Timestamp>,
}
