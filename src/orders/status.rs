//! Order statuses
//!
//! The order lifecycle as the vendor console sees it: a canonical status
//! enumeration with legacy aliases normalized once at the wire boundary, a
//! vendor transition table, and presentation metadata that is total over
//! every value the server might send.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

/// Set of statuses offered as next transitions. No row of the table has more
/// than three entries.
pub type NextStatuses = SmallVec<[OrderStatus; 3]>;

/// Lifecycle status of an order.
///
/// The wire format is SCREAMING_SNAKE_CASE. Legacy values from older
/// persisted orders normalize to canonical variants at deserialization:
/// `CREATED` becomes [`Placed`]; `CONFIRMED`, `PENDING` and `PROCESSING`
/// become [`Preparing`], the variant that carries their shared transition
/// row. Anything else decodes to [`Unknown`] so a server-side vocabulary
/// change can never fail decoding.
///
/// [`Placed`]: OrderStatus::Placed
/// [`Preparing`]: OrderStatus::Preparing
/// [`Unknown`]: OrderStatus::Unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Initial status when the order is placed.
    #[serde(alias = "CREATED")]
    Placed,

    /// The vendor is preparing the order.
    #[serde(alias = "CONFIRMED", alias = "PENDING", alias = "PROCESSING")]
    Preparing,

    /// The order has been handed to the carrier.
    Shipped,

    /// The order is out for delivery.
    OutForDelivery,

    /// A delivery date has been committed. This is a date overlay on the
    /// shipping states rather than a later pipeline stage, so the graph has
    /// a back-edge: `Shipped` and `OutForDelivery` both reach it, and it
    /// leads back into them.
    DeliveryScheduled,

    /// The order has been delivered. Terminal.
    Delivered,

    /// The order was cancelled. Terminal.
    Cancelled,

    /// A status value this client does not recognise. No transitions are
    /// offered from it.
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Parse a wire status value, normalizing legacy aliases. Unrecognised
    /// values map to [`OrderStatus::Unknown`].
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value {
            "PLACED" | "CREATED" => Self::Placed,
            "PREPARING" | "CONFIRMED" | "PENDING" | "PROCESSING" => Self::Preparing,
            "SHIPPED" => Self::Shipped,
            "OUT_FOR_DELIVERY" => Self::OutForDelivery,
            "DELIVERY_SCHEDULED" => Self::DeliveryScheduled,
            "DELIVERED" => Self::Delivered,
            "CANCELLED" => Self::Cancelled,
            _ => Self::Unknown,
        }
    }

    /// Canonical wire representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Placed => "PLACED",
            Self::Preparing => "PREPARING",
            Self::Shipped => "SHIPPED",
            Self::OutForDelivery => "OUT_FOR_DELIVERY",
            Self::DeliveryScheduled => "DELIVERY_SCHEDULED",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Statuses a vendor may move an order to next.
    ///
    /// Empty for terminal and unrecognised statuses: the fail-safe is to
    /// offer no action rather than to error. Buyer-initiated cancellation is
    /// a separate, always-available operation and is not part of this table.
    #[must_use]
    pub fn next_statuses(self) -> NextStatuses {
        match self {
            Self::Placed => smallvec![Self::Preparing, Self::Cancelled],
            Self::Preparing => {
                smallvec![Self::Shipped, Self::DeliveryScheduled, Self::Cancelled]
            }
            Self::DeliveryScheduled => smallvec![Self::Shipped, Self::OutForDelivery],
            Self::Shipped => smallvec![Self::OutForDelivery, Self::DeliveryScheduled],
            Self::OutForDelivery => smallvec![Self::Delivered, Self::DeliveryScheduled],
            Self::Delivered | Self::Cancelled | Self::Unknown => SmallVec::new(),
        }
    }

    /// Whether no further vendor-initiated transition exists.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Presentation metadata for a status badge.
    ///
    /// Total over every value: [`OrderStatus::Unknown`] gets the
    /// pending-style fallback instead of failing, because the status
    /// vocabulary evolves server-side independent of client deployments.
    #[must_use]
    pub fn describe(self) -> StatusDescription {
        match self {
            Self::Placed => StatusDescription {
                label: "Placed",
                style_class: "status-blue",
            },
            Self::Preparing => StatusDescription {
                label: "Preparing",
                style_class: "status-yellow",
            },
            Self::Shipped => StatusDescription {
                label: "Shipped",
                style_class: "status-purple",
            },
            Self::OutForDelivery => StatusDescription {
                label: "Out for Delivery",
                style_class: "status-orange",
            },
            Self::DeliveryScheduled => StatusDescription {
                label: "Delivery Scheduled",
                style_class: "status-indigo",
            },
            Self::Delivered => StatusDescription {
                label: "Delivered",
                style_class: "status-green",
            },
            Self::Cancelled => StatusDescription {
                label: "Cancelled",
                style_class: "status-red",
            },
            Self::Unknown => StatusDescription {
                label: "Pending",
                style_class: "status-yellow",
            },
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label and style hook for rendering a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusDescription {
    /// Human-readable label.
    pub label: &'static str,

    /// Style class consumed by the presentation layer.
    pub style_class: &'static str,
}
