//! Status transitions
//!
//! Vendor-initiated order status updates. This component validates a
//! requested transition against the client-side table and delegates the
//! update to the external order service; the server remains the source of
//! truth and may still reject the request.

use async_trait::async_trait;
use jiff::civil::Date;
use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    api::{ApiError, Page},
    orders::{Order, OrderId, status::OrderStatus},
};

/// Payload of the external status-update interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    /// Target status.
    pub status: OrderStatus,

    /// Optional free-text note shown to the buyer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Mandatory when `status` is [`OrderStatus::DeliveryScheduled`],
    /// otherwise absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_delivery_date: Option<Date>,
}

/// Errors from [`request_transition`].
#[derive(Debug, Error)]
pub enum TransitionError {
    /// The target is not in the allowed set for the order's current status.
    #[error("cannot move order from {from} to {to}")]
    NotAllowed {
        /// Status the order was in when the request was made.
        from: OrderStatus,

        /// Requested target status.
        to: OrderStatus,
    },

    /// Scheduling a delivery requires an estimated delivery date.
    #[error("scheduling a delivery requires an estimated delivery date")]
    MissingDeliveryDate,

    /// The server rejected the update, e.g. the order changed state
    /// concurrently. No local retry; the caller should re-fetch the order
    /// and re-render.
    #[error("server rejected the status update: {0}")]
    Rejected(String),

    /// Transport or protocol failure talking to the order service.
    #[error(transparent)]
    Gateway(#[from] ApiError),
}

/// Seam to the external order service, consumed by the workflow and the
/// polling feed.
#[automock]
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Fetch a single order.
    async fn order(&self, id: OrderId) -> Result<Order, ApiError>;

    /// Fetch one page of the vendor's orders, optionally filtered by status.
    async fn vendor_orders(
        &self,
        page: u32,
        size: u32,
        status: Option<OrderStatus>,
    ) -> Result<Page<Order>, ApiError>;

    /// Submit a status update for an order.
    async fn update_order_status(
        &self,
        id: OrderId,
        update: StatusUpdate,
    ) -> Result<Order, ApiError>;
}

/// Validate and submit a vendor status transition, returning the updated
/// order from the server.
///
/// Validation runs against the order's locally cached status only; it is
/// advisory (it controls which actions a view offers) and is not re-checked
/// against a fresh fetch before submission. A concurrent server-side change
/// surfaces as [`TransitionError::Rejected`].
///
/// # Errors
///
/// - [`TransitionError::NotAllowed`]: the target is not reachable from the
///   order's current status.
/// - [`TransitionError::MissingDeliveryDate`]: the target is
///   [`OrderStatus::DeliveryScheduled`] and no date was supplied.
/// - [`TransitionError::Rejected`]: the server refused the update.
/// - [`TransitionError::Gateway`]: the update request failed in transport.
pub async fn request_transition(
    gateway: &dyn OrderGateway,
    order: &Order,
    target: OrderStatus,
    note: Option<String>,
    estimated_delivery_date: Option<Date>,
) -> Result<Order, TransitionError> {
    if !order.status.next_statuses().contains(&target) {
        return Err(TransitionError::NotAllowed {
            from: order.status,
            to: target,
        });
    }

    if target == OrderStatus::DeliveryScheduled && estimated_delivery_date.is_none() {
        return Err(TransitionError::MissingDeliveryDate);
    }

    let update = StatusUpdate {
        status: target,
        note,
        estimated_delivery_date,
    };

    debug!(order = %order.id, from = %order.status, to = %target, "submitting status update");

    match gateway.update_order_status(order.id, update).await {
        Ok(updated) => Ok(updated),
        Err(ApiError::Rejected { message, .. }) => {
            warn!(order = %order.id, %message, "status update rejected by server");

            Err(TransitionError::Rejected(message))
        }
        Err(err) => Err(TransitionError::Gateway(err)),
    }
}
