//! Order polling
//!
//! Order views refresh on a fixed interval rather than a push channel: each
//! tick fetches the first page of the vendor's orders and pushes the
//! snapshot to the consumer. Staleness is bounded by the interval. A failed
//! fetch is logged and skipped; the previous snapshot stays on screen and
//! the next tick tries again.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::warn;

use crate::{
    api::Page,
    orders::{Order, status::OrderStatus, workflow::OrderGateway},
};

/// Default refresh cadence of the vendor order view.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// Fixed-interval poller for the vendor order listing.
#[derive(Debug)]
pub struct OrderPoller<G> {
    gateway: G,
    interval: Duration,
    page_size: u32,
    status_filter: Option<OrderStatus>,
}

impl<G: OrderGateway> OrderPoller<G> {
    /// Create a poller fetching the first page on every tick.
    #[must_use]
    pub fn new(gateway: G, interval: Duration) -> Self {
        Self {
            gateway,
            interval,
            page_size: 50,
            status_filter: None,
        }
    }

    /// Only poll orders in the given status.
    #[must_use]
    pub fn with_status_filter(mut self, status: OrderStatus) -> Self {
        self.status_filter = Some(status);
        self
    }

    /// Number of orders requested per snapshot.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Poll until the receiving side of `snapshots` is dropped. The first
    /// fetch happens immediately, subsequent ones once per interval.
    pub async fn run(self, snapshots: mpsc::Sender<Page<Order>>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            match self
                .gateway
                .vendor_orders(0, self.page_size, self.status_filter)
                .await
            {
                Ok(page) => {
                    if snapshots.send(page).await.is_err() {
                        // Receiver gone: the view was torn down.
                        break;
                    }
                }
                Err(err) => {
                    warn!(error = %err, "order poll failed; keeping previous snapshot");

                    // A failed fetch never sends, so the closed channel must
                    // be checked here too or the task outlives the view.
                    if snapshots.is_closed() {
                        break;
                    }
                }
            }
        }
    }
}
