//! Souk
//!
//! Souk is the client-side core of a multi-vendor marketplace storefront: a
//! persisted, stock-capped shopping cart with derived totals, and the vendor
//! order-status workflow (legal next statuses, presentation metadata and
//! validated transition requests against the remote order service).

pub mod api;
pub mod cart;
pub mod orders;
pub mod products;
