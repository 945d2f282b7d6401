//! API client
//!
//! HTTP client for the remote storefront service: product catalog, buyer
//! orders and the vendor order console. Every response arrives in the
//! service's standard envelope; list endpoints are paginated.
//!
//! No retry policy lives here. A failed call is surfaced once and the caller
//! decides whether to re-issue it.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::debug;

use crate::{
    orders::{Order, OrderId, status::OrderStatus, workflow::{OrderGateway, StatusUpdate}},
    products::{Product, ProductId},
};

use async_trait::async_trait;

pub mod poll;

/// Configuration for the storefront API client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Service base URL, e.g. `"http://localhost:8080/api"`.
    pub base_url: String,

    /// Bearer token attached to every request, when present.
    pub bearer_token: Option<String>,
}

/// Errors from the remote storefront service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure: connect, timeout, body decode.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The session token is missing, expired or invalid.
    #[error("unauthorized")]
    Unauthorized,

    /// The requested resource does not exist.
    #[error("resource not found")]
    NotFound,

    /// The service refused the request, e.g. an invalid or stale status
    /// transition.
    #[error("request rejected with status {status}: {message}")]
    Rejected {
        /// HTTP status code of the rejection.
        status: u16,

        /// Server-provided message, or the status line when absent.
        message: String,
    },

    /// The response body did not match the expected envelope.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// Standard response envelope of the storefront service.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: bool,

    #[serde(default)]
    message: Option<String>,

    data: Option<T>,
}

/// One page of a paginated listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Entries of this page.
    pub content: Vec<T>,

    /// Total entries across all pages.
    pub total_elements: u64,

    /// Total number of pages.
    pub total_pages: u32,

    /// Requested page size.
    pub size: u32,

    /// Zero-based page index.
    pub page: u32,

    /// Whether this is the first page.
    #[serde(default)]
    pub first: bool,

    /// Whether this is the last page.
    #[serde(default)]
    pub last: bool,
}

/// HTTP client for the storefront REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ApiConfig,
    http: Client,
}

impl ApiClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Fetch a product by id.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on HTTP failure or an unexpected response.
    pub async fn product(&self, id: ProductId) -> Result<Product, ApiError> {
        let response = self.request(Method::GET, &format!("/products/{id}")).send().await?;

        Self::decode(response).await
    }

    /// Fetch one page of the public product catalog.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on HTTP failure or an unexpected response.
    pub async fn products(&self, page: u32, size: u32) -> Result<Page<Product>, ApiError> {
        let response = self
            .request(Method::GET, "/products")
            .query(&[("page", page), ("size", size)])
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Fetch a single order.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on HTTP failure or an unexpected response.
    pub async fn order(&self, id: OrderId) -> Result<Order, ApiError> {
        let response = self.request(Method::GET, &format!("/orders/{id}")).send().await?;

        Self::decode(response).await
    }

    /// Fetch one page of the authenticated buyer's orders.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on HTTP failure or an unexpected response.
    pub async fn orders(&self, page: u32, size: u32) -> Result<Page<Order>, ApiError> {
        let response = self
            .request(Method::GET, "/orders")
            .query(&[("page", page), ("size", size)])
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Fetch one page of the authenticated vendor's orders, optionally
    /// filtered by status.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on HTTP failure or an unexpected response.
    pub async fn vendor_orders(
        &self,
        page: u32,
        size: u32,
        status: Option<OrderStatus>,
    ) -> Result<Page<Order>, ApiError> {
        let mut request = self
            .request(Method::GET, "/vendor/orders")
            .query(&[("page", page), ("size", size)]);

        if let Some(status) = status {
            request = request.query(&[("status", status.as_str())]);
        }

        let response = request.send().await?;

        Self::decode(response).await
    }

    /// Submit a status update for an order, returning the updated order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the service refuses the
    /// transition, or another [`ApiError`] on HTTP failure.
    pub async fn update_order_status(
        &self,
        id: OrderId,
        update: &StatusUpdate,
    ) -> Result<Order, ApiError> {
        let response = self
            .request(Method::PATCH, &format!("/vendor/orders/{id}/status"))
            .json(update)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Cancel an order as the buyer. Always available to the buyer,
    /// independent of the vendor transition table.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on HTTP failure or an unexpected response.
    pub async fn cancel_order(
        &self,
        id: OrderId,
        reason: Option<&str>,
    ) -> Result<Order, ApiError> {
        let mut request = self.request(Method::POST, &format!("/orders/{id}/cancel"));

        if let Some(reason) = reason {
            request = request.json(&serde_json::json!({ "reason": reason }));
        }

        let response = request.send().await?;

        Self::decode(response).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.config.base_url);

        debug!(%method, %url, "storefront api request");

        let mut request = self.http.request(method, url);

        if let Some(token) = &self.config.bearer_token {
            request = request.bearer_auth(token);
        }

        request
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();

        if !status.is_success() {
            return Err(Self::error_for(status, response).await);
        }

        let envelope: Envelope<T> = response.json().await?;

        match envelope.data {
            Some(data) if envelope.success => Ok(data),
            _ => Err(ApiError::UnexpectedResponse(
                envelope
                    .message
                    .unwrap_or_else(|| "missing data in response envelope".to_owned()),
            )),
        }
    }

    async fn error_for(status: StatusCode, response: Response) -> ApiError {
        if status == StatusCode::UNAUTHORIZED {
            return ApiError::Unauthorized;
        }

        if status == StatusCode::NOT_FOUND {
            return ApiError::NotFound;
        }

        if status.is_client_error() {
            let message = response
                .json::<Envelope<serde_json::Value>>()
                .await
                .ok()
                .and_then(|envelope| envelope.message)
                .unwrap_or_else(|| status.to_string());

            return ApiError::Rejected {
                status: status.as_u16(),
                message,
            };
        }

        let text = response.text().await.unwrap_or_default();

        ApiError::UnexpectedResponse(format!("request failed with status {status}: {text}"))
    }
}

#[async_trait]
impl OrderGateway for ApiClient {
    async fn order(&self, id: OrderId) -> Result<Order, ApiError> {
        Self::order(self, id).await
    }

    async fn vendor_orders(
        &self,
        page: u32,
        size: u32,
        status: Option<OrderStatus>,
    ) -> Result<Page<Order>, ApiError> {
        Self::vendor_orders(self, page, size, status).await
    }

    async fn update_order_status(
        &self,
        id: OrderId,
        update: StatusUpdate,
    ) -> Result<Order, ApiError> {
        Self::update_order_status(self, id, &update).await
    }
}
