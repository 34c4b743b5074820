//! Transport
//!
//! Fire-and-forget delivery of an order to the external order-collection
//! endpoint. The channel is opaque: the response body is never read, so
//! `Accepted` only means "no client-side error", not that the server
//! confirmed receipt. Callers treat it as best-effort delivered.

use std::time::Duration;

use reqwest::{blocking::Client, header::CONTENT_TYPE};
use serde::Serialize;
use tracing::error;

use crate::cart::CartLine;

/// Message surfaced when delivery fails; the cart is kept so the employee
/// can retry without re-entering anything.
pub const DELIVERY_FAILED_MESSAGE: &str =
    "Không thể gửi đơn hàng. Vui lòng kiểm tra kết nối mạng và thử lại.";

/// The payload posted to the order-collection endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    /// Logged-in employee name.
    pub employee_name: String,

    /// Logged-in employee code.
    pub employee_code: String,

    /// Customer code from the cart.
    pub customer_code: String,

    /// Customer name from the cart.
    pub customer_name: String,

    /// Free-text note, including promotion/discount annotations.
    pub note: String,

    /// Full list of cart lines.
    pub items: Vec<CartLine>,
}

/// Result of a delivery attempt. Failures are values, never panics or raw
/// transport errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// No client-side error occurred.
    Accepted,

    /// The attempt failed with a retryable, user-facing message.
    Failed(String),
}

/// Delivery to the order-collection endpoint.
pub trait OrderTransport {
    /// Attempt to deliver the payload.
    fn deliver(&self, payload: &OrderPayload) -> DeliveryOutcome;
}

/// HTTP transport posting JSON to an order-collection script URL.
///
/// The body is sent as `text/plain` and the response is discarded unread,
/// matching the endpoint's opaque-channel contract.
#[derive(Debug)]
pub struct SheetTransport {
    url: String,
    client: Client,
}

impl SheetTransport {
    /// Create a transport for the given endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns a `reqwest::Error` if the HTTP client cannot be constructed.
    pub fn new(url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(SheetTransport {
            url: url.into(),
            client,
        })
    }
}

impl OrderTransport for SheetTransport {
    fn deliver(&self, payload: &OrderPayload) -> DeliveryOutcome {
        let body = match serde_json::to_string(payload) {
            Ok(body) => body,
            Err(err) => {
                error!(%err, "failed to serialize order payload");
                return DeliveryOutcome::Failed(DELIVERY_FAILED_MESSAGE.to_string());
            }
        };

        match self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "text/plain")
            .body(body)
            .send()
        {
            Ok(_) => DeliveryOutcome::Accepted,
            Err(err) => {
                error!(%err, "failed to post order to collection endpoint");
                DeliveryOutcome::Failed(DELIVERY_FAILED_MESSAGE.to_string())
            }
        }
    }
}
