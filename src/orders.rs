//! Orders
//!
//! Immutable order snapshots. Totals are captured when the snapshot is taken
//! and never recomputed, so a saved order keeps the figures the employee saw
//! even if pricing policy changes later.

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use rust_decimal::Decimal;

use crate::{
    cart::{Cart, CartLine},
    pricing,
};

/// Identifier for a saved order, ordered by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub i64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle status of a saved order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Saved locally, still editable in place.
    Draft,

    /// Submitted to the order-collection endpoint; never mutated again.
    Sent,
}

/// An immutable snapshot of a cart plus its computed totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order identifier, generated at creation.
    pub id: OrderId,

    /// Customer code at snapshot time.
    pub customer_code: String,

    /// Customer name at snapshot time.
    pub customer_name: String,

    /// Free-text note at snapshot time.
    pub note: String,

    /// Captured cart lines.
    pub items: Vec<CartLine>,

    /// Whether the new-customer discount was active.
    pub is_new_customer: bool,

    /// Creation timestamp, epoch milliseconds. For drafts this is the time of
    /// the first save, preserved across in-place updates.
    pub created_at: i64,

    /// Lifecycle status.
    pub status: OrderStatus,

    /// VAT-inclusive subtotal captured at snapshot time.
    pub total_amount: Decimal,

    /// Payable total captured at snapshot time.
    pub final_amount: Decimal,

    /// Net-sales subtotal captured at snapshot time.
    pub total_sales: Decimal,
}

impl Order {
    /// Snapshot a cart with freshly computed totals.
    pub fn snapshot(id: OrderId, created_at: i64, status: OrderStatus, cart: &Cart) -> Self {
        let totals = pricing::order_totals(cart.lines(), cart.is_new_customer());

        Order {
            id,
            customer_code: cart.customer_code().to_string(),
            customer_name: cart.customer_name().to_string(),
            note: cart.note().to_string(),
            items: cart.lines().to_vec(),
            is_new_customer: cart.is_new_customer(),
            created_at,
            status,
            total_amount: totals.subtotal,
            final_amount: totals.final_total,
            total_sales: totals.net_sales,
        }
    }
}

/// Generator for creation-time-ordered order ids.
///
/// Ids are epoch milliseconds, bumped past the previously issued id so two
/// snapshots in the same millisecond still order by creation.
#[derive(Debug, Default)]
pub struct OrderIds {
    last: i64,
}

impl OrderIds {
    /// Create a generator.
    pub fn new() -> Self {
        OrderIds::default()
    }

    /// Issue the next id.
    pub fn next_id(&mut self) -> OrderId {
        let now = Utc::now().timestamp_millis();
        self.last = now.max(self.last + 1);

        OrderId(self.last)
    }
}
