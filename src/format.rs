//! Format
//!
//! Display formatting for VND amounts. Computation happens on raw [`Decimal`]
//! values; formatting is attached only at the display edge.

use rust_decimal::Decimal;
use rusty_money::{Money, iso};

/// Format an amount as Vietnamese đồng for display.
pub fn vnd(amount: Decimal) -> String {
    Money::from_decimal(amount, iso::VND).to_string()
}
