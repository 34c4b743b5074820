//! Products

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier for a product in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub u32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Sourcing category of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductCategory {
    /// Locally manufactured stock.
    Local,

    /// Imported stock.
    Import,
}

/// A catalog product. Immutable reference data.
///
/// `price` is the VAT-inclusive unit list price; `base_price` is the pre-VAT
/// net price used for sales-volume and discount-ceiling math. Both are in VND.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product identifier.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Human-readable minimum order description.
    pub min_order: String,

    /// Minimum order quantity.
    pub min_order_quantity: u32,

    /// VAT-inclusive unit list price.
    pub price: Decimal,

    /// Sourcing category.
    #[serde(rename = "type")]
    pub category: ProductCategory,

    /// List price before the current promotion, if one is running.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Decimal>,

    /// Free-text promotion description, e.g. `"KM 9.85% đến 31.12.2025"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<String>,

    /// Pre-VAT net price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_price: Option<Decimal>,
}

impl Product {
    /// The note line recorded in the order note while this product's
    /// promotion is in the cart, or `None` for products without a promotion.
    pub fn promotion_note(&self) -> Option<String> {
        self.promotion
            .as_deref()
            .map(|promotion| format!("{}: {}", self.name, promotion))
    }
}
