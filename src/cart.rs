//! Cart
//!
//! The working cart for the current session: customer identity, free-text
//! note, new-customer flag and one line per distinct product.
//!
//! Promotion and discount annotations are tracked as exact lines inside the
//! free-text note, mirroring what the order-collection sheet expects. Lines
//! are compared trimmed, case-sensitive.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::products::{Product, ProductId};

/// Note line appended while the new-customer discount is active.
///
/// Fixed business policy, like the 9.9% rate it refers to.
pub const NEW_CUSTOMER_NOTE: &str = "KH new 9.9%";

/// Errors raised by cart mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The requested quantity is below the product's minimum order quantity.
    #[error("quantity {quantity} is below the minimum order quantity {minimum} for {product}")]
    QuantityBelowMinimum {
        /// Product display name.
        product: String,
        /// Requested quantity.
        quantity: u32,
        /// Minimum order quantity for the product.
        minimum: u32,
    },
}

/// A product plus quantity inside a cart or order snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product this line refers to.
    #[serde(flatten)]
    pub product: Product,

    /// Ordered quantity, always at least the product minimum.
    pub quantity: u32,
}

impl CartLine {
    /// VAT-inclusive amount for the line (`price × quantity`).
    pub fn amount(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }

    /// Pre-VAT net amount for the line (`base_price × quantity`), zero when
    /// the product has no base price.
    pub fn net_amount(&self) -> Decimal {
        self.product.base_price.unwrap_or(Decimal::ZERO) * Decimal::from(self.quantity)
    }
}

/// The working cart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cart {
    customer_code: String,
    customer_name: String,
    note: String,
    is_new_customer: bool,
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Rebuild a cart from a saved order snapshot.
    pub fn from_snapshot(
        customer_code: impl Into<String>,
        customer_name: impl Into<String>,
        note: impl Into<String>,
        is_new_customer: bool,
        lines: impl Into<Vec<CartLine>>,
    ) -> Self {
        Cart {
            customer_code: customer_code.into(),
            customer_name: customer_name.into(),
            note: note.into(),
            is_new_customer,
            lines: lines.into(),
        }
    }

    /// Customer code.
    pub fn customer_code(&self) -> &str {
        &self.customer_code
    }

    /// Customer name.
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    /// Free-text order note.
    pub fn note(&self) -> &str {
        &self.note
    }

    /// Whether the new-customer discount is active.
    pub fn is_new_customer(&self) -> bool {
        self.is_new_customer
    }

    /// Lines in order of first addition.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up a line by product id.
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product.id == id)
    }

    /// Number of lines in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Set the customer code without any directory lookup.
    pub fn set_customer_code(&mut self, code: impl Into<String>) {
        self.customer_code = code.into();
    }

    /// Set the customer name.
    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        self.customer_name = name.into();
    }

    /// Replace the note with user-authored text.
    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
    }

    /// Add `quantity` units of a product.
    ///
    /// An existing line for the product is incremented; otherwise a new line
    /// is appended. Promotional products record their promotion note line in
    /// the order note exactly once, no matter how often they are added.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::QuantityBelowMinimum`] when `quantity` is zero or
    /// below the product's minimum order quantity; the cart is left untouched.
    pub fn add_line(&mut self, product: &Product, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 || quantity < product.min_order_quantity {
            return Err(CartError::QuantityBelowMinimum {
                product: product.name.clone(),
                quantity,
                minimum: product.min_order_quantity,
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|line| line.product.id == product.id) {
            line.quantity += quantity;
        } else {
            self.lines.push(CartLine {
                product: product.clone(),
                quantity,
            });
        }

        if let Some(note_line) = product.promotion_note() {
            append_note_line(&mut self.note, &note_line);
        }

        Ok(())
    }

    /// Remove the line for a product, along with its promotion note line.
    /// No-op when the product is not in the cart.
    pub fn remove_line(&mut self, id: ProductId) {
        let Some(position) = self.lines.iter().position(|line| line.product.id == id) else {
            return;
        };

        let removed = self.lines.remove(position);

        if let Some(note_line) = removed.product.promotion_note() {
            strip_note_line(&mut self.note, &note_line);
        }
    }

    /// Set the quantity of an existing line.
    ///
    /// A quantity of zero or below the product minimum removes the line
    /// entirely; a line never exists below its minimum. No-op when the
    /// product is not in the cart.
    pub fn update_quantity(&mut self, id: ProductId, quantity: u32) {
        let Some(line) = self.lines.iter_mut().find(|line| line.product.id == id) else {
            return;
        };

        if quantity == 0 || quantity < line.product.min_order_quantity {
            self.remove_line(id);
        } else {
            line.quantity = quantity;
        }
    }

    /// Remove every line and strip the promotion note lines they contributed.
    /// User-authored note text is kept.
    pub fn clear_lines(&mut self) {
        let promotion_notes: Vec<String> = self
            .lines
            .iter()
            .filter_map(|line| line.product.promotion_note())
            .map(|note| note.trim().to_string())
            .collect();

        self.lines.clear();

        let kept: Vec<&str> = self
            .note
            .lines()
            .filter(|line| {
                let trimmed = line.trim();
                !trimmed.is_empty() && !promotion_notes.iter().any(|promo| promo == trimmed)
            })
            .collect();

        self.note = kept.join("\n");
    }

    /// Turn the new-customer discount on or off, keeping the fixed discount
    /// note line in sync. Both directions are idempotent.
    pub fn set_new_customer(&mut self, is_new_customer: bool) {
        self.is_new_customer = is_new_customer;

        if is_new_customer {
            append_note_line(&mut self.note, NEW_CUSTOMER_NOTE);
        } else {
            strip_note_line(&mut self.note, NEW_CUSTOMER_NOTE);
        }
    }

    /// Reset the cart to its empty state.
    pub fn reset(&mut self) {
        *self = Cart::default();
    }
}

/// Append a line to the note unless an equal (trim-compared) line exists.
fn append_note_line(note: &mut String, line: &str) {
    if note.lines().any(|existing| existing.trim() == line.trim()) {
        return;
    }

    if note.is_empty() {
        line.clone_into(note);
    } else {
        note.push('\n');
        note.push_str(line);
    }
}

/// Remove every note line equal (trim-compared) to the given line.
fn strip_note_line(note: &mut String, line: &str) {
    let kept: Vec<&str> = note
        .lines()
        .filter(|existing| existing.trim() != line.trim())
        .collect();

    *note = kept.join("\n");
}
