//! Pricing
//!
//! Pure order-level totals over a set of cart lines. The engine keeps no
//! state between calls; consumers recompute on demand.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::cart::CartLine;

/// Discount rate applied to the whole order for first-time customers.
///
/// Fixed business policy with no configuration path; a candidate for
/// externalised configuration if that ever changes.
pub const NEW_CUSTOMER_RATE: Decimal = dec!(0.099);

/// All derived monetary figures for an order, in VND.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    /// VAT-inclusive subtotal over all lines.
    pub subtotal: Decimal,

    /// Pre-VAT net-sales subtotal; lines without a base price contribute zero.
    pub net_sales: Decimal,

    /// New-customer discount (9.9% of the subtotal, or zero).
    pub new_customer_discount: Decimal,

    /// Payable total after the new-customer discount.
    pub final_total: Decimal,
}

/// Compute every derived total for the given lines.
pub fn order_totals(lines: &[CartLine], is_new_customer: bool) -> OrderTotals {
    let subtotal: Decimal = lines.iter().map(CartLine::amount).sum();
    let net_sales: Decimal = lines.iter().map(CartLine::net_amount).sum();

    let new_customer_discount = if is_new_customer {
        subtotal * NEW_CUSTOMER_RATE
    } else {
        Decimal::ZERO
    };

    OrderTotals {
        subtotal,
        net_sales,
        new_customer_discount,
        final_total: subtotal - new_customer_discount,
    }
}

#[cfg(test)]
mod tests {
    use crate::products::{Product, ProductCategory, ProductId};

    use super::*;

    fn line(id: u32, price: Decimal, base_price: Option<Decimal>, quantity: u32) -> CartLine {
        CartLine {
            product: Product {
                id: ProductId(id),
                name: format!("SKU-{id}"),
                min_order: "1".to_string(),
                min_order_quantity: 1,
                price,
                category: ProductCategory::Local,
                original_price: None,
                promotion: None,
                base_price,
            },
            quantity,
        }
    }

    #[test]
    fn totals_for_empty_cart_are_zero() {
        let totals = order_totals(&[], true);

        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.net_sales, Decimal::ZERO);
        assert_eq!(totals.new_customer_discount, Decimal::ZERO);
        assert_eq!(totals.final_total, Decimal::ZERO);
    }

    #[test]
    fn without_new_customer_final_equals_subtotal() {
        let lines = [
            line(1, dec!(223435), Some(dec!(206884)), 2),
            line(2, dec!(82911), Some(dec!(78963)), 1),
        ];

        let totals = order_totals(&lines, false);

        assert_eq!(totals.subtotal, dec!(529781));
        assert_eq!(totals.new_customer_discount, Decimal::ZERO);
        assert_eq!(totals.final_total, totals.subtotal);
    }

    #[test]
    fn new_customer_discount_is_exactly_9_9_percent() {
        let lines = [line(1, dec!(100000), Some(dec!(90000)), 1)];

        let totals = order_totals(&lines, true);

        assert_eq!(totals.new_customer_discount, dec!(9900));
        assert_eq!(totals.final_total, dec!(90100));
        assert_eq!(totals.final_total, totals.subtotal * (Decimal::ONE - NEW_CUSTOMER_RATE));
    }

    #[test]
    fn lines_without_base_price_are_excluded_from_net_sales() {
        let lines = [
            line(1, dec!(50000), None, 3),
            line(2, dec!(40000), Some(dec!(36000)), 2),
        ];

        let totals = order_totals(&lines, false);

        assert_eq!(totals.subtotal, dec!(230000));
        assert_eq!(totals.net_sales, dec!(72000));
    }
}
