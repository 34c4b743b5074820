//! Promotions
//!
//! Best-effort extraction of promotion percentages from free-text promotion
//! descriptions, and the "maximum payable fee" ceilings derived from them.
//!
//! The ceiling caps total promotional spend on a line at 50% of its net
//! value, minus the discounts already applied. A negative ceiling is a valid
//! result: it means the applied discounts already exceed the cap.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::{
    cart::CartLine,
    pricing::NEW_CUSTOMER_RATE,
    products::ProductCategory,
};

/// Share of a line's net value that promotional spend may not exceed.
///
/// Fixed business policy, like [`NEW_CUSTOMER_RATE`].
pub const PAYABLE_FEE_CAP: Decimal = dec!(0.5);

/// First `<number>%` in a promotion string, decimal allowed, optional
/// whitespace before the sign.
static PERCENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let Ok(pattern) = Regex::new(r"(\d+(?:\.\d+)?)\s*%") else {
        unreachable!("the percent pattern is a valid regex")
    };

    pattern
});

/// Extract the promotion rate from a free-text promotion description.
///
/// `"KM 9.85% đến 31.12.2025"` yields `0.0985`. Text without a percentage
/// yields zero; malformed text is never an error.
pub fn promotion_rate(promotion: &str) -> Decimal {
    PERCENT_PATTERN
        .captures(promotion)
        .and_then(|captures| captures.get(1))
        .and_then(|percent| percent.as_str().parse::<Decimal>().ok())
        .map_or(Decimal::ZERO, |percent| percent / dec!(100))
}

/// Maximum payable promotional fee for a line, defined only for lines with a
/// positive net amount.
///
/// `0.5 × net − net × promotion_rate − new-customer discount on the net`.
/// The result may be negative.
pub fn line_fee_ceiling(line: &CartLine, is_new_customer: bool) -> Option<Decimal> {
    let net = line.net_amount();

    if net <= Decimal::ZERO {
        return None;
    }

    let monthly_promotion = net * line.product.promotion.as_deref().map_or(Decimal::ZERO, promotion_rate);

    let new_customer_discount = if is_new_customer {
        net * NEW_CUSTOMER_RATE
    } else {
        Decimal::ZERO
    };

    Some(net * PAYABLE_FEE_CAP - monthly_promotion - new_customer_discount)
}

/// Per-category totals of the line fee ceilings.
///
/// A category is `None` when no line qualifies for it, so callers can tell
/// "no qualifying lines" apart from a zero total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeeBreakdown {
    /// Ceiling total over qualifying `Local` lines.
    pub local: Option<Decimal>,

    /// Ceiling total over qualifying `Import` lines.
    pub import: Option<Decimal>,
}

/// Sum the per-line ceilings over all qualifying lines, split by category.
pub fn fee_breakdown(lines: &[CartLine], is_new_customer: bool) -> FeeBreakdown {
    let mut breakdown = FeeBreakdown::default();

    for line in lines {
        let Some(ceiling) = line_fee_ceiling(line, is_new_customer) else {
            continue;
        };

        let total = match line.product.category {
            ProductCategory::Local => &mut breakdown.local,
            ProductCategory::Import => &mut breakdown.import,
        };

        *total = Some(total.unwrap_or(Decimal::ZERO) + ceiling);
    }

    breakdown
}

#[cfg(test)]
mod tests {
    use crate::products::{Product, ProductId};

    use super::*;

    fn line(
        id: u32,
        category: ProductCategory,
        base_price: Option<Decimal>,
        promotion: Option<&str>,
        quantity: u32,
    ) -> CartLine {
        CartLine {
            product: Product {
                id: ProductId(id),
                name: format!("SKU-{id}"),
                min_order: "1".to_string(),
                min_order_quantity: 1,
                price: dec!(50000),
                category,
                original_price: None,
                promotion: promotion.map(str::to_string),
                base_price,
            },
            quantity,
        }
    }

    #[test]
    fn promotion_rate_parses_real_catalog_strings() {
        assert_eq!(promotion_rate("KM 9.85% đến 31.12.2025"), dec!(0.0985));
        assert_eq!(promotion_rate("ck 4.93% CTKM đến 31.12.2025"), dec!(0.0493));
        assert_eq!(promotion_rate("KM 29.6% đến 31.12.2025"), dec!(0.296));
    }

    #[test]
    fn promotion_rate_without_percent_is_zero() {
        assert_eq!(promotion_rate("no percent here"), Decimal::ZERO);
        assert_eq!(promotion_rate(""), Decimal::ZERO);
        assert_eq!(promotion_rate("tặng 1 hộp"), Decimal::ZERO);
    }

    #[test]
    fn promotion_rate_takes_first_match_and_allows_spacing() {
        assert_eq!(promotion_rate("giảm 10 % rồi 20%"), dec!(0.1));
        assert_eq!(promotion_rate("5%"), dec!(0.05));
    }

    #[test]
    fn ceiling_matches_worked_example() {
        // base 40000 × 2 = 80000 net; 10% promo; no new-customer discount.
        let promo_line = line(
            1,
            ProductCategory::Local,
            Some(dec!(40000)),
            Some("KM 10% T12"),
            2,
        );

        let ceiling = line_fee_ceiling(&promo_line, false);

        assert_eq!(ceiling, Some(dec!(32000)));
    }

    #[test]
    fn ceiling_subtracts_new_customer_discount() {
        let promo_line = line(
            1,
            ProductCategory::Local,
            Some(dec!(40000)),
            Some("KM 10%"),
            2,
        );

        let ceiling = line_fee_ceiling(&promo_line, true);

        // 40000 − 8000 − 7920
        assert_eq!(ceiling, Some(dec!(24080)));
    }

    #[test]
    fn ceiling_can_go_negative() {
        let heavy_promo = line(
            1,
            ProductCategory::Import,
            Some(dec!(10000)),
            Some("KM 45%"),
            1,
        );

        let ceiling = line_fee_ceiling(&heavy_promo, true);

        // 5000 − 4500 − 990 = −490; a signal, not an error.
        assert_eq!(ceiling, Some(dec!(-490)));
    }

    #[test]
    fn ceiling_undefined_without_positive_net() {
        let no_base = line(1, ProductCategory::Local, None, Some("KM 10%"), 2);
        let zero_base = line(2, ProductCategory::Local, Some(Decimal::ZERO), None, 2);

        assert_eq!(line_fee_ceiling(&no_base, false), None);
        assert_eq!(line_fee_ceiling(&zero_base, false), None);
    }

    #[test]
    fn breakdown_partitions_by_category() {
        let lines = [
            line(1, ProductCategory::Local, Some(dec!(40000)), None, 1),
            line(2, ProductCategory::Local, Some(dec!(20000)), None, 1),
            line(3, ProductCategory::Import, Some(dec!(10000)), Some("KM 10%"), 1),
        ];

        let breakdown = fee_breakdown(&lines, false);

        assert_eq!(breakdown.local, Some(dec!(30000)));
        assert_eq!(breakdown.import, Some(dec!(4000)));
    }

    #[test]
    fn breakdown_reports_empty_categories_as_none() {
        let lines = [line(1, ProductCategory::Local, Some(dec!(40000)), None, 1)];

        let breakdown = fee_breakdown(&lines, false);

        assert_eq!(breakdown.local, Some(dec!(20000)));
        assert_eq!(breakdown.import, None);

        assert_eq!(fee_breakdown(&[], true), FeeBreakdown::default());
    }

    #[test]
    fn breakdown_skips_lines_without_net_amount() {
        let lines = [
            line(1, ProductCategory::Import, None, None, 3),
            line(2, ProductCategory::Import, Some(dec!(10000)), None, 1),
        ];

        let breakdown = fee_breakdown(&lines, false);

        assert_eq!(breakdown.import, Some(dec!(5000)));
    }
}
