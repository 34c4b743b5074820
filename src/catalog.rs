//! Catalog
//!
//! The fixed product list an employee browses, with category filtering and
//! case-insensitive name search.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::products::{Product, ProductCategory, ProductId};

/// Category filter applied when browsing the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Every product regardless of category.
    #[default]
    All,

    /// Only products in the given category.
    Only(ProductCategory),
}

impl CategoryFilter {
    fn matches(self, category: ProductCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

/// The product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from an arbitrary product list.
    pub fn new(products: impl Into<Vec<Product>>) -> Self {
        Catalog {
            products: products.into(),
        }
    }

    /// The standard pharmaceutical sales catalog.
    pub fn standard() -> Self {
        Catalog {
            products: standard_products(),
        }
    }

    /// All products, in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Products matching the category filter and whose name contains the
    /// search term, compared case-insensitively. An empty term matches all.
    pub fn search(&self, term: &str, filter: CategoryFilter) -> Vec<&Product> {
        let term = term.to_lowercase();

        self.products
            .iter()
            .filter(|product| filter.matches(product.category))
            .filter(|product| product.name.to_lowercase().contains(&term))
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::standard()
    }
}

struct Entry {
    id: u32,
    name: &'static str,
    price: Decimal,
    category: ProductCategory,
    original_price: Option<Decimal>,
    promotion: Option<&'static str>,
    base_price: Decimal,
}

impl Entry {
    fn plain(id: u32, name: &'static str, price: Decimal, category: ProductCategory, base_price: Decimal) -> Self {
        Entry {
            id,
            name,
            price,
            category,
            original_price: None,
            promotion: None,
            base_price,
        }
    }

    fn promoted(
        id: u32,
        name: &'static str,
        price: Decimal,
        category: ProductCategory,
        original_price: Decimal,
        promotion: &'static str,
        base_price: Decimal,
    ) -> Self {
        Entry {
            id,
            name,
            price,
            category,
            original_price: Some(original_price),
            promotion: Some(promotion),
            base_price,
        }
    }

    fn into_product(self) -> Product {
        Product {
            id: ProductId(self.id),
            name: self.name.to_string(),
            min_order: "1".to_string(),
            min_order_quantity: 1,
            price: self.price,
            category: self.category,
            original_price: self.original_price,
            promotion: self.promotion.map(str::to_string),
            base_price: Some(self.base_price),
        }
    }
}

#[rustfmt::skip]
fn standard_products() -> Vec<Product> {
    use ProductCategory::{Import, Local};

    let entries = vec![
        Entry::plain(1, "CORBIERE CALCIUM PLUS", dec!(223435), Local, dec!(206884)),
        Entry::plain(2, "ACEMUC 200 CAP_BL3X10_VN", dec!(82911), Local, dec!(78963)),
        Entry::plain(3, "ACEMUC 200mg SAC 1g_SC30_VN", dec!(91562), Local, dec!(87202)),
        Entry::plain(4, "ACEMUC Kids 100mg_0,5g_SC30 VN", dec!(64605), Local, dec!(61529)),
        Entry::plain(5, "MAGNE-B6 Tab B/50 (bao film)", dec!(101706), Local, dec!(96863)),
        Entry::plain(6, "TELFAST HD 180MG", dec!(280760), Local, dec!(267390)),
        Entry::plain(7, "TELFAST BD 60MG", dec!(128931), Local, dec!(122791)),
        Entry::plain(8, "TELFAST 30MG", dec!(30293), Local, dec!(28850)),
        Entry::plain(9, "NO-SPA 40mg", dec!(45700), Local, dec!(43524)),
        Entry::promoted(10, "BISOLVON KIDS 60ML BOTx1 VN", dec!(36571), Local, dec!(40567), "KM 9.85% đến 31.12.2025", dec!(38635)),
        Entry::plain(11, "ENTEROGERMINA GUT DEFEND (NEW)", dec!(179353), Import, dec!(166068)),
        Entry::plain(12, "ENTEROGERMINA GUT RESTORE ( 4B)", dec!(305130), Import, dec!(290600)),
        Entry::plain(13, "ENTEROGERMINA BABY COMFORT", dec!(460000), Import, dec!(425926)),
        Entry::promoted(14, "BISOLVON 8MG TAB", dec!(60751), Import, dec!(63901), "ck 4.93% CTKM đến 31.12.2025", dec!(60858)),
        Entry::plain(15, "BUSCOPAN VIÊN", dec!(125790), Import, dec!(119800)),
        Entry::plain(16, "NOSPA 80 V", dec!(27041), Import, dec!(25753)),
        Entry::promoted(17, "PHARMATON ENERGY", dec!(160944), Import, dec!(228614), "KM 29.6% đến 31.12.2025", dec!(211680)),
        Entry::plain(18, "PHARMATON ESSENT", dec!(205286), Import, dec!(190080)),
        Entry::promoted(19, "PHARMATON KIDDI", dec!(117850), Import, dec!(167400), "KM 29.6% đến 31.12.2025", dec!(155000)),
        Entry::plain(20, "PHARMATON ENERGY FIZZI SỦI", dec!(104760), Import, dec!(97000)),
        Entry::plain(21, "PHOSPHALUGEL 2.47G/20G GEL SC26 M36 VN", dec!(120558), Import, dec!(114817)),
        Entry::plain(22, "OSTELIN VIT D & CALCI CHAI CHAI 130V", dec!(300000), Import, dec!(277778)),
        Entry::plain(23, "OSTELIN VIT D & CALCI CHAI CHAI 275V", dec!(540000), Import, dec!(500000)),
        Entry::plain(24, "OSTELIN VIT D & CALCI CHAI 30V", dec!(130000), Import, dec!(120370)),
        Entry::plain(25, "OSTELIN VIT D & CALCI CHAI 60V", dec!(230000), Import, dec!(212963)),
    ];

    entries.into_iter().map(Entry::into_product).collect()
}
