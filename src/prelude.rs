//! Medcart prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartLine, NEW_CUSTOMER_NOTE},
    catalog::{Catalog, CategoryFilter},
    directory::{Customer, Directory, Employee},
    orders::{Order, OrderId, OrderStatus},
    pricing::{NEW_CUSTOMER_RATE, OrderTotals, order_totals},
    products::{Product, ProductCategory, ProductId},
    promotions::{FeeBreakdown, PAYABLE_FEE_CAP, fee_breakdown, line_fee_ceiling, promotion_rate},
    session::{CartState, Session, SessionError},
    storage::{JsonFileStore, MemoryStore, OrderStore, StoreSlot},
    transport::{DeliveryOutcome, OrderPayload, OrderTransport, SheetTransport},
};
