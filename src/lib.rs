//! Medcart
//!
//! A single-session order-entry engine for a pharmaceutical sales catalog:
//! pricing and promotion math, the draft/sent order lifecycle, and the
//! storage and transport collaborators around them.

pub mod cart;
pub mod catalog;
pub mod directory;
pub mod format;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod promotions;
pub mod session;
pub mod storage;
pub mod transport;
