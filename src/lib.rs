//! Shopfront
//!
//! Pricing and order placement rules for the Shopfront storefront: volume tier resolution, the
//! client cart, validation and planning of orders against locked stock, the order status
//! lifecycle, and receipt rendering. This crate performs no I/O; persistence lives in
//! `shopfront-app`.

pub mod cart;
pub mod placement;
pub mod prelude;
pub mod price_check;
pub mod pricing;
pub mod receipt;
pub mod status;
pub mod tiers;
