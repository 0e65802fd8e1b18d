//! Shopfront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartLine, CartProduct},
    placement::{
        OrderLine, OrderPlan, PlacementError, RequestedLine, StockedProduct, ValidationError, plan,
        validate,
    },
    price_check::{PriceCheck, PriceVerdict},
    pricing::{line_total, resolve_unit_price, total_amount},
    receipt::{Receipt, ReceiptError},
    status::{OrderStatus, StatusParseError, TransitionPolicy},
    tiers::{PricingTier, TierError, validate_tiers},
};
