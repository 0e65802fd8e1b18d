//! Order Models

use std::time::Duration;

use jiff::Timestamp;
use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use shopfront::{
    price_check::PriceCheck,
    pricing::line_total,
    receipt::{Receipt, ReceiptError},
    status::{OrderStatus, TransitionPolicy},
};

use crate::{
    domain::{products::models::ProductUuid, users::models::UserUuid},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItem>;

/// Buyer summary attached to an order.
#[derive(Debug, Clone, PartialEq)]
pub struct Buyer {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
}

/// Order Model
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub uuid: OrderUuid,
    pub buyer: Buyer,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Order {
    /// Render-ready receipt for this order.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if an amount cannot be expressed in `currency`.
    pub fn receipt<'a>(&self, currency: &'a Currency) -> Result<Receipt<'a>, ReceiptError> {
        Receipt::new(
            self.uuid.to_string(),
            self.status,
            self.items
                .iter()
                .map(|item| (item.product_name.clone(), item.quantity, item.price_at_purchase)),
            self.total_amount,
            currency,
        )
    }
}

/// Order Item Model
///
/// `price_at_purchase` is frozen when the order is placed and never follows later catalogue
/// changes.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub uuid: OrderItemUuid,
    pub order: OrderUuid,
    pub product: ProductUuid,
    pub product_name: String,
    pub quantity: u32,
    pub price_at_purchase: Decimal,
}

impl OrderItem {
    pub fn line_total(&self) -> Decimal {
        line_total(self.quantity, self.price_at_purchase)
    }
}

/// New Order Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub buyer: Option<UserUuid>,
    pub items: Vec<NewOrderItem>,
}

/// New Order Item Model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewOrderItem {
    pub product: ProductUuid,
    pub quantity: i64,
    pub price_at_purchase: Decimal,
}

/// Order listing options. Unset fields do not filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub buyer: Option<UserUuid>,
}

/// Back-office dashboard totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderStats {
    pub total_orders: u64,
    pub total_revenue: Decimal,
    pub pending_orders: u64,
    pub delivered_orders: u64,
    pub total_products: u64,
    pub total_users: u64,
}

/// Policies applied by the orders service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSettings {
    /// Treatment of submitted prices during placement.
    pub price_check: PriceCheck,

    /// Whether status updates follow the order lifecycle.
    pub transitions: TransitionPolicy,

    /// Upper bound on a single placement, enforced both client and server side.
    pub timeout: Duration,
}

impl Default for OrderSettings {
    fn default() -> Self {
        Self {
            price_check: PriceCheck::default(),
            transitions: TransitionPolicy::default(),
            timeout: Duration::from_secs(5),
        }
    }
}
