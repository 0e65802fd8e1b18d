//! Order request and response bodies.

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shopfront_app::domain::{
    orders::models::{
        Buyer, NewOrder, NewOrderItem, Order, OrderItem, OrderStats, OrderUuid,
    },
    products::models::ProductUuid,
    users::models::UserUuid,
};

/// Buyer summary
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BuyerResponse {
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
}

impl From<Buyer> for BuyerResponse {
    fn from(buyer: Buyer) -> Self {
        BuyerResponse {
            uuid: buyer.uuid.into_uuid(),
            name: buyer.name,
            email: buyer.email,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub product: Uuid,
    pub product_name: String,
    pub quantity: u32,

    /// Unit price frozen when the order was placed
    pub price_at_purchase: Decimal,

    pub line_total: Decimal,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        OrderItemResponse {
            line_total: item.line_total(),
            uuid: item.uuid.into_uuid(),
            product: item.product.into_uuid(),
            product_name: item.product_name,
            quantity: item.quantity,
            price_at_purchase: item.price_at_purchase,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub uuid: Uuid,

    pub buyer: BuyerResponse,

    /// Sum of every line at its purchase price
    pub total_amount: Decimal,

    /// One of PENDING, CONFIRMED, PROCESSING, SHIPPED, DELIVERED, CANCELLED
    pub status: String,

    pub items: Vec<OrderItemResponse>,

    /// The date and time the order was placed
    pub created_at: String,

    /// The date and time the order was last updated
    pub updated_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        OrderResponse {
            uuid: order.uuid.into_uuid(),
            buyer: order.buyer.into(),
            total_amount: order.total_amount,
            status: order.status.to_string(),
            items: order.items.into_iter().map(Into::into).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Order line as submitted by the buyer
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemRequest {
    pub product: Uuid,

    /// Units requested; must be positive
    pub quantity: i64,

    /// Unit price the buyer was shown
    pub price_at_purchase: Decimal,
}

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    /// Optional client-chosen identifier; generated when omitted
    #[serde(default)]
    pub uuid: Option<Uuid>,

    #[serde(default)]
    pub buyer: Option<Uuid>,

    #[serde(default)]
    pub items: Vec<OrderItemRequest>,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(request: CreateOrderRequest) -> Self {
        NewOrder {
            uuid: request.uuid.map_or_else(OrderUuid::new, OrderUuid::from_uuid),
            buyer: request.buyer.map(UserUuid::from_uuid),
            items: request
                .items
                .into_iter()
                .map(|item| NewOrderItem {
                    product: ProductUuid::from_uuid(item.product),
                    quantity: item.quantity,
                    price_at_purchase: item.price_at_purchase,
                })
                .collect(),
        }
    }
}

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusRequest {
    /// Target status, e.g. `SHIPPED`
    pub status: String,
}

/// Dashboard totals
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StatsResponse {
    pub total_orders: u64,
    pub total_revenue: Decimal,
    pub pending_orders: u64,
    pub delivered_orders: u64,
    pub total_products: u64,
    pub total_users: u64,
}

impl From<OrderStats> for StatsResponse {
    fn from(stats: OrderStats) -> Self {
        StatsResponse {
            total_orders: stats.total_orders,
            total_revenue: stats.total_revenue,
            pending_orders: stats.pending_orders,
            delivered_orders: stats.delivered_orders,
            total_products: stats.total_products,
            total_users: stats.total_users,
        }
    }
}
