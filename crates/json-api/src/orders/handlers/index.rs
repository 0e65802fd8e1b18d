//! Order Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use shopfront::status::OrderStatus;
use uuid::Uuid;

use shopfront_app::domain::{orders::models::OrderFilter, users::models::UserUuid};

use crate::{
    extensions::*,
    orders::{OrderResponse, errors::into_status_error},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    /// Orders, newest first
    pub orders: Vec<OrderResponse>,
}

/// Order Index Handler
///
/// Lists orders, optionally narrowed to one status and/or one buyer.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    responses(
        (status_code = StatusCode::OK, description = "Orders"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status or malformed buyer"),
    ),
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    buyer: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let status = status
        .into_inner()
        .map(|status| status.to_uppercase().parse::<OrderStatus>())
        .transpose()
        .or_400("status must be one of PENDING, CONFIRMED, PROCESSING, SHIPPED, DELIVERED, CANCELLED")?;

    let buyer = buyer
        .into_inner()
        .map(|buyer| buyer.parse::<Uuid>())
        .transpose()
        .or_400("buyer must be a UUID")?
        .map(UserUuid::from_uuid);

    let orders = state
        .app
        .orders
        .list_orders(OrderFilter { status, buyer })
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrdersResponse {
        orders: orders.into_iter().map(Into::into).collect(),
    }))
}
