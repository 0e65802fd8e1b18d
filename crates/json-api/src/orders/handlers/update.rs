//! Update Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use shopfront::status::OrderStatus;
use uuid::Uuid;

use shopfront_app::domain::orders::models::OrderUuid;

use crate::{
    extensions::*,
    orders::{OrderResponse, errors::into_status_error, models::UpdateOrderStatusRequest},
    state::State,
};

/// Update Order Status Handler
///
/// Status names are case-insensitive. Moves the lifecycle does not allow are rejected with
/// 409 unless transitions are configured as unguarded.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    responses(
        (status_code = StatusCode::OK, description = "Order updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Transition not allowed"),
    ),
)]
#[tracing::instrument(
    name = "orders.update_status",
    skip(order, json, depot),
    fields(order_uuid = tracing::field::Empty, status = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let order = order.into_inner();

    let status = json
        .into_inner()
        .status
        .to_uppercase()
        .parse::<OrderStatus>()
        .or_400("status must be one of PENDING, CONFIRMED, PROCESSING, SHIPPED, DELIVERED, CANCELLED")?;

    let span = tracing::Span::current();

    span.record("order_uuid", tracing::field::display(order));
    span.record("status", status.as_str());

    let updated = state
        .app
        .orders
        .update_status(OrderUuid::from_uuid(order), status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}
