//! Place Order Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};
use tracing::info;

use crate::{
    extensions::*,
    observability::observe_order_placement,
    orders::{
        OrderResponse,
        errors::{into_status_error, placement_outcome},
        models::CreateOrderRequest,
    },
    state::State,
};

/// Place Order Handler
///
/// Places an order in a single transaction: every line's stock is taken or none is. Stock
/// failures name the product and the units still available.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid order or insufficient stock"),
        (status_code = StatusCode::CONFLICT, description = "Order UUID already in use"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Placement timed out"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let result = state.app.orders.place_order(json.into_inner().into()).await;

    observe_order_placement(placement_outcome(&result));

    let order = result.map_err(into_status_error)?;

    info!(
        request_id = depot.request_id(),
        order = %order.uuid,
        total = %order.total_amount,
        "placed order"
    );

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}
