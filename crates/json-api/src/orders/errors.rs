//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use shopfront_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::Validation(_)
        | OrdersServiceError::BuyerNotFound
        | OrdersServiceError::ProductNotFound(_)
        | OrdersServiceError::InsufficientStock { .. }
        | OrdersServiceError::PriceMismatch { .. } => {
            StatusError::bad_request().brief(error.to_string())
        }
        OrdersServiceError::StockConflict => StatusError::bad_request()
            .brief("Insufficient stock: another order took the remaining units"),
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::InvalidTransition { .. } => {
            StatusError::conflict().brief(error.to_string())
        }
        OrdersServiceError::AlreadyExists => {
            StatusError::conflict().brief("An order with this UUID already exists")
        }
        OrdersServiceError::Timeout => {
            StatusError::service_unavailable().brief("Order placement timed out, please retry")
        }
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => StatusError::bad_request().brief("Invalid order payload"),
        OrdersServiceError::Sql(source) => {
            error!("order storage failure: {source}");

            StatusError::internal_server_error().brief("Failed to process order")
        }
    }
}

/// Metric label for how a placement attempt ended.
pub(crate) fn placement_outcome<T>(result: &Result<T, OrdersServiceError>) -> &'static str {
    match result {
        Ok(_) => "placed",
        Err(OrdersServiceError::Validation(_)) => "validation",
        Err(OrdersServiceError::BuyerNotFound | OrdersServiceError::ProductNotFound(_)) => {
            "not_found"
        }
        Err(error) if error.is_stock_failure() => "insufficient_stock",
        Err(OrdersServiceError::PriceMismatch { .. }) => "price_mismatch",
        Err(OrdersServiceError::Timeout) => "timeout",
        Err(_) => "error",
    }
}
