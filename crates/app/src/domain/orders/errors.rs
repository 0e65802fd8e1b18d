//! Orders service errors.

use rust_decimal::Decimal;
use shopfront::{
    placement::{PlacementError, ValidationError},
    status::OrderStatus,
};
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::products::models::ProductUuid;

/// `PostgreSQL` error codes that mean a concurrent transaction won a race.
const SERIALIZATION_FAILURE: &str = "40001";
const DEADLOCK_DETECTED: &str = "40P01";

/// `PostgreSQL` error code raised when `statement_timeout` cancels a statement.
const QUERY_CANCELED: &str = "57014";

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError<ProductUuid>),

    #[error("buyer not found")]
    BuyerNotFound,

    #[error("product {0} not found")]
    ProductNotFound(ProductUuid),

    #[error("insufficient stock for product {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: ProductUuid,
        requested: u32,
        available: u32,
    },

    #[error("stock changed while the order was being placed")]
    StockConflict,

    #[error("submitted price {submitted} for product {product} does not match {expected}")]
    PriceMismatch {
        product: ProductUuid,
        submitted: Decimal,
        expected: Decimal,
    },

    #[error("order not found")]
    NotFound,

    #[error("cannot move an order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("order placement timed out")]
    Timeout,

    #[error("order already exists")]
    AlreadyExists,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl OrdersServiceError {
    /// Whether the caller should treat this as "not enough stock", including lost races.
    pub fn is_stock_failure(&self) -> bool {
        matches!(self, Self::InsufficientStock { .. } | Self::StockConflict)
    }
}

impl From<PlacementError<ProductUuid>> for OrdersServiceError {
    fn from(error: PlacementError<ProductUuid>) -> Self {
        match error {
            PlacementError::Validation(error) => Self::Validation(error),
            PlacementError::ProductNotFound { product } => Self::ProductNotFound(product),
            PlacementError::InsufficientStock {
                product,
                requested,
                available,
            } => Self::InsufficientStock {
                product,
                requested,
                available,
            },
            PlacementError::PriceMismatch {
                product,
                submitted,
                expected,
            } => Self::PriceMismatch {
                product,
                submitted,
                expected,
            },
        }
    }
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        let code = error
            .as_database_error()
            .and_then(DatabaseError::code)
            .map(|code| code.into_owned());

        match code.as_deref() {
            Some(SERIALIZATION_FAILURE | DEADLOCK_DETECTED) => return Self::StockConflict,
            Some(QUERY_CANCELED) => return Self::Timeout,
            _ => {}
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_errors_keep_their_details() {
        let product = ProductUuid::new();

        let error = OrdersServiceError::from(PlacementError::InsufficientStock {
            product,
            requested: 2,
            available: 1,
        });

        assert!(matches!(
            error,
            OrdersServiceError::InsufficientStock {
                requested: 2,
                available: 1,
                ..
            }
        ));
        assert!(error.is_stock_failure());
    }

    #[test]
    fn conflicts_count_as_stock_failures() {
        assert!(OrdersServiceError::StockConflict.is_stock_failure());
        assert!(!OrdersServiceError::Timeout.is_stock_failure());
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert!(matches!(
            OrdersServiceError::from(Error::RowNotFound),
            OrdersServiceError::NotFound
        ));
    }

    #[test]
    fn message_names_product_and_availability() {
        let product = ProductUuid::new();

        let error = OrdersServiceError::InsufficientStock {
            product,
            requested: 3,
            available: 1,
        };

        assert_eq!(
            error.to_string(),
            format!("insufficient stock for product {product}: requested 3, available 1")
        );
    }
}
