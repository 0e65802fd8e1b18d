//! Price Quote Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    oapi::{
        ToSchema,
        extract::{PathParam, QueryParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shopfront_app::domain::products::models::{ProductUuid, Quote};

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Quote Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct QuoteResponse {
    pub product: Uuid,
    pub quantity: u32,

    /// Price per unit before any tier applies
    pub base_price: Decimal,

    /// Price per unit after the best matching tier
    pub unit_price: Decimal,

    pub line_total: Decimal,

    /// Whether current stock covers the quantity
    pub in_stock: bool,
}

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        QuoteResponse {
            product: quote.product.into_uuid(),
            quantity: quote.quantity,
            base_price: quote.base_price,
            unit_price: quote.unit_price,
            line_total: quote.line_total,
            in_stock: quote.in_stock,
        }
    }
}

/// Price Quote Handler
///
/// Previews the tiered unit price a buyer would pay for `quantity` units.
#[endpoint(
    tags("products"),
    summary = "Quote Product Price",
    responses(
        (status_code = StatusCode::OK, description = "Quote"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    quantity: QueryParam<u32, true>,
    depot: &mut Depot,
) -> Result<Json<QuoteResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let quote = state
        .app
        .products
        .quote(
            ProductUuid::from_uuid(product.into_inner()),
            quantity.into_inner(),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(quote.into()))
}
