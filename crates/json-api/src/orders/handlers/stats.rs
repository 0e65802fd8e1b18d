//! Dashboard Stats Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::StatsResponse},
    state::State,
};

/// Dashboard Stats Handler
///
/// Revenue sums the totals of every order regardless of status.
#[endpoint(
    tags("stats"),
    summary = "Dashboard Stats",
    responses(
        (status_code = StatusCode::OK, description = "Totals"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<StatsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let stats = state
        .app
        .orders
        .stats()
        .await
        .map_err(into_status_error)?;

    Ok(Json(stats.into()))
}
