//! Restock Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shopfront_app::domain::products::models::ProductUuid;

use crate::{
    extensions::*,
    products::{ProductResponse, errors::into_status_error},
    state::State,
};

/// Restock Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RestockRequest {
    /// Units to add to the current stock
    pub amount: u32,
}

/// Restock Product Handler
#[endpoint(
    tags("products"),
    summary = "Restock Product",
    responses(
        (status_code = StatusCode::OK, description = "Product restocked"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<RestockRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .restock_product(
            ProductUuid::from_uuid(product.into_inner()),
            json.into_inner().amount,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use shopfront_app::domain::products::{MockProductsService, ProductsServiceError};

    use crate::test_helpers::{make_product, products_service};

    use super::*;

    fn make_service(repo: MockProductsService) -> Service {
        products_service(
            repo,
            Router::with_path("products/{product}/restock").post(handler),
        )
    }

    #[tokio::test]
    async fn test_restock_returns_new_stock() -> TestResult {
        let uuid = ProductUuid::new();

        let mut repo = MockProductsService::new();

        repo.expect_restock_product()
            .once()
            .withf(move |product, amount| *product == uuid && *amount == 25)
            .return_once(move |_, amount| {
                let mut product = make_product(uuid);

                product.stock += amount;

                Ok(product)
            });

        let response: ProductResponse =
            TestClient::post(format!("http://example.com/products/{uuid}/restock"))
                .json(&json!({ "amount": 25 }))
                .send(&make_service(repo))
                .await
                .take_json()
                .await?;

        assert_eq!(response.stock, 75);

        Ok(())
    }

    #[tokio::test]
    async fn test_restock_zero_returns_400() {
        let mut repo = MockProductsService::new();

        repo.expect_restock_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::InvalidQuantity));

        let res = TestClient::post(format!(
            "http://example.com/products/{}/restock",
            Uuid::now_v7()
        ))
        .json(&json!({ "amount": 0 }))
        .send(&make_service(repo))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
