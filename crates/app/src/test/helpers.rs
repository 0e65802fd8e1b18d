//! Test Helpers

use rust_decimal::Decimal;

use crate::{
    domain::{
        orders::{
            OrdersService, OrdersServiceError,
            models::{NewOrder, NewOrderItem, Order, OrderUuid},
        },
        products::{
            ProductsService, ProductsServiceError,
            models::{NewProduct, Product, ProductUuid},
        },
        users::{
            UsersService, UsersServiceError,
            models::{NewUser, User, UserRole, UserUuid},
        },
    },
    test::TestContext,
};

/// Create a retail user named after the local part of `email`.
pub(crate) async fn create_user(ctx: &TestContext, email: &str) -> Result<User, UsersServiceError> {
    let name = email.split('@').next().unwrap_or(email);

    ctx.users
        .create_user(NewUser {
            uuid: UserUuid::new(),
            name: name.to_string(),
            email: email.to_string(),
            role: UserRole::Retail,
        })
        .await
}

/// Create an untiered product priced in whole currency units.
pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    price: i64,
    stock: u32,
) -> Result<Product, ProductsServiceError> {
    ctx.products
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            name: name.to_string(),
            description: None,
            sku: None,
            base_price: Decimal::from(price),
            stock,
            tiers: Vec::new(),
        })
        .await
}

/// Place an order of `(product, quantity, price)` lines with the default order settings.
pub(crate) async fn place_order(
    ctx: &TestContext,
    buyer: UserUuid,
    lines: &[(ProductUuid, i64, Decimal)],
) -> Result<Order, OrdersServiceError> {
    ctx.orders
        .place_order(NewOrder {
            uuid: OrderUuid::new(),
            buyer: Some(buyer),
            items: lines
                .iter()
                .map(|&(product, quantity, price_at_purchase)| NewOrderItem {
                    product,
                    quantity,
                    price_at_purchase,
                })
                .collect(),
        })
        .await
}
