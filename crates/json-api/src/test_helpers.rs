//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use shopfront::{status::OrderStatus, tiers::PricingTier};

use shopfront_app::{
    context::AppContext,
    domain::{
        orders::{
            MockOrdersService,
            models::{Buyer, Order, OrderItem, OrderItemUuid, OrderUuid},
        },
        products::{
            MockProductsService,
            models::{Product, ProductUuid},
        },
        users::{
            MockUsersService,
            models::{User, UserRole, UserUuid},
        },
    },
};

use crate::state::State;

pub(crate) fn make_product(uuid: ProductUuid) -> Product {
    Product {
        uuid,
        name: "Oxford Shirt".to_string(),
        description: Some("Button-down cotton shirt".to_string()),
        sku: Some("OX-001".to_string()),
        base_price: Decimal::from(100),
        stock: 50,
        tiers: vec![PricingTier::new(10, Decimal::from(90))],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_user(uuid: UserUuid) -> User {
    User {
        uuid,
        name: "Thabo".to_string(),
        email: "thabo@example.com".to_string(),
        role: UserRole::Retail,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// Pending order for two units of one product at 90 each.
pub(crate) fn make_order(uuid: OrderUuid) -> Order {
    Order {
        uuid,
        buyer: Buyer {
            uuid: UserUuid::new(),
            name: "Thabo".to_string(),
            email: "thabo@example.com".to_string(),
        },
        total_amount: Decimal::from(180),
        status: OrderStatus::Pending,
        items: vec![OrderItem {
            uuid: OrderItemUuid::new(),
            order: uuid,
            product: ProductUuid::new(),
            product_name: "Oxford Shirt".to_string(),
            quantity: 2,
            price_at_purchase: Decimal::from(90),
        }],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// Products mock that fails the test on any call.
pub(crate) fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();
    products.expect_restock_product().never();
    products.expect_quote().never();

    products
}

/// Orders mock that fails the test on any call.
pub(crate) fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_place_order().never();
    orders.expect_get_order().never();
    orders.expect_list_orders().never();
    orders.expect_update_status().never();
    orders.expect_delete_order().never();
    orders.expect_stats().never();

    orders
}

/// Users mock that fails the test on any call.
pub(crate) fn strict_users_mock() -> MockUsersService {
    let mut users = MockUsersService::new();

    users.expect_list_users().never();
    users.expect_get_user().never();
    users.expect_find_by_email().never();
    users.expect_create_user().never();
    users.expect_delete_user().never();

    users
}

fn service(app: AppContext, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(State::from_app_context(app)))
            .push(route),
    )
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    service(
        AppContext {
            products: Arc::new(products),
            orders: Arc::new(strict_orders_mock()),
            users: Arc::new(strict_users_mock()),
        },
        route,
    )
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    service(
        AppContext {
            products: Arc::new(strict_products_mock()),
            orders: Arc::new(orders),
            users: Arc::new(strict_users_mock()),
        },
        route,
    )
}

pub(crate) fn users_service(users: MockUsersService, route: Router) -> Service {
    service(
        AppContext {
            products: Arc::new(strict_products_mock()),
            orders: Arc::new(strict_orders_mock()),
            users: Arc::new(users),
        },
        route,
    )
}
