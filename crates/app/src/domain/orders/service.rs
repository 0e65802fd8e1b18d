//! Orders service.
//!
//! Placement runs as one transaction: lock the referenced products in uuid order, plan the
//! order against the locked rows, take stock with guarded decrements, then write the order and
//! its items. Any failure before commit drops the transaction, so no stock moves and no order
//! row exists.
//!
//! The placement timeout bounds the staging work only. Once `COMMIT` is sent the outcome is
//! owned by the server, so a failed commit is reported as a storage error and never as a
//! retryable timeout.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use shopfront::{
    placement::{OrderLine, RequestedLine, StockedProduct, ValidationError, plan, validate},
    status::OrderStatus,
};
use smallvec::SmallVec;
use sqlx::{Postgres, Transaction};
use tokio::time::timeout;
use tracing::{Span, info, warn};
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        orders::{
            errors::OrdersServiceError,
            models::{NewOrder, Order, OrderFilter, OrderSettings, OrderStats, OrderUuid},
            repositories::{PgOrderItemsRepository, PgOrdersRepository},
        },
        products::{
            models::ProductUuid,
            repositories::{PgPricingTiersRepository, PgProductsRepository},
        },
        users::{models::UserUuid, repository::PgUsersRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    settings: OrderSettings,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
    products_repository: PgProductsRepository,
    tiers_repository: PgPricingTiersRepository,
    users_repository: PgUsersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, settings: OrderSettings) -> Self {
        Self {
            db,
            settings,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
            products_repository: PgProductsRepository::new(),
            tiers_repository: PgPricingTiersRepository::new(),
            users_repository: PgUsersRepository::new(),
        }
    }

    /// Run every placement step up to, but not including, the commit.
    async fn stage_order(
        &self,
        order: OrderUuid,
        buyer: UserUuid,
        lines: &[OrderLine<ProductUuid>],
    ) -> Result<(Transaction<'static, Postgres>, Order), OrdersServiceError> {
        let mut tx = self
            .db
            .begin_bounded_transaction(self.settings.timeout)
            .await?;

        let buyer = self
            .users_repository
            .get_user(&mut tx, buyer)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => OrdersServiceError::BuyerNotFound,
                other => OrdersServiceError::from(other),
            })?;

        let mut uuids: SmallVec<[Uuid; 8]> =
            lines.iter().map(|line| line.product.into_uuid()).collect();

        uuids.sort_unstable();
        uuids.dedup();

        let locked = self
            .products_repository
            .lock_products(&mut tx, &uuids)
            .await?;

        let mut tiers = if self.settings.price_check.resolves_prices() {
            self.tiers_repository.list_tiers(&mut tx, &uuids).await?
        } else {
            FxHashMap::default()
        };

        let stocked: FxHashMap<ProductUuid, StockedProduct> = locked
            .into_iter()
            .map(|product| {
                let stocked = StockedProduct {
                    base_price: product.base_price,
                    stock: product.stock,
                    tiers: tiers.remove(&product.uuid).unwrap_or_default(),
                };

                (product.uuid, stocked)
            })
            .collect();

        let plan = plan(lines, &stocked, self.settings.price_check)?;

        for &(product, quantity) in plan.demand() {
            let rows_affected = self
                .products_repository
                .decrement_stock(&mut tx, product, quantity)
                .await?;

            if rows_affected == 0 {
                return Err(OrdersServiceError::InsufficientStock {
                    product,
                    requested: quantity,
                    available: stocked.get(&product).map_or(0, |stocked| stocked.stock),
                });
            }
        }

        let mut created = self
            .orders_repository
            .create_order(&mut tx, order, buyer.uuid, plan.total_amount())
            .await?;

        created.items = self
            .items_repository
            .create_order_items(&mut tx, order, plan.lines())
            .await?;

        Ok((tx, created))
    }

    async fn attach_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &mut [Order],
    ) -> Result<(), sqlx::Error> {
        let uuids: Vec<Uuid> = orders.iter().map(|order| order.uuid.into_uuid()).collect();

        let items = self.items_repository.list_order_items(tx, &uuids).await?;

        let mut grouped = FxHashMap::<OrderUuid, Vec<_>>::default();

        for item in items {
            grouped.entry(item.order).or_default().push(item);
        }

        for order in orders.iter_mut() {
            order.items = grouped.remove(&order.uuid).unwrap_or_default();
        }

        Ok(())
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(
        name = "orders.place_order",
        skip(self, order),
        fields(
            order = %order.uuid,
            buyer = ?order.buyer,
            items = order.items.len(),
            outcome = tracing::field::Empty,
        ),
        err
    )]
    async fn place_order(&self, order: NewOrder) -> Result<Order, OrdersServiceError> {
        let requested: Vec<RequestedLine<ProductUuid>> = order
            .items
            .iter()
            .map(|item| RequestedLine {
                product: item.product,
                quantity: item.quantity,
                price_at_purchase: item.price_at_purchase.round_dp(2),
            })
            .collect();

        let lines = validate(order.buyer.is_some(), &requested)?;

        let buyer = order
            .buyer
            .ok_or(OrdersServiceError::Validation(ValidationError::MissingBuyer))?;

        let staged = timeout(
            self.settings.timeout,
            self.stage_order(order.uuid, buyer, &lines),
        )
        .await
        .unwrap_or(Err(OrdersServiceError::Timeout));

        let result = match staged {
            Ok((tx, placed)) => tx
                .commit()
                .await
                .map(|()| placed)
                .map_err(OrdersServiceError::Sql),
            Err(error) => Err(error),
        };

        match &result {
            Ok(placed) => {
                Span::current().record("outcome", "placed");

                info!(total = %placed.total_amount, "placed order");
            }
            Err(error) if error.is_stock_failure() => {
                Span::current().record("outcome", "insufficient_stock");
            }
            Err(OrdersServiceError::Timeout) => {
                Span::current().record("outcome", "timeout");

                warn!(timeout = ?self.settings.timeout, "order placement timed out");
            }
            Err(_) => {
                Span::current().record("outcome", "rejected");
            }
        }

        result
    }

    async fn get_order(&self, order: OrderUuid) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let order = self.orders_repository.get_order(&mut tx, order).await?;
        let mut orders = [order];

        self.attach_items(&mut tx, &mut orders).await?;

        tx.commit().await?;

        let [order] = orders;

        Ok(order)
    }

    async fn list_orders(&self, filter: OrderFilter) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut orders = self.orders_repository.list_orders(&mut tx, filter).await?;

        self.attach_items(&mut tx, &mut orders).await?;

        tx.commit().await?;

        Ok(orders)
    }

    #[tracing::instrument(name = "orders.update_status", skip(self), fields(order = %order, to = %status), err)]
    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let current = self
            .orders_repository
            .lock_order_status(&mut tx, order)
            .await?;

        if !self.settings.transitions.permits(current, status) {
            return Err(OrdersServiceError::InvalidTransition {
                from: current,
                to: status,
            });
        }

        if current != status {
            self.orders_repository
                .update_order_status(&mut tx, order, status)
                .await?;

            info!(from = %current, "updated order status");
        }

        let updated = self.orders_repository.get_order(&mut tx, order).await?;
        let mut orders = [updated];

        self.attach_items(&mut tx, &mut orders).await?;

        tx.commit().await?;

        let [updated] = orders;

        Ok(updated)
    }

    async fn delete_order(&self, order: OrderUuid) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.orders_repository.delete_order(&mut tx, order).await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn stats(&self) -> Result<OrderStats, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let stats = self.orders_repository.order_stats(&mut tx).await?;

        tx.commit().await?;

        Ok(stats)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Place an order: validate it, take stock for every line and record it as `PENDING`,
    /// all or nothing.
    async fn place_order(&self, order: NewOrder) -> Result<Order, OrdersServiceError>;

    /// Retrieve a single order with its items.
    async fn get_order(&self, order: OrderUuid) -> Result<Order, OrdersServiceError>;

    /// Retrieve orders matching the filter, newest first.
    async fn list_orders(&self, filter: OrderFilter) -> Result<Vec<Order>, OrdersServiceError>;

    /// Move an order to a new status, subject to the configured transition policy.
    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError>;

    /// Delete an order and its items. Stock is not returned.
    async fn delete_order(&self, order: OrderUuid) -> Result<(), OrdersServiceError>;

    /// Dashboard totals across orders, products and users.
    async fn stats(&self) -> Result<OrderStats, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rust_decimal::Decimal;
    use shopfront::{price_check::PriceCheck, status::TransitionPolicy, tiers::PricingTier};
    use testresult::TestResult;

    use crate::{
        domain::{
            orders::models::NewOrderItem,
            products::{
                ProductsService,
                models::{NewProduct, ProductUpdate},
            },
        },
        test::{TestContext, helpers},
    };

    use super::*;

    fn item(product: ProductUuid, quantity: i64, price: Decimal) -> NewOrderItem {
        NewOrderItem {
            product,
            quantity,
            price_at_purchase: price,
        }
    }

    async fn tiered_product(ctx: &TestContext, stock: u32) -> TestResult<ProductUuid> {
        let uuid = ProductUuid::new();

        ctx.products
            .create_product(NewProduct {
                uuid,
                name: "Oxford Shirt".to_string(),
                description: None,
                sku: None,
                base_price: Decimal::from(100),
                stock,
                tiers: vec![PricingTier::new(10, Decimal::from(90))],
            })
            .await?;

        Ok(uuid)
    }

    #[tokio::test]
    async fn place_order_takes_last_units() -> TestResult {
        let ctx = TestContext::new().await;

        let buyer = helpers::create_user(&ctx, "buyer@example.com").await?;
        let product = helpers::create_product(&ctx, "Field Jacket", 3499, 2).await?;

        let order = helpers::place_order(
            &ctx,
            buyer.uuid,
            &[(product.uuid, 2, Decimal::from(3499))],
        )
        .await?;

        assert_eq!(order.total_amount, Decimal::from(6998));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.buyer.uuid, buyer.uuid);
        assert_eq!(order.items.len(), 1);
        assert_eq!(
            order.items.first().map(|item| item.product_name.as_str()),
            Some("Field Jacket")
        );

        let product = ctx.products.get_product(product.uuid).await?;

        assert_eq!(product.stock, 0);

        Ok(())
    }

    #[tokio::test]
    async fn place_order_insufficient_stock_leaves_no_trace() -> TestResult {
        let ctx = TestContext::new().await;

        let buyer = helpers::create_user(&ctx, "buyer@example.com").await?;
        let product = helpers::create_product(&ctx, "Field Jacket", 3499, 1).await?;

        let result = helpers::place_order(
            &ctx,
            buyer.uuid,
            &[(product.uuid, 2, Decimal::from(3499))],
        )
        .await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::InsufficientStock {
                    requested: 2,
                    available: 1,
                    ..
                })
            ),
            "expected InsufficientStock, got {result:?}"
        );

        let product = ctx.products.get_product(product.uuid).await?;
        let orders = ctx.orders.list_orders(OrderFilter::default()).await?;

        assert_eq!(product.stock, 1);
        assert!(orders.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn place_order_is_all_or_nothing_across_lines() -> TestResult {
        let ctx = TestContext::new().await;

        let buyer = helpers::create_user(&ctx, "buyer@example.com").await?;
        let plenty = helpers::create_product(&ctx, "Socks", 99, 50).await?;
        let scarce = helpers::create_product(&ctx, "Jacket", 3499, 1).await?;

        let result = helpers::place_order(
            &ctx,
            buyer.uuid,
            &[
                (plenty.uuid, 5, plenty.base_price),
                (scarce.uuid, 3, scarce.base_price),
            ],
        )
        .await;

        assert!(
            matches!(result, Err(OrdersServiceError::InsufficientStock { .. })),
            "expected InsufficientStock, got {result:?}"
        );

        let plenty = ctx.products.get_product(plenty.uuid).await?;

        assert_eq!(plenty.stock, 50);

        Ok(())
    }

    #[tokio::test]
    async fn place_order_sums_repeated_products() -> TestResult {
        let ctx = TestContext::new().await;

        let buyer = helpers::create_user(&ctx, "buyer@example.com").await?;
        let product = helpers::create_product(&ctx, "Socks", 99, 3).await?;

        let result = helpers::place_order(
            &ctx,
            buyer.uuid,
            &[
                (product.uuid, 2, product.base_price),
                (product.uuid, 2, product.base_price),
            ],
        )
        .await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::InsufficientStock {
                    requested: 4,
                    available: 3,
                    ..
                })
            ),
            "expected InsufficientStock, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn place_order_unknown_product_returns_product_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let buyer = helpers::create_user(&ctx, "buyer@example.com").await?;
        let product = helpers::create_product(&ctx, "Socks", 99, 3).await?;
        let missing = ProductUuid::new();

        let result = helpers::place_order(
            &ctx,
            buyer.uuid,
            &[(product.uuid, 1, product.base_price), (missing, 1, Decimal::ONE)],
        )
        .await;

        assert!(
            matches!(result, Err(OrdersServiceError::ProductNotFound(uuid)) if uuid == missing),
            "expected ProductNotFound, got {result:?}"
        );

        let product = ctx.products.get_product(product.uuid).await?;

        assert_eq!(product.stock, 3);

        Ok(())
    }

    #[tokio::test]
    async fn place_order_unknown_buyer_returns_buyer_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let product = helpers::create_product(&ctx, "Socks", 99, 3).await?;

        let result = helpers::place_order(
            &ctx,
            UserUuid::new(),
            &[(product.uuid, 1, product.base_price)],
        )
        .await;

        assert!(
            matches!(result, Err(OrdersServiceError::BuyerNotFound)),
            "expected BuyerNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn place_order_validates_before_touching_storage() {
        let ctx = TestContext::new().await;

        let no_buyer = ctx
            .orders
            .place_order(NewOrder {
                uuid: OrderUuid::new(),
                buyer: None,
                items: vec![item(ProductUuid::new(), 1, Decimal::ONE)],
            })
            .await;

        let no_items = ctx
            .orders
            .place_order(NewOrder {
                uuid: OrderUuid::new(),
                buyer: Some(UserUuid::new()),
                items: Vec::new(),
            })
            .await;

        let zero_quantity = ctx
            .orders
            .place_order(NewOrder {
                uuid: OrderUuid::new(),
                buyer: Some(UserUuid::new()),
                items: vec![item(ProductUuid::new(), 0, Decimal::ONE)],
            })
            .await;

        assert!(matches!(
            no_buyer,
            Err(OrdersServiceError::Validation(ValidationError::MissingBuyer))
        ));
        assert!(matches!(
            no_items,
            Err(OrdersServiceError::Validation(ValidationError::NoItems))
        ));
        assert!(matches!(
            zero_quantity,
            Err(OrdersServiceError::Validation(
                ValidationError::NonPositiveQuantity { quantity: 0, .. }
            ))
        ));
    }

    #[tokio::test]
    async fn place_order_trusts_submitted_prices_by_default() -> TestResult {
        let ctx = TestContext::new().await;

        let buyer = helpers::create_user(&ctx, "buyer@example.com").await?;
        let product = tiered_product(&ctx, 50).await?;

        let order = helpers::place_order(&ctx, buyer.uuid, &[(product, 10, Decimal::ONE)]).await?;

        assert_eq!(order.total_amount, Decimal::from(10));

        Ok(())
    }

    #[tokio::test]
    async fn place_order_rejects_mismatched_prices_when_configured() -> TestResult {
        let ctx = TestContext::new().await;

        let orders = ctx.orders_with(OrderSettings {
            price_check: PriceCheck::Reject {
                tolerance: Decimal::ZERO,
            },
            ..OrderSettings::default()
        });

        let buyer = helpers::create_user(&ctx, "buyer@example.com").await?;
        let product = tiered_product(&ctx, 50).await?;

        let result = orders
            .place_order(NewOrder {
                uuid: OrderUuid::new(),
                buyer: Some(buyer.uuid),
                items: vec![item(product, 10, Decimal::from(80))],
            })
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::PriceMismatch { expected, .. }) if expected == Decimal::from(90)),
            "expected PriceMismatch, got {result:?}"
        );

        let accepted = orders
            .place_order(NewOrder {
                uuid: OrderUuid::new(),
                buyer: Some(buyer.uuid),
                items: vec![item(product, 10, Decimal::from(90))],
            })
            .await?;

        assert_eq!(accepted.total_amount, Decimal::from(900));

        Ok(())
    }

    #[tokio::test]
    async fn place_order_clamps_prices_when_configured() -> TestResult {
        let ctx = TestContext::new().await;

        let orders = ctx.orders_with(OrderSettings {
            price_check: PriceCheck::Clamp {
                tolerance: Decimal::ZERO,
            },
            ..OrderSettings::default()
        });

        let buyer = helpers::create_user(&ctx, "buyer@example.com").await?;
        let product = tiered_product(&ctx, 50).await?;

        let order = orders
            .place_order(NewOrder {
                uuid: OrderUuid::new(),
                buyer: Some(buyer.uuid),
                items: vec![item(product, 10, Decimal::ONE)],
            })
            .await?;

        assert_eq!(order.total_amount, Decimal::from(900));
        assert_eq!(
            order.items.first().map(|item| item.price_at_purchase),
            Some(Decimal::from(90))
        );

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_orders_for_the_last_unit_sell_it_once() -> TestResult {
        let ctx = TestContext::new().await;

        let first_buyer = helpers::create_user(&ctx, "first@example.com").await?;
        let second_buyer = helpers::create_user(&ctx, "second@example.com").await?;
        let product = helpers::create_product(&ctx, "Last Jacket", 3499, 1).await?;

        let (first, second) = tokio::join!(
            helpers::place_order(&ctx, first_buyer.uuid, &[(product.uuid, 1, product.base_price)]),
            helpers::place_order(&ctx, second_buyer.uuid, &[(product.uuid, 1, product.base_price)]),
        );

        let placed = [&first, &second].iter().filter(|result| result.is_ok()).count();

        let rejected = [&first, &second]
            .iter()
            .filter(|result| matches!(result, Err(error) if error.is_stock_failure()))
            .count();

        assert_eq!(placed, 1, "exactly one order should win: {first:?} / {second:?}");
        assert_eq!(rejected, 1, "the other should fail on stock: {first:?} / {second:?}");

        let product = ctx.products.get_product(product.uuid).await?;

        assert_eq!(product.stock, 0);

        Ok(())
    }

    #[tokio::test]
    async fn place_order_times_out() -> TestResult {
        let ctx = TestContext::new().await;

        let orders = ctx.orders_with(OrderSettings {
            timeout: Duration::ZERO,
            ..OrderSettings::default()
        });

        let buyer = helpers::create_user(&ctx, "buyer@example.com").await?;
        let product = helpers::create_product(&ctx, "Socks", 99, 3).await?;

        let result = orders
            .place_order(NewOrder {
                uuid: OrderUuid::new(),
                buyer: Some(buyer.uuid),
                items: vec![item(product.uuid, 1, product.base_price)],
            })
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::Timeout)),
            "expected Timeout, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn timed_out_placements_never_leave_an_order_behind() -> TestResult {
        let ctx = TestContext::new().await;

        let buyer = helpers::create_user(&ctx, "buyer@example.com").await?;
        let product = helpers::create_product(&ctx, "Socks", 99, 100).await?;

        let mut placed = 0;

        for millis in 1..=40 {
            let orders = ctx.orders_with(OrderSettings {
                timeout: Duration::from_millis(millis),
                ..OrderSettings::default()
            });

            let uuid = OrderUuid::new();

            let result = orders
                .place_order(NewOrder {
                    uuid,
                    buyer: Some(buyer.uuid),
                    items: vec![item(product.uuid, 1, product.base_price)],
                })
                .await;

            let stored = ctx.orders.get_order(uuid).await;

            match result {
                Ok(_) => {
                    placed += 1;

                    assert!(stored.is_ok(), "placed order {uuid} must be stored");
                }
                Err(OrdersServiceError::Timeout) => {
                    assert!(
                        matches!(stored, Err(OrdersServiceError::NotFound)),
                        "timed out order {uuid} must not be stored, got {stored:?}"
                    );
                }
                Err(other) => return Err(other.into()),
            }
        }

        let product = ctx.products.get_product(product.uuid).await?;

        assert_eq!(product.stock, 100 - placed, "stock moves only for placed orders");

        Ok(())
    }

    #[tokio::test]
    async fn get_order_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.orders.get_order(OrderUuid::new()).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_order_keeps_prices_frozen_after_catalogue_changes() -> TestResult {
        let ctx = TestContext::new().await;

        let buyer = helpers::create_user(&ctx, "buyer@example.com").await?;
        let product = helpers::create_product(&ctx, "Socks", 99, 10).await?;

        let placed =
            helpers::place_order(&ctx, buyer.uuid, &[(product.uuid, 2, product.base_price)])
                .await?;

        ctx.products
            .update_product(
                product.uuid,
                ProductUpdate {
                    base_price: Some(Decimal::from(150)),
                    ..Default::default()
                },
            )
            .await?;

        let fetched = ctx.orders.get_order(placed.uuid).await?;

        assert_eq!(fetched, placed);

        Ok(())
    }

    #[tokio::test]
    async fn list_orders_filters_by_status_and_buyer() -> TestResult {
        let ctx = TestContext::new().await;

        let alice = helpers::create_user(&ctx, "alice@example.com").await?;
        let bob = helpers::create_user(&ctx, "bob@example.com").await?;
        let product = helpers::create_product(&ctx, "Socks", 99, 10).await?;

        let line = [(product.uuid, 1, product.base_price)];

        let first = helpers::place_order(&ctx, alice.uuid, &line).await?;
        let second = helpers::place_order(&ctx, alice.uuid, &line).await?;

        helpers::place_order(&ctx, bob.uuid, &line).await?;

        ctx.orders
            .update_status(first.uuid, OrderStatus::Confirmed)
            .await?;

        let alices = ctx
            .orders
            .list_orders(OrderFilter {
                buyer: Some(alice.uuid),
                status: None,
            })
            .await?;

        let alices_pending = ctx
            .orders
            .list_orders(OrderFilter {
                buyer: Some(alice.uuid),
                status: Some(OrderStatus::Pending),
            })
            .await?;

        let uuids: Vec<OrderUuid> = alices.iter().map(|order| order.uuid).collect();

        assert_eq!(uuids, vec![second.uuid, first.uuid]);
        assert_eq!(
            alices_pending.iter().map(|order| order.uuid).collect::<Vec<_>>(),
            vec![second.uuid]
        );
        assert!(alices.iter().all(|order| order.items.len() == 1));

        Ok(())
    }

    #[tokio::test]
    async fn update_status_follows_lifecycle() -> TestResult {
        let ctx = TestContext::new().await;

        let buyer = helpers::create_user(&ctx, "buyer@example.com").await?;
        let product = helpers::create_product(&ctx, "Socks", 99, 10).await?;

        let order =
            helpers::place_order(&ctx, buyer.uuid, &[(product.uuid, 1, product.base_price)])
                .await?;

        let shipped = ctx
            .orders
            .update_status(order.uuid, OrderStatus::Shipped)
            .await?;

        assert_eq!(shipped.status, OrderStatus::Shipped);

        let backwards = ctx
            .orders
            .update_status(order.uuid, OrderStatus::Pending)
            .await;

        assert!(
            matches!(
                backwards,
                Err(OrdersServiceError::InvalidTransition {
                    from: OrderStatus::Shipped,
                    to: OrderStatus::Pending
                })
            ),
            "expected InvalidTransition, got {backwards:?}"
        );

        let same = ctx
            .orders
            .update_status(order.uuid, OrderStatus::Shipped)
            .await?;

        assert_eq!(same.status, OrderStatus::Shipped);

        Ok(())
    }

    #[tokio::test]
    async fn update_status_unguarded_allows_any_move() -> TestResult {
        let ctx = TestContext::new().await;

        let orders = ctx.orders_with(OrderSettings {
            transitions: TransitionPolicy::Unguarded,
            ..OrderSettings::default()
        });

        let buyer = helpers::create_user(&ctx, "buyer@example.com").await?;
        let product = helpers::create_product(&ctx, "Socks", 99, 10).await?;

        let order =
            helpers::place_order(&ctx, buyer.uuid, &[(product.uuid, 1, product.base_price)])
                .await?;

        orders
            .update_status(order.uuid, OrderStatus::Delivered)
            .await?;

        let reopened = orders
            .update_status(order.uuid, OrderStatus::Pending)
            .await?;

        assert_eq!(reopened.status, OrderStatus::Pending);

        Ok(())
    }

    #[tokio::test]
    async fn update_status_unknown_order_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .orders
            .update_status(OrderUuid::new(), OrderStatus::Confirmed)
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_order_removes_it_and_keeps_stock_taken() -> TestResult {
        let ctx = TestContext::new().await;

        let buyer = helpers::create_user(&ctx, "buyer@example.com").await?;
        let product = helpers::create_product(&ctx, "Socks", 99, 10).await?;

        let order =
            helpers::place_order(&ctx, buyer.uuid, &[(product.uuid, 4, product.base_price)])
                .await?;

        ctx.orders.delete_order(order.uuid).await?;

        let result = ctx.orders.get_order(order.uuid).await;
        let product = ctx.products.get_product(product.uuid).await?;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );
        assert_eq!(product.stock, 6);

        let again = ctx.orders.delete_order(order.uuid).await;

        assert!(
            matches!(again, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {again:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn stats_count_orders_revenue_and_catalogue() -> TestResult {
        let ctx = TestContext::new().await;

        let buyer = helpers::create_user(&ctx, "buyer@example.com").await?;
        let product = helpers::create_product(&ctx, "Socks", 100, 10).await?;

        helpers::create_product(&ctx, "Belt", 300, 10).await?;

        let first =
            helpers::place_order(&ctx, buyer.uuid, &[(product.uuid, 1, product.base_price)])
                .await?;

        helpers::place_order(&ctx, buyer.uuid, &[(product.uuid, 2, product.base_price)]).await?;

        ctx.orders
            .update_status(first.uuid, OrderStatus::Delivered)
            .await?;

        let stats = ctx.orders.stats().await?;

        assert_eq!(
            stats,
            OrderStats {
                total_orders: 2,
                total_revenue: Decimal::from(300),
                pending_orders: 1,
                delivered_orders: 1,
                total_products: 2,
                total_users: 1,
            }
        );

        Ok(())
    }
}
