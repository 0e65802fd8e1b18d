//! Order Items Repository

use shopfront::placement::OrderLine;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::domain::{
    orders::models::{OrderItem, OrderItemUuid, OrderUuid},
    products::{
        models::ProductUuid,
        repositories::{to_db_count, try_get_count},
    },
};

const CREATE_ORDER_ITEMS_SQL: &str = include_str!("../sql/create_order_items.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("../sql/list_order_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert the lines of an order in request order.
    pub(crate) async fn create_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        lines: &[OrderLine<ProductUuid>],
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        let mut uuids = Vec::with_capacity(lines.len());
        let mut positions = Vec::with_capacity(lines.len());
        let mut products = Vec::with_capacity(lines.len());
        let mut quantities = Vec::with_capacity(lines.len());
        let mut prices = Vec::with_capacity(lines.len());

        for (position, line) in lines.iter().enumerate() {
            uuids.push(OrderItemUuid::new().into_uuid());
            positions.push(
                i32::try_from(position)
                    .map_err(|e| sqlx::Error::Encode(format!("position: {e}").into()))?,
            );
            products.push(line.product.into_uuid());
            quantities.push(to_db_count(line.quantity, "quantity")?);
            prices.push(line.price_at_purchase);
        }

        query_as::<Postgres, OrderItem>(CREATE_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .bind(uuids)
            .bind(positions)
            .bind(products)
            .bind(quantities)
            .bind(prices)
            .fetch_all(&mut **tx)
            .await
    }

    /// Items of every listed order, grouped by order and in the order they were placed.
    pub(crate) async fn list_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[Uuid],
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        query_as::<Postgres, OrderItem>(LIST_ORDER_ITEMS_SQL)
            .bind(orders)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            order: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            product: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            quantity: try_get_count(row, "quantity")?,
            price_at_purchase: row.try_get("price_at_purchase")?,
        })
    }
}
