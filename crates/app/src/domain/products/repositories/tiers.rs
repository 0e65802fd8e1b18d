//! Pricing Tiers Repository

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use shopfront::tiers::PricingTier;
use sqlx::{Postgres, Row, Transaction, query};
use uuid::Uuid;

use crate::domain::products::models::ProductUuid;

use super::products::{to_db_count, try_get_count};

const LIST_TIERS_SQL: &str = include_str!("../sql/list_tiers.sql");
const DELETE_TIERS_SQL: &str = include_str!("../sql/delete_tiers.sql");
const CREATE_TIERS_SQL: &str = include_str!("../sql/create_tiers.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPricingTiersRepository;

impl PgPricingTiersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Tiers for each product, in the order they were listed when saved.
    pub(crate) async fn list_tiers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[Uuid],
    ) -> Result<FxHashMap<ProductUuid, Vec<PricingTier>>, sqlx::Error> {
        let rows = query(LIST_TIERS_SQL)
            .bind(products)
            .fetch_all(&mut **tx)
            .await?;

        let mut tiers = FxHashMap::<ProductUuid, Vec<PricingTier>>::default();

        for row in rows {
            let product = ProductUuid::from_uuid(row.try_get("product_uuid")?);
            let minimum_quantity = try_get_count(&row, "minimum_quantity")?;
            let unit_price: Decimal = row.try_get("unit_price")?;

            tiers
                .entry(product)
                .or_default()
                .push(PricingTier::new(minimum_quantity, unit_price));
        }

        Ok(tiers)
    }

    /// Replace every tier of `product` with `tiers`, preserving their order.
    pub(crate) async fn replace_tiers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        tiers: &[PricingTier],
    ) -> Result<(), sqlx::Error> {
        query(DELETE_TIERS_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?;

        if tiers.is_empty() {
            return Ok(());
        }

        let mut positions = Vec::with_capacity(tiers.len());
        let mut minimum_quantities = Vec::with_capacity(tiers.len());
        let mut unit_prices = Vec::with_capacity(tiers.len());

        for (position, tier) in tiers.iter().enumerate() {
            positions.push(
                i32::try_from(position)
                    .map_err(|e| sqlx::Error::Encode(format!("position: {e}").into()))?,
            );
            minimum_quantities.push(to_db_count(tier.minimum_quantity(), "minimum_quantity")?);
            unit_prices.push(tier.unit_price());
        }

        query(CREATE_TIERS_SQL)
            .bind(product.into_uuid())
            .bind(positions)
            .bind(minimum_quantities)
            .bind(unit_prices)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}
