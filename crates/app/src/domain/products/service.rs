//! Products service.

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use shopfront::{
    pricing::line_total,
    tiers::{is_whole_cents, validate_tiers},
};
use sqlx::{Postgres, Transaction};
use tracing::info;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::products::{
        errors::ProductsServiceError,
        models::{NewProduct, Product, ProductFilter, ProductUpdate, ProductUuid, Quote},
        repositories::{PgPricingTiersRepository, PgProductsRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
    tiers_repository: PgPricingTiersRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
            tiers_repository: PgPricingTiersRepository::new(),
        }
    }

    async fn attach_tiers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &mut [Product],
    ) -> Result<(), sqlx::Error> {
        let uuids: Vec<Uuid> = products
            .iter()
            .map(|product| product.uuid.into_uuid())
            .collect();

        let mut tiers = self.tiers_repository.list_tiers(tx, &uuids).await?;

        for product in products.iter_mut() {
            product.tiers = tiers.remove(&product.uuid).unwrap_or_default();
        }

        Ok(())
    }
}

fn check_quantity(quantity: u32) -> Result<i32, ProductsServiceError> {
    match i32::try_from(quantity) {
        Ok(quantity) if quantity > 0 => Ok(quantity),
        _ => Err(ProductsServiceError::InvalidQuantity),
    }
}

fn check_base_price(base_price: Decimal) -> Result<(), ProductsServiceError> {
    if base_price < Decimal::ZERO || !is_whole_cents(base_price) {
        return Err(ProductsServiceError::InvalidPrice);
    }

    Ok(())
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<Product>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut products = self.repository.list_products(&mut tx, &filter).await?;

        self.attach_tiers(&mut tx, &mut products).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self.repository.get_product(&mut tx, product).await?;
        let mut products = [product];

        self.attach_tiers(&mut tx, &mut products).await?;

        tx.commit().await?;

        let [product] = products;

        Ok(product)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        if product.name.trim().is_empty() {
            return Err(ProductsServiceError::MissingName);
        }

        check_base_price(product.base_price)?;
        validate_tiers(&product.tiers)?;

        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_product(&mut tx, &product).await?;

        self.tiers_repository
            .replace_tiers(&mut tx, created.uuid, &product.tiers)
            .await?;

        let mut products = [created];

        self.attach_tiers(&mut tx, &mut products).await?;

        tx.commit().await?;

        let [created] = products;

        info!(product = %created.uuid, tiers = created.tiers.len(), "created product");

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        if update
            .name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return Err(ProductsServiceError::MissingName);
        }

        if let Some(base_price) = update.base_price {
            check_base_price(base_price)?;
        }

        if let Some(tiers) = &update.tiers {
            validate_tiers(tiers)?;
        }

        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, &update)
            .await?;

        if let Some(tiers) = &update.tiers {
            self.tiers_repository
                .replace_tiers(&mut tx, product, tiers)
                .await?;
        }

        let mut products = [updated];

        self.attach_tiers(&mut tx, &mut products).await?;

        tx.commit().await?;

        let [updated] = products;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn restock_product(
        &self,
        product: ProductUuid,
        amount: u32,
    ) -> Result<Product, ProductsServiceError> {
        let amount = check_quantity(amount)?;

        let mut tx = self.db.begin_transaction().await?;

        let restocked = self
            .repository
            .restock_product(&mut tx, product, amount)
            .await?;

        let mut products = [restocked];

        self.attach_tiers(&mut tx, &mut products).await?;

        tx.commit().await?;

        let [restocked] = products;

        info!(product = %product, amount, stock = restocked.stock, "restocked product");

        Ok(restocked)
    }

    async fn quote(
        &self,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<Quote, ProductsServiceError> {
        check_quantity(quantity)?;

        let product = self.get_product(product).await?;
        let unit_price = product.unit_price(quantity);

        Ok(Quote {
            product: product.uuid,
            quantity,
            base_price: product.base_price,
            unit_price,
            line_total: line_total(quantity, unit_price),
            in_stock: product.stock >= quantity,
        })
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves products matching the filter, with their tiers.
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieve a single product with its tiers.
    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError>;

    /// Creates a new product with its tiers.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Updates the supplied fields of a product. Supplied tiers replace the existing ones.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Deletes a product that no order refers to.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;

    /// Adds `amount` units to a product's stock.
    async fn restock_product(
        &self,
        product: ProductUuid,
        amount: u32,
    ) -> Result<Product, ProductsServiceError>;

    /// Prices `quantity` units of a product against its current tiers.
    async fn quote(&self, product: ProductUuid, quantity: u32)
    -> Result<Quote, ProductsServiceError>;
}
