//! Test context for service-level integration tests.

use crate::{
    database::Db,
    domain::{
        orders::{PgOrdersService, models::OrderSettings},
        products::PgProductsService,
        users::PgUsersService,
    },
};

use super::db::TestDb;

pub(crate) struct TestContext {
    pub db: TestDb,
    pub products: PgProductsService,
    pub orders: PgOrdersService,
    pub users: PgUsersService,
}

impl TestContext {
    /// Fresh migrated database with services using the default order settings.
    pub async fn new() -> Self {
        let db = TestDb::new().await;
        let app_db = Db::new(db.pool().clone());

        Self {
            products: PgProductsService::new(app_db.clone()),
            orders: PgOrdersService::new(app_db.clone(), OrderSettings::default()),
            users: PgUsersService::new(app_db),
            db,
        }
    }

    /// An orders service over the same database with different policies.
    pub fn orders_with(&self, settings: OrderSettings) -> PgOrdersService {
        PgOrdersService::new(Db::new(self.db.pool().clone()), settings)
    }
}
