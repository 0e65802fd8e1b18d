//! Product Repositories

mod products;
mod tiers;

pub(crate) use products::{PgProductsRepository, to_db_count, try_get_count};
pub(crate) use tiers::PgPricingTiersRepository;
