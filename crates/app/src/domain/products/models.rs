//! Product Models

use std::str::FromStr;

use jiff::Timestamp;
use rust_decimal::Decimal;
use shopfront::{pricing::resolve_unit_price, tiers::PricingTier};
use thiserror::Error;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub base_price: Decimal,
    pub stock: u32,
    pub tiers: Vec<PricingTier>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Product {
    /// Effective unit price for `quantity` units.
    pub fn unit_price(&self, quantity: u32) -> Decimal {
        resolve_unit_price(self.base_price, quantity, &self.tiers)
    }
}

/// New Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub base_price: Decimal,
    pub stock: u32,
    pub tiers: Vec<PricingTier>,
}

/// Product Update Model
///
/// `None` leaves a field unchanged. Supplied tiers replace the existing tiers wholesale.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub base_price: Option<Decimal>,
    pub stock: Option<u32>,
    pub tiers: Option<Vec<PricingTier>>,
}

/// Raised when a string does not name a [`ProductSort`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sort \"{0}\" (expected name, price or newest)")]
pub struct UnknownSort(pub String);

/// Catalogue ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    /// Alphabetical by name.
    Name,

    /// Cheapest base price first.
    Price,

    /// Most recently created first.
    #[default]
    Newest,
}

impl ProductSort {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Price => "price",
            Self::Newest => "newest",
        }
    }
}

impl FromStr for ProductSort {
    type Err = UnknownSort;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "name" => Ok(Self::Name),
            "price" => Ok(Self::Price),
            "newest" => Ok(Self::Newest),
            other => Err(UnknownSort(other.to_string())),
        }
    }
}

/// Catalogue listing options.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring of the name or description.
    pub search: Option<String>,

    pub sort: ProductSort,
}

/// Server-side price preview for a quantity of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub product: ProductUuid,
    pub quantity: u32,
    pub base_price: Decimal,
    pub unit_price: Decimal,
    pub line_total: Decimal,
    pub in_stock: bool,
}
