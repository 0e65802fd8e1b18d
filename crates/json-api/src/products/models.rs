//! Product request and response bodies.

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use shopfront::tiers::PricingTier;
use uuid::Uuid;

use shopfront_app::domain::products::models::{NewProduct, Product, ProductUpdate, ProductUuid};

/// Volume tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct TierBody {
    /// Units from which this price applies
    pub minimum_quantity: u32,

    /// Price per unit once the threshold is met
    pub unit_price: Decimal,
}

impl From<TierBody> for PricingTier {
    fn from(tier: TierBody) -> Self {
        PricingTier::new(tier.minimum_quantity, tier.unit_price)
    }
}

impl From<&PricingTier> for TierBody {
    fn from(tier: &PricingTier) -> Self {
        TierBody {
            minimum_quantity: tier.minimum_quantity(),
            unit_price: tier.unit_price(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    pub name: String,

    pub description: Option<String>,

    pub sku: Option<String>,

    /// Price per unit before any tier applies
    pub base_price: Decimal,

    /// Units available for sale
    pub stock: u32,

    /// Volume tiers in the order they were saved
    pub tiers: Vec<TierBody>,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        ProductResponse {
            uuid: product.uuid.into_uuid(),
            tiers: product.tiers.iter().map(TierBody::from).collect(),
            name: product.name,
            description: product.description,
            sku: product.sku,
            base_price: product.base_price,
            stock: product.stock,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    /// Optional client-chosen identifier; generated when omitted
    #[serde(default)]
    pub uuid: Option<Uuid>,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub sku: Option<String>,

    pub base_price: Decimal,

    #[serde(default)]
    pub stock: u32,

    #[serde(default)]
    pub tiers: Vec<TierBody>,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(request: CreateProductRequest) -> Self {
        NewProduct {
            uuid: request.uuid.map_or_else(ProductUuid::new, ProductUuid::from_uuid),
            name: request.name,
            description: request.description,
            sku: request.sku,
            base_price: request.base_price,
            stock: request.stock,
            tiers: request.tiers.into_iter().map(Into::into).collect(),
        }
    }
}

/// Update Product Request
///
/// Omitted fields are left unchanged; `tiers`, when present, replaces every existing tier.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProductRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub sku: Option<String>,

    #[serde(default)]
    pub base_price: Option<Decimal>,

    #[serde(default)]
    pub stock: Option<u32>,

    #[serde(default)]
    pub tiers: Option<Vec<TierBody>>,
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(request: UpdateProductRequest) -> Self {
        ProductUpdate {
            name: request.name,
            description: request.description,
            sku: request.sku,
            base_price: request.base_price,
            stock: request.stock,
            tiers: request
                .tiers
                .map(|tiers| tiers.into_iter().map(Into::into).collect()),
        }
    }
}
