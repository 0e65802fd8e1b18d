//! Order Placement
//!
//! The pure half of order placement: request validation and planning against a snapshot of
//! product rows. Persistence layers lock the referenced products, call [`plan`] on what they
//! read, and only then mutate stock. Nothing here performs I/O, so a failed plan means nothing
//! was written.

use std::hash::Hash;

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    price_check::{PriceCheck, PriceVerdict},
    pricing::{resolve_unit_price, total_amount},
    tiers::PricingTier,
};

/// Request-shape errors, detected before any data access.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError<K> {
    /// No buyer was supplied.
    #[error("a buyer is required")]
    MissingBuyer,

    /// The item list is empty.
    #[error("at least one item is required")]
    NoItems,

    /// A line asked for zero or fewer units.
    #[error("quantity for product {product} must be positive (got {quantity})")]
    NonPositiveQuantity {
        /// Product on the offending line.
        product: K,

        /// The rejected quantity.
        quantity: i64,
    },

    /// A line asked for more units than can be represented.
    #[error("quantity for product {product} is too large (got {quantity})")]
    QuantityTooLarge {
        /// Product on the offending line.
        product: K,

        /// The rejected quantity.
        quantity: i64,
    },

    /// A line carried a negative unit price.
    #[error("price for product {product} must not be negative (got {price})")]
    NegativePrice {
        /// Product on the offending line.
        product: K,

        /// The rejected price.
        price: Decimal,
    },
}

/// Reasons a validated request cannot be fulfilled.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError<K> {
    /// The request itself is malformed.
    #[error(transparent)]
    Validation(#[from] ValidationError<K>),

    /// A referenced product does not exist.
    #[error("product {product} not found")]
    ProductNotFound {
        /// Missing product.
        product: K,
    },

    /// Demand for a product exceeds its current stock.
    #[error("insufficient stock for product {product}: requested {requested}, available {available}")]
    InsufficientStock {
        /// Product that cannot cover the demand.
        product: K,

        /// Total units requested across all lines for the product.
        requested: u32,

        /// Units currently in stock.
        available: u32,
    },

    /// A submitted price disagrees with the resolved tier price beyond tolerance.
    #[error("submitted price {submitted} for product {product} does not match {expected}")]
    PriceMismatch {
        /// Product on the offending line.
        product: K,

        /// Price the caller sent.
        submitted: Decimal,

        /// Price resolved from the product's tiers.
        expected: Decimal,
    },
}

/// One inbound line, as submitted by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestedLine<K> {
    /// Product being bought.
    pub product: K,

    /// Units requested. Must be positive.
    pub quantity: i64,

    /// Unit price the client priced the line at.
    pub price_at_purchase: Decimal,
}

/// A line that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLine<K> {
    /// Product being bought.
    pub product: K,

    /// Units requested.
    pub quantity: u32,

    /// Unit price recorded on the order.
    pub price_at_purchase: Decimal,
}

/// What planning needs to know about a product, read at transaction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockedProduct {
    /// Price used when no tier qualifies.
    pub base_price: Decimal,

    /// Units currently available.
    pub stock: u32,

    /// Volume tiers for the product.
    pub tiers: Vec<PricingTier>,
}

/// A fully checked order, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPlan<K> {
    lines: Vec<OrderLine<K>>,
    demand: SmallVec<[(K, u32); 8]>,
    total_amount: Decimal,
}

impl<K: Copy> OrderPlan<K> {
    /// Lines to insert, in request order, with their final recorded prices.
    pub fn lines(&self) -> &[OrderLine<K>] {
        &self.lines
    }

    /// Units to take from each product, one entry per distinct product in first-seen order.
    pub fn demand(&self) -> &[(K, u32)] {
        &self.demand
    }

    /// Sum of `quantity × price_at_purchase` over every line.
    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }
}

/// Check the shape of a placement request.
///
/// # Errors
///
/// Returns a [`ValidationError`] for a missing buyer, an empty item list, a non-positive or
/// oversized quantity, or a negative price. The first offending line is reported.
pub fn validate<K: Copy>(
    has_buyer: bool,
    lines: &[RequestedLine<K>],
) -> Result<Vec<OrderLine<K>>, ValidationError<K>> {
    if !has_buyer {
        return Err(ValidationError::MissingBuyer);
    }

    if lines.is_empty() {
        return Err(ValidationError::NoItems);
    }

    lines
        .iter()
        .map(|line| {
            if line.quantity <= 0 {
                return Err(ValidationError::NonPositiveQuantity {
                    product: line.product,
                    quantity: line.quantity,
                });
            }

            let quantity =
                u32::try_from(line.quantity).map_err(|_overflow| ValidationError::QuantityTooLarge {
                    product: line.product,
                    quantity: line.quantity,
                })?;

            if line.price_at_purchase < Decimal::ZERO {
                return Err(ValidationError::NegativePrice {
                    product: line.product,
                    price: line.price_at_purchase,
                });
            }

            Ok(OrderLine {
                product: line.product,
                quantity,
                price_at_purchase: line.price_at_purchase,
            })
        })
        .collect()
}

/// Plan an order against product rows read inside the placement transaction.
///
/// Checks run in a fixed order: every product must exist, then aggregated demand per product
/// must fit in stock, then each line's price is put through `price_check`. All-or-nothing: any
/// failure rejects the whole request.
///
/// # Errors
///
/// - [`PlacementError::ProductNotFound`]: a line references a product missing from `products`.
/// - [`PlacementError::InsufficientStock`]: the summed quantity for a product exceeds its stock.
/// - [`PlacementError::PriceMismatch`]: `price_check` rejected a submitted price.
pub fn plan<K>(
    lines: &[OrderLine<K>],
    products: &FxHashMap<K, StockedProduct>,
    price_check: PriceCheck,
) -> Result<OrderPlan<K>, PlacementError<K>>
where
    K: Copy + Eq + Hash,
{
    if let Some(missing) = lines.iter().find(|line| !products.contains_key(&line.product)) {
        return Err(PlacementError::ProductNotFound {
            product: missing.product,
        });
    }

    let demand = aggregate_demand(lines);

    for &(product, requested) in &demand {
        let available = products.get(&product).map_or(0, |stocked| stocked.stock);

        if requested > available {
            return Err(PlacementError::InsufficientStock {
                product,
                requested,
                available,
            });
        }
    }

    let mut priced = Vec::with_capacity(lines.len());

    for line in lines {
        let price_at_purchase = match products.get(&line.product) {
            Some(stocked) if price_check.resolves_prices() => {
                let resolved = resolve_unit_price(stocked.base_price, line.quantity, &stocked.tiers);

                match price_check.apply(line.price_at_purchase, resolved) {
                    PriceVerdict::Accept(price) => price,
                    PriceVerdict::Mismatch {
                        submitted,
                        expected,
                    } => {
                        return Err(PlacementError::PriceMismatch {
                            product: line.product,
                            submitted,
                            expected,
                        });
                    }
                }
            }
            _ => line.price_at_purchase,
        };

        priced.push(OrderLine {
            price_at_purchase,
            ..*line
        });
    }

    let total_amount = total_amount(
        priced
            .iter()
            .map(|line| (line.quantity, line.price_at_purchase)),
    );

    Ok(OrderPlan {
        lines: priced,
        demand,
        total_amount,
    })
}

fn aggregate_demand<K>(lines: &[OrderLine<K>]) -> SmallVec<[(K, u32); 8]>
where
    K: Copy + Eq + Hash,
{
    let mut positions = FxHashMap::<K, usize>::default();
    let mut demand = SmallVec::<[(K, u32); 8]>::new();

    for line in lines {
        if let Some(&position) = positions.get(&line.product) {
            if let Some((_, requested)) = demand.get_mut(position) {
                *requested = requested.saturating_add(line.quantity);
            }
        } else {
            positions.insert(line.product, demand.len());
            demand.push((line.product, line.quantity));
        }
    }

    demand
}
