//! Pricing Tiers

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Decimal places kept for stored prices.
pub const PRICE_SCALE: u32 = 2;

/// Errors raised when a tier cannot be used as a volume discount breakpoint.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TierError {
    /// The tier threshold must be at least one unit.
    #[error("tier at position {index} has a zero minimum quantity")]
    ZeroMinimumQuantity {
        /// Position of the offending tier in the supplied list.
        index: usize,
    },

    /// The tier price must be strictly positive.
    #[error("tier at position {index} has a non-positive unit price ({unit_price})")]
    NonPositiveUnitPrice {
        /// Position of the offending tier in the supplied list.
        index: usize,

        /// The rejected unit price.
        unit_price: Decimal,
    },

    /// The tier price has more decimal places than storage keeps.
    #[error("tier at position {index} has a unit price finer than a cent ({unit_price})")]
    SubCentUnitPrice {
        /// Position of the offending tier in the supplied list.
        index: usize,

        /// The rejected unit price.
        unit_price: Decimal,
    },
}

/// Whether `price` can be stored without rounding. Trailing zeros do not count.
pub fn is_whole_cents(price: Decimal) -> bool {
    price.normalize().scale() <= PRICE_SCALE
}

/// One volume-discount breakpoint: once `minimum_quantity` units are bought, each unit costs
/// `unit_price`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTier {
    minimum_quantity: u32,
    unit_price: Decimal,
}

impl PricingTier {
    /// Create a new tier.
    pub const fn new(minimum_quantity: u32, unit_price: Decimal) -> Self {
        Self {
            minimum_quantity,
            unit_price,
        }
    }

    /// Inclusive quantity threshold at which this tier applies.
    pub const fn minimum_quantity(&self) -> u32 {
        self.minimum_quantity
    }

    /// Price per unit once the threshold is met.
    pub const fn unit_price(&self) -> Decimal {
        self.unit_price
    }
}

/// Check a tier list before it replaces a product's existing tiers.
///
/// Duplicate thresholds are allowed; resolution picks the first one listed.
///
/// # Errors
///
/// - [`TierError::ZeroMinimumQuantity`]: a tier has a threshold of zero.
/// - [`TierError::NonPositiveUnitPrice`]: a tier price is zero or negative.
/// - [`TierError::SubCentUnitPrice`]: a tier price has more than two decimal places.
pub fn validate_tiers(tiers: &[PricingTier]) -> Result<(), TierError> {
    for (index, tier) in tiers.iter().enumerate() {
        if tier.minimum_quantity == 0 {
            return Err(TierError::ZeroMinimumQuantity { index });
        }

        if tier.unit_price <= Decimal::ZERO {
            return Err(TierError::NonPositiveUnitPrice {
                index,
                unit_price: tier.unit_price,
            });
        }

        if !is_whole_cents(tier.unit_price) {
            return Err(TierError::SubCentUnitPrice {
                index,
                unit_price: tier.unit_price,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_return_constructor_values() {
        let tier = PricingTier::new(5, Decimal::from(900));

        assert_eq!(tier.minimum_quantity(), 5);
        assert_eq!(tier.unit_price(), Decimal::from(900));
    }

    #[test]
    fn validate_accepts_empty_and_duplicate_thresholds() {
        assert_eq!(validate_tiers(&[]), Ok(()));
        assert_eq!(
            validate_tiers(&[
                PricingTier::new(10, Decimal::from(700)),
                PricingTier::new(10, Decimal::from(650)),
            ]),
            Ok(())
        );
    }

    #[test]
    fn validate_rejects_zero_threshold() {
        let result = validate_tiers(&[
            PricingTier::new(5, Decimal::from(9)),
            PricingTier::new(0, Decimal::from(8)),
        ]);

        assert_eq!(result, Err(TierError::ZeroMinimumQuantity { index: 1 }));
    }

    #[test]
    fn validate_rejects_non_positive_price() {
        let result = validate_tiers(&[PricingTier::new(5, Decimal::from(0))]);

        assert_eq!(
            result,
            Err(TierError::NonPositiveUnitPrice {
                index: 0,
                unit_price: Decimal::from(0),
            })
        );
    }

    #[test]
    fn validate_rejects_sub_cent_prices() {
        let rounded_up = validate_tiers(&[
            PricingTier::new(5, Decimal::from(90)),
            PricingTier::new(10, Decimal::new(89_999, 3)),
        ]);

        let rounded_away = validate_tiers(&[PricingTier::new(10, Decimal::new(4, 3))]);

        assert_eq!(
            rounded_up,
            Err(TierError::SubCentUnitPrice {
                index: 1,
                unit_price: Decimal::new(89_999, 3),
            })
        );
        assert_eq!(
            rounded_away,
            Err(TierError::SubCentUnitPrice {
                index: 0,
                unit_price: Decimal::new(4, 3),
            })
        );
    }

    #[test]
    fn trailing_zeros_still_count_as_whole_cents() {
        assert!(is_whole_cents(Decimal::new(89_990, 3)));
        assert!(is_whole_cents(Decimal::new(8_999, 2)));
        assert!(!is_whole_cents(Decimal::new(89_991, 3)));
        assert_eq!(
            validate_tiers(&[PricingTier::new(10, Decimal::new(90_000, 3))]),
            Ok(())
        );
    }
}
