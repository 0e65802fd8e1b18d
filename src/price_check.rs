//! Price Checks
//!
//! Policy applied to client-submitted `price_at_purchase` values during order placement.

use rust_decimal::Decimal;

/// How the server treats a submitted unit price that disagrees with the resolved tier price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceCheck {
    /// Record the submitted price as-is.
    #[default]
    Trust,

    /// Fail the placement when the submitted price is further than `tolerance` from the
    /// resolved price.
    Reject {
        /// Largest accepted absolute difference.
        tolerance: Decimal,
    },

    /// Replace a submitted price that is further than `tolerance` from the resolved price with
    /// the resolved price.
    Clamp {
        /// Largest accepted absolute difference.
        tolerance: Decimal,
    },
}

/// Outcome of applying a [`PriceCheck`] to one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceVerdict {
    /// Record this price.
    Accept(Decimal),

    /// The submitted price was outside tolerance and the placement must fail.
    Mismatch {
        /// Price the caller sent.
        submitted: Decimal,

        /// Price resolved from the product's tiers.
        expected: Decimal,
    },
}

impl PriceCheck {
    /// Apply this policy to a submitted price, given the authoritative resolved price.
    pub fn apply(&self, submitted: Decimal, resolved: Decimal) -> PriceVerdict {
        match *self {
            Self::Trust => PriceVerdict::Accept(submitted),
            Self::Reject { tolerance } => {
                if within(submitted, resolved, tolerance) {
                    PriceVerdict::Accept(submitted)
                } else {
                    PriceVerdict::Mismatch {
                        submitted,
                        expected: resolved,
                    }
                }
            }
            Self::Clamp { tolerance } => {
                if within(submitted, resolved, tolerance) {
                    PriceVerdict::Accept(submitted)
                } else {
                    PriceVerdict::Accept(resolved)
                }
            }
        }
    }

    /// Whether this policy needs the resolved price at all.
    pub const fn resolves_prices(&self) -> bool {
        !matches!(self, Self::Trust)
    }
}

fn within(submitted: Decimal, resolved: Decimal, tolerance: Decimal) -> bool {
    (submitted - resolved).abs() <= tolerance
}
