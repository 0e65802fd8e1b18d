//! Orders Config

use std::time::Duration;

use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use shopfront::{price_check::PriceCheck, status::TransitionPolicy};
use shopfront_app::domain::orders::models::OrderSettings;
use thiserror::Error;

/// Treatment of client-submitted prices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PriceCheckMode {
    /// Record submitted prices as sent.
    Trust,

    /// Refuse orders whose prices disagree with the resolved tier price.
    Reject,

    /// Replace disagreeing prices with the resolved tier price.
    Clamp,
}

/// Status update guard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TransitionMode {
    /// Only lifecycle moves are allowed.
    Strict,

    /// Any status may be set at any time.
    Unguarded,
}

/// Invalid order settings.
#[derive(Debug, Error)]
pub enum OrdersConfigError {
    /// Tolerances are absolute differences.
    #[error("price tolerance must not be negative, got {0}")]
    NegativeTolerance(Decimal),

    /// A zero timeout would fail every placement.
    #[error("order timeout must be at least 1ms")]
    ZeroTimeout,
}

/// Order placement and status policies.
#[derive(Debug, Args)]
pub struct OrdersConfig {
    /// Price check policy (trust, reject, clamp)
    #[arg(long, env = "PRICE_CHECK", value_enum, default_value_t = PriceCheckMode::Trust)]
    pub price_check: PriceCheckMode,

    /// Largest accepted difference between submitted and resolved unit prices
    #[arg(long, env = "PRICE_TOLERANCE", default_value = "0")]
    pub price_tolerance: Decimal,

    /// Status transition policy (strict, unguarded)
    #[arg(long, env = "STATUS_TRANSITIONS", value_enum, default_value_t = TransitionMode::Strict)]
    pub status_transitions: TransitionMode,

    /// Upper bound on a single order placement in milliseconds
    #[arg(long, env = "ORDER_TIMEOUT_MS", default_value_t = 5_000_u64)]
    pub order_timeout_ms: u64,
}

impl OrdersConfig {
    /// Settings handed to the orders service.
    ///
    /// # Errors
    ///
    /// Returns an error when the price tolerance is negative or the order timeout is zero.
    pub fn settings(&self) -> Result<OrderSettings, OrdersConfigError> {
        if self.price_tolerance.is_sign_negative() && !self.price_tolerance.is_zero() {
            return Err(OrdersConfigError::NegativeTolerance(self.price_tolerance));
        }

        if self.order_timeout_ms == 0 {
            return Err(OrdersConfigError::ZeroTimeout);
        }

        let tolerance = self.price_tolerance;

        let price_check = match self.price_check {
            PriceCheckMode::Trust => PriceCheck::Trust,
            PriceCheckMode::Reject => PriceCheck::Reject { tolerance },
            PriceCheckMode::Clamp => PriceCheck::Clamp { tolerance },
        };

        let transitions = match self.status_transitions {
            TransitionMode::Strict => TransitionPolicy::Strict,
            TransitionMode::Unguarded => TransitionPolicy::Unguarded,
        };

        Ok(OrderSettings {
            price_check,
            transitions,
            timeout: Duration::from_millis(self.order_timeout_ms),
        })
    }
}
