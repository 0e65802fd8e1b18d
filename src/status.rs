//! Order Status

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when a string does not name an [`OrderStatus`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status \"{0}\"")]
pub struct StatusParseError(pub String);

/// Lifecycle state of an order.
///
/// Orders are created `Pending` and move forward through fulfilment. `Delivered` and
/// `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Placed, awaiting confirmation.
    Pending,

    /// Accepted by the store.
    Confirmed,

    /// Being picked and packed.
    Processing,

    /// Handed to the courier.
    Shipped,

    /// Received by the buyer.
    Delivered,

    /// Abandoned before delivery.
    Cancelled,
}

impl OrderStatus {
    /// Every status, in fulfilment order.
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Confirmed,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Stored and serialised representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Processing => "PROCESSING",
            Self::Shipped => "SHIPPED",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Whether no further transitions are possible.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Position along the fulfilment path. `Cancelled` sits off the path.
    const fn stage(self) -> Option<u8> {
        match self {
            Self::Pending => Some(0),
            Self::Confirmed => Some(1),
            Self::Processing => Some(2),
            Self::Shipped => Some(3),
            Self::Delivered => Some(4),
            Self::Cancelled => None,
        }
    }

    /// Whether moving from `self` to `next` is a legal transition.
    ///
    /// Forward moves (including skipping stages) are legal, as is cancelling any non-terminal
    /// order. Setting the current status again is a legal no-op.
    pub fn can_transition_to(self, next: Self) -> bool {
        if self == next {
            return true;
        }

        if self.is_terminal() {
            return false;
        }

        match (self.stage(), next.stage()) {
            (_, None) => true,
            (Some(from), Some(to)) => to > from,
            (None, Some(_)) => false,
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = StatusParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| StatusParseError(value.to_string()))
    }
}

/// Whether status updates are checked against the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    /// Only legal transitions are applied.
    #[default]
    Strict,

    /// Any status may be set from any other.
    Unguarded,
}

impl TransitionPolicy {
    /// Whether this policy allows moving from `from` to `to`.
    pub fn permits(self, from: OrderStatus, to: OrderStatus) -> bool {
        match self {
            Self::Strict => from.can_transition_to(to),
            Self::Unguarded => true,
        }
    }
}
