//! Order status in the lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order status.
///
/// The nominal pipeline is DRAFT → SUBMITTED → CONFIRMED → IN_PRODUCTION →
/// READY → DELIVERED, with CANCELLED reachable from any non-terminal state.
/// The status-update operation deliberately performs no transition-graph
/// validation: any status may follow any status. The only state-sensitive
/// business rule is that deletion requires DRAFT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order created but not yet submitted by the distributor.
    Draft,
    /// Submitted, awaiting producer confirmation.
    Submitted,
    /// Confirmed by a producer.
    Confirmed,
    /// Currently being produced.
    InProduction,
    /// Produced, awaiting delivery.
    Ready,
    /// Delivered to the distributor.
    Delivered,
    /// Cancelled.
    Cancelled,
}

impl OrderStatus {
    /// Returns true for DRAFT (the only deletable state).
    #[must_use]
    pub const fn is_draft(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true for CANCELLED (excluded from demand aggregation).
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns true while a distributor may still edit the order.
    #[must_use]
    pub const fn distributor_editable(&self) -> bool {
        matches!(self, Self::Draft | Self::Submitted)
    }

    /// Returns true for states a producer typically still acts on.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Submitted | Self::Confirmed)
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(Self::Draft),
            "SUBMITTED" => Ok(Self::Submitted),
            "CONFIRMED" => Ok(Self::Confirmed),
            "IN_PRODUCTION" => Ok(Self::InProduction),
            "READY" => Ok(Self::Ready),
            "DELIVERED" => Ok(Self::Delivered),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => write!(f, "DRAFT"),
            Self::Submitted => write!(f, "SUBMITTED"),
            Self::Confirmed => write!(f, "CONFIRMED"),
            Self::InProduction => write!(f, "IN_PRODUCTION"),
            Self::Ready => write!(f, "READY"),
            Self::Delivered => write!(f, "DELIVERED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}
