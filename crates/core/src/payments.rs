//! Payment Status

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from payment status handling.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaymentStatusError {
    /// A paid order cannot be marked as failed.
    #[error("order has already been paid")]
    AlreadyPaid,

    /// Stored status text is not a known status.
    #[error("unknown payment status {0:?}")]
    Unknown(String),
}

/// Payment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Awaiting confirmation from the payment gateway.
    #[default]
    Processing,

    /// Payment confirmed.
    Paid,

    /// Payment failed; the order may still be confirmed later.
    Failed,
}

/// Outcome of confirming a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// The order moved to [`PaymentStatus::Paid`] now.
    Settled,

    /// The order was already paid.
    AlreadyPaid,
}

impl PaymentStatus {
    /// Status text as stored.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Processing => "Processing",
            Self::Paid => "Paid",
            Self::Failed => "Failed",
        }
    }

    /// Confirms payment. Confirmation is accepted from every status.
    pub fn confirm(self) -> Confirmation {
        match self {
            Self::Paid => Confirmation::AlreadyPaid,
            Self::Processing | Self::Failed => Confirmation::Settled,
        }
    }

    /// Marks the payment as failed.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentStatusError::AlreadyPaid`] for paid orders.
    pub fn fail(self) -> Result<Self, PaymentStatusError> {
        match self {
            Self::Paid => Err(PaymentStatusError::AlreadyPaid),
            Self::Processing | Self::Failed => Ok(Self::Failed),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = PaymentStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Processing" => Ok(Self::Processing),
            "Paid" => Ok(Self::Paid),
            "Failed" => Ok(Self::Failed),
            other => Err(PaymentStatusError::Unknown(other.to_string())),
        }
    }
}
