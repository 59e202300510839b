//! Error types for the Pledge domain.
//!
//! Every constructor that enforces an invariant of the data model returns
//! a [`CoreError`] when the invariant does not hold.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The main error type for domain validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Value is not a member of the asset class enumeration.
    #[error("Unknown asset class: '{value}'")]
    UnknownAssetClass {
        /// The rejected input.
        value: String,
    },

    /// Value is not a supported currency code.
    #[error("Unknown currency: '{value}'")]
    UnknownCurrency {
        /// The rejected input.
        value: String,
    },

    /// Value is not a member of the investor type enumeration.
    #[error("Unknown investor type: '{value}'")]
    UnknownInvestorType {
        /// The rejected input.
        value: String,
    },

    /// Commitment amount violates the non-negative invariant.
    #[error("Invalid amount: {value} - {reason}")]
    InvalidAmount {
        /// The rejected amount, as text.
        value: String,
        /// Why the amount was rejected.
        reason: String,
    },

    /// Decimal arithmetic left the representable range.
    #[error("Arithmetic overflow computing {operation}")]
    Overflow {
        /// What was being computed.
        operation: String,
    },

    /// FX rate is not positive or exceeds the supported maximum.
    #[error("Invalid FX rate for {currency}: {rate}")]
    InvalidFxRate {
        /// Currency code the rate applies to.
        currency: String,
        /// The rejected rate, as text.
        rate: String,
    },

    /// Investor identity could not be derived.
    #[error("Invalid investor id: '{value}' contains no alphanumeric characters")]
    InvalidInvestorId {
        /// The rejected input.
        value: String,
    },
}

impl CoreError {
    /// Creates an unknown asset class error.
    pub fn unknown_asset_class(value: impl Into<String>) -> Self {
        Self::UnknownAssetClass {
            value: value.into(),
        }
    }

    /// Creates an unknown currency error.
    pub fn unknown_currency(value: impl Into<String>) -> Self {
        Self::UnknownCurrency {
            value: value.into(),
        }
    }

    /// Creates an unknown investor type error.
    pub fn unknown_investor_type(value: impl Into<String>) -> Self {
        Self::UnknownInvestorType {
            value: value.into(),
        }
    }

    /// Creates an invalid amount error.
    pub fn invalid_amount(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAmount {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Creates an arithmetic overflow error.
    pub fn overflow(operation: impl Into<String>) -> Self {
        Self::Overflow {
            operation: operation.into(),
        }
    }
}
