//! Investor classification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::normalize_label;
use crate::error::CoreError;

/// Kind of institution an investor is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InvestorType {
    /// Asset manager
    #[serde(rename = "asset manager")]
    AssetManager,
    /// Bank
    #[serde(rename = "bank")]
    Bank,
    /// Fund manager
    #[serde(rename = "fund manager")]
    FundManager,
    /// Wealth manager
    #[serde(rename = "wealth manager")]
    WealthManager,
}

impl InvestorType {
    /// Returns the label used on the wire.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            InvestorType::AssetManager => "asset manager",
            InvestorType::Bank => "bank",
            InvestorType::FundManager => "fund manager",
            InvestorType::WealthManager => "wealth manager",
        }
    }
}

impl fmt::Display for InvestorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for InvestorType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "asset manager" => Ok(InvestorType::AssetManager),
            "bank" => Ok(InvestorType::Bank),
            "fund manager" => Ok(InvestorType::FundManager),
            "wealth manager" => Ok(InvestorType::WealthManager),
            _ => Err(CoreError::unknown_investor_type(s.trim())),
        }
    }
}
