//! Asset class enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::normalize_label;
use crate::error::CoreError;

/// Investment category a commitment is made to.
///
/// This is a closed set: ingestion rejects any row whose asset class does
/// not parse into one of these variants. Variants are declared in display
/// name order, so the derived `Ord` sorts alphabetically by name.
///
/// # Examples
///
/// ```
/// use pledge_core::AssetClass;
///
/// let ac: AssetClass = "  private_equity ".parse().unwrap();
/// assert_eq!(ac, AssetClass::PrivateEquity);
/// assert_eq!(ac.to_string(), "Private Equity");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AssetClass {
    /// Hedge fund allocations.
    #[serde(rename = "Hedge Funds")]
    HedgeFunds,
    /// Infrastructure funds.
    Infrastructure,
    /// Natural resources (energy, timber, agriculture).
    #[serde(rename = "Natural Resources")]
    NaturalResources,
    /// Private credit and debt funds.
    #[serde(rename = "Private Debt")]
    PrivateDebt,
    /// Buyout, growth and venture funds.
    #[serde(rename = "Private Equity")]
    PrivateEquity,
    /// Real estate funds.
    #[serde(rename = "Real Estate")]
    RealEstate,
}

impl AssetClass {
    /// Every asset class, in canonical order.
    pub const ALL: [AssetClass; 6] = [
        AssetClass::HedgeFunds,
        AssetClass::Infrastructure,
        AssetClass::NaturalResources,
        AssetClass::PrivateDebt,
        AssetClass::PrivateEquity,
        AssetClass::RealEstate,
    ];

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            AssetClass::HedgeFunds => "Hedge Funds",
            AssetClass::Infrastructure => "Infrastructure",
            AssetClass::NaturalResources => "Natural Resources",
            AssetClass::PrivateDebt => "Private Debt",
            AssetClass::PrivateEquity => "Private Equity",
            AssetClass::RealEstate => "Real Estate",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AssetClass {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "hedge funds" | "hedge fund" => Ok(AssetClass::HedgeFunds),
            "infrastructure" | "infra" => Ok(AssetClass::Infrastructure),
            "natural resources" | "natural resource" => Ok(AssetClass::NaturalResources),
            "private debt" | "debt" | "credit" | "private credit" => Ok(AssetClass::PrivateDebt),
            "private equity" | "pe" => Ok(AssetClass::PrivateEquity),
            "real estate" | "re" => Ok(AssetClass::RealEstate),
            _ => Err(CoreError::unknown_asset_class(s.trim())),
        }
    }
}
