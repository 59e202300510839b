//! Currency type with ISO 4217 codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// ISO 4217 currency codes accepted for commitments.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum Currency {
    /// United States Dollar
    #[default]
    USD,
    /// British Pound Sterling
    GBP,
}

impl Currency {
    /// Every supported currency.
    pub const ALL: [Currency; 2] = [Currency::USD, Currency::GBP];

    /// Returns the ISO 4217 3-letter code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::GBP => "GBP",
        }
    }

    /// Returns the currency symbol.
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::GBP => "£",
        }
    }

    /// Returns the full currency name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Currency::USD => "United States Dollar",
            Currency::GBP => "British Pound Sterling",
        }
    }

    /// Looks up a currency from its 3-letter code, ignoring case.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| CoreError::unknown_currency(s.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_codes() {
        assert_eq!(Currency::USD.code(), "USD");
        assert_eq!(Currency::GBP.symbol(), "£");
        assert_eq!(Currency::default(), Currency::USD);
    }

    #[test]
    fn test_from_code() {
        assert_eq!(Currency::from_code(" gbp "), Some(Currency::GBP));
        assert_eq!(Currency::from_code("EUR"), None);
        assert!("JPY".parse::<Currency>().is_err());
    }
}
