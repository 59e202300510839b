//! Currency conversion to USD.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::amount::MAX_FX_RATE;
use crate::error::{CoreError, CoreResult};
use crate::types::Currency;

/// Static conversion rates into USD.
///
/// Defaults to GBP = 1.25 and USD = 1.0. A currency without a rate
/// converts at par.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FxTable {
    rates: BTreeMap<Currency, Decimal>,
}

impl Default for FxTable {
    fn default() -> Self {
        Self::empty()
            .with_rate(Currency::USD, Decimal::ONE)
            .with_rate(Currency::GBP, Decimal::new(125, 2))
    }
}

impl FxTable {
    /// Creates a table with no rates (everything converts at par).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            rates: BTreeMap::new(),
        }
    }

    /// Sets the USD rate for a currency.
    #[must_use]
    pub fn with_rate(mut self, currency: Currency, rate: Decimal) -> Self {
        self.rates.insert(currency, rate);
        self
    }

    /// Sets the USD rate for a currency, rejecting rates that are not
    /// positive or exceed [`MAX_FX_RATE`].
    pub fn try_with_rate(self, currency: Currency, rate: Decimal) -> CoreResult<Self> {
        if rate <= Decimal::ZERO || rate > MAX_FX_RATE {
            return Err(CoreError::InvalidFxRate {
                currency: currency.to_string(),
                rate: rate.to_string(),
            });
        }
        Ok(self.with_rate(currency, rate))
    }

    /// Rate that converts one unit of `currency` into USD.
    #[must_use]
    pub fn rate(&self, currency: Currency) -> Decimal {
        self.rates.get(&currency).copied().unwrap_or(Decimal::ONE)
    }

    /// Converts an amount into USD.
    pub fn to_usd(&self, amount: Decimal, currency: Currency) -> CoreResult<Decimal> {
        amount
            .checked_mul(self.rate(currency))
            .ok_or_else(|| CoreError::overflow(format!("USD value of {amount} {currency}")))
    }
}
