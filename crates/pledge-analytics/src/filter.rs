//! Investor filtering.

use rust_decimal::Decimal;

use pledge_core::{AssetClass, CoreResult, FxTable, Investor, InvestorType};

/// Criteria for the filtered summary list.
///
/// Every criterion left as `None` matches all investors. Commitment bounds
/// are inclusive and apply to the investor's USD-equivalent total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvestorFilter {
    /// Investor holds at least one commitment in this class.
    pub asset_class: Option<AssetClass>,
    /// Investor is of this type.
    pub investor_type: Option<InvestorType>,
    /// Country, compared case-insensitively.
    pub country: Option<String>,
    /// Lower bound on the USD total.
    pub min_commitment: Option<Decimal>,
    /// Upper bound on the USD total.
    pub max_commitment: Option<Decimal>,
}

impl InvestorFilter {
    /// Creates a filter that matches everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to one asset class.
    #[must_use]
    pub fn with_asset_class(mut self, asset_class: AssetClass) -> Self {
        self.asset_class = Some(asset_class);
        self
    }

    /// Restricts to one investor type.
    #[must_use]
    pub fn with_investor_type(mut self, investor_type: InvestorType) -> Self {
        self.investor_type = Some(investor_type);
        self
    }

    /// Restricts to one country.
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Sets inclusive USD bounds.
    #[must_use]
    pub fn with_commitment_range(mut self, min: Option<Decimal>, max: Option<Decimal>) -> Self {
        self.min_commitment = min;
        self.max_commitment = max;
        self
    }

    /// Returns true if no criterion is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Tests one investor.
    ///
    /// Fails only when a commitment bound is set and the investor's USD
    /// total cannot be computed.
    pub fn matches(&self, investor: &Investor, fx: &FxTable) -> CoreResult<bool> {
        if let Some(ac) = self.asset_class {
            if !investor.has_asset_class(ac) {
                return Ok(false);
            }
        }

        if let Some(it) = self.investor_type {
            if investor.investor_type != Some(it) {
                return Ok(false);
            }
        }

        if let Some(country) = &self.country {
            let wanted = country.trim();
            match &investor.country {
                Some(c) if c.trim().eq_ignore_ascii_case(wanted) => {}
                _ => return Ok(false),
            }
        }

        if self.min_commitment.is_some() || self.max_commitment.is_some() {
            let total = investor.total_usd(fx)?;
            if self.min_commitment.is_some_and(|min| total < min) {
                return Ok(false);
            }
            if self.max_commitment.is_some_and(|max| total > max) {
                return Ok(false);
            }
        }

        Ok(true)
    }
}
