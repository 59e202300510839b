//! Per-investor summaries.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pledge_core::{CoreResult, FxTable, Investor, InvestorId, InvestorType};

/// One line of the investor list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestorSummary {
    /// Investor id.
    pub id: InvestorId,
    /// Display name.
    pub name: String,
    /// Institution type.
    pub investor_type: Option<InvestorType>,
    /// Country of domicile.
    pub country: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Date first recorded.
    pub date_added: NaiveDate,
    /// Number of commitments.
    pub commitment_count: usize,
    /// Sum of nominal amounts.
    pub total_committed: Decimal,
    /// Sum of USD-equivalent amounts.
    pub total_commitment_usd: Decimal,
}

impl InvestorSummary {
    /// Summarizes one investor.
    pub fn from_investor(investor: &Investor, fx: &FxTable) -> CoreResult<Self> {
        Ok(Self {
            id: investor.id.clone(),
            name: investor.name.clone(),
            investor_type: investor.investor_type,
            country: investor.country.clone(),
            address: investor.address.clone(),
            date_added: investor.date_added,
            commitment_count: investor.commitment_count(),
            total_committed: investor.total_committed()?,
            total_commitment_usd: investor.total_usd(fx)?,
        })
    }
}

/// Ordering of a summary list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummarySort {
    /// Ascending investor id.
    #[default]
    Id,
    /// Descending USD total, ties broken by id.
    TotalDesc,
}

impl fmt::Display for SummarySort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummarySort::Id => f.write_str("id"),
            SummarySort::TotalDesc => f.write_str("total_desc"),
        }
    }
}

impl FromStr for SummarySort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(SummarySort::Id),
            "total_desc" => Ok(SummarySort::TotalDesc),
            other => Err(format!("unknown sort '{other}', expected id or total_desc")),
        }
    }
}

/// Sorts summaries in place.
pub fn sort_summaries(summaries: &mut [InvestorSummary], sort: SummarySort) {
    match sort {
        SummarySort::Id => summaries.sort_by(|a, b| a.id.cmp(&b.id)),
        SummarySort::TotalDesc => summaries.sort_by(|a, b| {
            b.total_commitment_usd
                .cmp(&a.total_commitment_usd)
                .then_with(|| a.id.cmp(&b.id))
        }),
    }
}

/// Summarizes every investor and orders the result.
pub fn summarize(
    investors: &[Investor],
    fx: &FxTable,
    sort: SummarySort,
) -> CoreResult<Vec<InvestorSummary>> {
    let mut summaries = investors
        .iter()
        .map(|i| InvestorSummary::from_investor(i, fx))
        .collect::<CoreResult<Vec<_>>>()?;
    sort_summaries(&mut summaries, sort);
    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::investor;
    use pledge_core::{AssetClass, Currency};
    use rust_decimal_macros::dec;

    fn sample() -> Vec<Investor> {
        vec![
            investor("zeta", &[(AssetClass::HedgeFunds, dec!(100), Currency::USD)]),
            investor(
                "alpha",
                &[
                    (AssetClass::RealEstate, dec!(40), Currency::GBP),
                    (AssetClass::PrivateDebt, dec!(10), Currency::USD),
                ],
            ),
            investor("mid", &[(AssetClass::HedgeFunds, dec!(100), Currency::USD)]),
        ]
    }

    #[test]
    fn test_summary_totals() {
        let summaries = summarize(&sample(), &FxTable::default(), SummarySort::Id).unwrap();
        let ids: Vec<&str> = summaries.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "mid", "zeta"]);

        let alpha = &summaries[0];
        assert_eq!(alpha.commitment_count, 2);
        assert_eq!(alpha.total_committed, dec!(50));
        assert_eq!(alpha.total_commitment_usd, dec!(60));
    }

    #[test]
    fn test_total_desc_breaks_ties_by_id() {
        let summaries = summarize(&sample(), &FxTable::default(), SummarySort::TotalDesc).unwrap();
        let ids: Vec<&str> = summaries.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["mid", "zeta", "alpha"]);
    }

    #[test]
    fn test_sort_parse() {
        assert_eq!("TOTAL_DESC".parse::<SummarySort>().unwrap(), SummarySort::TotalDesc);
        assert_eq!("id".parse::<SummarySort>().unwrap(), SummarySort::Id);
        assert!("name".parse::<SummarySort>().is_err());
    }
}
