//! Portfolio-wide statistics.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pledge_core::{checked_add, CoreResult, FxTable, Investor};

use crate::asset_class::{bucket_by_asset_class, AssetClassSummary};

/// Aggregate figures across every stored investor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentStats {
    /// Number of investors.
    pub total_investors: usize,
    /// Number of commitments.
    pub total_commitments: usize,
    /// Sum of nominal amounts, regardless of currency.
    pub total_committed: Decimal,
    /// Sum of USD-equivalent amounts.
    pub total_commitment_amount_usd: Decimal,
    /// Smallest single commitment in USD; `None` when there are none.
    pub min_commitment_usd: Option<Decimal>,
    /// Largest single commitment in USD; `None` when there are none.
    pub max_commitment_usd: Option<Decimal>,
    /// Distinct countries, sorted.
    pub unique_countries: Vec<String>,
    /// Number of distinct countries.
    pub unique_countries_count: usize,
    /// Breakdown by asset class, in canonical order.
    pub asset_classes: Vec<AssetClassSummary>,
}

/// Computes statistics over `investors`.
pub fn compute_stats(investors: &[Investor], fx: &FxTable) -> CoreResult<InvestmentStats> {
    let mut total_commitments = 0;
    let mut total_committed = Decimal::ZERO;
    let mut total_usd = Decimal::ZERO;
    let mut min_usd: Option<Decimal> = None;
    let mut max_usd: Option<Decimal> = None;

    for c in investors.iter().flat_map(|i| &i.commitments) {
        let usd = c.amount_usd(fx)?;
        total_commitments += 1;
        total_committed = checked_add(total_committed, c.amount, "total committed")?;
        total_usd = checked_add(total_usd, usd, "total USD")?;
        min_usd = Some(min_usd.map_or(usd, |m| m.min(usd)));
        max_usd = Some(max_usd.map_or(usd, |m| m.max(usd)));
    }

    let unique_countries: Vec<String> = investors
        .iter()
        .filter_map(|i| i.country.as_deref())
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    Ok(InvestmentStats {
        total_investors: investors.len(),
        total_commitments,
        total_committed,
        total_commitment_amount_usd: total_usd,
        min_commitment_usd: min_usd,
        max_commitment_usd: max_usd,
        unique_countries_count: unique_countries.len(),
        unique_countries,
        asset_classes: bucket_by_asset_class(investors, fx)?,
    })
}
