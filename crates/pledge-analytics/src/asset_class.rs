//! Asset-class bucketing.
//!
//! Provides the distribution of commitments by asset class.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pledge_core::{checked_add, checked_sum, AssetClass, CoreResult, FxTable, Investor};

/// Aggregated figures for one asset class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetClassSummary {
    /// The asset class.
    pub asset_class: AssetClass,

    /// Number of commitments in this class.
    pub commitment_count: usize,

    /// Number of distinct investors with at least one commitment here.
    pub investor_count: usize,

    /// Sum of nominal amounts.
    pub total_committed: Decimal,

    /// Sum of USD-equivalent amounts.
    pub total_commitment_usd: Decimal,

    /// Share of the overall USD total, as a percentage (0-100).
    pub share_pct: f64,
}

#[derive(Default)]
struct Bucket {
    count: usize,
    investors: BTreeSet<usize>,
    nominal: Decimal,
    usd: Decimal,
}

/// Buckets every commitment of `investors` by asset class.
///
/// Only classes that are present appear, in canonical order.
pub fn bucket_by_asset_class(
    investors: &[Investor],
    fx: &FxTable,
) -> CoreResult<Vec<AssetClassSummary>> {
    let mut buckets: BTreeMap<AssetClass, Bucket> = BTreeMap::new();

    for (idx, investor) in investors.iter().enumerate() {
        for c in &investor.commitments {
            let bucket = buckets.entry(c.asset_class).or_default();
            bucket.count += 1;
            bucket.investors.insert(idx);
            bucket.nominal = checked_add(bucket.nominal, c.amount, "asset class total")?;
            bucket.usd = checked_add(bucket.usd, c.amount_usd(fx)?, "asset class USD total")?;
        }
    }

    let total_usd = checked_sum(buckets.values().map(|b| Ok(b.usd)), "USD total")?;

    Ok(buckets
        .into_iter()
        .map(|(asset_class, b)| {
            let share_pct = if total_usd.is_zero() {
                0.0
            } else {
                b.usd
                    .checked_div(total_usd)
                    .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                    .and_then(|share| share.round_dp(4).try_into().ok())
                    .unwrap_or(0.0)
            };
            AssetClassSummary {
                asset_class,
                commitment_count: b.count,
                investor_count: b.investors.len(),
                total_committed: b.nominal,
                total_commitment_usd: b.usd,
                share_pct,
            }
        })
        .collect())
}

/// Distinct asset classes across all commitments, sorted by display name.
#[must_use]
pub fn distinct_asset_classes(investors: &[Investor]) -> Vec<AssetClass> {
    let set: BTreeSet<AssetClass> = investors
        .iter()
        .flat_map(|i| i.commitments.iter().map(|c| c.asset_class))
        .collect();

    let mut classes: Vec<AssetClass> = set.into_iter().collect();
    classes.sort_by_key(AssetClass::name);
    classes
}
