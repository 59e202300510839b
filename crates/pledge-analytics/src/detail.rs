//! Single-investor detail view.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pledge_core::{
    AssetClass, Commitment, CoreResult, Currency, FxTable, Investor, InvestorId, InvestorType,
};

use crate::asset_class::{bucket_by_asset_class, AssetClassSummary};

/// A commitment with its USD equivalent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitmentDetail {
    /// Asset class.
    pub asset_class: AssetClass,
    /// Nominal amount.
    pub amount: Decimal,
    /// Currency of `amount`.
    pub currency: Currency,
    /// Amount in USD.
    pub amount_usd: Decimal,
    /// Commitment date.
    pub date: NaiveDate,
}

impl CommitmentDetail {
    fn new(commitment: &Commitment, fx: &FxTable) -> CoreResult<Self> {
        Ok(Self {
            asset_class: commitment.asset_class,
            amount: commitment.amount,
            currency: commitment.currency,
            amount_usd: commitment.amount_usd(fx)?,
            date: commitment.date,
        })
    }
}

/// Full investor record with totals and breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestorDetail {
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
    /// Date last updated at the source.
    pub last_updated: Option<NaiveDate>,
    /// Commitments in ingestion order.
    pub commitments: Vec<CommitmentDetail>,
    /// Number of commitments.
    pub commitment_count: usize,
    /// Sum of nominal amounts.
    pub total_committed: Decimal,
    /// Sum of USD-equivalent amounts.
    pub total_commitment_usd: Decimal,
    /// This investor's own asset class breakdown.
    pub asset_classes: Vec<AssetClassSummary>,
}

impl InvestorDetail {
    /// Builds the detail view of one investor.
    pub fn from_investor(investor: &Investor, fx: &FxTable) -> CoreResult<Self> {
        Ok(Self {
            id: investor.id.clone(),
            name: investor.name.clone(),
            investor_type: investor.investor_type,
            country: investor.country.clone(),
            address: investor.address.clone(),
            date_added: investor.date_added,
            last_updated: investor.last_updated,
            commitments: investor
                .commitments
                .iter()
                .map(|c| CommitmentDetail::new(c, fx))
                .collect::<CoreResult<_>>()?,
            commitment_count: investor.commitment_count(),
            total_committed: investor.total_committed()?,
            total_commitment_usd: investor.total_usd(fx)?,
            asset_classes: bucket_by_asset_class(std::slice::from_ref(investor), fx)?,
        })
    }
}
