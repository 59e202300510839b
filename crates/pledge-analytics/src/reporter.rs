//! Store-backed reporting facade.

use std::sync::Arc;

use tracing::debug;

use pledge_core::{AssetClass, FxTable, Investor, InvestorId};
use pledge_traits::InvestorStore;

use crate::asset_class::distinct_asset_classes;
use crate::detail::InvestorDetail;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::filter::InvestorFilter;
use crate::stats::{compute_stats, InvestmentStats};
use crate::summary::{summarize, InvestorSummary, SummarySort};

/// Answers read queries by recomputing from the stored investors.
#[derive(Clone)]
pub struct Reporter {
    store: Arc<dyn InvestorStore>,
    fx: FxTable,
}

impl Reporter {
    /// Creates a reporter over `store`, converting with `fx`.
    pub fn new(store: Arc<dyn InvestorStore>, fx: FxTable) -> Self {
        Self { store, fx }
    }

    /// The FX table used for USD totals.
    pub fn fx(&self) -> &FxTable {
        &self.fx
    }

    async fn load(&self) -> AnalyticsResult<Vec<Investor>> {
        let investors = self.store.list().await?;
        debug!("Loaded {} investors for reporting", investors.len());
        Ok(investors)
    }

    /// Summary of every investor.
    pub async fn summaries(&self, sort: SummarySort) -> AnalyticsResult<Vec<InvestorSummary>> {
        let investors = self.load().await?;
        Ok(summarize(&investors, &self.fx, sort)?)
    }

    /// Summaries of the investors matching `filter`.
    pub async fn filtered_summaries(
        &self,
        filter: &InvestorFilter,
        sort: SummarySort,
    ) -> AnalyticsResult<Vec<InvestorSummary>> {
        let mut matching = Vec::new();
        for investor in self.load().await? {
            if filter.matches(&investor, &self.fx)? {
                matching.push(investor);
            }
        }
        Ok(summarize(&matching, &self.fx, sort)?)
    }

    /// Detail of one investor.
    pub async fn detail(&self, id: &InvestorId) -> AnalyticsResult<InvestorDetail> {
        let investor = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| AnalyticsError::NotFound { id: id.clone() })?;
        Ok(InvestorDetail::from_investor(&investor, &self.fx)?)
    }

    /// Statistics across all investors.
    pub async fn stats(&self) -> AnalyticsResult<InvestmentStats> {
        let investors = self.load().await?;
        Ok(compute_stats(&investors, &self.fx)?)
    }

    /// Distinct asset classes present, sorted by name.
    pub async fn asset_classes(&self) -> AnalyticsResult<Vec<AssetClass>> {
        let investors = self.load().await?;
        Ok(distinct_asset_classes(&investors))
    }
}
