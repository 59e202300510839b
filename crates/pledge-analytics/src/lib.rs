//! # Pledge Analytics
//!
//! Aggregation and reporting over stored investors.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: [`summarize`], [`compute_stats`] and
//!   [`bucket_by_asset_class`] take investors and an [`FxTable`](pledge_core::FxTable)
//!   and nothing else
//! - **No caching**: the [`Reporter`] reloads the full collection on every call
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pledge_analytics::{Reporter, SummarySort};
//!
//! let reporter = Reporter::new(store, FxTable::default());
//! let summaries = reporter.summaries(SummarySort::TotalDesc).await?;
//! let stats = reporter.stats().await?;
//! ```
//!
//! ## Module Overview
//!
//! - [`summary`] - Per-investor summaries and ordering
//! - [`filter`] - Criteria for the filtered summary list
//! - [`detail`] - Single investor view with breakdown
//! - [`stats`] - Portfolio-wide statistics
//! - [`asset_class`] - Asset class bucketing
//! - [`reporter`] - Store-backed facade

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod asset_class;
pub mod detail;
pub mod error;
pub mod filter;
pub mod reporter;
pub mod stats;
pub mod summary;

pub use asset_class::{bucket_by_asset_class, distinct_asset_classes, AssetClassSummary};
pub use detail::{CommitmentDetail, InvestorDetail};
pub use error::{AnalyticsError, AnalyticsResult};
pub use filter::InvestorFilter;
pub use reporter::Reporter;
pub use stats::{compute_stats, InvestmentStats};
pub use summary::{sort_summaries, summarize, InvestorSummary, SummarySort};

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use pledge_core::{AssetClass, Commitment, Currency, Investor, InvestorId};

    pub fn investor(name: &str, commitments: &[(AssetClass, Decimal, Currency)]) -> Investor {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut inv = Investor::new(InvestorId::parse(name).unwrap(), name, date);
        for &(ac, amount, ccy) in commitments {
            inv.commitments
                .push(Commitment::new(ac, amount, ccy, date).unwrap());
        }
        inv
    }
}
