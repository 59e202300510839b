//! Request and response types.
//!
//! Query parameters arrive as strings and are parsed here, so that a bad
//! value yields a `BAD_REQUEST` body instead of the framework's plain-text
//! rejection.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pledge_analytics::{InvestorFilter, SummarySort};
use pledge_core::{AssetClass, InvestorType};
use pledge_ingest::UploadMode;

use crate::error::{ApiError, ApiResult};

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `healthy` when the store answers.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Storage backend name.
    pub storage_backend: String,
    /// Number of stored investors.
    pub investor_count: u64,
}

/// Query of `POST /investors/upload-csv`.
#[derive(Debug, Default, Deserialize)]
pub struct UploadQuery {
    /// `merge` (default) or `replace`.
    pub mode: Option<String>,
}

impl UploadQuery {
    /// Parsed upload mode.
    pub fn mode(&self) -> ApiResult<UploadMode> {
        parse_opt(self.mode.as_deref(), "mode", UploadMode::from_str)
            .map(Option::unwrap_or_default)
    }
}

/// Query of `GET /investors/summary`.
#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    /// `id` (default) or `total_desc`.
    pub sort: Option<String>,
}

impl SummaryQuery {
    /// Parsed sort order.
    pub fn sort(&self) -> ApiResult<SummarySort> {
        parse_sort(self.sort.as_deref())
    }
}

/// Query of `GET /investors/summary-filtered`.
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    /// Asset class display name.
    pub asset_class: Option<String>,
    /// Investor type label.
    pub investor_type: Option<String>,
    /// Country name.
    pub country: Option<String>,
    /// Inclusive lower bound on the USD total.
    pub min_commitment: Option<String>,
    /// Inclusive upper bound on the USD total.
    pub max_commitment: Option<String>,
    /// `id` (default) or `total_desc`.
    pub sort: Option<String>,
}

impl FilterQuery {
    /// Builds the investor filter.
    pub fn to_filter(&self) -> ApiResult<InvestorFilter> {
        let min = parse_opt(self.min_commitment.as_deref(), "min_commitment", Decimal::from_str)?;
        let max = parse_opt(self.max_commitment.as_deref(), "max_commitment", Decimal::from_str)?;

        if let (Some(lo), Some(hi)) = (min, max) {
            if lo > hi {
                return Err(ApiError::BadRequest(format!(
                    "min_commitment ({lo}) exceeds max_commitment ({hi})"
                )));
            }
        }

        Ok(InvestorFilter {
            asset_class: parse_opt(self.asset_class.as_deref(), "asset_class", AssetClass::from_str)?,
            investor_type: parse_opt(
                self.investor_type.as_deref(),
                "investor_type",
                InvestorType::from_str,
            )?,
            country: self
                .country
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            min_commitment: min,
            max_commitment: max,
        })
    }

    /// Parsed sort order.
    pub fn sort(&self) -> ApiResult<SummarySort> {
        parse_sort(self.sort.as_deref())
    }
}

fn parse_sort(raw: Option<&str>) -> ApiResult<SummarySort> {
    parse_opt(raw, "sort", SummarySort::from_str).map(Option::unwrap_or_default)
}

/// Parses an optional query value; blank counts as absent.
fn parse_opt<T, E: std::fmt::Display>(
    raw: Option<&str>,
    name: &str,
    parse: impl FnOnce(&str) -> Result<T, E>,
) -> ApiResult<Option<T>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => parse(value)
            .map(Some)
            .map_err(|e| ApiError::BadRequest(format!("invalid {name}: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_filter_query() {
        let query = FilterQuery {
            asset_class: Some("Private Equity".into()),
            investor_type: Some("".into()),
            country: Some(" China ".into()),
            min_commitment: Some("1000".into()),
            max_commitment: None,
            sort: Some("total_desc".into()),
        };

        let filter = query.to_filter().unwrap();
        assert_eq!(filter.asset_class, Some(AssetClass::PrivateEquity));
        assert_eq!(filter.investor_type, None);
        assert_eq!(filter.country.as_deref(), Some("China"));
        assert_eq!(filter.min_commitment, Some(dec!(1000)));
        assert_eq!(query.sort().unwrap(), SummarySort::TotalDesc);
    }

    #[test]
    fn test_invalid_values_are_bad_requests() {
        let query = FilterQuery {
            min_commitment: Some("lots".into()),
            ..FilterQuery::default()
        };
        assert!(matches!(query.to_filter(), Err(ApiError::BadRequest(_))));

        let query = FilterQuery {
            min_commitment: Some("10".into()),
            max_commitment: Some("5".into()),
            ..FilterQuery::default()
        };
        assert!(matches!(query.to_filter(), Err(ApiError::BadRequest(_))));

        let upload = UploadQuery {
            mode: Some("append".into()),
        };
        assert!(matches!(upload.mode(), Err(ApiError::BadRequest(_))));
        assert_eq!(UploadQuery::default().mode().unwrap(), UploadMode::Merge);
    }
}
