//! Investor and commitment records.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AssetClass, Currency, InvestorType};
use crate::amount::{checked_sum, MAX_COMMITMENT_AMOUNT};
use crate::error::{CoreError, CoreResult};
use crate::fx::FxTable;

/// Stable investor identity.
///
/// Derived from a raw id or name: lowercased, every run of characters that
/// are not ASCII alphanumeric collapsed into a single `-`, with leading and
/// trailing dashes removed. Two rows whose names differ only in case,
/// punctuation or spacing therefore refer to the same investor.
///
/// # Examples
///
/// ```
/// use pledge_core::InvestorId;
///
/// let id = InvestorId::parse("  Ioo Gryffindor fund ").unwrap();
/// assert_eq!(id.as_str(), "ioo-gryffindor-fund");
/// assert!(InvestorId::parse("--").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvestorId(String);

impl InvestorId {
    /// Derives an id from raw text.
    pub fn parse(raw: &str) -> CoreResult<Self> {
        let mut slug = String::with_capacity(raw.len());
        let mut pending_dash = false;

        for ch in raw.chars() {
            if ch.is_ascii_alphanumeric() {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                pending_dash = false;
                slug.push(ch.to_ascii_lowercase());
            } else {
                pending_dash = true;
            }
        }

        if slug.is_empty() {
            return Err(CoreError::InvalidInvestorId {
                value: raw.trim().to_string(),
            });
        }
        Ok(Self(slug))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvestorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A pledged amount of capital to one asset class.
///
/// The amount is stored as a decimal string so documents keep every digit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commitment {
    /// Asset class committed to.
    pub asset_class: AssetClass,
    /// Committed amount, never negative and at most [`MAX_COMMITMENT_AMOUNT`].
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    /// Currency of `amount`.
    pub currency: Currency,
    /// Date of the commitment.
    pub date: NaiveDate,
}

impl Commitment {
    /// Creates a commitment, rejecting negative amounts and amounts above
    /// [`MAX_COMMITMENT_AMOUNT`].
    pub fn new(
        asset_class: AssetClass,
        amount: Decimal,
        currency: Currency,
        date: NaiveDate,
    ) -> CoreResult<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(CoreError::invalid_amount(
                amount.to_string(),
                "must be non-negative",
            ));
        }
        if amount > MAX_COMMITMENT_AMOUNT {
            return Err(CoreError::invalid_amount(
                amount.to_string(),
                format!("must not exceed {MAX_COMMITMENT_AMOUNT}"),
            ));
        }
        Ok(Self {
            asset_class,
            amount,
            currency,
            date,
        })
    }

    /// Amount converted to USD.
    pub fn amount_usd(&self, fx: &FxTable) -> CoreResult<Decimal> {
        fx.to_usd(self.amount, self.currency)
    }
}

/// An entity holding one or more commitments.
///
/// The investor exclusively owns its commitments; they are stored embedded
/// in the investor document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Investor {
    /// Stable identity.
    pub id: InvestorId,
    /// Display name as first seen.
    pub name: String,
    /// Institution type, if known.
    pub investor_type: Option<InvestorType>,
    /// Country of domicile, if known.
    pub country: Option<String>,
    /// Postal address, if known.
    pub address: Option<String>,
    /// When the investor was first recorded.
    pub date_added: NaiveDate,
    /// When the investor record was last updated at the source.
    pub last_updated: Option<NaiveDate>,
    /// Commitments in ingestion order.
    #[serde(default)]
    pub commitments: Vec<Commitment>,
}

impl Investor {
    /// Creates an investor with no metadata and no commitments.
    pub fn new(id: InvestorId, name: impl Into<String>, date_added: NaiveDate) -> Self {
        Self {
            id,
            name: name.into(),
            investor_type: None,
            country: None,
            address: None,
            date_added,
            last_updated: None,
            commitments: Vec::new(),
        }
    }

    /// Number of commitments.
    #[must_use]
    pub fn commitment_count(&self) -> usize {
        self.commitments.len()
    }

    /// Sum of nominal commitment amounts, regardless of currency.
    pub fn total_committed(&self) -> CoreResult<Decimal> {
        checked_sum(
            self.commitments.iter().map(|c| Ok(c.amount)),
            &format!("total committed by {}", self.id),
        )
    }

    /// Sum of commitments converted to USD.
    pub fn total_usd(&self, fx: &FxTable) -> CoreResult<Decimal> {
        checked_sum(
            self.commitments.iter().map(|c| c.amount_usd(fx)),
            &format!("USD total of {}", self.id),
        )
    }

    /// Distinct asset classes this investor has committed to.
    #[must_use]
    pub fn asset_classes(&self) -> BTreeSet<AssetClass> {
        self.commitments.iter().map(|c| c.asset_class).collect()
    }

    /// Returns true if any commitment is in `asset_class`.
    #[must_use]
    pub fn has_asset_class(&self, asset_class: AssetClass) -> bool {
        self.commitments.iter().any(|c| c.asset_class == asset_class)
    }

    /// Merges a freshly ingested record of the same investor into this one.
    ///
    /// Non-empty metadata from `incoming` replaces the stored values, the
    /// earliest `date_added` and latest `last_updated` are kept, and the
    /// incoming commitments are appended.
    pub fn merge(&mut self, incoming: Investor) {
        debug_assert_eq!(self.id, incoming.id);

        if !incoming.name.trim().is_empty() {
            self.name = incoming.name;
        }
        if incoming.investor_type.is_some() {
            self.investor_type = incoming.investor_type;
        }
        if incoming.country.is_some() {
            self.country = incoming.country;
        }
        if incoming.address.is_some() {
            self.address = incoming.address;
        }
        self.date_added = self.date_added.min(incoming.date_added);
        self.last_updated = match (self.last_updated, incoming.last_updated) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        self.commitments.extend(incoming.commitments);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn commitment(ac: AssetClass, amount: Decimal, ccy: Currency) -> Commitment {
        Commitment::new(ac, amount, ccy, date(2024, 1, 1)).unwrap()
    }

    #[test]
    fn test_investor_id_slug() {
        assert_eq!(
            InvestorId::parse("Mjd Jedi fund").unwrap().as_str(),
            "mjd-jedi-fund"
        );
        assert_eq!(
            InvestorId::parse("  MJD -- Jedi   FUND!! ").unwrap(),
            InvestorId::parse("mjd jedi fund").unwrap()
        );
        assert!(InvestorId::parse("   ").is_err());
    }

    #[test]
    fn test_commitment_rejects_negative() {
        let err = Commitment::new(
            AssetClass::RealEstate,
            dec!(-1),
            Currency::USD,
            date(2024, 1, 1),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidAmount { .. }));

        assert!(Commitment::new(
            AssetClass::RealEstate,
            MAX_COMMITMENT_AMOUNT,
            Currency::GBP,
            date(2024, 1, 1)
        )
        .is_ok());
        let err = Commitment::new(
            AssetClass::RealEstate,
            Decimal::MAX,
            Currency::GBP,
            date(2024, 1, 1),
        )
        .unwrap_err();
        assert!(err.to_string().contains("must not exceed"));

        assert!(Commitment::new(
            AssetClass::RealEstate,
            Decimal::ZERO,
            Currency::USD,
            date(2024, 1, 1)
        )
        .is_ok());
    }

    #[test]
    fn test_totals() {
        let mut inv = Investor::new(InvestorId::parse("a").unwrap(), "A", date(2024, 1, 1));
        inv.commitments
            .push(commitment(AssetClass::PrivateEquity, dec!(100), Currency::USD));
        inv.commitments
            .push(commitment(AssetClass::RealEstate, dec!(200), Currency::GBP));

        let fx = FxTable::default();
        assert_eq!(inv.total_committed().unwrap(), dec!(300));
        assert_eq!(inv.total_usd(&fx).unwrap(), dec!(350));
        assert_eq!(inv.commitment_count(), 2);
        assert!(inv.has_asset_class(AssetClass::RealEstate));
        assert!(!inv.has_asset_class(AssetClass::HedgeFunds));
    }

    #[test]
    fn test_merge_appends_and_updates() {
        let id = InvestorId::parse("a").unwrap();
        let mut stored = Investor::new(id.clone(), "A", date(2023, 6, 1));
        stored.country = Some("China".into());
        stored
            .commitments
            .push(commitment(AssetClass::PrivateEquity, dec!(10), Currency::USD));

        let mut incoming = Investor::new(id, "A Fund", date(2024, 1, 1));
        incoming.investor_type = Some(InvestorType::Bank);
        incoming.last_updated = Some(date(2024, 2, 1));
        incoming
            .commitments
            .push(commitment(AssetClass::HedgeFunds, dec!(5), Currency::USD));

        stored.merge(incoming);

        assert_eq!(stored.name, "A Fund");
        assert_eq!(stored.country.as_deref(), Some("China"));
        assert_eq!(stored.investor_type, Some(InvestorType::Bank));
        assert_eq!(stored.date_added, date(2023, 6, 1));
        assert_eq!(stored.last_updated, Some(date(2024, 2, 1)));
        assert_eq!(stored.commitment_count(), 2);
        assert_eq!(stored.total_committed().unwrap(), dec!(15));
    }

    #[test]
    fn test_investor_document_roundtrip() {
        let mut inv = Investor::new(InvestorId::parse("b").unwrap(), "B", date(2024, 3, 4));
        inv.commitments
            .push(commitment(AssetClass::Infrastructure, dec!(1500000.5), Currency::GBP));

        let json = serde_json::to_value(&inv).unwrap();
        assert_eq!(json["id"], "b");
        assert_eq!(json["date_added"], "2024-03-04");
        assert_eq!(json["commitments"][0]["asset_class"], "Infrastructure");
        assert_eq!(json["commitments"][0]["amount"], "1500000.5");

        let back: Investor = serde_json::from_value(json).unwrap();
        assert_eq!(back, inv);
    }

    #[test]
    fn test_document_keeps_every_digit() {
        let mut inv = Investor::new(InvestorId::parse("p").unwrap(), "P", date(2024, 1, 1));
        inv.commitments.push(commitment(
            AssetClass::PrivateDebt,
            dec!(1234567890123.456789),
            Currency::USD,
        ));
        inv.commitments
            .push(commitment(AssetClass::PrivateDebt, dec!(0.1), Currency::USD));

        let bytes = serde_json::to_vec(&inv).unwrap();
        let back: Investor = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back.commitments[0].amount, dec!(1234567890123.456789));
        assert_eq!(back.total_committed().unwrap(), dec!(1234567890123.556789));
    }

    #[test]
    fn test_totals_overflow_is_an_error() {
        // Stored documents bypass Commitment::new, so totals must still be checked
        let mut inv = Investor::new(InvestorId::parse("o").unwrap(), "O", date(2024, 1, 1));
        for _ in 0..2 {
            inv.commitments.push(Commitment {
                asset_class: AssetClass::RealEstate,
                amount: Decimal::MAX,
                currency: Currency::USD,
                date: date(2024, 1, 1),
            });
        }

        let err = inv.total_committed().unwrap_err();
        assert!(matches!(err, CoreError::Overflow { .. }));
        assert!(inv.total_usd(&FxTable::default()).is_err());
    }
}
