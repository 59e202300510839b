//! Per-row validation.

use std::str::FromStr;

use chrono::NaiveDate;
use csv::StringRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pledge_core::{AssetClass, Commitment, Currency, InvestorId, InvestorType};

use crate::schema::{Field, Schema};

/// Accepted date layouts, tried in order.
pub const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

/// Why a data row was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    /// 1-based CSV line number; the header is line 1.
    pub line: u64,
    /// Header name of the offending field.
    pub field: String,
    /// Human-readable reason.
    pub message: String,
}

impl RowError {
    fn new(line: u64, field: Field, message: impl Into<String>) -> Self {
        Self {
            line,
            field: field.name().to_string(),
            message: message.into(),
        }
    }
}

/// A data row that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRow {
    /// Source line.
    pub line: u64,
    /// Derived investor identity.
    pub investor_id: InvestorId,
    /// Investor name as written.
    pub investor_name: String,
    /// Investor type, when given.
    pub investor_type: Option<InvestorType>,
    /// Country, when given.
    pub country: Option<String>,
    /// Address, when given.
    pub address: Option<String>,
    /// Date added, when given.
    pub date_added: Option<NaiveDate>,
    /// Last updated, when given.
    pub last_updated: Option<NaiveDate>,
    /// The commitment this row records.
    pub commitment: Commitment,
}

impl ValidatedRow {
    /// Validates one record against the resolved schema.
    ///
    /// The first failing check decides the returned [`RowError`]; a row is
    /// never partially accepted.
    pub fn from_record(
        record: &StringRecord,
        schema: &Schema,
        line: u64,
        default_currency: Currency,
    ) -> Result<Self, RowError> {
        let investor_name = schema
            .cell(record, Field::InvestorName)
            .ok_or_else(|| RowError::new(line, Field::InvestorName, "is required"))?;

        let investor_id = match schema.cell(record, Field::InvestorId) {
            Some(raw) => InvestorId::parse(raw)
                .map_err(|e| RowError::new(line, Field::InvestorId, e.to_string()))?,
            None => InvestorId::parse(investor_name)
                .map_err(|e| RowError::new(line, Field::InvestorName, e.to_string()))?,
        };

        let investor_type = optional(record, schema, line, Field::InvestorType, |raw| {
            InvestorType::from_str(raw).map_err(|e| e.to_string())
        })?;

        let date_added = optional(record, schema, line, Field::DateAdded, parse_date_cell)?;
        let last_updated = optional(record, schema, line, Field::LastUpdated, parse_date_cell)?;

        let asset_class = required(record, schema, line, Field::AssetClass, |raw| {
            AssetClass::from_str(raw).map_err(|e| e.to_string())
        })?;

        let amount = required(record, schema, line, Field::Amount, parse_amount)?;

        let currency = optional(record, schema, line, Field::Currency, |raw| {
            Currency::from_str(raw).map_err(|e| e.to_string())
        })?
        .unwrap_or(default_currency);

        let date = required(record, schema, line, Field::Date, parse_date_cell)?;

        let commitment = Commitment::new(asset_class, amount, currency, date)
            .map_err(|e| RowError::new(line, Field::Amount, e.to_string()))?;

        Ok(Self {
            line,
            investor_id,
            investor_name: investor_name.to_string(),
            investor_type,
            country: schema.cell(record, Field::Country).map(str::to_string),
            address: schema.cell(record, Field::Address).map(str::to_string),
            date_added,
            last_updated,
            commitment,
        })
    }
}

fn required<T>(
    record: &StringRecord,
    schema: &Schema,
    line: u64,
    field: Field,
    parse: impl FnOnce(&str) -> Result<T, String>,
) -> Result<T, RowError> {
    optional(record, schema, line, field, parse)?
        .ok_or_else(|| RowError::new(line, field, "is required"))
}

fn optional<T>(
    record: &StringRecord,
    schema: &Schema,
    line: u64,
    field: Field,
    parse: impl FnOnce(&str) -> Result<T, String>,
) -> Result<Option<T>, RowError> {
    schema
        .cell(record, field)
        .map(|raw| parse(raw).map_err(|msg| RowError::new(line, field, msg)))
        .transpose()
}

/// Parses an amount cell.
///
/// Surrounding whitespace and the thousands separators `,` and `_` are
/// ignored; scientific notation is accepted. Negative values are returned
/// as parsed and rejected later by [`Commitment::new`].
pub fn parse_amount(raw: &str) -> Result<Decimal, String> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();

    if cleaned.is_empty() {
        return Err("is required".to_string());
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| format!("'{}' is not a valid number", raw.trim()))
}

/// Parses a date cell under any of [`DATE_FORMATS`].
///
/// A trailing time component (`2024-01-15T10:30:00`, `2024-01-15 00:00:00`)
/// is ignored.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date_part = raw.split(['T', ' ']).next().unwrap_or(raw);

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

fn parse_date_cell(raw: &str) -> Result<NaiveDate, String> {
    parse_date(raw).ok_or_else(|| format!("'{raw}' is not a recognised date"))
}
