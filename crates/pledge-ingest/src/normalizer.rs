//! CSV decoding, validation and grouping into investor drafts.

use std::collections::HashMap;

use csv::ReaderBuilder;
use tracing::debug;

use pledge_core::{Currency, Investor, InvestorId};

use crate::error::{IngestError, IngestResult};
use crate::row::{RowError, ValidatedRow};
use crate::schema::Schema;

const UTF8_BOM: char = '\u{feff}';

/// Outcome of normalizing one file, before anything is persisted.
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    /// Investor drafts in first-occurrence order.
    pub investors: Vec<Investor>,
    /// Data rows read, valid or not.
    pub rows_processed: usize,
    /// Reasons for every skipped row, in file order.
    pub errors: Vec<RowError>,
}

impl NormalizedBatch {
    /// Number of rows that failed validation.
    pub fn rows_skipped(&self) -> usize {
        self.errors.len()
    }

    /// Number of commitments across all drafts.
    pub fn total_commitments(&self) -> usize {
        self.investors.iter().map(Investor::commitment_count).sum()
    }
}

/// Decodes, validates and groups a CSV upload.
///
/// Fails without reading any data row when the bytes are not UTF-8 or the
/// header lacks a required field. Invalid rows are skipped and reported in
/// [`NormalizedBatch::errors`].
pub fn normalize(bytes: &[u8], default_currency: Currency) -> IngestResult<NormalizedBatch> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| IngestError::malformed(format!("file is not valid UTF-8: {e}")))?;
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);

    if text.trim().is_empty() {
        return Err(IngestError::malformed("file is empty"));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| IngestError::malformed(e.to_string()))?
        .clone();
    let schema = Schema::resolve(&headers)?;

    let mut grouper = Grouper::default();
    let mut batch = NormalizedBatch::default();

    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(|e| IngestError::malformed(e.to_string()))?;
        let line = record
            .position()
            .map_or(index as u64 + 2, csv::Position::line);
        batch.rows_processed += 1;

        match ValidatedRow::from_record(&record, &schema, line, default_currency) {
            Ok(row) => grouper.push(row),
            Err(err) => {
                debug!(line = err.line, field = %err.field, "Skipping row: {}", err.message);
                batch.errors.push(err);
            }
        }
    }

    batch.investors = grouper.finish();
    Ok(batch)
}

/// Groups validated rows by investor, preserving first-occurrence order.
#[derive(Default)]
struct Grouper {
    order: HashMap<InvestorId, usize>,
    drafts: Vec<Investor>,
}

impl Grouper {
    fn push(&mut self, row: ValidatedRow) {
        match self.order.get(&row.investor_id) {
            Some(&idx) => absorb(&mut self.drafts[idx], row),
            None => {
                self.order.insert(row.investor_id.clone(), self.drafts.len());
                self.drafts.push(draft_from(row));
            }
        }
    }

    fn finish(self) -> Vec<Investor> {
        self.drafts
    }
}

fn draft_from(row: ValidatedRow) -> Investor {
    let date_added = row.date_added.unwrap_or(row.commitment.date);
    let mut investor = Investor::new(row.investor_id, row.investor_name, date_added);
    investor.investor_type = row.investor_type;
    investor.country = row.country;
    investor.address = row.address;
    investor.last_updated = row.last_updated;
    investor.commitments.push(row.commitment);
    investor
}

/// Folds a later row of the same investor into its draft.
///
/// Metadata already on the draft wins; the row only fills gaps.
fn absorb(draft: &mut Investor, row: ValidatedRow) {
    if draft.investor_type.is_none() {
        draft.investor_type = row.investor_type;
    }
    if draft.country.is_none() {
        draft.country = row.country;
    }
    if draft.address.is_none() {
        draft.address = row.address;
    }

    let row_added = row.date_added.unwrap_or(row.commitment.date);
    draft.date_added = draft.date_added.min(row_added);
    draft.last_updated = match (draft.last_updated, row.last_updated) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    };
    draft.commitments.push(row.commitment);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pledge_core::AssetClass;
    use rust_decimal_macros::dec;

    const SAMPLE: &str = "\
Investor Name,Investory Type,Investor Country,Investor Date Added,Investor Last Updated,Commitment Asset Class,Commitment Amount,Commitment Currency
Ioo Gryffindor fund,fund manager,Singapore,2000-07-06,2024-02-21,Infrastructure,15000000,GBP
Ibx Skywalker ltd,asset manager,United States,1997-07-21,2024-02-21,Infrastructure,31000000,GBP
Ioo Gryffindor fund,fund manager,Singapore,2000-07-06,2024-02-21,Hedge Funds,16000000,GBP
Mjd Jedi fund,bank,China,2010-06-08,2024-02-21,Natural Resources,31500000,GBP
";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_groups_in_first_occurrence_order() {
        let batch = normalize(SAMPLE.as_bytes(), Currency::USD).unwrap();

        let ids: Vec<&str> = batch.investors.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["ioo-gryffindor-fund", "ibx-skywalker-ltd", "mjd-jedi-fund"]);
        assert_eq!(batch.rows_processed, 4);
        assert_eq!(batch.rows_skipped(), 0);
        assert_eq!(batch.total_commitments(), 4);

        let ioo = &batch.investors[0];
        assert_eq!(ioo.commitment_count(), 2);
        assert_eq!(ioo.total_committed().unwrap(), dec!(31000000));
        assert_eq!(ioo.asset_classes().len(), 2);
        assert_eq!(ioo.date_added, date(2000, 7, 6));
    }

    #[test]
    fn test_invalid_rows_are_skipped_with_line_numbers() {
        let csv = "\
Investor Name,Commitment Asset Class,Commitment Amount,Commitment Date
A,Hedge Funds,100,2024-01-01
B,Crypto,100,2024-01-01
C,Real Estate,-1,2024-01-01
D,Private Equity,50,2024-01-02
";
        let batch = normalize(csv.as_bytes(), Currency::USD).unwrap();
        assert_eq!(batch.rows_processed, 4);
        assert_eq!(batch.investors.len(), 2);

        let lines: Vec<u64> = batch.errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![3, 4]);
        assert_eq!(batch.errors[0].field, "Commitment Asset Class");
        assert_eq!(batch.errors[1].field, "Commitment Amount");
    }

    #[test]
    fn test_later_rows_fill_missing_metadata() {
        let csv = "\
Investor Name,Country,Address,Asset Class,Amount,Date
Fund,,,Hedge Funds,1,2024-03-01
Fund,Japan,1 Main St,Real Estate,2,2023-01-15
Fund,France,,Real Estate,3,2024-06-01
";
        let batch = normalize(csv.as_bytes(), Currency::GBP).unwrap();
        let fund = &batch.investors[0];
        assert_eq!(fund.country.as_deref(), Some("Japan"));
        assert_eq!(fund.address.as_deref(), Some("1 Main St"));
        // No date-added column: earliest commitment date
        assert_eq!(fund.date_added, date(2023, 1, 15));
        assert!(fund.commitments.iter().all(|c| c.currency == Currency::GBP));
    }

    #[test]
    fn test_bom_and_short_rows() {
        let csv = "\u{feff}Investor,Asset Class,Amount,Date,Country\nA,Private Debt,10,2024-01-01\n";
        let batch = normalize(csv.as_bytes(), Currency::USD).unwrap();
        assert_eq!(batch.investors.len(), 1);
        assert_eq!(batch.investors[0].country, None);
        assert_eq!(
            batch.investors[0].commitments[0].asset_class,
            AssetClass::PrivateDebt
        );
    }

    #[test]
    fn test_schema_error_before_rows() {
        let csv = "Investor Name,Commitment Amount\nA,100\n";
        let err = normalize(csv.as_bytes(), Currency::USD).unwrap_err();
        assert!(matches!(err, IngestError::Schema { ref missing } if missing.len() == 2));
    }

    #[test]
    fn test_non_utf8_is_malformed() {
        let bytes = [0x49, 0x6e, 0xff, 0xfe, 0x0a];
        assert!(matches!(
            normalize(&bytes, Currency::USD),
            Err(IngestError::Malformed(_))
        ));
        assert!(matches!(
            normalize(b"  \n", Currency::USD),
            Err(IngestError::Malformed(_))
        ));
    }
}
