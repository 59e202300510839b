//! Header resolution.
//!
//! Every canonical field accepts a handful of header spellings seen in
//! real exports. Matching trims and ignores ASCII case.

use std::fmt;

use csv::StringRecord;

use crate::error::{IngestError, IngestResult};

/// A canonical CSV field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// Explicit investor identifier.
    InvestorId,
    /// Investor display name.
    InvestorName,
    /// Investor institution type.
    InvestorType,
    /// Country of domicile.
    Country,
    /// Postal address.
    Address,
    /// Date the investor was first recorded.
    DateAdded,
    /// Date the investor was last updated.
    LastUpdated,
    /// Commitment asset class.
    AssetClass,
    /// Commitment amount.
    Amount,
    /// Commitment currency.
    Currency,
    /// Commitment date.
    Date,
}

impl Field {
    /// All fields, in column-resolution order.
    pub const ALL: [Field; 11] = [
        Field::InvestorId,
        Field::InvestorName,
        Field::InvestorType,
        Field::Country,
        Field::Address,
        Field::DateAdded,
        Field::LastUpdated,
        Field::AssetClass,
        Field::Amount,
        Field::Currency,
        Field::Date,
    ];

    /// Preferred header text, used in error messages.
    pub fn name(&self) -> &'static str {
        self.aliases()[0]
    }

    /// Accepted header spellings, preferred first.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Field::InvestorId => &["Investor Id", "Investor ID", "investor_id"],
            Field::InvestorName => &["Investor Name", "investor_name", "Investor"],
            Field::InvestorType => &["Investor Type", "Investory Type", "investor_type"],
            Field::Country => &["Investor Country", "Country"],
            Field::Address => &["Investor Address", "Address"],
            Field::DateAdded => &["Investor Date Added", "Date Added"],
            Field::LastUpdated => &["Investor Last Updated", "Last Updated"],
            Field::AssetClass => &["Commitment Asset Class", "Asset Class", "asset_class"],
            Field::Amount => &["Commitment Amount", "Amount", "amount"],
            Field::Currency => &["Commitment Currency", "Currency"],
            Field::Date => &["Commitment Date", "Date", "date"],
        }
    }

    /// Whether an upload without this field is rejected.
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            Field::InvestorName | Field::AssetClass | Field::Amount | Field::Date
        )
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Column positions of the canonical fields within one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: [Option<usize>; 11],
    date_from_date_added: bool,
}

impl Schema {
    /// Resolves the header row.
    ///
    /// Fails with [`IngestError::Schema`] naming every required field
    /// that has no matching header. When no commitment date header is
    /// present the date-added column stands in for it.
    pub fn resolve(headers: &StringRecord) -> IngestResult<Self> {
        let mut columns = [None; 11];
        for field in Field::ALL {
            columns[field.index()] = find_column(headers, field.aliases());
        }

        let mut date_from_date_added = false;
        if columns[Field::Date.index()].is_none() {
            if let Some(col) = columns[Field::DateAdded.index()] {
                columns[Field::Date.index()] = Some(col);
                date_from_date_added = true;
            }
        }

        let missing: Vec<String> = Field::ALL
            .iter()
            .filter(|f| f.is_required() && columns[f.index()].is_none())
            .map(|f| f.name().to_string())
            .collect();

        if !missing.is_empty() {
            return Err(IngestError::Schema { missing });
        }

        Ok(Self {
            columns,
            date_from_date_added,
        })
    }

    /// Column index of `field`, if the file has it.
    pub fn column(&self, field: Field) -> Option<usize> {
        self.columns[field.index()]
    }

    /// Whether the file has a column for `field`.
    pub fn has(&self, field: Field) -> bool {
        self.column(field).is_some()
    }

    /// True when commitment dates are read from the date-added column.
    pub fn date_from_date_added(&self) -> bool {
        self.date_from_date_added
    }

    /// Trimmed cell for `field`, `None` when the column is absent, the row
    /// is short, or the cell is blank.
    pub fn cell<'r>(&self, record: &'r StringRecord, field: Field) -> Option<&'r str> {
        self.column(field)
            .and_then(|col| record.get(col))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

fn find_column(headers: &StringRecord, aliases: &[&str]) -> Option<usize> {
    aliases.iter().find_map(|alias| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(alias))
    })
}
