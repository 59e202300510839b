//! Persisting normalized uploads.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use pledge_core::{Currency, InvestorId};
use pledge_traits::InvestorStore;

use crate::error::{IngestError, IngestResult};
use crate::normalizer::normalize;
use crate::row::RowError;

/// How an upload combines with what is already stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadMode {
    /// Merge into existing investors, appending commitments.
    #[default]
    Merge,
    /// Clear the store, then load the upload. An upload with no valid
    /// rows leaves the store untouched.
    Replace,
}

impl fmt::Display for UploadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadMode::Merge => f.write_str("merge"),
            UploadMode::Replace => f.write_str("replace"),
        }
    }
}

impl FromStr for UploadMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "merge" => Ok(UploadMode::Merge),
            "replace" => Ok(UploadMode::Replace),
            other => Err(format!("unknown upload mode '{other}', expected merge or replace")),
        }
    }
}

/// Options for [`ingest_csv`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IngestOptions {
    /// Merge or replace.
    pub mode: UploadMode,
    /// Currency for rows without one.
    pub default_currency: Currency,
}

/// Result of a processed upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReport {
    /// True once the file was accepted and persisted.
    pub success: bool,
    /// One-line outcome.
    pub message: String,
    /// Data rows read.
    pub rows_processed: usize,
    /// Rows that failed validation.
    pub rows_skipped: usize,
    /// Commitments persisted.
    pub total_commitments: usize,
    /// Investors touched by this upload.
    pub total_investors: usize,
    /// Investors that did not exist before.
    pub investors_created: usize,
    /// Existing investors that received commitments.
    pub investors_updated: usize,
    /// Affected investor ids, sorted.
    pub investors: Vec<InvestorId>,
    /// Why each skipped row was skipped.
    pub errors: Vec<RowError>,
}

/// Normalizes a CSV upload and persists it.
///
/// A [`IngestError::Schema`] or [`IngestError::Malformed`] failure happens
/// before the store is touched.
pub async fn ingest_csv(
    store: &dyn InvestorStore,
    bytes: &[u8],
    options: &IngestOptions,
) -> IngestResult<UploadReport> {
    let batch = normalize(bytes, options.default_currency)?;

    if !batch.errors.is_empty() {
        warn!(
            "Skipped {} of {} rows during CSV ingestion",
            batch.rows_skipped(),
            batch.rows_processed
        );
    }

    let rows_processed = batch.rows_processed;
    let rows_skipped = batch.rows_skipped();
    let total_commitments = batch.total_commitments();
    let drafts = batch.investors;

    let mut created = 0;
    let mut updated = 0;

    let documents = match options.mode {
        UploadMode::Replace if drafts.is_empty() => {
            warn!("Replace upload has no valid rows, keeping stored investors");
            Vec::new()
        }
        UploadMode::Replace => {
            let removed = store.clear().await.map_err(storage_failure)?;
            info!("Replace upload cleared {} stored investors", removed);
            created = drafts.len();
            drafts
        }
        UploadMode::Merge => {
            let ids: Vec<InvestorId> = drafts.iter().map(|d| d.id.clone()).collect();
            let mut existing: HashMap<InvestorId, _> = store
                .get_many(&ids)
                .await
                .map_err(storage_failure)?
                .into_iter()
                .map(|inv| (inv.id.clone(), inv))
                .collect();

            drafts
                .into_iter()
                .map(|draft| match existing.remove(&draft.id) {
                    Some(mut stored) => {
                        updated += 1;
                        stored.merge(draft);
                        stored
                    }
                    None => {
                        created += 1;
                        draft
                    }
                })
                .collect::<Vec<_>>()
        }
    };

    if !documents.is_empty() {
        store
            .save_batch(&documents)
            .await
            .map_err(storage_failure)?;
    }

    let mut investors: Vec<InvestorId> = documents.into_iter().map(|d| d.id).collect();
    investors.sort();

    let mut message = if investors.is_empty() && options.mode == UploadMode::Replace {
        "No valid rows to load; stored investors left unchanged".to_string()
    } else {
        format!(
            "Successfully processed {} commitments for {} investors",
            total_commitments,
            investors.len()
        )
    };
    if rows_skipped > 0 {
        message.push_str(&format!(" ({rows_skipped} rows skipped)"));
    }

    info!(
        mode = %options.mode,
        created,
        updated,
        "{}",
        message
    );

    Ok(UploadReport {
        success: true,
        message,
        rows_processed,
        rows_skipped,
        total_commitments,
        total_investors: investors.len(),
        investors_created: created,
        investors_updated: updated,
        investors,
        errors: batch.errors,
    })
}

fn storage_failure(err: pledge_traits::TraitError) -> IngestError {
    error!("Storage failure during ingestion: {}", err);
    IngestError::Storage(err)
}
