//! # Pledge Ingest
//!
//! Turns raw CSV uploads into investor documents.
//!
//! The pipeline runs in three stages:
//!
//! 1. **Schema**: the header row is resolved against the accepted aliases
//!    of every canonical [`Field`]. A missing required field aborts the
//!    upload with [`IngestError::Schema`].
//! 2. **Rows**: each data row becomes a [`ValidatedRow`] only when every
//!    check passes, otherwise a [`RowError`] is recorded and the row is
//!    skipped.
//! 3. **Grouping and persistence**: rows are grouped per investor and
//!    written through a [`pledge_traits::InvestorStore`] by [`ingest_csv`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use pledge_ingest::{ingest_csv, IngestOptions};
//!
//! let report = ingest_csv(store.as_ref(), &bytes, &IngestOptions::default()).await?;
//! println!("{}", report.message);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod normalizer;
pub mod persist;
pub mod row;
pub mod schema;

pub use error::{IngestError, IngestResult};
pub use normalizer::{normalize, NormalizedBatch};
pub use persist::{ingest_csv, IngestOptions, UploadMode, UploadReport};
pub use row::{parse_amount, parse_date, RowError, ValidatedRow};
pub use schema::{Field, Schema};
