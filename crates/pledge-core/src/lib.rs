//! # Pledge Core
//!
//! Core domain types for the Pledge investor commitments service.
//!
//! - **Types**: [`Investor`], [`Commitment`], [`InvestorId`] and the closed
//!   enumerations [`AssetClass`], [`Currency`], [`InvestorType`]
//! - **FX**: [`FxTable`] for USD-equivalent totals
//! - **Amounts**: [`MAX_COMMITMENT_AMOUNT`] and overflow-checked sums
//! - **Errors**: [`CoreError`] raised when a value breaks a data model invariant
//!
//! ## Example
//!
//! ```rust
//! use pledge_core::prelude::*;
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
//! let mut investor = Investor::new(InvestorId::parse("Ioo Gryffindor fund")?, "Ioo Gryffindor fund", date);
//! investor.commitments.push(Commitment::new(AssetClass::Infrastructure, dec!(15_000_000), Currency::GBP, date)?);
//!
//! assert_eq!(investor.total_usd(&FxTable::default())?, dec!(18_750_000));
//! # Ok::<(), CoreError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod amount;
pub mod error;
pub mod fx;
pub mod types;

pub use amount::{checked_add, checked_sum, MAX_COMMITMENT_AMOUNT, MAX_FX_RATE};
pub use error::{CoreError, CoreResult};
pub use fx::FxTable;
pub use types::*;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::fx::FxTable;
    pub use crate::types::{AssetClass, Commitment, Currency, Investor, InvestorId, InvestorType};
}
