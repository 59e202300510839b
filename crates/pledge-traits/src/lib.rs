//! # Pledge Traits
//!
//! Trait definitions for the Pledge service.
//!
//! This crate contains ONLY trait definitions with no runtime dependencies.
//! Implementations live in `pledge-storage`.
//!
//! ## Dependency Injection
//!
//! The server, ingestion and reporting layers never open a database
//! themselves. They receive an `Arc<dyn InvestorStore>` constructed once at
//! start-up:
//!
//! ```ignore
//! let store: Arc<dyn InvestorStore> = Arc::new(RedbInvestorStore::open(path)?);
//! let state = AppState::new(store, config);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod storage;

pub use error::TraitError;
pub use storage::InvestorStore;
