//! Pledge Storage Layer
//!
//! Storage backends implementing [`pledge_traits::InvestorStore`]. Investors
//! are persisted as documents with their commitments embedded.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use pledge_storage::RedbInvestorStore;
//! use pledge_traits::InvestorStore;
//!
//! // Create or open a database
//! let store: Arc<dyn InvestorStore> = Arc::new(RedbInvestorStore::open("./data/pledge.redb")?);
//!
//! // Store and retrieve investors
//! store.save(&investor).await?;
//! let retrieved = store.get(&investor.id).await?;
//! ```
//!
//! # Storage Backends
//!
//! ## RedbInvestorStore (Default)
//!
//! Uses [redb](https://crates.io/crates/redb), a pure-Rust embedded database
//! with ACID transactions. Suitable for single-process applications.
//!
//! ## InMemoryInvestorStore
//!
//! A concurrent in-memory implementation for testing and development.
//! Data is not persisted across restarts.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod memory;
mod redb;

pub use error::{StorageError, StorageResult};
pub use memory::InMemoryInvestorStore;
pub use redb::RedbInvestorStore;
