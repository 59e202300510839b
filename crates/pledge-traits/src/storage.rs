//! Storage traits for persistence.
//!
//! [`InvestorStore`] persists investor documents with their commitments
//! embedded. Each document write is atomic; batch writes are a convenience,
//! callers must not rely on cross-document atomicity.
//!
//! Storage implementations are EXTENSIONS (e.g., redb, in-memory).

use async_trait::async_trait;

use pledge_core::{Investor, InvestorId};

use crate::error::TraitError;

/// Investor document storage.
#[async_trait]
pub trait InvestorStore: Send + Sync {
    /// Short name of the backend, for health reporting.
    fn backend_name(&self) -> &'static str;

    /// Get an investor by id.
    async fn get(&self, id: &InvestorId) -> Result<Option<Investor>, TraitError>;

    /// Get the investors that exist among `ids`, in the order given.
    async fn get_many(&self, ids: &[InvestorId]) -> Result<Vec<Investor>, TraitError> {
        let mut results = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(investor) = self.get(id).await? {
                results.push(investor);
            }
        }
        Ok(results)
    }

    /// All investors, ordered by id.
    async fn list(&self) -> Result<Vec<Investor>, TraitError>;

    /// Insert or replace one investor document.
    async fn save(&self, investor: &Investor) -> Result<(), TraitError>;

    /// Insert or replace several investor documents.
    async fn save_batch(&self, investors: &[Investor]) -> Result<(), TraitError>;

    /// Remove every investor, returning how many were removed.
    async fn clear(&self) -> Result<u64, TraitError>;

    /// Number of stored investors.
    async fn count(&self) -> Result<u64, TraitError>;
}
