//! In-memory storage implementation for testing.

use async_trait::async_trait;
use dashmap::DashMap;

use pledge_core::{Investor, InvestorId};
use pledge_traits::{InvestorStore, TraitError};

/// In-memory investor store.
///
/// Useful for tests and ephemeral servers. Thread-safe via `DashMap`.
#[derive(Debug, Default)]
pub struct InMemoryInvestorStore {
    investors: DashMap<InvestorId, Investor>,
}

impl InMemoryInvestorStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with investors.
    pub fn with_investors(investors: impl IntoIterator<Item = Investor>) -> Self {
        let store = Self::new();
        for investor in investors {
            store.investors.insert(investor.id.clone(), investor);
        }
        store
    }

    /// Number of investors stored.
    pub fn len(&self) -> usize {
        self.investors.len()
    }

    /// Returns true if no investors are stored.
    pub fn is_empty(&self) -> bool {
        self.investors.is_empty()
    }
}

#[async_trait]
impl InvestorStore for InMemoryInvestorStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, id: &InvestorId) -> Result<Option<Investor>, TraitError> {
        Ok(self.investors.get(id).map(|r| r.value().clone()))
    }

    async fn list(&self) -> Result<Vec<Investor>, TraitError> {
        let mut investors: Vec<Investor> =
            self.investors.iter().map(|r| r.value().clone()).collect();
        investors.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(investors)
    }

    async fn save(&self, investor: &Investor) -> Result<(), TraitError> {
        self.investors.insert(investor.id.clone(), investor.clone());
        Ok(())
    }

    async fn save_batch(&self, investors: &[Investor]) -> Result<(), TraitError> {
        for investor in investors {
            self.investors.insert(investor.id.clone(), investor.clone());
        }
        Ok(())
    }

    async fn clear(&self) -> Result<u64, TraitError> {
        let removed = self.investors.len() as u64;
        self.investors.clear();
        Ok(removed)
    }

    async fn count(&self) -> Result<u64, TraitError> {
        Ok(self.investors.len() as u64)
    }
}
