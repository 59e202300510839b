//! RedbInvestorStore implementation.
//!
//! Investors are stored as JSON documents keyed by their id, with
//! commitments embedded. Keys iterate in byte order, which is id order.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use redb::{Database, ReadableTable, ReadableTableMetadata, TableDefinition};
use tracing::debug;

use pledge_core::{Investor, InvestorId};
use pledge_traits::{InvestorStore, TraitError};

use crate::error::StorageResult;

// Table definitions
const INVESTORS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("investors");

/// Redb-based investor store.
///
/// # Example
///
/// ```rust,ignore
/// use pledge_storage::RedbInvestorStore;
///
/// let store = RedbInvestorStore::open("./data/pledge.redb")?;
/// assert_eq!(store.backend_name(), "redb");
/// ```
pub struct RedbInvestorStore {
    db: Arc<Database>,
}

impl RedbInvestorStore {
    /// Opens or creates a database at the given path.
    ///
    /// Missing parent directories are created.
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let db = Database::create(path)?;
        let store = Self { db: Arc::new(db) };
        store.initialize_tables()?;
        debug!("Opened redb investor store at {}", path.display());
        Ok(store)
    }

    /// Initializes all required tables.
    fn initialize_tables(&self) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let _ = write_txn.open_table(INVESTORS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn get_investor(&self, id: &InvestorId) -> StorageResult<Option<Investor>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(INVESTORS_TABLE)?;

        match table.get(id.as_str())? {
            Some(data) => Ok(Some(serde_json::from_slice(data.value())?)),
            None => Ok(None),
        }
    }

    fn list_investors(&self) -> StorageResult<Vec<Investor>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(INVESTORS_TABLE)?;

        let mut investors = Vec::new();
        for result in table.iter()? {
            let (_, value) = result?;
            investors.push(serde_json::from_slice(value.value())?);
        }
        Ok(investors)
    }

    fn store_investors(&self, investors: &[Investor]) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(INVESTORS_TABLE)?;
            for investor in investors {
                let data = serde_json::to_vec(investor)?;
                table.insert(investor.id.as_str(), data.as_slice())?;
            }
        }
        write_txn.commit()?;
        Ok(())
    }

    fn clear_investors(&self) -> StorageResult<u64> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let table = write_txn.open_table(INVESTORS_TABLE)?;
            table.len()?
        };
        write_txn.delete_table(INVESTORS_TABLE)?;
        {
            let _ = write_txn.open_table(INVESTORS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(removed)
    }

    fn count_investors(&self) -> StorageResult<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(INVESTORS_TABLE)?;
        Ok(table.len()?)
    }
}

#[async_trait]
impl InvestorStore for RedbInvestorStore {
    fn backend_name(&self) -> &'static str {
        "redb"
    }

    async fn get(&self, id: &InvestorId) -> Result<Option<Investor>, TraitError> {
        Ok(self.get_investor(id)?)
    }

    async fn list(&self) -> Result<Vec<Investor>, TraitError> {
        Ok(self.list_investors()?)
    }

    async fn save(&self, investor: &Investor) -> Result<(), TraitError> {
        Ok(self.store_investors(std::slice::from_ref(investor))?)
    }

    async fn save_batch(&self, investors: &[Investor]) -> Result<(), TraitError> {
        Ok(self.store_investors(investors)?)
    }

    async fn clear(&self) -> Result<u64, TraitError> {
        Ok(self.clear_investors()?)
    }

    async fn count(&self) -> Result<u64, TraitError> {
        Ok(self.count_investors()?)
    }
}
