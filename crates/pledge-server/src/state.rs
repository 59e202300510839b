//! Application state.

use std::sync::Arc;

use pledge_analytics::Reporter;
use pledge_core::CoreResult;
use pledge_traits::InvestorStore;

use crate::config::ServerConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Investor store, opened once at start-up.
    pub store: Arc<dyn InvestorStore>,

    /// Read-side reporter over the same store.
    pub reporter: Reporter,

    /// Effective configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Creates state around an opened store.
    ///
    /// Fails if the configured FX table names an unknown currency.
    pub fn new(store: Arc<dyn InvestorStore>, config: ServerConfig) -> CoreResult<Self> {
        let fx = config.fx_table()?;
        Ok(Self {
            reporter: Reporter::new(Arc::clone(&store), fx),
            store,
            config: Arc::new(config),
        })
    }
}
