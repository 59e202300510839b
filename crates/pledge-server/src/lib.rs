//! Pledge REST API Server.
//!
//! Serves CSV ingestion and reporting for investor commitments over HTTP.
//!
//! ## Endpoints
//!
//! Every investor route is served under `/investors` and mirrored under
//! `/api/v1/investors`:
//!
//! - `POST /investors/upload-csv[?mode=merge|replace]` - multipart field `file`
//! - `GET  /investors/summary[?sort=id|total_desc]`
//! - `GET  /investors/summary-filtered`
//! - `GET  /investors/{investor_id}/details`
//! - `GET  /investors/asset-classes`
//! - `GET  /investors/stats`
//! - `GET  /health`
//!
//! ## Usage
//!
//! ```bash
//! # Start with defaults (port 8000, ./data/pledge.redb)
//! pledge-server
//!
//! # Custom config file and port
//! pledge-server --config config/pledge.toml --port 3001
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod dto;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use server::{create_router, run_server};
pub use state::AppState;
