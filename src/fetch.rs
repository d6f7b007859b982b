//! Optional X (Twitter) API integration placeholder
//!
//! The pipeline is offline-first: without a configured token this returns
//! an empty table, and the CSV-driven operations carry all functionality.
//! The function is the hook for future online fetching.

use crate::error::Result;
use polars::prelude::*;
use tracing::{info, warn};

/// Environment variable holding the API bearer token
pub const TOKEN_ENV_VAR: &str = "X_BEARER_TOKEN";

/// Fetch recent posts matching a query.
///
/// Returns an empty DataFrame unless a token is configured; with a token it
/// still returns empty, since online fetching is intentionally
/// unimplemented.
pub fn fetch_from_x(query: &str, max_results: usize) -> Result<DataFrame> {
    match std::env::var(TOKEN_ENV_VAR) {
        Err(_) => {
            info!("no API key found; running in offline mode using CSVs");
            Ok(DataFrame::empty())
        }
        Ok(_) => {
            warn!(
                query,
                max_results, "X API token found, but online fetching is not implemented yet"
            );
            Ok(DataFrame::empty())
        }
    }
}
