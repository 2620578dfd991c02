//! Quote server sync: remote access, merge policy, and the periodic scheduler.

mod http;
mod scheduler;

pub use http::{HttpQuoteRemote, DEFAULT_SERVER_URL};
pub use scheduler::{SyncScheduler, DEFAULT_SYNC_INTERVAL};

use std::collections::HashSet;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::models::Quote;

/// Acknowledgment shown after a successful sync.
pub const SYNC_SUCCESS_MESSAGE: &str = "Quotes synced with server!";

/// Remote quote collection endpoint.
#[async_trait]
pub trait QuoteRemote: Send + Sync {
    /// Fetch the remote collection
    async fn fetch_quotes(&self) -> Result<Vec<Quote>>;

    /// Push one newly added quote. Acceptance is not confirmed.
    async fn post_quote(&self, quote: &Quote) -> Result<()>;
}

/// Result of a completed sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Quotes returned by the server
    pub fetched: usize,
    /// Server quotes that were not already present locally
    pub added: usize,
    /// Collection size after the merge
    pub total: usize,
}

impl SyncOutcome {
    pub const fn message(&self) -> &'static str {
        SYNC_SUCCESS_MESSAGE
    }
}

/// Union of `local` and `remote`, deduplicated on serialized form.
///
/// Local quotes come first in their original order, followed by remote quotes
/// not already present. Each distinct quote appears once.
pub fn merge_quotes(local: &[Quote], remote: &[Quote]) -> Vec<Quote> {
    let mut seen = HashSet::with_capacity(local.len() + remote.len());
    local
        .iter()
        .chain(remote)
        .filter(|quote| seen.insert(quote.content_key()))
        .cloned()
        .collect()
}

/// Decode a server response body into quotes.
///
/// The body must be a JSON array. Elements that are not objects with
/// non-empty `text` and `category` strings are skipped.
pub fn decode_remote_quotes(body: &str) -> Result<Vec<Quote>> {
    let records: Vec<Value> = serde_json::from_str(body)
        .map_err(|error| Error::decode("server response", error.to_string()))?;

    let total = records.len();
    let quotes = records
        .into_iter()
        .filter_map(|record| serde_json::from_value::<Quote>(record).ok())
        .filter(Quote::is_valid)
        .collect::<Vec<_>>();

    let skipped = total - quotes.len();
    if skipped > 0 {
        tracing::warn!("Skipped {skipped} of {total} server records that are not quotes");
    }

    Ok(quotes)
}
