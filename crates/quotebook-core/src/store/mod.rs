//! Key-value persistence for Quotebook
//!
//! Quotes live under a single durable key; the most recently displayed quote
//! lives under a separate key in session-scoped storage.

mod file;
mod memory;

pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;

use crate::error::{Error, Result};
use crate::models::{decode_quote_list, Quote};

/// Durable key holding the full quote collection.
pub const QUOTES_KEY: &str = "quotes";

/// Session key holding the most recently displayed quote.
pub const LAST_VIEWED_KEY: &str = "lastViewedQuote";

/// Trait for string key-value storage backends
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key` if present
    fn remove(&self, key: &str) -> Result<()>;
}

/// Quote persistence over a durable store plus a session store.
pub struct QuoteStore {
    durable: Box<dyn KeyValueStore>,
    session: Box<dyn KeyValueStore>,
}

impl QuoteStore {
    pub fn new(durable: impl KeyValueStore + 'static, session: impl KeyValueStore + 'static) -> Self {
        Self {
            durable: Box::new(durable),
            session: Box::new(session),
        }
    }

    /// In-memory store for both scopes (primarily for tests).
    pub fn in_memory() -> Self {
        Self::new(MemoryKeyValueStore::new(), MemoryKeyValueStore::new())
    }

    /// Replace the persisted collection with `quotes`.
    pub fn save(&self, quotes: &[Quote]) -> Result<()> {
        let serialized = serde_json::to_string(quotes)?;
        self.durable.set(QUOTES_KEY, &serialized)?;
        tracing::debug!("Persisted {} quotes", quotes.len());
        Ok(())
    }

    /// Load the persisted collection.
    ///
    /// Returns `Ok(None)` when nothing has been saved yet and
    /// [`Error::Decode`] when the stored text is not a quote list.
    pub fn load(&self) -> Result<Option<Vec<Quote>>> {
        let Some(raw) = self.durable.get(QUOTES_KEY)? else {
            return Ok(None);
        };
        decode_quote_list(&raw, "stored quotes").map(Some)
    }

    /// Record the most recently displayed quote for this session.
    pub fn save_last_viewed(&self, quote: &Quote) -> Result<()> {
        let serialized = serde_json::to_string(quote)?;
        self.session.set(LAST_VIEWED_KEY, &serialized)
    }

    /// The most recently displayed quote for this session, if any.
    pub fn last_viewed(&self) -> Result<Option<Quote>> {
        let Some(raw) = self.session.get(LAST_VIEWED_KEY)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|error| Error::decode("last viewed quote", error.to_string()))
    }

    /// Forget the session-scoped state.
    pub fn clear_session(&self) -> Result<()> {
        self.session.remove(LAST_VIEWED_KEY)
    }
}
