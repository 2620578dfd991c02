use std::io::Write;
use std::sync::Arc;

use quotebook_core::config::{ConfigOverrides, QuotebookConfig};
use quotebook_core::services::QuoteService;
use quotebook_core::store::{FileKeyValueStore, MemoryKeyValueStore, QuoteStore};
use quotebook_core::sync::HttpQuoteRemote;
use quotebook_core::Quote;
use serde::Serialize;

use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct QuoteListItem {
    pub index: usize,
    pub text: String,
    pub category: String,
}

pub fn load_config(overrides: ConfigOverrides) -> Result<QuotebookConfig, CliError> {
    Ok(QuotebookConfig::load(overrides)?)
}

/// Open the quote service over the configured data directory and server.
///
/// Session-scoped state lives in memory and ends with the process.
pub fn open_service(config: &QuotebookConfig) -> Result<QuoteService, CliError> {
    let durable = FileKeyValueStore::open(&config.data_dir)?;
    let store = QuoteStore::new(durable, MemoryKeyValueStore::new());
    let remote = HttpQuoteRemote::with_timeout(&config.server_url, config.request_timeout)?;

    tracing::debug!(
        "Opening quote store at {} (server {})",
        config.data_dir.display(),
        remote.endpoint()
    );
    Ok(QuoteService::open(store, Arc::new(remote))?)
}

pub fn quote_to_list_item(index: usize, quote: &Quote) -> QuoteListItem {
    QuoteListItem {
        index: index + 1,
        text: quote.text.clone(),
        category: quote.category.clone(),
    }
}

pub fn format_quote_lines(quotes: &[Quote]) -> Vec<String> {
    let width = quotes.len().to_string().len();
    quotes
        .iter()
        .enumerate()
        .map(|(index, quote)| format!("{:>width$}  {quote}", index + 1))
        .collect()
}

pub fn write_lines(out: &mut impl Write, lines: &[String]) -> Result<(), CliError> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
