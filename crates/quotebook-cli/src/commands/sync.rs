use std::io::{self, Write};

use quotebook_core::config::QuotebookConfig;
use quotebook_core::services::QuoteService;

use crate::commands::common::open_service;
use crate::error::CliError;

pub async fn run_sync(config: &QuotebookConfig) -> Result<(), CliError> {
    let service = open_service(config)?;
    sync_quotes(&service, &mut io::stdout()).await
}

/// Manual sync. Failures are logged by the service and otherwise silent.
pub async fn sync_quotes(service: &QuoteService, out: &mut impl Write) -> Result<(), CliError> {
    if let Ok(outcome) = service.sync(None).await {
        writeln!(out, "{}", service.view().await.display.render())?;
        writeln!(out, "{}", outcome.message())?;
    }
    Ok(())
}
