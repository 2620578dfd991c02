use std::io::{self, Write};
use std::path::Path;

use quotebook_core::config::QuotebookConfig;
use quotebook_core::export::IMPORT_SUCCESS_MESSAGE;
use quotebook_core::services::QuoteService;

use crate::commands::common::open_service;
use crate::error::CliError;

pub async fn run_import(file: &Path, config: &QuotebookConfig) -> Result<(), CliError> {
    let service = open_service(config)?;
    import_quotes(&service, file, &mut io::stdout()).await
}

pub async fn import_quotes(
    service: &QuoteService,
    file: &Path,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let count = service.import_file(file).await?;
    tracing::debug!("Imported {count} quotes from {}", file.display());

    writeln!(out, "{}", service.view().await.display.render())?;
    writeln!(out, "{IMPORT_SUCCESS_MESSAGE}")?;
    Ok(())
}
