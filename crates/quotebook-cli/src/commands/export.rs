use std::io::{self, Write};
use std::path::Path;

use quotebook_core::config::QuotebookConfig;
use quotebook_core::services::QuoteService;

use crate::commands::common::open_service;
use crate::error::CliError;

pub async fn run_export(output_path: Option<&Path>, config: &QuotebookConfig) -> Result<(), CliError> {
    let service = open_service(config)?;
    export_quotes(&service, output_path, &mut io::stdout()).await
}

pub async fn export_quotes(
    service: &QuoteService,
    output_path: Option<&Path>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let path = service.export_to_path(output_path).await?;
    writeln!(out, "{}", path.display())?;
    Ok(())
}
