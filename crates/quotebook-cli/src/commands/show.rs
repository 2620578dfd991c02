use std::io::{self, Write};

use quotebook_core::config::QuotebookConfig;
use quotebook_core::services::QuoteService;

use crate::commands::common::open_service;
use crate::error::CliError;

pub async fn run_show(category: &str, config: &QuotebookConfig) -> Result<(), CliError> {
    let service = open_service(config)?;
    show_quote(&service, category, &mut io::stdout()).await
}

pub async fn show_quote(
    service: &QuoteService,
    category: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let display = service.select_category(category).await?;
    writeln!(out, "{}", display.render())?;
    Ok(())
}
