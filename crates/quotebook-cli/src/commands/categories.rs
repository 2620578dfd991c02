use std::io::{self, Write};

use quotebook_core::config::QuotebookConfig;
use quotebook_core::services::QuoteService;

use crate::commands::common::open_service;
use crate::error::CliError;

pub async fn run_categories(as_json: bool, config: &QuotebookConfig) -> Result<(), CliError> {
    let service = open_service(config)?;
    list_categories(&service, as_json, &mut io::stdout()).await
}

pub async fn list_categories(
    service: &QuoteService,
    as_json: bool,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let options = service.filter_options().await;

    if as_json {
        writeln!(out, "{}", serde_json::to_string_pretty(&options)?)?;
    } else {
        for option in options {
            writeln!(out, "{:<20}  {}", option.value, option.label)?;
        }
    }

    Ok(())
}
