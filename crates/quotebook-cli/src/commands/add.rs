use std::io::{self, Write};

use quotebook_core::config::QuotebookConfig;
use quotebook_core::form::QuoteForm;
use quotebook_core::services::{QuoteService, Submission};

use crate::commands::common::open_service;
use crate::error::CliError;

pub async fn run_add(text: &str, category: &str, config: &QuotebookConfig) -> Result<(), CliError> {
    let service = open_service(config)?;
    add_quote(&service, text, category, &mut io::stdout()).await
}

/// Submit the add-quote form.
///
/// Blank fields are ignored without output. Sync failures after a stored add
/// are only logged.
pub async fn add_quote(
    service: &QuoteService,
    text: &str,
    category: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut form = QuoteForm::new(text, category);

    match service.submit_form(&mut form).await? {
        Submission::Rejected => {
            tracing::debug!("Ignored add with a blank text or category");
        }
        Submission::Added { quote, sync } => {
            writeln!(out, "Added {quote}")?;
            writeln!(out, "{}", service.view().await.display.render())?;
            if let Some(outcome) = sync {
                writeln!(out, "{}", outcome.message())?;
            }
        }
    }

    Ok(())
}
