use std::io::{self, Write};

use quotebook_core::config::QuotebookConfig;
use quotebook_core::display::candidate_pool;
use quotebook_core::services::QuoteService;
use quotebook_core::Quote;

use crate::commands::common::{
    format_quote_lines, open_service, quote_to_list_item, write_lines, QuoteListItem,
};
use crate::error::CliError;

pub async fn run_list(
    category: Option<&str>,
    as_json: bool,
    config: &QuotebookConfig,
) -> Result<(), CliError> {
    let service = open_service(config)?;
    list_quotes(&service, category, as_json, &mut io::stdout()).await
}

pub async fn list_quotes(
    service: &QuoteService,
    category: Option<&str>,
    as_json: bool,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let all = service.quotes().await;
    let quotes = match category {
        Some(category) => candidate_pool(&all, category)
            .into_iter()
            .cloned()
            .collect::<Vec<Quote>>(),
        None => all,
    };

    if as_json {
        let json_items = quotes
            .iter()
            .enumerate()
            .map(|(index, quote)| quote_to_list_item(index, quote))
            .collect::<Vec<QuoteListItem>>();
        writeln!(out, "{}", serde_json::to_string_pretty(&json_items)?)?;
    } else {
        write_lines(out, &format_quote_lines(&quotes))?;
    }

    Ok(())
}
