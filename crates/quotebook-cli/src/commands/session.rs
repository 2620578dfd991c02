//! Interactive session: one long-lived quote service driven by stdin lines
//! while the periodic sync runs in the background.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use quotebook_core::category::CategoryFilter;
use quotebook_core::config::QuotebookConfig;
use quotebook_core::services::QuoteService;
use quotebook_core::sync::SyncScheduler;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::commands::add::add_quote;
use crate::commands::categories::list_categories;
use crate::commands::common::open_service;
use crate::commands::export::export_quotes;
use crate::commands::import::import_quotes;
use crate::commands::list::list_quotes;
use crate::commands::show::show_quote;
use crate::commands::sync::sync_quotes;
use crate::error::CliError;

const SESSION_HELP: &str = "\
Commands:
  new                        show another random quote
  filter <category|all>      change the category filter
  add <text> | <category>    add a quote and sync it
  list                       list quotes under the current filter
  categories                 list filter options
  last                       show the last displayed quote
  export [path]              write quotes.json
  import <path>              import an exported file
  sync                       sync with the server now
  help                       show this help
  quit                       end the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    New,
    Filter(String),
    Add { text: String, category: String },
    List,
    Categories,
    Last,
    Export(Option<PathBuf>),
    Import(PathBuf),
    Sync,
    Help,
    Quit,
    Empty,
}

pub fn parse_session_command(line: &str) -> Result<SessionCommand, CliError> {
    let line = line.trim();
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

    let command = match verb {
        "" => SessionCommand::Empty,
        "new" | "random" => SessionCommand::New,
        "filter" => SessionCommand::Filter(if rest.is_empty() {
            CategoryFilter::ALL.to_string()
        } else {
            rest.to_string()
        }),
        "add" => {
            let (text, category) = rest.rsplit_once('|').unwrap_or((rest, ""));
            SessionCommand::Add {
                text: text.to_string(),
                category: category.to_string(),
            }
        }
        "list" => SessionCommand::List,
        "categories" => SessionCommand::Categories,
        "last" => SessionCommand::Last,
        "export" => SessionCommand::Export((!rest.is_empty()).then(|| PathBuf::from(rest))),
        "import" if !rest.is_empty() => SessionCommand::Import(PathBuf::from(rest)),
        "sync" => SessionCommand::Sync,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        _ => return Err(CliError::UnknownSessionCommand(line.to_string())),
    };
    Ok(command)
}

pub async fn run_session(config: &QuotebookConfig) -> Result<(), CliError> {
    let service = open_service(config)?;
    let stdin = BufReader::new(tokio::io::stdin());
    session_loop(&service, stdin, config.sync_interval, &mut io::stdout()).await
}

/// Drive `service` from `input` until `quit` or end of input.
///
/// The background scheduler is stopped and session state cleared on exit.
pub async fn session_loop<R: AsyncBufRead + Unpin>(
    service: &QuoteService,
    input: R,
    sync_interval: Duration,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let scheduler = SyncScheduler::start(service.clone(), sync_interval);
    tracing::info!(
        "Session started; syncing every {}s",
        scheduler.interval().as_secs()
    );

    let mut views = service.subscribe();
    views.borrow_and_update();
    let mut lines = input.lines();

    writeln!(out, "{}", service.view().await.display.render())?;

    let result = loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break Ok(()),
                    Err(error) => break Err(CliError::Io(error)),
                };

                match parse_session_command(&line) {
                    Ok(SessionCommand::Quit) => break Ok(()),
                    Ok(command) => {
                        if let Err(error) = handle_command(service, command, out).await {
                            writeln!(out, "Error: {error}")?;
                        }
                    }
                    Err(error) => writeln!(out, "{error}")?,
                }
                views.borrow_and_update();
            }
            Ok(()) = views.changed() => {
                let view = views.borrow_and_update().clone();
                writeln!(out, "{}", view.display.render())?;
                if let Some(notice) = view.notice {
                    writeln!(out, "{notice}")?;
                }
            }
        }
    };

    scheduler.shutdown().await;
    service.end_session()?;
    tracing::info!("Session ended");
    result
}

async fn handle_command(
    service: &QuoteService,
    command: SessionCommand,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        SessionCommand::New => {
            writeln!(out, "{}", service.show_random().await?.render())?;
        }
        SessionCommand::Filter(category) => show_quote(service, &category, out).await?,
        SessionCommand::Add { text, category } => add_quote(service, &text, &category, out).await?,
        SessionCommand::List => {
            let selected = service.view().await.selected;
            list_quotes(service, Some(&selected), false, out).await?;
        }
        SessionCommand::Categories => list_categories(service, false, out).await?,
        SessionCommand::Last => {
            if let Some(quote) = service.last_viewed()? {
                writeln!(out, "{quote}")?;
            }
        }
        SessionCommand::Export(path) => export_quotes(service, path.as_deref(), out).await?,
        SessionCommand::Import(path) => import_quotes(service, &path, out).await?,
        SessionCommand::Sync => sync_quotes(service, out).await?,
        SessionCommand::Help => writeln!(out, "{SESSION_HELP}")?,
        SessionCommand::Quit | SessionCommand::Empty => {}
    }
    Ok(())
}
