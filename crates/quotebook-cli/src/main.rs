//! Quotebook CLI - store, browse, and sync short quotes from the terminal.

mod cli;
mod commands;
mod error;

use clap::{CommandFactory, Parser};
use quotebook_core::config::ConfigOverrides;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::{
    add::run_add, categories::run_categories, common::load_config, completions::run_completions,
    export::run_export, import::run_import, list::run_list, session::run_session, show::run_show,
    sync::run_sync,
};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quotebook=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let overrides = ConfigOverrides {
        server_url: cli.server_url,
        sync_interval_secs: match &command {
            Commands::Session { interval_secs } => *interval_secs,
            _ => None,
        },
        data_dir: cli.data_dir,
    };

    match command {
        Commands::Completions { shell, output } => run_completions(shell, output.as_deref())?,
        Commands::Add { text, category } => {
            run_add(&text.join(" "), &category, &load_config(overrides)?).await?;
        }
        Commands::Show { category } => run_show(&category, &load_config(overrides)?).await?,
        Commands::List { category, json } => {
            run_list(category.as_deref(), json, &load_config(overrides)?).await?;
        }
        Commands::Categories { json } => run_categories(json, &load_config(overrides)?).await?,
        Commands::Export { output } => {
            run_export(output.as_deref(), &load_config(overrides)?).await?;
        }
        Commands::Import { file } => run_import(&file, &load_config(overrides)?).await?,
        Commands::Sync => run_sync(&load_config(overrides)?).await?,
        Commands::Session { .. } => run_session(&load_config(overrides)?).await?,
    }

    Ok(())
}
