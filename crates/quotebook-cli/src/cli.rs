use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "quotebook")]
#[command(about = "Store, browse, and sync short quotes from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the stored quote collection
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Quote server URL used for sync
    #[arg(long, global = true, value_name = "URL")]
    pub server_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a quote and sync it to the server
    #[command(alias = "new")]
    Add {
        /// Quote text
        text: Vec<String>,
        /// Quote category
        #[arg(short, long, default_value = "")]
        category: String,
    },
    /// Show a random quote
    #[command(alias = "random")]
    Show {
        /// Only pick from this category ("all" for every quote)
        #[arg(short, long, default_value = "all")]
        category: String,
    },
    /// List stored quotes
    List {
        /// Only list this category
        #[arg(short, long)]
        category: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List category filter options
    Categories {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export quotes to quotes.json
    Export {
        /// Output file or directory (current directory when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Import quotes from an exported JSON file
    Import {
        /// File to import
        file: PathBuf,
    },
    /// Sync quotes with the server
    Sync,
    /// Run an interactive session with periodic background sync
    Session {
        /// Seconds between automatic syncs
        #[arg(long, value_name = "SECS")]
        interval_secs: Option<u64>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
