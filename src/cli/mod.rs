//! CLI commands for Choco.
//!
//! Runs the search core against a browser snapshot file and a storage
//! directory: one-shot searches, favorites and search engine management,
//! and an interactive popup emulation.

pub mod config;
pub mod engines;
pub mod favorites;
pub mod prefs;
pub mod repl;
pub mod search;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::platform::{BrowserSnapshot, MemoryBrowser, Platform};
use crate::storage::FileStorage;

#[derive(Parser)]
#[command(name = "choco")]
#[command(about = "Quick search across open tabs, bookmarks, history and favorites", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Browser snapshot JSON with tabs, bookmarks and history
    #[arg(long, global = true, value_name = "FILE")]
    pub snapshot: Option<PathBuf>,

    /// Directory holding favorites and preferences
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search every source and print the results
    Search {
        /// Query text
        text: Vec<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesCommands,
    },

    /// Manage search engines
    Engines {
        #[command(subcommand)]
        action: EnginesCommands,
    },

    /// Show or reset the stored preferences
    Prefs {
        #[command(subcommand)]
        action: Option<PrefsCommands>,
    },

    /// Show or write the command line settings
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Interactive search, one query per line
    Repl,
}

#[derive(Subcommand)]
pub enum FavoritesCommands {
    /// List favorites in order
    List,

    /// Add a favorite (moves it to the end if already present)
    Add {
        url: String,

        /// Title (defaults to the URL)
        #[arg(long)]
        title: Option<String>,
    },

    /// Remove a favorite by URL
    Remove { url: String },
}

#[derive(Subcommand)]
pub enum EnginesCommands {
    /// List search engines
    List,

    /// Add a search engine
    Add {
        name: String,

        /// Exact text that selects this engine
        command: String,

        /// URL template containing {keyword}
        url: String,
    },

    /// Remove a search engine by id
    Remove { id: String },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum PrefsCommands {
    /// Print the current preferences as JSON
    Show,

    /// Delete the stored preferences so the defaults apply again
    Reset,

    /// Print the storage file and the keys it holds
    Storage,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the effective settings as TOML
    Show,

    /// Write the effective settings to the config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Everything a command needs: the loaded config, the storage file and the
/// platform built on top of it.
pub struct Context {
    pub config: Config,
    pub storage: Arc<FileStorage>,
    pub browser: Arc<MemoryBrowser>,
    pub platform: Platform,
}

impl Context {
    fn open(cli: &Cli) -> anyhow::Result<Self> {
        let config = Config::load();

        let snapshot = match cli.snapshot.as_ref().or(config.paths.snapshot.as_ref()) {
            Some(path) => BrowserSnapshot::load(path)
                .with_context(|| format!("Failed to load snapshot {}", path.display()))?,
            None => BrowserSnapshot::default(),
        };

        let data_dir = cli
            .data_dir
            .clone()
            .unwrap_or_else(|| config.paths.data_dir.clone());
        let storage = FileStorage::open(&data_dir)
            .with_context(|| format!("Failed to open storage in {}", data_dir.display()))?;
        let storage = Arc::new(storage);

        let browser = Arc::new(MemoryBrowser::new(snapshot));
        let platform = Platform::from_browser(browser.clone(), storage.clone());

        Ok(Self {
            config,
            storage,
            browser,
            platform,
        })
    }
}

/// Parse arguments and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let ctx = Context::open(&cli)?;

    match cli.command {
        Commands::Search { text, json } => search::run(&ctx, &text.join(" "), json).await,
        Commands::Favorites { action } => favorites::run(&ctx, action).await,
        Commands::Engines { action } => engines::run(&ctx, action).await,
        Commands::Prefs { action } => {
            prefs::run(&ctx, action.unwrap_or(PrefsCommands::Show)).await
        }
        Commands::Config { action } => config::run(&ctx, action),
        Commands::Repl => repl::run(&ctx).await,
    }
}
