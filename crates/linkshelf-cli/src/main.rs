//! linkshelf CLI
//!
//! Command-line interface for linkshelf - bookmarks grouped by category.

use std::fs::File;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use linkshelf_core::{Config, StorageError, Store, FALLBACK_CATEGORY};

mod commands;
mod metadata;
mod output;
mod prompt;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "linkshelf")]
#[command(about = "linkshelf - Save links under named categories")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save a new bookmark
    #[command(alias = "new")]
    Add {
        /// URL to save
        url: String,
        /// Title (fetched from the page if omitted)
        #[arg(short, long)]
        title: Option<String>,
        /// Category to file it under
        #[arg(short, long, default_value = FALLBACK_CATEGORY)]
        category: String,
    },
    /// List bookmarks grouped by category
    #[command(alias = "ls")]
    List {
        /// Only show this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show bookmark details
    Show {
        /// Bookmark ID (full or prefix)
        id: String,
    },
    /// Open a bookmark in the default browser
    Open {
        /// Bookmark ID (full or prefix)
        id: String,
    },
    /// Print a bookmark's URL (pipe into a clipboard tool to copy)
    #[command(alias = "copy")]
    Url {
        /// Bookmark ID (full or prefix)
        id: String,
    },
    /// Delete a bookmark
    #[command(alias = "rm")]
    Delete {
        /// Bookmark ID (full or prefix)
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Manage categories
    Category {
        #[command(subcommand)]
        command: Option<CategoryCommands>,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Show storage location and counts
    Status,
}

#[derive(Subcommand)]
enum CategoryCommands {
    /// List categories with bookmark counts
    #[command(alias = "ls")]
    List,
    /// Add a category
    Add {
        /// Category name
        name: String,
    },
    /// Delete a category; its bookmarks move to "General"
    #[command(alias = "rm")]
    Delete {
        /// Category name
        name: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, log_file, log_level)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    let result = run(cli, &output).await;

    if let Err(ref e) = result {
        let hint = e
            .chain()
            .find_map(|cause| cause.downcast_ref::<StorageError>())
            .and_then(StorageError::recovery_suggestion);
        if let Some(hint) = hint {
            eprintln!("hint: {}", hint);
        }
    }

    result
}

async fn run(cli: Cli, output: &Output) -> Result<()> {
    let config_path = cli.config.as_ref();

    // Config commands work even when the config file is broken
    if let Commands::Config { command } = &cli.command {
        return match command.clone() {
            Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
            Some(ConfigCommands::Set { key, value }) => {
                commands::config::set(key, value, config_path, output)
            }
        };
    }

    let config = Config::load_with_cli_override(config_path)?;
    init_logging(&config, cli.verbose);

    debug!("Using data directory {:?}", config.data_dir);
    let mut store = Store::open(config.storage());

    match cli.command {
        Commands::Add {
            url,
            title,
            category,
        } => commands::bookmark::add(&mut store, url, title, category, output).await,
        Commands::List { category } => commands::bookmark::list(&store, category, output),
        Commands::Show { id } => commands::bookmark::show(&store, id, output),
        Commands::Open { id } => commands::bookmark::open(&store, id, output),
        Commands::Url { id } => commands::bookmark::url(&store, id),
        Commands::Delete { id, yes } => commands::bookmark::delete(&mut store, id, yes, output),
        Commands::Category { command } => match command {
            Some(CategoryCommands::List) | None => commands::category::list(&store, output),
            Some(CategoryCommands::Add { name }) => {
                commands::category::add(&mut store, name, output)
            }
            Some(CategoryCommands::Delete { name, yes }) => {
                commands::category::delete(&mut store, name, yes, output)
            }
        },
        Commands::Status => commands::status::show(&store, output),
        Commands::Config { .. } => Ok(()),
    }
}

/// Initialize tracing
///
/// `RUST_LOG` wins over the configured level; `--verbose` forces debug.
/// Logs go to the configured file, or stderr when none is set.
fn init_logging(config: &Config, verbose: bool) {
    let level = if verbose { "debug" } else { config.log_level() };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("linkshelf_core={},linkshelf={}", level, level))
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false);

    // Ignore error if already initialized
    match &config.log_file {
        Some(path) => match File::create(path) {
            Ok(file) => {
                let _ = builder.with_ansi(false).with_writer(file).try_init();
            }
            Err(e) => {
                eprintln!("Warning: Could not create log file {:?}: {}", path, e);
                let _ = builder.with_writer(std::io::stderr).try_init();
            }
        },
        None => {
            let _ = builder.with_writer(std::io::stderr).try_init();
        }
    }
}
