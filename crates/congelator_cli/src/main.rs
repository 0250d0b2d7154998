//! Congelator CLI
//!
//! Command-line client for a freezer inventory kept in a remote JSON
//! document.
//!
//! # Commands
//!
//! - `setup` - Create a document or connect to an existing one
//! - `check` - Probe the configured document
//! - `set-credential` / `forget` - Manage the stored session
//! - `list`, `add`, `remove` - Work with items
//! - `log`, `stats` - Inspect history and totals
//! - `export` - Write the item backup or the history file

mod app;
mod commands;

use app::{default_home, default_user, App, CliResult};
use clap::{Parser, Subcommand};
use commands::export::ExportKind;
use congelator_sync::{AuthScheme, ClientConfig, ErrorKind, SyncError, DEFAULT_BASE_URL};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Freezer inventory synchronized through a remote JSON document.
#[derive(Parser)]
#[command(name = "congelator")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the session record
    #[arg(global = true, long, env = "CONGELATOR_HOME")]
    home: Option<PathBuf>,

    /// Collection URL of the storage service
    #[arg(global = true, long, env = "CONGELATOR_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Send the credential as a bearer token instead of `?apiKey=`
    #[arg(global = true, long)]
    bearer: bool,

    /// Name recorded in the history
    #[arg(global = true, short, long, env = "CONGELATOR_USER")]
    user: Option<String>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new document, or connect to an existing one
    Setup {
        /// Write credential (API key)
        #[arg(short, long)]
        credential: String,

        /// Connect to this existing document instead of creating one
        #[arg(short, long)]
        document_id: Option<String>,

        /// Seed a new document with a few example items
        #[arg(long, conflicts_with = "document_id")]
        with_samples: bool,
    },

    /// Check that the configured document is reachable
    Check,

    /// Replace the stored credential, keeping the document
    SetCredential {
        /// New write credential
        credential: String,
    },

    /// Forget the stored session
    Forget,

    /// List items
    List {
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,

        /// Only this location
        #[arg(short, long)]
        location: Option<String>,

        /// Only items past the freshness horizon
        #[arg(short, long)]
        expired: bool,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Add an item
    Add {
        /// Item label
        name: String,

        /// Category
        #[arg(short, long)]
        category: String,

        /// Storage location
        #[arg(short, long, default_value = "Freezer")]
        location: String,
    },

    /// Remove an item by id (or unique id prefix)
    Remove {
        /// Item id
        id: String,
    },

    /// Show the history, newest first
    Log {
        /// Maximum number of entries
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show totals per category and location
    Stats {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Export items or history to a file
    Export {
        /// What to export
        #[arg(value_enum)]
        what: ExportKind,

        /// Destination file (`-` for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", report(err.as_ref()));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult {
    let auth = if cli.bearer {
        AuthScheme::Bearer
    } else {
        AuthScheme::QueryApiKey
    };
    let app = App {
        home: cli.home.unwrap_or_else(default_home),
        client: ClientConfig::new(cli.base_url).with_auth(auth),
        user: cli.user.unwrap_or_else(default_user),
    };

    match cli.command {
        Commands::Setup {
            credential,
            document_id,
            with_samples,
        } => commands::setup::run(&app, &credential, document_id.as_deref(), with_samples).await,
        Commands::Check => commands::session::check(&app).await,
        Commands::SetCredential { credential } => commands::session::set_credential(&app, &credential),
        Commands::Forget => commands::session::forget(&app),
        Commands::List {
            category,
            location,
            expired,
            format,
        } => {
            commands::list::run(
                &app,
                category.as_deref(),
                location.as_deref(),
                expired,
                &format,
            )
            .await
        }
        Commands::Add {
            name,
            category,
            location,
        } => commands::add::run(&app, &name, &category, &location).await,
        Commands::Remove { id } => commands::remove::run(&app, &id).await,
        Commands::Log { limit, format } => commands::log::run(&app, limit, &format).await,
        Commands::Stats { format } => commands::stats::run(&app, &format).await,
        Commands::Export { what, output } => commands::export::run(&app, what, output).await,
    }
}

/// One-line banner for a failed command, with a remedy where one exists.
fn report(err: &(dyn std::error::Error + 'static)) -> String {
    let Some(sync) = err.downcast_ref::<SyncError>() else {
        return format!("error: {err}");
    };
    let hint = match (sync, sync.kind()) {
        (SyncError::NotConfigured, _) | (_, ErrorKind::NotFound) => {
            Some("run `congelator setup` to choose a document")
        }
        (_, ErrorKind::AuthFailed) => Some("rotate it with `congelator set-credential`"),
        (_, ErrorKind::Transient) => Some("the service is unreachable, try again later"),
        (_, ErrorKind::MalformedDocument) => {
            Some("the remote document is corrupted and was left untouched")
        }
        _ => None,
    };
    match hint {
        Some(hint) => format!("error: {sync} ({hint})"),
        None => format!("error: {sync}"),
    }
}
