//! district-news - Cached district-level news lookup service
//!
//! Main entry point for the district-news binary.

use clap::{Parser, Subcommand};
use district_news::config::ServiceConfig;
use district_news::languages::LanguageTable;
use district_news::provider::NewsDataClient;
use district_news::server::NewsServer;
use district_news::service::NewsService;
use district_news::store::{MemoryStore, NewsStore, SqliteStore};
use district_news::NewsError;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

/// district-news - 24h-cached news lookups per Indian state and district
#[derive(Parser, Debug)]
#[command(name = "district-news")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: ~/.config/district-news/config.yaml)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default configuration file
    Init,

    /// Run the HTTP server
    Serve {
        /// Bind address (overrides config)
        #[arg(short, long)]
        bind: Option<String>,

        /// Use a volatile in-memory cache instead of SQLite
        #[arg(long)]
        memory: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize logging
    if let Err(e) = district_news::logging::init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> district_news::Result<()> {
    let config_path = cli
        .config
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(ServiceConfig::default_path);

    match cli.command {
        Commands::Init => handle_init_command(&config_path),
        Commands::Serve { bind, memory } => handle_serve_command(&config_path, bind, memory).await,
    }
}

fn handle_init_command(config_path: &Path) -> district_news::Result<()> {
    if config_path.exists() {
        return Err(NewsError::Config(format!(
            "Config file already exists: {}",
            config_path.display()
        )));
    }

    let config = ServiceConfig::default();
    config.save(config_path)?;

    println!("Created {}", config_path.display());
    println!(
        "Set your API key there, or export {} when serving.",
        district_news::config::API_KEY_ENV
    );
    Ok(())
}

async fn handle_serve_command(
    config_path: &Path,
    bind: Option<String>,
    memory: bool,
) -> district_news::Result<()> {
    let mut config = ServiceConfig::load_or_default(config_path)?;
    if let Some(bind) = bind {
        config.bind = bind;
    }

    let provider = NewsDataClient::from_config(&config)?;

    let store: Arc<dyn NewsStore> = if memory {
        tracing::warn!("Using in-memory cache; entries are lost on restart");
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(SqliteStore::open(&config.db_path)?)
    };

    let service = NewsService::new(
        store,
        Arc::new(provider),
        LanguageTable::new(),
        config.ttl_ms,
    );

    NewsServer::new(service)
        .run(&config.bind)
        .await
        .map_err(|e| NewsError::Other(e.to_string()))
}
