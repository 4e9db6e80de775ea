use std::sync::Arc;

use clap::Parser;
use scribe_core::{MemoryNoteStore, NoteStore, ScribeConfig, StaticCredentials, YandexSpeller};
use tokio::sync::broadcast;
use tracing_subscriber::{fmt, EnvFilter};

use scribe_server::http::{start_http_server, HttpState};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "scribe.toml")]
    config: String,

    /// Check the database connection and exit
    #[arg(long)]
    health: bool,

    /// Keep notes in memory instead of Postgres
    #[arg(long, conflicts_with = "health")]
    memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (dev convenience — production uses real env vars)
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Load config
    let config = match ScribeConfig::load(&args.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", args.config, e);
            std::process::exit(1);
        }
    };

    // Init logging
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    if args.health {
        let pool = match scribe_core::db::create_pool(&config).await {
            Ok(p) => p,
            Err(e) => {
                println!("❌ PostgreSQL connection failed: {}", e);
                std::process::exit(1);
            }
        };
        match scribe_core::db::health_check(&pool).await {
            Ok(v) => println!("✅ PostgreSQL connected: {}", v),
            Err(e) => {
                println!("❌ PostgreSQL health check failed: {}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    let store: Arc<dyn NoteStore> = if args.memory {
        tracing::warn!("Using in-memory note store; notes are lost on exit");
        Arc::new(MemoryNoteStore::new())
    } else {
        match scribe_core::db::open_note_store(&config).await {
            Ok(s) => Arc::new(s),
            Err(e) => {
                tracing::error!("Error initializing database: {}", e);
                std::process::exit(1);
            }
        }
    };

    let speller = YandexSpeller::new(config.spellchecker_url.clone(), config.spellchecker_timeout())?;
    let credentials = StaticCredentials::from_entries(&config.credentials);
    tracing::info!(
        store = store.name(),
        spellchecker = %config.spellchecker_url,
        credentials = credentials.len(),
        "Services initialized"
    );

    let state = Arc::new(HttpState {
        store,
        speller: Arc::new(speller),
        credentials: Arc::new(credentials),
    });

    let (tx, _rx) = broadcast::channel(1);
    let shutdown_tx = tx.clone();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(());
    });

    // A bind or serve failure ends the process with an error.
    if let Err(e) = start_http_server(state, config.server_port, tx.subscribe()).await {
        tracing::error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}
