// src/main.rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gourmet::server::{GourmetConfig, ServerConfig};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "gourmet")]
#[command(author, version, about = "Recipe catalog web service with token-authenticated JSON API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the gourmet database
    Init {
        /// Database path (default: /var/lib/gourmet/gourmet.db)
        #[arg(short, long, default_value = "/var/lib/gourmet/gourmet.db")]
        db_path: String,
    },
    /// Run the HTTP API server
    Serve {
        /// Configuration file path
        #[arg(short, long, default_value = "/etc/gourmet/gourmet.toml")]
        config: String,
        /// Bind address (overrides config)
        #[arg(short, long)]
        bind: Option<String>,
        /// Database path (overrides config)
        #[arg(short, long)]
        db_path: Option<String>,
    },
}

/// Build the effective server configuration from the config file and
/// command-line overrides
fn resolve_server_config(
    config_path: &str,
    bind: Option<String>,
    db_path: Option<String>,
) -> Result<ServerConfig> {
    let file_config = if Path::new(config_path).exists() {
        GourmetConfig::load(Path::new(config_path))?
    } else {
        info!("Config file {} not found, using defaults", config_path);
        GourmetConfig::new()
    };

    let mut server_config = file_config.to_server_config()?;

    if let Some(bind) = bind {
        server_config.bind_addr = bind
            .parse()
            .with_context(|| format!("Invalid bind address: {}", bind))?;
    }
    if let Some(db_path) = db_path {
        server_config.db_path = PathBuf::from(db_path);
    }

    Ok(server_config)
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init { db_path }) => {
            info!("Initializing gourmet database at: {}", db_path);
            gourmet::db::init(&db_path)?;
            println!("Database initialized successfully at: {}", db_path);
            Ok(())
        }
        Some(Commands::Serve {
            config,
            bind,
            db_path,
        }) => {
            let server_config = resolve_server_config(&config, bind, db_path)?;

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(gourmet::server::run_server(server_config))
        }
        None => {
            // No command provided, show help
            println!("Gourmet Recipe Catalog v{}", env!("CARGO_PKG_VERSION"));
            println!("Run 'gourmet --help' for usage information");
            Ok(())
        }
    }
}
