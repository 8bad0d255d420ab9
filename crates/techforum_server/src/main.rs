//! TechForum API server entrypoint.

use techforum_core::db::backup::BackupManager;
use techforum_core::seed::seed_default_categories;
use techforum_core::DEFAULT_PORT;
use techforum_server::{config::Config, db::Database, serve_router, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct CliFlags {
    help: bool,
    backup: bool,
    seed: bool,
}

fn parse_cli_flags(args: &[String]) -> anyhow::Result<CliFlags> {
    let mut flags = CliFlags::default();
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--help" => flags.help = true,
            "--backup" => flags.backup = true,
            "--seed" => flags.seed = true,
            value if value.starts_with('-') => {
                anyhow::bail!(
                    "Unknown option: '{}'. Use --help to see supported options.",
                    value
                );
            }
            value => {
                anyhow::bail!(
                    "Unexpected positional argument: '{}'. Use --help to see supported options.",
                    value
                );
            }
        }
    }
    Ok(flags)
}

fn runs_maintenance_mode(flags: CliFlags) -> bool {
    flags.backup || flags.seed
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "techforum=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let cli_flags = parse_cli_flags(&args)?;

    if cli_flags.help {
        print_help();
        return Ok(());
    }

    let config = Config::from_env();

    // Backups copy the file, so they run before anything opens it.
    if cli_flags.backup {
        run_backup(&config)?;
    }
    if cli_flags.seed {
        let database = Database::new(&config.db_path)?;
        let inserted = seed_default_categories(&database)?;
        println!("Seeded {} categories", inserted);
    }
    if runs_maintenance_mode(cli_flags) {
        return Ok(());
    }

    if config.auto_backup {
        if let Err(err) = BackupManager::new(&config.db_path).create_backup() {
            tracing::warn!("Failed to create auto-backup: {}", err);
        }
    }

    let database = Database::new(&config.db_path)?;
    let allow_public = config.allow_public_access;
    let bind_addr = techforum_server::resolve_bind_address(&config, allow_public);
    let state = AppState::new(config, database);

    if allow_public {
        tracing::warn!("Public access enabled - server will accept requests from any origin");
    }
    if !bind_addr.ip().is_loopback() {
        tracing::warn!(
            "Binding to non-localhost address: {} - ensure proper security measures are in place",
            bind_addr
        );
    }

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    let actual_addr = listener.local_addr().unwrap_or(bind_addr);
    tracing::info!("TechForum API running at http://{}", actual_addr);

    serve_router(listener, state, allow_public, shutdown_signal()).await?;
    tracing::info!("Server stopped");
    Ok(())
}

fn print_help() {
    println!("TechForum API Server\n");
    println!("Usage: techforum [OPTIONS]\n");
    println!("Options:");
    println!("  --backup          Create a backup of the database and exit");
    println!("  --seed            Insert the default categories into an empty database and exit");
    println!("  --help            Show this help message");
    println!("\nEnvironment variables:");
    println!("  DB_PATH           Database directory (default: ~/.cache/techforum/db)");
    println!("  PORT              Server port (default: {})", DEFAULT_PORT);
    println!("  MAX_BODY_SIZE     Maximum request body size in bytes (default: 10MB)");
    println!("  AUTO_BACKUP       Back up the database on startup");
    println!("  ALLOW_PUBLIC_ACCESS  Allow CORS from any origin and non-loopback binds");
    println!("  CORS_ORIGINS      Comma-separated allowed origins (default: http://localhost:3000)");
    println!(
        "  BIND              Override bind address (e.g. 0.0.0.0:{})",
        DEFAULT_PORT
    );
}

fn run_backup(config: &Config) -> anyhow::Result<()> {
    let backup_path = BackupManager::new(&config.db_path).create_backup()?;
    if backup_path.is_empty() {
        println!("No existing database to backup");
    } else {
        println!("Database backed up to: {}", backup_path);
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
