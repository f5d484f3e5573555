//! `gitsync` CLI entry-point.
//!
//! Available sub-commands:
//! - `serve`   — apply migrations, then start the API server.
//! - `migrate` — apply migrations and exit.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "gitsync",
    about = "Registry of git repositories and their replication targets",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct DatabaseArgs {
    /// SQLite connection string; the file is created if missing.
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://gitsync.db")]
    database_url: String,
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 10)]
    max_connections: u32,
}

#[derive(Subcommand)]
enum Command {
    /// Start the REST API server.
    Serve {
        #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "SERVER_PORT", default_value_t = 8080)]
        port: u16,
        /// Upper bound on the time a single request may take.
        #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
        request_timeout_secs: u64,
        #[command(flatten)]
        database: DatabaseArgs,
    },
    /// Apply database migrations and exit.
    Migrate {
        /// Apply the `*.sql` files in this directory instead of the built-in set.
        #[arg(long)]
        dir: Option<PathBuf>,
        #[command(flatten)]
        database: DatabaseArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            host,
            port,
            request_timeout_secs,
            database,
        } => {
            let pool = db::pool::create_pool(&database.database_url, database.max_connections)
                .await
                .context("failed to connect to database")?;
            db::migrate::run_migrations(&pool)
                .await
                .context("failed to run migrations")?;

            let config = api::ServerConfig::new(
                &host,
                port,
                Duration::from_secs(request_timeout_secs),
            );
            info!("Starting API server on {}", config.bind);
            api::serve(config, pool).await?;
        }
        Command::Migrate { dir, database } => {
            info!("Running migrations against {}", database.database_url);
            let pool = db::pool::create_pool(&database.database_url, database.max_connections)
                .await
                .context("failed to connect to database")?;

            let migrations = match dir {
                Some(dir) => db::migrate::discover(&dir)
                    .with_context(|| format!("failed to load migrations from {}", dir.display()))?,
                None => db::migrate::embedded(),
            };
            let applied = db::migrate::apply(&pool, migrations)
                .await
                .context("migration failed")?;
            info!("Migrations applied successfully ({applied} scripts)");
        }
    }

    Ok(())
}
