use std::env;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sql_connection::{
    Migration, PostgresDbConfig, SqlMigrator, connect_postgres_db,
};
use tracing::{Level, info};

#[derive(Parser)]
#[command(name = "migrator")]
#[command(about = "Applies the Chirpy database schema")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(long, help = "Database URL (or use DB_URL env var)")]
    database_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all pending migrations (default)
    Up,

    /// List migrations and whether they have been applied
    Status,
}

fn migrations() -> Vec<Migration> {
    vec![Migration {
        name: "001_create_users",
        sql: include_str!(
            "../../../domains/users/migrations/sql/001_create_users.sql"
        ),
    }]
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let cli = Cli::parse();

    let database_url = match cli.database_url {
        Some(url) => url,
        None => env::var("DB_URL")
            .context("pass --database-url or set DB_URL")?,
    };

    let config = PostgresDbConfig {
        max_conn: Some(2),
        min_conn: Some(1),
        ..PostgresDbConfig::new(database_url)
    };

    let db = connect_postgres_db(&config).await?;
    info!("Connected to database successfully");

    let migrator = SqlMigrator::new(db, migrations());

    match cli.command.unwrap_or(Commands::Up) {
        Commands::Up => {
            info!("Running all pending migrations...");
            let applied = migrator.run_all_migrations().await?;
            if applied.is_empty() {
                info!("Database is up to date");
            }
            else {
                for name in applied {
                    info!("  ✓ {}", name);
                }
                info!("✓ All migrations completed successfully");
            }
        }
        Commands::Status => {
            for (name, applied) in migrator.status().await? {
                if applied {
                    info!("  ✓ {}", name);
                }
                else {
                    info!("  ✗ {} (pending)", name);
                }
            }
        }
    }

    Ok(())
}
