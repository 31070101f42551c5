pub use config::{DbConnectConfig, DbOptionsConfig, PostgresDbConfig};
pub use connect::{SqlConnect, connect_postgres_db};
pub use deadpool_postgres::PoolError;
pub use migrator::{Migration, SqlMigrator};
pub use tokio_postgres::{Error as PgError, Row, error::SqlState};

pub mod config;
mod connect;
mod migrator;
