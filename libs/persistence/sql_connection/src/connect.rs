use std::time::Duration;

use deadpool_postgres::{
    Manager, ManagerConfig, Object, Pool, PoolError, RecyclingMethod,
};
use tokio_postgres::NoTls;
use tracing::{debug, info, instrument, warn};

use crate::config::{DbConnectConfig, DbOptionsConfig};

/// Handle to the primary connection pool. Cheap to clone.
#[derive(Debug, Clone)]
pub struct SqlConnect {
    pool: Pool,
}

impl SqlConnect {
    pub fn new(pool: Pool) -> Self { Self { pool } }

    pub fn pool(&self) -> &Pool { &self.pool }

    pub async fn get_client(&self) -> Result<Object, PoolError> {
        self.pool.get().await
    }

    /// Get pool statistics for monitoring
    pub fn get_pool_status(&self) -> (usize, usize) {
        let status = self.pool.status();
        (status.available, status.size)
    }
}

/// Opens up to `count` connections and holds them together so each one is
/// distinct, then hands them back to the pool. Stops at the first failure.
/// Returns how many connections were opened.
async fn prewarm_pool(pool: &Pool, count: u32) -> usize {
    let target = (count as usize).min(pool.status().max_size);
    let mut held = Vec::with_capacity(target);

    while held.len() < target {
        match pool.get().await {
            Ok(client) => held.push(client),
            Err(err) => {
                warn!(error = %err, opened = held.len(), "Stopped pre-warming pool");
                break;
            }
        }
    }

    debug!("Pre-warmed {}/{} connections", held.len(), target);
    held.len()
}

/// Builds the pool described by `config`.
///
/// Connections are opened lazily unless `min_conn` asks for pre-warming, so
/// an unreachable database only surfaces on first use.
#[instrument(skip_all, name = "connect-pgsql")]
pub async fn connect_postgres_db<C>(config: &C) -> Result<SqlConnect, anyhow::Error>
where
    C: DbConnectConfig + DbOptionsConfig,
{
    let pg_config = config.uri().parse::<tokio_postgres::Config>()?;

    info!(
        postgres.hosts = ?pg_config.get_hosts(),
        postgres.dbname = ?pg_config.get_dbname(),
        postgres.max_conn = ?config.max_conn(),
        postgres.min_conn = ?config.min_conn(),
        postgres.sql_logger = config.sql_logger()
    );

    let mgr_config = ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    };
    let mgr = Manager::from_config(pg_config, NoTls, mgr_config);

    let mut pool_builder = Pool::builder(mgr)
        .runtime(deadpool_postgres::Runtime::Tokio1) // Required for timeout support
        .wait_timeout(Some(Duration::from_millis(2000)))
        .create_timeout(Some(Duration::from_millis(5000)))
        .recycle_timeout(Some(Duration::from_millis(100)));

    if let Some(max_conn) = config.max_conn() {
        pool_builder = pool_builder.max_size(max_conn as usize);
    }

    let pool = pool_builder.build()?;

    if let Some(min_conn) = config.min_conn() {
        let opened = prewarm_pool(&pool, min_conn).await;
        info!("Connection pool ready with {} pre-warmed connections", opened);
    }

    Ok(SqlConnect::new(pool))
}
