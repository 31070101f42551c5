use anyhow::Context;
use tracing::info;

use crate::SqlConnect;

/// A named block of SQL applied once.
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub name: &'static str,
    pub sql: &'static str,
}

/// SQL-based migration system using plain .sql files
pub struct SqlMigrator {
    db: SqlConnect,
    migrations: Vec<Migration>,
}

impl SqlMigrator {
    pub fn new(db: SqlConnect, migrations: Vec<Migration>) -> Self {
        Self { db, migrations }
    }

    /// Applies every pending migration in order, each in its own
    /// transaction. Returns the names that were applied.
    pub async fn run_all_migrations(&self) -> anyhow::Result<Vec<&'static str>> {
        self.create_migration_table().await?;

        let mut applied = Vec::new();
        for migration in &self.migrations {
            if self.is_migration_applied(migration.name).await? {
                info!("Migration {} already applied, skipping", migration.name);
                continue;
            }

            info!("Running migration: {}", migration.name);
            let mut client = self.db.get_client().await?;
            let tx = client.transaction().await?;
            tx.batch_execute(migration.sql).await.with_context(|| {
                format!("Failed to run migration {}", migration.name)
            })?;
            tx.execute(
                "INSERT INTO _migrations (name, applied_at) VALUES ($1, NOW())",
                &[&migration.name],
            )
            .await?;
            tx.commit().await?;

            info!("Migration {} completed successfully", migration.name);
            applied.push(migration.name);
        }

        Ok(applied)
    }

    /// Each known migration paired with whether it has been applied.
    pub async fn status(&self) -> anyhow::Result<Vec<(&'static str, bool)>> {
        self.create_migration_table().await?;

        let mut statuses = Vec::with_capacity(self.migrations.len());
        for migration in &self.migrations {
            let applied = self.is_migration_applied(migration.name).await?;
            statuses.push((migration.name, applied));
        }
        Ok(statuses)
    }

    async fn create_migration_table(&self) -> anyhow::Result<()> {
        let client = self.db.get_client().await?;
        client
            .batch_execute(
                "CREATE TABLE IF NOT EXISTS _migrations (
                     id SERIAL PRIMARY KEY,
                     name VARCHAR(255) NOT NULL UNIQUE,
                     applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                 )",
            )
            .await
            .context("Failed to create migration table")?;
        Ok(())
    }

    async fn is_migration_applied(
        &self, migration_name: &str,
    ) -> anyhow::Result<bool> {
        let client = self.db.get_client().await?;
        let row = client
            .query_one(
                "SELECT COUNT(*) FROM _migrations WHERE name = $1",
                &[&migration_name],
            )
            .await?;
        let count: i64 = row.get(0);
        Ok(count > 0)
    }
}
