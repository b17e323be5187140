use crate::config::DatabaseConfig;
use anyhow::Context;
use sqlx::{Pool, Sqlite, sqlite::SqlitePoolOptions};

#[derive(Clone)]
pub struct Database {
    pub(crate) pool: Pool<Sqlite>,
}

/// Common methods for the primary database, extensions are implemented separately in every module.
impl Database {
    /// Opens database "connection" pool and applies pending migrations.
    #[cfg(test)]
    pub async fn open<I: FnOnce() -> anyhow::Result<String>>(
        initializer: I,
    ) -> anyhow::Result<Self> {
        Self::open_with_pool_size(&initializer()?, DatabaseConfig::default().max_connections)
            .await
    }

    /// Opens database using the connection parameters from the config.
    pub async fn open_with_config(config: &DatabaseConfig) -> anyhow::Result<Self> {
        Self::open_with_pool_size(&config.url, config.max_connections).await
    }

    async fn open_with_pool_size(url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .with_context(|| "Failed to connect to the database")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .with_context(|| "Failed to migrate database")?;

        Ok(Database { pool })
    }
}

impl AsRef<Database> for Database {
    fn as_ref(&self) -> &Self {
        self
    }
}
