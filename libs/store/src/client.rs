use std::path::Path;
use std::str::FromStr;

use eyre::Result;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

#[derive(Clone)]
pub struct Client {
    pool: SqlitePool,
}

impl Client {
    pub async fn new(options: SqliteConnectOptions, max_connections: u32) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            // an in-memory database lives as long as its connection
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Connects using a `sqlite:` URL and creates the tables.
    ///
    /// `sqlite::memory:` databases are private to a connection, so they get a single one.
    pub async fn init(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

        Client::new(options, max_connections).await?.migrate().await
    }

    /// Opens (or creates) the database file at `path` in WAL mode and creates the tables.
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        Client::new(options, 5).await?.migrate().await
    }

    async fn migrate(self) -> Result<Self> {
        // Run migrations or create tables on startup
        sqlx::raw_sql(include_str!("../resources/create_tables.sql")).execute(self.pool()).await?;

        Ok(self)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
