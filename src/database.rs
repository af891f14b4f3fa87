use color_eyre::{Result, eyre::Context};
use migration::MigratorTrait;
use sea_orm::{
    ConnectOptions, Database as SeaDatabase, DatabaseConnection, DatabaseTransaction,
    TransactionError, TransactionTrait,
};
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::time::Duration;

use crate::services::error::{ListingError, ListingResult};

pub struct Database {
    pub conn: DatabaseConnection,
}

impl Database {
    /// Open or create a database at the given path
    pub async fn open(path: &Path) -> Result<Self> {
        log::debug!("Opening database at: {}", path.display());

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).wrap_err_with(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }

        let url = format!("sqlite://{}?mode=rwc", path.display());

        // sqlx turns on `PRAGMA foreign_keys` for every pooled sqlite connection
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(16)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(8))
            .acquire_timeout(Duration::from_secs(8))
            .idle_timeout(Duration::from_secs(60))
            .sqlx_logging(false);

        let conn = SeaDatabase::connect(opt)
            .await
            .wrap_err_with(|| format!("Failed to open database: {}", path.display()))?;

        let database = Database { conn };
        database.migrate().await?;

        log::info!("Database ready at: {}", path.display());
        Ok(database)
    }

    /// Apply any pending migrations
    pub async fn migrate(&self) -> Result<()> {
        log::debug!("Running database migrations");
        migration::Migrator::up(&self.conn, None)
            .await
            .wrap_err("Failed to run database migrations")
    }

    /// Run `callback` inside a transaction scoped to a single request.
    ///
    /// Commits when the callback succeeds and rolls back when it fails; either way the
    /// connection goes back to the pool before this returns.
    pub async fn transaction<F, T>(&self, callback: F) -> ListingResult<T>
    where
        F: for<'c> FnOnce(
                &'c DatabaseTransaction,
            )
                -> Pin<Box<dyn Future<Output = ListingResult<T>> + Send + 'c>>
            + Send,
        T: Send,
    {
        self.conn
            .transaction(callback)
            .await
            .map_err(|err| match err {
                TransactionError::Connection(db_err) => ListingError::from(db_err),
                TransactionError::Transaction(err) => err,
            })
    }
}
