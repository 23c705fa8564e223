use std::path::Path;

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

/// Handle to the message store. Cloning is cheap; every clone shares the
/// same connection pool.
#[derive(Clone, Debug)]
pub struct BoardDatabase {
    db: DatabaseConnection,
}

impl BoardDatabase {
    /// Opens (creating if needed) the sqlite file at `path`.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self, DbErr> {
        let database_url = format!("sqlite://{}?mode=rwc", path.as_ref().display());
        let mut options = ConnectOptions::new(database_url);
        options.sqlx_logging(false);
        let db = Database::connect(options).await?;
        Ok(BoardDatabase { db })
    }

    pub async fn new_memory() -> Result<Self, DbErr> {
        // every pooled connection would get its own empty in-memory database
        let mut options = ConnectOptions::new("sqlite::memory:");
        options
            .max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);
        let db = Database::connect(options).await?;
        Ok(BoardDatabase { db })
    }

    /// Brings the schema up to date.
    pub async fn migrate(&self) -> Result<(), DbErr> {
        let pending = Migrator::get_pending_migrations(&self.db).await?.len();
        if pending > 0 {
            info!("Applying {pending} pending migration(s)");
        }
        Migrator::up(&self.db, None).await
    }

    pub fn inner(&self) -> &DatabaseConnection {
        &self.db
    }
}
