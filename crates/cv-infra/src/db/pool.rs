use std::time::Duration;

use anyhow::{Context, Result};
use cv_core::PhotoStoreConfig;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::info;

/// Embed all diesel migrations at compile time
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Page size used for new databases; the quota is expressed in pages of this size.
pub const SQLITE_PAGE_SIZE: u64 = 4096;

/// Type alias for SQLite connection pool
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

#[derive(Debug, Clone)]
pub struct SqlitePoolOptions {
    pub database_url: String,
    pub max_size: u32,
    pub connection_timeout: Duration,
    /// Storage budget in bytes, enforced through `PRAGMA max_page_count`.
    pub quota_bytes: Option<u64>,
}

impl SqlitePoolOptions {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: 4,
            connection_timeout: Duration::from_secs(5),
            quota_bytes: None,
        }
    }

    pub fn from_config(config: &PhotoStoreConfig) -> Self {
        Self {
            database_url: config.database_path.to_string_lossy().into_owned(),
            max_size: config.pool_size.max(1),
            connection_timeout: Duration::from_secs(config.connect_timeout_secs.max(1)),
            quota_bytes: (config.quota_bytes > 0).then_some(config.quota_bytes),
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_url == ":memory:"
    }

    fn max_page_count(&self) -> Option<u64> {
        self.quota_bytes
            .map(|bytes| (bytes / SQLITE_PAGE_SIZE).max(1))
    }
}

/// Per-connection pragmas, applied every time the pool hands out a new connection.
#[derive(Debug)]
struct SqlitePragmas {
    max_page_count: Option<u64>,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        let mut pragmas = format!(
            "PRAGMA page_size = {}; PRAGMA busy_timeout = 5000;",
            SQLITE_PAGE_SIZE
        );
        if let Some(pages) = self.max_page_count {
            pragmas.push_str(&format!(" PRAGMA max_page_count = {};", pages));
        }
        conn.batch_execute(&pragmas)
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Create a database connection pool with default options and run migrations
pub fn init_db_pool(database_url: &str) -> Result<DbPool> {
    init_db_pool_with(&SqlitePoolOptions::new(database_url))
}

/// Create database connection pool and run migrations
///
/// Responsibilities:
/// - Build r2d2 connection pool with the per-connection pragmas
/// - Automatically run all pending Diesel migrations
///
/// Every connection to `:memory:` opens its own private database, so an
/// in-memory pool is limited to a single, never-recycled connection.
pub fn init_db_pool_with(options: &SqlitePoolOptions) -> Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(options.database_url.as_str());
    let mut builder = Pool::builder().max_size(options.max_size);
    if options.is_in_memory() {
        // The database lives and dies with its only connection.
        builder = builder.max_size(1).idle_timeout(None).max_lifetime(None);
    }

    let pool = builder
        .connection_timeout(options.connection_timeout)
        .connection_customizer(Box::new(SqlitePragmas {
            max_page_count: options.max_page_count(),
        }))
        .build(manager)
        .with_context(|| format!("Failed to create database pool for {}", options.database_url))?;

    run_migrations(&pool)?;

    Ok(pool)
}

/// Run embedded Diesel migrations
fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = pool.get()?;

    info!("Running database migrations...");
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    info!("Database migrations completed");

    Ok(())
}
