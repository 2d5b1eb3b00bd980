//! Database connection management using Diesel ORM.
//!
//! Provides connection pooling, migration support, and connection
//! configuration for SQLite databases.

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::error::{PersistenceError, Result};

/// Embedded database migrations compiled from the migrations/ directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Type alias for a SQLite connection pool.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// A connection checked out of [`DbPool`].
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

#[derive(Debug)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> std::result::Result<(), diesel::r2d2::Error> {
        configure_sqlite_connection(conn).map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Create a connection pool for the given database URL.
///
/// Every pooled connection gets a busy timeout so concurrent writers wait
/// instead of failing with `SQLITE_BUSY`.
///
/// # Errors
/// Returns an error if the pool cannot be created.
pub fn create_pool(database_url: &str) -> Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .max_size(5)
        .connection_customizer(Box::new(SqlitePragmas))
        .build(manager)
        .map_err(|e| PersistenceError::Connection(e.to_string()).into())
}

/// Run all pending database migrations.
///
/// # Errors
/// Returns an error if migrations fail.
pub fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = checkout(pool)?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::Connection(e.to_string()))?;
    Ok(())
}

/// Check a connection out of the pool.
///
/// # Errors
/// Returns [`PersistenceError::Connection`] if no connection is available.
pub fn checkout(pool: &DbPool) -> Result<DbConnection> {
    pool.get()
        .map_err(|e| PersistenceError::Connection(e.to_string()).into())
}

fn configure_sqlite_connection(
    conn: &mut SqliteConnection,
) -> std::result::Result<(), diesel::result::Error> {
    diesel::sql_query("PRAGMA busy_timeout=5000").execute(conn)?;
    Ok(())
}
