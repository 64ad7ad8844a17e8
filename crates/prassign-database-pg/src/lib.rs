//! PostgreSQL storage for teams, users, pull requests and reviewer slots.

mod fields;
mod postgres;
mod row;
mod utils;

use std::{ops::Deref, time::Duration};

use prassign_config::Config;
use prassign_database_interface::{DatabaseError, Result};
use sqlx::{migrate::Migrate, postgres::PgPoolOptions, Acquire};
use tracing::info;

pub type DbPool = sqlx::postgres::PgPool;
pub use postgres::PostgresDb;
pub use utils::{
    create_db_pool_connection, create_db_url, get_base_url, setup_test_db, teardown_test_db,
};

/// Apply the embedded schema, including the `pr_reviewers` guard trigger.
pub async fn run_migrations<'a, A>(migrator: A) -> Result<()>
where
    A: Acquire<'a>,
    <A::Connection as Deref>::Target: Migrate,
{
    let migrations = sqlx::migrate!("./migrations");
    info!(
        known_migrations = migrations.iter().count(),
        message = "Applying reviewer assignment schema"
    );

    migrations
        .run(migrator)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })
}

/// Open the connection pool used by the server and the CLI.
///
/// `connection_timeout` bounds how long a request waits for a free connection.
pub async fn establish_pool_connection(config: &Config) -> Result<DbPool> {
    let pg = &config.database.pg;
    info!(
        pool_size = pg.pool_size,
        connection_timeout = pg.connection_timeout,
        message = "Connecting to reviewer assignment database"
    );

    PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(pg.connection_timeout.into()))
        .max_connections(pg.pool_size)
        .connect(&pg.url)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })
}
