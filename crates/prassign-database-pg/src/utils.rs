//! Throwaway databases for the storage conformance suite.
//!
//! Helpers panic on failure: they only run inside tests.

use prassign_config::Config;
use sqlx::{postgres::PgPoolOptions, Connection, PgConnection, PgPool};
use tracing::debug;

use crate::run_migrations;

/// Maintenance database used to create and drop per-test databases.
const MAINTENANCE_DB: &str = "postgres";

async fn connect(base_url: &str, db_name: &str) -> PgConnection {
    PgConnection::connect(&create_db_url(base_url, db_name))
        .await
        .unwrap_or_else(|e| panic!("cannot connect to database {db_name}: {e}"))
}

/// Pool on a per-test database, sized from the storage config.
pub async fn create_db_pool_connection(config: &Config, base_url: &str, db_name: &str) -> PgPool {
    PgPoolOptions::new()
        .max_connections(config.database.pg.pool_size)
        .connect(&create_db_url(base_url, db_name))
        .await
        .unwrap_or_else(|e| panic!("cannot open pool on {db_name}: {e}"))
}

async fn drop_test_database(admin: &mut PgConnection, db_name: &str) {
    // Leftover pools from an aborted run would block the drop.
    sqlx::query(
        r#"
        SELECT pg_terminate_backend(pid)
        FROM pg_stat_activity
        WHERE datname = $1
        AND pid <> pg_backend_pid()
    "#,
    )
    .bind(db_name)
    .execute(&mut *admin)
    .await
    .unwrap();

    sqlx::query(&format!(r#"DROP DATABASE IF EXISTS "{db_name}""#))
        .execute(&mut *admin)
        .await
        .unwrap();
}

/// Strip the database name from a Postgres URL.
pub fn get_base_url(url: &str) -> String {
    url.split('/').take(3).collect::<Vec<_>>().join("/")
}

pub fn create_db_url(base_url: &str, db_name: &str) -> String {
    format!("{base_url}/{db_name}")
}

/// Recreate an empty database with the reviewer assignment schema applied.
pub async fn setup_test_db(base_url: &str, db_name: &str) {
    debug!(db_name = db_name, message = "Recreating test database");

    let mut admin = connect(base_url, MAINTENANCE_DB).await;
    drop_test_database(&mut admin, db_name).await;
    sqlx::query(&format!(r#"CREATE DATABASE "{db_name}""#))
        .execute(&mut admin)
        .await
        .unwrap();
    admin.close().await.unwrap();

    let mut conn = connect(base_url, db_name).await;
    run_migrations(&mut conn).await.unwrap();
    conn.close().await.unwrap();
}

pub async fn teardown_test_db(base_url: &str, db_name: &str) {
    debug!(db_name = db_name, message = "Dropping test database");

    let mut admin = connect(base_url, MAINTENANCE_DB).await;
    drop_test_database(&mut admin, db_name).await;
}
