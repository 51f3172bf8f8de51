pub mod assert;
pub mod seed;

use crate::DbPool;
use actix_web::{error::BlockingError, web};
use anyhow::{anyhow, Context};
use diesel::{
    connection::SimpleConnection,
    r2d2::{self as diesel_r2d2, ConnectionManager, CustomizeConnection},
    SqliteConnection,
};
use r2d2::PooledConnection;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Per-connection pragmas: enforce foreign keys, wait on a locked database
/// instead of failing immediately.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, diesel_r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel_r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(diesel_r2d2::Error::QueryError)
    }
}

pub fn build_pool(database_url: &str, max_size: u32) -> anyhow::Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    r2d2::Pool::builder()
        .max_size(max_size)
        .connection_customizer(Box::new(ConnectionOptions))
        .build(manager)
        .context("Failed to create pool")
}

/// Creates every table and index that does not exist yet.
pub fn init_schema(conn: &SqliteConnection) -> anyhow::Result<()> {
    conn.batch_execute(SCHEMA_SQL)
        .context("Failed to create database schema")
}

pub fn get_db_conn(
    pool: &web::Data<DbPool>,
) -> anyhow::Result<PooledConnection<ConnectionManager<SqliteConnection>>> {
    pool.get().context("DB connection")
}

/// Runs `f` on a pooled connection off the async executor. Typed errors raised
/// inside `f` come back unwrapped so the response layer can still classify them.
pub async fn with_conn<F, T>(pool: &web::Data<DbPool>, f: F) -> anyhow::Result<T>
where
    F: FnOnce(&SqliteConnection) -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let conn = get_db_conn(pool)?;
    run_blocking(move || f(&conn)).await
}

/// `web::block` for work that reports through `anyhow`.
pub async fn run_blocking<F, T>(f: F) -> anyhow::Result<T>
where
    F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    match web::block(f).await {
        Ok(value) => Ok(value),
        Err(BlockingError::Error(err)) => Err(err),
        Err(BlockingError::Canceled) => Err(anyhow!("Blocking task canceled")),
    }
}

#[cfg(test)]
pub fn memory_conn() -> SqliteConnection {
    use diesel::Connection;

    let conn = SqliteConnection::establish(":memory:").unwrap();
    conn.batch_execute("PRAGMA foreign_keys = ON;").unwrap();
    init_schema(&conn).unwrap();
    conn
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_is_idempotent() {
        let conn = memory_conn();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();
    }
}
