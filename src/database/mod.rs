use crate::errors::{DbError, DbResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Build the SQLite connection pool.
///
/// Every repository call checks a connection out of this pool for the duration
/// of a single statement, so no session state is shared across concurrent
/// orchestration calls.
pub async fn init_pool(db_url: &str) -> DbResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(db_url)
        .map_err(|e| DbError::ConnectionPool(e.to_string()))?
        .create_if_missing(true)
        .foreign_keys(true);

    // An in-memory SQLite database exists per connection; a pool larger than
    // one would hand out empty databases after the migrated connection.
    let max_connections = if db_url.contains(":memory:") { 1 } else { 5 };

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .map_err(|e| DbError::ConnectionPool(e.to_string()))
}
