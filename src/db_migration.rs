use crate::errors::{DbError, DbResult};
use chrono::Utc;
use sqlx::{query, query_scalar, SqlitePool};

// Embed migration SQL files at compile time
const MIGRATION_INIT: &str = include_str!("../migrations/20250601000000_init.sql");
const MIGRATION_SEED_ROLES: &str = include_str!("../migrations/20250601000001_seed_roles.sql");

// List of migrations with their names and SQL content, applied in order
const MIGRATIONS: &[(&str, &str)] = &[
    ("20250601000000_init.sql", MIGRATION_INIT),
    ("20250601000001_seed_roles.sql", MIGRATION_SEED_ROLES),
];

/// Apply all pending migrations, tracked in a `schema_migrations` table.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    query(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            name TEXT PRIMARY KEY NOT NULL,
            applied_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .map_err(|e| DbError::Migration(format!("Failed to create migrations table: {}", e)))?;

    let applied: Vec<String> = query_scalar("SELECT name FROM schema_migrations")
        .fetch_all(pool)
        .await
        .map_err(|e| DbError::Migration(format!("Failed to read applied migrations: {}", e)))?;

    for (name, sql) in MIGRATIONS {
        if applied.iter().any(|a| a == name) {
            continue;
        }

        log::info!("Applying migration {}", name);

        sqlx::raw_sql(sql)
            .execute(pool)
            .await
            .map_err(|e| DbError::Migration(format!("Migration {} failed: {}", name, e)))?;

        query("INSERT INTO schema_migrations (name, applied_at) VALUES (?, ?)")
            .bind(name)
            .bind(Utc::now().to_rfc3339())
            .execute(pool)
            .await
            .map_err(|e| DbError::Migration(format!("Failed to record migration {}: {}", name, e)))?;
    }

    Ok(())
}
