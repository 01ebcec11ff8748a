mod models;

pub use models::*;

use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

use crate::error::Error;

pub type DbPool = SqlitePool;

const DATABASE_FILE: &str = "midiatopo.db";

/// Execute a SQL migration file, properly handling comments
async fn execute_sql(pool: &SqlitePool, sql: &str) -> Result<(), Error> {
    for statement in sql.split(';') {
        // Strip SQL comment lines (lines starting with --)
        let cleaned: String = statement
            .lines()
            .filter(|line| !line.trim().starts_with("--"))
            .collect::<Vec<_>>()
            .join("\n");
        let trimmed = cleaned.trim();
        if !trimmed.is_empty() {
            sqlx::query(trimmed).execute(pool).await?;
        }
    }
    Ok(())
}

/// Open (or create) the on-device database and bring its schema up to date.
/// Safe to call on every process start; failures surface as typed errors
/// rather than being logged and swallowed.
pub async fn init(data_dir: &Path) -> Result<DbPool, Error> {
    std::fs::create_dir_all(data_dir)?;

    let db_path = data_dir.join(DATABASE_FILE);
    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    info!("Initializing database at {}", db_path.display());

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    // WAL keeps readers live while the single writer commits
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;
    sqlx::query("PRAGMA synchronous = NORMAL")
        .execute(&pool)
        .await?;

    run_migrations(&pool).await?;

    info!("Database initialized successfully");
    Ok(pool)
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), Error> {
    info!("Running database migrations...");

    // Migration 001: base tables
    execute_sql(pool, include_str!("../../migrations/001_initial.sql")).await?;

    // Migration 002: profile fields added after the first release.
    // Each column is guarded separately so a database left between app
    // versions still converges.
    add_column_if_missing(pool, "users", "telefone", "TEXT").await?;
    add_column_if_missing(pool, "users", "bio", "TEXT").await?;
    add_column_if_missing(pool, "users", "profile_image", "TEXT").await?;

    info!("Migrations completed");
    Ok(())
}

/// Additive column migration: check `pragma_table_info` first instead of
/// attempting the ALTER and discarding the duplicate-column error.
async fn add_column_if_missing(
    pool: &SqlitePool,
    table: &str,
    column: &str,
    decl: &str,
) -> Result<(), Error> {
    let present: Option<(String,)> = sqlx::query_as(&format!(
        "SELECT name FROM pragma_table_info('{table}') WHERE name = ?"
    ))
    .bind(column)
    .fetch_optional(pool)
    .await?;

    if present.is_none() {
        sqlx::query(&format!("ALTER TABLE {table} ADD COLUMN {column} {decl}"))
            .execute(pool)
            .await?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) async fn test_pool() -> DbPool {
    // A single connection is required: every connection to `sqlite::memory:`
    // opens its own database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory database");
    run_migrations(&pool).await.expect("run migrations");
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn column_names(pool: &SqlitePool, table: &str) -> Vec<String> {
        let rows: Vec<(String,)> =
            sqlx::query_as(&format!("SELECT name FROM pragma_table_info('{table}')"))
                .fetch_all(pool)
                .await
                .unwrap();
        rows.into_iter().map(|(name,)| name).collect()
    }

    #[tokio::test]
    async fn test_migrations_create_full_schema() {
        let pool = test_pool().await;

        let users = column_names(&pool, "users").await;
        for col in [
            "id",
            "nome",
            "apelido",
            "email",
            "password",
            "telefone",
            "bio",
            "profile_image",
        ] {
            assert!(users.contains(&col.to_string()), "missing users.{col}");
        }

        let anuncios = column_names(&pool, "anuncios").await;
        for col in ["id", "user_email", "titulo", "status", "views", "created_at"] {
            assert!(anuncios.contains(&col.to_string()), "missing anuncios.{col}");
        }
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let pool = test_pool().await;

        // A second and third run must not error or duplicate columns
        run_migrations(&pool).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let users = column_names(&pool, "users").await;
        let telefone_count = users.iter().filter(|n| n.as_str() == "telefone").count();
        assert_eq!(telefone_count, 1);
    }

    #[tokio::test]
    async fn test_migrations_upgrade_base_schema_in_place() {
        // Simulate a database created by the first release: base tables only
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::query(
            "CREATE TABLE users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                nome TEXT NOT NULL,
                apelido TEXT,
                email TEXT UNIQUE NOT NULL,
                password TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        run_migrations(&pool).await.unwrap();

        let users = column_names(&pool, "users").await;
        assert!(users.contains(&"telefone".to_string()));
        assert!(users.contains(&"bio".to_string()));
        assert!(users.contains(&"profile_image".to_string()));
    }
}
