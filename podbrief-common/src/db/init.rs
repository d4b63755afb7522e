//! Database initialization
//!
//! Opens (or creates) the SQLite file and brings the two-table schema up to
//! date. Safe to call on every startup: table creation is idempotent and the
//! column check only adds what an older database file is missing.

use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// Open the database at `db_path`, creating file and tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_millis(5000));

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    create_schema(&pool).await?;
    Ok(pool)
}

/// In-memory database with the full schema
///
/// Limited to one connection: every pooled connection to `:memory:` would
/// otherwise see its own empty database.
pub async fn init_memory_database() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    create_schema(&pool).await?;
    Ok(pool)
}

async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_guests_table(pool).await?;
    create_briefs_table(pool).await?;

    // Databases created before interview styles existed lack this column
    if !table_columns(pool, "guests")
        .await?
        .iter()
        .any(|c| c == "interview_style")
    {
        sqlx::query(
            "ALTER TABLE guests ADD COLUMN interview_style TEXT NOT NULL DEFAULT 'Professional'",
        )
        .execute(pool)
        .await?;
        info!("Added interview_style column to guests table");
    }

    debug!("Database schema ready (guests, briefs)");
    Ok(())
}

async fn create_guests_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS guests (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL CHECK (length(trim(name)) > 0),
            link TEXT,
            topic TEXT,
            interview_style TEXT NOT NULL DEFAULT 'Professional',
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_briefs_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS briefs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            guest_id INTEGER NOT NULL,
            bio TEXT NOT NULL,
            questions TEXT NOT NULL,
            intro TEXT NOT NULL,
            outro TEXT NOT NULL,
            created_at TEXT NOT NULL,
            FOREIGN KEY (guest_id) REFERENCES guests (id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_briefs_guest_id ON briefs (guest_id)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_briefs_created_at ON briefs (created_at)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Column names of `table`, in declaration order
pub async fn table_columns(pool: &SqlitePool, table: &str) -> Result<Vec<String>> {
    let rows = sqlx::query(&format!("PRAGMA table_info({})", table))
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(|row| row.get::<String, _>("name")).collect())
}
