//! Database configuration module for the relational export.
//!
//! This module handles `SQLite` connections and table creation using `SeaORM`.
//! The tables are created from explicit DDL rather than from the entities because
//! the `type` CHECK constraints and the category foreign key are part of the
//! schema contract and `SeaORM`'s schema builder cannot express the former.

use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection};
use tracing::{debug, info, instrument};

const SCHEMA: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS categories (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        name_localized TEXT,
        type TEXT NOT NULL CHECK(type IN ('income', 'expense')),
        color TEXT NOT NULL,
        is_default INTEGER NOT NULL DEFAULT 0,
        created_at TEXT DEFAULT CURRENT_TIMESTAMP
    )",
    "CREATE TABLE IF NOT EXISTS transactions (
        id TEXT PRIMARY KEY,
        amount REAL NOT NULL,
        description TEXT,
        category_id TEXT NOT NULL,
        date TEXT NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('income', 'expense')),
        created_at TEXT DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (category_id) REFERENCES categories (id)
    )",
    "CREATE TABLE IF NOT EXISTS settings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        key TEXT UNIQUE NOT NULL,
        value TEXT NOT NULL
    )",
];

/// Establishes a connection to the `SQLite` database at `database_url`.
///
/// Foreign keys are enforced on every connection (the `sqlx` default).
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    debug!("Connecting to export database");
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates the `categories`, `transactions` and `settings` tables if they do not exist.
#[instrument(skip(db))]
pub async fn create_tables<C: ConnectionTrait>(db: &C) -> Result<()> {
    for statement in SCHEMA {
        db.execute_unprepared(statement).await?;
    }
    info!("Database tables ensured");
    Ok(())
}

/// Connects and ensures the schema in one step.
pub async fn open(database_url: &str) -> Result<DatabaseConnection> {
    let db = create_connection(database_url).await?;
    create_tables(&db).await?;
    Ok(db)
}
