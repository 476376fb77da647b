//! Database connection management
//!
//! The session log lives in a private in-memory SQLite database. It is never
//! written to disk and disappears when the `Database` is dropped.

use rusqlite::Connection;
use thiserror::Error;

/// Database error types
#[derive(Debug, Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Stored value could not be decoded: {0}")]
    Decode(String),
}

/// Result type for database operations
pub type DbResult<T> = Result<T, DbError>;

/// Session-scoped database handle
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open a fresh in-memory database with the schema applied
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA temp_store = MEMORY;",
        )?;
        super::migrations::run_migrations(&conn)?;

        Ok(Self { conn })
    }

    /// Execute a closure with the database connection
    pub fn with_conn<F, T>(&self, f: F) -> DbResult<T>
    where
        F: FnOnce(&Connection) -> DbResult<T>,
    {
        f(&self.conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory_applies_schema() {
        let db = Database::open_in_memory().unwrap();
        let version = db.with_conn(super::super::migrations::get_schema_version).unwrap();
        assert_eq!(version, super::super::migrations::SCHEMA_VERSION);
    }

    #[test]
    fn test_databases_are_isolated() {
        let a = Database::open_in_memory().unwrap();
        let b = Database::open_in_memory().unwrap();

        a.with_conn(|conn| {
            conn.execute(
                "INSERT INTO log_entries (date, calories_in, protein_g, fat_g, carbs_g,
                 exercise_minutes, exercise_intensity)
                 VALUES ('2025-01-01', 1, 0, 0, 0, 0, 'light')",
                [],
            )?;
            Ok(())
        })
        .unwrap();

        let count: i64 = b
            .with_conn(|conn| {
                Ok(conn.query_row("SELECT COUNT(*) FROM log_entries", [], |r| r.get(0))?)
            })
            .unwrap();
        assert_eq!(count, 0);
    }
}
