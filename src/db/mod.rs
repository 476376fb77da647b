//! Database module
//!
//! In-memory SQLite store for the session log, plus its migrations.

pub mod connection;
pub mod migrations;

pub use connection::{Database, DbError, DbResult};
