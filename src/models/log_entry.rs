//! Log entry model
//!
//! One logged day. Entries are append-only: once stored they are never
//! updated or deleted, and their id order is the insertion order.

use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use super::ExerciseIntensity;
use crate::db::{DbError, DbResult};

/// A stored log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    pub date: NaiveDate,
    pub calories_in: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbs_g: f64,
    pub exercise_minutes: f64,
    pub exercise_intensity: ExerciseIntensity,
    pub weight_kg: Option<f64>,
}

/// Data submitted by the log form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntryCreate {
    pub date: NaiveDate,
    pub calories_in: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbs_g: f64,
    pub exercise_minutes: f64,
    pub exercise_intensity: ExerciseIntensity,
    pub weight_kg: Option<f64>,
}

impl LogEntry {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let intensity_str: String = row.get("exercise_intensity")?;
        let exercise_intensity = ExerciseIntensity::from_str(&intensity_str).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(DbError::Decode(format!("unknown intensity '{}'", intensity_str))),
            )
        })?;

        Ok(Self {
            id: row.get("id")?,
            date: row.get("date")?,
            calories_in: row.get("calories_in")?,
            protein_g: row.get("protein_g")?,
            fat_g: row.get("fat_g")?,
            carbs_g: row.get("carbs_g")?,
            exercise_minutes: row.get("exercise_minutes")?,
            exercise_intensity,
            weight_kg: row.get("weight_kg")?,
        })
    }

    /// Append an entry to the log
    pub fn append(conn: &Connection, data: &LogEntryCreate) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO log_entries (
                date, calories_in, protein_g, fat_g, carbs_g,
                exercise_minutes, exercise_intensity, weight_kg
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                data.date,
                data.calories_in,
                data.protein_g,
                data.fat_g,
                data.carbs_g,
                data.exercise_minutes,
                data.exercise_intensity.as_str(),
                data.weight_kg,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?
            .ok_or(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Get an entry by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM log_entries WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List the whole log in insertion order
    pub fn list(conn: &Connection) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM log_entries ORDER BY id")?;
        let entries = stmt
            .query_map([], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Number of logged entries
    pub fn count(conn: &Connection) -> DbResult<i64> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM log_entries", [], |row| row.get(0))?;
        Ok(count)
    }
}
