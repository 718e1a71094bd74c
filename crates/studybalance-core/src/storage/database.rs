//! SQLite-backed mood log store.
//!
//! One row per calendar date holding (mood, sleep_hours, study_hours),
//! with upsert semantics on date collision. Writes go through the
//! single owned connection, which serializes them; reads scan the
//! table ordered by date.

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::error::{DatabaseError, Result, ValidationError};

use super::data_dir;

/// A mood log row as submitted at the boundary. The date stays a
/// string until `upsert` parses it strictly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodRecord {
    pub date: String,
    pub mood: f64,
    pub sleep_hours: f64,
    pub study_hours: f64,
}

impl MoodRecord {
    /// Check bounded fields and parse the date as a strict
    /// `YYYY-MM-DD` calendar date.
    pub fn validate(&self) -> Result<NaiveDate> {
        check_range("mood", self.mood, 1.0, 5.0)?;
        check_range("sleep_hours", self.sleep_hours, 0.0, 24.0)?;
        check_range("study_hours", self.study_hours, 0.0, 24.0)?;
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").map_err(|_| {
            ValidationError::InvalidDate {
                value: self.date.clone(),
            }
            .into()
        })
    }
}

fn check_range(field: &str, value: f64, lo: f64, hi: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < lo || value > hi {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            message: format!("{value} is outside [{lo}, {hi}]"),
        });
    }
    Ok(())
}

/// A stored row with its parsed calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoredMood {
    pub date: NaiveDate,
    pub mood: f64,
    pub sleep_hours: f64,
    pub study_hours: f64,
}

/// SQLite database holding the mood log table.
pub struct MoodDb {
    conn: Connection,
}

impl MoodDb {
    /// Open the database at `~/.config/studybalance/mood.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("mood.db");
        let conn = Connection::open(&path).map_err(|source| DatabaseError::OpenFailed {
            path: path.clone(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests and dry runs).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open the database at an explicit path.
    pub fn open_at(path: &std::path::Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS mood_logs (
                    id          INTEGER PRIMARY KEY AUTOINCREMENT,
                    dte         TEXT NOT NULL UNIQUE,
                    mood        REAL NOT NULL,
                    sleep_hours REAL NOT NULL,
                    study_hours REAL NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_mood_logs_dte ON mood_logs(dte);",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(())
    }

    /// Insert or overwrite the row for the record's date.
    ///
    /// Validation happens before any write, so a rejected record never
    /// touches the table.
    pub fn upsert(&self, record: &MoodRecord) -> Result<()> {
        let date = record.validate()?;
        self.conn.execute(
            "INSERT INTO mood_logs (dte, mood, sleep_hours, study_hours)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(dte) DO UPDATE SET
               mood = excluded.mood,
               sleep_hours = excluded.sleep_hours,
               study_hours = excluded.study_hours",
            params![
                date.format("%Y-%m-%d").to_string(),
                record.mood,
                record.sleep_hours,
                record.study_hours,
            ],
        )?;
        Ok(())
    }

    /// Delete every stored row. Irreversible.
    pub fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM mood_logs", [])?;
        Ok(())
    }

    /// All rows ordered by date ascending.
    pub fn load_all(&self) -> Result<Vec<StoredMood>> {
        let mut stmt = self.conn.prepare(
            "SELECT dte, mood, sleep_hours, study_hours FROM mood_logs ORDER BY dte",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, f64>(1)?,
                row.get::<_, f64>(2)?,
                row.get::<_, f64>(3)?,
            ))
        })?;

        let mut out = Vec::new();
        for row in rows {
            let (dte, mood, sleep_hours, study_hours) = row?;
            let date = NaiveDate::parse_from_str(&dte, "%Y-%m-%d").map_err(|_| {
                DatabaseError::QueryFailed(format!("corrupt date in mood_logs: {dte}"))
            })?;
            out.push(StoredMood {
                date,
                mood,
                sleep_hours,
                study_hours,
            });
        }
        Ok(out)
    }

    /// Number of stored rows.
    pub fn count(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM mood_logs", [], |row| row.get(0))?;
        Ok(n as usize)
    }
}
