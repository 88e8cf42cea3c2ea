//! SQLite-based persistence.
//!
//! Provides:
//! - Key-value store for application state (the timer snapshot)
//! - Per-day focus minute records

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{Local, Months, NaiveDate};
use rusqlite::{params, Connection};

use super::{data_dir, FocusRecorder, StateStore};
use crate::error::{DatabaseError, Result, ValidationError};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// SQLite database for timer state and focus records.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data_dir>/focusplan.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("focusplan.db");
        Self::open_at(&path)
    }

    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS focus_records (
                    date          TEXT PRIMARY KEY,
                    total_minutes INTEGER NOT NULL DEFAULT 0
                );",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Add focus minutes to the total for `date`.
    pub fn add_focus_minutes_on(&self, date: NaiveDate, minutes: u32) -> Result<()> {
        self.conn.execute(
            "INSERT INTO focus_records (date, total_minutes) VALUES (?1, ?2)
             ON CONFLICT(date) DO UPDATE SET total_minutes = total_minutes + excluded.total_minutes",
            params![date.format(DATE_FORMAT).to_string(), minutes],
        )?;
        Ok(())
    }

    /// Total focus minutes recorded for `date` (0 if none).
    pub fn focus_minutes_on(&self, date: NaiveDate) -> Result<u32> {
        let mut stmt = self
            .conn
            .prepare("SELECT total_minutes FROM focus_records WHERE date = ?1")?;
        let result = stmt.query_row(params![date.format(DATE_FORMAT).to_string()], |row| {
            row.get::<_, u32>(0)
        });
        match result {
            Ok(v) => Ok(v),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    /// Days of the given month with recorded focus time. `month` is 1-based.
    pub fn focus_month(&self, year: i32, month: u32) -> Result<BTreeMap<NaiveDate, u32>> {
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            ValidationError::InvalidValue {
                field: "month".into(),
                message: format!("{year}-{month} is not a valid month"),
            }
        })?;
        let next = first
            .checked_add_months(Months::new(1))
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "month".into(),
                message: format!("{year}-{month} is out of range"),
            })?;

        let mut stmt = self.conn.prepare(
            "SELECT date, total_minutes FROM focus_records
             WHERE date >= ?1 AND date < ?2 AND total_minutes > 0
             ORDER BY date",
        )?;
        let rows = stmt.query_map(
            params![
                first.format(DATE_FORMAT).to_string(),
                next.format(DATE_FORMAT).to_string()
            ],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, u32>(1)?)),
        )?;

        let mut days = BTreeMap::new();
        for row in rows {
            let (date, minutes) = row?;
            let date = NaiveDate::parse_from_str(&date, DATE_FORMAT)
                .map_err(|e| DatabaseError::QueryFailed(format!("bad date '{date}': {e}")))?;
            days.insert(date, minutes);
        }
        Ok(days)
    }
}

impl StateStore for Database {
    fn load(&self, key: &str) -> Result<Option<String>> {
        self.kv_get(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        self.kv_set(key, value)
    }
}

impl FocusRecorder for Database {
    fn add_focus_minutes(&self, minutes: u32) -> Result<()> {
        self.add_focus_minutes_on(Local::now().date_naive(), minutes)
    }
}
