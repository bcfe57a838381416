//! Repository pattern for database access.

use crate::db::error::DbError;
use chrono::{DateTime, Utc};
use matchcards_core::{EngineConfig, RefillStrategy, StudyLogEntry, Timings};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

type Result<T> = std::result::Result<T, DbError>;

/// Study log writer and reader.
pub trait StudyLogRepository {
    fn append_log(&self, entry: &StudyLogEntry) -> Result<i64>;
    fn latest_log(&self) -> Result<Option<StudyLogEntry>>;
    fn list_logs(&self, limit: usize) -> Result<Vec<StudyLogEntry>>;
}

/// Repository for game settings.
pub trait SettingsRepository {
    fn get_game_settings(&self) -> Result<EngineConfig>;
    fn save_game_settings(&self, config: &EngineConfig) -> Result<()>;
}

/// SQLite-backed repository.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Open database at path, creating if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(super::schema::SCHEMA)?;
        self.conn.execute_batch(super::schema::INIT_GAME_SETTINGS)?;
        self.conn.execute(
            "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
            params![super::schema::SCHEMA_VERSION],
        )?;
        Ok(())
    }

    fn row_to_entry(row: &rusqlite::Row) -> rusqlite::Result<StudyLogEntry> {
        let logged_at: String = row.get(0)?;
        let logged_at = DateTime::parse_from_rfc3339(&logged_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?;
        let total_pairs: i64 = row.get(3)?;
        let ordered: i64 = row.get(6)?;

        Ok(StudyLogEntry {
            logged_at,
            columns: row.get(1)?,
            range: row.get(2)?,
            total_pairs: total_pairs.max(0) as usize,
            elapsed_seconds: row.get(4)?,
            accuracy_percent: row.get(5)?,
            ordered_mode: ordered != 0,
        })
    }
}

/// Convert an unsigned value to SQLite's integer type without wrapping.
fn sql_int<T>(field: &str, value: T) -> Result<i64>
where
    T: TryInto<i64> + Copy + std::fmt::Display,
{
    value
        .try_into()
        .map_err(|_| DbError::InvalidData(format!("{field} out of range: {value}")))
}

const ENTRY_COLUMNS: &str =
    "logged_at, columns, study_range, total_pairs, elapsed_seconds, accuracy_percent, ordered_mode";

impl StudyLogRepository for SqliteRepository {
    fn append_log(&self, entry: &StudyLogEntry) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO study_log (logged_at, columns, study_range, total_pairs, elapsed_seconds, accuracy_percent, ordered_mode) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                entry.logged_at.to_rfc3339(),
                entry.columns,
                entry.range,
                sql_int("total_pairs", entry.total_pairs)?,
                entry.elapsed_seconds,
                entry.accuracy_percent,
                entry.ordered_mode as i64,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn latest_log(&self) -> Result<Option<StudyLogEntry>> {
        self.conn
            .query_row(
                &format!("SELECT {ENTRY_COLUMNS} FROM study_log ORDER BY id DESC LIMIT 1"),
                [],
                Self::row_to_entry,
            )
            .optional()
            .map_err(Into::into)
    }

    fn list_logs(&self, limit: usize) -> Result<Vec<StudyLogEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ENTRY_COLUMNS} FROM study_log ORDER BY id DESC LIMIT ?1"
        ))?;
        let entries = stmt
            .query_map(params![limit as i64], Self::row_to_entry)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(entries)
    }
}

impl SettingsRepository for SqliteRepository {
    fn get_game_settings(&self) -> Result<EngineConfig> {
        let (config, strategy) = self.conn.query_row(
            "SELECT window_size, refill_threshold, refill_strategy, page_quota, reshuffle_on_page, ordered_mode, mismatch_ms, refill_delay_ms, fresh_clear_ms FROM game_settings WHERE id = 1",
            [],
            |row| {
                let window_size: i64 = row.get(0)?;
                let refill_threshold: i64 = row.get(1)?;
                let strategy: String = row.get(2)?;
                let page_quota: Option<i64> = row.get(3)?;
                let reshuffle: i64 = row.get(4)?;
                let ordered: i64 = row.get(5)?;
                let mismatch_ms: i64 = row.get(6)?;
                let refill_delay_ms: i64 = row.get(7)?;
                let fresh_clear_ms: i64 = row.get(8)?;

                let config = EngineConfig {
                    window_size: window_size.max(0) as usize,
                    refill_threshold: refill_threshold.max(0) as usize,
                    refill_strategy: RefillStrategy::default(),
                    page_quota: page_quota.map(|q| q.max(0) as usize),
                    reshuffle_on_page: reshuffle != 0,
                    ordered: ordered != 0,
                    seed: None,
                    timings: Timings {
                        mismatch_ms: mismatch_ms.max(0) as u64,
                        refill_delay_ms: refill_delay_ms.max(0) as u64,
                        fresh_clear_ms: fresh_clear_ms.max(0) as u64,
                    },
                };
                Ok((config, strategy))
            },
        )?;

        let refill_strategy = RefillStrategy::from_str(&strategy)
            .ok_or_else(|| DbError::InvalidData(format!("unknown refill strategy: {strategy}")))?;
        Ok(EngineConfig {
            refill_strategy,
            ..config
        })
    }

    fn save_game_settings(&self, config: &EngineConfig) -> Result<()> {
        let page_quota = config
            .page_quota
            .map(|q| sql_int("page_quota", q))
            .transpose()?;
        self.conn.execute(
            "UPDATE game_settings SET window_size = ?1, refill_threshold = ?2, refill_strategy = ?3, page_quota = ?4, reshuffle_on_page = ?5, ordered_mode = ?6, mismatch_ms = ?7, refill_delay_ms = ?8, fresh_clear_ms = ?9 WHERE id = 1",
            params![
                sql_int("window_size", config.window_size)?,
                sql_int("refill_threshold", config.refill_threshold)?,
                config.refill_strategy.as_str(),
                page_quota,
                config.reshuffle_on_page as i64,
                config.ordered as i64,
                sql_int("mismatch_ms", config.timings.mismatch_ms)?,
                sql_int("refill_delay_ms", config.timings.refill_delay_ms)?,
                sql_int("fresh_clear_ms", config.timings.fresh_clear_ms)?,
            ],
        )?;

        Ok(())
    }
}
