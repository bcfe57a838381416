//! SQLite schema definitions.

/// Current schema version for migrations.
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema for the local study database.
pub const SCHEMA: &str = r#"
-- Finished sessions, append-only
CREATE TABLE IF NOT EXISTS study_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    logged_at TEXT NOT NULL,
    columns TEXT NOT NULL,
    study_range TEXT NOT NULL DEFAULT '',
    total_pairs INTEGER NOT NULL,
    elapsed_seconds INTEGER NOT NULL,
    accuracy_percent REAL NOT NULL,
    ordered_mode INTEGER NOT NULL DEFAULT 0
);

-- Game settings
CREATE TABLE IF NOT EXISTS game_settings (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    window_size INTEGER NOT NULL DEFAULT 5,
    refill_threshold INTEGER NOT NULL DEFAULT 3,
    refill_strategy TEXT NOT NULL DEFAULT 'threshold',
    page_quota INTEGER,
    reshuffle_on_page INTEGER NOT NULL DEFAULT 1,
    ordered_mode INTEGER NOT NULL DEFAULT 0,
    mismatch_ms INTEGER NOT NULL DEFAULT 500,
    refill_delay_ms INTEGER NOT NULL DEFAULT 300,
    fresh_clear_ms INTEGER NOT NULL DEFAULT 600
);

-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_study_log_logged_at ON study_log(logged_at);
"#;

/// Initialize game settings if not exists.
pub const INIT_GAME_SETTINGS: &str = r#"
INSERT OR IGNORE INTO game_settings (id) VALUES (1);
"#;
