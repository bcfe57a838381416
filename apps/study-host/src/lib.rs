//! Local host for the matching game: dataset import, study log and
//! settings storage, timer driving, and the command surface a UI shell calls.

pub mod commands;
pub mod dataset;
pub mod db;
pub mod state;
pub mod timers;

use anyhow::Context;
use db::SqliteRepository;
use state::AppState;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "MATCHCARDS_DATA_DIR";

/// Directory holding the study database.
pub fn data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    // Use app data directory for production, fallback to current dir
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("matchcards")
}

pub fn get_db_path() -> PathBuf {
    data_dir().join("study.db")
}

/// Install the tracing subscriber. `RUST_LOG` wins over the `info` default.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Open the database and build the application state.
pub fn init() -> anyhow::Result<AppState> {
    init_tracing();

    let db_path = get_db_path();
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let repository = SqliteRepository::open(&db_path)
        .with_context(|| format!("failed to open database at {}", db_path.display()))?;
    info!(path = %db_path.display(), "study database opened");

    Ok(AppState::new(repository))
}
