//! Common test utilities for integration tests.
//!
//! This module provides:
//! - TestContext owning a temporary database and the application state
//! - Helpers that play a session through the command surface

#![allow(dead_code)]

pub mod fixtures;

use std::path::PathBuf;
use std::time::Duration;

use matchcards_core::{BoardSnapshot, CardRef, PairId};
use study_host::commands::{self, ClickResponse};
use study_host::db::SqliteRepository;
use study_host::state::AppState;
use tempfile::TempDir;

/// Upper bound on play steps before a helper gives up.
const MAX_STEPS: usize = 10_000;

/// Test context with a file-backed database in a temporary directory.
pub struct TestContext {
    pub state: AppState,
    pub db_path: PathBuf,
    dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = dir.path().join("study.db");
        let repository = SqliteRepository::open(&db_path).expect("Failed to open database");
        Self {
            state: AppState::new(repository),
            db_path,
            dir,
        }
    }

    /// Create a context with `csv` imported as the current dataset.
    pub async fn with_dataset(csv: &str) -> Self {
        let ctx = Self::new();
        ctx.import(csv).await;
        ctx
    }

    pub async fn import(&self, csv: &str) {
        let path = self.dir.path().join("dataset.csv");
        std::fs::write(&path, csv).expect("Failed to write dataset");
        commands::import_dataset(path.display().to_string(), &self.state)
            .await
            .expect("Failed to import dataset");
    }

    /// Make study log writes fail by dropping the table behind the
    /// repository's back.
    pub fn break_study_log(&self) {
        let conn = rusqlite::Connection::open(&self.db_path).expect("Failed to open database");
        conn.execute_batch("DROP TABLE study_log;")
            .expect("Failed to drop study_log");
    }

    pub async fn board(&self) -> BoardSnapshot {
        commands::get_session(&self.state)
            .await
            .expect("get_session failed")
            .expect("no session running")
    }
}

/// An unmatched pair visible in every lane.
pub fn playable_pair(board: &BoardSnapshot) -> Option<PairId> {
    let first = board.lanes.first()?;
    first
        .cards
        .iter()
        .filter(|c| !c.matched)
        .map(|c| c.pair)
        .find(|pair| {
            board
                .lanes
                .iter()
                .all(|lane| lane.cards.iter().any(|c| c.pair == *pair && !c.matched))
        })
}

/// Click `pair` in every lane and return the response to the last click.
pub async fn match_pair(state: &AppState, pair: PairId, lanes: usize) -> ClickResponse {
    let mut last = None;
    for lane in 0..lanes {
        let response = commands::click_card(CardRef::new(lane, pair), state)
            .await
            .expect("click failed");
        last = Some(response);
    }
    last.expect("at least two lanes")
}

/// Match pairs until the session finishes, sleeping through refills.
pub async fn play_to_end(ctx: &TestContext) -> ClickResponse {
    for _ in 0..MAX_STEPS {
        let board = ctx.board().await;
        match playable_pair(&board) {
            Some(pair) => {
                let response = match_pair(&ctx.state, pair, board.lanes.len()).await;
                if response.board.finished {
                    return response;
                }
            }
            None => tokio::time::sleep(Duration::from_secs(1)).await,
        }
    }
    panic!("session did not finish");
}
