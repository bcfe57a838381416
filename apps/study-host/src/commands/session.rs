//! Session commands.

use super::CommandError;
use crate::db::{SettingsRepository, StudyLogRepository};
use crate::state::AppState;
use chrono::Utc;
use matchcards_core::{
    parse_ranges, BoardSnapshot, CardRef, ClickEvent, ColumnChange, MatchingSession,
    ResumeInstruction, SessionSetup, StudyLogEntry,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Which rows a new session covers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StartMode {
    #[default]
    Full,
    /// Explicit grid rows (data starts at 1).
    Rows { rows: Vec<usize> },
    /// A range string such as `1-10,15`.
    Range { range: String },
    /// Repeat the columns and rows of the last logged study.
    ResumeLast,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartRequest {
    #[serde(default)]
    pub mode: StartMode,
    /// Overrides the stored ordered-mode setting.
    #[serde(default)]
    pub ordered: Option<bool>,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Outcome of writing the study log on completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LogStatus {
    /// The click did not finish the session.
    Skipped,
    Saved { id: i64 },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClickResponse {
    pub event: ClickEvent,
    pub board: BoardSnapshot,
    pub log_status: LogStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeResponse {
    pub changed: bool,
    pub board: BoardSnapshot,
}

fn no_session() -> CommandError {
    CommandError::new("no active session")
}

/// Start a session on the current dataset, replacing any running one.
pub async fn start_session(
    request: StartRequest,
    state: &AppState,
) -> Result<BoardSnapshot, CommandError> {
    let dataset = state
        .current_dataset()
        .ok_or_else(|| CommandError::new("no dataset loaded"))?;

    let (mut config, last) = {
        let repo = state.repository.lock().expect("repository lock");
        let config = repo.get_game_settings()?;
        let last = match request.mode {
            StartMode::ResumeLast => repo.latest_log()?,
            _ => None,
        };
        (config, last)
    };
    if let Some(ordered) = request.ordered {
        config.ordered = ordered;
    }
    config.seed = request.seed;

    let max_row = dataset.data_len();
    let setup = match request.mode {
        StartMode::Full => SessionSetup::full(),
        StartMode::Rows { rows } => SessionSetup::with_rows(rows),
        StartMode::Range { range } => SessionSetup::with_rows(parse_ranges(&range, max_row)?),
        StartMode::ResumeLast => match last {
            Some(entry) => SessionSetup::resume(ResumeInstruction::from_entry(&entry, max_row)?),
            None => {
                info!("no study logged yet, starting on the full dataset");
                SessionSetup::full()
            }
        },
    };

    let session = MatchingSession::start(dataset, setup, config, Utc::now())?;
    let board = session.snapshot();
    info!(
        session = %session.id(),
        pairs = session.total_pairs(),
        columns = %session.columns().encode(),
        "session started"
    );

    *state.session.lock().expect("session lock") = Some(session);
    Ok(board)
}

/// Click a card. Completion writes the study log; a failed write is reported
/// in `log_status` and never undoes the completion.
pub async fn click_card(card: CardRef, state: &AppState) -> Result<ClickResponse, CommandError> {
    let (outcome, board, completed) = {
        let mut slot = state.session.lock().expect("session lock");
        let session = slot.as_mut().ok_or_else(no_session)?;
        let outcome = session.click(card, Utc::now());
        let completed = match &outcome.event {
            ClickEvent::Matched {
                report: Some(report),
                ..
            } => Some(StudyLogEntry::from_report(report, &session.descriptors())),
            _ => None,
        };
        (outcome, session.snapshot(), completed)
    };

    state.timers.schedule(outcome.timers);

    let log_status = match completed {
        Some(entry) => write_log(state, &entry),
        None => LogStatus::Skipped,
    };

    Ok(ClickResponse {
        event: outcome.event,
        board,
        log_status,
    })
}

fn write_log(state: &AppState, entry: &StudyLogEntry) -> LogStatus {
    let repo = state.repository.lock().expect("repository lock");
    match repo.append_log(entry) {
        Ok(id) => {
            info!(
                id,
                pairs = entry.total_pairs,
                seconds = entry.elapsed_seconds,
                accuracy = entry.accuracy_percent,
                "study logged"
            );
            LogStatus::Saved { id }
        }
        Err(e) => {
            warn!(error = %e, "failed to write study log");
            LogStatus::Failed {
                message: e.to_string(),
            }
        }
    }
}

/// Change one column slot. Rejected changes leave the session as it was.
pub async fn change_column(
    change: ColumnChange,
    state: &AppState,
) -> Result<ChangeResponse, CommandError> {
    let mut slot = state.session.lock().expect("session lock");
    let session = slot.as_mut().ok_or_else(no_session)?;
    let changed = session.reconfigure(change, Utc::now())?;
    if changed {
        info!(columns = %session.columns().encode(), "columns changed");
    }
    Ok(ChangeResponse {
        changed,
        board: session.snapshot(),
    })
}

/// Deal the same pairs again from scratch.
pub async fn restart_session(state: &AppState) -> Result<BoardSnapshot, CommandError> {
    let mut slot = state.session.lock().expect("session lock");
    let session = slot.as_mut().ok_or_else(no_session)?;
    session.restart(Utc::now())?;
    Ok(session.snapshot())
}

/// Drop the running session. Pending timers become no-ops.
pub async fn end_session(state: &AppState) -> Result<(), CommandError> {
    if let Some(session) = state.session.lock().expect("session lock").take() {
        info!(session = %session.id(), finished = session.is_finished(), "session ended");
    }
    Ok(())
}

/// Current board, if a session is running.
pub async fn get_session(state: &AppState) -> Result<Option<BoardSnapshot>, CommandError> {
    let slot = state.session.lock().expect("session lock");
    Ok(slot.as_ref().map(MatchingSession::snapshot))
}
