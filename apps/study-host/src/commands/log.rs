//! Study log commands.

use super::CommandError;
use crate::db::StudyLogRepository;
use crate::state::AppState;
use matchcards_core::StudyLogEntry;

const DEFAULT_LIMIT: usize = 50;

/// Most recent log entries, newest first.
pub async fn list_study_logs(
    limit: Option<usize>,
    state: &AppState,
) -> Result<Vec<StudyLogEntry>, CommandError> {
    let repo = state.repository.lock().expect("repository lock");
    repo.list_logs(limit.unwrap_or(DEFAULT_LIMIT))
        .map_err(Into::into)
}

/// The last logged study, used to offer a resume.
pub async fn get_last_study(state: &AppState) -> Result<Option<StudyLogEntry>, CommandError> {
    let repo = state.repository.lock().expect("repository lock");
    repo.latest_log().map_err(Into::into)
}
