//! Commands exposed to the UI shell.
//!
//! Every command is an async function over the shared [`AppState`] and
//! returns a serializable [`CommandError`] on failure.
//!
//! [`AppState`]: crate::state::AppState

pub mod dataset;
pub mod log;
pub mod session;
pub mod settings;

pub use dataset::{get_dataset, import_dataset, ColumnInfo, DatasetSummary};
pub use log::{get_last_study, list_study_logs};
pub use session::{
    change_column, click_card, end_session, get_session, restart_session, start_session,
    ChangeResponse, ClickResponse, LogStatus, StartMode, StartRequest,
};
pub use settings::{get_game_settings, save_game_settings};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandError {
    pub message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<crate::db::DbError> for CommandError {
    fn from(e: crate::db::DbError) -> Self {
        Self { message: e.to_string() }
    }
}

impl From<matchcards_core::GameError> for CommandError {
    fn from(e: matchcards_core::GameError) -> Self {
        Self { message: e.to_string() }
    }
}

impl From<crate::dataset::DatasetError> for CommandError {
    fn from(e: crate::dataset::DatasetError) -> Self {
        Self { message: e.to_string() }
    }
}
