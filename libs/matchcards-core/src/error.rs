//! Error types for matchcards-core.

use thiserror::Error;

/// Result type alias using GameError.
pub type Result<T> = std::result::Result<T, GameError>;

/// Configuration errors that prevent a session from starting or a column
/// change from being applied.
///
/// Clicks that arrive after a reset or on inert cards are not errors; they are
/// reported as ignored click outcomes instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("dataset needs a header row and at least one data row")]
    EmptyDataset,

    #[error("at least 2 columns are required, found {active}")]
    TooFewColumns { active: usize },

    #[error("no row has a value in every selected column")]
    NoPlayablePairs,

    #[error("column {column} does not exist")]
    ColumnOutOfRange { column: usize },

    #[error("column {column} is an identifier column")]
    IdentifierColumn { column: usize },

    #[error("slot {slot} does not exist")]
    SlotOutOfRange { slot: usize },

    #[error("invalid row range: {value}")]
    InvalidRange { value: String },

    #[error("invalid column list: {value}")]
    InvalidColumnList { value: String },
}

impl GameError {
    /// Whether the user has to change the session configuration to recover.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::TooFewColumns { .. } | Self::NoPlayablePairs | Self::EmptyDataset
        )
    }
}
