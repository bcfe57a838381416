//! Study log records and resuming from them.

use crate::columns::ColumnSelection;
use crate::error::Result;
use crate::range::parse_ranges;
use crate::report::CompletionReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Column and range descriptors of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDescriptors {
    /// Encoded column slots, e.g. `1,2,null`.
    pub columns: String,
    /// Row range string; `None` means the whole dataset.
    pub range: Option<String>,
}

/// One line of the study log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyLogEntry {
    pub logged_at: DateTime<Utc>,
    pub columns: String,
    /// Empty when the whole dataset was studied.
    pub range: String,
    pub total_pairs: usize,
    pub elapsed_seconds: i64,
    pub accuracy_percent: f64,
    pub ordered_mode: bool,
}

impl StudyLogEntry {
    pub fn from_report(report: &CompletionReport, descriptors: &SessionDescriptors) -> Self {
        Self {
            logged_at: report.finished_at,
            columns: descriptors.columns.clone(),
            range: descriptors.range.clone().unwrap_or_default(),
            total_pairs: report.total_pairs,
            elapsed_seconds: report.elapsed_seconds,
            accuracy_percent: report.accuracy_percent,
            ordered_mode: report.ordered_mode,
        }
    }
}

/// Prior column selection and row subset used to repeat a study.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeInstruction {
    pub columns: Vec<Option<usize>>,
    pub rows: Option<Vec<usize>>,
}

impl ResumeInstruction {
    /// Rows beyond `max_row` (the dataset's last data row) are dropped.
    pub fn from_entry(entry: &StudyLogEntry, max_row: usize) -> Result<Self> {
        let columns = ColumnSelection::decode(&entry.columns)?;
        let rows = if entry.range.trim().is_empty() {
            None
        } else {
            Some(parse_ranges(&entry.range, max_row)?)
        };
        Ok(Self { columns, rows })
    }
}
