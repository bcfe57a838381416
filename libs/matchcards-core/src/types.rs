//! Core types for the matching game.

use crate::error::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Header fragment that marks a column as a card identifier.
const IDENTIFIER_MARKER: &str = "cardid";

/// Tabular card source: a header row plus data rows.
///
/// Rows are addressed by their grid index, where 0 is the header and data
/// starts at 1. Cells missing from short rows read as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Create a dataset from an explicit header and data rows.
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if header.is_empty() || rows.is_empty() {
            return Err(GameError::EmptyDataset);
        }
        Ok(Self { header, rows })
    }

    /// Create a dataset from a grid whose first row is the header.
    pub fn from_grid(mut grid: Vec<Vec<String>>) -> Result<Self> {
        if grid.len() < 2 {
            return Err(GameError::EmptyDataset);
        }
        let rows = grid.split_off(1);
        let header = grid.pop().unwrap_or_default();
        Self::new(header, rows)
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows (header excluded).
    pub fn data_len(&self) -> usize {
        self.rows.len()
    }

    /// Header name of a column.
    pub fn column_name(&self, column: usize) -> Option<&str> {
        self.header.get(column).map(String::as_str)
    }

    /// Cell at a grid row index (1-based for data) and column.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        if row == 0 {
            return self.column_name(column);
        }
        self.rows
            .get(row - 1)
            .and_then(|r| r.get(column))
            .map(String::as_str)
    }

    /// Whether the column header looks like a card identifier.
    pub fn is_identifier_column(&self, column: usize) -> bool {
        self.column_name(column)
            .map(|h| h.to_lowercase().contains(IDENTIFIER_MARKER))
            .unwrap_or(false)
    }

    /// Check that a column exists and may be played.
    pub fn check_playable(&self, column: usize) -> Result<()> {
        if column >= self.header.len() {
            return Err(GameError::ColumnOutOfRange { column });
        }
        if self.is_identifier_column(column) {
            return Err(GameError::IdentifierColumn { column });
        }
        Ok(())
    }

    /// All playable column indices in header order.
    pub fn playable_columns(&self) -> Vec<usize> {
        (0..self.header.len())
            .filter(|&c| !self.is_identifier_column(c))
            .collect()
    }
}

/// Stable pair identifier: the grid row index the pair was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairId(pub usize);

impl fmt::Display for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p-{}", self.0)
    }
}

/// One matchable unit: a data row's values for the active columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    pub id: PairId,
    pub values: BTreeMap<usize, String>,
}

impl Pair {
    /// Value shown for a column.
    pub fn value(&self, column: usize) -> &str {
        self.values.get(&column).map(String::as_str).unwrap_or_default()
    }
}

/// Reference to a card on the board: which lane, which pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardRef {
    pub lane: usize,
    pub pair: PairId,
}

impl CardRef {
    pub fn new(lane: usize, pair: PairId) -> Self {
        Self { lane, pair }
    }
}

/// A visible card in one lane of the current window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub pair: PairId,
    pub text: String,
    /// Dataset column the text comes from.
    pub column: usize,
    /// Position of the column among the active slots.
    pub lane: usize,
    /// Rendering slot assigned when the card entered the window.
    pub slot: usize,
    /// Newly revealed, cleared by a timer.
    pub fresh: bool,
}

impl Card {
    pub fn card_ref(&self) -> CardRef {
        CardRef::new(self.lane, self.pair)
    }
}
