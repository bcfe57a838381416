//! Column slot selection.
//!
//! A selection is an ordered list of slots; each slot shows one dataset column
//! or is blank. At least two slots must show a column at all times, and every
//! change that would break this is rejected without touching the selection.

use crate::error::{GameError, Result};
use crate::types::Dataset;
use serde::{Deserialize, Serialize};

/// Minimum number of non-blank slots.
pub const MIN_ACTIVE_COLUMNS: usize = 2;

/// Token used for blank slots in the encoded form.
const BLANK_TOKEN: &str = "null";

/// A change requested on one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnChange {
    /// Show a column in the slot.
    Set { slot: usize, column: usize },
    /// Keep the slot but leave it empty.
    Blank { slot: usize },
    /// Drop the slot and append a blank one at the end.
    Remove { slot: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnSelection {
    slots: Vec<Option<usize>>,
}

impl ColumnSelection {
    /// Every playable column in header order.
    pub fn auto(dataset: &Dataset) -> Result<Self> {
        let slots: Vec<Option<usize>> = dataset.playable_columns().into_iter().map(Some).collect();
        Self::checked(slots)
    }

    /// Validate a caller-supplied selection against the dataset.
    pub fn from_slots(dataset: &Dataset, slots: Vec<Option<usize>>) -> Result<Self> {
        for column in slots.iter().flatten() {
            dataset.check_playable(*column)?;
        }
        Self::checked(slots)
    }

    fn checked(slots: Vec<Option<usize>>) -> Result<Self> {
        let active = slots.iter().flatten().count();
        if active < MIN_ACTIVE_COLUMNS {
            return Err(GameError::TooFewColumns { active });
        }
        Ok(Self { slots })
    }

    pub fn slots(&self) -> &[Option<usize>] {
        &self.slots
    }

    /// Non-blank columns in slot order. Each one becomes a lane on the board.
    pub fn active(&self) -> Vec<usize> {
        self.slots.iter().flatten().copied().collect()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Apply a change. Returns `Ok(false)` when the change is a no-op.
    pub fn apply(&mut self, dataset: &Dataset, change: ColumnChange) -> Result<bool> {
        let next = self.preview(dataset, change)?;
        if next == *self {
            return Ok(false);
        }
        *self = next;
        Ok(true)
    }

    /// Compute the selection a change would produce without applying it.
    pub fn preview(&self, dataset: &Dataset, change: ColumnChange) -> Result<Self> {
        let slot = match change {
            ColumnChange::Set { slot, .. }
            | ColumnChange::Blank { slot }
            | ColumnChange::Remove { slot } => slot,
        };
        if slot >= self.slots.len() {
            return Err(GameError::SlotOutOfRange { slot });
        }

        let mut next = self.slots.clone();
        match change {
            ColumnChange::Set { column, .. } => {
                dataset.check_playable(column)?;
                next[slot] = Some(column);
            }
            ColumnChange::Blank { .. } | ColumnChange::Remove { .. } if next[slot].is_none() => {
                return Ok(self.clone());
            }
            ColumnChange::Blank { .. } => {
                self.ensure_can_drop()?;
                next[slot] = None;
            }
            ColumnChange::Remove { .. } => {
                self.ensure_can_drop()?;
                next.remove(slot);
                next.push(None);
            }
        }
        Ok(Self { slots: next })
    }

    fn ensure_can_drop(&self) -> Result<()> {
        let active = self.active_count();
        if active <= MIN_ACTIVE_COLUMNS {
            return Err(GameError::TooFewColumns { active: active.saturating_sub(1) });
        }
        Ok(())
    }

    /// Comma-separated form used in the study log, e.g. `1,2,null`.
    pub fn encode(&self) -> String {
        self.slots
            .iter()
            .map(|s| match s {
                Some(c) => c.to_string(),
                None => BLANK_TOKEN.to_string(),
            })
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Parse the encoded form into raw slots. Validation against a dataset
    /// happens in [`ColumnSelection::from_slots`].
    pub fn decode(value: &str) -> Result<Vec<Option<usize>>> {
        let invalid = || GameError::InvalidColumnList { value: value.to_string() };
        if value.trim().is_empty() {
            return Err(invalid());
        }
        value
            .split(',')
            .map(str::trim)
            .map(|item| match item {
                BLANK_TOKEN => Ok(None),
                _ => item.parse::<usize>().map(Some).map_err(|_| invalid()),
            })
            .collect()
    }
}
