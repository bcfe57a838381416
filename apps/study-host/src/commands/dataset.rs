//! Dataset commands.

use super::CommandError;
use crate::dataset::load_csv;
use crate::state::AppState;
use matchcards_core::Dataset;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub index: usize,
    pub name: String,
    pub playable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    pub columns: Vec<ColumnInfo>,
    pub rows: usize,
}

impl DatasetSummary {
    fn of(dataset: &Dataset) -> Self {
        let columns = dataset
            .header()
            .iter()
            .enumerate()
            .map(|(index, name)| ColumnInfo {
                index,
                name: name.clone(),
                playable: !dataset.is_identifier_column(index),
            })
            .collect();
        Self {
            columns,
            rows: dataset.data_len(),
        }
    }
}

/// Load a CSV file as the current dataset.
///
/// A running session keeps the dataset it was started with.
pub async fn import_dataset(
    file_path: String,
    state: &AppState,
) -> Result<DatasetSummary, CommandError> {
    let dataset = load_csv(&file_path)?;
    let summary = DatasetSummary::of(&dataset);
    info!(path = %file_path, rows = summary.rows, "dataset imported");

    *state.dataset.lock().expect("dataset lock") = Some(Arc::new(dataset));
    Ok(summary)
}

/// Summary of the current dataset, if one is loaded.
pub async fn get_dataset(state: &AppState) -> Result<Option<DatasetSummary>, CommandError> {
    Ok(state.current_dataset().map(|d| DatasetSummary::of(&d)))
}
