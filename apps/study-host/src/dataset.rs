//! CSV dataset loading.
//!
//! The first record is the header. Records may be ragged; short rows simply
//! have missing cells, which disqualify them for the columns they lack.

use matchcards_core::{Dataset, GameError};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Game(#[from] GameError),
}

/// Load a dataset from a CSV file.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Dataset, DatasetError> {
    let file = File::open(path)?;
    parse_csv(file)
}

/// Parse a dataset from CSV text.
pub fn parse_csv<R: Read>(reader: R) -> Result<Dataset, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record?;
        grid.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    Ok(Dataset::from_grid(grid)?)
}
