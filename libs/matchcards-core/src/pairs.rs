//! Pair derivation from a dataset.

use crate::columns::MIN_ACTIVE_COLUMNS;
use crate::error::{GameError, Result};
use crate::range::encode_ranges;
use crate::types::{Dataset, Pair, PairId};
use serde::{Deserialize, Serialize};

/// Pairs derived for one session, in row order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairSet {
    pub pairs: Vec<Pair>,
    /// Coverage string of the requested row subset, when one was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
}

/// Derive one pair per qualifying data row.
///
/// A row qualifies when every active column holds a non-empty value. When
/// `rows` is given only those grid rows are considered; header and
/// out-of-range indices are skipped.
pub fn derive_pairs(dataset: &Dataset, active: &[usize], rows: Option<&[usize]>) -> Result<PairSet> {
    if active.len() < MIN_ACTIVE_COLUMNS {
        return Err(GameError::TooFewColumns { active: active.len() });
    }

    let (candidates, range) = match rows {
        Some(rows) => {
            let mut subset: Vec<usize> = rows
                .iter()
                .copied()
                .filter(|&r| r >= 1 && r <= dataset.data_len())
                .collect();
            subset.sort_unstable();
            subset.dedup();
            let range = encode_ranges(&subset);
            (subset, Some(range))
        }
        None => ((1..=dataset.data_len()).collect(), None),
    };

    let pairs: Vec<Pair> = candidates
        .into_iter()
        .filter_map(|row| build_pair(dataset, active, row))
        .collect();

    if pairs.is_empty() {
        return Err(GameError::NoPlayablePairs);
    }
    Ok(PairSet { pairs, range })
}

fn build_pair(dataset: &Dataset, active: &[usize], row: usize) -> Option<Pair> {
    let mut values = std::collections::BTreeMap::new();
    for &column in active {
        let value = dataset.cell(row, column)?;
        if value.is_empty() {
            return None;
        }
        values.insert(column, value.to_string());
    }
    Some(Pair { id: PairId(row), values })
}
