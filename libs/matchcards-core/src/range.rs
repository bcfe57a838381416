//! Row range strings such as `1-5,8,10-12`.

use crate::error::{GameError, Result};

/// Run-length encode a set of row indices.
pub fn encode_ranges(rows: &[usize]) -> String {
    let mut sorted = rows.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut parts = Vec::new();
    let mut iter = sorted.into_iter();
    let Some(first) = iter.next() else {
        return String::new();
    };

    let (mut start, mut end) = (first, first);
    for row in iter {
        if row == end + 1 {
            end = row;
        } else {
            parts.push(format_span(start, end));
            start = row;
            end = row;
        }
    }
    parts.push(format_span(start, end));
    parts.join(",")
}

fn format_span(start: usize, end: usize) -> String {
    if start == end {
        start.to_string()
    } else {
        format!("{start}-{end}")
    }
}

/// Expand a range string into sorted, deduplicated row indices.
///
/// Rows above `max_row` are dropped and spans are clamped to it, so the
/// output never holds more than `max_row + 1` entries.
pub fn parse_ranges(value: &str, max_row: usize) -> Result<Vec<usize>> {
    let invalid = || GameError::InvalidRange { value: value.to_string() };
    let mut rows = Vec::new();

    for item in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match item.split_once('-') {
            Some((a, b)) => {
                let a: usize = a.trim().parse().map_err(|_| invalid())?;
                let b: usize = b.trim().parse().map_err(|_| invalid())?;
                let (start, end) = (a.min(b), a.max(b).min(max_row));
                if start <= end {
                    rows.extend(start..=end);
                }
            }
            None => {
                let row: usize = item.parse().map_err(|_| invalid())?;
                if row <= max_row {
                    rows.push(row);
                }
            }
        }
    }

    rows.sort_unstable();
    rows.dedup();
    Ok(rows)
}
