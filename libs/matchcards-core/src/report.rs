//! Attempt tracking and the completion report.

use crate::types::PairId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Attempts made on a single pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub attempts: u32,
    /// The first evaluation involving this pair was a match.
    pub first_try: bool,
}

/// Per-pair attempt counters accumulated during play.
#[derive(Debug, Clone, Default)]
pub struct AttemptTracker {
    records: HashMap<PairId, AttemptRecord>,
}

impl AttemptTracker {
    pub fn record(&mut self, pair: PairId, correct: bool) {
        let record = self.records.entry(pair).or_insert(AttemptRecord {
            attempts: 0,
            first_try: correct,
        });
        record.attempts += 1;
    }

    pub fn get(&self, pair: PairId) -> Option<AttemptRecord> {
        self.records.get(&pair).copied()
    }

    pub fn attempted(&self) -> usize {
        self.records.len()
    }

    pub fn first_try(&self) -> usize {
        self.records.values().filter(|r| r.first_try).count()
    }

    /// First-try pairs over attempted pairs, as a percentage.
    pub fn accuracy_percent(&self) -> f64 {
        let attempted = self.attempted();
        if attempted == 0 {
            return 100.0;
        }
        self.first_try() as f64 / attempted as f64 * 100.0
    }
}

/// Summary handed to the progress log once every pair is matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionReport {
    pub total_pairs: usize,
    pub elapsed_seconds: i64,
    pub accuracy_percent: f64,
    pub ordered_mode: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CompletionReport {
    pub fn new(
        total_pairs: usize,
        attempts: &AttemptTracker,
        ordered_mode: bool,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        Self {
            total_pairs,
            elapsed_seconds: (finished_at - started_at).num_seconds().max(0),
            accuracy_percent: attempts.accuracy_percent(),
            ordered_mode,
            started_at,
            finished_at,
        }
    }
}
