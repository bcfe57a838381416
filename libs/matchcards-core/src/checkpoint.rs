//! Progress milestones at one and two thirds of a session.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A one-time progress notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Match count that triggered the milestone.
    pub reached: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoints {
    total: usize,
    thresholds: Vec<usize>,
    passed: BTreeSet<usize>,
}

impl Checkpoints {
    pub fn new(total: usize) -> Self {
        let mut thresholds = if total > 3 {
            vec![total / 3, 2 * total / 3, total]
        } else {
            vec![total]
        };
        thresholds.retain(|&t| t > 0);
        thresholds.dedup();
        Self {
            total,
            thresholds,
            passed: BTreeSet::new(),
        }
    }

    pub fn thresholds(&self) -> &[usize] {
        &self.thresholds
    }

    /// Record the current match count. Returns a milestone the first time an
    /// intermediate checkpoint is reached. The final checkpoint is recorded
    /// but never reported; completion covers it.
    pub fn record(&mut self, matched: usize) -> Option<Milestone> {
        let mut fired = None;
        for &threshold in &self.thresholds {
            if matched < threshold || !self.passed.insert(threshold) {
                continue;
            }
            if threshold < self.total {
                fired = Some(Milestone {
                    reached: threshold,
                    total: self.total,
                });
            }
        }
        fired
    }

    pub fn is_passed(&self, threshold: usize) -> bool {
        self.passed.contains(&threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirty_pairs_fire_at_ten_and_twenty_once() {
        let mut cp = Checkpoints::new(30);
        assert_eq!(cp.thresholds(), &[10, 20, 30]);

        let fired: Vec<usize> = (1..=30)
            .filter_map(|n| cp.record(n))
            .map(|m| m.reached)
            .collect();
        assert_eq!(fired, vec![10, 20]);

        assert_eq!(cp.record(10), None);
        assert_eq!(cp.record(20), None);
        assert!(cp.is_passed(30));
    }

    #[test]
    fn small_sessions_only_have_final() {
        assert_eq!(Checkpoints::new(3).thresholds(), &[3]);
        let mut cp = Checkpoints::new(2);
        assert_eq!(cp.record(1), None);
        assert_eq!(cp.record(2), None);
    }

    #[test]
    fn four_pairs() {
        let mut cp = Checkpoints::new(4);
        assert_eq!(cp.thresholds(), &[1, 2, 4]);
        assert_eq!(cp.record(1).map(|m| m.reached), Some(1));
        assert_eq!(cp.record(2).map(|m| m.reached), Some(2));
    }

    #[test]
    fn empty_session_has_no_thresholds() {
        assert!(Checkpoints::new(0).thresholds().is_empty());
    }
}
