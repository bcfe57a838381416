//! Engine configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How matched cards are replaced with backlog pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefillStrategy {
    /// Replace the oldest matched slots after every `refill_threshold` matches.
    Threshold,
    /// Load a whole new window when the page is done.
    Page,
}

impl Default for RefillStrategy {
    fn default() -> Self {
        Self::Threshold
    }
}

impl RefillStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Threshold => "threshold",
            Self::Page => "page",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "threshold" => Some(Self::Threshold),
            "page" => Some(Self::Page),
            _ => None,
        }
    }
}

/// Delays for timed transitions, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timings {
    pub mismatch_ms: u64,
    pub refill_delay_ms: u64,
    pub fresh_clear_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            mismatch_ms: 500,
            refill_delay_ms: 300,
            fresh_clear_ms: 600,
        }
    }
}

impl Timings {
    pub fn mismatch(&self) -> Duration {
        Duration::from_millis(self.mismatch_ms)
    }

    pub fn refill_delay(&self) -> Duration {
        Duration::from_millis(self.refill_delay_ms)
    }

    pub fn fresh_clear(&self) -> Duration {
        Duration::from_millis(self.fresh_clear_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub window_size: usize,
    pub refill_threshold: usize,
    pub refill_strategy: RefillStrategy,
    /// Page strategy only: advance after this many matches on one page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_quota: Option<usize>,
    /// Page strategy only: reshuffle the backlog when a page is replaced.
    pub reshuffle_on_page: bool,
    /// Keep row order instead of shuffling the pairs.
    pub ordered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default)]
    pub timings: Timings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_size: 5,
            refill_threshold: 3,
            refill_strategy: RefillStrategy::default(),
            page_quota: None,
            reshuffle_on_page: true,
            ordered: false,
            seed: None,
            timings: Timings::default(),
        }
    }
}

impl EngineConfig {
    /// Clamp sizes into a playable range.
    pub fn validated(mut self) -> Self {
        self.window_size = self.window_size.max(1);
        self.refill_threshold = self.refill_threshold.clamp(1, self.window_size);
        self.page_quota = self.page_quota.map(|q| q.max(1));
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_ordered(mut self, ordered: bool) -> Self {
        self.ordered = ordered;
        self
    }
}
