//! Window loading and the two refill strategies.

use super::timer::{ScheduledTimer, TimerKind};
use super::MatchingSession;
use crate::config::RefillStrategy;
use crate::shuffle::shuffled;
use crate::types::{Card, Pair, PairId};
use tracing::debug;

impl MatchingSession {
    /// Move up to `window_size` pairs from the backlog onto the board.
    pub(super) fn load_window(&mut self, fresh: bool) {
        let take = self.config.window_size.min(self.backlog.len());
        self.window = self.backlog.drain(..take).collect();

        let mut lanes = Vec::with_capacity(self.columns.active_count());
        for (lane, column) in self.columns.active().into_iter().enumerate() {
            let cards: Vec<Card> = self
                .window
                .iter()
                .map(|pair| Card {
                    pair: pair.id,
                    text: pair.value(column).to_string(),
                    column,
                    lane,
                    slot: 0,
                    fresh,
                })
                .collect();
            let mut cards = shuffled(&cards, &mut self.rng);
            for (slot, card) in cards.iter_mut().enumerate() {
                card.slot = slot;
            }
            lanes.push(cards);
        }
        self.lanes = lanes;
    }

    /// Schedule the next refill if the active strategy calls for one.
    pub(super) fn schedule_refill(&mut self) -> Option<ScheduledTimer> {
        if self.refill_pending || self.backlog.is_empty() {
            return None;
        }

        let kind = match self.config.refill_strategy {
            RefillStrategy::Threshold => {
                (self.since_refill >= self.config.refill_threshold).then_some(TimerKind::Refill)
            }
            RefillStrategy::Page => {
                let page_done = self.window.iter().all(|p| self.matched.contains(&p.id));
                let quota_reached = self
                    .config
                    .page_quota
                    .map(|quota| self.page_matches >= quota)
                    .unwrap_or(false);
                (page_done || quota_reached).then_some(TimerKind::AdvancePage)
            }
        }?;

        self.refill_pending = true;
        Some(self.timers.schedule(kind, self.config.timings.refill_delay()))
    }

    /// Threshold refill: swap the oldest matched cards for backlog pairs.
    pub(super) fn refill_slots(&mut self) -> Option<ScheduledTimer> {
        let count = self
            .config
            .refill_threshold
            .min(self.matched.len())
            .min(self.backlog.len());
        if count == 0 {
            return None;
        }

        let retired: Vec<PairId> = self.matched.drain(..count).collect();
        let incoming: Vec<Pair> = self.backlog.drain(..count).collect();
        self.window.retain(|p| !retired.contains(&p.id));
        self.window.extend(incoming.iter().cloned());

        let ordered = self.config.ordered;
        for (lane_idx, column) in self.columns.active().into_iter().enumerate() {
            let order = if ordered {
                incoming.clone()
            } else {
                shuffled(&incoming, &mut self.rng)
            };
            let lane = &mut self.lanes[lane_idx];
            let freed: Vec<usize> = lane
                .iter()
                .enumerate()
                .filter(|(_, card)| retired.contains(&card.pair))
                .map(|(pos, _)| pos)
                .collect();
            for (pos, pair) in freed.into_iter().zip(order.iter()) {
                let slot = lane[pos].slot;
                lane[pos] = Card {
                    pair: pair.id,
                    text: pair.value(column).to_string(),
                    column,
                    lane: lane_idx,
                    slot,
                    fresh: true,
                };
            }
        }

        self.since_refill = self.since_refill.saturating_sub(self.config.refill_threshold);
        debug!(
            session = %self.timers.session(),
            replaced = count,
            backlog = self.backlog.len(),
            "refilled matched slots"
        );
        Some(self.fresh_timer())
    }

    /// Page refill: return unmatched pairs to the backlog and deal a new window.
    pub(super) fn advance_page(&mut self) -> Option<ScheduledTimer> {
        if self.backlog.is_empty() {
            return None;
        }

        let leftovers: Vec<Pair> = self
            .window
            .drain(..)
            .filter(|p| !self.matched.contains(&p.id))
            .collect();
        self.matched.clear();
        self.selection.fill(None);
        self.page_matches = 0;
        self.since_refill = 0;
        self.backlog.extend(leftovers);

        if self.config.reshuffle_on_page && !self.config.ordered {
            let pending: Vec<Pair> = self.backlog.drain(..).collect();
            self.backlog = shuffled(&pending, &mut self.rng).into();
        }

        self.load_window(true);
        debug!(
            session = %self.timers.session(),
            window = self.window.len(),
            backlog = self.backlog.len(),
            "advanced page"
        );
        Some(self.fresh_timer())
    }

    fn fresh_timer(&mut self) -> ScheduledTimer {
        self.timers
            .schedule(TimerKind::ClearFresh, self.config.timings.fresh_clear())
    }
}
