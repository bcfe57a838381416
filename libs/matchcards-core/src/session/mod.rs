//! Matching game session.
//!
//! A session turns the pairs derived from a dataset into lanes of cards, one
//! lane per active column. The player picks one card per lane; when every
//! lane has a pick the selection is evaluated. Matched cards stay on the board
//! as inert cards until a refill swaps them for backlog pairs.
//!
//! All transitions are synchronous. Delayed ones (mismatch flash, refill,
//! fresh-card flag) are returned as [`ScheduledTimer`]s and applied through
//! [`MatchingSession::fire`].

mod refill;
pub mod timer;

pub use timer::{ScheduledTimer, SessionId, TimerKind, TimerToken};

use crate::checkpoint::{Checkpoints, Milestone};
use crate::columns::{ColumnChange, ColumnSelection};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::log::{ResumeInstruction, SessionDescriptors};
use crate::pairs::{derive_pairs, PairSet};
use crate::report::{AttemptRecord, AttemptTracker, CompletionReport};
use crate::shuffle::{session_rng, shuffled};
use crate::types::{Card, CardRef, Dataset, Pair, PairId};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};
use std::sync::Arc;
use timer::TimerBook;
use tracing::debug;

/// Which columns and rows a session plays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSetup {
    /// Explicit column slots. `None` selects every playable column.
    #[serde(default)]
    pub columns: Option<Vec<Option<usize>>>,
    /// Grid row subset. `None` plays the whole dataset.
    #[serde(default)]
    pub rows: Option<Vec<usize>>,
}

impl SessionSetup {
    pub fn full() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<usize>) -> Self {
        Self {
            columns: None,
            rows: Some(rows),
        }
    }

    pub fn resume(instruction: ResumeInstruction) -> Self {
        Self {
            columns: Some(instruction.columns),
            rows: instruction.rows,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    Finished,
    UnknownCard,
    AlreadyMatched,
    ShowingMismatch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClickEvent {
    Ignored {
        reason: IgnoreReason,
    },
    Selected,
    Deselected,
    Replaced {
        previous: PairId,
    },
    Matched {
        pair: PairId,
        milestone: Option<Milestone>,
        report: Option<CompletionReport>,
    },
    Mismatched {
        cards: Vec<CardRef>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickOutcome {
    pub event: ClickEvent,
    pub timers: Vec<ScheduledTimer>,
}

impl ClickOutcome {
    fn ignored(reason: IgnoreReason) -> Self {
        Self::plain(ClickEvent::Ignored { reason })
    }

    fn plain(event: ClickEvent) -> Self {
        Self {
            event,
            timers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimerOutcome {
    /// The token belongs to a discarded session or was already used.
    Stale,
    Applied {
        kind: TimerKind,
        timers: Vec<ScheduledTimer>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub total: usize,
    pub matched: usize,
    pub backlog: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardSnapshot {
    pub pair: PairId,
    pub text: String,
    pub slot: usize,
    pub selected: bool,
    pub wrong: bool,
    pub matched: bool,
    pub fresh: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneSnapshot {
    pub lane: usize,
    pub column: usize,
    pub header: String,
    pub cards: Vec<CardSnapshot>,
}

/// Render-ready view of the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub session_id: SessionId,
    pub columns: Vec<Option<usize>>,
    pub lanes: Vec<LaneSnapshot>,
    pub progress: Progress,
    pub finished: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
}

pub struct MatchingSession {
    dataset: Arc<Dataset>,
    rows: Option<Vec<usize>>,
    config: EngineConfig,
    columns: ColumnSelection,
    rng: StdRng,
    timers: TimerBook,
    total: usize,
    range: Option<String>,
    backlog: VecDeque<Pair>,
    window: Vec<Pair>,
    lanes: Vec<Vec<Card>>,
    selection: Vec<Option<PairId>>,
    wrong: Vec<CardRef>,
    /// Matched pairs still on the board, oldest first.
    matched: Vec<PairId>,
    matched_total: usize,
    since_refill: usize,
    page_matches: usize,
    refill_pending: bool,
    checkpoints: Checkpoints,
    attempts: AttemptTracker,
    started_at: DateTime<Utc>,
    report: Option<CompletionReport>,
}

impl MatchingSession {
    /// Start a session. Fails when the setup leaves fewer than two columns or
    /// no playable pair.
    pub fn start(
        dataset: Arc<Dataset>,
        setup: SessionSetup,
        config: EngineConfig,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let config = config.validated();
        let columns = match setup.columns {
            Some(slots) => ColumnSelection::from_slots(&dataset, slots)?,
            None => ColumnSelection::auto(&dataset)?,
        };
        let pair_set = derive_pairs(&dataset, &columns.active(), setup.rows.as_deref())?;

        let mut session = Self {
            rng: session_rng(config.seed),
            dataset,
            rows: setup.rows,
            config,
            columns,
            timers: TimerBook::default(),
            total: 0,
            range: None,
            backlog: VecDeque::new(),
            window: Vec::new(),
            lanes: Vec::new(),
            selection: Vec::new(),
            wrong: Vec::new(),
            matched: Vec::new(),
            matched_total: 0,
            since_refill: 0,
            page_matches: 0,
            refill_pending: false,
            checkpoints: Checkpoints::new(0),
            attempts: AttemptTracker::default(),
            started_at: now,
            report: None,
        };
        session.reset_with(pair_set, now);
        Ok(session)
    }

    /// Throw away all progress and deal the same pairs again.
    pub fn restart(&mut self, now: DateTime<Utc>) -> Result<()> {
        let pair_set = derive_pairs(&self.dataset, &self.columns.active(), self.rows.as_deref())?;
        self.reset_with(pair_set, now);
        Ok(())
    }

    /// Change one column slot and rebuild the session.
    ///
    /// Rejected changes, including ones that leave no playable pair, keep the
    /// current session untouched. Returns `Ok(false)` for no-op changes.
    pub fn reconfigure(&mut self, change: ColumnChange, now: DateTime<Utc>) -> Result<bool> {
        let next = self.columns.preview(&self.dataset, change)?;
        if next == self.columns {
            return Ok(false);
        }
        let pair_set = derive_pairs(&self.dataset, &next.active(), self.rows.as_deref())?;
        self.columns = next;
        self.reset_with(pair_set, now);
        Ok(true)
    }

    fn reset_with(&mut self, pair_set: PairSet, now: DateTime<Utc>) {
        self.timers.reset();

        let pairs = if self.config.ordered {
            pair_set.pairs
        } else {
            shuffled(&pair_set.pairs, &mut self.rng)
        };
        self.total = pairs.len();
        self.range = pair_set.range;
        self.backlog = pairs.into();
        self.window.clear();
        self.selection = vec![None; self.columns.active_count()];
        self.wrong.clear();
        self.matched.clear();
        self.matched_total = 0;
        self.since_refill = 0;
        self.page_matches = 0;
        self.refill_pending = false;
        self.checkpoints = Checkpoints::new(self.total);
        self.attempts = AttemptTracker::default();
        self.started_at = now;
        self.report = None;

        self.load_window(false);
        debug!(
            session = %self.timers.session(),
            total = self.total,
            columns = %self.columns.encode(),
            "session started"
        );
    }

    /// Handle a click on a card.
    pub fn click(&mut self, card: CardRef, now: DateTime<Utc>) -> ClickOutcome {
        if self.report.is_some() {
            return ClickOutcome::ignored(IgnoreReason::Finished);
        }
        if !self.wrong.is_empty() {
            return ClickOutcome::ignored(IgnoreReason::ShowingMismatch);
        }
        let on_board = self
            .lanes
            .get(card.lane)
            .map(|lane| lane.iter().any(|c| c.pair == card.pair))
            .unwrap_or(false);
        if !on_board {
            return ClickOutcome::ignored(IgnoreReason::UnknownCard);
        }
        if self.matched.contains(&card.pair) {
            return ClickOutcome::ignored(IgnoreReason::AlreadyMatched);
        }

        let event = match self.selection[card.lane] {
            Some(current) if current == card.pair => {
                self.selection[card.lane] = None;
                return ClickOutcome::plain(ClickEvent::Deselected);
            }
            Some(previous) => {
                self.selection[card.lane] = Some(card.pair);
                ClickEvent::Replaced { previous }
            }
            None => {
                self.selection[card.lane] = Some(card.pair);
                ClickEvent::Selected
            }
        };

        if self.selection.iter().all(Option::is_some) {
            return self.evaluate(now);
        }
        ClickOutcome::plain(event)
    }

    fn evaluate(&mut self, now: DateTime<Utc>) -> ClickOutcome {
        let picked: BTreeSet<PairId> = self.selection.iter().flatten().copied().collect();
        let matched_pair = match picked.len() {
            1 => picked.first().copied(),
            _ => None,
        };
        for &pair in &picked {
            self.attempts.record(pair, matched_pair.is_some());
        }

        let Some(pair) = matched_pair else {
            self.wrong = self
                .selection
                .iter()
                .enumerate()
                .filter_map(|(lane, pair)| pair.map(|p| CardRef::new(lane, p)))
                .collect();
            let timer = self
                .timers
                .schedule(TimerKind::ClearWrong, self.config.timings.mismatch());
            debug!(session = %self.timers.session(), "mismatch");
            return ClickOutcome {
                event: ClickEvent::Mismatched {
                    cards: self.wrong.clone(),
                },
                timers: vec![timer],
            };
        };

        self.selection.fill(None);
        self.matched.push(pair);
        self.matched_total += 1;
        self.since_refill += 1;
        self.page_matches += 1;
        let milestone = self.checkpoints.record(self.matched_total);
        debug!(
            session = %self.timers.session(),
            pair = %pair,
            matched = self.matched_total,
            total = self.total,
            "pair matched"
        );

        if self.matched_total == self.total {
            let report = self.finish(now);
            return ClickOutcome::plain(ClickEvent::Matched {
                pair,
                milestone,
                report: Some(report),
            });
        }

        let timers = self.schedule_refill().into_iter().collect();
        ClickOutcome {
            event: ClickEvent::Matched {
                pair,
                milestone,
                report: None,
            },
            timers,
        }
    }

    fn finish(&mut self, now: DateTime<Utc>) -> CompletionReport {
        if let Some(report) = &self.report {
            return report.clone();
        }
        let report = CompletionReport::new(
            self.total,
            &self.attempts,
            self.config.ordered,
            self.started_at,
            now,
        );
        debug!(
            session = %self.timers.session(),
            accuracy = report.accuracy_percent,
            elapsed = report.elapsed_seconds,
            "session finished"
        );
        self.report = Some(report.clone());
        report
    }

    /// Apply a delayed transition. Stale tokens are ignored.
    pub fn fire(&mut self, token: TimerToken, _now: DateTime<Utc>) -> TimerOutcome {
        let Some(kind) = self.timers.take(token) else {
            return TimerOutcome::Stale;
        };

        let mut timers = Vec::new();
        match kind {
            TimerKind::ClearWrong => {
                self.wrong.clear();
                self.selection.fill(None);
            }
            TimerKind::Refill => {
                self.refill_pending = false;
                timers.extend(self.refill_slots());
                timers.extend(self.schedule_refill());
            }
            TimerKind::AdvancePage => {
                self.refill_pending = false;
                timers.extend(self.advance_page());
            }
            TimerKind::ClearFresh => {
                for card in self.lanes.iter_mut().flatten() {
                    card.fresh = false;
                }
            }
        }
        TimerOutcome::Applied { kind, timers }
    }

    pub fn id(&self) -> SessionId {
        self.timers.session()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn columns(&self) -> &ColumnSelection {
        &self.columns
    }

    pub fn lanes(&self) -> &[Vec<Card>] {
        &self.lanes
    }

    /// Current pick per lane.
    pub fn selection(&self) -> &[Option<PairId>] {
        &self.selection
    }

    pub fn wrong(&self) -> &[CardRef] {
        &self.wrong
    }

    /// Matched pairs still visible, oldest first.
    pub fn matched_on_board(&self) -> &[PairId] {
        &self.matched
    }

    /// Pairs loaded in the current window.
    pub fn window(&self) -> impl Iterator<Item = PairId> + '_ {
        self.window.iter().map(|p| p.id)
    }

    pub fn backlog_len(&self) -> usize {
        self.backlog.len()
    }

    pub fn total_pairs(&self) -> usize {
        self.total
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn attempts(&self, pair: PairId) -> Option<AttemptRecord> {
        self.attempts.get(pair)
    }

    pub fn is_finished(&self) -> bool {
        self.report.is_some()
    }

    pub fn report(&self) -> Option<&CompletionReport> {
        self.report.as_ref()
    }

    pub fn progress(&self) -> Progress {
        let percent = if self.total == 0 {
            0.0
        } else {
            self.matched_total as f64 / self.total as f64 * 100.0
        };
        Progress {
            total: self.total,
            matched: self.matched_total,
            backlog: self.backlog.len(),
            percent,
        }
    }

    pub fn descriptors(&self) -> SessionDescriptors {
        SessionDescriptors {
            columns: self.columns.encode(),
            range: self.range.clone(),
        }
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let lanes = self
            .lanes
            .iter()
            .enumerate()
            .map(|(lane, cards)| {
                let column = cards
                    .first()
                    .map(|c| c.column)
                    .unwrap_or_else(|| self.columns.active()[lane]);
                LaneSnapshot {
                    lane,
                    column,
                    header: self.dataset.column_name(column).unwrap_or_default().to_string(),
                    cards: cards
                        .iter()
                        .map(|c| CardSnapshot {
                            pair: c.pair,
                            text: c.text.clone(),
                            slot: c.slot,
                            selected: self.selection[lane] == Some(c.pair),
                            wrong: self.wrong.contains(&c.card_ref()),
                            matched: self.matched.contains(&c.pair),
                            fresh: c.fresh,
                        })
                        .collect(),
                }
            })
            .collect();

        BoardSnapshot {
            session_id: self.id(),
            columns: self.columns.slots().to_vec(),
            lanes,
            progress: self.progress(),
            finished: self.is_finished(),
            range: self.range.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    pub(super) fn vocab(rows: usize) -> Arc<Dataset> {
        let mut grid = vec![vec![
            "CardID".to_string(),
            "English".to_string(),
            "French".to_string(),
        ]];
        for i in 1..=rows {
            grid.push(vec![i.to_string(), format!("en{i}"), format!("fr{i}")]);
        }
        Arc::new(Dataset::from_grid(grid).unwrap())
    }

    pub(super) fn seeded() -> EngineConfig {
        EngineConfig::default().with_seed(11)
    }

    /// Pick the card of `pair` in every lane.
    pub(super) fn solve(session: &mut MatchingSession, pair: PairId, now: DateTime<Utc>) -> ClickOutcome {
        let lanes = session.lanes().len();
        let mut last = None;
        for lane in 0..lanes {
            last = Some(session.click(CardRef::new(lane, pair), now));
        }
        last.expect("at least two lanes")
    }

    /// Fire timers (and the ones they schedule) until none remain.
    pub(super) fn drain(session: &mut MatchingSession, mut timers: Vec<ScheduledTimer>, now: DateTime<Utc>) {
        while let Some(timer) = timers.pop() {
            if let TimerOutcome::Applied { timers: next, .. } = session.fire(timer.token, now) {
                timers.extend(next);
            }
        }
    }

    pub(super) fn unmatched_on_board(session: &MatchingSession) -> Vec<PairId> {
        session.lanes()[0]
            .iter()
            .map(|c| c.pair)
            .filter(|p| !session.matched_on_board().contains(p))
            .collect()
    }

    #[test]
    fn english_french_scenario() {
        let now = Utc::now();
        let mut session =
            MatchingSession::start(vocab(5), SessionSetup::full(), seeded(), now).unwrap();

        assert_eq!(session.total_pairs(), 5);
        assert_eq!(session.columns().active(), vec![1, 2]);
        assert_eq!(session.lanes().len(), 2);
        assert!(session.lanes().iter().all(|lane| lane.len() == 5));

        let mut report = None;
        for row in 1..=5 {
            let outcome = solve(&mut session, PairId(row), now + Duration::seconds(row as i64));
            if let ClickEvent::Matched { report: r, .. } = outcome.event {
                report = r;
            } else {
                panic!("expected a match for row {row}");
            }
        }

        let report = report.expect("completion report");
        assert!(session.is_finished());
        assert_eq!(report.total_pairs, 5);
        assert_eq!(report.accuracy_percent, 100.0);
        assert_eq!(report.elapsed_seconds, 5);
        assert!(!report.ordered_mode);
    }

    #[test]
    fn card_texts_come_from_their_column() {
        let session =
            MatchingSession::start(vocab(3), SessionSetup::full(), seeded(), Utc::now()).unwrap();
        for card in &session.lanes()[1] {
            assert_eq!(card.text, format!("fr{}", card.pair.0));
            assert_eq!(card.column, 2);
            assert_eq!(card.lane, 1);
        }
    }

    #[test]
    fn window_is_capped() {
        let session =
            MatchingSession::start(vocab(12), SessionSetup::full(), seeded(), Utc::now()).unwrap();
        assert!(session.lanes().iter().all(|lane| lane.len() == 5));
        assert_eq!(session.backlog_len(), 7);

        let mut window: Vec<PairId> = session.window().collect();
        window.sort();
        window.dedup();
        assert_eq!(window.len(), 5);
    }

    #[test]
    fn ordered_mode_keeps_row_order() {
        let config = seeded().with_ordered(true);
        let session =
            MatchingSession::start(vocab(8), SessionSetup::full(), config, Utc::now()).unwrap();
        let window: Vec<usize> = session.window().map(|p| p.0).collect();
        assert_eq!(window, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn click_toggles_and_replaces_within_lane() {
        let now = Utc::now();
        let mut session =
            MatchingSession::start(vocab(5), SessionSetup::full(), seeded(), now).unwrap();

        let a = CardRef::new(0, PairId(1));
        let b = CardRef::new(0, PairId(2));

        assert_eq!(session.click(a, now).event, ClickEvent::Selected);
        assert_eq!(session.click(a, now).event, ClickEvent::Deselected);
        assert_eq!(session.selection(), &[None, None]);

        session.click(a, now);
        assert_eq!(
            session.click(b, now).event,
            ClickEvent::Replaced { previous: PairId(1) }
        );
        assert_eq!(session.selection(), &[Some(PairId(2)), None]);
    }

    #[test]
    fn match_clears_selection_and_makes_cards_inert() {
        let now = Utc::now();
        let mut session =
            MatchingSession::start(vocab(5), SessionSetup::full(), seeded(), now).unwrap();

        let outcome = solve(&mut session, PairId(3), now);
        assert!(matches!(outcome.event, ClickEvent::Matched { pair: PairId(3), .. }));
        assert_eq!(session.selection(), &[None, None]);
        assert_eq!(session.matched_on_board(), &[PairId(3)]);

        let again = session.click(CardRef::new(0, PairId(3)), now);
        assert_eq!(
            again.event,
            ClickEvent::Ignored { reason: IgnoreReason::AlreadyMatched }
        );
    }

    #[test]
    fn mismatch_flashes_then_clears() {
        let now = Utc::now();
        let mut session =
            MatchingSession::start(vocab(5), SessionSetup::full(), seeded(), now).unwrap();

        session.click(CardRef::new(0, PairId(1)), now);
        let outcome = session.click(CardRef::new(1, PairId(2)), now);
        let ClickEvent::Mismatched { cards } = &outcome.event else {
            panic!("expected mismatch, got {:?}", outcome.event);
        };
        assert_eq!(cards.len(), 2);
        assert_eq!(outcome.timers.len(), 1);
        assert_eq!(outcome.timers[0].kind, TimerKind::ClearWrong);
        assert_eq!(outcome.timers[0].delay, std::time::Duration::from_millis(500));
        assert!(session.matched_on_board().is_empty());

        let blocked = session.click(CardRef::new(0, PairId(3)), now);
        assert_eq!(
            blocked.event,
            ClickEvent::Ignored { reason: IgnoreReason::ShowingMismatch }
        );

        session.fire(outcome.timers[0].token, now);
        assert!(session.wrong().is_empty());
        assert_eq!(session.selection(), &[None, None]);
        assert!(session.matched_on_board().is_empty());
    }

    #[test]
    fn retry_lowers_accuracy() {
        let now = Utc::now();
        let mut session =
            MatchingSession::start(vocab(5), SessionSetup::full(), seeded(), now).unwrap();

        session.click(CardRef::new(0, PairId(1)), now);
        let outcome = session.click(CardRef::new(1, PairId(2)), now);
        session.fire(outcome.timers[0].token, now);

        let mut report = None;
        for row in 1..=5 {
            if let ClickEvent::Matched { report: Some(r), .. } = solve(&mut session, PairId(row), now).event {
                report = Some(r);
            }
        }

        let record = session.attempts(PairId(1)).unwrap();
        assert_eq!(record.attempts, 2);
        assert!(!record.first_try);
        let report = report.unwrap();
        assert!(report.accuracy_percent < 100.0);
        assert_eq!(report.accuracy_percent, 60.0);
    }

    #[test]
    fn unknown_cards_are_ignored() {
        let now = Utc::now();
        let mut session =
            MatchingSession::start(vocab(12), SessionSetup::full(), seeded(), now).unwrap();
        let hidden = session
            .backlog
            .front()
            .map(|p| p.id)
            .unwrap();

        for card in [CardRef::new(0, hidden), CardRef::new(7, PairId(1))] {
            assert_eq!(
                session.click(card, now).event,
                ClickEvent::Ignored { reason: IgnoreReason::UnknownCard }
            );
        }
    }

    #[test]
    fn clicks_after_finish_are_ignored() {
        let now = Utc::now();
        let mut session =
            MatchingSession::start(vocab(2), SessionSetup::full(), seeded(), now).unwrap();
        solve(&mut session, PairId(1), now);
        solve(&mut session, PairId(2), now);
        assert!(session.is_finished());

        assert_eq!(
            session.click(CardRef::new(0, PairId(1)), now).event,
            ClickEvent::Ignored { reason: IgnoreReason::Finished }
        );
    }

    #[test]
    fn restart_invalidates_pending_timers() {
        let now = Utc::now();
        let mut session =
            MatchingSession::start(vocab(5), SessionSetup::full(), seeded(), now).unwrap();
        let old_id = session.id();

        session.click(CardRef::new(0, PairId(1)), now);
        let outcome = session.click(CardRef::new(1, PairId(2)), now);
        session.restart(now).unwrap();

        assert_ne!(session.id(), old_id);
        assert!(session.wrong().is_empty());
        assert_eq!(session.fire(outcome.timers[0].token, now), TimerOutcome::Stale);
        assert_eq!(session.progress().matched, 0);
    }

    #[test]
    fn reconfigure_rejects_single_column() {
        let now = Utc::now();
        let mut session =
            MatchingSession::start(vocab(5), SessionSetup::full(), seeded(), now).unwrap();
        let id = session.id();
        solve(&mut session, PairId(1), now);

        let err = session.reconfigure(ColumnChange::Blank { slot: 0 }, now).unwrap_err();
        assert_eq!(err, GameError::TooFewColumns { active: 1 });
        assert_eq!(session.id(), id);
        assert_eq!(session.progress().matched, 1);
        assert_eq!(session.columns().slots(), &[Some(1), Some(2)]);
    }

    #[test]
    fn reconfigure_rebuilds_lanes() {
        let now = Utc::now();
        let mut session =
            MatchingSession::start(vocab(5), SessionSetup::full(), seeded(), now).unwrap();
        solve(&mut session, PairId(1), now);

        let changed = session
            .reconfigure(ColumnChange::Set { slot: 1, column: 1 }, now)
            .unwrap();
        assert!(changed);
        assert_eq!(session.columns().active(), vec![1, 1]);
        assert_eq!(session.progress().matched, 0);
        assert!(session.lanes()[1].iter().all(|c| c.text.starts_with("en")));
    }

    #[test]
    fn resume_setup_uses_rows_and_columns() {
        let setup = SessionSetup::resume(ResumeInstruction {
            columns: vec![Some(2), None, Some(1)],
            rows: Some(vec![2, 3, 4]),
        });
        let session = MatchingSession::start(vocab(10), setup, seeded(), Utc::now()).unwrap();
        assert_eq!(session.total_pairs(), 3);
        assert_eq!(session.columns().active(), vec![2, 1]);
        assert_eq!(session.descriptors().columns, "2,null,1");
        assert_eq!(session.descriptors().range.as_deref(), Some("2-4"));
    }

    #[test]
    fn no_pairs_cannot_start() {
        let result = MatchingSession::start(
            vocab(3),
            SessionSetup::with_rows(vec![40, 41]),
            seeded(),
            Utc::now(),
        );
        assert_eq!(result.err(), Some(GameError::NoPlayablePairs));
    }

    #[test]
    fn snapshot_flags() {
        let now = Utc::now();
        let mut session =
            MatchingSession::start(vocab(5), SessionSetup::full(), seeded(), now).unwrap();
        solve(&mut session, PairId(4), now);
        session.click(CardRef::new(0, PairId(5)), now);

        let snapshot = session.snapshot();
        assert_eq!(snapshot.lanes[0].header, "English");
        assert_eq!(snapshot.lanes[1].header, "French");
        let card = |lane: usize, pair: usize| {
            snapshot.lanes[lane]
                .cards
                .iter()
                .find(|c| c.pair == PairId(pair))
                .cloned()
                .unwrap()
        };
        assert!(card(0, 4).matched);
        assert!(card(1, 4).matched);
        assert!(card(0, 5).selected);
        assert!(!card(1, 5).selected);
        assert_eq!(snapshot.progress.matched, 1);
        assert_eq!(snapshot.progress.percent, 20.0);
    }
}
