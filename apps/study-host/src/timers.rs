//! Drives engine timers on the tokio runtime.

use crate::state::SessionSlot;
use chrono::Utc;
use matchcards_core::{BoardSnapshot, ScheduledTimer, TimerOutcome};
use tokio::sync::broadcast;
use tracing::debug;

const UPDATE_CAPACITY: usize = 64;

/// Sleeps out each scheduled delay, then fires the token against the live
/// session. Board changes are published to subscribers.
#[derive(Clone)]
pub struct TimerDriver {
    slot: SessionSlot,
    updates: broadcast::Sender<BoardSnapshot>,
}

impl TimerDriver {
    pub fn new(slot: SessionSlot) -> Self {
        let (updates, _) = broadcast::channel(UPDATE_CAPACITY);
        Self { slot, updates }
    }

    /// Receive a board snapshot after every applied timer.
    pub fn subscribe(&self) -> broadcast::Receiver<BoardSnapshot> {
        self.updates.subscribe()
    }

    /// Spawn one task per timer. Must be called within a tokio runtime.
    pub fn schedule(&self, timers: Vec<ScheduledTimer>) {
        for timer in timers {
            let driver = self.clone();
            tokio::spawn(async move {
                tokio::time::sleep(timer.delay).await;
                driver.fire(timer);
            });
        }
    }

    fn fire(&self, timer: ScheduledTimer) {
        let applied = {
            let mut slot = self.slot.lock().expect("session lock");
            let Some(session) = slot.as_mut() else {
                debug!(kind = ?timer.kind, "timer fired without a session");
                return;
            };
            match session.fire(timer.token, Utc::now()) {
                TimerOutcome::Stale => None,
                TimerOutcome::Applied { kind, timers } => Some((kind, timers, session.snapshot())),
            }
        };

        match applied {
            None => debug!(kind = ?timer.kind, seq = timer.token.seq, "stale timer dropped"),
            Some((kind, timers, snapshot)) => {
                debug!(?kind, follow_up = timers.len(), "timer applied");
                // No subscribers is fine.
                let _ = self.updates.send(snapshot);
                self.schedule(timers);
            }
        }
    }
}
