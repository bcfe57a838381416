//! Delayed transitions owned by a session.
//!
//! The engine never sleeps. It hands out [`ScheduledTimer`]s and the host
//! calls back with the token once the delay has passed. Tokens carry the
//! session id, so a restart or column change turns every outstanding token
//! stale.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Identity of one session run. Regenerated on restart and reconfiguration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerToken {
    pub session: SessionId,
    pub seq: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKind {
    /// End the wrong-selection flash and clear the selection.
    ClearWrong,
    /// Replace matched slots with backlog pairs.
    Refill,
    /// Swap the whole window for a new page.
    AdvancePage,
    /// Drop the fresh flag from newly revealed cards.
    ClearFresh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTimer {
    pub token: TimerToken,
    pub kind: TimerKind,
    pub delay: Duration,
}

/// Outstanding timers of the current session.
#[derive(Debug, Default)]
pub(crate) struct TimerBook {
    session: SessionId,
    next_seq: u64,
    pending: HashMap<u64, TimerKind>,
}

impl TimerBook {
    pub(crate) fn session(&self) -> SessionId {
        self.session
    }

    /// Start a new session identity and forget every pending timer.
    pub(crate) fn reset(&mut self) {
        self.session = SessionId::new();
        self.pending.clear();
    }

    pub(crate) fn schedule(&mut self, kind: TimerKind, delay: Duration) -> ScheduledTimer {
        self.next_seq += 1;
        self.pending.insert(self.next_seq, kind);
        ScheduledTimer {
            token: TimerToken {
                session: self.session,
                seq: self.next_seq,
            },
            kind,
            delay,
        }
    }

    /// Claim a pending timer. `None` when the token is stale or already used.
    pub(crate) fn take(&mut self, token: TimerToken) -> Option<TimerKind> {
        if token.session != self.session {
            return None;
        }
        self.pending.remove(&token.seq)
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }
}
