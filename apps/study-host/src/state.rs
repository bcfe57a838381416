//! Application state.

use crate::db::SqliteRepository;
use crate::timers::TimerDriver;
use matchcards_core::{Dataset, MatchingSession};
use std::sync::{Arc, Mutex};

/// The single live session, shared with the timer tasks.
pub type SessionSlot = Arc<Mutex<Option<MatchingSession>>>;

/// Global application state.
pub struct AppState {
    pub repository: Arc<Mutex<SqliteRepository>>,
    pub dataset: Mutex<Option<Arc<Dataset>>>,
    pub session: SessionSlot,
    pub timers: TimerDriver,
}

impl AppState {
    pub fn new(repository: SqliteRepository) -> Self {
        let session: SessionSlot = Arc::new(Mutex::new(None));
        Self {
            repository: Arc::new(Mutex::new(repository)),
            dataset: Mutex::new(None),
            timers: TimerDriver::new(Arc::clone(&session)),
            session,
        }
    }

    /// Dataset currently loaded, if any.
    pub fn current_dataset(&self) -> Option<Arc<Dataset>> {
        self.dataset.lock().expect("dataset lock").clone()
    }
}
