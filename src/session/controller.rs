use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use super::{SearchOutcome, SessionState};
use crate::dispatcher::QueryDispatcher;
use crate::error::Result;
use crate::executor::SearchExecutor;
use crate::history::{HistoryLedger, HistoryStore, KeyValueStore};
use crate::models::{HistoryEntry, SearchOptions, SearchType};

#[derive(Debug)]
struct Inner {
    state: SessionState,
    /// Id of the search the session is waiting on, if any.
    active_request: Option<u64>,
}

/// Runs searches for one user session and keeps its history.
///
/// Locks are held only between awaits, so the controller can be shared
/// behind an `Arc` and its futures spawned onto a multi-threaded runtime.
pub struct SessionController<E, S: KeyValueStore> {
    dispatcher: QueryDispatcher<E>,
    history: Mutex<HistoryStore<S>>,
    inner: Mutex<Inner>,
    next_request_id: AtomicU64,
}

impl<E: SearchExecutor, S: KeyValueStore> SessionController<E, S> {
    /// Create a session. Persisted history is loaded (and healed) immediately.
    pub fn new(dispatcher: QueryDispatcher<E>, storage: S) -> Self {
        Self {
            dispatcher,
            history: Mutex::new(HistoryStore::open(storage)),
            inner: Mutex::new(Inner { state: SessionState::Idle, active_request: None }),
            next_request_id: AtomicU64::new(1),
        }
    }

    pub fn state(&self) -> SessionState {
        self.inner.lock().state
    }

    pub fn dispatcher(&self) -> &QueryDispatcher<E> {
        &self.dispatcher
    }

    /// Run one search.
    ///
    /// Returns [`SearchOutcome::Dropped`] without doing anything if another
    /// search is in flight, and [`SearchOutcome::Stale`] if this search was
    /// abandoned before it finished. Only a displayed search is recorded.
    ///
    /// # Errors
    ///
    /// [`crate::SearchError::EmptyTerm`] before any state change, otherwise any
    /// dispatch error. A failed search leaves history untouched.
    pub async fn search(
        &self,
        search_type: SearchType,
        term: &str,
        options: &SearchOptions,
    ) -> Result<SearchOutcome> {
        let entry = HistoryEntry::new(term.trim(), search_type)?;

        let Some(request_id) = self.begin() else {
            tracing::debug!(search_type = %search_type, "search already in flight, dropping request");
            return Ok(SearchOutcome::Dropped);
        };
        // Back to Idle on every exit, including this future being dropped mid-await.
        let _in_flight = InFlight { inner: &self.inner, request_id };

        let result = self.dispatcher.execute(search_type, entry.raw_term(), options).await;

        let next = if result.is_ok() { SessionState::Displaying } else { SessionState::Failed };
        if !self.complete(request_id, next) {
            tracing::debug!(request_id, "discarding completion of abandoned search");
            return Ok(SearchOutcome::Stale);
        }

        let envelope = result?;
        self.history.lock().append(entry);
        Ok(SearchOutcome::Displayed(envelope))
    }

    /// Re-run the history entry at `index` with the default options of its type.
    ///
    /// # Errors
    ///
    /// [`crate::SearchError::IndexOutOfRange`] for a bad index, otherwise as
    /// [`SessionController::search`].
    pub async fn replay(&self, index: usize) -> Result<SearchOutcome> {
        let request = self.history.lock().replay(index)?;
        tracing::debug!(index, search_type = %request.search_type, "replaying history entry");
        let options = SearchOptions::default_for(request.search_type);
        self.search(request.search_type, &request.raw_term, &options).await
    }

    /// Give up on the in-flight search. Returns `false` if nothing was in flight.
    pub fn abandon(&self) -> bool {
        let mut inner = self.inner.lock();
        if inner.state != SessionState::Searching {
            return false;
        }
        tracing::debug!(request_id = ?inner.active_request, "search abandoned");
        inner.state = SessionState::Idle;
        inner.active_request = None;
        true
    }

    /// Snapshot of the ledger, newest first.
    pub fn history(&self) -> HistoryLedger {
        self.history.lock().ledger().clone()
    }

    pub fn clear_history(&self) {
        self.history.lock().clear();
    }

    /// Idle → Searching. `None` if a search is already running.
    fn begin(&self) -> Option<u64> {
        let mut inner = self.inner.lock();
        if inner.state == SessionState::Searching {
            return None;
        }
        let request_id = self.next_request_id.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(request_id, from = ?inner.state, "session -> Searching");
        inner.state = SessionState::Searching;
        inner.active_request = Some(request_id);
        Some(request_id)
    }

    /// Searching → `state`, but only if `request_id` is still the active request.
    /// Returns `false` for an abandoned or superseded request.
    fn complete(&self, request_id: u64, state: SessionState) -> bool {
        let mut inner = self.inner.lock();
        if inner.active_request != Some(request_id) {
            return false;
        }
        tracing::debug!(request_id, from = ?inner.state, to = ?state, "session transition");
        inner.state = state;
        true
    }
}

/// Held for the lifetime of one dispatched search.
struct InFlight<'a> {
    inner: &'a Mutex<Inner>,
    request_id: u64,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut inner = self.inner.lock();
        if inner.active_request == Some(self.request_id) {
            tracing::debug!(request_id = self.request_id, from = ?inner.state, "session -> Idle");
            inner.state = SessionState::Idle;
            inner.active_request = None;
        }
    }
}
