//! Session orchestration: one search at a time, history on success.
//!
//! ```text
//!           search()                 ok
//!   Idle ─────────────► Searching ─────────► Displaying ──► Idle
//!    ▲                    │   │                 (history append)
//!    │      abandon()     │   │ err
//!    └────────────────────┘   └────────► Failed ──────────► Idle
//! ```

pub mod controller;

pub use controller::SessionController;

use crate::models::ResultEnvelope;

/// Where a session is in its search lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Searching,
    Displaying,
    Failed,
}

/// How a search request ended, when it did not end in an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Results for the renderer. The search has been recorded in history.
    Displayed(ResultEnvelope),
    /// Another search was already in flight; this request was ignored.
    Dropped,
    /// The search finished after being abandoned or superseded. Nothing was recorded.
    Stale,
}

impl SearchOutcome {
    pub fn envelope(&self) -> Option<&ResultEnvelope> {
        match self {
            Self::Displayed(envelope) => Some(envelope),
            Self::Dropped | Self::Stale => None,
        }
    }

    pub fn into_envelope(self) -> Option<ResultEnvelope> {
        match self {
            Self::Displayed(envelope) => Some(envelope),
            Self::Dropped | Self::Stale => None,
        }
    }
}
