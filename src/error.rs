//! Error types for search dispatch and history replay.
//!
//! Every variant carries enough context (search type, term, underlying cause)
//! to render a useful message. History persistence failures are deliberately
//! absent from [`SearchError`]: they stay inside the history store and are only
//! logged.

use crate::models::SearchType;

/// Errors surfaced by the dispatcher, registry, session controller and config.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The user supplied an empty (or whitespace-only) search term.
    #[error("search term must not be empty ({search_type} search)")]
    EmptyTerm { search_type: SearchType },

    /// The search type tag is not registered.
    #[error("unknown search type: {0}")]
    UnknownSearchType(String),

    /// Options did not conform to the schema of the active search type.
    #[error("invalid options for {search_type} search: {reason}")]
    OptionsValidation { search_type: SearchType, reason: String },

    /// The executor failed (network, non-success status, malformed response).
    #[error("{search_type} search for {term:?} failed: {source}")]
    Provider {
        search_type: SearchType,
        term: String,
        query: String,
        #[source]
        source: ProviderError,
    },

    /// A history replay index past the end of the ledger.
    #[error("history index {index} out of range (ledger holds {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Invalid configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl SearchError {
    pub(crate) fn options(search_type: SearchType, reason: impl Into<String>) -> Self {
        Self::OptionsValidation { search_type, reason: reason.into() }
    }
}

/// Failures raised by an executor while talking to a provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The request never produced a response (connect, timeout, TLS).
    #[error("request failed: {0}")]
    Transport(String),

    /// The provider answered with a non-success status.
    #[error("provider returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body was not the JSON we expected.
    #[error("malformed provider response: {0}")]
    Parse(String),

    /// Live mode without the credential this provider needs.
    #[error("missing credentials: {0}")]
    MissingCredentials(&'static str),
}

/// Failures of the persistence collaborator. Never leaves the history store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("failed to serialize history: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A backing store that refuses writes (quota exhausted, read-only media).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Convenience alias for results in this crate.
pub type Result<T> = std::result::Result<T, SearchError>;
