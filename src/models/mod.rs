//! Data models for searches, results and history.
//!
//! - [`SearchType`] - The provider category a search targets
//! - [`SearchOptions`] - Typed per-type options (tagged union)
//! - [`ResultItem`] / [`ResultEnvelope`] - Normalized search output
//! - [`HistoryEntry`] - A persisted past search
//!
//! History entries use custom deserializers (timestamps, non-empty terms) from
//! [`crate::history::deserializers`].

pub mod history;
pub mod options;
pub mod result;
pub mod search_type;

pub use history::{HistoryEntry, ReplayRequest};
pub use options::{CodeHostOptions, DeviceOptions, DriveOptions, FtpOptions, SearchOptions};
pub use result::{ResultEnvelope, ResultItem, SourceIcon};
pub use search_type::SearchType;

/// A built provider query. Derived per search, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub search_type: SearchType,
    pub raw_term: String,
    pub built_query_string: String,
}
