use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};
use crate::models::SearchType;

/// A past successful search. Immutable once created.
///
/// Persisted as `{"query", "type", "timestamp"}`, the layout older history
/// files already use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(
        rename = "query",
        alias = "rawTerm",
        deserialize_with = "crate::history::deserializers::deserialize_raw_term"
    )]
    raw_term: String,
    #[serde(rename = "type", alias = "searchType")]
    search_type: SearchType,
    #[serde(
        rename = "timestamp",
        alias = "createdAt",
        deserialize_with = "crate::history::deserializers::deserialize_timestamp"
    )]
    created_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// Record a search made now.
    pub fn new(raw_term: impl Into<String>, search_type: SearchType) -> Result<Self> {
        Self::with_timestamp(raw_term, search_type, Utc::now())
    }

    pub fn with_timestamp(
        raw_term: impl Into<String>,
        search_type: SearchType,
        created_at: DateTime<Utc>,
    ) -> Result<Self> {
        let raw_term = raw_term.into();
        if raw_term.trim().is_empty() {
            return Err(SearchError::EmptyTerm { search_type });
        }
        Ok(Self { raw_term, search_type, created_at })
    }

    pub fn raw_term(&self) -> &str {
        &self.raw_term
    }

    pub fn search_type(&self) -> SearchType {
        self.search_type
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// What a history replay hands back to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayRequest {
    pub raw_term: String,
    pub search_type: SearchType,
}

impl From<&HistoryEntry> for ReplayRequest {
    fn from(entry: &HistoryEntry) -> Self {
        Self { raw_term: entry.raw_term.clone(), search_type: entry.search_type }
    }
}
