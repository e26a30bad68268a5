//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use deep_search::normalizer::{ProviderResponse, ResponseFormat};
use deep_search::{ProviderError, Query, SearchExecutor, SearchOptions, SearchType};
use serde_json::json;
use tempfile::TempDir;
use tokio::sync::{Notify, Semaphore};

/// Builder for a throwaway data directory holding a history file
pub struct DataDirBuilder {
    temp_dir: TempDir,
}

impl DataDirBuilder {
    /// Create a new builder with an empty data directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write the raw history file content
    pub fn with_history(self, content: &str) -> Self {
        fs::write(history_path(self.temp_dir.path()), content).expect("Failed to write history");
        self
    }

    /// Write history entries programmatically, newest first
    pub fn with_history_entries(self, entries: &[HistoryEntryBuilder]) -> Self {
        let content =
            format!("[{}]", entries.iter().map(|e| e.to_json()).collect::<Vec<_>>().join(","));
        self.with_history(&content)
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

/// Path of the history file inside a data directory
pub fn history_path(data_dir: &Path) -> PathBuf {
    data_dir.join("search-history.json")
}

/// Read and parse the persisted history file
pub fn read_history(data_dir: &Path) -> serde_json::Value {
    let raw = fs::read_to_string(history_path(data_dir)).expect("Failed to read history");
    serde_json::from_str(&raw).expect("History file is not JSON")
}

/// Builder for one persisted history record
pub struct HistoryEntryBuilder {
    query: String,
    search_type: String,
    timestamp: i64,
}

impl HistoryEntryBuilder {
    pub fn new() -> Self {
        Self {
            query: "annual report".to_string(),
            search_type: "generic-drive".to_string(),
            timestamp: 1_762_076_480_016,
        }
    }

    pub fn query(mut self, query: &str) -> Self {
        self.query = query.to_string();
        self
    }

    pub fn search_type(mut self, search_type: &str) -> Self {
        self.search_type = search_type.to_string();
        self
    }

    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn to_json(&self) -> String {
        json!({
            "query": self.query,
            "type": self.search_type,
            "timestamp": self.timestamp,
        })
        .to_string()
    }
}

/// The binary, isolated from the caller's config and credentials
pub fn deep_search_cmd(data_dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_deep-search"));
    cmd.arg("--data-dir")
        .arg(data_dir)
        .env("HOME", data_dir)
        .env("XDG_CONFIG_HOME", data_dir.join("config"))
        .env_remove("DEEP_SEARCH_MODE")
        .env_remove("DEEP_SEARCH_PROXY_URL")
        .env_remove("GOOGLE_API_KEY")
        .env_remove("GOOGLE_CX")
        .env_remove("GITHUB_TOKEN")
        .env_remove("SHODAN_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

/// Counts calls and answers every search with a fixed listing (or failure)
#[derive(Clone)]
pub struct CountingExecutor {
    calls: Arc<AtomicUsize>,
    fail: bool,
}

impl CountingExecutor {
    pub fn new() -> Self {
        Self { calls: Arc::new(AtomicUsize::new(0)), fail: false }
    }

    pub fn failing() -> Self {
        Self { calls: Arc::new(AtomicUsize::new(0)), fail: true }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SearchExecutor for CountingExecutor {
    async fn execute(
        &self,
        query: &Query,
        _options: &SearchOptions,
    ) -> Result<ProviderResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ProviderError::Status { status: 500, message: "boom".into() });
        }
        Ok(ProviderResponse::new(
            ResponseFormat::Listing,
            json!({"items": [{
                "title": format!("hit for {}", query.raw_term),
                "link": "https://example.com/hit",
                "snippet": query.built_query_string,
            }]}),
        ))
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

/// Parks every search inside `execute` until the test releases it
#[derive(Clone)]
pub struct GatedExecutor {
    pub entered: Arc<Notify>,
    release: Arc<Semaphore>,
}

impl GatedExecutor {
    pub fn new() -> Self {
        Self { entered: Arc::new(Notify::new()), release: Arc::new(Semaphore::new(0)) }
    }

    /// Let `count` parked (or future) searches finish
    pub fn release(&self, count: usize) {
        self.release.add_permits(count);
    }
}

impl SearchExecutor for GatedExecutor {
    async fn execute(
        &self,
        query: &Query,
        _options: &SearchOptions,
    ) -> Result<ProviderResponse, ProviderError> {
        self.entered.notify_one();
        if let Ok(permit) = self.release.acquire().await {
            permit.forget();
        }
        Ok(ProviderResponse::new(
            ResponseFormat::Listing,
            json!({"items": [{"title": query.raw_term, "link": "https://example.com", "snippet": ""}]}),
        ))
    }

    fn name(&self) -> &'static str {
        "gated"
    }
}

/// Default options shorthand
pub fn defaults(search_type: SearchType) -> SearchOptions {
    SearchOptions::default_for(search_type)
}
