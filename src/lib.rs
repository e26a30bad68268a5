//! deep-search - Targeted searches across document hosts, open indexes, code hosts and device indexes
//!
//! This library turns a plain search term into a provider-specific query and
//! runs it. It supports:
//!
//! - Building operator queries for five search types (document host, FTP index,
//!   directory index, code host, device index)
//! - Typed, validated per-type options with declarative schemas
//! - A deterministic stub executor and a live executor over real provider APIs
//! - Normalizing heterogeneous provider responses into one result shape
//! - A bounded, self-healing search history with replay
//!
//! # Example
//!
//! ```no_run
//! use deep_search::{
//!     MemoryStore, QueryDispatcher, SearchOptions, SearchType, SessionController, StubExecutor,
//! };
//!
//! # async fn demo() -> deep_search::Result<()> {
//! let session =
//!     SessionController::new(QueryDispatcher::with_executor(StubExecutor), MemoryStore::new());
//! let options = SearchOptions::default_for(SearchType::GenericDrive);
//! let outcome = session.search(SearchType::GenericDrive, "budget", &options).await?;
//! if let Some(envelope) = outcome.envelope() {
//!     println!("{} results for {}", envelope.items.len(), envelope.built_query_string);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod executor;
pub mod history;
pub mod models;
pub mod normalizer;
pub mod registry;
pub mod session;
pub mod utils;

// Re-export commonly used types
pub use config::{AppConfig, ExecutorMode, LiveConfig};
pub use dispatcher::QueryDispatcher;
pub use error::{ProviderError, Result, SearchError, StorageError};
pub use executor::{Executor, LiveExecutor, SearchExecutor, StubExecutor};
pub use history::{FileStore, HistoryLedger, HistoryStore, KeyValueStore, MemoryStore};
pub use models::{
    HistoryEntry, Query, ReplayRequest, ResultEnvelope, ResultItem, SearchOptions, SearchType,
    SourceIcon,
};
pub use registry::{SourceRegistry, build_query};
pub use session::{SearchOutcome, SessionController, SessionState};
