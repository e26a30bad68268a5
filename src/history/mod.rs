//! Bounded, persisted search history.
//!
//! The ledger is stored as one JSON array under a fixed key in a
//! [`KeyValueStore`]:
//! - [`FileStore`]: `<data dir>/search-history.json`, written via temp file + rename
//! - [`MemoryStore`]: for tests and ephemeral sessions

pub mod deserializers;
pub mod ledger;
pub mod storage;
pub mod store;

pub use ledger::{HISTORY_CAPACITY, HistoryLedger};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::{HISTORY_KEY, HistoryStore};
