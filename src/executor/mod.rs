//! Executors: the part of a search that talks to (or imitates) a provider.
//!
//! Callers depend only on [`SearchExecutor`]. Which implementation runs is a
//! configuration decision made once, in [`Executor::from_config`].

pub mod http;
pub mod live;
pub mod stub;

use std::future::Future;

pub use live::LiveExecutor;
pub use stub::StubExecutor;

use crate::config::{AppConfig, ExecutorMode};
use crate::error::{ProviderError, Result};
use crate::models::{Query, SearchOptions};
use crate::normalizer::ProviderResponse;

/// A provider backend.
///
/// Implementations perform at most one provider call per `execute` and no
/// retries. All implementations must be `Send + Sync` so a session can be
/// shared across tasks.
pub trait SearchExecutor: Send + Sync {
    /// Run an already-built, already-validated query.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] on transport failure, non-success status,
    /// missing credentials or an unparsable body.
    fn execute(
        &self,
        query: &Query,
        options: &SearchOptions,
    ) -> impl Future<Output = std::result::Result<ProviderResponse, ProviderError>> + Send;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// The executor selected by configuration.
pub enum Executor {
    Stub(StubExecutor),
    Live(LiveExecutor),
}

impl Executor {
    /// Build the executor `config.mode` asks for.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SearchError::Config`] if the live HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        match config.mode {
            ExecutorMode::Stub => Ok(Self::Stub(StubExecutor)),
            ExecutorMode::Live => Ok(Self::Live(LiveExecutor::new(config.live.clone())?)),
        }
    }

    pub fn mode(&self) -> ExecutorMode {
        match self {
            Self::Stub(_) => ExecutorMode::Stub,
            Self::Live(_) => ExecutorMode::Live,
        }
    }
}

impl SearchExecutor for Executor {
    async fn execute(
        &self,
        query: &Query,
        options: &SearchOptions,
    ) -> std::result::Result<ProviderResponse, ProviderError> {
        match self {
            Self::Stub(executor) => executor.execute(query, options).await,
            Self::Live(executor) => executor.execute(query, options).await,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Stub(executor) => executor.name(),
            Self::Live(executor) => executor.name(),
        }
    }
}
