//! Query dispatch: term + options in, normalized envelope out.
//!
//! The dispatcher never touches history. Recording a search is the session
//! controller's decision, made only after a successful dispatch.

use crate::error::{Result, SearchError};
use crate::executor::SearchExecutor;
use crate::models::{Query, ResultEnvelope, SearchOptions, SearchType};
use crate::normalizer::normalize;
use crate::registry::{ResolvedSource, SourceRegistry};

pub struct QueryDispatcher<E> {
    registry: SourceRegistry<E>,
}

impl<E: SearchExecutor> QueryDispatcher<E> {
    pub fn new(registry: SourceRegistry<E>) -> Self {
        Self { registry }
    }

    /// Dispatcher over every built-in search type.
    pub fn with_executor(executor: E) -> Self {
        Self::new(SourceRegistry::with_defaults(executor))
    }

    pub fn registry(&self) -> &SourceRegistry<E> {
        &self.registry
    }

    /// Build the provider query without executing it.
    ///
    /// # Errors
    ///
    /// Same validation errors as [`QueryDispatcher::execute`], minus provider failures.
    pub fn prepare(
        &self,
        search_type: SearchType,
        term: &str,
        options: &SearchOptions,
    ) -> Result<Query> {
        self.plan(search_type, term, options).map(|(_, query)| query)
    }

    fn plan(
        &self,
        search_type: SearchType,
        term: &str,
        options: &SearchOptions,
    ) -> Result<(ResolvedSource<'_, E>, Query)> {
        let term = term.trim();
        if term.is_empty() {
            return Err(SearchError::EmptyTerm { search_type });
        }

        let source = self.registry.resolve(search_type)?;
        let built_query_string = source.build_query(term, options)?;
        let query = Query { search_type, raw_term: term.to_string(), built_query_string };
        Ok((source, query))
    }

    /// Run one search.
    ///
    /// # Errors
    ///
    /// - [`SearchError::EmptyTerm`] if `term` is blank (no provider call is made)
    /// - [`SearchError::UnknownSearchType`] if the type is not registered
    /// - [`SearchError::OptionsValidation`] if `options` do not fit the type
    /// - [`SearchError::Provider`] if the executor fails
    pub async fn execute(
        &self,
        search_type: SearchType,
        term: &str,
        options: &SearchOptions,
    ) -> Result<ResultEnvelope> {
        let (source, query) = self.plan(search_type, term, options)?;
        let executor = source.executor;
        tracing::debug!(
            search_type = %search_type,
            executor = executor.name(),
            "dispatching search"
        );
        tracing::trace!(query = %query.built_query_string, "built query");

        let response = executor.execute(&query, options).await.map_err(|source| {
            SearchError::Provider {
                search_type,
                term: query.raw_term.clone(),
                query: query.built_query_string.clone(),
                source,
            }
        })?;

        let items = normalize(search_type, &response);
        tracing::debug!(search_type = %search_type, items = items.len(), "search complete");

        Ok(ResultEnvelope { search_type, built_query_string: query.built_query_string, items })
    }
}
