//! The source registry: search type → query builder, options schema, executor.
//!
//! Built once at startup and read-only afterwards. There is no process-wide
//! instance; whoever owns the session owns the registry.

pub mod builders;
pub mod schema;

use std::collections::BTreeMap;

pub use builders::build_query;
pub use schema::{FieldKind, OptionField, OptionsSchema, schema_for};

use crate::error::{Result, SearchError};
use crate::executor::SearchExecutor;
use crate::models::{SearchOptions, SearchType};

/// What the registry knows about one search type.
#[derive(Debug, Clone, Copy)]
pub struct SourceEntry {
    pub search_type: SearchType,
    pub schema: &'static OptionsSchema,
}

impl SourceEntry {
    pub fn new(search_type: SearchType) -> Self {
        Self { search_type, schema: schema_for(search_type) }
    }

    /// Validate `options` against this type, then build the provider query.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::OptionsValidation`] if the options belong to
    /// another type or hold an invalid value.
    pub fn build_query(&self, term: &str, options: &SearchOptions) -> Result<String> {
        options.validate(self.search_type)?;
        Ok(build_query(term, options))
    }
}

/// Result of a registry lookup.
pub struct ResolvedSource<'a, E> {
    pub entry: &'a SourceEntry,
    pub executor: &'a E,
}

impl<E> ResolvedSource<'_, E> {
    pub fn schema(&self) -> &'static OptionsSchema {
        self.entry.schema
    }

    pub fn build_query(&self, term: &str, options: &SearchOptions) -> Result<String> {
        self.entry.build_query(term, options)
    }
}

pub struct SourceRegistry<E> {
    entries: BTreeMap<SearchType, SourceEntry>,
    executor: E,
}

/// Collects registrations; the finished registry cannot be changed.
pub struct SourceRegistryBuilder<E> {
    entries: BTreeMap<SearchType, SourceEntry>,
    executor: E,
}

impl<E: SearchExecutor> SourceRegistryBuilder<E> {
    pub fn register(mut self, search_type: SearchType) -> Self {
        self.entries.insert(search_type, SourceEntry::new(search_type));
        self
    }

    pub fn build(self) -> SourceRegistry<E> {
        SourceRegistry { entries: self.entries, executor: self.executor }
    }
}

impl<E: SearchExecutor> SourceRegistry<E> {
    pub fn builder(executor: E) -> SourceRegistryBuilder<E> {
        SourceRegistryBuilder { entries: BTreeMap::new(), executor }
    }

    /// Registry with every built-in search type.
    pub fn with_defaults(executor: E) -> Self {
        SearchType::all()
            .iter()
            .fold(Self::builder(executor), |builder, search_type| builder.register(*search_type))
            .build()
    }

    /// # Errors
    ///
    /// Returns [`SearchError::UnknownSearchType`] if `search_type` was not registered.
    pub fn resolve(&self, search_type: SearchType) -> Result<ResolvedSource<'_, E>> {
        let entry = self
            .entries
            .get(&search_type)
            .ok_or_else(|| SearchError::UnknownSearchType(search_type.to_string()))?;
        Ok(ResolvedSource { entry, executor: &self.executor })
    }

    /// Parse a text tag (legacy aliases included), then resolve it.
    pub fn resolve_tag(&self, tag: &str) -> Result<ResolvedSource<'_, E>> {
        self.resolve(tag.parse()?)
    }

    /// Registered types in declaration order.
    pub fn search_types(&self) -> impl Iterator<Item = SearchType> + '_ {
        self.entries.keys().copied()
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }
}
