//! Live executor: one HTTP call per search against the real provider APIs.
//!
//! | Search type                              | Provider                               |
//! |------------------------------------------|----------------------------------------|
//! | generic-drive, ftp-index, directory-index | search proxy if configured, else Google Custom Search |
//! | code-host                                | GitHub code search                     |
//! | device-index                             | Shodan host search                     |

use serde_json::json;

use super::SearchExecutor;
use super::http::{build_client, fetch_json};
use crate::config::LiveConfig;
use crate::error::{ProviderError, Result};
use crate::models::{Query, SearchOptions, SearchType};
use crate::normalizer::{ProviderResponse, ResponseFormat};

/// Calls the provider behind each search type. No retries, no caching.
pub struct LiveExecutor {
    client: reqwest::Client,
    config: LiveConfig,
}

impl LiveExecutor {
    /// # Errors
    ///
    /// Returns [`crate::SearchError::Config`] if the HTTP client cannot be built.
    pub fn new(config: LiveConfig) -> Result<Self> {
        let client = build_client(&config)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &LiveConfig {
        &self.config
    }

    async fn web_search(&self, query: &str) -> std::result::Result<ProviderResponse, ProviderError> {
        let body = match self.config.proxy_url.as_deref() {
            Some(proxy) => {
                let request = self.client.post(proxy).json(&json!({ "query": query }));
                fetch_json("search proxy", request).await?
            }
            None => {
                let key = self
                    .config
                    .google_api_key
                    .as_deref()
                    .ok_or(ProviderError::MissingCredentials("google api key"))?;
                let cx = self
                    .config
                    .google_cx
                    .as_deref()
                    .ok_or(ProviderError::MissingCredentials("google search engine id"))?;
                let url = endpoint(&self.config.google_base_url, "customsearch/v1");
                let num = self.config.max_results.to_string();
                let request = self.client.get(url).query(&[
                    ("q", query),
                    ("key", key),
                    ("cx", cx),
                    ("num", num.as_str()),
                ]);
                fetch_json("google", request).await?
            }
        };
        Ok(ProviderResponse::new(ResponseFormat::Listing, body))
    }

    async fn code_search(&self, query: &str) -> std::result::Result<ProviderResponse, ProviderError> {
        let token = self
            .config
            .github_token
            .as_deref()
            .ok_or(ProviderError::MissingCredentials("github token"))?;
        let url = endpoint(&self.config.github_base_url, "search/code");
        let per_page = self.config.max_results.to_string();
        let request = self
            .client
            .get(url)
            .query(&[("q", query), ("per_page", per_page.as_str())])
            .bearer_auth(token)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json");
        let body = fetch_json("github", request).await?;
        Ok(ProviderResponse::new(ResponseFormat::CodeSearch, body))
    }

    async fn host_search(&self, query: &str) -> std::result::Result<ProviderResponse, ProviderError> {
        let key = self
            .config
            .shodan_api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredentials("shodan api key"))?;
        let url = endpoint(&self.config.shodan_base_url, "shodan/host/search");
        let request = self.client.get(url).query(&[("key", key), ("query", query)]);
        let body = fetch_json("shodan", request).await?;
        Ok(ProviderResponse::new(ResponseFormat::HostSearch, body))
    }
}

impl SearchExecutor for LiveExecutor {
    async fn execute(
        &self,
        query: &Query,
        options: &SearchOptions,
    ) -> std::result::Result<ProviderResponse, ProviderError> {
        let built = query.built_query_string.as_str();
        tracing::debug!(search_type = %query.search_type, query = built, "live search");

        match query.search_type {
            SearchType::GenericDrive | SearchType::DirectoryIndex => self.web_search(built).await,
            SearchType::FtpIndex => {
                if let SearchOptions::FtpIndex(ftp) = options {
                    // No query operator exists for these.
                    tracing::debug!(
                        anonymous_only = ftp.anonymous_only,
                        deep_scan = ftp.deep_scan,
                        "ftp flags not forwarded"
                    );
                }
                self.web_search(built).await
            }
            SearchType::CodeHost => self.code_search(built).await,
            SearchType::DeviceIndex => self.host_search(built).await,
        }
    }

    fn name(&self) -> &'static str {
        "live"
    }
}

fn endpoint(base: &str, path: &str) -> String {
    format!("{}/{path}", base.trim_end_matches('/'))
}
