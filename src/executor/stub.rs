//! Demo executor: deterministic results with no network access.
//!
//! Each search yields exactly one record pointing at where the real results
//! would be found, with the built query in its description.

use serde_json::json;

use super::SearchExecutor;
use crate::error::ProviderError;
use crate::models::{Query, SearchOptions, SearchType, SourceIcon};
use crate::normalizer::{ProviderResponse, ResponseFormat};
use crate::utils::{encode_component, slugify_term};

/// Stand-in for live providers when no credentials are configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubExecutor;

impl StubExecutor {
    /// The listing body a search would produce. Synchronous; [`SearchExecutor::execute`]
    /// only wraps it.
    pub fn respond(&self, query: &Query, options: &SearchOptions) -> ProviderResponse {
        let term = &query.raw_term;
        let built = &query.built_query_string;
        let encoded = encode_component(built);

        let (title, link, snippet) = match (query.search_type, options) {
            (SearchType::GenericDrive, _) => (
                format!("Google Drive results for \"{term}\""),
                format!("https://www.google.com/search?q={encoded}"),
                format!("Click to view potential Google Drive files matching {built}"),
            ),
            (SearchType::FtpIndex, SearchOptions::FtpIndex(ftp)) => (
                format!("FTP server containing \"{term}\""),
                format!("ftp://example.com/pub/{}.zip", slugify_term(term)),
                format!(
                    "Potential FTP server found for {built} (demo result{}{})",
                    if ftp.anonymous_only { ", anonymous only" } else { "" },
                    if ftp.deep_scan { ", deep scan" } else { "" },
                ),
            ),
            (SearchType::FtpIndex, _) => (
                format!("FTP server containing \"{term}\""),
                format!("ftp://example.com/pub/{}.zip", slugify_term(term)),
                format!("Potential FTP server found for {built} (demo result)"),
            ),
            (SearchType::DirectoryIndex, _) => (
                format!("Directory listing for \"{term}\""),
                format!("http://example.com/files/{}/", slugify_term(term)),
                format!("Potential directory listing found for {built} (demo result)"),
            ),
            (SearchType::CodeHost, _) => (
                format!("GitHub results for \"{term}\""),
                format!("https://github.com/search?q={encoded}"),
                format!("Click to view potential GitHub files matching {built}"),
            ),
            (SearchType::DeviceIndex, options) => {
                let device = match options {
                    SearchOptions::DeviceIndex(device) => device.device_type.as_str(),
                    _ => "devices",
                };
                (
                    format!("Shodan results for {device} \"{term}\""),
                    format!("https://www.shodan.io/search?query={encoded}"),
                    format!("Click to view Shodan search results for {built}"),
                )
            }
        };

        let icon = SourceIcon::for_search_type(query.search_type);
        ProviderResponse::new(
            ResponseFormat::Listing,
            json!({
                "items": [{
                    "title": title,
                    "link": link,
                    "snippet": snippet,
                    "icon": icon.as_str(),
                }]
            }),
        )
    }
}

impl SearchExecutor for StubExecutor {
    async fn execute(
        &self,
        query: &Query,
        options: &SearchOptions,
    ) -> Result<ProviderResponse, ProviderError> {
        tracing::trace!(query = %query.built_query_string, "stub search");
        Ok(self.respond(query, options))
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}
