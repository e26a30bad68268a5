//! Shapes provider responses into [`ResultItem`]s.
//!
//! Providers disagree on field names; the normalizer is the only place that
//! knows them. Missing or mistyped fields degrade to empty strings, and a
//! missing result list is an empty result set, never an error. Whether the
//! request failed is decided by the executor before anything reaches here.

use serde_json::Value;
use url::Url;

use crate::models::{ResultItem, SearchType, SourceIcon};

/// Which response layout a provider body follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// `{"items": [{"title", "link", "snippet", "icon"?}]}`: web search APIs,
    /// the search proxy and the stub executor.
    Listing,
    /// `{"items": [{"name", "path", "html_url", "repository": {"full_name"}}]}`
    CodeSearch,
    /// `{"matches": [{"ip_str", "port", "org", "hostnames", "data"}]}`
    HostSearch,
}

/// Raw provider output, tagged with its layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    pub format: ResponseFormat,
    pub body: Value,
}

impl ProviderResponse {
    pub fn new(format: ResponseFormat, body: Value) -> Self {
        Self { format, body }
    }
}

/// Map a provider response onto the uniform result schema, preserving order.
pub fn normalize(search_type: SearchType, response: &ProviderResponse) -> Vec<ResultItem> {
    let default_icon = SourceIcon::for_search_type(search_type);
    let (list_key, map_record): (&str, fn(&Value, SourceIcon) -> ResultItem) = match response.format
    {
        ResponseFormat::Listing => ("items", listing_item),
        ResponseFormat::CodeSearch => ("items", code_search_item),
        ResponseFormat::HostSearch => ("matches", host_search_item),
    };

    let Some(records) = response.body.get(list_key).and_then(Value::as_array) else {
        return Vec::new();
    };
    records.iter().map(|record| map_record(record, default_icon)).collect()
}

fn listing_item(record: &Value, default_icon: SourceIcon) -> ResultItem {
    let icon = record.get("icon").and_then(Value::as_str).and_then(SourceIcon::from_tag);
    ResultItem {
        title: text(record, "title"),
        url: absolute_url(&text(record, "link")),
        description: text(record, "snippet"),
        source_icon: Some(icon.unwrap_or(default_icon)),
    }
}

fn code_search_item(record: &Value, default_icon: SourceIcon) -> ResultItem {
    let repository = record.get("repository").map(|repo| text(repo, "full_name")).unwrap_or_default();
    let path = text(record, "path");
    let description = match (repository.is_empty(), path.is_empty()) {
        (false, false) => format!("{repository}: {path}"),
        (false, true) => repository,
        _ => path,
    };
    ResultItem {
        title: text(record, "name"),
        url: absolute_url(&text(record, "html_url")),
        description,
        source_icon: Some(default_icon),
    }
}

fn host_search_item(record: &Value, default_icon: SourceIcon) -> ResultItem {
    let ip = text(record, "ip_str");
    let title = match record.get("port").and_then(Value::as_u64) {
        Some(port) if !ip.is_empty() => format!("{ip}:{port}"),
        _ => ip.clone(),
    };
    let url = if ip.is_empty() {
        String::new()
    } else {
        absolute_url(&format!("https://www.shodan.io/host/{ip}"))
    };

    let mut details = Vec::new();
    let org = text(record, "org");
    if !org.is_empty() {
        details.push(org);
    }
    if let Some(hostnames) = record.get("hostnames").and_then(Value::as_array) {
        let names: Vec<&str> = hostnames.iter().filter_map(Value::as_str).collect();
        if !names.is_empty() {
            details.push(names.join(", "));
        }
    }
    let banner = text(record, "data");
    if let Some(first_line) = banner.lines().map(str::trim).find(|line| !line.is_empty()) {
        details.push(first_line.to_string());
    }

    ResultItem { title, url, description: details.join(" | "), source_icon: Some(default_icon) }
}

/// String field or empty.
fn text(record: &Value, key: &str) -> String {
    record.get(key).and_then(Value::as_str).unwrap_or_default().to_string()
}

/// Keep only well-formed absolute URIs.
fn absolute_url(raw: &str) -> String {
    match Url::parse(raw.trim()) {
        Ok(url) => url.to_string(),
        Err(e) => {
            if !raw.is_empty() {
                tracing::debug!(url = raw, error = %e, "dropping malformed result URL");
            }
            String::new()
        }
    }
}
