//! Provider query-string construction.
//!
//! Operator tokens are emitted exactly as the providers expect them. Clause
//! order is fixed: required clauses first, then the optional
//! domain / org / country restriction.

use crate::models::options::{CodeHostOptions, DeviceOptions, DriveOptions};
use crate::models::SearchOptions;

/// Host every document-host search is scoped to.
pub const DRIVE_HOST: &str = "drive.google.com";

const INDEX_OF: &str = "intitle:\"index of\"";
const PARENT_DIRECTORY: &str = "\"parent directory\"";
const EXCLUDE_PAGES: &str = "-html -htm -php";

/// Build the provider query for `term`. The search type is implied by the
/// options variant. Pure: the same inputs always give the same string.
pub fn build_query(term: &str, options: &SearchOptions) -> String {
    match options {
        SearchOptions::GenericDrive(opts) => drive_query(term, opts),
        SearchOptions::FtpIndex(_) => format!("{INDEX_OF} \"{term}\" {EXCLUDE_PAGES}"),
        SearchOptions::DirectoryIndex => {
            format!("{INDEX_OF} {PARENT_DIRECTORY} \"{term}\" {EXCLUDE_PAGES}")
        }
        SearchOptions::CodeHost(opts) => code_host_query(term, opts),
        SearchOptions::DeviceIndex(opts) => device_query(term, opts),
    }
}

fn drive_query(term: &str, opts: &DriveOptions) -> String {
    let mut query = format!("site:{DRIVE_HOST} filetype:{} \"{term}\"", opts.file_type);
    if let Some(domain) = present(&opts.domain) {
        query.push_str(" site:");
        query.push_str(domain);
    }
    query
}

fn code_host_query(term: &str, opts: &CodeHostOptions) -> String {
    let extensions =
        opts.extensions.iter().map(|ext| format!("ext:{ext}")).collect::<Vec<_>>().join(" OR ");
    let mut query = format!("\"{term}\" {extensions}");
    if let Some(org) = present(&opts.organization) {
        query.push_str(" org:");
        query.push_str(org);
    }
    query
}

fn device_query(term: &str, opts: &DeviceOptions) -> String {
    let mut query = format!("{} \"{term}\"", opts.device_type);
    if let Some(country) = present(&opts.country_code) {
        query.push_str(" country:");
        query.push_str(country);
    }
    query
}

/// Optional clauses are skipped when unset or empty.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
