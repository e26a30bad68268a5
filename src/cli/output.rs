//! Plain-text rendering for the command line.
//!
//! Provider-supplied text goes through [`sanitize_line`] before it reaches
//! the terminal.

use std::fmt::Write;

use crate::history::HistoryLedger;
use crate::models::{ResultEnvelope, SearchType};
use crate::registry::schema_for;
use crate::utils::{sanitize_line, truncate};

/// History terms longer than this are shortened in listings.
pub const HISTORY_TERM_WIDTH: usize = 25;

const DESCRIPTION_WIDTH: usize = 200;

pub fn render_envelope(envelope: &ResultEnvelope) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} search", envelope.search_type.label());
    let _ = writeln!(out, "Query: {}", sanitize_line(&envelope.built_query_string));
    let _ = writeln!(out);

    if envelope.is_empty() {
        let _ = writeln!(out, "No results found.");
        return out;
    }

    for (i, item) in envelope.items.iter().enumerate() {
        let title = sanitize_line(&item.title);
        let title = if title.is_empty() { "(untitled)".to_string() } else { title };
        let icon = item.source_icon.map(|icon| format!("[{}] ", icon.as_str())).unwrap_or_default();
        let _ = writeln!(out, "{:>2}. {icon}{title}", i + 1);
        if !item.url.is_empty() {
            let _ = writeln!(out, "    {}", sanitize_line(&item.url));
        }
        let description = sanitize_line(&item.description);
        if !description.is_empty() {
            let _ = writeln!(out, "    {}", truncate(&description, DESCRIPTION_WIDTH));
        }
    }
    out
}

pub fn render_history(ledger: &HistoryLedger) -> String {
    if ledger.is_empty() {
        return "No search history.\n".to_string();
    }

    let mut out = String::new();
    for (i, entry) in ledger.iter().enumerate() {
        let _ = writeln!(
            out,
            "{i:>2}  {}  {:<15}  {}",
            entry.created_at().format("%Y-%m-%d %H:%M"),
            entry.search_type().as_str(),
            truncate(&sanitize_line(entry.raw_term()), HISTORY_TERM_WIDTH),
        );
    }
    out
}

/// Every search type with its options and their defaults.
pub fn render_types() -> String {
    let mut out = String::new();
    for search_type in SearchType::all() {
        let _ = writeln!(out, "{:<16} {}", search_type.as_str(), search_type.label());
        let schema = schema_for(*search_type);
        if schema.fields.is_empty() {
            let _ = writeln!(out, "    (no options)");
        }
        for field in schema.fields {
            let default = field.default.map(|d| format!(" [default: {d}]")).unwrap_or_default();
            let required = if field.required { ", required" } else { "" };
            let _ = writeln!(
                out,
                "    {} ({}{required}){default}: {}",
                field.name,
                field.kind.as_str(),
                field.help
            );
        }
    }
    out
}
