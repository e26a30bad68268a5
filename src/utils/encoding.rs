use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

// Same unreserved set as JavaScript's encodeURIComponent
const COMPONENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes a value for use as a single URL component (query value or path segment)
///
/// # Examples
///
/// ```
/// use deep_search::utils::encode_component;
///
/// assert_eq!(encode_component(r#"filetype:pdf "budget""#), "filetype%3Apdf%20%22budget%22");
/// ```
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT_SET).to_string()
}

/// Turns a search term into a URL path segment: whitespace runs become `_`,
/// everything else outside the unreserved set is percent-encoded
///
/// # Examples
///
/// ```
/// use deep_search::utils::slugify_term;
///
/// assert_eq!(slugify_term("annual  report 2024"), "annual_report_2024");
/// ```
pub fn slugify_term(term: &str) -> String {
    let joined = term.split_whitespace().collect::<Vec<_>>().join("_");
    encode_component(&joined)
}
