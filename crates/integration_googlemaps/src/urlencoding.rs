//! URL encoding for free-text query parameters

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Everything except RFC 3986 unreserved characters (`A-Z`, `a-z`, `0-9`,
/// `-`, `_`, `.`, `~`)
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a string for use as a query parameter value
///
/// Spaces become `%20` and `|` becomes `%7C`, so an encoded item can be
/// joined with a literal `|` separator without ambiguity.
pub fn encode(input: &str) -> String {
    utf8_percent_encode(input, QUERY_VALUE).to_string()
}
