//! Maps search link construction

use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::query::QueryTerm;

/// Characters left unescaped in a URI component, as `encodeURIComponent` does
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Fully encoded maps search URL for one query term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetLink(String);

impl TargetLink {
    /// Build `<endpoint>?api=1&query=<term>` with the term percent-encoded
    ///
    /// Examples:
    /// - `pizza` → `https://www.google.com/maps/search/?api=1&query=pizza`
    /// - `a&b` → `https://www.google.com/maps/search/?api=1&query=a%26b`
    pub fn for_query(endpoint: &str, term: &QueryTerm) -> TargetLink {
        TargetLink(format!(
            "{}?api=1&query={}",
            endpoint,
            utf8_percent_encode(term.as_str(), URI_COMPONENT)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
