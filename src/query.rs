//! Search term extraction from the page address

use std::fmt;

use url::Url;

use crate::error::RedirectError;

/// Decoded value of the page's search parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTerm(String);

impl QueryTerm {
    /// `None` for an empty term
    pub fn new(text: impl Into<String>) -> Option<QueryTerm> {
        let text = text.into();
        (!text.is_empty()).then_some(QueryTerm(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueryTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read `param` from the query string of `address`
///
/// Values are decoded as `application/x-www-form-urlencoded`, so both `+`
/// and `%20` become a space. When the parameter repeats, the first
/// occurrence wins. A missing or empty parameter yields `Ok(None)`.
pub fn extract_query_term(address: &str, param: &str) -> Result<Option<QueryTerm>, RedirectError> {
    let url = Url::parse(address).map_err(|source| RedirectError::InvalidAddress {
        address: address.to_string(),
        source,
    })?;

    Ok(url
        .query_pairs()
        .find(|(name, _)| name == param)
        .and_then(|(_, value)| QueryTerm::new(value.into_owned())))
}
