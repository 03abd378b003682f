//! Error type for map redirect setup and event handling

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RedirectError {
    #[error("Invalid page address '{address}': {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Browser global not available: {0}")]
    MissingGlobal(&'static str),

    #[error("DOM operation '{operation}' failed: {detail}")]
    Dom {
        operation: &'static str,
        detail: String,
    },

    #[error("Opening {0} was blocked")]
    NavigationBlocked(String),
}

impl RedirectError {
    /// Wrap a failure reported by a DOM API, keeping the operation name
    pub fn dom(operation: &'static str, detail: impl std::fmt::Debug) -> Self {
        RedirectError::Dom {
            operation,
            detail: format!("{:?}", detail),
        }
    }
}
