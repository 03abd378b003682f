//! Compiled-in settings for map redirection

/// CSS selectors for map widgets, in priority order
pub const MAP_SELECTORS: &[&str] = &[
    "#lu_map",               // static map container
    "#dimg_1",               // static map image
    ".BOZmjd.t7AnBb.Q6cQSe", // interactive map container
];

/// Query-string parameter holding the page's search term
pub const QUERY_PARAM: &str = "q";

/// External maps search endpoint
pub const MAPS_SEARCH_ENDPOINT: &str = "https://www.google.com/maps/search/";

/// Browsing context the maps link opens in
pub const NEW_CONTEXT_TARGET: &str = "_blank";

/// Immutable configuration owned by the setup orchestrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectConfig {
    pub selectors: &'static [&'static str],
    pub query_param: &'static str,
    pub maps_endpoint: &'static str,
    pub target: &'static str,
}

impl RedirectConfig {
    /// All selectors joined into one selector list (logical OR)
    pub fn combined_selector(&self) -> String {
        self.selectors.join(", ")
    }
}

impl Default for RedirectConfig {
    fn default() -> Self {
        RedirectConfig {
            selectors: MAP_SELECTORS,
            query_param: QUERY_PARAM,
            maps_endpoint: MAPS_SEARCH_ENDPOINT,
            target: NEW_CONTEXT_TARGET,
        }
    }
}
