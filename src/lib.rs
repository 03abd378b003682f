//! Map Redirect - content script that sends map widget clicks to Google Maps
//! Built with Rust + WASM

pub mod binder;
pub mod config;
pub mod error;
pub mod handler;
pub mod link;
pub mod query;
pub mod setup;
pub mod watcher;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(test)]
mod testing;

use wasm_bindgen::prelude::*;

pub use config::RedirectConfig;
pub use error::RedirectError;

// Set up logging and the panic hook, then wait for the page to load
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    #[cfg(target_arch = "wasm32")]
    web::install_on_load();
}

// Link builder exposed for JavaScript access
#[wasm_bindgen]
pub fn maps_link_for(query: &str) -> String {
    query::QueryTerm::new(query)
        .map(|term| link::TargetLink::for_query(config::MAPS_SEARCH_ENDPOINT, &term).to_string())
        .unwrap_or_default()
}
