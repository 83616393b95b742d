//! Gem calculator page logic, compiled to WASM.
//!
//! Two entry points share one core (`gems`):
//! - `boot(config_json)` drives the page directly: it injects the shared
//!   header/footer fragments, loads the gem list, and keeps every
//!   primary/secondary dropdown pair consistent as the user changes them.
//! - `handle_request(method, path, query, body)` serves the same operations
//!   as HTML fragments for HTMX, for pages that route requests through a
//!   Service Worker bridge. Uses `matchit` for URL routing.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod gems;
#[cfg(target_arch = "wasm32")]
pub mod page;
pub mod routes;

/// Process an HTTP-like request and return an HTML fragment.
///
/// # Arguments
/// * `method` — HTTP method ("GET" or "POST")
/// * `path`   — URL path (e.g., "/api/gems/pair")
/// * `query`  — Query string (e.g., "?cell=cell-1&pair=0")
/// * `body`   — Request body (form data or JSON). Empty string for GET requests.
#[wasm_bindgen]
pub fn handle_request(method: &str, path: &str, query: &str, body: &str) -> String {
    let mut router = matchit::Router::new();

    router.insert("/api/gems/config", "gems_config").ok();
    router.insert("/api/gems/load", "gems_load").ok();
    router.insert("/api/gems/pair", "gems_pair").ok();
    router.insert("/api/gems/select", "gems_select").ok();
    router.insert("/api/gems/state", "gems_state").ok();
    router.insert("/api/gems/reset", "gems_reset").ok();

    match router.at(path) {
        Ok(matched) => match (*matched.value, method) {
            ("gems_pair", "GET") => routes::gems::handle_pair_get(query),
            ("gems_state", "GET") => routes::gems::handle_state_get(query),

            ("gems_config", "POST") => routes::gems::handle_config_post(body),
            ("gems_load", "POST") => routes::gems::handle_load_post(body),
            ("gems_select", "POST") => routes::gems::handle_select_post(body),
            ("gems_reset", "POST") => routes::gems::handle_reset_post(body),

            _ => method_not_allowed(),
        },
        Err(_) => not_found(),
    }
}

fn not_found() -> String {
    r#"<span class="text-red-700">404 — route not found</span>"#.to_string()
}

fn method_not_allowed() -> String {
    r#"<span class="text-red-700">405 — method not allowed</span>"#.to_string()
}
