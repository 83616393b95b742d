//! `/api/gems/*` routes — gem data loading, pair rendering, and selection
//! changes for HTMX-driven pages.
//!
//! All state lives in the `gems::state` thread-local.

use crate::config::PageConfig;
use crate::error::GemError;
use crate::gems::catalog::GemCatalog;
use crate::gems::dropdown::Role;
use crate::gems::pairs::ChangeEvent;
use crate::gems::render;
use crate::gems::state::{with_state, with_state_mut, MAX_PAIRS_PER_CELL};
use crate::routes::util::{error_span, get_param, parse_form_body, parse_query};

fn pair_index(params: &[(String, String)]) -> Option<usize> {
    get_param(params, "pair").and_then(|s| s.parse().ok())
}

/// Render a pair as it is currently stored.
fn render_stored_pair(cell: &str, index: usize) -> Result<String, GemError> {
    if index >= MAX_PAIRS_PER_CELL {
        return Err(GemError::UnknownPair {
            cell: cell.to_string(),
            index,
        });
    }
    with_state(|s| {
        let roster = s.roster(cell)?;
        Ok(render::render_pair(cell, index, &s.pair(cell, index), &roster))
    })
}

// ── POST /api/gems/config ──────────────────────────────────────────

/// Handle POST /api/gems/config
/// Body: page config JSON (blank for defaults). Clears all selections.
pub fn handle_config_post(body: &str) -> String {
    match PageConfig::from_json(body) {
        Ok(config) => {
            let cells = config.active_cells.len();
            with_state_mut(|s| {
                s.config = config;
                s.clear_selections();
            });
            format!(
                r#"<span class="text-emerald-600">Config loaded: {} active cells</span>"#,
                cells
            )
        }
        Err(e) => error_span(&format!("Config rejected: {}", e)),
    }
}

// ── POST /api/gems/load ────────────────────────────────────────────

/// Handle POST /api/gems/load
/// Body: `{ "gems": [{ "name": ..., "allowedCells": [...] }] }`.
/// Replaces the catalog and clears all selections.
pub fn handle_load_post(body: &str) -> String {
    match GemCatalog::from_json(body) {
        Ok(catalog) => {
            let count = catalog.gems().len();
            with_state_mut(|s| {
                s.catalog = catalog;
                s.clear_selections();
            });
            format!(
                r#"<span class="text-emerald-600">Loaded {} gems</span>"#,
                count
            )
        }
        Err(e) => error_span(&format!("Gem data rejected: {}", e)),
    }
}

// ── GET /api/gems/pair ─────────────────────────────────────────────

/// Handle GET /api/gems/pair?cell={id}&pair={n}
/// Returns both selects of the pair.
pub fn handle_pair_get(query: &str) -> String {
    let params = parse_query(query);
    let cell = match get_param(&params, "cell") {
        Some(c) if !c.is_empty() => c,
        _ => return error_span("Missing cell parameter"),
    };
    let Some(index) = pair_index(&params) else {
        return error_span("Missing or invalid pair parameter");
    };
    render_stored_pair(cell, index).unwrap_or_else(|e| error_span(&e.to_string()))
}

// ── POST /api/gems/select ──────────────────────────────────────────

/// Handle POST /api/gems/select
/// Body params: `cell={id}&pair={n}&role={primary|secondary}&value={gem}`.
/// An empty or placeholder value clears the control.
///
/// Returns the re-rendered pair followed by the summary hook script.
pub fn handle_select_post(body: &str) -> String {
    let params = parse_form_body(body);
    let cell = match get_param(&params, "cell") {
        Some(c) if !c.is_empty() => c,
        _ => return error_span("Missing cell parameter"),
    };
    let Some(index) = pair_index(&params) else {
        return error_span("Missing or invalid pair parameter");
    };
    let Some(role) = get_param(&params, "role").and_then(Role::parse) else {
        return error_span("Missing or invalid role parameter");
    };
    let event = ChangeEvent::from_raw(role, get_param(&params, "value").unwrap_or(""));

    let applied = with_state_mut(|s| s.apply(cell, index, &event));
    if let Err(e) = applied {
        return error_span(&e.to_string());
    }

    match render_stored_pair(cell, index) {
        Ok(mut html) => {
            let hook = with_state(|s| s.config.summary_hook.clone());
            html.push_str(&render::render_summary_hook(hook.as_deref()));
            html
        }
        Err(e) => error_span(&e.to_string()),
    }
}

// ── GET /api/gems/state ────────────────────────────────────────────

/// Handle GET /api/gems/state
/// Returns a JSON snapshot of every pair's selections.
pub fn handle_state_get(_query: &str) -> String {
    with_state(|s| s.snapshot_json())
}

// ── POST /api/gems/reset ───────────────────────────────────────────

/// Handle POST /api/gems/reset
/// Clears every selection; config and gem data stay loaded.
pub fn handle_reset_post(_body: &str) -> String {
    with_state_mut(|s| s.clear_selections());
    r#"<span class="text-emerald-600">All selections cleared.</span>"#.to_string()
}
