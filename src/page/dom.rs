//! DOM projection of the pair reducer: finds the gem pairs on the page,
//! renders their options, and listens for changes.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlOptionElement, HtmlSelectElement, Window};

use crate::config::PageConfig;
use crate::error::GemError;
use crate::gems::dropdown::{DropdownOption, Role};
use crate::gems::pairs::{ChangeEvent, Patch};
use crate::gems::state::{with_state, with_state_mut};
use crate::page::{fetch, log};

pub fn window() -> Result<Window, GemError> {
    web_sys::window().ok_or_else(|| GemError::Dom("no window".to_string()))
}

pub fn document() -> Result<Document, GemError> {
    window()?
        .document()
        .ok_or_else(|| GemError::Dom("no document".to_string()))
}

/// The two `<select>` elements of one pair.
#[derive(Clone)]
pub struct PairControls {
    pub primary: HtmlSelectElement,
    pub secondary: HtmlSelectElement,
}

impl PairControls {
    pub fn get(&self, role: Role) -> &HtmlSelectElement {
        match role {
            Role::Primary => &self.primary,
            Role::Secondary => &self.secondary,
        }
    }
}

fn find_select(pair: &Element, selector: &str) -> Result<HtmlSelectElement, GemError> {
    pair.query_selector(selector)?
        .ok_or_else(|| GemError::MissingElement(selector.to_string()))?
        .dyn_into::<HtmlSelectElement>()
        .map_err(|_| GemError::Dom(format!("`{selector}` is not a <select>")))
}

fn replace_options(select: &HtmlSelectElement, options: &[DropdownOption]) -> Result<(), GemError> {
    select.set_inner_html("");
    for option in options {
        let el = HtmlOptionElement::new_with_text_and_value(&option.label, &option.value)?;
        el.set_disabled(option.disabled);
        if option.restricted {
            el.set_attribute("data-restricted", "true")?;
        }
        select.append_child(&el)?;
    }
    Ok(())
}

/// Call the configured global summary function if the page defines one.
fn call_summary_hook() -> Result<(), GemError> {
    let Some(name) = with_state(|s| s.config.summary_hook.clone()) else {
        return Ok(());
    };
    let window = window()?;
    let hook = js_sys::Reflect::get(&window, &JsValue::from_str(&name))?;
    if let Some(f) = hook.dyn_ref::<js_sys::Function>() {
        f.call0(&window)?;
    }
    Ok(())
}

/// Apply reducer patches to a pair's elements, in order.
pub fn apply_patches(controls: &PairControls, patches: &[Patch]) -> Result<(), GemError> {
    for patch in patches {
        match patch {
            Patch::ReplaceOptions { role, options } => replace_options(controls.get(*role), options)?,
            Patch::SetValue { role, value } => {
                controls.get(*role).set_value(value.as_deref().unwrap_or(""))
            }
            Patch::RecalculateSummary => call_summary_hook()?,
        }
    }
    Ok(())
}

fn on_change(cell: &str, index: usize, role: Role, controls: &PairControls) {
    let event = ChangeEvent::from_raw(role, &controls.get(role).value());
    let result = with_state_mut(|s| s.apply(cell, index, &event))
        .and_then(|patches| apply_patches(controls, &patches));
    if let Err(e) = result {
        log::error(&format!("{cell} pair {index}: {e}"));
        // Put the controls back in line with the stored state.
        let resync = with_state_mut(|s| s.initial_patches(cell, index))
            .and_then(|patches| apply_patches(controls, &patches));
        if let Err(e) = resync {
            log::error(&format!("{cell} pair {index}: resync failed: {e}"));
        }
    }
}

/// Render a pair's initial options and attach `change` listeners to both selects.
pub fn bind_pair(cell: &str, index: usize, pair: &Element, config: &PageConfig) -> Result<(), GemError> {
    let controls = PairControls {
        primary: find_select(pair, &config.primary_selector)?,
        secondary: find_select(pair, &config.secondary_selector)?,
    };
    let patches = with_state_mut(|s| s.initial_patches(cell, index))?;
    apply_patches(&controls, &patches)?;

    for role in [Role::Primary, Role::Secondary] {
        let cell = cell.to_string();
        let captured = controls.clone();
        let listener = Closure::<dyn FnMut()>::new(move || {
            on_change(&cell, index, role, &captured);
        });
        controls
            .get(role)
            .add_event_listener_with_callback("change", listener.as_ref().unchecked_ref())?;
        // Listeners live as long as the page.
        listener.forget();
    }
    Ok(())
}

/// Bind every pair in every active cell. Missing cells and malformed pairs
/// are logged and skipped.
pub fn bind_cells(document: &Document) -> Result<usize, GemError> {
    let config = with_state(|s| s.config.clone());
    let mut bound = 0;
    for cell_id in &config.active_cells {
        let Some(cell) = document.get_element_by_id(cell_id) else {
            log::error(&format!("missing cell #{cell_id}"));
            continue;
        };
        let pairs = cell.query_selector_all(&config.pair_selector)?;
        for i in 0..pairs.length() {
            let Some(pair) = pairs.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            match bind_pair(cell_id, i as usize, &pair, &config) {
                Ok(()) => bound += 1,
                Err(e) => log::error(&format!("{cell_id} pair {i}: {e}")),
            }
        }
    }
    Ok(bound)
}

/// Load the gem data, then populate and wire every pair. A failed load leaves
/// the catalog empty, so the dropdowns show only their placeholders.
pub async fn populate_gem_dropdowns(path: &str) {
    match fetch::load_gems(path).await {
        Ok(catalog) => {
            log::info(&format!("loaded {} gems from {path}", catalog.gems().len()));
            with_state_mut(|s| s.catalog = catalog);
        }
        Err(e) => log::error(&format!("Failed to load gems from {path}: {e}")),
    }
    match document().and_then(|d| bind_cells(&d)) {
        Ok(n) => log::info(&format!("bound {n} gem pairs")),
        Err(e) => log::error(&format!("binding gem pairs failed: {e}")),
    }
}
