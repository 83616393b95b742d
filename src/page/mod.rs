//! Browser runtime. `boot` waits for the DOM, then loads the shared
//! header/footer fragments and the gem dropdowns as independent tasks.
//!
//! Only built for `wasm32`; everything it does to the page goes through
//! `dom::apply_patches`.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::config::PageConfig;
use crate::error::GemError;
use crate::gems::state::{with_state, with_state_mut};

pub mod dom;
pub mod fetch;
pub mod log;

impl From<JsValue> for GemError {
    fn from(value: JsValue) -> Self {
        GemError::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<GemError> for JsValue {
    fn from(err: GemError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Configure the page and start loading once the DOM is ready.
///
/// `config_json` is a `PageConfig` document; pass an empty string for the
/// defaults.
#[wasm_bindgen]
pub fn boot(config_json: &str) -> Result<(), JsValue> {
    let config = PageConfig::from_json(config_json)?;
    with_state_mut(|s| s.config = config);

    let document = dom::document()?;
    if document.ready_state() == "loading" {
        let on_ready = Closure::once(start);
        document.add_event_listener_with_callback(
            "DOMContentLoaded",
            on_ready.as_ref().unchecked_ref(),
        )?;
        on_ready.forget();
    } else {
        start();
    }
    Ok(())
}

fn start() {
    let (fragments, gem_path) = with_state(|s| {
        (
            s.config.fragments.clone(),
            s.config.gem_data_path.clone(),
        )
    });
    for slot in fragments {
        spawn_local(async move {
            fetch::load_fragment(&slot.placeholder_id, &slot.path).await;
        });
    }
    spawn_local(async move {
        dom::populate_gem_dropdowns(&gem_path).await;
    });
}
