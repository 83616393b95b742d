//! Fetch wrappers: gem data and shared HTML fragments.

use gloo_net::http::Request;

use crate::error::GemError;
use crate::gems::catalog::GemCatalog;
use crate::page::{dom, log};

/// GET a resource as text. Non-2xx responses are errors.
pub async fn fetch_text(url: &str) -> Result<String, GemError> {
    let transport = |e: gloo_net::Error| GemError::Fetch {
        url: url.to_string(),
        message: e.to_string(),
    };
    let resp = Request::get(url).send().await.map_err(transport)?;
    if !resp.ok() {
        return Err(GemError::Http {
            url: url.to_string(),
            status: resp.status(),
        });
    }
    resp.text().await.map_err(transport)
}

/// Fetch and parse the gem list.
pub async fn load_gems(path: &str) -> Result<GemCatalog, GemError> {
    let text = fetch_text(path).await?;
    GemCatalog::from_json(&text)
}

async fn inject_fragment(placeholder_id: &str, path: &str) -> Result<(), GemError> {
    let html = fetch_text(path).await?;
    let placeholder = dom::document()?
        .get_element_by_id(placeholder_id)
        .ok_or_else(|| GemError::MissingElement(format!("#{placeholder_id}")))?;
    placeholder.set_inner_html(&html);
    Ok(())
}

/// Fill a placeholder element with an HTML file. Failures are logged and
/// leave the placeholder as it was.
pub async fn load_fragment(placeholder_id: &str, path: &str) {
    match inject_fragment(placeholder_id, path).await {
        Ok(()) => log::info(&format!("loaded {path} into #{placeholder_id}")),
        Err(e) => log::error(&format!("Failed to load {path}: {e}")),
    }
}
