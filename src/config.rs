//! Page configuration — where the gem data and fragments live, which cells
//! are active, and how pairs are found in the markup.
//!
//! Every field has a default matching the calculator page, so an empty JSON
//! object (or an empty string) yields a working configuration.

use serde::{Deserialize, Serialize};

use crate::error::GemError;

/// An HTML fragment injected into a placeholder element on page load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FragmentSlot {
    pub placeholder_id: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageConfig {
    /// URL of the `{ gems: [...] }` document.
    pub gem_data_path: String,
    /// Cells that contain gem pairs. Also the reference set for the
    /// restriction rule: a gem allowed in fewer of these is restricted.
    pub active_cells: Vec<String>,
    pub fragments: Vec<FragmentSlot>,
    pub pair_selector: String,
    pub primary_selector: String,
    pub secondary_selector: String,
    /// Global function called after every pair change, if defined on `window`.
    pub summary_hook: Option<String>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            gem_data_path: "data/gems.json".to_string(),
            active_cells: ["cell-1", "cell-2", "cell-4", "cell-5", "cell-6", "cell-8"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            fragments: vec![
                FragmentSlot {
                    placeholder_id: "header-placeholder".to_string(),
                    path: "/templates/header.html".to_string(),
                },
                FragmentSlot {
                    placeholder_id: "footer-placeholder".to_string(),
                    path: "/templates/footer.html".to_string(),
                },
            ],
            pair_selector: ".gem-pair, .pair".to_string(),
            primary_selector: ".primary, .primary-gem".to_string(),
            secondary_selector: ".secondary, .secondary-gem".to_string(),
            summary_hook: Some("updateSummaryTables".to_string()),
        }
    }
}

impl PageConfig {
    /// Parse a config document. Blank input means "all defaults".
    pub fn from_json(json: &str) -> Result<Self, GemError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_active(&self, cell: &str) -> bool {
        self.active_cells.iter().any(|c| c == cell)
    }
}
