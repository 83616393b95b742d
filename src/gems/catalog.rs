//! Gem catalog — the static gem list and per-cell rosters.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::GemError;

/// A selectable gem and the grid cells it may be placed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gem {
    pub name: String,
    pub allowed_cells: BTreeSet<String>,
}

impl Gem {
    pub fn new(name: &str, cells: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            allowed_cells: cells.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn is_allowed_in(&self, cell: &str) -> bool {
        self.allowed_cells.contains(cell)
    }

    /// Restricted gems are available in fewer than all active cells.
    /// Cells outside the active set don't count toward availability.
    pub fn is_restricted(&self, active_cells: &[String]) -> bool {
        let available = active_cells
            .iter()
            .filter(|c| self.allowed_cells.contains(c.as_str()))
            .count();
        available < active_cells.len()
    }
}

#[derive(Deserialize)]
struct GemFile {
    gems: Vec<Gem>,
}

/// The gem list loaded at page start. Order follows the data file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GemCatalog {
    gems: Vec<Gem>,
}

impl GemCatalog {
    pub fn new(gems: Vec<Gem>) -> Self {
        Self { gems }
    }

    /// Parse a `{ "gems": [{ "name": ..., "allowedCells": [...] }] }` document.
    pub fn from_json(json: &str) -> Result<Self, GemError> {
        let file: GemFile = serde_json::from_str(json)?;
        Ok(Self::new(file.gems))
    }

    pub fn gems(&self) -> &[Gem] {
        &self.gems
    }

    pub fn is_empty(&self) -> bool {
        self.gems.is_empty()
    }

    pub fn allowed_in<'a>(&'a self, cell: &'a str) -> impl Iterator<Item = &'a Gem> + 'a {
        self.gems.iter().filter(move |g| g.is_allowed_in(cell))
    }

    /// Build the roster for one cell, tagging restricted gems.
    pub fn roster(&self, cell: &str, active_cells: &[String]) -> CellRoster {
        let entries = self
            .allowed_in(cell)
            .map(|g| RosterEntry {
                name: g.name.clone(),
                restricted: g.is_restricted(active_cells),
            })
            .collect();
        CellRoster {
            cell: cell.to_string(),
            entries,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub name: String,
    pub restricted: bool,
}

/// Gems offered in a single cell, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRoster {
    pub cell: String,
    pub entries: Vec<RosterEntry>,
}

impl CellRoster {
    pub fn get(&self, name: &str) -> Option<&RosterEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn is_restricted(&self, name: &str) -> bool {
        self.get(name).is_some_and(|e| e.restricted)
    }
}
