//! Global page state container.
//!
//! Uses `thread_local!` + `RefCell` for mutable access in single-threaded
//! WASM. The module instance lives as long as the page, so selections persist
//! across change events until reload.

use serde::Serialize;
use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::config::PageConfig;
use crate::error::GemError;
use crate::gems::catalog::{CellRoster, GemCatalog};
use crate::gems::pairs::{self, ChangeEvent, PairState, Patch};

/// Most pairs a single cell may hold. Higher indices are rejected before
/// any storage is allocated for them.
pub const MAX_PAIRS_PER_CELL: usize = 16;

/// Everything the dropdowns need: config, gem data, and per-pair selections.
#[derive(Debug, Clone, Default)]
pub struct PageState {
    pub config: PageConfig,
    pub catalog: GemCatalog,
    /// Pair selections keyed by cell id, indexed by pair position in the cell.
    pub pairs: BTreeMap<String, Vec<PairState>>,
}

#[derive(Serialize)]
struct Snapshot<'a> {
    gems: usize,
    pairs: &'a BTreeMap<String, Vec<PairState>>,
}

impl PageState {
    pub fn new(config: PageConfig, catalog: GemCatalog) -> Self {
        Self {
            config,
            catalog,
            pairs: BTreeMap::new(),
        }
    }

    /// Roster for an active cell.
    pub fn roster(&self, cell: &str) -> Result<CellRoster, GemError> {
        if !self.config.is_active(cell) {
            return Err(GemError::UnknownCell(cell.to_string()));
        }
        Ok(self.catalog.roster(cell, &self.config.active_cells))
    }

    pub fn pair(&self, cell: &str, index: usize) -> PairState {
        self.pairs
            .get(cell)
            .and_then(|v| v.get(index))
            .cloned()
            .unwrap_or_default()
    }

    fn pair_mut(&mut self, cell: &str, index: usize) -> Result<&mut PairState, GemError> {
        if index >= MAX_PAIRS_PER_CELL {
            return Err(GemError::UnknownPair {
                cell: cell.to_string(),
                index,
            });
        }
        let slots = self.pairs.entry(cell.to_string()).or_default();
        if slots.len() <= index {
            slots.resize_with(index + 1, PairState::default);
        }
        Ok(&mut slots[index])
    }

    /// Patches that render a pair as it currently stands; registers the pair.
    pub fn initial_patches(&mut self, cell: &str, index: usize) -> Result<Vec<Patch>, GemError> {
        let roster = self.roster(cell)?;
        let state = self.pair_mut(cell, index)?.clone();
        Ok(pairs::render_patches(&state, &roster))
    }

    /// Run the synchronizer for one pair and store the result.
    pub fn apply(
        &mut self,
        cell: &str,
        index: usize,
        event: &ChangeEvent,
    ) -> Result<Vec<Patch>, GemError> {
        let roster = self.roster(cell)?;
        let slot = self.pair_mut(cell, index)?;
        let transition = pairs::apply_change(slot, &roster, event)?;
        *slot = transition.state;
        Ok(transition.patches)
    }

    /// Drop every selection, keeping config and gem data.
    pub fn clear_selections(&mut self) {
        self.pairs.clear();
    }

    pub fn snapshot_json(&self) -> String {
        let snapshot = Snapshot {
            gems: self.catalog.gems().len(),
            pairs: &self.pairs,
        };
        serde_json::to_string(&snapshot).unwrap_or_else(|_| "{}".to_string())
    }
}

thread_local! {
    static STATE: RefCell<PageState> = RefCell::new(PageState::default());
}

/// Execute a closure with read access to the page state.
pub fn with_state<F, R>(f: F) -> R
where
    F: FnOnce(&PageState) -> R,
{
    STATE.with(|s| f(&s.borrow()))
}

/// Execute a closure with mutable access to the page state.
pub fn with_state_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut PageState) -> R,
{
    STATE.with(|s| f(&mut s.borrow_mut()))
}

pub fn replace_state(new_state: PageState) {
    STATE.with(|s| {
        *s.borrow_mut() = new_state;
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gems::catalog::Gem;
    use crate::gems::dropdown::Role;

    fn page() -> PageState {
        let all = ["cell-1", "cell-2", "cell-4", "cell-5", "cell-6", "cell-8"];
        PageState::new(
            PageConfig::default(),
            GemCatalog::new(vec![Gem::new("A", &all), Gem::new("B", &["cell-1"])]),
        )
    }

    #[test]
    fn inactive_cell_is_unknown() {
        assert!(matches!(page().roster("cell-3"), Err(GemError::UnknownCell(_))));
    }

    #[test]
    fn apply_stores_pair_state() {
        let mut page = page();
        page.apply("cell-1", 1, &ChangeEvent::from_raw(Role::Primary, "B"))
            .unwrap();
        assert_eq!(page.pair("cell-1", 1).primary.as_deref(), Some("B"));
        // Earlier pairs in the cell are created empty.
        assert_eq!(page.pair("cell-1", 0), PairState::default());
        assert_eq!(page.pairs["cell-1"].len(), 2);
    }

    #[test]
    fn pairs_in_different_cells_are_independent() {
        let mut page = page();
        page.apply("cell-1", 0, &ChangeEvent::from_raw(Role::Primary, "A"))
            .unwrap();
        page.apply("cell-2", 0, &ChangeEvent::from_raw(Role::Secondary, "A"))
            .unwrap();
        assert_eq!(page.pair("cell-1", 0).primary.as_deref(), Some("A"));
        assert_eq!(page.pair("cell-2", 0).secondary.as_deref(), Some("A"));
    }

    #[test]
    fn failed_change_leaves_state_untouched() {
        let mut page = page();
        page.apply("cell-2", 0, &ChangeEvent::from_raw(Role::Primary, "A"))
            .unwrap();
        let err = page.apply("cell-2", 0, &ChangeEvent::from_raw(Role::Secondary, "B"));
        assert!(matches!(err, Err(GemError::NotAllowed { .. })));
        assert_eq!(page.pair("cell-2", 0).primary.as_deref(), Some("A"));
    }

    #[test]
    fn out_of_range_pair_is_rejected() {
        let mut page = page();
        for index in [MAX_PAIRS_PER_CELL, usize::MAX / 2, usize::MAX] {
            let err = page.apply("cell-1", index, &ChangeEvent::from_raw(Role::Primary, "A"));
            assert!(matches!(err, Err(GemError::UnknownPair { .. })));
            assert!(matches!(
                page.initial_patches("cell-1", index),
                Err(GemError::UnknownPair { .. })
            ));
        }
        assert!(page.pairs.is_empty());
        page.apply("cell-1", MAX_PAIRS_PER_CELL - 1, &ChangeEvent::from_raw(Role::Primary, "A"))
            .unwrap();
    }

    #[test]
    fn initial_patches_register_pair() {
        let mut page = page();
        let patches = page.initial_patches("cell-4", 0).unwrap();
        assert_eq!(patches.len(), 4);
        assert!(page.pairs.contains_key("cell-4"));
    }

    #[test]
    fn thread_local_state_roundtrip() {
        replace_state(page());
        with_state_mut(|s| {
            s.apply("cell-1", 0, &ChangeEvent::from_raw(Role::Primary, "B"))
        })
        .unwrap();
        let json = with_state(|s| s.snapshot_json());
        assert!(json.contains(r#""primary":"B""#));
        assert!(json.contains(r#""gems":2"#));

        with_state_mut(|s| s.clear_selections());
        with_state(|s| assert!(s.pairs.is_empty()));
        replace_state(PageState::default());
    }
}
