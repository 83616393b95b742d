//! Paired-dropdown synchronization as a reducer.
//!
//! A change to one control yields the next `PairState` plus the patches the
//! DOM needs to catch up. Nothing here touches the DOM, so the page runtime
//! and the fragment API both drive the same logic.

use serde::{Deserialize, Serialize};

use crate::error::GemError;
use crate::gems::catalog::CellRoster;
use crate::gems::dropdown::{self, DropdownOption, Role};

/// Current selections of one primary/secondary pair. `None` is the placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairState {
    pub primary: Option<String>,
    pub secondary: Option<String>,
}

impl PairState {
    pub fn get(&self, role: Role) -> Option<&str> {
        match role {
            Role::Primary => self.primary.as_deref(),
            Role::Secondary => self.secondary.as_deref(),
        }
    }

    pub fn set(&mut self, role: Role, value: Option<String>) {
        match role {
            Role::Primary => self.primary = value,
            Role::Secondary => self.secondary = value,
        }
    }
}

/// A user picked `value` in the `role` control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub role: Role,
    pub value: Option<String>,
}

impl ChangeEvent {
    /// Build from a raw select value; placeholder values become `None`.
    pub fn from_raw(role: Role, raw: &str) -> Self {
        let value = if dropdown::is_placeholder_value(raw) {
            None
        } else {
            Some(raw.to_string())
        };
        Self { role, value }
    }
}

/// A DOM update for one pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Patch {
    /// Clear the control and insert these options.
    ReplaceOptions {
        role: Role,
        options: Vec<DropdownOption>,
    },
    /// Select this value; `None` selects the placeholder.
    SetValue { role: Role, value: Option<String> },
    /// Call the page's summary hook, if any.
    RecalculateSummary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: PairState,
    pub patches: Vec<Patch>,
}

/// Patches that render a pair from scratch without touching the summary.
pub fn render_patches(state: &PairState, roster: &CellRoster) -> Vec<Patch> {
    let mut patches = Vec::with_capacity(4);
    for role in [Role::Primary, Role::Secondary] {
        patches.push(Patch::ReplaceOptions {
            role,
            options: dropdown::availability(role, roster, state),
        });
        patches.push(Patch::SetValue {
            role,
            value: state.get(role).map(str::to_string),
        });
    }
    patches
}

/// Apply a change to one control of a pair.
///
/// The paired control is rebuilt from scratch with the changed gem disabled
/// (and, for a restricted gem, every other restricted gem). Its previous
/// selection survives only if still selectable.
pub fn apply_change(
    state: &PairState,
    roster: &CellRoster,
    event: &ChangeEvent,
) -> Result<Transition, GemError> {
    if let Some(value) = &event.value {
        if !roster.contains(value) {
            return Err(GemError::NotAllowed {
                gem: value.clone(),
                cell: roster.cell.clone(),
            });
        }
    }

    let changed = event.role;
    let paired = changed.other();
    let previous = state.get(paired).map(str::to_string);

    let mut next = state.clone();
    next.set(changed, event.value.clone());

    let paired_options = dropdown::availability(paired, roster, &next);
    let kept = previous.filter(|p| dropdown::is_selectable(&paired_options, p));
    next.set(paired, kept);

    let mut patches = vec![
        Patch::ReplaceOptions {
            role: paired,
            options: paired_options,
        },
        Patch::SetValue {
            role: paired,
            value: next.get(paired).map(str::to_string),
        },
    ];

    // Resetting the paired control can re-enable options in the changed one.
    let before = dropdown::availability(changed, roster, state);
    let after = dropdown::availability(changed, roster, &next);
    if before != after {
        patches.push(Patch::ReplaceOptions {
            role: changed,
            options: after,
        });
        patches.push(Patch::SetValue {
            role: changed,
            value: next.get(changed).map(str::to_string),
        });
    }

    patches.push(Patch::RecalculateSummary);

    Ok(Transition {
        state: next,
        patches,
    })
}
