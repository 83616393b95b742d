//! Dropdown population and option availability.
//!
//! `populate` is the fresh option list for a control. `availability` derives
//! which of those options are selectable given the other control of the pair.

use serde::{Deserialize, Serialize};

use crate::gems::catalog::CellRoster;
use crate::gems::pairs::PairState;

/// Which control of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Primary,
    Secondary,
}

impl Role {
    pub fn other(self) -> Role {
        match self {
            Role::Primary => Role::Secondary,
            Role::Secondary => Role::Primary,
        }
    }

    pub fn placeholder_label(self) -> &'static str {
        match self {
            Role::Primary => "Primary Gem",
            Role::Secondary => "Secondary Gem",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Role::Primary => "primary",
            Role::Secondary => "secondary",
        }
    }

    /// Accepts both class spellings used in the page markup.
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "primary" | "primary-gem" => Some(Role::Primary),
            "secondary" | "secondary-gem" => Some(Role::Secondary),
            _ => None,
        }
    }
}

/// One `<option>` of a gem select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownOption {
    /// Empty for the placeholder.
    pub value: String,
    pub label: String,
    pub restricted: bool,
    pub disabled: bool,
}

impl DropdownOption {
    pub fn is_placeholder(&self) -> bool {
        self.value.is_empty()
    }

    pub fn is_selectable(&self) -> bool {
        !self.disabled
    }
}

/// Values the page uses for "nothing selected".
pub fn is_placeholder_value(value: &str) -> bool {
    matches!(value, "" | "Primary Gem" | "Secondary Gem")
}

/// Fresh option list: placeholder first, then every gem in the roster, all enabled.
pub fn populate(role: Role, roster: &CellRoster) -> Vec<DropdownOption> {
    let mut options = Vec::with_capacity(roster.entries.len() + 1);
    options.push(DropdownOption {
        value: String::new(),
        label: role.placeholder_label().to_string(),
        restricted: false,
        disabled: false,
    });
    options.extend(roster.entries.iter().map(|entry| DropdownOption {
        value: entry.name.clone(),
        label: entry.name.clone(),
        restricted: entry.restricted,
        disabled: false,
    }));
    options
}

/// Options for `role` with everything the counterpart's selection forbids disabled:
/// the counterpart gem itself, and every other restricted gem when the
/// counterpart is restricted.
pub fn availability(role: Role, roster: &CellRoster, pair: &PairState) -> Vec<DropdownOption> {
    let mut options = populate(role, roster);
    let Some(taken) = pair.get(role.other()) else {
        return options;
    };
    let taken_restricted = roster.is_restricted(taken);
    for option in options.iter_mut().filter(|o| !o.is_placeholder()) {
        if option.value == taken || (taken_restricted && option.restricted) {
            option.disabled = true;
        }
    }
    options
}

/// Whether `value` can be chosen in an option list.
pub fn is_selectable(options: &[DropdownOption], value: &str) -> bool {
    options
        .iter()
        .any(|o| o.value == value && o.is_selectable())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gems::catalog::RosterEntry;

    fn roster() -> CellRoster {
        let entry = |name: &str, restricted| RosterEntry {
            name: name.to_string(),
            restricted,
        };
        CellRoster {
            cell: "cell-1".to_string(),
            entries: vec![entry("A", false), entry("B", true), entry("C", true), entry("D", false)],
        }
    }

    fn pair(primary: Option<&str>, secondary: Option<&str>) -> PairState {
        PairState {
            primary: primary.map(str::to_string),
            secondary: secondary.map(str::to_string),
        }
    }

    #[test]
    fn populate_puts_role_placeholder_first() {
        let primary = populate(Role::Primary, &roster());
        let secondary = populate(Role::Secondary, &roster());
        assert_eq!(primary[0].label, "Primary Gem");
        assert_eq!(secondary[0].label, "Secondary Gem");
        assert!(primary[0].is_placeholder());
        assert_eq!(primary.len(), 5);
        assert!(primary.iter().all(|o| !o.disabled));
    }

    #[test]
    fn populate_is_idempotent() {
        let r = roster();
        assert_eq!(populate(Role::Secondary, &r), populate(Role::Secondary, &r));
    }

    #[test]
    fn unrestricted_counterpart_disables_only_itself() {
        let options = availability(Role::Secondary, &roster(), &pair(Some("A"), None));
        assert!(!is_selectable(&options, "A"));
        assert!(is_selectable(&options, "B"));
        assert!(is_selectable(&options, "C"));
        assert!(is_selectable(&options, "D"));
    }

    #[test]
    fn restricted_counterpart_disables_all_restricted() {
        let options = availability(Role::Primary, &roster(), &pair(None, Some("B")));
        assert!(!is_selectable(&options, "B"));
        assert!(!is_selectable(&options, "C"));
        assert!(is_selectable(&options, "A"));
        assert!(is_selectable(&options, "D"));
        assert!(is_selectable(&options, ""));
    }

    #[test]
    fn empty_counterpart_leaves_everything_enabled() {
        let options = availability(Role::Secondary, &roster(), &PairState::default());
        assert_eq!(options, populate(Role::Secondary, &roster()));
    }

    #[test]
    fn placeholder_values() {
        assert!(is_placeholder_value(""));
        assert!(is_placeholder_value("Primary Gem"));
        assert!(is_placeholder_value("Secondary Gem"));
        assert!(!is_placeholder_value("Ruby"));
    }

    #[test]
    fn role_parses_both_class_spellings() {
        assert_eq!(Role::parse("primary-gem"), Some(Role::Primary));
        assert_eq!(Role::parse("secondary"), Some(Role::Secondary));
        assert_eq!(Role::parse("tertiary"), None);
        assert_eq!(Role::Primary.other(), Role::Secondary);
    }
}
