//! HTML rendering for gem pairs served through the fragment API.
//!
//! Each select posts its own change back to `/api/gems/select` and the
//! response replaces the whole pair, so both controls always reflect the
//! stored state.

use crate::gems::catalog::CellRoster;
use crate::gems::dropdown::{self, DropdownOption, Role};
use crate::gems::pairs::PairState;

/// Escape text for use in element content and double- or single-quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_option(option: &DropdownOption, selected: Option<&str>) -> String {
    let is_selected = match selected {
        Some(v) => option.value == v,
        None => option.is_placeholder(),
    };
    let mut attrs = String::new();
    if option.restricted {
        attrs.push_str(r#" data-restricted="true""#);
    }
    if option.disabled {
        attrs.push_str(" disabled");
    }
    if is_selected {
        attrs.push_str(" selected");
    }
    format!(
        r#"<option value="{}"{}>{}</option>"#,
        escape_html(&option.value),
        attrs,
        escape_html(&option.label)
    )
}

/// One `<select>` wired to post its changes back for this pair.
pub fn render_select(
    cell: &str,
    index: usize,
    role: Role,
    options: &[DropdownOption],
    selected: Option<&str>,
) -> String {
    let class = role.css_class();
    let vals = serde_json::json!({
        "cell": cell,
        "pair": index.to_string(),
        "role": class,
    });
    let mut html = String::with_capacity(256 + options.len() * 64);
    html.push_str(&format!(
        r#"<select class="{class} {class}-gem" name="value" hx-post="/api/gems/select" hx-trigger="change" hx-vals="{vals}" hx-target="closest .gem-pair" hx-swap="outerHTML">"#,
        vals = escape_html(&vals.to_string()),
    ));
    for option in options {
        html.push_str(&render_option(option, selected));
    }
    html.push_str("</select>");
    html
}

/// Render both controls of a pair from its stored state.
pub fn render_pair(cell: &str, index: usize, pair: &PairState, roster: &CellRoster) -> String {
    let mut html = format!(
        r#"<div class="gem-pair" id="{}-pair-{}">"#,
        escape_html(cell),
        index
    );
    for role in [Role::Primary, Role::Secondary] {
        let options = dropdown::availability(role, roster, pair);
        html.push_str(&render_select(cell, index, role, &options, pair.get(role)));
    }
    html.push_str("</div>");
    html
}

/// Script that calls the page's summary hook when it is defined.
/// Names that aren't plain JS identifiers render nothing.
pub fn render_summary_hook(hook: Option<&str>) -> String {
    let Some(name) = hook else {
        return String::new();
    };
    let is_ident = !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if !is_ident {
        return String::new();
    }
    format!(r#"<script>if (typeof {name} === 'function') {{ {name}(); }}</script>"#)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gems::catalog::RosterEntry;

    fn roster() -> CellRoster {
        CellRoster {
            cell: "cell-1".to_string(),
            entries: vec![
                RosterEntry {
                    name: "Amber".to_string(),
                    restricted: false,
                },
                RosterEntry {
                    name: "Blood <Stone>".to_string(),
                    restricted: true,
                },
            ],
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
    }

    #[test]
    fn empty_pair_selects_placeholders() {
        let html = render_pair("cell-1", 0, &PairState::default(), &roster());
        assert!(html.contains(r#"<option value="" selected>Primary Gem</option>"#));
        assert!(html.contains(r#"<option value="" selected>Secondary Gem</option>"#));
        assert!(html.contains(r#"id="cell-1-pair-0""#));
        assert!(!html.contains("disabled"));
    }

    #[test]
    fn restricted_options_are_marked_and_escaped() {
        let html = render_pair("cell-1", 0, &PairState::default(), &roster());
        assert!(html.contains(
            r#"<option value="Blood &lt;Stone&gt;" data-restricted="true">Blood &lt;Stone&gt;</option>"#
        ));
    }

    #[test]
    fn counterpart_gem_is_disabled() {
        let pair = PairState {
            primary: Some("Amber".to_string()),
            secondary: None,
        };
        let html = render_pair("cell-1", 2, &pair, &roster());
        assert!(html.contains(r#"<option value="Amber" selected>Amber</option>"#));
        assert!(html.contains(r#"<option value="Amber" disabled>Amber</option>"#));
        assert!(html.contains(r#"&quot;pair&quot;:&quot;2&quot;,&quot;role&quot;:&quot;secondary&quot;"#));
    }

    #[test]
    fn hx_vals_stay_valid_json_for_awkward_cell_ids() {
        let cell = r#"cell-"1"\x'"#;
        let html = render_select(cell, 0, Role::Primary, &[], None);
        let start = html.find(r#"hx-vals=""#).unwrap() + r#"hx-vals=""#.len();
        let end = start + html[start..].find('"').unwrap();
        let decoded = html[start..end]
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&amp;", "&");
        let vals: serde_json::Value = serde_json::from_str(&decoded).unwrap();
        assert_eq!(vals["cell"], cell);
        assert_eq!(vals["pair"], "0");
        assert_eq!(vals["role"], "primary");
    }

    #[test]
    fn summary_hook_script() {
        let html = render_summary_hook(Some("updateSummaryTables"));
        assert!(html.contains("typeof updateSummaryTables === 'function'"));
        assert!(render_summary_hook(None).is_empty());
        assert!(render_summary_hook(Some("alert(1);x")).is_empty());
        assert!(render_summary_hook(Some("9lives")).is_empty());
    }
}
