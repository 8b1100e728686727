use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::Cell;

static TOTAL_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)^\s*total for(.*)$").expect("valid total label pattern"));

/// Match a label cell against the "Total for <project>" marker.
///
/// Returns the trimmed project name on a match. Non-text cells never match.
/// A label with nothing after the marker yields an empty name.
pub fn match_total_label(cell: &Cell) -> Option<String> {
    let text = cell.as_text()?;
    let caps = TOTAL_LABEL.captures(text)?;
    let rest = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
    Some(rest.trim().to_string())
}
