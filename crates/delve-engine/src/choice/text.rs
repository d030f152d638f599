//! Resolution of conditional text.

use delve_core::ResolvableText;

use super::criteria::matches;
use crate::state::GameState;

/// The text of the first alternative whose criteria matches, or `""`.
pub fn resolve<'t>(text: &'t ResolvableText, state: &GameState) -> &'t str {
    text.entries()
        .iter()
        .find(|entry| matches(entry.criteria.as_ref(), state))
        .map(|entry| entry.text.as_str())
        .unwrap_or("")
}

/// Resolve optional text, falling back to `default` when it is absent or
/// resolves to nothing.
pub fn resolve_or(text: Option<&ResolvableText>, state: &GameState, default: &str) -> String {
    let resolved = text.map(|t| resolve(t, state)).unwrap_or("");
    if resolved.is_empty() {
        default.to_string()
    } else {
        resolved.to_string()
    }
}
