//! Dialog tree traversal helpers.

use delve_core::DialogNode;

use super::criteria::matches;
use super::text::resolve;
use crate::parser::normalize;
use crate::state::GameState;

/// Responses of `node` the player may choose right now, in authored order.
pub fn offered_responses<'w>(
    node: &'w DialogNode,
    state: &GameState,
) -> Vec<(&'w str, &'w DialogNode)> {
    node.responses
        .iter()
        .filter(|(_, child)| matches(child.criteria.as_ref(), state))
        .map(|(key, child)| (key.as_str(), child))
        .collect()
}

/// The offered response whose key or one of whose aliases equals `keyword`.
///
/// Comparison ignores case, surrounding whitespace, and a leading article.
pub fn select_response<'w>(
    node: &'w DialogNode,
    keyword: &str,
    state: &GameState,
) -> Option<(&'w str, &'w DialogNode)> {
    let wanted = normalize(keyword);
    if wanted.is_empty() {
        return None;
    }
    offered_responses(node, state).into_iter().find(|(key, child)| {
        normalize(key) == wanted || child.aliases.iter().any(|a| normalize(a) == wanted)
    })
}

/// The "Topics: ..." line for a node, or `None` if nothing is on offer.
pub fn render_hints(node: &DialogNode, state: &GameState) -> Option<String> {
    let hints: Vec<&str> = offered_responses(node, state)
        .into_iter()
        .map(|(key, child)| child.keyword_hint.as_deref().unwrap_or(key))
        .collect();
    if hints.is_empty() {
        None
    } else {
        Some(format!("Topics: {}", hints.join(", ")))
    }
}

/// Render a node: the player's line if asked for, the NPC's narrative, and
/// the hints for any responses on offer.
pub fn render_node(node: &DialogNode, state: &GameState, with_player: bool) -> String {
    let mut lines = Vec::new();
    let player = node.player_narrative.as_ref().filter(|_| with_player);
    if let Some(player) = player {
        let text = resolve(player, state);
        if !text.is_empty() {
            lines.push(text.to_string());
        }
    }
    let narrative = resolve(&node.npc_narrative, state);
    if !narrative.is_empty() {
        lines.push(narrative.to_string());
    }
    if let Some(hints) = render_hints(node, state) {
        lines.push(hints);
    }
    lines.join("\n")
}
