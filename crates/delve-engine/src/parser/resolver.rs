//! Noun resolution against item names and aliases.

use delve_core::{Item, World};

use super::command::{strip_articles, tokenize};
use crate::error::ParseError;
use crate::state::GameState;

/// Where a noun was found. Earlier scopes shadow later ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Lying in the current location.
    Here,
    /// Carried by the player.
    Inventory,
    /// Travelling with the player.
    Companions,
    /// Anywhere in the world.
    Global,
}

impl Scope {
    /// Search order.
    pub const ORDER: [Scope; 4] = [Scope::Here, Scope::Inventory, Scope::Companions, Scope::Global];

    fn candidates<'w>(self, world: &'w World, state: &GameState) -> Vec<&'w Item> {
        match self {
            Scope::Here => state
                .items_at(state.location())
                .iter()
                .filter_map(|id| world.item(id))
                .collect(),
            Scope::Inventory => state
                .inventory()
                .iter()
                .filter_map(|id| world.item(id))
                .collect(),
            Scope::Companions => state.companions().filter_map(|id| world.item(id)).collect(),
            Scope::Global => world.items().collect(),
        }
    }
}

/// A resolved noun.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NounMatch {
    /// Item id.
    pub id: String,
    /// Scope it was found in.
    pub scope: Scope,
    /// How many input words the matching alias covered.
    pub len: usize,
}

/// An item's authored aliases as word lists. Neither the id nor the display
/// name count unless repeated as an alias.
fn alias_words(item: &Item) -> impl Iterator<Item = Vec<String>> + '_ {
    item.aliases
        .iter()
        .map(|alias| strip_articles(&tokenize(alias)).to_vec())
        .filter(|words| !words.is_empty())
}

/// Resolve a noun phrase that must match an alias exactly.
pub fn resolve_noun(
    world: &World,
    state: &GameState,
    words: &[String],
) -> Result<NounMatch, ParseError> {
    best_match(world, state, strip_articles(words), false)
}

/// Resolve the longest alias at the start of `words`; the caller treats the
/// remaining words as something else (a dialog keyword).
pub fn resolve_leading_noun(
    world: &World,
    state: &GameState,
    words: &[String],
) -> Result<NounMatch, ParseError> {
    let stripped = strip_articles(words);
    let skipped = words.len() - stripped.len();
    best_match(world, state, stripped, true).map(|m| NounMatch {
        len: m.len + skipped,
        ..m
    })
}

fn best_match(
    world: &World,
    state: &GameState,
    words: &[String],
    prefix: bool,
) -> Result<NounMatch, ParseError> {
    let phrase = words.join(" ");
    if words.is_empty() {
        return Err(ParseError::UnresolvedNoun(phrase));
    }

    for scope in Scope::ORDER {
        let mut best_len = 0;
        let mut found: Vec<&str> = Vec::new();
        for item in scope.candidates(world, state) {
            let len = alias_words(item)
                .filter(|alias| {
                    if prefix {
                        words.starts_with(alias)
                    } else {
                        words == alias.as_slice()
                    }
                })
                .map(|alias| alias.len())
                .max()
                .unwrap_or(0);
            if len == 0 || len < best_len {
                continue;
            }
            if len > best_len {
                best_len = len;
                found.clear();
            }
            if !found.contains(&item.id.as_str()) {
                found.push(&item.id);
            }
        }

        match found.as_slice() {
            [] => continue,
            [id] => {
                return Ok(NounMatch {
                    id: (*id).to_string(),
                    scope,
                    len: best_len,
                });
            }
            _ => {
                let matched = words[..best_len].join(" ");
                tracing::debug!(%matched, ?scope, candidates = ?found, "ambiguous noun");
                return Err(ParseError::Ambiguous(matched));
            }
        }
    }

    Err(ParseError::UnresolvedNoun(phrase))
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::{Location, Npc, WorldMeta};

    fn words(s: &str) -> Vec<String> {
        tokenize(s)
    }

    fn world() -> World {
        World::new(WorldMeta::new("Test", "hall").with_inventory("coin"))
            .with_item(
                Item::new("lamp", "Brass Lamp")
                    .with_alias("lamp")
                    .with_alias("brass lamp")
                    .portable(),
            )
            .with_item(Item::new("old_lamp", "Old Lamp").with_alias("lamp").portable())
            .with_item(Item::new("coin", "Gold Coin").with_alias("coin").portable())
            .with_item(Item::new("lenny", "Lenny").with_alias("old man"))
            .with_item(Item::new("gate", "Iron Gate").with_alias("iron gate"))
            .with_npc("lenny", Npc::new())
            .with_location(
                Location::new("hall", "Hall")
                    .with_item("lamp")
                    .with_item("lenny"),
            )
            .with_location(Location::new("cellar", "Cellar").with_item("old_lamp").with_item("gate"))
    }

    #[test]
    fn exact_alias_match() {
        let world = world();
        let state = GameState::new(&world);
        let m = resolve_noun(&world, &state, &words("brass lamp")).unwrap();
        assert_eq!(m.id, "lamp");
        assert_eq!(m.scope, Scope::Here);
        let m = resolve_noun(&world, &state, &words("the coin")).unwrap();
        assert_eq!(m.id, "coin");
        assert_eq!(m.scope, Scope::Inventory);
    }

    #[test]
    fn nearer_scope_shadows_global() {
        let world = world();
        let state = GameState::new(&world);
        // Both lamps answer to "lamp", but only one is in the hall.
        let m = resolve_noun(&world, &state, &words("lamp")).unwrap();
        assert_eq!(m.id, "lamp");
    }

    #[test]
    fn global_scope_ties_are_ambiguous() {
        let world = World::new(WorldMeta::new("Test", "hall"))
            .with_item(Item::new("a", "Red Key").with_alias("key").with_alias("red key"))
            .with_item(Item::new("b", "Blue Key").with_alias("key"))
            .with_location(Location::new("hall", "Hall"));
        let state = GameState::new(&world);
        assert_eq!(
            resolve_noun(&world, &state, &words("key")),
            Err(ParseError::Ambiguous("key".into()))
        );
        assert_eq!(
            resolve_noun(&world, &state, &words("red key")).unwrap().id,
            "a"
        );
    }

    #[test]
    fn display_name_is_not_an_alias() {
        let world = world();
        let state = GameState::new(&world);
        assert_eq!(
            resolve_noun(&world, &state, &words("gold coin")),
            Err(ParseError::UnresolvedNoun("gold coin".into()))
        );
    }

    #[test]
    fn unknown_noun() {
        let world = world();
        let state = GameState::new(&world);
        assert_eq!(
            resolve_noun(&world, &state, &words("sword")),
            Err(ParseError::UnresolvedNoun("sword".into()))
        );
    }

    #[test]
    fn leading_noun_leaves_keyword() {
        let world = world();
        let state = GameState::new(&world);
        let input = words("the old man gate");
        let m = resolve_leading_noun(&world, &state, &input).unwrap();
        assert_eq!(m.id, "lenny");
        assert_eq!(m.len, 3);
        assert_eq!(input[m.len..].join(" "), "gate");
    }

    #[test]
    fn global_scope_reaches_elsewhere() {
        let world = world();
        let state = GameState::new(&world);
        let m = resolve_noun(&world, &state, &words("iron gate")).unwrap();
        assert_eq!(m.id, "gate");
        assert_eq!(m.scope, Scope::Global);
    }
}
