//! Command parsing and noun resolution.

mod command;
mod resolver;

pub use command::{
    Command, Direction, Phrase, Verb, normalize, parse_phrase, strip_articles, tokenize,
};
pub use resolver::{NounMatch, Scope, resolve_leading_noun, resolve_noun};

use delve_core::World;

use crate::error::ParseError;
use crate::state::GameState;

const PREPOSITIONS: &[&str] = &["on", "to", "with", "at", "in"];

/// Parse raw input into a command with every noun resolved to an item id.
///
/// Parsing only reads the state; nouns are resolved in scope order so the
/// nearest matching item wins.
pub fn parse_command(
    input: &str,
    world: &World,
    state: &GameState,
) -> Result<Command, ParseError> {
    let phrase = parse_phrase(input)?;
    resolve_phrase(&phrase, world, state)
}

/// Resolve the nouns in an already recognised phrase.
pub fn resolve_phrase(
    phrase: &Phrase,
    world: &World,
    state: &GameState,
) -> Result<Command, ParseError> {
    let words = &phrase.words;
    let noun = |words: &[String]| resolve_noun(world, state, words).map(|m| m.id);
    let command = match phrase.verb {
        Verb::Look => Command::Look,
        Verb::Inventory => Command::Inventory,
        Verb::Help => Command::Help,
        Verb::Move => {
            let keyword = words.join(" ");
            let direction = Direction::parse(&keyword)
                .map(|d| d.name().to_string())
                .unwrap_or(keyword);
            Command::Move { direction }
        }
        Verb::Take => Command::Take { item: noun(words)? },
        Verb::Drop => Command::Drop { item: noun(words)? },
        Verb::Examine => Command::Examine { item: noun(words)? },
        Verb::Open | Verb::Close | Verb::Use | Verb::Give => {
            resolve_pair(phrase.verb, words, world, state)?
        }
        Verb::Talk => resolve_talk(words, world, state)?,
    };
    Ok(command)
}

/// `use X`, `use X on Y`, `give X to Y`.
///
/// Every preposition position is tried in order and the first split where
/// both sides resolve wins, so item names containing a preposition still
/// work.
fn resolve_pair(
    verb: Verb,
    words: &[String],
    world: &World,
    state: &GameState,
) -> Result<Command, ParseError> {
    let Some(interaction) = verb.interaction() else {
        return Err(ParseError::UnknownVerb(verb.name().to_string()));
    };
    let whole = resolve_noun(world, state, words);
    let splits: Vec<usize> = words
        .iter()
        .enumerate()
        .filter(|(_, w)| PREPOSITIONS.contains(&w.as_str()))
        .map(|(i, _)| i)
        .collect();

    if whole.is_ok() || splits.is_empty() {
        return whole.map(|m| Command::Interact {
            verb: interaction,
            item: m.id,
            target: None,
        });
    }

    let mut first_error = None;
    for at in splits {
        let object = strip_articles(&words[..at]);
        let target = strip_articles(&words[at + 1..]);
        let attempt = if object.is_empty() {
            Err(ParseError::MissingObject { verb })
        } else if target.is_empty() {
            Err(ParseError::MissingTarget {
                verb,
                object: object.join(" "),
                preposition: words[at].clone(),
            })
        } else {
            resolve_noun(world, state, object).and_then(|item| {
                resolve_noun(world, state, target).map(|target| Command::Interact {
                    verb: interaction,
                    item: item.id,
                    target: Some(target.id),
                })
            })
        };
        match attempt {
            Ok(command) => return Ok(command),
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }
    Err(first_error.unwrap_or_else(|| ParseError::UnresolvedNoun(words.join(" "))))
}

/// `talk NPC`, `talk NPC KEYWORD`, `ask NPC about KEYWORD`.
fn resolve_talk(
    words: &[String],
    world: &World,
    state: &GameState,
) -> Result<Command, ParseError> {
    let (npc, rest) = match words.iter().position(|w| w == "about") {
        Some(at) => {
            let npc = resolve_noun(world, state, &words[..at])?;
            (npc.id, &words[at + 1..])
        }
        None => {
            let npc = resolve_leading_noun(world, state, words)?;
            (npc.id, &words[npc.len..])
        }
    };
    let keyword = (!rest.is_empty()).then(|| rest.join(" "));
    Ok(Command::Talk { npc, keyword })
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::{InteractionVerb, Item, Location, Npc, WorldMeta};

    fn world() -> World {
        World::new(WorldMeta::new("Test", "hall").with_inventory("key"))
            .with_item(Item::new("key", "Rusty Key").with_alias("key").portable())
            .with_item(Item::new("door", "Oak Door").with_alias("door"))
            .with_item(
                Item::new("jack", "Jack in the Box")
                    .with_alias("jack")
                    .with_alias("jack in the box")
                    .portable(),
            )
            .with_item(Item::new("lenny", "Lenny").with_alias("lenny").with_alias("old man"))
            .with_npc("lenny", Npc::new())
            .with_location(
                Location::new("hall", "Hall")
                    .with_item("door")
                    .with_item("jack")
                    .with_item("lenny"),
            )
    }

    fn parse(input: &str) -> Result<Command, ParseError> {
        let world = world();
        let state = GameState::new(&world);
        parse_command(input, &world, &state)
    }

    #[test]
    fn use_on_target() {
        assert_eq!(
            parse("use the key on the door"),
            Ok(Command::Interact {
                verb: InteractionVerb::Use,
                item: "key".into(),
                target: Some("door".into()),
            })
        );
    }

    #[test]
    fn open_without_target() {
        assert_eq!(
            parse("open door"),
            Ok(Command::Interact {
                verb: InteractionVerb::Open,
                item: "door".into(),
                target: None,
            })
        );
    }

    #[test]
    fn name_containing_preposition() {
        assert_eq!(
            parse("use jack in the box on door"),
            Ok(Command::Interact {
                verb: InteractionVerb::Use,
                item: "jack".into(),
                target: Some("door".into()),
            })
        );
        assert_eq!(
            parse("open jack in the box"),
            Ok(Command::Interact {
                verb: InteractionVerb::Open,
                item: "jack".into(),
                target: None,
            })
        );
    }

    #[test]
    fn dangling_preposition() {
        assert_eq!(
            parse("use key on"),
            Err(ParseError::MissingTarget {
                verb: Verb::Use,
                object: "key".into(),
                preposition: "on".into(),
            })
        );
        assert_eq!(
            parse("use key on").map_err(|e| e.to_string()),
            Err("Use the key on what?".to_string())
        );
    }

    #[test]
    fn give_to_npc() {
        assert_eq!(
            parse("give key to old man"),
            Ok(Command::Interact {
                verb: InteractionVerb::Give,
                item: "key".into(),
                target: Some("lenny".into()),
            })
        );
    }

    #[test]
    fn talk_forms() {
        let expected = Command::Talk {
            npc: "lenny".into(),
            keyword: Some("gate".into()),
        };
        assert_eq!(parse("talk to the old man gate"), Ok(expected.clone()));
        assert_eq!(parse("ask lenny about gate"), Ok(expected));
        assert_eq!(
            parse("talk lenny"),
            Ok(Command::Talk {
                npc: "lenny".into(),
                keyword: None,
            })
        );
    }

    #[test]
    fn move_keeps_custom_exit_words() {
        assert_eq!(
            parse("go n"),
            Ok(Command::Move {
                direction: "north".into()
            })
        );
        assert_eq!(
            parse("go trapdoor"),
            Ok(Command::Move {
                direction: "trapdoor".into()
            })
        );
        assert_eq!(
            parse("go inside"),
            Ok(Command::Move {
                direction: "inside".into()
            })
        );
    }

    #[test]
    fn unknown_noun_is_reported() {
        assert_eq!(
            parse("take sword"),
            Err(ParseError::UnresolvedNoun("sword".into()))
        );
        assert_eq!(
            parse("take sword").map_err(|e| e.to_string()),
            Err("You don't see any sword here.".to_string())
        );
    }
}
