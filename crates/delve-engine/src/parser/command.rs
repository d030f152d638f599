//! Verb table and syntactic parsing of player input.

use std::fmt;

use delve_core::InteractionVerb;

use crate::error::ParseError;

/// Direction words and their abbreviations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// North.
    North,
    /// South.
    South,
    /// East.
    East,
    /// West.
    West,
    /// Up.
    Up,
    /// Down.
    Down,
    /// Northeast.
    Northeast,
    /// Northwest.
    Northwest,
    /// Southeast.
    Southeast,
    /// Southwest.
    Southwest,
    /// In.
    In,
    /// Out.
    Out,
}

impl Direction {
    /// Parse a direction from a word.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "n" | "north" => Some(Self::North),
            "s" | "south" => Some(Self::South),
            "e" | "east" => Some(Self::East),
            "w" | "west" => Some(Self::West),
            "u" | "up" => Some(Self::Up),
            "d" | "down" => Some(Self::Down),
            "ne" | "northeast" => Some(Self::Northeast),
            "nw" | "northwest" => Some(Self::Northwest),
            "se" | "southeast" => Some(Self::Southeast),
            "sw" | "southwest" => Some(Self::Southwest),
            "in" => Some(Self::In),
            "out" => Some(Self::Out),
            _ => None,
        }
    }

    /// The exit keyword for this direction.
    pub fn name(&self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
            Self::Up => "up",
            Self::Down => "down",
            Self::Northeast => "northeast",
            Self::Northwest => "northwest",
            Self::Southeast => "southeast",
            Self::Southwest => "southwest",
            Self::In => "in",
            Self::Out => "out",
        }
    }
}

/// Verbs the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// Describe the current location.
    Look,
    /// List carried items.
    Inventory,
    /// Show the verb list.
    Help,
    /// Take an exit.
    Move,
    /// Pick up an item.
    Take,
    /// Put down an item.
    Drop,
    /// Read an item's description.
    Examine,
    /// Use an item, optionally on a target.
    Use,
    /// Open an item.
    Open,
    /// Close an item.
    Close,
    /// Give an item, optionally to a target.
    Give,
    /// Talk to an NPC, optionally saying a keyword.
    Talk,
}

const LOOK_VERBS: &[&str] = &["look", "l"];
const INVENTORY_VERBS: &[&str] = &["inventory", "inv", "i"];
const HELP_VERBS: &[&str] = &["help", "h", "?"];
const MOVE_VERBS: &[&str] = &["move", "go", "walk", "head"];
const TAKE_VERBS: &[&str] = &["take", "get", "grab", "pick", "pickup"];
const DROP_VERBS: &[&str] = &["drop", "discard"];
const EXAMINE_VERBS: &[&str] = &["examine", "x", "ex", "inspect"];
const USE_VERBS: &[&str] = &["use"];
const OPEN_VERBS: &[&str] = &["open"];
const CLOSE_VERBS: &[&str] = &["close", "shut"];
const GIVE_VERBS: &[&str] = &["give", "offer"];
const TALK_VERBS: &[&str] = &["talk", "speak", "ask", "chat"];

const VERB_TABLE: &[(&[&str], Verb)] = &[
    (LOOK_VERBS, Verb::Look),
    (INVENTORY_VERBS, Verb::Inventory),
    (HELP_VERBS, Verb::Help),
    (MOVE_VERBS, Verb::Move),
    (TAKE_VERBS, Verb::Take),
    (DROP_VERBS, Verb::Drop),
    (EXAMINE_VERBS, Verb::Examine),
    (USE_VERBS, Verb::Use),
    (OPEN_VERBS, Verb::Open),
    (CLOSE_VERBS, Verb::Close),
    (GIVE_VERBS, Verb::Give),
    (TALK_VERBS, Verb::Talk),
];

const ARTICLES: &[&str] = &["the", "a", "an"];

impl Verb {
    /// Look up a verb or one of its aliases.
    pub fn parse(word: &str) -> Option<Self> {
        let word = word.to_lowercase();
        VERB_TABLE
            .iter()
            .find(|(words, _)| words.contains(&word.as_str()))
            .map(|(_, verb)| *verb)
    }

    /// Canonical name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Look => "look",
            Self::Inventory => "inventory",
            Self::Help => "help",
            Self::Move => "move",
            Self::Take => "take",
            Self::Drop => "drop",
            Self::Examine => "examine",
            Self::Use => "use",
            Self::Open => "open",
            Self::Close => "close",
            Self::Give => "give",
            Self::Talk => "talk",
        }
    }

    /// Canonical name with a capital first letter.
    pub fn title(&self) -> String {
        let name = self.name();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Whether the verb needs an object.
    pub fn is_transitive(&self) -> bool {
        !matches!(self, Self::Look | Self::Inventory | Self::Help)
    }

    /// The prompt shown when a transitive verb is given no object.
    pub fn missing_object_prompt(&self) -> String {
        match self {
            Self::Move => "Go where?".to_string(),
            Self::Talk => "Talk to whom?".to_string(),
            _ => format!("{} what?", self.title()),
        }
    }

    /// The interaction verb this verb triggers, if any.
    pub fn interaction(&self) -> Option<InteractionVerb> {
        match self {
            Self::Use => Some(InteractionVerb::Use),
            Self::Open => Some(InteractionVerb::Open),
            Self::Close => Some(InteractionVerb::Close),
            Self::Give => Some(InteractionVerb::Give),
            Self::Talk => Some(InteractionVerb::Talk),
            _ => None,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fully resolved command: verb plus item ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Describe the current location.
    Look,
    /// List carried items.
    Inventory,
    /// Show the verb list.
    Help,
    /// Take the exit with this keyword.
    Move {
        /// Exit keyword, with direction abbreviations expanded.
        direction: String,
    },
    /// Pick up an item.
    Take {
        /// Item id.
        item: String,
    },
    /// Put down an item.
    Drop {
        /// Item id.
        item: String,
    },
    /// Read an item's description.
    Examine {
        /// Item id.
        item: String,
    },
    /// `use`, `open`, `close`, or `give`.
    Interact {
        /// Which interaction verb.
        verb: InteractionVerb,
        /// Acted-on item id.
        item: String,
        /// Target item id.
        target: Option<String>,
    },
    /// Talk to an NPC.
    Talk {
        /// NPC item id.
        npc: String,
        /// Keyword chosen from the current dialog node.
        keyword: Option<String>,
    },
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Look => write!(f, "look"),
            Self::Inventory => write!(f, "inventory"),
            Self::Help => write!(f, "help"),
            Self::Move { direction } => write!(f, "move {direction}"),
            Self::Take { item } => write!(f, "take {item}"),
            Self::Drop { item } => write!(f, "drop {item}"),
            Self::Examine { item } => write!(f, "examine {item}"),
            Self::Interact { verb, item, target } => {
                write!(f, "{verb} {item}")?;
                match (verb, target) {
                    (InteractionVerb::Give, Some(target)) => write!(f, " to {target}"),
                    (_, Some(target)) => write!(f, " on {target}"),
                    (_, None) => Ok(()),
                }
            }
            Self::Talk { npc, keyword } => match keyword {
                Some(keyword) => write!(f, "talk {npc} {keyword}"),
                None => write!(f, "talk {npc}"),
            },
        }
    }
}

/// A verb with the words that follow it, before nouns are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    /// The recognised verb.
    pub verb: Verb,
    /// Lower-cased words after the verb, with filler words removed.
    pub words: Vec<String>,
}

/// Split input into lower-cased words.
pub fn tokenize(input: &str) -> Vec<String> {
    input.split_whitespace().map(str::to_lowercase).collect()
}

/// Drop leading articles.
pub fn strip_articles(words: &[String]) -> &[String] {
    let skip = words
        .iter()
        .take_while(|w| ARTICLES.contains(&w.as_str()))
        .count();
    &words[skip..]
}

/// Lower-case, collapse whitespace, and drop leading articles.
pub fn normalize(text: &str) -> String {
    strip_articles(&tokenize(text)).join(" ")
}

/// Recognise the verb and tidy the remaining words.
pub fn parse_phrase(input: &str) -> Result<Phrase, ParseError> {
    let words = tokenize(input);
    let Some((first, rest)) = words.split_first() else {
        return Err(ParseError::Empty);
    };

    if let Some(direction) = Direction::parse(first) {
        return Ok(Phrase {
            verb: Verb::Move,
            words: vec![direction.name().to_string()],
        });
    }

    let verb = Verb::parse(first).ok_or_else(|| ParseError::UnknownVerb(first.clone()))?;
    let rest = match (verb, rest.first().map(String::as_str)) {
        (Verb::Take, Some("up")) => &rest[1..],
        (Verb::Talk, Some("to" | "with")) => &rest[1..],
        (Verb::Look, Some("at")) => &rest[1..],
        _ => rest,
    };

    // "look at <item>" is examine; "look around" and friends are plain look.
    let verb = match (verb, rest.first().map(String::as_str)) {
        (Verb::Look, Some("around")) | (Verb::Look, None) => Verb::Look,
        (Verb::Look, Some(_)) => Verb::Examine,
        _ => verb,
    };

    if !verb.is_transitive() {
        return Ok(Phrase {
            verb,
            words: Vec::new(),
        });
    }

    let words = strip_articles(rest);
    if words.is_empty() {
        return Err(ParseError::MissingObject { verb });
    }

    Ok(Phrase {
        verb,
        words: words.to_vec(),
    })
}
