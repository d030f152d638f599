use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::criteria::{Criteria, Effect};
use crate::text::{ConditionalText, ResolvableText};

/// One turn of an NPC conversation.
///
/// A node with responses waits for the player to say one of the response
/// keywords; a node without responses ends the conversation once rendered.
/// In a world file a node may also be written as a plain string or as
/// conditional text, which yields a root node with no responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DialogSource")]
pub struct DialogNode {
    /// What the NPC says or does.
    pub npc_narrative: ResolvableText,
    /// The player's line, echoed when this node is chosen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_narrative: Option<ResolvableText>,
    /// Hint shown to the player while this node is on offer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword_hint: Option<String>,
    /// Extra keywords that select this node besides its key.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// Gate for offering this node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub criteria: Option<Criteria>,
    /// Applied when this node is reached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<Effect>,
    /// Child nodes keyed by the keyword that selects them.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, DialogNode>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DialogSource {
    Plain(String),
    Node(NodeFields),
    Entry(ConditionalText),
    List(Vec<ConditionalText>),
}

#[derive(Deserialize)]
struct NodeFields {
    npc_narrative: ResolvableText,
    #[serde(default)]
    player_narrative: Option<ResolvableText>,
    #[serde(default)]
    keyword_hint: Option<String>,
    #[serde(default)]
    aliases: Vec<String>,
    #[serde(default)]
    criteria: Option<Criteria>,
    #[serde(default)]
    effect: Option<Effect>,
    #[serde(default)]
    responses: IndexMap<String, DialogNode>,
}

impl From<DialogSource> for DialogNode {
    fn from(source: DialogSource) -> Self {
        match source {
            DialogSource::Plain(text) => Self::new(text),
            DialogSource::Entry(entry) => Self::new(ResolvableText::from_entries(vec![entry])),
            DialogSource::List(entries) => Self::new(ResolvableText::from_entries(entries)),
            DialogSource::Node(fields) => Self {
                npc_narrative: fields.npc_narrative,
                player_narrative: fields.player_narrative,
                keyword_hint: fields.keyword_hint,
                aliases: fields.aliases,
                criteria: fields.criteria,
                effect: fields.effect,
                responses: fields.responses,
            },
        }
    }
}

impl DialogNode {
    /// A node with the given NPC narrative and nothing else.
    pub fn new(npc_narrative: impl Into<ResolvableText>) -> Self {
        Self {
            npc_narrative: npc_narrative.into(),
            ..Self::default()
        }
    }

    /// Set the player's line.
    pub fn with_player(mut self, text: impl Into<ResolvableText>) -> Self {
        self.player_narrative = Some(text.into());
        self
    }

    /// Set the keyword hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.keyword_hint = Some(hint.into());
        self
    }

    /// Add an alias keyword.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Gate this node.
    pub fn with_criteria(mut self, criteria: Criteria) -> Self {
        self.criteria = Some(criteria);
        self
    }

    /// Attach an effect.
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = Some(effect);
        self
    }

    /// Add a response reached by `keyword`.
    pub fn with_response(mut self, keyword: impl Into<String>, node: DialogNode) -> Self {
        self.responses.insert(keyword.into(), node);
        self
    }

    /// Whether the conversation ends at this node.
    pub fn is_leaf(&self) -> bool {
        self.responses.is_empty()
    }

    /// Follow a path of response keywords from this node.
    pub fn descend<S: AsRef<str>>(&self, path: &[S]) -> Option<&DialogNode> {
        path.iter()
            .try_fold(self, |node, key| node.responses.get(key.as_ref()))
    }

    /// Visit this node and every descendant, depth first.
    pub fn walk(&self, visit: &mut dyn FnMut(&DialogNode)) {
        visit(self);
        for child in self.responses.values() {
            child.walk(visit);
        }
    }
}
