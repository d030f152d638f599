use std::fmt;

use serde::{Deserialize, Serialize};

use crate::criteria::{Criteria, Effect};
use crate::text::ResolvableText;

/// Verbs that can trigger an [`Interaction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionVerb {
    /// `use <item> [on <target>]`
    Use,
    /// `open <item>`
    Open,
    /// `close <item>`
    Close,
    /// `give <item> [to <target>]`
    Give,
    /// `talk <npc>` for NPCs without a dialog tree.
    Talk,
}

impl fmt::Display for InteractionVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Use => "use",
            Self::Open => "open",
            Self::Close => "close",
            Self::Give => "give",
            Self::Talk => "talk",
        };
        f.write_str(name)
    }
}

fn repeatable_default() -> bool {
    true
}

fn is_true(value: &bool) -> bool {
    *value
}

/// Authored behaviour for a verb applied to an item and optional target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    /// Unique key; also keys the usage record of one-shot interactions.
    pub id: String,
    /// The verb that triggers it.
    pub verb: InteractionVerb,
    /// The acted-on item.
    pub item: String,
    /// The item acted upon with `item`, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Shown when the interaction succeeds.
    pub message: ResolvableText,
    /// Shown when the interaction exists but is not available yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_message: Option<ResolvableText>,
    /// Availability gate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria: Option<Criteria>,
    /// Applied on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<Effect>,
    /// Remove the acted-on item from the inventory on success.
    #[serde(default)]
    pub consumes: bool,
    /// Whether the interaction may succeed more than once.
    #[serde(default = "repeatable_default", skip_serializing_if = "is_true")]
    pub repeatable: bool,
}

impl Interaction {
    /// A repeatable, ungated interaction with no effect.
    pub fn new(
        id: impl Into<String>,
        verb: InteractionVerb,
        item: impl Into<String>,
        message: impl Into<ResolvableText>,
    ) -> Self {
        Self {
            id: id.into(),
            verb,
            item: item.into(),
            target: None,
            message: message.into(),
            failure_message: None,
            criteria: None,
            effect: None,
            consumes: false,
            repeatable: true,
        }
    }

    /// Set the target item.
    pub fn on(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Set the "not yet" message.
    pub fn with_failure(mut self, text: impl Into<ResolvableText>) -> Self {
        self.failure_message = Some(text.into());
        self
    }

    /// Gate the interaction.
    pub fn with_criteria(mut self, criteria: Criteria) -> Self {
        self.criteria = Some(criteria);
        self
    }

    /// Attach an effect.
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = Some(effect);
        self
    }

    /// Consume the acted-on item on success.
    pub fn consuming(mut self) -> Self {
        self.consumes = true;
        self
    }

    /// Allow only one success per game.
    pub fn once(mut self) -> Self {
        self.repeatable = false;
        self
    }
}
