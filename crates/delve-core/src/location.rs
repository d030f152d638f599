use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::criteria::Criteria;
use crate::text::ResolvableText;

/// A way out of a location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exit {
    /// Target location id.
    pub to: String,
    /// Shown when the player takes the exit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Gate; while it fails the exit is hidden and cannot be used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria: Option<Criteria>,
    /// Shown when the player tries the exit while the gate fails.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_description: Option<String>,
}

impl Exit {
    /// An ungated exit to `to`.
    pub fn to(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            ..Self::default()
        }
    }

    /// Set the traversal description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Gate the exit.
    pub fn with_criteria(mut self, criteria: Criteria) -> Self {
        self.criteria = Some(criteria);
        self
    }

    /// Set the text shown while the exit is blocked.
    pub fn blocked(mut self, text: impl Into<String>) -> Self {
        self.blocked_description = Some(text.into());
        self
    }
}

/// A place the player can be.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Unique key; filled from the map key when loaded from a file.
    #[serde(skip)]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Description shown by `look`.
    #[serde(default)]
    pub description: ResolvableText,
    /// Items present when the game starts.
    #[serde(default)]
    pub items: Vec<String>,
    /// Exits keyed by direction or keyword, in authored order.
    #[serde(default)]
    pub exits: IndexMap<String, Exit>,
}

impl Location {
    /// Create an empty location.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<ResolvableText>) -> Self {
        self.description = description.into();
        self
    }

    /// Place an item here at the start of the game.
    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.items.push(item.into());
        self
    }

    /// Add an exit.
    pub fn with_exit(mut self, keyword: impl Into<String>, exit: Exit) -> Self {
        self.exits.insert(keyword.into(), exit);
        self
    }
}
