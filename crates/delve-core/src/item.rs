use serde::{Deserialize, Serialize};

use crate::dialog::DialogNode;
use crate::text::ResolvableText;

/// Anything the player can refer to by name: objects, scenery, and NPCs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique key; filled from the map key when loaded from a file.
    #[serde(skip)]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Static description returned by `examine`.
    pub description: String,
    /// Text woven into a location description while the item is present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_description: Option<ResolvableText>,
    /// Noun phrases that refer to this item. The id is not implicitly one.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Whether the player can pick the item up.
    #[serde(default)]
    pub portable: bool,
}

impl Item {
    /// Create a fixed (non-portable) item.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the location description.
    pub fn with_location_description(mut self, text: impl Into<ResolvableText>) -> Self {
        self.location_description = Some(text.into());
        self
    }

    /// Add an alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Mark the item as portable.
    pub fn portable(mut self) -> Self {
        self.portable = true;
        self
    }

    /// "a" or "an" followed by the lower-cased name, for "There is ..." lines.
    pub fn indefinite_name(&self) -> String {
        let name = self.name.to_lowercase();
        let article = match name.chars().next() {
            Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
            _ => "a",
        };
        format!("{article} {name}")
    }
}

/// Metadata that turns an [`Item`] with the same id into an NPC.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Npc {
    /// Character notes for a narration layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<String>,
    /// What the NPC wants from the player, for a narration layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quest_hook: Option<String>,
    /// Example lines in the NPC's voice.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sample_lines: Vec<String>,
    /// Conversation tree for `talk`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialog: Option<DialogNode>,
}

impl Npc {
    /// An NPC with no dialog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the persona.
    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = Some(persona.into());
        self
    }

    /// Add a sample line.
    pub fn with_sample_line(mut self, line: impl Into<String>) -> Self {
        self.sample_lines.push(line.into());
        self
    }

    /// Set the dialog tree.
    pub fn with_dialog(mut self, dialog: DialogNode) -> Self {
        self.dialog = Some(dialog);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indefinite_article() {
        assert_eq!(Item::new("apple", "Apple").indefinite_name(), "an apple");
        assert_eq!(Item::new("lamp", "Brass Lamp").indefinite_name(), "a brass lamp");
    }

    #[test]
    fn defaults_when_loading() {
        let item: Item =
            serde_json::from_str(r#"{ "name": "Rock", "description": "A rock." }"#).unwrap();
        assert!(!item.portable);
        assert!(item.aliases.is_empty());
        assert!(item.id.is_empty());
    }
}
