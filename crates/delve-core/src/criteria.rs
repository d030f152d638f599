use serde::{Deserialize, Serialize};

/// Prefix of the synthetic flags that mark active companions.
pub const COMPANION_PREFIX: &str = "companion:";

/// The flag that is set while `npc_id` accompanies the player.
pub fn companion_flag(npc_id: &str) -> String {
    format!("{COMPANION_PREFIX}{npc_id}")
}

/// The NPC id encoded in a companion flag, if `flag` is one.
pub fn companion_id(flag: &str) -> Option<&str> {
    flag.strip_prefix(COMPANION_PREFIX)
}

/// A conjunctive predicate over flags, inventory, and companions.
///
/// Every listed flag must be set, every blocking flag must be unset, every
/// listed item must be carried, and every listed NPC must be an active
/// companion. An empty `Criteria` always matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Criteria {
    /// Flags that must all be set.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub requires_flags: Vec<String>,
    /// Flags that must all be unset.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub blocking_flags: Vec<String>,
    /// Item ids the player must be holding.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub requires_inventory: Vec<String>,
    /// NPC ids that must be active companions.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub requires_companions: Vec<String>,
}

impl Criteria {
    /// Create a criteria that always matches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a flag to be set.
    pub fn requires(mut self, flag: impl Into<String>) -> Self {
        self.requires_flags.push(flag.into());
        self
    }

    /// Require a flag to be unset.
    pub fn blocked_by(mut self, flag: impl Into<String>) -> Self {
        self.blocking_flags.push(flag.into());
        self
    }

    /// Require the player to carry an item.
    pub fn holding(mut self, item: impl Into<String>) -> Self {
        self.requires_inventory.push(item.into());
        self
    }

    /// Require an NPC to be an active companion.
    pub fn with_companion(mut self, npc: impl Into<String>) -> Self {
        self.requires_companions.push(npc.into());
        self
    }

    /// Whether this criteria has no conditions at all.
    pub fn is_empty(&self) -> bool {
        self.requires_flags.is_empty()
            && self.blocking_flags.is_empty()
            && self.requires_inventory.is_empty()
            && self.requires_companions.is_empty()
    }

    /// Every flag name this criteria mentions.
    pub fn flags(&self) -> impl Iterator<Item = &str> {
        self.requires_flags
            .iter()
            .chain(&self.blocking_flags)
            .map(String::as_str)
    }
}

/// A bundle of state changes applied as one unit.
///
/// All operations are set operations, so applying an effect twice leaves the
/// state as applying it once would.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Effect {
    /// Flags to set.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub set_flags: Vec<String>,
    /// Flags to clear.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub clear_flags: Vec<String>,
    /// Items to put in the player's inventory.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub add_inventory: Vec<String>,
    /// Items to take out of the player's inventory.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub remove_inventory: Vec<String>,
    /// NPCs that start accompanying the player.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub add_companions: Vec<String>,
    /// NPCs that stop accompanying the player.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub remove_companions: Vec<String>,
}

impl Effect {
    /// Create an effect that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a flag.
    pub fn set(mut self, flag: impl Into<String>) -> Self {
        self.set_flags.push(flag.into());
        self
    }

    /// Clear a flag.
    pub fn clear(mut self, flag: impl Into<String>) -> Self {
        self.clear_flags.push(flag.into());
        self
    }

    /// Give the player an item.
    pub fn give(mut self, item: impl Into<String>) -> Self {
        self.add_inventory.push(item.into());
        self
    }

    /// Take an item from the player.
    pub fn take(mut self, item: impl Into<String>) -> Self {
        self.remove_inventory.push(item.into());
        self
    }

    /// Make an NPC a companion.
    pub fn recruit(mut self, npc: impl Into<String>) -> Self {
        self.add_companions.push(npc.into());
        self
    }

    /// Dismiss a companion.
    pub fn dismiss(mut self, npc: impl Into<String>) -> Self {
        self.remove_companions.push(npc.into());
        self
    }

    /// Every flag name this effect sets or clears.
    pub fn flags(&self) -> impl Iterator<Item = &str> {
        self.set_flags
            .iter()
            .chain(&self.clear_flags)
            .map(String::as_str)
    }
}
