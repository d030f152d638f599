//! Mutable game state for one play session.

use std::collections::{BTreeMap, BTreeSet};

use delve_core::{World, companion_flag, companion_id};
use serde::Serialize;

/// Everything that changes while a world is being played.
///
/// Created once from the world's starting conditions. Only the session
/// mutates it; everything else reads it. Ordered collections keep rendering
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    location: String,
    inventory: Vec<String>,
    flags: BTreeSet<String>,
    placements: BTreeMap<String, Vec<String>>,
    interaction_uses: BTreeMap<String, u32>,
    conversations: BTreeMap<String, Vec<String>>,
    last_conversation: Option<String>,
}

impl GameState {
    /// Build the starting state for a world.
    pub fn new(world: &World) -> Self {
        let meta = world.meta();
        let mut state = Self {
            location: meta.start.clone(),
            inventory: Vec::new(),
            flags: BTreeSet::new(),
            placements: world
                .locations()
                .map(|l| (l.id.clone(), l.items.clone()))
                .collect(),
            interaction_uses: BTreeMap::new(),
            conversations: BTreeMap::new(),
            last_conversation: None,
        };
        for item in &meta.initial_inventory {
            state.add_item(item);
        }
        for npc in &meta.initial_companions {
            state.flags.insert(companion_flag(npc));
            state.unplace(npc);
        }
        state
    }

    /// Id of the current location.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Carried item ids in the order they were picked up.
    pub fn inventory(&self) -> &[String] {
        &self.inventory
    }

    /// Whether the player carries the item.
    pub fn has_item(&self, id: &str) -> bool {
        self.inventory.iter().any(|i| i == id)
    }

    /// Every set flag, including companion flags, in sorted order.
    pub fn flags(&self) -> impl Iterator<Item = &str> {
        self.flags.iter().map(String::as_str)
    }

    /// Whether a flag is set.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    /// Whether the NPC currently accompanies the player.
    pub fn is_companion(&self, npc: &str) -> bool {
        self.flags.contains(&companion_flag(npc))
    }

    /// Active companion ids, sorted.
    pub fn companions(&self) -> impl Iterator<Item = &str> {
        self.flags.iter().filter_map(|f| companion_id(f))
    }

    /// Item ids lying in a location.
    pub fn items_at(&self, location: &str) -> &[String] {
        self.placements
            .get(location)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether the item lies in the current location.
    pub fn is_present(&self, id: &str) -> bool {
        self.items_at(&self.location).iter().any(|i| i == id)
    }

    /// Whether the player can refer to the item right now.
    pub fn is_reachable(&self, id: &str) -> bool {
        self.is_present(id) || self.has_item(id) || self.is_companion(id)
    }

    /// How many times an interaction has succeeded.
    pub fn uses(&self, interaction: &str) -> u32 {
        self.interaction_uses.get(interaction).copied().unwrap_or(0)
    }

    /// Path of response keywords to the NPC's current dialog node, if a
    /// conversation with it is in progress.
    pub fn conversation(&self, npc: &str) -> Option<&[String]> {
        self.conversations.get(npc).map(Vec::as_slice)
    }

    /// The NPC most recently left waiting for a reply, if still waiting.
    pub fn last_conversation(&self) -> Option<&str> {
        self.last_conversation
            .as_deref()
            .filter(|npc| self.conversations.contains_key(*npc))
    }

    // -----------------------------------------------------------------------
    // Mutation (session only)
    // -----------------------------------------------------------------------

    pub(crate) fn set_location(&mut self, location: &str) {
        self.location = location.to_string();
    }

    pub(crate) fn set_flag(&mut self, flag: &str) {
        self.flags.insert(flag.to_string());
    }

    pub(crate) fn clear_flag(&mut self, flag: &str) {
        self.flags.remove(flag);
    }

    /// Put an item in the inventory, lifting it out of any location.
    pub(crate) fn add_item(&mut self, id: &str) {
        self.unplace(id);
        if !self.has_item(id) {
            self.inventory.push(id.to_string());
        }
    }

    pub(crate) fn remove_item(&mut self, id: &str) -> bool {
        let before = self.inventory.len();
        self.inventory.retain(|i| i != id);
        self.inventory.len() != before
    }

    /// Put an item in the current location.
    pub(crate) fn place_here(&mut self, id: &str) {
        let items = self.placements.entry(self.location.clone()).or_default();
        if !items.iter().any(|i| i == id) {
            items.push(id.to_string());
        }
    }

    /// Remove an item from every location.
    pub(crate) fn unplace(&mut self, id: &str) {
        for items in self.placements.values_mut() {
            items.retain(|i| i != id);
        }
    }

    pub(crate) fn record_use(&mut self, interaction: &str) {
        *self
            .interaction_uses
            .entry(interaction.to_string())
            .or_default() += 1;
    }

    pub(crate) fn set_conversation(&mut self, npc: &str, path: Vec<String>) {
        self.conversations.insert(npc.to_string(), path);
        self.last_conversation = Some(npc.to_string());
    }

    pub(crate) fn end_conversation(&mut self, npc: &str) {
        self.conversations.remove(npc);
    }
}
