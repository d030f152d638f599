use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::criteria::{Criteria, Effect, companion_id};
use crate::dialog::DialogNode;
use crate::error::{RefKind, WorldError, WorldResult};
use crate::interaction::Interaction;
use crate::item::{Item, Npc};
use crate::location::Location;
use crate::text::ResolvableText;

/// Header of a world: title and starting conditions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldMeta {
    /// Title shown by front ends.
    pub title: String,
    /// Location the player starts in.
    pub start: String,
    /// Items the player starts with.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub initial_inventory: Vec<String>,
    /// NPCs that accompany the player from the start.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub initial_companions: Vec<String>,
    /// Flag that ends the game once set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ending_flag: Option<String>,
}

impl WorldMeta {
    /// A header with the given title and start location.
    pub fn new(title: impl Into<String>, start: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            start: start.into(),
            ..Self::default()
        }
    }

    /// Add an item to the starting inventory.
    pub fn with_inventory(mut self, item: impl Into<String>) -> Self {
        self.initial_inventory.push(item.into());
        self
    }

    /// Add a starting companion.
    pub fn with_companion(mut self, npc: impl Into<String>) -> Self {
        self.initial_companions.push(npc.into());
        self
    }

    /// Set the flag that ends the game.
    pub fn with_ending_flag(mut self, flag: impl Into<String>) -> Self {
        self.ending_flag = Some(flag.into());
        self
    }
}

/// The complete, immutable description of a game world.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "WorldFile")]
pub struct World {
    meta: WorldMeta,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    flags: Vec<String>,
    items: BTreeMap<String, Item>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    npcs: BTreeMap<String, Npc>,
    locations: BTreeMap<String, Location>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    interactions: Vec<Interaction>,
}

/// On-disk shape of a world; ids live only in the map keys.
#[derive(Deserialize)]
struct WorldFile {
    #[serde(alias = "world")]
    meta: WorldMeta,
    #[serde(default)]
    flags: Vec<String>,
    #[serde(default)]
    items: BTreeMap<String, Item>,
    #[serde(default)]
    npcs: BTreeMap<String, Npc>,
    #[serde(default)]
    locations: BTreeMap<String, Location>,
    #[serde(default)]
    interactions: Vec<Interaction>,
}

impl From<WorldFile> for World {
    fn from(file: WorldFile) -> Self {
        let mut items = file.items;
        for (id, item) in items.iter_mut() {
            item.id = id.clone();
        }
        let mut locations = file.locations;
        for (id, location) in locations.iter_mut() {
            location.id = id.clone();
        }
        Self {
            meta: file.meta,
            flags: file.flags,
            items,
            npcs: file.npcs,
            locations,
            interactions: file.interactions,
        }
    }
}

impl World {
    /// An empty world with the given header.
    pub fn new(meta: WorldMeta) -> Self {
        Self {
            meta,
            ..Self::default()
        }
    }

    /// Parse a world from JSON and validate it.
    pub fn from_json(source: &str) -> WorldResult<Self> {
        let world: World = serde_json::from_str(source)?;
        world.check()?;
        Ok(world)
    }

    // -----------------------------------------------------------------------
    // Builders
    // -----------------------------------------------------------------------

    /// Declare a flag.
    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.push(flag.into());
        self
    }

    /// Add an item, keyed by its id.
    pub fn with_item(mut self, item: Item) -> Self {
        self.items.insert(item.id.clone(), item);
        self
    }

    /// Attach NPC metadata to the item `id`.
    pub fn with_npc(mut self, id: impl Into<String>, npc: Npc) -> Self {
        self.npcs.insert(id.into(), npc);
        self
    }

    /// Add a location, keyed by its id.
    pub fn with_location(mut self, location: Location) -> Self {
        self.locations.insert(location.id.clone(), location);
        self
    }

    /// Append an interaction. Earlier interactions take precedence.
    pub fn with_interaction(mut self, interaction: Interaction) -> Self {
        self.interactions.push(interaction);
        self
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The world header.
    pub fn meta(&self) -> &WorldMeta {
        &self.meta
    }

    /// The declared flag vocabulary.
    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    /// Look up an item by id.
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    /// All items, ordered by id.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// NPC metadata for an item id, if it is an NPC.
    pub fn npc(&self, id: &str) -> Option<&Npc> {
        self.npcs.get(id)
    }

    /// Whether the item id names an NPC.
    pub fn is_npc(&self, id: &str) -> bool {
        self.npcs.contains_key(id)
    }

    /// All NPC ids, ordered.
    pub fn npc_ids(&self) -> impl Iterator<Item = &str> {
        self.npcs.keys().map(String::as_str)
    }

    /// Look up a location by id.
    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.get(id)
    }

    /// All locations, ordered by id.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.values()
    }

    /// All interactions in authored order.
    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    /// Validate, returning every problem found in a single error.
    pub fn check(&self) -> WorldResult<()> {
        let issues = self.validate();
        if issues.is_empty() {
            Ok(())
        } else {
            Err(WorldError::Invalid(issues))
        }
    }

    /// Collect every dangling reference and duplicate in the world.
    pub fn validate(&self) -> Vec<WorldError> {
        let mut v = Validator {
            world: self,
            declared: self.flags.iter().map(String::as_str).collect(),
            issues: Vec::new(),
        };

        v.location(&self.meta.start, "world start");
        if let Some(flag) = &self.meta.ending_flag {
            v.flag(flag, "world ending_flag");
        }
        for id in &self.meta.initial_inventory {
            v.item(id, "initial_inventory");
        }
        for id in &self.meta.initial_companions {
            v.npc(id, "initial_companions");
        }

        for id in self.npcs.keys() {
            v.item(id, format!("npc \"{id}\""));
        }

        for item in self.items.values() {
            if let Some(text) = &item.location_description {
                v.text(text, &format!("item \"{}\"", item.id));
            }
        }

        for location in self.locations.values() {
            let context = format!("location \"{}\"", location.id);
            v.text(&location.description, &context);
            for id in &location.items {
                v.item(id, &context);
            }
            for (keyword, exit) in location.exits.iter() {
                let context = format!("exit \"{keyword}\" of location \"{}\"", location.id);
                v.location(&exit.to, &context);
                if let Some(criteria) = &exit.criteria {
                    v.criteria(criteria, &context);
                }
            }
        }

        let mut seen = BTreeSet::new();
        for interaction in &self.interactions {
            if !seen.insert(interaction.id.as_str()) {
                v.issues
                    .push(WorldError::DuplicateInteraction(interaction.id.clone()));
            }
            let context = format!("interaction \"{}\"", interaction.id);
            v.item(&interaction.item, &context);
            if let Some(target) = &interaction.target {
                v.item(target, &context);
            }
            v.text(&interaction.message, &context);
            if let Some(text) = &interaction.failure_message {
                v.text(text, &context);
            }
            if let Some(criteria) = &interaction.criteria {
                v.criteria(criteria, &context);
            }
            if let Some(effect) = &interaction.effect {
                v.effect(effect, &context);
            }
        }

        for (id, npc) in &self.npcs {
            if let Some(dialog) = &npc.dialog {
                let context = format!("dialog of npc \"{id}\"");
                dialog.walk(&mut |node: &DialogNode| v.dialog_node(node, &context));
            }
        }

        v.issues
    }
}

struct Validator<'w> {
    world: &'w World,
    declared: BTreeSet<&'w str>,
    issues: Vec<WorldError>,
}

impl Validator<'_> {
    fn item(&mut self, id: &str, context: impl Into<String>) {
        if !self.world.items.contains_key(id) {
            self.issues
                .push(WorldError::reference(RefKind::Item, id, context));
        }
    }

    fn npc(&mut self, id: &str, context: impl Into<String>) {
        if !self.world.npcs.contains_key(id) {
            self.issues
                .push(WorldError::reference(RefKind::Npc, id, context));
        }
    }

    fn location(&mut self, id: &str, context: impl Into<String>) {
        if !self.world.locations.contains_key(id) {
            self.issues
                .push(WorldError::reference(RefKind::Location, id, context));
        }
    }

    fn flag(&mut self, flag: &str, context: impl Into<String>) {
        match companion_id(flag) {
            Some(npc) => self.npc(npc, context),
            None if !self.declared.contains(flag) => {
                self.issues
                    .push(WorldError::reference(RefKind::Flag, flag, context));
            }
            None => {}
        }
    }

    fn criteria(&mut self, criteria: &Criteria, context: &str) {
        for flag in criteria.flags() {
            self.flag(flag, context);
        }
        for id in &criteria.requires_inventory {
            self.item(id, context);
        }
        for id in &criteria.requires_companions {
            self.npc(id, context);
        }
    }

    fn effect(&mut self, effect: &Effect, context: &str) {
        for flag in effect.flags() {
            self.flag(flag, context);
        }
        for id in effect.add_inventory.iter().chain(&effect.remove_inventory) {
            self.item(id, context);
        }
        for id in effect
            .add_companions
            .iter()
            .chain(&effect.remove_companions)
        {
            self.npc(id, context);
        }
    }

    fn text(&mut self, text: &ResolvableText, context: &str) {
        for criteria in text.criteria() {
            self.criteria(criteria, context);
        }
    }

    fn dialog_node(&mut self, node: &DialogNode, context: &str) {
        self.text(&node.npc_narrative, context);
        if let Some(text) = &node.player_narrative {
            self.text(text, context);
        }
        if let Some(criteria) = &node.criteria {
            self.criteria(criteria, context);
        }
        if let Some(effect) = &node.effect {
            self.effect(effect, context);
        }
    }
}
