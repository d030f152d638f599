//! The engine's dispatcher: one play session over one world.

use delve_core::{DialogNode, Exit, Interaction, InteractionVerb, Item, Location, World};
use tracing::{debug, info};

use crate::choice::{
    apply_effect, check, matches, offered_responses, render_node, resolve, resolve_or,
    select_response,
};
use crate::config::SessionConfig;
use crate::error::{EngineResult, ParseError};
use crate::narrator::{self, NarrationContext, NarrationRequest, Narrator};
use crate::outcome::{ImageRef, RenderedResult, Reply};
use crate::parser::{Command, Direction, parse_command};
use crate::state::GameState;

const HELP_TEXT: &str = "Commands:\n\
    look (l) - describe where you are\n\
    north, south, east, west, up, down (n, s, e, w, u, d) - move\n\
    go <exit> - take a named exit\n\
    take <item> / drop <item> - pick up or put down\n\
    examine <item> (x) - look closely at something\n\
    inventory (i) - list what you're carrying\n\
    use <item> [on <target>] - use something\n\
    open <item> / close <item>\n\
    give <item> to <someone>\n\
    talk to <someone> [keyword] - start or continue a conversation\n\
    help (?) - show this list";

/// A play session: the world, the mutable state, and an optional narrator.
///
/// Every call to [`submit_command`](Self::submit_command) is one complete
/// turn. Player mistakes are rendered as text; nothing a player types
/// produces an error.
pub struct GameSession {
    world: World,
    state: GameState,
    config: SessionConfig,
    narrator: Option<Box<dyn Narrator>>,
}

impl GameSession {
    /// Start a session at the world's start location.
    ///
    /// Fails if the world does not validate.
    pub fn new(world: World, config: SessionConfig) -> EngineResult<Self> {
        world.check()?;
        let state = GameState::new(&world);
        info!(title = %world.meta().title, start = %state.location(), "session started");
        Ok(Self {
            world,
            state,
            config,
            narrator: None,
        })
    }

    /// Install a narrator.
    pub fn with_narrator(mut self, narrator: impl Narrator + 'static) -> Self {
        self.set_narrator(narrator);
        self
    }

    /// Install or replace the narrator.
    pub fn set_narrator(&mut self, narrator: impl Narrator + 'static) {
        self.narrator = Some(Box::new(narrator));
    }

    /// Whether a narrator is installed.
    pub fn has_narrator(&self) -> bool {
        self.narrator.is_some()
    }

    /// Turn narration on or off.
    pub fn set_narration(&mut self, enabled: bool) {
        self.config.narration = enabled;
    }

    /// Whether the narrator will be consulted on the next turn.
    pub fn narration_enabled(&self) -> bool {
        self.config.narration && self.narrator.is_some()
    }

    /// The world being played.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Whether the world's ending flag has been set.
    pub fn is_over(&self) -> bool {
        self.world
            .meta()
            .ending_flag
            .as_deref()
            .is_some_and(|flag| self.state.has_flag(flag))
    }

    /// Describe the current location without taking a turn.
    pub fn look(&self) -> RenderedResult {
        let reply = self.do_look();
        self.finish(reply.text.clone(), reply, false)
    }

    /// Run one turn.
    pub fn submit_command(&mut self, raw: &str) -> RenderedResult {
        let before = self.state.location().to_string();
        let (command, reply) = if raw.len() > self.config.max_input_len {
            (
                raw.to_string(),
                Reply::not_understood(ParseError::TooLong.to_string()),
            )
        } else {
            let input = self.translate(raw);
            self.dispatch(&input)
        };
        let text = self.narrate(&command, &reply);
        let moved = self.state.location() != before;
        self.finish(text, reply, moved)
    }

    fn finish(&self, text: String, reply: Reply, location_changed: bool) -> RenderedResult {
        RenderedResult {
            text,
            location: self.state.location().to_string(),
            outcome: reply.outcome,
            location_changed,
            image: reply.image,
            game_over: self.is_over(),
        }
    }

    fn dispatch(&mut self, input: &str) -> (String, Reply) {
        let parsed = match parse_command(input, &self.world, &self.state) {
            Ok(Command::Move { direction }) if !self.has_exit(&direction) => {
                Ok(self.pending_reply(input).unwrap_or(Command::Move { direction }))
            }
            Ok(command) => Ok(command),
            Err(e) => self.pending_reply(input).ok_or(e),
        };
        match parsed {
            Ok(command) => {
                debug!(%command, "dispatching");
                let reply = self.execute(&command);
                (command.to_string(), reply)
            }
            Err(e) => {
                debug!(input, error = %e, "not understood");
                let reply = match e {
                    ParseError::UnresolvedNoun(_) => Reply::not_found(e.to_string()),
                    _ => Reply::not_understood(e.to_string()),
                };
                (input.to_string(), reply)
            }
        }
    }

    fn has_exit(&self, keyword: &str) -> bool {
        self.world
            .location(self.state.location())
            .and_then(|location| find_exit(location, keyword))
            .is_some()
    }

    /// Input that isn't a command may be a reply to the conversation left
    /// waiting most recently.
    fn pending_reply(&self, input: &str) -> Option<Command> {
        let npc = self.state.last_conversation()?;
        if !self.state.is_reachable(npc) {
            return None;
        }
        let path = self.state.conversation(npc)?;
        let node = self.world.npc(npc)?.dialog.as_ref()?.descend(path)?;
        let (key, _) = select_response(node, input, &self.state)?;
        Some(Command::Talk {
            npc: npc.to_string(),
            keyword: Some(key.to_string()),
        })
    }

    fn execute(&mut self, command: &Command) -> Reply {
        match command {
            Command::Look => self.do_look(),
            Command::Inventory => self.do_inventory(),
            Command::Help => Reply::success(HELP_TEXT),
            Command::Move { direction } => self.do_move(direction),
            Command::Take { item } => self.do_take(item),
            Command::Drop { item } => self.do_drop(item),
            Command::Examine { item } => self.do_examine(item),
            Command::Interact { verb, item, target } => {
                self.do_interact(*verb, item, target.as_deref())
            }
            Command::Talk { npc, keyword } => self.do_talk(npc, keyword.as_deref()),
        }
    }

    // -----------------------------------------------------------------------
    // Narration
    // -----------------------------------------------------------------------

    fn translate(&mut self, raw: &str) -> String {
        if !self.config.narration {
            return raw.to_string();
        }
        let Some(narrator) = self.narrator.as_mut() else {
            return raw.to_string();
        };
        let context = narration_context(&self.world, &self.state);
        match narrator::usable(narrator.translate(raw, &context)) {
            Some(command) => {
                debug!(raw, %command, "narrator translated input");
                command
            }
            None => raw.to_string(),
        }
    }

    fn narrate(&mut self, command: &str, reply: &Reply) -> String {
        if !self.config.narration {
            return reply.text.clone();
        }
        let Some(narrator) = self.narrator.as_mut() else {
            return reply.text.clone();
        };
        let request = NarrationRequest {
            command: command.to_string(),
            output: reply.text.clone(),
            outcome: reply.outcome,
            context: narration_context(&self.world, &self.state),
        };
        narrator::usable(narrator.narrate(&request)).unwrap_or_else(|| reply.text.clone())
    }

    // -----------------------------------------------------------------------
    // Handlers
    // -----------------------------------------------------------------------

    fn do_look(&self) -> Reply {
        Reply::success(self.describe_location())
            .with_image(ImageRef::location(self.state.location()))
    }

    fn describe_location(&self) -> String {
        let Some(location) = self.world.location(self.state.location()) else {
            return String::new();
        };
        let mut lines = vec![location.name.clone()];
        let description = resolve(&location.description, &self.state);
        if !description.is_empty() {
            lines.push(description.to_string());
        }

        let here: Vec<&Item> = self
            .state
            .items_at(&location.id)
            .iter()
            .filter_map(|id| self.world.item(id))
            .collect();
        let (npcs, things): (Vec<&Item>, Vec<&Item>) =
            here.into_iter().partition(|i| self.world.is_npc(&i.id));

        for item in &things {
            match self.placed_text(item) {
                Some(text) => lines.push(text.to_string()),
                None if item.portable => {
                    lines.push(format!("There is {} here.", item.indefinite_name()));
                }
                None => {}
            }
        }
        for npc in &npcs {
            match self.placed_text(npc) {
                Some(text) => lines.push(text.to_string()),
                None => lines.push(format!("{} is here.", npc.name)),
            }
        }

        let companions: Vec<&str> = self
            .state
            .companions()
            .filter_map(|id| self.world.item(id))
            .map(|i| i.name.as_str())
            .collect();
        if !companions.is_empty() {
            lines.push(format!("Your companions: {}", companions.join(", ")));
        }

        let portable: Vec<&str> = things
            .iter()
            .filter(|i| i.portable)
            .map(|i| i.name.as_str())
            .collect();
        if !portable.is_empty() {
            lines.push(format!("You see: {}", portable.join(", ")));
        }

        let exits: Vec<&str> = location
            .exits
            .iter()
            .filter(|(_, exit)| matches(exit.criteria.as_ref(), &self.state))
            .map(|(keyword, _)| keyword.as_str())
            .collect();
        if !exits.is_empty() {
            lines.push(format!("Exits: {}", exits.join(", ")));
        }

        if self.config.verbose_look {
            for npc in &npcs {
                let Some(meta) = self.world.npc(&npc.id) else {
                    continue;
                };
                if let Some(persona) = &meta.persona {
                    lines.push(format!("{}: {}", npc.name, persona));
                }
                for line in &meta.sample_lines {
                    lines.push(format!("  \"{line}\""));
                }
            }
            let carried = self.carried_names();
            if carried.is_empty() {
                lines.push("Inventory: nothing".to_string());
            } else {
                lines.push(format!("Inventory: {}", carried.join(", ")));
            }
        }

        lines.join("\n")
    }

    /// An item's resolved location description, if it has a non-empty one.
    fn placed_text<'a>(&self, item: &'a Item) -> Option<&'a str> {
        item.location_description
            .as_ref()
            .map(|text| resolve(text, &self.state))
            .filter(|text| !text.is_empty())
    }

    fn carried_names(&self) -> Vec<&str> {
        self.state
            .inventory()
            .iter()
            .filter_map(|id| self.world.item(id))
            .map(|i| i.name.as_str())
            .collect()
    }

    fn do_move(&mut self, direction: &str) -> Reply {
        let Some(location) = self.world.location(self.state.location()) else {
            return Reply::not_found(format!("You can't go {direction} from here."));
        };
        let Some(exit) = find_exit(location, direction) else {
            return Reply::not_found(format!("You can't go {direction} from here."));
        };
        let failure = exit
            .criteria
            .as_ref()
            .and_then(|criteria| check(criteria, &self.state).err());
        if let Some(failure) = failure {
            debug!(direction, %failure, "exit blocked");
            let text = exit
                .blocked_description
                .clone()
                .unwrap_or_else(|| format!("The way {direction} is blocked."));
            return Reply::not_possible(text);
        }

        let from = location.id.clone();
        let to = exit.to.clone();
        let passage = exit.description.clone().filter(|d| !d.is_empty());
        self.state.set_location(&to);
        info!(%from, %to, "moved");

        let description = self.describe_location();
        let text = match passage {
            Some(passage) => format!("{passage}\n{description}"),
            None => description,
        };
        Reply::success(text).with_image(ImageRef::location(to))
    }

    fn do_take(&mut self, id: &str) -> Reply {
        let Some(item) = self.world.item(id) else {
            return Reply::not_found("You don't see that here.");
        };
        let name = definite_name(&self.world, item);
        if self.state.has_item(id) {
            return Reply::not_possible(format!("You already have {name}."));
        }
        if !self.state.is_reachable(id) {
            return Reply::not_found(format!("You don't see {name} here."));
        }
        if !item.portable || !self.state.is_present(id) {
            return Reply::not_possible(format!("You can't take {name}."));
        }
        self.state.add_item(id);
        Reply::success(format!("You take {name}."))
    }

    fn do_drop(&mut self, id: &str) -> Reply {
        let Some(item) = self.world.item(id) else {
            return Reply::not_found("You aren't carrying that.");
        };
        let name = definite_name(&self.world, item);
        if !self.state.has_item(id) {
            return Reply::not_found(format!("You aren't carrying {name}."));
        }
        if !item.portable {
            return Reply::not_possible(format!("You can't drop {name}."));
        }
        self.state.remove_item(id);
        self.state.place_here(id);
        Reply::success(format!("You drop {name}."))
    }

    fn do_examine(&self, id: &str) -> Reply {
        let Some(item) = self.world.item(id) else {
            return Reply::not_found("You don't see that here.");
        };
        let name = definite_name(&self.world, item);
        if !self.state.is_reachable(id) {
            return Reply::not_found(format!("You don't see {name} here."));
        }
        let text = if item.description.is_empty() {
            format!("You see nothing special about {name}.")
        } else {
            item.description.clone()
        };
        let reply = Reply::success(text);
        if self.world.is_npc(id) {
            reply.with_image(ImageRef::npc(id))
        } else if item.portable {
            reply.with_image(ImageRef::item(id))
        } else {
            reply
        }
    }

    fn do_inventory(&self) -> Reply {
        let carried = self.carried_names();
        if carried.is_empty() {
            return Reply::success("You are carrying nothing.");
        }
        let mut text = String::from("You are carrying:");
        for name in carried {
            text.push_str("\n  - ");
            text.push_str(name);
        }
        Reply::success(text)
    }

    fn do_interact(&mut self, verb: InteractionVerb, item: &str, target: Option<&str>) -> Reply {
        let Some(acted_on) = self.world.item(item) else {
            return Reply::not_found("You don't see that here.");
        };
        let name = definite_name(&self.world, acted_on);
        match target {
            None if !self.state.is_reachable(item) => {
                return Reply::not_found(format!("You don't see {name} here."));
            }
            Some(_) if !self.state.has_item(item) => {
                return Reply::not_found(format!("You aren't carrying {name}."));
            }
            Some(target) if !self.state.is_reachable(target) => {
                let target = self
                    .world
                    .item(target)
                    .map(|t| definite_name(&self.world, t))
                    .unwrap_or_else(|| "that".to_string());
                return Reply::not_found(format!("You don't see {target} here."));
            }
            _ => {}
        }

        let candidates: Vec<&Interaction> = self
            .world
            .interactions()
            .iter()
            .filter(|i| verb_matches(verb, i.verb, target.is_some()))
            .filter(|i| i.item == item && i.target.as_deref() == target)
            .collect();
        if candidates.is_empty() {
            return Reply::no_effect("Nothing happens.");
        }

        let Some(interaction) = candidates
            .iter()
            .copied()
            .find(|i| is_available(i, &self.state))
        else {
            debug!(%verb, item, ?target, "interaction unavailable");
            let failure = candidates.iter().find_map(|i| i.failure_message.as_ref());
            return Reply::not_possible(resolve_or(
                failure,
                &self.state,
                "You can't do that yet.",
            ));
        };

        let message = resolve_or(Some(&interaction.message), &self.state, "Done.");
        if let Some(effect) = &interaction.effect {
            apply_effect(effect, &mut self.state);
        }
        self.state.record_use(&interaction.id);
        if interaction.consumes {
            self.state.remove_item(&interaction.item);
        }
        debug!(interaction = %interaction.id, "interaction fired");
        Reply::success(message)
    }

    fn do_talk(&mut self, id: &str, keyword: Option<&str>) -> Reply {
        let Some(item) = self.world.item(id) else {
            return Reply::not_found("You don't see anyone like that here.");
        };
        let name = definite_name(&self.world, item);
        if !self.state.is_reachable(id) {
            return Reply::not_found(format!("You don't see {name} here."));
        }

        let dialog = self.world.npc(id).and_then(|npc| npc.dialog.as_ref());
        let Some(root) = dialog else {
            let has_talk = self
                .world
                .interactions()
                .iter()
                .any(|i| i.verb == InteractionVerb::Talk && i.item == id && i.target.is_none());
            if has_talk {
                return self.do_interact(InteractionVerb::Talk, id, None);
            }
            if self.world.is_npc(id) {
                return Reply::no_effect(format!("{name} has nothing to say."));
            }
            return Reply::not_possible(format!("You can't talk to {name}."));
        };

        if !matches(root.criteria.as_ref(), &self.state) {
            return Reply::not_possible(format!("{name} doesn't want to talk right now."));
        }
        converse(root, id, keyword, &mut self.state)
    }
}

/// One step of a conversation with `npc`, whose dialog starts at `root`.
fn converse(root: &DialogNode, npc: &str, keyword: Option<&str>, state: &mut GameState) -> Reply {
    let Some(path) = state.conversation(npc).map(<[String]>::to_vec) else {
        if let Some(effect) = &root.effect {
            apply_effect(effect, state);
        }
        if let Some((key, child)) = keyword.and_then(|k| select_response(root, k, &*state)) {
            return advance(npc, Vec::new(), key, child, state);
        }
        let text = render_node(root, state, false);
        settle(npc, root, Vec::new(), state);
        return Reply::success(text);
    };

    // A cursor whose node is gone or has nothing left to offer starts over.
    let node = root
        .descend(&path)
        .filter(|node| !offered_responses(node, &*state).is_empty());
    let Some(node) = node else {
        state.end_conversation(npc);
        return converse(root, npc, keyword, state);
    };

    match keyword {
        None => Reply::success(render_node(node, state, false)),
        Some(keyword) => match select_response(node, keyword, state) {
            Some((key, child)) => advance(npc, path, key, child, state),
            None => Reply::no_effect(render_node(node, state, false)),
        },
    }
}

/// Take the response `key`, leading to `child`, from the node at `path`.
fn advance(
    npc: &str,
    mut path: Vec<String>,
    key: &str,
    child: &DialogNode,
    state: &mut GameState,
) -> Reply {
    if let Some(effect) = &child.effect {
        apply_effect(effect, state);
    }
    let text = render_node(child, state, true);
    path.push(key.to_string());
    settle(npc, child, path, state);
    Reply::success(text)
}

/// Leave the cursor on `node`, or end the conversation if it offers no
/// responses right now.
fn settle(npc: &str, node: &DialogNode, path: Vec<String>, state: &mut GameState) {
    if offered_responses(node, state).is_empty() {
        state.end_conversation(npc);
        info!(npc, "conversation ended");
    } else {
        state.set_conversation(npc, path);
    }
}

/// The exit under `keyword`, or one authored as another spelling of the same
/// direction (`n` for `north`).
fn find_exit<'w>(location: &'w Location, keyword: &str) -> Option<&'w Exit> {
    location.exits.get(keyword).or_else(|| {
        let direction = Direction::parse(keyword)?;
        location
            .exits
            .iter()
            .find(|(key, _)| Direction::parse(key) == Some(direction))
            .map(|(_, exit)| exit)
    })
}

/// `give X to Y` also triggers `use X on Y` interactions.
fn verb_matches(wanted: InteractionVerb, authored: InteractionVerb, targeted: bool) -> bool {
    wanted == authored
        || (targeted && wanted == InteractionVerb::Give && authored == InteractionVerb::Use)
}

fn is_available(interaction: &Interaction, state: &GameState) -> bool {
    matches(interaction.criteria.as_ref(), state)
        && (interaction.repeatable || state.uses(&interaction.id) == 0)
}

/// "the brass lamp" for things, "Lenny" for NPCs.
fn definite_name(world: &World, item: &Item) -> String {
    if world.is_npc(&item.id) {
        item.name.clone()
    } else {
        format!("the {}", item.name.to_lowercase())
    }
}

fn narration_context(world: &World, state: &GameState) -> NarrationContext {
    let names = |ids: &[String]| -> Vec<String> {
        ids.iter()
            .filter_map(|id| world.item(id))
            .map(|i| i.name.clone())
            .collect()
    };
    NarrationContext {
        location_id: state.location().to_string(),
        location_name: world
            .location(state.location())
            .map(|l| l.name.clone())
            .unwrap_or_default(),
        visible_items: names(state.items_at(state.location())),
        inventory: names(state.inventory()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::{Criteria, Effect, Npc, WorldMeta};

    use crate::error::NarrationError;
    use crate::outcome::Outcome;

    fn world() -> World {
        World::new(WorldMeta::new("Test", "hall").with_ending_flag("escaped"))
            .with_flag("lit")
            .with_flag("escaped")
            .with_item(
                Item::new("lamp", "Brass Lamp")
                    .with_alias("lamp")
                    .with_description("A dented brass lamp.")
                    .portable(),
            )
            .with_item(
                Item::new("statue", "Statue")
                    .with_alias("statue")
                    .with_description("A weathered statue.")
                    .with_location_description("A statue looms in the corner."),
            )
            .with_item(Item::new("lenny", "Lenny").with_alias("lenny"))
            .with_npc("lenny", Npc::new().with_persona("A grumpy gatekeeper."))
            .with_location(
                Location::new("hall", "Hall")
                    .with_description("A bare hall.")
                    .with_item("lamp")
                    .with_item("statue")
                    .with_item("lenny")
                    .with_exit(
                        "north",
                        Exit::to("yard").with_criteria(Criteria::new().requires("lit")),
                    )
                    .with_exit("out", Exit::to("yard").with_description("You step outside.")),
            )
            .with_location(
                Location::new("yard", "Yard")
                    .with_description("A windy yard.")
                    .with_exit("in", Exit::to("hall")),
            )
            .with_interaction(
                Interaction::new("escape", InteractionVerb::Use, "statue", "You slip past.")
                    .with_effect(Effect::new().set("escaped")),
            )
    }

    fn session() -> GameSession {
        GameSession::new(world(), SessionConfig::default()).unwrap()
    }

    #[test]
    fn look_composition() {
        let session = session();
        let result = session.look();
        assert_eq!(
            result.text,
            "Hall\nA bare hall.\nThere is a brass lamp here.\nA statue looms in the corner.\n\
             Lenny is here.\nYou see: Brass Lamp\nExits: out"
        );
        assert_eq!(result.image, Some(ImageRef::location("hall")));
    }

    #[test]
    fn verbose_look_adds_persona_and_inventory() {
        let mut session =
            GameSession::new(world(), SessionConfig::new().with_verbose_look(true)).unwrap();
        let text = session.submit_command("look").text;
        assert!(text.contains("Lenny: A grumpy gatekeeper."));
        assert!(text.ends_with("Inventory: nothing"));
    }

    #[test]
    fn move_reports_passage_and_change() {
        let mut session = session();
        let result = session.submit_command("go out");
        assert_eq!(result.outcome, Outcome::Success);
        assert!(result.location_changed);
        assert_eq!(result.location, "yard");
        assert!(result.text.starts_with("You step outside.\nYard"));
    }

    #[test]
    fn missing_and_blocked_exits_differ() {
        let mut session = session();
        let missing = session.submit_command("west");
        assert_eq!(missing.outcome, Outcome::NotFound);
        assert_eq!(missing.text, "You can't go west from here.");
        let blocked = session.submit_command("north");
        assert_eq!(blocked.outcome, Outcome::NotPossible);
        assert_eq!(blocked.text, "The way north is blocked.");
        assert!(!blocked.location_changed);
    }

    #[test]
    fn take_and_drop() {
        let mut session = session();
        assert_eq!(session.submit_command("take lamp").text, "You take the brass lamp.");
        assert_eq!(
            session.submit_command("take lamp").text,
            "You already have the brass lamp."
        );
        let statue = session.submit_command("take statue");
        assert_eq!(statue.outcome, Outcome::NotPossible);
        assert_eq!(session.submit_command("drop lamp").text, "You drop the brass lamp.");
        assert!(session.state().is_present("lamp"));
    }

    #[test]
    fn inventory_listing() {
        let mut session = session();
        assert_eq!(session.submit_command("i").text, "You are carrying nothing.");
        session.submit_command("take lamp");
        assert_eq!(
            session.submit_command("inventory").text,
            "You are carrying:\n  - Brass Lamp"
        );
    }

    #[test]
    fn nothing_happens_without_interaction() {
        let mut session = session();
        let result = session.submit_command("open lamp");
        assert_eq!(result.outcome, Outcome::NoEffect);
        assert_eq!(result.text, "Nothing happens.");
    }

    #[test]
    fn ending_flag_ends_game() {
        let mut session = session();
        assert!(!session.submit_command("look").game_over);
        let result = session.submit_command("use statue");
        assert_eq!(result.text, "You slip past.");
        assert!(result.game_over);
    }

    #[test]
    fn parse_failures_are_classified() {
        let mut session = session();
        let unknown = session.submit_command("dance");
        assert_eq!(unknown.outcome, Outcome::NotUnderstood);
        assert_eq!(unknown.text, "I don't understand \"dance\".");
        let missing = session.submit_command("take sword");
        assert_eq!(missing.outcome, Outcome::NotFound);
        let long = session.submit_command(&"x".repeat(1000));
        assert_eq!(long.outcome, Outcome::NotUnderstood);
        assert_eq!(long.text, "That's too much for me to follow.");
    }

    #[test]
    fn npc_without_dialog() {
        let mut session = session();
        let result = session.submit_command("talk to lenny");
        assert_eq!(result.outcome, Outcome::NoEffect);
        assert_eq!(result.text, "Lenny has nothing to say.");
    }

    #[test]
    fn named_exits_are_taken_verbatim() {
        let world = World::new(WorldMeta::new("Roads", "yard"))
            .with_location(
                Location::new("yard", "Yard")
                    .with_exit("inside", Exit::to("hut"))
                    .with_exit("n", Exit::to("field")),
            )
            .with_location(Location::new("hut", "Hut").with_exit("outside", Exit::to("yard")))
            .with_location(Location::new("field", "Field"));
        let mut session = GameSession::new(world, SessionConfig::default()).unwrap();
        assert_eq!(session.look().text, "Yard\nExits: inside, n");

        let inside = session.submit_command("go inside");
        assert_eq!(inside.outcome, Outcome::Success);
        assert_eq!(inside.location, "hut");
        assert_eq!(session.submit_command("go outside").location, "yard");

        let north = session.submit_command("north");
        assert_eq!(north.outcome, Outcome::Success);
        assert_eq!(north.location, "field");
    }

    fn parlour() -> World {
        let lenny = DialogNode::new("Lenny looks up.")
            .with_response(
                "gate",
                DialogNode::new("The gate.").with_response(
                    "secret",
                    DialogNode::new("Psst.").with_criteria(Criteria::new().requires("trusted")),
                ),
            )
            .with_response("name", DialogNode::new("Lenny."))
            .with_response(
                "take me along",
                DialogNode::new("Fine.")
                    .with_alias("up")
                    .with_effect(Effect::new().recruit("lenny")),
            );
        let guard = DialogNode::new("Halt.").with_criteria(Criteria::new().requires("trusted"));
        World::new(WorldMeta::new("Parlour", "parlour"))
            .with_flag("trusted")
            .with_item(Item::new("lenny", "Lenny").with_alias("lenny"))
            .with_item(Item::new("guard", "Guard").with_alias("guard"))
            .with_item(Item::new("parrot", "Parrot").with_alias("parrot"))
            .with_npc("lenny", Npc::new().with_dialog(lenny))
            .with_npc("guard", Npc::new().with_dialog(guard))
            .with_npc("parrot", Npc::new())
            .with_location(
                Location::new("parlour", "Parlour")
                    .with_item("lenny")
                    .with_item("guard")
                    .with_item("parrot"),
            )
            .with_interaction(
                Interaction::new("squawk", InteractionVerb::Talk, "parrot", "Pieces of eight!")
                    .once(),
            )
    }

    fn parlour_session() -> GameSession {
        GameSession::new(parlour(), SessionConfig::default()).unwrap()
    }

    #[test]
    fn conversation_ends_when_nothing_is_offered() {
        let mut session = parlour_session();
        session.submit_command("talk lenny");
        let gate = session.submit_command("talk lenny gate");
        assert_eq!(gate.text, "The gate.");
        assert_eq!(session.state().conversation("lenny"), None);

        let again = session.submit_command("talk lenny");
        assert_eq!(again.text, "Lenny looks up.\nTopics: gate, name, take me along");
        let name = session.submit_command("talk lenny name");
        assert_eq!(name.outcome, Outcome::Success);
        assert_eq!(name.text, "Lenny.");
    }

    #[test]
    fn replies_may_start_with_a_verb() {
        let mut session = parlour_session();
        session.submit_command("talk lenny");
        let along = session.submit_command("take me along");
        assert_eq!(along.outcome, Outcome::Success);
        assert_eq!(along.text, "Fine.");
        assert!(session.state().is_companion("lenny"));

        let mut session = parlour_session();
        session.submit_command("talk lenny");
        assert_eq!(session.submit_command("up").text, "Fine.");
        assert!(session.state().is_companion("lenny"));
    }

    #[test]
    fn companions_cannot_be_taken() {
        let mut session = parlour_session();
        session.submit_command("talk lenny take me along");
        assert!(session.state().is_companion("lenny"));
        let take = session.submit_command("take lenny");
        assert_eq!(take.outcome, Outcome::NotPossible);
        assert_eq!(take.text, "You can't take Lenny.");
        assert!(!session.state().has_item("lenny"));
    }

    #[test]
    fn talk_interaction_stands_in_for_dialog() {
        let mut session = parlour_session();
        let first = session.submit_command("talk to parrot");
        assert_eq!(first.outcome, Outcome::Success);
        assert_eq!(first.text, "Pieces of eight!");
        assert_eq!(session.state().uses("squawk"), 1);

        let second = session.submit_command("talk to parrot");
        assert_eq!(second.outcome, Outcome::NotPossible);
        assert_eq!(second.text, "You can't do that yet.");
        assert_eq!(session.state().uses("squawk"), 1);
    }

    #[test]
    fn root_criteria_can_refuse_a_conversation() {
        let mut session = parlour_session();
        let refused = session.submit_command("talk guard");
        assert_eq!(refused.outcome, Outcome::NotPossible);
        assert_eq!(refused.text, "Guard doesn't want to talk right now.");
        assert_eq!(session.state().conversation("guard"), None);
    }

    struct Shouty;

    impl Narrator for Shouty {
        fn translate(
            &mut self,
            raw: &str,
            _context: &NarrationContext,
        ) -> Result<Option<String>, NarrationError> {
            Ok((raw == "grab the light").then(|| "take lamp".to_string()))
        }

        fn narrate(&mut self, request: &NarrationRequest) -> Result<Option<String>, NarrationError> {
            Ok(Some(request.output.to_uppercase()))
        }
    }

    struct Broken;

    impl Narrator for Broken {
        fn translate(
            &mut self,
            _raw: &str,
            _context: &NarrationContext,
        ) -> Result<Option<String>, NarrationError> {
            Err(NarrationError::Backend("offline".into()))
        }

        fn narrate(&mut self, _request: &NarrationRequest) -> Result<Option<String>, NarrationError> {
            Err(NarrationError::Malformed("{".into()))
        }
    }

    #[test]
    fn narrator_translates_and_restyles() {
        let mut session = session().with_narrator(Shouty);
        let result = session.submit_command("grab the light");
        assert_eq!(result.text, "YOU TAKE THE BRASS LAMP.");
        assert!(session.state().has_item("lamp"));

        session.set_narration(false);
        assert_eq!(session.submit_command("drop lamp").text, "You drop the brass lamp.");
    }

    #[test]
    fn failing_narrator_falls_back() {
        let mut plain = session();
        let mut narrated = session().with_narrator(Broken);
        for input in ["look", "take lamp", "north", "dance"] {
            assert_eq!(plain.submit_command(input), narrated.submit_command(input));
        }
        assert_eq!(plain.state(), narrated.state());
    }
}
