//! World model for the Delve text-adventure engine.
//!
//! A [`World`] is the immutable description of a game: items (some of which
//! carry NPC metadata), locations joined by exits, interactions keyed on a verb
//! and the items involved, dialog trees, and the flag vocabulary. It is loaded
//! once, validated, and then only read by the engine. Everything that changes
//! during play lives in the engine's game state instead.
//!
//! Worlds can be built programmatically with the `with_*` builders or
//! deserialized from JSON via [`World::from_json`].

/// Gating predicates and state-changing effects.
pub mod criteria;
/// Dialog trees attached to NPCs.
pub mod dialog;
/// Error types for world loading and validation.
pub mod error;
/// Interactions triggered by verbs such as `use` or `open`.
pub mod interaction;
/// Items and the NPC attachment.
pub mod item;
/// Locations and exits.
pub mod location;
/// Conditional text resolved against game state.
pub mod text;
/// The world aggregate and its validation.
pub mod world;

/// Re-export gating and effect types.
pub use criteria::{COMPANION_PREFIX, Criteria, Effect, companion_flag, companion_id};
/// Re-export dialog types.
pub use dialog::DialogNode;
/// Re-export error types.
pub use error::{RefKind, WorldError, WorldResult};
/// Re-export interaction types.
pub use interaction::{Interaction, InteractionVerb};
/// Re-export item types.
pub use item::{Item, Npc};
/// Re-export location types.
pub use location::{Exit, Location};
/// Re-export text types.
pub use text::{ConditionalText, ResolvableText};
/// Re-export world types.
pub use world::{World, WorldMeta};
