//! Deterministic rule engine for Delve text adventures.
//!
//! Turns a line of player input into a [`RenderedResult`] by parsing it
//! against a [`delve_core::World`], evaluating criteria, applying
//! interaction and dialog effects to a [`GameState`], and rendering text.
//! The same world and the same inputs always produce the same output.
//! An optional [`Narrator`] may rewrite input and restyle output but never
//! touches state.

/// Criteria, conditional text, effects, and dialog traversal.
pub mod choice;
/// Session configuration.
pub mod config;
/// Error types for the engine.
pub mod error;
/// Boundary to an optional narration layer.
pub mod narrator;
/// What a turn produces.
pub mod outcome;
/// Command parsing and noun resolution.
pub mod parser;
/// The play session and command dispatcher.
pub mod session;
/// Mutable game state.
pub mod state;

pub use config::SessionConfig;
pub use error::{CriteriaFailure, EngineError, EngineResult, NarrationError, ParseError};
pub use narrator::{NarrationContext, NarrationRequest, Narrator};
pub use outcome::{ImageKind, ImageRef, Outcome, RenderedResult};
pub use parser::{Command, Direction, Verb, parse_command};
pub use session::GameSession;
pub use state::GameState;
