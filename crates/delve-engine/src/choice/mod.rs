//! Rule evaluation: criteria, conditional text, effects, and dialog traversal.
//!
//! Everything here reads the world and game state; only [`apply_effect`]
//! writes, and only the session calls it.

mod criteria;
mod dialogue;
mod effect;
mod text;

pub use criteria::{check, matches};
pub use dialogue::{offered_responses, render_hints, render_node, select_response};
pub use effect::apply_effect;
pub use text::{resolve, resolve_or};
