//! Boundary to an optional narration layer.
//!
//! A narrator may rewrite free text into a canonical command before parsing
//! and restyle the engine's text afterwards. It is best-effort: any error,
//! `None`, or blank reply leaves the engine's own text in place, and state
//! and outcome are never affected.

use crate::error::NarrationError;
use crate::outcome::Outcome;

/// What the narrator may know about the player's surroundings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NarrationContext {
    /// Current location id.
    pub location_id: String,
    /// Current location name.
    pub location_name: String,
    /// Names of items lying here.
    pub visible_items: Vec<String>,
    /// Names of carried items.
    pub inventory: Vec<String>,
}

/// A finished turn offered to the narrator for restyling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrationRequest {
    /// The canonical command, or the raw input if it was not understood.
    pub command: String,
    /// The engine's text.
    pub output: String,
    /// How the turn went.
    pub outcome: Outcome,
    /// Surroundings after the turn.
    pub context: NarrationContext,
}

/// An optional narration layer.
pub trait Narrator {
    /// Translate free text into a canonical command.
    ///
    /// `Ok(None)` keeps the raw input.
    fn translate(
        &mut self,
        raw: &str,
        context: &NarrationContext,
    ) -> Result<Option<String>, NarrationError>;

    /// Restyle the engine's output for a finished turn.
    ///
    /// `Ok(None)` keeps the engine's text.
    fn narrate(&mut self, request: &NarrationRequest) -> Result<Option<String>, NarrationError>;
}

/// Keep a reply only if it has visible content.
pub(crate) fn usable(reply: Result<Option<String>, NarrationError>) -> Option<String> {
    match reply {
        Ok(Some(text)) if !text.trim().is_empty() => Some(text),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!(error = %e, "narrator failed, using engine text");
            None
        }
    }
}
