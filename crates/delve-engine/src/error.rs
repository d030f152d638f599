//! Error types for the rule engine.

use delve_core::WorldError;
use thiserror::Error;

use crate::parser::Verb;

/// Result type for engine setup.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that prevent a session from starting.
///
/// Nothing a player types produces one of these; player mistakes are
/// rendered as ordinary output.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The world failed validation.
    #[error(transparent)]
    World(#[from] WorldError),
}

/// Why a line of input could not be turned into a command.
///
/// The `Display` text is what the player sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Blank input.
    #[error("I beg your pardon?")]
    Empty,

    /// Input longer than the session allows.
    #[error("That's too much for me to follow.")]
    TooLong,

    /// The first word is not a known verb.
    #[error("I don't understand \"{0}\".")]
    UnknownVerb(String),

    /// A verb that needs an object was given none.
    #[error("{}", .verb.missing_object_prompt())]
    MissingObject {
        /// The verb that was used.
        verb: Verb,
    },

    /// A preposition was given with nothing after it.
    #[error("{} the {object} {preposition} what?", .verb.title())]
    MissingTarget {
        /// The verb that was used.
        verb: Verb,
        /// The object phrase as typed.
        object: String,
        /// The preposition as typed.
        preposition: String,
    },

    /// No item anywhere in the world answers to the phrase.
    #[error("You don't see any {0} here.")]
    UnresolvedNoun(String),

    /// More than one equally good item answers to the phrase.
    #[error("Which {0}?")]
    Ambiguous(String),
}

/// The first clause of a criteria that did not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CriteriaFailure {
    /// A required flag is unset.
    #[error("flag \"{0}\" is not set")]
    MissingFlag(String),
    /// A blocking flag is set.
    #[error("flag \"{0}\" is set")]
    BlockingFlag(String),
    /// A required item is not carried.
    #[error("item \"{0}\" is not carried")]
    MissingItem(String),
    /// A required companion is absent.
    #[error("\"{0}\" is not a companion")]
    MissingCompanion(String),
}

/// Failure reported by a narration hook.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NarrationError {
    /// The backend could not be reached or returned an error.
    #[error("narration backend failed: {0}")]
    Backend(String),
    /// The backend replied with something unusable.
    #[error("malformed narration reply: {0}")]
    Malformed(String),
}
