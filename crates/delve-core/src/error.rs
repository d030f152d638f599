use std::fmt;

/// Alias for `Result<T, WorldError>`.
pub type WorldResult<T> = Result<T, WorldError>;

/// The kind of object an id is expected to name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    /// An item (including NPCs).
    Item,
    /// A location.
    Location,
    /// An item that carries NPC metadata.
    Npc,
    /// A flag from the world's flag vocabulary.
    Flag,
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item => write!(f, "item"),
            Self::Location => write!(f, "location"),
            Self::Npc => write!(f, "npc"),
            Self::Flag => write!(f, "flag"),
        }
    }
}

/// Errors that can occur when loading or validating a world.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// An id does not name an existing object of the expected kind.
    #[error("invalid reference: {kind} \"{id}\" (referenced by {context})")]
    InvalidReference {
        /// What kind of object the id should name.
        kind: RefKind,
        /// The unresolved id.
        id: String,
        /// Where the reference was found.
        context: String,
    },

    /// Two interactions share the same id.
    #[error("duplicate interaction id: \"{0}\"")]
    DuplicateInteraction(String),

    /// The world failed validation; holds every problem found.
    #[error("world validation failed with {} problem(s)", .0.len())]
    Invalid(Vec<WorldError>),

    /// The world file could not be parsed.
    #[error("failed to parse world: {0}")]
    Parse(#[from] serde_json::Error),
}

impl WorldError {
    pub(crate) fn reference(kind: RefKind, id: &str, context: impl Into<String>) -> Self {
        Self::InvalidReference {
            kind,
            id: id.to_string(),
            context: context.into(),
        }
    }
}
