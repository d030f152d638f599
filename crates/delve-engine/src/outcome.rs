//! What a turn produces for the front end.

use serde::Serialize;

/// How a turn went, independent of its wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The command ran and may have changed state.
    Success,
    /// The input could not be parsed.
    NotUnderstood,
    /// The command named something that isn't here.
    NotFound,
    /// The command is understood but currently disallowed.
    NotPossible,
    /// Nothing is defined for this combination.
    NoEffect,
}

impl Outcome {
    /// Whether the turn succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// What kind of thing an [`ImageRef`] points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageKind {
    /// A location.
    Location,
    /// A portable item.
    Item,
    /// An NPC.
    Npc,
}

/// A hint that the front end may want to show a picture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    /// What the id refers to.
    pub kind: ImageKind,
    /// Location or item id.
    pub id: String,
}

impl ImageRef {
    /// Image of a location.
    pub fn location(id: impl Into<String>) -> Self {
        Self {
            kind: ImageKind::Location,
            id: id.into(),
        }
    }

    /// Image of an item.
    pub fn item(id: impl Into<String>) -> Self {
        Self {
            kind: ImageKind::Item,
            id: id.into(),
        }
    }

    /// Image of an NPC.
    pub fn npc(id: impl Into<String>) -> Self {
        Self {
            kind: ImageKind::Npc,
            id: id.into(),
        }
    }
}

/// The result of one submitted command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedResult {
    /// Text to show the player.
    pub text: String,
    /// Location id after the turn.
    pub location: String,
    /// Classification of the turn.
    pub outcome: Outcome,
    /// Whether the player moved this turn.
    pub location_changed: bool,
    /// Picture worth showing, if any.
    pub image: Option<ImageRef>,
    /// Whether the world's ending flag is set.
    pub game_over: bool,
}

/// Handler output before the session adds location and ending details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Reply {
    pub text: String,
    pub outcome: Outcome,
    pub image: Option<ImageRef>,
}

impl Reply {
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(Outcome::Success, text)
    }

    pub fn not_found(text: impl Into<String>) -> Self {
        Self::new(Outcome::NotFound, text)
    }

    pub fn not_possible(text: impl Into<String>) -> Self {
        Self::new(Outcome::NotPossible, text)
    }

    pub fn no_effect(text: impl Into<String>) -> Self {
        Self::new(Outcome::NoEffect, text)
    }

    pub fn not_understood(text: impl Into<String>) -> Self {
        Self::new(Outcome::NotUnderstood, text)
    }

    fn new(outcome: Outcome, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            outcome,
            image: None,
        }
    }

    pub fn with_image(mut self, image: ImageRef) -> Self {
        self.image = Some(image);
        self
    }
}
