use serde::{Deserialize, Serialize};

use crate::criteria::Criteria;

/// One alternative of a [`ResolvableText`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalText {
    /// The text shown when the criteria matches.
    pub text: String,
    /// Gate for this alternative; absent means always.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria: Option<Criteria>,
}

impl ConditionalText {
    /// An alternative that always applies.
    pub fn always(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            criteria: None,
        }
    }

    /// An alternative gated by `criteria`.
    pub fn when(criteria: Criteria, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            criteria: Some(criteria),
        }
    }
}

/// An ordered list of conditional text alternatives.
///
/// Entries are authored most-specific-first; the first entry whose criteria
/// matches wins. In a world file this may be written as a plain string, a
/// single `{ "text", "criteria" }` object, or a list of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TextSource", into = "Vec<ConditionalText>")]
pub struct ResolvableText {
    entries: Vec<ConditionalText>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextSource {
    Plain(String),
    Single(ConditionalText),
    List(Vec<ConditionalText>),
}

impl From<TextSource> for ResolvableText {
    fn from(source: TextSource) -> Self {
        match source {
            TextSource::Plain(text) => Self::plain(text),
            TextSource::Single(entry) => Self {
                entries: vec![entry],
            },
            TextSource::List(entries) => Self { entries },
        }
    }
}

impl From<ResolvableText> for Vec<ConditionalText> {
    fn from(text: ResolvableText) -> Self {
        text.entries
    }
}

impl From<&str> for ResolvableText {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

impl From<String> for ResolvableText {
    fn from(text: String) -> Self {
        Self::plain(text)
    }
}

impl ResolvableText {
    /// An empty sequence; resolves to no text.
    pub fn new() -> Self {
        Self::default()
    }

    /// A single unconditional alternative.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            entries: vec![ConditionalText::always(text)],
        }
    }

    /// Append an alternative gated by `criteria`.
    pub fn when(mut self, criteria: Criteria, text: impl Into<String>) -> Self {
        self.entries.push(ConditionalText::when(criteria, text));
        self
    }

    /// Append an unconditional fallback alternative.
    pub fn otherwise(mut self, text: impl Into<String>) -> Self {
        self.entries.push(ConditionalText::always(text));
        self
    }

    /// Build from alternatives in evaluation order.
    pub fn from_entries(entries: Vec<ConditionalText>) -> Self {
        Self { entries }
    }

    /// The alternatives in evaluation order.
    pub fn entries(&self) -> &[ConditionalText] {
        &self.entries
    }

    /// Whether there are no alternatives.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every criteria used by the alternatives.
    pub fn criteria(&self) -> impl Iterator<Item = &Criteria> {
        self.entries.iter().filter_map(|e| e.criteria.as_ref())
    }
}
