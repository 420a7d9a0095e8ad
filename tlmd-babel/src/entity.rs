//! Message entities: styling annotations over plain text.
//!
//! Offsets and lengths count UTF-16 code units, which is the platform's own
//! convention: a character outside the Basic Multilingual Plane (most emoji)
//! occupies two units. Entities are plain values and carry no reference to the
//! text they annotate.

use serde::{Deserialize, Serialize};

/// Prefix of the pseudo-url used to render user mentions as links.
pub const MENTION_URL_PREFIX: &str = "tg://user?id=";

/// A styling or link annotation anchored to a span of plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub offset: usize,
    pub length: usize,
    #[serde(flatten)]
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(kind: EntityKind, offset: usize, length: usize) -> Self {
        Entity {
            offset,
            length,
            kind,
        }
    }

    /// One past the last unit covered by this entity.
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.length)
    }

    pub fn bold(offset: usize, length: usize) -> Self {
        Self::new(EntityKind::Bold, offset, length)
    }

    pub fn italic(offset: usize, length: usize) -> Self {
        Self::new(EntityKind::Italic, offset, length)
    }

    pub fn strikethrough(offset: usize, length: usize) -> Self {
        Self::new(EntityKind::Strikethrough, offset, length)
    }

    pub fn code(offset: usize, length: usize) -> Self {
        Self::new(EntityKind::Code, offset, length)
    }

    pub fn pre(offset: usize, length: usize, language: impl Into<String>) -> Self {
        Self::new(
            EntityKind::Pre {
                language: language.into(),
            },
            offset,
            length,
        )
    }

    pub fn text_url(offset: usize, length: usize, url: impl Into<String>) -> Self {
        Self::new(EntityKind::TextUrl { url: url.into() }, offset, length)
    }

    pub fn mention_name(offset: usize, length: usize, user_id: i64) -> Self {
        Self::new(EntityKind::MentionName { user_id }, offset, length)
    }
}

/// The kind of an [`Entity`], with any kind-specific data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntityKind {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Spoiler,
    Code,
    Pre {
        #[serde(default)]
        language: String,
    },
    TextUrl {
        url: String,
    },
    MentionName {
        user_id: i64,
    },
}

impl EntityKind {
    /// The delimiter style of this kind, if it can be written with a marker.
    pub fn style(&self) -> Option<Style> {
        match self {
            EntityKind::Bold => Some(Style::Bold),
            EntityKind::Italic => Some(Style::Italic),
            EntityKind::Underline => Some(Style::Underline),
            EntityKind::Strikethrough => Some(Style::Strikethrough),
            EntityKind::Spoiler => Some(Style::Spoiler),
            EntityKind::Code => Some(Style::Code),
            EntityKind::Pre { .. } => Some(Style::Pre),
            EntityKind::TextUrl { .. } | EntityKind::MentionName { .. } => None,
        }
    }

    /// The url this kind renders to in `[label](url)` form.
    ///
    /// Mentions have no url of their own and use a `tg://user?id=` pseudo-url.
    /// A text url with an empty target yields `None`.
    pub fn link_url(&self) -> Option<String> {
        match self {
            EntityKind::TextUrl { url } if !url.is_empty() => Some(url.clone()),
            EntityKind::MentionName { user_id } => Some(format!("{MENTION_URL_PREFIX}{user_id}")),
            _ => None,
        }
    }
}

/// Entity kinds that a delimiter marker can stand for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Spoiler,
    Code,
    Pre,
}

impl Style {
    /// A fresh entity kind for this style. `Pre` starts with no language.
    pub fn to_kind(self) -> EntityKind {
        match self {
            Style::Bold => EntityKind::Bold,
            Style::Italic => EntityKind::Italic,
            Style::Underline => EntityKind::Underline,
            Style::Strikethrough => EntityKind::Strikethrough,
            Style::Spoiler => EntityKind::Spoiler,
            Style::Code => EntityKind::Code,
            Style::Pre => EntityKind::Pre {
                language: String::new(),
            },
        }
    }

    /// Verbatim styles are never scanned for further markers inside them.
    pub fn is_verbatim(self) -> bool {
        matches!(self, Style::Code | Style::Pre)
    }
}

/// Plain text together with the entities that annotate it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedMessage {
    pub text: String,
    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl From<(String, Vec<Entity>)> for ParsedMessage {
    fn from((text, entities): (String, Vec<Entity>)) -> Self {
        ParsedMessage { text, entities }
    }
}

impl From<ParsedMessage> for (String, Vec<Entity>) {
    fn from(message: ParsedMessage) -> Self {
        (message.text, message.entities)
    }
}
