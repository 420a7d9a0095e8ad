//! Markdown format implementation
//!
//! This module implements the restricted markdown dialect used to author
//! messages: inline markers from a delimiter table plus `[label](url)` links.
//!
//! # Element Mapping Table
//!
//! | Entity          | Default markup        | Parse                      | Unparse                        |
//! |-----------------|-----------------------|----------------------------|--------------------------------|
//! | Bold            | `**text**`            | yes                        | yes                            |
//! | Italic          | `__text__`            | yes                        | yes                            |
//! | Strikethrough   | `~~text~~`            | yes                        | yes                            |
//! | Code            | `` `text` ``          | yes, content not scanned   | yes                            |
//! | Pre             | ```` ```text``` ````  | yes, language left empty   | yes, language dropped          |
//! | Underline       | (none)                | only with a custom marker  | only with a custom marker      |
//! | Spoiler         | (none)                | only with a custom marker  | only with a custom marker      |
//! | TextUrl         | `[label](url)`        | yes                        | yes                            |
//! | MentionName     | `[label](tg://user?id=N)` | no (parses as TextUrl) | yes                            |
//!
//! # Offsets
//!
//! Entities are measured in UTF-16 code units. Both directions work on the
//! UTF-16 form of the text, see [`crate::utf16`].
//!
//! # Limits
//!
//! - No nesting: a pair is closed by the next occurrence of the same marker.
//!   Markers of different kinds may still enclose each other as long as they
//!   close in the reverse order they opened.
//! - A marker immediately followed by its closer (`****`) is literal text.
//! - Leading and trailing whitespace is trimmed from parsed text.
//! - Round trips are semantic: `parse(unparse(parse(x))) == parse(x)`, while
//!   the markup itself may differ from the original.

pub mod parser;
pub mod serializer;
pub mod syntax;

pub use syntax::{default_delimiters, default_url_pattern, Delimiter, Delimiters, UrlPattern};

use crate::entity::Entity;
use crate::format::Format;

/// Format implementation for markdown
///
/// Holds the delimiter table and link pattern. With no table configured, the
/// built-in one is used; [`MarkdownFormat::without_delimiters`] installs an
/// empty table, which turns parsing and unparsing into no-ops.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkdownFormat {
    delimiters: Option<Delimiters>,
    url_pattern: UrlPattern,
}

impl MarkdownFormat {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `delimiters` instead of the built-in table.
    pub fn with_delimiters(mut self, delimiters: Delimiters) -> Self {
        self.delimiters = Some(delimiters);
        self
    }

    /// Disable delimiter handling.
    pub fn without_delimiters(self) -> Self {
        self.with_delimiters(Delimiters::empty())
    }

    pub fn with_url_pattern(mut self, url_pattern: UrlPattern) -> Self {
        self.url_pattern = url_pattern;
        self
    }

    /// The configured table, `None` when the built-in one applies.
    pub fn delimiters(&self) -> Option<&Delimiters> {
        self.delimiters.as_ref()
    }

    pub fn url_pattern(&self) -> &UrlPattern {
        &self.url_pattern
    }
}

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn parse(&self, message: &str) -> (String, Vec<Entity>) {
        parser::parse_markdown(message, self.delimiters.as_ref(), &self.url_pattern)
    }

    fn unparse(&self, text: &str, entities: &[Entity]) -> String {
        serializer::unparse_markdown(text, entities, self.delimiters.as_ref())
    }
}
