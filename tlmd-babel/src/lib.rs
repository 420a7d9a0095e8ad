//! Rich-text conversion for the tl messaging client
//!
//!     The platform sends rich text as plain text plus a list of entities: offset/length
//!     annotations marking bold spans, code, links and so on. This crate converts between that
//!     representation and the markup authors actually type.
//!
//!     This is a pure lib: no IO, no printing, no environment. The tlmd-cli crate is the shell
//!     around it.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── entity.rs               # Entity, EntityKind, Style, ParsedMessage
//!     ├── format.rs               # Format trait definition
//!     ├── utf16.rs                # UTF-16 expansion, surrogate checks, whitespace trimming
//!     ├── formats
//!     │   └── markdown
//!     │       ├── syntax.rs       # Delimiter table and link pattern
//!     │       ├── parser.rs       # markdown → (text, entities)
//!     │       ├── serializer.rs   # (text, entities) → markdown
//!     │       └── mod.rs
//!     └── lib.rs
//!
//! Offsets
//!
//!     The platform counts offsets in UTF-16 code units: an emoji outside the Basic Multilingual
//!     Plane is two units wide. Rust strings are UTF-8, so every conversion expands the text to
//!     UTF-16 first (utf16::encode), works on units, and collapses back at the end. Entity offsets
//!     and lengths are always in units, never in bytes or chars.
//!
//! Core Algorithms
//!
//!     Parsing is a single left-to-right scan. When a marker pair is found it is spliced out of the
//!     text and every entity recorded so far is shrunk to match the shorter text. There is no tree
//!     and no nesting: a pair closes at the next occurrence of the same marker.
//!
//!     Unparsing schedules an opening and closing insertion per entity, sorts them, and applies them
//!     back to front so earlier positions are never shifted. Insertions are never placed between
//!     the two halves of a surrogate pair.
//!
//! Configuration
//!
//!     The delimiter table distinguishes three cases: no table (built-in defaults), an empty table
//!     (markup handling disabled) and a custom table. Keep the distinction when adding options.
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     └── markdown
//!         ├── parse.rs
//!         ├── unparse.rs
//!         └── round_trip.rs
//!
pub mod entity;
pub mod error;
pub mod format;
pub mod formats;
pub mod utf16;

pub use entity::{Entity, EntityKind, ParsedMessage, Style};
pub use error::FormatError;
pub use format::Format;
pub use formats::markdown::{Delimiters, MarkdownFormat, UrlPattern};

/// Parse markdown with the built-in delimiter table and link pattern.
///
/// Returns the plain text and the entities found in it.
pub fn parse(message: &str) -> (String, Vec<Entity>) {
    formats::markdown::parser::parse_markdown(
        message,
        None,
        formats::markdown::default_url_pattern(),
    )
}

/// Render plain text and entities as markdown with the built-in delimiter table.
pub fn unparse(text: &str, entities: &[Entity]) -> String {
    formats::markdown::serializer::unparse_markdown(text, entities, None)
}
