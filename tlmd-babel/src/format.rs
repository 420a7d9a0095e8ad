//! Format trait definition
//!
//! This module defines the core Format trait that all rich-text formats implement.
//! A format converts between its own markup and the platform's representation of
//! rich text: plain text plus a list of [`Entity`] annotations.

use crate::entity::Entity;

/// Trait for rich-text formats
///
/// Implementors provide bidirectional conversion between markup and
/// `(text, entities)`. Neither direction can fail: malformed markup is kept
/// as literal text, and inconsistent entities produce best-effort output.
///
/// # Examples
///
/// ```ignore
/// struct Shout;
///
/// impl Format for Shout {
///     fn name(&self) -> &str {
///         "shout"
///     }
///
///     fn parse(&self, message: &str) -> (String, Vec<Entity>) {
///         (message.to_uppercase(), vec![])
///     }
///
///     fn unparse(&self, text: &str, _entities: &[Entity]) -> String {
///         text.to_lowercase()
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "markdown")
    fn name(&self) -> &str;

    /// Parse markup into plain text and the entities annotating it.
    fn parse(&self, message: &str) -> (String, Vec<Entity>);

    /// Render plain text and its entities back into markup.
    fn unparse(&self, text: &str, entities: &[Entity]) -> String;
}
