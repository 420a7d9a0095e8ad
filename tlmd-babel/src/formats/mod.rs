//! Format implementations
//!
//! This module contains the rich-text formats that convert between markup and
//! plain text with message entities.

pub mod markdown;

pub use markdown::MarkdownFormat;
