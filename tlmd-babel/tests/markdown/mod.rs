//! Markdown format tests
//!
//! Tests for markdown ↔ (text, entities) conversion.

mod parse;
mod round_trip;
