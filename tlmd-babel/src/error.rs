//! Error types for format configuration

use std::fmt;

/// Errors that can occur while building a format
///
/// Parsing and unparsing themselves never fail: malformed markup degrades to
/// literal text. Only the knobs handed to a format can be rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// A delimiter marker that can never match (e.g. the empty string)
    InvalidDelimiter(String),
    /// A link pattern that does not compile or lacks the label/url groups
    InvalidUrlPattern(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::InvalidDelimiter(msg) => write!(f, "Invalid delimiter: {msg}"),
            FormatError::InvalidUrlPattern(msg) => write!(f, "Invalid url pattern: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}
