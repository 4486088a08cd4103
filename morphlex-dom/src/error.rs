//! Parse errors for the HTML5 fragment parser.

use core::fmt;

/// An error produced while parsing a markup string into a [`crate::DomNode`]
/// fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomParseError {
    /// The HTML5 tokenizer reported an error.
    Tokenizer(String),
}

impl fmt::Display for DomParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomParseError::Tokenizer(msg) => write!(f, "HTML tokenizer error: {msg}"),
        }
    }
}

impl std::error::Error for DomParseError {}
