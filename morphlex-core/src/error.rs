//! The error taxonomy for a morph call.

use core::fmt;

/// Everything that can abort a morph call.
///
/// Both variants propagate to the caller of the entry point; there is no
/// partial-progress rollback. Veto callbacks returning `false` are not
/// errors — they silently skip the affected mutation.
///
/// There is no variant for a failing host tree primitive: every mutating
/// [`crate::Tree`] method (`insert_before`, `move_before`, `remove`,
/// `set_attribute`, `remove_attribute`, `set_property`, `set_text_value`)
/// returns `()`, not `Result`, so this crate has nothing to propagate a
/// host-primitive failure through. See `DESIGN.md`'s Open Question
/// resolutions for why the trait stays infallible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MorphError {
    /// The string-to-fragment parser produced no usable root, or more than
    /// one where exactly one was required. Only surfaced from the entry
    /// points that accept a string reference.
    ParseError(String),

    /// `morph_inner` was invoked with arguments that are not a matching
    /// element pair (same local name), or a reference string that parsed to
    /// anything other than a single element.
    InvalidInnerMorph {
        /// The current side's local name, or `"<non-element>"`.
        from: String,
        /// The reference side's local name, or `"<non-element>"`.
        to: String,
    },
}

impl fmt::Display for MorphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MorphError::ParseError(msg) => write!(f, "failed to parse reference markup: {msg}"),
            MorphError::InvalidInnerMorph { from, to } => write!(
                f,
                "morph_inner requires a matching element pair, got `{from}` and `{to}`"
            ),
        }
    }
}

impl std::error::Error for MorphError {}
