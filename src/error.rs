//! Errors raised while loading or editing a tag taxonomy.
//!
//! Lookups never fail: an unknown name resolves to the invalid [`Tag`](crate::Tag).
//! These errors only describe malformed taxonomy input.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("empty tag name is not allowed")]
    EmptyName,

    #[error("invalid tag name '{name}': empty segment")]
    EmptySegment { name: String },

    #[error("invalid tag name '{name}': segment '{segment}' has surrounding whitespace")]
    PaddedSegment { name: String, segment: String },

    #[error("tag '{name}' declares parent '{parent}', but its name implies parent '{expected}'")]
    ParentMismatch {
        name: String,
        parent: String,
        expected: String,
    },

    #[error("duplicate tag name: {0}")]
    DuplicateName(String),

    #[error("missing parent for '{name}': '{parent}'")]
    MissingParent { name: String, parent: String },

    #[error("taxonomy edits are disabled")]
    EditsDisabled,
}
