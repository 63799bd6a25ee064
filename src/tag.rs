//! Tag: an immutable hierarchical identifier such as `Enemy.Flying.Boss`.
//!
//! A `Tag` stores its own name and the name of its direct parent. The parent
//! is resolved lazily through an explicit [`TagRegistry`], never through
//! global state:
//!
//! ```text
//! Enemy                parent = ""
//! Enemy.Flying         parent = "Enemy"
//! Enemy.Flying.Boss    parent = "Enemy.Flying"
//! ```
//!
//! ## Matching
//!
//! [`Tag::matches`] is asymmetric: `a.matches(b)` holds when `a` is the same
//! as, or more specific than, `b`, comparing dot-separated segments left to
//! right (never substrings, so `Enemy.Fly` does not match `Enemy.Flying`).
//!
//! ## Empty names
//!
//! The empty-named tag is the invalid sentinel. Two invalid tags are never
//! equal (`==` and [`Tag::matches_exact`] return `false`), yet
//! `Tag::invalid().matches(&Tag::invalid())` returns `true` because both split
//! into the single segment `""`. Guard with [`Tag::is_valid`] when that
//! matters.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::container::TagContainer;
use crate::error::TagError;
use crate::registry::TagRegistry;

/// Separator between hierarchy levels in a tag name.
pub const NAME_SEPARATOR: char = '.';

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    name: String,
    #[serde(default)]
    parent_name: String,
}

impl Tag {
    /// The invalid (empty) tag. Same as `Tag::default()`.
    #[inline]
    pub fn invalid() -> Self {
        Self::default()
    }

    /// Build an unregistered tag whose parent name is derived from `name`.
    ///
    /// No validation is performed; use this for transient query tags.
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        let parent_name = implied_parent(&name).to_string();
        Self { name, parent_name }
    }

    /// Build a tag from an explicit `(parent, name)` pair.
    ///
    /// # Errors
    ///
    /// - [`TagError::EmptyName`] / [`TagError::EmptySegment`] for malformed names
    /// - [`TagError::ParentMismatch`] if `parent_name` is not `name` minus its last segment
    pub fn new(parent_name: impl Into<String>, name: impl Into<String>) -> Result<Self, TagError> {
        let name = name.into();
        let parent_name = parent_name.into();
        validate_name(&name)?;

        let expected = implied_parent(&name);
        if parent_name != expected {
            return Err(TagError::ParentMismatch {
                expected: expected.to_string(),
                name,
                parent: parent_name,
            });
        }
        Ok(Self { name, parent_name })
    }

    /// Full dot-separated name; empty for the invalid tag.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the direct parent; empty for root tags.
    #[inline]
    pub fn parent_name(&self) -> &str {
        &self.parent_name
    }

    /// Split the name on `.`. The empty name yields one empty segment.
    #[inline]
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.name.split(NAME_SEPARATOR)
    }

    /// Tree depth (0 = root).
    pub fn depth(&self) -> usize {
        self.segments().count() - 1
    }

    /// Resolve the parent through `registry`.
    ///
    /// Returns the invalid tag for root tags and for unregistered parents.
    pub fn parent(&self, registry: &TagRegistry) -> Tag {
        if self.parent_name.is_empty() {
            return Tag::invalid();
        }
        registry.find(&self.parent_name)
    }

    /// True if the name is non-empty and `registry` currently lists this tag.
    ///
    /// A well-formed tag becomes invalid once it is removed from the registry.
    pub fn is_valid(&self, registry: &TagRegistry) -> bool {
        !self.name.is_empty() && registry.contains(self)
    }

    /// Is `self` the same as, or a descendant of, `other`?
    ///
    /// ```text
    /// Enemy.Flying .matches(Enemy)        → true
    /// Enemy        .matches(Enemy.Flying) → false
    /// Enemy.Flyer  .matches(Enemy.Fly)    → false
    /// ```
    pub fn matches(&self, other: &Tag) -> bool {
        let mut mine = self.segments();
        other.segments().all(|seg| mine.next() == Some(seg))
    }

    /// Both names non-empty and identical.
    #[inline]
    pub fn matches_exact(&self, other: &Tag) -> bool {
        !self.name.is_empty() && self.name == other.name
    }

    pub fn matches_any(&self, others: &TagContainer) -> bool {
        others.iter().any(|tag| self.matches(tag))
    }

    /// Vacuously true for an empty container.
    pub fn matches_all(&self, others: &TagContainer) -> bool {
        others.iter().all(|tag| self.matches(tag))
    }

    pub fn matches_any_exact(&self, others: &TagContainer) -> bool {
        others.iter().any(|tag| self.matches_exact(tag))
    }

    pub fn matches_all_exact(&self, others: &TagContainer) -> bool {
        others.iter().all(|tag| self.matches_exact(tag))
    }
}

/// Equal iff both names are non-empty and identical; the parent is ignored.
impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.matches_exact(other)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// "A.B.C" → "A.B", "A" → "".
pub(crate) fn implied_parent(name: &str) -> &str {
    name.rsplit_once(NAME_SEPARATOR)
        .map(|(parent, _)| parent)
        .unwrap_or("")
}

/// Check that `name` is a well-formed tag path.
///
/// Segments must be non-empty and carry no leading or trailing whitespace;
/// inner whitespace (`Enemy.Big Boss`) is allowed.
pub fn validate_name(name: &str) -> Result<(), TagError> {
    if name.is_empty() {
        return Err(TagError::EmptyName);
    }
    for segment in name.split(NAME_SEPARATOR) {
        if segment.is_empty() {
            return Err(TagError::EmptySegment {
                name: name.to_string(),
            });
        }
        if segment.trim() != segment {
            return Err(TagError::PaddedSegment {
                name: name.to_string(),
                segment: segment.to_string(),
            });
        }
    }
    Ok(())
}
