//! Tag registry: the authoritative catalog of valid tags.
//!
//! The registry owns an ordered list of [`Tag`]s (the source of truth) and a
//! name → index map derived from it. Every method that changes the list
//! rebuilds the map before returning, so lookups are never served from a
//! stale index.
//!
//! There is no global instance. Construct one, then pass it by reference to
//! whatever needs to resolve parents or check validity.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TagError;
use crate::tag::{implied_parent, validate_name, Tag, NAME_SEPARATOR};

/// A `(name, parent)` pair as supplied by a taxonomy loader.
///
/// `parent` is empty for root tags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDef {
    pub name: String,
    #[serde(default)]
    pub parent: String,
}

impl TagDef {
    pub fn new(name: impl Into<String>, parent: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: parent.into(),
        }
    }

    pub fn root(name: impl Into<String>) -> Self {
        Self::new(name, "")
    }
}

impl From<&Tag> for TagDef {
    fn from(tag: &Tag) -> Self {
        Self::new(tag.name(), tag.parent_name())
    }
}

/// Registry of valid tags.
///
/// Provides:
/// - Name → tag lookup (`find`, `get`, `create`)
/// - Validity checks used by [`Tag::is_valid`]
/// - A mutation surface for taxonomy tooling (`register`, `remove`, `reload`)
///
/// Single-writer: the registry does no internal locking.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct TagRegistry {
    tags: Vec<Tag>,
    name_to_idx: HashMap<String, usize>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a flat list of definitions.
    ///
    /// Definition order is preserved; a parent may appear after its children.
    ///
    /// # Errors
    ///
    /// - Empty names or empty segments
    /// - A `parent` that is not the name minus its last segment
    /// - Duplicate names
    /// - A non-empty `parent` that is not itself defined
    pub fn from_defs(defs: &[TagDef]) -> Result<Self, TagError> {
        Self::validate_defs(defs)?;

        let tags = defs
            .iter()
            .map(|def| Tag::new(def.parent.as_str(), def.name.as_str()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut registry = Self {
            tags,
            name_to_idx: HashMap::new(),
        };
        registry.rebuild_index();
        Ok(registry)
    }

    /// Replace the whole taxonomy and rebuild the index.
    ///
    /// On error the registry is left unchanged.
    pub fn reload(&mut self, defs: &[TagDef]) -> Result<(), TagError> {
        let fresh = Self::from_defs(defs)?;
        *self = fresh;
        debug!(count = self.tags.len(), "reloaded tag registry");
        Ok(())
    }

    /// Recompute the name → index map from the tag list.
    pub fn rebuild_index(&mut self) {
        self.name_to_idx = self
            .tags
            .iter()
            .enumerate()
            .map(|(i, tag)| (tag.name().to_string(), i))
            .collect();
    }

    /// Name → tag, or the invalid tag if unknown.
    #[inline]
    pub fn find(&self, name: &str) -> Tag {
        self.get(name).cloned().unwrap_or_default()
    }

    /// Name → tag reference.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.name_to_idx.get(name).map(|&i| &self.tags[i])
    }

    /// Resolve a tag by scanning the list for an exact name.
    ///
    /// Same result as [`find`](Self::find) without going through the index.
    pub fn create(&self, name: &str) -> Tag {
        self.tags
            .iter()
            .find(|tag| tag.name() == name)
            .cloned()
            .unwrap_or_default()
    }

    /// Does the list hold a tag equal to `tag`? Always false for the invalid tag.
    #[inline]
    pub fn contains(&self, tag: &Tag) -> bool {
        !tag.name().is_empty() && self.name_to_idx.contains_key(tag.name())
    }

    #[inline]
    pub fn contains_name(&self, name: &str) -> bool {
        self.name_to_idx.contains_key(name)
    }

    /// All tags in list order.
    #[inline]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Export the list as `(name, parent)` pairs.
    pub fn defs(&self) -> Vec<TagDef> {
        self.tags.iter().map(TagDef::from).collect()
    }

    /// Direct children of `parent`.
    pub fn children_of<'a>(&'a self, parent: &'a Tag) -> impl Iterator<Item = &'a Tag> + 'a {
        self.tags
            .iter()
            .filter(move |tag| !parent.name().is_empty() && tag.parent_name() == parent.name())
    }

    /// Collect all registered descendants of `ancestor` (including itself).
    ///
    /// Iterates all entries.
    pub fn descendants_of(&self, ancestor: &Tag) -> Vec<&Tag> {
        if ancestor.name().is_empty() {
            return Vec::new();
        }
        self.tags.iter().filter(|tag| tag.matches(ancestor)).collect()
    }

    /// Register a tag at runtime.
    ///
    /// The name must be a dot-separated path with no empty segment
    /// (e.g., "Enemy.Flying.Boss"). Missing ancestors are created first, so
    /// the list never holds a dangling parent name.
    ///
    /// Registering an existing name is a no-op that returns the existing tag.
    pub fn register(&mut self, name: &str) -> Result<Tag, TagError> {
        validate_name(name)?;

        if let Some(existing) = self.get(name) {
            return Ok(existing.clone());
        }

        let sep = NAME_SEPARATOR.to_string();
        let segments: Vec<&str> = name.split(NAME_SEPARATOR).collect();
        let mut added = 0usize;
        for depth in 0..segments.len() {
            let path = segments[..=depth].join(&sep);
            if self.contains_name(&path) {
                continue;
            }
            let tag = Tag::new(segments[..depth].join(&sep), path.clone())?;
            self.name_to_idx.insert(path, self.tags.len());
            self.tags.push(tag);
            added += 1;
        }

        debug!(tag = name, added, "registered tag");
        Ok(self.find(name))
    }

    /// Remove a tag and, recursively, every tag whose parent it is.
    ///
    /// Returns the removed tags, descendants before their ancestors. Removing
    /// an invalid or unknown tag removes nothing.
    pub fn remove(&mut self, tag: &Tag) -> Vec<Tag> {
        let mut removed = Vec::new();
        if !tag.is_valid(self) {
            return removed;
        }

        self.remove_recursive(tag.name(), &mut removed);
        self.rebuild_index();

        debug!(tag = tag.name(), removed = removed.len(), "removed tag subtree");
        removed
    }

    fn remove_recursive(&mut self, name: &str, removed: &mut Vec<Tag>) {
        let children: Vec<String> = self
            .tags
            .iter()
            .filter(|tag| tag.parent_name() == name)
            .map(|tag| tag.name().to_string())
            .collect();

        for child in &children {
            self.remove_recursive(child, removed);
        }

        if let Some(pos) = self.tags.iter().position(|tag| tag.name() == name) {
            removed.push(self.tags.remove(pos));
        }
    }

    /// Order the list by name, as a taxonomy editor displays it.
    pub fn sort_by_name(&mut self) {
        self.tags.sort_by(|a, b| a.name().cmp(b.name()));
        self.rebuild_index();
    }

    fn validate_defs(defs: &[TagDef]) -> Result<(), TagError> {
        let mut names = HashSet::new();
        for def in defs {
            validate_name(&def.name)?;

            let expected = implied_parent(&def.name);
            if def.parent != expected {
                return Err(TagError::ParentMismatch {
                    name: def.name.clone(),
                    parent: def.parent.clone(),
                    expected: expected.to_string(),
                });
            }
            if !names.insert(def.name.as_str()) {
                return Err(TagError::DuplicateName(def.name.clone()));
            }
        }
        for def in defs {
            if !def.parent.is_empty() && !names.contains(def.parent.as_str()) {
                return Err(TagError::MissingParent {
                    name: def.name.clone(),
                    parent: def.parent.clone(),
                });
            }
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
