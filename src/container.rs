//! Tag containers: normalized sets of tags with hierarchical queries.
//!
//! Insertion never leaves two tags where one matches the other; it keeps the
//! most specific entry. Removal re-adds the parent even when a sibling still
//! implies it:
//!
//! ```text
//! {Enemy}                      + Enemy.Flying → {Enemy.Flying}
//! {Enemy.Flying}               + Enemy        → {Enemy.Flying}
//! {Enemy.Flying}               - Enemy.Flying → {Enemy}
//! {Enemy.Flying, Enemy.Ground} - Enemy.Flying → {Enemy.Ground, Enemy}
//! ```
//!
//! `has_tag(Enemy)` is true for `{Enemy.Flying}`: a stored tag satisfies any
//! query for one of its ancestors.

use serde::{Deserialize, Serialize};

use crate::registry::TagRegistry;
use crate::tag::Tag;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Component))]
pub struct TagContainer {
    tags: Vec<Tag>,
}

impl TagContainer {
    /// Create an empty tag container.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy `source`'s tags; `None` yields an empty container.
    pub fn copy_from(source: Option<&TagContainer>) -> Self {
        source.cloned().unwrap_or_default()
    }

    /// Union of several containers, first acceptance wins.
    ///
    /// Sources are visited in order, then each source's tags in order. A
    /// candidate is skipped if an already accepted tag matches it; otherwise
    /// every accepted tag the candidate matches is dropped and the candidate is
    /// accepted.
    ///
    /// This runs against its own accepted list rather than through
    /// [`add_tag`](Self::add_tag). With the current match rules the result
    /// equals appending each source in turn to an empty container.
    pub fn merged<'a, I>(sources: I) -> Self
    where
        I: IntoIterator<Item = &'a TagContainer>,
    {
        let mut accepted: Vec<Tag> = Vec::new();
        for source in sources {
            for candidate in &source.tags {
                if accepted.iter().any(|tag| tag.matches(candidate)) {
                    continue;
                }
                accepted.retain(|tag| !candidate.matches(tag));
                accepted.push(candidate.clone());
            }
        }
        Self { tags: accepted }
    }

    /// Resolve each name through `registry` and add the valid ones.
    ///
    /// Unknown names are skipped silently.
    pub fn create<I, S>(registry: &TagRegistry, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut container = Self::new();
        for name in names {
            let tag = registry.find(name.as_ref());
            if tag.is_valid(registry) {
                container.add_tag(tag);
            }
        }
        container
    }

    /// Add a tag, keeping the container normalized.
    ///
    /// No-op if [`has_tag`](Self::has_tag) already holds. Otherwise every
    /// stored tag that `tag` matches (its ancestors and itself) is removed
    /// before `tag` is appended.
    ///
    /// Returns `true` if the container changed.
    pub fn add_tag(&mut self, tag: Tag) -> bool {
        if self.has_tag(&tag) {
            return false;
        }
        self.tags.retain(|item| !tag.matches(item));
        self.tags.push(tag);
        true
    }

    /// Remove every stored tag that matches `tag` (`tag` and its descendants).
    ///
    /// If anything was removed and `tag` has a valid parent in `registry`, the
    /// parent is added back, so removing `Enemy.Flying` from `{Enemy.Flying}`
    /// leaves `{Enemy}`. The parent is appended even when a remaining sibling
    /// already implies it (`{Enemy.Flying, Enemy.Ground}` becomes
    /// `{Enemy.Ground, Enemy}`); only an exact duplicate is skipped.
    ///
    /// Returns `false`, leaving the container unchanged, if nothing matched.
    pub fn remove_tag(&mut self, registry: &TagRegistry, tag: &Tag) -> bool {
        let before = self.tags.len();
        self.tags.retain(|item| !item.matches(tag));
        if self.tags.len() == before {
            return false;
        }

        let parent = tag.parent(registry);
        if parent.is_valid(registry) && !self.has_tag_exact(&parent) {
            self.tags.push(parent);
        }
        true
    }

    /// [`add_tag`](Self::add_tag) for each tag of `other`, in order.
    pub fn append(&mut self, other: &TagContainer) {
        for tag in &other.tags {
            self.add_tag(tag.clone());
        }
    }

    /// [`remove_tag`](Self::remove_tag) for each tag of `other`, in order.
    pub fn remove_tags(&mut self, registry: &TagRegistry, other: &TagContainer) {
        for tag in &other.tags {
            self.remove_tag(registry, tag);
        }
    }

    /// Does any stored tag match `tag` (equal to it or more specific)?
    #[inline]
    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.iter().any(|item| item.matches(tag))
    }

    #[inline]
    pub fn has_tag_exact(&self, tag: &Tag) -> bool {
        self.tags.iter().any(|item| item.matches_exact(tag))
    }

    pub fn has_any(&self, other: &TagContainer) -> bool {
        other.tags.iter().any(|tag| self.has_tag(tag))
    }

    /// True when `other` is empty.
    pub fn has_all(&self, other: &TagContainer) -> bool {
        other.tags.iter().all(|tag| self.has_tag(tag))
    }

    pub fn has_any_exact(&self, other: &TagContainer) -> bool {
        other.tags.iter().any(|tag| self.has_tag_exact(tag))
    }

    pub fn has_all_exact(&self, other: &TagContainer) -> bool {
        other.tags.iter().all(|tag| self.has_tag_exact(tag))
    }

    /// Stored tags in insertion order.
    #[inline]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.tags.iter()
    }

    /// Tag names, the plain-string form used for serialization.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(Tag::name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.tags.clear();
    }
}

impl<'a> IntoIterator for &'a TagContainer {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

/// Collects through [`TagContainer::add_tag`], so the result is normalized.
impl FromIterator<Tag> for TagContainer {
    fn from_iter<T: IntoIterator<Item = Tag>>(iter: T) -> Self {
        let mut container = Self::new();
        container.extend(iter);
        container
    }
}

impl Extend<Tag> for TagContainer {
    fn extend<T: IntoIterator<Item = Tag>>(&mut self, iter: T) {
        for tag in iter {
            self.add_tag(tag);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TagDef;

    fn registry() -> TagRegistry {
        TagRegistry::from_defs(&[
            TagDef::root("Enemy"),
            TagDef::new("Enemy.Flying", "Enemy"),
            TagDef::new("Enemy.Flying.Boss", "Enemy.Flying"),
            TagDef::new("Enemy.Ground", "Enemy"),
            TagDef::root("X"),
            TagDef::new("X.Y", "X"),
        ])
        .unwrap()
    }

    fn tag(name: &str) -> Tag {
        Tag::from_name(name)
    }

    fn names(container: &TagContainer) -> Vec<&str> {
        container.names().collect()
    }

    #[test]
    fn add_same_tag_twice_keeps_one() {
        let mut c = TagContainer::new();
        assert!(c.add_tag(tag("Enemy")));
        assert!(!c.add_tag(tag("Enemy")));

        assert_eq!(c.len(), 1);
        assert!(c.has_tag_exact(&tag("Enemy")));
    }

    #[test]
    fn add_specific_replaces_ancestor() {
        let mut c = TagContainer::new();
        c.add_tag(tag("Enemy"));
        c.add_tag(tag("Enemy.Flying"));

        assert_eq!(names(&c), vec!["Enemy.Flying"]);
    }

    #[test]
    fn add_ancestor_of_stored_tag_is_noop() {
        let mut c = TagContainer::new();
        c.add_tag(tag("Enemy.Flying"));

        assert!(!c.add_tag(tag("Enemy")));
        assert_eq!(names(&c), vec!["Enemy.Flying"]);
        assert!(c.has_tag(&tag("Enemy")));
        assert!(!c.has_tag_exact(&tag("Enemy")));
    }

    #[test]
    fn add_replaces_every_ancestor_in_one_pass() {
        // Unnormalized input through serde
        let mut c: TagContainer = serde_json::from_str(
            r#"{"tags":[{"name":"Enemy"},{"name":"Enemy.Flying"},{"name":"X"}]}"#,
        )
        .unwrap();

        c.add_tag(tag("Enemy.Flying.Boss"));
        assert_eq!(names(&c), vec!["X", "Enemy.Flying.Boss"]);
    }

    #[test]
    fn siblings_coexist() {
        let c: TagContainer = [tag("Enemy.Flying"), tag("Enemy.Ground")].into_iter().collect();
        assert_eq!(names(&c), vec!["Enemy.Flying", "Enemy.Ground"]);
    }

    #[test]
    fn remove_readds_parent() {
        let reg = registry();
        let mut c = TagContainer::create(&reg, ["Enemy.Flying"]);

        assert!(c.remove_tag(&reg, &tag("Enemy.Flying")));
        assert_eq!(names(&c), vec!["Enemy"]);
    }

    #[test]
    fn remove_takes_descendants() {
        let reg = registry();
        let mut c = TagContainer::create(&reg, ["Enemy.Flying.Boss", "X.Y"]);

        assert!(c.remove_tag(&reg, &tag("Enemy.Flying")));
        assert_eq!(names(&c), vec!["X.Y", "Enemy"]);
    }

    #[test]
    fn remove_root_adds_nothing_back() {
        let reg = registry();
        let mut c = TagContainer::create(&reg, ["Enemy.Flying", "Enemy.Ground"]);

        assert!(c.remove_tag(&reg, &tag("Enemy")));
        assert!(c.is_empty());
    }

    #[test]
    fn remove_restores_parent_next_to_sibling() {
        let reg = registry();
        let mut c = TagContainer::create(&reg, ["Enemy.Flying", "Enemy.Ground"]);

        assert!(c.remove_tag(&reg, &tag("Enemy.Flying")));
        assert_eq!(names(&c), vec!["Enemy.Ground", "Enemy"]);
        assert!(c.has_tag_exact(&tag("Enemy")));
    }

    #[test]
    fn remove_never_duplicates_parent() {
        let reg = registry();
        let mut c = TagContainer::create(&reg, ["Enemy.Flying", "Enemy.Ground"]);

        assert!(c.remove_tag(&reg, &tag("Enemy.Flying")));
        assert!(c.remove_tag(&reg, &tag("Enemy.Ground")));
        // Enemy is already stored, so it is not appended a second time
        assert_eq!(names(&c), vec!["Enemy"]);
    }

    #[test]
    fn remove_missing_returns_false() {
        let reg = registry();
        let mut c = TagContainer::create(&reg, ["Enemy"]);
        let before = c.clone();

        // Stored Enemy does not match the more specific query
        assert!(!c.remove_tag(&reg, &tag("Enemy.Flying")));
        assert!(!c.remove_tag(&reg, &tag("X")));
        assert_eq!(c, before);
    }

    #[test]
    fn remove_with_unregistered_parent_adds_nothing() {
        let reg = registry();
        let mut c = TagContainer::new();
        c.add_tag(tag("Ally.Healer"));

        assert!(c.remove_tag(&reg, &tag("Ally.Healer")));
        assert!(c.is_empty());
    }

    #[test]
    fn quantified_queries() {
        let reg = registry();
        let c = TagContainer::create(&reg, ["Enemy.Flying.Boss", "X"]);

        let broad = TagContainer::create(&reg, ["Enemy", "X"]);
        let exact = TagContainer::create(&reg, ["X", "Enemy.Flying.Boss"]);
        let mixed = TagContainer::create(&reg, ["Enemy.Ground", "X"]);

        assert!(c.has_all(&broad));
        assert!(!c.has_all_exact(&broad));
        assert!(c.has_any_exact(&broad));

        assert!(c.has_all_exact(&exact));
        assert!(c.has_any(&mixed));
        assert!(!c.has_all(&mixed));

        let none = TagContainer::create(&reg, ["Enemy.Ground"]);
        assert!(!c.has_any(&none));
        assert!(!c.has_any_exact(&none));
    }

    #[test]
    fn empty_other_is_vacuous() {
        let c = TagContainer::new().tap_add("Enemy");
        let empty = TagContainer::new();

        assert!(c.has_all(&empty));
        assert!(c.has_all_exact(&empty));
        assert!(!c.has_any(&empty));
        assert!(!c.has_any_exact(&empty));
        assert!(empty.has_all(&empty));
    }

    #[test]
    fn append_and_remove_tags() {
        let reg = registry();
        let mut c = TagContainer::create(&reg, ["Enemy"]);
        c.append(&TagContainer::create(&reg, ["Enemy.Flying", "X.Y", "X"]));
        assert_eq!(names(&c), vec!["Enemy.Flying", "X.Y"]);

        c.remove_tags(&reg, &TagContainer::create(&reg, ["X.Y", "Enemy.Ground"]));
        assert_eq!(names(&c), vec!["Enemy.Flying", "X"]);
    }

    #[test]
    fn merged_keeps_specific_tag_from_earlier_source() {
        let a = TagContainer::new().tap_add("X.Y");
        let b = TagContainer::new().tap_add("X");

        let merged = TagContainer::merged([&a, &b]);
        assert_eq!(names(&merged), vec!["X.Y"]);
    }

    #[test]
    fn merged_replaces_general_tag_from_earlier_source() {
        let a = TagContainer::new().tap_add("X");
        let b = TagContainer::new().tap_add("X.Y");

        let merged = TagContainer::merged([&a, &b]);
        assert_eq!(names(&merged), vec!["X.Y"]);
    }

    #[test]
    fn merged_preserves_source_order() {
        let a = TagContainer::new().tap_add("Enemy.Ground").tap_add("X");
        let b = TagContainer::new().tap_add("Enemy.Flying").tap_add("X");

        let merged = TagContainer::merged([&a, &b]);
        assert_eq!(names(&merged), vec!["Enemy.Ground", "X", "Enemy.Flying"]);
    }

    #[test]
    fn merged_of_nothing_is_empty() {
        assert!(TagContainer::merged(std::iter::empty()).is_empty());
    }

    #[test]
    fn copy_from_none_is_empty() {
        assert!(TagContainer::copy_from(None).is_empty());

        let source = TagContainer::new().tap_add("Enemy");
        let copy = TagContainer::copy_from(Some(&source));
        assert_eq!(copy, source);
    }

    #[test]
    fn create_skips_unknown_names() {
        let reg = registry();
        let c = TagContainer::create(&reg, ["Enemy", "Nope", "", "X.Y"]);
        assert_eq!(names(&c), vec!["Enemy", "X.Y"]);
        assert_eq!(c.tags()[1].parent_name(), "X");
    }

    #[test]
    fn clear_empties() {
        let mut c = TagContainer::new().tap_add("Enemy");
        c.clear();
        assert!(c.is_empty());
    }

    impl TagContainer {
        fn tap_add(mut self, name: &str) -> Self {
            self.add_tag(Tag::from_name(name));
            self
        }
    }
}
