//! Flat `(name, parent)` snapshots of a tag registry.
//!
//! ```toml
//! saved_at = "2026-01-01T00:00:00+00:00"
//!
//! [[tags]]
//! name = "Enemy"
//! parent = ""
//!
//! [[tags]]
//! name = "Enemy.Flying"
//! parent = "Enemy"
//! ```

use std::path::Path;

use gameplay_tags::{TagDef, TagRegistry};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::StoreError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSnapshot {
    /// RFC 3339 time of the last write
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<String>,
    #[serde(default)]
    pub tags: Vec<TagDef>,
}

impl TagSnapshot {
    /// Capture the registry's list in its current order.
    pub fn from_registry(registry: &TagRegistry) -> Self {
        Self {
            saved_at: None,
            tags: registry.defs(),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    pub fn from_str(content: &str) -> Result<Self, StoreError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, StoreError> {
        Ok(toml::to_string(self)?)
    }

    /// Stamp `saved_at` and write the snapshot.
    ///
    /// Overwriting a snapshot that held more tags is allowed but logged.
    pub fn write_to_file(&mut self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();

        if path.exists()
            && let Ok(previous) = Self::from_file(path)
            && previous.tags.len() > self.tags.len()
        {
            warn!(
                path = %path.display(),
                previous = previous.tags.len(),
                current = self.tags.len(),
                "overwriting tag snapshot with fewer tags"
            );
        }

        self.saved_at = Some(chrono::Utc::now().to_rfc3339());
        std::fs::write(path, self.to_toml_string()?)?;

        info!(path = %path.display(), count = self.tags.len(), "saved tag snapshot");
        Ok(())
    }

    /// Validate the entries and build a registry from them.
    pub fn into_registry(self) -> Result<TagRegistry, StoreError> {
        Ok(TagRegistry::from_defs(&self.tags)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gameplay_tags::TagError;

    fn registry() -> TagRegistry {
        let mut registry = TagRegistry::new();
        registry.register("Enemy.Flying").unwrap();
        registry.register("Status").unwrap();
        registry
    }

    #[test]
    fn captures_registry_order() {
        let snapshot = TagSnapshot::from_registry(&registry());
        assert_eq!(
            snapshot.tags,
            vec![
                TagDef::root("Enemy"),
                TagDef::new("Enemy.Flying", "Enemy"),
                TagDef::root("Status"),
            ]
        );
        assert!(snapshot.saved_at.is_none());
    }

    #[test]
    fn toml_layout() {
        let text = TagSnapshot::from_registry(&registry()).to_toml_string().unwrap();

        assert!(!text.contains("saved_at"));
        assert!(text.contains("[[tags]]"));
        assert!(text.contains("name = \"Enemy.Flying\""));
        assert!(text.contains("parent = \"Enemy\""));
    }

    #[test]
    fn parse_and_build_registry() {
        let toml = r#"
saved_at = "2026-01-01T00:00:00+00:00"

[[tags]]
name = "Enemy"

[[tags]]
name = "Enemy.Flying"
parent = "Enemy"
"#;
        let snapshot = TagSnapshot::from_str(toml).unwrap();
        assert_eq!(snapshot.saved_at.as_deref(), Some("2026-01-01T00:00:00+00:00"));

        let registry = snapshot.into_registry().unwrap();
        assert_eq!(registry.find("Enemy.Flying").parent_name(), "Enemy");
    }

    #[test]
    fn malformed_entries_are_rejected() {
        let toml = r#"
[[tags]]
name = "Enemy.Flying"
parent = "Ally"
"#;
        let err = TagSnapshot::from_str(toml).unwrap().into_registry().unwrap_err();
        assert!(matches!(
            err,
            StoreError::Invalid(TagError::ParentMismatch { .. })
        ));
    }

    #[test]
    fn empty_snapshot_is_empty_registry() {
        let registry = TagSnapshot::from_str("").unwrap().into_registry().unwrap();
        assert!(registry.is_empty());
    }
}
