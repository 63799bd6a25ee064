//! TOML configuration parser for tags.toml.

use std::collections::HashSet;
use std::path::Path;

use gameplay_tags::{validate_name, TagDef, NAME_SEPARATOR};
use serde::Deserialize;

use crate::StoreError;

/// Parsed tag taxonomy configuration.
///
/// Every listed path is expanded into itself plus all of its ancestors, the
/// same entries a taxonomy editor creates when a new path is added.
#[derive(Debug, Clone)]
pub struct TaxonomyConfig {
    /// All tag entries (including auto-generated parents), sorted by name
    entries: Vec<TagDef>,
}

/// Raw TOML structure.
#[derive(Debug, Deserialize)]
struct RawTaxonomyConfig {
    tags: RawTags,
}

#[derive(Debug, Deserialize)]
struct RawTags {
    /// List of dot-separated paths
    paths: Vec<String>,
}

impl TaxonomyConfig {
    /// Parse from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parse from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, StoreError> {
        let raw: RawTaxonomyConfig = toml::from_str(content)?;
        let entries = Self::expand_paths(&raw.tags.paths)?;
        Ok(Self { entries })
    }

    pub fn entries(&self) -> impl Iterator<Item = &TagDef> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_defs(self) -> Vec<TagDef> {
        self.entries
    }

    /// Expand paths to include all parent nodes.
    ///
    /// e.g., "A.B.C" expands to ["A", "A.B", "A.B.C"]
    fn expand_paths(paths: &[String]) -> Result<Vec<TagDef>, StoreError> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut entries: Vec<TagDef> = Vec::new();

        let sep = NAME_SEPARATOR.to_string();

        for path in paths {
            validate_name(path)?;

            let segments: Vec<&str> = path.split(NAME_SEPARATOR).collect();

            for depth in 0..segments.len() {
                let name = segments[..=depth].join(&sep);
                if seen.insert(name.clone()) {
                    let parent = segments[..depth].join(&sep);
                    entries.push(TagDef::new(name, parent));
                }
            }
        }

        // Sort by name for deterministic output
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(entries)
    }
}
