//! File-backed taxonomy storage for gameplay-tags.
//!
//! This crate provides tools for:
//! - Parsing `tags.toml` configuration files (a list of paths, ancestors implied)
//! - Reading and writing flat `(name, parent)` snapshots
//! - Loading either format into a [`TagRegistry`], and reloading it in place
//!
//! # Formats
//!
//! ```toml
//! # tags.toml: hand-written
//! [tags]
//! paths = ["Enemy.Flying.Boss", "Status.Burning"]
//! ```
//!
//! ```toml
//! # snapshot: written by `save_registry`
//! saved_at = "2026-01-01T00:00:00+00:00"
//!
//! [[tags]]
//! name = "Enemy"
//! parent = ""
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let mut registry = gameplay_tags_store::load_registry("tags.toml")?;
//! registry.register("Enemy.Swimming")?;
//! gameplay_tags_store::save_registry(&registry, "tags.snapshot.toml")?;
//! ```

mod config;
mod snapshot;

pub use config::TaxonomyConfig;
pub use snapshot::TagSnapshot;

use std::path::Path;

use gameplay_tags::{TagDef, TagError, TagRegistry};
use thiserror::Error;
use tracing::info;

/// Errors that can occur while loading or saving a taxonomy.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Write error: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("Invalid taxonomy: {0}")]
    Invalid(#[from] TagError),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Load a registry from either a `tags.toml` config or a snapshot.
///
/// The format is chosen by the shape of the `tags` key: a table with `paths`
/// or an array of `{ name, parent }` entries.
pub fn load_registry(path: impl AsRef<Path>) -> Result<TagRegistry, StoreError> {
    let path = path.as_ref();
    let defs = read_defs(path)?;
    let registry = TagRegistry::from_defs(&defs)?;

    info!(path = %path.display(), count = registry.len(), "loaded tag registry");
    Ok(registry)
}

/// Re-read `path` and replace the registry's contents.
///
/// The index is rebuilt before this returns. On error the registry is unchanged.
pub fn reload_registry(registry: &mut TagRegistry, path: impl AsRef<Path>) -> Result<(), StoreError> {
    let path = path.as_ref();
    let defs = read_defs(path)?;
    registry.reload(&defs)?;

    info!(path = %path.display(), count = registry.len(), "reloaded tag registry");
    Ok(())
}

/// Write the registry's list as a snapshot.
pub fn save_registry(registry: &TagRegistry, path: impl AsRef<Path>) -> Result<(), StoreError> {
    TagSnapshot::from_registry(registry).write_to_file(path)
}

fn read_defs(path: &Path) -> Result<Vec<TagDef>, StoreError> {
    let content = std::fs::read_to_string(path)?;
    parse_defs(&content)
}

fn parse_defs(content: &str) -> Result<Vec<TagDef>, StoreError> {
    let table: toml::Table = toml::from_str(content)?;
    match table.get("tags") {
        Some(toml::Value::Table(_)) => Ok(TaxonomyConfig::from_str(content)?.into_defs()),
        Some(toml::Value::Array(_)) => Ok(TagSnapshot::from_str(content)?.tags),
        _ => Err(StoreError::Validation(
            "expected `[tags] paths = [...]` or `[[tags]]` entries".into(),
        )),
    }
}
