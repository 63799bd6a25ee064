//! Bevy integration for gameplay tags.
//!
//! Provides:
//! - `GameplayTagsPlugin`: builder-pattern plugin that inserts the [`TagRegistry`] as a Resource
//! - `TagRegistry` as a Resource and `TagContainer` as a Component (derived on the core types)
//!
//! # Example
//!
//! ```ignore
//! use bevy::prelude::*;
//! use gameplay_tags::bevy::*;
//! use gameplay_tags::{TagContainer, TagDef, TagRegistry};
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(GameplayTagsPlugin::from_definitions(vec![
//!             TagDef::root("Enemy"),
//!             TagDef::new("Enemy.Flying", "Enemy"),
//!         ]))
//!         .add_systems(Startup, spawn_entities)
//!         .add_systems(Update, count_enemies)
//!         .run();
//! }
//!
//! fn spawn_entities(mut commands: Commands, registry: Res<TagRegistry>) {
//!     commands.spawn(TagContainer::create(&registry, ["Enemy.Flying"]));
//! }
//!
//! fn count_enemies(registry: Res<TagRegistry>, query: Query<&TagContainer>) {
//!     let enemy = registry.find("Enemy");
//!     let count = query.iter().filter(|tags| tags.has_tag(&enemy)).count();
//! }
//! ```

use ::bevy::prelude::*;

use crate::error::TagError;
use crate::registry::{TagDef, TagRegistry};

// =============================================================================
// Plugin
// =============================================================================

/// Bevy plugin for the gameplay tag registry.
///
/// ```ignore
/// App::new()
///     .add_plugins(
///         GameplayTagsPlugin::from_definitions(defs)
///             .allow_taxonomy_edits(true)
///     )
/// ```
#[derive(Default)]
pub struct GameplayTagsPlugin {
    definitions: Vec<TagDef>,
    allow_edits: bool,
}

impl GameplayTagsPlugin {
    /// Create a plugin with an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a plugin from a flat `(name, parent)` taxonomy.
    pub fn from_definitions(definitions: Vec<TagDef>) -> Self {
        Self {
            definitions,
            allow_edits: false,
        }
    }

    /// Allow tooling systems to call `register`/`remove` on the registry.
    ///
    /// Default: `false`
    pub fn allow_taxonomy_edits(mut self, allow: bool) -> Self {
        self.allow_edits = allow;
        self
    }
}

impl Plugin for GameplayTagsPlugin {
    fn build(&self, app: &mut App) {
        let registry = TagRegistry::from_defs(&self.definitions)
            .expect("Failed to build TagRegistry from definitions");

        app.insert_resource(registry);
        app.insert_resource(TaxonomyEditPolicy {
            allow_edits: self.allow_edits,
        });
    }
}

/// Whether the tag taxonomy may be edited at runtime.
///
/// The registry itself does not consult this resource. Editing systems call
/// [`check`](Self::check) before `register`/`remove`:
///
/// ```ignore
/// fn add_tag(policy: Res<TaxonomyEditPolicy>, mut registry: ResMut<TagRegistry>) {
///     if policy.check().is_ok() {
///         registry.register("Enemy.Swimming").ok();
///     }
/// }
/// ```
#[derive(Resource, Clone, Copy, Debug)]
pub struct TaxonomyEditPolicy {
    pub allow_edits: bool,
}

impl TaxonomyEditPolicy {
    /// `Err(TagError::EditsDisabled)` unless edits were allowed on the plugin.
    pub fn check(&self) -> Result<(), TagError> {
        if self.allow_edits {
            Ok(())
        } else {
            Err(TagError::EditsDisabled)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
