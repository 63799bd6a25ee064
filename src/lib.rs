//! # Hierarchical Gameplay Tags (gameplay-tags)
//!
//! Dot-separated hierarchical labels such as `Enemy.Flying.Boss`, a registry
//! of valid tags, and normalized containers with "is-a" matching: a container
//! holding `Enemy.Flying` satisfies a query for `Enemy`.
//!
//! ## Design
//!
//! ```text
//! TagRegistry ──find/create──▶ Tag ──add_tag──▶ TagContainer
//!      ▲                        │                    │
//!      └── parent / is_valid ───┘                    │
//!                               matches ◀────────────┘
//! ```
//!
//! - [`Tag`] holds its name and its parent's name. Parent resolution and
//!   validity checks take the registry explicitly.
//! - [`TagRegistry`] is the authoritative list of tags plus a name index.
//!   There is no global instance; with the `bevy` feature it is a `Resource`.
//! - [`TagContainer`] keeps the most specific tags and answers hierarchical
//!   queries.
//!
//! ```
//! use gameplay_tags::{TagContainer, TagDef, TagRegistry};
//!
//! let registry = TagRegistry::from_defs(&[
//!     TagDef::root("Enemy"),
//!     TagDef::new("Enemy.Flying", "Enemy"),
//! ])
//! .unwrap();
//!
//! let tags = TagContainer::create(&registry, ["Enemy.Flying"]);
//! assert!(tags.has_tag(&registry.find("Enemy")));
//! assert!(!tags.has_tag_exact(&registry.find("Enemy")));
//! ```

pub mod container;
pub mod error;
pub mod registry;
pub mod tag;

#[cfg(feature = "bevy")]
pub mod bevy;

pub use container::TagContainer;
pub use error::TagError;
pub use registry::{TagDef, TagRegistry};
pub use tag::{validate_name, Tag, NAME_SEPARATOR};
