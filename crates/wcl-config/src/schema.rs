//! Read-only schema catalogs
//!
//! The schema defines which entity kinds, relationship kinds, cultures and
//! tags exist. Everything else in a snapshot refers to these by value.

use serde::Deserialize;

use crate::lenient;

/// Schema catalogs
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Schema {
    /// Entity kinds with their subtypes and statuses
    #[serde(deserialize_with = "lenient::items")]
    pub entity_kinds: Vec<EntityKindSchema>,

    /// Relationship kinds
    #[serde(deserialize_with = "lenient::items")]
    pub relationship_kinds: Vec<RelationshipKindSchema>,

    /// Cultures
    #[serde(deserialize_with = "lenient::items")]
    pub cultures: Vec<Culture>,

    /// Tag definitions
    #[serde(deserialize_with = "lenient::items")]
    pub tag_registry: Vec<TagDefinition>,
}

/// One entity kind
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityKindSchema {
    /// Kind id (e.g. `npc`, `faction`)
    pub kind: String,

    /// Allowed subtypes
    #[serde(deserialize_with = "lenient::items")]
    pub subtypes: Vec<CatalogEntry>,

    /// Allowed statuses
    #[serde(deserialize_with = "lenient::items")]
    pub statuses: Vec<CatalogEntry>,

    /// Semantic plane layout, if the kind has one
    #[serde(deserialize_with = "lenient::or_default")]
    pub semantic_plane: Option<SemanticPlane>,
}

impl EntityKindSchema {
    /// Whether `subtype` is one of this kind's subtypes
    #[must_use]
    pub fn has_subtype(&self, subtype: &str) -> bool {
        self.subtypes.iter().any(|s| s.id() == subtype)
    }

    /// Whether `status` is one of this kind's statuses
    #[must_use]
    pub fn has_status(&self, status: &str) -> bool {
        self.statuses.iter().any(|s| s.id() == status)
    }
}

/// Subtype or status entry; authored either as a bare id or as an object
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CatalogEntry {
    /// Bare id string
    Plain(String),

    /// Object form
    Detailed {
        /// Entry id
        id: String,
        /// Display name
        #[serde(default, deserialize_with = "lenient::or_default")]
        name: Option<String>,
    },
}

impl CatalogEntry {
    /// Entry id regardless of authored form
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Plain(id) | Self::Detailed { id, .. } => id,
        }
    }
}

impl From<&str> for CatalogEntry {
    fn from(id: &str) -> Self {
        Self::Plain(id.to_string())
    }
}

/// Semantic plane of an entity kind
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SemanticPlane {
    /// Named regions of the plane
    #[serde(deserialize_with = "lenient::items")]
    pub regions: Vec<SemanticRegion>,
}

/// A region in a semantic plane, optionally owned by a culture
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SemanticRegion {
    /// Region id
    pub id: String,

    /// Display label
    #[serde(deserialize_with = "lenient::or_default")]
    pub label: Option<String>,

    /// Owning culture id
    #[serde(deserialize_with = "lenient::or_default")]
    pub culture: Option<String>,
}

/// One relationship kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RelationshipKindSchema {
    /// Kind id (e.g. `ally_of`)
    pub kind: String,
}

/// One culture
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Culture {
    /// Culture id
    pub id: String,

    /// Display name
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: Option<String>,
}

/// One tag definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TagDefinition {
    /// Tag id
    pub tag: String,

    /// Tag category
    #[serde(deserialize_with = "lenient::or_default")]
    pub category: Option<String>,
}
