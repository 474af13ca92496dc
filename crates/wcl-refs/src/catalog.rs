//! Catalogs of valid ids
//!
//! A [`Catalog`] indexes everything a reference may resolve against. Ids
//! are matched by value equality. When the snapshot holds duplicate ids the
//! first occurrence wins for lookups that return the owning object.

use std::collections::{HashMap, HashSet};

use wcl_config::{EntityKindSchema, Snapshot};

/// Framework systems that run in every era without being weighted
pub const ALWAYS_RUNNING_SYSTEMS: [&str; 3] = ["era_spawner", "era_transition", "universal_catalyst"];

/// Index of valid ids in one snapshot
#[derive(Debug, Clone, Default)]
pub struct Catalog<'a> {
    entity_kinds: HashMap<&'a str, &'a EntityKindSchema>,
    relationship_kinds: HashSet<&'a str>,
    cultures: HashSet<&'a str>,
    pressures: HashSet<&'a str>,
    generators: HashSet<&'a str>,
    systems: HashSet<&'a str>,
}

impl<'a> Catalog<'a> {
    /// Build catalog from snapshot
    ///
    /// Generator ids include disabled generators: they exist, they just do
    /// not run.
    #[must_use]
    pub fn build(snapshot: &'a Snapshot) -> Self {
        let schema = &snapshot.schema;
        let mut entity_kinds = HashMap::new();
        for kind in &schema.entity_kinds {
            entity_kinds.entry(kind.kind.as_str()).or_insert(kind);
        }

        Self {
            entity_kinds,
            relationship_kinds: schema.relationship_kinds.iter().map(|r| r.kind.as_str()).collect(),
            cultures: schema.cultures.iter().map(|c| c.id.as_str()).collect(),
            pressures: snapshot.pressures.iter().map(|p| p.id.as_str()).collect(),
            generators: snapshot.generators.iter().map(|g| g.id.as_str()).collect(),
            systems: snapshot.systems.iter().map(|s| s.id()).collect(),
        }
    }

    /// Look up entity kind schema (first definition wins)
    #[inline]
    #[must_use]
    pub fn entity_kind(&self, kind: &str) -> Option<&'a EntityKindSchema> {
        self.entity_kinds.get(kind).copied()
    }

    /// Whether the entity kind is defined
    #[inline]
    #[must_use]
    pub fn has_entity_kind(&self, kind: &str) -> bool {
        self.entity_kinds.contains_key(kind)
    }

    /// Whether the relationship kind is defined
    #[inline]
    #[must_use]
    pub fn has_relationship_kind(&self, kind: &str) -> bool {
        self.relationship_kinds.contains(kind)
    }

    /// Whether the culture is defined
    #[inline]
    #[must_use]
    pub fn has_culture(&self, id: &str) -> bool {
        self.cultures.contains(id)
    }

    /// Whether the pressure exists
    #[inline]
    #[must_use]
    pub fn has_pressure(&self, id: &str) -> bool {
        self.pressures.contains(id)
    }

    /// Whether the generator exists (enabled or not)
    #[inline]
    #[must_use]
    pub fn has_generator(&self, id: &str) -> bool {
        self.generators.contains(id)
    }

    /// Whether the system exists
    #[inline]
    #[must_use]
    pub fn has_system(&self, id: &str) -> bool {
        self.systems.contains(id)
    }
}

/// Whether the system runs regardless of era weighting
#[inline]
#[must_use]
pub fn is_always_running(system_id: &str) -> bool {
    ALWAYS_RUNNING_SYSTEMS.contains(&system_id)
}
