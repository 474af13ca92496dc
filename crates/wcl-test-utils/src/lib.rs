//! Testing utilities for WCL workspace
//!
//! Shared fixtures for building minimal synthetic snapshots.

#![allow(missing_docs)]

use indexmap::IndexMap;
use wcl_config::{
    Contract, CreationItem, Culture, EntityKindSchema, Era, Generator, Growth, Lineage, Listing,
    Pressure, RelationshipKindSchema, Schema, Selection, Snapshot, StateUpdate, SystemConfig,
    SystemEntry, MODIFY_PRESSURE,
};

pub fn entity_kind(kind: &str, subtypes: &[&str], statuses: &[&str]) -> EntityKindSchema {
    EntityKindSchema {
        kind: kind.to_string(),
        subtypes: subtypes.iter().map(|&s| s.into()).collect(),
        statuses: statuses.iter().map(|&s| s.into()).collect(),
        semantic_plane: None,
    }
}

pub fn schema(kinds: Vec<EntityKindSchema>, relationships: &[&str], cultures: &[&str]) -> Schema {
    Schema {
        entity_kinds: kinds,
        relationship_kinds: relationships
            .iter()
            .map(|k| RelationshipKindSchema { kind: k.to_string() })
            .collect(),
        cultures: cultures
            .iter()
            .map(|c| Culture {
                id: c.to_string(),
                name: None,
            })
            .collect(),
        tag_registry: Vec::new(),
    }
}

/// Schema used by [`clean_snapshot`]
pub fn default_schema() -> Schema {
    schema(
        vec![
            entity_kind("npc", &["merchant", "noble"], &["alive", "dead"]),
            entity_kind("faction", &["guild"], &["active"]),
        ],
        &["ally_of", "descends_from"],
        &["aurora"],
    )
}

/// Well-formed generator creating one entity of `kind`, with lineage
pub fn generator(id: &str, kind: &str) -> Generator {
    Generator {
        id: id.to_string(),
        selection: Some(Selection {
            strategy: Some("random".to_string()),
            kind: Some(kind.to_string()),
        }),
        creation: Listing::Items(vec![CreationItem {
            kind: Some(kind.to_string()),
            ..Default::default()
        }]),
        relationships: Listing::Items(Vec::new()),
        state_updates: Listing::Items(Vec::new()),
        contract: Some(Contract {
            lineage: Some(Lineage {
                relationship_kind: Some("descends_from".to_string()),
            }),
        }),
        ..Default::default()
    }
}

pub fn modify_pressure(pressure_id: &str, delta: f64) -> StateUpdate {
    StateUpdate {
        update_type: Some(MODIFY_PRESSURE.to_string()),
        pressure_id: Some(pressure_id.to_string()),
        delta: Some(delta),
    }
}

/// Pressure with both a source (base growth) and a sink (decay)
pub fn pressure(id: &str) -> Pressure {
    Pressure {
        id: id.to_string(),
        name: None,
        initial_value: Some(50.0),
        decay: Some(1.0),
        growth: Growth {
            base_growth: Some(1.0),
            ..Default::default()
        },
    }
}

/// Pressure with no sources and no sinks
pub fn inert_pressure(id: &str) -> Pressure {
    Pressure {
        id: id.to_string(),
        decay: Some(0.0),
        ..Default::default()
    }
}

pub fn system(id: &str) -> SystemEntry {
    SystemEntry {
        system_type: None,
        config: SystemConfig {
            id: id.to_string(),
            ..Default::default()
        },
    }
}

pub fn era(id: &str, weights: &[(&str, f64)], modifiers: &[(&str, f64)]) -> Era {
    let to_map = |pairs: &[(&str, f64)]| -> IndexMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    };
    Era {
        id: id.to_string(),
        name: None,
        template_weights: to_map(weights),
        system_modifiers: to_map(modifiers),
    }
}

/// Snapshot that passes every rule
pub fn clean_snapshot() -> Snapshot {
    let mut g1 = generator("g1", "npc");
    g1.state_updates = Listing::Items(vec![modify_pressure("fear", 1.0)]);

    let mut s1 = system("s1");
    s1.config.pressure_changes.insert("fear".to_string(), -1.0);

    Snapshot {
        schema: default_schema(),
        eras: vec![era("e1", &[("g1", 1.0)], &[("s1", 1.0)])],
        pressures: vec![pressure("fear")],
        generators: vec![g1],
        systems: vec![s1],
        usage_map: None,
    }
}
