//! Reference collectors
//!
//! One collector per reference kind. Each walks the snapshot in document
//! order (generators, then pressures, then systems, then eras) and returns
//! every mention it finds, duplicates included.

use wcl_config::{
    ApplicabilityRule, CountSpec, Factor, Generator, Pressure, Snapshot, SystemEntry,
};

use crate::reference::{Reference, ScopedReference, SourceType};

/// Deepest applicability rule level that is walked
///
/// Rule trees nest through their `rules` field without a natural limit;
/// nodes below this depth are skipped.
pub const MAX_RULE_DEPTH: usize = 64;

/// Entity-kind references
///
/// Sources: generator selection, creation and applicability; pressure
/// `entity_count` and `status_ratio` factors and ratio count specs.
#[must_use]
pub fn entity_kind_refs(snapshot: &Snapshot) -> Vec<Reference> {
    kind_mentions(snapshot)
        .into_iter()
        .map(|m| Reference::new(m.kind, m.source_type, m.source_id, &m.location))
        .collect()
}

/// Subtype references, scoped to the kind they are paired with
///
/// Sources: generator creation items, pressure factors and ratio count
/// specs, and also applicability nodes, which pair a kind with a subtype
/// the same way creation items do.
#[must_use]
pub fn subtype_refs(snapshot: &Snapshot) -> Vec<ScopedReference> {
    kind_mentions(snapshot)
        .into_iter()
        .filter_map(|m| {
            let subtype = m.subtype?;
            Some(ScopedReference {
                kind: m.kind.to_string(),
                reference: Reference::new(subtype, m.source_type, m.source_id, &m.location),
            })
        })
        .collect()
}

/// Status references, scoped to the kind they are paired with
///
/// Sources: generator creation items, and also `entity_count` factors,
/// whose status filter names a status of the factor's kind.
#[must_use]
pub fn status_refs(snapshot: &Snapshot) -> Vec<ScopedReference> {
    kind_mentions(snapshot)
        .into_iter()
        .filter_map(|m| {
            let status = m.status?;
            Some(ScopedReference {
                kind: m.kind.to_string(),
                reference: Reference::new(status, m.source_type, m.source_id, &m.location),
            })
        })
        .collect()
}

/// Relationship-kind references
#[must_use]
pub fn relationship_kind_refs(snapshot: &Snapshot) -> Vec<Reference> {
    let mut refs = Vec::new();

    for generator in snapshot.enabled_generators() {
        let push = |refs: &mut Vec<Reference>, kind: &str, location: &str| {
            refs.push(Reference::new(kind, SourceType::Generator, &generator.id, location));
        };
        for item in generator.relationships.iter() {
            if let Some(kind) = &item.kind {
                push(&mut refs, kind, "relationships");
            }
        }
        let contract_lineage = generator.contract.as_ref().and_then(|c| c.lineage.as_ref());
        let lineages = contract_lineage
            .into_iter()
            .chain(generator.creation.iter().filter_map(|c| c.lineage.as_ref()));
        for lineage in lineages {
            if let Some(kind) = &lineage.relationship_kind {
                push(&mut refs, kind, "lineage");
            }
        }
    }

    for pressure in &snapshot.pressures {
        for (factor, side) in factors(pressure) {
            let owner = |kind: &str, location: &str| {
                Reference::new(kind, SourceType::Pressure, &pressure.id, location)
            };
            match factor {
                Factor::RelationshipCount { relationship_kinds, .. }
                | Factor::CrossCultureRatio { relationship_kinds, .. } => {
                    refs.extend(relationship_kinds.iter().map(|k| owner(k, side)));
                }
                Factor::Ratio { numerator, denominator, .. } => {
                    for (spec, part) in count_specs(numerator, denominator) {
                        if let CountSpec::RelationshipCount { relationship_kinds } = spec {
                            let location = format!("{side}, ratio {part}");
                            refs.extend(relationship_kinds.iter().map(|k| owner(k, &location)));
                        }
                    }
                }
                Factor::EntityCount { .. }
                | Factor::TagCount { .. }
                | Factor::StatusRatio { .. }
                | Factor::Unknown => {}
            }
        }
    }

    for system in &snapshot.systems {
        system_relationship_refs(system, &mut refs);
    }

    refs
}

fn system_relationship_refs(system: &SystemEntry, refs: &mut Vec<Reference>) {
    let config = &system.config;
    let mut push = |kind: &Option<String>, location: &str| {
        if let Some(kind) = kind {
            refs.push(Reference::new(kind, SourceType::System, &config.id, location));
        }
    };

    if let Some(contagion) = &config.contagion {
        push(&contagion.relationship_kind, "contagion");
    }
    for vector in &config.vectors {
        push(&vector.relationship_kind, "vectors");
    }
    if let Some(action) = &config.infection_action {
        push(&action.relationship_kind, "infectionAction");
    }
    if let Some(metric) = &config.metric {
        push(&metric.shared_relationship_kind, "metric");
    }
    for rule in &config.rules {
        if let Some(action) = &rule.action {
            push(&action.kind, "rules");
        }
    }
}

/// Pressure-id references
///
/// Sources: `modify_pressure` state updates of enabled generators and the
/// keys of every system's `pressureChanges`.
#[must_use]
pub fn pressure_id_refs(snapshot: &Snapshot) -> Vec<Reference> {
    pressure_deltas(snapshot).into_iter().map(|(r, _)| r).collect()
}

/// Pressure-id references paired with the delta they apply, if any
#[must_use]
pub fn pressure_deltas(snapshot: &Snapshot) -> Vec<(Reference, Option<f64>)> {
    let mut out = Vec::new();

    for generator in snapshot.enabled_generators() {
        for update in generator.state_updates.iter() {
            if let Some(pressure_id) = update.modified_pressure() {
                let r = Reference::new(
                    pressure_id,
                    SourceType::Generator,
                    &generator.id,
                    "stateUpdates",
                );
                out.push((r, update.delta));
            }
        }
    }

    for system in &snapshot.systems {
        for (pressure_id, delta) in &system.config.pressure_changes {
            let r = Reference::new(pressure_id, SourceType::System, system.id(), "pressureChanges");
            out.push((r, Some(*delta)));
        }
    }

    out
}

/// Generator-id references: keys of every era's `templateWeights`
#[must_use]
pub fn generator_id_refs(snapshot: &Snapshot) -> Vec<Reference> {
    snapshot
        .eras
        .iter()
        .flat_map(|era| {
            era.template_weights
                .keys()
                .map(move |id| Reference::new(id, SourceType::Era, &era.id, "templateWeights"))
        })
        .collect()
}

/// System-id references: keys of every era's `systemModifiers`
#[must_use]
pub fn system_id_refs(snapshot: &Snapshot) -> Vec<Reference> {
    snapshot
        .eras
        .iter()
        .flat_map(|era| {
            era.system_modifiers
                .keys()
                .map(move |id| Reference::new(id, SourceType::Era, &era.id, "systemModifiers"))
        })
        .collect()
}

/// Culture references from semantic-plane regions
#[must_use]
pub fn culture_refs(snapshot: &Snapshot) -> Vec<Reference> {
    let mut refs = Vec::new();
    for kind in &snapshot.schema.entity_kinds {
        let Some(plane) = &kind.semantic_plane else {
            continue;
        };
        for region in &plane.regions {
            if let Some(culture) = &region.culture {
                let location = format!("region \"{}\"", region.id);
                refs.push(Reference::new(culture, SourceType::EntityKind, &kind.kind, &location));
            }
        }
    }
    refs
}

/// Depth-first walk of an applicability rule tree in document order
///
/// Nodes deeper than [`MAX_RULE_DEPTH`] are not visited.
pub fn walk_rule_tree<'a>(roots: &'a [ApplicabilityRule], mut visit: impl FnMut(&'a ApplicabilityRule)) {
    let mut stack: Vec<(&ApplicabilityRule, usize)> = roots.iter().rev().map(|r| (r, 1)).collect();
    let mut truncated = false;

    while let Some((node, depth)) = stack.pop() {
        visit(node);
        if node.rules.is_empty() {
            continue;
        }
        if depth >= MAX_RULE_DEPTH {
            truncated = true;
            continue;
        }
        stack.extend(node.rules.iter().rev().map(|r| (r, depth + 1)));
    }

    if truncated {
        tracing::warn!("Applicability rules nested deeper than {} levels were skipped", MAX_RULE_DEPTH);
    }
}

/// One entity-kind mention with its optional subtype/status qualifiers
struct KindMention<'a> {
    kind: &'a str,
    subtype: Option<&'a str>,
    status: Option<&'a str>,
    source_type: SourceType,
    source_id: &'a str,
    location: String,
}

fn kind_mentions(snapshot: &Snapshot) -> Vec<KindMention<'_>> {
    let mut mentions = Vec::new();
    for generator in snapshot.enabled_generators() {
        generator_mentions(generator, &mut mentions);
    }
    for pressure in &snapshot.pressures {
        pressure_mentions(pressure, &mut mentions);
    }
    mentions
}

fn generator_mentions<'a>(generator: &'a Generator, out: &mut Vec<KindMention<'a>>) {
    let mention = |kind: &'a str, subtype: Option<&'a str>, status: Option<&'a str>, location: &str| {
        KindMention {
            kind,
            subtype,
            status,
            source_type: SourceType::Generator,
            source_id: &generator.id,
            location: location.to_string(),
        }
    };

    if let Some(kind) = generator.selection.as_ref().and_then(|s| s.kind.as_deref()) {
        out.push(mention(kind, None, None, "selection"));
    }
    for item in generator.creation.iter() {
        if let Some(kind) = item.kind.as_deref() {
            out.push(mention(kind, item.subtype.as_deref(), item.status.as_deref(), "creation"));
        }
    }
    if let Some(applicability) = &generator.applicability {
        walk_rule_tree(&applicability.rules, |node| {
            if let Some(kind) = node.kind.as_deref() {
                out.push(mention(kind, node.subtype.as_deref(), None, "applicability"));
            }
        });
    }
}

fn pressure_mentions<'a>(pressure: &'a Pressure, out: &mut Vec<KindMention<'a>>) {
    for (factor, side) in factors(pressure) {
        let mut push = |kind: &'a Option<String>,
                        subtype: &'a Option<String>,
                        status: Option<&'a str>,
                        location: String| {
            if let Some(kind) = kind.as_deref() {
                out.push(KindMention {
                    kind,
                    subtype: subtype.as_deref(),
                    status,
                    source_type: SourceType::Pressure,
                    source_id: &pressure.id,
                    location,
                });
            }
        };

        match factor {
            Factor::EntityCount { kind, subtype, status, .. } => {
                push(kind, subtype, status.as_deref(), side.to_string());
            }
            Factor::StatusRatio { kind, subtype, .. } => {
                push(kind, subtype, None, side.to_string());
            }
            Factor::Ratio { numerator, denominator, .. } => {
                for (spec, part) in count_specs(numerator, denominator) {
                    if let CountSpec::EntityCount { kind, subtype } = spec {
                        push(kind, subtype, None, format!("{side}, ratio {part}"));
                    }
                }
            }
            Factor::RelationshipCount { .. }
            | Factor::TagCount { .. }
            | Factor::CrossCultureRatio { .. }
            | Factor::Unknown => {}
        }
    }
}

/// Every feedback factor of a pressure with the side it sits on
fn factors(pressure: &Pressure) -> impl Iterator<Item = (&Factor, &'static str)> {
    let growth = &pressure.growth;
    growth
        .positive_feedback
        .iter()
        .map(|f| (f, "positive feedback"))
        .chain(growth.negative_feedback.iter().map(|f| (f, "negative feedback")))
}

/// The present count specs of a ratio factor
fn count_specs<'a>(
    numerator: &'a Option<CountSpec>,
    denominator: &'a Option<CountSpec>,
) -> impl Iterator<Item = (&'a CountSpec, &'static str)> {
    numerator
        .iter()
        .map(|s| (s, "numerator"))
        .chain(denominator.iter().map(|s| (s, "denominator")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wcl_config::Applicability;

    fn snapshot(json: &str) -> Snapshot {
        Snapshot::from_json(json).unwrap()
    }

    fn values(refs: &[Reference]) -> Vec<&str> {
        refs.iter().map(|r| r.value.as_str()).collect()
    }

    #[test]
    fn entity_kinds_from_generator_sections() {
        let s = snapshot(
            r#"{"generators": [{
                "id": "g1",
                "selection": {"strategy": "random", "kind": "npc"},
                "creation": [{"kind": "artifact", "subtype": "relic"}],
                "applicability": {"rules": [{"kind": "location", "rules": [{"kind": "faction"}]}]}
            }]}"#,
        );
        let refs = entity_kind_refs(&s);
        assert_eq!(values(&refs), vec!["npc", "artifact", "location", "faction"]);
        assert_eq!(refs[0].source, "generator \"g1\" (selection)");
        assert_eq!(refs[1].source, "generator \"g1\" (creation)");
        assert_eq!(refs[3].source, "generator \"g1\" (applicability)");
    }

    #[test]
    fn entity_kinds_from_nested_ratio_specs() {
        let s = snapshot(
            r#"{"pressures": [{"id": "unrest", "growth": {"negativeFeedback": [{
                "type": "ratio",
                "numerator": {"type": "entity_count", "kind": "guard", "subtype": "elite"},
                "denominator": {"type": "entity_count", "kind": "npc"},
                "coefficient": 1
            }]}}]}"#,
        );
        let refs = entity_kind_refs(&s);
        assert_eq!(values(&refs), vec!["guard", "npc"]);
        assert_eq!(refs[0].source, "pressure \"unrest\" (negative feedback, ratio numerator)");
        assert_eq!(refs[1].source, "pressure \"unrest\" (negative feedback, ratio denominator)");

        let subtypes = subtype_refs(&s);
        assert_eq!(subtypes.len(), 1);
        assert_eq!(subtypes[0].key(), "guard:elite");
    }

    #[test]
    fn disabled_generators_contribute_nothing() {
        let s = snapshot(
            r#"{"generators": [{
                "id": "off",
                "enabled": false,
                "selection": {"kind": "npc"},
                "creation": [{"kind": "npc", "subtype": "x", "status": "y", "lineage": {"relationshipKind": "r"}}],
                "relationships": [{"kind": "ally_of"}],
                "stateUpdates": [{"type": "modify_pressure", "pressureId": "fear", "delta": 1}]
            }]}"#,
        );
        assert!(entity_kind_refs(&s).is_empty());
        assert!(relationship_kind_refs(&s).is_empty());
        assert!(pressure_id_refs(&s).is_empty());
        assert!(subtype_refs(&s).is_empty());
        assert!(status_refs(&s).is_empty());
    }

    #[test]
    fn relationship_kinds_from_every_source() {
        let s = snapshot(
            r#"{
                "generators": [{
                    "id": "g",
                    "relationships": [{"kind": "ally_of"}],
                    "contract": {"lineage": {"relationshipKind": "descends_from"}}
                }],
                "pressures": [{"id": "p", "growth": {"positiveFeedback": [
                    {"type": "relationship_count", "relationshipKinds": ["rival_of", "enemy_of"]},
                    {"type": "cross_culture_ratio", "relationshipKinds": ["trades_with"]},
                    {"type": "ratio", "numerator": {"type": "relationship_count", "relationshipKinds": ["married_to"]}}
                ]}}],
                "systems": [{"config": {
                    "id": "s",
                    "contagion": {"relationshipKind": "knows"},
                    "vectors": [{"relationshipKind": "lives_near"}],
                    "infectionAction": {"relationshipKind": "infected_by"},
                    "metric": {"sharedRelationshipKind": "member_of"},
                    "rules": [{"action": {"kind": "feuds_with"}}]
                }}]
            }"#,
        );
        let refs = relationship_kind_refs(&s);
        assert_eq!(
            values(&refs),
            vec![
                "ally_of",
                "descends_from",
                "rival_of",
                "enemy_of",
                "trades_with",
                "married_to",
                "knows",
                "lives_near",
                "infected_by",
                "member_of",
                "feuds_with",
            ]
        );
        assert_eq!(refs[5].source, "pressure \"p\" (positive feedback, ratio numerator)");
        assert_eq!(refs[10].source, "system \"s\" (rules)");
    }

    #[test]
    fn pressure_refs_only_from_modify_pressure_and_changes() {
        let s = snapshot(
            r#"{
                "generators": [{"id": "g", "stateUpdates": [
                    {"type": "modify_pressure", "pressureId": "fear", "delta": 2},
                    {"type": "add_tag", "pressureId": "ignored"}
                ]}],
                "systems": [{"config": {"id": "s", "pressureChanges": {"hope": -1, "fear": 0.5}}}]
            }"#,
        );
        let deltas = pressure_deltas(&s);
        let pairs: Vec<_> = deltas.iter().map(|(r, d)| (r.value.as_str(), *d)).collect();
        assert_eq!(pairs, vec![("fear", Some(2.0)), ("hope", Some(-1.0)), ("fear", Some(0.5))]);
        assert_eq!(values(&pressure_id_refs(&s)), vec!["fear", "hope", "fear"]);
    }

    #[test]
    fn era_map_keys_are_references() {
        let s = snapshot(
            r#"{"eras": [
                {"id": "dawn", "templateWeights": {"g1": 1, "g2": 0}, "systemModifiers": {"s1": 1}},
                {"id": "dusk", "templateWeights": {"g1": 2}}
            ]}"#,
        );
        let gens = generator_id_refs(&s);
        assert_eq!(values(&gens), vec!["g1", "g2", "g1"]);
        assert_eq!(gens[2].source, "era \"dusk\" (templateWeights)");
        assert_eq!(values(&system_id_refs(&s)), vec!["s1"]);
    }

    #[test]
    fn subtype_refs_include_applicability_nodes() {
        let s = snapshot(
            r#"{"generators": [{
                "id": "g1",
                "creation": [{"kind": "npc", "subtype": "merchant"}],
                "applicability": {"rules": [{"kind": "npc", "subtype": "noble", "rules": [{"subtype": "orphaned"}]}]}
            }]}"#,
        );
        let subtypes = subtype_refs(&s);
        let keys: Vec<_> = subtypes.iter().map(ScopedReference::key).collect();
        assert_eq!(keys, vec!["npc:merchant", "npc:noble"]);
        assert_eq!(subtypes[1].reference.source, "generator \"g1\" (applicability)");
    }

    #[test]
    fn status_refs_from_creation_and_entity_count() {
        let s = snapshot(
            r#"{
                "generators": [{"id": "g", "creation": [{"kind": "npc", "status": "alive"}, {"kind": "npc"}]}],
                "pressures": [{"id": "p", "growth": {"positiveFeedback": [
                    {"type": "entity_count", "kind": "npc", "status": "dead"},
                    {"type": "status_ratio", "kind": "npc", "aliveStatus": "alive"}
                ]}}]
            }"#,
        );
        let keys: Vec<_> = status_refs(&s).iter().map(ScopedReference::key).collect();
        assert_eq!(keys, vec!["npc:alive", "npc:dead"]);
    }

    #[test]
    fn culture_refs_from_regions() {
        let s = snapshot(
            r#"{"schema": {"entityKinds": [{"kind": "location", "semanticPlane": {"regions": [
                {"id": "north", "culture": "aurora"},
                {"id": "south"}
            ]}}]}}"#,
        );
        let refs = culture_refs(&s);
        assert_eq!(values(&refs), vec!["aurora"]);
        assert_eq!(refs[0].source, "entity kind \"location\" (region \"north\")");
    }

    #[test]
    fn rule_tree_walk_is_depth_first_in_order() {
        let leaf = |k: &str| ApplicabilityRule {
            kind: Some(k.into()),
            ..Default::default()
        };
        let tree = vec![
            ApplicabilityRule {
                kind: Some("a".into()),
                rules: vec![leaf("b"), leaf("c")],
                ..Default::default()
            },
            leaf("d"),
        ];
        let mut seen = Vec::new();
        walk_rule_tree(&tree, |n| seen.push(n.kind.clone().unwrap()));
        assert_eq!(seen, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn rule_tree_walk_is_bounded() {
        let mut node = ApplicabilityRule {
            kind: Some("bottom".into()),
            ..Default::default()
        };
        for _ in 0..(MAX_RULE_DEPTH * 2) {
            node = ApplicabilityRule {
                kind: Some("k".into()),
                rules: vec![node],
                ..Default::default()
            };
        }
        let applicability = Applicability { rules: vec![node] };

        let mut visited = 0;
        walk_rule_tree(&applicability.rules, |_| visited += 1);
        assert_eq!(visited, MAX_RULE_DEPTH);
    }
}
