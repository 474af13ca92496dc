//! Quality rules

use indexmap::IndexMap;
use wcl_config::{EntityKindSchema, Snapshot};
use wcl_refs::{collect, group_by_key, Catalog, ScopedReference};

use super::{referenced_by, unresolved_items, ObjectFindings};
use crate::issue::AffectedItem;
use crate::rule::{Rule, RuleCategory, RuleOutcome};

/// Kind-scoped references whose kind resolves but whose value is not
/// defined for it; unresolvable kinds are left to the entity-kind rule
fn unknown_in_kind(
    refs: &[ScopedReference],
    catalog: &Catalog<'_>,
    defined: impl Fn(&EntityKindSchema, &str) -> bool,
) -> Vec<AffectedItem> {
    let mut labels: IndexMap<String, String> = IndexMap::new();
    let mut keyed = Vec::new();

    for scoped in refs {
        let Some(schema) = catalog.entity_kind(&scoped.kind) else {
            continue;
        };
        let value = &scoped.reference.value;
        if defined(schema, value) {
            continue;
        }
        let key = scoped.key();
        labels
            .entry(key.clone())
            .or_insert_with(|| format!("{value} ({})", scoped.kind));
        keyed.push((key, &scoped.reference));
    }

    group_by_key(keyed)
        .iter()
        .map(|g| {
            let label = labels.get(&g.value).cloned().unwrap_or_else(|| g.value.clone());
            AffectedItem::new(&g.value, label, referenced_by(g))
        })
        .collect()
}

/// Subtypes not defined for the kind they are paired with
#[derive(Debug, Clone, Copy, Default)]
pub struct SubtypeReferences;

impl Rule for SubtypeReferences {
    fn id(&self) -> &'static str {
        "invalidSubtypeRef"
    }

    fn title(&self) -> &'static str {
        "Invalid subtype references"
    }

    fn message(&self) -> &'static str {
        "These subtypes are not defined for the entity kind they are paired with. Filters using them never match."
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Quality
    }

    fn check(&self, snapshot: &Snapshot) -> RuleOutcome {
        let catalog = Catalog::build(snapshot);
        let refs = collect::subtype_refs(snapshot);
        self.outcome(unknown_in_kind(&refs, &catalog, EntityKindSchema::has_subtype))
    }
}

/// Statuses not defined for the kind they are paired with
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusReferences;

impl Rule for StatusReferences {
    fn id(&self) -> &'static str {
        "invalidStatusRef"
    }

    fn title(&self) -> &'static str {
        "Invalid status references"
    }

    fn message(&self) -> &'static str {
        "These statuses are not defined for the entity kind they are paired with."
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Quality
    }

    fn check(&self, snapshot: &Snapshot) -> RuleOutcome {
        let catalog = Catalog::build(snapshot);
        let refs = collect::status_refs(snapshot);
        self.outcome(unknown_in_kind(&refs, &catalog, EntityKindSchema::has_status))
    }
}

/// Semantic-plane regions owned by undefined cultures
#[derive(Debug, Clone, Copy, Default)]
pub struct CultureReferences;

impl Rule for CultureReferences {
    fn id(&self) -> &'static str {
        "invalidCultureRef"
    }

    fn title(&self) -> &'static str {
        "Invalid culture references"
    }

    fn message(&self) -> &'static str {
        "Semantic plane regions refer to cultures that are not defined in the schema."
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Quality
    }

    fn check(&self, snapshot: &Snapshot) -> RuleOutcome {
        let catalog = Catalog::build(snapshot);
        let refs = collect::culture_refs(snapshot);
        self.outcome(unresolved_items(&refs, |c| catalog.has_culture(c)))
    }
}

/// Numeric fields outside their expected range
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericRanges;

impl Rule for NumericRanges {
    fn id(&self) -> &'static str {
        "numericRangeIssues"
    }

    fn title(&self) -> &'static str {
        "Values out of range"
    }

    fn message(&self) -> &'static str {
        "These values are outside their expected range and will behave unpredictably."
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Quality
    }

    fn check(&self, snapshot: &Snapshot) -> RuleOutcome {
        let mut findings = ObjectFindings::default();

        for pressure in &snapshot.pressures {
            let mut flag = |problem: String| {
                let key = format!("pressure:{}", pressure.id);
                findings.add(key, &pressure.id, pressure.label(), problem);
            };
            if let Some(v) = pressure.initial_value {
                if !(0.0..=100.0).contains(&v) {
                    flag(format!("initialValue {v} is outside [0, 100]"));
                }
            }
            if let Some(d) = pressure.decay {
                if d < 0.0 {
                    flag(format!("decay {d} is negative"));
                }
            }
        }

        for era in &snapshot.eras {
            let mut flag = |problem: String| {
                findings.add(format!("era:{}", era.id), &era.id, era.label(), problem);
            };
            for (generator_id, weight) in &era.template_weights {
                if *weight < 0.0 {
                    flag(format!("templateWeights.{generator_id} is {weight}"));
                }
            }
            for (system_id, modifier) in &era.system_modifiers {
                if *modifier < 0.0 {
                    flag(format!("systemModifiers.{system_id} is {modifier}"));
                }
            }
        }

        self.outcome(findings.into_items())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wcl_config::{CountSpec, CreationItem, Factor, Listing, SemanticPlane, SemanticRegion};
    use wcl_test_utils::{clean_snapshot, era, generator, inert_pressure};

    #[test]
    fn clean_snapshot_passes_all_quality_rules() {
        let s = clean_snapshot();
        assert!(SubtypeReferences.check(&s).is_clean());
        assert!(StatusReferences.check(&s).is_clean());
        assert!(CultureReferences.check(&s).is_clean());
        assert!(NumericRanges.check(&s).is_clean());
    }

    #[test]
    fn bad_subtype_on_known_kind_is_flagged() {
        let mut s = clean_snapshot();
        s.generators[0].creation = Listing::Items(vec![CreationItem {
            kind: Some("npc".into()),
            subtype: Some("wizard".into()),
            ..Default::default()
        }]);
        s.pressures[0].growth.positive_feedback.push(Factor::EntityCount {
            kind: Some("npc".into()),
            subtype: Some("wizard".into()),
            status: None,
            coefficient: 1.0,
            cap: None,
        });

        let issue = SubtypeReferences.check(&s).into_issue().unwrap();
        assert_eq!(issue.item_count(), 1);
        let item = &issue.affected_items[0];
        assert_eq!(item.id, "npc:wizard");
        assert_eq!(item.label, "wizard (npc)");
        assert_eq!(
            item.detail,
            "Referenced by: generator \"g1\" (creation), pressure \"fear\" (positive feedback)"
        );
    }

    #[test]
    fn ratio_and_status_ratio_subtypes_are_checked() {
        let mut s = clean_snapshot();
        let growth = &mut s.pressures[0].growth;
        growth.negative_feedback.push(Factor::Ratio {
            numerator: Some(CountSpec::EntityCount {
                kind: Some("npc".into()),
                subtype: Some("merchant".into()),
            }),
            denominator: Some(CountSpec::EntityCount {
                kind: Some("npc".into()),
                subtype: Some("lich".into()),
            }),
            coefficient: 1.0,
            fallback_value: 0.0,
            cap: None,
        });
        growth.positive_feedback.push(Factor::StatusRatio {
            kind: Some("npc".into()),
            subtype: Some("ghoul".into()),
            alive_status: None,
            coefficient: 1.0,
        });

        let issue = SubtypeReferences.check(&s).into_issue().unwrap();
        let ids: Vec<_> = issue.affected_items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["npc:ghoul", "npc:lich"]);
        assert_eq!(
            issue.affected_items[1].detail,
            "Referenced by: pressure \"fear\" (negative feedback, ratio denominator)"
        );
    }

    #[test]
    fn subtype_on_unknown_kind_is_skipped() {
        let mut s = clean_snapshot();
        s.generators.push({
            let mut g = generator("g2", "ghost");
            g.creation = Listing::Items(vec![CreationItem {
                kind: Some("ghost".into()),
                subtype: Some("wisp".into()),
                ..Default::default()
            }]);
            g
        });
        assert!(SubtypeReferences.check(&s).is_clean());
    }

    #[test]
    fn bad_status_is_flagged() {
        let mut s = clean_snapshot();
        s.generators[0].creation = Listing::Items(vec![CreationItem {
            kind: Some("faction".into()),
            status: Some("alive".into()),
            ..Default::default()
        }]);
        let issue = StatusReferences.check(&s).into_issue().unwrap();
        assert_eq!(issue.affected_items[0].id, "faction:alive");
    }

    #[test]
    fn region_culture_must_exist() {
        let mut s = clean_snapshot();
        s.schema.entity_kinds[0].semantic_plane = Some(SemanticPlane {
            regions: vec![
                SemanticRegion {
                    id: "north".into(),
                    label: None,
                    culture: Some("aurora".into()),
                },
                SemanticRegion {
                    id: "south".into(),
                    label: None,
                    culture: Some("umbra".into()),
                },
            ],
        });
        let issue = CultureReferences.check(&s).into_issue().unwrap();
        assert_eq!(issue.item_count(), 1);
        assert_eq!(issue.affected_items[0].id, "umbra");
        assert_eq!(
            issue.affected_items[0].detail,
            "Referenced by: entity kind \"npc\" (region \"south\")"
        );
    }

    #[test]
    fn numeric_ranges_join_per_object() {
        let mut s = Snapshot::default();
        let mut p = inert_pressure("fear");
        p.initial_value = Some(150.0);
        p.decay = Some(-1.0);
        s.pressures.push(p);
        s.eras.push(era("fear", &[("g1", -2.0)], &[("s1", -0.5)]));

        let issue = NumericRanges.check(&s).into_issue().unwrap();
        assert_eq!(issue.item_count(), 2);
        assert_eq!(
            issue.affected_items[0].detail,
            "initialValue 150 is outside [0, 100]; decay -1 is negative"
        );
        assert_eq!(
            issue.affected_items[1].detail,
            "templateWeights.g1 is -2; systemModifiers.s1 is -0.5"
        );
    }

    #[test]
    fn boundary_values_are_in_range() {
        let mut s = Snapshot::default();
        let mut p = inert_pressure("a");
        p.initial_value = Some(0.0);
        s.pressures.push(p);
        let mut p = inert_pressure("b");
        p.initial_value = Some(100.0);
        s.pressures.push(p);
        s.eras.push(era("e", &[("g", 0.0)], &[("s", 0.0)]));
        assert!(NumericRanges.check(&s).is_clean());
    }
}
