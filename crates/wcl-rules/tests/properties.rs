//! Property tests over generated snapshots

use proptest::prelude::*;
use wcl_config::{Generator, Listing, Snapshot};
use wcl_rules::rules::EntityKindReferences;
use wcl_rules::{validate, Rule, ValidationStatus};
use wcl_test_utils::{default_schema, era, generator, inert_pressure, modify_pressure};

const KINDS: &[&str] = &["npc", "faction", "ghost", "wraith"];
const PRESSURES: &[&str] = &["fear", "hope", "dread"];

type GeneratorSeed = (usize, usize, i32);
type EraSeed = Vec<(usize, i32)>;
type PressureSeed = (usize, i32);

fn build(generators: Vec<GeneratorSeed>, eras: Vec<EraSeed>, pressures: Vec<PressureSeed>) -> Snapshot {
    let mut snapshot = Snapshot {
        schema: default_schema(),
        ..Default::default()
    };

    for (i, (kind, pressure, delta)) in generators.into_iter().enumerate() {
        let mut g = generator(&format!("g{i}"), KINDS[kind]);
        g.state_updates = Listing::Items(vec![modify_pressure(PRESSURES[pressure], f64::from(delta))]);
        snapshot.generators.push(g);
    }

    for (i, weights) in eras.into_iter().enumerate() {
        let owned: Vec<(String, f64)> = weights
            .into_iter()
            .map(|(g, w)| (format!("g{g}"), f64::from(w)))
            .collect();
        let borrowed: Vec<(&str, f64)> = owned.iter().map(|(g, w)| (g.as_str(), *w)).collect();
        snapshot.eras.push(era(&format!("e{i}"), &borrowed, &[]));
    }

    for (pressure, decay) in pressures {
        let mut p = inert_pressure(PRESSURES[pressure]);
        p.decay = Some(f64::from(decay));
        snapshot.pressures.push(p);
    }

    snapshot
}

fn arb_snapshot() -> impl Strategy<Value = Snapshot> {
    (
        prop::collection::vec((0..KINDS.len(), 0..PRESSURES.len(), -2i32..3), 0..6),
        prop::collection::vec(prop::collection::vec((0..8usize, -1i32..3), 0..4), 0..3),
        prop::collection::vec((0..PRESSURES.len(), -1i32..2), 0..3),
    )
        .prop_map(|(g, e, p)| build(g, e, p))
}

fn kind_item_count(snapshot: &Snapshot) -> usize {
    EntityKindReferences
        .check(snapshot)
        .issue()
        .map_or(0, wcl_rules::Issue::item_count)
}

proptest! {
    #[test]
    fn prop_runs_are_idempotent(snapshot in arb_snapshot()) {
        prop_assert_eq!(validate(&snapshot), validate(&snapshot));
    }

    #[test]
    fn prop_status_follows_partition(snapshot in arb_snapshot()) {
        let result = validate(&snapshot);
        let expected = if !result.errors.is_empty() {
            ValidationStatus::Error
        } else if !result.warnings.is_empty() {
            ValidationStatus::Warning
        } else {
            ValidationStatus::Clean
        };
        prop_assert_eq!(result.status(), expected);
    }

    #[test]
    fn prop_extra_invalid_kind_never_shrinks_findings(
        snapshot in arb_snapshot(),
        suffix in 0..4usize,
    ) {
        let before = kind_item_count(&snapshot);
        let mut grown = snapshot;
        grown.generators.push(generator("extra", &format!("phantom_{suffix}")));
        prop_assert!(kind_item_count(&grown) >= before);
        prop_assert!(kind_item_count(&grown) >= 1);
    }

    #[test]
    fn prop_disabled_generator_changes_nothing(snapshot in arb_snapshot()) {
        let before = validate(&snapshot);
        let mut with_disabled = snapshot;
        with_disabled.generators.push(Generator {
            id: "switched_off".into(),
            enabled: Some(false),
            template: Some(serde_json::json!({})),
            state_updates: Listing::Items(vec![modify_pressure("nowhere", 5.0)]),
            ..generator("switched_off", "phantom")
        });
        prop_assert_eq!(validate(&with_disabled), before);
    }

    #[test]
    fn prop_errors_and_warnings_have_matching_severity(snapshot in arb_snapshot()) {
        let result = validate(&snapshot);
        prop_assert!(result.errors.iter().all(|i| i.severity == wcl_rules::Severity::Error));
        prop_assert!(result.warnings.iter().all(|i| i.severity == wcl_rules::Severity::Warning));
        prop_assert!(result.issues().all(|i| i.item_count() > 0));
    }
}
