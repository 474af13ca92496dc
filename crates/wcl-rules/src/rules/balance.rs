//! Balance rules
//!
//! The simulation still runs with these findings, but part of it never
//! moves: pressures pinned at a bound, generators or systems that never
//! fire.

use std::collections::HashSet;

use indexmap::IndexMap;
use wcl_config::{Pressure, Snapshot};
use wcl_refs::{collect, is_always_running};

use super::ObjectFindings;
use crate::rule::{Rule, RuleCategory, RuleOutcome};

/// Direction a pressure is pushed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

/// Whether anything in the snapshot drives `pressure` in `direction`
fn has_driver(snapshot: &Snapshot, pressure: &Pressure, direction: Direction) -> bool {
    let pushes = |delta: f64| match direction {
        Direction::Up => delta > 0.0,
        Direction::Down => delta < 0.0,
    };

    let external = collect::pressure_deltas(snapshot)
        .iter()
        .any(|(r, delta)| r.value == pressure.id && matches!(delta, Some(d) if pushes(*d)));
    if external {
        return true;
    }

    let growth = &pressure.growth;
    match direction {
        Direction::Up => {
            growth.base_growth.is_some_and(|g| g > 0.0) || !growth.positive_feedback.is_empty()
        }
        Direction::Down => {
            pressure.decay.is_some_and(|d| d > 0.0) || !growth.negative_feedback.is_empty()
        }
    }
}

fn undriven_pressures(snapshot: &Snapshot, direction: Direction, detail: &str) -> ObjectFindings {
    let mut findings = ObjectFindings::default();
    for pressure in &snapshot.pressures {
        if !has_driver(snapshot, pressure, direction) {
            findings.add(pressure.id.clone(), &pressure.id, pressure.label(), detail.to_string());
        }
    }
    findings
}

/// Pressures nothing ever raises
#[derive(Debug, Clone, Copy, Default)]
pub struct PressureWithoutSources;

impl Rule for PressureWithoutSources {
    fn id(&self) -> &'static str {
        "pressureWithoutSources"
    }

    fn title(&self) -> &'static str {
        "Pressures without sources"
    }

    fn message(&self) -> &'static str {
        "Nothing raises these pressures. They decay toward their floor and stay there."
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Balance
    }

    fn check(&self, snapshot: &Snapshot) -> RuleOutcome {
        let findings = undriven_pressures(
            snapshot,
            Direction::Up,
            "no positive stateUpdate or pressureChange, baseGrowth is not positive and positiveFeedback is empty",
        );
        self.outcome(findings.into_items())
    }
}

/// Pressures nothing ever lowers
#[derive(Debug, Clone, Copy, Default)]
pub struct PressureWithoutSinks;

impl Rule for PressureWithoutSinks {
    fn id(&self) -> &'static str {
        "pressureWithoutSinks"
    }

    fn title(&self) -> &'static str {
        "Pressures without sinks"
    }

    fn message(&self) -> &'static str {
        "Nothing lowers these pressures. They climb to their ceiling and saturate."
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Balance
    }

    fn check(&self, snapshot: &Snapshot) -> RuleOutcome {
        let findings = undriven_pressures(
            snapshot,
            Direction::Down,
            "no negative stateUpdate or pressureChange, decay is not positive and negativeFeedback is empty",
        );
        self.outcome(findings.into_items())
    }
}

/// Generators that create entities without declaring lineage
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneratorMissingLineage;

impl Rule for GeneratorMissingLineage {
    fn id(&self) -> &'static str {
        "generatorMissingLineage"
    }

    fn title(&self) -> &'static str {
        "Generators missing lineage"
    }

    fn message(&self) -> &'static str {
        "These generators create entities without declaring lineage, so new entities are not connected to existing ones."
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Balance
    }

    fn check(&self, snapshot: &Snapshot) -> RuleOutcome {
        let mut findings = ObjectFindings::default();
        for generator in snapshot.enabled_generators() {
            let created = generator.creation.items().len();
            if created > 0 && !generator.has_lineage() {
                let noun = if created == 1 { "entity" } else { "entities" };
                findings.add(
                    generator.id.clone(),
                    &generator.id,
                    generator.label(),
                    format!("creates {created} {noun} but sets neither contract.lineage nor creation lineage"),
                );
            }
        }
        self.outcome(findings.into_items())
    }
}

/// Enabled generators no era lists in its template weights
#[derive(Debug, Clone, Copy, Default)]
pub struct OrphanGenerators;

impl Rule for OrphanGenerators {
    fn id(&self) -> &'static str {
        "orphanGenerators"
    }

    fn title(&self) -> &'static str {
        "Generators not used by any era"
    }

    fn message(&self) -> &'static str {
        "These enabled generators are not listed in any era's template weights and will never run."
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Balance
    }

    fn check(&self, snapshot: &Snapshot) -> RuleOutcome {
        let referenced: HashSet<String> = collect::generator_id_refs(snapshot)
            .into_iter()
            .map(|r| r.value)
            .collect();

        let mut findings = ObjectFindings::default();
        for generator in snapshot.enabled_generators() {
            if !referenced.contains(&generator.id) {
                findings.add(
                    generator.id.clone(),
                    &generator.id,
                    generator.label(),
                    "not listed in any era's templateWeights".to_string(),
                );
            }
        }
        self.outcome(findings.into_items())
    }
}

/// Systems no era lists in its system modifiers
///
/// Framework systems that always run are exempt.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrphanSystems;

impl Rule for OrphanSystems {
    fn id(&self) -> &'static str {
        "orphanSystems"
    }

    fn title(&self) -> &'static str {
        "Systems not used by any era"
    }

    fn message(&self) -> &'static str {
        "These systems are not listed in any era's system modifiers and will never run."
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Balance
    }

    fn check(&self, snapshot: &Snapshot) -> RuleOutcome {
        let referenced: HashSet<String> = collect::system_id_refs(snapshot)
            .into_iter()
            .map(|r| r.value)
            .collect();

        let mut findings = ObjectFindings::default();
        for system in &snapshot.systems {
            let id = system.id();
            if !referenced.contains(id) && !is_always_running(id) {
                findings.add(
                    id.to_string(),
                    id,
                    system.config.label(),
                    "not listed in any era's systemModifiers".to_string(),
                );
            }
        }
        self.outcome(findings.into_items())
    }
}

/// Generators listed by eras but never with a positive weight
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroWeightGenerators;

impl Rule for ZeroWeightGenerators {
    fn id(&self) -> &'static str {
        "zeroWeightGenerators"
    }

    fn title(&self) -> &'static str {
        "Generators with zero weight"
    }

    fn message(&self) -> &'static str {
        "These generators are listed in eras but never with a positive weight, so they never run."
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Balance
    }

    fn check(&self, snapshot: &Snapshot) -> RuleOutcome {
        // generator id -> every (era, weight) that lists it
        let mut weights: IndexMap<&str, Vec<(&str, f64)>> = IndexMap::new();
        for era in &snapshot.eras {
            for (generator_id, weight) in &era.template_weights {
                weights
                    .entry(generator_id.as_str())
                    .or_default()
                    .push((era.id.as_str(), *weight));
            }
        }

        let mut findings = ObjectFindings::default();
        for generator in snapshot.enabled_generators() {
            let Some(listed) = weights.get(generator.id.as_str()) else {
                continue;
            };
            if listed.iter().any(|(_, w)| *w > 0.0) {
                continue;
            }
            let detail = listed
                .iter()
                .map(|(era, w)| format!("weight {w} in era \"{era}\""))
                .collect::<Vec<_>>()
                .join(", ");
            findings.add(generator.id.clone(), &generator.id, generator.label(), detail);
        }
        self.outcome(findings.into_items())
    }
}
