//! Format and reference rules
//!
//! Findings here would crash the simulation or make it silently skip work,
//! so every rule in this module reports at error severity.

use wcl_config::{Generator, Listing, Snapshot};
use wcl_refs::{collect, Catalog};

use super::{unresolved_items, ObjectFindings};
use crate::rule::{Rule, RuleCategory, RuleOutcome};

/// Enabled generators that do not follow the declarative shape
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneratorShape;

impl GeneratorShape {
    /// Every violated shape condition of one generator, in a fixed order
    #[must_use]
    pub fn violations(generator: &Generator) -> Vec<String> {
        let mut violations = Vec::new();

        if generator.template.is_some() {
            violations.push("uses legacy \"template\" wrapper".to_string());
        }

        let selection = generator.selection.as_ref();
        let missing = |field: Option<&String>| field.map_or(true, |v| v.is_empty());
        if missing(selection.and_then(|s| s.strategy.as_ref())) {
            violations.push("missing \"selection.strategy\"".to_string());
        }
        if missing(selection.and_then(|s| s.kind.as_ref())) {
            violations.push("missing \"selection.kind\"".to_string());
        }

        list_violation("creation", &generator.creation, &mut violations);
        list_violation("relationships", &generator.relationships, &mut violations);
        list_violation("stateUpdates", &generator.state_updates, &mut violations);

        violations
    }
}

fn list_violation<T>(field: &str, listing: &Listing<T>, out: &mut Vec<String>) {
    match listing {
        Listing::Items(_) => {}
        Listing::Absent => out.push(format!("missing \"{field}\" array")),
        Listing::NotAList => out.push(format!("\"{field}\" is not an array")),
    }
}

impl Rule for GeneratorShape {
    fn id(&self) -> &'static str {
        "invalidGeneratorFormat"
    }

    fn title(&self) -> &'static str {
        "Invalid generator format"
    }

    fn message(&self) -> &'static str {
        "These generators do not use the declarative generator shape. The simulation cannot load them."
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Format
    }

    fn check(&self, snapshot: &Snapshot) -> RuleOutcome {
        let mut findings = ObjectFindings::default();
        for generator in snapshot.enabled_generators() {
            for violation in Self::violations(generator) {
                findings.add(generator.id.clone(), &generator.id, generator.label(), violation);
            }
        }
        self.outcome(findings.into_items())
    }
}

/// Entity kinds referenced but missing from the schema
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityKindReferences;

impl Rule for EntityKindReferences {
    fn id(&self) -> &'static str {
        "invalidEntityKind"
    }

    fn title(&self) -> &'static str {
        "Invalid entity kind references"
    }

    fn message(&self) -> &'static str {
        "These entity kinds are referenced but not defined in the schema. Generators and pressures using them will fail or never match."
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Format
    }

    fn check(&self, snapshot: &Snapshot) -> RuleOutcome {
        let catalog = Catalog::build(snapshot);
        let refs = collect::entity_kind_refs(snapshot);
        self.outcome(unresolved_items(&refs, |k| catalog.has_entity_kind(k)))
    }
}

/// Relationship kinds referenced but missing from the schema
#[derive(Debug, Clone, Copy, Default)]
pub struct RelationshipKindReferences;

impl Rule for RelationshipKindReferences {
    fn id(&self) -> &'static str {
        "invalidRelationshipKind"
    }

    fn title(&self) -> &'static str {
        "Invalid relationship kind references"
    }

    fn message(&self) -> &'static str {
        "These relationship kinds are referenced but not defined in the schema. Relationships of these kinds cannot be created or counted."
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Format
    }

    fn check(&self, snapshot: &Snapshot) -> RuleOutcome {
        let catalog = Catalog::build(snapshot);
        let refs = collect::relationship_kind_refs(snapshot);
        self.outcome(unresolved_items(&refs, |k| catalog.has_relationship_kind(k)))
    }
}

/// Pressure ids changed by generators or systems that do not exist
#[derive(Debug, Clone, Copy, Default)]
pub struct PressureIdReferences;

impl Rule for PressureIdReferences {
    fn id(&self) -> &'static str {
        "invalidPressureId"
    }

    fn title(&self) -> &'static str {
        "Invalid pressure references"
    }

    fn message(&self) -> &'static str {
        "These pressure ids are modified by generators or systems but no such pressure exists. The changes are silently dropped."
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Format
    }

    fn check(&self, snapshot: &Snapshot) -> RuleOutcome {
        let catalog = Catalog::build(snapshot);
        let refs = collect::pressure_id_refs(snapshot);
        self.outcome(unresolved_items(&refs, |p| catalog.has_pressure(p)))
    }
}

/// Era template weights naming generators that do not exist
#[derive(Debug, Clone, Copy, Default)]
pub struct EraGeneratorReferences;

impl Rule for EraGeneratorReferences {
    fn id(&self) -> &'static str {
        "invalidEraTemplateRef"
    }

    fn title(&self) -> &'static str {
        "Eras reference unknown generators"
    }

    fn message(&self) -> &'static str {
        "These generator ids appear in an era's template weights but no such generator exists."
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Format
    }

    fn check(&self, snapshot: &Snapshot) -> RuleOutcome {
        let catalog = Catalog::build(snapshot);
        let refs = collect::generator_id_refs(snapshot);
        self.outcome(unresolved_items(&refs, |g| catalog.has_generator(g)))
    }
}

/// Era system modifiers naming systems that do not exist
#[derive(Debug, Clone, Copy, Default)]
pub struct EraSystemReferences;

impl Rule for EraSystemReferences {
    fn id(&self) -> &'static str {
        "invalidEraSystemRef"
    }

    fn title(&self) -> &'static str {
        "Eras reference unknown systems"
    }

    fn message(&self) -> &'static str {
        "These system ids appear in an era's system modifiers but no such system exists."
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Format
    }

    fn check(&self, snapshot: &Snapshot) -> RuleOutcome {
        let catalog = Catalog::build(snapshot);
        let refs = collect::system_id_refs(snapshot);
        self.outcome(unresolved_items(&refs, |s| catalog.has_system(s)))
    }
}
