//! Rule registry
//!
//! Provides [`RuleRegistry`], the ordered set of rules an executor runs.
//! Registration order is display order.

use crate::rule::Rule;
use crate::rules::{
    CultureReferences, EntityKindReferences, EraGeneratorReferences, EraSystemReferences,
    GeneratorMissingLineage, GeneratorShape, NumericRanges, OrphanGenerators, OrphanSystems,
    PressureIdReferences, PressureWithoutSinks, PressureWithoutSources,
    RelationshipKindReferences, StatusReferences, SubtypeReferences, ZeroWeightGenerators,
};

/// Ordered collection of rules
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create registry with the sixteen built-in rules
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(GeneratorShape);
        registry.register(EntityKindReferences);
        registry.register(RelationshipKindReferences);
        registry.register(PressureIdReferences);
        registry.register(EraGeneratorReferences);
        registry.register(EraSystemReferences);

        registry.register(PressureWithoutSources);
        registry.register(PressureWithoutSinks);
        registry.register(GeneratorMissingLineage);
        registry.register(OrphanGenerators);
        registry.register(OrphanSystems);
        registry.register(ZeroWeightGenerators);

        registry.register(SubtypeReferences);
        registry.register(StatusReferences);
        registry.register(CultureReferences);
        registry.register(NumericRanges);

        registry
    }

    /// Append a rule; a rule whose id is already registered is ignored
    pub fn register(&mut self, rule: impl Rule + 'static) {
        if self.get(rule.id()).is_some() {
            tracing::warn!("Rule {} already registered, ignoring", rule.id());
            return;
        }
        self.rules.push(Box::new(rule));
    }

    /// Look up a rule by issue id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&dyn Rule> {
        self.rules.iter().find(|r| r.id() == id).map(|r| &**r)
    }

    /// Issue ids in registration order
    #[must_use]
    pub fn ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    /// Get number of registered rules
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over rules in registration order
    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|r| &**r)
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry").field("rules", &self.ids()).finish()
    }
}
