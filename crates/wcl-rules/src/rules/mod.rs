//! The built-in rules
//!
//! - [`format`]: shape and reference checks (errors)
//! - [`balance`]: simulation dynamics checks (warnings)
//! - [`quality`]: authoring checks (warnings)

use indexmap::IndexMap;
use wcl_refs::{group_by_value, Reference, ReferenceGroup};

use crate::issue::AffectedItem;

pub mod balance;
pub mod format;
pub mod quality;

pub use balance::{
    GeneratorMissingLineage, OrphanGenerators, OrphanSystems, PressureWithoutSinks,
    PressureWithoutSources, ZeroWeightGenerators,
};
pub use format::{
    EntityKindReferences, EraGeneratorReferences, EraSystemReferences, GeneratorShape,
    PressureIdReferences, RelationshipKindReferences,
};
pub use quality::{CultureReferences, NumericRanges, StatusReferences, SubtypeReferences};

/// Detail line for a reference group
pub(crate) fn referenced_by(group: &ReferenceGroup) -> String {
    format!("Referenced by: {}", group.joined_sources())
}

/// One affected item per distinct value that fails to resolve
pub(crate) fn unresolved_items(
    refs: &[Reference],
    resolves: impl Fn(&str) -> bool,
) -> Vec<AffectedItem> {
    let unresolved = refs.iter().filter(|r| !resolves(&r.value));
    group_by_value(unresolved)
        .iter()
        .map(|g| AffectedItem::new(&g.value, &g.value, referenced_by(g)))
        .collect()
}

/// Collects problems per object and joins them into one item each
#[derive(Debug, Default)]
pub(crate) struct ObjectFindings {
    items: IndexMap<String, (String, String, Vec<String>)>,
}

impl ObjectFindings {
    /// Record a problem; `key` distinguishes objects that share an id
    pub(crate) fn add(&mut self, key: String, id: &str, label: &str, problem: String) {
        let (_, _, problems) = self
            .items
            .entry(key)
            .or_insert_with(|| (id.to_string(), label.to_string(), Vec::new()));
        if !problems.contains(&problem) {
            problems.push(problem);
        }
    }

    pub(crate) fn into_items(self) -> Vec<AffectedItem> {
        self.items
            .into_values()
            .map(|(id, label, problems)| AffectedItem::new(id, label, problems.join("; ")))
            .collect()
    }
}
