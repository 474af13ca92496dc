//! Grouping references by offending value
//!
//! Diagnostics report one entry per distinct value, listing every distinct
//! place it was referenced from. Groups and their sources keep first-seen
//! order so repeated runs produce identical output.

use indexmap::{IndexMap, IndexSet};

use crate::reference::Reference;

/// All references sharing one value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceGroup {
    /// The shared value (or grouping key)
    pub value: String,

    /// Distinct provenance strings, first-seen order
    pub sources: Vec<String>,

    /// Number of references folded into this group
    pub occurrences: usize,
}

impl ReferenceGroup {
    /// Sources joined for display
    #[must_use]
    pub fn joined_sources(&self) -> String {
        self.sources.join(", ")
    }
}

/// Group references by their value
///
/// # Example
/// ```
/// use wcl_refs::{group_by_value, Reference, SourceType};
///
/// let refs = vec![
///     Reference::new("ghost", SourceType::Generator, "g1", "selection"),
///     Reference::new("ghost", SourceType::Generator, "g1", "creation"),
///     Reference::new("ghost", SourceType::Generator, "g1", "creation"),
/// ];
/// let groups = group_by_value(&refs);
/// assert_eq!(groups.len(), 1);
/// assert_eq!(groups[0].sources.len(), 2);
/// assert_eq!(groups[0].occurrences, 3);
/// ```
#[must_use]
pub fn group_by_value<'r>(refs: impl IntoIterator<Item = &'r Reference>) -> Vec<ReferenceGroup> {
    group_by_key(refs.into_iter().map(|r| (r.value.clone(), r)))
}

/// Group references by an explicit key
#[must_use]
pub fn group_by_key<'r>(
    keyed: impl IntoIterator<Item = (String, &'r Reference)>,
) -> Vec<ReferenceGroup> {
    let mut groups: IndexMap<String, (IndexSet<&str>, usize)> = IndexMap::new();
    for (key, reference) in keyed {
        let (sources, count) = groups.entry(key).or_default();
        sources.insert(reference.source.as_str());
        *count += 1;
    }

    groups
        .into_iter()
        .map(|(value, (sources, occurrences))| ReferenceGroup {
            value,
            sources: sources.into_iter().map(str::to_string).collect(),
            occurrences,
        })
        .collect()
}
