//! Reference records
//!
//! A [`Reference`] is one mention of an id somewhere in the snapshot. It
//! remembers who made the mention (`source_type` + `source_id`) and a
//! human-readable provenance string used in diagnostics.

use std::fmt::{self, Display, Formatter};

/// Kind of configuration object that owns a reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceType {
    /// A generator
    Generator,

    /// A pressure
    Pressure,

    /// A system
    System,

    /// An era
    Era,

    /// An entity kind in the schema
    EntityKind,
}

impl SourceType {
    /// Lowercase name used in provenance strings
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Generator => "generator",
            Self::Pressure => "pressure",
            Self::System => "system",
            Self::Era => "era",
            Self::EntityKind => "entity kind",
        }
    }
}

impl Display for SourceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One mention of an id
///
/// # Example
/// ```
/// use wcl_refs::{Reference, SourceType};
///
/// let r = Reference::new("npc", SourceType::Generator, "g1", "selection");
/// assert_eq!(r.source, r#"generator "g1" (selection)"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    /// Referenced id
    pub value: String,

    /// Human-readable provenance, e.g. `generator "g1" (creation)`
    pub source: String,

    /// Id of the owning object
    pub source_id: String,

    /// Type of the owning object
    pub source_type: SourceType,
}

impl Reference {
    /// Create reference; `location` names the field inside the owner
    #[must_use]
    pub fn new(
        value: impl Into<String>,
        source_type: SourceType,
        source_id: impl Into<String>,
        location: &str,
    ) -> Self {
        let source_id = source_id.into();
        Self {
            value: value.into(),
            source: format!("{source_type} \"{source_id}\" ({location})"),
            source_id,
            source_type,
        }
    }
}

/// A reference scoped to an entity kind (subtype or status)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopedReference {
    /// Entity kind the value must belong to
    pub kind: String,

    /// The subtype or status reference itself
    pub reference: Reference,
}

impl ScopedReference {
    /// Grouping key: `kind:value`
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}:{}", self.kind, self.reference.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_string_names_owner_and_location() {
        let r = Reference::new("ally_of", SourceType::System, "diplomacy", "rules");
        assert_eq!(r.source, "system \"diplomacy\" (rules)");
        assert_eq!(r.source_id, "diplomacy");
        assert_eq!(r.source_type, SourceType::System);
    }

    #[test]
    fn scoped_key_joins_kind_and_value() {
        let scoped = ScopedReference {
            kind: "npc".into(),
            reference: Reference::new("merchant", SourceType::Generator, "g", "creation"),
        };
        assert_eq!(scoped.key(), "npc:merchant");
    }
}
