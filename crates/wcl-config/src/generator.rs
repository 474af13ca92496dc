//! Declarative generators

use serde::Deserialize;
use serde_json::Value;

use crate::lenient;
use crate::listing::Listing;

/// State update type that changes a pressure
pub const MODIFY_PRESSURE: &str = "modify_pressure";

/// A generator: when and how entities and relationships are created
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Generator {
    /// Generator id
    pub id: String,

    /// Display name
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: Option<String>,

    /// `Some(false)` disables the generator; absent means enabled
    #[serde(deserialize_with = "lenient::or_default")]
    pub enabled: Option<bool>,

    /// Legacy wrapper from the pre-declarative format
    pub template: Option<Value>,

    /// Target selection
    #[serde(deserialize_with = "lenient::or_default")]
    pub selection: Option<Selection>,

    /// Entities created
    pub creation: Listing<CreationItem>,

    /// Relationships created
    pub relationships: Listing<RelationshipItem>,

    /// State updates applied when the generator fires
    pub state_updates: Listing<StateUpdate>,

    /// Generator contract
    #[serde(deserialize_with = "lenient::or_default")]
    pub contract: Option<Contract>,

    /// Applicability rule tree
    #[serde(deserialize_with = "lenient::or_default")]
    pub applicability: Option<Applicability>,
}

impl Generator {
    /// Whether the generator takes part in simulation
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled != Some(false)
    }

    /// Display label: name when set, id otherwise
    #[must_use]
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Whether the contract or any creation item declares lineage
    #[must_use]
    pub fn has_lineage(&self) -> bool {
        self.contract.as_ref().is_some_and(|c| c.lineage.is_some())
            || self.creation.iter().any(|c| c.lineage.is_some())
    }
}

/// Target selection of a generator
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Selection {
    /// Selection strategy
    #[serde(deserialize_with = "lenient::or_default")]
    pub strategy: Option<String>,

    /// Entity kind selected
    #[serde(deserialize_with = "lenient::or_default")]
    pub kind: Option<String>,
}

/// One created entity
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreationItem {
    /// Entity kind
    #[serde(deserialize_with = "lenient::or_default")]
    pub kind: Option<String>,

    /// Entity subtype
    #[serde(deserialize_with = "lenient::or_default")]
    pub subtype: Option<String>,

    /// Initial status
    #[serde(deserialize_with = "lenient::or_default")]
    pub status: Option<String>,

    /// Lineage link to an existing entity
    #[serde(deserialize_with = "lenient::or_default")]
    pub lineage: Option<Lineage>,
}

/// Lineage declaration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Lineage {
    /// Relationship kind used for the lineage link
    #[serde(deserialize_with = "lenient::or_default")]
    pub relationship_kind: Option<String>,
}

/// One created relationship
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RelationshipItem {
    /// Relationship kind
    #[serde(deserialize_with = "lenient::or_default")]
    pub kind: Option<String>,
}

/// One state update
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StateUpdate {
    /// Update type (e.g. `modify_pressure`)
    #[serde(rename = "type")]
    #[serde(deserialize_with = "lenient::or_default")]
    pub update_type: Option<String>,

    /// Target pressure for `modify_pressure`
    #[serde(deserialize_with = "lenient::or_default")]
    pub pressure_id: Option<String>,

    /// Amount applied
    #[serde(deserialize_with = "lenient::or_default")]
    pub delta: Option<f64>,
}

impl StateUpdate {
    /// Target pressure if this update modifies one
    #[must_use]
    pub fn modified_pressure(&self) -> Option<&str> {
        if self.update_type.as_deref() == Some(MODIFY_PRESSURE) {
            self.pressure_id.as_deref()
        } else {
            None
        }
    }
}

/// Generator contract
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contract {
    /// Lineage declared for all created entities
    #[serde(deserialize_with = "lenient::or_default")]
    pub lineage: Option<Lineage>,
}

/// Applicability rule tree root
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Applicability {
    /// Top-level rules
    #[serde(deserialize_with = "lenient::items")]
    pub rules: Vec<ApplicabilityRule>,
}

/// Node of the applicability rule tree; nests through `rules`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicabilityRule {
    /// Entity kind tested
    #[serde(deserialize_with = "lenient::or_default")]
    pub kind: Option<String>,

    /// Entity subtype tested
    #[serde(deserialize_with = "lenient::or_default")]
    pub subtype: Option<String>,

    /// Child rules
    #[serde(deserialize_with = "lenient::items")]
    pub rules: Vec<ApplicabilityRule>,
}
