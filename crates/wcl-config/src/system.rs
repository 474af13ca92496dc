//! Simulation systems
//!
//! Systems carry free-form per-tick configuration. Only the fields that
//! reference other configuration objects are modelled here; everything else
//! is ignored on decode.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::lenient;

/// A system as stored in the snapshot
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemEntry {
    /// System implementation type (e.g. `graphContagion`)
    #[serde(deserialize_with = "lenient::or_default")]
    pub system_type: Option<String>,

    /// System configuration; carries the system id
    #[serde(deserialize_with = "lenient::or_default")]
    pub config: SystemConfig,
}

impl SystemEntry {
    /// System id
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.config.id
    }
}

/// Configuration block of a system
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemConfig {
    /// System id
    pub id: String,

    /// Display name
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: Option<String>,

    /// Contagion spread settings
    #[serde(deserialize_with = "lenient::or_default")]
    pub contagion: Option<Contagion>,

    /// Transmission vectors
    #[serde(deserialize_with = "lenient::items")]
    pub vectors: Vec<Vector>,

    /// Action taken on infection
    #[serde(deserialize_with = "lenient::or_default")]
    pub infection_action: Option<InfectionAction>,

    /// Shared-relationship metric
    #[serde(deserialize_with = "lenient::or_default")]
    pub metric: Option<SharedMetric>,

    /// Evolution rules
    #[serde(deserialize_with = "lenient::items")]
    pub rules: Vec<SystemRule>,

    /// Pressure id to per-tick delta
    #[serde(deserialize_with = "lenient::numbers")]
    pub pressure_changes: IndexMap<String, f64>,
}

impl SystemConfig {
    /// Display label: name when set, id otherwise
    #[must_use]
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// Contagion settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contagion {
    /// Relationship kind the contagion spreads along
    #[serde(deserialize_with = "lenient::or_default")]
    pub relationship_kind: Option<String>,
}

/// Transmission vector
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Vector {
    /// Relationship kind used as a vector
    #[serde(deserialize_with = "lenient::or_default")]
    pub relationship_kind: Option<String>,
}

/// Infection action
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InfectionAction {
    /// Relationship kind created on infection
    #[serde(deserialize_with = "lenient::or_default")]
    pub relationship_kind: Option<String>,
}

/// Shared-relationship metric
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SharedMetric {
    /// Relationship kind whose sharing is measured
    #[serde(deserialize_with = "lenient::or_default")]
    pub shared_relationship_kind: Option<String>,
}

/// Evolution rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemRule {
    /// Action applied when the rule matches
    #[serde(deserialize_with = "lenient::or_default")]
    pub action: Option<SystemAction>,
}

/// Rule action
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemAction {
    /// Relationship kind the action creates or removes
    #[serde(deserialize_with = "lenient::or_default")]
    pub kind: Option<String>,
}
