//! Pressure definitions and feedback factors

use serde::Deserialize;

use crate::lenient;

/// A simulation pressure
///
/// Pressures are scalar world variables (fear, scarcity, ...) that rise and
/// fall each tick. `initial_value` is expected in `[0, 100]`, `decay` is
/// expected to be non-negative.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pressure {
    /// Pressure id
    pub id: String,

    /// Display name
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: Option<String>,

    /// Starting value
    #[serde(deserialize_with = "lenient::or_default")]
    pub initial_value: Option<f64>,

    /// Per-tick decay toward the floor
    #[serde(deserialize_with = "lenient::or_default")]
    pub decay: Option<f64>,

    /// Growth terms
    #[serde(deserialize_with = "lenient::or_default")]
    pub growth: Growth,
}

impl Pressure {
    /// Display label: name when set, id otherwise
    #[must_use]
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// Growth terms of a pressure
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Growth {
    /// Constant growth per tick
    #[serde(deserialize_with = "lenient::or_default")]
    pub base_growth: Option<f64>,

    /// Growth ceiling per tick
    #[serde(deserialize_with = "lenient::or_default")]
    pub max_growth: Option<f64>,

    /// Terms that raise the pressure
    #[serde(deserialize_with = "lenient::items")]
    pub positive_feedback: Vec<Factor>,

    /// Terms that lower the pressure
    #[serde(deserialize_with = "lenient::items")]
    pub negative_feedback: Vec<Factor>,
}

/// One feedback term
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Factor {
    /// Count of entities of a kind
    #[serde(rename_all = "camelCase")]
    EntityCount {
        /// Entity kind
        #[serde(default, deserialize_with = "lenient::or_default")]
        kind: Option<String>,
        /// Optional subtype filter
        #[serde(default, deserialize_with = "lenient::or_default")]
        subtype: Option<String>,
        /// Optional status filter
        #[serde(default, deserialize_with = "lenient::or_default")]
        status: Option<String>,
        /// Multiplier
        #[serde(default, deserialize_with = "lenient::or_default")]
        coefficient: f64,
        /// Contribution cap
        #[serde(default, deserialize_with = "lenient::or_default")]
        cap: Option<f64>,
    },

    /// Count of relationships of the given kinds
    #[serde(rename_all = "camelCase")]
    RelationshipCount {
        /// Relationship kinds counted
        #[serde(default, deserialize_with = "lenient::items")]
        relationship_kinds: Vec<String>,
        /// Multiplier
        #[serde(default, deserialize_with = "lenient::or_default")]
        coefficient: f64,
        /// Contribution cap
        #[serde(default, deserialize_with = "lenient::or_default")]
        cap: Option<f64>,
    },

    /// Count of entities carrying any of the tags
    #[serde(rename_all = "camelCase")]
    TagCount {
        /// Tags counted
        #[serde(default, deserialize_with = "lenient::items")]
        tags: Vec<String>,
        /// Multiplier
        #[serde(default, deserialize_with = "lenient::or_default")]
        coefficient: f64,
    },

    /// Ratio of two counts
    #[serde(rename_all = "camelCase")]
    Ratio {
        /// Numerator count
        #[serde(default, deserialize_with = "lenient::or_default")]
        numerator: Option<CountSpec>,
        /// Denominator count
        #[serde(default, deserialize_with = "lenient::or_default")]
        denominator: Option<CountSpec>,
        /// Multiplier
        #[serde(default, deserialize_with = "lenient::or_default")]
        coefficient: f64,
        /// Value used when the denominator is zero
        #[serde(default, deserialize_with = "lenient::or_default")]
        fallback_value: f64,
        /// Contribution cap
        #[serde(default, deserialize_with = "lenient::or_default")]
        cap: Option<f64>,
    },

    /// Share of a kind's entities that are in the alive status
    #[serde(rename_all = "camelCase")]
    StatusRatio {
        /// Entity kind
        #[serde(default, deserialize_with = "lenient::or_default")]
        kind: Option<String>,
        /// Optional subtype filter
        #[serde(default, deserialize_with = "lenient::or_default")]
        subtype: Option<String>,
        /// Status counted as alive
        #[serde(default, deserialize_with = "lenient::or_default")]
        alive_status: Option<String>,
        /// Multiplier
        #[serde(default, deserialize_with = "lenient::or_default")]
        coefficient: f64,
    },

    /// Share of relationships that cross culture boundaries
    #[serde(rename_all = "camelCase")]
    CrossCultureRatio {
        /// Relationship kinds considered
        #[serde(default, deserialize_with = "lenient::items")]
        relationship_kinds: Vec<String>,
        /// Multiplier
        #[serde(default, deserialize_with = "lenient::or_default")]
        coefficient: f64,
    },

    /// Unrecognised factor type
    #[serde(other)]
    Unknown,
}

/// Count specification nested inside a ratio factor
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CountSpec {
    /// Count of entities of a kind
    #[serde(rename_all = "camelCase")]
    EntityCount {
        /// Entity kind
        #[serde(default, deserialize_with = "lenient::or_default")]
        kind: Option<String>,
        /// Optional subtype filter
        #[serde(default, deserialize_with = "lenient::or_default")]
        subtype: Option<String>,
    },

    /// Count of relationships of the given kinds
    #[serde(rename_all = "camelCase")]
    RelationshipCount {
        /// Relationship kinds counted
        #[serde(default, deserialize_with = "lenient::items")]
        relationship_kinds: Vec<String>,
    },

    /// Count of all entities
    TotalEntities,

    /// Unrecognised count type
    #[serde(other)]
    Unknown,
}
