//! The configuration snapshot consumed by a lint run

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::era::Era;
use crate::error::ConfigError;
use crate::generator::Generator;
use crate::lenient;
use crate::pressure::Pressure;
use crate::schema::Schema;
use crate::system::SystemEntry;

/// Immutable configuration snapshot
///
/// Every section defaults to empty, so a snapshot built from partial input
/// (or [`Snapshot::default`]) is always valid to lint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    /// Schema catalogs
    #[serde(deserialize_with = "lenient::or_default")]
    pub schema: Schema,

    /// Era timeline
    #[serde(deserialize_with = "lenient::items")]
    pub eras: Vec<Era>,

    /// Pressure definitions
    #[serde(deserialize_with = "lenient::items")]
    pub pressures: Vec<Pressure>,

    /// Generators, enabled and disabled
    #[serde(deserialize_with = "lenient::items")]
    pub generators: Vec<Generator>,

    /// Systems
    #[serde(deserialize_with = "lenient::items")]
    pub systems: Vec<SystemEntry>,

    /// Externally computed usage data, carried for display only
    #[serde(deserialize_with = "lenient::or_default")]
    pub usage_map: Option<UsageMap>,
}

impl Snapshot {
    /// Parse from JSON string
    ///
    /// # Errors
    /// Returns error if JSON is invalid or does not fit the snapshot shape
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse from YAML string
    ///
    /// # Errors
    /// Returns error if YAML is invalid or does not fit the snapshot shape
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Generators that take part in simulation
    pub fn enabled_generators(&self) -> impl Iterator<Item = &Generator> {
        self.generators.iter().filter(|g| g.is_enabled())
    }
}

/// Usage data computed by the host application
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UsageMap {
    /// Validation section
    #[serde(deserialize_with = "lenient::or_default")]
    pub validation: UsageValidation,
}

/// Validation section of the usage map
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UsageValidation {
    /// Orphans found by the host
    #[serde(deserialize_with = "lenient::items")]
    pub orphans: Vec<OrphanEntry>,
}

/// One host-reported orphan
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrphanEntry {
    /// Orphan type (e.g. `generator`)
    #[serde(rename = "type")]
    pub orphan_type: String,

    /// Remaining host-specific fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_document_is_empty_snapshot() {
        let snapshot = Snapshot::from_json("{}").unwrap();
        assert_eq!(snapshot, Snapshot::default());
    }

    #[test]
    fn yaml_and_json_agree() {
        let json = r#"{
            "schema": {"entityKinds": [{"kind": "npc"}], "relationshipKinds": [{"kind": "ally_of"}]},
            "eras": [{"id": "dawn", "templateWeights": {"g1": 1.5}, "systemModifiers": {"s1": 1}}],
            "generators": [{"id": "g1", "selection": {"strategy": "random", "kind": "npc"}}],
            "systems": [{"systemType": "graphContagion", "config": {"id": "s1", "pressureChanges": {"fear": -1}}}]
        }"#;
        let yaml = r"
schema:
  entityKinds:
    - kind: npc
  relationshipKinds:
    - kind: ally_of
eras:
  - id: dawn
    templateWeights:
      g1: 1.5
    systemModifiers:
      s1: 1
generators:
  - id: g1
    selection:
      strategy: random
      kind: npc
systems:
  - systemType: graphContagion
    config:
      id: s1
      pressureChanges:
        fear: -1
";
        let from_json = Snapshot::from_json(json).unwrap();
        let from_yaml = Snapshot::from_yaml(yaml).unwrap();
        assert_eq!(from_json, from_yaml);
        assert_eq!(from_json.systems[0].id(), "s1");
        assert_eq!(from_json.eras[0].template_weights["g1"], 1.5);
    }

    #[test]
    fn enabled_generators_skips_disabled() {
        let snapshot = Snapshot::from_json(
            r#"{"generators": [{"id": "a"}, {"id": "b", "enabled": false}, {"id": "c", "enabled": true}]}"#,
        )
        .unwrap();
        let ids: Vec<_> = snapshot.enabled_generators().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn usage_map_keeps_host_fields() {
        let snapshot = Snapshot::from_json(
            r#"{"usageMap": {"validation": {"orphans": [{"type": "generator", "id": "g9"}]}}}"#,
        )
        .unwrap();
        let orphans = &snapshot.usage_map.unwrap().validation.orphans;
        assert_eq!(orphans[0].orphan_type, "generator");
        assert_eq!(orphans[0].extra["id"], "g9");
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(
            Snapshot::from_json("[1, 2"),
            Err(ConfigError::InvalidJson(_))
        ));
    }
}
