//! Era timeline

use indexmap::IndexMap;
use serde::Deserialize;

use crate::lenient;

/// A timeline phase that reweights generators and systems
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Era {
    /// Era id
    pub id: String,

    /// Display name
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: Option<String>,

    /// Generator id to selection weight
    #[serde(deserialize_with = "lenient::numbers")]
    pub template_weights: IndexMap<String, f64>,

    /// System id to activity modifier
    #[serde(deserialize_with = "lenient::numbers")]
    pub system_modifiers: IndexMap<String, f64>,
}

impl Era {
    /// Display label: name when set, id otherwise
    #[must_use]
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}
