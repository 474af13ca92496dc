//! Three-state list fields
//!
//! Generator sections such as `creation` are expected to be arrays, but
//! authored configuration is not always well formed. [`Listing`] keeps the
//! difference between "absent", "present and a list" and "present but not a
//! list" so shape checks can report it while every other consumer just sees
//! a (possibly empty) slice.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// A list-valued field decoded leniently
#[derive(Debug, Clone, PartialEq)]
pub enum Listing<T> {
    /// Field missing or `null`
    Absent,

    /// Field is an array; elements that fail to decode are dropped
    Items(Vec<T>),

    /// Field is present but holds a non-array value
    NotAList,
}

impl<T> Listing<T> {
    /// Items as a slice; empty unless the field held an array
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[T] {
        match self {
            Self::Items(items) => items,
            Self::Absent | Self::NotAList => &[],
        }
    }

    /// Whether the field held an array
    #[inline]
    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, Self::Items(_))
    }

    /// Iterate over decoded items
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items().iter()
    }
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> From<Vec<T>> for Listing<T> {
    fn from(items: Vec<T>) -> Self {
        Self::Items(items)
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Listing<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Null => Self::Absent,
            Value::Array(raw) => Self::Items(crate::lenient::decode_elements(raw)),
            _ => Self::NotAList,
        })
    }
}
