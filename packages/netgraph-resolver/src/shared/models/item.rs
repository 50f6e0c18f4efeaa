//! Output item

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

use super::edge::EdgeDescriptor;

/// Sorted attribute map
///
/// Keys are kept in a `BTreeMap` so two resolutions of the same registry
/// object serialize identically. `Null` values are never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, Value>);

impl Attributes {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Build from (name, value) pairs, dropping nulls
    pub fn from_fields<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut attrs = Self::new();
        for (key, value) in fields {
            attrs.insert(key, value);
        }
        attrs
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        if !value.is_null() {
            self.0.insert(key.into(), value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Item validation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Item has no type")]
    MissingType,

    #[error("Item of type '{0}' has no scope")]
    MissingScope(String),

    #[error("Item of type '{0}' has no unique attribute name")]
    MissingUniqueAttribute(String),

    #[error("Item of type '{item_type}' has no value for unique attribute '{attribute}'")]
    MissingUniqueAttributeValue { item_type: String, attribute: String },
}

/// A graph node produced by an adapter
///
/// `(item_type, scope, unique_attribute_value())` identifies the item
/// globally and is stable across resolutions of the same registry object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(rename = "type")]
    pub item_type: String,
    pub scope: String,
    pub unique_attribute: String,
    pub attributes: Attributes,
    #[serde(default)]
    pub linked_item_queries: Vec<EdgeDescriptor>,
}

impl Item {
    pub fn new(
        item_type: impl Into<String>,
        scope: impl Into<String>,
        unique_attribute: impl Into<String>,
        attributes: Attributes,
    ) -> Self {
        Self {
            item_type: item_type.into(),
            scope: scope.into(),
            unique_attribute: unique_attribute.into(),
            attributes,
            linked_item_queries: Vec::new(),
        }
    }

    pub fn with_edges(mut self, edges: Vec<EdgeDescriptor>) -> Self {
        self.linked_item_queries = edges;
        self
    }

    /// Value of the unique attribute rendered as a string
    ///
    /// Strings are returned as-is, numbers and booleans via `to_string`.
    /// Arrays, objects and missing values yield `None`.
    pub fn unique_attribute_value(&self) -> Option<String> {
        match self.attributes.get(&self.unique_attribute)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Global reference string `type/scope/value`
    pub fn global_reference(&self) -> Option<String> {
        self.unique_attribute_value()
            .map(|value| format!("{}/{}/{}", self.item_type, self.scope, value))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.item_type.is_empty() {
            return Err(ValidationError::MissingType);
        }
        if self.scope.is_empty() {
            return Err(ValidationError::MissingScope(self.item_type.clone()));
        }
        if self.unique_attribute.is_empty() {
            return Err(ValidationError::MissingUniqueAttribute(
                self.item_type.clone(),
            ));
        }
        match self.unique_attribute_value() {
            Some(value) if !value.is_empty() => Ok(()),
            _ => Err(ValidationError::MissingUniqueAttributeValue {
                item_type: self.item_type.clone(),
                attribute: self.unique_attribute.clone(),
            }),
        }
    }
}
