// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use crate::attribute::{Attribute, AttributeType, AttributeValue, default_value};

/// The attribute holding the display name of an entity.
pub const NAME_ATTRIBUTE: &str = "name";

/// A dynamic type key together with the attribute values of one entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Classification {
    #[serde(rename = "type")]
    pub type_key: String,

    #[serde(default)]
    pub values: BTreeMap<String, AttributeValue>,
}

/// A dynamic type: a named schema of typed attributes.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DynamicType {
    pub key: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

/// Selects entities whose classification belongs to one dynamic type and
/// whose attribute values equal every rule value.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClassificationFilter {
    pub type_key: String,

    #[serde(default)]
    pub rules: Vec<FilterRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FilterRule {
    pub attribute: String,
    pub value: AttributeValue,
}

impl Classification {
    pub fn new(type_key: impl Into<String>) -> Self {
        Self {
            type_key: type_key.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.values.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: AttributeValue) {
        self.values.insert(key.into(), value);
    }

    pub fn with(mut self, key: impl Into<String>, value: AttributeValue) -> Self {
        self.set(key, value);
        self
    }

    /// The display name, empty if the classification has no textual name.
    pub fn name(&self) -> &str {
        self.get(NAME_ATTRIBUTE)
            .and_then(AttributeValue::as_str)
            .unwrap_or_default()
    }
}

impl DynamicType {
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.key)
    }

    pub fn attribute(&self, key: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.key == key)
    }

    /// A classification of this type with every attribute at its default.
    pub fn new_classification(&self) -> Classification {
        let mut classification = Classification::new(&self.key);
        for attr in &self.attributes {
            if let Some(v) = default_value(attr.kind) {
                classification.set(&attr.key, v);
            }
        }
        classification
    }

    /// A filter accepting every entity of this type.
    pub fn new_classification_filter(&self) -> ClassificationFilter {
        ClassificationFilter {
            type_key: self.key.clone(),
            rules: Vec::new(),
        }
    }

    /// Attributes rendered by the editors, the name first.
    pub fn editable_attributes(&self) -> impl Iterator<Item = &Attribute> {
        let name = self.attributes.iter().filter(|a| a.key == NAME_ATTRIBUTE);
        let rest = self.attributes.iter().filter(|a| a.key != NAME_ATTRIBUTE);
        name.chain(rest)
            .filter(|a| a.kind != AttributeType::Category || !a.categories.is_empty())
    }
}

impl ClassificationFilter {
    pub fn with_rule(mut self, attribute: impl Into<String>, value: AttributeValue) -> Self {
        self.rules.push(FilterRule {
            attribute: attribute.into(),
            value,
        });
        self
    }

    pub fn matches(&self, classification: &Classification) -> bool {
        classification.type_key == self.type_key
            && self
                .rules
                .iter()
                .all(|r| classification.get(&r.attribute) == Some(&r.value))
    }
}
