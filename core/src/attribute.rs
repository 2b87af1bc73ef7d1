// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Typed attribute values of dynamic types.
//!
//! Every attribute carries a type tag; parsing, rendering and input filtering
//! are plain functions keyed by that tag.

use std::fmt;

use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The type tag of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    /// Free text.
    String,

    /// Signed integer.
    Int,

    /// Yes / no.
    Boolean,

    /// Calendar date without time.
    Date,

    /// One of the categories listed by the attribute definition.
    Category,
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AttributeType::String => "string",
            AttributeType::Int => "int",
            AttributeType::Boolean => "boolean",
            AttributeType::Date => "date",
            AttributeType::Category => "category",
        };
        f.write_str(s)
    }
}

/// A value of some attribute, tagged with its type.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeValue {
    String(String),
    Int(i64),
    Boolean(bool),
    Date(NaiveDate),
    Category(String),
}

impl AttributeValue {
    /// The type tag of this value.
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            AttributeValue::String(_) => AttributeType::String,
            AttributeValue::Int(_) => AttributeType::Int,
            AttributeValue::Boolean(_) => AttributeType::Boolean,
            AttributeValue::Date(_) => AttributeType::Date,
            AttributeValue::Category(_) => AttributeType::Category,
        }
    }

    /// The textual content, for string and category values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) | AttributeValue::Category(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttributeValue::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_value(self))
    }
}

/// Error raised when text cannot be turned into a value of an attribute type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttributeError {
    #[error("invalid {kind} value: {input:?}")]
    Invalid { kind: AttributeType, input: String },

    #[error("unknown category {input:?} for attribute {attribute}")]
    UnknownCategory { attribute: String, input: String },
}

/// Parses user input into a value of the given type.
///
/// An empty integer field reads as `0`, matching what an untouched numeric
/// input shows.
pub fn parse_value(kind: AttributeType, input: &str) -> Result<AttributeValue, AttributeError> {
    let invalid = || AttributeError::Invalid {
        kind,
        input: input.to_owned(),
    };

    match kind {
        AttributeType::String => Ok(AttributeValue::String(input.to_owned())),
        AttributeType::Category => Ok(AttributeValue::Category(input.trim().to_owned())),
        AttributeType::Int => {
            let v = input.trim();
            if v.is_empty() {
                return Ok(AttributeValue::Int(0));
            }
            v.parse().map(AttributeValue::Int).map_err(|_| invalid())
        }
        AttributeType::Boolean => match input.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(AttributeValue::Boolean(true)),
            "false" | "no" | "0" | "" => Ok(AttributeValue::Boolean(false)),
            _ => Err(invalid()),
        },
        AttributeType::Date => NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
            .map(AttributeValue::Date)
            .map_err(|_| invalid()),
    }
}

/// Renders a value the way an input widget displays it.
pub fn format_value(value: &AttributeValue) -> String {
    match value {
        AttributeValue::String(s) | AttributeValue::Category(s) => s.clone(),
        AttributeValue::Int(v) => v.to_string(),
        AttributeValue::Boolean(true) => "yes".to_owned(),
        AttributeValue::Boolean(false) => "no".to_owned(),
        AttributeValue::Date(d) => d.format(DATE_FORMAT).to_string(),
    }
}

/// The value a freshly created classification holds for the given type.
pub fn default_value(kind: AttributeType) -> Option<AttributeValue> {
    match kind {
        AttributeType::String => Some(AttributeValue::String(String::new())),
        AttributeType::Int => Some(AttributeValue::Int(0)),
        AttributeType::Boolean => Some(AttributeValue::Boolean(false)),
        AttributeType::Date | AttributeType::Category => None,
    }
}

/// Whether a typed character may be inserted at `index` of `current`.
pub fn accepts_char(kind: AttributeType, current: &str, index: usize, c: char) -> bool {
    match kind {
        AttributeType::Int => c.is_ascii_digit() || (c == '-' && index == 0 && !current.starts_with('-')),
        AttributeType::Date => c.is_ascii_digit() || c == '-',
        AttributeType::Boolean => false,
        AttributeType::String | AttributeType::Category => !c.is_control(),
    }
}

/// Definition of an attribute within a dynamic type.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Attribute {
    pub key: String,

    /// Human readable label, falls back to the key.
    #[serde(default)]
    pub name: Option<String>,

    #[serde(rename = "type")]
    pub kind: AttributeType,

    /// Allowed values of a category attribute.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
}

impl Attribute {
    pub fn new(key: impl Into<String>, kind: AttributeType) -> Self {
        Self {
            key: key.into(),
            name: None,
            kind,
            categories: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.key)
    }

    /// Parses input for this attribute, checking category membership.
    pub fn parse(&self, input: &str) -> Result<AttributeValue, AttributeError> {
        let value = parse_value(self.kind, input)?;
        if let AttributeValue::Category(c) = &value
            && !self.categories.iter().any(|a| a == c)
        {
            return Err(AttributeError::UnknownCategory {
                attribute: self.key.clone(),
                input: c.clone(),
            });
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_value(AttributeType::Int, "42"), Ok(AttributeValue::Int(42)));
        assert_eq!(parse_value(AttributeType::Int, " -7 "), Ok(AttributeValue::Int(-7)));
        assert!(parse_value(AttributeType::Int, "4x").is_err());
    }

    #[test]
    fn test_parse_empty_int_is_zero() {
        assert_eq!(parse_value(AttributeType::Int, ""), Ok(AttributeValue::Int(0)));
        assert_eq!(parse_value(AttributeType::Int, "   "), Ok(AttributeValue::Int(0)));
    }

    #[test]
    fn test_parse_boolean() {
        assert_eq!(
            parse_value(AttributeType::Boolean, "Yes"),
            Ok(AttributeValue::Boolean(true))
        );
        assert_eq!(
            parse_value(AttributeType::Boolean, "0"),
            Ok(AttributeValue::Boolean(false))
        );
        assert!(parse_value(AttributeType::Boolean, "maybe").is_err());
    }

    #[test]
    fn test_parse_date() {
        let d = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(
            parse_value(AttributeType::Date, "2026-10-19"),
            Ok(AttributeValue::Date(d))
        );
        assert!(parse_value(AttributeType::Date, "19.10.2026").is_err());
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&AttributeValue::Int(3)), "3");
        assert_eq!(format_value(&AttributeValue::Boolean(true)), "yes");
        assert_eq!(format_value(&AttributeValue::String("Room".into())), "Room");
        let d = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        assert_eq!(format_value(&AttributeValue::Date(d)), "2026-01-02");
    }

    #[test]
    fn test_accepts_char_int() {
        assert!(accepts_char(AttributeType::Int, "", 0, '-'));
        assert!(!accepts_char(AttributeType::Int, "-1", 0, '-'));
        assert!(!accepts_char(AttributeType::Int, "1", 1, '-'));
        assert!(accepts_char(AttributeType::Int, "1", 1, '9'));
        assert!(!accepts_char(AttributeType::Int, "1", 1, 'a'));
    }

    #[test]
    fn test_category_attribute_checks_membership() {
        let mut attr = Attribute::new("size", AttributeType::Category);
        attr.categories = vec!["small".into(), "large".into()];
        assert_eq!(
            attr.parse("large"),
            Ok(AttributeValue::Category("large".into()))
        );
        assert!(matches!(
            attr.parse("medium"),
            Err(AttributeError::UnknownCategory { .. })
        ));
    }

    #[test]
    fn test_value_serde_is_tagged() {
        let json = serde_json::to_string(&AttributeValue::Int(5)).unwrap();
        assert_eq!(json, r#"{"int":5}"#);
    }
}
