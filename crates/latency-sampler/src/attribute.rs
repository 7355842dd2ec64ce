// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Type-tagged value wrappers used by change-feed record images.
//!
//! Change-feed backends tag every scalar with its type instead of using
//! native JSON values: integers arrive as `{"N": "123"}`, booleans as
//! `{"BOOL": true}`, strings as `{"S": "..."}`. Modeling the wrapper as an
//! explicit tagged union keeps the malformed-record skip path exhaustive:
//! any shape the decoder does not know is a typed error, not a coercion.

use std::collections::HashMap;

use serde::Deserialize;

use crate::errors::ExtractError;

/// A record image: field name to tagged value.
pub type AttributeMap = HashMap<String, AttributeValue>;

/// One type-tagged value from a change-feed record image.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub enum AttributeValue {
    /// `{"S": "text"}`
    #[serde(rename = "S")]
    String(String),
    /// `{"N": "123"}`. Numbers are transported as strings to avoid
    /// precision loss in transit.
    #[serde(rename = "N")]
    Number(String),
    /// `{"BOOL": true}`
    #[serde(rename = "BOOL")]
    Boolean(bool),
    /// `{"B": "<base64>"}`
    #[serde(rename = "B")]
    Binary(String),
    /// `{"NULL": true}`
    #[serde(rename = "NULL")]
    Null(bool),
    /// `{"L": [...]}`
    #[serde(rename = "L")]
    List(Vec<AttributeValue>),
    /// `{"M": {...}}`
    #[serde(rename = "M")]
    Map(AttributeMap),
}

impl AttributeValue {
    /// Tag name of this value, used in wrong-type errors.
    pub fn kind(&self) -> &'static str {
        match self {
            AttributeValue::String(_) => "S",
            AttributeValue::Number(_) => "N",
            AttributeValue::Boolean(_) => "BOOL",
            AttributeValue::Binary(_) => "B",
            AttributeValue::Null(_) => "NULL",
            AttributeValue::List(_) => "L",
            AttributeValue::Map(_) => "M",
        }
    }

    /// Reads this value as a signed integer, requiring an `N` wrapper.
    pub fn as_i64(&self, field: &'static str) -> Result<i64, ExtractError> {
        match self {
            AttributeValue::Number(raw) => {
                raw.trim()
                    .parse::<i64>()
                    .map_err(|_| ExtractError::MalformedNumber {
                        field,
                        value: raw.clone(),
                    })
            }
            other => Err(ExtractError::WrongType {
                field,
                expected: "N",
                found: other.kind(),
            }),
        }
    }

    /// Reads this value as a boolean, requiring a `BOOL` wrapper.
    pub fn as_bool(&self, field: &'static str) -> Result<bool, ExtractError> {
        match self {
            AttributeValue::Boolean(value) => Ok(*value),
            other => Err(ExtractError::WrongType {
                field,
                expected: "BOOL",
                found: other.kind(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> AttributeValue {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_number_wrapper_decodes_to_integer() {
        let value = parse(r#"{"N": "1706745600123456789"}"#);
        assert_eq!(value.as_i64("ts").unwrap(), 1_706_745_600_123_456_789);
    }

    #[test]
    fn test_number_wrapper_tolerates_surrounding_whitespace() {
        let value = parse(r#"{"N": " 42 "}"#);
        assert_eq!(value.as_i64("ts").unwrap(), 42);
    }

    #[test]
    fn test_negative_number_wrapper() {
        let value = parse(r#"{"N": "-5"}"#);
        assert_eq!(value.as_i64("ts").unwrap(), -5);
    }

    #[test]
    fn test_non_integer_number_wrapper_is_typed_error() {
        let value = parse(r#"{"N": "abc"}"#);
        assert_eq!(
            value.as_i64("ts"),
            Err(ExtractError::MalformedNumber {
                field: "ts",
                value: "abc".to_string(),
            })
        );
    }

    #[test]
    fn test_string_wrapper_in_place_of_number_is_wrong_type() {
        let value = parse(r#"{"S": "123"}"#);
        assert_eq!(
            value.as_i64("ts"),
            Err(ExtractError::WrongType {
                field: "ts",
                expected: "N",
                found: "S",
            })
        );
    }

    #[test]
    fn test_bool_wrapper() {
        assert!(parse(r#"{"BOOL": true}"#).as_bool("cold").unwrap());
        assert!(!parse(r#"{"BOOL": false}"#).as_bool("cold").unwrap());
    }

    #[test]
    fn test_number_wrapper_in_place_of_bool_is_wrong_type() {
        let value = parse(r#"{"N": "1"}"#);
        assert_eq!(
            value.as_bool("cold"),
            Err(ExtractError::WrongType {
                field: "cold",
                expected: "BOOL",
                found: "N",
            })
        );
    }

    #[test]
    fn test_nested_map_and_list_decode() {
        let value = parse(r#"{"M": {"inner": {"L": [{"N": "1"}, {"NULL": true}]}}}"#);
        let AttributeValue::Map(map) = value else {
            panic!("expected a map");
        };
        let AttributeValue::List(items) = &map["inner"] else {
            panic!("expected a list");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], AttributeValue::Number("1".to_string()));
        assert_eq!(items[1], AttributeValue::Null(true));
    }

    #[test]
    fn test_unknown_tag_fails_to_decode() {
        let result: Result<AttributeValue, _> = serde_json::from_str(r#"{"SS": ["a"]}"#);
        assert!(result.is_err());
    }
}
