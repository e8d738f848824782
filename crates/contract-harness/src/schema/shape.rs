//! # Structural Shapes
//!
//! A small combinator language for describing the structure of JSON documents.
//! Shapes report every problem they find as a [`SchemaIssue`] attributed to the
//! field path where it occurred, so a failing response reads like
//! `cores.0.flight: Expected integer, received string`.

use super::{FieldPath, Schema, SchemaIssue};
use crate::formats::{is_date_time, is_http_url};
use crate::resource::is_object_id;
use serde_json::Value;

/// A structural description of a JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Any,
    String,
    Number,
    Integer,
    Boolean,
    /// A 24-hex object id string.
    ObjectId,
    /// An RFC 3339 date-time, an offset-less ISO 8601 date-time or a date.
    DateTime,
    /// An absolute http(s) URL string.
    Url,
    /// A string from a fixed set.
    Enum(Vec<String>),
    Array(Box<Shape>),
    Object(Vec<(String, Shape)>),
    /// `null` is accepted in addition to the inner shape.
    Nullable(Box<Shape>),
    /// The field may be absent; when present it must match the inner shape.
    Optional(Box<Shape>),
}

impl Shape {
    pub fn string() -> Self {
        Shape::String
    }

    pub fn number() -> Self {
        Shape::Number
    }

    pub fn integer() -> Self {
        Shape::Integer
    }

    pub fn boolean() -> Self {
        Shape::Boolean
    }

    pub fn object_id() -> Self {
        Shape::ObjectId
    }

    pub fn date_time() -> Self {
        Shape::DateTime
    }

    pub fn url() -> Self {
        Shape::Url
    }

    pub fn any() -> Self {
        Shape::Any
    }

    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Shape::Enum(values.into_iter().map(Into::into).collect())
    }

    pub fn array(item: Shape) -> Self {
        Shape::Array(Box::new(item))
    }

    pub fn object<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Shape)>,
        K: Into<String>,
    {
        Shape::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn nullable(self) -> Self {
        Shape::Nullable(Box::new(self))
    }

    pub fn optional(self) -> Self {
        Shape::Optional(Box::new(self))
    }

    /// Adds or replaces fields of an object shape. Other shapes are returned unchanged.
    pub fn extend<I, K>(self, extra: I) -> Self
    where
        I: IntoIterator<Item = (K, Shape)>,
        K: Into<String>,
    {
        match self {
            Shape::Object(mut fields) => {
                for (key, shape) in extra {
                    let key = key.into();
                    match fields.iter_mut().find(|(name, _)| *name == key) {
                        Some(slot) => slot.1 = shape,
                        None => fields.push((key, shape)),
                    }
                }
                Shape::Object(fields)
            }
            other => other,
        }
    }

    /// Short name used in "Expected …" messages.
    fn expected_name(&self) -> String {
        match self {
            Shape::Any => "any".into(),
            Shape::String | Shape::ObjectId | Shape::DateTime | Shape::Url | Shape::Enum(_) => {
                "string".into()
            }
            Shape::Number => "number".into(),
            Shape::Integer => "integer".into(),
            Shape::Boolean => "boolean".into(),
            Shape::Array(_) => "array".into(),
            Shape::Object(_) => "object".into(),
            Shape::Nullable(inner) | Shape::Optional(inner) => inner.expected_name(),
        }
    }

    fn check_value(&self, value: &Value, path: &mut FieldPath, issues: &mut Vec<SchemaIssue>) {
        match (self, value) {
            (Shape::Any, _) => {}
            (Shape::Nullable(_), Value::Null) => {}
            (Shape::Nullable(inner), _) | (Shape::Optional(inner), _) => {
                inner.check_value(value, path, issues)
            }
            (Shape::String, Value::String(_)) => {}
            (Shape::Number, Value::Number(_)) => {}
            (Shape::Integer, Value::Number(n)) => {
                if !(n.is_i64() || n.is_u64()) {
                    issues.push(path.issue("Expected integer, received float"));
                }
            }
            (Shape::Boolean, Value::Bool(_)) => {}
            (Shape::ObjectId, Value::String(s)) => {
                if !is_object_id(s) {
                    issues.push(path.issue("Invalid ObjectId"));
                }
            }
            (Shape::DateTime, Value::String(s)) => {
                if !is_date_time(s) {
                    issues.push(path.issue("Invalid datetime"));
                }
            }
            (Shape::Url, Value::String(s)) => {
                if !is_http_url(s) {
                    issues.push(path.issue("Invalid url"));
                }
            }
            (Shape::Enum(allowed), Value::String(s)) => {
                if !allowed.iter().any(|a| a == s) {
                    let expected = allowed
                        .iter()
                        .map(|a| format!("'{a}'"))
                        .collect::<Vec<_>>()
                        .join(" | ");
                    issues.push(path.issue(format!(
                        "Invalid enum value. Expected {expected}, received '{s}'"
                    )));
                }
            }
            (Shape::Array(item), Value::Array(items)) => {
                for (index, element) in items.iter().enumerate() {
                    path.push(index.to_string());
                    item.check_value(element, path, issues);
                    path.pop();
                }
            }
            (Shape::Object(fields), Value::Object(map)) => {
                for (name, field) in fields {
                    path.push(name.clone());
                    match map.get(name) {
                        Some(v) => field.check_value(v, path, issues),
                        None if matches!(field, Shape::Optional(_)) => {}
                        None => issues.push(path.issue("Required")),
                    }
                    path.pop();
                }
            }
            (shape, other) => issues.push(path.issue(format!(
                "Expected {}, received {}",
                shape.expected_name(),
                json_type(other)
            ))),
        }
    }
}

impl Schema for Shape {
    fn check(&self, value: &Value, path: &mut FieldPath, issues: &mut Vec<SchemaIssue>) {
        self.check_value(value, path, issues);
    }
}

/// Name of a JSON value's type as used in diagnostics.
pub fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn issues_of(shape: &Shape, value: Value) -> Vec<String> {
        let mut issues = Vec::new();
        shape.check(&value, &mut FieldPath::root(), &mut issues);
        issues.into_iter().map(|i| i.to_string()).collect()
    }

    #[test]
    fn test_missing_field_is_required() {
        let shape = Shape::object([("name", Shape::string()), ("flight_number", Shape::integer())]);
        assert_eq!(
            issues_of(&shape, json!({"flight_number": 1})),
            vec!["name: Required"]
        );
    }

    #[test]
    fn test_optional_and_nullable() {
        let shape = Shape::object([
            ("details", Shape::string().nullable()),
            ("window", Shape::integer().optional()),
        ]);
        assert!(issues_of(&shape, json!({"details": null})).is_empty());
        assert_eq!(
            issues_of(&shape, json!({"window": "soon"})),
            vec!["details: Required", "window: Expected integer, received string"]
        );
    }

    #[test]
    fn test_nested_paths_include_indices() {
        let shape = Shape::object([(
            "cores",
            Shape::array(Shape::object([("flight", Shape::integer().nullable())])),
        )]);
        assert_eq!(
            issues_of(&shape, json!({"cores": [{"flight": 1}, {"flight": 1.5}]})),
            vec!["cores.1.flight: Expected integer, received float"]
        );
    }

    #[test]
    fn test_string_formats() {
        let shape = Shape::object([
            ("id", Shape::object_id()),
            ("date_utc", Shape::date_time()),
            ("wikipedia", Shape::url()),
            ("status", Shape::one_of(["active", "retired"])),
        ]);
        let issues = issues_of(
            &shape,
            json!({"id": "abc", "date_utc": "June 4", "wikipedia": "ftp://x", "status": "lost"}),
        );
        assert_eq!(
            issues,
            vec![
                "id: Invalid ObjectId",
                "date_utc: Invalid datetime",
                "wikipedia: Invalid url",
                "status: Invalid enum value. Expected 'active' | 'retired', received 'lost'",
            ]
        );
    }

    #[test]
    fn test_formats_reject_impossible_values() {
        let shape = Shape::object([("d", Shape::date_time()), ("u", Shape::url())]);
        assert_eq!(
            issues_of(&shape, json!({"d": "2020-99-99Tgarbage", "u": "https://"})),
            vec!["d: Invalid datetime", "u: Invalid url"]
        );
        assert_eq!(
            issues_of(&shape, json!({"d": "2020-02-30", "u": "http//www.spacex.com"})),
            vec!["d: Invalid datetime", "u: Invalid url"]
        );
        assert!(issues_of(
            &shape,
            json!({"d": "2006-03-25T10:30:00+12:00", "u": "https://www.spacex.com/vehicles"})
        )
        .is_empty());
        assert!(issues_of(&shape, json!({"d": "2010-12-08", "u": "http://spacex.com"})).is_empty());
    }

    #[test]
    fn test_extend_replaces_and_appends() {
        let shape = Shape::object([("a", Shape::string())])
            .extend([("a", Shape::integer()), ("b", Shape::boolean())]);
        assert_eq!(
            shape,
            Shape::object([("a", Shape::integer()), ("b", Shape::boolean())])
        );
    }

    #[test]
    fn test_root_mismatch() {
        assert_eq!(
            issues_of(&Shape::Object(Vec::new()), json!([1])),
            vec!["(root): Expected object, received array"]
        );
    }
}
