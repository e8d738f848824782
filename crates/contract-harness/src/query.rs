//! # Query Bodies
//!
//! The payload of a query request is a `{ query, options }` object. [`QueryBody`] is
//! its typed form; [`RequestBody`] lets a scenario send either a structured value or
//! pre-serialized text, which is how malformed payloads are exercised.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The `options` clause of a query body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub populate: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<bool>,
}

impl QueryOptions {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Field names listed in `select`, whether given as `"a b -c"` or `{ "a": 1 }`.
    ///
    /// Exclusions (`-field` or `field: 0`) are not returned.
    pub fn selected_fields(&self) -> Vec<String> {
        match &self.select {
            Some(Value::String(fields)) => fields
                .split_whitespace()
                .filter(|f| !f.starts_with('-'))
                .map(str::to_string)
                .collect(),
            Some(Value::Object(fields)) => fields
                .iter()
                .filter(|(_, flag)| !matches!(flag, Value::Number(n) if n.as_i64() == Some(0)))
                .filter(|(_, flag)| !matches!(flag, Value::Bool(false)))
                .map(|(name, _)| name.clone())
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// A structured `{ query, options }` body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryBody {
    #[serde(default)]
    pub query: Map<String, Value>,
    #[serde(default, skip_serializing_if = "QueryOptions::is_empty")]
    pub options: QueryOptions,
}

impl QueryBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses JSON text supplied by the scenario layer.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Adds a `field: value` (or `field: { $op: value }`) filter.
    pub fn filter(mut self, field: impl Into<String>, value: Value) -> Self {
        self.query.insert(field.into(), value);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.options.limit = Some(limit);
        self
    }

    pub fn page(mut self, page: u64) -> Self {
        self.options.page = Some(page);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.options.offset = Some(offset);
        self
    }

    /// Adds a sort key; `direction` is `"asc"` or `"desc"` (or `1` / `-1`).
    pub fn sort(mut self, field: impl Into<String>, direction: impl Into<Value>) -> Self {
        self.options
            .sort
            .get_or_insert_with(Map::new)
            .insert(field.into(), direction.into());
        self
    }

    pub fn select(mut self, select: Value) -> Self {
        self.options.select = Some(select);
        self
    }
}

/// The body of a query request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Sent verbatim; may be malformed on purpose.
    Raw(String),
    /// Serialized before sending.
    Json(Value),
}

impl RequestBody {
    pub fn to_text(&self) -> Result<String, serde_json::Error> {
        match self {
            RequestBody::Raw(text) => Ok(text.clone()),
            RequestBody::Json(value) => serde_json::to_string(value),
        }
    }

    /// The typed query, when the body is a well-formed `{ query, options }` object.
    pub fn as_query(&self) -> Option<QueryBody> {
        match self {
            RequestBody::Raw(text) => QueryBody::from_json_str(text).ok(),
            RequestBody::Json(value) => serde_json::from_value(value.clone()).ok(),
        }
    }
}

impl From<QueryBody> for RequestBody {
    fn from(body: QueryBody) -> Self {
        // QueryBody only holds JSON-native data, so this cannot fail.
        RequestBody::Json(serde_json::to_value(body).unwrap_or(Value::Null))
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        RequestBody::Json(value)
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        RequestBody::Raw(text)
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        RequestBody::Raw(text.to_string())
    }
}
