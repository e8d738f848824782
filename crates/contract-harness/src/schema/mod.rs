//! # Schema Validation
//!
//! Structural validation of captured bodies. A [`Schema`] describes a single item;
//! [`validate`] works out whether the body is a paginated envelope (an object with a
//! `docs` key), an array of items, or a single item, and applies the item schema
//! accordingly.
//!
//! Failures are reported as a flat list of `path: message` lines:
//!
//! ```text
//! docs.3.rocket: Required
//! docs.7.date_utc: Invalid datetime
//! ```
//!
//! Validation never mutates the value.
//!
//! Item schemas are opaque to this module. The [`Shape`] combinators cover the
//! common case, but any type implementing [`Schema`] can be registered.

pub mod shape;

pub use shape::Shape;

use crate::error::SchemaError;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::{self, Display};
use std::sync::Arc;

/// A location inside a JSON document, rendered as `a.0.b`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: impl Into<String>) {
        self.0.push(segment.into());
    }

    pub fn pop(&mut self) {
        self.0.pop();
    }

    /// An issue located at the current path.
    pub fn issue(&self, message: impl Into<String>) -> SchemaIssue {
        SchemaIssue {
            path: self.to_string(),
            message: message.into(),
        }
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("(root)")
        } else {
            f.write_str(&self.0.join("."))
        }
    }
}

/// One structural problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    pub path: String,
    pub message: String,
}

impl Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A structural validator for one item of a resource.
pub trait Schema: Send + Sync {
    /// Appends every problem found in `value` (located at `path`) to `issues`.
    fn check(&self, value: &Value, path: &mut FieldPath, issues: &mut Vec<SchemaIssue>);
}

/// The result of validating a body.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    Valid,
    Invalid {
        issues: Vec<SchemaIssue>,
        diagnostics: String,
    },
}

impl ValidationOutcome {
    fn from_issues(issues: Vec<SchemaIssue>) -> Self {
        if issues.is_empty() {
            return ValidationOutcome::Valid;
        }
        let diagnostics = issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        ValidationOutcome::Invalid {
            issues,
            diagnostics,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    pub fn diagnostics(&self) -> Option<&str> {
        match self {
            ValidationOutcome::Valid => None,
            ValidationOutcome::Invalid { diagnostics, .. } => Some(diagnostics),
        }
    }

    pub fn issues(&self) -> &[SchemaIssue] {
        match self {
            ValidationOutcome::Valid => &[],
            ValidationOutcome::Invalid { issues, .. } => issues,
        }
    }
}

/// How a body is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyShape {
    /// A paginated `{ docs, totalDocs, … }` object.
    Envelope,
    Array,
    Single,
}

impl BodyShape {
    /// Envelope when the body is an object with a `docs` key, array for arrays,
    /// single item otherwise.
    pub fn detect(value: &Value) -> Self {
        match value {
            Value::Object(map) if map.contains_key("docs") => BodyShape::Envelope,
            Value::Array(_) => BodyShape::Array,
            _ => BodyShape::Single,
        }
    }
}

/// Paging metadata every envelope carries besides `docs`.
pub fn envelope_metadata() -> Shape {
    Shape::object([
        ("docs", Shape::array(Shape::any())),
        ("totalDocs", Shape::integer()),
        ("offset", Shape::integer()),
        ("limit", Shape::integer()),
        ("totalPages", Shape::integer()),
        ("page", Shape::integer()),
        ("pagingCounter", Shape::integer()),
        ("hasPrevPage", Shape::boolean()),
        ("hasNextPage", Shape::boolean()),
        ("prevPage", Shape::integer().nullable()),
        ("nextPage", Shape::integer().nullable()),
    ])
}

/// Validates `value` against an item schema, detecting the body shape.
pub fn validate(schema: &dyn Schema, value: &Value) -> ValidationOutcome {
    validate_as(schema, BodyShape::detect(value), value)
}

/// Validates `value` as the given body shape.
pub fn validate_as(schema: &dyn Schema, shape: BodyShape, value: &Value) -> ValidationOutcome {
    let mut path = FieldPath::root();
    let mut issues = Vec::new();
    match shape {
        BodyShape::Single => schema.check(value, &mut path, &mut issues),
        BodyShape::Array => check_items(schema, value, &mut path, &mut issues),
        BodyShape::Envelope => {
            envelope_metadata().check(value, &mut path, &mut issues);
            if let Some(docs) = value.get("docs") {
                path.push("docs");
                check_items(schema, docs, &mut path, &mut issues);
                path.pop();
            }
        }
    }
    ValidationOutcome::from_issues(issues)
}

fn check_items(
    schema: &dyn Schema,
    value: &Value,
    path: &mut FieldPath,
    issues: &mut Vec<SchemaIssue>,
) {
    let Some(items) = value.as_array() else {
        issues.push(path.issue(format!(
            "Expected array, received {}",
            shape::json_type(value)
        )));
        return;
    };
    for (index, item) in items.iter().enumerate() {
        path.push(index.to_string());
        schema.check(item, path, issues);
        path.pop();
    }
}

/// Named item schemas, looked up case-insensitively.
#[derive(Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Arc<dyn Schema>>,
}

impl fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.schemas.keys().collect();
        names.sort();
        f.debug_struct("SchemaRegistry")
            .field("schemas", &names)
            .finish()
    }
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &str, schema: impl Schema + 'static) -> &mut Self {
        self.schemas
            .insert(name.trim().to_ascii_lowercase(), Arc::new(schema));
        self
    }

    pub fn with(mut self, name: &str, schema: impl Schema + 'static) -> Self {
        self.register(name, schema);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(&name.trim().to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    pub fn resolve(&self, name: &str) -> Result<Arc<dyn Schema>, SchemaError> {
        self.schemas
            .get(&name.trim().to_ascii_lowercase())
            .cloned()
            .ok_or_else(|| SchemaError::UnknownSchema(name.to_string()))
    }

    /// Validates `value` against the schema registered as `schema_ref`.
    ///
    /// An unknown reference is an error; a mismatch is an
    /// [`Invalid`](ValidationOutcome::Invalid) outcome.
    pub fn validate(
        &self,
        schema_ref: &str,
        value: &Value,
    ) -> Result<ValidationOutcome, SchemaError> {
        let schema = self.resolve(schema_ref)?;
        Ok(validate(schema.as_ref(), value))
    }
}
