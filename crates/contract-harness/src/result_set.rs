//! # Result Sets
//!
//! Helpers shared by the condition evaluator and the query-option checks: pulling
//! the items out of a body, reading a (dotted) field from an item, and checking the
//! effects of the `sort` and `select` options on a result set.

use crate::error::ConditionError;
use crate::formats::string_cmp;
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::str::FromStr;

/// The items of a body: an array, the `docs` of an envelope, or a single object.
pub fn items(body: &Value) -> Result<&[Value], ConditionError> {
    match body {
        Value::Array(items) => Ok(items),
        Value::Object(map) => match map.get("docs") {
            Some(Value::Array(docs)) => Ok(docs),
            Some(_) => Err(ConditionError::NotAResultSet),
            None => Ok(std::slice::from_ref(body)),
        },
        _ => Err(ConditionError::NotAResultSet),
    }
}

/// Reads `path` (`links.patch.small`, `cores.0.core`) from `item`.
///
/// Returns `None` when any segment is missing, which the evaluator treats as
/// `undefined`. An empty path returns the item itself.
pub fn field_value<'a>(item: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(item);
    }
    path.split('.').try_fold(item, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(list) => segment.parse::<usize>().ok().and_then(|i| list.get(i)),
        _ => None,
    })
}

/// Direction of a sort option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Reads a direction as written in a query body: `"asc"`, `"desc"`, `1`, `-1`.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => s.parse().ok(),
            Value::Number(n) => match n.as_i64() {
                Some(1) => Some(SortOrder::Ascending),
                Some(-1) => Some(SortOrder::Descending),
                _ => None,
            },
            _ => None,
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" | "1" => Ok(SortOrder::Ascending),
            "desc" | "descending" | "-1" => Ok(SortOrder::Descending),
            other => Err(format!("Invalid sort order: {other}")),
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Ascending => f.write_str("ascending"),
            SortOrder::Descending => f.write_str("descending"),
        }
    }
}

/// Two neighbouring items out of order.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Items {index_before} and {index_after} are not sorted {order} by `{field}`: {before} then {after}")]
pub struct SortMismatch {
    pub field: String,
    pub order: SortOrder,
    pub index_before: usize,
    pub index_after: usize,
    pub before: String,
    pub after: String,
}

/// Items whose keys exceed the selected fields.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Item {index} has fields outside the selection: {extra:?}")]
pub struct SelectionMismatch {
    pub index: usize,
    pub extra: Vec<String>,
}

/// Rank of a value's type in sort order: missing and null first, then numbers,
/// strings, objects, arrays, booleans.
fn type_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Number(_)) => 1,
        Some(Value::String(_)) => 2,
        Some(Value::Object(_)) => 3,
        Some(Value::Array(_)) => 4,
        Some(Value::Bool(_)) => 5,
    }
}

fn sort_cmp(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => string_cmp(x, y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn render(value: Option<&Value>) -> String {
    value.map_or_else(|| "undefined".to_string(), Value::to_string)
}

/// Checks that `items` are ordered by `field`.
pub fn check_sorted(items: &[Value], field: &str, order: SortOrder) -> Result<(), SortMismatch> {
    for (index, pair) in items.windows(2).enumerate() {
        let before = field_value(&pair[0], field);
        let after = field_value(&pair[1], field);
        let ordering = sort_cmp(before, after);
        let in_order = match order {
            SortOrder::Ascending => ordering != Ordering::Greater,
            SortOrder::Descending => ordering != Ordering::Less,
        };
        if !in_order {
            return Err(SortMismatch {
                field: field.to_string(),
                order,
                index_before: index,
                index_after: index + 1,
                before: render(before),
                after: render(after),
            });
        }
    }
    Ok(())
}

/// Checks that every item only carries `fields` (plus `id` / `_id`, which the API
/// always returns).
pub fn check_selected_fields(
    items: &[Value],
    fields: &[String],
) -> Result<(), SelectionMismatch> {
    for (index, item) in items.iter().enumerate() {
        let Some(map) = item.as_object() else {
            continue;
        };
        let extra: Vec<String> = map
            .keys()
            .filter(|k| k.as_str() != "id" && k.as_str() != "_id")
            .filter(|k| !fields.iter().any(|f| f == *k))
            .cloned()
            .collect();
        if !extra.is_empty() {
            return Err(SelectionMismatch { index, extra });
        }
    }
    Ok(())
}
