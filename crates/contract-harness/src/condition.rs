//! # Condition Evaluator
//!
//! Interprets the small comparison language used by query filters and by scenario
//! assertions. A [`Condition`] is a `(field, operator, expected)` triple; applied to
//! a result set it passes only when **every** item satisfies it.
//!
//! | operator | semantics |
//! |---|---|
//! | `""`, `$eq` | `actual === expected` |
//! | `$ne` | expected `null`: actual is neither `null` nor missing; otherwise `actual !== expected` |
//! | `$gt`, `$gte`, `$lt`, `$lte` | ordered comparison |
//! | `$in` | actual equals one of the expected array's elements |
//!
//! Numbers compare numerically (`1` equals `1.0`, also inside arrays and objects).
//! Strings that parse as timestamps or dates order chronologically, other strings
//! lexicographically (see [`formats`](crate::formats)). Values of different types are
//! never ordered, so `$gt` and friends return `false` for them. A missing field is
//! `undefined`: it equals nothing and orders against nothing.
//!
//! Any other operator is an error, never a silent `false`.

use crate::error::ConditionError;
use crate::formats::string_cmp;
use crate::result_set::{field_value, items};
use serde_json::{Map, Number, Value};
use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::str::FromStr;

/// A comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "$eq",
            Operator::Ne => "$ne",
            Operator::Gt => "$gt",
            Operator::Gte => "$gte",
            Operator::Lt => "$lt",
            Operator::Lte => "$lte",
            Operator::In => "$in",
        }
    }

    /// Applies the operator. `actual` is `None` when the field is missing.
    pub fn apply(&self, actual: Option<&Value>, expected: &Value) -> Result<bool, ConditionError> {
        let result = match self {
            Operator::Eq => actual.is_some_and(|a| values_equal(a, expected)),
            Operator::Ne => {
                if expected.is_null() {
                    actual.is_some_and(|a| !a.is_null())
                } else {
                    !actual.is_some_and(|a| values_equal(a, expected))
                }
            }
            Operator::Gt => ordering(actual, expected) == Some(Ordering::Greater),
            Operator::Gte => matches!(
                ordering(actual, expected),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Operator::Lt => ordering(actual, expected) == Some(Ordering::Less),
            Operator::Lte => matches!(
                ordering(actual, expected),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Operator::In => {
                let Value::Array(candidates) = expected else {
                    return Err(ConditionError::InvalidExpected {
                        operator: self.as_str().to_string(),
                        expected: expected.to_string(),
                    });
                };
                actual.is_some_and(|a| candidates.iter().any(|c| values_equal(a, c)))
            }
        };
        Ok(result)
    }
}

impl FromStr for Operator {
    type Err = ConditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "$eq" => Ok(Operator::Eq),
            "$ne" => Ok(Operator::Ne),
            "$gt" => Ok(Operator::Gt),
            "$gte" => Ok(Operator::Gte),
            "$lt" => Ok(Operator::Lt),
            "$lte" => Ok(Operator::Lte),
            "$in" => Ok(Operator::In),
            other => Err(ConditionError::UnsupportedOperator(other.to_string())),
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(a, b)| values_equal(a, b))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(key, a)| y.get(key).is_some_and(|b| values_equal(a, b)))
        }
        _ => a == b,
    }
}

fn ordering(actual: Option<&Value>, expected: &Value) -> Option<Ordering> {
    match (actual?, expected) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(string_cmp(x, y)),
        _ => None,
    }
}

/// Evaluates `actual <operator> expected`, parsing the operator first.
pub fn evaluate(
    actual: Option<&Value>,
    operator: &str,
    expected: &Value,
) -> Result<bool, ConditionError> {
    operator.parse::<Operator>()?.apply(actual, expected)
}

/// Converts a test-data literal to its typed form.
///
/// `"true"`/`"false"` become booleans, `"null"` becomes `null`, numeric text becomes
/// a number, and text wrapped in double quotes stays a string (without the quotes).
/// Anything else is kept as a string.
pub fn coerce_literal(raw: &str) -> Value {
    let text = raw.trim();
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        return Value::String(text[1..text.len() - 1].to_string());
    }
    match text {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        "null" => return Value::Null,
        _ => {}
    }
    if let Ok(int) = text.parse::<i64>() {
        return Value::Number(int.into());
    }
    if let Some(number) = text.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(number);
    }
    Value::String(text.to_string())
}

/// A `(field, operator, expected)` triple.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field: String,
    pub operator: Operator,
    pub expected: Value,
}

impl Condition {
    pub fn new(field: impl Into<String>, operator: Operator, expected: Value) -> Self {
        Self {
            field: field.into(),
            operator,
            expected,
        }
    }

    /// Builds a condition from scenario text: the operator as written and the
    /// expected value as a literal to coerce.
    pub fn parse(field: &str, operator: &str, expected: &str) -> Result<Self, ConditionError> {
        Ok(Self::new(field, operator.parse()?, coerce_literal(expected)))
    }

    /// Whether a single item satisfies the condition.
    pub fn matches(&self, item: &Value) -> Result<bool, ConditionError> {
        self.operator
            .apply(field_value(item, &self.field), &self.expected)
    }

    /// Evaluates the condition over every item of `body`.
    pub fn evaluate_result_set(&self, body: &Value) -> Result<ConditionReport, ConditionError> {
        let items = items(body)?;
        let mut violations = Vec::new();
        for (index, item) in items.iter().enumerate() {
            if !self.matches(item)? {
                violations.push(Violation {
                    index,
                    actual: field_value(item, &self.field).cloned(),
                });
            }
        }
        Ok(ConditionReport {
            condition: self.clone(),
            total: items.len(),
            violations,
        })
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` {} {}", self.field, self.operator, self.expected)
    }
}

/// An item that failed a condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub index: usize,
    /// `None` when the field was missing.
    pub actual: Option<Value>,
}

/// The outcome of evaluating a condition over a result set.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionReport {
    pub condition: Condition,
    pub total: usize,
    pub violations: Vec<Violation>,
}

impl ConditionReport {
    /// `true` only when every item satisfied the condition.
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violating_indices(&self) -> Vec<usize> {
        self.violations.iter().map(|v| v.index).collect()
    }
}

impl Display for ConditionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed() {
            return write!(f, "all {} items satisfy {}", self.total, self.condition);
        }
        write!(
            f,
            "{} of {} items violate {}:",
            self.violations.len(),
            self.total,
            self.condition
        )?;
        for violation in &self.violations {
            let actual = violation
                .actual
                .as_ref()
                .map_or_else(|| "undefined".to_string(), Value::to_string);
            write!(f, " [{}] = {}", violation.index, actual)?;
        }
        Ok(())
    }
}

/// Turns the `query` clause of a query body into conditions.
///
/// `field: value` becomes an equality; `field: { "$gte": a, "$lte": b }` becomes one
/// condition per operator. Operators outside the table (including top-level
/// `$or`/`$and`) are rejected.
pub fn conditions_from_query(
    query: &Map<String, Value>,
) -> Result<Vec<Condition>, ConditionError> {
    let mut conditions = Vec::new();
    for (field, value) in query {
        if field.starts_with('$') {
            return Err(ConditionError::UnsupportedOperator(field.clone()));
        }
        match value {
            Value::Object(ops) if !ops.is_empty() && ops.keys().all(|k| k.starts_with('$')) => {
                for (op, expected) in ops {
                    conditions.push(Condition::new(field.clone(), op.parse()?, expected.clone()));
                }
            }
            other => conditions.push(Condition::new(field.clone(), Operator::Eq, other.clone())),
        }
    }
    Ok(conditions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn eval(actual: Option<Value>, op: &str, expected: Value) -> bool {
        evaluate(actual.as_ref(), op, &expected).unwrap()
    }

    #[test]
    fn test_equals() {
        assert!(eval(Some(json!(true)), "", json!(true)));
        assert!(eval(Some(json!(1)), "$eq", json!(1.0)));
        assert!(!eval(Some(json!("1")), "", json!(1)));
        assert!(!eval(None, "", json!(null)));
        assert!(eval(Some(json!(null)), "", json!(null)));
    }

    #[test]
    fn test_not_equals() {
        assert!(eval(Some(json!("x")), "$ne", json!(null)));
        assert!(!eval(Some(json!(null)), "$ne", json!(null)));
        assert!(!eval(None, "$ne", json!(null)));
        assert!(eval(None, "$ne", json!(5)));
        assert!(eval(Some(json!(4)), "$ne", json!(5)));
        assert!(!eval(Some(json!(5)), "$ne", json!(5)));
    }

    #[test]
    fn test_ordering() {
        assert!(eval(Some(json!(6)), "$gt", json!(5)));
        assert!(!eval(Some(json!(5)), "$gt", json!(5)));
        assert!(eval(Some(json!(5)), "$gte", json!(5)));
        assert!(eval(Some(json!(4.5)), "$lt", json!(5)));
        assert!(eval(Some(json!(5)), "$lte", json!(5.0)));
        assert!(eval(
            Some(json!("2020-01-07T02:19:00.000Z")),
            "$gte",
            json!("2020-01-01T00:00:00.000Z")
        ));
        assert!(!eval(Some(json!("6")), "$gt", json!(5)));
        assert!(!eval(None, "$lt", json!(5)));
        assert!(!eval(Some(json!(null)), "$lte", json!(5)));
    }

    #[test]
    fn test_timestamps_order_by_instant() {
        assert!(eval(
            Some(json!("2020-01-01T00:00:00Z")),
            "$lte",
            json!("2020-01-01T00:00:00.000Z")
        ));
        assert!(eval(
            Some(json!("2020-01-01T00:00:00Z")),
            "$gte",
            json!("2020-01-01T00:00:00.000Z")
        ));
        assert!(eval(
            Some(json!("2006-03-25T10:30:00+12:00")),
            "$lte",
            json!("2006-03-24T23:00:00.000Z")
        ));
        assert!(eval(Some(json!("2010-12-08")), "$gt", json!("2010-06-04")));
        assert!(eval(Some(json!("Falcon Heavy")), "$gt", json!("Falcon 9")));
    }

    #[test]
    fn test_equality_is_deep() {
        assert!(eval(Some(json!({"a": 1, "b": [2]})), "", json!({"b": [2.0], "a": 1.0})));
        assert!(!eval(Some(json!({"a": 1})), "", json!({"a": 1, "b": 2})));
        assert!(!eval(Some(json!([1, 2])), "", json!([2, 1])));
        assert!(eval(Some(json!([1])), "$in", json!([[1.0], [2]])));
    }

    #[test]
    fn test_in() {
        assert!(eval(Some(json!("active")), "$in", json!(["active", "inactive"])));
        assert!(!eval(Some(json!("lost")), "$in", json!(["active", "inactive"])));
        let err = evaluate(Some(&json!("x")), "$in", &json!("x")).unwrap_err();
        assert!(matches!(err, ConditionError::InvalidExpected { .. }));
    }

    #[test]
    fn test_unsupported_operator_is_error() {
        for op in ["$between", "$regex", "gt", "=="] {
            let err = evaluate(Some(&json!(5)), op, &json!(10)).unwrap_err();
            assert!(matches!(err, ConditionError::UnsupportedOperator(ref o) if o == op));
        }
    }

    #[test]
    fn test_coerce_literal() {
        assert_eq!(coerce_literal("true"), json!(true));
        assert_eq!(coerce_literal("false"), json!(false));
        assert_eq!(coerce_literal("null"), json!(null));
        assert_eq!(coerce_literal("3.5"), json!(3.5));
        assert_eq!(coerce_literal("42"), json!(42));
        assert_eq!(coerce_literal("\"42\""), json!("42"));
        assert_eq!(coerce_literal("Falcon 9"), json!("Falcon 9"));
    }

    #[test]
    fn test_result_set_is_universal() {
        let body = json!([
            {"success": true}, {"success": false}, {"success": true}, {}
        ]);
        let report = Condition::parse("success", "", "true")
            .unwrap()
            .evaluate_result_set(&body)
            .unwrap();
        assert!(!report.passed());
        assert_eq!(report.total, 4);
        assert_eq!(report.violating_indices(), vec![1, 3]);
        assert_eq!(
            report.to_string(),
            "2 of 4 items violate `success` $eq true: [1] = false [3] = undefined"
        );
    }

    #[test]
    fn test_conditions_from_query() {
        let query = json!({
            "upcoming": false,
            "flight_number": {"$gte": 10, "$lte": 20}
        });
        let conditions = conditions_from_query(query.as_object().unwrap()).unwrap();
        assert_eq!(
            conditions,
            vec![
                Condition::new("flight_number", Operator::Gte, json!(10)),
                Condition::new("flight_number", Operator::Lte, json!(20)),
                Condition::new("upcoming", Operator::Eq, json!(false)),
            ]
        );

        let query = json!({"$or": [{"upcoming": true}]});
        assert!(matches!(
            conditions_from_query(query.as_object().unwrap()),
            Err(ConditionError::UnsupportedOperator(op)) if op == "$or"
        ));

        let query = json!({"date_utc": {"$between": [1, 2]}});
        assert!(conditions_from_query(query.as_object().unwrap()).is_err());
    }

    #[test]
    fn test_plain_object_value_is_equality() {
        let query = json!({"links": {"wikipedia": "https://en.wikipedia.org/wiki/DemoSat"}});
        let conditions = conditions_from_query(query.as_object().unwrap()).unwrap();
        assert_eq!(conditions[0].operator, Operator::Eq);
    }
}
