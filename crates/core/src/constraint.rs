//! Constraint tuples
//!
//! A constraint is `{field, op, value}`. A constraint list is an ordered
//! sequence combined with implicit AND semantics. Lists are produced by an
//! external query translator; this module only fixes their shape.

use crate::error::{Error, Result};
use crate::path::FieldPath;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Comparison operator for a constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// Strict equality
    Eq,
    /// Strict inequality
    Ne,
    /// Greater than
    Gt,
    /// Greater than or equal
    Gte,
    /// Less than
    Lt,
    /// Less than or equal
    Lte,
    /// Field value equals one of the listed values
    In,
    /// Array field holds the value, or string field holds the substring
    Contains,
}

impl Operator {
    /// All operators, in declaration order
    pub const ALL: [Operator; 8] = [
        Operator::Eq,
        Operator::Ne,
        Operator::Gt,
        Operator::Gte,
        Operator::Lt,
        Operator::Lte,
        Operator::In,
        Operator::Contains,
    ];

    /// Wire name of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Ne => "ne",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::In => "in",
            Operator::Contains => "contains",
        }
    }

    /// True for the four ordering operators
    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            Operator::Gt | Operator::Gte | Operator::Lt | Operator::Lte
        )
    }
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Operator::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| Error::invalid_constraint(format!("unknown operator '{}'", s)))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `{field, op, value}` condition
///
/// # Examples
///
/// ```
/// use recstore_core::{Constraint, Operator};
/// use serde_json::json;
///
/// let c = Constraint::parse("x", "eq", json!(1)).unwrap();
/// assert_eq!(c.op, Operator::Eq);
///
/// let from_wire = Constraint::from_json(json!({"field": "x", "op": "eq", "value": 1})).unwrap();
/// assert_eq!(c, from_wire);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Constraint {
    /// Target field
    pub field: FieldPath,
    /// Comparison operator
    #[serde(alias = "operator")]
    pub op: Operator,
    /// Operand
    pub value: Value,
}

impl Constraint {
    /// Create a constraint from already-typed parts
    pub fn new(field: FieldPath, op: Operator, value: impl Into<Value>) -> Self {
        Constraint {
            field,
            op,
            value: value.into(),
        }
    }

    /// Create a constraint from a field path string and operator name
    pub fn parse(field: &str, op: &str, value: impl Into<Value>) -> Result<Self> {
        let field = field
            .parse::<FieldPath>()
            .map_err(|e| Error::invalid_constraint(format!("field '{}': {}", field, e)))?;
        Ok(Constraint::new(field, op.parse()?, value))
    }

    /// Shorthand for an `eq` constraint on a top-level field
    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Constraint::new(FieldPath::key(field), Operator::Eq, value)
    }

    /// Decode a constraint tuple from its JSON form
    pub fn from_json(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::invalid_constraint(e.to_string()))
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.op, self.value)
    }
}

/// Decode an ordered constraint list from a JSON array
///
/// `null` decodes to an empty list.
pub fn constraints_from_json(value: Value) -> Result<Vec<Constraint>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items.into_iter().map(Constraint::from_json).collect(),
        other => Err(Error::invalid_constraint(format!(
            "expected an array of constraints, got {}",
            crate::record::json_kind(&other)
        ))),
    }
}
