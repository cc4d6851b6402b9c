//! Constraint evaluation
//!
//! Decides whether one record, or which records in a sequence, satisfy an
//! ordered constraint list. Constraints in a list are AND-ed.
//!
//! The per-constraint test is pluggable through [`Predicate`]. The default,
//! [`StandardPredicate`], implements `eq`, `ne`, `gt`, `gte`, `lt`, `lte`,
//! `in`, and `contains`.
//!
//! An empty constraint list never reaches the predicate: [`Evaluator::select`]
//! returns the whole input after a single length check.

use recstore_core::{Constraint, Error, Operator, Record, RecordRef, Result};
use serde_json::{Number, Value};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::trace;

/// Single-constraint test used by the [`Evaluator`]
///
/// `check` runs once per constraint before any record is visited; `test`
/// runs per record and may assume `check` passed. `test` must not mutate
/// anything observable.
pub trait Predicate: Send + Sync {
    /// Reject constraints this predicate cannot evaluate
    fn check(&self, constraint: &Constraint) -> Result<()>;

    /// Does `record` satisfy `constraint`?
    fn test(&self, record: &Record, constraint: &Constraint) -> bool;
}

impl<P: Predicate + ?Sized> Predicate for Arc<P> {
    fn check(&self, constraint: &Constraint) -> Result<()> {
        (**self).check(constraint)
    }

    fn test(&self, record: &Record, constraint: &Constraint) -> bool {
        (**self).test(record, constraint)
    }
}

/// The default operator set
///
/// - Scalars use strict equality: no coercion between strings, numbers,
///   booleans, and null. Numbers compare by exact value, so `1` equals `1.0`.
/// - Ordering operators compare numbers with numbers and strings with
///   strings; any other pairing does not match.
/// - A missing field matches only `ne`.
/// - `contains` matches an array field holding an equal element, or a
///   string field holding the operand as a substring.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPredicate;

impl Predicate for StandardPredicate {
    fn check(&self, constraint: &Constraint) -> Result<()> {
        match constraint.op {
            op if op.is_ordering() => match constraint.value {
                Value::Number(_) | Value::String(_) => Ok(()),
                ref other => Err(Error::invalid_constraint(format!(
                    "'{}' on '{}' needs a number or string operand, got {}",
                    op,
                    constraint.field,
                    recstore_core::record::json_kind(other)
                ))),
            },
            Operator::In if !constraint.value.is_array() => Err(Error::invalid_constraint(
                format!("'in' on '{}' needs an array operand", constraint.field),
            )),
            _ => Ok(()),
        }
    }

    fn test(&self, record: &Record, constraint: &Constraint) -> bool {
        let field_value = match record.get_path(&constraint.field) {
            Some(v) => v,
            None => return constraint.op == Operator::Ne,
        };
        let operand = &constraint.value;

        match constraint.op {
            Operator::Eq => strict_eq(field_value, operand),
            Operator::Ne => !strict_eq(field_value, operand),
            Operator::Gt => compare(field_value, operand) == Some(Ordering::Greater),
            Operator::Gte => {
                compare(field_value, operand).is_some_and(|o| o != Ordering::Less)
            }
            Operator::Lt => compare(field_value, operand) == Some(Ordering::Less),
            Operator::Lte => {
                compare(field_value, operand).is_some_and(|o| o != Ordering::Greater)
            }
            Operator::In => operand
                .as_array()
                .is_some_and(|candidates| candidates.iter().any(|c| strict_eq(field_value, c))),
            Operator::Contains => match (field_value, operand) {
                (Value::Array(items), needle) => items.iter().any(|item| strict_eq(item, needle)),
                (Value::String(haystack), Value::String(needle)) => {
                    haystack.contains(needle.as_str())
                }
                _ => false,
            },
        }
    }
}

/// Strict equality: same JSON kind and same value, numbers by numeric value
fn strict_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => compare_numbers(x, y) == Some(Ordering::Equal),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| strict_eq(x, y))
        }
        (Value::Object(xm), Value::Object(ym)) => {
            xm.len() == ym.len()
                && xm
                    .iter()
                    .all(|(k, xv)| ym.get(k).is_some_and(|yv| strict_eq(xv, yv)))
        }
        _ => a == b,
    }
}

fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => compare_numbers(x, y),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// Numeric ordering by exact value
///
/// Integers are never rounded through `f64`, so `2^53 + 1` differs from
/// `2^53` written as a float.
fn compare_numbers(x: &Number, y: &Number) -> Option<Ordering> {
    match (as_integer(x), as_integer(y)) {
        (Some(a), Some(b)) => Some(a.cmp(&b)),
        (Some(a), None) => compare_int_float(a, y.as_f64()?),
        (None, Some(b)) => compare_int_float(b, x.as_f64()?).map(Ordering::reverse),
        (None, None) => x.as_f64()?.partial_cmp(&y.as_f64()?),
    }
}

fn as_integer(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

fn compare_int_float(int: i128, float: f64) -> Option<Ordering> {
    if float.is_nan() {
        return None;
    }
    let whole = float.trunc();
    // i128::MAX as f64 rounds up to 2^127
    if whole >= i128::MAX as f64 {
        return Some(Ordering::Less);
    }
    if whole < i128::MIN as f64 {
        return Some(Ordering::Greater);
    }
    match int.cmp(&(whole as i128)) {
        Ordering::Equal => 0.0f64.partial_cmp(&(float - whole)),
        other => Some(other),
    }
}

/// Applies a [`Predicate`] across constraint lists and record sequences
#[derive(Debug, Clone, Default)]
pub struct Evaluator<P = StandardPredicate> {
    predicate: P,
}

impl Evaluator<StandardPredicate> {
    /// Evaluator with the default operator set
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: Predicate> Evaluator<P> {
    /// Evaluator with a custom predicate
    pub fn with_predicate(predicate: P) -> Self {
        Self { predicate }
    }

    /// The underlying predicate
    pub fn predicate(&self) -> &P {
        &self.predicate
    }

    /// Check every constraint in the list; fails on the first bad one
    pub fn validate(&self, constraints: &[Constraint]) -> Result<()> {
        constraints
            .iter()
            .try_for_each(|c| self.predicate.check(c))
    }

    /// Does `record` satisfy every constraint?
    pub fn matches(&self, record: &Record, constraints: &[Constraint]) -> Result<bool> {
        self.validate(constraints)?;
        Ok(self.matches_validated(record, constraints))
    }

    /// Per-record test for a list that already passed [`Evaluator::validate`]
    #[inline]
    pub(crate) fn matches_validated(&self, record: &Record, constraints: &[Constraint]) -> bool {
        constraints.iter().all(|c| self.predicate.test(record, c))
    }

    /// Ordered subsequence of `records` satisfying `constraints`
    ///
    /// An empty list returns every record without consulting the predicate.
    pub fn select(&self, records: &[RecordRef], constraints: &[Constraint]) -> Result<Vec<RecordRef>> {
        if constraints.is_empty() {
            trace!(target: "recstore::engine", records = records.len(), "empty constraint list, selecting all");
            return Ok(records.to_vec());
        }
        self.validate(constraints)?;
        Ok(records
            .iter()
            .filter(|r| self.matches_validated(r, constraints))
            .cloned()
            .collect())
    }
}
