//! Per-call context and result emission
//!
//! A [`Context`] bundles the collection name, the constraint list, and the
//! payload of a single call. Results are handed back synchronously, or pushed
//! through a [`Sink`] as one `emit` followed by `complete`.

use crate::command::{Command, Operation};
use recstore_core::{
    constraints_from_json, records_from_value, Constraint, Error, Record, RecordRef, Result,
};
use serde_json::Value;

/// Payload carried by a context
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Payload {
    /// No payload
    #[default]
    None,
    /// Records to append
    Records(Vec<Record>),
    /// Fields to merge
    Patch(Record),
}

/// Per-call bundle of collection name, constraints, and payload
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Context {
    /// Target collection
    pub collection_name: String,
    /// AND-ed constraints; `None` when the caller supplied none
    pub constraints: Option<Vec<Constraint>>,
    /// Records or patch
    pub data: Payload,
}

impl Context {
    /// Context for `collection` with no constraints and no payload
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection_name: collection.into(),
            ..Default::default()
        }
    }

    /// Set the constraint list
    pub fn constraints(mut self, constraints: Vec<Constraint>) -> Self {
        self.constraints = Some(constraints);
        self
    }

    /// Set records to append
    pub fn records(mut self, records: Vec<Record>) -> Self {
        self.data = Payload::Records(records);
        self
    }

    /// Set the patch to merge
    pub fn patch(mut self, patch: Record) -> Self {
        self.data = Payload::Patch(patch);
        self
    }

    /// Decode a context from JSON:
    /// `{"collectionName": .., "constraints": [..], "data": [..] | {..}}`
    pub fn from_json(value: Value) -> Result<Self> {
        let Value::Object(mut map) = value else {
            return Err(Error::invalid_record("context must be a JSON object"));
        };
        let collection_name = match map.remove("collectionName") {
            Some(Value::String(name)) => name,
            _ => return Err(Error::invalid_record("context needs a string collectionName")),
        };
        let constraints = match map.remove("constraints") {
            None | Some(Value::Null) => None,
            Some(list) => Some(constraints_from_json(list)?),
        };
        let data = match map.remove("data") {
            None | Some(Value::Null) => Payload::None,
            Some(Value::Object(patch)) => Payload::Patch(Record::from(patch)),
            Some(records) => Payload::Records(records_from_value(records)?),
        };
        Ok(Self {
            collection_name,
            constraints,
            data,
        })
    }

    /// Build the command for `operation` from this context
    pub fn into_command(self, operation: Operation) -> Result<Command> {
        let collection = self.collection_name;
        Ok(match operation {
            Operation::Query => Command::Query {
                collection,
                constraints: self.constraints.unwrap_or_default(),
            },
            Operation::Create | Operation::Save => Command::Create {
                collection,
                records: match self.data {
                    Payload::None => Vec::new(),
                    Payload::Records(records) => records,
                    Payload::Patch(record) => vec![record],
                },
            },
            Operation::Update => Command::Update {
                collection,
                constraints: self.constraints.unwrap_or_default(),
                patch: match self.data {
                    Payload::None => Record::new(),
                    Payload::Patch(patch) => patch,
                    Payload::Records(_) => {
                        return Err(Error::invalid_record(
                            "update takes a single patch object, not a list of records",
                        ))
                    }
                },
            },
            Operation::Remove => Command::Remove {
                collection,
                constraints: self.constraints,
            },
        })
    }
}

/// Receiver for emitted results
pub trait Sink {
    /// Receive the ordered result sequence
    fn emit(&mut self, records: &[RecordRef]);

    /// Called once after `emit`
    fn complete(&mut self) {}
}

impl Sink for Vec<RecordRef> {
    fn emit(&mut self, records: &[RecordRef]) {
        self.extend(records.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_create() {
        let ctx = Context::from_json(json!({
            "collectionName": "users",
            "data": [{"id": 1}, {"id": 2}]
        }))
        .unwrap();
        assert_eq!(ctx.collection_name, "users");
        assert!(ctx.constraints.is_none());
        assert!(matches!(ctx.data, Payload::Records(ref r) if r.len() == 2));
    }

    #[test]
    fn test_from_json_update() {
        let ctx = Context::from_json(json!({
            "collectionName": "users",
            "constraints": [{"field": "id", "op": "eq", "value": 1}],
            "data": {"name": "ada"}
        }))
        .unwrap();
        assert_eq!(ctx.constraints.as_ref().map(Vec::len), Some(1));
        assert!(matches!(ctx.data, Payload::Patch(_)));
    }

    #[test]
    fn test_from_json_errors() {
        assert!(Context::from_json(json!([])).is_err());
        assert!(Context::from_json(json!({"constraints": []})).is_err());
        let err = Context::from_json(json!({
            "collectionName": "c",
            "constraints": [{"field": "x", "op": "like", "value": 1}]
        }))
        .unwrap_err();
        assert!(err.is_invalid_constraint());
    }

    #[test]
    fn test_remove_keeps_absent_constraints() {
        let cmd = Context::new("c").into_command(Operation::Remove).unwrap();
        assert_eq!(
            cmd,
            Command::Remove {
                collection: "c".into(),
                constraints: None
            }
        );
    }

    #[test]
    fn test_query_absent_constraints_means_all() {
        let cmd = Context::new("c").into_command(Operation::Query).unwrap();
        assert_eq!(
            cmd,
            Command::Query {
                collection: "c".into(),
                constraints: vec![]
            }
        );
    }

    #[test]
    fn test_save_and_create_build_same_command() {
        let ctx = Context::new("c").records(vec![Record::new().with("id", 1)]);
        assert_eq!(
            ctx.clone().into_command(Operation::Save).unwrap(),
            ctx.into_command(Operation::Create).unwrap()
        );
    }

    #[test]
    fn test_update_rejects_record_list() {
        let err = Context::new("c")
            .records(vec![Record::new()])
            .into_command(Operation::Update)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRecord { .. }));
    }
}
