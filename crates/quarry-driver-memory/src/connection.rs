use super::State;

use quarry_core::{
    driver::{Connection, Response, LANGUAGE_NONE},
    err,
    stmt::{Direction, Id, Op, Record, Value},
    Result,
};
use std::{
    cmp::Ordering,
    sync::{Arc, Mutex, PoisonError},
};

/// A query over a [`Memory`](super::Memory) store.
///
/// Conditions are evaluated when the query executes, against whatever the
/// store holds at that moment.
#[derive(Debug, Clone)]
pub struct MemoryConnection {
    state: Arc<Mutex<State>>,
    entity_type: Option<String>,
    bundle: Option<String>,
    conditions: Vec<Condition>,
    order: Vec<(String, Direction)>,
    range: Option<(usize, usize)>,
    count: bool,
}

#[derive(Debug, Clone)]
enum Condition {
    Property {
        column: String,
        value: Value,
        op: Op,
    },
    Field {
        field_name: String,
        column: String,
        value: Value,
        op: Op,
    },
}

impl MemoryConnection {
    pub(crate) fn new(state: Arc<Mutex<State>>) -> MemoryConnection {
        MemoryConnection {
            state,
            entity_type: None,
            bundle: None,
            conditions: vec![],
            order: vec![],
            range: None,
            count: false,
        }
    }
}

impl Connection for MemoryConnection {
    fn scope_type(&mut self, entity_type: &str) {
        self.entity_type = Some(entity_type.to_string());
    }

    fn scope_bundle(&mut self, bundle: &str) {
        self.bundle = Some(bundle.to_string());
    }

    fn condition(&mut self, column: &str, value: Value, op: Op) {
        self.conditions.push(Condition::Property {
            column: column.to_string(),
            value,
            op,
        });
    }

    fn field_condition(&mut self, field_name: &str, column: &str, value: Value, op: Op) {
        self.conditions.push(Condition::Field {
            field_name: field_name.to_string(),
            column: column.to_string(),
            value,
            op,
        });
    }

    fn range(&mut self, offset: usize, limit: usize) {
        self.range = Some((offset, limit));
    }

    fn order_by(&mut self, column: &str, direction: Direction) {
        self.order.push((column.to_string(), direction));
    }

    fn enable_count_mode(&mut self) {
        self.count = true;
    }

    fn execute(&self) -> Result<Response> {
        let Some(entity_type) = &self.entity_type else {
            return Err(err!("query has no entity type"));
        };

        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let ty = state.entity_type(entity_type)?;

        let mut rows: Vec<(Id, &Record)> = ty
            .rows
            .iter()
            .filter(|(_, record)| match (&self.bundle, &ty.bundle_key) {
                (None, _) => true,
                (Some(bundle), Some(key)) => {
                    record.get(key).and_then(Value::as_str) == Some(bundle.as_str())
                }
                (Some(_), None) => false,
            })
            .filter(|(_, record)| self.conditions.iter().all(|c| c.matches(record)))
            .map(|(id, record)| (*id, record))
            .collect();

        if self.count {
            return Ok(Response::count(rows.len() as u64));
        }

        rows.sort_by(|(lhs_id, lhs), (rhs_id, rhs)| {
            self.order
                .iter()
                .map(|(column, direction)| {
                    let lhs = lhs.get(column).unwrap_or(&Value::Null);
                    let rhs = rhs.get(column).unwrap_or(&Value::Null);
                    let ordering = lhs.compare(rhs).unwrap_or(Ordering::Equal);

                    match direction {
                        Direction::Asc => ordering,
                        Direction::Desc => ordering.reverse(),
                    }
                })
                .find(|ordering| ordering.is_ne())
                .unwrap_or_else(|| lhs_id.cmp(rhs_id))
        });

        let (offset, limit) = self.range.unwrap_or((0, usize::MAX));
        let ids = rows.into_iter().skip(offset).take(limit).map(|(id, _)| id);

        Ok(Response::ids(ids))
    }

    fn box_clone(&self) -> Box<dyn Connection> {
        Box::new(self.clone())
    }
}

impl Condition {
    fn matches(&self, record: &Record) -> bool {
        match self {
            Condition::Property { column, value, op } => {
                let actual = record.get(column).unwrap_or(&Value::Null);
                compare(actual, *op, value)
            }
            Condition::Field {
                field_name,
                column,
                value,
                op,
            } => field_items(record, field_name)
                .iter()
                .filter_map(Value::as_record)
                .any(|item| compare(item.get(column).unwrap_or(&Value::Null), *op, value)),
        }
    }
}

/// The items of a field, out of the language-neutral slot or the first one.
fn field_items<'a>(record: &'a Record, field_name: &str) -> &'a [Value] {
    let Some(storage) = record.get(field_name).and_then(Value::as_record) else {
        return &[];
    };

    storage
        .get(LANGUAGE_NONE)
        .or_else(|| storage.iter().next().map(|(_, items)| items))
        .and_then(Value::as_list)
        .unwrap_or(&[])
}

fn compare(actual: &Value, op: Op, expected: &Value) -> bool {
    // Multi-valued attributes match when any value does
    if let Value::List(values) = actual {
        return match op {
            Op::Ne | Op::NotIn => values.iter().all(|v| compare(v, op, expected)),
            _ => values.iter().any(|v| compare(v, op, expected)),
        };
    }

    match op {
        Op::Eq => actual.loose_eq(expected),
        Op::Ne => !actual.loose_eq(expected),
        Op::Lt => actual.compare(expected).is_some_and(Ordering::is_lt),
        Op::Le => actual.compare(expected).is_some_and(Ordering::is_le),
        Op::Gt => actual.compare(expected).is_some_and(Ordering::is_gt),
        Op::Ge => actual.compare(expected).is_some_and(Ordering::is_ge),
        Op::In => expected
            .as_list()
            .is_some_and(|set| set.iter().any(|v| actual.loose_eq(v))),
        Op::NotIn => !expected
            .as_list()
            .is_some_and(|set| set.iter().any(|v| actual.loose_eq(v))),
        Op::Like => expected.as_str().is_some_and(|pattern| actual.like(pattern)),
    }
}
