use super::Filter;
use crate::{
    stmt::{Op, Value},
    Query,
};

use jiff::Timestamp;

/// Compare the creation time, stored as unix seconds in `created`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedAt {
    pub timestamp: Timestamp,
    pub op: Op,
}

/// Compare the last update time, stored as unix seconds in `changed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatedAt {
    pub timestamp: Timestamp,
    pub op: Op,
}

impl CreatedAt {
    pub fn new(timestamp: Timestamp) -> CreatedAt {
        CreatedAt {
            timestamp,
            op: Op::Eq,
        }
    }

    pub fn op(mut self, op: Op) -> CreatedAt {
        self.op = op;
        self
    }
}

impl UpdatedAt {
    pub fn new(timestamp: Timestamp) -> UpdatedAt {
        UpdatedAt {
            timestamp,
            op: Op::Eq,
        }
    }

    pub fn op(mut self, op: Op) -> UpdatedAt {
        self.op = op;
        self
    }
}

impl Filter for CreatedAt {
    fn apply(&self, query: &mut Query) {
        let seconds = Value::I64(self.timestamp.as_second());
        query.connection().condition("created", seconds, self.op);
    }
}

impl Filter for UpdatedAt {
    fn apply(&self, query: &mut Query) {
        let seconds = Value::I64(self.timestamp.as_second());
        query.connection().condition("changed", seconds, self.op);
    }
}
