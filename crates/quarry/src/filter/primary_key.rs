use super::Filter;
use crate::{
    stmt::{Id, Op, Value},
    Query,
};

use indexmap::IndexSet;

const DEFAULT_KEY: &str = "id";

/// Match a single primary key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKeyIs {
    pub id: Id,
    pub key: String,
}

impl PrimaryKeyIs {
    pub fn new(id: impl Into<Id>) -> PrimaryKeyIs {
        PrimaryKeyIs {
            id: id.into(),
            key: DEFAULT_KEY.to_string(),
        }
    }

    /// Column holding the key, `id` unless set.
    pub fn key(mut self, key: impl Into<String>) -> PrimaryKeyIs {
        self.key = key.into();
        self
    }
}

impl Filter for PrimaryKeyIs {
    fn apply(&self, query: &mut Query) {
        query
            .connection()
            .condition(&self.key, Value::from(self.id), Op::Eq);
    }
}

/// Match any key of a set. Duplicates collapse, first occurrence order is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKeyIn {
    pub ids: IndexSet<Id>,
    pub key: String,
}

impl PrimaryKeyIn {
    pub fn new<I>(ids: I) -> PrimaryKeyIn
    where
        I: IntoIterator,
        I::Item: Into<Id>,
    {
        PrimaryKeyIn {
            ids: ids.into_iter().map(Into::into).collect(),
            key: DEFAULT_KEY.to_string(),
        }
    }

    pub fn key(mut self, key: impl Into<String>) -> PrimaryKeyIn {
        self.key = key.into();
        self
    }
}

impl Filter for PrimaryKeyIn {
    fn apply(&self, query: &mut Query) {
        let ids = self.ids.iter().copied().map(Value::from).collect();
        query
            .connection()
            .condition(&self.key, Value::List(ids), Op::In);
    }
}
