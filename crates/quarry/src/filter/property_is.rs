use super::Filter;
use crate::{
    stmt::{Op, Value},
    Query,
};

/// Compare a plain column against a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyIs {
    pub column: String,
    pub value: Value,
    pub op: Op,
}

impl PropertyIs {
    pub fn new(column: impl Into<String>, value: impl Into<Value>) -> PropertyIs {
        PropertyIs {
            column: column.into(),
            value: value.into(),
            op: Op::Eq,
        }
    }

    pub fn op(mut self, op: Op) -> PropertyIs {
        self.op = op;
        self
    }
}

impl Filter for PropertyIs {
    fn apply(&self, query: &mut Query) {
        query
            .connection()
            .condition(&self.column, self.value.clone(), self.op);
    }
}

/// Match the publishing status (`1` published, `0` not).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusIs(pub Value);

impl StatusIs {
    pub fn new(status: impl Into<Value>) -> StatusIs {
        StatusIs(status.into())
    }

    pub fn published() -> StatusIs {
        StatusIs(Value::I64(1))
    }
}

impl Filter for StatusIs {
    fn apply(&self, query: &mut Query) {
        query.connection().condition("status", self.0.clone(), Op::Eq);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleIs(pub String);

impl TitleIs {
    pub fn new(title: impl Into<String>) -> TitleIs {
        TitleIs(title.into())
    }
}

impl Filter for TitleIs {
    fn apply(&self, query: &mut Query) {
        query
            .connection()
            .condition("title", Value::String(self.0.clone()), Op::Eq);
    }
}
