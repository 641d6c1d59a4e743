use super::Filter;
use crate::{
    stmt::{Op, Value},
    Query,
};

/// Compare one column of a dynamic field's items, e.g. the `tid` column of a
/// term reference field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIs {
    pub field_name: String,
    pub column: String,
    pub value: Value,
    pub op: Op,
}

impl FieldIs {
    pub fn new(
        field_name: impl Into<String>,
        column: impl Into<String>,
        value: impl Into<Value>,
    ) -> FieldIs {
        FieldIs {
            field_name: field_name.into(),
            column: column.into(),
            value: value.into(),
            op: Op::Eq,
        }
    }

    pub fn op(mut self, op: Op) -> FieldIs {
        self.op = op;
        self
    }
}

impl Filter for FieldIs {
    fn apply(&self, query: &mut Query) {
        query.connection().field_condition(
            &self.field_name,
            &self.column,
            self.value.clone(),
            self.op,
        );
    }
}
