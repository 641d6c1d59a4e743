use super::Filter;
use crate::Query;

/// Scope a query to one entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeOf {
    pub entity_type: String,
}

impl TypeOf {
    pub fn new(entity_type: impl Into<String>) -> TypeOf {
        TypeOf {
            entity_type: entity_type.into(),
        }
    }
}

impl Filter for TypeOf {
    fn apply(&self, query: &mut Query) {
        query.connection().scope_type(&self.entity_type);
    }
}
