use super::Alteration;
use crate::Query;

/// Return at most `limit` rows, skipping the first `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    pub limit: usize,
    pub offset: usize,
}

impl Limit {
    pub fn new(limit: usize) -> Limit {
        Limit { limit, offset: 0 }
    }

    pub fn with_offset(limit: usize, offset: usize) -> Limit {
        Limit { limit, offset }
    }
}

impl Alteration for Limit {
    fn apply(&self, query: &mut Query) {
        query.connection().range(self.offset, self.limit);
    }
}
