use crate::{stmt::Id, Error, Result};

/// Outcome of executing a query handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub result: QueryResult,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryResult {
    /// Matched ids, in the order the store returned them
    Ids(Vec<Id>),

    /// Number of matching rows (count mode)
    Count(u64),
}

impl Response {
    pub fn ids(ids: impl IntoIterator<Item = Id>) -> Self {
        Self {
            result: QueryResult::Ids(ids.into_iter().collect()),
        }
    }

    pub fn count(count: u64) -> Self {
        Self {
            result: QueryResult::Count(count),
        }
    }

    pub fn into_ids(self) -> Result<Vec<Id>> {
        match self.result {
            QueryResult::Ids(ids) => Ok(ids),
            QueryResult::Count(_) => Err(Error::unexpected_response("ids", "a count")),
        }
    }

    pub fn into_count(self) -> Result<u64> {
        match self.result {
            QueryResult::Count(count) => Ok(count),
            QueryResult::Ids(_) => Err(Error::unexpected_response("a count", "ids")),
        }
    }
}

impl QueryResult {
    pub fn is_count(&self) -> bool {
        matches!(self, Self::Count(_))
    }

    pub fn is_ids(&self) -> bool {
        matches!(self, Self::Ids(_))
    }
}
