use super::Alteration;
use crate::{stmt::Direction, Query};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub column: String,
    pub direction: Direction,
}

impl OrderBy {
    pub fn new(column: impl Into<String>, direction: Direction) -> OrderBy {
        OrderBy {
            column: column.into(),
            direction,
        }
    }

    pub fn asc(column: impl Into<String>) -> OrderBy {
        OrderBy::new(column, Direction::Asc)
    }

    pub fn desc(column: impl Into<String>) -> OrderBy {
        OrderBy::new(column, Direction::Desc)
    }
}

impl Alteration for OrderBy {
    fn apply(&self, query: &mut Query) {
        query.connection().order_by(&self.column, self.direction);
    }
}
