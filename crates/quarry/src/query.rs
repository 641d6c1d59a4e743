use crate::{
    alter::Alteration,
    driver::{Connection, Response},
    filter::Filter,
    Result,
};

/// A query builder over a driver connection.
///
/// Filters and alterations are applied in the order given and combine
/// conjunctively. Cloning a `Query` clones its connection, so the copy can be
/// narrowed further without affecting the original.
#[derive(Debug, Clone)]
pub struct Query {
    connection: Box<dyn Connection>,
    count: bool,
}

impl Query {
    pub fn new(connection: Box<dyn Connection>) -> Query {
        Query {
            connection,
            count: false,
        }
    }

    pub fn filter(&mut self, filter: impl Filter) -> &mut Self {
        tracing::trace!(?filter, "quarry.filter");
        filter.apply(self);
        self
    }

    pub fn filters<I>(&mut self, filters: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Filter,
    {
        for filter in filters {
            self.filter(filter);
        }
        self
    }

    pub fn alter(&mut self, alteration: impl Alteration) -> &mut Self {
        tracing::trace!(?alteration, "quarry.alter");
        alteration.apply(self);
        self
    }

    pub fn alterations<I>(&mut self, alterations: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Alteration,
    {
        for alteration in alterations {
            self.alter(alteration);
        }
        self
    }

    /// Switch the query to count mode. There is no way back.
    pub fn count(&mut self) -> &mut Self {
        if !self.count {
            self.connection.enable_count_mode();
            self.count = true;
        }
        self
    }

    pub fn is_count(&self) -> bool {
        self.count
    }

    pub fn execute(&self) -> Result<Response> {
        let response = self.connection.execute()?;
        tracing::debug!(count_mode = self.count, result = ?response.result, "quarry.execute");
        Ok(response)
    }

    /// The driver handle, for filter and alteration implementations that need
    /// driver-specific primitives.
    pub fn connection(&mut self) -> &mut dyn Connection {
        &mut *self.connection
    }
}
