use super::Response;
use crate::{
    stmt::{Direction, Op, Value},
    Result,
};

use std::fmt::Debug;

/// A query handle opened on a driver.
///
/// Handles accumulate conditions and directives until `execute` runs them.
/// `box_clone` must produce an independent handle: conditions added to the
/// copy never show up on the original.
pub trait Connection: Debug + Send + Sync {
    /// Restrict results to one entity type.
    fn scope_type(&mut self, entity_type: &str);

    /// Restrict results to one bundle of the scoped entity type.
    fn scope_bundle(&mut self, bundle: &str);

    /// Compare a plain column.
    fn condition(&mut self, column: &str, value: Value, op: Op);

    /// Compare a column of a dynamic field's items.
    fn field_condition(&mut self, field_name: &str, column: &str, value: Value, op: Op);

    /// Window the results; the last call wins.
    fn range(&mut self, offset: usize, limit: usize);

    /// Append an ordering directive.
    fn order_by(&mut self, column: &str, direction: Direction);

    /// Return the number of matching rows instead of ids. Any window set by
    /// `range` does not apply to the count.
    fn enable_count_mode(&mut self);

    fn execute(&self) -> Result<Response>;

    fn box_clone(&self) -> Box<dyn Connection>;
}

impl Clone for Box<dyn Connection> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}
