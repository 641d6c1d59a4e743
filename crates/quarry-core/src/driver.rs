mod connection;
pub use connection::Connection;

mod response;
pub use response::{QueryResult, Response};

use crate::{
    schema::{FieldBase, FieldInstance},
    stmt::{Id, Record, Value},
    Result,
};

use indexmap::{IndexMap, IndexSet};
use std::fmt::Debug;

/// Language slot used by field storage for language-neutral values.
pub const LANGUAGE_NONE: &str = "und";

/// The entity store Quarry runs against.
///
/// Every method blocks until the store answers. Failures are returned as-is
/// and surface to the caller unmodified.
pub trait Driver: Debug + Send + Sync + 'static {
    /// Open a fresh query handle.
    fn connection(&self) -> Box<dyn Connection>;

    /// Load full records for the given ids, keyed by id.
    ///
    /// Ids with no stored record are absent from the result.
    fn load(&self, entity_type: &str, ids: &IndexSet<Id>) -> Result<IndexMap<Id, Record>>;

    /// Persist a record, returning it as stored (with any assigned id).
    fn save(&self, entity_type: &str, record: Record) -> Result<Record>;

    fn delete(&self, entity_type: &str, id: Id) -> Result<()>;

    /// Every field base known to the store.
    fn field_base_definitions(&self) -> Result<Vec<FieldBase>>;

    /// Field instances attached to one entity type and bundle.
    fn field_instance_definitions(
        &self,
        entity_type: &str,
        bundle: &str,
    ) -> Result<Vec<FieldInstance>>;

    fn create_field(&self, base: &FieldBase) -> Result<()>;

    fn create_field_instance(&self, instance: &FieldInstance) -> Result<()>;

    fn delete_field_instance(&self, instance: &FieldInstance) -> Result<()>;

    /// Resolve a url alias (`blog/hello-world`) to its source path (`node/12`).
    fn resolve_alias(&self, path: &str) -> Result<Option<String>>;

    /// The alias registered for a source path, if any. The reverse of
    /// `resolve_alias`.
    fn path_alias(&self, source: &str) -> Result<Option<String>> {
        let _ = source;
        Ok(None)
    }

    /// Unwrap a dynamic field's raw storage into the values meant for use.
    ///
    /// Storage is keyed by language; the language-neutral slot wins, otherwise
    /// the first slot is used. Returns `None` when the record has no such
    /// attribute or the storage is not language keyed.
    fn field_items(&self, entity_type: &str, record: &Record, field_name: &str) -> Option<Value> {
        let _ = entity_type;
        let storage = record.get(field_name)?.as_record()?;

        storage
            .get(LANGUAGE_NONE)
            .or_else(|| storage.iter().next().map(|(_, items)| items))
            .cloned()
    }

    /// Read one column out of a dynamic field's storage for a set of entities.
    ///
    /// Values come back in entity order, then item order. Stores with a
    /// dedicated field table should override this with a single query.
    fn field_column_values(
        &self,
        entity_type: &str,
        field_name: &str,
        column: &str,
        ids: &IndexSet<Id>,
    ) -> Result<Vec<Value>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let records = self.load(entity_type, ids)?;
        let mut values = vec![];

        for record in records.values() {
            let Some(Value::List(items)) = self.field_items(entity_type, record, field_name)
            else {
                continue;
            };

            values.extend(
                items
                    .iter()
                    .filter_map(Value::as_record)
                    .filter_map(|item| item.get(column))
                    .cloned(),
            );
        }

        Ok(values)
    }
}
