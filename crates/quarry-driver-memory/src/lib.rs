mod connection;
pub use connection::MemoryConnection;

use indexmap::{IndexMap, IndexSet};
use quarry_core::{
    driver::{Connection, Driver},
    err,
    schema::{FieldBase, FieldInstance},
    stmt::{Id, Record},
    Result,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// An entity store held in process memory.
///
/// Clones share the same data, so a test can keep a handle for seeding and
/// inspection after handing another to `Db::builder().build(..)`.
#[derive(Debug, Clone, Default)]
pub struct Memory {
    state: Arc<Mutex<State>>,
}

#[derive(Debug, Default)]
struct State {
    types: IndexMap<String, EntityType>,

    /// Url aliases: alias -> source path
    aliases: IndexMap<String, String>,

    field_bases: Vec<FieldBase>,
    field_instances: Vec<FieldInstance>,
}

#[derive(Debug)]
struct EntityType {
    /// Attribute holding the primary key
    id_key: String,

    /// Attribute naming the bundle, for types that have bundles
    bundle_key: Option<String>,

    rows: IndexMap<Id, Record>,
    next_id: u64,
}

impl Memory {
    pub fn new() -> Memory {
        Memory::default()
    }

    /// A store with the entity types of a stock content site: nodes, terms,
    /// vocabularies and users.
    pub fn standard() -> Memory {
        Memory::new()
            .entity_type("node", "nid", Some("type"))
            .entity_type("taxonomy_term", "tid", Some("vocabulary_machine_name"))
            .entity_type("taxonomy_vocabulary", "vid", None)
            .entity_type("user", "uid", None)
    }

    /// Declare an entity type. Operations on undeclared types fail.
    pub fn entity_type(self, name: &str, id_key: &str, bundle_key: Option<&str>) -> Memory {
        self.lock().types.insert(
            name.to_string(),
            EntityType {
                id_key: id_key.to_string(),
                bundle_key: bundle_key.map(str::to_string),
                rows: IndexMap::new(),
                next_id: 1,
            },
        );
        self
    }

    /// Store a record as-is, assigning an id when it has none.
    pub fn insert(&self, entity_type: &str, record: Record) -> Result<Id> {
        let mut state = self.lock();
        let ty = state.entity_type_mut(entity_type)?;
        let (id, _) = ty.store(record);
        Ok(id)
    }

    pub fn get(&self, entity_type: &str, id: Id) -> Option<Record> {
        self.lock().types.get(entity_type)?.rows.get(&id).cloned()
    }

    /// Number of stored records of one type.
    pub fn len(&self, entity_type: &str) -> usize {
        self.lock()
            .types
            .get(entity_type)
            .map_or(0, |ty| ty.rows.len())
    }

    pub fn is_empty(&self, entity_type: &str) -> bool {
        self.len(entity_type) == 0
    }

    pub fn add_alias(&self, alias: &str, source: &str) {
        self.lock()
            .aliases
            .insert(alias.trim_start_matches('/').to_string(), source.to_string());
    }

    pub fn add_field_base(&self, base: FieldBase) {
        self.lock().field_bases.push(base);
    }

    pub fn add_field_instance(&self, instance: FieldInstance) {
        self.lock().field_instances.push(instance);
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl State {
    fn entity_type(&self, name: &str) -> Result<&EntityType> {
        self.types
            .get(name)
            .ok_or_else(|| err!("memory store has no entity type `{name}`"))
    }

    fn entity_type_mut(&mut self, name: &str) -> Result<&mut EntityType> {
        self.types
            .get_mut(name)
            .ok_or_else(|| err!("memory store has no entity type `{name}`"))
    }
}

impl EntityType {
    fn store(&mut self, mut record: Record) -> (Id, Record) {
        let id = match record.id(&self.id_key) {
            Some(id) => id,
            None => {
                let id = Id(self.next_id);
                record.set(self.id_key.clone(), id);
                id
            }
        };

        self.next_id = self.next_id.max(id.get().saturating_add(1));
        self.rows.insert(id, record.clone());
        (id, record)
    }
}

impl Driver for Memory {
    fn connection(&self) -> Box<dyn Connection> {
        Box::new(MemoryConnection::new(self.state.clone()))
    }

    fn load(&self, entity_type: &str, ids: &IndexSet<Id>) -> Result<IndexMap<Id, Record>> {
        let state = self.lock();
        let ty = state.entity_type(entity_type)?;

        Ok(ids
            .iter()
            .filter_map(|id| Some((*id, ty.rows.get(id)?.clone())))
            .collect())
    }

    fn save(&self, entity_type: &str, record: Record) -> Result<Record> {
        let mut state = self.lock();
        let (id, record) = state.entity_type_mut(entity_type)?.store(record);
        tracing::trace!(entity_type, %id, "memory.save");
        Ok(record)
    }

    fn delete(&self, entity_type: &str, id: Id) -> Result<()> {
        let mut state = self.lock();
        state.entity_type_mut(entity_type)?.rows.shift_remove(&id);
        Ok(())
    }

    fn field_base_definitions(&self) -> Result<Vec<FieldBase>> {
        Ok(self.lock().field_bases.clone())
    }

    fn field_instance_definitions(
        &self,
        entity_type: &str,
        bundle: &str,
    ) -> Result<Vec<FieldInstance>> {
        Ok(self
            .lock()
            .field_instances
            .iter()
            .filter(|instance| instance.is_attached_to(entity_type, bundle))
            .cloned()
            .collect())
    }

    fn create_field(&self, base: &FieldBase) -> Result<()> {
        let mut state = self.lock();

        if state
            .field_bases
            .iter()
            .any(|existing| existing.field_name == base.field_name)
        {
            return Err(err!("field `{}` already exists", base.field_name));
        }

        state.field_bases.push(base.clone());
        Ok(())
    }

    fn create_field_instance(&self, instance: &FieldInstance) -> Result<()> {
        let mut state = self.lock();

        if !state
            .field_bases
            .iter()
            .any(|base| base.field_name == instance.field_name)
        {
            return Err(err!("field `{}` does not exist", instance.field_name));
        }

        if state.field_instances.iter().any(|existing| {
            existing.field_name == instance.field_name
                && existing.is_attached_to(&instance.entity_type, &instance.bundle)
        }) {
            return Err(err!(
                "field `{}` is already attached to {}.{}",
                instance.field_name,
                instance.entity_type,
                instance.bundle
            ));
        }

        state.field_instances.push(instance.clone());
        Ok(())
    }

    fn delete_field_instance(&self, instance: &FieldInstance) -> Result<()> {
        let mut state = self.lock();

        let Some(index) = state.field_instances.iter().position(|existing| {
            existing.field_name == instance.field_name
                && existing.is_attached_to(&instance.entity_type, &instance.bundle)
        }) else {
            return Err(err!(
                "field `{}` is not attached to {}.{}",
                instance.field_name,
                instance.entity_type,
                instance.bundle
            ));
        };

        state.field_instances.remove(index);
        Ok(())
    }

    fn resolve_alias(&self, path: &str) -> Result<Option<String>> {
        Ok(self.lock().aliases.get(path).cloned())
    }

    fn path_alias(&self, source: &str) -> Result<Option<String>> {
        Ok(self
            .lock()
            .aliases
            .iter()
            .find(|(_, s)| *s == source)
            .map(|(alias, _)| alias.clone()))
    }
}
