mod builder;
pub use builder::Builder;

use crate::{
    driver::Driver, model::short_name, relation::RelationCache, Error, FieldCatalog, Model,
    Result,
};

use indexmap::IndexMap;
use std::{
    any::TypeId,
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

/// A session with an entity store.
///
/// Holds the driver, the registered models and the caches built on top of
/// them. Clones share all of it; caches live until [`Db::clear_caches`] or
/// until the last clone is dropped.
#[derive(Clone)]
pub struct Db {
    shared: Arc<Shared>,
}

struct Shared {
    driver: Arc<dyn Driver>,

    /// Registered models, keyed by their Rust type
    models: IndexMap<TypeId, ModelInfo>,

    /// When false, relationships are resolved on every call
    relation_cache: bool,

    relations: Mutex<RelationCache>,

    fields: Mutex<HashMap<TypeId, Arc<FieldCatalog>>>,
}

/// Registration record for one model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ModelInfo {
    pub(crate) type_id: TypeId,
    pub(crate) name: &'static str,
    pub(crate) entity_type: &'static str,
    pub(crate) primary_key: &'static str,
    pub(crate) bundle: Option<&'static str>,
}

impl ModelInfo {
    pub(crate) fn of<M: Model>() -> ModelInfo {
        ModelInfo {
            type_id: TypeId::of::<M>(),
            name: short_name::<M>(),
            entity_type: M::ENTITY_TYPE,
            primary_key: M::PRIMARY_KEY,
            bundle: M::BUNDLE,
        }
    }
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn driver(&self) -> &dyn Driver {
        &*self.shared.driver
    }

    pub fn is_registered<M: Model>(&self) -> bool {
        self.shared.models.contains_key(&TypeId::of::<M>())
    }

    /// The dynamic fields attached to `M`'s entity type and bundle.
    ///
    /// Computed from the driver's definitions on first use, then reused.
    /// Models without a bundle have no dynamic fields.
    pub fn field_catalog<M: Model>(&self) -> Result<Arc<FieldCatalog>> {
        let key = TypeId::of::<M>();

        if let Some(catalog) = lock(&self.shared.fields).get(&key) {
            return Ok(catalog.clone());
        }

        let catalog = match M::BUNDLE {
            Some(bundle) => {
                let bases = self.driver().field_base_definitions()?;
                let instances = self
                    .driver()
                    .field_instance_definitions(M::ENTITY_TYPE, bundle)?;
                FieldCatalog::resolve(bases, instances)
            }
            None => FieldCatalog::default(),
        };

        tracing::debug!(
            model = short_name::<M>(),
            fields = catalog.bases().len(),
            "quarry.field_catalog"
        );

        let mut fields = lock(&self.shared.fields);
        Ok(fields.entry(key).or_insert_with(|| Arc::new(catalog)).clone())
    }

    /// Drop `M`'s memoised field catalog so the next lookup asks the driver.
    pub fn forget_field_catalog<M: Model>(&self) {
        lock(&self.shared.fields).remove(&TypeId::of::<M>());
    }

    /// Number of relationships currently memoised.
    pub fn cached_relations(&self) -> usize {
        lock(&self.shared.relations).len()
    }

    /// Discard every cached relationship and field catalog.
    pub fn clear_caches(&self) {
        lock(&self.shared.relations).clear();
        lock(&self.shared.fields).clear();
    }

    /// Fail unless `T` is registered, naming `M` as the model that asked.
    pub(crate) fn ensure_registered<M: Model, T: Model>(&self) -> Result<()> {
        if self.is_registered::<T>() {
            Ok(())
        } else {
            Err(Error::invalid_relationship_target(
                short_name::<M>(),
                short_name::<T>(),
            ))
        }
    }

    pub(crate) fn relation_cache_enabled(&self) -> bool {
        self.shared.relation_cache
    }

    pub(crate) fn relations(&self) -> MutexGuard<'_, RelationCache> {
        lock(&self.shared.relations)
    }
}

impl fmt::Debug for Db {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Db")
            .field("driver", &self.shared.driver)
            .field(
                "models",
                &self.shared.models.values().map(|m| m.name).collect::<Vec<_>>(),
            )
            .field("relation_cache", &self.shared.relation_cache)
            .finish()
    }
}

/// Cache writes are single inserts, so a poisoned lock still guards valid data.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
