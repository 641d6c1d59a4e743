use super::{Db, ModelInfo, Shared};
use crate::{driver::Driver, relation::RelationCache, Error, Model, Result};

use indexmap::IndexMap;
use std::sync::{Arc, Mutex};

pub struct Builder {
    /// Models in registration order
    models: Vec<ModelInfo>,

    relation_cache: bool,
}

impl Default for Builder {
    fn default() -> Self {
        Builder {
            models: vec![],
            relation_cache: true,
        }
    }
}

impl Builder {
    pub fn register<M: Model>(&mut self) -> &mut Self {
        self.models.push(ModelInfo::of::<M>());
        self
    }

    /// Memoise resolved relationships for the lifetime of the `Db`. On by
    /// default.
    pub fn relation_cache(&mut self, enabled: bool) -> &mut Self {
        self.relation_cache = enabled;
        self
    }

    pub fn build(&mut self, driver: impl Driver) -> Result<Db> {
        let mut models = IndexMap::with_capacity(self.models.len());

        for model in &self.models {
            verify(model)?;
            models.insert(model.type_id, model.clone());
        }

        tracing::debug!(
            models = models.len(),
            relation_cache = self.relation_cache,
            "quarry.build"
        );

        Ok(Db {
            shared: Arc::new(Shared {
                driver: Arc::new(driver),
                models,
                relation_cache: self.relation_cache,
                relations: Mutex::new(RelationCache::default()),
                fields: Mutex::new(Default::default()),
            }),
        })
    }
}

fn verify(model: &ModelInfo) -> Result<()> {
    if model.entity_type.trim().is_empty() {
        return Err(Error::invalid_schema(model.name, "has an empty entity type"));
    }

    if model.primary_key.trim().is_empty() {
        return Err(Error::invalid_schema(model.name, "has an empty primary key"));
    }

    if model.bundle.is_some_and(|bundle| bundle.trim().is_empty()) {
        return Err(Error::invalid_schema(model.name, "declares an empty bundle"));
    }

    Ok(())
}
