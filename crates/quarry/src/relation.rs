mod cache;
pub(crate) use cache::{RelationCache, RelationKey};

use crate::{
    filter::PrimaryKeyIn,
    model::short_name,
    stmt::{Id, Value},
    Collection, Entity, Model, Result,
};

use indexmap::IndexSet;
use std::{any::TypeId, sync::Arc};

/// Which side of the relationship holds the foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    /// The target rows point back at the caller (`has_one`, `has_many`)
    Target,

    /// The caller's rows point at the target (`belongs_to`)
    Caller,
}

impl<M: Model> Entity<M> {
    /// Every `T` reachable from `M`'s result set through `foreign_key`.
    ///
    /// Resolved once per `Db` and shared by all entities of `M`. `join` names
    /// the column on `T` the foreign key values match, `T`'s primary key
    /// unless given.
    pub fn related<T: Model>(
        &self,
        foreign_key: &str,
        join: Option<&str>,
    ) -> Result<Arc<Collection<Entity<T>>>> {
        self.resolve::<T>(foreign_key, join, Side::Target)
    }

    /// The `T`s this entity's foreign key values point at, ordered by those
    /// values.
    ///
    /// `foreign_key` is either a dynamic field, whose items carry the `join`
    /// column, or a plain attribute holding one value or a list of values.
    pub fn has_many<T: Model>(
        &self,
        foreign_key: &str,
        join: Option<&str>,
    ) -> Result<Collection<Entity<T>>> {
        self.db().ensure_registered::<M, T>()?;

        let join = join.unwrap_or(T::PRIMARY_KEY);
        let values = self.foreign_values(foreign_key, join)?;

        if values.is_empty() {
            return Ok(Collection::default());
        }

        let fetched = self.resolve::<T>(foreign_key, Some(join), Side::Target)?;

        Ok(values
            .iter()
            .flat_map(|value| {
                fetched
                    .iter()
                    .filter(move |entity| entity.raw(join).and_then(Value::as_id) == Some(*value))
                    .cloned()
            })
            .collect())
    }

    /// The first `T` whose `join` value matches this entity's foreign-key
    /// value, out of the same shared set [`Entity::has_many`] uses.
    pub fn has_one<T: Model>(
        &self,
        foreign_key: &str,
        join: Option<&str>,
    ) -> Result<Option<Entity<T>>> {
        Ok(self.has_many(foreign_key, join)?.into_iter().next())
    }

    /// The `T`s the result set's `foreign_key` values point at.
    pub fn belongs_to<T: Model>(
        &self,
        foreign_key: &str,
        join: Option<&str>,
    ) -> Result<Arc<Collection<Entity<T>>>> {
        self.resolve::<T>(foreign_key, join, Side::Caller)
    }

    fn resolve<T: Model>(
        &self,
        foreign_key: &str,
        join: Option<&str>,
        side: Side,
    ) -> Result<Arc<Collection<Entity<T>>>> {
        let db = self.db();
        db.ensure_registered::<M, T>()?;

        let key = RelationKey::new(TypeId::of::<M>(), TypeId::of::<T>(), foreign_key);

        if db.relation_cache_enabled() {
            if let Some(hit) = db.relations().get::<Collection<Entity<T>>>(&key) {
                tracing::debug!(
                    source = short_name::<M>(),
                    target = short_name::<T>(),
                    foreign_key,
                    "quarry.relation: cache hit"
                );
                return Ok(hit);
            }
        }

        let join = join.unwrap_or(T::PRIMARY_KEY);
        let sources = self.get()?;

        let values: IndexSet<Id> = if self.is_field(foreign_key)? {
            db.driver()
                .field_column_values(M::ENTITY_TYPE, foreign_key, join, &sources.ids())?
                .iter()
                .filter_map(Value::as_id)
                .collect()
        } else {
            match side {
                Side::Target => sources.ids(),
                Side::Caller => sources
                    .iter()
                    .filter_map(|entity| entity.raw(foreign_key))
                    .flat_map(ids_in)
                    .collect(),
            }
        };

        tracing::debug!(
            source = short_name::<M>(),
            target = short_name::<T>(),
            foreign_key,
            values = values.len(),
            "quarry.relation: resolving"
        );

        let fetched = if values.is_empty() {
            Collection::default()
        } else {
            T::all(db)
                .filter(PrimaryKeyIn::new(values).key(join))
                .get()?
        };
        let fetched = Arc::new(fetched);

        if !db.relation_cache_enabled() {
            return Ok(fetched);
        }

        Ok(db.relations().insert(key, fetched))
    }

    /// This entity's own values for `foreign_key`.
    fn foreign_values(&self, foreign_key: &str, join: &str) -> Result<IndexSet<Id>> {
        if self.is_field(foreign_key)? {
            let Some(Value::List(items)) = self.attr(foreign_key)? else {
                return Ok(IndexSet::new());
            };

            return Ok(items
                .iter()
                .filter_map(Value::as_record)
                .filter_map(|item| item.get(join))
                .filter_map(Value::as_id)
                .collect());
        }

        Ok(self.raw(foreign_key).map(ids_in).unwrap_or_default())
    }
}

/// Ids held by a plain attribute: a single key or a list of keys, at any
/// depth.
fn ids_in(value: &Value) -> IndexSet<Id> {
    match value {
        Value::List(items) => items.iter().flat_map(ids_in).collect(),
        other => other.as_id().into_iter().collect(),
    }
}
