use crate::{
    alter::{Alteration, Limit},
    filter::{BundleOf, Filter, TypeOf},
    model::short_name,
    stmt::{Id, Record, Value},
    bail, Collection, Db, Error, Model, Query, Result, Truthy,
};

use indexmap::IndexSet;
use serde::{Serialize, Serializer};
use std::{fmt, marker::PhantomData};

/// One record of model `M`, paired with a query scoped to `M`.
///
/// A fresh entity (from [`Model::all`] or [`Model::create`]) carries `M`'s
/// default record and an unfiltered query; chain [`Entity::filter`] and
/// [`Entity::alter`] on it, then run [`Entity::get`]. Entities returned by a
/// query carry the loaded record and a fresh scoped query of their own.
pub struct Entity<M> {
    db: Db,
    query: Query,
    record: Record,
    _p: PhantomData<fn() -> M>,
}

impl<M: Model> Entity<M> {
    pub fn new(db: &Db) -> Entity<M> {
        let mut record = Record::new();
        M::defaults(&mut record);
        Entity::from_record(db, record)
    }

    /// Wrap a record loaded from the store.
    pub fn from_record(db: &Db, record: Record) -> Entity<M> {
        let mut query = Query::new(db.driver().connection());
        query.filter(TypeOf::new(M::ENTITY_TYPE));

        if let Some(bundle) = M::BUNDLE {
            query.filter(BundleOf::new(bundle));
        }

        Entity {
            db: db.clone(),
            query,
            record,
            _p: PhantomData,
        }
    }

    pub fn filter(mut self, filter: impl Filter) -> Self {
        self.query.filter(filter);
        self
    }

    pub fn filters<I>(mut self, filters: I) -> Self
    where
        I: IntoIterator,
        I::Item: Filter,
    {
        self.query.filters(filters);
        self
    }

    pub fn alter(mut self, alteration: impl Alteration) -> Self {
        self.query.alter(alteration);
        self
    }

    pub fn alterations<I>(mut self, alterations: I) -> Self
    where
        I: IntoIterator,
        I::Item: Alteration,
    {
        self.query.alterations(alterations);
        self
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Run the query and load every match, in the order the store returned
    /// them.
    pub fn get(&self) -> Result<Collection<Entity<M>>> {
        self.fetch(&self.query)
    }

    pub fn first(&self) -> Result<Option<Entity<M>>> {
        let mut query = self.query.clone();
        query.alter(Limit::new(1));

        Ok(self.fetch(&query)?.into_iter().next())
    }

    pub fn first_or(&self, default: Entity<M>) -> Result<Entity<M>> {
        Ok(self.first()?.unwrap_or(default))
    }

    /// Number of matching rows, ignoring any window set by [`Limit`].
    pub fn count(&self) -> Result<u64> {
        let mut query = self.query.clone();
        query.count();
        query.execute()?.into_count()
    }

    /// Walk the matches in windows of `size`, handing each window to
    /// `callback`.
    ///
    /// The number of windows comes from a single count taken up front. Rows
    /// inserted or deleted while the walk is in progress can shift the
    /// windows, so a row may be skipped or seen twice. Windows already handed
    /// out are not revisited if a later one fails.
    pub fn chunk<F>(&self, size: usize, mut callback: F) -> Result<()>
    where
        F: FnMut(Collection<Entity<M>>),
    {
        if size == 0 {
            bail!("chunk size must be greater than zero");
        }

        let total = usize::try_from(self.count()?)
            .map_err(|_| Error::invalid_result("row count does not fit in usize"))?;
        let windows = total.div_ceil(size);

        for window in 0..windows {
            let offset = window * size;
            tracing::debug!(
                model = short_name::<M>(),
                window,
                offset,
                size,
                "quarry.chunk"
            );

            let mut query = self.query.clone();
            query.alter(Limit::with_offset(size, offset));
            callback(self.fetch(&query)?);
        }

        Ok(())
    }

    fn fetch(&self, query: &Query) -> Result<Collection<Entity<M>>> {
        let ids: IndexSet<Id> = query.execute()?.into_ids()?.into_iter().collect();

        if ids.is_empty() {
            return Ok(Collection::default());
        }

        let mut records = self.db.driver().load(M::ENTITY_TYPE, &ids)?;
        tracing::debug!(
            model = short_name::<M>(),
            requested = ids.len(),
            loaded = records.len(),
            "quarry.load"
        );

        Ok(ids
            .iter()
            .filter_map(|id| records.shift_remove(id))
            .map(|record| Entity::from_record(&self.db, record))
            .collect())
    }

    pub fn id(&self) -> Option<Id> {
        self.record.id(M::PRIMARY_KEY)
    }

    pub fn entity_type(&self) -> &'static str {
        M::ENTITY_TYPE
    }

    pub fn bundle(&self) -> Option<&'static str> {
        M::BUNDLE
    }

    pub fn db(&self) -> &Db {
        &self.db
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn into_record(self) -> Record {
        self.record
    }

    /// The stored attribute, exactly as the store handed it over.
    pub fn raw(&self, name: &str) -> Option<&Value> {
        self.record.get(name)
    }

    /// Whether the attribute is present and not null.
    pub fn has(&self, name: &str) -> bool {
        self.raw(name).is_some_and(|value| !value.is_null())
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.record.set(name, value);
        self
    }

    /// Whether `name` is one of the dynamic fields attached to `M`.
    pub fn is_field(&self, name: &str) -> Result<bool> {
        Ok(self.db.field_catalog::<M>()?.contains(name))
    }

    /// Read an attribute for use.
    ///
    /// Dynamic fields are unwrapped out of their per-language storage; plain
    /// attributes come back as stored.
    pub fn attr(&self, name: &str) -> Result<Option<Value>> {
        let Some(raw) = self.raw(name) else {
            return Ok(None);
        };

        if self.is_field(name)? {
            return Ok(self
                .db
                .driver()
                .field_items(M::ENTITY_TYPE, &self.record, name));
        }

        Ok(Some(raw.clone()))
    }

    /// Persist the record; the stored version, with any id the store
    /// assigned, replaces it.
    pub fn save(&mut self) -> Result<&mut Self> {
        M::validate_save(self)?;

        let record = self
            .db
            .driver()
            .save(M::ENTITY_TYPE, self.record.clone())?;
        tracing::debug!(model = short_name::<M>(), id = ?record.id(M::PRIMARY_KEY), "quarry.save");

        self.record = record;
        Ok(self)
    }

    pub fn delete(&self) -> Result<()> {
        M::validate_delete(self)?;

        let Some(id) = self.id() else {
            return Err(Error::invalid_entity(format!(
                "{} must have an ID to be deleted.",
                short_name::<M>()
            )));
        };

        tracing::debug!(model = short_name::<M>(), %id, "quarry.delete");
        self.db.driver().delete(M::ENTITY_TYPE, id)
    }
}

impl<M: Model> Collection<Entity<M>> {
    /// Primary keys of the entities, first occurrence order.
    pub fn ids(&self) -> IndexSet<Id> {
        self.iter().filter_map(Entity::id).collect()
    }
}

impl<M> Clone for Entity<M> {
    fn clone(&self) -> Self {
        Entity {
            db: self.db.clone(),
            query: self.query.clone(),
            record: self.record.clone(),
            _p: PhantomData,
        }
    }
}

impl<M> PartialEq for Entity<M> {
    fn eq(&self, other: &Self) -> bool {
        self.record == other.record
    }
}

impl<M: 'static> fmt::Debug for Entity<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(short_name::<M>())
            .field("record", &self.record)
            .finish()
    }
}

impl<M> Serialize for Entity<M> {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        self.record.serialize(serializer)
    }
}

impl<M> Truthy for Entity<M> {
    fn is_truthy(&self) -> bool {
        true
    }
}
