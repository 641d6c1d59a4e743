use indexmap::IndexMap;
use std::{
    any::{Any, TypeId},
    fmt,
    sync::Arc,
};

/// Identifies one resolved relationship: the declaring model, the target
/// model and the foreign key the declaration goes through.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct RelationKey {
    pub(crate) source: TypeId,
    pub(crate) target: TypeId,
    pub(crate) foreign_key: String,
}

/// Resolved relationships, shared by every entity of a `Db`.
///
/// Entries are inserted once and never updated in place.
#[derive(Default)]
pub(crate) struct RelationCache {
    entries: IndexMap<RelationKey, Arc<dyn Any + Send + Sync>>,
}

impl RelationKey {
    pub(crate) fn new(source: TypeId, target: TypeId, foreign_key: &str) -> RelationKey {
        RelationKey {
            source,
            target,
            foreign_key: foreign_key.to_string(),
        }
    }
}

impl RelationCache {
    pub(crate) fn get<T: Any + Send + Sync>(&self, key: &RelationKey) -> Option<Arc<T>> {
        self.entries.get(key)?.clone().downcast::<T>().ok()
    }

    /// Store `value` unless an entry already exists; returns the entry that
    /// ends up cached.
    pub(crate) fn insert<T: Any + Send + Sync>(&mut self, key: RelationKey, value: Arc<T>) -> Arc<T> {
        let entry = self
            .entries
            .entry(key)
            .or_insert_with(|| value.clone() as Arc<dyn Any + Send + Sync>)
            .clone();

        entry.downcast::<T>().unwrap_or(value)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

impl fmt::Debug for RelationCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelationCache")
            .field("entries", &self.entries.len())
            .finish()
    }
}
