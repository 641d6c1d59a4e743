use crate::{
    filter::PrimaryKeyIn,
    schema,
    stmt::{Id, Value},
    Collection, Db, Entity, Error, FieldCatalog, Record, Result,
};

/// A typed view over one entity type (and optionally one bundle) of the store.
///
/// Implementors supply the metadata as associated constants and may override
/// the hooks; everything else is provided.
pub trait Model: Sized + Send + Sync + 'static {
    /// Entity type the store files records under, e.g. `node`.
    const ENTITY_TYPE: &'static str;

    /// Attribute holding the primary key, e.g. `nid`.
    const PRIMARY_KEY: &'static str;

    /// Bundle within the entity type, e.g. `article`.
    const BUNDLE: Option<&'static str> = None;

    /// Populate the record of a freshly created entity.
    fn defaults(record: &mut Record) {
        record.set(Self::PRIMARY_KEY, Value::Null);
    }

    /// Fields this model declares, installed by [`Model::install_fields`].
    fn fields() -> FieldCatalog {
        FieldCatalog::default()
    }

    /// Checked by [`Entity::save`] before the store is touched.
    fn validate_save(entity: &Entity<Self>) -> Result<()> {
        let _ = entity;
        Ok(())
    }

    /// Checked by [`Entity::delete`] before the store is touched.
    fn validate_delete(entity: &Entity<Self>) -> Result<()> {
        if entity.id().is_none() {
            return Err(Error::invalid_entity(format!(
                "{} must have an ID to be deleted.",
                short_name::<Self>()
            )));
        }

        Ok(())
    }

    fn all(db: &Db) -> Entity<Self> {
        Entity::new(db)
    }

    fn create(db: &Db) -> Entity<Self> {
        Entity::new(db)
    }

    /// Load the entities with the given keys, in store order.
    ///
    /// Keys without a stored entity are skipped; duplicate keys load once.
    fn find<I>(db: &Db, ids: I) -> Result<Collection<Entity<Self>>>
    where
        I: IntoIterator,
        I::Item: Into<Id>,
    {
        Self::all(db)
            .filter(PrimaryKeyIn::new(ids).key(Self::PRIMARY_KEY))
            .get()
    }

    /// Load the entity a url alias points at.
    ///
    /// Accepts absolute urls (`https://example.com/blog/hello`) and paths
    /// (`/blog/hello`). An unknown alias yields an empty collection.
    fn find_by_url(db: &Db, url: &str) -> Result<Collection<Entity<Self>>> {
        let path = alias_path(url);

        let Some(source) = db.driver().resolve_alias(&path)? else {
            tracing::debug!(alias = %path, "quarry.find_by_url: unknown alias");
            return Ok(Collection::default());
        };

        let id = source
            .rsplit('/')
            .next()
            .and_then(|segment| segment.parse::<Id>().ok())
            .ok_or_else(|| {
                Error::invalid_result(format!(
                    "alias `{path}` resolved to `{source}`, which does not end in an id"
                ))
            })?;

        Self::find(db, [id])
    }

    /// Create the declared fields the store does not have yet.
    fn install_fields(db: &Db) -> Result<()> {
        schema::install_fields::<Self>(db)
    }

    /// Remove the declared field instances the store has.
    fn uninstall_fields(db: &Db) -> Result<()> {
        schema::uninstall_fields::<Self>(db)
    }
}

/// The model's type name without its module path.
pub(crate) fn short_name<M: 'static>() -> &'static str {
    let name = std::any::type_name::<M>();
    let name = name.split('<').next().unwrap_or(name);
    name.rsplit("::").next().unwrap_or(name)
}

/// Turn an absolute url or a path into the bare alias the store keys on.
fn alias_path(url: &str) -> String {
    let path = match url::Url::parse(url) {
        Ok(parsed) if parsed.has_host() => parsed.path().to_string(),
        _ => url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    };

    path.trim_start_matches('/').to_string()
}
