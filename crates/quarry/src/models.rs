//! Models for the entity types a stock content site ships with.

mod node;
pub use node::{Article, Node, NodeModel};

mod taxonomy;
pub use taxonomy::{Tag, Term, TermModel, Vocabulary};

mod user;
pub use user::User;

use crate::{stmt::Id, Entity, Error, Model, Result};

/// Models whose entities are reachable under a url alias.
pub trait UrlAliased: Model {
    /// The unaliased path of an entity, e.g. `node/12`.
    fn source_path(id: Id) -> String;
}

impl<M: UrlAliased> Entity<M> {
    /// Relative url of the entity: `/` followed by its alias, or by its
    /// source path when no alias is registered.
    pub fn url_alias(&self) -> Result<String> {
        let id = self
            .id()
            .ok_or_else(|| Error::invalid_entity("entity has no id yet"))?;
        let source = M::source_path(id);
        let alias = self.db().driver().path_alias(&source)?;

        Ok(format!("/{}", alias.unwrap_or(source)))
    }
}
