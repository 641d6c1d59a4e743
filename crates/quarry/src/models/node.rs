use super::UrlAliased;
use crate::{
    stmt::{Id, Value},
    Cardinality, Collection, Entity, Error, FieldBase, FieldCatalog, FieldInstance, Model, Record,
    Result,
};

use jiff::Timestamp;

/// A content node of any bundle.
#[derive(Debug)]
pub struct Node;

/// An `article` node. Categorised through the `field_blog_category` term
/// reference.
#[derive(Debug)]
pub struct Article;

/// Models stored as nodes.
pub trait NodeModel: Model {}

/// Stamp the bundle into `type` so a saved node matches its model's scope.
fn node_defaults<M: Model>(record: &mut Record) {
    record.set(M::PRIMARY_KEY, Value::Null);
    record.set("type", M::BUNDLE);
    record.set("title", "");
}

impl Model for Node {
    const ENTITY_TYPE: &'static str = "node";
    const PRIMARY_KEY: &'static str = "nid";

    fn defaults(record: &mut Record) {
        node_defaults::<Self>(record);
    }
}

impl NodeModel for Node {}

impl UrlAliased for Node {
    fn source_path(id: Id) -> String {
        format!("node/{id}")
    }
}

impl Model for Article {
    const ENTITY_TYPE: &'static str = "node";
    const PRIMARY_KEY: &'static str = "nid";
    const BUNDLE: Option<&'static str> = Some("article");

    fn defaults(record: &mut Record) {
        node_defaults::<Self>(record);
    }

    fn fields() -> FieldCatalog {
        FieldCatalog::new(
            vec![FieldBase::new("field_blog_category", "taxonomy_term_reference")
                .cardinality(Cardinality::Unlimited)],
            vec![FieldInstance::new("field_blog_category", "node", "article").label("Category")],
        )
    }
}

impl NodeModel for Article {}

impl UrlAliased for Article {
    fn source_path(id: Id) -> String {
        format!("node/{id}")
    }
}

impl<M: NodeModel> Entity<M> {
    pub fn created(&self) -> Result<Timestamp> {
        self.timestamp("created")
    }

    pub fn changed(&self) -> Result<Timestamp> {
        self.timestamp("changed")
    }

    fn timestamp(&self, name: &str) -> Result<Timestamp> {
        let seconds = self
            .raw(name)
            .and_then(|value| value.as_i64())
            .ok_or_else(|| Error::invalid_entity(format!("node has no `{name}` time")))?;

        Ok(Timestamp::from_second(seconds).map_err(anyhow::Error::from)?)
    }
}

impl Entity<Article> {
    pub fn categories(&self) -> Result<Collection<Entity<super::Term>>> {
        self.has_many("field_blog_category", None)
    }
}
