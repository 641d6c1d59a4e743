use super::UrlAliased;
use crate::{
    stmt::{Id, Value},
    Collection, Entity, Error, Model, Record, Result,
};

/// A taxonomy term of any vocabulary. Terms need a vocabulary bundle to be
/// saved; use [`Tag`] or a model of your own for that.
#[derive(Debug)]
pub struct Term;

/// A term of the `tags` vocabulary.
#[derive(Debug)]
pub struct Tag;

#[derive(Debug)]
pub struct Vocabulary;

/// Models stored as taxonomy terms.
pub trait TermModel: Model {}

fn term_defaults<M: Model>(record: &mut Record) {
    record.set(M::PRIMARY_KEY, Value::Null);
    record.set("vid", Value::Null);
    record.set("name", "");
    record.set("description", "");
    record.set("format", "plain_text");
    record.set("weight", 0);
    record.set("vocabulary_machine_name", M::BUNDLE);
}

fn validate_term_save<M: Model>(entity: &Entity<M>) -> Result<()> {
    if !entity.has("vid") {
        return Err(Error::invalid_entity(
            "Taxonomy Term must have an associated vocabulary ID to be saved!",
        ));
    }

    if M::BUNDLE.is_none() {
        return Err(Error::invalid_entity(
            "Taxonomy Term must have a bundle to be saved!",
        ));
    }

    Ok(())
}

fn validate_term_delete<M: Model>(entity: &Entity<M>) -> Result<()> {
    if entity.id().is_none() {
        return Err(Error::invalid_entity(
            "Taxonomy Term must have an ID set to be deleted!",
        ));
    }

    Ok(())
}

impl Model for Term {
    const ENTITY_TYPE: &'static str = "taxonomy_term";
    const PRIMARY_KEY: &'static str = "tid";

    fn defaults(record: &mut Record) {
        term_defaults::<Self>(record);
    }

    fn validate_save(entity: &Entity<Self>) -> Result<()> {
        validate_term_save(entity)
    }

    fn validate_delete(entity: &Entity<Self>) -> Result<()> {
        validate_term_delete(entity)
    }
}

impl TermModel for Term {}

impl UrlAliased for Term {
    fn source_path(id: Id) -> String {
        format!("taxonomy/term/{id}")
    }
}

impl Model for Tag {
    const ENTITY_TYPE: &'static str = "taxonomy_term";
    const PRIMARY_KEY: &'static str = "tid";
    const BUNDLE: Option<&'static str> = Some("tags");

    fn defaults(record: &mut Record) {
        term_defaults::<Self>(record);
    }

    fn validate_save(entity: &Entity<Self>) -> Result<()> {
        validate_term_save(entity)
    }

    fn validate_delete(entity: &Entity<Self>) -> Result<()> {
        validate_term_delete(entity)
    }
}

impl TermModel for Tag {}

impl UrlAliased for Tag {
    fn source_path(id: Id) -> String {
        format!("taxonomy/term/{id}")
    }
}

impl<M: TermModel> Entity<M> {
    /// The vocabulary this term belongs to.
    pub fn vocabulary(&self) -> Result<Option<Entity<Vocabulary>>> {
        let vocabularies = self.belongs_to::<Vocabulary>("vid", Some("vid"))?;

        let Some(vid) = self.raw("vid").and_then(Value::as_id) else {
            return Ok(None);
        };

        Ok(vocabularies
            .iter()
            .find(|vocabulary| vocabulary.id() == Some(vid))
            .cloned())
    }
}

impl Model for Vocabulary {
    const ENTITY_TYPE: &'static str = "taxonomy_vocabulary";
    const PRIMARY_KEY: &'static str = "vid";

    fn defaults(record: &mut Record) {
        record.set(Self::PRIMARY_KEY, Value::Null);
        record.set("name", "");
        record.set("machine_name", Value::Null);
        record.set("description", "");
        record.set("module", "taxonomy");
        record.set("hierarchy", 0);
        record.set("weight", 0);
    }

    fn validate_save(entity: &Entity<Self>) -> Result<()> {
        if !entity.has("machine_name") {
            return Err(Error::invalid_entity(
                "Taxonomy Vocabulary must have a machine_name to be saved!",
            ));
        }

        Ok(())
    }

    fn validate_delete(entity: &Entity<Self>) -> Result<()> {
        if entity.id().is_none() {
            return Err(Error::invalid_entity(
                "Taxonomy Vocabulary must have an ID to be deleted!",
            ));
        }

        Ok(())
    }
}

impl Entity<Vocabulary> {
    pub fn terms(&self) -> Result<Collection<Entity<Term>>> {
        self.has_many("vid", Some("vid"))
    }
}
