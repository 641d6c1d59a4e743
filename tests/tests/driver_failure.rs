use tests::prelude::*;

use indexmap::{IndexMap, IndexSet};
use pretty_assertions::assert_eq;
use quarry::{
    driver::{Connection, Driver},
    Error, FieldBase, FieldInstance, Result,
};
use quarry_driver_memory::Memory;
use std::io;

/// Answers queries from the store but fails every load and write.
#[derive(Debug)]
struct Failing {
    store: Memory,
}

fn failure() -> Error {
    Error::driver_operation_failed(io::Error::other("store is read-only"))
}

impl Driver for Failing {
    fn connection(&self) -> Box<dyn Connection> {
        self.store.connection()
    }

    fn load(&self, _: &str, _: &IndexSet<Id>) -> Result<IndexMap<Id, Record>> {
        Err(failure())
    }

    fn save(&self, _: &str, _: Record) -> Result<Record> {
        Err(failure())
    }

    fn delete(&self, _: &str, _: Id) -> Result<()> {
        Err(failure())
    }

    fn field_base_definitions(&self) -> Result<Vec<FieldBase>> {
        Err(failure())
    }

    fn field_instance_definitions(&self, _: &str, _: &str) -> Result<Vec<FieldInstance>> {
        Err(failure())
    }

    fn create_field(&self, _: &FieldBase) -> Result<()> {
        Err(failure())
    }

    fn create_field_instance(&self, _: &FieldInstance) -> Result<()> {
        Err(failure())
    }

    fn delete_field_instance(&self, _: &FieldInstance) -> Result<()> {
        Err(failure())
    }

    fn resolve_alias(&self, path: &str) -> Result<Option<String>> {
        self.store.resolve_alias(path)
    }
}

fn failing_db(test: &mut DbTest<impl Setup>) -> Db {
    let store = test.store();
    assert_ok!(models!(Article, Term, Vocabulary).build(Failing { store }))
}

fn load_failure_surfaces_unchanged(test: &mut DbTest<impl Setup>) {
    let store = test.store();
    let ids = fixtures::articles(&store, 3);
    let db = failing_db(test);

    let err = assert_err!(Article::all(&db).get());
    assert!(err.is_driver_operation_failed());
    assert_eq!(err.to_string(), "store is read-only");
    let cause = err.driver_error().expect("driver error");
    assert!(cause.downcast_ref::<io::Error>().is_some());

    assert_err!(Article::find(&db, [ids[0]]));
    assert_err!(Article::all(&db).first());
    assert_err!(Article::all(&db).chunk(2, |_| {}));

    // Counting never loads
    assert_eq!(assert_ok!(Article::all(&db).count()), 3);
}

fn write_failure_leaves_store_untouched(test: &mut DbTest<impl Setup>) {
    let store = test.store();
    let ids = fixtures::articles(&store, 1);
    let db = failing_db(test);

    let mut article = Article::create(&db);
    article.set("title", "Draft");
    assert!(assert_err!(article.save()).is_driver_operation_failed());
    assert_none!(article.id());

    let mut existing = Article::create(&db);
    existing.set("nid", ids[0]);
    assert!(assert_err!(existing.delete()).is_driver_operation_failed());
    assert_eq!(store.len("node"), 1);
}

fn schema_failure_surfaces_unchanged(test: &mut DbTest<impl Setup>) {
    let db = failing_db(test);

    let article = Article::create(&db);
    assert!(assert_err!(article.is_field("field_blog_category")).is_driver_operation_failed());
    assert!(assert_err!(Article::install_fields(&db)).is_driver_operation_failed());
}

fn failed_relationship_is_not_cached(test: &mut DbTest<impl Setup>) {
    let store = test.store();
    let vid = fixtures::vocabulary(&store, "tags");
    fixtures::term(&store, vid, "tags", "rust");
    let db = failing_db(test);

    let mut vocabulary = Vocabulary::create(&db);
    vocabulary.set("vid", vid);

    assert!(assert_err!(vocabulary.terms()).is_driver_operation_failed());
    assert_eq!(db.cached_relations(), 0);
}

tests!(
    load_failure_surfaces_unchanged,
    write_failure_leaves_store_untouched,
    schema_failure_surfaces_unchanged,
    failed_relationship_is_not_cached,
);
