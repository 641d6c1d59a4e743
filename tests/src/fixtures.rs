//! Seed data written straight into a store, bypassing the logging driver.

use quarry::{
    stmt::{Id, Record, Value},
    Cardinality, FieldBase, FieldInstance,
};
use quarry_driver_memory::Memory;

/// Creation time of the first seeded node: 2023-11-14T22:13:20Z.
pub const BASE_TIME: i64 = 1_700_000_000;

fn node(bundle: &str, title: &str, created: i64) -> Record {
    Record::from_iter([
        ("type", Value::from(bundle)),
        ("title", Value::from(title)),
        ("status", Value::from(1)),
        ("created", Value::from(created)),
        ("changed", Value::from(created + 60)),
    ])
}

/// `count` published articles titled `Article 1`.., created a minute apart.
pub fn articles(store: &Memory, count: usize) -> Vec<Id> {
    (1..=count)
        .map(|i| {
            let created = BASE_TIME + 60 * i as i64;
            store
                .insert("node", node("article", &format!("Article {i}"), created))
                .unwrap()
        })
        .collect()
}

pub fn pages(store: &Memory, count: usize) -> Vec<Id> {
    (1..=count)
        .map(|i| {
            store
                .insert("node", node("page", &format!("Page {i}"), BASE_TIME))
                .unwrap()
        })
        .collect()
}

pub fn vocabulary(store: &Memory, machine_name: &str) -> Id {
    let record = Record::from_iter([
        ("name", Value::from(machine_name)),
        ("machine_name", Value::from(machine_name)),
        ("module", Value::from("taxonomy")),
    ]);

    store.insert("taxonomy_vocabulary", record).unwrap()
}

pub fn term(store: &Memory, vid: Id, vocabulary: &str, name: &str) -> Id {
    let record = Record::from_iter([
        ("vid", Value::from(vid)),
        ("vocabulary_machine_name", Value::from(vocabulary)),
        ("name", Value::from(name)),
        ("weight", Value::from(0)),
    ]);

    store.insert("taxonomy_term", record).unwrap()
}

/// The `field_blog_category` base and its instance on articles.
pub fn blog_category_field(store: &Memory) {
    store.add_field_base(
        FieldBase::new("field_blog_category", "taxonomy_term_reference")
            .cardinality(Cardinality::Unlimited),
    );
    store.add_field_instance(FieldInstance::new("field_blog_category", "node", "article"));
}

/// Field storage holding one `tid` item per term, in the language-neutral
/// slot.
pub fn term_reference(tids: &[Id]) -> Value {
    let items = tids
        .iter()
        .map(|tid| Value::Record(Record::from_iter([("tid", Value::from(*tid))])))
        .collect();

    Value::Record(Record::from_iter([("und", Value::List(items))]))
}

/// An article categorised under `tids`.
pub fn categorised_article(store: &Memory, title: &str, tids: &[Id]) -> Id {
    let mut record = node("article", title, BASE_TIME);
    record.set("field_blog_category", term_reference(tids));
    store.insert("node", record).unwrap()
}
