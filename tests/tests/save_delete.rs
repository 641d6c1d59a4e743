use tests::prelude::*;

use pretty_assertions::assert_eq;

fn term_needs_a_vocabulary(test: &mut DbTest<impl Setup>) {
    let db = test.setup_db(models!(Term, Tag));

    let mut term = Term::create(&db);
    term.set("name", "rust");

    let err = assert_err!(term.save());
    assert!(err.is_invalid_entity());
    assert_eq!(
        err.to_string(),
        "invalid entity: Taxonomy Term must have an associated vocabulary ID to be saved!"
    );

    // A vocabulary is not enough without a bundle
    term.set("vid", 1);
    let err = assert_err!(term.save());
    assert_eq!(
        err.to_string(),
        "invalid entity: Taxonomy Term must have a bundle to be saved!"
    );

    assert!(test.log().is_empty());
    assert!(test.store().is_empty("taxonomy_term"));
}

fn tag_save_assigns_an_id(test: &mut DbTest<impl Setup>) {
    let store = test.store();
    let vid = fixtures::vocabulary(&store, "tags");
    let db = test.setup_db(models!(Tag));

    let mut tag = Tag::create(&db);
    assert_none!(tag.id());

    tag.set("vid", vid).set("name", "rust");
    assert_ok!(tag.save());

    let id = tag.id().unwrap();
    assert!(test.log().has_save());

    let stored = store.get("taxonomy_term", id).unwrap();
    assert_eq!(stored.get("name"), Some(&Value::from("rust")));
    assert_eq!(
        stored.get("vocabulary_machine_name"),
        Some(&Value::from("tags"))
    );

    // Saving again updates in place
    tag.set("name", "rust-lang");
    assert_ok!(tag.save());
    assert_eq!(tag.id(), Some(id));
    assert_eq!(store.len("taxonomy_term"), 1);
}

fn saved_article_is_found_by_its_model(test: &mut DbTest<impl Setup>) {
    let store = test.store();
    let db = test.setup_db(models!(Article, Node));

    let mut article = Article::create(&db);
    article.set("title", "Fresh");
    assert_ok!(article.save());
    let id = article.id().unwrap();

    let stored = store.get("node", id).unwrap();
    assert_eq!(stored.get("type"), Some(&Value::from("article")));

    let found = assert_ok!(Article::find(&db, [id]));
    assert_eq!(found.ids().into_iter().collect::<Vec<_>>(), [id]);
    assert_eq!(found[0].raw("title"), Some(&Value::from("Fresh")));
    assert_eq!(assert_ok!(Article::all(&db).count()), 1);

    // Nodes of no bundle are still visible to the unscoped model
    let mut node = Node::create(&db);
    assert_ok!(node.save());
    assert_eq!(assert_ok!(Node::all(&db).count()), 2);
    assert_eq!(assert_ok!(Article::all(&db).count()), 1);
}

fn vocabulary_needs_a_machine_name(test: &mut DbTest<impl Setup>) {
    let db = test.setup_db(models!(Vocabulary));

    let mut vocabulary = Vocabulary::create(&db);
    vocabulary.set("name", "Tags");

    let err = assert_err!(vocabulary.save());
    assert_eq!(
        err.to_string(),
        "invalid entity: Taxonomy Vocabulary must have a machine_name to be saved!"
    );

    vocabulary.set("machine_name", "tags");
    assert_ok!(vocabulary.save());
    assert!(vocabulary.id().is_some());
}

fn delete_needs_an_id(test: &mut DbTest<impl Setup>) {
    let db = test.setup_db(models!(Node, Tag, User));

    let err = assert_err!(Node::create(&db).delete());
    assert!(err.is_invalid_entity());
    assert_eq!(
        err.to_string(),
        "invalid entity: Node must have an ID to be deleted."
    );

    let err = assert_err!(Tag::create(&db).delete());
    assert_eq!(
        err.to_string(),
        "invalid entity: Taxonomy Term must have an ID set to be deleted!"
    );

    assert_err!(User::create(&db).delete());
    assert!(!test.log().has_delete());
}

fn delete_removes_the_row(test: &mut DbTest<impl Setup>) {
    let store = test.store();
    let ids = fixtures::articles(&store, 2);
    let db = test.setup_db(models!(Article));

    let first = assert_ok!(Article::find(&db, [ids[0]]));
    assert_ok!(first[0].delete());

    assert_eq!(
        test.log().ops().last(),
        Some(&DriverOp::Delete {
            entity_type: "node".to_string(),
            id: ids[0],
        })
    );
    assert_eq!(store.len("node"), 1);
    assert_eq!(assert_ok!(Article::all(&db).count()), 1);
}

fn user_defaults(test: &mut DbTest<impl Setup>) {
    let db = test.setup_db(models!(User));

    let user = User::create(&db);
    assert_none!(user.id());
    assert_eq!(user.raw("name"), Some(&Value::from("")));
    assert_eq!(
        user.raw("roles"),
        Some(&Value::from(vec!["anonymous user"]))
    );
    assert!(user.raw("created").and_then(Value::as_i64).unwrap() > 0);
}

tests!(
    term_needs_a_vocabulary,
    tag_save_assigns_an_id,
    saved_article_is_found_by_its_model,
    vocabulary_needs_a_machine_name,
    delete_needs_an_id,
    delete_removes_the_row,
    user_defaults,
);
