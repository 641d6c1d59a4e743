use tests::prelude::*;

use pretty_assertions::assert_eq;
use std::sync::Arc;

struct Blog {
    first: Id,
    second: Id,
    uncategorised: Id,
    rust: Id,
    go: Id,
    zig: Id,
}

fn seed_blog(test: &mut DbTest<impl Setup>) -> Blog {
    let store = test.store();
    fixtures::blog_category_field(&store);

    let vid = fixtures::vocabulary(&store, "tags");
    let rust = fixtures::term(&store, vid, "tags", "rust");
    let go = fixtures::term(&store, vid, "tags", "go");
    let zig = fixtures::term(&store, vid, "tags", "zig");

    Blog {
        first: fixtures::categorised_article(&store, "First", &[go, rust]),
        second: fixtures::categorised_article(&store, "Second", &[zig]),
        uncategorised: fixtures::articles(&store, 1)[0],
        rust,
        go,
        zig,
    }
}

fn article(db: &Db, id: Id) -> Entity<Article> {
    assert_ok!(Article::find(db, [id])).first().cloned().unwrap()
}

fn term_ids(terms: &Collection<Entity<Term>>) -> Vec<Id> {
    terms.iter().filter_map(Entity::id).collect()
}

fn categories_follow_field_order(test: &mut DbTest<impl Setup>) {
    let blog = seed_blog(test);
    let db = test.setup_db(models!(Article, Term));

    let first = article(&db, blog.first);
    let categories = assert_ok!(first.categories());
    assert_eq!(term_ids(&categories), [blog.go, blog.rust]);

    let second = article(&db, blog.second);
    assert_eq!(term_ids(&assert_ok!(second.categories())), [blog.zig]);
}

fn relationship_resolves_once_per_db(test: &mut DbTest<impl Setup>) {
    let blog = seed_blog(test);
    let db = test.setup_db(models!(Article, Term));

    let first = article(&db, blog.first);
    let second = article(&db, blog.second);

    assert_ok!(first.categories());
    assert_eq!(db.cached_relations(), 1);
    test.log().clear();

    // Every article shares the resolved set; no further round trips
    assert_eq!(term_ids(&assert_ok!(second.categories())), [blog.zig]);
    assert!(test.log().is_empty());

    let lhs = assert_ok!(first.related::<Term>("field_blog_category", None));
    let rhs = assert_ok!(second.related::<Term>("field_blog_category", None));
    assert!(Arc::ptr_eq(&lhs, &rhs));
    assert_eq!(term_ids(&lhs), [blog.rust, blog.go, blog.zig]);

    db.clear_caches();
    assert_eq!(db.cached_relations(), 0);
}

fn disabled_cache_resolves_every_call(test: &mut DbTest<impl Setup>) {
    let blog = seed_blog(test);

    let mut builder = models!(Article, Term);
    builder.relation_cache(false);
    let db = test.setup_db(builder);

    let first = article(&db, blog.first);
    assert_ok!(first.categories());
    assert_ok!(first.categories());

    let resolutions = test
        .log()
        .count(|op| matches!(op, DriverOp::FieldColumnValues { .. }));
    assert_eq!(resolutions, 2);
    assert_eq!(db.cached_relations(), 0);
}

fn no_foreign_values_skip_the_store(test: &mut DbTest<impl Setup>) {
    let blog = seed_blog(test);
    let db = test.setup_db(models!(Article, Term));

    let uncategorised = article(&db, blog.uncategorised);
    // Warm the field catalog
    assert_ok!(uncategorised.is_field("field_blog_category"));
    test.log().clear();

    assert_empty!(assert_ok!(uncategorised.categories()));
    assert!(test.log().is_empty());
    assert_eq!(db.cached_relations(), 0);
}

fn unregistered_target_fails_before_the_store(test: &mut DbTest<impl Setup>) {
    seed_blog(test);
    let db = test.setup_db(models!(Article));

    let article = Article::create(&db);
    let err = assert_err!(article.categories());

    assert!(err.is_invalid_relationship_target());
    assert_eq!(
        err.to_string(),
        "invalid relationship target: `Term` (declared on `Article`) is not a registered model"
    );
    assert!(test.log().is_empty());
}

fn terms_and_vocabulary(test: &mut DbTest<impl Setup>) {
    let store = test.store();
    let tags = fixtures::vocabulary(&store, "tags");
    let topics = fixtures::vocabulary(&store, "topics");
    let rust = fixtures::term(&store, tags, "tags", "rust");
    let go = fixtures::term(&store, tags, "tags", "go");
    let news = fixtures::term(&store, topics, "topics", "news");

    let db = test.setup_db(models!(Tag, Term, Vocabulary));

    let vocabulary = assert_ok!(Vocabulary::find(&db, [tags])).first().cloned().unwrap();
    assert_eq!(term_ids(&assert_ok!(vocabulary.terms())), [rust, go]);

    // Tags only see their own bundle
    let all_tags = assert_ok!(Tag::all(&db).get());
    assert_eq!(all_tags.ids().into_iter().collect::<Vec<_>>(), [rust, go]);

    let parent = assert_ok!(all_tags[0].vocabulary()).unwrap();
    assert_eq!(parent.id(), Some(tags));
    assert_eq!(parent.raw("machine_name"), Some(&Value::from("tags")));

    let term = assert_ok!(Term::find(&db, [news])).first().cloned().unwrap();
    let parent = assert_ok!(term.vocabulary()).unwrap();
    assert_eq!(parent.id(), Some(topics));
}

fn has_one_picks_the_first_match(test: &mut DbTest<impl Setup>) {
    let store = test.store();
    let tags = fixtures::vocabulary(&store, "tags");
    let archive = fixtures::vocabulary(&store, "archive");
    let rust = fixtures::term(&store, tags, "tags", "rust");
    fixtures::term(&store, tags, "tags", "go");
    let db = test.setup_db(models!(Term, Vocabulary));

    let vocabularies = assert_ok!(Vocabulary::find(&db, [tags, archive]));

    let first = assert_ok!(vocabularies[0].has_one::<Term>("vid", Some("vid")));
    assert_eq!(first.and_then(|term| term.id()), Some(rust));
    test.log().clear();

    // Same cached set, nothing in it points at the empty vocabulary
    assert_none!(assert_ok!(vocabularies[1].has_one::<Term>("vid", Some("vid"))));
    assert!(test.log().is_empty());
    assert_eq!(db.cached_relations(), 1);

    // A vocabulary with no id has no value to match
    let fresh = Vocabulary::create(&db);
    assert_none!(assert_ok!(fresh.has_one::<Term>("vid", Some("vid"))));
    assert!(test.log().is_empty());
}

fn vocabulary_of_unsaved_term(test: &mut DbTest<impl Setup>) {
    let store = test.store();
    let tags = fixtures::vocabulary(&store, "tags");
    fixtures::term(&store, tags, "tags", "rust");
    let db = test.setup_db(models!(Tag, Vocabulary));

    let fresh = Tag::create(&db);
    assert_none!(assert_ok!(fresh.vocabulary()));
}

tests!(
    categories_follow_field_order,
    relationship_resolves_once_per_db,
    disabled_cache_resolves_every_call,
    no_foreign_values_skip_the_store,
    unregistered_target_fails_before_the_store,
    terms_and_vocabulary,
    has_one_picks_the_first_match,
    vocabulary_of_unsaved_term,
);
