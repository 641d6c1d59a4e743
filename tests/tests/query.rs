use tests::prelude::*;

use pretty_assertions::assert_eq;

fn find_loads_each_key_once(test: &mut DbTest<impl Setup>) {
    let store = test.store();
    let ids = fixtures::articles(&store, 5);
    let db = test.setup_db(models!(Article));

    let found = assert_ok!(Article::find(&db, [ids[2], ids[0], ids[2], Id(99)]));

    let titles: Vec<_> = found
        .iter()
        .map(|article| article.raw("title").cloned())
        .collect();
    assert_eq!(
        titles,
        [
            Some(Value::from("Article 1")),
            Some(Value::from("Article 3"))
        ]
    );

    // One execution, one bulk load of the matching keys
    assert_eq!(
        test.log().ops(),
        [
            DriverOp::Execute {
                entity_type: Some("node".to_string()),
                count: false,
            },
            DriverOp::Load {
                entity_type: "node".to_string(),
                ids: vec![ids[0], ids[2]],
            },
        ]
    );
}

fn empty_result_skips_load(test: &mut DbTest<impl Setup>) {
    let store = test.store();
    fixtures::pages(&store, 3);
    let db = test.setup_db(models!(Article));

    let articles = assert_ok!(Article::all(&db).get());
    assert_empty!(articles);

    assert_eq!(test.log().executions(), 1);
    assert_eq!(test.log().loads(), 0);
}

fn bundle_scopes_results(test: &mut DbTest<impl Setup>) {
    let store = test.store();
    fixtures::articles(&store, 3);
    fixtures::pages(&store, 2);
    let db = test.setup_db(models!(Article, Node));

    assert_eq!(assert_ok!(Article::all(&db).count()), 3);
    assert_eq!(assert_ok!(Node::all(&db).count()), 5);
}

fn count_is_repeatable(test: &mut DbTest<impl Setup>) {
    let store = test.store();
    fixtures::articles(&store, 7);
    let db = test.setup_db(models!(Article));

    let query = Article::all(&db).alter(Limit::new(2));

    assert_eq!(assert_ok!(query.count()), 7);
    assert_eq!(assert_ok!(query.get()).count(), 2);

    // Neither the count nor the fetch leaves a mark on the query
    assert_eq!(assert_ok!(query.count()), 7);
    assert_eq!(assert_ok!(query.get()).count(), 2);

    let counts = test
        .log()
        .count(|op| matches!(op, DriverOp::Execute { count: true, .. }));
    assert_eq!(counts, 2);
}

fn cloned_queries_are_independent(test: &mut DbTest<impl Setup>) {
    let store = test.store();
    fixtures::articles(&store, 4);
    let db = test.setup_db(models!(Article));

    let base = Article::all(&db);
    let narrowed = base.clone().filter(TitleIs::new("Article 2"));

    assert_eq!(assert_ok!(narrowed.get()).count(), 1);
    assert_eq!(assert_ok!(base.get()).count(), 4);
}

fn filters_and_ordering(test: &mut DbTest<impl Setup>) {
    let store = test.store();
    let ids = fixtures::articles(&store, 6);
    let db = test.setup_db(models!(Article));

    let cutoff = jiff::Timestamp::from_second(fixtures::BASE_TIME + 60 * 3).unwrap();

    let recent = assert_ok!(Article::all(&db)
        .filters([CreatedAt::new(cutoff).op(Op::Ge)])
        .filter(StatusIs::published())
        .alter(OrderBy::desc("created"))
        .get());

    assert_eq!(
        recent.ids().into_iter().collect::<Vec<_>>(),
        [ids[5], ids[4], ids[3], ids[2]]
    );

    let window = assert_ok!(Article::all(&db)
        .alterations([Limit::with_offset(2, 1)])
        .alter(OrderBy::asc("title"))
        .get());
    assert_eq!(window.ids().into_iter().collect::<Vec<_>>(), [ids[1], ids[2]]);
}

fn first_respects_ordering(test: &mut DbTest<impl Setup>) {
    let store = test.store();
    let ids = fixtures::articles(&store, 3);
    let db = test.setup_db(models!(Article));

    let newest = assert_ok!(Article::all(&db).alter(OrderBy::desc("created")).first());
    assert_eq!(newest.and_then(|article| article.id()), Some(ids[2]));

    let missing = assert_ok!(Article::all(&db).filter(TitleIs::new("Nope")).first());
    assert_none!(missing);

    let fallback = Article::create(&db);
    let picked = assert_ok!(Article::all(&db)
        .filter(TitleIs::new("Nope"))
        .first_or(fallback.clone()));
    assert_eq!(picked, fallback);
}

tests!(
    find_loads_each_key_once,
    empty_result_skips_load,
    bundle_scopes_results,
    count_is_repeatable,
    cloned_queries_are_independent,
    filters_and_ordering,
    first_respects_ordering,
);
