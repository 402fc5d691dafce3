mod common;

use std::collections::BTreeSet;

use common::*;
use futures::future::try_join_all;
use syllabus_core::NewModule;

const WRITERS: i32 = 16;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_item_inserts_get_distinct_orders() {
    let catalog = catalog().await;
    let course = course(&catalog, "Busy").await;
    let module = module(&catalog, &course, "Crowded").await;

    let mut bindings = Vec::new();
    for n in 0..WRITERS {
        bindings.push(text_content(&catalog, &format!("Note {n}")).await);
    }

    let handles = bindings.into_iter().map(|binding| {
        let catalog = catalog.clone();
        let module_id = module.id;
        tokio::spawn(async move { catalog.add_item(module_id, binding, None).await })
    });
    let items = try_join_all(handles).await.unwrap();

    let orders: BTreeSet<i32> = items
        .into_iter()
        .map(|result| result.expect("insert").order)
        .collect();
    assert_eq!(orders, (0..WRITERS).collect::<BTreeSet<_>>());
    assert_eq!(item_orders(&catalog, &module).await, (0..WRITERS).collect::<Vec<_>>());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_module_inserts_get_distinct_orders() {
    let catalog = catalog().await;
    let course = course(&catalog, "Parallel").await;

    let handles = (0..WRITERS).map(|n| {
        let catalog = catalog.clone();
        let course_id = course.id;
        tokio::spawn(async move {
            catalog
                .add_module(course_id, NewModule::new(format!("Module {n}")))
                .await
        })
    });
    for result in try_join_all(handles).await.unwrap() {
        result.expect("insert");
    }

    assert_eq!(
        module_orders(&catalog, &course).await,
        (0..WRITERS).collect::<Vec<_>>()
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn separate_scopes_number_independently() {
    let catalog = catalog().await;
    let first = course(&catalog, "First").await;
    let second = course(&catalog, "Second").await;

    let handles = (0..WRITERS).map(|n| {
        let catalog = catalog.clone();
        let course_id = if n % 2 == 0 { first.id } else { second.id };
        tokio::spawn(async move {
            catalog
                .add_module(course_id, NewModule::new(format!("M{n}")))
                .await
        })
    });
    for result in try_join_all(handles).await.unwrap() {
        result.expect("insert");
    }

    let half = WRITERS / 2;
    assert_eq!(module_orders(&catalog, &first).await, (0..half).collect::<Vec<_>>());
    assert_eq!(module_orders(&catalog, &second).await, (0..half).collect::<Vec<_>>());
}
