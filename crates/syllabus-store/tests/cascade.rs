mod common;

use common::*;
use sea_orm::ConnectionTrait;
use syllabus_core::{ContentKind, ImageBody, Payload};
use syllabus_store::{Catalog, CourseRemoval, StoreError};

/// Make every delete from `table` fail, so a cascade breaks at its last step.
async fn block_deletes_from(catalog: &Catalog, table: &str) {
    catalog
        .db()
        .execute_unprepared(&format!(
            "CREATE TRIGGER block_{table}_delete BEFORE DELETE ON {table} \
             BEGIN SELECT RAISE(ABORT, 'deletes from {table} are blocked'); END;"
        ))
        .await
        .expect("create trigger");
}

#[tokio::test]
async fn deleting_a_course_removes_its_modules_and_items() {
    let catalog = catalog().await;
    let doomed = course(&catalog, "Doomed").await;
    let kept = course(&catalog, "Kept").await;

    let shared = text_content(&catalog, "Shared").await;
    let m1 = module(&catalog, &doomed, "One").await;
    let m2 = module(&catalog, &doomed, "Two").await;
    catalog.add_item(m1.id, shared, None).await.unwrap();
    catalog.add_item(m2.id, shared, None).await.unwrap();
    catalog.add_item(m2.id, shared, None).await.unwrap();

    let survivor = module(&catalog, &kept, "Survivor").await;
    catalog.add_item(survivor.id, shared, None).await.unwrap();

    let removal = catalog.delete_course(doomed.id).await.unwrap();
    assert_eq!(
        removal,
        CourseRemoval {
            course_id: doomed.id,
            modules_removed: 2,
            items_removed: 3,
        }
    );

    assert!(matches!(
        catalog.course(doomed.id).await,
        Err(StoreError::NotFound { entity: "course", .. })
    ));
    assert!(catalog.module(m1.id).await.is_err());
    assert!(catalog.ordered_items(m2.id).all(catalog.db()).await.unwrap().is_empty());

    // Content and other courses are untouched.
    assert!(catalog.content().exists(shared).await.unwrap());
    assert_eq!(item_orders(&catalog, &survivor).await, [0]);

    // The slug is free again.
    let again = course(&catalog, "Doomed").await;
    assert_eq!(again.slug, "doomed");
}

#[tokio::test]
async fn deleting_a_module_removes_only_its_items() {
    let catalog = catalog().await;
    let course = course(&catalog, "Course").await;
    let a = module(&catalog, &course, "A").await;
    let b = module(&catalog, &course, "B").await;
    let note = text_content(&catalog, "Note").await;
    catalog.add_item(a.id, note, None).await.unwrap();
    catalog.add_item(a.id, note, None).await.unwrap();
    catalog.add_item(b.id, note, None).await.unwrap();

    let removal = catalog.delete_module(a.id).await.unwrap();
    assert_eq!(removal.items_removed, 2);
    assert_eq!(item_orders(&catalog, &b).await, [0]);
    assert_eq!(module_orders(&catalog, &course).await, [1]);
}

#[tokio::test]
async fn deleting_content_unbinds_it_everywhere() {
    let catalog = catalog().await;
    let course = course(&catalog, "Course").await;
    let a = module(&catalog, &course, "A").await;
    let b = module(&catalog, &course, "B").await;

    let gone = text_content(&catalog, "Gone").await;
    let stays = text_content(&catalog, "Stays").await;
    catalog.add_item(a.id, gone, None).await.unwrap();
    catalog.add_item(a.id, stays, None).await.unwrap();
    catalog.add_item(b.id, gone, None).await.unwrap();

    let removal = catalog.content().delete(gone).await.unwrap();
    assert_eq!(removal.items_removed, 2);

    // Remaining item keeps its order; nothing is renumbered.
    let items = catalog.ordered_items(a.id).all(catalog.db()).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].binding, stays);
    assert_eq!(items[0].order, 1);
    assert!(item_orders(&catalog, &b).await.is_empty());

    assert!(matches!(
        catalog.content().get(gone).await,
        Err(StoreError::NotFound { entity: "content", .. })
    ));
}

#[tokio::test]
async fn deleting_unbound_content_of_another_kind_leaves_items() {
    let catalog = catalog().await;
    let course = course(&catalog, "Course").await;
    let module = module(&catalog, &course, "Only").await;
    let note = text_content(&catalog, "Note").await;
    catalog.add_item(module.id, note, None).await.unwrap();

    // An image with the same numeric id as the text.
    let picture = catalog
        .content()
        .create(OWNER, image("Picture", "aa/picture"))
        .await
        .unwrap();
    assert_eq!(picture.kind, ContentKind::Image);
    assert_eq!(picture.id, note.id);

    let removal = catalog.content().delete(picture).await.unwrap();
    assert_eq!(removal.items_removed, 0);
    assert_eq!(item_orders(&catalog, &module).await, [0]);
}

#[tokio::test]
async fn deleting_missing_rows_is_not_found() {
    let catalog = catalog().await;
    assert!(matches!(
        catalog.delete_course(1).await,
        Err(StoreError::NotFound { entity: "course", .. })
    ));
    assert!(matches!(
        catalog.delete_module(1).await,
        Err(StoreError::NotFound { entity: "module", .. })
    ));
    assert!(matches!(
        catalog.delete_item(1).await,
        Err(StoreError::NotFound { .. })
    ));
}

#[tokio::test]
async fn deleting_an_item_keeps_its_content() {
    let catalog = catalog().await;
    let course = course(&catalog, "Course").await;
    let module = module(&catalog, &course, "Only").await;
    let note = text_content(&catalog, "Note").await;
    let first = catalog.add_item(module.id, note, None).await.unwrap();
    catalog.add_item(module.id, note, None).await.unwrap();

    let removed = catalog.delete_item(first.id).await.unwrap();
    assert_eq!(removed.id, first.id);
    assert_eq!(item_orders(&catalog, &module).await, [1]);
    assert!(catalog.content().exists(note).await.unwrap());
}

#[tokio::test]
async fn failed_course_delete_keeps_modules_and_items() {
    let catalog = catalog().await;
    let course = course(&catalog, "Sturdy").await;
    let a = module(&catalog, &course, "A").await;
    let b = module(&catalog, &course, "B").await;
    let note = text_content(&catalog, "Note").await;
    catalog.add_item(a.id, note, None).await.unwrap();
    catalog.add_item(b.id, note, None).await.unwrap();
    catalog.add_item(b.id, note, None).await.unwrap();

    block_deletes_from(&catalog, "course").await;
    let err = catalog.delete_course(course.id).await.unwrap_err();
    assert!(matches!(err, StoreError::Database(_)), "{err}");

    assert_eq!(catalog.course(course.id).await.unwrap(), course);
    assert_eq!(module_orders(&catalog, &course).await, [0, 1]);
    assert_eq!(item_orders(&catalog, &a).await, [0]);
    assert_eq!(item_orders(&catalog, &b).await, [0, 1]);
}

#[tokio::test]
async fn failed_module_delete_keeps_its_items() {
    let catalog = catalog().await;
    let course = course(&catalog, "Sturdy").await;
    let module = module(&catalog, &course, "Only").await;
    let note = text_content(&catalog, "Note").await;
    catalog.add_item(module.id, note, None).await.unwrap();
    catalog.add_item(module.id, note, None).await.unwrap();

    block_deletes_from(&catalog, "module").await;
    assert!(catalog.delete_module(module.id).await.is_err());
    assert_eq!(item_orders(&catalog, &module).await, [0, 1]);
}

#[tokio::test]
async fn failed_content_delete_keeps_bound_items_and_blob() {
    let (catalog, blobs) = catalog_with_blobs().await;
    let course = course(&catalog, "Sturdy").await;
    let module = module(&catalog, &course, "Only").await;
    let blob = catalog
        .content()
        .store_blob(b"\x89PNG", "image/png")
        .unwrap();
    let picture = catalog
        .content()
        .create(
            OWNER,
            Payload::Image(ImageBody {
                title: "Diagram".into(),
                blob,
                alt_text: None,
            }),
        )
        .await
        .unwrap();
    catalog.add_item(module.id, picture, None).await.unwrap();
    catalog.add_item(module.id, picture, None).await.unwrap();

    block_deletes_from(&catalog, "image_content").await;
    let err = catalog.content().delete(picture).await.unwrap_err();
    assert!(matches!(err, StoreError::Database(_)), "{err}");

    assert!(catalog.content().exists(picture).await.unwrap());
    assert_eq!(item_orders(&catalog, &module).await, [0, 1]);
    assert_eq!(blobs.len(), 1);
}
