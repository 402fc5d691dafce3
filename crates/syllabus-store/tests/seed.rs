mod common;

use common::*;
use syllabus_core::{
    ContentFixture, CourseFilter, CourseFixture, ItemFixture, ModuleFixture, Snapshot,
    ValidationError,
};
use syllabus_store::{SeedReport, StoreError};

fn content(key: &str, title: &str) -> ContentFixture {
    ContentFixture {
        key: key.into(),
        owner: OWNER.into(),
        payload: text(title, "body"),
    }
}

fn item(key: &str, order: Option<i32>) -> ItemFixture {
    ItemFixture {
        content: key.into(),
        order,
    }
}

fn module_fixture(title: &str, order: Option<i32>, items: Vec<ItemFixture>) -> ModuleFixture {
    ModuleFixture {
        title: title.into(),
        description: String::new(),
        order,
        items,
    }
}

fn python_basics() -> Snapshot {
    Snapshot {
        contents: vec![
            content("while", "While"),
            content("for", "For"),
            ContentFixture {
                key: "diagram".into(),
                owner: OWNER.into(),
                payload: image("Loop diagram", "ab/loop"),
            },
        ],
        courses: vec![CourseFixture {
            title: "Python Basics".into(),
            slug: None,
            owner: OWNER.into(),
            description: "An introduction".into(),
            is_active: true,
            modules: vec![
                module_fixture("Intro", None, vec![]),
                module_fixture(
                    "Loops",
                    Some(5),
                    vec![
                        item("while", None),
                        item("for", None),
                        item("diagram", Some(10)),
                    ],
                ),
                module_fixture("Wrap-up", None, vec![item("for", None)]),
            ],
        }],
    }
}

#[tokio::test]
async fn seeds_a_course_tree_with_filled_orders() {
    let catalog = catalog().await;
    let report = catalog.seed(&python_basics()).await.unwrap();
    assert_eq!(
        report,
        SeedReport {
            contents: 3,
            courses: 1,
            modules: 3,
            items: 4,
        }
    );

    let course = catalog.course_by_slug("python-basics").await.unwrap();
    let outline = catalog.outline(course.id).await.unwrap();
    let modules: Vec<(&str, i32)> = outline
        .modules
        .iter()
        .map(|m| (m.module.title.as_str(), m.module.order))
        .collect();
    assert_eq!(modules, [("Intro", 0), ("Loops", 5), ("Wrap-up", 6)]);

    let loops: Vec<(i32, &str)> = outline.modules[1]
        .items
        .iter()
        .map(|(item, rendered)| (item.order, rendered.title.as_str()))
        .collect();
    assert_eq!(loops, [(0, "While"), (1, "For"), (10, "Loop diagram")]);
    assert_eq!(outline.item_count(), 4);

    // Live assignment continues after seeded orders.
    let next = module(&catalog, &course, "Extra").await;
    assert_eq!(next.order, 7);
}

#[tokio::test]
async fn invalid_snapshots_write_nothing() {
    let catalog = catalog().await;
    let mut snapshot = python_basics();
    snapshot.courses[0].modules[2].items.push(item("missing", None));

    let err = catalog.seed(&snapshot).await.unwrap_err();
    assert!(
        matches!(
            err,
            StoreError::Validation(ValidationError::UnknownContentKey { ref key, .. }) if key == "missing"
        ),
        "{err}"
    );
    assert!(catalog.list_courses(CourseFilter::All).await.unwrap().is_empty());
}

#[tokio::test]
async fn reseeding_an_existing_slug_rolls_back() {
    let catalog = catalog().await;
    catalog.seed(&python_basics()).await.unwrap();

    let mut second = python_basics();
    second.contents.push(content("extra", "Extra"));
    let err = catalog.seed(&second).await.unwrap_err();
    assert!(matches!(err, StoreError::DuplicateSlug(ref s) if s == "python-basics"), "{err}");

    // The content rows of the failed seed were rolled back as well.
    let texts = catalog
        .content()
        .list(syllabus_core::ContentKind::Text)
        .await
        .unwrap();
    assert_eq!(texts.len(), 2);
}

#[tokio::test]
async fn empty_snapshot_is_a_no_op() {
    let catalog = catalog().await;
    let report = catalog.seed(&Snapshot::default()).await.unwrap();
    assert_eq!(report, SeedReport::default());
}

#[tokio::test]
async fn seeded_inactive_courses_are_listed_only_with_all() {
    let catalog = catalog().await;
    let mut snapshot = python_basics();
    snapshot.courses[0].is_active = false;
    catalog.seed(&snapshot).await.unwrap();

    let course = catalog.course_by_slug("python-basics").await.unwrap();
    assert!(!course.is_active);
    assert!(catalog.list_courses(CourseFilter::Active).await.unwrap().is_empty());
    assert_eq!(catalog.list_courses(CourseFilter::All).await.unwrap(), [course]);
}
