#![allow(dead_code)]

use std::sync::Arc;

use syllabus_core::{
    BlobRef, ContentBinding, Course, ImageBody, Module, NewCourse, NewModule, Payload, TextBody,
    VideoBody,
};
use syllabus_store::{Catalog, MemoryBlobStore};

pub const OWNER: &str = "instructor-1";

pub async fn catalog() -> Catalog {
    Catalog::in_memory().await.expect("in-memory catalog")
}

pub async fn catalog_with_blobs() -> (Catalog, Arc<MemoryBlobStore>) {
    let blobs = Arc::new(MemoryBlobStore::new());
    let catalog = catalog().await.with_blobs(blobs.clone());
    (catalog, blobs)
}

pub fn text(title: &str, body: &str) -> Payload {
    Payload::Text(TextBody {
        title: title.into(),
        body: body.into(),
    })
}

pub fn blob(locator: &str, media_type: &str, size: u64) -> BlobRef {
    BlobRef {
        locator: locator.into(),
        media_type: media_type.into(),
        size,
    }
}

pub fn image(title: &str, locator: &str) -> Payload {
    Payload::Image(ImageBody {
        title: title.into(),
        blob: blob(locator, "image/png", 2048),
        alt_text: None,
    })
}

pub fn video(title: &str, locator: &str, duration_secs: u32) -> Payload {
    Payload::Video(VideoBody {
        title: title.into(),
        blob: blob(locator, "video/mp4", 1 << 20),
        duration_secs: Some(duration_secs),
    })
}

pub async fn course(catalog: &Catalog, title: &str) -> Course {
    catalog
        .create_course(NewCourse::new(title, OWNER))
        .await
        .expect("create course")
}

pub async fn module(catalog: &Catalog, course: &Course, title: &str) -> Module {
    catalog
        .add_module(course.id, NewModule::new(title))
        .await
        .expect("add module")
}

pub async fn text_content(catalog: &Catalog, title: &str) -> ContentBinding {
    catalog
        .content()
        .create(OWNER, text(title, "body"))
        .await
        .expect("create text")
}

pub async fn module_orders(catalog: &Catalog, course: &Course) -> Vec<i32> {
    catalog
        .ordered_modules(course.id)
        .all(catalog.db())
        .await
        .expect("ordered modules")
        .into_iter()
        .map(|m| m.order)
        .collect()
}

pub async fn item_orders(catalog: &Catalog, module: &Module) -> Vec<i32> {
    catalog
        .ordered_items(module.id)
        .all(catalog.db())
        .await
        .expect("ordered items")
        .into_iter()
        .map(|i| i.order)
        .collect()
}
