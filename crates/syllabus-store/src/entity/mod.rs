//! SeaORM entities. Each content kind keeps its own table; `module_item`
//! points at them through `(content_kind, content_id)` rather than a
//! foreign key per kind.

pub mod course;
pub mod file_content;
pub mod image_content;
pub mod module;
pub mod module_item;
pub mod text_content;
pub mod video_content;

use syllabus_core::BlobRef;

/// Blob sizes are stored as signed 64-bit integers.
pub(crate) fn size_to_db(size: u64) -> i64 {
    i64::try_from(size).unwrap_or(i64::MAX)
}

pub(crate) fn blob_ref(locator: String, media_type: String, size: i64) -> BlobRef {
    BlobRef {
        locator,
        media_type,
        size: u64::try_from(size).unwrap_or_default(),
    }
}
