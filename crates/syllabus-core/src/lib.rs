pub mod actor;
pub mod content;
pub mod course;
pub mod error;
pub mod order;
pub mod snapshot;
pub mod validate;

pub use actor::{Actor, Permission, Role, RoleGrants, init_role_grants, role_grants};
pub use content::{
    BlobRef, Content, ContentBinding, ContentId, ContentKind, FileBody, ImageBody, Payload,
    Rendered, TextBody, VideoBody,
};
pub use course::{
    Course, CourseFilter, CourseId, CourseOutline, ItemId, Module, ModuleId, ModuleItem, ModuleOutline,
    NewCourse, NewModule,
};
pub use error::{AccessDenied, ValidationError};
pub use order::{OrderScope, next_order};
pub use snapshot::{ContentFixture, CourseFixture, ItemFixture, ModuleFixture, Snapshot};
pub use validate::{validate_order, validate_owner, validate_slug, validate_snapshot, validate_title};
