//! Relational store for courses, ordered modules and module items bound to
//! polymorphic content, on top of SeaORM.
//!
//! ```no_run
//! # async fn demo() -> Result<(), syllabus_store::StoreError> {
//! use syllabus_core::{NewCourse, NewModule, Payload, TextBody};
//! use syllabus_store::Catalog;
//!
//! let catalog = Catalog::in_memory().await?;
//! let course = catalog.create_course(NewCourse::new("Python Basics", "u-1")).await?;
//! let module = catalog.add_module(course.id, NewModule::new("Loops")).await?;
//! let text = catalog
//!     .content()
//!     .create("u-1", Payload::Text(TextBody { title: "While".into(), body: "...".into() }))
//!     .await?;
//! catalog.add_item(module.id, text, None).await?;
//! # Ok(())
//! # }
//! ```

pub mod binding;
pub mod blob;
pub mod catalog;
pub mod content;
pub mod entity;
pub mod error;
pub mod modules;
pub mod order;
pub mod query;
pub mod schema;
pub mod seed;

pub use blob::{BlobError, BlobStore, FsBlobStore, MemoryBlobStore};
pub use catalog::{Catalog, CourseRemoval, MEMORY_URL};
pub use content::{ContentRemoval, ContentStore};
pub use error::StoreError;
pub use modules::ModuleRemoval;
pub use order::{Ordered, ScopeLocks};
pub use query::OrderedQuery;
pub use seed::SeedReport;
