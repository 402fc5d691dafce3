pub mod content;
pub mod courses;
pub mod init;
pub mod modules;
pub mod schema;
pub mod seed;

pub use content::{cmd_add_blob, cmd_add_text, cmd_delete_content};
pub use courses::{cmd_courses, cmd_delete_course, cmd_new_course, cmd_set_active, cmd_show};
pub use init::cmd_init;
pub use modules::{cmd_add_module, cmd_attach, cmd_delete_item, cmd_delete_module};
pub use schema::cmd_schema;
pub use seed::cmd_seed;
