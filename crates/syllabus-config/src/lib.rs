pub mod config;
pub mod file_format;

pub use config::{DATABASE_URL_ENV, PoolConfig, SyllabusConfig, default_database_url};
pub use file_format::FileFormat;
