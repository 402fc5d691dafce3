pub mod config;
pub mod fixtures;

pub use config::{CONFIG_FILE, load_config, load_config_from_path, load_config_or_default};
pub use fixtures::{load_fixtures, load_fixtures_from_dir, load_snapshot_file, save_snapshot};
