#[cfg(feature = "cli")]
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Supported file formats for fixture snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(ValueEnum))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    #[default]
    Json,
    Yaml,
    Yml,
}

impl FileFormat {
    /// File extension written for this format.
    pub fn extension(self) -> &'static str {
        match self {
            FileFormat::Json => "json",
            FileFormat::Yaml => "yaml",
            FileFormat::Yml => "yml",
        }
    }

    /// Returns true when JSON.
    pub fn is_json(self) -> bool {
        matches!(self, FileFormat::Json)
    }

    /// Guess the format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "json" => Some(FileFormat::Json),
            "yaml" => Some(FileFormat::Yaml),
            "yml" => Some(FileFormat::Yml),
            _ => None,
        }
    }
}
