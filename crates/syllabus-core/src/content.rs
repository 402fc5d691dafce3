//! Concrete content kinds and the tagged binding that points at them.
//!
//! Each kind keeps its own payload shape ([`TextBody`], [`FileBody`],
//! [`ImageBody`], [`VideoBody`]); [`Payload`] closes over them so callers can
//! render any item without knowing which table it came from.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use syllabus_naming::human_size;

use crate::error::ValidationError;

pub type ContentId = i32;

/// Longest summary produced by [`Payload::render`], in characters.
pub const SUMMARY_LEN: usize = 80;

/// Discriminator naming the store a binding targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Text,
    File,
    Image,
    Video,
}

impl ContentKind {
    pub const ALL: [ContentKind; 4] = [
        ContentKind::Text,
        ContentKind::File,
        ContentKind::Image,
        ContentKind::Video,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Text => "text",
            ContentKind::File => "file",
            ContentKind::Image => "image",
            ContentKind::Video => "video",
        }
    }

    /// Kinds whose payload lives in the blob store.
    pub fn is_blob_backed(self) -> bool {
        !matches!(self, ContentKind::Text)
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownKind(s.to_string()))
    }
}

/// `(kind, id)` pair binding a module item to one concrete content row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentBinding {
    pub kind: ContentKind,
    pub id: ContentId,
}

impl ContentBinding {
    pub fn new(kind: ContentKind, id: ContentId) -> Self {
        Self { kind, id }
    }
}

impl fmt::Display for ContentBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind, self.id)
    }
}

impl FromStr for ContentBinding {
    type Err = ValidationError;

    /// Parses `kind#id`, e.g. `image#12`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s
            .split_once('#')
            .ok_or_else(|| ValidationError::MalformedBinding(s.to_string()))?;
        let id = id
            .trim()
            .parse()
            .map_err(|_| ValidationError::MalformedBinding(s.to_string()))?;
        Ok(Self::new(kind.parse()?, id))
    }
}

/// Reference to bytes held by the blob storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub struct BlobRef {
    /// Opaque locator understood by the blob store.
    pub locator: String,
    pub media_type: String,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct TextBody {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct FileBody {
    pub title: String,
    pub blob: BlobRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct ImageBody {
    pub title: String,
    pub blob: BlobRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct VideoBody {
    pub title: String,
    pub blob: BlobRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u32>,
}

/// Kind-specific content fields, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payload {
    Text(TextBody),
    File(FileBody),
    Image(ImageBody),
    Video(VideoBody),
}

impl Payload {
    pub fn kind(&self) -> ContentKind {
        match self {
            Payload::Text(_) => ContentKind::Text,
            Payload::File(_) => ContentKind::File,
            Payload::Image(_) => ContentKind::Image,
            Payload::Video(_) => ContentKind::Video,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Payload::Text(t) => &t.title,
            Payload::File(f) => &f.title,
            Payload::Image(i) => &i.title,
            Payload::Video(v) => &v.title,
        }
    }

    pub fn set_title(&mut self, title: String) {
        match self {
            Payload::Text(t) => t.title = title,
            Payload::File(f) => f.title = title,
            Payload::Image(i) => i.title = title,
            Payload::Video(v) => v.title = title,
        }
    }

    /// Blob reference for blob-backed kinds.
    pub fn blob(&self) -> Option<&BlobRef> {
        match self {
            Payload::Text(_) => None,
            Payload::File(f) => Some(&f.blob),
            Payload::Image(i) => Some(&i.blob),
            Payload::Video(v) => Some(&v.blob),
        }
    }

    /// Displayable form: kind label, title and a one-line summary.
    pub fn render(&self) -> Rendered {
        let summary = match self {
            Payload::Text(t) => excerpt(&t.body),
            Payload::File(f) => format!("{}, {}", f.blob.media_type, human_size(f.blob.size)),
            Payload::Image(i) => match &i.alt_text {
                Some(alt) if !alt.trim().is_empty() => excerpt(alt),
                _ => format!("{}, {}", i.blob.media_type, human_size(i.blob.size)),
            },
            Payload::Video(v) => match v.duration_secs {
                Some(secs) => format!("{}, {}", v.blob.media_type, duration(secs)),
                None => v.blob.media_type.clone(),
            },
        };

        Rendered {
            kind: self.kind(),
            title: self.title().to_string(),
            summary,
        }
    }
}

/// A stored content row of any kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub id: ContentId,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub payload: Payload,
}

impl Content {
    pub fn kind(&self) -> ContentKind {
        self.payload.kind()
    }

    pub fn binding(&self) -> ContentBinding {
        ContentBinding::new(self.kind(), self.id)
    }

    pub fn render(&self) -> Rendered {
        self.payload.render()
    }
}

/// Rendering shared by every content kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rendered {
    pub kind: ContentKind,
    pub title: String,
    pub summary: String,
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.summary.is_empty() {
            write!(f, "[{}] {}", self.kind, self.title)
        } else {
            write!(f, "[{}] {}: {}", self.kind, self.title, self.summary)
        }
    }
}

/// First non-blank line, cut to [`SUMMARY_LEN`] characters.
fn excerpt(text: &str) -> String {
    let line = text
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or_default();

    if line.chars().count() <= SUMMARY_LEN {
        line.to_string()
    } else {
        let cut: String = line.chars().take(SUMMARY_LEN - 3).collect();
        format!("{}...", cut.trim_end())
    }
}

fn duration(secs: u32) -> String {
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{h}h {m:02}m")
    } else if m > 0 {
        format!("{m}m {s:02}s")
    } else {
        format!("{s}s")
    }
}
