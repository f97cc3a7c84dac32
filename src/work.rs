//! The creative work submitted for analysis.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;

/// Title shown when the user gave none
pub const UNTITLED: &str = "(Untitled)";

/// Type of work input, governing prompt construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Text,
    Image,
    Audio,
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modality::Text => write!(f, "text"),
            Modality::Image => write!(f, "image"),
            Modality::Audio => write!(f, "audio"),
        }
    }
}

/// Binary media sent to the generation service beside the prompt text
#[derive(Debug, Clone, PartialEq)]
pub struct MediaAttachment {
    pub mime_type: String,
    pub name: Option<String>,
    pub data: Vec<u8>,
}

/// Content of a work
#[derive(Debug, Clone, PartialEq)]
pub enum WorkPayload {
    Text(String),
    Image(MediaAttachment),
    Audio(MediaAttachment),
}

/// A creative work with an optional title
#[derive(Debug, Clone, PartialEq)]
pub struct Work {
    pub title: Option<String>,
    pub payload: WorkPayload,
}

impl Work {
    pub fn text(title: Option<String>, text: impl Into<String>) -> Self {
        Self {
            title,
            payload: WorkPayload::Text(text.into()),
        }
    }

    pub fn image(title: Option<String>, attachment: MediaAttachment) -> Self {
        Self {
            title,
            payload: WorkPayload::Image(attachment),
        }
    }

    pub fn audio(title: Option<String>, attachment: MediaAttachment) -> Self {
        Self {
            title,
            payload: WorkPayload::Audio(attachment),
        }
    }

    /// Load a work from disk; the modality is inferred from the extension
    /// unless given explicitly.
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        title: Option<String>,
        modality: Option<Modality>,
    ) -> Result<Self> {
        let path = path.as_ref();
        let inferred = infer_mime_type(path);
        let modality = modality
            .or_else(|| inferred.map(|(_, m)| m))
            .unwrap_or(Modality::Text);

        match modality {
            Modality::Text => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read work file: {:?}", path))?;
                Ok(Work::text(title, text))
            }
            Modality::Image | Modality::Audio => {
                let mime_type = match inferred {
                    Some((mime, m)) if m == modality => mime.to_string(),
                    _ => bail!(
                        "Could not determine the {} file type (MIME type) of {:?}",
                        modality,
                        path
                    ),
                };
                let data = fs::read(path)
                    .with_context(|| format!("Failed to read work file: {:?}", path))?;
                let attachment = MediaAttachment {
                    mime_type,
                    name: path
                        .file_name()
                        .map(|name| name.to_string_lossy().into_owned()),
                    data,
                };
                Ok(match modality {
                    Modality::Image => Work::image(title, attachment),
                    _ => Work::audio(title, attachment),
                })
            }
        }
    }

    pub fn modality(&self) -> Modality {
        match self.payload {
            WorkPayload::Text(_) => Modality::Text,
            WorkPayload::Image(_) => Modality::Image,
            WorkPayload::Audio(_) => Modality::Audio,
        }
    }

    /// Whether the payload carries anything to analyze
    pub fn is_ready(&self) -> bool {
        match &self.payload {
            WorkPayload::Text(text) => !text.trim().is_empty(),
            WorkPayload::Image(media) | WorkPayload::Audio(media) => !media.data.is_empty(),
        }
    }

    /// Title for display and prompts
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .unwrap_or(UNTITLED)
    }

    pub fn attachment(&self) -> Option<&MediaAttachment> {
        match &self.payload {
            WorkPayload::Text(_) => None,
            WorkPayload::Image(media) | WorkPayload::Audio(media) => Some(media),
        }
    }
}

/// Guess the MIME type and modality of a media file from its extension
pub fn infer_mime_type(path: &Path) -> Option<(&'static str, Modality)> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let found = match ext.as_str() {
        "png" => ("image/png", Modality::Image),
        "jpg" | "jpeg" => ("image/jpeg", Modality::Image),
        "gif" => ("image/gif", Modality::Image),
        "webp" => ("image/webp", Modality::Image),
        "heic" => ("image/heic", Modality::Image),
        "heif" => ("image/heif", Modality::Image),
        "bmp" => ("image/bmp", Modality::Image),
        "mp3" => ("audio/mpeg", Modality::Audio),
        "wav" => ("audio/wav", Modality::Audio),
        "ogg" => ("audio/ogg", Modality::Audio),
        "flac" => ("audio/flac", Modality::Audio),
        "m4a" => ("audio/mp4", Modality::Audio),
        "aac" => ("audio/aac", Modality::Audio),
        _ => return None,
    };
    Some(found)
}
