use std::{fs, io, path::Path};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Upper bound advertised by the upload panel.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 800 * 1024 * 1024;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

id_newtype!(SubmissionId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    InProgress,
    Succeeded,
    Failed,
}

impl Phase {
    pub fn is_in_progress(self) -> bool {
        self == Phase::InProgress
    }
}

/// A file picked by the user, held in memory until the next selection.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedDocument {
    pub display_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedDocument {
    /// Media type is guessed from the file name, the way a browser file input
    /// reports it.
    pub fn new(display_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let display_name = display_name.into();
        let media_type = mime_guess::from_path(&display_name)
            .first_raw()
            .unwrap_or("application/octet-stream")
            .to_string();
        Self {
            display_name,
            media_type,
            bytes,
        }
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = media_type.into();
        self
    }

    pub fn from_path(path: &Path) -> io::Result<Self> {
        let bytes = fs::read(path)?;
        let display_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("document.pdf")
            .to_string();
        let media_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or("application/octet-stream")
            .to_string();
        Ok(Self {
            display_name,
            media_type,
            bytes,
        })
    }

    pub fn is_pdf(&self) -> bool {
        self.media_type.eq_ignore_ascii_case(PDF_MEDIA_TYPE)
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn validate(&self, max_upload_bytes: u64) -> Result<(), ValidationError> {
        if !self.is_pdf() {
            return Err(ValidationError::NotPdf {
                media_type: self.media_type.clone(),
            });
        }
        if self.size_bytes() > max_upload_bytes {
            return Err(ValidationError::TooLarge {
                size_bytes: self.size_bytes(),
                limit_bytes: max_upload_bytes,
            });
        }
        Ok(())
    }

    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            display_name: self.display_name.clone(),
            media_type: self.media_type.clone(),
            size_bytes: self.size_bytes(),
        }
    }
}

impl std::fmt::Debug for SelectedDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectedDocument")
            .field("display_name", &self.display_name)
            .field("media_type", &self.media_type)
            .field("size_bytes", &self.bytes.len())
            .finish()
    }
}

/// What the UI keeps about the current document once its bytes are handed off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub display_name: String,
    pub media_type: String,
    pub size_bytes: u64,
}
