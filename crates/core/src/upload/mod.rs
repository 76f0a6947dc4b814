//! Upload validation pipeline
//!
//! Converts a raw submission into a validated upload request. Every check
//! runs before any network call; the first failing field is named in the
//! error. State only mutates after the collaborator confirms the upload.

use crate::catalog::TaxonomyChoice;
use crate::errors::{AppError, Result};
use crate::models::note::{generate_thumbnail, FileKind};
use crate::MAX_FILE_SIZE;
use sha2::{Digest, Sha256};

/// A raw note submission, as assembled by the presentation layer
#[derive(Debug, Clone)]
pub struct NoteSubmission {
    /// File content; `None` until the user picks a file
    pub file: Option<Vec<u8>>,

    /// Original file name, extension included
    pub file_name: String,

    /// Declared MIME type of the file
    pub content_type: String,

    pub university: TaxonomyChoice,
    pub stream: TaxonomyChoice,
    pub class: TaxonomyChoice,
    pub subject: TaxonomyChoice,

    /// Optional explicit title; derived from the file name when empty
    pub title: Option<String>,

    pub description: String,
}

/// A submission that passed the validation gate
#[derive(Debug, Clone)]
pub struct ValidatedUpload {
    pub file: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
    pub file_kind: FileKind,
    pub title: String,
    pub university: String,
    pub stream: String,
    pub class: String,
    pub subject: String,
    pub description: String,
    pub thumbnail: String,
    /// Deduplication key derived from the submission content
    pub idempotency_key: String,
}

/// Known-node names per taxonomy level, used to resolve "other" entries
#[derive(Debug, Clone, Default)]
pub struct TaxonomyContext {
    pub universities: Vec<String>,
    pub streams: Vec<String>,
    pub classes: Vec<String>,
    pub subjects: Vec<String>,
}

impl NoteSubmission {
    /// Run the validation gate
    ///
    /// Order matters: file presence, file type, file size, then taxonomy
    /// levels top-down, then title. The first failure wins and nothing is
    /// mutated.
    pub fn validate(&self, context: &TaxonomyContext) -> Result<ValidatedUpload> {
        let file = self
            .file
            .as_ref()
            .filter(|bytes| !bytes.is_empty())
            .ok_or_else(|| AppError::MissingField {
                field: "file".to_string(),
            })?;

        let file_kind = FileKind::from_content_type(&self.content_type).ok_or_else(|| {
            AppError::InvalidFileType {
                content_type: self.content_type.clone(),
            }
        })?;

        let size = file.len() as u64;
        if size > MAX_FILE_SIZE {
            return Err(AppError::FileTooLarge {
                size,
                limit: MAX_FILE_SIZE,
            });
        }

        let university = self.university.resolve("university", &context.universities)?;
        let stream = self.stream.resolve("stream", &context.streams)?;
        let class = self.class.resolve("class", &context.classes)?;
        let subject = self.subject.resolve("subject", &context.subjects)?;

        let title = match self.title.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => title_from_file_name(&self.file_name),
        };
        if title.is_empty() {
            return Err(AppError::MissingField {
                field: "title".to_string(),
            });
        }

        let idempotency_key = idempotency_key(&title, &university, &subject);

        Ok(ValidatedUpload {
            file: file.clone(),
            file_name: self.file_name.clone(),
            content_type: self.content_type.clone(),
            file_kind,
            thumbnail: generate_thumbnail(&self.file_name, file_kind),
            title,
            university,
            stream,
            class,
            subject,
            description: self.description.trim().to_string(),
            idempotency_key,
        })
    }
}

/// Derive a default title from a file name by stripping the extension
pub fn title_from_file_name(file_name: &str) -> String {
    let trimmed = file_name.trim();
    for ext in [".pdf", ".pptx", ".ppt"] {
        if trimmed.len() > ext.len() && trimmed.to_lowercase().ends_with(ext) {
            return trimmed[..trimmed.len() - ext.len()].to_string();
        }
    }
    trimmed.to_string()
}

/// Deduplication key over the fields that identify a note
pub fn idempotency_key(title: &str, university: &str, subject: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    hasher.update(b"\x00");
    hasher.update(university.as_bytes());
    hasher.update(b"\x00");
    hasher.update(subject.as_bytes());
    hex::encode(hasher.finalize())
}
