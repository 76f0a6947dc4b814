//! Note entity and filtering types
//!
//! A note carries denormalized copies of its taxonomy names rather than
//! foreign keys, so lists can be filtered without joins. The trade-off is
//! that a renamed taxonomy node leaves stale names on existing notes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Closed set of accepted file kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// PDF document
    #[serde(rename = "pdf")]
    Document,
    /// PowerPoint slideshow (.ppt / .pptx)
    #[serde(rename = "ppt")]
    Slideshow,
}

/// MIME types the upload pipeline accepts
pub const ALLOWED_CONTENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/vnd.ms-powerpoint",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
];

impl FileKind {
    /// Classify a declared MIME type, rejecting anything outside the closed set
    pub fn from_content_type(content_type: &str) -> Option<FileKind> {
        if !ALLOWED_CONTENT_TYPES.contains(&content_type) {
            return None;
        }
        if content_type.contains("pdf") {
            Some(FileKind::Document)
        } else {
            Some(FileKind::Slideshow)
        }
    }

    /// Uppercase label shown on thumbnails
    pub fn label(&self) -> &'static str {
        match self {
            FileKind::Document => "PDF",
            FileKind::Slideshow => "PPT",
        }
    }
}

/// A single uploaded document record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Server-assigned identifier
    #[serde(rename = "_id")]
    pub id: String,

    pub title: String,

    // Denormalized taxonomy names
    pub university: String,
    pub stream: String,
    pub class: String,
    pub subject: String,

    #[serde(default)]
    pub description: String,

    /// Uploader account id, when the collaborator exposes it
    #[serde(default)]
    pub uploaded_by: Option<String>,

    pub uploader_name: String,

    pub file_name: String,

    /// Stored content locator, when the collaborator exposes it
    #[serde(default)]
    pub file_path: Option<String>,

    pub file_type: FileKind,

    #[serde(default)]
    pub file_size: Option<u64>,

    pub pages: u32,

    /// Synthetic SVG placeholder, not a rendering of the document
    pub thumbnail: String,

    /// Monotonically non-decreasing, incremented server-side per download
    #[serde(default)]
    pub downloads: u64,

    pub upload_date: DateTime<Utc>,
}

/// Optional filters for note listings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Free-text search term
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl NoteFilters {
    /// Filter scoped to a university
    pub fn for_university(name: impl Into<String>) -> Self {
        Self {
            university: Some(name.into()),
            ..Default::default()
        }
    }

    /// Query-string pairs for the collaborator
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(ref v) = self.university {
            params.push(("university", v.clone()));
        }
        if let Some(ref v) = self.stream {
            params.push(("stream", v.clone()));
        }
        if let Some(ref v) = self.class {
            params.push(("class", v.clone()));
        }
        if let Some(ref v) = self.subject {
            params.push(("subject", v.clone()));
        }
        if let Some(ref v) = self.search {
            params.push(("search", v.clone()));
        }
        params
    }
}

/// Ordering for the featured-notes listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeaturedFilter {
    TopRated,
    MostDownloaded,
    Recent,
}

impl FeaturedFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeaturedFilter::TopRated => "top-rated",
            FeaturedFilter::MostDownloaded => "most-downloaded",
            FeaturedFilter::Recent => "recent",
        }
    }
}

/// Generate the placeholder thumbnail for an uploaded file
///
/// A static SVG data URL: background color keyed on the file kind, the first
/// 15 characters of the file name, and the kind label.
pub fn generate_thumbnail(file_name: &str, kind: FileKind) -> String {
    let color = match kind {
        FileKind::Document => "%234F46E5",
        FileKind::Slideshow => "%23F59E0B",
    };
    let display: String = file_name.chars().take(15).collect();
    let display = percent_encode(&display);

    format!(
        "data:image/svg+xml,%3Csvg xmlns=\"http://www.w3.org/2000/svg\" width=\"200\" height=\"250\"%3E\
         %3Crect fill=\"{color}\" width=\"200\" height=\"250\"/%3E\
         %3Ctext x=\"50%25\" y=\"40%25\" font-size=\"18\" fill=\"white\" text-anchor=\"middle\"%3E{display}%3C/text%3E\
         %3Ctext x=\"50%25\" y=\"60%25\" font-size=\"14\" fill=\"white\" text-anchor=\"middle\"%3E{label}%3C/text%3E\
         %3C/svg%3E",
        color = color,
        display = display,
        label = kind.label(),
    )
}

/// Minimal percent-encoding, used for SVG data URLs and URL path segments
pub fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '_' | '.' | '~' => out.push(ch),
            _ => {
                let mut buf = [0u8; 4];
                for byte in ch.encode_utf8(&mut buf).bytes() {
                    out.push_str(&format!("%{:02X}", byte));
                }
            }
        }
    }
    out
}
