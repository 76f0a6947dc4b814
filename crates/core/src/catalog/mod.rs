//! Catalog navigation over the university taxonomy
//!
//! Resolves a traversal through University → Stream → Class → Subject into
//! selector lists and filtered notes. Every lookup degrades to an empty
//! list when a parent node no longer resolves (e.g. deleted concurrently):
//! the traversal must never panic.

use crate::errors::{AppError, Result};
use crate::models::{Class, Note, Stream, University};
use serde::{Deserialize, Serialize};

/// Normalize a subject or search term for matching
///
/// Applied to BOTH sides of every comparison. Skipping it on one side lets
/// distinct-cased duplicates silently fail to match.
pub fn normalize(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Case-insensitive, whitespace-trimmed subject comparison
pub fn subject_matches(subject: &str, term: &str) -> bool {
    normalize(subject) == normalize(term)
}

/// Selection of a taxonomy node during upload: either an existing node or a
/// user-supplied name for a node to be created before the dependent note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum TaxonomyChoice {
    Existing(String),
    New(String),
}

impl TaxonomyChoice {
    /// Resolve the choice to a concrete node name
    ///
    /// A `New` name is trimmed and must be non-empty; when it differs from an
    /// existing node only by case or whitespace, the existing node is reused
    /// instead of creating a near-duplicate.
    pub fn resolve(&self, field: &str, existing: &[String]) -> Result<String> {
        match self {
            TaxonomyChoice::Existing(name) => {
                if name.trim().is_empty() {
                    return Err(AppError::MissingField {
                        field: field.to_string(),
                    });
                }
                Ok(name.clone())
            }
            TaxonomyChoice::New(name) => {
                let trimmed = name.trim();
                if trimmed.is_empty() {
                    return Err(AppError::MissingField {
                        field: field.to_string(),
                    });
                }
                let wanted = normalize(trimmed);
                if let Some(hit) = existing.iter().find(|e| normalize(e) == wanted) {
                    return Ok(hit.clone());
                }
                Ok(trimmed.to_string())
            }
        }
    }

    /// Whether resolving this choice requires creating a new taxonomy node
    pub fn is_new(&self, existing: &[String]) -> bool {
        match self {
            TaxonomyChoice::Existing(_) => false,
            TaxonomyChoice::New(name) => {
                let wanted = normalize(name);
                !existing.iter().any(|e| normalize(e) == wanted)
            }
        }
    }
}

/// A fetched snapshot of the taxonomy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub universities: Vec<University>,
}

impl Catalog {
    pub fn new(universities: Vec<University>) -> Self {
        Self { universities }
    }

    /// Find a university by exact name
    pub fn university(&self, name: &str) -> Option<&University> {
        self.universities.iter().find(|u| u.name == name)
    }

    /// Streams of a university; empty when the university is gone
    pub fn streams_of(&self, university: &str) -> &[Stream] {
        self.university(university)
            .map(|u| u.streams.as_slice())
            .unwrap_or(&[])
    }

    /// Classes of a stream; empty when any parent is gone
    pub fn classes_of(&self, university: &str, stream: &str) -> &[Class] {
        self.university(university)
            .and_then(|u| u.stream(stream))
            .map(|s| s.classes.as_slice())
            .unwrap_or(&[])
    }

    /// Subject names of a class; empty when any parent is gone
    pub fn subjects_of(&self, university: &str, stream: &str, class: &str) -> &[String] {
        self.university(university)
            .and_then(|u| u.stream(stream))
            .and_then(|s| s.class(class))
            .map(|c| c.subjects.as_slice())
            .unwrap_or(&[])
    }

    /// Node names at each level, for duplicate detection on "other" entries
    pub fn university_names(&self) -> Vec<String> {
        self.universities.iter().map(|u| u.name.clone()).collect()
    }
}

/// Filter notes by subject, optionally scoped to a university, sorted by
/// download count descending
pub fn notes_for_subject<'a>(
    notes: &'a [Note],
    subject: &str,
    university: Option<&str>,
) -> Vec<&'a Note> {
    let mut matches: Vec<&Note> = notes
        .iter()
        .filter(|n| subject_matches(&n.subject, subject))
        .filter(|n| university.map_or(true, |u| n.university == u))
        .collect();
    matches.sort_by(|a, b| b.downloads.cmp(&a.downloads));
    matches
}
