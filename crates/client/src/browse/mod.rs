//! Catalog browsing
//!
//! Fetches the taxonomy and note listings, tracks the user's traversal
//! (university → stream → class → subject), and applies a last-request-wins
//! policy: a response that resolves after a newer request for the same
//! resource has already been applied is discarded, so rapid re-selection
//! never flickers back to stale data.
//!
//! Catalog and statistics loads are best-effort reads: a failure degrades
//! to an empty result instead of surfacing an error.

use crate::api::NotesApi;
use noteshare_core::catalog::{notes_for_subject, Catalog};
use noteshare_core::models::{
    Class, FeaturedFilter, Note, NoteFilters, PlatformStats, Stream, UniversityStats,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Monotonic ticket dispenser for one fetched resource
///
/// `begin` issues a ticket per request; `try_apply` accepts a response only
/// if no response with a newer ticket has been applied yet.
#[derive(Debug, Default)]
pub struct RequestSeq {
    issued: AtomicU64,
    applied: AtomicU64,
}

impl RequestSeq {
    pub fn begin(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn try_apply(&self, ticket: u64) -> bool {
        let prev = self.applied.fetch_max(ticket, Ordering::Relaxed);
        ticket > prev
    }
}

/// The user's current position in the taxonomy
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub university: Option<String>,
    pub stream: Option<String>,
    pub class: Option<String>,
    pub subject: Option<String>,
}

/// Catalog browser over the REST collaborator
pub struct CatalogBrowser {
    api: Arc<dyn NotesApi>,
    catalog: Catalog,
    notes: Vec<Note>,
    selection: Selection,
    catalog_seq: RequestSeq,
    notes_seq: RequestSeq,
}

impl CatalogBrowser {
    pub fn new(api: Arc<dyn NotesApi>) -> Self {
        Self {
            api,
            catalog: Catalog::default(),
            notes: Vec::new(),
            selection: Selection::default(),
            catalog_seq: RequestSeq::default(),
            notes_seq: RequestSeq::default(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Fetch the taxonomy snapshot
    pub async fn refresh_catalog(&mut self) {
        let ticket = self.catalog_seq.begin();
        let result = self.api.list_universities().await;

        if !self.catalog_seq.try_apply(ticket) {
            debug!(ticket, "Discarding stale catalog response");
            return;
        }

        match result {
            Ok(universities) => {
                debug!(count = universities.len(), "Catalog loaded");
                self.catalog = Catalog::new(universities);
            }
            Err(err) => {
                warn!(error = %err, "Catalog load failed, showing no options");
                self.catalog = Catalog::default();
            }
        }
    }

    /// Fetch a note listing for the given filters
    pub async fn load_notes(&mut self, filters: &NoteFilters) {
        let ticket = self.notes_seq.begin();
        let result = self.api.list_notes(filters).await;

        if !self.notes_seq.try_apply(ticket) {
            debug!(ticket, "Discarding stale notes response");
            return;
        }

        match result {
            Ok(notes) => {
                debug!(count = notes.len(), "Notes loaded");
                self.notes = notes;
            }
            Err(err) => {
                warn!(error = %err, "Notes load failed, showing no data");
                self.notes = Vec::new();
            }
        }
    }

    /// Select a university; deeper selections are reset
    ///
    /// Returns the streams belonging to that university, empty when it no
    /// longer resolves.
    pub fn select_university(&mut self, name: &str) -> &[Stream] {
        self.selection = Selection {
            university: Some(name.to_string()),
            ..Selection::default()
        };
        self.catalog.streams_of(name)
    }

    /// Select a stream under the chosen university
    pub fn select_stream(&mut self, name: &str) -> &[Class] {
        self.selection.stream = Some(name.to_string());
        self.selection.class = None;
        self.selection.subject = None;

        match self.selection.university.as_deref() {
            Some(university) => self.catalog.classes_of(university, name),
            None => &[],
        }
    }

    /// Select a class under the chosen stream
    pub fn select_class(&mut self, name: &str) -> &[String] {
        self.selection.class = Some(name.to_string());
        self.selection.subject = None;

        match (
            self.selection.university.as_deref(),
            self.selection.stream.as_deref(),
        ) {
            (Some(university), Some(stream)) => self.catalog.subjects_of(university, stream, name),
            _ => &[],
        }
    }

    /// Select a subject and return the matching cached notes
    ///
    /// Matching is case-insensitive and whitespace-trimmed; results are
    /// scoped to the selected university when one is chosen, sorted by
    /// download count.
    pub fn select_subject(&mut self, name: &str) -> Vec<&Note> {
        self.selection.subject = Some(name.to_string());
        notes_for_subject(&self.notes, name, self.selection.university.as_deref())
    }

    /// Per-university statistics, best-effort
    pub async fn university_stats(&self, university: &str) -> Option<UniversityStats> {
        match self.api.university_stats(university).await {
            Ok(stats) => Some(stats),
            Err(err) => {
                warn!(error = %err, university, "University stats unavailable");
                None
            }
        }
    }

    /// Platform-wide statistics, best-effort
    pub async fn platform_stats(&self) -> Option<PlatformStats> {
        match self.api.platform_stats().await {
            Ok(stats) => Some(stats),
            Err(err) => {
                warn!(error = %err, "Platform stats unavailable");
                None
            }
        }
    }

    /// Featured notes listing, best-effort
    pub async fn featured_notes(&self, filter: FeaturedFilter, limit: u32) -> Vec<Note> {
        match self.api.featured_notes(filter, limit).await {
            Ok(notes) => notes,
            Err(err) => {
                warn!(error = %err, "Featured notes unavailable");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_seq_accepts_in_order() {
        let seq = RequestSeq::default();
        let a = seq.begin();
        let b = seq.begin();
        assert!(seq.try_apply(a));
        assert!(seq.try_apply(b));
    }

    #[test]
    fn test_request_seq_discards_stale_response() {
        let seq = RequestSeq::default();
        let older = seq.begin();
        let newer = seq.begin();
        // The newer request returns first
        assert!(seq.try_apply(newer));
        // The older response arrives late and must be discarded
        assert!(!seq.try_apply(older));
    }

    #[test]
    fn test_request_seq_rejects_duplicate_apply() {
        let seq = RequestSeq::default();
        let ticket = seq.begin();
        assert!(seq.try_apply(ticket));
        assert!(!seq.try_apply(ticket));
    }
}
