//! Aggregate statistics returned by the collaborator
//!
//! All statistic loads are best-effort reads: a failure degrades to showing
//! no data instead of blocking the page.

use serde::{Deserialize, Serialize};

/// Platform-wide totals
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStats {
    pub total_users: u64,
    pub total_notes: u64,
    pub total_universities: u64,
    pub total_downloads: u64,
}

/// Per-university counts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniversityStats {
    pub university: String,
    pub total_notes: u64,
    pub total_downloads: u64,
    pub total_streams: u64,
    pub total_subjects: u64,
}

/// Per-account activity counts shown on the profile page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_uploads: u64,
    pub total_downloads: u64,
    pub credits_earned: u64,
    pub credits_spent: u64,
}
