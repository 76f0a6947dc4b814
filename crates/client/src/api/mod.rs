//! REST collaborator abstraction
//!
//! `NotesApi` is the seam between the session/browsing layers and the
//! platform's backend. The wire implementation lives in [`http`]; tests
//! drive the same trait with an in-memory fake.

pub mod http;

pub use http::HttpApi;

use async_trait::async_trait;
use noteshare_core::errors::Result;
use noteshare_core::models::{
    Account, FeaturedFilter, Note, NoteFilters, PlatformStats, University, UniversityStats,
    UserStats,
};
use noteshare_core::upload::ValidatedUpload;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Registration payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, message = "name must be at least 2 characters"))]
    pub name: String,

    #[validate(email(message = "invalid email address"))]
    pub email: String,

    #[validate(custom(function = validate_password_strength))]
    pub password: String,

    #[validate(length(min = 1, message = "university is required"))]
    pub university: String,
}

/// Login payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Password rule: at least 6 chars with lower, upper and digit
pub fn validate_password_strength(password: &str) -> std::result::Result<(), ValidationError> {
    if password.len() < 6 {
        return Err(ValidationError::new("password_too_short")
            .with_message("Password must be at least 6 characters".into()));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(ValidationError::new("password_no_lowercase")
            .with_message("Password must contain lowercase letter".into()));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::new("password_no_uppercase")
            .with_message("Password must contain uppercase letter".into()));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new("password_no_digit")
            .with_message("Password must contain number".into()));
    }
    Ok(())
}

/// Response to register/login: opaque bearer credential plus the account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: Account,
    #[serde(default)]
    pub message: String,
}

/// Response to a successful upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadReceipt {
    #[serde(default)]
    pub message: String,
    pub note: Note,
    /// Updated balance, confirmed server-side
    pub credits: u32,
}

/// Response to a paid download request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadReceipt {
    #[serde(default)]
    pub message: String,
    /// Updated balance, confirmed server-side
    pub credits: u32,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
}

/// The REST collaborator the client consumes
///
/// Exact wire shapes are the collaborator's concern; this trait pins down
/// the operations and their outcomes.
#[async_trait]
pub trait NotesApi: Send + Sync {
    // Authentication
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse>;
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse>;
    async fn current_account(&self) -> Result<Account>;

    // Catalog
    async fn list_universities(&self) -> Result<Vec<University>>;
    async fn create_university(&self, name: &str) -> Result<University>;
    async fn add_stream(&self, university_id: &str, stream_name: &str) -> Result<University>;

    // Notes
    async fn list_notes(&self, filters: &NoteFilters) -> Result<Vec<Note>>;
    async fn get_note(&self, note_id: &str) -> Result<Note>;
    async fn upload_note(&self, upload: &ValidatedUpload) -> Result<UploadReceipt>;
    async fn download_note(&self, note_id: &str) -> Result<DownloadReceipt>;
    async fn delete_note(&self, note_id: &str) -> Result<()>;

    // Profile
    async fn user_uploads(&self) -> Result<Vec<Note>>;
    async fn user_downloads(&self) -> Result<Vec<Note>>;
    async fn user_stats(&self) -> Result<UserStats>;

    // Explore & statistics
    async fn featured_notes(&self, filter: FeaturedFilter, limit: u32) -> Result<Vec<Note>>;
    async fn university_stats(&self, university: &str) -> Result<UniversityStats>;
    async fn platform_stats(&self) -> Result<PlatformStats>;
}
