//! Noteshare Core Library
//!
//! Domain model shared by every Noteshare client surface:
//! - Catalog taxonomy (university → stream → class → subject) and navigation
//! - Note and account records
//! - Credit-gated access policy
//! - Upload validation pipeline
//! - Error types and handling

pub mod catalog;
pub mod errors;
pub mod models;
pub mod policy;
pub mod upload;

// Re-export commonly used types
pub use catalog::{Catalog, TaxonomyChoice};
pub use errors::{AppError, Result};
pub use models::{Account, FileKind, Note, NoteFilters, University};
pub use policy::{AccessPolicy, AuthState, DownloadDecision};
pub use upload::NoteSubmission;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Credits granted to every account on registration
pub const INITIAL_CREDITS: u32 = 5;

/// Credits earned per accepted upload
pub const UPLOAD_CREDIT_REWARD: u32 = 1;

/// Credits spent per paid download
pub const DOWNLOAD_CREDIT_COST: u32 = 1;

/// Maximum accepted upload size (50 MiB)
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Storage key under which the bearer credential is persisted
pub const TOKEN_STORAGE_KEY: &str = "authToken";
