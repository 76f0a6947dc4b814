//! Noteshare Client Library
//!
//! The asynchronous client surface of the notes exchange platform:
//! - REST collaborator wrapper (`NotesApi` trait + reqwest implementation)
//! - Credential storage (fixed-key bearer token, released on 401)
//! - Session context owning credits and the anonymous attempt counter
//! - Catalog browser with last-request-wins staleness handling
//! - Configuration and metrics

pub mod api;
pub mod browse;
pub mod config;
pub mod metrics;
pub mod session;
pub mod token;

// Re-export commonly used types
pub use api::{AuthResponse, DownloadReceipt, HttpApi, NotesApi, UploadReceipt};
pub use browse::CatalogBrowser;
pub use config::ClientConfig;
pub use session::{DownloadGrant, Session};
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
