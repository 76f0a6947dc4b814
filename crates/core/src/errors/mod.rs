//! Error types for the Noteshare client
//!
//! Provides a comprehensive error handling system with:
//! - Distinct error types for different failure modes
//! - Machine-readable error codes
//! - Classification helpers (validation / auth / business / transport)

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Error codes for machine-readable error identification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors (1xxx)
    ValidationError,
    MissingField,
    InvalidFileType,
    FileTooLarge,

    // Authentication errors (2xxx)
    Unauthorized,
    LoginRequired,
    SessionExpired,

    // Business-rule rejections (3xxx)
    InsufficientCredits,
    Rejected,
    Duplicate,

    // Resource errors (4xxx)
    NotFound,
    NoteNotFound,
    UniversityNotFound,

    // Transport errors (5xxx)
    TransportError,
    UpstreamError,

    // Local storage errors (6xxx)
    StorageError,

    // Internal errors (9xxx)
    InternalError,
    ConfigurationError,
    SerializationError,
}

impl ErrorCode {
    /// Get the numeric code for this error
    pub fn as_code(&self) -> u16 {
        match self {
            // Validation (1xxx)
            ErrorCode::ValidationError => 1001,
            ErrorCode::MissingField => 1002,
            ErrorCode::InvalidFileType => 1003,
            ErrorCode::FileTooLarge => 1004,

            // Auth (2xxx)
            ErrorCode::Unauthorized => 2001,
            ErrorCode::LoginRequired => 2002,
            ErrorCode::SessionExpired => 2003,

            // Business (3xxx)
            ErrorCode::InsufficientCredits => 3001,
            ErrorCode::Rejected => 3002,
            ErrorCode::Duplicate => 3003,

            // Resources (4xxx)
            ErrorCode::NotFound => 4001,
            ErrorCode::NoteNotFound => 4002,
            ErrorCode::UniversityNotFound => 4003,

            // Transport (5xxx)
            ErrorCode::TransportError => 5001,
            ErrorCode::UpstreamError => 5002,

            // Storage (6xxx)
            ErrorCode::StorageError => 6001,

            // Internal (9xxx)
            ErrorCode::InternalError => 9001,
            ErrorCode::ConfigurationError => 9002,
            ErrorCode::SerializationError => 9003,
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors (caught before any request is sent)
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("Required field missing: {field}")]
    MissingField { field: String },

    #[error("Unsupported file type: {content_type}")]
    InvalidFileType { content_type: String },

    #[error("File too large: {size} bytes exceeds limit of {limit} bytes")]
    FileTooLarge { size: u64, limit: u64 },

    // Authentication errors
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Login required to continue downloading")]
    LoginRequired,

    #[error("Session expired, please login again")]
    SessionExpired,

    // Business-rule rejections
    #[error("Insufficient credits: balance is {balance}")]
    InsufficientCredits { balance: u32 },

    #[error("{message}")]
    Rejected { message: String },

    #[error("Duplicate resource: {message}")]
    Duplicate { message: String },

    // Resource errors
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound { resource_type: String, id: String },

    #[error("Note not found: {id}")]
    NoteNotFound { id: String },

    #[error("University not found: {name}")]
    UniversityNotFound { name: String },

    // Transport errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    // Local storage errors
    #[error("Credential storage error: {message}")]
    Storage { message: String },

    // Internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Generic
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { .. } => ErrorCode::ValidationError,
            AppError::MissingField { .. } => ErrorCode::MissingField,
            AppError::InvalidFileType { .. } => ErrorCode::InvalidFileType,
            AppError::FileTooLarge { .. } => ErrorCode::FileTooLarge,
            AppError::Unauthorized { .. } => ErrorCode::Unauthorized,
            AppError::LoginRequired => ErrorCode::LoginRequired,
            AppError::SessionExpired => ErrorCode::SessionExpired,
            AppError::InsufficientCredits { .. } => ErrorCode::InsufficientCredits,
            AppError::Rejected { .. } => ErrorCode::Rejected,
            AppError::Duplicate { .. } => ErrorCode::Duplicate,
            AppError::NotFound { .. } => ErrorCode::NotFound,
            AppError::NoteNotFound { .. } => ErrorCode::NoteNotFound,
            AppError::UniversityNotFound { .. } => ErrorCode::UniversityNotFound,
            AppError::HttpClient(_) => ErrorCode::TransportError,
            AppError::Upstream { .. } => ErrorCode::UpstreamError,
            AppError::Storage { .. } => ErrorCode::StorageError,
            AppError::Internal { .. } => ErrorCode::InternalError,
            AppError::Configuration { .. } => ErrorCode::ConfigurationError,
            AppError::Serialization(_) => ErrorCode::SerializationError,
            AppError::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Validation errors are reported inline and never sent over the boundary
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::Validation { .. }
                | AppError::MissingField { .. }
                | AppError::InvalidFileType { .. }
                | AppError::FileTooLarge { .. }
        )
    }

    /// Authorization failures force de-authentication of the session
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            AppError::Unauthorized { .. } | AppError::SessionExpired
        )
    }

    /// Transport errors may be re-triggered by the user; nothing retries
    /// automatically
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::HttpClient(_))
    }
}

/// Structured error payload returned by the collaborator
#[derive(Debug, Serialize, Deserialize)]
pub struct ServerError {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ServerError {
    /// The server's message, verbatim, with a generic fallback
    pub fn into_message(self) -> String {
        self.error
            .or(self.message)
            .unwrap_or_else(|| "Something went wrong. Please try again.".to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_mapping() {
        let err = AppError::NoteNotFound { id: "test".into() };
        assert_eq!(err.code(), ErrorCode::NoteNotFound);
        assert_eq!(err.code().as_code(), 4002);
    }

    #[test]
    fn test_validation_classification() {
        let err = AppError::MissingField {
            field: "subject".into(),
        };
        assert!(err.is_validation());
        assert!(!err.is_auth_failure());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_auth_classification() {
        assert!(AppError::SessionExpired.is_auth_failure());
        assert!(!AppError::LoginRequired.is_auth_failure());
    }

    #[test]
    fn test_server_error_verbatim() {
        let payload = ServerError {
            error: Some("Insufficient credits. Upload notes to earn more!".into()),
            message: None,
        };
        assert_eq!(
            payload.into_message(),
            "Insufficient credits. Upload notes to earn more!"
        );
    }

    #[test]
    fn test_server_error_fallback() {
        let payload = ServerError {
            error: None,
            message: None,
        };
        assert_eq!(
            payload.into_message(),
            "Something went wrong. Please try again."
        );
    }
}
