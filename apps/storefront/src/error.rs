//! # Error Types
//!
//! `ApiError` is what commands return; `StartupError` is what can stop the
//! storefront from booting.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Startup (fatal)                 After startup (never fatal)           │
//! │  ───────────────                 ───────────────────────────           │
//! │  config unreadable ─┐            unknown product ──► NOT_FOUND         │
//! │  config invalid ────┼─► StartupError                                   │
//! │  catalog file bad ──┘            bad category ─────► VALIDATION_ERROR  │
//! │                                                                         │
//! │                                  cart write fails ─► warning Notice    │
//! │                                                      (no ApiError)     │
//! │                                                                         │
//! │  View receives:  { "code": "NOT_FOUND", "message": "Product not found: 42" }
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crafts_core::{CoreError, ValidationError};
use crafts_store::StoreError;

// =============================================================================
// API Error
// =============================================================================

/// Error returned from storefront commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 42"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Cart operation not possible (e.g. checkout of an empty cart)
    CartError,

    /// Storage read/write failed
    StorageError,

    /// A background service is gone (carousel shut down)
    Unavailable,

    /// Anything else
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Unavailable, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", id),
            CoreError::EmptyCart => ApiError::new(ErrorCode::CartError, "Cart is empty"),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts storage errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Catalog(core) => core.into(),
            StoreError::InvalidKey(key) => {
                ApiError::validation(format!("Invalid storage key: '{}'", key))
            }
            other => {
                // Log the actual error but return a generic message
                tracing::error!(error = %other, "Storage operation failed");
                ApiError::new(ErrorCode::StorageError, "Storage operation failed")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for commands.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Startup Error
// =============================================================================

/// Failures that stop the storefront from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("No config path available")]
    NoConfigPath,

    #[error("Failed to load catalog: {0}")]
    Catalog(#[source] StoreError),

    #[error("Failed to open storage: {0}")]
    Storage(#[source] StoreError),
}

pub type StartupResult<T> = Result<T, StartupError>;
