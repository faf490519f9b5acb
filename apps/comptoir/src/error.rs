//! # Application Errors
//!
//! Error types for the order commands, settings loading and the binary.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Comptoir                               │
//! │                                                                         │
//! │  Order surface             Rust backend                                 │
//! │  ─────────────             ────────────                                 │
//! │                                                                         │
//! │  update_quantity(line, 0)                                               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command → Result<T, ApiError>                                   │  │
//! │  │         │                                                        │  │
//! │  │  ValidationError ── CoreError::Validation ──┐                   │  │
//! │  │  PricingError (NaN total) ──────────────────┼──► ApiError ─────►│  │
//! │  │  CoreError::LineNotFound ───────────────────┘                   │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "VALIDATION_ERROR",                                          │
//! │    "message": "quantity must be between 1 and 9999" }                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use comptoir_core::{CoreError, PricingError, ValidationError};

// =============================================================================
// API Error
// =============================================================================

/// Error returned from commands, serializable for the frontend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Line or catalog item not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Totals are not displayable (NaN / infinity)
    PricingError,

    /// Order rule violated (empty order, too many lines)
    OrderError,

    /// Settings could not be loaded
    ConfigError,

    /// Internal error
    Internal,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::LineNotFound(id) => ApiError::not_found("Order line", &id),
            CoreError::ItemNotFound(id) => ApiError::not_found("Catalog item", &id),
            CoreError::CartTooLarge { .. } | CoreError::EmptyOrder => {
                ApiError::new(ErrorCode::OrderError, err.to_string())
            }
            CoreError::NumberingExhausted(_) => ApiError::internal(err.to_string()),
            CoreError::Validation(e) => e.into(),
            CoreError::Pricing(e) => e.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<PricingError> for ApiError {
    fn from(err: PricingError) -> Self {
        ApiError::new(ErrorCode::PricingError, err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Config Error
// =============================================================================

/// Settings file problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid config: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Default VAT rate '{0}' is not in the tax rate table")]
    UnknownDefaultRate(String),
}

// =============================================================================
// Run Error
// =============================================================================

/// Failures of the `comptoir` binary.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("usage: comptoir <order.json>")]
    Usage,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to read order file {path}: {source}")]
    ReadOrder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid order file: {0}")]
    ParseOrder(#[from] serde_json::Error),

    #[error("{0}")]
    Api(#[from] ApiError),
}

// =============================================================================
// Unit Tests
// =============================================================================
