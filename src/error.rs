//! Error types for the cache adapter
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache providers, serializers and TTL conversion.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Provider could not be configured (e.g. no backing store supplied)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Requested backing representation is not one the providers support
    #[error("Unsupported cache representation '{requested}': must be one of {allowed}")]
    UnsupportedRepresentation { requested: String, allowed: String },

    /// Store options set none of the recognized expiration fields
    #[error("Unrecognized store options: {0}")]
    UnrecognizedOptions(String),

    /// Value could not be encoded or decoded without losing the miss/hit distinction
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Cancellation was requested before the store call was issued
    #[error("Operation cancelled before reaching the backing store")]
    Cancelled,

    /// Failure reported by the backing store, passed through untouched
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl CacheError {
    /// Returns true for errors raised while building a provider.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            CacheError::Configuration(_) | CacheError::UnsupportedRepresentation { .. }
        )
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Serialization(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for CacheError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        CacheError::Serialization(format!("stored bytes are not valid UTF-8: {}", err))
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache adapter.
pub type Result<T> = std::result::Result<T, CacheError>;
