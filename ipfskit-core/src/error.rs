//! Error types for IpfsKit.
//!
//! Every failure the client can hit, from a malformed hash string to a node
//! answering with an error body, is one variant of [`IpfsKitError`].

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using `IpfsKitError`.
pub type Result<T> = std::result::Result<T, IpfsKitError>;

/// Main error type for all IpfsKit operations.
#[derive(Debug, Error)]
pub enum IpfsKitError {
    // ═══════════════════════════════════════════════════════════════════════════
    // HASH ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Hash string is not valid base58 or not a valid multihash.
    #[error("Invalid hash '{hash}': {reason}")]
    InvalidHash { hash: String, reason: String },

    // ═══════════════════════════════════════════════════════════════════════════
    // API ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The node answered with a non-success status.
    #[error("IPFS API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The node answered with a body we could not interpret.
    #[error("Invalid response from IPFS API: {0}")]
    InvalidResponse(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Content decoded as JSON but is not an object.
    #[error("Content of '{hash}' is not a JSON object (found {found})")]
    NotJsonObject { hash: String, found: &'static str },

    // ═══════════════════════════════════════════════════════════════════════════
    // NETWORK ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Request did not complete within the configured timeout.
    #[error("IPFS API timeout after {seconds}s")]
    Timeout { seconds: u64 },

    // ═══════════════════════════════════════════════════════════════════════════
    // STORAGE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Local file could not be read.
    #[error("Failed to read '{}': {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File I/O error.
    ///
    /// The client itself reports reads as [`FileRead`](Self::FileRead);
    /// this variant lets callers `?` a bare `std::io::Error` into [`Result`].
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl IpfsKitError {
    /// Creates an [`IpfsKitError::InvalidHash`] for the given input.
    pub fn invalid_hash(hash: impl Into<String>, reason: impl ToString) -> Self {
        IpfsKitError::InvalidHash {
            hash: hash.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns true if this error is recoverable (can retry).
    pub fn is_recoverable(&self) -> bool {
        match self {
            IpfsKitError::HttpError(_) | IpfsKitError::Timeout { .. } => true,
            IpfsKitError::ApiError { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns true if the caller's input was at fault.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            IpfsKitError::InvalidHash { .. }
                | IpfsKitError::FileRead { .. }
                | IpfsKitError::ConfigError(_)
        )
    }
}
