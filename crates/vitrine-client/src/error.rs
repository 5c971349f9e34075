//! # Client Error Types
//!
//! Errors raised outside the store: configuration, HTTP client setup, and
//! the upload widget boundary.
//!
//! CRUD failures never show up here. They are normalized to a `String` and
//! stored in `ProductListState.error`.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   HTTP Client   │  │     Upload Widget       │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  HttpClient     │  │  MissingCloudName       │ │
//! │  │  InvalidUrl     │  │                 │  │  MissingUploadPreset    │ │
//! │  │  ConfigLoad/Save│  │                 │  │  NotInitialized         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Client error type.
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid client configuration.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// Invalid API base URL.
    #[error("Invalid API base URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Transport Setup Errors
    // =========================================================================
    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    // =========================================================================
    // Upload Errors
    // =========================================================================
    #[error(transparent)]
    Upload(#[from] UploadError),
}

/// Errors at the upload widget boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// No cloud name configured.
    #[error("Upload widget is missing its cloud name")]
    MissingCloudName,

    /// No upload preset configured.
    #[error("Upload widget is missing its upload preset")]
    MissingUploadPreset,

    /// `open()` was called before the widget was created.
    #[error("Upload widget is not initialized")]
    NotInitialized,

    /// The upload library went away before it became ready.
    #[error("Upload provider unavailable")]
    ProviderUnavailable,

    /// The upload library refused to create or open the widget.
    #[error("Upload widget failed: {0}")]
    Widget(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::HttpClient(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidConfig(_)
                | ClientError::InvalidUrl(_)
                | ClientError::ConfigLoadFailed(_)
                | ClientError::ConfigSaveFailed(_)
                | ClientError::Upload(UploadError::MissingCloudName)
                | ClientError::Upload(UploadError::MissingUploadPreset)
        )
    }
}
