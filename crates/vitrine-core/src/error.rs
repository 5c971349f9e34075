//! # Error Types
//!
//! Domain-specific error types for vitrine-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vitrine-core errors (this file)                                       │
//! │  ├── CoreError        - Payload decoding                               │
//! │  └── ValidationError  - Presence checks on ids, forms, queries         │
//! │                                                                         │
//! │  vitrine-client errors (separate crate)                                │
//! │  ├── ClientError      - Config, URL, HTTP client construction          │
//! │  └── UploadError      - Upload widget boundary                         │
//! │                                                                         │
//! │  Store boundary                                                        │
//! │  └── String           - What ProductListState.error holds              │
//! │                                                                         │
//! │  Flow: ValidationError | CoreError → Failure → String → state.error    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A 200 response whose body does not have the expected shape.
    ///
    /// ## When This Occurs
    /// - Detail/create/edit body without a `data` object
    /// - `data` object without an `_id`
    /// - List body that is neither an array nor `{ data: [...] }`
    #[error("Unexpected {operation} payload: {reason}")]
    Decode { operation: String, reason: String },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Presence checks only. Field-level schema rules belong to the server.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_message() {
        let err = CoreError::Decode {
            operation: "detail".to_string(),
            reason: "missing field `data`".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unexpected detail payload: missing field `data`"
        );
    }

    #[test]
    fn test_validation_messages() {
        let required = ValidationError::Required {
            field: "id".to_string(),
        };
        assert_eq!(required.to_string(), "id is required");

        let range = ValidationError::OutOfRange {
            field: "page".to_string(),
            min: 1,
            max: i64::from(u32::MAX),
        };
        assert!(range.to_string().starts_with("page must be between 1 and"));
    }
}
