//! # Failure Normalization
//!
//! Every failed operation ends up as one string in `ProductListState.error`.
//!
//! ```text
//! transport threw   ──► Failure { message, error }
//! status != 200     ──► Failure { message: body.error }
//! bad 200 payload   ──► Failure::default()
//!
//! normalize: message ─(empty)─► error ─(empty)─► operation fallback
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::action::Operation;

/// A failure as raised by the transport layer or the status check.
///
/// Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl Failure {
    pub fn with_message(message: impl Into<String>) -> Self {
        Failure {
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn with_error(error: impl Into<String>) -> Self {
        Failure {
            message: None,
            error: Some(error.into()),
        }
    }

    /// Failure raised for a response whose status is not 200.
    ///
    /// Carries the body's `error` field as the message.
    pub fn from_response_body(body: &Value) -> Self {
        let message = body
            .get("error")
            .and_then(|e| match e {
                Value::String(s) => Some(s.clone()),
                Value::Null => None,
                other => Some(other.to_string()),
            });
        Failure {
            message,
            error: None,
        }
    }

    /// Collapses the failure into the string stored in the store.
    pub fn normalize(&self, operation: Operation) -> String {
        present(&self.message)
            .or_else(|| present(&self.error))
            .unwrap_or(operation.fallback_message())
            .to_string()
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
