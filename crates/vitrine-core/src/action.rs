//! # Store Actions
//!
//! Everything the reducer understands.
//!
//! ## Phase Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 One Async Operation (list/detail/create/...)            │
//! │                                                                         │
//! │   idle ──► Pending { request_id, operation }                            │
//! │                 │                                                       │
//! │                 │  transport call (suspension point)                    │
//! │                 │                                                       │
//! │          ┌──────┴──────────────────────────┐                           │
//! │          ▼                                 ▼                            │
//! │   Fulfilled { request_id, output }   Rejected { request_id, message }  │
//! │          │                                 │                            │
//! │          └──────────────► idle ◄───────────┘                            │
//! │                                                                         │
//! │  Synchronous actions: SetSelectedProduct, SetFilteredList, ClearError  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::state::RequestId;
use crate::types::{Product, ProductDetail, ProductId, ProductPage};

// =============================================================================
// Operation
// =============================================================================

/// The five asynchronous product operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    List,
    Detail,
    Create,
    Edit,
    Delete,
}

impl Operation {
    /// Create, edit and delete drive the `success` flag; reads do not.
    pub fn is_mutation(&self) -> bool {
        matches!(self, Operation::Create | Operation::Edit | Operation::Delete)
    }

    /// Message stored in `error` when a failure carries no text of its own.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Operation::List => "failed to fetch product list",
            Operation::Detail => "failed to fetch product detail",
            Operation::Create => "failed to create product",
            Operation::Edit => "failed to update product",
            Operation::Delete => "failed to delete product",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::List => write!(f, "list"),
            Operation::Detail => write!(f, "detail"),
            Operation::Create => write!(f, "create"),
            Operation::Edit => write!(f, "edit"),
            Operation::Delete => write!(f, "delete"),
        }
    }
}

// =============================================================================
// Operation Output
// =============================================================================

/// The fulfilled value of each operation.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationOutput {
    List(ProductPage),
    Detail(ProductDetail),
    Created(Product),
    Edited(Product),
    /// Delete resolves to the id it was asked to delete, not a server body.
    Deleted(ProductId),
}

impl OperationOutput {
    pub fn operation(&self) -> Operation {
        match self {
            OperationOutput::List(_) => Operation::List,
            OperationOutput::Detail(_) => Operation::Detail,
            OperationOutput::Created(_) => Operation::Create,
            OperationOutput::Edited(_) => Operation::Edit,
            OperationOutput::Deleted(_) => Operation::Delete,
        }
    }
}

// =============================================================================
// Product Action
// =============================================================================

/// An input to [`crate::reduce`].
#[derive(Debug, Clone, PartialEq)]
pub enum ProductAction {
    /// Replaces `selected_product`.
    SetSelectedProduct(Option<Product>),

    /// Replaces `filtered_list`.
    SetFilteredList(Vec<Product>),

    /// Clears `error` and `success`.
    ClearError,

    /// An operation was issued and its transport call is about to start.
    Pending {
        request_id: RequestId,
        operation: Operation,
    },

    /// An operation resolved successfully.
    Fulfilled {
        request_id: RequestId,
        output: OperationOutput,
    },

    /// An operation failed; `message` is already normalized.
    Rejected {
        request_id: RequestId,
        operation: Operation,
        message: String,
    },
}

impl ProductAction {
    /// Short name used in logs, e.g. `create/pending`.
    pub fn kind(&self) -> String {
        match self {
            ProductAction::SetSelectedProduct(_) => "setSelectedProduct".to_string(),
            ProductAction::SetFilteredList(_) => "setFilteredList".to_string(),
            ProductAction::ClearError => "clearError".to_string(),
            ProductAction::Pending { operation, .. } => format!("{}/pending", operation),
            ProductAction::Fulfilled { output, .. } => format!("{}/fulfilled", output.operation()),
            ProductAction::Rejected { operation, .. } => format!("{}/rejected", operation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutations() {
        assert!(Operation::Create.is_mutation());
        assert!(Operation::Edit.is_mutation());
        assert!(Operation::Delete.is_mutation());
        assert!(!Operation::List.is_mutation());
        assert!(!Operation::Detail.is_mutation());
    }

    #[test]
    fn test_action_kind() {
        let action = ProductAction::Rejected {
            request_id: RequestId::new(),
            operation: Operation::Delete,
            message: "gone".into(),
        };
        assert_eq!(action.kind(), "delete/rejected");

        let action = ProductAction::Fulfilled {
            request_id: RequestId::new(),
            output: OperationOutput::Deleted(ProductId::from("5")),
        };
        assert_eq!(action.kind(), "delete/fulfilled");
    }
}
