//! # vitrine-core: Pure Product State for Vitrine Admin
//!
//! This crate is the **heart** of the admin client. It holds the product
//! store state and every transition on it as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Vitrine Admin Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 UI binding / vitrine-admin CLI                  │   │
//! │  │      List view ──► Detail view ──► Edit form ──► Upload        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          vitrine-client (ProductStore, ProductService)          │   │
//! │  │     issues REST calls, runs effects, dispatches actions        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ ProductAction                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ vitrine-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   state   │  │  reducer  │  │  effect   │  │   │
//! │  │   │  Product  │  │ ListState │  │  reduce() │  │  Notify   │  │   │
//! │  │   │   Query   │  │ RequestId │  │  phases   │  │  Refetch  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ProductId, ProductQuery, pages)
//! - [`state`] - The store snapshot (`ProductListState`)
//! - [`action`] - Actions and operation phases
//! - [`reducer`] - The pure `(state, action) -> state` transition
//! - [`effect`] - Post-mutation effects returned as data
//! - [`failure`] - Failure normalization into a single message
//! - [`validation`] - Presence checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use vitrine_core::{reduce, Operation, OperationOutput, Product, ProductAction};
//! use vitrine_core::{ProductListState, RequestId};
//!
//! let state = ProductListState::default();
//! let request_id = RequestId::new();
//!
//! let state = reduce(state, ProductAction::Pending { request_id, operation: Operation::Create });
//! assert!(state.loading);
//!
//! let created = Product::new("p-1").with_field("name", "Linen Shirt");
//! let state = reduce(
//!     state,
//!     ProductAction::Fulfilled { request_id, output: OperationOutput::Created(created) },
//! );
//! assert!(!state.loading);
//! assert!(state.success);
//! assert_eq!(state.product_list.len(), 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod action;
pub mod effect;
pub mod error;
pub mod failure;
pub mod reducer;
pub mod state;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use action::{Operation, OperationOutput, ProductAction};
pub use effect::{Effect, Resolved};
pub use error::{CoreError, CoreResult, ValidationError};
pub use failure::Failure;
pub use reducer::reduce;
pub use state::{ProductListState, RequestId};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Page requested by the list refetch that follows a create or delete.
pub const FIRST_PAGE: u32 = 1;

/// Page count used when the server does not report one.
pub const DEFAULT_TOTAL_PAGE_NUM: u32 = 1;

/// Collection path of the product REST resource.
pub const PRODUCT_RESOURCE: &str = "/product";
