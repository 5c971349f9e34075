//! # Store State
//!
//! The single snapshot the UI renders from.
//!
//! ## In-Flight Tracking
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Correlation Ids on Shared Flags                      │
//! │                                                                         │
//! │  create#A pending ──► in_flight = [A]          loading = true           │
//! │  list#B   pending ──► in_flight = [A, B]       loading = true           │
//! │  create#A settles ──► in_flight = [B]          loading = true           │
//! │  list#B   settles ──► in_flight = []           loading = false          │
//! │                                                                         │
//! │  A read that settles after a newer read of the same kind was issued    │
//! │  is stale: its data is dropped, only its in-flight entry is cleared.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Product;
use crate::DEFAULT_TOTAL_PAGE_NUM;

// =============================================================================
// Request Id
// =============================================================================

/// Correlation id attached to one issued operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Generates a fresh random id.
    pub fn new() -> Self {
        RequestId(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Product List State
// =============================================================================

/// Store-owned snapshot of the product screens.
///
/// ## Invariants
/// - `loading == !in_flight.is_empty()`
/// - `product_list` is unique by id after every create/edit/delete
/// - `total_page_num >= 1`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListState {
    /// Products in server order.
    pub product_list: Vec<Product>,

    /// Product shown in the detail/edit view.
    pub selected_product: Option<Product>,

    /// Client-side filtered view of the list, set by the UI.
    pub filtered_list: Option<Vec<Product>>,

    /// True while any tracked operation is in flight.
    pub loading: bool,

    /// Last normalized failure; empty when there is none.
    pub error: String,

    /// Page count reported by the last list (or detail) response.
    pub total_page_num: u32,

    /// True after a create/edit/delete completed.
    pub success: bool,

    /// Operations between their pending and settled phases.
    pub in_flight: Vec<RequestId>,

    /// Most recently issued list fetch.
    pub latest_list_request: Option<RequestId>,

    /// Most recently issued detail fetch.
    pub latest_detail_request: Option<RequestId>,
}

impl Default for ProductListState {
    fn default() -> Self {
        ProductListState {
            product_list: Vec::new(),
            selected_product: None,
            filtered_list: None,
            loading: false,
            error: String::new(),
            total_page_num: DEFAULT_TOTAL_PAGE_NUM,
            success: false,
            in_flight: Vec::new(),
            latest_list_request: None,
            latest_detail_request: None,
        }
    }
}

impl ProductListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self, request_id: RequestId) -> bool {
        self.in_flight.contains(&request_id)
    }

    pub(crate) fn begin(&mut self, request_id: RequestId) {
        if !self.in_flight.contains(&request_id) {
            self.in_flight.push(request_id);
        }
        self.loading = true;
    }

    pub(crate) fn settle(&mut self, request_id: RequestId) {
        self.in_flight.retain(|id| *id != request_id);
        self.loading = !self.in_flight.is_empty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = ProductListState::default();
        assert!(state.product_list.is_empty());
        assert!(state.selected_product.is_none());
        assert!(!state.loading);
        assert_eq!(state.error, "");
        assert_eq!(state.total_page_num, 1);
        assert!(!state.success);
    }

    #[test]
    fn test_snapshot_is_camel_case() {
        let value = serde_json::to_value(ProductListState::default()).unwrap();
        assert!(value.get("productList").is_some());
        assert!(value.get("selectedProduct").is_some());
        assert!(value.get("totalPageNum").is_some());
    }

    #[test]
    fn test_begin_and_settle_track_loading() {
        let mut state = ProductListState::default();
        let a = RequestId::new();
        let b = RequestId::new();

        state.begin(a);
        state.begin(b);
        state.settle(a);
        assert!(state.loading);
        assert!(state.is_in_flight(b));

        state.settle(b);
        assert!(!state.loading);
    }
}
