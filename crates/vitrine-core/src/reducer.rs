//! # Product Reducer
//!
//! The only way `ProductListState` changes.
//!
//! ## Transition Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Phase       │ Shared fields                  │ Operation-specific      │
//! │  ─────────── │ ────────────────────────────── │ ─────────────────────── │
//! │  pending     │ in_flight += id, loading=true  │ mutation: success=false │
//! │              │ error=""                       │ read: latest_* = id     │
//! │  fulfilled   │ in_flight -= id, error=""      │ list:   replace list    │
//! │              │                                │ detail: replace selected│
//! │              │                                │ create: append (upsert) │
//! │              │                                │ edit:   replace match   │
//! │              │                                │ delete: remove match    │
//! │              │                                │ mutation: success=true  │
//! │  rejected    │ in_flight -= id, error=message │ mutation: success=false │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A read (list/detail) that settles after a newer read of the same kind was
//! issued only leaves the in-flight set; its data and error are dropped.

use crate::action::{Operation, OperationOutput, ProductAction};
use crate::state::{ProductListState, RequestId};
use crate::types::{Product, ProductDetail, ProductId, ProductPage};

/// Applies `action` to `state` and returns the next state.
pub fn reduce(mut state: ProductListState, action: ProductAction) -> ProductListState {
    match action {
        ProductAction::SetSelectedProduct(product) => {
            state.selected_product = product;
        }
        ProductAction::SetFilteredList(products) => {
            state.filtered_list = Some(products);
        }
        ProductAction::ClearError => {
            state.error.clear();
            state.success = false;
        }
        ProductAction::Pending {
            request_id,
            operation,
        } => {
            state.begin(request_id);
            state.error.clear();
            match operation {
                Operation::List => state.latest_list_request = Some(request_id),
                Operation::Detail => state.latest_detail_request = Some(request_id),
                Operation::Create | Operation::Edit | Operation::Delete => state.success = false,
            }
        }
        ProductAction::Fulfilled { request_id, output } => {
            let stale = is_stale_read(&state, request_id, output.operation());
            state.settle(request_id);
            if stale {
                return state;
            }
            state.error.clear();
            match output {
                OperationOutput::List(page) => apply_page(&mut state, page),
                OperationOutput::Detail(detail) => apply_detail(&mut state, detail),
                OperationOutput::Created(product) => {
                    apply_created(&mut state, product);
                    state.success = true;
                }
                OperationOutput::Edited(product) => {
                    apply_edited(&mut state, product);
                    state.success = true;
                }
                OperationOutput::Deleted(id) => {
                    apply_deleted(&mut state, &id);
                    state.success = true;
                }
            }
        }
        ProductAction::Rejected {
            request_id,
            operation,
            message,
        } => {
            let stale = is_stale_read(&state, request_id, operation);
            state.settle(request_id);
            if stale {
                return state;
            }
            state.error = message;
            if operation.is_mutation() {
                state.success = false;
            }
        }
    }
    state
}

fn is_stale_read(state: &ProductListState, request_id: RequestId, operation: Operation) -> bool {
    let latest = match operation {
        Operation::List => state.latest_list_request,
        Operation::Detail => state.latest_detail_request,
        _ => return false,
    };
    matches!(latest, Some(latest) if latest != request_id)
}

fn apply_page(state: &mut ProductListState, page: ProductPage) {
    state.product_list = page.products;
    state.total_page_num = page.total_page_num.max(1);
}

fn apply_detail(state: &mut ProductListState, detail: ProductDetail) {
    state.selected_product = Some(detail.product);
    if let Some(total) = detail.total_page_num {
        state.total_page_num = total.max(1);
    }
}

fn apply_created(state: &mut ProductListState, product: Product) {
    match state.product_list.iter_mut().find(|p| p.id == product.id) {
        Some(existing) => *existing = product,
        None => state.product_list.push(product),
    }
}

fn apply_edited(state: &mut ProductListState, product: Product) {
    if let Some(index) = state.product_list.iter().position(|p| p.id == product.id) {
        state.product_list[index] = product.clone();
        let mut seen = false;
        let id = &product.id;
        state.product_list.retain(|p| {
            if &p.id != id {
                return true;
            }
            let keep = !seen;
            seen = true;
            keep
        });
    }

    if matches!(state.selected_product, Some(ref selected) if selected.id == product.id) {
        state.selected_product = Some(product);
    }
}

fn apply_deleted(state: &mut ProductListState, id: &ProductId) {
    state.product_list.retain(|p| &p.id != id);
    if matches!(state.selected_product, Some(ref selected) if &selected.id == id) {
        state.selected_product = None;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
