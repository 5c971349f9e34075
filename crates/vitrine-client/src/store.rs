//! # Product Store
//!
//! Owns the `ProductListState`, issues product operations, and runs their
//! effects.
//!
//! ## Dispatch Order for One Operation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     create(form)                                        │
//! │                                                                         │
//! │  1. dispatch Pending(create#A)            loading = true               │
//! │  2. service.create(form).await            only suspension point        │
//! │  3. run effects, in order                                              │
//! │       Notify("Product created")  ──►  notifier                         │
//! │       RefetchList(page 1)        ──►  dispatch Pending(list#B)         │
//! │                                       spawn list#B as its own task     │
//! │  4. dispatch Fulfilled(create#A)          loading stays true (B)       │
//! │  ...                                                                    │
//! │  5. list#B settles                        loading = false              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! The state sits behind a `std::sync::Mutex` that is only held while the
//! reducer runs, never across an `.await`. The store is cheap to clone and
//! every clone shares the same state.
//!
//! ## Follow-ups
//! Refetches run as detached tokio tasks. A `watch` counter tracks how many
//! are still running; `settle()` only observes it, so dropping a `settle()`
//! future never aborts a refetch, and nothing is kept once a task ends.

use std::future::Future;
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use vitrine_core::{
    reduce, Effect, Operation, OperationOutput, Product, ProductAction, ProductForm, ProductId,
    ProductListState, ProductQuery, RequestId,
};

use crate::notifier::Notifier;
use crate::service::{Outcome, ProductService};
use crate::transport::Transport;

struct StoreInner {
    state: Mutex<ProductListState>,
    service: ProductService,
    notifier: Arc<dyn Notifier>,
    follow_ups: watch::Sender<usize>,
}

/// Coordinator between the product service, the reducer, and the notifier.
#[derive(Clone)]
pub struct ProductStore {
    inner: Arc<StoreInner>,
}

impl ProductStore {
    pub fn new(transport: Arc<dyn Transport>, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_service(ProductService::new(transport), notifier)
    }

    pub fn with_service(service: ProductService, notifier: Arc<dyn Notifier>) -> Self {
        ProductStore {
            inner: Arc::new(StoreInner {
                state: Mutex::new(ProductListState::default()),
                service,
                notifier,
                follow_ups: watch::channel(0).0,
            }),
        }
    }

    // =========================================================================
    // Async Operations
    // =========================================================================

    /// Fetches one page of products into `product_list`.
    pub async fn fetch_list(&self, query: ProductQuery) -> Result<(), String> {
        let call = self.inner.service.list(&query);
        self.run(Operation::List, call, OperationOutput::List).await
    }

    /// Fetches one product into `selected_product`.
    pub async fn fetch_detail(&self, id: ProductId) -> Result<(), String> {
        let call = self.inner.service.detail(&id);
        self.run(Operation::Detail, call, OperationOutput::Detail).await
    }

    pub async fn create(&self, form: ProductForm) -> Result<(), String> {
        let call = self.inner.service.create(&form);
        self.run(Operation::Create, call, OperationOutput::Created).await
    }

    pub async fn edit(&self, id: ProductId, form: ProductForm) -> Result<(), String> {
        let call = self.inner.service.edit(&id, &form);
        self.run(Operation::Edit, call, OperationOutput::Edited).await
    }

    pub async fn delete(&self, id: ProductId) -> Result<(), String> {
        let call = self.inner.service.delete(&id);
        self.run(Operation::Delete, call, OperationOutput::Deleted).await
    }

    /// Waits until no spawned follow-up (refetch) is running, including
    /// follow-ups spawned while waiting.
    ///
    /// Cancel-safe: the follow-ups keep running if this future is dropped.
    pub async fn settle(&self) {
        let mut running = self.inner.follow_ups.subscribe();
        if running.wait_for(|count| *count == 0).await.is_err() {
            error!("Follow-up counter closed while settling");
        }
    }

    /// Number of follow-up tasks that have not finished yet.
    pub fn pending_follow_ups(&self) -> usize {
        *self.inner.follow_ups.borrow()
    }

    // =========================================================================
    // Synchronous Actions
    // =========================================================================

    pub fn select_product(&self, product: Option<Product>) {
        self.dispatch(ProductAction::SetSelectedProduct(product));
    }

    pub fn set_filtered_list(&self, products: Vec<Product>) {
        self.dispatch(ProductAction::SetFilteredList(products));
    }

    pub fn clear_error(&self) {
        self.dispatch(ProductAction::ClearError);
    }

    /// Applies an action through the reducer.
    pub fn dispatch(&self, action: ProductAction) {
        debug!(action = %action.kind(), "Dispatching product action");
        let mut state = self.inner.state.lock().expect("store mutex poisoned");
        let current = std::mem::take(&mut *state);
        *state = reduce(current, action);
    }

    // =========================================================================
    // State Access
    // =========================================================================

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> ProductListState {
        self.with_state(ProductListState::clone)
    }

    /// Executes a function with read access to the state.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let count = store.with_state(|state| state.product_list.len());
    /// ```
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ProductListState) -> R,
    {
        let state = self.inner.state.lock().expect("store mutex poisoned");
        f(&state)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    async fn run<T>(
        &self,
        operation: Operation,
        call: impl Future<Output = Outcome<T>>,
        output: impl FnOnce(T) -> OperationOutput,
    ) -> Result<(), String> {
        let request_id = self.begin(operation);
        let outcome = call.await.map(|resolved| resolved.map(output));
        self.finish(request_id, operation, outcome)
    }

    fn begin(&self, operation: Operation) -> RequestId {
        let request_id = RequestId::new();
        debug!(%request_id, %operation, "Product operation started");
        self.dispatch(ProductAction::Pending {
            request_id,
            operation,
        });
        request_id
    }

    fn finish(
        &self,
        request_id: RequestId,
        operation: Operation,
        outcome: Outcome<OperationOutput>,
    ) -> Result<(), String> {
        match outcome {
            Ok(resolved) => {
                self.run_effects(resolved.effects);
                self.dispatch(ProductAction::Fulfilled {
                    request_id,
                    output: resolved.value,
                });
                info!(%request_id, %operation, "Product operation fulfilled");
                Ok(())
            }
            Err(message) => {
                self.dispatch(ProductAction::Rejected {
                    request_id,
                    operation,
                    message: message.clone(),
                });
                warn!(%request_id, %operation, error = %message, "Product operation rejected");
                Err(message)
            }
        }
    }

    fn run_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Notify(notification) => self.inner.notifier.notify(&notification),
                Effect::RefetchList(query) => self.spawn_refetch(query),
            }
        }
    }

    /// Dispatches the refetch's pending action now and runs the fetch as an
    /// independent task.
    fn spawn_refetch(&self, query: ProductQuery) {
        let request_id = self.begin(Operation::List);
        let guard = FollowUpGuard::enter(self.clone());
        tokio::spawn(async move {
            let store = &guard.store;
            let outcome = store.inner.service.list(&query).await;
            let outcome = outcome.map(|resolved| resolved.map(OperationOutput::List));
            if let Err(message) = store.finish(request_id, Operation::List, outcome) {
                debug!(%request_id, error = %message, "Refetch rejected");
            }
        });
    }
}

/// Counts one running follow-up; the count drops when the task ends,
/// panics included.
struct FollowUpGuard {
    store: ProductStore,
}

impl FollowUpGuard {
    fn enter(store: ProductStore) -> Self {
        store.inner.follow_ups.send_modify(|count| *count += 1);
        FollowUpGuard { store }
    }
}

impl Drop for FollowUpGuard {
    fn drop(&mut self) {
        self.store
            .inner
            .follow_ups
            .send_modify(|count| *count = count.saturating_sub(1));
    }
}
