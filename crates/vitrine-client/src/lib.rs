//! # vitrine-client: Product Orchestration for Vitrine Admin
//!
//! Everything around the pure reducer that touches the outside world: the
//! REST backend, toasts, configuration, and the image upload widget.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Architecture                                │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                 ProductStore (coordinator)                       │  │
//! │  │                                                                  │  │
//! │  │  dispatch(Pending) → service call → run effects → dispatch(...) │  │
//! │  └───────────┬──────────────────────┬───────────────────────┬───────┘  │
//! │              ▼                      ▼                       ▼          │
//! │  ┌────────────────────┐  ┌────────────────────┐  ┌──────────────────┐  │
//! │  │  ProductService    │  │  Notifier          │  │  vitrine-core    │  │
//! │  │                    │  │                    │  │                  │  │
//! │  │  list / detail     │  │  TracingNotifier   │  │  reduce()        │  │
//! │  │  create / edit     │  │  RecordingNotifier │  │  Effect          │  │
//! │  │  delete            │  │                    │  │                  │  │
//! │  └─────────┬──────────┘  └────────────────────┘  └──────────────────┘  │
//! │            ▼                                                            │
//! │  ┌────────────────────┐                                                 │
//! │  │  Transport         │  HttpTransport (reqwest) in production          │
//! │  └────────────────────┘                                                 │
//! │                                                                         │
//! │  Standalone: UploadWidget + ProviderSlot, ClientConfig                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`store`] - `ProductStore` coordinator
//! - [`service`] - `ProductService` CRUD operations
//! - [`transport`] - `Transport` trait and request/response types
//! - [`http`] - reqwest implementation of `Transport`
//! - [`notifier`] - Notification sinks
//! - [`upload`] - Image upload widget boundary
//! - [`config`] - TOML + environment configuration
//! - [`error`] - Client error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vitrine_client::{ClientConfig, HttpTransport, ProductStore, TracingNotifier};
//! use vitrine_core::ProductQuery;
//!
//! let config = ClientConfig::load_or_default(None);
//! let transport = HttpTransport::from_settings(&config.api)?;
//! let store = ProductStore::new(Arc::new(transport), Arc::new(TracingNotifier));
//!
//! store.fetch_list(ProductQuery::page(1)).await.ok();
//! println!("{} products", store.with_state(|s| s.product_list.len()));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod http;
pub mod notifier;
pub mod service;
pub mod store;
pub mod transport;
pub mod upload;

#[cfg(test)]
pub(crate) mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ApiSettings, ClientConfig, UploadSettings, UploadSource};
pub use error::{ClientError, ClientResult, UploadError};
pub use http::HttpTransport;
pub use notifier::{Notifier, RecordingNotifier, TracingNotifier};
pub use service::{Outcome, ProductService};
pub use store::ProductStore;
pub use transport::{Method, Transport, TransportRequest, TransportResponse};
pub use upload::{
    ProviderSlot, UploadEvent, UploadEventHandler, UploadHandle, UploadProvider, UploadWidget,
    UploadWidgetConfig,
};
