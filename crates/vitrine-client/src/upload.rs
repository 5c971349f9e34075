//! # Image Upload Widget
//!
//! Boundary to a third-party hosted upload widget. The widget itself lives
//! in an external library; this module configures it, waits for the library
//! to be ready, and turns its events into a single `secure_url` callback.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Upload Widget Lifecycle                           │
//! │                                                                         │
//! │  UploadWidget::new(settings)                                           │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  initialize(slot, on_upload)                                           │
//! │        │  cloud name / preset missing ──► error logged, no widget      │
//! │        │  await slot.ready()  (library injected by the host, once)     │
//! │        ▼                                                                │
//! │  provider.create_widget(options, events)                               │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  open() ──► widget UI                                                  │
//! │               │ event "success" ──► on_upload(info.secure_url)         │
//! │               │ other events    ──► logged at debug                    │
//! │               │ error           ──► logged, callback not invoked       │
//! │                                                                         │
//! │  open() before a widget exists ──► UploadError::NotInitialized         │
//! │  open_or_initialize()          ──► initialize first, then open        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::config::{UploadSettings, UploadSource};
use crate::error::UploadError;

/// Only images are accepted.
pub const RESOURCE_TYPE_IMAGE: &str = "image";

/// Event name the widget reports for a finished upload.
pub const SUCCESS_EVENT: &str = "success";

// =============================================================================
// Widget Options
// =============================================================================

/// Options handed to the external library when the widget is created.
///
/// Serializes with the library's option names (`cloudName`, `uploadPreset`,
/// `maxFileSize`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadWidgetConfig {
    pub cloud_name: String,
    pub upload_preset: String,
    pub sources: Vec<UploadSource>,
    pub multiple: bool,
    pub max_file_size: u64,
    pub resource_type: String,
}

impl UploadWidgetConfig {
    /// Builds single-file image options. Fails when either credential is
    /// missing or blank.
    pub fn from_settings(settings: &UploadSettings) -> Result<Self, UploadError> {
        let cloud_name = present(&settings.cloud_name).ok_or(UploadError::MissingCloudName)?;
        let upload_preset =
            present(&settings.upload_preset).ok_or(UploadError::MissingUploadPreset)?;

        Ok(UploadWidgetConfig {
            cloud_name,
            upload_preset,
            sources: settings.sources.clone(),
            multiple: false,
            max_file_size: settings.max_file_size,
            resource_type: RESOURCE_TYPE_IMAGE.to_string(),
        })
    }
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

// =============================================================================
// Widget Events
// =============================================================================

/// One result reported by the widget: an event name plus its info payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadEvent {
    pub event: String,
    #[serde(default)]
    pub info: Value,
}

impl UploadEvent {
    pub fn new(event: impl Into<String>, info: Value) -> Self {
        UploadEvent {
            event: event.into(),
            info,
        }
    }

    pub fn is_success(&self) -> bool {
        self.event == SUCCESS_EVENT
    }

    /// `info.secure_url` when present.
    pub fn secure_url(&self) -> Option<&str> {
        self.info.get("secure_url").and_then(Value::as_str)
    }
}

/// What the library reports for each widget event: a result or an error.
pub type UploadEventHandler = Arc<dyn Fn(Result<UploadEvent, String>) + Send + Sync>;

// =============================================================================
// Provider Traits
// =============================================================================

/// The external upload library.
pub trait UploadProvider: Send + Sync {
    /// Creates a widget that reports every event to `events`.
    fn create_widget(
        &self,
        options: &UploadWidgetConfig,
        events: UploadEventHandler,
    ) -> Result<Box<dyn UploadHandle>, UploadError>;
}

/// A widget created by an `UploadProvider`.
pub trait UploadHandle: Send + Sync {
    /// Shows the widget UI.
    fn open(&self) -> Result<(), UploadError>;
}

// =============================================================================
// Provider Slot
// =============================================================================

/// Where the host installs the upload library once it has loaded.
///
/// Cloning shares the slot. Waiters are woken when a provider is installed.
#[derive(Clone)]
pub struct ProviderSlot {
    tx: Arc<watch::Sender<Option<Arc<dyn UploadProvider>>>>,
}

impl ProviderSlot {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        ProviderSlot { tx: Arc::new(tx) }
    }

    /// A slot that is already filled.
    pub fn ready_with(provider: Arc<dyn UploadProvider>) -> Self {
        let slot = Self::new();
        slot.install(provider);
        slot
    }

    pub fn install(&self, provider: Arc<dyn UploadProvider>) {
        self.tx.send_replace(Some(provider));
        info!("Upload provider installed");
    }

    /// Resolves once a provider is installed.
    pub async fn ready(&self) -> Result<Arc<dyn UploadProvider>, UploadError> {
        let mut rx = self.tx.subscribe();
        let provider = rx
            .wait_for(Option::is_some)
            .await
            .map_err(|_| UploadError::ProviderUnavailable)?
            .clone();
        provider.ok_or(UploadError::ProviderUnavailable)
    }
}

impl Default for ProviderSlot {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Upload Widget
// =============================================================================

/// The image upload button's backing widget.
pub struct UploadWidget {
    settings: UploadSettings,
    handle: Mutex<Option<Box<dyn UploadHandle>>>,
}

impl UploadWidget {
    pub fn new(settings: UploadSettings) -> Self {
        UploadWidget {
            settings,
            handle: Mutex::new(None),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.handle.lock().expect("upload widget mutex poisoned").is_some()
    }

    /// Creates the widget once the provider is ready.
    ///
    /// `on_upload` receives the `secure_url` of every successful upload.
    /// Configuration errors are logged and returned; no widget is created.
    pub async fn initialize<F>(&self, slot: &ProviderSlot, on_upload: F) -> Result<(), UploadError>
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        let options = UploadWidgetConfig::from_settings(&self.settings).map_err(|err| {
            error!(
                error = %err,
                cloud_name = ?self.settings.cloud_name,
                has_preset = self.settings.upload_preset.is_some(),
                "Upload widget configuration incomplete"
            );
            err
        })?;

        debug!("Waiting for upload provider");
        let provider = slot.ready().await?;

        let handle = provider
            .create_widget(&options, event_handler(on_upload))
            .map_err(|err| {
                error!(error = %err, "Upload widget creation failed");
                err
            })?;

        *self.handle.lock().expect("upload widget mutex poisoned") = Some(handle);
        info!(cloud_name = %options.cloud_name, "Upload widget ready");
        Ok(())
    }

    /// Opens the widget UI.
    pub fn open(&self) -> Result<(), UploadError> {
        let guard = self.handle.lock().expect("upload widget mutex poisoned");
        match guard.as_ref() {
            Some(handle) => handle.open(),
            None => {
                error!("Upload widget opened before it was initialized");
                Err(UploadError::NotInitialized)
            }
        }
    }

    /// Opens the widget, creating it first when no widget exists yet.
    pub async fn open_or_initialize<F>(
        &self,
        slot: &ProviderSlot,
        on_upload: F,
    ) -> Result<(), UploadError>
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        if !self.is_initialized() {
            warn!("Upload widget not initialized, initializing before open");
            self.initialize(slot, on_upload).await?;
        }
        self.open()
    }
}

fn event_handler<F>(on_upload: F) -> UploadEventHandler
where
    F: Fn(String) + Send + Sync + 'static,
{
    Arc::new(move |result: Result<UploadEvent, String>| match result {
        Err(err) => error!(error = %err, "Image upload failed"),
        Ok(event) if event.is_success() => match event.secure_url() {
            Some(url) => {
                info!(url = %url, "Image uploaded");
                on_upload(url.to_string());
            }
            None => warn!("Upload succeeded without a secure_url"),
        },
        Ok(event) => debug!(event = %event.event, "Upload widget event"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    /// Fake library: records options and hands the event handler back to
    /// the test so it can play widget events.
    #[derive(Default)]
    struct FakeProvider {
        options: Mutex<Option<UploadWidgetConfig>>,
        events: Mutex<Option<UploadEventHandler>>,
        opened: Arc<Mutex<u32>>,
    }

    struct FakeHandle {
        opened: Arc<Mutex<u32>>,
    }

    impl UploadHandle for FakeHandle {
        fn open(&self) -> Result<(), UploadError> {
            *self.opened.lock().unwrap() += 1;
            Ok(())
        }
    }

    impl UploadProvider for FakeProvider {
        fn create_widget(
            &self,
            options: &UploadWidgetConfig,
            events: UploadEventHandler,
        ) -> Result<Box<dyn UploadHandle>, UploadError> {
            *self.options.lock().unwrap() = Some(options.clone());
            *self.events.lock().unwrap() = Some(events);
            Ok(Box::new(FakeHandle {
                opened: self.opened.clone(),
            }))
        }
    }

    impl FakeProvider {
        fn emit(&self, result: Result<UploadEvent, String>) {
            let events = self.events.lock().unwrap().clone().unwrap();
            events(result);
        }
    }

    struct BlockedProvider;

    impl UploadProvider for BlockedProvider {
        fn create_widget(
            &self,
            _options: &UploadWidgetConfig,
            _events: UploadEventHandler,
        ) -> Result<Box<dyn UploadHandle>, UploadError> {
            Err(UploadError::Widget("script blocked".into()))
        }
    }

    fn settings() -> UploadSettings {
        UploadSettings {
            cloud_name: Some("demo-cloud".into()),
            upload_preset: Some("unsigned".into()),
            ..Default::default()
        }
    }

    fn collector() -> (Arc<Mutex<Vec<String>>>, impl Fn(String) + Send + Sync + 'static) {
        let urls = Arc::new(Mutex::new(Vec::new()));
        let sink = urls.clone();
        (urls, move |url: String| sink.lock().unwrap().push(url))
    }

    #[test]
    fn test_widget_options() {
        let options = UploadWidgetConfig::from_settings(&settings()).unwrap();
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({
                "cloudName": "demo-cloud",
                "uploadPreset": "unsigned",
                "sources": ["local", "url", "camera"],
                "multiple": false,
                "maxFileSize": 10_000_000,
                "resourceType": "image"
            })
        );
    }

    #[test]
    fn test_missing_credentials() {
        let mut s = settings();
        s.cloud_name = None;
        assert_eq!(
            UploadWidgetConfig::from_settings(&s),
            Err(UploadError::MissingCloudName)
        );

        let mut s = settings();
        s.upload_preset = Some("  ".into());
        assert_eq!(
            UploadWidgetConfig::from_settings(&s),
            Err(UploadError::MissingUploadPreset)
        );
    }

    #[tokio::test]
    async fn test_success_event_delivers_secure_url() {
        let provider = Arc::new(FakeProvider::default());
        let slot = ProviderSlot::ready_with(provider.clone());
        let widget = UploadWidget::new(settings());
        let (urls, on_upload) = collector();

        widget.initialize(&slot, on_upload).await.unwrap();
        widget.open().unwrap();

        provider.emit(Ok(UploadEvent::new("queues-start", json!({}))));
        provider.emit(Err("file too large".into()));
        provider.emit(Ok(UploadEvent::new(
            "success",
            json!({ "secure_url": "https://res.example.com/img/1.png" }),
        )));

        assert_eq!(*urls.lock().unwrap(), vec!["https://res.example.com/img/1.png"]);
        assert_eq!(*provider.opened.lock().unwrap(), 1);
        assert_eq!(provider.options.lock().unwrap().as_ref().unwrap().resource_type, "image");
    }

    #[tokio::test]
    async fn test_open_before_initialize() {
        let widget = UploadWidget::new(settings());
        assert_eq!(widget.open(), Err(UploadError::NotInitialized));
    }

    #[tokio::test]
    async fn test_missing_config_creates_no_widget() {
        let provider = Arc::new(FakeProvider::default());
        let slot = ProviderSlot::ready_with(provider.clone());
        let widget = UploadWidget::new(UploadSettings::default());
        let (_, on_upload) = collector();

        let err = widget.initialize(&slot, on_upload).await.unwrap_err();

        assert_eq!(err, UploadError::MissingCloudName);
        assert!(!widget.is_initialized());
        assert!(provider.options.lock().unwrap().is_none());
        assert_eq!(widget.open(), Err(UploadError::NotInitialized));
    }

    #[tokio::test]
    async fn test_waits_for_provider_instead_of_polling() {
        let slot = ProviderSlot::new();
        let widget = Arc::new(UploadWidget::new(settings()));
        let (_, on_upload) = collector();

        let init = {
            let slot = slot.clone();
            let widget = widget.clone();
            tokio::spawn(async move { widget.initialize(&slot, on_upload).await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!widget.is_initialized());

        slot.install(Arc::new(FakeProvider::default()));
        init.await.unwrap().unwrap();

        assert!(widget.is_initialized());
        assert!(widget.open().is_ok());
    }

    #[tokio::test]
    async fn test_open_or_initialize_creates_widget_once() {
        let provider = Arc::new(FakeProvider::default());
        let slot = ProviderSlot::ready_with(provider.clone());
        let widget = UploadWidget::new(settings());

        let (_, on_upload) = collector();
        widget.open_or_initialize(&slot, on_upload).await.unwrap();
        assert!(widget.is_initialized());

        let (_, on_upload) = collector();
        widget.open_or_initialize(&slot, on_upload).await.unwrap();
        assert_eq!(*provider.opened.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_widget_creation_failure_leaves_no_widget() {
        let slot = ProviderSlot::ready_with(Arc::new(BlockedProvider));
        let widget = UploadWidget::new(settings());

        let (_, on_upload) = collector();
        let err = widget.open_or_initialize(&slot, on_upload).await.unwrap_err();

        assert_eq!(err, UploadError::Widget("script blocked".into()));
        assert_eq!(err.to_string(), "Upload widget failed: script blocked");
        assert!(!widget.is_initialized());
    }
}
