//! # Domain Types
//!
//! Core domain types used throughout Vitrine Admin.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  ProductQuery   │   │  ProductPage    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  _id (server)   │   │  page           │   │  products       │       │
//! │  │  ...fields      │   │  name           │   │  total_page_num │       │
//! │  │  (opaque JSON)  │   │  extra params   │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   ProductId     │   │  ProductForm    │   │  Notification   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  String newtype │   │  JSON object    │   │  message        │       │
//! │  └─────────────────┘   └─────────────────┘   │  status         │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Opaque Products
//! The server owns the product schema. The client only relies on `_id`;
//! every other field is carried through untouched so that a list, detail, or
//! edit round trip never drops data the client does not know about.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::action::Operation;
use crate::error::{CoreError, CoreResult};
use crate::DEFAULT_TOTAL_PAGE_NUM;

// =============================================================================
// Product Id
// =============================================================================

/// Server-assigned product identifier (`_id` on the wire).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        ProductId(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the id is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        ProductId(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        ProductId(id)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A sellable item as cached by the admin client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier assigned by the backend.
    #[serde(rename = "_id")]
    pub id: ProductId,

    /// Every other product field (sku, name, price, image, stock, ...).
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Product {
    /// Creates a product with no fields besides its id.
    pub fn new(id: impl Into<ProductId>) -> Self {
        Product {
            id: id.into(),
            fields: Map::new(),
        }
    }

    /// Builder-style field setter.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Returns a field by name.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns the `name` field when it is a string.
    pub fn name(&self) -> Option<&str> {
        self.field("name").and_then(Value::as_str)
    }

    /// Decodes the `data` object of a detail/create/edit response body.
    pub fn from_body(body: Value, operation: Operation) -> CoreResult<Self> {
        let envelope: Envelope<Product> = decode(body, operation)?;
        Ok(envelope.data)
    }
}

// =============================================================================
// Product Form
// =============================================================================

/// Form fields submitted on create and edit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductForm(Map<String, Value>);

impl ProductForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the form without identifier keys.
    ///
    /// The id travels in the resource path on edit, never in the body.
    pub fn without_identifier(&self) -> ProductForm {
        let mut fields = self.0.clone();
        fields.remove("_id");
        fields.remove("id");
        ProductForm(fields)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for ProductForm {
    fn from(fields: Map<String, Value>) -> Self {
        ProductForm(fields)
    }
}

// =============================================================================
// Product Query
// =============================================================================

/// Filter and page parameters for the list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuery {
    /// 1-based page number, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Name filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Any other query parameter the backend understands.
    #[serde(default, flatten)]
    pub extra: BTreeMap<String, String>,
}

impl ProductQuery {
    /// Query for a single page with no filters.
    pub fn page(page: u32) -> Self {
        ProductQuery {
            page: Some(page),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Renders the query as ordered `(key, value)` pairs.
    ///
    /// Order: `page`, `name`, then extra parameters sorted by key.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.extra.len() + 2);
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(ref name) = self.name {
            pairs.push(("name".to_string(), name.clone()));
        }
        for (key, value) in &self.extra {
            pairs.push((key.clone(), value.clone()));
        }
        pairs
    }
}

// =============================================================================
// Response Payloads
// =============================================================================

/// One page of the product list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total_page_num: u32,
}

impl ProductPage {
    /// Decodes a list response body.
    ///
    /// ## Accepted Shapes
    /// ```text
    /// { "data": [ ... ], "totalPageNum": 3 }   → 3 pages
    /// { "data": [ ... ] }                       → 1 page
    /// [ ... ]                                   → 1 page
    /// ```
    pub fn from_body(body: Value) -> CoreResult<Self> {
        let page = match decode::<ListBody>(body, Operation::List)? {
            ListBody::Bare(products) => ProductPage {
                products,
                total_page_num: DEFAULT_TOTAL_PAGE_NUM,
            },
            ListBody::Paged {
                data,
                total_page_num,
            } => ProductPage {
                products: data,
                total_page_num: page_count(total_page_num).unwrap_or(DEFAULT_TOTAL_PAGE_NUM),
            },
        };
        Ok(page)
    }
}

/// A detail response: the product plus the page count when the server sends one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub product: Product,
    pub total_page_num: Option<u32>,
}

impl ProductDetail {
    pub fn from_body(body: Value) -> CoreResult<Self> {
        let envelope: Envelope<Product> = decode(body, Operation::Detail)?;
        Ok(ProductDetail {
            product: envelope.data,
            total_page_num: page_count(envelope.total_page_num),
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody {
    Bare(Vec<Product>),
    Paged {
        data: Vec<Product>,
        #[serde(rename = "totalPageNum", default)]
        total_page_num: Option<u32>,
    },
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
    #[serde(rename = "totalPageNum", default)]
    total_page_num: Option<u32>,
}

/// Zero pages is not a page count.
fn page_count(total: Option<u32>) -> Option<u32> {
    total.filter(|n| *n >= 1)
}

fn decode<T: serde::de::DeserializeOwned>(body: Value, operation: Operation) -> CoreResult<T> {
    serde_json::from_value(body).map_err(|e| CoreError::Decode {
        operation: operation.to_string(),
        reason: e.to_string(),
    })
}

// =============================================================================
// Notification
// =============================================================================

/// Severity tag of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Success,
    Error,
}

impl fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationStatus::Success => write!(f, "success"),
            NotificationStatus::Error => write!(f, "error"),
        }
    }
}

/// A toast-style message for the notification dispatcher.
///
/// Serializes to `{ "message": ..., "status": "success" | "error" }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub status: NotificationStatus,
    #[serde(skip, default = "Utc::now")]
    pub issued_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(message: impl Into<String>, status: NotificationStatus) -> Self {
        Notification {
            message: message.into(),
            status,
            issued_at: Utc::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationStatus::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationStatus::Error)
    }
}

impl PartialEq for Notification {
    /// Two notifications are the same message regardless of when they were issued.
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message && self.status == other.status
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
