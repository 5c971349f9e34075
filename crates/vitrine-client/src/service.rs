//! # Product Service
//!
//! The five product operations. Each one issues exactly one transport call
//! and resolves to either a value with its follow-up effects or the
//! normalized failure string.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  presence check ──✗──► Err(validation message)      no request sent    │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  transport.send ──✗──► Err(message → error → fallback)                 │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  status == 200? ──✗──► Err(body.error → fallback)                      │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  decode payload ──✗──► Err(fallback)                                   │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  Ok(Resolved { value, effects })                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The service never touches the store; `ProductStore` dispatches and runs
//! the returned effects.

use std::sync::Arc;

use tracing::{debug, warn};

use vitrine_core::validation::{validate_product_form, validate_product_id, validate_query};
use vitrine_core::{
    CoreError, Failure, Operation, Product, ProductDetail, ProductForm, ProductId, ProductPage,
    ProductQuery, Resolved, ValidationError, PRODUCT_RESOURCE,
};

use crate::transport::{Transport, TransportRequest, TransportResponse};

/// Outcome of one product operation.
pub type Outcome<T> = Result<Resolved<T>, String>;

/// CRUD operations against the product REST resource.
#[derive(Clone)]
pub struct ProductService {
    transport: Arc<dyn Transport>,
}

impl ProductService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        ProductService { transport }
    }

    /// `GET /product?{query}`
    pub async fn list(&self, query: &ProductQuery) -> Outcome<ProductPage> {
        validate_query(query).map_err(|e| rejected(Operation::List, e))?;

        let request = TransportRequest::get(PRODUCT_RESOURCE).with_query(query.to_pairs());
        let response = self.call(Operation::List, request).await?;
        let page = ProductPage::from_body(response.body)
            .map_err(|e| undecodable(Operation::List, e))?;

        Ok(Resolved::pure(page))
    }

    /// `GET /product/{id}`
    pub async fn detail(&self, id: &ProductId) -> Outcome<ProductDetail> {
        validate_product_id(id).map_err(|e| rejected(Operation::Detail, e))?;

        let request = TransportRequest::get(item_path(id));
        let response = self.call(Operation::Detail, request).await?;
        let detail = ProductDetail::from_body(response.body)
            .map_err(|e| undecodable(Operation::Detail, e))?;

        Ok(Resolved::pure(detail))
    }

    /// `POST /product`
    pub async fn create(&self, form: &ProductForm) -> Outcome<Product> {
        validate_product_form(form).map_err(|e| rejected(Operation::Create, e))?;

        let request = TransportRequest::post(PRODUCT_RESOURCE, form.clone().into_value());
        let response = self.call(Operation::Create, request).await?;
        let product = Product::from_body(response.body, Operation::Create)
            .map_err(|e| undecodable(Operation::Create, e))?;

        Ok(Resolved::after(Operation::Create, product))
    }

    /// `PUT /product/{id}` with the form minus its identifier fields.
    pub async fn edit(&self, id: &ProductId, form: &ProductForm) -> Outcome<Product> {
        validate_product_id(id).map_err(|e| rejected(Operation::Edit, e))?;
        validate_product_form(form).map_err(|e| rejected(Operation::Edit, e))?;

        let request = TransportRequest::put(item_path(id), form.without_identifier().into_value());
        let response = self.call(Operation::Edit, request).await?;
        let product = Product::from_body(response.body, Operation::Edit)
            .map_err(|e| undecodable(Operation::Edit, e))?;

        Ok(Resolved::after(Operation::Edit, product))
    }

    /// `DELETE /product/{id}`; resolves to the id that was deleted.
    pub async fn delete(&self, id: &ProductId) -> Outcome<ProductId> {
        validate_product_id(id).map_err(|e| rejected(Operation::Delete, e))?;

        self.call(Operation::Delete, TransportRequest::delete(item_path(id)))
            .await?;

        Ok(Resolved::after(Operation::Delete, id.clone()))
    }

    async fn call(
        &self,
        operation: Operation,
        request: TransportRequest,
    ) -> Result<TransportResponse, String> {
        debug!(%operation, method = %request.method, path = %request.path, "Sending product request");

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(failure) => {
                let message = failure.normalize(operation);
                warn!(%operation, error = %message, "Product request failed");
                return Err(message);
            }
        };

        if !response.is_success() {
            let message = Failure::from_response_body(&response.body).normalize(operation);
            warn!(%operation, status = response.status, error = %message, "Product request rejected");
            return Err(message);
        }

        Ok(response)
    }
}

fn item_path(id: &ProductId) -> String {
    format!("{}/{}", PRODUCT_RESOURCE, id)
}

fn rejected(operation: Operation, err: ValidationError) -> String {
    warn!(%operation, error = %err, "Product request not sent");
    Failure::with_message(err.to_string()).normalize(operation)
}

fn undecodable(operation: Operation, err: CoreError) -> String {
    warn!(%operation, error = %err, "Unexpected product payload");
    Failure::default().normalize(operation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;
    use crate::transport::{Method, TransportResponse};
    use serde_json::json;
    use vitrine_core::Effect;

    fn service(transport: &Arc<ScriptedTransport>) -> ProductService {
        ProductService::new(transport.clone())
    }

    #[tokio::test]
    async fn test_list_renders_query() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(TransportResponse::ok(json!({
            "data": [{ "_id": "1", "name": "A" }],
            "totalPageNum": 3
        })));

        let resolved = service(&transport)
            .list(&ProductQuery::page(1).with_name("A"))
            .await
            .unwrap();

        assert_eq!(resolved.value.total_page_num, 3);
        assert_eq!(resolved.value.products[0].name(), Some("A"));
        assert!(resolved.effects.is_empty());

        let sent = transport.requests();
        assert_eq!(sent[0].method, Method::Get);
        assert_eq!(sent[0].path, "/product");
        assert_eq!(
            sent[0].query,
            vec![("page".to_string(), "1".to_string()), ("name".to_string(), "A".to_string())]
        );
    }

    #[tokio::test]
    async fn test_detail_path() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(TransportResponse::ok(json!({ "data": { "_id": "7" } })));

        let resolved = service(&transport).detail(&ProductId::from("7")).await.unwrap();
        assert_eq!(resolved.value.product.id.as_str(), "7");
        assert_eq!(transport.requests()[0].path, "/product/7");
    }

    #[tokio::test]
    async fn test_create_effects() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(TransportResponse::ok(json!({ "data": { "_id": "9", "name": "Scarf" } })));

        let form = ProductForm::new().with_field("name", "Scarf");
        let resolved = service(&transport).create(&form).await.unwrap();

        assert_eq!(resolved.value.id.as_str(), "9");
        assert_eq!(resolved.effects, Effect::after_success(Operation::Create));
        assert_eq!(transport.requests()[0].body, Some(json!({ "name": "Scarf" })));
    }

    #[tokio::test]
    async fn test_edit_strips_identifier_from_body() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(TransportResponse::ok(json!({ "data": { "_id": "2", "name": "B" } })));

        let form = ProductForm::new()
            .with_field("_id", "2")
            .with_field("id", "2")
            .with_field("name", "B");
        service(&transport).edit(&ProductId::from("2"), &form).await.unwrap();

        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::Put);
        assert_eq!(sent.path, "/product/2");
        assert_eq!(sent.body, Some(json!({ "name": "B" })));
    }

    #[tokio::test]
    async fn test_delete_resolves_to_id() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(TransportResponse::ok(serde_json::Value::Null));

        let resolved = service(&transport).delete(&ProductId::from("5")).await.unwrap();
        assert_eq!(resolved.value, ProductId::from("5"));
        assert!(matches!(resolved.effects[0], Effect::RefetchList(_)));
    }

    #[tokio::test]
    async fn test_non_200_surfaces_body_error() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(TransportResponse::new(400, json!({ "error": "sku already exists" })));
        transport.respond(TransportResponse::new(500, json!({ "status": "fail" })));

        let form = ProductForm::new().with_field("sku", "X1");
        let svc = service(&transport);

        assert_eq!(svc.create(&form).await.unwrap_err(), "sku already exists");
        assert_eq!(svc.create(&form).await.unwrap_err(), "failed to create product");
    }

    #[tokio::test]
    async fn test_transport_failure_normalized() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.fail(Failure::with_message("Network down"));
        transport.fail(Failure::with_error("ECONNRESET"));
        transport.fail(Failure::default());

        let svc = service(&transport);
        let form = ProductForm::new().with_field("name", "A");

        assert_eq!(svc.create(&form).await.unwrap_err(), "Network down");
        assert_eq!(svc.list(&ProductQuery::default()).await.unwrap_err(), "ECONNRESET");
        assert_eq!(
            svc.delete(&ProductId::from("1")).await.unwrap_err(),
            "failed to delete product"
        );
    }

    #[tokio::test]
    async fn test_bad_payload_uses_fallback() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(TransportResponse::ok(json!({ "status": "success" })));

        let err = service(&transport).detail(&ProductId::from("1")).await.unwrap_err();
        assert_eq!(err, "failed to fetch product detail");
    }

    #[tokio::test]
    async fn test_presence_checks_skip_transport() {
        let transport = Arc::new(ScriptedTransport::new());
        let svc = service(&transport);

        assert_eq!(svc.detail(&ProductId::from("")).await.unwrap_err(), "id is required");
        assert_eq!(svc.create(&ProductForm::new()).await.unwrap_err(), "form is required");
        assert!(svc.list(&ProductQuery::page(0)).await.is_err());
        assert!(transport.requests().is_empty());
    }
}
