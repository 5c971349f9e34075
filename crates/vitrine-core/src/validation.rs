//! # Validation Module
//!
//! Presence checks run before an operation reaches the transport.
//!
//! The backend owns the product schema; the client only refuses requests
//! that could never be routed or would carry nothing.
//!
//! ## Usage
//! ```rust
//! use vitrine_core::validation::{validate_product_id, validate_product_form};
//! use vitrine_core::{ProductForm, ProductId};
//!
//! assert!(validate_product_id(&ProductId::from("65f0c2")).is_ok());
//! assert!(validate_product_id(&ProductId::from("  ")).is_err());
//! assert!(validate_product_form(&ProductForm::new()).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{ProductForm, ProductId, ProductQuery};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// The id must not be blank: it becomes a path segment.
pub fn validate_product_id(id: &ProductId) -> ValidationResult<()> {
    if id.is_blank() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }
    Ok(())
}

/// The form must carry at least one field besides the identifier.
pub fn validate_product_form(form: &ProductForm) -> ValidationResult<()> {
    if form.without_identifier().is_empty() {
        return Err(ValidationError::Required {
            field: "form".to_string(),
        });
    }
    Ok(())
}

/// Pages are 1-based.
pub fn validate_query(query: &ProductQuery) -> ValidationResult<()> {
    if query.page == Some(0) {
        return Err(ValidationError::OutOfRange {
            field: "page".to_string(),
            min: 1,
            max: u32::MAX as i64,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_id_rejected() {
        assert!(validate_product_id(&ProductId::from("")).is_err());
        assert!(validate_product_id(&ProductId::from("abc")).is_ok());
    }

    #[test]
    fn test_form_with_only_id_rejected() {
        let form = ProductForm::new().with_field("_id", "1");
        let err = validate_product_form(&form).unwrap_err();
        assert_eq!(err.to_string(), "form is required");

        let form = form.with_field("name", "Scarf");
        assert!(validate_product_form(&form).is_ok());
    }

    #[test]
    fn test_page_zero_rejected() {
        assert!(validate_query(&ProductQuery::page(0)).is_err());
        assert!(validate_query(&ProductQuery::page(1)).is_ok());
        assert!(validate_query(&ProductQuery::default()).is_ok());
    }
}
