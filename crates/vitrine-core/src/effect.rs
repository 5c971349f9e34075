//! # Post-Mutation Effects
//!
//! Side effects are returned as data next to an operation's value and run
//! by the store coordinator, so the operations themselves stay free of
//! dispatching.
//!
//! ## Effects per Operation
//! ```text
//! ┌──────────┬──────────────────────────────────────────────────────────┐
//! │ create   │ Notify("Product created")  →  RefetchList(page 1)        │
//! │ edit     │ Notify("Product updated")                                │
//! │ delete   │ RefetchList(page 1)        →  Notify("Product deleted")  │
//! │ list     │ (none)                                                   │
//! │ detail   │ (none)                                                   │
//! └──────────┴──────────────────────────────────────────────────────────┘
//! ```

use crate::action::Operation;
use crate::types::{Notification, ProductQuery};
use crate::FIRST_PAGE;

pub const CREATED_MESSAGE: &str = "Product created";
pub const UPDATED_MESSAGE: &str = "Product updated";
pub const DELETED_MESSAGE: &str = "Product deleted";

/// A side effect requested by a successful operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Show a notification.
    Notify(Notification),
    /// Issue a fresh, independent list fetch.
    RefetchList(ProductQuery),
}

impl Effect {
    /// Effects that follow a successful `operation`, in execution order.
    pub fn after_success(operation: Operation) -> Vec<Effect> {
        match operation {
            Operation::Create => vec![
                Effect::Notify(Notification::success(CREATED_MESSAGE)),
                Effect::RefetchList(ProductQuery::page(FIRST_PAGE)),
            ],
            Operation::Edit => vec![Effect::Notify(Notification::success(UPDATED_MESSAGE))],
            Operation::Delete => vec![
                Effect::RefetchList(ProductQuery::page(FIRST_PAGE)),
                Effect::Notify(Notification::success(DELETED_MESSAGE)),
            ],
            Operation::List | Operation::Detail => Vec::new(),
        }
    }
}

/// A successful operation value plus the effects to run before it is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    pub effects: Vec<Effect>,
}

impl<T> Resolved<T> {
    /// A value with no follow-up effects.
    pub fn pure(value: T) -> Self {
        Resolved {
            value,
            effects: Vec::new(),
        }
    }

    /// A value with the standard effects of `operation`.
    pub fn after(operation: Operation, value: T) -> Self {
        Resolved {
            value,
            effects: Effect::after_success(operation),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolved<U> {
        Resolved {
            value: f(self.value),
            effects: self.effects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_notifies_then_refetches_first_page() {
        let effects = Effect::after_success(Operation::Create);
        assert_eq!(
            effects,
            vec![
                Effect::Notify(Notification::success(CREATED_MESSAGE)),
                Effect::RefetchList(ProductQuery::page(1)),
            ]
        );
    }

    #[test]
    fn test_delete_refetches_then_notifies() {
        let effects = Effect::after_success(Operation::Delete);
        assert!(matches!(effects[0], Effect::RefetchList(_)));
        assert!(matches!(effects[1], Effect::Notify(_)));
    }

    #[test]
    fn test_reads_have_no_effects() {
        assert!(Effect::after_success(Operation::List).is_empty());
        assert!(Effect::after_success(Operation::Detail).is_empty());
    }
}
