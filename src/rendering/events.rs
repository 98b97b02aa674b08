//! Delegated UI events.
//!
//! Rows are regenerated on every render, so handlers are never bound per
//! row. A single handler on the stable container receives the event target
//! and dispatches on the role attribute it carries.

use std::collections::BTreeMap;

use crate::cart::ProductRef;

pub const ATTR_ID: &str = "data-id";
pub const ATTR_QTY_INC: &str = "data-qty-inc";
pub const ATTR_QTY_DEC: &str = "data-qty-dec";
pub const ATTR_QTY_INPUT: &str = "data-qty-input";
pub const ATTR_REMOVE: &str = "data-remove";
pub const ATTR_ADD_TO_CART: &str = "data-add-to-cart";
pub const ATTR_PRODUCT_ID: &str = "data-product-id";
pub const ATTR_PRODUCT_NAME: &str = "data-product-name";
pub const ATTR_PRODUCT_PRICE: &str = "data-product-price";

/// The element an event was dispatched on: tag name, attributes and, for
/// form inputs, the current value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventTarget {
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
    pub value: Option<String>,
}

impl EventTarget {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    /// A non-empty attribute value
    fn non_empty_attr(&self, name: &str) -> Option<&str> {
        self.attr(name).filter(|v| !v.is_empty())
    }
}

/// Events the cart reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Click(EventTarget),
    Change(EventTarget),
}

/// What an event asks the cart to do
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    Increment { id: String },
    Decrement { id: String },
    Remove { id: String },
    SetQty { id: String, value: String },
    AddToCart(ProductRef),
}

impl CartAction {
    /// Decode an event by the role attribute on its target.
    ///
    /// Targets without an id, and change events on anything but a quantity
    /// input, decode to `None`.
    pub fn from_event(event: &UiEvent) -> Option<CartAction> {
        match event {
            UiEvent::Click(t) if t.has_attr(ATTR_ADD_TO_CART) => {
                let id = t.non_empty_attr(ATTR_PRODUCT_ID)?;
                Some(CartAction::AddToCart(ProductRef {
                    id: id.to_string(),
                    name: t.attr(ATTR_PRODUCT_NAME).map(str::to_string),
                    price: t.attr(ATTR_PRODUCT_PRICE).map(str::to_string),
                }))
            }
            UiEvent::Click(t) => {
                let id = t.non_empty_attr(ATTR_ID)?.to_string();
                if t.has_attr(ATTR_QTY_INC) {
                    Some(CartAction::Increment { id })
                } else if t.has_attr(ATTR_QTY_DEC) {
                    Some(CartAction::Decrement { id })
                } else if t.has_attr(ATTR_REMOVE) {
                    Some(CartAction::Remove { id })
                } else {
                    None
                }
            }
            UiEvent::Change(t) => {
                if t.tag != "input" || !t.has_attr(ATTR_QTY_INPUT) {
                    return None;
                }
                let id = t.non_empty_attr(ATTR_ID)?.to_string();
                Some(CartAction::SetQty {
                    id,
                    value: t.value.clone().unwrap_or_default(),
                })
            }
        }
    }

    /// Whether this action belongs to the table's delegated handler
    pub fn is_table_action(&self) -> bool {
        !matches!(self, CartAction::AddToCart(_))
    }
}
