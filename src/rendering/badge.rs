//! Cart badge: the item count shown in the page header.

use std::sync::{Arc, Mutex};

use crate::cart::CartLine;
use crate::pricing::cart_count;
use crate::storage::Storage;
use crate::store::CartStore;
use crate::CartMessages;

/// The element the badge writes into
pub trait BadgeElement: Send + Sync {
    fn set_text(&self, text: &str);
    fn set_aria_label(&self, label: &str);
}

/// Visible text and accessible label currently shown by a badge
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BadgeState {
    pub text: String,
    pub aria_label: String,
}

/// In-memory badge element that keeps what was written to it
#[derive(Debug, Default)]
pub struct BadgeSlot {
    state: Mutex<BadgeState>,
}

impl BadgeSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> BadgeState {
        self.state.lock().map(|g| g.clone()).unwrap_or_default()
    }
}

impl BadgeElement for BadgeSlot {
    fn set_text(&self, text: &str) {
        if let Ok(mut g) = self.state.lock() {
            g.text = text.to_string();
        }
    }

    fn set_aria_label(&self, label: &str) {
        if let Ok(mut g) = self.state.lock() {
            g.aria_label = label.to_string();
        }
    }
}

/// Writes the cart count onto a badge element, if the page has one.
#[derive(Clone)]
pub struct BadgePresenter {
    element: Option<Arc<dyn BadgeElement>>,
    text_template: String,
    label_template: String,
}

impl BadgePresenter {
    pub fn new(element: Option<Arc<dyn BadgeElement>>, messages: &CartMessages) -> Self {
        Self {
            element,
            text_template: messages.badge_text.clone(),
            label_template: messages.badge_label.clone(),
        }
    }

    pub fn has_element(&self) -> bool {
        self.element.is_some()
    }

    /// Reload the cart from `store` and show its count.
    pub fn update_cart_badge<S: Storage>(&self, store: &CartStore<S>) {
        if self.element.is_none() {
            return;
        }
        self.refresh(&store.get_cart());
    }

    /// Show the count of an already loaded cart.
    pub fn refresh(&self, cart: &[CartLine]) {
        let Some(element) = &self.element else {
            return;
        };
        let count = cart_count(cart);
        element.set_text(&self.badge_text(count));
        element.set_aria_label(&self.badge_label(count));
    }

    pub fn badge_text(&self, count: u64) -> String {
        self.text_template.replace("{count}", &count.to_string())
    }

    pub fn badge_label(&self, count: u64) -> String {
        self.label_template.replace("{count}", &count.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(qty: u32) -> CartLine {
        CartLine { id: format!("p{}", qty), name: "X".into(), price: 1.0, qty }
    }

    #[test]
    fn writes_count_and_label() {
        let slot = Arc::new(BadgeSlot::new());
        let presenter = BadgePresenter::new(
            Some(slot.clone() as Arc<dyn BadgeElement>),
            &CartMessages::default(),
        );
        presenter.refresh(&[line(2), line(3)]);
        assert_eq!(
            slot.state(),
            BadgeState {
                text: "🛒 5".into(),
                aria_label: "Košík, 5 položek".into(),
            }
        );
    }

    #[test]
    fn missing_element_is_a_noop() {
        let presenter = BadgePresenter::new(None, &CartMessages::default());
        assert!(!presenter.has_element());
        presenter.refresh(&[line(1)]);
        assert_eq!(presenter.badge_text(0), "🛒 0");
    }
}
