//! One storefront page: a store wired to the page's badge and cart table.

use std::sync::Arc;

use serde::Serialize;

use crate::cart::ProductRef;
use crate::pricing::cart_count;
use crate::rendering::{
    BadgeElement, BadgePresenter, BadgeSlot, BadgeState, CartAction, CartTable, RenderContext,
    TableView, UiEvent,
};
use crate::storage::Storage;
use crate::store::CartStore;
use crate::CartConfig;

/// Which cart surfaces a page carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageOutline {
    /// The header badge is present
    pub has_badge: bool,
    /// The items container and total element are both present, with this context
    pub table: Option<RenderContext>,
}

/// Serializable view of a page after rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSnapshot {
    pub count: u64,
    pub badge: Option<BadgeSnapshot>,
    pub table: Option<TableSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BadgeSnapshot {
    pub text: String,
    pub aria_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSnapshot {
    pub layout: &'static str,
    pub mode: &'static str,
    pub rows_html: String,
    pub total: String,
    pub fingerprint: String,
}

/// A page's cart surfaces bound to a store.
///
/// Store mutations refresh the badge through the store's change callback;
/// table actions and additions re-render the table.
pub struct CartPage<S: Storage> {
    store: CartStore<S>,
    badge_slot: Option<Arc<BadgeSlot>>,
    badge: BadgePresenter,
    table: Option<CartTable>,
}

impl<S: Storage> CartPage<S> {
    pub fn new(storage: S, config: &CartConfig, outline: PageOutline) -> Self {
        let badge_slot = outline.has_badge.then(|| Arc::new(BadgeSlot::new()));
        let element = badge_slot
            .clone()
            .map(|slot| slot as Arc<dyn BadgeElement>);
        let badge = BadgePresenter::new(element, &config.messages);

        let mut store = CartStore::new(storage, config);
        let observer = badge.clone();
        store.on_change(move |cart| observer.refresh(cart));

        let table = outline.table.map(|ctx| CartTable::new(ctx, config));
        Self {
            store,
            badge_slot,
            badge,
            table,
        }
    }

    /// Initial page load: render the table, then show the badge count.
    pub fn load(&mut self) {
        if let Some(table) = self.table.as_mut() {
            table.render(&self.store);
        }
        self.badge.update_cart_badge(&self.store);
    }

    /// Route a UI event to the store or the table's delegated handler.
    ///
    /// Returns whether the event was acted on.
    pub fn dispatch(&mut self, event: &UiEvent) -> bool {
        match CartAction::from_event(event) {
            Some(CartAction::AddToCart(item)) => {
                self.add_to_cart(&item);
                true
            }
            Some(action) => match self.table.as_mut() {
                Some(table) => table.apply(&mut self.store, &action),
                None => false,
            },
            None => false,
        }
    }

    pub fn add_to_cart(&mut self, item: &ProductRef) {
        self.store.add_to_cart(item);
        if let Some(table) = self.table.as_mut() {
            table.render(&self.store);
        }
    }

    pub fn store(&self) -> &CartStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut CartStore<S> {
        &mut self.store
    }

    pub fn table(&self) -> Option<&CartTable> {
        self.table.as_ref()
    }

    /// The table's current view, if the page has a table
    pub fn table_view(&self) -> Option<&TableView> {
        self.table.as_ref().map(CartTable::view)
    }

    /// What the badge currently shows, if the page has one
    pub fn badge_state(&self) -> Option<BadgeState> {
        self.badge_slot.as_ref().map(|slot| slot.state())
    }

    pub fn snapshot(&self) -> PageSnapshot {
        let badge = self.badge_state().map(|s| BadgeSnapshot {
            text: s.text,
            aria_label: s.aria_label,
        });
        let table = self.table.as_ref().map(|t| {
            let ctx = t.context();
            let view = t.view();
            TableSnapshot {
                layout: ctx.layout.as_str(),
                mode: ctx.mode.as_str(),
                rows_html: view.rows_html().to_string(),
                total: view.total.clone(),
                fingerprint: view.fingerprint(),
            }
        });
        PageSnapshot {
            count: cart_count(&self.store.get_cart()),
            badge,
            table,
        }
    }
}
