//! Cart store: load-mutate-save over an injected [`Storage`] backend.
//!
//! The store keeps no copy of the cart between calls. Every operation reads
//! the persisted list, applies its change and writes the whole list back, so
//! independent page sections sharing one storage never see stale state.

use std::sync::Arc;

use crate::cart::{parse_cart, serialize_cart, Cart, ProductRef};
use crate::quantity::{clamp_qty, LooseNumber, MAX_QTY};
use crate::storage::Storage;
use crate::CartConfig;

type OnChangeHandler = Arc<dyn Fn(&Cart) + Send + Sync>;

/// Owns the storage handle and exposes the cart mutations.
///
/// No operation returns an error: unreadable storage yields an empty cart
/// and failed writes are logged.
pub struct CartStore<S: Storage> {
    storage: S,
    key: String,
    placeholder_name: String,
    on_change: Option<OnChangeHandler>,
}

impl<S: Storage> CartStore<S> {
    pub fn new(storage: S, config: &CartConfig) -> Self {
        Self {
            storage,
            key: config.storage_key.clone(),
            placeholder_name: config.placeholder_name.clone(),
            on_change: None,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Register a callback invoked with the saved cart after every mutation.
    pub fn on_change<F>(&mut self, cb: F)
    where
        F: Fn(&Cart) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(cb));
    }

    /// Remove a previously registered change callback, if any
    pub fn clear_on_change(&mut self) {
        self.on_change = None;
    }

    /// Load the current cart; missing or corrupt storage yields an empty cart.
    pub fn get_cart(&self) -> Cart {
        let raw = match self.storage.get_item(&self.key) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("reading cart from storage failed: {}", e);
                None
            }
        };
        parse_cart(raw.as_deref(), &self.placeholder_name)
    }

    /// Persist `cart`, replacing whatever was stored before.
    pub fn save_cart(&mut self, cart: &Cart) {
        let result = serialize_cart(cart).and_then(|raw| self.storage.set_item(&self.key, &raw));
        if let Err(e) = result {
            log::warn!("saving cart to storage failed: {}", e);
        }
    }

    /// Add one unit of `item`, appending a new line when its id is not in the cart.
    pub fn add_to_cart(&mut self, item: &ProductRef) {
        let mut cart = self.get_cart();
        match cart.iter_mut().find(|line| line.id == item.id) {
            Some(line) => {
                // Repeated adds stop at the same ceiling as edits.
                line.qty = line.qty.saturating_add(1).min(MAX_QTY);
                log::debug!("cart: {} qty -> {}", line.id, line.qty);
            }
            None => {
                let line = item.to_line(&self.placeholder_name);
                log::debug!("cart: added {} at {}", line.id, line.price);
                cart.push(line);
            }
        }
        self.commit(&cart);
    }

    /// Set the quantity of line `id`, clamped to the valid range. Unknown ids are ignored.
    pub fn set_qty<V: LooseNumber + ?Sized>(&mut self, id: &str, qty: &V) {
        let mut cart = self.get_cart();
        let Some(line) = cart.iter_mut().find(|line| line.id == id) else {
            log::debug!("cart: set_qty on unknown id {}", id);
            return;
        };
        line.qty = clamp_qty(qty);
        log::debug!("cart: {} qty -> {}", id, line.qty);
        self.commit(&cart);
    }

    /// Drop line `id` and persist the remainder.
    pub fn remove_item(&mut self, id: &str) {
        let mut cart = self.get_cart();
        cart.retain(|line| line.id != id);
        log::debug!("cart: removed {}", id);
        self.commit(&cart);
    }

    /// Replace the cart with an empty one.
    pub fn clear(&mut self) {
        self.commit(&Vec::new());
    }

    fn commit(&mut self, cart: &Cart) {
        self.save_cart(cart);
        if let Some(cb) = &self.on_change {
            cb(cart);
        }
    }
}
