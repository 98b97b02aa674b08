//! NeonShop cart engine
//!
//! Cart state management and checkout-table rendering for a small storefront.
//! The cart is a JSON list persisted under a single key in a key-value store
//! (a browser origin's local storage on the storefront itself), rendered
//! into the checkout steps' tables with per-page column layouts and edited
//! through delegated quantity/remove controls.
//!
//! # Layers
//!
//! - **Data**: [`quantity`], [`cart`], [`store`], [`pricing`] and the
//!   [`storage`] port. No UI types are involved.
//! - **Presentation**: [`rendering`] (badge, table, events) and [`page`],
//!   which wires a store to the badge and table of one page.
//! - **Markup** (feature `dom`): [`dom`] reads the `data-*` attribute
//!   contract out of a page's HTML.
//!
//! # Example
//!
//! ```
//! use neoncart::storage::MemoryStorage;
//! use neoncart::{CartConfig, CartStore, ProductRef};
//!
//! let mut store = CartStore::new(MemoryStorage::new(), &CartConfig::default());
//! store.add_to_cart(&ProductRef::new("p1", "Widget", 100.0));
//! store.add_to_cart(&ProductRef::new("p1", "Widget", 100.0));
//!
//! let cart = store.get_cart();
//! assert_eq!(cart[0].qty, 2);
//! assert_eq!(neoncart::pricing::cart_total(&cart), 200.0);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod error;
pub use error::{Error, Result};

pub mod cart;
pub mod page;
pub mod pricing;
pub mod quantity;
pub mod rendering;
pub mod storage;
pub mod store;

// Page markup bindings (scraper-backed)
#[cfg(feature = "dom")]
pub mod dom;

pub use cart::{Cart, CartLine, ProductRef};
pub use page::CartPage;
pub use rendering::{CurrencyFormat, Layout, Mode, RenderContext};
pub use store::CartStore;

/// Storage key the storefront pages have always used
pub const DEFAULT_STORAGE_KEY: &str = "neonshop_cart_v1";

/// Configuration shared by the store and the presenters
///
/// Defaults reproduce the Czech storefront: `neonshop_cart_v1` key, `Kč`
/// prices with cs-CZ digit grouping and Czech UI strings.
///
/// # Examples
///
/// ```
/// let cfg = neoncart::CartConfig::default();
/// assert_eq!(cfg.storage_key, "neonshop_cart_v1");
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Key the serialized cart lives under
    pub storage_key: String,
    /// Name given to lines added without one
    pub placeholder_name: String,
    /// Price formatting
    pub currency: CurrencyFormat,
    /// User-facing strings
    pub messages: CartMessages,
    /// CSS selector locating the badge element in page markup
    pub badge_selector: String,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            placeholder_name: "Produkt".to_string(),
            currency: CurrencyFormat::default(),
            messages: CartMessages::default(),
            badge_selector: ".badge[href*=\"kosik-krok1\"]".to_string(),
        }
    }
}

impl CartConfig {
    /// Load a JSON config file. Missing fields take their defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config: CartConfig = serde_json::from_str(&raw).map_err(|e| {
            Error::ConfigError(format!("failed to parse {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            return Err(Error::ConfigError("storage_key must not be empty".into()));
        }
        if self.badge_selector.trim().is_empty() {
            return Err(Error::ConfigError("badge_selector must not be empty".into()));
        }
        if self.currency.min_grouping_digits == 0 {
            return Err(Error::ConfigError(
                "currency.min_grouping_digits must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// User-facing strings. `{count}` in the badge templates is replaced with
/// the cart's item count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartMessages {
    pub empty_cart: String,
    pub badge_text: String,
    pub badge_label: String,
    pub qty_group_label: String,
    pub decrease_label: String,
    pub qty_input_label: String,
    pub increase_label: String,
    pub remove_label: String,
}

impl Default for CartMessages {
    fn default() -> Self {
        Self {
            empty_cart: "Košík je prázdný. Přidej si něco z produktů 🙂".to_string(),
            badge_text: "🛒 {count}".to_string(),
            badge_label: "Košík, {count} položek".to_string(),
            qty_group_label: "Počet kusů".to_string(),
            decrease_label: "Snížit".to_string(),
            qty_input_label: "Počet".to_string(),
            increase_label: "Zvýšit".to_string(),
            remove_label: "Odebrat".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CartConfig::default();
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.placeholder_name, "Produkt");
        assert_eq!(config.currency.suffix, " Kč");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: CartConfig = serde_json::from_str(r#"{"storage_key": "shop_v2"}"#).unwrap();
        assert_eq!(config.storage_key, "shop_v2");
        assert_eq!(config.messages, CartMessages::default());
    }

    #[test]
    fn test_validate_rejects_blank_key() {
        let config = CartConfig {
            storage_key: "  ".into(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));
    }
}
