//! Page markup bindings.
//!
//! Reads the `data-*` attribute contract out of a page's HTML: which cart
//! surfaces the page carries, the table's layout and mode, the add-to-cart
//! triggers, and event targets for simulated clicks and edits.

use scraper::{ElementRef, Html, Selector};

use crate::cart::ProductRef;
use crate::page::PageOutline;
use crate::rendering::events::{
    EventTarget, ATTR_PRODUCT_ID, ATTR_PRODUCT_NAME, ATTR_PRODUCT_PRICE,
};
use crate::rendering::RenderContext;
use crate::{CartConfig, Error, Result};

const ITEMS_SELECTOR: &str = "[data-cart-items]";
const TOTAL_SELECTOR: &str = "[data-cart-total]";
const ADD_SELECTOR: &str = "[data-add-to-cart]";

/// A parsed page and the cart surfaces found in it
pub struct PageBindings {
    document: Html,
    outline: PageOutline,
}

impl PageBindings {
    pub fn parse(html: &str, config: &CartConfig) -> Result<Self> {
        let document = Html::parse_document(html);

        let has_badge = document.select(&selector(&config.badge_selector)?).next().is_some();
        let items = document.select(&selector(ITEMS_SELECTOR)?).next();
        let has_total = document.select(&selector(TOTAL_SELECTOR)?).next().is_some();

        let table = match items {
            Some(el) if has_total => Some(RenderContext::from_attrs(
                el.value().attr("data-cart-layout"),
                el.value().attr("data-cart-mode"),
            )),
            _ => None,
        };
        log::debug!("page bindings: badge={} table={:?}", has_badge, table);

        Ok(Self {
            document,
            outline: PageOutline { has_badge, table },
        })
    }

    pub fn outline(&self) -> PageOutline {
        self.outline
    }

    /// Every add-to-cart trigger that carries a product id, in document order
    pub fn add_triggers(&self) -> Result<Vec<ProductRef>> {
        let sel = selector(ADD_SELECTOR)?;
        Ok(self
            .document
            .select(&sel)
            .filter_map(|el| {
                let v = el.value();
                let id = v.attr(ATTR_PRODUCT_ID).filter(|id| !id.is_empty())?;
                Some(ProductRef {
                    id: id.to_string(),
                    name: v.attr(ATTR_PRODUCT_NAME).map(str::to_string),
                    price: v.attr(ATTR_PRODUCT_PRICE).map(str::to_string),
                })
            })
            .collect())
    }

    /// The first element of the page matching `css`, as an event target
    pub fn target(&self, css: &str) -> Result<EventTarget> {
        first_target(&self.document, css)
    }
}

/// Find an event target inside rendered table rows.
///
/// `rows_html` is the items container's inner markup (`<tr>` elements), as
/// produced by [`crate::rendering::TableView::rows_html`].
pub fn target_in_rows(rows_html: &str, css: &str) -> Result<EventTarget> {
    let fragment = Html::parse_fragment(&format!("<table><tbody>{}</tbody></table>", rows_html));
    first_target(&fragment, css)
}

/// Capture an element's tag, attributes and input value.
pub fn element_target(el: ElementRef<'_>) -> EventTarget {
    let v = el.value();
    let mut target = EventTarget::new(v.name());
    for (name, value) in v.attrs() {
        target = target.with_attr(name, value);
    }
    if target.tag == "input" {
        target.value = Some(v.attr("value").unwrap_or_default().to_string());
    }
    target
}

fn first_target(document: &Html, css: &str) -> Result<EventTarget> {
    let sel = selector(css)?;
    document
        .select(&sel)
        .next()
        .map(element_target)
        .ok_or_else(|| Error::ElementNotFound(css.to_string()))
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::SelectorError(format!("{}: {:?}", css, e)))
}
