//! Cart data model and its persisted JSON form.

use crate::quantity::{round_half_up, LooseNumber};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Ordered cart contents; insertion order is display order.
pub type Cart = Vec<CartLine>;

/// One product line in the cart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    /// Product identifier, unique within a cart
    pub id: String,
    /// Display name
    pub name: String,
    /// Unit price in whole currency units (full precision is kept)
    #[serde(serialize_with = "serialize_price")]
    pub price: f64,
    /// Quantity, `0` only for malformed persisted lines
    pub qty: u32,
}

impl CartLine {
    /// Build a line from one persisted JSON entry.
    ///
    /// Returns `None` for entries that are not objects or carry no usable id.
    pub fn from_value(value: &Value, placeholder_name: &str) -> Option<CartLine> {
        let obj = value.as_object()?;
        let id = stringify_id(obj.get("id")?)?;
        let name = obj
            .get("name")
            .and_then(display_name)
            .unwrap_or_else(|| placeholder_name.to_string());
        let price = coerce_price(obj.get("price").map_or(f64::NAN, |v| v.to_number()));
        let qty = coerce_stored_qty(obj.get("qty").map_or(f64::NAN, |v| v.to_number()));
        Some(CartLine { id, name, price, qty })
    }

    /// `price * qty`, contributing nothing when the price is unusable.
    pub fn subtotal(&self) -> f64 {
        coerce_price(self.price) * f64::from(self.qty)
    }
}

/// What an add-to-cart trigger carries: the id plus raw, uncoerced name and price.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductRef {
    pub id: String,
    pub name: Option<String>,
    pub price: Option<String>,
}

impl ProductRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            price: Some(price.to_string()),
        }
    }

    /// Turn the trigger payload into a fresh line with `qty = 1`.
    pub fn to_line(&self, placeholder_name: &str) -> CartLine {
        let name = match self.name.as_deref() {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => placeholder_name.to_string(),
        };
        let price = coerce_price(self.price.as_deref().map_or(f64::NAN, |p| p.to_number()));
        CartLine {
            id: self.id.clone(),
            name,
            price,
            qty: 1,
        }
    }
}

/// Parse the raw persisted value into a cart.
///
/// Missing, malformed and non-list content all yield an empty cart. Entries
/// repeating an id already seen are dropped.
pub fn parse_cart(raw: Option<&str>, placeholder_name: &str) -> Cart {
    let Some(raw) = raw else {
        return Vec::new();
    };
    let items = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            log::warn!("stored cart is not a list, treating as empty");
            return Vec::new();
        }
        Err(e) => {
            log::warn!("stored cart is not valid JSON ({}), treating as empty", e);
            return Vec::new();
        }
    };

    let mut cart: Cart = Vec::with_capacity(items.len());
    for item in &items {
        match CartLine::from_value(item, placeholder_name) {
            Some(line) if cart.iter().any(|l| l.id == line.id) => {
                log::debug!("dropping duplicate stored line {}", line.id);
            }
            Some(line) => cart.push(line),
            None => log::debug!("dropping malformed stored line {}", item),
        }
    }
    cart
}

/// Serialize a cart to the persisted list form.
pub fn serialize_cart(cart: &[CartLine]) -> crate::Result<String> {
    Ok(serde_json::to_string(cart)?)
}

/// Unusable prices (non-finite or negative) count as zero.
pub(crate) fn coerce_price(x: f64) -> f64 {
    if x.is_finite() && x > 0.0 {
        x
    } else {
        0.0
    }
}

fn coerce_stored_qty(x: f64) -> u32 {
    if !x.is_finite() || x <= 0.0 {
        return 0;
    }
    round_half_up(x).min(f64::from(u32::MAX)) as u32
}

fn stringify_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (_, Some(u), _) => u.to_string(),
            (_, _, Some(f)) => format_plain_number(f),
            _ => n.to_string(),
        }),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// A stored name as the page shows it. Falsy values (`""`, `0`, `false`) get the placeholder.
fn display_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Bool(true) => Some("true".to_string()),
        Value::Number(n) if n.as_f64().map_or(false, |f| f != 0.0) => stringify_id(value),
        _ => None,
    }
}

fn format_plain_number(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e21 {
        format!("{:.0}", f)
    } else {
        f.to_string()
    }
}

fn serialize_price<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    // Integral prices stay integers so the stored list matches what the page writes.
    if price.fract() == 0.0 && price.abs() < 9.0e15 {
        serializer.serialize_i64(*price as i64)
    } else {
        serializer.serialize_f64(*price)
    }
}
