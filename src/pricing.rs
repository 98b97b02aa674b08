//! Count and total derived from cart contents.

use crate::cart::CartLine;

/// Total number of items: the sum of every line's quantity.
pub fn cart_count(cart: &[CartLine]) -> u64 {
    cart.iter().map(|line| u64::from(line.qty)).sum()
}

/// Monetary total: the sum of `price * qty`.
///
/// Unusable prices contribute nothing, so the result is never negative or NaN.
pub fn cart_total(cart: &[CartLine]) -> f64 {
    cart.iter().map(CartLine::subtotal).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::parse_cart;
    use proptest::prelude::*;

    fn line(id: &str, price: f64, qty: u32) -> CartLine {
        CartLine { id: id.into(), name: id.into(), price, qty }
    }

    #[test]
    fn empty_cart_is_zero() {
        assert_eq!(cart_count(&[]), 0);
        assert_eq!(cart_total(&[]), 0.0);
    }

    #[test]
    fn sums_lines() {
        let cart = vec![line("a", 100.0, 2), line("b", 49.5, 1)];
        assert_eq!(cart_count(&cart), 3);
        assert_eq!(cart_total(&cart), 249.5);
    }

    #[test]
    fn bad_prices_contribute_nothing() {
        let cart = vec![line("a", f64::NAN, 3), line("b", -10.0, 1), line("c", 5.0, 2)];
        assert_eq!(cart_count(&cart), 6);
        assert_eq!(cart_total(&cart), 10.0);
    }

    fn loose_field() -> impl Strategy<Value = serde_json::Value> {
        prop_oneof![
            Just(serde_json::Value::Null),
            any::<bool>().prop_map(serde_json::Value::Bool),
            any::<i32>().prop_map(|n| serde_json::json!(n)),
            (-1.0e6f64..1.0e6).prop_map(|n| serde_json::json!(n)),
            "[a-z0-9 .-]{0,6}".prop_map(serde_json::Value::String),
        ]
    }

    proptest! {
        #[test]
        fn totals_never_negative_or_nan(
            fields in proptest::collection::vec((loose_field(), loose_field()), 0..12)
        ) {
            let items: Vec<serde_json::Value> = fields
                .into_iter()
                .enumerate()
                .map(|(i, (price, qty))| serde_json::json!({"id": i, "price": price, "qty": qty}))
                .collect();
            let raw = serde_json::Value::Array(items).to_string();
            let cart = parse_cart(Some(&raw), "P");
            let total = cart_total(&cart);
            prop_assert!(total >= 0.0);
            prop_assert!(!total.is_nan());
            prop_assert!(cart_count(&cart) <= 12 * u64::from(u32::MAX));
        }
    }
}
