//! Quantity normalization and loose numeric coercion.
//!
//! Values reaching the cart come from persisted JSON, markup attributes and
//! form inputs, so they are coerced the way a browser coerces form data: a
//! trimmed string parses as a number literal, an empty string is zero, and
//! anything unparsable is NaN.

use serde_json::Value;

/// Smallest quantity a cart line can hold
pub const MIN_QTY: u32 = 1;
/// Largest quantity a cart line can hold
pub const MAX_QTY: u32 = 99;

/// Types that can be coerced to an `f64` without failing.
///
/// Unparsable input yields `NaN` rather than an error; callers decide what
/// a non-finite value means for them.
pub trait LooseNumber {
    fn to_number(&self) -> f64;
}

impl LooseNumber for str {
    fn to_number(&self) -> f64 {
        parse_number_literal(self)
    }
}

impl LooseNumber for String {
    fn to_number(&self) -> f64 {
        parse_number_literal(self)
    }
}

impl LooseNumber for f64 {
    fn to_number(&self) -> f64 {
        *self
    }
}

impl LooseNumber for i64 {
    fn to_number(&self) -> f64 {
        *self as f64
    }
}

impl LooseNumber for u32 {
    fn to_number(&self) -> f64 {
        f64::from(*self)
    }
}

impl LooseNumber for Value {
    fn to_number(&self) -> f64 {
        match self {
            Value::Null => 0.0,
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
            Value::String(s) => parse_number_literal(s),
            // Arrays coerce through their joined string form: [] is "", [x] is x.
            Value::Array(items) => match items.as_slice() {
                [] => 0.0,
                [Value::Null] => 0.0,
                [Value::Bool(_)] | [Value::Object(_)] => f64::NAN,
                [single] => single.to_number(),
                _ => f64::NAN,
            },
            Value::Object(_) => f64::NAN,
        }
    }
}

/// Round half-up to the nearest integer (`2.5` becomes `3`, `-2.5` becomes `-2`).
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Clamp any value to a valid line quantity in `[MIN_QTY, MAX_QTY]`.
///
/// Non-finite input (including unparsable strings) maps to `1`, so malformed
/// input can never produce an invalid cart state.
///
/// ```
/// use neoncart::quantity::clamp_qty;
///
/// assert_eq!(clamp_qty("3"), 3);
/// assert_eq!(clamp_qty(&150.0), 99);
/// assert_eq!(clamp_qty("abc"), 1);
/// ```
pub fn clamp_qty<V: LooseNumber + ?Sized>(value: &V) -> u32 {
    let x = value.to_number();
    if !x.is_finite() {
        return MIN_QTY;
    }
    round_half_up(x).clamp(f64::from(MIN_QTY), f64::from(MAX_QTY)) as u32
}

fn parse_number_literal(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match s.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return parse_radix_integer(&s[2..], radix);
    }

    // f64::from_str also accepts "inf" and "nan", which are not number literals here.
    let literal_chars = s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !literal_chars || !s.chars().any(|c| c.is_ascii_digit()) {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_radix_integer(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits.chars().try_fold(0.0f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    })
    .unwrap_or(f64::NAN)
}
