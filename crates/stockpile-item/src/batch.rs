//! Strict, all-or-nothing decoding of item batches.
//!
//! The wire schema is a JSON array of objects carrying exactly `name`
//! (string), `desc` (string), and `qty` (integer). Any deviation rejects the
//! whole batch: a non-array root, an unknown or missing key, or a mistyped
//! value. Elements are first checked against the schema, then built with
//! [`Item::new`]; the first failure of either kind aborts the batch.
//!
//! A `qty` integer above `i64::MAX` is an overflow and fails validation. A
//! numeric literal too large even for an `f64` (beyond about `1.8e308`) never
//! gets that far: the JSON parser rejects the document, so it surfaces as a
//! schema error.

use serde::Deserialize;
use serde_json::{Number, Value};
use tracing::debug;

use crate::error::{ItemError, ItemResult};
use crate::item::Item;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Candidate {
    name: String,
    desc: String,
    qty: Number,
}

/// Decode a JSON array into validated, identified items.
///
/// Duplicate names are kept and yield items with equal ids.
///
/// # Examples
///
/// ```
/// use stockpile_item::decode_batch;
///
/// let items = decode_batch(br#"[{"name": "abc", "desc": "test", "qty": 100}]"#).unwrap();
/// assert_eq!(items[0].name(), "abc");
///
/// assert!(decode_batch(br#"[{"unknown": "key"}]"#).is_err());
/// ```
pub fn decode_batch(data: &[u8]) -> ItemResult<Vec<Item>> {
    let root: Value = serde_json::from_slice(data)
        .map_err(|e| ItemError::Schema(format!("invalid JSON: {e}")))?;

    let elements = match root {
        Value::Array(elements) => elements,
        other => {
            return Err(ItemError::Schema(format!(
                "expected an array of items, found {}",
                kind(&other)
            )))
        }
    };

    let candidates = elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            serde_json::from_value::<Candidate>(element)
                .map_err(|e| ItemError::Schema(format!("item {index}: {e}")))
        })
        .collect::<ItemResult<Vec<_>>>()?;

    let items = candidates
        .into_iter()
        .enumerate()
        .map(|(index, c)| {
            let qty = quantity(index, &c.qty)?;
            Item::new(c.name, c.desc, qty)
        })
        .collect::<ItemResult<Vec<_>>>()?;

    debug!(count = items.len(), "decoded item batch");
    Ok(items)
}

/// Narrow a JSON number to an `i64` quantity.
///
/// Integers beyond `i64` are a validation failure (overflow); fractional
/// numbers do not match the schema. Sign checks are left to [`Item::new`].
fn quantity(index: usize, number: &Number) -> ItemResult<i64> {
    if let Some(qty) = number.as_i64() {
        return Ok(qty);
    }
    if number.is_u64() {
        return Err(overflow(number));
    }
    // Without arbitrary precision, integers past u64 arrive as floats, and
    // so does `-0`.
    match number.as_f64() {
        Some(f) if f == 0.0 && f.is_sign_negative() => Ok(0),
        Some(f) if f.fract() == 0.0 && f.abs() >= 9_223_372_036_854_775_808.0 => {
            Err(overflow(number))
        }
        _ => Err(ItemError::Schema(format!(
            "item {index}: qty must be an integer, found {number}"
        ))),
    }
}

fn overflow(number: &Number) -> ItemError {
    ItemError::Validation {
        field: "qty",
        reason: format!("{number} exceeds the maximum quantity {}", crate::item::MAX_QTY),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
