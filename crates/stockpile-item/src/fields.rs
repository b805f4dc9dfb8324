//! Conversion between [`Item`] and the flat [`FieldMap`] of a hash store.
//!
//! A stored item is keyed by its id and carries exactly three fields:
//! `name`, `desc`, and `qty` (decimal). Marshalling is pure: it never
//! touches the item, and unmarshalling only writes its output once every
//! field has been read and checked.

use stockpile_types::fields::{DESC, NAME, QTY};
use stockpile_types::{FieldMap, ItemId};

use crate::error::{ItemError, ItemResult};
use crate::item::Item;

/// Convert an identified item into its store key and field map.
///
/// Fails with [`ItemError::Validation`] if the item has no id yet.
pub fn marshal_fields(item: &Item) -> ItemResult<(ItemId, FieldMap)> {
    let key = item.id.clone().ok_or_else(|| ItemError::Validation {
        field: "id",
        reason: "item has no identifier; call set_id first".into(),
    })?;

    let mut fields = FieldMap::new();
    fields.insert(NAME.to_string(), item.name.clone());
    fields.insert(DESC.to_string(), item.desc.clone());
    fields.insert(QTY.to_string(), item.qty.to_string());
    Ok((key, fields))
}

/// Rebuild an item from its store key and field map into `out`.
///
/// Fails with [`ItemError::MissingField`] if `name`, `desc`, or `qty` is
/// absent, and with [`ItemError::MalformedValue`] if `qty` is not a
/// non-negative decimal `i64`, `name` is empty, or `key` is not a
/// well-formed id. On error `out` is left unchanged.
pub fn unmarshal_fields(key: &str, fields: &FieldMap, out: &mut Item) -> ItemResult<()> {
    let name = required(fields, NAME)?;
    let desc = required(fields, DESC)?;
    let raw_qty = required(fields, QTY)?;

    let id = ItemId::parse(key).map_err(|e| ItemError::MalformedValue {
        field: "key",
        reason: e.to_string(),
    })?;

    if name.is_empty() {
        return Err(ItemError::MalformedValue {
            field: NAME,
            reason: "must not be empty".into(),
        });
    }

    let qty: i64 = raw_qty.parse().map_err(|e| ItemError::MalformedValue {
        field: QTY,
        reason: format!("{raw_qty:?} is not an integer: {e}"),
    })?;
    if qty < 0 {
        return Err(ItemError::MalformedValue {
            field: QTY,
            reason: format!("must not be negative, got {qty}"),
        });
    }

    *out = Item {
        id: Some(id),
        name: name.to_string(),
        desc: desc.to_string(),
        qty,
    };
    Ok(())
}

fn required<'a>(fields: &'a FieldMap, field: &'static str) -> ItemResult<&'a str> {
    fields
        .get(field)
        .map(String::as_str)
        .ok_or(ItemError::MissingField(field))
}

impl Item {
    /// Shorthand for [`marshal_fields`].
    pub fn to_fields(&self) -> ItemResult<(ItemId, FieldMap)> {
        marshal_fields(self)
    }

    /// Build a new item from a stored record. See [`unmarshal_fields`].
    pub fn from_fields(key: &str, fields: &FieldMap) -> ItemResult<Self> {
        let mut item = Item {
            id: None,
            name: String::new(),
            desc: String::new(),
            qty: 0,
        };
        unmarshal_fields(key, fields, &mut item)?;
        Ok(item)
    }
}
