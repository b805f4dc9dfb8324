//! Field-map layout shared by the marshaller and the store backends.

use std::collections::BTreeMap;

/// Flat string-keyed representation of a record in a hash-oriented store.
///
/// A `BTreeMap` keeps field order stable in logs and test output.
pub type FieldMap = BTreeMap<String, String>;

/// Field holding the item name.
pub const NAME: &str = "name";

/// Field holding the item description.
pub const DESC: &str = "desc";

/// Field holding the decimal quantity.
pub const QTY: &str = "qty";

/// Every field a stored item record must carry, in marshalling order.
pub const REQUIRED: [&str; 3] = [NAME, DESC, QTY];
