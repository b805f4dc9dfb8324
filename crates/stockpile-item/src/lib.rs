//! Item entity for Stockpile.
//!
//! An [`Item`] is an inventory record (name, description, quantity) whose
//! identifier is derived reversibly from its name. This crate owns the three
//! places where an item crosses a boundary:
//!
//! - [`item`] -- validated construction and identifier derivation, including
//!   the cancellable [`Item::set_id`]
//! - [`fields`] -- lossless conversion to and from the flat [`FieldMap`]
//!   layout of a hash-oriented key-value store
//! - [`batch`] -- all-or-nothing decoding of a JSON array of candidate items
//!
//! [`FieldMap`]: stockpile_types::FieldMap

pub mod batch;
pub mod context;
pub mod derive;
pub mod error;
pub mod fields;
pub mod item;

pub use batch::decode_batch;
pub use context::Context;
pub use derive::{IdDeriver, LocalDeriver};
pub use error::{ItemError, ItemResult};
pub use fields::{marshal_fields, unmarshal_fields};
pub use item::{Item, MAX_QTY};
