//! Hash-keyed record storage for Stockpile.
//!
//! The store is a plain key-value contract: each key maps to a flat
//! [`FieldMap`] of string fields, the shape of a Redis hash. It never
//! interprets the fields; turning them into items is the marshaller's job in
//! `stockpile-item`.
//!
//! All backends implement the [`HashStore`] trait:
//!
//! - [`InMemoryHashStore`] -- `HashMap`-based store for tests and embedding
//!
//! [`FieldMap`]: stockpile_types::FieldMap

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryHashStore;
pub use traits::HashStore;
