//! Foundation types for Stockpile.
//!
//! Every item in Stockpile is addressed by an identifier derived from its
//! name. The derivation is a reversible radix encoding rather than a hash, so
//! an identifier can always be decoded back to the exact name it came from.
//!
//! # Key Types
//!
//! - [`ItemId`] -- Opaque, reversible identifier confined to `[0-9A-Za-z]`
//! - [`FieldMap`] -- Flat string-keyed record layout used by hash stores
//! - [`CodecError`] -- Failures of the identifier codec
//!
//! The raw codec lives in [`codec`] for callers that work with plain strings.

pub mod codec;
pub mod error;
pub mod fields;
pub mod id;

pub use codec::{decode, encode, encode_bytes};
pub use error::{CodecError, CodecResult};
pub use fields::FieldMap;
pub use id::ItemId;
