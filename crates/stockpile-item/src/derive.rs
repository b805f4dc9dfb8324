//! The [`IdDeriver`] trait: where item identifiers come from.
//!
//! In a single process the identifier is computed locally by
//! [`LocalDeriver`]. A distributed deployment may hand derivation to an
//! external service instead; [`Item::set_id_with`](crate::Item::set_id_with)
//! accepts any implementation and bounds it with a [`Context`](crate::Context).

use async_trait::async_trait;
use stockpile_types::ItemId;

use crate::error::ItemResult;

/// Source of item identifiers.
///
/// Implementations must be pure with respect to `name`: the same name must
/// always yield the same id, so concurrent derivations agree without
/// coordination.
#[async_trait]
pub trait IdDeriver: Send + Sync {
    /// Derive the identifier for `name`.
    async fn derive(&self, name: &str) -> ItemResult<ItemId>;
}

/// Derives identifiers in-process with the base-62 codec.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalDeriver;

#[async_trait]
impl IdDeriver for LocalDeriver {
    async fn derive(&self, name: &str) -> ItemResult<ItemId> {
        Ok(ItemId::derive(name)?)
    }
}
