use serde::Serialize;
use stockpile_types::ItemId;

use crate::context::Context;
use crate::derive::{IdDeriver, LocalDeriver};
use crate::error::{ItemError, ItemResult};

/// Largest accepted quantity.
pub const MAX_QTY: i64 = i64::MAX;

/// An inventory record.
///
/// An item is either *unidentified* (no id yet) or *identified*, in which
/// case its id decodes back to exactly its name. [`Item::new`] always
/// returns an identified item; [`Item::unidentified`] followed by
/// [`Item::set_id`] gets there incrementally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Item {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<ItemId>,
    pub(crate) name: String,
    pub(crate) desc: String,
    pub(crate) qty: i64,
}

impl Item {
    /// Create an identified item.
    ///
    /// Fails with [`ItemError::Validation`] if `name` is empty or `qty` is
    /// negative, and with [`ItemError::Codec`] if the name cannot be encoded.
    pub fn new(name: impl Into<String>, desc: impl Into<String>, qty: i64) -> ItemResult<Self> {
        let mut item = Self::unidentified(name, desc, qty)?;
        item.id = Some(ItemId::derive(&item.name)?);
        Ok(item)
    }

    /// Create an item without an id, applying the same validation as
    /// [`Item::new`].
    pub fn unidentified(
        name: impl Into<String>,
        desc: impl Into<String>,
        qty: i64,
    ) -> ItemResult<Self> {
        let name = name.into();
        validate_name(&name)?;
        validate_qty(qty)?;
        Ok(Self {
            id: None,
            name,
            desc: desc.into(),
            qty,
        })
    }

    /// The identifier, or `None` while unidentified.
    pub fn id(&self) -> Option<&ItemId> {
        self.id.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn desc(&self) -> &str {
        &self.desc
    }

    pub fn qty(&self) -> i64 {
        self.qty
    }

    /// Returns `true` once an id has been assigned.
    pub fn is_identified(&self) -> bool {
        self.id.is_some()
    }

    /// Change the name. The item becomes unidentified until the next
    /// [`Item::set_id`].
    pub fn rename(&mut self, name: impl Into<String>) -> ItemResult<()> {
        let name = name.into();
        validate_name(&name)?;
        if name != self.name {
            self.name = name;
            self.id = None;
        }
        Ok(())
    }

    /// Derive and assign the id from the current name, in-process.
    pub async fn set_id(&mut self, ctx: &Context) -> ItemResult<()> {
        self.set_id_with(ctx, &LocalDeriver).await
    }

    /// Derive and assign the id through `deriver`, bounded by `ctx`.
    ///
    /// If `ctx` is cancelled or its deadline passes before the deriver
    /// answers, fails with [`ItemError::Cancelled`] and leaves the id as it
    /// was. A derived id that does not decode back to the name is rejected
    /// with [`ItemError::Derivation`].
    pub async fn set_id_with(&mut self, ctx: &Context, deriver: &dyn IdDeriver) -> ItemResult<()> {
        if ctx.is_done() {
            return Err(ItemError::Cancelled);
        }

        let id = tokio::select! {
            biased;
            _ = ctx.done() => return Err(ItemError::Cancelled),
            derived = deriver.derive(&self.name) => derived?,
        };

        let decoded = id.decode()?;
        if decoded != self.name {
            return Err(ItemError::Derivation(format!(
                "id {id} decodes to {decoded:?}, expected {:?}",
                self.name
            )));
        }

        self.id = Some(id);
        Ok(())
    }
}

pub(crate) fn validate_name(name: &str) -> ItemResult<()> {
    if name.is_empty() {
        return Err(ItemError::Validation {
            field: "name",
            reason: "must not be empty".into(),
        });
    }
    Ok(())
}

pub(crate) fn validate_qty(qty: i64) -> ItemResult<()> {
    if qty < 0 {
        return Err(ItemError::Validation {
            field: "qty",
            reason: format!("must not be negative, got {qty}"),
        });
    }
    Ok(())
}
