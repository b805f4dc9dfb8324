use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::{CodecError, CodecResult};

/// Opaque identifier of an item, reversibly derived from its name.
///
/// An `ItemId` is the base-62 encoding of the name's UTF-8 bytes. The same
/// name always produces the same id, distinct names never collide, and
/// [`ItemId::decode`] returns the exact name. Ids are non-empty and use only
/// `[0-9A-Za-z]`, so they can appear verbatim in URL paths and store keys.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

impl ItemId {
    /// Derive the identifier for `name`.
    ///
    /// The empty name has no identifier and fails with
    /// [`CodecError::Encoding`].
    pub fn derive(name: &str) -> CodecResult<Self> {
        if name.is_empty() {
            return Err(CodecError::Encoding("empty name has no identifier".into()));
        }
        codec::encode(name).map(Self)
    }

    /// Parse an identifier received from outside (a URL path, a store key).
    ///
    /// Only the alphabet is checked; use [`ItemId::decode`] to confirm the id
    /// maps back to a UTF-8 name.
    pub fn parse(s: &str) -> CodecResult<Self> {
        if s.is_empty() {
            return Err(CodecError::Decoding {
                id: String::new(),
                reason: "identifier must not be empty".into(),
            });
        }
        if let Some((position, c)) = s.char_indices().find(|(_, c)| !codec::is_id_char(*c)) {
            return Err(CodecError::Decoding {
                id: s.to_string(),
                reason: format!("invalid character {c:?} at byte {position}"),
            });
        }
        Ok(Self(s.to_string()))
    }

    /// Recover the name this id was derived from.
    pub fn decode(&self) -> CodecResult<String> {
        codec::decode(&self.0)
    }

    /// The encoded identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the id, returning the encoded string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ItemId {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ItemId {
    type Error = CodecError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.0
    }
}
