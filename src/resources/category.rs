//! Category, tag and transaction resources.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{OpaqueAttributes, ResourceObject};

/// A spending category.
pub type Category = ResourceObject<CategoryAttributes>;

/// A user-defined tag. The tag label is its `id`.
pub type Tag = ResourceObject<TagAttributes>;

/// A transaction.
///
/// The attribute schema is not modelled yet; see [`OpaqueAttributes`].
pub type Transaction = ResourceObject<OpaqueAttributes>;

/// Attributes of a [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAttributes {
    /// The display name of the category.
    pub name: String,
    /// Attributes this crate does not model yet.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Attributes of a [`Tag`]. Tags currently carry no attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagAttributes {
    /// Attributes this crate does not model yet.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
