//! Metadata carried by list responses
use serde::{Deserialize, Deserializer, Serialize};

/// ListMeta describes metadata that synthetic list responses carry.
///
/// Only the fields relevant to pagination are kept; anything else the
/// server sends in `metadata` is ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMeta {
    /// String that identifies the server's internal version of this collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,

    /// Opaque token for fetching the next page, set when the server has more results.
    #[serde(rename = "continue", default, skip_serializing_if = "Option::is_none")]
    pub continue_: Option<String>,

    /// Estimated number of items left in the collection after this page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_item_count: Option<i64>,
}

impl ListMeta {
    /// The continue token, if the server indicated that more pages remain
    ///
    /// An empty token marks the end of the collection just like an absent one.
    pub fn continue_token(&self) -> Option<&str> {
        self.continue_.as_deref().filter(|t| !t.is_empty())
    }
}

/// Deserialize an explicit `null` as the default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
