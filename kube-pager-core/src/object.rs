//! Raw objects and the list pages that carry them.
use crate::metadata::{null_as_default, ListMeta};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A collection member exactly as the server returned it
///
/// Only `kind` and `apiVersion` are ever inspected; everything else is carried opaquely.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct RawObject(Map<String, Value>);

impl RawObject {
    /// An object with no fields
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a top-level field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether the object defines a top-level field, even as `null`
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// The object's own `kind`, if it is a string
    pub fn kind(&self) -> Option<&str> {
        self.get("kind").and_then(Value::as_str)
    }

    /// The object's own `apiVersion`, if it is a string
    pub fn api_version(&self) -> Option<&str> {
        self.get("apiVersion").and_then(Value::as_str)
    }

    /// Set a top-level field unless the object already defines it
    ///
    /// Returns whether the field was set.
    pub fn set_default(&mut self, key: &str, value: impl Into<Value>) -> bool {
        if self.0.contains_key(key) {
            return false;
        }
        self.0.insert(key.to_string(), value.into());
        true
    }

    /// Fill in `kind` and `apiVersion` from the enclosing list where the object lacks them
    ///
    /// Existing values are never overwritten.
    #[must_use]
    pub fn with_type_defaults(mut self, kind: Option<&str>, api_version: Option<&str>) -> Self {
        if let Some(kind) = kind {
            self.set_default("kind", kind);
        }
        if let Some(api_version) = api_version {
            self.set_default("apiVersion", api_version);
        }
        self
    }

    /// Borrow the underlying map
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Unwrap into the underlying map
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for RawObject {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<RawObject> for Value {
    fn from(obj: RawObject) -> Self {
        Value::Object(obj.0)
    }
}

/// One page of a list response
///
/// This is the `PodList`, `DeploymentList`, etc. envelope the apiserver returns for
/// collection GETs, with the items left untyped. Every field is optional on the wire:
/// a missing `metadata` or `items` (or an explicit `null`) deserializes to its empty default.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageList {
    /// The kind of the list, e.g. `PodList`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// The apiVersion of the list, e.g. `v1`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    /// ListMeta - carries the `resourceVersion` and `continue` token
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: ListMeta,

    /// The objects on this page
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<RawObject>,
}

impl PageList {
    /// The kind to report for items on this page
    ///
    /// A trailing `List` is stripped from the list kind (`PodList` becomes `Pod`);
    /// any other kind is used verbatim.
    pub fn item_kind(&self) -> Option<&str> {
        self.kind.as_deref().map(|kind| kind.strip_suffix("List").unwrap_or(kind))
    }

    /// Consume the page, yielding its items with `kind` and `apiVersion` filled in
    /// from the list wherever an item does not define them itself
    pub fn into_normalized_items(self) -> impl Iterator<Item = RawObject> {
        let kind = self.item_kind().map(str::to_owned);
        let api_version = self.api_version;
        self.items
            .into_iter()
            .map(move |item| item.with_type_defaults(kind.as_deref(), api_version.as_deref()))
    }
}
