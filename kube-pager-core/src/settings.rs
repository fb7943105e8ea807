//! Operator settings that tune how collections are listed
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

/// Settings for an operator, grouped by concern
///
/// Every field has a default, so a partial (or empty) document deserializes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorSettings {
    /// Settings for listing and watching resources
    pub watching: WatchingSettings,
}

/// Settings for listing and watching resources
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchingSettings {
    /// Maximum number of items requested per list page.
    ///
    /// When unset no `limit` is sent and the server's default paging applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination_limit: Option<NonZeroU32>,
}

impl OperatorSettings {
    /// Set the per page list limit
    #[must_use]
    pub fn pagination_limit(mut self, limit: NonZeroU32) -> Self {
        self.watching.pagination_limit = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let settings: OperatorSettings = serde_yaml::from_str("{}").unwrap();
        assert_eq!(settings, OperatorSettings::default());
        assert_eq!(settings.watching.pagination_limit, None);
    }

    #[test]
    fn pagination_limit_from_yaml() {
        let settings: OperatorSettings = serde_yaml::from_str("watching:\n  pagination_limit: 100\n").unwrap();
        assert_eq!(settings.watching.pagination_limit, NonZeroU32::new(100));
    }

    #[test]
    fn zero_pagination_limit_is_invalid() {
        let res = serde_yaml::from_str::<OperatorSettings>("watching:\n  pagination_limit: 0\n");
        assert!(res.is_err());
    }

    #[test]
    fn builder_sets_limit() {
        let limit = NonZeroU32::new(5).unwrap();
        let settings = OperatorSettings::default().pagination_limit(limit);
        assert_eq!(settings.watching.pagination_limit, Some(limit));
    }
}
