//! Query parameters for paginated list calls
use crate::request::Error;

/// Query parameters for fetching one page of a collection
///
/// Only parameters that carry a value end up in the query string:
/// an unset limit and an absent or empty continue token are omitted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageParams {
    /// Limit the number of results per page.
    ///
    /// If there are more results, the server will respond with a continue token which can be used to fetch another page
    /// of results. See the [Kubernetes API docs](https://kubernetes.io/docs/reference/using-api/api-concepts/#retrieving-large-results-sets-in-chunks)
    /// for pagination details.
    pub limit: Option<u32>,

    /// Fetch a subsequent page of results.
    ///
    /// The opaque token handed out in the `metadata.continue` field of the previous page.
    pub continue_token: Option<String>,
}

impl PageParams {
    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.limit == Some(0) {
            return Err(Error::Validation("PageParams::limit must be a positive number".into()));
        }
        Ok(())
    }

    pub(crate) fn populate_qp(&self, qp: &mut form_urlencoded::Serializer<String>) {
        if let Some(limit) = &self.limit {
            qp.append_pair("limit", &limit.to_string());
        }
        if let Some(continue_token) = self.continue_token.as_deref().filter(|t| !t.is_empty()) {
            qp.append_pair("continue", continue_token);
        }
    }
}

/// Builder interface to PageParams
///
/// Usage:
/// ```
/// use kube_pager_core::PageParams;
/// let pp = PageParams::default()
///     .limit(500)
///     .continue_token("eyJ2IjoibWV0YS5rOHMuaW8vdjEi");
/// ```
impl PageParams {
    /// Sets a per page result limit.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the limit when one is given, clears it otherwise.
    #[must_use]
    pub fn maybe_limit(mut self, limit: Option<u32>) -> Self {
        self.limit = limit;
        self
    }

    /// Sets a continue token.
    #[must_use]
    pub fn continue_token(mut self, token: &str) -> Self {
        self.continue_token = Some(token.to_string());
        self
    }
}
