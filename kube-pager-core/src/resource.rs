use crate::{params::PageParams, request, scope::Namespace, Request};

/// A collection endpoint that can be listed.
///
/// Implementors decide how a [`Namespace`] scope maps onto a url path;
/// listing code only forwards the scope it was given.
pub trait Resource {
    /// Plural name of the resource, used for diagnostics
    fn plural(&self) -> &str;

    /// Url path of the collection within the given scope
    fn url_path(&self, scope: &Namespace) -> String;

    /// A GET request for one page of the collection
    ///
    /// Fails with [`request::Error::Validation`] for a namespace that is empty or would
    /// leave its path segment.
    fn list_request(
        &self,
        scope: &Namespace,
        params: &PageParams,
    ) -> Result<http::Request<Vec<u8>>, request::Error> {
        scope.validate()?;
        Request::new(self.url_path(scope)).list(params)
    }
}

impl<R: Resource + ?Sized> Resource for &R {
    fn plural(&self) -> &str {
        (**self).plural()
    }

    fn url_path(&self, scope: &Namespace) -> String {
        (**self).url_path(scope)
    }

    fn list_request(
        &self,
        scope: &Namespace,
        params: &PageParams,
    ) -> Result<http::Request<Vec<u8>>, request::Error> {
        (**self).list_request(scope, params)
    }
}

/// Contains information about Kubernetes API resources
/// which is enough for listing them.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct ApiResource {
    /// Resource group, empty for core group.
    pub group: String,
    /// group version
    pub version: String,
    /// apiVersion of the resource (v1 for core group,
    /// groupName/groupVersions for other).
    pub api_version: String,
    /// Singular PascalCase name of the resource
    pub kind: String,
    /// Plural name of the resource
    pub plural: String,
}

impl ApiResource {
    /// Creates ApiResource from group, version, kind and plural name.
    pub fn new(group: &str, version: &str, kind: &str, plural: &str) -> Self {
        let api_version = if group.is_empty() {
            version.to_string()
        } else {
            format!("{group}/{version}")
        };
        ApiResource {
            group: group.to_string(),
            version: version.to_string(),
            api_version,
            kind: kind.to_string(),
            plural: plural.to_string(),
        }
    }

    /// Creates ApiResource from an `apiVersion` string and plural name.
    ///
    /// `v1` resolves to the core group, `apps/v1` to the `apps` group.
    pub fn from_api_version(api_version: &str, kind: &str, plural: &str) -> Self {
        match api_version.split_once('/') {
            Some((group, version)) => Self::new(group, version, kind, plural),
            None => Self::new("", api_version, kind, plural),
        }
    }
}

impl Resource for ApiResource {
    fn plural(&self) -> &str {
        &self.plural
    }

    fn url_path(&self, scope: &Namespace) -> String {
        let n = if let Some(ns) = scope.as_deref() {
            format!("namespaces/{ns}/")
        } else {
            "".into()
        };
        format!(
            "/{group}/{api_version}/{namespaces}{plural}",
            group = if self.group.is_empty() { "api" } else { "apis" },
            api_version = self.api_version,
            namespaces = n,
            plural = self.plural
        )
    }
}
