use crate::request::Error;

/// The namespace scope a collection is listed in.
///
/// [`Namespace::All`] covers both cluster-scoped resources and namespaced resources
/// listed across every namespace. The scope is only ever used to build a url path,
/// it carries no knowledge of whether a resource is actually namespaced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Every namespace, or no namespace for cluster-scoped resources
    #[default]
    All,
    /// A single named namespace
    Named(String),
}

impl Namespace {
    /// Scope to a single namespace
    pub fn named(ns: impl Into<String>) -> Self {
        Self::Named(ns.into())
    }

    /// The namespace name, if scoped to one
    pub fn as_deref(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Named(ns) => Some(ns),
        }
    }

    /// Reject names that would escape their path segment
    pub(crate) fn validate(&self) -> Result<(), Error> {
        match self.as_deref() {
            Some("") => Err(Error::Validation("Namespace name must not be empty".into())),
            Some(ns) if ns.contains(['/', '?', '#']) => Err(Error::Validation(format!(
                "Namespace name {ns:?} must not contain '/', '?' or '#'"
            ))),
            _ => Ok(()),
        }
    }
}

impl From<Option<&str>> for Namespace {
    fn from(ns: Option<&str>) -> Self {
        ns.map_or(Self::All, Self::named)
    }
}

impl From<&str> for Namespace {
    fn from(ns: &str) -> Self {
        Self::named(ns)
    }
}

impl From<String> for Namespace {
    fn from(ns: String) -> Self {
        Self::Named(ns)
    }
}
