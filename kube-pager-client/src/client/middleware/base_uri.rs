//! Resolve request paths against the cluster url.
use http::{uri, Request, Uri};
use tower::{Layer, Service};

/// Layer that applies [`BaseUri`] which makes all requests relative to the cluster url.
///
/// A path in the cluster url (e.g. behind a proxy prefix) is kept in front of every request path.
#[derive(Debug, Clone)]
pub struct BaseUriLayer {
    base: Base,
}

#[derive(Debug, Clone)]
struct Base {
    scheme: Option<uri::Scheme>,
    authority: Option<uri::Authority>,
    // no trailing slash; empty when the cluster url has no path
    prefix: String,
}

impl BaseUriLayer {
    /// Resolve all requests against `base_uri`.
    pub fn new(base_uri: Uri) -> Self {
        let parts = base_uri.into_parts();
        let prefix = parts
            .path_and_query
            .as_ref()
            .map(|pq| pq.path().trim_end_matches('/').to_owned())
            .unwrap_or_default();
        Self {
            base: Base {
                scheme: parts.scheme,
                authority: parts.authority,
                prefix,
            },
        }
    }
}

impl<S> Layer<S> for BaseUriLayer {
    type Service = BaseUri<S>;

    fn layer(&self, inner: S) -> Self::Service {
        BaseUri {
            base: self.base.clone(),
            inner,
        }
    }
}

/// Middleware that sets the scheme, authority and path prefix of every request.
#[derive(Debug, Clone)]
pub struct BaseUri<S> {
    base: Base,
    inner: S,
}

impl<S, ReqBody> Service<Request<ReqBody>> for BaseUri<S>
where
    S: Service<Request<ReqBody>>,
{
    type Error = S::Error;
    type Future = S::Future;
    type Response = S::Response;

    fn poll_ready(&mut self, cx: &mut std::task::Context<'_>) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let (mut parts, body) = req.into_parts();
        parts.uri = self.base.resolve(parts.uri.path_and_query());
        self.inner.call(Request::from_parts(parts, body))
    }
}

impl Base {
    fn resolve(&self, req_pandq: Option<&uri::PathAndQuery>) -> Uri {
        let mut builder = uri::Builder::new();
        if let Some(scheme) = &self.scheme {
            builder = builder.scheme(scheme.clone());
        }
        if let Some(authority) = &self.authority {
            builder = builder.authority(authority.clone());
        }
        // `PathAndQuery` always starts with a slash
        let pandq = match req_pandq {
            Some(pq) => format!("{}{}", self.prefix, pq),
            None if self.prefix.is_empty() => "/".to_owned(),
            None => self.prefix.clone(),
        };
        // A valid prefix joined with a valid path and query is itself valid.
        builder.path_and_query(pandq).build().expect("valid uri")
    }
}
