//! Request builder type for list calls
use crate::params::PageParams;
use thiserror::Error;

/// Possible errors when building a request.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to build a request.
    #[error("failed to build request: {0}")]
    BuildRequest(#[source] http::Error),
    /// Failed to validate request.
    #[error("failed to validate request: {0}")]
    Validation(String),
}

/// A request builder for collection endpoints
///
/// Takes a url path and produces `http::Request` objects for listing it.
#[derive(Debug, Clone)]
pub struct Request {
    /// The path component of a url
    pub url_path: String,
}

impl Request {
    /// New request with a resource's url path
    pub fn new<S: Into<String>>(url_path: S) -> Self {
        Self {
            url_path: url_path.into(),
        }
    }

    /// List one page of a collection
    pub fn list(&self, pp: &PageParams) -> Result<http::Request<Vec<u8>>, Error> {
        pp.validate()?;
        let mut qp = form_urlencoded::Serializer::new(String::new());
        pp.populate_qp(&mut qp);
        let query = qp.finish();

        let urlstr = if query.is_empty() {
            self.url_path.clone()
        } else {
            format!("{}?{}", self.url_path, query)
        };
        let req = http::Request::get(urlstr);
        req.body(vec![]).map_err(Error::BuildRequest)
    }
}
