//! A basic API client for listing collections
//!
//! The [`Client`] wraps an arbitrary [tower](`Service`) stack and turns apiserver
//! responses into deserialized values or [`Error::Api`] failures.
use bytes::Bytes;
use futures::future::BoxFuture;
use http::{Request, Response, StatusCode};
use http_body_util::{combinators::UnsyncBoxBody, BodyExt, Full};
use serde::de::DeserializeOwned;
use tower::{buffer::Buffer, util::BoxService, BoxError, Layer, Service, ServiceExt};
use tower_http::map_response_body::MapResponseBodyLayer;

use crate::{error::ErrorResponse, Error, Result};

mod builder;
mod config_ext;
pub mod middleware;

pub use builder::{ClientBuilder, GenericService};
pub use config_ext::ConfigExt;

/// A request body.
pub type Body = Full<Bytes>;

/// A type erased response body.
pub type BoxBody = UnsyncBoxBody<Bytes, BoxError>;

/// Client for connecting with an apiserver.
///
/// The easiest way to instantiate the client is from a [`Config`](crate::Config)
/// using [`Client::try_from`].
#[derive(Clone)]
pub struct Client {
    // - `Buffer` for cheap clone
    // - `BoxFuture` for dynamic response future type
    inner: Buffer<Request<Body>, BoxFuture<'static, Result<Response<BoxBody>, BoxError>>>,
}

impl Client {
    /// Create a [`Client`] using a custom `Service` stack.
    ///
    /// [`ConfigExt`] provides extensions for building a custom stack.
    ///
    /// To create with the default stack with a [`Config`](crate::Config), use
    /// [`Client::try_from`].
    ///
    /// # Example
    ///
    /// ```rust
    /// # async fn doc() -> Result<(), Box<dyn std::error::Error>> {
    /// use kube_pager_client::{client::{Body, ConfigExt}, Client, Config};
    /// use hyper_util::{client::legacy::{connect::HttpConnector, Client as HyperClient}, rt::TokioExecutor};
    /// use tower::ServiceBuilder;
    ///
    /// let config = Config::local_proxy();
    /// let service = ServiceBuilder::new()
    ///     .layer(config.base_uri_layer())
    ///     .option_layer(config.auth_layer())
    ///     .service(HyperClient::builder(TokioExecutor::new()).build::<_, Body>(HttpConnector::new()));
    /// let client = Client::new(service);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new<S, B>(service: S) -> Self
    where
        S: Service<Request<Body>, Response = Response<B>> + Send + 'static,
        S::Future: Send + 'static,
        S::Error: Into<BoxError>,
        B: http_body::Body<Data = Bytes> + Send + 'static,
        B::Error: Into<BoxError>,
    {
        // Erase the response body and error types to avoid type parameters.
        let service = MapResponseBodyLayer::new(box_body::<B>)
            .layer(service)
            .map_err(|e: S::Error| -> BoxError { e.into() });
        Self {
            inner: Buffer::new(BoxService::new(service), 1024),
        }
    }

    /// Perform a raw HTTP request against the API and return the raw response back.
    pub async fn send(&self, request: Request<Body>) -> Result<Response<BoxBody>> {
        let mut svc = self.inner.clone();
        let res = svc
            .ready()
            .await
            .map_err(Error::Service)?
            .call(request)
            .await
            .map_err(|err| {
                // Error decorating request
                err.downcast::<Error>()
                    .map(|e| *e)
                    // Error requesting
                    .unwrap_or_else(Error::Service)
            })?;
        Ok(res)
    }

    /// Perform a raw HTTP request against the API and deserialize the response
    /// as JSON to some known type.
    pub async fn request<T>(&self, request: Request<Vec<u8>>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let text = self.request_text(request).await?;

        serde_json::from_str(&text).map_err(|e| {
            tracing::warn!("{}, {:?}", text, e);
            Error::SerdeError(e)
        })
    }

    /// Perform a raw HTTP request against the API and get back the response
    /// as a string
    pub async fn request_text(&self, request: Request<Vec<u8>>) -> Result<String> {
        let res = self.send(request.map(|body| Body::new(Bytes::from(body)))).await?;
        let status = res.status();
        tracing::trace!("Status = {:?}", status);
        let body_bytes = res
            .into_body()
            .collect()
            .await
            .map_err(Error::ReadBody)?
            .to_bytes();
        let text = String::from_utf8(body_bytes.to_vec()).map_err(Error::FromUtf8)?;
        handle_api_errors(&text, status)?;

        Ok(text)
    }
}

fn box_body<B>(body: B) -> BoxBody
where
    B: http_body::Body<Data = Bytes> + Send + 'static,
    B::Error: Into<BoxError>,
{
    body.map_err(Into::into).boxed_unsync()
}

/// Apiserver returned error handling
///
/// Either the apiserver returned an explicit `Status` object,
/// or it somehow returned something we couldn't parse as one.
///
/// In either case, present an ApiError upstream.
fn handle_api_errors(text: &str, s: StatusCode) -> Result<()> {
    if s.is_client_error() || s.is_server_error() {
        if let Ok(errdata) = serde_json::from_str::<ErrorResponse>(text) {
            tracing::debug!("Unsuccessful: {:?}", errdata);
            Err(Error::Api(errdata))
        } else {
            tracing::warn!("Unsuccessful data error parse: {}", text);
            let ae = ErrorResponse {
                status: s.to_string(),
                code: s.as_u16(),
                message: format!("{text:?}"),
                reason: "Failed to parse error data".into(),
                details: None,
            };
            tracing::debug!("Unsuccessful: {:?} (reconstruct)", ae);
            Err(Error::Api(ae))
        }
    } else {
        Ok(())
    }
}

impl TryFrom<crate::Config> for Client {
    type Error = Error;

    /// Builds a default [`Client`] from a [`Config`](crate::Config), see [`ClientBuilder`] if more customization is required
    fn try_from(config: crate::Config) -> Result<Self> {
        Ok(ClientBuilder::try_from(config)?.build())
    }
}
