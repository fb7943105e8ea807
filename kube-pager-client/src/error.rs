//! Error handling in [`kube_pager_client`][crate]
use std::path::PathBuf;

use thiserror::Error;

pub use kube_pager_core::ErrorResponse;

/// Possible errors when talking to the apiserver
#[derive(Error, Debug)]
pub enum Error {
    /// ApiError for when things fail
    ///
    /// Carries the `Status` object the apiserver answered a non-success status code with.
    /// A `410 Gone` here usually means a continue token expired mid listing.
    #[error("ApiError: {0} ({0:?})")]
    Api(#[source] ErrorResponse),

    /// Service error
    #[error("ServiceError: {0}")]
    Service(#[source] tower::BoxError),

    /// Failed to read a response body
    #[error("Error reading response body: {0}")]
    ReadBody(#[source] tower::BoxError),

    /// UTF-8 Error
    #[error("UTF-8 Error: {0}")]
    FromUtf8(#[source] std::string::FromUtf8Error),

    /// Http based error
    #[error("HttpError: {0}")]
    HttpError(#[source] http::Error),

    /// Failed to construct a URI.
    #[error("InvalidUri: {0}")]
    InvalidUri(#[source] http::uri::InvalidUri),

    /// Common error case when requesting parsing into own structs
    #[error("Error deserializing response: {0}")]
    SerdeError(#[source] serde_json::Error),

    /// Failed to build request
    #[error("Failed to build request: {0}")]
    BuildRequest(#[from] kube_pager_core::request::Error),

    /// Configuration error
    #[error("Error loading config: {0}")]
    Config(#[source] ConfigError),

    /// The cluster url uses `https`, but no TLS stack is available
    #[error("TLS required but no TLS stack available")]
    TlsRequired,
}

#[derive(Error, Debug)]
// Redundant with the error messages and machine names
#[allow(missing_docs)]
/// Possible errors when loading config
pub enum ConfigError {
    #[error("Failed to read '{path:?}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings YAML: {0}")]
    ParseYaml(#[source] serde_yaml::Error),

    #[error("Invalid pagination limit '{value}': {source}")]
    InvalidPaginationLimit {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("Token file '{0:?}' is empty")]
    EmptyToken(PathBuf),
}
