//! Client configuration: where the apiserver lives, how to authenticate,
//! and the [`OperatorSettings`] that tune listing.
//!
//! # Usage
//! Build a [`Config`] with [`Config::new`] or [`Config::local_proxy`], or read it from the
//! environment with [`Config::from_env`], and pass it to a [`Client`][crate::Client].
use std::{
    num::NonZeroU32,
    path::{Path, PathBuf},
    time::Duration,
};

use kube_pager_core::OperatorSettings;
use secrecy::SecretString;

use crate::{error::ConfigError, Error, Result};

/// Default timeout for establishing a connection
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default timeout for reading a response, slightly above the apiserver's own request timeout
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(295);

/// Environment variable holding the cluster url
pub const CLUSTER_URL_ENV: &str = "KUBE_PAGER_CLUSTER_URL";
/// Environment variable holding the path of a bearer token file
pub const TOKEN_FILE_ENV: &str = "KUBE_PAGER_TOKEN_FILE";
/// Environment variable holding the path of a YAML [`OperatorSettings`] file
pub const SETTINGS_FILE_ENV: &str = "KUBE_PAGER_SETTINGS";
/// Environment variable overriding `watching.pagination_limit`
pub const PAGINATION_LIMIT_ENV: &str = "KUBE_PAGER_PAGINATION_LIMIT";

const LOCAL_PROXY_URL: &str = "http://127.0.0.1:8001";

/// Configuration object detailing the cluster url, credentials, timeouts and operator settings.
#[derive(Debug, Clone)]
pub struct Config {
    /// The configured cluster url
    pub cluster_url: http::Uri,
    /// Timeout for establishing a connection to the apiserver.
    ///
    /// A value of `None` means no timeout
    pub connect_timeout: Option<Duration>,
    /// Timeout for reading a response from the apiserver.
    ///
    /// A value of `None` means no timeout
    pub read_timeout: Option<Duration>,
    /// Timeout for writing a request to the apiserver.
    ///
    /// A value of `None` means no timeout
    pub write_timeout: Option<Duration>,
    /// Bearer token sent with every request
    pub token: Option<SecretString>,
    /// Settings that tune listing
    pub settings: OperatorSettings,
}

impl Config {
    /// Construct a new config where only the `cluster_url` is set by the user,
    /// and everything else receives a default value.
    pub fn new(cluster_url: http::Uri) -> Self {
        Self {
            cluster_url,
            connect_timeout: Some(DEFAULT_CONNECT_TIMEOUT),
            read_timeout: Some(DEFAULT_READ_TIMEOUT),
            write_timeout: None,
            token: None,
            settings: OperatorSettings::default(),
        }
    }

    /// Config for a `kubectl proxy` running with its default address
    pub fn local_proxy() -> Self {
        Self::new(http::Uri::from_static(LOCAL_PROXY_URL))
    }

    /// Infer the configuration from `KUBE_PAGER_*` environment variables
    ///
    /// Every variable is optional; without any of them this is [`Config::local_proxy`].
    /// A settings file is loaded first, then `KUBE_PAGER_PAGINATION_LIMIT` overrides its limit.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = match lookup(CLUSTER_URL_ENV) {
            Some(url) => Self::new(url.parse::<http::Uri>().map_err(Error::InvalidUri)?),
            None => Self::local_proxy(),
        };
        if let Some(path) = lookup(TOKEN_FILE_ENV) {
            config.token = Some(load_token(Path::new(&path))?);
        }
        if let Some(path) = lookup(SETTINGS_FILE_ENV) {
            config = config.with_settings_file(path)?;
        }
        if let Some(limit) = lookup(PAGINATION_LIMIT_ENV) {
            let limit = parse_pagination_limit(&limit)?;
            config.settings.watching.pagination_limit = Some(limit);
        }
        tracing::debug!(
            "Using cluster url {} with pagination limit {:?}",
            config.cluster_url,
            config.settings.watching.pagination_limit
        );
        Ok(config)
    }

    /// Set a bearer token
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    /// Replace the operator settings
    #[must_use]
    pub fn with_settings(mut self, settings: OperatorSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Load the operator settings from a YAML file
    pub fn with_settings_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = read_file(path)?;
        let settings = serde_yaml::from_str(&data).map_err(|e| Error::Config(ConfigError::ParseYaml(e)))?;
        Ok(self.with_settings(settings))
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| {
        Error::Config(ConfigError::ReadFile {
            path: PathBuf::from(path),
            source,
        })
    })
}

fn load_token(path: &Path) -> Result<SecretString> {
    let token = read_file(path)?;
    let token = token.trim();
    if token.is_empty() {
        return Err(Error::Config(ConfigError::EmptyToken(path.to_path_buf())));
    }
    Ok(SecretString::from(token.to_owned()))
}

fn parse_pagination_limit(value: &str) -> Result<NonZeroU32> {
    value.trim().parse::<NonZeroU32>().map_err(|source| {
        Error::Config(ConfigError::InvalidPaginationLimit {
            value: value.to_owned(),
            source,
        })
    })
}
