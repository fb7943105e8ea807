//! Crate for listing whole collections from a Kubernetes style apiserver
//!
//! This crate provides a [`Client`] built on a [tower](https://docs.rs/tower) service stack,
//! and [`list_objects`](lister::list_objects) which pages through a collection by following
//! the server's continue tokens until every item has been fetched.
//!
//! # Example
//!
//! ```rust,no_run
//! use kube_pager_client::{lister::list_objects, Client, Config};
//! use kube_pager_core::{ApiResource, Namespace};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Talk to a `kubectl proxy` unless the environment says otherwise
//!     let config = Config::from_env()?;
//!     let settings = config.settings.clone();
//!     let client = Client::try_from(config)?;
//!
//!     let pods = ApiResource::new("", "v1", "Pod", "pods");
//!     let snapshot = list_objects(&client, &settings, &pods, &Namespace::All).await?;
//!     println!("{} pods at resourceVersion {:?}", snapshot.items.len(), snapshot.resource_version);
//!     Ok(())
//! }
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod client;
#[doc(inline)]
pub use client::{Client, ClientBuilder};

pub mod config;
#[doc(inline)]
pub use config::Config;

pub mod error;
#[doc(inline)]
pub use error::Error;

pub mod lister;
#[doc(inline)]
pub use lister::{list_objects, Snapshot, Transport};

/// Convient alias for `Result<T, Error>`
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Re-exports from kube_pager_core
pub use kube_pager_core as core;
