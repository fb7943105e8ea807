//! kube-pager lists whole collections from a [Kubernetes](http://kubernetes.io) style apiserver.
//!
//! # Overview
//!
//! A list call against a large collection comes back in pages, each carrying a `continue`
//! token that points at the next one. [`list_objects`] follows those tokens until the server
//! reports the end of the collection, and hands back every item together with the
//! `resourceVersion` of the final page, ready to seed a watch.
//!
//! The main modules are:
//!
//! - [`client`](crate::client) with the [`Client`](crate::Client) and its layers
//! - [`config`](crate::config) for the cluster [`Config`](crate::Config) and [`OperatorSettings`](crate::core::OperatorSettings)
//! - [`lister`](crate::lister) with [`list_objects`] and the [`Transport`] seam it fetches pages through
//! - [`core`](crate::core) with the client-less resource, request, and page types
//!
//! # Listing a collection
//! ```no_run
//! use kube_pager::{core::{ApiResource, Namespace}, list_objects, Client, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let settings = config.settings.clone();
//!     let client = Client::try_from(config)?;
//!
//!     let deployments = ApiResource::from_api_version("apps/v1", "Deployment", "deployments");
//!     let snapshot = list_objects(&client, &settings, &deployments, &Namespace::named("default")).await?;
//!     for d in &snapshot.items {
//!         println!("found {:?}", d.get("metadata"));
//!     }
//!     println!("listed at resourceVersion {:?}", snapshot.resource_version);
//!     Ok(())
//! }
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

#[doc(inline)]
pub use kube_pager_client::{client, config, error, lister};
#[doc(inline)]
pub use kube_pager_client::{list_objects, Client, Config, Error, Result, Snapshot, Transport};

/// Re-exports from kube_pager_core
pub use kube_pager_core as core;

// Tests that exercise the whole client stack against a mocked apiserver
#[cfg(test)] mod mock_tests;
