//! Types and traits for listing collections from a Kubernetes style apiserver
//!
//! This crate holds everything that does not need a client: resource descriptors,
//! namespace scoping, list request building, page and object wrappers, and the
//! operator settings that tune pagination.
//! The same information is re-exported from `kube_pager` under `kube_pager::core`.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod metadata;

pub mod object;
pub use object::{PageList, RawObject};

pub mod params;
pub use params::PageParams;

pub mod request;
pub use request::Request;

mod resource;
pub use resource::{ApiResource, Resource};

mod scope;
pub use scope::Namespace;

pub mod settings;
pub use settings::{OperatorSettings, WatchingSettings};

mod error;
pub use error::{ErrorResponse, StatusCause, StatusDetails};
