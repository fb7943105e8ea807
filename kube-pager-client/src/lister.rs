//! Paginated listing of whole collections
//!
//! [`list_objects`] fetches a collection one page at a time, following the
//! server's continue tokens until the last page, and returns every item along
//! with the resource version reported by that last page.
use std::{future::Future, num::NonZeroU32};

use kube_pager_core::{request, Namespace, OperatorSettings, PageList, PageParams, RawObject, Resource};

use crate::{Client, Error};

/// Something that can fetch a single page of a collection.
///
/// Errors are the transport's own and are handed back to the caller of
/// [`list_objects`] exactly as returned.
pub trait Transport {
    /// The error type of a failed page fetch
    type Error;

    /// Perform one list request and decode the page it returns
    fn get_page(
        &self,
        request: http::Request<Vec<u8>>,
    ) -> impl Future<Output = Result<PageList, Self::Error>> + Send;
}

impl Transport for Client {
    type Error = Error;

    fn get_page(
        &self,
        request: http::Request<Vec<u8>>,
    ) -> impl Future<Output = Result<PageList, Self::Error>> + Send {
        self.request::<PageList>(request)
    }
}

/// A complete listing of a collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Every item from every page, in the order they were received
    pub items: Vec<RawObject>,
    /// The `resourceVersion` reported by the last page
    pub resource_version: Option<String>,
}

impl Snapshot {
    /// Split into the items and the resource version
    pub fn into_parts(self) -> (Vec<RawObject>, Option<String>) {
        (self.items, self.resource_version)
    }
}

/// List every object of a resource, following continue tokens until the collection is exhausted.
///
/// Each page is requested with `limit` set to `settings.watching.pagination_limit` when one is
/// configured. Items that lack a `kind` or `apiVersion` inherit them from their page
/// (`PodList` items become `Pod`); values an item already has are left untouched.
///
/// Pages are fetched strictly one after another. Any failure aborts the whole listing and is
/// returned as-is; items from earlier pages are dropped. Dropping the returned future abandons
/// the in-flight request.
///
/// The reported resource version is the one from the final page, even if that page is empty.
pub async fn list_objects<T, R>(
    transport: &T,
    settings: &OperatorSettings,
    resource: &R,
    scope: &Namespace,
) -> Result<Snapshot, T::Error>
where
    T: Transport + ?Sized,
    T::Error: From<request::Error>,
    R: Resource + ?Sized,
{
    let page_limit = settings.watching.pagination_limit.map(NonZeroU32::get);
    let mut items = Vec::new();
    let mut continue_token: Option<String> = None;
    loop {
        let mut params = PageParams::default().maybe_limit(page_limit);
        params.continue_token = continue_token.take();
        let request = resource.list_request(scope, &params)?;

        let page = transport.get_page(request).await?;
        let resource_version = page.metadata.resource_version.clone();
        continue_token = page.metadata.continue_token().map(str::to_owned);
        tracing::trace!(
            "Received {} {} at resourceVersion {:?}",
            page.items.len(),
            resource.plural(),
            resource_version
        );
        items.extend(page.into_normalized_items());

        match &continue_token {
            None => {
                return Ok(Snapshot {
                    items,
                    resource_version,
                })
            }
            Some(token) => {
                tracing::debug!("Fetching more {} with continue token {}.", resource.plural(), token);
            }
        }
    }
}
