use secrecy::ExposeSecret;

use super::middleware::{AddAuthorizationLayer, BaseUriLayer};
use crate::Config;

/// Extensions to [`Config`](crate::Config) for custom [`Client`](crate::Client).
///
/// See [`Client::new`](crate::Client::new) for an example.
///
/// This trait is sealed and cannot be implemented.
pub trait ConfigExt: private::Sealed {
    /// Layer to set the base URI of requests to the configured server.
    fn base_uri_layer(&self) -> BaseUriLayer;

    /// Optional layer to set up a bearer `Authorization` header from the configured token.
    fn auth_layer(&self) -> Option<AddAuthorizationLayer>;
}

mod private {
    pub trait Sealed {}
    impl Sealed for super::Config {}
}

impl ConfigExt for Config {
    fn base_uri_layer(&self) -> BaseUriLayer {
        BaseUriLayer::new(self.cluster_url.clone())
    }

    fn auth_layer(&self) -> Option<AddAuthorizationLayer> {
        self.token
            .as_ref()
            .map(|token| AddAuthorizationLayer::bearer(token.expose_secret()).as_sensitive(true))
    }
}

#[cfg(test)]
mod tests {
    use super::ConfigExt;
    use crate::{client::Body, Config};

    use futures::pin_mut;
    use http::{header::AUTHORIZATION, Request, Response};
    use tokio_test::assert_ready_ok;
    use tower_test::mock;

    #[test]
    fn no_token_no_auth_layer() {
        assert!(Config::local_proxy().auth_layer().is_none());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn token_sets_bearer_header() {
        let layer = Config::local_proxy().with_token("s3cr3t").auth_layer().unwrap();
        let (mut service, handle) = mock::spawn_layer::<Request<Body>, Response<Body>, _>(layer);

        let spawned = tokio::spawn(async move {
            pin_mut!(handle);
            let (request, send) = handle.next_request().await.expect("service not called");
            assert_eq!(request.headers().get(AUTHORIZATION).unwrap(), "Bearer s3cr3t");
            assert!(request.headers().get(AUTHORIZATION).unwrap().is_sensitive());
            send.send_response(Response::builder().body(Body::default()).unwrap());
        });

        assert_ready_ok!(service.poll_ready());
        service
            .call(Request::builder().uri("/").body(Body::default()).unwrap())
            .await
            .unwrap();
        spawned.await.unwrap();
    }
}
