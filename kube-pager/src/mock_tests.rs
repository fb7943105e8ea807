use crate::{
    client::Body,
    core::{ApiResource, Namespace, OperatorSettings},
    list_objects, Client, Error,
};
use anyhow::Result;
use http::{Request, Response, StatusCode};
use serde_json::{json, Value};
use std::num::NonZeroU32;

fn kopfexamples() -> ApiResource {
    ApiResource::new("kopf.dev", "v1", "KopfExample", "kopfexamples")
}

fn example(n: u32) -> Value {
    json!({ "metadata": { "name": format!("kex{n}"), "namespace": "default" }, "spec": { "n": n } })
}

fn paged(limit: u32) -> OperatorSettings {
    OperatorSettings::default().pagination_limit(NonZeroU32::new(limit).unwrap())
}

#[tokio::test]
async fn lister_follows_continue_tokens() {
    let (client, fakeserver) = testcontext();
    let mocksrv = fakeserver.run(Scenario::PaginatedList);

    let snapshot = list_objects(&client, &paged(1), &kopfexamples(), &Namespace::named("default"))
        .await
        .unwrap();
    assert_eq!(snapshot.resource_version.as_deref(), Some("2"));
    assert_eq!(snapshot.items.len(), 2);
    assert_eq!(snapshot.items[0].get("spec").unwrap()["n"], 1);
    assert_eq!(snapshot.items[1].get("spec").unwrap()["n"], 2);
    for item in &snapshot.items {
        assert_eq!(item.kind(), Some("KopfExample"));
        assert_eq!(item.api_version(), Some("kopf.dev/v1"));
    }
    timeout_after_1s(mocksrv).await;
}

#[tokio::test]
async fn lister_sends_no_limit_by_default() {
    let (client, fakeserver) = testcontext();
    let mocksrv = fakeserver.run(Scenario::SinglePage);

    let snapshot = list_objects(&client, &OperatorSettings::default(), &kopfexamples(), &Namespace::All)
        .await
        .unwrap();
    assert_eq!(snapshot.items.len(), 3);
    assert_eq!(snapshot.resource_version.as_deref(), Some("42"));
    timeout_after_1s(mocksrv).await;
}

#[tokio::test]
async fn lister_surfaces_expired_continue() {
    let (client, fakeserver) = testcontext();
    let mocksrv = fakeserver.run(Scenario::ExpiredContinue);

    let err = list_objects(&client, &paged(1), &kopfexamples(), &Namespace::named("default"))
        .await
        .unwrap_err();
    match err {
        Error::Api(ae) => {
            assert_eq!(ae.code, 410);
            assert_eq!(ae.reason, "Expired");
        }
        other => panic!("unexpected error {other:?}"),
    }
    timeout_after_1s(mocksrv).await;
}

#[tokio::test]
async fn dropping_the_listing_abandons_it() {
    let (client, fakeserver) = testcontext();
    let mocksrv = fakeserver.run(Scenario::RadioSilence);

    let (settings, kex) = (paged(1), kopfexamples());
    let listing = list_objects(&client, &settings, &kex, &Namespace::All);
    let res = tokio::time::timeout(std::time::Duration::from_millis(100), listing).await;
    assert!(res.is_err(), "listing should still be waiting on the first page");
    // the timed out listing held the last other handle to the service
    drop(client);
    timeout_after_1s(mocksrv).await;
}

// ------------------------------------------------------------------------
// mock test setup cruft
// ------------------------------------------------------------------------

// We wrap tower_test::mock::Handle
type ApiServerHandle = tower_test::mock::Handle<Request<Body>, Response<Body>>;
struct ApiServerVerifier(ApiServerHandle);

async fn timeout_after_1s(handle: tokio::task::JoinHandle<()>) {
    tokio::time::timeout(std::time::Duration::from_secs(1), handle)
        .await
        .expect("timeout on mock apiserver")
        .expect("scenario succeeded")
}

/// Scenarios we test for in ApiServerVerifier above
enum Scenario {
    PaginatedList,
    SinglePage,
    ExpiredContinue,
    RadioSilence,
}

impl ApiServerVerifier {
    /// Tests only get to run specific scenarios that has matching handlers
    ///
    /// NB: If the test is causing more calls than we are handling in the scenario,
    /// you then typically see a `Service(Closed(()))` error from the test.
    ///
    /// You should await the `JoinHandle` (with a timeout) from this function to ensure that the
    /// scenario runs to completion (i.e. all expected calls were responded to),
    /// using the timeout to catch missing api calls.
    fn run(self, scenario: Scenario) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            // moving self => one scenario per test
            match scenario {
                Scenario::PaginatedList => self.handle_paged_lists().await,
                Scenario::SinglePage => self.handle_single_page().await,
                Scenario::ExpiredContinue => self.handle_expired_continue().await,
                Scenario::RadioSilence => self.handle_radio_silence().await,
            }
            .expect("scenario completed without errors");
        })
    }

    // chainable scenario handlers

    async fn handle_paged_lists(mut self) -> Result<Self> {
        {
            let (request, send) = self.0.next_request().await.expect("service not called 1");
            assert_eq!(request.method(), http::Method::GET);
            let req_uri = request.uri().to_string();
            assert_eq!(req_uri, "/apis/kopf.dev/v1/namespaces/default/kopfexamples?limit=1");

            let respdata = json!({
                "kind": "KopfExampleList",
                "apiVersion": "kopf.dev/v1",
                "metadata": {
                    "continue": "first",
                    "resourceVersion": "1"
                },
                "items": [example(1)]
            });
            send.send_response(respond(StatusCode::OK, &respdata)?);
        }
        {
            // we expect another list GET because we included a continue token
            let (request, send) = self.0.next_request().await.expect("service not called 2");
            assert_eq!(request.method(), http::Method::GET);
            let req_uri = request.uri().to_string();
            assert!(req_uri.contains("limit=1&continue=first"));
            let respdata = json!({
                "kind": "KopfExampleList",
                "apiVersion": "kopf.dev/v1",
                "metadata": {
                    "continue": "",
                    "resourceVersion": "2"
                },
                "items": [example(2)]
            });
            send.send_response(respond(StatusCode::OK, &respdata)?);
        }
        Ok(self)
    }

    async fn handle_single_page(mut self) -> Result<Self> {
        let (request, send) = self.0.next_request().await.expect("service not called");
        assert_eq!(request.uri().to_string(), "/apis/kopf.dev/v1/kopfexamples");
        let respdata = json!({
            "kind": "KopfExampleList",
            "apiVersion": "kopf.dev/v1",
            "metadata": { "resourceVersion": "42" },
            "items": [example(1), example(2), example(3)]
        });
        send.send_response(respond(StatusCode::OK, &respdata)?);
        Ok(self)
    }

    async fn handle_expired_continue(mut self) -> Result<Self> {
        {
            let (_request, send) = self.0.next_request().await.expect("service not called 1");
            let respdata = json!({
                "kind": "KopfExampleList",
                "apiVersion": "kopf.dev/v1",
                "metadata": { "continue": "stale", "resourceVersion": "1" },
                "items": [example(1)]
            });
            send.send_response(respond(StatusCode::OK, &respdata)?);
        }
        {
            let (request, send) = self.0.next_request().await.expect("service not called 2");
            assert!(request.uri().to_string().contains("continue=stale"));
            let status = json!({
                "kind": "Status",
                "apiVersion": "v1",
                "metadata": {},
                "status": "Failure",
                "message": "The provided continue parameter is too old to display a consistent list result.",
                "reason": "Expired",
                "code": 410
            });
            send.send_response(respond(StatusCode::GONE, &status)?);
        }
        Ok(self)
    }

    async fn handle_radio_silence(mut self) -> Result<Self> {
        // take the first page request and never answer it while the caller is waiting
        let (request, send) = self.0.next_request().await.expect("service not called");
        assert!(request.uri().to_string().ends_with("?limit=1"));
        // no continue request may follow: the channel closes once the listing and client are gone
        assert!(self.0.next_request().await.is_none(), "abandoned listing kept requesting");
        // a late answer goes nowhere
        send.send_response(respond(StatusCode::OK, &json!({ "items": [example(1)] }))?);
        Ok(self)
    }
}

fn respond(status: StatusCode, data: &Value) -> Result<Response<Body>> {
    // respond as the apiserver would have
    let body = serde_json::to_vec(data)?;
    Ok(Response::builder().status(status).body(Body::from(body))?)
}

// Create a test context with a mocked client
fn testcontext() -> (Client, ApiServerVerifier) {
    let (mock_service, handle) = tower_test::mock::pair::<Request<Body>, Response<Body>>();
    let mock_client = Client::new(mock_service);
    (mock_client, ApiServerVerifier(handle))
}
