use paste::paste;
use relay_client::{ClientBuilder, RelayClient, Url};
use relay_retry::{Error as RetryError, ExponentialBackoff};
use serde_json::{json, Value};
use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};
use std::time::Duration;
use wiremock::{
    matchers::{body_json, method, path},
    Mock, MockServer, Respond, ResponseTemplate,
};

use crate::helpers::SimpleServer;

/// Answers with `status_code` until the `succeed_on`-th call, which gets a 200.
pub struct RetryResponder(Arc<AtomicU32>, u32, u16);

impl RetryResponder {
    fn new(succeed_on: u32, status_code: u16) -> Self {
        Self(Arc::new(AtomicU32::new(0)), succeed_on, status_code)
    }
}

impl Respond for RetryResponder {
    fn respond(&self, _request: &wiremock::Request) -> ResponseTemplate {
        let calls = self.0.fetch_add(1, Ordering::SeqCst) + 1;

        if calls >= self.1 {
            ResponseTemplate::new(200).set_body_json(json!({ "attempt": calls }))
        } else {
            ResponseTemplate::new(self.2)
        }
    }
}

fn client(max_attempts: u32) -> RelayClient {
    ClientBuilder::new(reqwest::Client::new())
        .with_retry_policy(ExponentialBackoff {
            max_attempts,
            base_delay: Duration::from_millis(10),
        })
        .build()
}

fn foo_url(server: &MockServer) -> Url {
    format!("{}/foo", server.uri()).parse().unwrap()
}

macro_rules! assert_succeeds_first_time {
    ($x:tt) => {
        paste! {
            #[tokio::test]
            async fn [<assert_no_retry_on_ $x>]() {
                let server = MockServer::start().await;
                Mock::given(method("POST"))
                    .and(path("/foo"))
                    .respond_with(ResponseTemplate::new($x).set_body_json(json!({ "status": $x })))
                    .expect(1)
                    .mount(&server)
                    .await;

                let answer = client(3)
                    .post_value(foo_url(&server), json!({}))
                    .await
                    .expect("call failed");

                assert_eq!(answer, json!({ "status": $x }));
            }
        }
    };
}

macro_rules! assert_unclassified {
    ($x:tt) => {
        paste! {
            #[tokio::test]
            async fn [<assert_no_retry_and_propagate_on_ $x>]() {
                let server = MockServer::start().await;
                Mock::given(method("POST"))
                    .and(path("/foo"))
                    .respond_with(ResponseTemplate::new($x))
                    .expect(1)
                    .mount(&server)
                    .await;

                let err = client(3)
                    .post_value(foo_url(&server), json!({}))
                    .await
                    .expect_err("call should fail");

                match err {
                    relay_client::Error::Retry(RetryError::Unclassified(e)) => assert_eq!(
                        e.to_string(),
                        format!("Request failed with status code {}", $x)
                    ),
                    other => panic!("expected an unclassified error, got {other:?}"),
                }
            }
        }
    };
}

// 2xx.
assert_succeeds_first_time!(200);
assert_succeeds_first_time!(201);
assert_succeeds_first_time!(202);
assert_succeeds_first_time!(203);

// 4xx.
assert_unclassified!(400);
assert_unclassified!(401);
assert_unclassified!(402);
assert_unclassified!(404);
assert_unclassified!(405);
assert_unclassified!(408);
assert_unclassified!(409);
assert_unclassified!(422);
assert_unclassified!(429);

// 5xx. Only 500 is a server fault.
assert_unclassified!(501);
assert_unclassified!(502);
assert_unclassified!(503);
assert_unclassified!(504);

#[tokio::test]
async fn assert_retry_succeeds_on_500() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/foo"))
        .and(body_json(json!({ "title": "same every time" })))
        .respond_with(RetryResponder::new(3, 500))
        .expect(3)
        .mount(&server)
        .await;

    let answer = client(3)
        .post_value(foo_url(&server), json!({ "title": "same every time" }))
        .await
        .expect("call failed");

    assert_eq!(answer, json!({ "attempt": 3 }));
}

#[tokio::test]
async fn assert_retries_are_exhausted_on_persistent_500() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/foo"))
        .respond_with(ResponseTemplate::new(500))
        .expect(4)
        .mount(&server)
        .await;

    let err = client(4)
        .post_value(foo_url(&server), json!({}))
        .await
        .expect_err("call should fail");

    assert!(err.is_exhausted(), "got {err:?}");
    assert_eq!(err.status(), Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
}

#[tokio::test]
async fn assert_no_retry_on_403() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/foo"))
        .respond_with(RetryResponder::new(2, 403))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(3)
        .post_value(foo_url(&server), json!({}))
        .await
        .expect_err("call should fail");

    assert!(err.is_non_retryable(), "got {err:?}");
    assert_eq!(err.status(), Some(reqwest::StatusCode::FORBIDDEN));
    assert_eq!(
        err.to_string(),
        "Forbidden Access: Request failed with status code 403"
    );
}

#[tokio::test]
async fn assert_403_after_500_stops_retrying() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/foo"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/foo"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(5)
        .post_value(foo_url(&server), json!({}))
        .await
        .expect_err("call should fail");

    assert!(err.is_non_retryable(), "got {err:?}");
}

#[tokio::test]
async fn assert_no_retry_on_incomplete_message() {
    // "HTTP/1.1" is well formed up to that point but misses mandatory parts, so the
    // client sees the connection close mid-answer. That is a transport failure, which
    // is propagated instead of retried.
    let incomplete_message = "HTTP/1.1";
    let complete_message = "HTTP/1.1 200 OK\r\ncontent-length: 2\r\n\r\n{}";

    let simple_server = SimpleServer::new(
        "127.0.0.1",
        None,
        vec![
            incomplete_message.to_string(),
            complete_message.to_string(),
        ],
    )
    .await
    .expect("Error when creating a simple server");

    let uri = simple_server.uri();
    let connections = simple_server.connections();

    tokio::spawn(simple_server.start());

    let err = client(3)
        .post_value(format!("{}/foo", uri).parse().unwrap(), json!({}))
        .await
        .expect_err("call should fail");

    assert!(
        matches!(err, relay_client::Error::Retry(RetryError::Unclassified(_))),
        "got {err:?}"
    );
    assert_eq!(connections.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn assert_no_retry_on_connection_refused() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let err = client(3)
        .post_value(
            format!("http://127.0.0.1:{}/foo", port).parse().unwrap(),
            json!({}),
        )
        .await
        .expect_err("call should fail");

    match err {
        relay_client::Error::Retry(RetryError::Unclassified(e)) => {
            assert!(e.downcast_ref::<reqwest::Error>().is_some(), "got {e:?}")
        }
        other => panic!("expected the transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn assert_undecodable_success_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/foo"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&server)
        .await;

    let err: Result<Value, _> = client(3).post_value(foo_url(&server), json!({})).await;

    assert!(matches!(
        err,
        Err(relay_client::Error::Retry(RetryError::Unclassified(_)))
    ));
}
