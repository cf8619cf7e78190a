//! Transport behaviour against real sockets.

use std::net::TcpListener;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use checkmk::http::{
    Credential, HttpError, Payload, RequestSpec, RetryPolicy, Route, SessionSettings, Transport,
};
use serde_json::json;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn unused_local_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}

#[tokio::test]
async fn test_connection_failures_return_the_original_error() {
    let transport = Transport::new(
        SessionSettings::default(),
        RetryPolicy::new(3, Duration::from_millis(10)),
    );
    let route = Route::get(unused_local_url(), "version");

    let err = transport.execute(RequestSpec::new(route)).await.unwrap_err();

    match err {
        HttpError::RequestFailed(e) => assert!(e.is_connect(), "{e:?}"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_faults_are_retried_with_backoff() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/", listener.local_addr().unwrap());
    let accepts = Arc::new(AtomicUsize::new(0));
    let server = tokio::spawn({
        let accepts = accepts.clone();
        async move {
            loop {
                let (socket, _) = listener.accept().await.unwrap();
                accepts.fetch_add(1, Ordering::SeqCst);
                drop(socket);
            }
        }
    });

    let transport = Transport::new(
        SessionSettings::default(),
        RetryPolicy::new(3, Duration::from_millis(100)),
    );
    let started = Instant::now();

    let err = transport
        .execute(RequestSpec::new(Route::get(url, "version")))
        .await
        .unwrap_err();

    let elapsed = started.elapsed();
    server.abort();
    assert!(matches!(err, HttpError::RequestFailed(_)), "{err:?}");
    assert_eq!(accepts.load(Ordering::SeqCst), 3);
    // 100ms + 200ms of backoff between the three attempts
    assert!(elapsed >= Duration::from_millis(300), "{elapsed:?}");
}

#[tokio::test]
async fn test_request_is_sent_as_specified() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/objects"))
        .and(query_param("fields", "name"))
        .and(header("authorization", "Bearer abc"))
        .and(header("x-request-id", "42"))
        .and(header("content-type", "text/plain"))
        .and(body_string(r#"{"columns":["name"]}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let transport = Transport::default().with_credential(Credential::bearer("abc"));
    let spec = RequestSpec::new(Route::post(format!("{}/api/", mock_server.uri()), "objects"))
        .query("fields", "name")
        .header("X-Request-Id", "42")
        .header("Content-Type", "text/plain")
        .raw("ignored")
        .json(json!({"columns": ["name"]}));

    let response = transport.execute(spec).await.unwrap();

    assert_eq!(response.payload, Payload::Json(json!({"ok": true})));
}

#[tokio::test]
async fn test_non_json_success_is_returned_as_text() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{broken", "application/json"))
        .mount(&mock_server)
        .await;

    let transport = Transport::default();
    let response = transport
        .execute(RequestSpec::new(Route::get(mock_server.uri(), "/")))
        .await
        .unwrap();

    assert_eq!(response.payload, Payload::Text("{broken".to_string()));
}

#[tokio::test]
async fn test_rate_limit_honours_retry_after() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let transport = Transport::default();
    let response = transport
        .execute(RequestSpec::new(Route::get(mock_server.uri(), "/")))
        .await
        .unwrap();

    assert_eq!(response.payload, Payload::Text("ok".to_string()));
}
