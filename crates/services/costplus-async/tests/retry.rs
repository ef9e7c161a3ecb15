use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use costplus_async::types::SearchMedicinesVariables;
use costplus_async::{Client, CostPlusConfig, ErrorKind, RetryPolicy};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client_fast_retry(server: &MockServer) -> Client {
    let config = CostPlusConfig::new().with_api_base(server.uri());
    Client::with_config(config).with_policy(RetryPolicy {
        max_attempts: 3,
        base_delay: Duration::from_millis(10),
    })
}

fn search_vars(term: &str) -> SearchMedicinesVariables {
    SearchMedicinesVariables {
        medication_search: Some(term.to_string()),
    }
}

/// In-memory log sink for asserting on structured fields.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// Extracts every logged `correlation_id` field value, in order.
    fn correlation_ids(&self) -> Vec<String> {
        let output = self.contents();
        output
            .match_indices("correlation_id=")
            .filter_map(|(start, marker)| {
                output[start + marker.len()..]
                    .split_whitespace()
                    .next()
                    .map(str::to_string)
            })
            .collect()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
async fn retry_429_then_success() {
    let server = MockServer::start().await;

    // First request returns 429, second returns success
    Mock::given(method("POST"))
        .and(path("/graphql/"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Rate limit exceeded"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/graphql/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {
                "products": {
                    "edges": [{"node": {"id": "UHJvZHVjdDox", "name": "Metformin"}}]
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client_fast_retry(&server);
    let resp = client
        .medications()
        .search(search_vars("metformin"))
        .await
        .unwrap();

    assert_eq!(resp.data.products.edges.len(), 1);
    assert_eq!(resp.data.products.edges[0].node.name, "Metformin");
}

#[tokio::test]
async fn retry_500_then_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/graphql/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"products": {"edges": []}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client_fast_retry(&server);
    let resp = client
        .medications()
        .search(search_vars("metformin"))
        .await
        .unwrap();

    assert!(resp.data.products.edges.is_empty());
}

#[tokio::test]
async fn exhausted_attempts_surface_last_classification() {
    let server = MockServer::start().await;

    // Always rate-limited: exactly max_attempts requests, then the terminal
    // error keeps the rate-limit classification.
    Mock::given(method("POST"))
        .and(path("/graphql/"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Rate limit exceeded"))
        .expect(3)
        .mount(&server)
        .await;

    let client = test_client_fast_retry(&server);
    let err = client
        .medications()
        .search(search_vars("metformin"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::RateLimit);
    assert_eq!(err.details.status, Some(429));
}

#[tokio::test]
async fn non_retryable_status_fails_on_first_attempt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql/"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client_fast_retry(&server);
    let err = client
        .medications()
        .search(search_vars("metformin"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Unknown);
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn invalid_json_body_fails_on_first_attempt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway error</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client_fast_retry(&server);
    let err = client
        .medications()
        .search(search_vars("metformin"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::InvalidResponse);
    assert!(!err.details.empty_body);
    assert_eq!(
        err.details.response_snippet.as_deref(),
        Some("<html>gateway error</html>")
    );
}

#[tokio::test]
async fn empty_body_is_invalid_response_and_flagged() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client_fast_retry(&server);
    let err = client
        .medications()
        .search(search_vars("metformin"))
        .await
        .unwrap_err();

    // Same kind as unparsable JSON, but distinguishable via the flag.
    assert_eq!(err.kind, ErrorKind::InvalidResponse);
    assert!(err.details.empty_body);
}

#[tokio::test]
async fn terminal_errors_carry_correlation_ids() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql/"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let client = test_client_fast_retry(&server);
    let first = client
        .medications()
        .search(search_vars("a"))
        .await
        .unwrap_err();
    let second = client
        .medications()
        .search(search_vars("b"))
        .await
        .unwrap_err();

    assert!(first.correlation_id.starts_with("costplus-"));
    assert!(second.correlation_id.starts_with("costplus-"));
    // Each logical request gets its own id.
    assert_ne!(first.correlation_id, second.correlation_id);
}

#[tokio::test]
async fn correlation_id_is_stable_across_attempts() {
    let server = MockServer::start().await;

    // Always rate-limited, so the full attempt budget is spent and every
    // attempt logs its classified failure.
    Mock::given(method("POST"))
        .and(path("/graphql/"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Rate limit exceeded"))
        .expect(3)
        .mount(&server)
        .await;

    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .without_time()
        .with_writer(logs.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let client = test_client_fast_retry(&server);
    let err = client
        .medications()
        .search(search_vars("metformin"))
        .await
        .unwrap_err();

    // One id is minted per logical request: every logged attempt carries the
    // same id the terminal error surfaces.
    let ids = logs.correlation_ids();
    assert_eq!(ids.len(), 3);
    assert!(ids.iter().all(|id| *id == err.correlation_id));
}
