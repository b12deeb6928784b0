use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use voxscribe::application::ports::{Transcriber, TranscriberError};
use voxscribe::infrastructure::transcription::{HfInferenceClient, RetryPolicy};

/// Scripted mock of the inference endpoint: response `n` answers request `n`,
/// the last entry repeats once the script runs out.
#[derive(Clone)]
struct ModelScript {
    hits: Arc<AtomicUsize>,
    responses: Arc<Vec<(u16, &'static str)>>,
    auth_headers: Arc<Mutex<Vec<Option<String>>>>,
}

async fn model_handler(State(script): State<ModelScript>, headers: HeaderMap) -> impl IntoResponse {
    let hit = script.hits.fetch_add(1, Ordering::SeqCst);
    script.auth_headers.lock().unwrap().push(
        headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .map(String::from),
    );

    let (status, body) = script
        .responses
        .get(hit)
        .copied()
        .unwrap_or_else(|| *script.responses.last().unwrap());

    (StatusCode::from_u16(status).unwrap(), body.to_string())
}

async fn start_mock_model_server(
    responses: Vec<(u16, &'static str)>,
) -> (String, ModelScript, oneshot::Sender<()>) {
    let script = ModelScript {
        hits: Arc::new(AtomicUsize::new(0)),
        responses: Arc::new(responses),
        auth_headers: Arc::new(Mutex::new(Vec::new())),
    };

    let app = Router::new()
        .route("/models/test-model", post(model_handler))
        .with_state(script.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (format!("http://{}", addr), script, shutdown_tx)
}

fn client(base_url: String, token: Option<&str>, retry: RetryPolicy) -> HfInferenceClient {
    HfInferenceClient::new(
        "test-model",
        token.map(String::from),
        Some(base_url),
        retry,
    )
}

#[test]
fn given_two_second_initial_delay_when_computing_backoff_then_delay_doubles_per_attempt() {
    let policy = RetryPolicy {
        max_retries: 5,
        initial_delay: Duration::from_secs(2),
    };

    assert_eq!(policy.delay_for(0), Duration::from_secs(2));
    assert_eq!(policy.delay_for(1), Duration::from_secs(4));
    assert_eq!(policy.delay_for(2), Duration::from_secs(8));
    assert_eq!(policy.delay_for(3), Duration::from_secs(16));
}

#[tokio::test(start_paused = true)]
async fn given_model_loading_twice_when_warming_up_then_third_attempt_succeeds_with_exact_backoff()
{
    let (base_url, script, shutdown_tx) = start_mock_model_server(vec![
        (503, ""),
        (503, ""),
        (200, r#"{"text": ""}"#),
    ])
    .await;

    let client = client(
        base_url,
        None,
        RetryPolicy {
            max_retries: 5,
            initial_delay: Duration::from_secs(2),
        },
    );

    let start = tokio::time::Instant::now();
    let warmed = client.warm_up().await;
    let elapsed = start.elapsed();

    assert!(warmed);
    assert!(client.is_warm());
    assert_eq!(script.hits.load(Ordering::SeqCst), 3);
    // Attempt 0 waits 2s, attempt 1 waits 4s; the paused clock makes the
    // schedule exact.
    assert!(
        elapsed >= Duration::from_secs(6),
        "expected 2s + 4s of backoff, got {:?}",
        elapsed
    );
    assert!(
        elapsed < Duration::from_secs(7),
        "backoff overshot: {:?}",
        elapsed
    );

    shutdown_tx.send(()).ok();
}

#[tokio::test(start_paused = true)]
async fn given_unexpected_status_when_warming_up_then_fails_immediately_without_backoff() {
    let (base_url, script, shutdown_tx) =
        start_mock_model_server(vec![(500, "internal error")]).await;

    let client = client(
        base_url,
        None,
        RetryPolicy {
            max_retries: 5,
            initial_delay: Duration::from_secs(2),
        },
    );

    let start = tokio::time::Instant::now();
    let warmed = client.warm_up().await;
    let elapsed = start.elapsed();

    assert!(!warmed);
    assert!(!client.is_warm());
    assert_eq!(script.hits.load(Ordering::SeqCst), 1);
    assert!(elapsed < Duration::from_secs(1), "no backoff expected, got {:?}", elapsed);

    shutdown_tx.send(()).ok();
}

#[tokio::test(start_paused = true)]
async fn given_model_never_ready_when_warming_up_then_retries_exhaust_and_return_failure() {
    let (base_url, script, shutdown_tx) = start_mock_model_server(vec![(503, "")]).await;

    let client = client(
        base_url,
        None,
        RetryPolicy {
            max_retries: 2,
            initial_delay: Duration::from_secs(1),
        },
    );

    let start = tokio::time::Instant::now();
    let warmed = client.warm_up().await;
    let elapsed = start.elapsed();

    assert!(!warmed);
    assert_eq!(script.hits.load(Ordering::SeqCst), 2);
    // 1s after attempt 0, 2s after attempt 1.
    assert!(elapsed >= Duration::from_secs(3), "got {:?}", elapsed);
    assert!(elapsed < Duration::from_secs(4), "got {:?}", elapsed);

    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_ready_model_when_transcribing_then_returns_trimmed_text() {
    let (base_url, script, shutdown_tx) =
        start_mock_model_server(vec![(200, r#"{"text": "  Hello there  "}"#)]).await;

    let client = client(base_url, None, RetryPolicy::default());

    let result = client.transcribe(b"fake wav bytes").await.unwrap();

    assert_eq!(result.text, "Hello there");
    assert!(result.raw_response.get("text").is_some());
    assert_eq!(script.hits.load(Ordering::SeqCst), 1);
    assert!(client.is_warm());

    shutdown_tx.send(()).ok();
}

#[tokio::test(start_paused = true)]
async fn given_cold_model_when_transcribing_then_one_warm_up_cycle_and_one_retry() {
    let (base_url, script, shutdown_tx) = start_mock_model_server(vec![
        (503, ""),
        (200, r#"{"text": ""}"#),
        (200, r#"{"text": "second try"}"#),
    ])
    .await;

    let client = client(
        base_url,
        None,
        RetryPolicy {
            max_retries: 5,
            initial_delay: Duration::from_secs(2),
        },
    );

    let result = client.transcribe(b"fake wav bytes").await.unwrap();

    // Request 1: 503. Request 2: the warm-up probe answered 200. Request 3:
    // the single transcription retry.
    assert_eq!(script.hits.load(Ordering::SeqCst), 3);
    assert_eq!(result.text, "second try");

    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_client_error_status_when_transcribing_then_returns_unexpected_status() {
    let (base_url, _script, shutdown_tx) =
        start_mock_model_server(vec![(400, "bad audio")]).await;

    let client = client(base_url, None, RetryPolicy::default());

    let result = client.transcribe(b"bad bytes").await;

    assert!(matches!(
        result,
        Err(TranscriberError::UnexpectedStatus { status: 400, .. })
    ));

    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_unparsable_body_when_transcribing_then_returns_invalid_response() {
    let (base_url, _script, shutdown_tx) =
        start_mock_model_server(vec![(200, "not json at all")]).await;

    let client = client(base_url, None, RetryPolicy::default());

    let result = client.transcribe(b"bytes").await;

    assert!(matches!(result, Err(TranscriberError::InvalidResponse(_))));

    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_missing_text_field_when_transcribing_then_returns_invalid_response() {
    let (base_url, _script, shutdown_tx) =
        start_mock_model_server(vec![(200, r#"{"error": "no text"}"#)]).await;

    let client = client(base_url, None, RetryPolicy::default());

    let result = client.transcribe(b"bytes").await;

    assert!(matches!(result, Err(TranscriberError::InvalidResponse(_))));

    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_configured_token_when_transcribing_then_sends_bearer_authorization() {
    let (base_url, script, shutdown_tx) =
        start_mock_model_server(vec![(200, r#"{"text": "ok"}"#)]).await;

    let client = client(base_url, Some("test-token"), RetryPolicy::default());

    client.transcribe(b"bytes").await.unwrap();

    let headers = script.auth_headers.lock().unwrap();
    assert_eq!(headers[0].as_deref(), Some("Bearer test-token"));

    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_no_token_when_transcribing_then_sends_no_authorization_header() {
    let (base_url, script, shutdown_tx) =
        start_mock_model_server(vec![(200, r#"{"text": "ok"}"#)]).await;

    let client = client(base_url, None, RetryPolicy::default());

    client.transcribe(b"bytes").await.unwrap();

    let headers = script.auth_headers.lock().unwrap();
    assert_eq!(headers[0], None);

    shutdown_tx.send(()).ok();
}
