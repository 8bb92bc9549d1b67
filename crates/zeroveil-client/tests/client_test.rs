//! Integration tests for the retrying client
//!
//! Uses a scripted in-memory transport and tokio's paused clock so backoff
//! sleeps can be measured exactly.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;
use zeroveil_client::{
    ClientError, Message, RelayRequest, Role, SendOptions, Transport, TransportError,
    TransportResponse, ZeroVeilClient,
};
use zeroveil_core::ZeroVeilConfig;

type Outcome = Result<TransportResponse, TransportError>;

/// Transport that replays a fixed script and records every request.
struct ScriptedTransport {
    script: Mutex<VecDeque<Outcome>>,
    requests: Mutex<Vec<RelayRequest>>,
}

impl ScriptedTransport {
    fn new(script: Vec<Outcome>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn request(&self, index: usize) -> RelayRequest {
        self.requests.lock().unwrap()[index].clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post_json(&self, request: &RelayRequest) -> Result<TransportResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Other("script exhausted".to_string())))
    }
}

fn test_config() -> ZeroVeilConfig {
    ZeroVeilConfig::default()
        .with_endpoint("https://relay.test/v1/")
        .with_api_key("zv-test-key")
}

fn client_with(transport: &Arc<ScriptedTransport>) -> ZeroVeilClient {
    ZeroVeilClient::with_transport(test_config(), transport.clone()).expect("create client")
}

fn ok_reply(content: &str) -> Outcome {
    Ok(TransportResponse::new(
        200,
        serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}],
            "usage": {"prompt_tokens": 5, "completion_tokens": 2, "total_tokens": 7},
            "model": "relay-model"
        })
        .to_string(),
    ))
}

fn refused() -> Outcome {
    Err(TransportError::Connect("connection refused".to_string()))
}

#[tokio::test(start_paused = true)]
async fn test_success_on_first_attempt() {
    let transport = ScriptedTransport::new(vec![ok_reply("Paris")]);
    let client = client_with(&transport);
    let start = Instant::now();

    let response = client
        .send("What is the capital of France?", Some("Be brief"))
        .await
        .expect("send succeeds");

    assert_eq!(response.content, "Paris");
    assert_eq!(response.model.as_deref(), Some("relay-model"));
    assert_eq!(response.usage.and_then(|u| u.total()), Some(7));
    assert_eq!(transport.calls(), 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_request_shape() {
    let transport = ScriptedTransport::new(vec![ok_reply("ok")]);
    let client = client_with(&transport);

    client
        .send("Hello", Some("You are helpful"))
        .await
        .expect("send succeeds");

    let request = transport.request(0);
    assert_eq!(request.url, "https://relay.test/v1/chat/completions");
    assert_eq!(request.authorization(), "Bearer zv-test-key");
    assert!(request.body.zdr_only);
    assert_eq!(request.body.messages.len(), 2);
    assert_eq!(request.body.messages[0].role, Role::System);
    assert_eq!(request.body.messages[0].content, "You are helpful");
    assert_eq!(request.body.messages[1].role, Role::User);
    assert_eq!(request.body.messages[1].content, "Hello");
}

#[tokio::test(start_paused = true)]
async fn test_no_system_message_when_absent_or_empty() {
    let transport = ScriptedTransport::new(vec![ok_reply("a"), ok_reply("b")]);
    let client = client_with(&transport);

    client.send("one", None).await.expect("send succeeds");
    client.send("two", Some("")).await.expect("send succeeds");

    for index in 0..2 {
        let request = transport.request(index);
        assert_eq!(request.body.messages.len(), 1);
        assert_eq!(request.body.messages[0].role, Role::User);
    }
}

#[tokio::test(start_paused = true)]
async fn test_send_messages_preserves_order_and_flag() {
    let transport = ScriptedTransport::new(vec![ok_reply("4")]);
    let client = client_with(&transport);

    let conversation = vec![
        Message::system("You do arithmetic"),
        Message::user("2+2?"),
        Message::assistant("4"),
        Message::user("And again?"),
    ];

    client
        .send_messages_with(
            conversation.clone(),
            SendOptions::default().with_zdr_only(false),
        )
        .await
        .expect("send succeeds");

    let request = transport.request(0);
    assert_eq!(request.body.messages, conversation);
    assert!(!request.body.zdr_only);
}

#[tokio::test(start_paused = true)]
async fn test_every_attempt_fails() {
    for max_retries in 1..=4u32 {
        let script = (0..max_retries).map(|_| refused()).collect();
        let transport = ScriptedTransport::new(script);
        let client = client_with(&transport);
        let start = Instant::now();

        let err = client
            .send_with(
                "hi",
                None,
                SendOptions::default().with_max_retries(max_retries),
            )
            .await
            .expect_err("all attempts fail");

        match err {
            ClientError::Network { attempts, source } => {
                assert_eq!(attempts, max_retries);
                assert!(matches!(source, TransportError::Connect(_)));
            }
            other => panic!("expected Network error, got {other:?}"),
        }
        assert_eq!(transport.calls(), max_retries as usize);

        // Sum of 2^i for i in 0..max_retries-1
        let expected_secs = (1u64 << (max_retries - 1)) - 1;
        assert_eq!(start.elapsed(), Duration::from_secs(expected_secs));
    }
}

#[tokio::test(start_paused = true)]
async fn test_recovers_on_third_attempt() {
    let transport = ScriptedTransport::new(vec![
        refused(),
        Err(TransportError::Timeout),
        ok_reply("third time lucky"),
    ]);
    let client = client_with(&transport);
    let start = Instant::now();

    let response = client.send("hi", None).await.expect("third attempt succeeds");

    assert_eq!(response.content, "third time lucky");
    assert_eq!(transport.calls(), 3);
    // Two sleeps: 1s then 2s
    assert_eq!(start.elapsed(), Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn test_http_error_status_is_retried() {
    let transport = ScriptedTransport::new(vec![
        Ok(TransportResponse::new(503, "Service Unavailable")),
        ok_reply("recovered"),
    ]);
    let client = client_with(&transport);

    let response = client.send("hi", None).await.expect("retry succeeds");
    assert_eq!(response.content, "recovered");
    assert_eq!(transport.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_status_error_surfaces_after_budget() {
    let transport = ScriptedTransport::new(vec![
        Ok(TransportResponse::new(500, "boom")),
        Ok(TransportResponse::new(401, "bad key")),
    ]);
    let client = client_with(&transport);

    let err = client
        .send_with("hi", None, SendOptions::default().with_max_retries(2))
        .await
        .expect_err("both attempts fail");

    assert!(err.is_retryable());
    assert!(matches!(
        err,
        ClientError::Network {
            attempts: 2,
            source: TransportError::Status { status: 401, .. }
        }
    ));
}

#[tokio::test(start_paused = true)]
async fn test_invalid_json_is_retried() {
    let transport = ScriptedTransport::new(vec![
        Ok(TransportResponse::new(200, "<html>gateway</html>")),
        ok_reply("fine"),
    ]);
    let client = client_with(&transport);

    let response = client.send("hi", None).await.expect("retry succeeds");
    assert_eq!(response.content, "fine");
    assert_eq!(transport.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_empty_choices_not_retried() {
    let transport = ScriptedTransport::new(vec![
        Ok(TransportResponse::new(200, r#"{"choices": []}"#)),
        ok_reply("never reached"),
    ]);
    let client = client_with(&transport);
    let start = Instant::now();

    let err = client
        .send_with("hi", None, SendOptions::default().with_max_retries(5))
        .await
        .expect_err("empty choices fails");

    assert!(matches!(err, ClientError::EmptyResponse));
    assert!(!err.is_retryable());
    assert_eq!(transport.calls(), 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_unusual_usage_is_not_retried() {
    let body = serde_json::json!({
        "choices": [{"message": {"content": "Paris"}}],
        "usage": {"prompt_tokens": 12, "completion_tokens": 1, "total_tokens": 13.0, "cost": "0.01"},
        "model": null
    });
    let transport = ScriptedTransport::new(vec![
        Ok(TransportResponse::new(200, body.to_string())),
        ok_reply("never reached"),
    ]);
    let client = client_with(&transport);
    let start = Instant::now();

    let response = client.send("capital?", None).await.expect("good reply accepted");

    assert_eq!(response.content, "Paris");
    assert!(response.model.is_none());
    let usage = response.usage.expect("usage kept");
    assert_eq!(usage.total(), Some(13));
    assert_eq!(usage.extra.get("cost"), Some(&serde_json::json!("0.01")));
    assert_eq!(transport.calls(), 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_zero_max_retries_rejected_without_network() {
    let transport = ScriptedTransport::new(vec![ok_reply("unused")]);
    let client = client_with(&transport);

    let err = client
        .send_with("hi", None, SendOptions::default().with_max_retries(0))
        .await
        .expect_err("zero budget rejected");

    assert!(matches!(err, ClientError::InvalidRequest(_)));
    assert_eq!(transport.calls(), 0);
}

#[test]
fn test_construction_without_key_fails_immediately() {
    let transport = ScriptedTransport::new(Vec::new());
    let result = ZeroVeilClient::with_transport(ZeroVeilConfig::default(), transport.clone());

    assert!(matches!(result, Err(ClientError::AuthConfiguration)));
    assert_eq!(transport.calls(), 0);
}
