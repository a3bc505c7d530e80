use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use worksync_core::gateway::schema::STRATEGY_SCHEMA;
use worksync_core::{
    AiGateway, GatewayError, GeminiClient, GeminiConfig, ModelGateway, TextGenerator,
};

const GENERATE_PATH: &str = "/v1beta/models/gemini-test:generateContent";

fn client_for(base: String) -> GeminiClient {
    let mut config = GeminiConfig::new("test-key");
    config.api_base = base;
    config.model = "gemini-test".to_string();
    config.timeout = Duration::from_secs(5);
    GeminiClient::new(config).unwrap()
}

fn candidate_envelope(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }], "role": "model" },
            "finishReason": "STOP"
        }]
    })
}

async fn mount_generate(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn generate_posts_prompt_and_schema_and_returns_text() {
    let server = MockServer::start().await;
    mount_generate(
        &server,
        ResponseTemplate::new(200).set_body_json(candidate_envelope(
            r#"{"title":"Focus","content":"- one"}"#,
        )),
    )
    .await;

    let base = format!("{}/v1beta", server.uri());
    let text = tokio::task::spawn_blocking(move || {
        client_for(base).generate("make a plan", &STRATEGY_SCHEMA)
    })
    .await
    .unwrap()
    .unwrap();
    assert_eq!(text, r#"{"title":"Focus","content":"- one"}"#);

    let request = &server.received_requests().await.unwrap()[0];
    let body = request.body_json::<serde_json::Value>().unwrap();
    assert_eq!(body["contents"][0]["role"], "user");
    assert_eq!(body["contents"][0]["parts"][0]["text"], "make a plan");
    assert_eq!(
        body["generationConfig"]["responseMimeType"],
        "application/json"
    );
    assert_eq!(
        body["generationConfig"]["responseSchema"]["required"],
        serde_json::json!(["title", "content"])
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn model_gateway_over_http_decodes_strategy() {
    let server = MockServer::start().await;
    mount_generate(
        &server,
        ResponseTemplate::new(200).set_body_json(candidate_envelope(
            r##"{"title":"Win SMB","content":"# Steps"}"##,
        )),
    )
    .await;

    let base = format!("{}/v1beta", server.uri());
    let draft = tokio::task::spawn_blocking(move || {
        ModelGateway::new(client_for(base)).generate_strategy("win small businesses")
    })
    .await
    .unwrap()
    .unwrap();
    assert_eq!(draft.title, "Win SMB");
    assert_eq!(draft.content, "# Steps");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn api_error_envelope_becomes_gateway_error() {
    let server = MockServer::start().await;
    mount_generate(
        &server,
        ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "error": {
                "code": 403,
                "message": "API key not valid",
                "status": "PERMISSION_DENIED"
            }
        })),
    )
    .await;

    let base = format!("{}/v1beta", server.uri());
    let err = tokio::task::spawn_blocking(move || {
        client_for(base).generate("anything", &STRATEGY_SCHEMA)
    })
    .await
    .unwrap()
    .unwrap_err();
    match err {
        GatewayError::ApiResponse {
            status,
            message,
            error_type,
        } => {
            assert_eq!(status, 403);
            assert_eq!(message, "API key not valid");
            assert_eq!(error_type.as_deref(), Some("PERMISSION_DENIED"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn safety_stop_is_reported_as_blocked() {
    let server = MockServer::start().await;
    mount_generate(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        })),
    )
    .await;

    let base = format!("{}/v1beta", server.uri());
    let err = tokio::task::spawn_blocking(move || {
        client_for(base).generate("anything", &STRATEGY_SCHEMA)
    })
    .await
    .unwrap()
    .unwrap_err();
    assert!(matches!(err, GatewayError::Blocked(_)), "{err}");
}

#[test]
fn unreachable_endpoint_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}/v1beta", listener.local_addr().unwrap());
    drop(listener);

    let err = client_for(base)
        .generate("anything", &STRATEGY_SCHEMA)
        .unwrap_err();
    assert!(matches!(err, GatewayError::Network(_)), "{err}");
}
