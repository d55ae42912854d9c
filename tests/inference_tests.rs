//! HttpInferenceClient against a mock inference endpoint.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use quill::config::InferenceConfig;
use quill::error::ErrorKind;
use quill::inference::{HttpInferenceClient, InferenceClient, InferenceRequest};

fn config(base_url: &str) -> InferenceConfig {
    InferenceConfig {
        base_url: base_url.to_string(),
        api_key: Some("test-key".to_string()),
        model_id: "meta.llama3-8b-instruct-v1:0".to_string(),
        connect_timeout: Duration::from_secs(2),
        request_timeout: Duration::from_secs(5),
        ..InferenceConfig::default()
    }
}

fn request() -> InferenceRequest {
    InferenceRequest {
        prompt: "Generate a ~200 word blog on the topic: climate change".to_string(),
        max_gen_len: 512,
        temperature: 0.5,
    }
}

#[tokio::test]
async fn extracts_generation_from_success_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/model/meta.llama3-8b-instruct-v1:0/invoke"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "max_gen_len": 512,
            "temperature": 0.5,
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"generation": "Climate change is..."})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpInferenceClient::new(&config(&server.uri())).unwrap();
    let response = client.invoke(&request()).await.unwrap();

    assert_eq!(response.text, "Climate change is...");
}

#[tokio::test]
async fn wraps_prompt_in_chat_envelope_on_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "prompt": "<|begin_of_text|><|start_header_id|>user<|end_header_id|>\nGenerate a ~200 word blog on the topic: climate change\n<|eot_id|>\n<|start_header_id|>assistant<|end_header_id|>\n",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"generation": "text"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpInferenceClient::new(&config(&server.uri())).unwrap();
    client.invoke(&request()).await.unwrap();
}

#[tokio::test]
async fn missing_generation_field_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"something": "else"})))
        .mount(&server)
        .await;

    let client = HttpInferenceClient::new(&config(&server.uri())).unwrap();
    let err = client.invoke(&request()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InferenceMalformedResponse);
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn empty_generation_is_malformed_not_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"generation": ""})))
        .mount(&server)
        .await;

    let client = HttpInferenceClient::new(&config(&server.uri())).unwrap();
    let err = client.invoke(&request()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InferenceMalformedResponse);
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = HttpInferenceClient::new(&config(&server.uri())).unwrap();
    let err = client.invoke(&request()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InferenceMalformedResponse);
}

#[tokio::test]
async fn server_error_is_transient() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let client = HttpInferenceClient::new(&config(&server.uri())).unwrap();
    let err = client.invoke(&request()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InferenceUnavailable);
    assert!(err.is_retryable());
}

#[tokio::test]
async fn client_rejection_is_not_transient() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad payload"))
        .mount(&server)
        .await;

    let client = HttpInferenceClient::new(&config(&server.uri())).unwrap();
    let err = client.invoke(&request()).await.unwrap_err();

    assert!(!err.is_retryable());
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"generation": "too late"}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let mut cfg = config(&server.uri());
    cfg.request_timeout = Duration::from_millis(200);

    let client = HttpInferenceClient::new(&cfg).unwrap();
    let err = client.invoke(&request()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InferenceTimeout);
    assert!(err.is_retryable());
}

#[tokio::test]
async fn unreachable_endpoint_is_unavailable() {
    // Nothing listens on this port.
    let client = HttpInferenceClient::new(&config("http://127.0.0.1:9")).unwrap();
    let err = client.invoke(&request()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InferenceUnavailable);
    assert!(err.is_retryable());
}
