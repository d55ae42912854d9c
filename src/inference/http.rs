//! HTTP inference client for Bedrock-style invoke endpoints.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use tracing::debug;

use crate::config::InferenceConfig;
use crate::error::{QuillError, Result};

use super::{InferenceClient, InferenceRequest, InferenceResponse};

pub struct HttpInferenceClient {
    client: reqwest::Client,
    base_url: String,
    model_id: String,
    headers: HeaderMap,
}

impl HttpInferenceClient {
    /// Build a client with the configured connect and read timeouts baked in.
    pub fn new(config: &InferenceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| QuillError::Configuration(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model_id: config.model_id.clone(),
            headers: request_headers(config.api_key.as_deref()),
        })
    }
}

#[async_trait]
impl InferenceClient for HttpInferenceClient {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn invoke(&self, request: &InferenceRequest) -> Result<InferenceResponse> {
        let url = format!("{}/model/{}/invoke", self.base_url, self.model_id);
        let body = serde_json::json!({
            "prompt": chat_envelope(&request.prompt),
            "max_gen_len": request.max_gen_len,
            "temperature": request.temperature,
        });

        debug!(model = %self.model_id, "invoking inference endpoint");

        let resp = self
            .client
            .post(&url)
            .headers(self.headers.clone())
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }

        // Read the body as text first so a broken envelope classifies as a
        // malformed response, not a network failure.
        let raw = resp.text().await?;
        let envelope: InvokeEnvelope = serde_json::from_str(&raw)
            .map_err(|e| QuillError::MalformedResponse(format!("invalid envelope: {e}")))?;

        match envelope.generation {
            Some(text) if !text.trim().is_empty() => Ok(InferenceResponse { text }),
            Some(_) => Err(QuillError::MalformedResponse(
                "empty generation field".into(),
            )),
            None => Err(QuillError::MalformedResponse(
                "missing generation field".into(),
            )),
        }
    }
}

/// Response envelope of the invoke API. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct InvokeEnvelope {
    generation: Option<String>,
}

/// Wrap plain instruction text in the Llama 3 chat envelope the endpoint
/// expects.
fn chat_envelope(prompt: &str) -> String {
    format!(
        "<|begin_of_text|><|start_header_id|>user<|end_header_id|>\n{prompt}\n<|eot_id|>\n<|start_header_id|>assistant<|end_header_id|>\n"
    )
}

/// Build default headers, adding a Bearer token when one is configured.
fn request_headers(api_key: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(key) = api_key {
        if let Ok(val) = HeaderValue::from_str(&format!("Bearer {key}")) {
            headers.insert(reqwest::header::AUTHORIZATION, val);
        }
    }
    headers
}

/// Map a non-2xx inference status to a typed error.
fn status_to_error(status: u16, body: &str) -> QuillError {
    match status {
        408 | 504 => QuillError::Timeout(0),
        _ => QuillError::api(status, body),
    }
}
